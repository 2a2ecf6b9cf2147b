use std::collections::HashSet;

use log::{info, warn};
use rayon::prelude::*;

use meshq_quantize::{Bins, Method};

use crate::aggregate::{BatchAggregator, ComparisonTable};
use crate::error::{BatchError, RunError};
use crate::run::{run_mesh, MeshInput, RunResult};

#[derive(Clone, Debug, PartialEq)]
pub struct BatchConfig {
    pub bins: Bins,
    pub methods: Vec<Method>,
    /// Fan runs out over the rayon pool instead of running them in order.
    pub parallel: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            bins: Bins::default(),
            methods: Method::ALL.to_vec(),
            parallel: true,
        }
    }
}

/// A (mesh, method) run that did not produce a result.
#[derive(Clone, Debug, PartialEq)]
pub struct RunFailure {
    pub mesh: String,
    pub method: Method,
    pub error: RunError,
}

#[derive(Clone, Debug)]
pub struct BatchReport {
    pub runs: Vec<RunResult>,
    pub failures: Vec<RunFailure>,
    /// One row per successful run, even when the batch is incomplete.
    pub table: ComparisonTable,
    /// Set when some (mesh, method) pair has no row in `table`, or a mesh id
    /// was given more than once.
    pub incomplete: Option<BatchError>,
}

impl BatchReport {
    pub fn is_complete(&self) -> bool {
        self.incomplete.is_none()
    }

    /// The table, or the completeness error if any run is missing.
    pub fn complete_table(&self) -> Result<&ComparisonTable, BatchError> {
        match &self.incomplete {
            Some(err) => Err(err.clone()),
            None => Ok(&self.table),
        }
    }
}

/// Runs every mesh through every configured method.
///
/// A failing run is recorded in [`BatchReport::failures`] and does not stop
/// its siblings. Meshes reusing an earlier mesh's id are not run; each of
/// their (mesh, method) pairs is recorded as a `DuplicateRun` failure.
pub fn run_batch(meshes: &[MeshInput], config: &BatchConfig) -> BatchReport {
    let mut methods = config.methods.clone();
    methods.sort();
    methods.dedup();

    let mut seen = HashSet::new();
    let mut unique = Vec::with_capacity(meshes.len());
    let mut failures = Vec::new();
    for mesh in meshes {
        if seen.insert(mesh.id.as_str()) {
            unique.push(mesh);
            continue;
        }
        for &method in &methods {
            let error = BatchError::DuplicateRun { mesh: mesh.id.clone(), method };
            warn!("{} [{}] skipped: {}", mesh.id, method, error);
            failures.push(RunFailure { mesh: mesh.id.clone(), method, error: error.into() });
        }
    }
    let duplicate = failures.first().and_then(|f: &RunFailure| match &f.error {
        RunError::Batch(err) => Some(err.clone()),
        RunError::Quant(_) => None,
    });

    let jobs: Vec<(&MeshInput, Method)> = unique
        .iter()
        .flat_map(|&mesh| methods.iter().map(move |&method| (mesh, method)))
        .collect();
    info!("running {} jobs ({} meshes x {} methods), bins={}", jobs.len(), meshes.len(), methods.len(), config.bins);

    let bins = config.bins;
    let outcomes: Vec<_> = if config.parallel {
        jobs.into_par_iter()
            .map(|(mesh, method)| (mesh, method, run_mesh(mesh, method, bins)))
            .collect()
    } else {
        jobs.into_iter()
            .map(|(mesh, method)| (mesh, method, run_mesh(mesh, method, bins)))
            .collect()
    };

    let mut aggregator = BatchAggregator::new(unique.iter().map(|m| m.id.clone()), &methods);
    let mut runs = Vec::with_capacity(outcomes.len());
    for (mesh, method, outcome) in outcomes {
        let pushed = outcome
            .map_err(RunError::from)
            .and_then(|run| aggregator.push(&run).map(|()| run).map_err(RunError::from));
        match pushed {
            Ok(run) => runs.push(run),
            Err(error) => {
                warn!("{} [{}] failed: {}", mesh.id, method, error);
                failures.push(RunFailure { mesh: mesh.id.clone(), method, error });
            }
        }
    }

    let incomplete = aggregator.check_complete().err().or(duplicate);
    if let Some(err) = &incomplete {
        warn!("{} ({} failed runs)", err, failures.len());
    }

    BatchReport {
        runs,
        failures,
        table: aggregator.into_table(),
        incomplete,
    }
}
