use std::collections::BTreeSet;

use serde::Serialize;

use meshq_quantize::Method;

use crate::error::BatchError;
use crate::run::RunResult;

/// Summary of one (mesh, method) run.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ComparisonRow {
    pub mesh: String,
    pub method: Method,
    pub vertex_count: usize,
    pub bins: u32,
    pub mse: f64,
    pub mae: f64,
    pub mse_per_axis: [f64; 3],
    pub mae_per_axis: [f64; 3],
}

impl From<&RunResult> for ComparisonRow {
    fn from(run: &RunResult) -> Self {
        Self {
            mesh: run.mesh.clone(),
            method: run.method,
            vertex_count: run.vertex_count,
            bins: run.bins.get(),
            mse: run.metrics.mse,
            mae: run.metrics.mae,
            mse_per_axis: run.metrics.mse_per_axis,
            mae_per_axis: run.metrics.mae_per_axis,
        }
    }
}

/// Rows in the order the runs were added.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ComparisonTable {
    rows: Vec<ComparisonRow>,
}

impl ComparisonTable {
    pub fn rows(&self) -> &[ComparisonRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, mesh: &str, method: Method) -> Option<&ComparisonRow> {
        self.rows.iter().find(|r| r.mesh == mesh && r.method == method)
    }

    /// Distinct mesh names, in first-seen order.
    pub fn meshes(&self) -> Vec<&str> {
        let mut seen = BTreeSet::new();
        self.rows
            .iter()
            .filter(|r| seen.insert(r.mesh.as_str()))
            .map(|r| r.mesh.as_str())
            .collect()
    }

    /// Distinct methods present, sorted.
    pub fn methods(&self) -> Vec<Method> {
        self.rows.iter().map(|r| r.method).collect::<BTreeSet<_>>().into_iter().collect()
    }
}

/// Collects run summaries for a known set of meshes and methods.
///
/// Runs may arrive in any order; only completeness is checked.
#[derive(Clone, Debug)]
pub struct BatchAggregator {
    meshes: Vec<String>,
    methods: Vec<Method>,
    rows: Vec<ComparisonRow>,
}

impl BatchAggregator {
    pub fn new<I, S>(meshes: I, methods: &[Method]) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut wanted: Vec<Method> = methods.to_vec();
        wanted.sort();
        wanted.dedup();
        Self {
            meshes: meshes.into_iter().map(Into::into).collect(),
            methods: wanted,
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, run: &RunResult) -> Result<(), BatchError> {
        if !self.meshes.iter().any(|m| *m == run.mesh) {
            return Err(BatchError::UnknownMesh { mesh: run.mesh.clone() });
        }
        if self.rows.iter().any(|r| r.mesh == run.mesh && r.method == run.method) {
            return Err(BatchError::DuplicateRun { mesh: run.mesh.clone(), method: run.method });
        }
        self.rows.push(ComparisonRow::from(run));
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// First (mesh, method) pair with no run, in mesh then method order.
    pub fn check_complete(&self) -> Result<(), BatchError> {
        for mesh in &self.meshes {
            for &method in &self.methods {
                if !self.rows.iter().any(|r| r.mesh == *mesh && r.method == method) {
                    return Err(BatchError::IncompleteBatch { mesh: mesh.clone(), method });
                }
            }
        }
        Ok(())
    }

    /// Whatever has been collected, complete or not.
    pub fn into_table(self) -> ComparisonTable {
        ComparisonTable { rows: self.rows }
    }

    pub fn finish(self) -> Result<ComparisonTable, BatchError> {
        self.check_complete()?;
        Ok(self.into_table())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::run::{run_mesh, MeshInput};
    use meshq_quantize::Bins;

    fn runs_for(id: &str) -> Vec<RunResult> {
        let mesh = MeshInput::new(id, vec![[0.0, 0.0, 0.0], [1.0, 2.0, 3.0], [-1.0, 0.5, 2.0]]);
        Method::ALL
            .iter()
            .map(|&m| run_mesh(&mesh, m, Bins::default()).unwrap())
            .collect()
    }

    #[test]
    fn complete_batch_has_two_rows_per_mesh() {
        let mut agg = BatchAggregator::new(["a", "b", "c"], &Method::ALL);
        for id in ["a", "b", "c"] {
            for run in runs_for(id) {
                agg.push(&run).unwrap();
            }
        }
        let table = agg.finish().unwrap();
        assert_eq!(table.len(), 6);
        assert_eq!(table.meshes(), vec!["a", "b", "c"]);
        assert_eq!(table.methods(), Method::ALL.to_vec());
    }

    #[test]
    fn missing_method_is_incomplete() {
        let mut agg = BatchAggregator::new(["a", "b"], &Method::ALL);
        for run in runs_for("a") {
            agg.push(&run).unwrap();
        }
        agg.push(&runs_for("b")[1]).unwrap();
        assert_eq!(
            agg.check_complete(),
            Err(BatchError::IncompleteBatch { mesh: "b".into(), method: Method::MinMax })
        );
        let partial = agg.into_table();
        assert_eq!(partial.len(), 3);
        assert!(partial.get("b", Method::MinMax).is_none());
        assert!(partial.get("b", Method::UnitSphere).is_some());
    }

    #[test]
    fn arrival_order_does_not_matter() {
        let mut agg = BatchAggregator::new(["a", "b"], &Method::ALL);
        let mut runs: Vec<RunResult> = runs_for("a").into_iter().chain(runs_for("b")).collect();
        runs.reverse();
        for run in &runs {
            agg.push(run).unwrap();
        }
        let table = agg.finish().unwrap();
        assert_eq!(table.rows()[0].mesh, "b");
        assert_eq!(table.rows()[0].method, Method::UnitSphere);
    }

    #[test]
    fn duplicates_and_strangers_are_rejected() {
        let mut agg = BatchAggregator::new(["a"], &Method::ALL);
        let runs = runs_for("a");
        agg.push(&runs[0]).unwrap();
        assert_eq!(
            agg.push(&runs[0]),
            Err(BatchError::DuplicateRun { mesh: "a".into(), method: Method::MinMax })
        );
        assert_eq!(
            agg.push(&runs_for("z")[0]),
            Err(BatchError::UnknownMesh { mesh: "z".into() })
        );
        assert_eq!(agg.len(), 1);
    }

    #[test]
    fn single_method_batch() {
        let mut agg = BatchAggregator::new(["a"], &[Method::UnitSphere]);
        agg.push(&runs_for("a")[1]).unwrap();
        assert_eq!(agg.finish().unwrap().len(), 1);
    }
}
