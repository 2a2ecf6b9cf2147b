//! # meshq-batch
//!
//! Drives the quantization round trip over a set of meshes and methods.
//!
//! - [`run_mesh`]: one mesh, one method, one [`RunResult`]
//! - [`BatchAggregator`]: gathers run summaries into a [`ComparisonTable`], checking completeness
//! - [`run_batch`]: all meshes × methods, in parallel, with per-run failure isolation

pub mod aggregate;
pub mod driver;
pub mod error;
pub mod run;

pub use aggregate::{BatchAggregator, ComparisonRow, ComparisonTable};
pub use driver::{run_batch, BatchConfig, BatchReport, RunFailure};
pub use error::{BatchError, RunError};
pub use run::{run_mesh, MeshInput, RunResult};
