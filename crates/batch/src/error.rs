use thiserror::Error;

use meshq_quantize::{Method, QuantError};

#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum BatchError {
    #[error("incomplete batch: mesh '{mesh}' has no {method} run")]
    IncompleteBatch { mesh: String, method: Method },

    #[error("mesh '{mesh}' already has a {method} run")]
    DuplicateRun { mesh: String, method: Method },

    #[error("run for mesh '{mesh}' does not belong to this batch")]
    UnknownMesh { mesh: String },
}

/// Why a single (mesh, method) run produced no result.
#[derive(Error, Clone, Debug, PartialEq)]
pub enum RunError {
    #[error(transparent)]
    Quant(#[from] QuantError),

    #[error(transparent)]
    Batch(#[from] BatchError),
}
