use thiserror::Error;

use crate::normalize::Method;

/// Broad classification of a [`QuantError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller handed in data the pipeline cannot work with.
    InvalidInput,
    /// Two stages of the same run disagree about how the data was produced.
    InvariantViolation,
}

#[derive(Error, Clone, Debug, PartialEq)]
pub enum QuantError {
    #[error("vertex set is empty")]
    EmptyVertexSet,

    #[error("bin count {0} is below the minimum of 2")]
    TooFewBins(u32),

    #[error("vertex {index} has a non-finite coordinate on axis {axis}")]
    NonFiniteCoordinate { index: usize, axis: usize },

    #[error("vertex count mismatch: original has {original}, reconstruction has {reconstructed}")]
    CardinalityMismatch { original: usize, reconstructed: usize },

    #[error("bin count mismatch: quantized with {quantized} bins, dequantizing with {requested}")]
    BinMismatch { quantized: u32, requested: u32 },

    #[error("method mismatch: coordinates normalized with {normalized}, parameters belong to {params}")]
    MethodMismatch { normalized: Method, params: Method },
}

impl QuantError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            QuantError::EmptyVertexSet
            | QuantError::TooFewBins(_)
            | QuantError::NonFiniteCoordinate { .. }
            | QuantError::CardinalityMismatch { .. } => ErrorKind::InvalidInput,
            QuantError::BinMismatch { .. } | QuantError::MethodMismatch { .. } => {
                ErrorKind::InvariantViolation
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, QuantError>;
