//! # meshq-quantize
//!
//! Fixed-point round trip for mesh vertex positions.
//!
//! - [`normalize`] / [`denormalize`]: map positions into [0,1]³ and back,
//!   by per-axis [`Method::MinMax`] or aspect-preserving [`Method::UnitSphere`]
//! - [`quantize`] / [`dequantize`]: [0,1] coordinates to integer levels over [`Bins`]

pub mod codec;
pub mod error;
pub mod normalize;
pub mod vertex;

pub use codec::{dequantize, quantize, Bins, QuantizedVertexSet, DEFAULT_BINS};
pub use error::{ErrorKind, QuantError, Result};
pub use normalize::{
    denormalize, normalize, normalize_minmax, normalize_unit_sphere, Method, NormalizationParams,
    NormalizedVertexSet, ParseMethodError,
};
pub use vertex::{axis_bounds, Point3, VertexSet, VertexStats};
