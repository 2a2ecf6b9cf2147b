use std::fmt;

use serde::Serialize;

use crate::error::{QuantError, Result};
use crate::normalize::{Method, NormalizedVertexSet};

pub const DEFAULT_BINS: u32 = 1024;

/// Number of integer levels per axis. Always at least 2.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Bins(u32);

impl Bins {
    pub fn new(bins: u32) -> Result<Self> {
        if bins < 2 {
            return Err(QuantError::TooFewBins(bins));
        }
        Ok(Self(bins))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// Highest representable level, `bins - 1`.
    pub fn max_level(self) -> u32 {
        self.0 - 1
    }

    /// Worst-case reconstruction error in normalized space, `1 / (bins - 1)`.
    pub fn step(self) -> f64 {
        1.0 / self.max_level() as f64
    }
}

impl Default for Bins {
    fn default() -> Self {
        Self(DEFAULT_BINS)
    }
}

impl fmt::Display for Bins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Fixed-point coordinates, three levels per vertex in `[0, bins - 1]`.
#[derive(Clone, Debug, PartialEq)]
pub struct QuantizedVertexSet {
    pub method: Method,
    pub bins: Bins,
    pub levels: Vec<[u32; 3]>,
}

impl QuantizedVertexSet {
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

#[inline]
fn quantize_value(v: f64, max_level: u32) -> u32 {
    let top = max_level as f64;
    // NaN saturates to 0 on the cast
    (v * top).floor().clamp(0.0, top) as u32
}

/// `floor(v * (bins - 1))`, clamped into range.
pub fn quantize(normalized: &NormalizedVertexSet, bins: Bins) -> QuantizedVertexSet {
    let max_level = bins.max_level();
    let levels = normalized
        .points
        .iter()
        .map(|p| {
            [
                quantize_value(p[0], max_level),
                quantize_value(p[1], max_level),
                quantize_value(p[2], max_level),
            ]
        })
        .collect();
    QuantizedVertexSet { method: normalized.method, bins, levels }
}

/// `q / (bins - 1)`. `bins` must be the count the levels were produced with.
pub fn dequantize(quantized: &QuantizedVertexSet, bins: Bins) -> Result<NormalizedVertexSet> {
    if quantized.bins != bins {
        return Err(QuantError::BinMismatch {
            quantized: quantized.bins.get(),
            requested: bins.get(),
        });
    }
    let top = bins.max_level() as f64;
    let points = quantized
        .levels
        .iter()
        .map(|q| [q[0] as f64 / top, q[1] as f64 / top, q[2] as f64 / top])
        .collect();
    Ok(NormalizedVertexSet::new(quantized.method, points))
}
