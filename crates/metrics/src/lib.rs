//! Reconstruction error between an original vertex set and its round-tripped copy.

use serde::Serialize;

use meshq_quantize::{QuantError, Result, VertexSet};

/// Per-axis and overall error of one reconstruction.
///
/// Overall values are the unweighted mean of the three axes, so each axis
/// counts the same whatever its extent in the original mesh.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ErrorMetrics {
    pub mse_per_axis: [f64; 3],
    pub mae_per_axis: [f64; 3],
    pub max_abs_per_axis: [f64; 3],
    pub mse: f64,
    pub mae: f64,
}

fn ensure_same_len(original: &VertexSet, reconstructed: &VertexSet) -> Result<()> {
    if original.len() != reconstructed.len() {
        return Err(QuantError::CardinalityMismatch {
            original: original.len(),
            reconstructed: reconstructed.len(),
        });
    }
    Ok(())
}

pub fn analyze(original: &VertexSet, reconstructed: &VertexSet) -> Result<ErrorMetrics> {
    ensure_same_len(original, reconstructed)?;
    if original.is_empty() {
        return Err(QuantError::EmptyVertexSet);
    }

    let mut sq = [0.0; 3];
    let mut abs = [0.0; 3];
    let mut max_abs = [0.0_f64; 3];
    for (p, r) in original.points().iter().zip(reconstructed.points()) {
        for a in 0..3 {
            let d = p[a] - r[a];
            sq[a] += d * d;
            abs[a] += d.abs();
            max_abs[a] = max_abs[a].max(d.abs());
        }
    }

    let n = original.len() as f64;
    let mse_per_axis = [sq[0] / n, sq[1] / n, sq[2] / n];
    let mae_per_axis = [abs[0] / n, abs[1] / n, abs[2] / n];
    Ok(ErrorMetrics {
        mse_per_axis,
        mae_per_axis,
        max_abs_per_axis: max_abs,
        mse: mse_per_axis.iter().sum::<f64>() / 3.0,
        mae: mae_per_axis.iter().sum::<f64>() / 3.0,
    })
}

/// Euclidean length of each vertex's error vector, in vertex order.
pub fn error_magnitudes(original: &VertexSet, reconstructed: &VertexSet) -> Result<Vec<f64>> {
    ensure_same_len(original, reconstructed)?;
    Ok(original
        .points()
        .iter()
        .zip(reconstructed.points())
        .map(|(p, r)| (p[0] - r[0]).hypot(p[1] - r[1]).hypot(p[2] - r[2]))
        .collect())
}
