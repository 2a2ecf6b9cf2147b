use log::{debug, info};

use meshq_metrics::{analyze, error_magnitudes, ErrorMetrics};
use meshq_quantize::{
    denormalize, dequantize, normalize, quantize, Bins, Method, NormalizationParams,
    QuantizedVertexSet, Result, VertexSet,
};

/// One mesh handed to the pipeline: an identifier plus its vertex positions.
#[derive(Clone, Debug, PartialEq)]
pub struct MeshInput {
    pub id: String,
    pub vertices: VertexSet,
}

impl MeshInput {
    pub fn new(id: impl Into<String>, vertices: impl Into<VertexSet>) -> Self {
        Self { id: id.into(), vertices: vertices.into() }
    }
}

/// Complete record of one mesh pushed through one normalization method.
#[derive(Clone, Debug, PartialEq)]
pub struct RunResult {
    pub mesh: String,
    pub method: Method,
    pub bins: Bins,
    pub vertex_count: usize,
    pub params: NormalizationParams,
    pub metrics: ErrorMetrics,
    /// Euclidean error of each vertex, in vertex order.
    pub error_magnitudes: Vec<f64>,
    pub quantized: QuantizedVertexSet,
    pub reconstructed: VertexSet,
}

/// normalize → quantize → dequantize → denormalize → analyze.
pub fn run_mesh(mesh: &MeshInput, method: Method, bins: Bins) -> Result<RunResult> {
    if let Some(stats) = mesh.vertices.stats() {
        debug!(
            "{}: {} vertices, min {:?}, max {:?}, mean {:?}, std {:?}",
            mesh.id, stats.count, stats.min, stats.max, stats.mean, stats.std
        );
    }

    let (normalized, params) = normalize(&mesh.vertices, method)?;

    let quantized = quantize(&normalized, bins);
    let dequantized = dequantize(&quantized, bins)?;
    let reconstructed = denormalize(&dequantized, &params)?;
    let metrics = analyze(&mesh.vertices, &reconstructed)?;
    let error_magnitudes = error_magnitudes(&mesh.vertices, &reconstructed)?;

    info!(
        "{} [{}] bins={} | MSE: {:.6e} | MAE: {:.6e}",
        mesh.id, method, bins, metrics.mse, metrics.mae
    );

    Ok(RunResult {
        mesh: mesh.id.clone(),
        method,
        bins,
        vertex_count: mesh.vertices.len(),
        params,
        metrics,
        error_magnitudes,
        quantized,
        reconstructed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use meshq_quantize::{ErrorKind, QuantError};

    #[test]
    fn minmax_two_points_two_bins_is_exact() {
        let mesh = MeshInput::new("pair", vec![[0.0, 0.0, 0.0], [2.0, 4.0, 6.0]]);
        let run = run_mesh(&mesh, Method::MinMax, Bins::new(2).unwrap()).unwrap();
        assert_eq!(run.params, NormalizationParams::MinMax { min: [0.0; 3], max: [2.0, 4.0, 6.0] });
        assert_eq!(run.quantized.levels, vec![[0, 0, 0], [1, 1, 1]]);
        assert_eq!(run.reconstructed, mesh.vertices);
        assert_eq!(run.metrics.mse, 0.0);
        assert_eq!(run.metrics.mae, 0.0);
        assert_eq!(run.error_magnitudes, vec![0.0, 0.0]);
        assert_eq!(run.vertex_count, 2);
    }

    #[test]
    fn minmax_unit_cube_default_bins() {
        let mesh = MeshInput::new("diag", vec![[0.0, 0.0, 0.0], [1.0, 1.0, 1.0]]);
        let run = run_mesh(&mesh, Method::MinMax, Bins::default()).unwrap();
        assert!(run.metrics.mse < 1e-6);
        assert!(run.metrics.mae < 1e-3);
    }

    #[test]
    fn unit_sphere_symmetric_pair_recovers_x() {
        let mesh = MeshInput::new("pair", vec![[1.0, 0.0, 0.0], [-1.0, 0.0, 0.0]]);
        let run = run_mesh(&mesh, Method::UnitSphere, Bins::new(2).unwrap()).unwrap();
        assert_eq!(run.params, NormalizationParams::UnitSphere { centroid: [0.0; 3], max_distance: 1.0 });
        assert_eq!(run.quantized.levels[0][0], 1);
        assert_eq!(run.quantized.levels[1][0], 0);
        assert_eq!(run.reconstructed.points()[0][0], 1.0);
        assert_eq!(run.reconstructed.points()[1][0], -1.0);
        assert_eq!(run.metrics.mse_per_axis[0], 0.0);
    }

    #[test]
    fn flat_axis_reconstructs_exactly() {
        let mesh = MeshInput::new(
            "plane",
            vec![[0.0, 0.0, 5.0], [1.0, 0.0, 5.0], [0.0, 1.0, 5.0], [0.3, 0.7, 5.0]],
        );
        let run = run_mesh(&mesh, Method::MinMax, Bins::default()).unwrap();
        assert!(run.quantized.levels.iter().all(|l| l[2] == 0));
        assert!(run.reconstructed.points().iter().all(|p| p[2] == 5.0));
        assert_eq!(run.metrics.mse_per_axis[2], 0.0);
        assert_eq!(run.metrics.mae_per_axis[2], 0.0);
    }

    #[test]
    fn empty_mesh_fails_as_invalid_input() {
        let mesh = MeshInput::new("empty", VertexSet::default());
        let err = run_mesh(&mesh, Method::UnitSphere, Bins::default()).unwrap_err();
        assert_eq!(err, QuantError::EmptyVertexSet);
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }
}
