use std::fmt::Write as _;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use meshq_batch::RunResult;

#[derive(Error, Debug)]
pub enum FormatError {
    #[error("summary is missing the '{0}' field")]
    MissingField(&'static str),

    #[error("summary field '{field}' has malformed value '{value}'")]
    Malformed { field: &'static str, value: String },

    #[error("could not encode normalization parameters: {0}")]
    Json(#[from] serde_json::Error),
}

/// Flat view of one run's summary block.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SummaryRecord {
    pub mesh: String,
    pub method: String,
    pub n_vertices: usize,
    pub bins: u32,
    pub mse: f64,
    pub mae: f64,
    pub mse_per_axis: [f64; 3],
    pub mae_per_axis: [f64; 3],
    /// Normalization parameters as JSON, kept verbatim.
    pub meta: Option<String>,
}

fn axis_list(values: &[f64; 3]) -> String {
    format!("[{:e}, {:e}, {:e}]", values[0], values[1], values[2])
}

/// Renders the `key: value` summary block for a run.
pub fn summary_text(run: &RunResult) -> Result<String, FormatError> {
    let mut out = String::new();
    let m = &run.metrics;
    // writing into a String cannot fail
    let _ = writeln!(out, "mesh: {}", run.mesh);
    let _ = writeln!(out, "method: {}", run.method);
    let _ = writeln!(out, "n_vertices: {}", run.vertex_count);
    let _ = writeln!(out, "bins: {}", run.bins);
    let _ = writeln!(out, "MSE: {:.12e}", m.mse);
    let _ = writeln!(out, "MAE: {:.12e}", m.mae);
    let _ = writeln!(out, "MSE_per_axis: {}", axis_list(&m.mse_per_axis));
    let _ = writeln!(out, "MAE_per_axis: {}", axis_list(&m.mae_per_axis));
    let _ = writeln!(out, "meta: {}", serde_json::to_string(&run.params)?);
    Ok(out)
}

/// Nearest-rank percentile of an ascending slice, `q` in [0, 1].
fn percentile(sorted: &[f64], q: f64) -> f64 {
    let rank = (q * sorted.len() as f64).ceil() as usize;
    sorted[rank.clamp(1, sorted.len()) - 1]
}

/// One-line spread of the per-vertex error magnitudes of a run.
pub fn magnitude_summary(magnitudes: &[f64]) -> String {
    if magnitudes.is_empty() {
        return "error_magnitude: n/a".to_string();
    }
    let mut sorted = magnitudes.to_vec();
    sorted.sort_by(f64::total_cmp);
    format!(
        "error_magnitude: min {:e} median {:e} p95 {:e} max {:e}",
        sorted[0],
        percentile(&sorted, 0.5),
        percentile(&sorted, 0.95),
        sorted[sorted.len() - 1],
    )
}

fn parse_number<T: std::str::FromStr>(field: &'static str, value: &str) -> Result<T, FormatError> {
    value.parse().map_err(|_| FormatError::Malformed { field, value: value.to_string() })
}

fn parse_axes(field: &'static str, value: &str) -> Result<[f64; 3], FormatError> {
    let malformed = || FormatError::Malformed { field, value: value.to_string() };
    let inner = value
        .strip_prefix('[')
        .and_then(|v| v.strip_suffix(']'))
        .ok_or_else(malformed)?;
    let parts: Vec<f64> = inner
        .split(',')
        .map(|p| p.trim().parse::<f64>())
        .collect::<Result<_, _>>()
        .map_err(|_| malformed())?;
    match parts.as_slice() {
        [x, y, z] => Ok([*x, *y, *z]),
        _ => Err(malformed()),
    }
}

/// Reads a block written by [`summary_text`]. Unknown keys are ignored.
pub fn parse_summary(text: &str) -> Result<SummaryRecord, FormatError> {
    let mut mesh = None;
    let mut method = None;
    let mut n_vertices = None;
    let mut bins = None;
    let mut mse = None;
    let mut mae = None;
    let mut mse_per_axis = None;
    let mut mae_per_axis = None;
    let mut meta = None;

    for line in text.lines() {
        let Some((key, value)) = line.split_once(':') else { continue };
        let value = value.trim();
        match key.trim() {
            "mesh" => mesh = Some(value.to_string()),
            "method" => method = Some(value.to_string()),
            "n_vertices" => n_vertices = Some(parse_number("n_vertices", value)?),
            "bins" => bins = Some(parse_number("bins", value)?),
            "MSE" => mse = Some(parse_number("MSE", value)?),
            "MAE" => mae = Some(parse_number("MAE", value)?),
            "MSE_per_axis" => mse_per_axis = Some(parse_axes("MSE_per_axis", value)?),
            "MAE_per_axis" => mae_per_axis = Some(parse_axes("MAE_per_axis", value)?),
            "meta" => meta = Some(value.to_string()),
            _ => {}
        }
    }

    Ok(SummaryRecord {
        mesh: mesh.ok_or(FormatError::MissingField("mesh"))?,
        method: method.ok_or(FormatError::MissingField("method"))?,
        n_vertices: n_vertices.ok_or(FormatError::MissingField("n_vertices"))?,
        bins: bins.ok_or(FormatError::MissingField("bins"))?,
        mse: mse.ok_or(FormatError::MissingField("MSE"))?,
        mae: mae.ok_or(FormatError::MissingField("MAE"))?,
        mse_per_axis: mse_per_axis.ok_or(FormatError::MissingField("MSE_per_axis"))?,
        mae_per_axis: mae_per_axis.ok_or(FormatError::MissingField("MAE_per_axis"))?,
        meta,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use meshq_batch::{run_mesh, MeshInput};
    use meshq_quantize::{Bins, Method};

    fn sample_run(method: Method) -> RunResult {
        let mesh = MeshInput::new(
            "wedge",
            vec![[0.0, 0.0, 0.0], [3.0, 0.1, 0.0], [0.2, 2.0, 1.0], [1.7, 1.1, 0.4]],
        );
        run_mesh(&mesh, method, Bins::new(64).unwrap()).unwrap()
    }

    #[test]
    fn summary_has_expected_lines() {
        let text = summary_text(&sample_run(Method::MinMax)).unwrap();
        assert!(text.starts_with("mesh: wedge\nmethod: minmax\nn_vertices: 4\nbins: 64\n"));
        assert!(text.contains("meta: {\"method\":\"minmax\",\"min\":[0.0,0.0,0.0],\"max\":[3.0,2.0,1.0]}"));
    }

    #[test]
    fn summary_reads_back() {
        let run = sample_run(Method::UnitSphere);
        let record = parse_summary(&summary_text(&run).unwrap()).unwrap();
        assert_eq!(record.mesh, "wedge");
        assert_eq!(record.method, "unit_sphere");
        assert_eq!(record.n_vertices, 4);
        assert_eq!(record.bins, 64);
        assert!((record.mse - run.metrics.mse).abs() <= run.metrics.mse * 1e-11);
        assert_eq!(record.mse_per_axis, run.metrics.mse_per_axis);
        assert_eq!(record.mae_per_axis, run.metrics.mae_per_axis);
        assert!(record.meta.unwrap().contains("\"max_distance\""));
    }

    #[test]
    fn magnitude_spread() {
        let values: Vec<f64> = (1..=20).rev().map(f64::from).collect();
        assert_eq!(
            magnitude_summary(&values),
            "error_magnitude: min 1e0 median 1e1 p95 1.9e1 max 2e1"
        );
        assert_eq!(magnitude_summary(&[]), "error_magnitude: n/a");

        let run = sample_run(Method::MinMax);
        assert_eq!(run.error_magnitudes.len(), 4);
        assert!(magnitude_summary(&run.error_magnitudes).starts_with("error_magnitude: min "));
    }

    #[test]
    fn missing_and_malformed_fields() {
        let err = parse_summary("mesh: a\nmethod: minmax\n").unwrap_err();
        assert!(matches!(err, FormatError::MissingField("n_vertices")));

        let err = parse_summary("mesh: a\nbins: many\n").unwrap_err();
        assert!(matches!(err, FormatError::Malformed { field: "bins", .. }));

        let err = parse_summary("MSE_per_axis: [1.0, 2.0]\n").unwrap_err();
        assert!(matches!(err, FormatError::Malformed { field: "MSE_per_axis", .. }));
    }
}
