use std::fmt::Write as _;

use meshq_batch::{ComparisonTable, RunFailure};

pub const CSV_HEADER: &str = "mesh,method,n_vertices,bins,mse,mae,mse_x,mse_y,mse_z,mae_x,mae_y,mae_z";

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// One header line plus one line per table row.
pub fn table_csv(table: &ComparisonTable) -> String {
    let mut out = String::from(CSV_HEADER);
    out.push('\n');
    for row in table.rows() {
        let _ = writeln!(
            out,
            "{},{},{},{},{:e},{:e},{:e},{:e},{:e},{:e},{:e},{:e}",
            csv_field(&row.mesh),
            row.method,
            row.vertex_count,
            row.bins,
            row.mse,
            row.mae,
            row.mse_per_axis[0],
            row.mse_per_axis[1],
            row.mse_per_axis[2],
            row.mae_per_axis[0],
            row.mae_per_axis[1],
            row.mae_per_axis[2],
        );
    }
    out
}

pub fn table_json(table: &ComparisonTable) -> serde_json::Result<String> {
    serde_json::to_string_pretty(table)
}

/// Mesh-by-method view: one line per mesh, MSE and MAE for each method side by side.
pub fn method_pivot(table: &ComparisonTable) -> String {
    let methods = table.methods();
    let meshes = table.meshes();
    let width = meshes.iter().map(|m| m.len()).max().unwrap_or(0).max(4);

    let mut out = format!("{:<width$}", "mesh", width = width);
    for method in &methods {
        let _ = write!(out, "  {:>14}  {:>14}", format!("{} mse", method), format!("{} mae", method));
    }
    out.push('\n');

    for mesh in meshes {
        let _ = write!(out, "{:<width$}", mesh, width = width);
        for &method in &methods {
            match table.get(mesh, method) {
                Some(row) => {
                    let _ = write!(out, "  {:>14.6e}  {:>14.6e}", row.mse, row.mae);
                }
                None => {
                    let _ = write!(out, "  {:>14}  {:>14}", "-", "-");
                }
            }
        }
        out.push('\n');
    }
    out
}

/// `mesh,method,error` lines for runs that produced no result.
pub fn failures_csv(failures: &[RunFailure]) -> String {
    let mut out = String::from("mesh,method,error\n");
    for f in failures {
        let _ = writeln!(out, "{},{},{}", csv_field(&f.mesh), f.method, csv_field(&f.error.to_string()));
    }
    out
}
