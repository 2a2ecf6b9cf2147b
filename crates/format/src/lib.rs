//! Text and tabular renderings of batch results: per-run summary blocks,
//! the aggregate CSV / JSON table and a mesh-by-method pivot.

pub mod summary;
pub mod table;

pub use summary::{magnitude_summary, parse_summary, summary_text, FormatError, SummaryRecord};
pub use table::{failures_csv, method_pivot, table_csv, table_json, CSV_HEADER};
