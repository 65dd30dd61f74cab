//! Per-creative aggregation of cleaned performance rows, joined with
//! creative analyses, and the text and tabular outputs built from it.

pub mod aggregate;
pub mod error;
pub mod export;
pub mod join;
pub mod render;

pub use aggregate::summarize;
pub use error::ExportError;
pub use export::{
    write_attributes_csv, write_daily_rows_csv, write_reports, write_summary_csv,
    ATTRIBUTES_FILE, DAILY_ROWS_FILE, SUMMARY_FILE,
};
pub use join::{resolve_mapping, AttributeJoin};
pub use render::{render_creative_context, render_kpi_digest};
