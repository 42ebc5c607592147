//! Reports over transaction collections: window aggregation and CSV export.

mod aggregation;
mod export;

pub use aggregation::{
    Bucket, Totals, WindowReport, aggregate, aggregate_around, expense_by_category,
    expenses_by_category_on, report_rows, totals,
};
pub use export::{CSV_HEADER, UTF8_BOM, export_csv, export_file_name};
