//! CSV export of transaction reports.
//!
//! The output opens cleanly in spreadsheet applications: it starts with a
//! UTF-8 byte-order mark and every field is double-quoted, with embedded
//! quotes doubled.

use std::io::Write;

use csv::{QuoteStyle, Terminator, WriterBuilder};
use time::Date;

use crate::{Error, transaction::Transaction};

/// The UTF-8 byte-order mark written before the header row.
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// The header row of an export.
pub const CSV_HEADER: [&str; 5] = ["Date", "Description", "Category", "Type", "Amount"];

/// Write `transactions` as CSV, one row per transaction in the given order.
///
/// # Errors
///
/// Returns [Error::Io] or [Error::Csv] if writing to `writer` fails.
pub fn export_csv<W: Write>(transactions: &[&Transaction], mut writer: W) -> Result<(), Error> {
    writer.write_all(UTF8_BOM)?;

    let mut csv_writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);

    csv_writer.write_record(CSV_HEADER)?;

    for transaction in transactions {
        csv_writer.write_record([
            transaction.date.to_string(),
            transaction.description.clone().unwrap_or_default(),
            transaction.category.clone(),
            transaction.kind.as_str().to_owned(),
            format_amount(transaction.amount),
        ])?;
    }

    csv_writer.flush()?;
    tracing::debug!("Exported {} transactions as CSV", transactions.len());

    Ok(())
}

/// The suggested file name for an export covering `from..=to`.
pub fn export_file_name(from: Date, to: Date) -> String {
    format!("finance_report_{from}_to_{to}.csv")
}

fn format_amount(amount: f64) -> String {
    if amount == 0.0 {
        "0".to_owned()
    } else {
        amount.to_string()
    }
}
