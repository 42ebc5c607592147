//! Fintrack computes the numbers behind a personal finance tracker.
//!
//! Given a snapshot of recorded income and expense transactions and a set of
//! budget goals, this library:
//!
//! - resolves weekly, monthly and yearly period windows and steps between them,
//! - totals and buckets transactions into time series with a running balance,
//! - evaluates spending against budget goals,
//! - exports transaction reports as spreadsheet-friendly CSV,
//! - builds amortization schedules for fixed-rate loans.
//!
//! Every calculation is a pure function of its inputs. Anything that depends
//! on the current date takes it as an argument, see [clock].
//!
//! ```
//! use fintrack::{Transaction, TransactionKind, report::totals};
//! use time::macros::date;
//!
//! let transactions = vec![
//!     Transaction::build(2500.0, date!(2025 - 03 - 01), TransactionKind::Income, "salary")
//!         .finalize(),
//!     Transaction::build(40.0, date!(2025 - 03 - 02), TransactionKind::Expense, "food")
//!         .finalize(),
//! ];
//!
//! assert_eq!(totals(&transactions).net, 2460.0);
//! ```

#![warn(missing_docs)]

use time::Date;

pub mod budget;
pub mod clock;
pub mod config;
pub mod dashboard;
pub mod feed;
pub mod format;
pub mod loan;
pub mod period;
pub mod report;
pub mod snapshot;
pub mod transaction;

#[cfg(test)]
mod test_utils;

pub use budget::{BudgetGoal, BudgetProgress, BudgetStatus};
pub use period::{PeriodKind, PeriodWindow};
pub use snapshot::Snapshot;
pub use transaction::{Transaction, TransactionKind};

/// The errors that may occur in the library.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A date in the future was used to create a transaction.
    ///
    /// Transactions record events that have already happened, therefore future
    /// dates are not allowed.
    #[error("{0} is a date in the future, which is not allowed")]
    FutureDate(Date),

    /// A transaction or budget goal was entered without a category.
    #[error("category cannot be empty")]
    EmptyCategory,

    /// An entered amount was not a number greater than zero.
    #[error("\"{0}\" is not a valid amount")]
    InvalidAmount(String),

    /// A budget limit was not a number greater than zero.
    #[error("\"{0}\" is not a valid budget limit, it must be greater than zero")]
    InvalidLimit(String),

    /// A period name other than weekly, monthly or yearly.
    #[error("unknown period \"{0}\", expected weekly, monthly or yearly")]
    InvalidPeriod(String),

    /// A sort order name that is not recognised.
    #[error("unknown sort order \"{0}\"")]
    InvalidSortOrder(String),

    /// An error occurred while getting the local timezone from a canonical
    /// timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezone(String),

    /// A date string could not be parsed.
    #[error("invalid date {0}")]
    InvalidDate(String),

    /// A file could not be read or written.
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON input could not be decoded.
    #[error("could not decode JSON: {0}")]
    Json(String),

    /// A CSV record could not be written.
    #[error("could not write CSV: {0}")]
    Csv(String),
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Error::Io(value.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Error::Json(value.to_string())
    }
}

impl From<csv::Error> for Error {
    fn from(value: csv::Error) -> Self {
        Error::Csv(value.to_string())
    }
}
