//! Transactions: the income and expense records every report is built from.
//!
//! This module contains:
//! - The `Transaction` model and `TransactionBuilder`
//! - `TransactionForm` for validating user entry
//! - Filtering and ordering of transaction lists

mod core;
mod form;
mod query;

pub use core::{
    Transaction, TransactionBuilder, TransactionId, TransactionKind, UserId, parse_amount,
};
pub use form::{TransactionForm, normalize_category};
pub use query::{
    SortOrder, TransactionFilter, date_bounds, filter_transactions, recent_transactions,
    sort_transactions, used_categories,
};

pub(crate) use query::chronological;
