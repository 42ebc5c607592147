//! Client-side filtering and ordering of transaction collections.

use std::{cmp::Ordering, collections::BTreeSet, str::FromStr};

use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    Error,
    period::PeriodWindow,
    transaction::core::{Transaction, TransactionKind},
};

/// How a list of transactions is ordered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortOrder {
    /// Newest first. Same-day transactions show the most recently created first.
    #[default]
    DateDesc,
    /// Oldest first. Same-day transactions show the earliest created first.
    DateAsc,
    /// Largest amount first.
    AmountDesc,
    /// Smallest amount first.
    AmountAsc,
}

impl FromStr for SortOrder {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dateDesc" | "date-desc" => Ok(Self::DateDesc),
            "dateAsc" | "date-asc" => Ok(Self::DateAsc),
            "amountDesc" | "amount-desc" => Ok(Self::AmountDesc),
            "amountAsc" | "amount-asc" => Ok(Self::AmountAsc),
            _ => Err(Error::InvalidSortOrder(s.to_owned())),
        }
    }
}

/// Criteria for narrowing down a list of transactions.
///
/// `None` fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionFilter {
    /// Only income or only expenses.
    pub kind: Option<TransactionKind>,
    /// Only this exact category label.
    pub category: Option<String>,
    /// Only transactions on or after this date.
    pub from: Option<Date>,
    /// Only transactions on or before this date.
    pub to: Option<Date>,
    /// The order of the result.
    #[serde(default)]
    pub sort: SortOrder,
}

impl TransactionFilter {
    /// Whether `transaction` satisfies every criterion.
    pub fn matches(&self, transaction: &Transaction) -> bool {
        let kind_matches = self.kind.is_none_or(|kind| transaction.kind == kind);
        let category_matches = self
            .category
            .as_ref()
            .is_none_or(|category| transaction.category == *category);
        let from_matches = self.from.is_none_or(|from| transaction.date >= from);
        let to_matches = self.to.is_none_or(|to| transaction.date <= to);

        kind_matches && category_matches && from_matches && to_matches
    }
}

/// Apply `filter` to `transactions` and order the result.
pub fn filter_transactions<'a>(
    transactions: &'a [Transaction],
    filter: &TransactionFilter,
) -> Vec<&'a Transaction> {
    let mut result: Vec<&Transaction> = transactions
        .iter()
        .filter(|transaction| filter.matches(transaction))
        .collect();

    sort_transactions(&mut result, filter.sort);
    result
}

/// Order `transactions` in place.
///
/// The sort is stable and every order breaks ties on creation time and then
/// ID, so the result does not depend on the input order.
pub fn sort_transactions(transactions: &mut [&Transaction], order: SortOrder) {
    transactions.sort_by(|a, b| match order {
        SortOrder::DateDesc => b
            .date
            .cmp(&a.date)
            .then_with(|| b.created_at.cmp(&a.created_at))
            .then_with(|| b.id.cmp(&a.id)),
        SortOrder::DateAsc => chronological(a, b),
        SortOrder::AmountDesc => b
            .amount
            .total_cmp(&a.amount)
            .then_with(|| chronological(b, a)),
        SortOrder::AmountAsc => a
            .amount
            .total_cmp(&b.amount)
            .then_with(|| chronological(a, b)),
    });
}

/// The `count` most recent transactions, newest first.
pub fn recent_transactions(transactions: &[Transaction], count: usize) -> Vec<&Transaction> {
    let mut recent: Vec<&Transaction> = transactions.iter().collect();
    sort_transactions(&mut recent, SortOrder::DateDesc);
    recent.truncate(count);
    recent
}

/// The distinct, non-empty category labels in use, sorted.
pub fn used_categories(transactions: &[Transaction]) -> Vec<String> {
    transactions
        .iter()
        .map(|transaction| transaction.category.as_str())
        .filter(|category| !category.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_owned)
        .collect()
}

/// The earliest and latest transaction dates, or `None` for no transactions.
pub fn date_bounds(transactions: &[Transaction]) -> Option<PeriodWindow> {
    let start = transactions.iter().map(|transaction| transaction.date).min()?;
    let end = transactions.iter().map(|transaction| transaction.date).max()?;

    Some(PeriodWindow { start, end })
}

/// Oldest first with a total tie-break.
///
/// Sums taken over this order are bit-identical however the input was
/// shuffled.
pub(crate) fn chronological(a: &Transaction, b: &Transaction) -> Ordering {
    a.date
        .cmp(&b.date)
        .then_with(|| a.created_at.cmp(&b.created_at))
        .then_with(|| a.id.cmp(&b.id))
        .then_with(|| a.amount.total_cmp(&b.amount))
}
