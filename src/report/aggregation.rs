//! Transaction aggregation for summaries and charts.
//!
//! Provides functions to total income and expenses, bucket them into a time
//! series for a period window, track the cumulative balance across the
//! window, and break expenses down by category.

use std::collections::BTreeMap;

use serde::Serialize;
use time::{Date, Month, Weekday};

use crate::{
    period::{PeriodKind, PeriodWindow, month_abbrev, window_for},
    transaction::{SortOrder, Transaction, TransactionKind, chronological, sort_transactions},
};

/// Income and expense sums.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Totals {
    /// Sum of income amounts.
    pub income: f64,
    /// Sum of expense amounts.
    pub expense: f64,
    /// Income minus expenses.
    pub net: f64,
}

impl Totals {
    fn add(&mut self, transaction: &Transaction) {
        match transaction.kind {
            TransactionKind::Income => self.income += transaction.amount,
            TransactionKind::Expense => self.expense += transaction.amount,
        }
        self.net = self.income - self.expense;
    }
}

/// One point of a time series: a single day, or a month for yearly windows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bucket {
    /// The first day covered by the bucket.
    pub start: Date,
    /// The last day covered by the bucket.
    pub end: Date,
    /// Short axis label, e.g. "Sun", "14" or "Mar".
    pub label: String,
    /// Income in the bucket.
    pub income: f64,
    /// Expenses in the bucket.
    pub expense: f64,
    /// Net income from the start of the window up to and including this bucket.
    pub balance: f64,
}

/// Everything derived from the transactions inside one period window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindowReport {
    /// The granularity the window was resolved with.
    pub kind: PeriodKind,
    /// The window the report covers.
    pub window: PeriodWindow,
    /// Totals over the window.
    pub totals: Totals,
    /// The time series, oldest bucket first.
    pub buckets: Vec<Bucket>,
    /// Expense totals keyed by the category label exactly as entered.
    pub expense_by_category: BTreeMap<String, f64>,
}

/// Total income and expenses over all `transactions`.
pub fn totals(transactions: &[Transaction]) -> Totals {
    let mut totals = Totals::default();

    for transaction in in_canonical_order(transactions) {
        totals.add(transaction);
    }

    totals
}

/// Expense totals per category label over all `transactions`.
pub fn expense_by_category(transactions: &[Transaction]) -> BTreeMap<String, f64> {
    sum_expenses_by_category(
        in_canonical_order(transactions)
            .into_iter()
            .filter(|transaction| transaction.is_expense()),
    )
}

/// Aggregate the transactions that fall inside `window`.
///
/// Yearly windows are bucketed by month, weekly and monthly windows by day.
/// The cumulative balance starts from zero at the first bucket. Transactions
/// on either boundary date are included.
pub fn aggregate(
    transactions: &[Transaction],
    kind: PeriodKind,
    window: PeriodWindow,
) -> WindowReport {
    let mut buckets = match kind {
        PeriodKind::Yearly => monthly_buckets(window),
        PeriodKind::Weekly | PeriodKind::Monthly => daily_buckets(kind, window),
    };
    let mut totals = Totals::default();
    let mut expense_by_category: BTreeMap<String, f64> = BTreeMap::new();

    for transaction in in_canonical_order(transactions)
        .into_iter()
        .filter(|transaction| window.contains(transaction.date))
    {
        totals.add(transaction);

        let index = match kind {
            PeriodKind::Yearly => months_between(window.start, transaction.date),
            PeriodKind::Weekly | PeriodKind::Monthly => {
                (transaction.date - window.start).whole_days() as usize
            }
        };

        if let Some(bucket) = buckets.get_mut(index) {
            match transaction.kind {
                TransactionKind::Income => bucket.income += transaction.amount,
                TransactionKind::Expense => bucket.expense += transaction.amount,
            }
        }

        if transaction.is_expense() {
            *expense_by_category
                .entry(transaction.category.clone())
                .or_insert(0.0) += transaction.amount;
        }
    }

    let mut balance = 0.0;
    for bucket in &mut buckets {
        balance += bucket.income - bucket.expense;
        bucket.balance = balance;
    }

    tracing::debug!(
        "Aggregated {kind} window {} to {}: {} buckets, net {}",
        window.start,
        window.end,
        buckets.len(),
        totals.net
    );

    WindowReport {
        kind,
        window,
        totals,
        buckets,
        expense_by_category,
    }
}

/// Aggregate the window of `kind` that contains `reference`.
pub fn aggregate_around(
    transactions: &[Transaction],
    kind: PeriodKind,
    reference: Date,
) -> WindowReport {
    aggregate(transactions, kind, window_for(kind, reference))
}

/// Expense totals per category label for a single day.
pub fn expenses_by_category_on(transactions: &[Transaction], date: Date) -> BTreeMap<String, f64> {
    sum_expenses_by_category(
        in_canonical_order(transactions)
            .into_iter()
            .filter(|transaction| transaction.is_expense() && transaction.date == date),
    )
}

fn sum_expenses_by_category<'a>(
    expenses: impl Iterator<Item = &'a Transaction>,
) -> BTreeMap<String, f64> {
    let mut categories = BTreeMap::new();

    for transaction in expenses {
        *categories
            .entry(transaction.category.clone())
            .or_insert(0.0) += transaction.amount;
    }

    categories
}

/// Transactions dated within `from..=to`, newest first.
pub fn report_rows(transactions: &[Transaction], from: Date, to: Date) -> Vec<&Transaction> {
    let mut rows: Vec<&Transaction> = transactions
        .iter()
        .filter(|transaction| from <= transaction.date && transaction.date <= to)
        .collect();

    sort_transactions(&mut rows, SortOrder::DateDesc);
    rows
}

fn in_canonical_order(transactions: &[Transaction]) -> Vec<&Transaction> {
    let mut ordered: Vec<&Transaction> = transactions.iter().collect();
    ordered.sort_by(|a, b| chronological(a, b));
    ordered
}

fn daily_buckets(kind: PeriodKind, window: PeriodWindow) -> Vec<Bucket> {
    window
        .days()
        .map(|day| Bucket {
            start: day,
            end: day,
            label: match kind {
                PeriodKind::Weekly => weekday_abbrev(day.weekday()).to_owned(),
                _ => day.day().to_string(),
            },
            income: 0.0,
            expense: 0.0,
            balance: 0.0,
        })
        .collect()
}

fn monthly_buckets(window: PeriodWindow) -> Vec<Bucket> {
    let mut buckets = Vec::new();
    let mut month_start = window.start.replace_day(1).unwrap_or(window.start);

    while month_start <= window.end {
        let month = window_for(PeriodKind::Monthly, month_start);
        buckets.push(Bucket {
            start: month.start.max(window.start),
            end: month.end.min(window.end),
            label: month_abbrev(month_start.month()).to_owned(),
            income: 0.0,
            expense: 0.0,
            balance: 0.0,
        });

        match month.end.next_day() {
            Some(next) => month_start = next,
            None => break,
        }
    }

    buckets
}

fn months_between(start: Date, date: Date) -> usize {
    let months = (date.year() - start.year()) * 12 + month_index(date.month())
        - month_index(start.month());
    months.max(0) as usize
}

fn month_index(month: Month) -> i32 {
    i32::from(u8::from(month))
}

fn weekday_abbrev(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Sunday => "Sun",
        Weekday::Monday => "Mon",
        Weekday::Tuesday => "Tue",
        Weekday::Wednesday => "Wed",
        Weekday::Thursday => "Thu",
        Weekday::Friday => "Fri",
        Weekday::Saturday => "Sat",
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::{
        period::{PeriodKind, window_for},
        report::{
            aggregate, aggregate_around, expense_by_category, expenses_by_category_on,
            report_rows, totals,
        },
        test_utils::{expense, income},
    };

    #[test]
    fn all_time_expenses_by_category_span_every_period() {
        let transactions = vec![
            expense("a", 40.0, date!(2023 - 12 - 31), "food"),
            income("b", 900.0, date!(2024 - 03 - 01), "salary"),
            expense("c", 60.0, date!(2025 - 07 - 04), "food"),
            expense("d", 15.25, date!(2025 - 07 - 04), "Food"),
            expense("e", 1200.0, date!(2025 - 01 - 01), "rent"),
        ];

        let categories = expense_by_category(&transactions);

        assert_eq!(categories.len(), 3);
        assert_eq!(categories["food"], 100.0);
        assert_eq!(categories["Food"], 15.25);
        assert_eq!(categories["rent"], 1200.0);
        assert!(!categories.contains_key("salary"));
        assert!(expense_by_category(&[]).is_empty());
    }

    #[test]
    fn empty_input_gives_zero_totals_and_no_categories() {
        let report = aggregate_around(&[], PeriodKind::Monthly, date!(2025 - 02 - 10));

        assert_eq!(report.totals.income, 0.0);
        assert_eq!(report.totals.expense, 0.0);
        assert_eq!(report.totals.net, 0.0);
        assert!(report.expense_by_category.is_empty());
        assert_eq!(report.buckets.len(), 28);
        assert!(report.buckets.iter().all(|bucket| bucket.balance == 0.0));
    }

    #[test]
    fn monthly_window_has_one_bucket_per_day() {
        let transactions = vec![
            income("a", 1000.0, date!(2025 - 01 - 01), "salary"),
            expense("b", 250.5, date!(2025 - 01 - 15), "rent"),
            expense("c", 10.25, date!(2025 - 01 - 31), "food"),
        ];

        let report = aggregate_around(&transactions, PeriodKind::Monthly, date!(2025 - 01 - 20));

        assert_eq!(report.buckets.len(), 31);
        assert_eq!(report.buckets[0].label, "1");
        assert_eq!(report.buckets[0].income, 1000.0);
        assert_eq!(report.buckets[14].expense, 250.5);
        assert_eq!(report.buckets[30].expense, 10.25);
        assert_eq!(report.buckets[30].balance, 1000.0 - 250.5 - 10.25);
    }

    #[test]
    fn weekly_buckets_are_labelled_by_weekday() {
        let report = aggregate_around(&[], PeriodKind::Weekly, date!(2025 - 01 - 15));
        let labels: Vec<_> = report.buckets.iter().map(|b| b.label.as_str()).collect();

        assert_eq!(labels, vec!["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"]);
    }

    #[test]
    fn yearly_window_has_twelve_monthly_buckets() {
        let transactions = vec![
            income("a", 100.0, date!(2024 - 01 - 31), "salary"),
            expense("b", 40.0, date!(2024 - 02 - 29), "food"),
            expense("c", 10.0, date!(2024 - 12 - 31), "food"),
            expense("d", 99.0, date!(2025 - 01 - 01), "food"),
        ];

        let report = aggregate_around(&transactions, PeriodKind::Yearly, date!(2024 - 06 - 01));

        assert_eq!(report.buckets.len(), 12);
        assert_eq!(report.buckets[0].label, "Jan");
        assert_eq!(report.buckets[11].label, "Dec");
        assert_eq!(report.buckets[0].income, 100.0);
        assert_eq!(report.buckets[1].expense, 40.0);
        assert_eq!(report.buckets[11].expense, 10.0);
        assert_eq!(report.buckets[11].balance, 50.0);
        assert_eq!(report.totals.expense, 50.0);
    }

    #[test]
    fn boundary_dates_are_included() {
        let window = window_for(PeriodKind::Weekly, date!(2025 - 01 - 15));
        let transactions = vec![
            expense("a", 1.0, window.start, "x"),
            expense("b", 2.0, window.end, "x"),
            expense("c", 4.0, window.start.previous_day().unwrap(), "x"),
            expense("d", 8.0, window.end.next_day().unwrap(), "x"),
        ];

        let report = aggregate(&transactions, PeriodKind::Weekly, window);

        assert_eq!(report.totals.expense, 3.0);
    }

    #[test]
    fn buckets_account_for_every_transaction_in_window() {
        let transactions = vec![
            income("a", 1200.0, date!(2025 - 03 - 01), "salary"),
            expense("b", 12.5, date!(2025 - 03 - 01), "food"),
            expense("c", 30.25, date!(2025 - 03 - 09), "transport"),
            income("d", 75.0, date!(2025 - 03 - 20), "gift"),
            expense("e", 600.0, date!(2025 - 03 - 31), "rent"),
            expense("f", 5.0, date!(2025 - 04 - 01), "food"),
        ];

        for kind in PeriodKind::ALL {
            let report = aggregate_around(&transactions, kind, date!(2025 - 03 - 15));
            let bucket_income: f64 = report.buckets.iter().map(|b| b.income).sum();
            let bucket_expense: f64 = report.buckets.iter().map(|b| b.expense).sum();

            let in_window: Vec<_> = transactions
                .iter()
                .filter(|t| report.window.contains(t.date))
                .cloned()
                .collect();
            let expected = totals(&in_window);

            assert_eq!(bucket_income, expected.income, "{kind}");
            assert_eq!(bucket_expense, expected.expense, "{kind}");
            assert_eq!(report.totals, expected, "{kind}");
            assert_eq!(
                report.buckets.last().map(|b| b.balance),
                Some(expected.net),
                "{kind}"
            );
        }
    }

    #[test]
    fn category_breakdown_keeps_labels_as_entered() {
        let transactions = vec![
            expense("a", 10.0, date!(2025 - 03 - 02), "Food"),
            expense("b", 5.0, date!(2025 - 03 - 03), "food"),
            expense("c", 2.5, date!(2025 - 03 - 04), "food"),
            income("d", 100.0, date!(2025 - 03 - 04), "food"),
        ];

        let report = aggregate_around(&transactions, PeriodKind::Monthly, date!(2025 - 03 - 15));

        assert_eq!(report.expense_by_category.len(), 2);
        assert_eq!(report.expense_by_category["Food"], 10.0);
        assert_eq!(report.expense_by_category["food"], 7.5);
    }

    #[test]
    fn aggregation_is_independent_of_input_order() {
        let mut transactions = vec![
            expense("a", 0.1, date!(2025 - 03 - 02), "food"),
            expense("b", 0.2, date!(2025 - 03 - 02), "food"),
            expense("c", 0.3, date!(2025 - 03 - 02), "food"),
            income("d", 0.7, date!(2025 - 03 - 05), "gift"),
        ];

        let first = aggregate_around(&transactions, PeriodKind::Weekly, date!(2025 - 03 - 03));
        let again = aggregate_around(&transactions, PeriodKind::Weekly, date!(2025 - 03 - 03));
        transactions.reverse();
        let reversed = aggregate_around(&transactions, PeriodKind::Weekly, date!(2025 - 03 - 03));

        assert_eq!(first, again);
        assert_eq!(
            first.totals.expense.to_bits(),
            reversed.totals.expense.to_bits()
        );
        assert_eq!(first, reversed);
    }

    #[test]
    fn expenses_for_a_single_day() {
        let transactions = vec![
            expense("a", 10.0, date!(2025 - 03 - 02), "food"),
            expense("b", 4.0, date!(2025 - 03 - 02), "food"),
            expense("c", 7.0, date!(2025 - 03 - 02), "bus"),
            expense("d", 99.0, date!(2025 - 03 - 01), "food"),
            income("e", 50.0, date!(2025 - 03 - 02), "gift"),
        ];

        let got = expenses_by_category_on(&transactions, date!(2025 - 03 - 02));

        assert_eq!(got.len(), 2);
        assert_eq!(got["food"], 14.0);
        assert_eq!(got["bus"], 7.0);
    }

    #[test]
    fn report_rows_are_inclusive_and_newest_first() {
        let transactions = vec![
            expense("a", 1.0, date!(2025 - 03 - 01), "x"),
            expense("b", 1.0, date!(2025 - 03 - 15), "x"),
            expense("c", 1.0, date!(2025 - 03 - 31), "x"),
            expense("d", 1.0, date!(2025 - 04 - 01), "x"),
        ];

        let rows = report_rows(&transactions, date!(2025 - 03 - 01), date!(2025 - 03 - 31));
        let ids: Vec<_> = rows.iter().map(|t| t.id.as_str()).collect();

        assert_eq!(ids, vec!["c", "b", "a"]);
    }
}
