use std::collections::BTreeMap;

use serde::Serialize;
use time::Date;

use crate::{
    budget::{BudgetProgress, evaluate_all, monthly_category_spending},
    period::PeriodKind,
    report::{Totals, WindowReport, aggregate_around, expenses_by_category_on, totals},
    snapshot::Snapshot,
    transaction::{Transaction, recent_transactions},
};

/// How many transactions the recent activity list shows.
pub const RECENT_TRANSACTION_COUNT: usize = 5;

/// Everything the overview screen shows, derived from one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    /// The date the dashboard was computed for.
    pub today: Date,
    /// All-time income, expenses and net balance.
    pub totals: Totals,
    /// Daily series for the week containing `today`.
    pub week: WindowReport,
    /// Expenses recorded on `today`, by category as entered.
    pub today_by_category: BTreeMap<String, f64>,
    /// Progress of every budget goal.
    pub budgets: Vec<BudgetProgress>,
    /// Month-to-date expenses by lowercased category.
    pub month_by_category: BTreeMap<String, f64>,
    /// The newest transactions, newest first.
    pub recent: Vec<Transaction>,
}

impl Dashboard {
    /// Derive the dashboard from `snapshot` as of `today`.
    pub fn compute(snapshot: &Snapshot, today: Date) -> Self {
        let transactions = &snapshot.transactions;

        let dashboard = Self {
            today,
            totals: totals(transactions),
            week: aggregate_around(transactions, PeriodKind::Weekly, today),
            today_by_category: expenses_by_category_on(transactions, today),
            budgets: evaluate_all(&snapshot.goals, transactions, today),
            month_by_category: monthly_category_spending(transactions, today),
            recent: recent_transactions(transactions, RECENT_TRANSACTION_COUNT)
                .into_iter()
                .cloned()
                .collect(),
        };

        tracing::debug!(
            "Recomputed dashboard for {today} from {} transactions",
            transactions.len()
        );

        dashboard
    }
}
