//! Budget progress: how much of a goal's limit has been spent this period.

use std::collections::BTreeMap;

use serde::Serialize;
use time::Date;

use crate::{
    budget::core::{BudgetGoal, BudgetGoalId},
    period::{PeriodKind, PeriodWindow, window_for},
    transaction::{Transaction, chronological},
};

/// Spending at or above this share of the limit counts as approaching it.
pub const APPROACHING_PERCENT: f64 = 80.0;

/// Where spending stands relative to a goal's limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BudgetStatus {
    /// Less than 80% of the limit spent.
    OnTrack,
    /// At least 80% of the limit spent, but less than all of it.
    Approaching,
    /// Exactly the limit spent.
    AtLimit,
    /// More than the limit spent.
    OverBudget,
}

impl BudgetStatus {
    /// Classify `spent` against `limit`. `limit` must be positive.
    pub fn classify(spent: f64, limit: f64) -> Self {
        if spent > limit {
            Self::OverBudget
        } else if spent >= limit {
            Self::AtLimit
        } else if spent / limit * 100.0 >= APPROACHING_PERCENT {
            Self::Approaching
        } else {
            Self::OnTrack
        }
    }

    /// Human readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::OnTrack => "On Track",
            Self::Approaching => "Approaching Limit",
            Self::AtLimit => "Limit Reached",
            Self::OverBudget => "Over Budget",
        }
    }
}

/// The state of one goal in its current period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetProgress {
    /// The ID of the evaluated goal.
    pub goal_id: BudgetGoalId,
    /// The goal's category.
    pub category: String,
    /// The goal's period.
    pub period: PeriodKind,
    /// The natural window of the current period.
    pub window: PeriodWindow,
    /// The first day whose spending counts: the later of the goal's start
    /// date and the start of the current period.
    pub effective_start: Date,
    /// Whether the goal has started.
    pub active: bool,
    /// The amount spent since `effective_start`.
    pub spent: f64,
    /// The goal's limit.
    pub limit: f64,
    /// What is left to spend, never negative.
    pub remaining: f64,
    /// How far spending exceeds the limit, zero when within it.
    pub overspent: f64,
    /// Share of the limit spent, capped at 100.
    pub percentage: f64,
    /// The classification of `spent` against `limit`.
    pub status: BudgetStatus,
}

/// Evaluate `goal` against `transactions` as of `today`.
///
/// Counts expenses whose category matches the goal's case-insensitively and
/// whose date lies between the effective start and `today`, inclusive. A goal
/// that starts after `today` is inactive and has spent nothing.
pub fn evaluate(goal: &BudgetGoal, transactions: &[Transaction], today: Date) -> BudgetProgress {
    let window = window_for(goal.period, today);
    let effective_start = goal.start_date.max(window.start);
    let active = goal.start_date <= today;

    let mut matching: Vec<&Transaction> = transactions
        .iter()
        .filter(|transaction| {
            transaction.is_expense()
                && matches_category(&transaction.category, &goal.category)
                && effective_start <= transaction.date
                && transaction.date <= today
        })
        .collect();
    matching.sort_by(|a, b| chronological(a, b));

    let spent: f64 = matching.iter().map(|transaction| transaction.amount).sum();
    let limit = goal.limit.get();

    BudgetProgress {
        goal_id: goal.id.clone(),
        category: goal.category.clone(),
        period: goal.period,
        window,
        effective_start,
        active,
        spent,
        limit,
        remaining: (limit - spent).max(0.0),
        overspent: (spent - limit).max(0.0),
        percentage: (spent / limit * 100.0).min(100.0),
        status: BudgetStatus::classify(spent, limit),
    }
}

/// Evaluate every goal in `goals`, in order.
pub fn evaluate_all(
    goals: &[BudgetGoal],
    transactions: &[Transaction],
    today: Date,
) -> Vec<BudgetProgress> {
    let progress: Vec<_> = goals
        .iter()
        .map(|goal| evaluate(goal, transactions, today))
        .collect();

    tracing::debug!(
        "Evaluated {} budget goals, {} over budget",
        progress.len(),
        progress
            .iter()
            .filter(|p| p.status == BudgetStatus::OverBudget)
            .count()
    );

    progress
}

/// The goals that reset every `period`.
pub fn goals_for_period(goals: &[BudgetGoal], period: PeriodKind) -> Vec<&BudgetGoal> {
    goals.iter().filter(|goal| goal.period == period).collect()
}

/// Expenses in the calendar month containing `today`, keyed by lowercased
/// category.
///
/// Unlike [evaluate] this ignores each goal's own period and start date; it
/// gives a quick month-to-date view of spending per category.
pub fn monthly_category_spending(
    transactions: &[Transaction],
    today: Date,
) -> BTreeMap<String, f64> {
    let month = window_for(PeriodKind::Monthly, today);
    let mut expenses: Vec<&Transaction> = transactions
        .iter()
        .filter(|transaction| transaction.is_expense() && month.contains(transaction.date))
        .collect();
    expenses.sort_by(|a, b| chronological(a, b));

    let mut spending = BTreeMap::new();
    for transaction in expenses {
        *spending
            .entry(transaction.category.to_lowercase())
            .or_insert(0.0) += transaction.amount;
    }

    spending
}

/// Case-insensitive category comparison used for budget matching.
pub fn matches_category(transaction_category: &str, goal_category: &str) -> bool {
    transaction_category.to_lowercase() == goal_category.to_lowercase()
}
