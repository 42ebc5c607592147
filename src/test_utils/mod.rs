#![allow(missing_docs)]

//! Fixtures shared by the unit tests.

use time::Date;

use crate::{
    budget::BudgetGoal,
    period::PeriodKind,
    transaction::{Transaction, TransactionKind},
};

pub(crate) fn expense(id: &str, amount: f64, date: Date, category: &str) -> Transaction {
    Transaction::build(amount, date, TransactionKind::Expense, category)
        .id(id)
        .owner("user-1")
        .finalize()
}

pub(crate) fn income(id: &str, amount: f64, date: Date, category: &str) -> Transaction {
    Transaction::build(amount, date, TransactionKind::Income, category)
        .id(id)
        .owner("user-1")
        .finalize()
}

pub(crate) fn goal(category: &str, limit: f64, period: PeriodKind, start_date: Date) -> BudgetGoal {
    BudgetGoal::new(
        &format!("goal-{category}"),
        "user-1",
        category,
        limit,
        period,
        start_date,
    )
    .expect("test goal limit should be positive")
}
