//! Budget goals and their progress against recorded spending.

mod core;
mod progress;

pub use core::{BudgetGoal, BudgetGoalForm, BudgetGoalId, BudgetLimit};
pub use progress::{
    APPROACHING_PERCENT, BudgetProgress, BudgetStatus, evaluate, evaluate_all, goals_for_period,
    matches_category, monthly_category_spending,
};
