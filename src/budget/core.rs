//! Core budget goal domain types.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    Error,
    period::PeriodKind,
    transaction::{UserId, normalize_category},
};

/// Alias for the ID of a budget goal.
pub type BudgetGoalId = String;

/// A validated, strictly positive spending limit.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct BudgetLimit(f64);

impl BudgetLimit {
    /// Create a limit.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::InvalidLimit] if `limit` is not a
    /// finite number greater than zero.
    pub fn new(limit: f64) -> Result<Self, Error> {
        if limit.is_finite() && limit > 0.0 {
            Ok(Self(limit))
        } else {
            Err(Error::InvalidLimit(limit.to_string()))
        }
    }

    /// The limit as a plain number.
    pub fn get(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for BudgetLimit {
    type Error = Error;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        BudgetLimit::new(value)
    }
}

impl From<BudgetLimit> for f64 {
    fn from(value: BudgetLimit) -> Self {
        value.0
    }
}

impl Display for BudgetLimit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A spending ceiling for one category over a recurring period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetGoal {
    /// The ID of the goal.
    pub id: BudgetGoalId,
    /// The user that set the goal.
    #[serde(rename = "uid", default)]
    pub owner: UserId,
    /// The category the goal tracks, matched case-insensitively.
    pub category: String,
    /// The most that should be spent per period.
    pub limit: BudgetLimit,
    /// How often the limit resets.
    pub period: PeriodKind,
    /// The first day the goal applies to.
    #[serde(rename = "startDate")]
    pub start_date: Date,
}

impl BudgetGoal {
    /// Create a budget goal.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::InvalidLimit] if `limit` is not
    /// greater than zero.
    pub fn new(
        id: &str,
        owner: &str,
        category: &str,
        limit: f64,
        period: PeriodKind,
        start_date: Date,
    ) -> Result<Self, Error> {
        Ok(Self {
            id: id.to_owned(),
            owner: owner.to_owned(),
            category: category.to_owned(),
            limit: BudgetLimit::new(limit)?,
            period,
            start_date,
        })
    }
}

/// Form data for budget goal creation and editing.
#[derive(Debug, Clone, Deserialize)]
pub struct BudgetGoalForm {
    /// The category as typed by the user.
    pub category: String,
    /// The limit as typed by the user.
    pub limit: String,
    /// How often the limit resets.
    pub period: PeriodKind,
    /// The first day the goal applies to.
    #[serde(rename = "startDate")]
    pub start_date: Date,
}

impl BudgetGoalForm {
    /// Validate the form and build a [BudgetGoal].
    ///
    /// The category is trimmed and lowercased like transaction categories.
    ///
    /// # Errors
    ///
    /// - [Error::EmptyCategory] if the category is blank.
    /// - [Error::InvalidLimit] if the limit is not a number greater than zero.
    pub fn finalize(self, id: &str, owner: &str) -> Result<BudgetGoal, Error> {
        let category = normalize_category(&self.category);
        if category.is_empty() {
            return Err(Error::EmptyCategory);
        }

        let limit = self
            .limit
            .trim()
            .parse::<f64>()
            .map_err(|_| Error::InvalidLimit(self.limit.clone()))?;

        BudgetGoal::new(id, owner, &category, limit, self.period, self.start_date)
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::{
        Error,
        budget::{BudgetGoal, BudgetGoalForm, BudgetGoalId, BudgetLimit},
        period::PeriodKind,
    };

    #[test]
    fn limit_must_be_positive() {
        assert!(BudgetLimit::new(0.01).is_ok());
        assert_eq!(BudgetLimit::new(0.0), Err(Error::InvalidLimit("0".to_owned())));
        assert!(BudgetLimit::new(-5.0).is_err());
        assert!(BudgetLimit::new(f64::NAN).is_err());
    }

    #[test]
    fn deserializes_stored_goal() {
        let json = r#"{
            "id": "g1",
            "uid": "user-1",
            "category": "food",
            "limit": 500,
            "period": "monthly",
            "startDate": "2025-01-01"
        }"#;

        let goal: BudgetGoal = serde_json::from_str(json).unwrap();

        assert_eq!(goal.id, BudgetGoalId::from("g1"));
        assert_eq!(goal.limit.get(), 500.0);
        assert_eq!(goal.period, PeriodKind::Monthly);
        assert_eq!(goal.start_date, date!(2025 - 01 - 01));
    }

    #[test]
    fn rejects_stored_goal_with_zero_limit() {
        let json = r#"{"id": "g1", "category": "food", "limit": 0, "period": "weekly", "startDate": "2025-01-01"}"#;

        assert!(serde_json::from_str::<BudgetGoal>(json).is_err());
    }

    #[test]
    fn form_normalizes_category_and_parses_limit() {
        let form = BudgetGoalForm {
            category: " Groceries ".to_owned(),
            limit: "250.75".to_owned(),
            period: PeriodKind::Weekly,
            start_date: date!(2025 - 04 - 01),
        };

        let goal = form.finalize("g1", "user-1").unwrap();

        assert_eq!(goal.category, "groceries");
        assert_eq!(goal.limit.get(), 250.75);
        assert_eq!(goal.owner, "user-1");
    }

    #[test]
    fn form_rejects_non_numeric_limit() {
        let form = BudgetGoalForm {
            category: "food".to_owned(),
            limit: "lots".to_owned(),
            period: PeriodKind::Monthly,
            start_date: date!(2025 - 04 - 01),
        };

        assert_eq!(
            form.finalize("g1", "user-1"),
            Err(Error::InvalidLimit("lots".to_owned()))
        );
    }

    #[test]
    fn form_rejects_blank_category() {
        let form = BudgetGoalForm {
            category: "  ".to_owned(),
            limit: "10".to_owned(),
            period: PeriodKind::Monthly,
            start_date: date!(2025 - 04 - 01),
        };

        assert_eq!(form.finalize("g1", "user-1"), Err(Error::EmptyCategory));
    }
}
