//! Validation of user-entered transactions.

use serde::Deserialize;
use time::{Date, OffsetDateTime};

use crate::{
    Error,
    transaction::core::{Transaction, TransactionKind, parse_amount},
};

/// The form data for creating or editing a transaction.
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionForm {
    /// The amount as typed by the user.
    pub amount: String,
    /// The date when the transaction occurred.
    pub date: Date,
    /// The category as typed by the user.
    pub category: String,
    /// Income or expense.
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// An optional note.
    #[serde(rename = "name", default)]
    pub description: String,
}

impl TransactionForm {
    /// Validate the form and build a [Transaction].
    ///
    /// The category is trimmed and lowercased so that entries typed with
    /// different casing end up under the same label. An empty description is
    /// stored as `None`.
    ///
    /// # Errors
    ///
    /// - [Error::InvalidAmount] if the amount is not a non-negative number.
    /// - [Error::EmptyCategory] if the category is blank.
    /// - [Error::FutureDate] if `date` is after `today`.
    pub fn finalize(
        self,
        id: &str,
        owner: &str,
        today: Date,
        created_at: OffsetDateTime,
    ) -> Result<Transaction, Error> {
        let amount =
            parse_amount(&self.amount).ok_or_else(|| Error::InvalidAmount(self.amount.clone()))?;

        let category = normalize_category(&self.category);
        if category.is_empty() {
            return Err(Error::EmptyCategory);
        }

        if self.date > today {
            return Err(Error::FutureDate(self.date));
        }

        let mut builder = Transaction::build(amount, self.date, self.kind, &category)
            .id(id)
            .owner(owner)
            .created_at(created_at);

        let description = self.description.trim();
        if !description.is_empty() {
            builder = builder.description(description);
        }

        Ok(builder.finalize())
    }
}

/// Trim and lowercase a category label for storage.
pub fn normalize_category(category: &str) -> String {
    category.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use time::macros::{date, datetime};

    use crate::{
        Error,
        transaction::{TransactionForm, TransactionKind},
    };

    fn form(amount: &str, date: time::Date, category: &str) -> TransactionForm {
        TransactionForm {
            amount: amount.to_owned(),
            date,
            category: category.to_owned(),
            kind: TransactionKind::Expense,
            description: "  ".to_owned(),
        }
    }

    const NOW: time::OffsetDateTime = datetime!(2025-05-10 09:00 UTC);

    #[test]
    fn finalize_normalizes_category() {
        let transaction = form("12.50", date!(2025 - 05 - 09), "  Food ")
            .finalize("t-1", "u-1", date!(2025 - 05 - 10), NOW)
            .unwrap();

        assert_eq!(transaction.category, "food");
        assert_eq!(transaction.amount, 12.5);
        assert_eq!(transaction.description, None);
        assert_eq!(transaction.created_at, Some(NOW));
    }

    #[test]
    fn finalize_rejects_future_date() {
        let result = form("1", date!(2025 - 05 - 11), "food").finalize(
            "t-1",
            "u-1",
            date!(2025 - 05 - 10),
            NOW,
        );

        assert_eq!(result, Err(Error::FutureDate(date!(2025 - 05 - 11))));
    }

    #[test]
    fn finalize_accepts_today() {
        let result = form("1", date!(2025 - 05 - 10), "food").finalize(
            "t-1",
            "u-1",
            date!(2025 - 05 - 10),
            NOW,
        );

        assert!(result.is_ok());
    }

    #[test]
    fn finalize_rejects_bad_amount_and_blank_category() {
        let today = date!(2025 - 05 - 10);

        assert_eq!(
            form("abc", today, "food").finalize("t", "u", today, NOW),
            Err(Error::InvalidAmount("abc".to_owned()))
        );
        assert_eq!(
            form("5", today, "   ").finalize("t", "u", today, NOW),
            Err(Error::EmptyCategory)
        );
    }
}
