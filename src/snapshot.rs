//! A point-in-time copy of a user's transactions and budget goals.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{Error, budget::BudgetGoal, transaction::Transaction};

/// The full transaction and goal collections at one moment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Every recorded transaction, in no particular order.
    pub transactions: Vec<Transaction>,
    /// Every budget goal.
    pub goals: Vec<BudgetGoal>,
}

impl Snapshot {
    /// Create a snapshot from already loaded collections.
    pub fn new(transactions: Vec<Transaction>, goals: Vec<BudgetGoal>) -> Self {
        Self {
            transactions,
            goals,
        }
    }

    /// Decode a snapshot from JSON arrays of stored records.
    ///
    /// # Errors
    ///
    /// Returns [Error::Json] if either document is not an array of valid
    /// records.
    pub fn from_json(transactions_json: &str, goals_json: &str) -> Result<Self, Error> {
        let transactions: Vec<Transaction> = serde_json::from_str(transactions_json)?;
        let goals: Vec<BudgetGoal> = serde_json::from_str(goals_json)?;

        Ok(Self::new(transactions, goals))
    }

    /// Read a snapshot from JSON files.
    ///
    /// Without `goals_path` the snapshot has no goals.
    ///
    /// # Errors
    ///
    /// Returns [Error::Io] if a file cannot be read and [Error::Json] if it
    /// cannot be decoded.
    pub fn load(transactions_path: &Path, goals_path: Option<&Path>) -> Result<Self, Error> {
        let transactions_json = fs::read_to_string(transactions_path)?;
        let goals_json = match goals_path {
            Some(path) => fs::read_to_string(path)?,
            None => "[]".to_owned(),
        };

        let snapshot = Self::from_json(&transactions_json, &goals_json)?;

        tracing::info!(
            "Loaded {} transactions and {} budget goals from {}",
            snapshot.transactions.len(),
            snapshot.goals.len(),
            transactions_path.display()
        );

        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use std::{fs, path::PathBuf};

    use time::macros::date;

    use crate::{Error, snapshot::Snapshot, transaction::TransactionKind};

    const TRANSACTIONS: &str = r#"[
        {"id": "t1", "uid": "u1", "amount": 12.5, "date": "2025-03-01", "category": "food", "type": "expense", "name": "Lunch"},
        {"id": "t2", "uid": "u1", "amount": "2000", "date": "2025-03-02", "category": "salary", "type": "income"}
    ]"#;

    const GOALS: &str = r#"[
        {"id": "g1", "uid": "u1", "category": "food", "limit": 300, "period": "weekly", "startDate": "2025-03-01"}
    ]"#;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("fintrack-{}-{name}", std::process::id()));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn decodes_stored_records() {
        let snapshot = Snapshot::from_json(TRANSACTIONS, GOALS).unwrap();

        assert_eq!(snapshot.transactions.len(), 2);
        assert_eq!(snapshot.transactions[1].amount, 2000.0);
        assert_eq!(snapshot.transactions[1].kind, TransactionKind::Income);
        assert_eq!(snapshot.goals[0].start_date, date!(2025 - 03 - 01));
    }

    #[test]
    fn rejects_malformed_json() {
        let result = Snapshot::from_json("{not json", "[]");

        assert!(matches!(result, Err(Error::Json(_))));
    }

    #[test]
    fn loads_from_files() {
        let transactions_path = temp_file("transactions.json", TRANSACTIONS);
        let goals_path = temp_file("goals.json", GOALS);

        let snapshot = Snapshot::load(&transactions_path, Some(&goals_path)).unwrap();

        assert_eq!(snapshot.transactions.len(), 2);
        assert_eq!(snapshot.goals.len(), 1);

        fs::remove_file(transactions_path).unwrap();
        fs::remove_file(goals_path).unwrap();
    }

    #[test]
    fn goals_file_is_optional() {
        let transactions_path = temp_file("only-transactions.json", TRANSACTIONS);

        let snapshot = Snapshot::load(&transactions_path, None).unwrap();

        assert!(snapshot.goals.is_empty());
        fs::remove_file(transactions_path).unwrap();
    }

    #[test]
    fn missing_file_is_io_error() {
        let result = Snapshot::load(&PathBuf::from("/definitely/not/here.json"), None);

        assert!(matches!(result, Err(Error::Io(_))));
    }
}
