//! Defines the core transaction model.

use std::fmt::Display;

use serde::{Deserialize, Deserializer, Serialize, de::IgnoredAny};
use time::{Date, OffsetDateTime};

/// Opaque identifier of a transaction, assigned by the external store.
pub type TransactionId = String;

/// Opaque identifier of the user that owns a record.
pub type UserId = String;

/// Whether money was earned or spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money earned.
    Income,
    /// Money spent.
    Expense,
}

impl TransactionKind {
    /// The lowercase name used in stored records and exports.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// Field names on the wire follow the records kept by the external store,
/// e.g. the owner is `uid` and the description is `name`.
///
/// To create a new `Transaction` in code, use [Transaction::build].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// The user that recorded the transaction.
    #[serde(rename = "uid", default)]
    pub owner: UserId,
    /// The amount of money spent or earned. Never negative.
    ///
    /// Malformed amounts in stored records are read as zero.
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub amount: f64,
    /// When the transaction happened.
    pub date: Date,
    /// The free-text category label, e.g. "food".
    #[serde(default)]
    pub category: String,
    /// Income or expense.
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// A text description of what the transaction was for.
    #[serde(rename = "name", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// When the record was created. Only used to order same-day transactions.
    #[serde(
        rename = "createdAt",
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<OffsetDateTime>,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [TransactionBuilder] for discoverability.
    pub fn build(
        amount: f64,
        date: Date,
        kind: TransactionKind,
        category: &str,
    ) -> TransactionBuilder {
        TransactionBuilder {
            id: String::new(),
            owner: String::new(),
            amount,
            date,
            category: category.to_owned(),
            kind,
            description: None,
            created_at: None,
        }
    }

    /// Whether this is an income transaction.
    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    /// Whether this is an expense transaction.
    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }
}

/// A builder for creating [Transaction] instances.
///
/// # Examples
///
/// ```
/// use fintrack::{Transaction, TransactionKind};
/// use time::macros::date;
///
/// let transaction = Transaction::build(45.99, date!(2025 - 01 - 15), TransactionKind::Expense, "food")
///     .id("t-1")
///     .description("Coffee")
///     .finalize();
///
/// assert_eq!(transaction.amount, 45.99);
/// ```
#[derive(Debug, PartialEq, Clone)]
pub struct TransactionBuilder {
    id: TransactionId,
    owner: UserId,
    amount: f64,
    date: Date,
    category: String,
    kind: TransactionKind,
    description: Option<String>,
    created_at: Option<OffsetDateTime>,
}

impl TransactionBuilder {
    /// Set the ID of the transaction.
    pub fn id(mut self, id: &str) -> Self {
        self.id = id.to_owned();
        self
    }

    /// Set the owner of the transaction.
    pub fn owner(mut self, owner: &str) -> Self {
        self.owner = owner.to_owned();
        self
    }

    /// Set the description of the transaction.
    pub fn description(mut self, description: &str) -> Self {
        self.description = Some(description.to_owned());
        self
    }

    /// Set the creation timestamp of the transaction.
    pub fn created_at(mut self, created_at: OffsetDateTime) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Build the final [Transaction] instance.
    ///
    /// A negative or non-finite amount is replaced with zero.
    pub fn finalize(self) -> Transaction {
        Transaction {
            id: self.id,
            owner: self.owner,
            amount: sanitize_amount(self.amount),
            date: self.date,
            category: self.category,
            kind: self.kind,
            description: self.description,
            created_at: self.created_at,
        }
    }
}

/// Parse a user-entered amount.
///
/// Returns `None` unless the text is a finite, non-negative number.
pub fn parse_amount(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite() && *amount >= 0.0)
}

pub(crate) fn sanitize_amount(amount: f64) -> f64 {
    if amount.is_finite() && amount >= 0.0 {
        amount
    } else {
        tracing::warn!("Replacing invalid transaction amount {amount} with 0");
        0.0
    }
}

/// Stored amounts may be numbers, numeric strings or garbage.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Number(f64),
    Text(String),
    Other(IgnoredAny),
}

fn deserialize_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let amount = match RawAmount::deserialize(deserializer)? {
        RawAmount::Number(amount) => sanitize_amount(amount),
        RawAmount::Text(text) => parse_amount(&text).unwrap_or_else(|| {
            tracing::warn!("Could not parse transaction amount {text:?}, using 0");
            0.0
        }),
        RawAmount::Other(_) => {
            tracing::warn!("Transaction amount is not a number, using 0");
            0.0
        }
    };

    Ok(amount)
}
