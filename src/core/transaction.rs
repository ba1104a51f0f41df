use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Caller-supplied identifier of a bank transaction.
///
/// Identifiers come from the bank feed and are not guaranteed to be unique
/// within a history; repeated identifiers are what the duplicate check
/// looks for.
///
/// # Examples
///
/// ```
/// use banking_sync::core::transaction::TransactionId;
///
/// let a = TransactionId::new(42);
/// let b = TransactionId::from(42u64);
/// assert_eq!(a, b);
/// assert_eq!(a.to_string(), "42");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(u64);

impl TransactionId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TransactionId {
    fn from(id: u64) -> Self {
        Self::new(id)
    }
}

/// A single movement on the bank account.
///
/// A positive `amount` credits the account, a negative one debits it.
/// Transactions are immutable once created; the reconciliation engine
/// only ever reads them.
///
/// # Examples
///
/// ```
/// use banking_sync::core::transaction::Transaction;
/// use chrono::{TimeZone, Utc};
/// use rust_decimal_macros::dec;
///
/// let tx = Transaction::new(
///     1,
///     Utc.with_ymd_and_hms(2011, 1, 5, 12, 30, 0).unwrap(),
///     "Card payment",
///     dec!(-42.50),
/// );
///
/// assert_eq!(tx.amount(), dec!(-42.50));
/// assert_eq!(tx.label(), "Card payment");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    id: TransactionId,
    #[serde(rename = "date")]
    timestamp: DateTime<Utc>,
    label: String,
    amount: Decimal,
}

impl Transaction {
    pub fn new(id: u64, timestamp: DateTime<Utc>, label: impl Into<String>, amount: Decimal) -> Self {
        Self {
            id: TransactionId::new(id),
            timestamp,
            label: label.into(),
            amount,
        }
    }

    // --- Accessors ---

    pub fn id(&self) -> TransactionId {
        self.id
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Key used to detect duplicates. Two transactions sharing an id are
    /// duplicates of each other regardless of their other fields.
    pub fn key(&self) -> TransactionId {
        self.id
    }
}
