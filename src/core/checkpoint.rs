use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A balance reported by the bank as of a given instant.
///
/// Checkpoints anchor reconciliation: every pair of chronologically
/// adjacent checkpoints bounds a window whose transactions must explain
/// the change in balance.
///
/// # Examples
///
/// ```
/// use banking_sync::core::checkpoint::BalanceCheckpoint;
/// use chrono::{TimeZone, Utc};
/// use rust_decimal_macros::dec;
///
/// let opening = BalanceCheckpoint::new(
///     Utc.with_ymd_and_hms(2011, 1, 1, 0, 0, 0).unwrap(),
///     dec!(150.00),
/// );
/// assert_eq!(opening.balance(), dec!(150.00));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceCheckpoint {
    #[serde(rename = "date")]
    timestamp: DateTime<Utc>,
    balance: Decimal,
}

impl BalanceCheckpoint {
    pub fn new(timestamp: DateTime<Utc>, balance: Decimal) -> Self {
        Self { timestamp, balance }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    /// Checkpoints reported at the same instant collapse into one.
    pub fn key(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

impl fmt::Display for BalanceCheckpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {}", self.balance, self.timestamp.to_rfc3339())
    }
}
