use crate::core::transaction::{Transaction, TransactionId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable numeric codes for in-process consumers of the warning list.
///
/// JSON output identifies a warning by its snake_case `code` tag instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningCode {
    MovementDuplicated = 1,
    MovementMissing = 2,
}

impl WarningCode {
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

/// A non-fatal data-quality finding produced by a completed validation.
///
/// Warnings never alter the input. A validation that yields no warnings
/// means the history fully reconciles against the checkpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum SyncWarning {
    /// A transaction id seen earlier in the history appeared again.
    /// Carries the later occurrence.
    MovementDuplicated {
        movement_id: TransactionId,
        movement_label: String,
    },
    /// The transactions inside `(start_date, end_date]` do not explain the
    /// balance change between the two checkpoints.
    ///
    /// `difference` is reported balance minus projected balance: positive
    /// when more money arrived than the transactions account for.
    MovementMissing {
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
        difference: Decimal,
    },
}

impl SyncWarning {
    pub fn duplicated(transaction: &Transaction) -> Self {
        SyncWarning::MovementDuplicated {
            movement_id: transaction.id(),
            movement_label: transaction.label().to_string(),
        }
    }

    pub fn missing(start_date: DateTime<Utc>, end_date: DateTime<Utc>, difference: Decimal) -> Self {
        SyncWarning::MovementMissing {
            start_date,
            end_date,
            difference,
        }
    }

    pub fn code(&self) -> WarningCode {
        match self {
            SyncWarning::MovementDuplicated { .. } => WarningCode::MovementDuplicated,
            SyncWarning::MovementMissing { .. } => WarningCode::MovementMissing,
        }
    }

    pub fn is_duplicate(&self) -> bool {
        matches!(self, SyncWarning::MovementDuplicated { .. })
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, SyncWarning::MovementMissing { .. })
    }
}

impl fmt::Display for SyncWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncWarning::MovementDuplicated {
                movement_id,
                movement_label,
            } => write!(f, "duplicated movement #{} ({})", movement_id, movement_label),
            SyncWarning::MovementMissing {
                start_date,
                end_date,
                difference,
            } => write!(
                f,
                "unreconciled movement of {} between {} and {}",
                difference,
                start_date.to_rfc3339(),
                end_date.to_rfc3339()
            ),
        }
    }
}
