use crate::core::checkpoint::BalanceCheckpoint;
use crate::core::transaction::{Transaction, TransactionId};
use chrono::{DateTime, Utc};
use log::{debug, warn};
use std::collections::BTreeMap;
use thiserror::Error;

/// Structural failures that prevent a validation from running at all.
///
/// These are distinct from [`SyncWarning`](crate::core::warning::SyncWarning)s:
/// a run that fails with a `SyncError` produced no findings whatsoever.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    #[error("not enough bank balances: need at least 2 distinct checkpoint dates, got {found}")]
    NotEnoughCheckpoints { found: usize },
    #[error(
        "missing balances to validate movement {id} at {timestamp}: \
         checkpoints only cover ({window_start}, {window_end}]"
    )]
    OutOfWindowTransaction {
        id: TransactionId,
        timestamp: DateTime<Utc>,
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
    },
    #[error("balance arithmetic overflowed in window ({window_start}, {window_end}]")]
    BalanceOverflow {
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
    },
}

/// Deduplicate checkpoints by timestamp and order them chronologically.
///
/// When several checkpoints share a timestamp the one supplied last is kept.
/// Fails when fewer than two distinct timestamps remain.
pub fn order_checkpoints(
    checkpoints: &[BalanceCheckpoint],
) -> Result<Vec<BalanceCheckpoint>, SyncError> {
    let mut by_date: BTreeMap<DateTime<Utc>, &BalanceCheckpoint> = BTreeMap::new();
    for checkpoint in checkpoints {
        if let Some(previous) = by_date.insert(checkpoint.key(), checkpoint) {
            if previous.balance() != checkpoint.balance() {
                warn!(
                    "conflicting balances {} and {} reported at {}, keeping {}",
                    previous.balance(),
                    checkpoint.balance(),
                    checkpoint.timestamp(),
                    checkpoint.balance()
                );
            }
        }
    }

    if by_date.len() < 2 {
        return Err(SyncError::NotEnoughCheckpoints {
            found: by_date.len(),
        });
    }

    Ok(by_date.into_values().cloned().collect())
}

/// Ensure every transaction lies within `(first, last]` of the ordered
/// checkpoints. Reports the first offender in history order.
pub fn check_coverage(
    ordered: &[BalanceCheckpoint],
    transactions: &[Transaction],
) -> Result<(), SyncError> {
    let (first, last) = match (ordered.first(), ordered.last()) {
        (Some(first), Some(last)) => (first.timestamp(), last.timestamp()),
        _ => {
            return Err(SyncError::NotEnoughCheckpoints {
                found: ordered.len(),
            })
        }
    };

    match transactions
        .iter()
        .find(|t| t.timestamp() <= first || t.timestamp() > last)
    {
        Some(offender) => Err(SyncError::OutOfWindowTransaction {
            id: offender.id(),
            timestamp: offender.timestamp(),
            window_start: first,
            window_end: last,
        }),
        None => Ok(()),
    }
}

/// Full checkpoint normalization: dedup, order, then bound the history.
pub fn normalize_checkpoints(
    checkpoints: &[BalanceCheckpoint],
    transactions: &[Transaction],
) -> Result<Vec<BalanceCheckpoint>, SyncError> {
    let ordered = order_checkpoints(checkpoints)?;
    check_coverage(&ordered, transactions)?;
    debug!(
        "normalized {} checkpoints into {} windows",
        checkpoints.len(),
        ordered.len() - 1
    );
    Ok(ordered)
}
