use crate::core::checkpoint::BalanceCheckpoint;
use crate::core::transaction::Transaction;
use crate::core::warning::SyncWarning;
use crate::reconciliation::checkpoints::{normalize_checkpoints, SyncError};
use crate::reconciliation::duplicates::find_duplicates;
use crate::reconciliation::windows::{
    find_missing_movements, reconcile_windows, WindowReconciliation,
};
use log::{info, warn};

/// Reconciles one account's transaction history against bank checkpoints.
///
/// The engine takes ownership of the history at construction and never
/// mutates it, so `validate` can be called any number of times, from any
/// number of threads, with different checkpoint sets.
///
/// # Algorithm
///
/// 1. Deduplicate checkpoints by date, sort them, require at least two, and
///    require every transaction to fall in `(first, last]`. Failure here is
///    fatal and nothing else runs. So is a window whose totals overflow.
/// 2. Flag every repeated transaction id, in history order.
/// 3. For each adjacent checkpoint pair, compare the reported closing balance
///    with the opening balance plus the window's transactions.
///
/// Duplicate warnings come first, then missing-movement warnings in
/// chronological order.
///
/// # Examples
///
/// ```
/// use banking_sync::prelude::*;
/// use chrono::{TimeZone, Utc};
/// use rust_decimal_macros::dec;
///
/// let jan = Utc.with_ymd_and_hms(2011, 1, 1, 0, 0, 0).unwrap();
/// let feb = Utc.with_ymd_and_hms(2011, 2, 1, 0, 0, 0).unwrap();
/// let mid = Utc.with_ymd_and_hms(2011, 1, 15, 9, 0, 0).unwrap();
///
/// let engine = ReconciliationEngine::new(vec![
///     Transaction::new(1, mid, "Salary", dec!(100)),
/// ]);
/// let warnings = engine
///     .validate(&[
///         BalanceCheckpoint::new(jan, dec!(0)),
///         BalanceCheckpoint::new(feb, dec!(100)),
///     ])
///     .unwrap();
/// assert!(warnings.is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ReconciliationEngine {
    /// History in reported order, repeats kept.
    transactions: Vec<Transaction>,
}

impl ReconciliationEngine {
    pub fn new(history: impl IntoIterator<Item = Transaction>) -> Self {
        Self {
            transactions: history.into_iter().collect(),
        }
    }

    /// Validate the history against a set of balance checkpoints.
    ///
    /// Returns the combined warning list, empty when everything reconciles,
    /// or a [`SyncError`] when the checkpoints cannot support a validation.
    pub fn validate(&self, checkpoints: &[BalanceCheckpoint]) -> Result<Vec<SyncWarning>, SyncError> {
        let ordered = self.normalize(checkpoints)?;
        let missing = find_missing_movements(&ordered, &self.transactions).map_err(rejected)?;

        let mut warnings = find_duplicates(&self.transactions);
        let duplicate_count = warnings.len();
        warnings.extend(missing);

        info!(
            "validated {} movements over {} windows: {} duplicated, {} unreconciled",
            self.transactions.len(),
            ordered.len() - 1,
            duplicate_count,
            warnings.len() - duplicate_count
        );
        Ok(warnings)
    }

    /// Per-window breakdown for the given checkpoints, reconciled or not.
    pub fn windows(
        &self,
        checkpoints: &[BalanceCheckpoint],
    ) -> Result<Vec<WindowReconciliation>, SyncError> {
        let ordered = self.normalize(checkpoints)?;
        reconcile_windows(&ordered, &self.transactions).map_err(rejected)
    }

    fn normalize(&self, checkpoints: &[BalanceCheckpoint]) -> Result<Vec<BalanceCheckpoint>, SyncError> {
        normalize_checkpoints(checkpoints, &self.transactions).map_err(rejected)
    }
}

fn rejected(err: SyncError) -> SyncError {
    warn!("synchronization rejected: {}", err);
    err
}
