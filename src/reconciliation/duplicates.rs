use crate::core::transaction::{Transaction, TransactionId};
use crate::core::warning::SyncWarning;
use std::collections::HashSet;

/// Scan a history in reported order and flag every repeated id.
///
/// The first occurrence of an id is accepted; each later occurrence yields
/// one warning referencing that later record. An id seen `k` times therefore
/// produces `k - 1` warnings.
pub fn find_duplicates(transactions: &[Transaction]) -> Vec<SyncWarning> {
    let mut seen: HashSet<TransactionId> = HashSet::with_capacity(transactions.len());
    transactions
        .iter()
        .filter(|t| !seen.insert(t.key()))
        .map(SyncWarning::duplicated)
        .collect()
}
