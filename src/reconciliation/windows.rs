use crate::core::checkpoint::BalanceCheckpoint;
use crate::core::transaction::Transaction;
use crate::core::warning::SyncWarning;
use crate::reconciliation::checkpoints::SyncError;
use chrono::{DateTime, Utc};
use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Arithmetic of one window `(start, end]` between adjacent checkpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowReconciliation {
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    /// Balance reported at `start_date`.
    pub opening_balance: Decimal,
    /// Sum of every transaction amount inside the window, repeats included.
    pub movements_total: Decimal,
    pub movement_count: usize,
    /// Opening balance plus the window's movements.
    pub projected_balance: Decimal,
    /// Balance reported at `end_date`.
    pub reported_balance: Decimal,
    /// Reported minus projected. Zero means the window reconciles.
    pub difference: Decimal,
}

impl WindowReconciliation {
    pub fn is_reconciled(&self) -> bool {
        self.difference == Decimal::ZERO
    }

    pub fn to_warning(&self) -> Option<SyncWarning> {
        if self.is_reconciled() {
            None
        } else {
            Some(SyncWarning::missing(
                self.start_date,
                self.end_date,
                self.difference,
            ))
        }
    }
}

/// Compute every window of the ordered checkpoints.
///
/// `ordered` must be strictly ascending by timestamp. A transaction belongs
/// to the window whose start is strictly before it and whose end is at or
/// after it; transactions outside `(first, last]` belong to no window.
///
/// Fails with [`SyncError::BalanceOverflow`] when a window's sum, projection
/// or difference leaves the range of [`Decimal`].
pub fn reconcile_windows(
    ordered: &[BalanceCheckpoint],
    transactions: &[Transaction],
) -> Result<Vec<WindowReconciliation>, SyncError> {
    if ordered.len() < 2 {
        return Ok(Vec::new());
    }

    let window_count = ordered.len() - 1;
    let overflow = |end_idx: usize| SyncError::BalanceOverflow {
        window_start: ordered[end_idx - 1].timestamp(),
        window_end: ordered[end_idx].timestamp(),
    };

    let mut totals = vec![Decimal::ZERO; window_count];
    let mut counts = vec![0usize; window_count];

    for tx in transactions {
        // Index of the first checkpoint at or after the transaction: the
        // window's end.
        let end_idx = ordered.partition_point(|c| c.timestamp() < tx.timestamp());
        if end_idx == 0 || end_idx > window_count {
            continue;
        }
        totals[end_idx - 1] = totals[end_idx - 1]
            .checked_add(tx.amount())
            .ok_or_else(|| overflow(end_idx))?;
        counts[end_idx - 1] += 1;
    }

    let mut windows = Vec::with_capacity(window_count);
    for (k, (movements_total, movement_count)) in totals.into_iter().zip(counts).enumerate() {
        let (start, end) = (&ordered[k], &ordered[k + 1]);
        let projected_balance = start
            .balance()
            .checked_add(movements_total)
            .ok_or_else(|| overflow(k + 1))?;
        let difference = end
            .balance()
            .checked_sub(projected_balance)
            .ok_or_else(|| overflow(k + 1))?;

        let window = WindowReconciliation {
            start_date: start.timestamp(),
            end_date: end.timestamp(),
            opening_balance: start.balance(),
            movements_total,
            movement_count,
            projected_balance,
            reported_balance: end.balance(),
            difference,
        };
        debug!(
            "window ({}, {}]: {} movements totalling {}, difference {}",
            window.start_date,
            window.end_date,
            window.movement_count,
            window.movements_total,
            window.difference
        );
        windows.push(window);
    }
    Ok(windows)
}

/// Missing-movement warnings for every window that does not reconcile,
/// in chronological order.
pub fn find_missing_movements(
    ordered: &[BalanceCheckpoint],
    transactions: &[Transaction],
) -> Result<Vec<SyncWarning>, SyncError> {
    Ok(reconcile_windows(ordered, transactions)?
        .iter()
        .filter_map(WindowReconciliation::to_warning)
        .collect())
}


#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn month(m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2011, m, 1, 0, 0, 0).unwrap()
    }

    fn mid(m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2011, m, 15, 12, 30, 0).unwrap()
    }

    #[test]
    fn test_single_window_positive_gap() {
        let ordered = vec![
            BalanceCheckpoint::new(month(1), dec!(0)),
            BalanceCheckpoint::new(month(2), dec!(100)),
        ];
        let txs = vec![Transaction::new(1, mid(1), "Movement 1", dec!(10))];

        let warnings = find_missing_movements(&ordered, &txs).unwrap();
        assert_eq!(warnings, vec![SyncWarning::missing(month(1), month(2), dec!(90))]);
    }

    #[test]
    fn test_single_window_negative_gap() {
        let ordered = vec![
            BalanceCheckpoint::new(month(1), dec!(100)),
            BalanceCheckpoint::new(month(2), dec!(0)),
        ];
        let txs = vec![Transaction::new(1, mid(1), "Movement 1", dec!(-10))];

        let warnings = find_missing_movements(&ordered, &txs).unwrap();
        assert_eq!(warnings, vec![SyncWarning::missing(month(1), month(2), dec!(-90))]);
    }

    #[test]
    fn test_no_transactions_whole_delta_missing() {
        let ordered = vec![
            BalanceCheckpoint::new(month(1), dec!(0)),
            BalanceCheckpoint::new(month(2), dec!(100)),
        ];
        let windows = reconcile_windows(&ordered, &[]).unwrap();
        assert_eq!(windows.len(), 1);
        assert_eq!(windows[0].movement_count, 0);
        assert_eq!(windows[0].difference, dec!(100));
    }

    #[test]
    fn test_transaction_on_interior_checkpoint_belongs_to_earlier_window() {
        let ordered = vec![
            BalanceCheckpoint::new(month(1), dec!(50)),
            BalanceCheckpoint::new(month(2), dec!(150)),
            BalanceCheckpoint::new(month(3), dec!(200)),
        ];
        let txs = vec![
            Transaction::new(1, mid(1), "Movement 1", dec!(150)),
            Transaction::new(2, month(2), "Movement 2", dec!(-50)),
            Transaction::new(3, mid(2), "Movement 3", dec!(50)),
        ];

        let windows = reconcile_windows(&ordered, &txs).unwrap();
        assert_eq!(windows[0].movement_count, 2);
        assert_eq!(windows[0].movements_total, dec!(100));
        assert_eq!(windows[1].movement_count, 1);
        assert!(windows.iter().all(WindowReconciliation::is_reconciled));
    }

    #[test]
    fn test_exact_decimal_arithmetic() {
        let ordered = vec![
            BalanceCheckpoint::new(month(1), dec!(0.1)),
            BalanceCheckpoint::new(month(2), dec!(0.3)),
        ];
        let txs = vec![Transaction::new(1, mid(1), "cents", dec!(0.2))];
        assert!(find_missing_movements(&ordered, &txs).unwrap().is_empty());
    }

    #[test]
    fn test_repeated_ids_still_counted() {
        let ordered = vec![
            BalanceCheckpoint::new(month(1), dec!(0)),
            BalanceCheckpoint::new(month(2), dec!(10)),
        ];
        let tx = Transaction::new(1, mid(1), "Movement 1", dec!(10));
        let windows = reconcile_windows(&ordered, &[tx.clone(), tx]).unwrap();
        assert_eq!(windows[0].movements_total, dec!(20));
        assert_eq!(windows[0].difference, dec!(-10));
    }

    #[test]
    fn test_fewer_than_two_checkpoints_yields_no_windows() {
        let ordered = vec![BalanceCheckpoint::new(month(1), dec!(0))];
        assert!(reconcile_windows(&ordered, &[]).unwrap().is_empty());
    }

    #[test]
    fn test_window_sum_overflow_is_fatal() {
        let ordered = vec![
            BalanceCheckpoint::new(month(1), dec!(0)),
            BalanceCheckpoint::new(month(2), dec!(0)),
            BalanceCheckpoint::new(month(3), dec!(0)),
        ];
        let txs = vec![
            Transaction::new(1, mid(2), "huge", Decimal::MAX),
            Transaction::new(2, mid(2), "huge again", Decimal::MAX),
        ];

        assert_eq!(
            reconcile_windows(&ordered, &txs),
            Err(SyncError::BalanceOverflow {
                window_start: month(2),
                window_end: month(3),
            })
        );
    }

    #[test]
    fn test_projection_and_difference_overflow_are_fatal() {
        let opening_at_max = vec![
            BalanceCheckpoint::new(month(1), Decimal::MAX),
            BalanceCheckpoint::new(month(2), dec!(0)),
        ];
        let txs = vec![Transaction::new(1, mid(1), "one", dec!(1))];
        assert!(matches!(
            reconcile_windows(&opening_at_max, &txs),
            Err(SyncError::BalanceOverflow { .. })
        ));

        let far_apart = vec![
            BalanceCheckpoint::new(month(1), Decimal::MAX),
            BalanceCheckpoint::new(month(2), Decimal::MIN),
        ];
        assert!(matches!(
            find_missing_movements(&far_apart, &[]),
            Err(SyncError::BalanceOverflow { .. })
        ));
    }
}
