use banking_sync::core::checkpoint::BalanceCheckpoint;
use banking_sync::core::transaction::Transaction;
use banking_sync::core::warning::SyncWarning;
use banking_sync::reconciliation::checkpoints::SyncError;
use banking_sync::reconciliation::engine::ReconciliationEngine;
use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::collections::HashMap;

const DAY_SECS: i64 = 86_400;

fn origin() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2011, 1, 1, 0, 0, 0).unwrap()
}

fn at(offset_secs: i64) -> DateTime<Utc> {
    origin() + Duration::seconds(offset_secs)
}

/// Amounts in cents, either sign.
fn arb_amount() -> impl Strategy<Value = Decimal> {
    (-10_000_000i64..10_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Between 2 and 8 checkpoints at distinct day offsets 0..365.
fn arb_checkpoints() -> impl Strategy<Value = Vec<BalanceCheckpoint>> {
    prop::collection::btree_set(0i64..365, 2..8).prop_flat_map(|days| {
        let n = days.len();
        prop::collection::vec(arb_amount(), n).prop_map(move |balances| {
            days.iter()
                .zip(balances)
                .map(|(d, b)| BalanceCheckpoint::new(at(d * DAY_SECS), b))
                .collect::<Vec<_>>()
        })
    })
}

/// Checkpoints plus a history lying strictly inside their overall window.
/// Ids come from a small pool so repeats are common.
fn arb_scenario() -> impl Strategy<Value = (Vec<BalanceCheckpoint>, Vec<Transaction>)> {
    arb_checkpoints().prop_flat_map(|checkpoints| {
        let first = checkpoints.first().map(|c| c.timestamp()).unwrap_or_else(origin);
        let last = checkpoints.last().map(|c| c.timestamp()).unwrap_or_else(origin);
        let span = (last - first).num_seconds();
        let tx = (0u64..10, 1..=span, arb_amount()).prop_map(move |(id, offset, amount)| {
            Transaction::new(id, first + Duration::seconds(offset), format!("tx {}", id), amount)
        });
        (Just(checkpoints), prop::collection::vec(tx, 0..40))
    })
}

proptest! {
    // Fewer than two distinct dates is always fatal, whatever the history.
    #[test]
    fn single_date_is_always_rejected(
        day in 0i64..365,
        balances in prop::collection::vec(arb_amount(), 0..5),
    ) {
        let checkpoints: Vec<_> = balances
            .into_iter()
            .map(|b| BalanceCheckpoint::new(at(day * DAY_SECS), b))
            .collect();
        let expected = checkpoints.len().min(1);
        let engine = ReconciliationEngine::new(Vec::new());
        prop_assert_eq!(
            engine.validate(&checkpoints),
            Err(SyncError::NotEnoughCheckpoints { found: expected })
        );
    }

    // A transaction at or before the first checkpoint, or after the last,
    // rejects the run.
    #[test]
    fn out_of_window_is_rejected(
        (checkpoints, mut history) in arb_scenario(),
        before in any::<bool>(),
        gap in 0i64..(30 * DAY_SECS),
    ) {
        let first = checkpoints[0].timestamp();
        let last = checkpoints[checkpoints.len() - 1].timestamp();
        let stray = if before {
            first - Duration::seconds(gap)
        } else {
            last + Duration::seconds(gap + 1)
        };
        history.push(Transaction::new(99u64, stray, "stray", Decimal::ONE));

        let engine = ReconciliationEngine::new(history);
        let rejected = matches!(
            engine.validate(&checkpoints),
            Err(SyncError::OutOfWindowTransaction { .. })
        );
        prop_assert!(rejected);
    }

    // An id seen k times yields exactly k - 1 duplicate warnings.
    #[test]
    fn duplicate_count_per_id((checkpoints, history) in arb_scenario()) {
        let mut occurrences: HashMap<u64, usize> = HashMap::new();
        for tx in &history {
            *occurrences.entry(tx.id().value()).or_default() += 1;
        }

        let engine = ReconciliationEngine::new(history);
        let warnings = engine.validate(&checkpoints).unwrap();

        let mut flagged: HashMap<u64, usize> = HashMap::new();
        for w in &warnings {
            if let SyncWarning::MovementDuplicated { movement_id, .. } = w {
                *flagged.entry(movement_id.value()).or_default() += 1;
            }
        }
        for (id, k) in occurrences {
            prop_assert_eq!(flagged.get(&id).copied().unwrap_or(0), k - 1);
        }
    }

    // Duplicate warnings always come before missing-movement warnings.
    #[test]
    fn duplicates_come_first((checkpoints, history) in arb_scenario()) {
        let engine = ReconciliationEngine::new(history);
        let warnings = engine.validate(&checkpoints).unwrap();
        let first_missing = warnings.iter().position(|w| w.is_missing()).unwrap_or(warnings.len());
        prop_assert!(warnings[first_missing..].iter().all(|w| w.is_missing()));
    }

    // Checkpoint balances derived from the history always reconcile; any
    // other balance yields exactly one warning with the exact difference.
    #[test]
    fn window_difference_is_exact(
        (checkpoints, history) in arb_scenario(),
        nudge in arb_amount(),
    ) {
        // Rebuild balances so every window reconciles.
        let mut balanced = vec![checkpoints[0].clone()];
        for pair in checkpoints.windows(2) {
            let moved: Decimal = history
                .iter()
                .filter(|t| t.timestamp() > pair[0].timestamp() && t.timestamp() <= pair[1].timestamp())
                .map(|t| t.amount())
                .sum();
            let opening = balanced[balanced.len() - 1].balance();
            balanced.push(BalanceCheckpoint::new(pair[1].timestamp(), opening + moved));
        }

        let engine = ReconciliationEngine::new(history);
        let clean = engine.validate(&balanced).unwrap();
        prop_assert!(clean.iter().all(|w| w.is_duplicate()));

        // Nudge the closing balance of the last window only.
        let last = balanced.len() - 1;
        balanced[last] = BalanceCheckpoint::new(balanced[last].timestamp(), balanced[last].balance() + nudge);
        let missing: Vec<_> = engine
            .validate(&balanced)
            .unwrap()
            .into_iter()
            .filter(|w| w.is_missing())
            .collect();

        if nudge == Decimal::ZERO {
            prop_assert!(missing.is_empty());
        } else {
            prop_assert_eq!(
                missing,
                vec![SyncWarning::missing(
                    balanced[last - 1].timestamp(),
                    balanced[last].timestamp(),
                    nudge,
                )]
            );
        }
    }

    // Validation has no hidden state: repeated calls agree.
    #[test]
    fn validation_is_idempotent((checkpoints, history) in arb_scenario()) {
        let engine = ReconciliationEngine::new(history);
        prop_assert_eq!(engine.validate(&checkpoints), engine.validate(&checkpoints));
    }

    // Sorting is internal: the order checkpoints arrive in is irrelevant.
    #[test]
    fn checkpoint_order_is_irrelevant(
        (checkpoints, history) in arb_scenario(),
        seed in any::<u64>(),
    ) {
        let mut shuffled = checkpoints.clone();
        // Deterministic rotation plus reversal driven by the seed.
        let rotate = (seed as usize) % shuffled.len();
        shuffled.rotate_left(rotate);
        if seed % 2 == 0 {
            shuffled.reverse();
        }

        let engine = ReconciliationEngine::new(history);
        prop_assert_eq!(engine.validate(&checkpoints), engine.validate(&shuffled));
    }
}
