//! Synthetic account histories for benchmarks, demos and the CLI.
//!
//! A generated history reconciles exactly unless faults are injected:
//! repeated records produce duplicate warnings, dropped records produce
//! missing-movement warnings in the window they belonged to.

use crate::application::command::ValidationCommand;
use crate::core::checkpoint::BalanceCheckpoint;
use crate::core::transaction::Transaction;
use chrono::{DateTime, Duration, TimeZone, Utc};
use rand::rngs::StdRng;
use rand::seq::index::sample;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use std::collections::HashSet;

/// Configuration for generating a synthetic account history.
#[derive(Debug, Clone)]
pub struct HistoryConfig {
    /// Number of reconciliation windows (checkpoints minus one).
    pub windows: usize,
    /// Transactions generated inside each window.
    pub transactions_per_window: usize,
    /// Smallest absolute amount, in cents.
    pub min_amount_cents: i64,
    /// Largest absolute amount, in cents.
    pub max_amount_cents: i64,
    pub opening_balance: Decimal,
    /// Instant of the first checkpoint.
    pub start: DateTime<Utc>,
    pub window_length: Duration,
    /// Records re-reported with an id already used.
    pub duplicate_count: usize,
    /// Records the bank booked but left out of the history.
    pub dropped_count: usize,
    /// Fixed seed for reproducible output.
    pub seed: Option<u64>,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            windows: 12,
            transactions_per_window: 20,
            min_amount_cents: 100,
            max_amount_cents: 500_000,
            opening_balance: Decimal::from(1_000),
            start: Utc
                .with_ymd_and_hms(2011, 1, 1, 0, 0, 0)
                .single()
                .unwrap_or_else(Utc::now),
            window_length: Duration::days(30),
            duplicate_count: 0,
            dropped_count: 0,
            seed: None,
        }
    }
}

/// Output of [`generate_history`].
#[derive(Debug, Clone)]
pub struct GeneratedHistory {
    pub checkpoints: Vec<BalanceCheckpoint>,
    /// History as reported, repeats included, dropped records excluded.
    pub transactions: Vec<Transaction>,
    /// Records removed from the history by fault injection.
    pub dropped: Vec<Transaction>,
}

impl GeneratedHistory {
    pub fn into_command(self) -> ValidationCommand {
        ValidationCommand::new(self.transactions, self.checkpoints)
    }
}

/// Generate a history and its checkpoints according to `config`.
pub fn generate_history(config: &HistoryConfig) -> GeneratedHistory {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let window_secs = config.window_length.num_seconds().max(1);
    let min_cents = config.min_amount_cents.max(1);
    let max_cents = config.max_amount_cents.max(min_cents);

    let boundaries: Vec<DateTime<Utc>> = (0..=config.windows)
        .map(|k| config.start + Duration::seconds(window_secs * k as i64))
        .collect();

    let mut transactions = Vec::with_capacity(config.windows * config.transactions_per_window);
    for k in 0..config.windows {
        let mut offsets: Vec<i64> = (0..config.transactions_per_window)
            .map(|_| rng.gen_range(1..=window_secs))
            .collect();
        offsets.sort_unstable();
        for offset in offsets {
            let cents = rng.gen_range(min_cents..=max_cents);
            let amount = if rng.gen_bool(0.5) {
                Decimal::new(cents, 2)
            } else {
                Decimal::new(-cents, 2)
            };
            let id = transactions.len() as u64 + 1;
            transactions.push(Transaction::new(
                id,
                boundaries[k] + Duration::seconds(offset),
                format!("Movement {}", id),
                amount,
            ));
        }
    }

    // Pick records to drop first, then duplicate only records that stay.
    let total = transactions.len();
    let dropped_count = config.dropped_count.min(total);
    let dropped_idx: HashSet<usize> = sample(&mut rng, total, dropped_count).into_iter().collect();
    let kept: Vec<usize> = (0..total).filter(|i| !dropped_idx.contains(i)).collect();
    let duplicate_count = config.duplicate_count.min(kept.len());
    let duplicated: Vec<Transaction> = sample(&mut rng, kept.len(), duplicate_count)
        .into_iter()
        .map(|i| transactions[kept[i]].clone())
        .collect();

    // Balances reflect every booked record, repeats included.
    let mut window_totals = vec![Decimal::ZERO; config.windows];
    for tx in transactions.iter().chain(duplicated.iter()) {
        let end_idx = boundaries.partition_point(|b| *b < tx.timestamp());
        if end_idx >= 1 && end_idx <= config.windows {
            window_totals[end_idx - 1] += tx.amount();
        }
    }
    let mut balance = config.opening_balance;
    let mut checkpoints = Vec::with_capacity(boundaries.len());
    checkpoints.push(BalanceCheckpoint::new(boundaries[0], balance));
    for (k, total) in window_totals.iter().enumerate() {
        balance += total;
        checkpoints.push(BalanceCheckpoint::new(boundaries[k + 1], balance));
    }

    let mut dropped = Vec::with_capacity(dropped_count);
    let mut reported = Vec::with_capacity(total - dropped_count + duplicate_count);
    for (i, tx) in transactions.into_iter().enumerate() {
        if dropped_idx.contains(&i) {
            dropped.push(tx);
        } else {
            reported.push(tx);
        }
    }
    for copy in duplicated {
        let original = reported
            .iter()
            .position(|t: &Transaction| t.id() == copy.id())
            .unwrap_or(0);
        let at = rng.gen_range(original + 1..=reported.len());
        reported.insert(at, copy);
    }

    GeneratedHistory {
        checkpoints,
        transactions: reported,
        dropped,
    }
}
