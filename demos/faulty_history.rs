//! Generate a year of synthetic movements with injected faults and show
//! what the engine reports.

use banking_sync::prelude::*;
use banking_sync::simulation::history::{generate_history, HistoryConfig};

fn main() {
    env_logger::init();

    let config = HistoryConfig {
        windows: 12,
        transactions_per_window: 25,
        duplicate_count: 3,
        dropped_count: 2,
        seed: Some(42),
        ..Default::default()
    };

    let history = generate_history(&config);
    println!(
        "Generated {} movements over {} checkpoints",
        history.transactions.len(),
        history.checkpoints.len()
    );
    for tx in &history.dropped {
        println!(
            "  dropped #{} {} on {}",
            tx.id(),
            tx.amount(),
            tx.timestamp().format("%Y-%m-%d %H:%M")
        );
    }
    println!();

    let result = SynchronizationService::validate(&history.into_command());
    println!("{}", result);
    match result.status() {
        ValidationStatus::Validated => println!("History reconciles."),
        ValidationStatus::Unreconciled => println!(
            "{} duplicated record(s), {} window(s) with missing movements.",
            result.duplicate_count(),
            result.missing_count()
        ),
        ValidationStatus::Rejected => println!("History could not be validated."),
    }
}
