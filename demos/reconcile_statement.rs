//! Reconcile a month of card and salary movements against bank balances.
//!
//! Demonstrates a fully reconciled history, then the same history with a
//! record replayed by the feed and a fee the feed never reported.

use banking_sync::prelude::*;
use chrono::{TimeZone, Utc};
use rust_decimal_macros::dec;

fn main() {
    env_logger::init();

    println!("━━━ Scenario 1: Clean statement ━━━\n");

    let opening = Utc.with_ymd_and_hms(2011, 1, 1, 0, 0, 0).unwrap();
    let mid_month = Utc.with_ymd_and_hms(2011, 1, 16, 0, 0, 0).unwrap();
    let closing = Utc.with_ymd_and_hms(2011, 2, 1, 0, 0, 0).unwrap();

    let salary = Transaction::new(
        1,
        Utc.with_ymd_and_hms(2011, 1, 3, 8, 0, 0).unwrap(),
        "SALARY ACME CORP",
        dec!(2450.00),
    );
    let rent = Transaction::new(
        2,
        Utc.with_ymd_and_hms(2011, 1, 5, 9, 30, 0).unwrap(),
        "RENT JANUARY",
        dec!(-900.00),
    );
    let groceries = Transaction::new(
        3,
        Utc.with_ymd_and_hms(2011, 1, 21, 18, 12, 0).unwrap(),
        "CARD GROCER 0421",
        dec!(-87.35),
    );

    let balances = vec![
        BalanceCheckpoint::new(opening, dec!(120.00)),
        BalanceCheckpoint::new(mid_month, dec!(1670.00)),
        BalanceCheckpoint::new(closing, dec!(1582.65)),
    ];

    let command = ValidationCommand::new(
        vec![salary.clone(), rent.clone(), groceries.clone()],
        balances.clone(),
    );
    println!("{}", SynchronizationService::validate(&command));

    println!("━━━ Scenario 2: Replayed record and unreported fee ━━━\n");

    // The bank charged a 4.50 fee on the 25th that the feed never sent,
    // and the feed sent the rent twice.
    let mut closing_with_fee = balances;
    closing_with_fee[2] = BalanceCheckpoint::new(closing, dec!(1578.15));

    let command = ValidationCommand::new(
        vec![salary, rent.clone(), rent, groceries],
        closing_with_fee,
    );
    let result = SynchronizationService::validate(&command);
    println!("{}", result);

    let engine = ReconciliationEngine::new(command.movements.clone());
    if let Ok(windows) = engine.windows(&command.balances) {
        println!("━━━ Window breakdown ━━━\n");
        for window in windows {
            println!(
                "  ({} → {}]  projected {:>10}  reported {:>10}  diff {:>8}",
                window.start_date.format("%Y-%m-%d"),
                window.end_date.format("%Y-%m-%d"),
                window.projected_balance,
                window.reported_balance,
                window.difference
            );
        }
    }
}
