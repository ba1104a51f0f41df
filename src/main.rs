//! banking-sync CLI
//!
//! Validate bank synchronizations from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Validate a synchronization request
//! banking-sync validate --input sync.json
//!
//! # Output as JSON
//! banking-sync validate --input sync.json --format json
//!
//! # Show the per-window arithmetic
//! banking-sync windows --input sync.json
//!
//! # Generate a synthetic request for testing
//! banking-sync generate --windows 6 --dropped 1 --duplicates 2
//! ```

use banking_sync::application::command::{ValidationResult, ValidationStatus};
use banking_sync::application::input::load_command;
use banking_sync::application::service::SynchronizationService;
use banking_sync::reconciliation::engine::ReconciliationEngine;
use banking_sync::simulation::history::{generate_history, HistoryConfig};
use std::fs;
use std::process;

const EXIT_REJECTED: i32 = 1;
const EXIT_UNRECONCILED: i32 = 2;

fn print_usage() {
    eprintln!(
        r#"banking-sync — validate bank transaction histories against balance checkpoints

USAGE:
    banking-sync <COMMAND> [OPTIONS]

COMMANDS:
    validate    Check a synchronization request for duplicates and gaps
    windows     Print the reconciliation arithmetic of every window
    generate    Generate a synthetic synchronization request (for testing)
    help        Show this message

OPTIONS (validate, windows):
    --input <FILE>      Path to JSON synchronization request
    --format <FORMAT>   Output format: text (default) or json

OPTIONS (generate):
    --windows <N>       Number of checkpoint windows (default: 12)
    --per-window <N>    Transactions per window (default: 20)
    --duplicates <N>    Records to repeat (default: 0)
    --dropped <N>       Records to leave out (default: 0)
    --seed <N>          Seed for reproducible output
    --output <FILE>     Write to file instead of stdout

EXIT STATUS (validate):
    0  validated, 1  rejected or unreadable input, 2  unreconciled

ENVIRONMENT:
    RUST_LOG            Log filter, e.g. RUST_LOG=debug (default: warn)

EXAMPLES:
    banking-sync validate --input sync.json
    banking-sync validate --input sync.json --format json
    banking-sync generate --windows 3 --dropped 1 --seed 7 --output sync.json"#
    );
}

fn parse_input_args(args: &[String]) -> (String, String) {
    let mut input_path = None;
    let mut format = "text".to_string();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--input" => {
                i += 1;
                input_path = Some(args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--input requires a file path");
                    process::exit(1);
                }));
            }
            "--format" => {
                i += 1;
                format = args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--format requires 'text' or 'json'");
                    process::exit(1);
                });
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let path = input_path.unwrap_or_else(|| {
        eprintln!("Error: --input <FILE> is required");
        process::exit(1);
    });
    (path, format)
}

fn to_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| {
        eprintln!("Error serializing output: {}", e);
        process::exit(1);
    })
}

fn cmd_validate(args: &[String]) {
    let (path, format) = parse_input_args(args);
    let command = load_command(&path).unwrap_or_else(|e| {
        eprintln!("{}", e);
        process::exit(1);
    });

    let result: ValidationResult = SynchronizationService::validate(&command);

    if format == "json" {
        println!("{}", to_json(&result));
    } else {
        print!("{}", result);
    }

    match result.status() {
        ValidationStatus::Validated => {}
        ValidationStatus::Unreconciled => process::exit(EXIT_UNRECONCILED),
        ValidationStatus::Rejected => process::exit(EXIT_REJECTED),
    }
}

fn cmd_windows(args: &[String]) {
    let (path, format) = parse_input_args(args);
    let command = load_command(&path).unwrap_or_else(|e| {
        eprintln!("{}", e);
        process::exit(1);
    });

    let engine = ReconciliationEngine::new(command.movements);
    let windows = engine.windows(&command.balances).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(EXIT_REJECTED);
    });

    if format == "json" {
        println!("{}", to_json(&windows));
    } else {
        for (i, window) in windows.iter().enumerate() {
            println!(
                "Window {}: ({}, {}]",
                i,
                window.start_date.to_rfc3339(),
                window.end_date.to_rfc3339()
            );
            println!("    Opening:    {}", window.opening_balance);
            println!(
                "    Movements:  {} ({} records)",
                window.movements_total, window.movement_count
            );
            println!("    Projected:  {}", window.projected_balance);
            println!("    Reported:   {}", window.reported_balance);
            println!(
                "    Difference: {}{}",
                window.difference,
                if window.is_reconciled() { "" } else { "  ← unreconciled" }
            );
        }
    }
}

fn parse_count(args: &[String], i: usize, flag: &str) -> usize {
    args.get(i).and_then(|s| s.parse().ok()).unwrap_or_else(|| {
        eprintln!("{} requires a number", flag);
        process::exit(1);
    })
}

fn cmd_generate(args: &[String]) {
    let mut config = HistoryConfig::default();
    let mut output_path: Option<String> = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--windows" => {
                i += 1;
                config.windows = parse_count(args, i, "--windows");
            }
            "--per-window" => {
                i += 1;
                config.transactions_per_window = parse_count(args, i, "--per-window");
            }
            "--duplicates" => {
                i += 1;
                config.duplicate_count = parse_count(args, i, "--duplicates");
            }
            "--dropped" => {
                i += 1;
                config.dropped_count = parse_count(args, i, "--dropped");
            }
            "--seed" => {
                i += 1;
                config.seed = Some(parse_count(args, i, "--seed") as u64);
            }
            "--output" => {
                i += 1;
                output_path = Some(args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--output requires a file path");
                    process::exit(1);
                }));
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let history = generate_history(&config);
    let dropped = history.dropped.len();
    let command = history.into_command();
    let json = to_json(&command);

    if let Some(path) = output_path {
        fs::write(&path, &json).unwrap_or_else(|e| {
            eprintln!("Error writing to '{}': {}", path, e);
            process::exit(1);
        });
        eprintln!(
            "Generated {} movements and {} balances ({} dropped) → {}",
            command.movements.len(),
            command.balances.len(),
            dropped,
            path
        );
    } else {
        println!("{}", json);
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = args[1].as_str();
    let rest = &args[2..];

    match command {
        "validate" => cmd_validate(rest),
        "windows" => cmd_windows(rest),
        "generate" => cmd_generate(rest),
        "help" | "--help" | "-h" => print_usage(),
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            process::exit(1);
        }
    }
}
