//! # banking-sync
//!
//! Bank synchronization validation.
//!
//! Given the transaction history reported for an account and a series of
//! balances the bank vouches for, this engine checks that the history is
//! internally consistent and explains every balance change. Problems are
//! reported, never corrected.
//!
//! ## Architecture
//!
//! - **core** — Value types: transactions, balance checkpoints, warnings
//! - **reconciliation** — Checkpoint normalization, duplicate detection, window reconciliation
//! - **application** — Request/result types and the service transport layers call
//! - **simulation** — Synthetic histories with optional fault injection

pub mod application;
pub mod core;
pub mod reconciliation;
pub mod simulation;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::application::command::{ValidationCommand, ValidationResult, ValidationStatus};
    pub use crate::application::service::SynchronizationService;
    pub use crate::core::checkpoint::BalanceCheckpoint;
    pub use crate::core::transaction::{Transaction, TransactionId};
    pub use crate::core::warning::{SyncWarning, WarningCode};
    pub use crate::reconciliation::checkpoints::SyncError;
    pub use crate::reconciliation::engine::ReconciliationEngine;
    pub use crate::reconciliation::windows::WindowReconciliation;
}
