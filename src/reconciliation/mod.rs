pub mod checkpoints;
pub mod duplicates;
pub mod engine;
pub mod windows;

pub use checkpoints::SyncError;
pub use engine::ReconciliationEngine;
