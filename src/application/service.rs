use crate::application::command::{ValidationCommand, ValidationResult};
use crate::reconciliation::engine::ReconciliationEngine;

/// Entry point for transport layers: turns a request into a result.
///
/// A fresh engine is built per request, so the service holds no state.
pub struct SynchronizationService;

impl SynchronizationService {
    /// Run a validation and fold any structural failure into the result's
    /// `error` message.
    pub fn validate(command: &ValidationCommand) -> ValidationResult {
        let engine = ReconciliationEngine::new(command.movements.iter().cloned());
        match engine.validate(&command.balances) {
            Ok(warnings) => ValidationResult::accepted(warnings),
            Err(err) => ValidationResult::rejected(err.to_string()),
        }
    }
}
