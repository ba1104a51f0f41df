use crate::core::checkpoint::BalanceCheckpoint;
use crate::core::transaction::Transaction;
use crate::core::warning::SyncWarning;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A validation request as handed over by the transport layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationCommand {
    pub movements: Vec<Transaction>,
    pub balances: Vec<BalanceCheckpoint>,
}

impl ValidationCommand {
    pub fn new(movements: Vec<Transaction>, balances: Vec<BalanceCheckpoint>) -> Self {
        Self {
            movements,
            balances,
        }
    }
}

/// The three outcomes a caller has to distinguish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationStatus {
    /// Validation ran and everything reconciles.
    Validated,
    /// Validation ran and found duplicates or gaps.
    Unreconciled,
    /// The input cannot support a validation.
    Rejected,
}

/// Outcome of a validation request.
///
/// Either `error` is set and `warnings` is empty, or `error` is absent and
/// `warnings` holds the (possibly empty) findings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub warnings: Vec<SyncWarning>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ValidationResult {
    pub fn accepted(warnings: Vec<SyncWarning>) -> Self {
        Self {
            warnings,
            error: None,
        }
    }

    pub fn rejected(error: impl Into<String>) -> Self {
        Self {
            warnings: Vec::new(),
            error: Some(error.into()),
        }
    }

    pub fn status(&self) -> ValidationStatus {
        if self.error.is_some() {
            ValidationStatus::Rejected
        } else if self.warnings.is_empty() {
            ValidationStatus::Validated
        } else {
            ValidationStatus::Unreconciled
        }
    }

    pub fn duplicate_count(&self) -> usize {
        self.warnings.iter().filter(|w| w.is_duplicate()).count()
    }

    pub fn missing_count(&self) -> usize {
        self.warnings.iter().filter(|w| w.is_missing()).count()
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Synchronization Validation ===")?;
        match self.status() {
            ValidationStatus::Rejected => {
                writeln!(f, "Status:         REJECTED")?;
                if let Some(error) = &self.error {
                    writeln!(f, "Reason:         {}", error)?;
                }
            }
            ValidationStatus::Validated => {
                writeln!(f, "Status:         VALIDATED")?;
            }
            ValidationStatus::Unreconciled => {
                writeln!(f, "Status:         UNRECONCILED")?;
                writeln!(f, "Duplicated:     {}", self.duplicate_count())?;
                writeln!(f, "Missing:        {}", self.missing_count())?;
                writeln!(f)?;
                for (i, warning) in self.warnings.iter().enumerate() {
                    writeln!(f, "  [{}] {}", i, warning)?;
                }
            }
        }
        Ok(())
    }
}
