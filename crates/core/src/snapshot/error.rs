//! State document error types.

use splitledger_shared::AppError;
use splitledger_shared::types::{ExpenseId, GroupId};
use thiserror::Error;

/// Errors raised while reading or writing a state document.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The document is not valid JSON or does not have the expected shape.
    #[error("Malformed state document: {0}")]
    Parse(#[from] serde_json::Error),

    /// The ledger could not be serialized.
    #[error("Could not encode state document: {0}")]
    Encode(#[source] serde_json::Error),

    /// A loan record has no borrower.
    #[error("Loan {expense} in group {group} has no borrower")]
    MissingBorrower {
        /// Group ID.
        group: GroupId,
        /// Expense ID.
        expense: ExpenseId,
    },

    /// A millisecond timestamp is outside the representable range.
    #[error("Invalid timestamp {millis} in group {group}")]
    InvalidTimestamp {
        /// Group ID.
        group: GroupId,
        /// Offending epoch milliseconds.
        millis: i64,
    },
}

impl SnapshotError {
    /// Returns the error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Parse(_) => "SNAPSHOT_PARSE",
            Self::Encode(_) => "SNAPSHOT_ENCODE",
            Self::MissingBorrower { .. } => "MISSING_BORROWER",
            Self::InvalidTimestamp { .. } => "INVALID_TIMESTAMP",
        }
    }
}

impl From<SnapshotError> for AppError {
    fn from(err: SnapshotError) -> Self {
        Self::Snapshot(err.to_string())
    }
}
