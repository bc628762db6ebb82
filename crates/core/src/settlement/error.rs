//! Settlement error types.

use rust_decimal::Decimal;
use splitledger_shared::AppError;
use splitledger_shared::types::MemberId;
use thiserror::Error;

/// Why a single financial event was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidEventReason {
    /// Amount is below zero.
    #[error("amount cannot be negative ({0})")]
    NegativeAmount(Decimal),

    /// Shared expense without anyone to split it among.
    #[error("shared expense has no participants")]
    NoParticipants,

    /// Shared expense lists the same member twice.
    #[error("participant {0} is listed more than once")]
    DuplicateParticipant(MemberId),
}

/// Errors that can occur while computing a settlement.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettlementError {
    /// An event violates the event invariants. Nothing is computed.
    #[error("Invalid event at position {index}: {reason}")]
    InvalidEvent {
        /// Position of the event in the input list.
        index: usize,
        /// What is wrong with it.
        reason: InvalidEventReason,
    },
}

impl SettlementError {
    /// Returns the error code for command output and logs.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidEvent { .. } => "INVALID_EVENT",
        }
    }
}

impl From<SettlementError> for AppError {
    fn from(err: SettlementError) -> Self {
        Self::Validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::str::FromStr;

    #[test]
    fn test_error_display() {
        let err = SettlementError::InvalidEvent {
            index: 3,
            reason: InvalidEventReason::NegativeAmount(dec!(-5.00)),
        };
        assert_eq!(
            err.to_string(),
            "Invalid event at position 3: amount cannot be negative (-5.00)"
        );

        let err = SettlementError::InvalidEvent {
            index: 0,
            reason: InvalidEventReason::DuplicateParticipant(MemberId::from_str("ana").unwrap()),
        };
        assert_eq!(
            err.to_string(),
            "Invalid event at position 0: participant ana is listed more than once"
        );
    }

    #[test]
    fn test_into_app_error() {
        let err: AppError = SettlementError::InvalidEvent {
            index: 1,
            reason: InvalidEventReason::NoParticipants,
        }
        .into();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
        assert_eq!(
            err.to_string(),
            "Validation error: Invalid event at position 1: shared expense has no participants"
        );
    }
}
