//! Group and directory error types.

use rust_decimal::Decimal;
use splitledger_shared::AppError;
use splitledger_shared::types::{ExpenseId, GroupId, MemberId};
use thiserror::Error;

use crate::settlement::SettlementError;

/// Group and directory errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GroupError {
    /// Person or group name is empty.
    #[error("Name cannot be empty")]
    EmptyName,

    /// Person not in the directory.
    #[error("Person not found: {0}")]
    PersonNotFound(MemberId),

    /// Group not found.
    #[error("Group not found: {0}")]
    GroupNotFound(GroupId),

    /// Expense not found in the group.
    #[error("Expense not found: {0}")]
    ExpenseNotFound(ExpenseId),

    /// Person is already on the roster.
    #[error("{member} is already a member of group {group}")]
    AlreadyMember {
        /// Group ID.
        group: GroupId,
        /// Member ID.
        member: MemberId,
    },

    /// Member is not on the roster.
    #[error("{member} is not a member of group {group}")]
    NotAMember {
        /// Group ID.
        group: GroupId,
        /// Member ID.
        member: MemberId,
    },

    /// Expense description is empty.
    #[error("Expense description cannot be empty")]
    EmptyDescription,

    /// Expense amount is zero or negative.
    #[error("Expense amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),

    /// Shared expense with nobody to split it.
    #[error("Shared expense must have at least one participant")]
    NoParticipants,

    /// Shared expense listing a participant twice.
    #[error("Participant listed twice: {0}")]
    DuplicateParticipant(MemberId),

    /// The group's records cannot be settled.
    #[error(transparent)]
    Settlement(#[from] SettlementError),
}

impl GroupError {
    /// Returns the error code.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyName => "EMPTY_NAME",
            Self::PersonNotFound(_) => "PERSON_NOT_FOUND",
            Self::GroupNotFound(_) => "GROUP_NOT_FOUND",
            Self::ExpenseNotFound(_) => "EXPENSE_NOT_FOUND",
            Self::AlreadyMember { .. } => "ALREADY_MEMBER",
            Self::NotAMember { .. } => "NOT_A_MEMBER",
            Self::EmptyDescription => "EMPTY_DESCRIPTION",
            Self::NonPositiveAmount(_) => "NON_POSITIVE_AMOUNT",
            Self::NoParticipants => "NO_PARTICIPANTS",
            Self::DuplicateParticipant(_) => "DUPLICATE_PARTICIPANT",
            Self::Settlement(err) => err.error_code(),
        }
    }
}

impl From<GroupError> for AppError {
    fn from(err: GroupError) -> Self {
        match err {
            GroupError::PersonNotFound(_)
            | GroupError::GroupNotFound(_)
            | GroupError::ExpenseNotFound(_) => Self::NotFound(err.to_string()),
            GroupError::AlreadyMember { .. } => Self::Conflict(err.to_string()),
            GroupError::Settlement(inner) => inner.into(),
            _ => Self::Validation(err.to_string()),
        }
    }
}
