//! Typed IDs for type-safe entity references.
//!
//! Identifiers reach us as JSON strings or JSON integers depending on who wrote
//! the document. Every ID type normalizes both forms to one canonical, trimmed
//! string so that `1700000000000` and `"1700000000000"` compare equal.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Error returned when an identifier cannot be normalized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdError {
    /// The identifier is empty after trimming.
    #[error("Identifier cannot be empty")]
    Empty,
}

/// Wire representation accepted for any identifier.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    /// Textual identifier.
    Text(String),
    /// Non-negative numeric identifier (e.g. a millisecond timestamp).
    Unsigned(u64),
    /// Negative numeric identifier.
    Signed(i64),
}

fn normalize(raw: &str) -> Result<String, IdError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(IdError::Empty);
    }
    Ok(trimmed.to_string())
}

/// Macro to generate typed ID wrappers.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "RawId", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates a new random ID using UUID v7 (time-ordered).
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::now_v7().to_string())
            }

            /// Returns the canonical string form.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Returns the inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = IdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(normalize(s)?))
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value.to_string())
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value.to_string())
            }
        }

        impl TryFrom<RawId> for $name {
            type Error = IdError;

            fn try_from(raw: RawId) -> Result<Self, Self::Error> {
                match raw {
                    RawId::Text(text) => text.parse(),
                    RawId::Unsigned(value) => Ok(value.into()),
                    RawId::Signed(value) => Ok(value.into()),
                }
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

typed_id!(
    MemberId,
    "Unique identifier for a person, used both in the directory and in group rosters."
);
typed_id!(GroupId, "Unique identifier for a group.");
typed_id!(ExpenseId, "Unique identifier for an expense or loan record.");
