//! JSON state document: import with legacy migration, and export.
//!
//! The document holds the whole [`Ledger`]. Ids may be strings or integers,
//! amounts JSON numbers or strings, group timestamps epoch milliseconds and
//! expense dates RFC 3339.

pub mod error;
pub mod format;
pub mod migration;

use chrono::{DateTime, Utc};

use crate::group::Ledger;

pub use error::SnapshotError;
pub use migration::{Migration, migrate};

/// Parses and migrates a state document.
///
/// # Errors
///
/// Returns `SnapshotError::Parse` for malformed JSON, or any migration error.
pub fn import(json: &str, now: DateTime<Utc>) -> Result<Migration, SnapshotError> {
    let raw = serde_json::from_str(json)?;
    migrate(raw, now)
}

/// Serializes a ledger in the current document shape.
///
/// # Errors
///
/// Returns `SnapshotError::Encode` if serialization fails.
pub fn export(ledger: &Ledger) -> Result<String, SnapshotError> {
    serde_json::to_string_pretty(ledger).map_err(SnapshotError::Encode)
}
