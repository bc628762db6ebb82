//! Wire shapes accepted on import.
//!
//! Every field that older documents may omit is optional here; migration
//! fills the gaps and produces the typed [`Ledger`](crate::group::Ledger).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use splitledger_shared::types::{ExpenseId, GroupId, MemberId};

use crate::group::GroupStatus;

/// Top-level state document.
#[derive(Debug, Deserialize)]
pub struct RawDocument {
    /// People directory; absent in the oldest documents.
    pub people: Option<Vec<RawPerson>>,
    /// Groups.
    pub groups: Option<Vec<RawGroup>>,
}

/// Directory entry, or a person embedded in a legacy group.
#[derive(Debug, Deserialize)]
pub struct RawPerson {
    /// Person ID; embedded legacy people may lack one.
    pub id: Option<MemberId>,
    /// Display name.
    pub name: String,
}

/// Group record.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawGroup {
    /// Group ID.
    pub id: GroupId,
    /// Group name.
    pub name: String,
    /// Roster.
    pub member_ids: Option<Vec<MemberId>>,
    /// Legacy embedded roster, replaced by the directory plus `memberIds`.
    pub people: Option<Vec<RawPerson>>,
    /// Expense records.
    pub expenses: Option<Vec<RawExpense>>,
    /// Pending or paid.
    pub status: Option<GroupStatus>,
    /// Epoch milliseconds.
    pub created_at: Option<i64>,
    /// Absent (`None`), explicit null (`Some(None)`) or epoch milliseconds.
    #[serde(default, deserialize_with = "present")]
    pub paid_at: Option<Option<i64>>,
}

/// Expense discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RawExpenseType {
    /// Split evenly.
    Shared,
    /// Owed by one borrower.
    Loan,
}

/// Expense record.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawExpense {
    /// Expense ID.
    pub id: ExpenseId,
    /// Description.
    pub desc: Option<String>,
    /// Amount, as a JSON number or string.
    pub amount: Decimal,
    /// Member who paid.
    pub payer_id: MemberId,
    /// Shared or loan.
    #[serde(rename = "type")]
    pub kind: RawExpenseType,
    /// Participants of a shared expense.
    pub involved_ids: Option<Vec<MemberId>>,
    /// Borrower of a loan.
    pub borrower_id: Option<MemberId>,
    /// RFC 3339 timestamp.
    pub date: Option<DateTime<Utc>>,
}

/// Distinguishes an explicit `null` from a missing field.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}
