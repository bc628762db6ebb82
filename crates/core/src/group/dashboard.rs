//! Dashboard summary types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use splitledger_shared::types::GroupId;

use super::types::{Group, GroupStatus};

/// Number of groups listed in the recent-groups panel.
pub const RECENT_GROUPS_LIMIT: usize = 5;

/// Headline numbers for the whole ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSummary {
    /// Groups whose debts are still open.
    pub pending_groups: usize,
    /// People in the directory.
    pub people: usize,
    /// Newest groups first, at most [`RECENT_GROUPS_LIMIT`].
    pub recent_groups: Vec<GroupOverview>,
}

/// One row of the recent-groups panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupOverview {
    /// Group ID.
    pub id: GroupId,
    /// Group name.
    pub name: String,
    /// Open or paid.
    pub status: GroupStatus,
    /// Roster size.
    pub members: usize,
    /// Sum of all recorded amounts.
    pub total_spent: Decimal,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// When the group was marked as paid.
    pub paid_at: Option<DateTime<Utc>>,
}

impl From<&Group> for GroupOverview {
    fn from(group: &Group) -> Self {
        Self {
            id: group.id.clone(),
            name: group.name.clone(),
            status: group.status,
            members: group.member_ids.len(),
            total_spent: group.total_spent(),
            created_at: group.created_at,
            paid_at: group.paid_at,
        }
    }
}
