//! Upgrade of legacy document shapes to the current ledger.
//!
//! Older documents may lack the directory, embed people inside each group,
//! or miss the status and timestamp fields. Each gap is filled once and
//! flagged so the caller knows to write the document back.

use chrono::{DateTime, Utc};
use splitledger_shared::types::{GroupId, MemberId};
use tracing::debug;

use super::error::SnapshotError;
use super::format::{RawDocument, RawExpense, RawExpenseType, RawGroup, RawPerson};
use crate::group::{Expense, ExpenseKind, Group, GroupStatus, Ledger, Person};

/// Result of migrating a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Migration {
    /// The upgraded ledger.
    pub ledger: Ledger,
    /// True if any field was added, moved or backfilled.
    pub changed: bool,
}

/// Migrates a parsed document into a typed ledger.
///
/// `now` backfills missing creation times, expense dates and ids.
///
/// # Errors
///
/// Returns `SnapshotError::MissingBorrower` for a loan without a borrower and
/// `SnapshotError::InvalidTimestamp` for an out-of-range timestamp.
pub fn migrate(raw: RawDocument, now: DateTime<Utc>) -> Result<Migration, SnapshotError> {
    let mut changed = raw.people.is_none() || raw.groups.is_none();

    let mut people = Vec::new();
    for person in raw.people.unwrap_or_default() {
        changed |= person.id.is_none();
        people.push(Person {
            id: person.id.unwrap_or_default(),
            name: person.name,
        });
    }

    let mut ledger = Ledger {
        people,
        groups: Vec::new(),
    };
    for group in raw.groups.unwrap_or_default() {
        let group = migrate_group(&mut ledger.people, group, now, &mut changed)?;
        ledger.groups.push(group);
    }

    debug!(
        people = ledger.people.len(),
        groups = ledger.groups.len(),
        changed,
        "Migrated state document"
    );
    Ok(Migration { ledger, changed })
}

fn migrate_group(
    directory: &mut Vec<Person>,
    raw: RawGroup,
    now: DateTime<Utc>,
    changed: &mut bool,
) -> Result<Group, SnapshotError> {
    let RawGroup {
        id,
        name,
        member_ids,
        people,
        expenses,
        status,
        created_at,
        paid_at,
    } = raw;

    *changed |= member_ids.is_none() || expenses.is_none() || status.is_none();
    let mut member_ids = member_ids.unwrap_or_default();

    if let Some(embedded) = people {
        *changed = true;
        for person in embedded {
            let member = adopt_person(directory, person);
            if !member_ids.contains(&member) {
                member_ids.push(member);
            }
        }
    }

    // Zero counts as missing: such groups predate the timestamp fields.
    let created_at = match created_at {
        Some(millis) if millis != 0 => from_millis(&id, millis)?,
        _ => {
            *changed = true;
            now
        }
    };
    let paid_at = match paid_at {
        Some(Some(millis)) => Some(from_millis(&id, millis)?),
        Some(None) => None,
        None => {
            *changed = true;
            None
        }
    };

    let expenses = expenses
        .unwrap_or_default()
        .into_iter()
        .map(|expense| migrate_expense(&id, expense, now, changed))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Group {
        id,
        name,
        member_ids,
        expenses,
        status: status.unwrap_or_default(),
        created_at,
        paid_at,
    })
}

/// Finds an embedded person in the directory by id or name, adding it if absent.
fn adopt_person(directory: &mut Vec<Person>, person: RawPerson) -> MemberId {
    let existing = directory.iter().find(|entry| {
        person.id.as_ref() == Some(&entry.id) || entry.name == person.name
    });
    if let Some(entry) = existing {
        return entry.id.clone();
    }

    let id = person.id.unwrap_or_default();
    directory.push(Person {
        id: id.clone(),
        name: person.name,
    });
    id
}

fn migrate_expense(
    group: &GroupId,
    raw: RawExpense,
    now: DateTime<Utc>,
    changed: &mut bool,
) -> Result<Expense, SnapshotError> {
    let kind = match raw.kind {
        RawExpenseType::Shared => ExpenseKind::Shared {
            involved_ids: raw.involved_ids.unwrap_or_default(),
        },
        RawExpenseType::Loan => ExpenseKind::Loan {
            borrower_id: raw.borrower_id.ok_or_else(|| SnapshotError::MissingBorrower {
                group: group.clone(),
                expense: raw.id.clone(),
            })?,
        },
    };

    *changed |= raw.date.is_none();
    Ok(Expense {
        id: raw.id,
        description: raw.desc.unwrap_or_default(),
        amount: raw.amount,
        payer_id: raw.payer_id,
        date: raw.date.unwrap_or(now),
        kind,
    })
}

fn from_millis(group: &GroupId, millis: i64) -> Result<DateTime<Utc>, SnapshotError> {
    DateTime::from_timestamp_millis(millis).ok_or_else(|| SnapshotError::InvalidTimestamp {
        group: group.clone(),
        millis,
    })
}
