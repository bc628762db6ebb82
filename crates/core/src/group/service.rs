//! Ledger service: people directory, group rosters and expense records.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use splitledger_shared::types::{ExpenseId, GroupId, MemberId};
use tracing::info;

use super::dashboard::{DashboardSummary, GroupOverview, RECENT_GROUPS_LIMIT};
use super::error::GroupError;
use super::types::{Expense, ExpenseInput, ExpenseKind, Group, GroupStatus, Ledger, Person};
use crate::settlement::{SettlementEngine, SettlementReport};

/// Operations on a [`Ledger`].
///
/// The ledger is passed explicitly to every call; the service holds no state.
/// Time-dependent operations take `now` so callers control the clock.
pub struct LedgerService;

impl LedgerService {
    /// Adds a person to the directory.
    ///
    /// # Errors
    ///
    /// Returns `GroupError::EmptyName` if the trimmed name is empty.
    pub fn add_person(ledger: &mut Ledger, name: &str) -> Result<MemberId, GroupError> {
        let name = non_empty(name)?;
        let id = MemberId::new();
        ledger.people.push(Person {
            id: id.clone(),
            name: name.to_string(),
        });

        info!(person_id = %id, name, "Person added");
        Ok(id)
    }

    /// Removes a person from the directory.
    ///
    /// Rosters and expense records keep referencing the id; settlement
    /// tolerates members that no longer exist.
    ///
    /// # Errors
    ///
    /// Returns `GroupError::PersonNotFound` if the id is unknown.
    pub fn remove_person(ledger: &mut Ledger, id: &MemberId) -> Result<Person, GroupError> {
        let index = ledger
            .people
            .iter()
            .position(|person| &person.id == id)
            .ok_or_else(|| GroupError::PersonNotFound(id.clone()))?;

        info!(person_id = %id, "Person removed");
        Ok(ledger.people.remove(index))
    }

    /// Creates an empty pending group.
    ///
    /// # Errors
    ///
    /// Returns `GroupError::EmptyName` if the trimmed name is empty.
    pub fn create_group(
        ledger: &mut Ledger,
        name: &str,
        now: DateTime<Utc>,
    ) -> Result<GroupId, GroupError> {
        let group = Group::new(non_empty(name)?, now);
        let id = group.id.clone();
        ledger.groups.push(group);

        info!(group_id = %id, "Group created");
        Ok(id)
    }

    /// Deletes a group with all its records.
    ///
    /// # Errors
    ///
    /// Returns `GroupError::GroupNotFound` if the id is unknown.
    pub fn delete_group(ledger: &mut Ledger, id: &GroupId) -> Result<Group, GroupError> {
        let index = ledger
            .groups
            .iter()
            .position(|group| &group.id == id)
            .ok_or_else(|| GroupError::GroupNotFound(id.clone()))?;

        info!(group_id = %id, "Group deleted");
        Ok(ledger.groups.remove(index))
    }

    /// Flips a group between pending and paid.
    ///
    /// Marking as paid stamps `paid_at` with `now`; reopening clears it.
    ///
    /// # Errors
    ///
    /// Returns `GroupError::GroupNotFound` if the id is unknown.
    pub fn toggle_group_status(
        ledger: &mut Ledger,
        id: &GroupId,
        now: DateTime<Utc>,
    ) -> Result<GroupStatus, GroupError> {
        let group = group_mut(ledger, id)?;
        group.status = group.status.toggled();
        group.paid_at = match group.status {
            GroupStatus::Paid => Some(now),
            GroupStatus::Pending => None,
        };

        info!(group_id = %id, status = %group.status, "Group status changed");
        Ok(group.status)
    }

    /// Adds a directory person to a group's roster.
    ///
    /// # Errors
    ///
    /// Returns `GroupError::GroupNotFound`, `GroupError::PersonNotFound`, or
    /// `GroupError::AlreadyMember`.
    pub fn add_member(
        ledger: &mut Ledger,
        group_id: &GroupId,
        member: &MemberId,
    ) -> Result<(), GroupError> {
        if ledger.person(member).is_none() {
            return Err(GroupError::PersonNotFound(member.clone()));
        }
        let group = group_mut(ledger, group_id)?;
        if group.is_member(member) {
            return Err(GroupError::AlreadyMember {
                group: group_id.clone(),
                member: member.clone(),
            });
        }
        group.member_ids.push(member.clone());

        info!(group_id = %group_id, member_id = %member, "Member added");
        Ok(())
    }

    /// Removes a member from a group's roster. Existing records are kept.
    ///
    /// # Errors
    ///
    /// Returns `GroupError::GroupNotFound` or `GroupError::NotAMember`.
    pub fn remove_member(
        ledger: &mut Ledger,
        group_id: &GroupId,
        member: &MemberId,
    ) -> Result<(), GroupError> {
        let group = group_mut(ledger, group_id)?;
        let index = group
            .member_ids
            .iter()
            .position(|id| id == member)
            .ok_or_else(|| GroupError::NotAMember {
                group: group_id.clone(),
                member: member.clone(),
            })?;
        group.member_ids.remove(index);

        info!(group_id = %group_id, member_id = %member, "Member removed");
        Ok(())
    }

    /// Records a new expense or loan dated `now`.
    ///
    /// # Errors
    ///
    /// Returns `GroupError::GroupNotFound` or any input validation error
    /// (see [`LedgerService::validate_expense`]).
    pub fn add_expense(
        ledger: &mut Ledger,
        group_id: &GroupId,
        input: ExpenseInput,
        now: DateTime<Utc>,
    ) -> Result<ExpenseId, GroupError> {
        let group = group_mut(ledger, group_id)?;
        Self::validate_expense(group, &input)?;

        let expense = build_expense(ExpenseId::new(), input, now);
        let id = expense.id.clone();
        info!(group_id = %group_id, expense_id = %id, amount = %expense.amount, "Expense added");
        group.expenses.push(expense);

        Ok(id)
    }

    /// Replaces an expense record in place, keeping its id and position.
    ///
    /// # Errors
    ///
    /// Returns `GroupError::GroupNotFound`, `GroupError::ExpenseNotFound`, or
    /// any input validation error.
    pub fn update_expense(
        ledger: &mut Ledger,
        group_id: &GroupId,
        expense_id: &ExpenseId,
        input: ExpenseInput,
        now: DateTime<Utc>,
    ) -> Result<(), GroupError> {
        let group = group_mut(ledger, group_id)?;
        let index = expense_index(group, expense_id)?;
        Self::validate_expense(group, &input)?;

        group.expenses[index] = build_expense(expense_id.clone(), input, now);

        info!(group_id = %group_id, expense_id = %expense_id, "Expense updated");
        Ok(())
    }

    /// Deletes an expense record.
    ///
    /// # Errors
    ///
    /// Returns `GroupError::GroupNotFound` or `GroupError::ExpenseNotFound`.
    pub fn delete_expense(
        ledger: &mut Ledger,
        group_id: &GroupId,
        expense_id: &ExpenseId,
    ) -> Result<Expense, GroupError> {
        let group = group_mut(ledger, group_id)?;
        let index = expense_index(group, expense_id)?;

        info!(group_id = %group_id, expense_id = %expense_id, "Expense deleted");
        Ok(group.expenses.remove(index))
    }

    /// Validates expense input against a group's current roster.
    ///
    /// # Errors
    ///
    /// - `GroupError::EmptyDescription` if the trimmed description is empty
    /// - `GroupError::NonPositiveAmount` if the amount is zero or negative
    /// - `GroupError::NoParticipants` for a shared expense with nobody involved
    /// - `GroupError::DuplicateParticipant` if a participant is listed twice
    /// - `GroupError::NotAMember` if the payer, a participant or the borrower
    ///   is not on the roster
    pub fn validate_expense(group: &Group, input: &ExpenseInput) -> Result<(), GroupError> {
        if input.description.trim().is_empty() {
            return Err(GroupError::EmptyDescription);
        }
        if input.amount <= Decimal::ZERO {
            return Err(GroupError::NonPositiveAmount(input.amount));
        }

        let mut referenced = vec![&input.payer_id];
        match &input.kind {
            ExpenseKind::Shared { involved_ids } => {
                if involved_ids.is_empty() {
                    return Err(GroupError::NoParticipants);
                }
                let mut seen = HashSet::with_capacity(involved_ids.len());
                for member in involved_ids {
                    if !seen.insert(member) {
                        return Err(GroupError::DuplicateParticipant(member.clone()));
                    }
                }
                referenced.extend(involved_ids);
            }
            ExpenseKind::Loan { borrower_id } => referenced.push(borrower_id),
        }

        match referenced.into_iter().find(|member| !group.is_member(member)) {
            Some(outsider) => Err(GroupError::NotAMember {
                group: group.id.clone(),
                member: outsider.clone(),
            }),
            None => Ok(()),
        }
    }

    /// Computes who pays whom in a group.
    ///
    /// The current roster seeds the balance table; former members still
    /// referenced by records are settled as well.
    ///
    /// # Errors
    ///
    /// Returns `GroupError::GroupNotFound`, or `GroupError::Settlement` if a
    /// stored record is not a valid event.
    pub fn settle_group(ledger: &Ledger, group_id: &GroupId) -> Result<SettlementReport, GroupError> {
        let group = ledger
            .group(group_id)
            .ok_or_else(|| GroupError::GroupNotFound(group_id.clone()))?;
        SettlementEngine::compute_report(&group.member_ids, &group.events())
            .map_err(GroupError::from)
    }

    /// Summarizes the ledger for the dashboard.
    #[must_use]
    pub fn dashboard(ledger: &Ledger) -> DashboardSummary {
        let mut recent: Vec<&Group> = ledger.groups.iter().collect();
        recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        DashboardSummary {
            pending_groups: ledger
                .groups
                .iter()
                .filter(|group| group.status == GroupStatus::Pending)
                .count(),
            people: ledger.people.len(),
            recent_groups: recent
                .into_iter()
                .take(RECENT_GROUPS_LIMIT)
                .map(GroupOverview::from)
                .collect(),
        }
    }
}

fn non_empty(name: &str) -> Result<&str, GroupError> {
    let name = name.trim();
    if name.is_empty() {
        Err(GroupError::EmptyName)
    } else {
        Ok(name)
    }
}

fn group_mut<'a>(ledger: &'a mut Ledger, id: &GroupId) -> Result<&'a mut Group, GroupError> {
    ledger
        .group_mut(id)
        .ok_or_else(|| GroupError::GroupNotFound(id.clone()))
}

fn expense_index(group: &Group, id: &ExpenseId) -> Result<usize, GroupError> {
    group
        .expenses
        .iter()
        .position(|expense| &expense.id == id)
        .ok_or_else(|| GroupError::ExpenseNotFound(id.clone()))
}

fn build_expense(id: ExpenseId, input: ExpenseInput, now: DateTime<Utc>) -> Expense {
    Expense {
        id,
        description: input.description.trim().to_string(),
        amount: input.amount,
        payer_id: input.payer_id,
        date: now,
        kind: input.kind,
    }
}
