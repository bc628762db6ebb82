//! Directory, group and expense records.
//!
//! Field names serialize in the camelCase shape of the exported state
//! document (`memberIds`, `payerId`, `createdAt`...).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use splitledger_shared::types::{ExpenseId, GroupId, MemberId};

use crate::settlement::FinancialEvent;

/// An entry in the global people directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// Person ID, shared by every group the person belongs to.
    pub id: MemberId,
    /// Display name.
    pub name: String,
}

/// Whether a group's debts are still open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GroupStatus {
    /// Debts outstanding.
    #[default]
    Pending,
    /// Marked as paid by the users.
    Paid,
}

impl GroupStatus {
    /// Returns the status a toggle moves to.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Pending => Self::Paid,
            Self::Paid => Self::Pending,
        }
    }
}

impl std::fmt::Display for GroupStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => f.write_str("PENDING"),
            Self::Paid => f.write_str("PAID"),
        }
    }
}

/// How an expense record distributes its amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExpenseKind {
    /// Split evenly among the involved members.
    Shared {
        /// Members sharing the cost.
        #[serde(rename = "involvedIds")]
        involved_ids: Vec<MemberId>,
    },
    /// Owed in full by the borrower.
    Loan {
        /// Member who owes the amount.
        #[serde(rename = "borrowerId")]
        borrower_id: MemberId,
    },
}

/// A shared expense or loan recorded in a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    /// Expense ID.
    pub id: ExpenseId,
    /// What the money was spent on.
    #[serde(rename = "desc")]
    pub description: String,
    /// Positive amount.
    pub amount: Decimal,
    /// Member who paid.
    pub payer_id: MemberId,
    /// When the record was last written.
    pub date: DateTime<Utc>,
    /// Shared expense or loan details.
    #[serde(flatten)]
    pub kind: ExpenseKind,
}

impl Expense {
    /// Converts the record into an engine event.
    #[must_use]
    pub fn to_event(&self) -> FinancialEvent {
        match &self.kind {
            ExpenseKind::Shared { involved_ids } => {
                FinancialEvent::shared(self.amount, self.payer_id.clone(), involved_ids.clone())
            }
            ExpenseKind::Loan { borrower_id } => {
                FinancialEvent::loan(self.amount, self.payer_id.clone(), borrower_id.clone())
            }
        }
    }
}

/// A group of people sharing expenses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    /// Group ID.
    pub id: GroupId,
    /// Group name.
    pub name: String,
    /// Current roster, in insertion order.
    #[serde(default)]
    pub member_ids: Vec<MemberId>,
    /// Expenses and loans, in insertion order.
    #[serde(default)]
    pub expenses: Vec<Expense>,
    /// Open or paid.
    #[serde(default)]
    pub status: GroupStatus,
    /// Creation time, stored as epoch milliseconds.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    /// When the group was marked as paid.
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub paid_at: Option<DateTime<Utc>>,
}

impl Group {
    /// Creates an empty pending group.
    #[must_use]
    pub fn new(name: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: GroupId::new(),
            name: name.into(),
            member_ids: Vec::new(),
            expenses: Vec::new(),
            status: GroupStatus::Pending,
            created_at: now,
            paid_at: None,
        }
    }

    /// Returns true if the member is on the current roster.
    #[must_use]
    pub fn is_member(&self, member: &MemberId) -> bool {
        self.member_ids.contains(member)
    }

    /// Engine events for every expense, in record order.
    #[must_use]
    pub fn events(&self) -> Vec<FinancialEvent> {
        self.expenses.iter().map(Expense::to_event).collect()
    }

    /// Sum of all recorded amounts.
    #[must_use]
    pub fn total_spent(&self) -> Decimal {
        self.expenses.iter().map(|expense| expense.amount).sum()
    }
}

/// The whole application state: people directory plus groups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    /// People directory.
    #[serde(default)]
    pub people: Vec<Person>,
    /// Groups, in creation order.
    #[serde(default)]
    pub groups: Vec<Group>,
}

impl Ledger {
    /// Looks up a person.
    #[must_use]
    pub fn person(&self, id: &MemberId) -> Option<&Person> {
        self.people.iter().find(|person| &person.id == id)
    }

    /// Display name of a person, if still in the directory.
    #[must_use]
    pub fn person_name(&self, id: &MemberId) -> Option<&str> {
        self.person(id).map(|person| person.name.as_str())
    }

    /// Looks up a group.
    #[must_use]
    pub fn group(&self, id: &GroupId) -> Option<&Group> {
        self.groups.iter().find(|group| &group.id == id)
    }

    /// Looks up a group for modification.
    pub fn group_mut(&mut self, id: &GroupId) -> Option<&mut Group> {
        self.groups.iter_mut().find(|group| &group.id == id)
    }
}

/// Fields supplied when creating or editing an expense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseInput {
    /// Description; trimmed, must not be empty.
    pub description: String,
    /// Amount; must be positive.
    pub amount: Decimal,
    /// Member who paid; must be on the roster.
    pub payer_id: MemberId,
    /// Shared expense or loan details.
    pub kind: ExpenseKind,
}

impl ExpenseInput {
    /// Input for an expense shared among `involved_ids`.
    #[must_use]
    pub fn shared(
        description: impl Into<String>,
        amount: Decimal,
        payer_id: MemberId,
        involved_ids: Vec<MemberId>,
    ) -> Self {
        Self {
            description: description.into(),
            amount,
            payer_id,
            kind: ExpenseKind::Shared { involved_ids },
        }
    }

    /// Input for a loan to `borrower_id`.
    #[must_use]
    pub fn loan(
        description: impl Into<String>,
        amount: Decimal,
        payer_id: MemberId,
        borrower_id: MemberId,
    ) -> Self {
        Self {
            description: description.into(),
            amount,
            payer_id,
            kind: ExpenseKind::Loan { borrower_id },
        }
    }
}
