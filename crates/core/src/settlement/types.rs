//! Settlement data types.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use splitledger_shared::types::{MemberId, TOLERANCE};

/// How a financial event distributes its amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventKind {
    /// Amount split evenly among the involved members (payer included if listed).
    SharedExpense {
        /// Members sharing the cost. Must be non-empty and free of duplicates.
        involved: Vec<MemberId>,
    },
    /// Amount owed in full by a single borrower.
    Loan {
        /// Member who owes the amount back to the payer.
        borrower: MemberId,
    },
}

/// A shared expense or loan, as seen by the settlement engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialEvent {
    /// Non-negative amount in the group's implicit currency.
    pub amount: Decimal,
    /// Member who advanced the money; always credited the full amount.
    pub payer: MemberId,
    /// Shared expense or loan details.
    pub kind: EventKind,
}

impl FinancialEvent {
    /// Creates a shared expense split evenly among `involved`.
    #[must_use]
    pub fn shared(
        amount: Decimal,
        payer: MemberId,
        involved: impl IntoIterator<Item = MemberId>,
    ) -> Self {
        Self {
            amount,
            payer,
            kind: EventKind::SharedExpense {
                involved: involved.into_iter().collect(),
            },
        }
    }

    /// Creates a loan from `payer` to `borrower`.
    #[must_use]
    pub fn loan(amount: Decimal, payer: MemberId, borrower: MemberId) -> Self {
        Self {
            amount,
            payer,
            kind: EventKind::Loan { borrower },
        }
    }

    /// Every member referenced by the event, payer first.
    pub fn participants(&self) -> impl Iterator<Item = &MemberId> {
        let others: &[MemberId] = match &self.kind {
            EventKind::SharedExpense { involved } => involved.as_slice(),
            EventKind::Loan { borrower } => std::slice::from_ref(borrower),
        };
        std::iter::once(&self.payer).chain(others)
    }
}

/// A recommended payment that moves two balances toward zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementTransaction {
    /// Debtor who pays.
    pub from: MemberId,
    /// Creditor who receives.
    pub to: MemberId,
    /// Positive amount, rounded to whole cents.
    pub amount: Decimal,
}

/// Signed net balance per member.
///
/// Positive means the group owes the member; negative means the member owes
/// the group. Iteration is ordered by `MemberId`, which keeps every derived
/// result deterministic regardless of roster order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NetBalances(BTreeMap<MemberId, Decimal>);

impl NetBalances {
    /// Creates an empty balance table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a table with a zero balance for every roster member.
    #[must_use]
    pub fn from_roster(members: &[MemberId]) -> Self {
        members
            .iter()
            .map(|member| (member.clone(), Decimal::ZERO))
            .collect()
    }

    /// Adds `delta` to a member's balance, inserting the member if absent.
    pub fn adjust(&mut self, member: &MemberId, delta: Decimal) {
        if let Some(balance) = self.0.get_mut(member) {
            *balance += delta;
        } else {
            self.0.insert(member.clone(), delta);
        }
    }

    /// Returns a member's balance.
    #[must_use]
    pub fn get(&self, member: &MemberId) -> Option<Decimal> {
        self.0.get(member).copied()
    }

    /// Returns true if the member has an entry.
    #[must_use]
    pub fn contains(&self, member: &MemberId) -> bool {
        self.0.contains_key(member)
    }

    /// Iterates balances in member order.
    pub fn iter(&self) -> impl Iterator<Item = (&MemberId, Decimal)> {
        self.0.iter().map(|(member, balance)| (member, *balance))
    }

    /// Number of members in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the table has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum of all balances. Zero up to division noise for any valid event list.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.0.values().copied().sum()
    }

    /// Returns true if no balance exceeds the tolerance in magnitude.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.0.values().all(|balance| balance.abs() <= TOLERANCE)
    }

    /// Balances left over after every transaction is paid.
    ///
    /// Paying moves the debtor up and the creditor down by the same amount.
    #[must_use]
    pub fn after_payments(&self, transactions: &[SettlementTransaction]) -> Self {
        let mut residual = self.clone();
        for tx in transactions {
            residual.adjust(&tx.from, tx.amount);
            residual.adjust(&tx.to, -tx.amount);
        }
        residual
    }
}

impl FromIterator<(MemberId, Decimal)> for NetBalances {
    fn from_iter<I: IntoIterator<Item = (MemberId, Decimal)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A member classified as debtor or creditor, with a working balance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Party {
    /// The member.
    pub member: MemberId,
    /// Signed balance still outstanding.
    pub balance: Decimal,
}

/// Members with non-negligible balances, sorted for matching.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition {
    /// Members who owe money, most negative balance first.
    pub debtors: Vec<Party>,
    /// Members who are owed money, largest balance first.
    pub creditors: Vec<Party>,
}

/// Balances together with the transactions that settle them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementReport {
    /// Net balances the transactions were derived from.
    pub balances: NetBalances,
    /// Transactions in emission order (largest parties first).
    pub transactions: Vec<SettlementTransaction>,
}

impl SettlementReport {
    /// Returns true if nobody has to pay anybody.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Per-member balances left after applying every transaction.
    #[must_use]
    pub fn residuals(&self) -> NetBalances {
        self.balances.after_payments(&self.transactions)
    }
}
