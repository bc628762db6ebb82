//! Debtor/creditor partition and greedy two-pointer matching.

use rust_decimal::Decimal;
use splitledger_shared::types::TOLERANCE;
use splitledger_shared::types::money::{is_negligible, round_cents};

use super::types::{NetBalances, Partition, Party, SettlementTransaction};

/// Splits balances into debtors and creditors, dropping settled members.
///
/// A balance below `-TOLERANCE` is a debtor, above `TOLERANCE` a creditor.
/// Debtors are sorted most negative first and creditors largest first. Both
/// sorts are stable over the id-ordered balance table, so ties keep id order.
#[must_use]
pub fn partition(balances: &NetBalances) -> Partition {
    let mut debtors = Vec::new();
    let mut creditors = Vec::new();

    for (member, balance) in balances.iter() {
        let party = Party {
            member: member.clone(),
            balance,
        };
        if balance < -TOLERANCE {
            debtors.push(party);
        } else if balance > TOLERANCE {
            creditors.push(party);
        }
    }

    debtors.sort_by(|a, b| a.balance.cmp(&b.balance));
    creditors.sort_by(|a, b| b.balance.cmp(&a.balance));

    Partition { debtors, creditors }
}

/// Pairs debtors with creditors until one side runs out.
///
/// Each step transfers the smaller of the two outstanding magnitudes, rounded
/// to whole cents, then advances past any party left within the tolerance.
/// The smaller party always ends within half a cent of zero, so every step
/// retires at least one party and the result has at most
/// `debtors + creditors - 1` transactions.
#[must_use]
pub fn match_parties(partition: Partition) -> Vec<SettlementTransaction> {
    let Partition {
        mut debtors,
        mut creditors,
    } = partition;
    let mut transactions =
        Vec::with_capacity((debtors.len() + creditors.len()).saturating_sub(1));

    let (mut i, mut j) = (0, 0);
    while i < debtors.len() && j < creditors.len() {
        let debtor = &mut debtors[i];
        let creditor = &mut creditors[j];

        let amount = round_cents(debtor.balance.abs().min(creditor.balance));
        if amount > Decimal::ZERO {
            transactions.push(SettlementTransaction {
                from: debtor.member.clone(),
                to: creditor.member.clone(),
                amount,
            });
        }

        debtor.balance += amount;
        creditor.balance -= amount;

        if is_negligible(debtor.balance) {
            i += 1;
        }
        if is_negligible(creditor.balance) {
            j += 1;
        }
    }

    transactions
}
