//! Net balance accumulation.
//!
//! The payer is credited the full amount of every event. A shared expense
//! debits each involved member an even share; a loan debits the borrower the
//! full amount. Shares use `Decimal` division and are not rounded here, so a
//! three-way split carries a tiny remainder that classification absorbs later.

use std::collections::{BTreeSet, HashSet};

use rust_decimal::Decimal;
use splitledger_shared::types::MemberId;
use tracing::warn;

use super::error::SettlementError;
use super::types::{EventKind, FinancialEvent, NetBalances};
use super::validation::validate_events;

/// Computes each member's signed net balance.
///
/// Every roster member gets an entry, starting at zero. Members referenced by
/// events but missing from the roster are accumulated as well.
///
/// # Errors
///
/// Returns `SettlementError::InvalidEvent` if any event is invalid; no
/// balance is computed in that case.
pub fn compute_net_balances(
    members: &[MemberId],
    events: &[FinancialEvent],
) -> Result<NetBalances, SettlementError> {
    validate_events(events)?;

    let roster: HashSet<&MemberId> = members.iter().collect();
    let mut outsiders = BTreeSet::new();
    let mut balances = NetBalances::from_roster(members);

    for event in events {
        outsiders.extend(event.participants().filter(|member| !roster.contains(member)));
        apply_event(&mut balances, event);
    }

    if !outsiders.is_empty() {
        let outsiders: Vec<&str> = outsiders.into_iter().map(MemberId::as_str).collect();
        warn!(?outsiders, "Events reference members outside the roster");
    }

    Ok(balances)
}

/// Applies one validated event to the balance table.
fn apply_event(balances: &mut NetBalances, event: &FinancialEvent) {
    balances.adjust(&event.payer, event.amount);

    match &event.kind {
        EventKind::SharedExpense { involved } => {
            let share = event.amount / Decimal::from(involved.len());
            for member in involved {
                balances.adjust(member, -share);
            }
        }
        EventKind::Loan { borrower } => {
            balances.adjust(borrower, -event.amount);
        }
    }
}
