//! Property-based tests for the settlement engine.
//!
//! - Property 1: Balances reconstruct (residuals stay within tolerance)
//! - Property 2: Settled groups produce no transactions
//! - Property 3: Transaction count bound
//! - Property 4: No self-payment, positive whole-cent amounts
//! - Property 5: Determinism

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use splitledger_shared::types::{MemberId, TOLERANCE};

use super::engine::SettlementEngine;
use super::error::{InvalidEventReason, SettlementError};
use super::matching::partition;
use super::types::FinancialEvent;

const MAX_MEMBERS: usize = 6;

/// Abstract event; member indexes are reduced modulo the group size.
#[derive(Debug, Clone)]
enum EventShape {
    Shared { amount: Decimal, payer: usize, mask: u8 },
    Loan { amount: Decimal, payer: usize, borrower: usize },
}

/// Strategy to generate amounts from 0.00 to 10,000.00.
fn amount() -> impl Strategy<Value = Decimal> {
    (0i64..=1_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn event_shape() -> impl Strategy<Value = EventShape> {
    prop_oneof![
        (amount(), 0..MAX_MEMBERS, 1u8..64).prop_map(|(amount, payer, mask)| EventShape::Shared {
            amount,
            payer,
            mask
        }),
        (amount(), 0..MAX_MEMBERS, 0..MAX_MEMBERS).prop_map(|(amount, payer, borrower)| {
            EventShape::Loan {
                amount,
                payer,
                borrower,
            }
        }),
    ]
}

/// Strategy to generate a group size and its event list.
fn group() -> impl Strategy<Value = (usize, Vec<EventShape>)> {
    (1..=MAX_MEMBERS, prop::collection::vec(event_shape(), 0..=20))
}

fn member(index: usize) -> MemberId {
    MemberId::from(index as u64 + 1)
}

fn build(member_count: usize, shapes: &[EventShape]) -> (Vec<MemberId>, Vec<FinancialEvent>) {
    let members: Vec<MemberId> = (0..member_count).map(member).collect();
    let events = shapes
        .iter()
        .map(|shape| match *shape {
            EventShape::Shared {
                amount,
                payer,
                mask,
            } => {
                let payer = payer % member_count;
                let mut involved: Vec<MemberId> = (0..member_count)
                    .filter(|index| mask & (1 << index) != 0)
                    .map(member)
                    .collect();
                if involved.is_empty() {
                    involved.push(member(payer));
                }
                FinancialEvent::shared(amount, member(payer), involved)
            }
            EventShape::Loan {
                amount,
                payer,
                borrower,
            } => FinancialEvent::loan(
                amount,
                member(payer % member_count),
                member(borrower % member_count),
            ),
        })
        .collect();
    (members, events)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Property 1.1: Net balances sum to zero up to division noise.
    #[test]
    fn prop_balances_sum_to_zero((member_count, shapes) in group()) {
        let (members, events) = build(member_count, &shapes);
        let report = SettlementEngine::compute_report(&members, &events).unwrap();
        prop_assert!(
            report.balances.total().abs() < dec!(0.000000000000001),
            "total {} should be zero",
            report.balances.total()
        );
    }

    /// Property 1.2: Paying every transaction leaves each member near zero.
    ///
    /// Members retired by the matching end within one cent; whatever the last
    /// open party keeps is bounded by the residuals of everyone else.
    #[test]
    fn prop_residuals_within_tolerance((member_count, shapes) in group()) {
        let (members, events) = build(member_count, &shapes);
        let report = SettlementEngine::compute_report(&members, &events).unwrap();
        let bound = TOLERANCE * Decimal::from(member_count);
        for (member, residual) in report.residuals().iter() {
            prop_assert!(
                residual.abs() <= bound,
                "member {} left with {} (bound {})",
                member, residual, bound
            );
        }
    }

    /// Property 2: Events that cancel out produce no transactions.
    #[test]
    fn prop_settled_group_is_empty(
        member_count in 1..=MAX_MEMBERS,
        loans in prop::collection::vec((amount(), 0..MAX_MEMBERS, 0..MAX_MEMBERS), 0..=10),
    ) {
        let members: Vec<MemberId> = (0..member_count).map(member).collect();
        let mut events = Vec::with_capacity(loans.len() * 2);
        for (amount, payer, borrower) in loans {
            let payer = member(payer % member_count);
            let borrower = member(borrower % member_count);
            events.push(FinancialEvent::loan(amount, payer.clone(), borrower.clone()));
            events.push(FinancialEvent::loan(amount, borrower, payer));
        }

        let transactions = SettlementEngine::compute_settlement(&members, &events).unwrap();
        prop_assert!(transactions.is_empty(), "expected no transactions, got {:?}", transactions);
    }

    /// Property 3: At most debtors + creditors - 1 transactions.
    #[test]
    fn prop_transaction_bound((member_count, shapes) in group()) {
        let (members, events) = build(member_count, &shapes);
        let report = SettlementEngine::compute_report(&members, &events).unwrap();
        let sides = partition(&report.balances);
        let (debtors, creditors) = (sides.debtors.len(), sides.creditors.len());

        if debtors == 0 || creditors == 0 {
            prop_assert!(report.transactions.is_empty());
        } else {
            prop_assert!(
                report.transactions.len() < debtors + creditors,
                "{} transactions for {} debtors and {} creditors",
                report.transactions.len(), debtors, creditors
            );
        }
    }

    /// Property 4: Debtors pay creditors, never themselves, in whole cents.
    #[test]
    fn prop_transactions_are_well_formed((member_count, shapes) in group()) {
        let (members, events) = build(member_count, &shapes);
        let report = SettlementEngine::compute_report(&members, &events).unwrap();

        for tx in &report.transactions {
            prop_assert_ne!(&tx.from, &tx.to);
            prop_assert!(tx.amount > Decimal::ZERO);
            prop_assert_eq!(tx.amount.round_dp(2), tx.amount);

            let from = report.balances.get(&tx.from).unwrap_or_default();
            let to = report.balances.get(&tx.to).unwrap_or_default();
            prop_assert!(from < -TOLERANCE, "payer {} had balance {}", tx.from, from);
            prop_assert!(to > TOLERANCE, "payee {} had balance {}", tx.to, to);
        }
    }

    /// Property 5: Same input, same output; roster order is irrelevant.
    #[test]
    fn prop_deterministic((member_count, shapes) in group()) {
        let (mut members, events) = build(member_count, &shapes);
        let first = SettlementEngine::compute_settlement(&members, &events).unwrap();
        let second = SettlementEngine::compute_settlement(&members, &events).unwrap();
        prop_assert_eq!(&first, &second);

        members.reverse();
        let reversed = SettlementEngine::compute_settlement(&members, &events).unwrap();
        prop_assert_eq!(&first, &reversed);
    }

    /// Negative amounts are rejected at their position.
    #[test]
    fn prop_negative_amount_rejected(
        (member_count, shapes) in group(),
        cents in 1i64..1_000_000,
    ) {
        let (members, mut events) = build(member_count, &shapes);
        let negative = Decimal::new(-cents, 2);
        events.push(FinancialEvent::loan(negative, members[0].clone(), members[0].clone()));

        let result = SettlementEngine::compute_settlement(&members, &events);
        prop_assert_eq!(
            result,
            Err(SettlementError::InvalidEvent {
                index: events.len() - 1,
                reason: InvalidEventReason::NegativeAmount(negative),
            })
        );
    }
}
