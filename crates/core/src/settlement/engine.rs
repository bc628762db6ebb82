//! Settlement engine entry point.

use splitledger_shared::types::MemberId;
use tracing::debug;

use super::balance::compute_net_balances;
use super::error::SettlementError;
use super::matching::{match_parties, partition};
use super::types::{FinancialEvent, NetBalances, SettlementReport, SettlementTransaction};

/// Computes who pays whom to bring a group's balances to zero.
///
/// Pure and stateless: every call recomputes from the given snapshot of
/// members and events, and may run concurrently with any other call.
pub struct SettlementEngine;

impl SettlementEngine {
    /// Computes the settlement transactions for a group.
    ///
    /// # Arguments
    ///
    /// * `members` - Group roster; each member starts at balance zero
    /// * `events` - Shared expenses and loans, in any order
    ///
    /// # Returns
    ///
    /// Transactions in emission order: the largest debtor and creditor are
    /// matched first. Empty if every balance is within one cent of zero.
    ///
    /// # Errors
    ///
    /// Returns `SettlementError::InvalidEvent` for a negative amount or a
    /// shared expense with no (or duplicate) participants.
    pub fn compute_settlement(
        members: &[MemberId],
        events: &[FinancialEvent],
    ) -> Result<Vec<SettlementTransaction>, SettlementError> {
        Self::compute_report(members, events).map(|report| report.transactions)
    }

    /// Computes the net balances and the transactions that settle them.
    ///
    /// # Errors
    ///
    /// Same as [`SettlementEngine::compute_settlement`].
    pub fn compute_report(
        members: &[MemberId],
        events: &[FinancialEvent],
    ) -> Result<SettlementReport, SettlementError> {
        let balances = compute_net_balances(members, events)?;
        let transactions = Self::settle_balances(&balances);

        debug!(
            members = members.len(),
            events = events.len(),
            transactions = transactions.len(),
            "Computed settlement"
        );

        Ok(SettlementReport {
            balances,
            transactions,
        })
    }

    /// Matches already computed balances.
    #[must_use]
    pub fn settle_balances(balances: &NetBalances) -> Vec<SettlementTransaction> {
        match_parties(partition(balances))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settlement::error::InvalidEventReason;
    use rstest::rstest;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use splitledger_shared::types::TOLERANCE;
    use std::str::FromStr;

    fn id(name: &str) -> MemberId {
        MemberId::from_str(name).unwrap()
    }

    fn ids(names: &[&str]) -> Vec<MemberId> {
        names.iter().map(|name| id(name)).collect()
    }

    fn tx(from: &str, to: &str, amount: Decimal) -> SettlementTransaction {
        SettlementTransaction {
            from: id(from),
            to: id(to),
            amount,
        }
    }

    #[rstest]
    #[case::shared_between_two(
        &["x", "y"],
        vec![FinancialEvent::shared(dec!(30.00), id("x"), ids(&["x", "y"]))],
        vec![tx("y", "x", dec!(15.00))]
    )]
    #[case::loan_with_bystander(
        &["x", "y", "z"],
        vec![FinancialEvent::loan(dec!(20.00), id("x"), id("z"))],
        vec![tx("z", "x", dec!(20.00))]
    )]
    #[case::shared_among_three(
        &["a", "b", "c"],
        vec![FinancialEvent::shared(dec!(30.00), id("a"), ids(&["a", "b", "c"]))],
        vec![tx("b", "a", dec!(10.00)), tx("c", "a", dec!(10.00))]
    )]
    #[case::no_events(&["a", "b"], vec![], vec![])]
    #[case::loans_cancel_out(
        &["a", "b"],
        vec![
            FinancialEvent::loan(dec!(12.50), id("a"), id("b")),
            FinancialEvent::loan(dec!(12.50), id("b"), id("a")),
        ],
        vec![]
    )]
    #[case::self_loan(
        &["a"],
        vec![FinancialEvent::loan(dec!(7), id("a"), id("a"))],
        vec![]
    )]
    #[case::zero_amount(
        &["a", "b"],
        vec![FinancialEvent::shared(Decimal::ZERO, id("a"), ids(&["a", "b"]))],
        vec![]
    )]
    fn settlement_cases(
        #[case] members: &[&str],
        #[case] events: Vec<FinancialEvent>,
        #[case] expected: Vec<SettlementTransaction>,
    ) {
        let result = SettlementEngine::compute_settlement(&ids(members), &events).unwrap();
        assert_eq!(result, expected);
    }

    #[test]
    fn test_three_way_rounding_reconciles() {
        let report = SettlementEngine::compute_report(
            &ids(&["a", "b", "c"]),
            &[FinancialEvent::shared(dec!(10.00), id("a"), ids(&["a", "b", "c"]))],
        )
        .unwrap();

        assert_eq!(
            report.transactions,
            vec![tx("b", "a", dec!(3.33)), tx("c", "a", dec!(3.33))]
        );
        for (member, residual) in report.residuals().iter() {
            assert!(residual.abs() < TOLERANCE, "{member} left with {residual}");
        }
    }

    #[test]
    fn test_report_keeps_settled_members() {
        let report = SettlementEngine::compute_report(
            &ids(&["x", "y", "z"]),
            &[FinancialEvent::loan(dec!(20), id("x"), id("z"))],
        )
        .unwrap();
        assert_eq!(report.balances.get(&id("y")), Some(Decimal::ZERO));
        assert!(report.transactions.iter().all(|t| t.from != id("y") && t.to != id("y")));
        assert!(!report.is_settled());
    }

    #[test]
    fn test_multi_event_group() {
        // Dinner 90 split by all, taxi 30 split by b and c, a lends d 25.
        let events = vec![
            FinancialEvent::shared(dec!(90), id("a"), ids(&["a", "b", "c", "d"])),
            FinancialEvent::shared(dec!(30), id("b"), ids(&["b", "c"])),
            FinancialEvent::loan(dec!(25), id("a"), id("d")),
        ];
        let report =
            SettlementEngine::compute_report(&ids(&["a", "b", "c", "d"]), &events).unwrap();

        // a: +90 - 22.5 + 25 = 92.5, b: +30 - 22.5 - 15 = -7.5,
        // c: -22.5 - 15 = -37.5, d: -22.5 - 25 = -47.5
        assert_eq!(
            report.transactions,
            vec![
                tx("d", "a", dec!(47.5)),
                tx("c", "a", dec!(37.5)),
                tx("b", "a", dec!(7.5)),
            ]
        );
        assert!(report.residuals().is_settled());
    }

    #[test]
    fn test_roster_order_does_not_matter() {
        let events = vec![
            FinancialEvent::shared(dec!(30), id("a"), ids(&["a", "b", "c"])),
            FinancialEvent::loan(dec!(4), id("c"), id("b")),
        ];
        let forward = SettlementEngine::compute_settlement(&ids(&["a", "b", "c"]), &events);
        let backward = SettlementEngine::compute_settlement(&ids(&["c", "b", "a"]), &events);
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_member_outside_roster_is_settled() {
        let result = SettlementEngine::compute_settlement(
            &ids(&["x"]),
            &[FinancialEvent::loan(dec!(20), id("x"), id("former"))],
        )
        .unwrap();
        assert_eq!(result, vec![tx("former", "x", dec!(20))]);
    }

    #[test]
    fn test_invalid_event_is_rejected() {
        let err = SettlementEngine::compute_settlement(
            &ids(&["x", "y"]),
            &[FinancialEvent::shared(dec!(10), id("x"), Vec::<MemberId>::new())],
        )
        .unwrap_err();
        assert_eq!(
            err,
            SettlementError::InvalidEvent {
                index: 0,
                reason: InvalidEventReason::NoParticipants,
            }
        );
        assert_eq!(err.error_code(), "INVALID_EVENT");
    }
}
