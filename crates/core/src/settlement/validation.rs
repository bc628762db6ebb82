//! Financial event validation.

use std::collections::HashSet;

use rust_decimal::Decimal;

use super::error::{InvalidEventReason, SettlementError};
use super::types::{EventKind, FinancialEvent};

/// Validates a single event.
///
/// # Errors
///
/// Returns the reason the event cannot be settled.
pub fn validate_event(event: &FinancialEvent) -> Result<(), InvalidEventReason> {
    if event.amount < Decimal::ZERO {
        return Err(InvalidEventReason::NegativeAmount(event.amount));
    }

    if let EventKind::SharedExpense { involved } = &event.kind {
        if involved.is_empty() {
            return Err(InvalidEventReason::NoParticipants);
        }

        let mut seen = HashSet::with_capacity(involved.len());
        for member in involved {
            if !seen.insert(member) {
                return Err(InvalidEventReason::DuplicateParticipant(member.clone()));
            }
        }
    }

    Ok(())
}

/// Validates every event, reporting the first offending position.
///
/// # Errors
///
/// Returns `SettlementError::InvalidEvent` for the first invalid event.
pub fn validate_events(events: &[FinancialEvent]) -> Result<(), SettlementError> {
    events.iter().enumerate().try_for_each(|(index, event)| {
        validate_event(event).map_err(|reason| SettlementError::InvalidEvent { index, reason })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use splitledger_shared::types::MemberId;
    use std::str::FromStr;

    fn id(name: &str) -> MemberId {
        MemberId::from_str(name).unwrap()
    }

    #[test]
    fn test_valid_events() {
        assert!(validate_event(&FinancialEvent::shared(dec!(30), id("x"), [id("x"), id("y")])).is_ok());
        assert!(validate_event(&FinancialEvent::loan(dec!(20), id("x"), id("z"))).is_ok());
    }

    #[test]
    fn test_zero_amount_is_allowed() {
        assert!(validate_event(&FinancialEvent::loan(Decimal::ZERO, id("x"), id("z"))).is_ok());
    }

    #[test]
    fn test_negative_amount() {
        let event = FinancialEvent::loan(dec!(-0.01), id("x"), id("z"));
        assert_eq!(
            validate_event(&event),
            Err(InvalidEventReason::NegativeAmount(dec!(-0.01)))
        );
    }

    #[test]
    fn test_no_participants() {
        let event = FinancialEvent::shared(dec!(10), id("x"), Vec::<MemberId>::new());
        assert_eq!(validate_event(&event), Err(InvalidEventReason::NoParticipants));
    }

    #[test]
    fn test_duplicate_participant() {
        let event = FinancialEvent::shared(dec!(10), id("x"), [id("y"), id("x"), id("y")]);
        assert_eq!(
            validate_event(&event),
            Err(InvalidEventReason::DuplicateParticipant(id("y")))
        );
    }

    #[test]
    fn test_validate_events_reports_position() {
        let events = vec![
            FinancialEvent::loan(dec!(5), id("x"), id("y")),
            FinancialEvent::shared(dec!(10), id("x"), [id("x")]),
            FinancialEvent::shared(dec!(10), id("x"), Vec::<MemberId>::new()),
            FinancialEvent::loan(dec!(-1), id("x"), id("y")),
        ];
        assert_eq!(
            validate_events(&events),
            Err(SettlementError::InvalidEvent {
                index: 2,
                reason: InvalidEventReason::NoParticipants,
            })
        );
    }
}
