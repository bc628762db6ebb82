//! Balance-settlement engine.
//!
//! Turns a group's roster and its shared expenses / loans into a short list of
//! "who pays whom how much" transactions:
//! - Net balance accumulation
//! - Debtor/creditor partition with a one-cent tolerance
//! - Greedy largest-first matching with cent rounding

pub mod balance;
pub mod engine;
pub mod error;
pub mod matching;
pub mod types;
pub mod validation;

#[cfg(test)]
mod settlement_props;

pub use balance::compute_net_balances;
pub use engine::SettlementEngine;
pub use error::{InvalidEventReason, SettlementError};
pub use matching::{match_parties, partition};
pub use types::{
    EventKind, FinancialEvent, NetBalances, Partition, Party, SettlementReport,
    SettlementTransaction,
};
pub use validation::{validate_event, validate_events};
