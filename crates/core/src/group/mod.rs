//! People directory, groups and their expense records.
//!
//! This module provides:
//! - Directory and roster management
//! - Expense and loan records with input validation
//! - Group status tracking (pending / paid)
//! - Settlement of a group through the settlement engine
//! - Dashboard summary

pub mod dashboard;
pub mod error;
pub mod service;
pub mod types;


pub use dashboard::{DashboardSummary, GroupOverview, RECENT_GROUPS_LIMIT};
pub use error::GroupError;
pub use service::LedgerService;
pub use types::{Expense, ExpenseInput, ExpenseKind, Group, GroupStatus, Ledger, Person};
