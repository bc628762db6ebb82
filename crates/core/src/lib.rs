//! Core business logic for Split Ledger.
//!
//! This crate contains pure business logic with ZERO file, database or web
//! dependencies. All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `settlement` - Net balances and the "who pays whom" settlement engine
//! - `group` - People directory, groups, expense records and dashboard
//! - `snapshot` - JSON state document import/export with legacy migration

pub mod group;
pub mod settlement;
pub mod snapshot;
