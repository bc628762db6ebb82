//! Shared types, errors, and configuration for Split Ledger.
//!
//! This crate provides common building blocks used across all other crates:
//! - Typed, normalized identifiers for members, groups, and expenses
//! - Money rules (tolerance, cent rounding) for the single implicit currency
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
