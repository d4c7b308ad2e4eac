//! # Bookkeeping Types
//!
//! Domain types and port traits for the bookkeeping service.
//! This crate has ZERO external IO dependencies - only data structures,
//! business rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Pure domain types (users, custom exchange rates, accounts,
//!   transaction categories, tags and templates)
//! - `ports/` - Trait definitions that adapters must implement
//! - `dto/` - Data Transfer Objects for API boundaries
//! - `error/` - Domain and application error types
//!
//! ## Library-only view types
//!
//! Accounts, transaction categories, tags and templates are not stored or
//! served by the bookkeeping service. They are provided as records and view
//! types for library consumers, together with their ordering and tree
//! helpers (`sort_*_info_responses`, `build_account_tree`,
//! `build_category_tree`).

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    FIXED_POINT_SCALE, User, UserBasicInfo, UserCustomExchangeRate, format_fixed_point_rate,
    parse_fixed_point_rate,
};
pub use dto::*;
pub use error::{AppError, DomainError, RepoError};
pub use exchange_rates::{CurrencyCode, LatestExchangeRate, LatestExchangeRateResponse};
pub use ports::{BookkeepingRepository, UserCustomExchangeRateRepository, UserRepository};
