//! # Bookkeeping Hex
//!
//! Application service layer and HTTP adapter for the bookkeeping service.
//!
//! ## Architecture
//!
//! - `provider/` - Exchange rates provider resolved once at startup
//! - `user_custom/` - Rates built from a user's stored custom rows
//! - `service/` - Application service (orchestrates domain operations)
//! - `inbound/` - HTTP adapter (Axum server)
//!
//! The service is generic over `R: BookkeepingRepository`, allowing
//! different repository implementations to be injected.

pub mod inbound;
pub mod openapi;
pub mod provider;
pub mod service;
pub mod user_custom;

#[cfg(test)]
mod service_tests;

pub use provider::ExchangeRatesProvider;
pub use service::ExchangeRateService;
