//! Calculator Module
//!
//! Four-function arithmetic behind an HTML form, plus a small JSON API.
//!
//! ## Architecture
//!
//! - `domain/service.rs` - arithmetic and operation-tag dispatch
//! - `api/rest/` - form parsing, page rendering, JSON handlers, routes
//! - `module.rs` - wiring of the service into an axum router
//!
//! Consumers that only need the contract depend on `calculator-sdk`.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

// === MODULE DEFINITION ===
mod module;
pub use module::CalculatorModule;

pub mod config;
pub use config::CalculatorConfig;

// === INTERNAL MODULES ===
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod domain;
