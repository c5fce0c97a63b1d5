//! Calculator SDK
//!
//! Public contract of the `calculator` module:
//!
//! - [`CalculatorClient`] - API trait for consumers
//! - [`Operation`], [`OperationRequest`], [`Outcome`] - models
//! - [`CalculatorError`], [`ParseOperationError`] - error types
//!
//! ## Usage
//!
//! ```ignore
//! use calculator_sdk::{CalculatorClient, Operation, OperationRequest};
//!
//! let req = OperationRequest::new(10.0, 2.0, Operation::Divide);
//! let quotient = client.evaluate(&req)?;
//! ```
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

pub mod api;
pub mod error;
pub mod models;

pub use api::CalculatorClient;
pub use error::{CalculatorError, ParseOperationError};
pub use models::{Operation, OperationRequest, Outcome};
