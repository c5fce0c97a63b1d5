//! Domain service for the calculator.
//!
//! The four arithmetic operations and dispatch on an operation tag.

use calculator_sdk::{CalculatorClient, CalculatorError, Operation, OperationRequest, Outcome};
use tracing::debug;

/// Stateless arithmetic service.
///
/// Shared between requests behind an `Arc`; there is nothing to lock.
#[derive(Debug, Clone, Copy, Default)]
pub struct Service;

impl Service {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Apply a parsed operation.
    ///
    /// # Errors
    /// Returns `CalculatorError::DivisionByZero` when dividing by zero.
    pub fn apply(&self, operation: Operation, a: f64, b: f64) -> Result<f64, CalculatorError> {
        debug!(%operation, a, b, "applying operation");
        self.evaluate(&OperationRequest::new(a, b, operation))
    }

    /// Dispatch on a raw operation tag.
    ///
    /// An unrecognized tag is not an error here: it yields
    /// [`Outcome::NoResult`], the same thing the page shows before any
    /// submission.
    #[must_use]
    pub fn evaluate_tag(&self, tag: &str, a: f64, b: f64) -> Outcome {
        match tag.parse::<Operation>() {
            Ok(operation) => self.apply(operation, a, b).into(),
            Err(e) => {
                debug!(tag = %e.tag, "unrecognized operation tag, no result");
                Outcome::NoResult
            }
        }
    }
}

impl CalculatorClient for Service {
    fn add(&self, a: f64, b: f64) -> f64 {
        debug!(a, b, "performing addition");
        a + b
    }

    fn subtract(&self, a: f64, b: f64) -> f64 {
        debug!(a, b, "performing subtraction");
        a - b
    }

    fn multiply(&self, a: f64, b: f64) -> f64 {
        debug!(a, b, "performing multiplication");
        a * b
    }

    fn divide(&self, a: f64, b: f64) -> Result<f64, CalculatorError> {
        // -0.0 == 0.0, so both signed zeros are rejected
        if b == 0.0 {
            debug!(a, "rejecting division by zero");
            return Err(CalculatorError::DivisionByZero);
        }
        debug!(a, b, "performing division");
        Ok(a / b)
    }
}
