//! Calculator API trait.

use crate::error::CalculatorError;
use crate::models::{Operation, OperationRequest};

/// Calculator API.
///
/// Every method is pure and completes immediately, so the trait is
/// synchronous. Implementations hold no mutable state and are shared as
/// `Arc<dyn CalculatorClient>`.
pub trait CalculatorClient: Send + Sync {
    /// `a + b`.
    fn add(&self, a: f64, b: f64) -> f64;

    /// `a - b`.
    fn subtract(&self, a: f64, b: f64) -> f64;

    /// `a * b`.
    fn multiply(&self, a: f64, b: f64) -> f64;

    /// `a / b`.
    ///
    /// # Errors
    ///
    /// - `DivisionByZero` if `b` is zero (either sign)
    fn divide(&self, a: f64, b: f64) -> Result<f64, CalculatorError>;

    /// Apply `req.operation` to the request operands.
    ///
    /// # Errors
    ///
    /// - `DivisionByZero` for a divide request with a zero divisor
    fn evaluate(&self, req: &OperationRequest) -> Result<f64, CalculatorError> {
        match req.operation {
            Operation::Add => Ok(self.add(req.num1, req.num2)),
            Operation::Subtract => Ok(self.subtract(req.num1, req.num2)),
            Operation::Multiply => Ok(self.multiply(req.num1, req.num2)),
            Operation::Divide => self.divide(req.num1, req.num2),
        }
    }
}
