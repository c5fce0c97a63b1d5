//! Error types for the calculator module.

use thiserror::Error;

/// Errors returned by calculator operations.
///
/// Division by zero is the only failure of the arithmetic core; it is never
/// replaced by a numeric stand-in such as `0.0` or `inf`.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CalculatorError {
    /// `divide` was called with a zero divisor.
    #[error("division by zero")]
    DivisionByZero,
}

impl CalculatorError {
    /// Stable machine-readable code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::DivisionByZero => "division_by_zero",
        }
    }
}

/// An operation tag that is not one of `add`, `subtract`, `multiply`, `divide`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown operation: '{tag}'")]
pub struct ParseOperationError {
    /// The tag as received.
    pub tag: String,
}
