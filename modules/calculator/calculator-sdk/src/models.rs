//! Calculator models.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CalculatorError, ParseOperationError};

/// One of the four supported binary operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operation {
    /// All operations, in the order they are offered to users.
    pub const ALL: [Self; 4] = [Self::Add, Self::Subtract, Self::Multiply, Self::Divide];

    /// Wire tag (`add`, `subtract`, `multiply`, `divide`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Subtract => "subtract",
            Self::Multiply => "multiply",
            Self::Divide => "divide",
        }
    }

    /// Mathematical symbol.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "\u{2212}",
            Self::Multiply => "\u{d7}",
            Self::Divide => "\u{f7}",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Add => "Add",
            Self::Subtract => "Subtract",
            Self::Multiply => "Multiply",
            Self::Divide => "Divide",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = ParseOperationError;

    /// Tags are matched exactly (case-sensitive) after trimming whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim();
        Self::ALL
            .into_iter()
            .find(|op| op.as_str() == tag)
            .ok_or_else(|| ParseOperationError {
                tag: tag.to_owned(),
            })
    }
}

/// A single calculation: two operands and the operation to apply.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OperationRequest {
    pub num1: f64,
    pub num2: f64,
    pub operation: Operation,
}

impl OperationRequest {
    #[must_use]
    pub const fn new(num1: f64, num2: f64, operation: Operation) -> Self {
        Self {
            num1,
            num2,
            operation,
        }
    }
}

/// What the rendering layer receives.
///
/// Keeps "nothing computed yet", "computed but failed" and "computed" apart,
/// so a valid `0.0` is never confused with an absent result.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Outcome {
    /// No submission yet, or the operation tag was not recognized.
    #[default]
    NoResult,
    /// A computed value.
    Value(f64),
    /// The calculation was attempted and failed.
    Failed(CalculatorError),
}

impl Outcome {
    #[must_use]
    pub const fn is_value(&self) -> bool {
        matches!(self, Self::Value(_))
    }

    #[must_use]
    pub const fn value(&self) -> Option<f64> {
        match self {
            Self::Value(v) => Some(*v),
            Self::NoResult | Self::Failed(_) => None,
        }
    }

    #[must_use]
    pub const fn error(&self) -> Option<CalculatorError> {
        match self {
            Self::Failed(e) => Some(*e),
            Self::NoResult | Self::Value(_) => None,
        }
    }
}

impl From<Result<f64, CalculatorError>> for Outcome {
    fn from(result: Result<f64, CalculatorError>) -> Self {
        match result {
            Ok(v) => Self::Value(v),
            Err(e) => Self::Failed(e),
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_known_tag() {
        for op in Operation::ALL {
            assert_eq!(op.as_str().parse::<Operation>(), Ok(op));
        }
        assert_eq!(" divide\n".parse::<Operation>(), Ok(Operation::Divide));
    }

    #[test]
    fn rejects_unknown_and_miscased_tags() {
        let err = "modulo".parse::<Operation>().unwrap_err();
        assert_eq!(err.tag, "modulo");
        assert!("Add".parse::<Operation>().is_err());
        assert!("".parse::<Operation>().is_err());
    }

    #[test]
    fn serde_uses_lowercase_tags() {
        let json = serde_json::to_string(&Operation::Multiply).unwrap();
        assert_eq!(json, "\"multiply\"");

        let req: OperationRequest =
            serde_json::from_str(r#"{"num1":1.5,"num2":2,"operation":"subtract"}"#).unwrap();
        assert_eq!(req, OperationRequest::new(1.5, 2.0, Operation::Subtract));
    }

    #[test]
    fn outcome_keeps_zero_distinct_from_no_result() {
        let zero = Outcome::Value(0.0);
        assert!(zero.is_value());
        assert_eq!(zero.value(), Some(0.0));
        assert_ne!(zero, Outcome::NoResult);
        assert_eq!(Outcome::default(), Outcome::NoResult);
    }

    #[test]
    fn outcome_from_result() {
        assert_eq!(Outcome::from(Ok(6.0)), Outcome::Value(6.0));
        let failed = Outcome::from(Err(CalculatorError::DivisionByZero));
        assert_eq!(failed.error(), Some(CalculatorError::DivisionByZero));
        assert_eq!(failed.value(), None);
    }

    #[test]
    fn error_code_is_stable() {
        assert_eq!(CalculatorError::DivisionByZero.code(), "division_by_zero");
        assert_eq!(CalculatorError::DivisionByZero.to_string(), "division by zero");
    }
}
