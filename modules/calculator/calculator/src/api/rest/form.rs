//! Parsing of the submitted HTML form.

use serde::Deserialize;
use thiserror::Error;

/// Raw form fields, exactly as submitted.
///
/// Every field is optional so that a missing input reaches [`CalculatorForm::parse`]
/// and is reported on the page instead of being rejected by the extractor.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CalculatorForm {
    pub num1: Option<String>,
    pub num2: Option<String>,
    pub operation: Option<String>,
}

/// Operands parsed from the form; the tag is passed on unparsed.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedForm {
    pub num1: f64,
    pub num2: f64,
    pub operation: String,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("{field} is required")]
    Missing { field: &'static str },

    #[error("{field} must be a number, got '{value}'")]
    NotANumber { field: &'static str, value: String },

    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },

    /// The body could not be decoded as a form at all.
    #[error("the submitted form could not be read")]
    Unreadable,
}

impl FormError {
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::Missing { field } | Self::NotANumber { field, .. } | Self::NotFinite { field } => {
                *field
            }
            Self::Unreadable => "form",
        }
    }
}

impl CalculatorForm {
    /// Validate both operands.
    ///
    /// A missing `operation` is not an error: it falls through to "no result"
    /// like any other unrecognized tag.
    ///
    /// # Errors
    /// Returns the first operand that is missing, blank, not a number, or not finite.
    pub fn parse(&self) -> Result<ParsedForm, FormError> {
        Ok(ParsedForm {
            num1: parse_operand("num1", self.num1.as_deref())?,
            num2: parse_operand("num2", self.num2.as_deref())?,
            operation: self.operation.clone().unwrap_or_default(),
        })
    }
}

fn parse_operand(field: &'static str, raw: Option<&str>) -> Result<f64, FormError> {
    let value = raw.map(str::trim).unwrap_or_default();
    if value.is_empty() {
        return Err(FormError::Missing { field });
    }
    let number: f64 = value.parse().map_err(|_| FormError::NotANumber {
        field,
        value: value.to_owned(),
    })?;
    // "inf" and "NaN" parse as f64 but the core only takes finite operands
    if !number.is_finite() {
        return Err(FormError::NotFinite { field });
    }
    Ok(number)
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    fn form(num1: Option<&str>, num2: Option<&str>, operation: Option<&str>) -> CalculatorForm {
        CalculatorForm {
            num1: num1.map(str::to_owned),
            num2: num2.map(str::to_owned),
            operation: operation.map(str::to_owned),
        }
    }

    #[test]
    fn parses_numbers_and_keeps_tag() {
        let parsed = form(Some(" 3.5 "), Some("-2e1"), Some("multiply"))
            .parse()
            .unwrap();
        assert_eq!(parsed.num1, 3.5);
        assert_eq!(parsed.num2, -20.0);
        assert_eq!(parsed.operation, "multiply");
    }

    #[test]
    fn missing_or_blank_operand_is_reported() {
        let err = form(None, Some("1"), Some("add")).parse().unwrap_err();
        assert_eq!(err, FormError::Missing { field: "num1" });

        let err = form(Some("1"), Some("   "), Some("add")).parse().unwrap_err();
        assert_eq!(err.field(), "num2");
        assert_eq!(err.to_string(), "num2 is required");
    }

    #[test]
    fn non_numeric_operand_is_reported_with_value() {
        let err = form(Some("abc"), Some("1"), Some("add")).parse().unwrap_err();
        assert_eq!(
            err,
            FormError::NotANumber {
                field: "num1",
                value: "abc".to_owned()
            }
        );
    }

    #[test]
    fn non_finite_operands_are_rejected() {
        for raw in ["inf", "-infinity", "NaN"] {
            let err = form(Some("1"), Some(raw), Some("add")).parse().unwrap_err();
            assert_eq!(err, FormError::NotFinite { field: "num2" });
        }
    }

    #[test]
    fn missing_operation_becomes_empty_tag() {
        let parsed = form(Some("1"), Some("2"), None).parse().unwrap();
        assert!(parsed.operation.is_empty());
    }
}
