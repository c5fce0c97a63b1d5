//! HTML page rendering.
//!
//! `templates/index.html` is a Jinja template compiled into the binary and
//! rendered with `minijinja`. The `.html` template name turns on HTML
//! auto-escaping, so every echoed value is escaped.

use std::sync::LazyLock;

use calculator_sdk::{CalculatorError, Operation, Outcome};
use minijinja::{Environment, context};
use serde::Serialize;
use thiserror::Error;

use super::form::FormError;

const TEMPLATE_NAME: &str = "index.html";

static TEMPLATES: LazyLock<Result<Environment<'static>, String>> =
    LazyLock::new(|| -> Result<Environment<'static>, String> {
        let mut env = Environment::new();
        env.add_template(TEMPLATE_NAME, include_str!("../../../templates/index.html"))
            .map_err(|e| e.to_string())?;
        Ok(env)
    });

#[derive(Debug, Error)]
pub enum PageError {
    #[error("page template failed to load: {0}")]
    Load(String),

    #[error("page render failed: {0}")]
    Render(#[from] minijinja::Error),
}

/// Everything the page shows for one response.
#[derive(Debug, Clone, Default)]
pub struct PageView<'a> {
    pub title: &'a str,
    /// Raw `num1` as submitted, echoed back into the input.
    pub num1: &'a str,
    /// Raw `num2` as submitted, echoed back into the input.
    pub num2: &'a str,
    /// Selected operation tag.
    pub operation: &'a str,
    pub outcome: Outcome,
    pub form_error: Option<&'a FormError>,
}

/// One `<option>` of the operation select.
#[derive(Debug, Serialize)]
struct OperationOption {
    value: &'static str,
    label: &'static str,
    symbol: &'static str,
    selected: bool,
}

impl<'a> PageView<'a> {
    /// The page before any submission.
    #[must_use]
    pub fn empty(title: &'a str) -> Self {
        Self {
            title,
            ..Self::default()
        }
    }

    /// # Errors
    /// Returns `PageError` if the template cannot be loaded or rendered.
    pub fn render(&self) -> Result<String, PageError> {
        let env = TEMPLATES
            .as_ref()
            .map_err(|e| PageError::Load(e.clone()))?;
        let template = env.get_template(TEMPLATE_NAME)?;

        // The template shows at most one block: form error, then calculation
        // error, then the value.
        let html = template.render(context! {
            title => self.title,
            num1 => self.num1,
            num2 => self.num2,
            operations => operation_options(self.operation),
            form_error => self.form_error.map(ToString::to_string),
            error => self.outcome.error().map(error_message),
            result => self.outcome.value().map(format_number),
        })?;
        Ok(html)
    }
}

fn error_message(err: CalculatorError) -> &'static str {
    match err {
        CalculatorError::DivisionByZero => "cannot divide by zero",
    }
}

fn operation_options(selected: &str) -> Vec<OperationOption> {
    let selected = selected.trim();
    Operation::ALL
        .into_iter()
        .map(|op| OperationOption {
            value: op.as_str(),
            label: op.label(),
            symbol: op.symbol(),
            selected: op.as_str() == selected,
        })
        .collect()
}

/// Render a result the way users expect a float: integral values keep one
/// decimal (`5.0`), everything else uses the shortest round-trip form.
#[must_use]
pub fn format_number(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e16 {
        format!("{v:.1}")
    } else {
        format!("{v}")
    }
}
