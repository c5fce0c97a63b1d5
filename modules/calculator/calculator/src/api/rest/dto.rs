//! REST DTOs for the calculator module
//!
//! Transport-specific types (serde + utoipa).

use calculator_sdk::Operation;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request to evaluate one operation.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EvaluateRequest {
    /// First operand
    pub num1: f64,
    /// Second operand
    pub num2: f64,
    /// Operation tag: `add`, `subtract`, `multiply` or `divide`
    pub operation: String,
}

/// Whether a value was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    Value,
    NoResult,
}

/// Result of an evaluation that did not fail.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EvaluateResponse {
    pub outcome: OutcomeKind,
    /// The operation tag as received
    pub operation: String,
    /// Present when `outcome` is `value`
    pub result: Option<f64>,
}

/// A supported operation.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OperationDto {
    pub operation: Operation,
    pub symbol: String,
    pub label: String,
}

impl From<Operation> for OperationDto {
    fn from(op: Operation) -> Self {
        Self {
            operation: op,
            symbol: op.symbol().to_owned(),
            label: op.label().to_owned(),
        }
    }
}
