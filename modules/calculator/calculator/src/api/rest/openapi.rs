//! OpenAPI document for the JSON routes.

use axum::Json;
use utoipa::OpenApi;

use calculator_sdk::Operation;
use webcalc_errors::Problem;

use super::dto::{EvaluateRequest, EvaluateResponse, OperationDto, OutcomeKind};
use super::handlers;

#[derive(OpenApi)]
#[openapi(
    info(title = "webcalc", description = "Four-function calculator API"),
    paths(handlers::evaluate, handlers::list_operations),
    components(schemas(
        EvaluateRequest,
        EvaluateResponse,
        OutcomeKind,
        OperationDto,
        Operation,
        Problem
    )),
    tags((name = "calculator", description = "Arithmetic operations"))
)]
pub struct CalculatorApiDoc;

/// Handler for GET /openapi.json
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(CalculatorApiDoc::openapi())
}
