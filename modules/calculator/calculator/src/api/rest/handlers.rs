//! REST handlers for the calculator module

use std::sync::Arc;

use axum::extract::rejection::{FormRejection, JsonRejection};
use axum::http::{HeaderMap, StatusCode, Uri};
use axum::response::Html;
use axum::{Extension, Form, Json};
use calculator_sdk::{Operation, Outcome};
use webcalc_errors::Problem;

use crate::config::CalculatorConfig;
use crate::domain::Service;

use super::dto::{EvaluateRequest, EvaluateResponse, OperationDto, OutcomeKind};
use super::error::{
    ProblemContext, calculator_error_to_problem, json_rejection_to_problem,
    non_finite_result_to_problem, page_error_to_problem,
};
use super::form::{CalculatorForm, FormError};
use super::page::PageView;

/// Handler for GET /
///
/// The page before any submission: no result.
pub async fn show_form(
    Extension(config): Extension<Arc<CalculatorConfig>>,
    uri: Uri,
    headers: HeaderMap,
) -> Result<Html<String>, Problem> {
    let ctx = ProblemContext::from_request(&uri, &headers);
    render_page(&PageView::empty(&config.page_title), &ctx)
}

/// Handler for POST /
///
/// Status reflects what the page shows: 200 for a value or no result, 400 for
/// an invalid operand, 422 for a failed calculation.
pub async fn submit_form(
    Extension(service): Extension<Arc<Service>>,
    Extension(config): Extension<Arc<CalculatorConfig>>,
    uri: Uri,
    headers: HeaderMap,
    form: Result<Form<CalculatorForm>, FormRejection>,
) -> Result<(StatusCode, Html<String>), Problem> {
    let ctx = ProblemContext::from_request(&uri, &headers);
    let form = match form {
        Ok(Form(form)) => form,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "rejected form body");
            let err = FormError::Unreadable;
            let view = PageView {
                form_error: Some(&err),
                ..PageView::empty(&config.page_title)
            };
            return Ok((StatusCode::BAD_REQUEST, render_page(&view, &ctx)?));
        }
    };

    let base = PageView {
        title: &config.page_title,
        num1: form.num1.as_deref().unwrap_or_default(),
        num2: form.num2.as_deref().unwrap_or_default(),
        operation: form.operation.as_deref().unwrap_or_default(),
        ..PageView::default()
    };

    match form.parse() {
        Ok(parsed) => {
            let outcome = service.evaluate_tag(&parsed.operation, parsed.num1, parsed.num2);
            let status = match outcome {
                Outcome::Failed(_) => StatusCode::UNPROCESSABLE_ENTITY,
                Outcome::NoResult | Outcome::Value(_) => StatusCode::OK,
            };
            let view = PageView { outcome, ..base };
            Ok((status, render_page(&view, &ctx)?))
        }
        Err(err) => {
            tracing::debug!(field = err.field(), error = %err, "invalid form input");
            let view = PageView {
                form_error: Some(&err),
                ..base
            };
            Ok((StatusCode::BAD_REQUEST, render_page(&view, &ctx)?))
        }
    }
}

fn render_page(view: &PageView<'_>, ctx: &ProblemContext) -> Result<Html<String>, Problem> {
    view.render()
        .map(Html)
        .map_err(|e| page_error_to_problem(&e, ctx))
}

/// Handler for POST /calculator/v1/evaluate
#[utoipa::path(
    post,
    path = "/calculator/v1/evaluate",
    tag = "calculator",
    request_body = EvaluateRequest,
    responses(
        (status = 200, description = "Value, or no result for an unknown operation", body = EvaluateResponse),
        (status = 400, description = "Malformed body or non-finite operand", body = Problem, content_type = "application/problem+json"),
        (status = 422, description = "Division by zero, or a result that overflows to infinity", body = Problem, content_type = "application/problem+json"),
    )
)]
pub async fn evaluate(
    Extension(service): Extension<Arc<Service>>,
    uri: Uri,
    headers: HeaderMap,
    body: Result<Json<EvaluateRequest>, JsonRejection>,
) -> Result<Json<EvaluateResponse>, Problem> {
    let ctx = ProblemContext::from_request(&uri, &headers);
    let Json(req) = body.map_err(|rejection| json_rejection_to_problem(&rejection, &ctx))?;

    if !req.num1.is_finite() || !req.num2.is_finite() {
        return Err(ctx.finalize(Problem::bad_request(
            "num1 and num2 must be finite numbers",
        )));
    }

    let (outcome, result) = match service.evaluate_tag(&req.operation, req.num1, req.num2) {
        Outcome::Value(v) if v.is_finite() => (OutcomeKind::Value, Some(v)),
        Outcome::Value(v) => return Err(non_finite_result_to_problem(v, &ctx)),
        Outcome::NoResult => (OutcomeKind::NoResult, None),
        Outcome::Failed(e) => return Err(calculator_error_to_problem(e, &ctx)),
    };

    Ok(Json(EvaluateResponse {
        outcome,
        operation: req.operation,
        result,
    }))
}

/// Handler for GET /calculator/v1/operations
#[utoipa::path(
    get,
    path = "/calculator/v1/operations",
    tag = "calculator",
    responses((status = 200, description = "Supported operations", body = [OperationDto]))
)]
pub async fn list_operations() -> Json<Vec<OperationDto>> {
    Json(Operation::ALL.into_iter().map(OperationDto::from).collect())
}
