use axum::extract::rejection::JsonRejection;
use axum::http::{HeaderMap, Uri};
use calculator_sdk::CalculatorError;
use webcalc_errors::Problem;

use super::page::PageError;

/// Header carrying the request id set by the host.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Request path and id used to finalize problems.
#[derive(Debug, Clone)]
pub struct ProblemContext {
    pub instance: String,
    pub trace_id: Option<String>,
}

impl ProblemContext {
    #[must_use]
    pub fn from_request(uri: &Uri, headers: &HeaderMap) -> Self {
        let trace_id = headers
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        Self {
            instance: uri.path().to_owned(),
            trace_id,
        }
    }

    #[must_use]
    pub fn finalize(&self, p: Problem) -> Problem {
        webcalc_errors::finalize(p, &self.instance, self.trace_id.clone())
    }
}

/// Map a domain error to an RFC 9457 problem.
#[must_use]
pub fn calculator_error_to_problem(e: CalculatorError, ctx: &ProblemContext) -> Problem {
    tracing::debug!(error = %e, "calculation failed");
    let p = match e {
        CalculatorError::DivisionByZero => {
            Problem::unprocessable("The divisor (num2) must not be zero")
                .with_title("Division by zero")
        }
    };
    ctx.finalize(p.with_code(e.code()))
}

/// A result that overflowed to infinity cannot be carried as a JSON number.
#[must_use]
pub fn non_finite_result_to_problem(value: f64, ctx: &ProblemContext) -> Problem {
    tracing::debug!(value, "result is not a finite number");
    let p = Problem::unprocessable("The result is too large to represent as a finite number")
        .with_title("Non-finite result")
        .with_code("non_finite_result");
    ctx.finalize(p)
}

/// Map a page rendering failure to a 500 problem.
#[must_use]
pub fn page_error_to_problem(e: &PageError, ctx: &ProblemContext) -> Problem {
    ctx.finalize(Problem::internal(format!(
        "The calculator page could not be rendered: {e}"
    )))
}

/// Map a JSON body rejection to a 400 problem.
#[must_use]
pub fn json_rejection_to_problem(rejection: &JsonRejection, ctx: &ProblemContext) -> Problem {
    tracing::debug!(error = %rejection, "rejected JSON body");
    ctx.finalize(Problem::bad_request(rejection.body_text()))
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use axum::http::{HeaderValue, StatusCode};

    #[test]
    fn context_reads_path_and_request_id() {
        let uri: Uri = "/calculator/v1/evaluate?x=1".parse().unwrap();
        let mut headers = HeaderMap::new();
        headers.insert(REQUEST_ID_HEADER, HeaderValue::from_static("rid-7"));

        let ctx = ProblemContext::from_request(&uri, &headers);
        assert_eq!(ctx.instance, "/calculator/v1/evaluate");
        assert_eq!(ctx.trace_id.as_deref(), Some("rid-7"));
    }

    #[test]
    fn division_by_zero_maps_to_422_with_code() {
        let ctx = ProblemContext {
            instance: "/calculator/v1/evaluate".to_owned(),
            trace_id: None,
        };
        let p = calculator_error_to_problem(CalculatorError::DivisionByZero, &ctx);
        assert_eq!(p.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(p.code, "division_by_zero");
        assert_eq!(p.title, "Division by zero");
        assert_eq!(p.instance, "/calculator/v1/evaluate");
    }

    #[test]
    fn non_finite_result_maps_to_422() {
        let ctx = ProblemContext {
            instance: "/calculator/v1/evaluate".to_owned(),
            trace_id: Some("rid-9".to_owned()),
        };
        let p = non_finite_result_to_problem(f64::INFINITY, &ctx);
        assert_eq!(p.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(p.code, "non_finite_result");
        assert_eq!(p.trace_id.as_deref(), Some("rid-9"));
    }

    #[test]
    fn page_error_is_served_as_500_problem() {
        use axum::response::IntoResponse;

        let ctx = ProblemContext {
            instance: "/".to_owned(),
            trace_id: None,
        };
        let err = PageError::Load("unexpected end of input".to_owned());
        let p = page_error_to_problem(&err, &ctx);
        assert_eq!(p.code, "internal");
        assert!(p.detail.contains("unexpected end of input"));

        let response = p.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.headers()[axum::http::header::CONTENT_TYPE],
            webcalc_errors::APPLICATION_PROBLEM_JSON
        );
    }
}
