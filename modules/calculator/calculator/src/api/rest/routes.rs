//! Route registration for the calculator module

use std::sync::Arc;

use axum::routing::{get, post};
use axum::{Extension, Router};

use crate::config::CalculatorConfig;
use crate::domain::Service;

use super::{handlers, openapi};

/// Register all calculator routes.
///
/// # Arguments
/// * `router` - Axum router to add routes to
/// * `service` - Domain service shared by all handlers
/// * `config` - Module config (page title, optional JSON/docs routes)
#[must_use]
pub fn register_routes(
    router: Router,
    service: Arc<Service>,
    config: Arc<CalculatorConfig>,
) -> Router {
    // GET / and POST / - the HTML form
    let mut calc = Router::new().route("/", get(handlers::show_form).post(handlers::submit_form));

    if config.enable_json_api {
        calc = calc
            .route("/calculator/v1/evaluate", post(handlers::evaluate))
            .route("/calculator/v1/operations", get(handlers::list_operations));
    }

    if config.enable_docs {
        calc = calc.route("/openapi.json", get(openapi::openapi_json));
    }

    let calc = calc.layer(Extension(service)).layer(Extension(config));

    router.merge(calc)
}
