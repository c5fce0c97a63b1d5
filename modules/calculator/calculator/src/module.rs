//! Calculator module definition

use std::sync::Arc;

use axum::Router;
use calculator_sdk::CalculatorClient;

use crate::api::rest::routes;
use crate::config::CalculatorConfig;
use crate::domain::Service;

/// Calculator module.
///
/// Owns the domain service and contributes the calculator routes to the
/// host router.
pub struct CalculatorModule {
    config: Arc<CalculatorConfig>,
    service: Arc<Service>,
}

impl CalculatorModule {
    #[must_use]
    pub fn new(config: CalculatorConfig) -> Self {
        tracing::info!(
            json_api = config.enable_json_api,
            docs = config.enable_docs,
            "Initializing calculator module"
        );
        Self {
            config: Arc::new(config),
            service: Arc::new(Service::new()),
        }
    }

    /// Client handle for in-process consumers.
    #[must_use]
    pub fn client(&self) -> Arc<dyn CalculatorClient> {
        Arc::clone(&self.service) as Arc<dyn CalculatorClient>
    }

    #[must_use]
    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    /// Merge the calculator routes into `router`.
    #[must_use]
    pub fn register_rest(&self, router: Router) -> Router {
        tracing::info!("Registering calculator REST routes");
        let router =
            routes::register_routes(router, Arc::clone(&self.service), Arc::clone(&self.config));
        tracing::info!("calculator REST routes registered");
        router
    }
}

impl Default for CalculatorModule {
    fn default() -> Self {
        Self::new(CalculatorConfig::default())
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use calculator_sdk::{Operation, OperationRequest};

    #[test]
    fn client_is_backed_by_the_domain_service() {
        let module = CalculatorModule::default();
        let client = module.client();
        assert_eq!(client.add(10.0, 20.0), 30.0);
        assert_eq!(
            client.evaluate(&OperationRequest::new(-5.0, 3.0, Operation::Add)),
            Ok(-2.0)
        );
    }

    #[test]
    fn keeps_the_given_config() {
        let module = CalculatorModule::new(CalculatorConfig {
            page_title: "Sums".to_owned(),
            ..CalculatorConfig::default()
        });
        assert_eq!(module.config().page_title, "Sums");
    }
}
