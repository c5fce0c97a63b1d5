use serde::{Deserialize, Serialize};

fn default_page_title() -> String {
    "Calculator".to_owned()
}

fn default_enable_json_api() -> bool {
    true
}

/// Calculator module configuration (`calculator:` section).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CalculatorConfig {
    /// Title of the HTML page.
    #[serde(default = "default_page_title")]
    pub page_title: String,

    /// Mount `/calculator/v1/*` JSON routes.
    #[serde(default = "default_enable_json_api")]
    pub enable_json_api: bool,

    /// Serve `/openapi.json`.
    #[serde(default)]
    pub enable_docs: bool,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            page_title: default_page_title(),
            enable_json_api: default_enable_json_api(),
            enable_docs: false,
        }
    }
}
