pub mod config;
pub mod customers;
pub mod recommend;

use std::sync::Arc;

use serde::Serialize;
use uplink_core::config::AppConfig;
use uplink_core::{
    load_catalog, load_customers, load_model, load_normalization, ApplicationError, FeatureSchema,
    RawCustomerRecord, RecommendationEngine,
};

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

#[derive(Debug, Serialize)]
struct CommandOutcome {
    command: String,
    status: String,
    error_class: Option<String>,
    message: String,
}

impl CommandResult {
    pub fn failure(
        command: &str,
        error_class: &str,
        message: impl Into<String>,
        exit_code: u8,
    ) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "error".to_string(),
            error_class: Some(error_class.to_string()),
            message: message.into(),
        };
        Self { exit_code, output: serialize_payload(payload) }
    }
}

fn serialize_payload(payload: CommandOutcome) -> String {
    serde_json::to_string(&payload).unwrap_or_else(|error| {
        format!(
            "{{\"command\":\"unknown\",\"status\":\"error\",\"error_class\":\"serialization\",\"message\":\"{}\"}}",
            error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
        )
    })
}

/// Load every startup artifact and wire the engine. Runs once per command
/// invocation; any failure here is the "not ready" condition.
pub(crate) fn build_engine(
    config: &AppConfig,
) -> Result<(RecommendationEngine, Vec<RawCustomerRecord>), ApplicationError> {
    let schema = FeatureSchema::telemetry_v1();
    let model = load_model(&config.artifacts.model_path)?;
    let params = load_normalization(&config.artifacts.normalization_path, &schema)?;
    let catalog = load_catalog(&config.artifacts.catalog_path)?;
    let customers = load_customers(&config.artifacts.customers_path)?;

    let engine = RecommendationEngine::new(schema, params, Arc::new(model), catalog)?;
    Ok((engine, customers))
}
