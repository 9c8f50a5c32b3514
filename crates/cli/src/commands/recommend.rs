use serde::Serialize;
use tracing::info;
use uplink_core::config::{AppConfig, LoadOptions};
use uplink_core::{RankedRecommendation, RawCustomerRecord};
use uuid::Uuid;

use super::{build_engine, CommandResult};

#[derive(Debug, Serialize)]
struct RecommendPayload<'a> {
    command: &'a str,
    status: &'a str,
    customer: &'a str,
    recommendations: &'a [RankedRecommendation],
}

pub fn run(customer: &str, json: bool) -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure("recommend", "config_validation", error.to_string(), 2)
        }
    };

    let (engine, customers) = match build_engine(&config) {
        Ok(parts) => parts,
        Err(error) => return CommandResult::failure("recommend", "not_ready", error.to_string(), 2),
    };

    // Customer resolution is a serving-layer concern; the pipeline only ever
    // sees a resolved record.
    let Some(raw) = find_customer(&customers, customer) else {
        return CommandResult::failure(
            "recommend",
            "customer_not_found",
            format!("no customer named `{customer}` in the telemetry export"),
            1,
        );
    };

    let correlation_id = Uuid::new_v4();
    info!(
        event_name = "recommend.request",
        correlation_id = %correlation_id,
        customer = %customer,
        catalog_size = engine.catalog().len(),
        "scoring catalog for customer"
    );

    let recommendations = match engine.recommendations(raw) {
        Ok(recommendations) => recommendations,
        Err(error) => {
            return CommandResult::failure("recommend", "pipeline_failure", error.to_string(), 1)
        }
    };

    info!(
        event_name = "recommend.ranked",
        correlation_id = %correlation_id,
        customer = %customer,
        results = recommendations.len(),
        "ranked recommendations produced"
    );

    let output = if json {
        render_json(customer, &recommendations)
    } else {
        render_table(customer, &recommendations)
    };
    CommandResult { exit_code: 0, output }
}

fn find_customer<'a>(
    customers: &'a [RawCustomerRecord],
    name: &str,
) -> Option<&'a RawCustomerRecord> {
    customers.iter().find(|record| record.text("customer_name").as_deref() == Some(name))
}

fn render_json(customer: &str, recommendations: &[RankedRecommendation]) -> String {
    let payload =
        RecommendPayload { command: "recommend", status: "ok", customer, recommendations };
    serde_json::to_string(&payload)
        .unwrap_or_else(|error| format!("{{\"status\":\"error\",\"message\":\"{error}\"}}"))
}

fn render_table(customer: &str, recommendations: &[RankedRecommendation]) -> String {
    let mut lines = vec![format!("recommendations for {customer}:")];
    for item in recommendations {
        lines.push(format!(
            "{:>4}  {:<28} {:>6.3}  ${:>8}  {}",
            item.rank, item.product_name, item.score, item.price, item.explanation
        ));
    }
    lines.join("\n")
}
