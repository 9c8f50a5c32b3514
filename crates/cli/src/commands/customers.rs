use uplink_core::config::{AppConfig, LoadOptions};
use uplink_core::load_customers;

use super::CommandResult;

pub fn run() -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure("customers", "config_validation", error.to_string(), 2)
        }
    };

    let customers = match load_customers(&config.artifacts.customers_path) {
        Ok(customers) => customers,
        Err(error) => {
            return CommandResult::failure("customers", "not_ready", error.to_string(), 2)
        }
    };

    let mut names: Vec<String> =
        customers.iter().filter_map(|record| record.text("customer_name")).collect();
    names.sort();

    let output = if names.is_empty() {
        "no named customers in the telemetry export".to_string()
    } else {
        names.join("\n")
    };
    CommandResult { exit_code: 0, output }
}
