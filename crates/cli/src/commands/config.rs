use uplink_core::config::{AppConfig, LoadOptions};

pub fn run() -> String {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => return format!("config validation failed: {error}"),
    };

    let lines = vec![
        "effective config (source precedence: env > file > default):".to_string(),
        format!("artifacts.model_path = {}", config.artifacts.model_path.display()),
        format!(
            "artifacts.normalization_path = {}",
            config.artifacts.normalization_path.display()
        ),
        format!("artifacts.catalog_path = {}", config.artifacts.catalog_path.display()),
        format!("artifacts.customers_path = {}", config.artifacts.customers_path.display()),
        format!("logging.level = {}", config.logging.level),
        format!("logging.format = {:?}", config.logging.format),
    ];
    lines.join("\n")
}
