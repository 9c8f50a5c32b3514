use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Effective configuration: defaults, patched by `uplink.toml` when present,
/// then `UPLINK_*` environment variables, then programmatic overrides.
#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub artifacts: ArtifactConfig,
    pub logging: LoggingConfig,
}

/// Paths to the startup artifacts the engine is built from.
#[derive(Clone, Debug, PartialEq)]
pub struct ArtifactConfig {
    pub model_path: PathBuf,
    pub normalization_path: PathBuf,
    pub catalog_path: PathBuf,
    pub customers_path: PathBuf,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub model_path: Option<PathBuf>,
    pub normalization_path: Option<PathBuf>,
    pub catalog_path: Option<PathBuf>,
    pub customers_path: Option<PathBuf>,
    pub log_level: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            artifacts: ArtifactConfig {
                model_path: PathBuf::from("artifacts/model.json"),
                normalization_path: PathBuf::from("artifacts/normalization.json"),
                catalog_path: PathBuf::from("artifacts/catalog.json"),
                customers_path: PathBuf::from("artifacts/customers.json"),
            },
            logging: LoggingConfig { level: "info".to_string(), format: LogFormat::Compact },
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    artifacts: Option<ArtifactPatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct ArtifactPatch {
    model_path: Option<PathBuf>,
    normalization_path: Option<PathBuf>,
    catalog_path: Option<PathBuf>,
    customers_path: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}

impl AppConfig {
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let maybe_path = resolve_config_path(options.config_path.as_deref());

        if let Some(path) = maybe_path {
            let patch = read_patch(&path)?;
            config.apply_patch(patch);
        } else if options.require_file {
            let expected = options.config_path.unwrap_or_else(|| PathBuf::from("uplink.toml"));
            return Err(ConfigError::MissingConfigFile(expected));
        }

        config.apply_env_overrides()?;
        config.apply_overrides(options.overrides);
        config.validate()?;

        Ok(config)
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(artifacts) = patch.artifacts {
            if let Some(model_path) = artifacts.model_path {
                self.artifacts.model_path = model_path;
            }
            if let Some(normalization_path) = artifacts.normalization_path {
                self.artifacts.normalization_path = normalization_path;
            }
            if let Some(catalog_path) = artifacts.catalog_path {
                self.artifacts.catalog_path = catalog_path;
            }
            if let Some(customers_path) = artifacts.customers_path {
                self.artifacts.customers_path = customers_path;
            }
        }

        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(value) = read_env("UPLINK_MODEL_PATH") {
            self.artifacts.model_path = PathBuf::from(value);
        }
        if let Some(value) = read_env("UPLINK_NORMALIZATION_PATH") {
            self.artifacts.normalization_path = PathBuf::from(value);
        }
        if let Some(value) = read_env("UPLINK_CATALOG_PATH") {
            self.artifacts.catalog_path = PathBuf::from(value);
        }
        if let Some(value) = read_env("UPLINK_CUSTOMERS_PATH") {
            self.artifacts.customers_path = PathBuf::from(value);
        }
        if let Some(value) = read_env("UPLINK_LOGGING_LEVEL") {
            self.logging.level = value;
        }
        if let Some(value) = read_env("UPLINK_LOGGING_FORMAT") {
            self.logging.format = value.parse()?;
        }
        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(model_path) = overrides.model_path {
            self.artifacts.model_path = model_path;
        }
        if let Some(normalization_path) = overrides.normalization_path {
            self.artifacts.normalization_path = normalization_path;
        }
        if let Some(catalog_path) = overrides.catalog_path {
            self.artifacts.catalog_path = catalog_path;
        }
        if let Some(customers_path) = overrides.customers_path {
            self.artifacts.customers_path = customers_path;
        }
        if let Some(log_level) = overrides.log_level {
            self.logging.level = log_level;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (label, path) in [
            ("artifacts.model_path", &self.artifacts.model_path),
            ("artifacts.normalization_path", &self.artifacts.normalization_path),
            ("artifacts.catalog_path", &self.artifacts.catalog_path),
            ("artifacts.customers_path", &self.artifacts.customers_path),
        ] {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::Validation(format!("{label} must not be empty")));
            }
        }
        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::Validation("logging.level must not be empty".to_string()));
        }
        Ok(())
    }
}

fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return path.exists().then(|| path.to_path_buf());
    }
    let default = PathBuf::from("uplink.toml");
    default.exists().then_some(default)
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let contents = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;
    toml::from_str(&contents)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}
