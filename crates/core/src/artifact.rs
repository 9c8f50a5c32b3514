//! Loading of startup artifacts: model weights, normalization parameters,
//! product catalog, and the customer telemetry export.
//!
//! Everything here runs exactly once per process. A failure is fatal for
//! serving and surfaces as an explicit error rather than an empty result.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::domain::customer::RawCustomerRecord;
use crate::domain::product::Product;
use crate::model::MlpModel;
use crate::normalize::NormalizationParameters;
use crate::schema::FeatureSchema;

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("could not read artifact `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse artifact `{path}`: {source}")]
    ParseFile { path: PathBuf, source: serde_json::Error },
    #[error("artifact validation failed: {0}")]
    Validation(String),
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    let contents = fs::read_to_string(path)
        .map_err(|source| ArtifactError::ReadFile { path: path.to_path_buf(), source })?;
    serde_json::from_str(&contents)
        .map_err(|source| ArtifactError::ParseFile { path: path.to_path_buf(), source })
}

/// Load the product catalog. Order in the file defines the model's label
/// index. An empty catalog is rejected here, before the engine exists.
pub fn load_catalog(path: &Path) -> Result<Vec<Product>, ArtifactError> {
    let catalog: Vec<Product> = read_json(path)?;
    if catalog.is_empty() {
        return Err(ArtifactError::Validation(format!(
            "catalog `{}` contains no products",
            path.display()
        )));
    }
    Ok(catalog)
}

/// Load the raw customer telemetry export. Record shapes are not cleaned
/// here; extraction tolerates whatever arrives.
pub fn load_customers(path: &Path) -> Result<Vec<RawCustomerRecord>, ArtifactError> {
    read_json(path)
}

/// Load and shape-check the trained model artifact.
pub fn load_model(path: &Path) -> Result<MlpModel, ArtifactError> {
    let model: MlpModel = read_json(path)?;
    model.validate()?;
    Ok(model)
}

/// Load normalization parameters and assert them against the schema by
/// length and name.
pub fn load_normalization(
    path: &Path,
    schema: &FeatureSchema,
) -> Result<NormalizationParameters, ArtifactError> {
    let params: NormalizationParameters = read_json(path)?;
    params.validate_against(schema)?;
    Ok(params)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write");
        file
    }

    #[test]
    fn empty_catalog_is_rejected() {
        let file = write_temp("[]");
        let error = load_catalog(file.path()).unwrap_err();
        assert!(matches!(error, ArtifactError::Validation(_)));
    }

    #[test]
    fn missing_artifact_reports_path() {
        let error = load_catalog(Path::new("/nonexistent/catalog.json")).unwrap_err();
        assert!(error.to_string().contains("/nonexistent/catalog.json"));
    }

    #[test]
    fn malformed_artifact_is_a_parse_error() {
        let file = write_temp("{not json");
        let error = load_customers(file.path()).unwrap_err();
        assert!(matches!(error, ArtifactError::ParseFile { .. }));
    }

    #[test]
    fn catalog_round_trips_products_in_order() {
        let file = write_temp(
            r#"[
                {"name": "Fiber 500", "features": ["500 Mbps"], "price": "65.00"},
                {"name": "Identity Protection", "price": "9.99"}
            ]"#,
        );
        let catalog = load_catalog(file.path()).expect("catalog");
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog[0].name, "Fiber 500");
        assert_eq!(catalog[1].name, "Identity Protection");
        assert!(catalog[1].features.is_empty());
    }
}
