//! Min/max normalization against training-time parameters.

use serde::{Deserialize, Serialize};

use crate::artifact::ArtifactError;
use crate::domain::customer::CustomerFeatures;
use crate::schema::FeatureSchema;

/// Denominator floor for features that were constant across the training
/// population (min == max).
pub const MIN_MAX_EPSILON: f64 = 1e-8;

/// Per-continuous-feature scaling bounds captured at training time.
///
/// Read-only for the lifetime of the process; inference must reuse these
/// exact values to stay bit-reproducible against training.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NormalizationParameters {
    /// Continuous feature names in schema order, kept in the artifact so
    /// drift is caught by name and not just by width.
    pub feature_names: Vec<String>,
    pub min: Vec<f64>,
    pub max: Vec<f64>,
}

impl NormalizationParameters {
    /// Length and name assertions against the schema, plus the
    /// `max[i] >= min[i]` invariant.
    pub fn validate_against(&self, schema: &FeatureSchema) -> Result<(), ArtifactError> {
        let expected = schema.continuous().len();
        if self.feature_names.len() != expected
            || self.min.len() != expected
            || self.max.len() != expected
        {
            return Err(ArtifactError::Validation(format!(
                "normalization parameters cover {} features but the schema declares {expected}",
                self.min.len().min(self.max.len()).min(self.feature_names.len()),
            )));
        }
        for (stored, declared) in self.feature_names.iter().zip(schema.continuous()) {
            if stored != declared {
                return Err(ArtifactError::Validation(format!(
                    "normalization parameter `{stored}` does not match schema feature `{declared}`",
                )));
            }
        }
        for (index, (min, max)) in self.min.iter().zip(&self.max).enumerate() {
            if max < min {
                return Err(ArtifactError::Validation(format!(
                    "feature `{}` has max {max} below min {min}",
                    self.feature_names[index],
                )));
            }
        }
        Ok(())
    }
}

/// Assemble the model input vector: min/max-scaled continuous block followed
/// by the untouched one-hot/boolean block, both in schema order.
///
/// Pure and deterministic; output width equals `schema.input_width()`.
pub fn normalize(
    features: &CustomerFeatures,
    schema: &FeatureSchema,
    params: &NormalizationParameters,
) -> Vec<f64> {
    let mut vector = Vec::with_capacity(schema.input_width());
    for (index, name) in schema.continuous().iter().enumerate() {
        let span = (params.max[index] - params.min[index]).max(MIN_MAX_EPSILON);
        vector.push((features.value(name) - params.min[index]) / span);
    }
    for name in schema.categorical() {
        vector.push(features.value(name));
    }
    vector
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::customer::Region;

    fn params_for(schema: &FeatureSchema, min: f64, max: f64) -> NormalizationParameters {
        NormalizationParameters {
            feature_names: schema.continuous().to_vec(),
            min: vec![min; schema.continuous().len()],
            max: vec![max; schema.continuous().len()],
        }
    }

    #[test]
    fn constant_training_feature_never_divides_by_zero() {
        let schema = FeatureSchema::telemetry_v1();
        let params = params_for(&schema, 3.0, 3.0);
        let mut features = CustomerFeatures::default();
        features.total_devices = 7.0;

        let vector = normalize(&features, &schema, &params);
        assert_eq!(vector.len(), schema.input_width());
        assert!(vector.iter().all(|component| component.is_finite()));
    }

    #[test]
    fn vector_at_training_min_scales_to_zero() {
        let schema = FeatureSchema::telemetry_v1();
        let params = params_for(&schema, 2.0, 10.0);
        let mut features = CustomerFeatures::default();
        features.total_devices = 2.0;
        features.rx_avg_bps = 2.0;
        features.network_speed = 2.0;
        features.rssi_mean = 2.0;
        features.rssi_min = 2.0;
        features.throughput_p90 = 2.0;
        features.throughput_max = 2.0;
        features.extender_count = 2.0;

        let vector = normalize(&features, &schema, &params);
        for component in &vector[..schema.continuous().len()] {
            assert_eq!(*component, 0.0);
        }
    }

    #[test]
    fn categorical_block_passes_through_unchanged() {
        let schema = FeatureSchema::telemetry_v1();
        let params = params_for(&schema, 0.0, 1.0);
        let mut features = CustomerFeatures::default();
        features.security = true;
        features.region = Some(Region::Tx);

        let vector = normalize(&features, &schema, &params);
        let categorical = &vector[schema.continuous().len()..];
        let names = schema.categorical();
        let security_index = names.iter().position(|n| n == "has_security").unwrap();
        let tx_index = names.iter().position(|n| n == "state_TX").unwrap();
        assert_eq!(categorical[security_index], 1.0);
        assert_eq!(categorical[tx_index], 1.0);
        assert_eq!(categorical.iter().filter(|c| **c == 1.0).count(), 3);
    }

    #[test]
    fn width_mismatch_fails_validation() {
        let schema = FeatureSchema::telemetry_v1();
        let mut params = params_for(&schema, 0.0, 1.0);
        params.min.pop();
        assert!(params.validate_against(&schema).is_err());
    }

    #[test]
    fn name_drift_fails_validation() {
        let schema = FeatureSchema::telemetry_v1();
        let mut params = params_for(&schema, 0.0, 1.0);
        params.feature_names[0] = "device_total".to_string();
        assert!(params.validate_against(&schema).is_err());
    }

    #[test]
    fn inverted_bounds_fail_validation() {
        let schema = FeatureSchema::telemetry_v1();
        let mut params = params_for(&schema, 0.0, 1.0);
        params.max[2] = -1.0;
        assert!(params.validate_against(&schema).is_err());
    }
}
