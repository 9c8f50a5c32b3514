//! Feature schema shared by extraction, normalization, and the model.
//!
//! The two name sequences are the positional contract with the trained
//! artifact: continuous features occupy the first block of the input vector
//! in declaration order, one-hot/boolean features the second. Artifacts are
//! checked against the schema by length and name at load time instead of
//! being trusted implicitly.

use crate::domain::customer::Region;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeatureSchema {
    continuous: Vec<String>,
    categorical: Vec<String>,
}

impl FeatureSchema {
    /// The production telemetry schema. Order here must match the order used
    /// when the current model artifact was trained.
    pub fn telemetry_v1() -> Self {
        let continuous = [
            "total_devices",
            "rx_avg_bps",
            "network_speed",
            "rssi_mean",
            "rssi_min",
            "throughput_p90",
            "throughput_max",
            "extender_count",
        ]
        .map(str::to_string)
        .to_vec();

        let mut categorical: Vec<String> = [
            "coverage_small",
            "coverage_medium",
            "coverage_large",
            "has_security",
            "has_security_plus",
            "has_total_shield",
        ]
        .map(str::to_string)
        .to_vec();
        categorical.extend(Region::ALL.iter().map(|region| format!("state_{}", region.code())));

        Self { continuous, categorical }
    }

    pub fn continuous(&self) -> &[String] {
        &self.continuous
    }

    pub fn categorical(&self) -> &[String] {
        &self.categorical
    }

    /// Width of the model input vector this schema produces.
    pub fn input_width(&self) -> usize {
        self.continuous.len() + self.categorical.len()
    }
}
