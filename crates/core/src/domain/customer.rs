use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Untyped customer record as it arrives from the telemetry export.
///
/// Keys are free-form, values may be strings or numbers, and any field may be
/// absent, empty, or malformed (e.g. `"500.0M"` where a number was expected).
/// One record exists per request; it is never stored.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RawCustomerRecord(pub BTreeMap<String, Value>);

impl RawCustomerRecord {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// String form of a field regardless of whether it arrived as a JSON
    /// string, number, or bool.
    pub fn text(&self, key: &str) -> Option<String> {
        match self.0.get(key)? {
            Value::String(text) => Some(text.clone()),
            Value::Number(number) => Some(number.to_string()),
            Value::Bool(flag) => Some(flag.to_string()),
            _ => None,
        }
    }
}

/// Derived home-coverage bucket, one-hot encoded for the model.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoverageSize {
    Small,
    Medium,
    Large,
}

impl std::fmt::Display for CoverageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Small => write!(f, "Small"),
            Self::Medium => write!(f, "Medium"),
            Self::Large => write!(f, "Large"),
        }
    }
}

/// Supported service regions. The vocabulary is closed: an unrecognized code
/// yields no region at all (all-zero one-hot) rather than an "Other" bucket.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Region {
    Ca,
    Tx,
    Ny,
    Fl,
    Wa,
}

impl Region {
    /// One-hot encoding order. Must match the order used at training time.
    pub const ALL: [Region; 5] = [Region::Ca, Region::Tx, Region::Ny, Region::Fl, Region::Wa];

    pub fn code(&self) -> &'static str {
        match self {
            Self::Ca => "CA",
            Self::Tx => "TX",
            Self::Ny => "NY",
            Self::Fl => "FL",
            Self::Wa => "WA",
        }
    }

    pub fn parse(value: &str) -> Option<Region> {
        match value.trim().to_ascii_uppercase().as_str() {
            "CA" => Some(Self::Ca),
            "TX" => Some(Self::Tx),
            "NY" => Some(Self::Ny),
            "FL" => Some(Self::Fl),
            "WA" => Some(Self::Wa),
            _ => None,
        }
    }
}

/// Canonical, fully-typed feature record produced by extraction.
///
/// Every schema-declared feature name resolves through [`Self::value`] to a
/// finite number, with 0 standing in for anything the raw record was missing
/// or could not parse. Extraction is total: a request is never rejected over
/// a single bad field.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomerFeatures {
    /// Display-only; not part of the model input.
    pub name: String,
    pub total_devices: f64,
    pub rx_avg_bps: f64,
    pub network_speed: f64,
    pub rssi_mean: f64,
    pub rssi_min: f64,
    pub throughput_p90: f64,
    pub throughput_max: f64,
    pub extender_count: f64,
    pub coverage: CoverageSize,
    pub security: bool,
    pub security_plus: bool,
    pub total_shield: bool,
    pub region: Option<Region>,
}

impl Default for CoverageSize {
    fn default() -> Self {
        Self::Medium
    }
}

fn flag(set: bool) -> f64 {
    if set {
        1.0
    } else {
        0.0
    }
}

impl CustomerFeatures {
    /// Resolve a schema feature name to its numeric value.
    ///
    /// Unknown names resolve to 0 so a schema revision never panics here; the
    /// load-time schema/parameter name check is what catches real drift.
    pub fn value(&self, feature: &str) -> f64 {
        match feature {
            "total_devices" => self.total_devices,
            "rx_avg_bps" => self.rx_avg_bps,
            "network_speed" => self.network_speed,
            "rssi_mean" => self.rssi_mean,
            "rssi_min" => self.rssi_min,
            "throughput_p90" => self.throughput_p90,
            "throughput_max" => self.throughput_max,
            "extender_count" => self.extender_count,
            "coverage_small" => flag(self.coverage == CoverageSize::Small),
            "coverage_medium" => flag(self.coverage == CoverageSize::Medium),
            "coverage_large" => flag(self.coverage == CoverageSize::Large),
            "has_security" => flag(self.security),
            "has_security_plus" => flag(self.security_plus),
            "has_total_shield" => flag(self.total_shield),
            name => match name.strip_prefix("state_") {
                Some(code) => flag(self.region.is_some_and(|region| region.code() == code)),
                None => 0.0,
            },
        }
    }

    /// Region code for display, or "Unknown" when no one-hot bit is set.
    pub fn region_label(&self) -> &'static str {
        self.region.map(|region| region.code()).unwrap_or("Unknown")
    }
}
