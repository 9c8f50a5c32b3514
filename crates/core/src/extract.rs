//! Customer feature extraction.
//!
//! Maps one raw telemetry record to a canonical [`CustomerFeatures`] value.
//! Extraction is total: every parse failure degrades to a zero/false default
//! and the request proceeds.

use serde_json::Value;

use crate::domain::customer::{CoverageSize, CustomerFeatures, RawCustomerRecord, Region};

/// Extender count at or above which coverage is promoted to Large.
const LARGE_EXTENDER_COUNT: u32 = 2;
/// Device count above which coverage is promoted to Large.
const LARGE_DEVICE_COUNT: u32 = 15;
/// Device count at or below which an extender-less home is Small.
const SMALL_DEVICE_COUNT: u32 = 5;

/// Extract canonical features from a raw customer record. Never fails.
pub fn extract(raw: &RawCustomerRecord) -> CustomerFeatures {
    let wireless = field_u32(raw, "wireless_clients");
    let wired = field_u32(raw, "wired_clients");
    let total_devices = wireless + wired;
    let extender_count = field_u32(raw, "extenders");

    CustomerFeatures {
        name: raw.text("customer_name").unwrap_or_default(),
        total_devices: f64::from(total_devices),
        rx_avg_bps: field_f64(raw, "rx_avg_bps"),
        network_speed: field_speed(raw, "network_speed"),
        rssi_mean: field_f64(raw, "rssi_mean"),
        rssi_min: field_f64(raw, "rssi_min"),
        throughput_p90: field_f64(raw, "throughput_p90"),
        throughput_max: field_f64(raw, "throughput_max"),
        extender_count: f64::from(extender_count),
        coverage: derive_coverage(extender_count, total_devices),
        security: field_flag(raw, "security"),
        security_plus: field_flag(raw, "security_plus"),
        total_shield: field_flag(raw, "total_shield"),
        region: raw.text("state").as_deref().and_then(Region::parse),
    }
}

/// Coverage is derived, never read from the record directly.
fn derive_coverage(extender_count: u32, total_devices: u32) -> CoverageSize {
    if extender_count >= LARGE_EXTENDER_COUNT || total_devices > LARGE_DEVICE_COUNT {
        CoverageSize::Large
    } else if extender_count == 0 && total_devices <= SMALL_DEVICE_COUNT {
        CoverageSize::Small
    } else {
        CoverageSize::Medium
    }
}

fn field_u32(raw: &RawCustomerRecord, key: &str) -> u32 {
    match raw.get(key) {
        Some(Value::Number(number)) => {
            number.as_u64().and_then(|n| u32::try_from(n).ok()).unwrap_or(0)
        }
        Some(Value::String(text)) => text.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

fn field_f64(raw: &RawCustomerRecord, key: &str) -> f64 {
    let value = match raw.get(key) {
        Some(Value::Number(number)) => number.as_f64().unwrap_or(0.0),
        Some(Value::String(text)) => text.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    };
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Plan speed arrives as a compound value+unit string ("1.0G", "500M").
/// "G" scales to Mbps-equivalent units; unit matching is case-insensitive.
/// Bare numerics pass through; anything else is 0.
fn field_speed(raw: &RawCustomerRecord, key: &str) -> f64 {
    match raw.get(key) {
        Some(Value::Number(number)) => number.as_f64().unwrap_or(0.0),
        Some(Value::String(text)) => parse_speed(text),
        _ => 0.0,
    }
}

fn parse_speed(text: &str) -> f64 {
    let text = text.trim();
    if text.is_empty() {
        return 0.0;
    }

    let split = text.find(|c: char| c.is_ascii_alphabetic()).unwrap_or(text.len());
    let (numeric, unit) = text.split_at(split);
    let Ok(value) = numeric.trim().parse::<f64>() else {
        return 0.0;
    };

    match unit.trim().to_ascii_lowercase().as_str() {
        "g" | "gbps" => value * 1000.0,
        "m" | "mbps" | "" => value,
        _ => 0.0,
    }
}

/// A field is truthy only when its lowercased string form is "true" or "1".
fn field_flag(raw: &RawCustomerRecord, key: &str) -> bool {
    matches!(raw.text(key).map(|t| t.trim().to_ascii_lowercase()).as_deref(), Some("true" | "1"))
}
