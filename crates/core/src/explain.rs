//! Templated natural-language justifications for ranked products.
//!
//! Dispatch is an explicit ordered list of (keyword, template) rules matched
//! against the lowercased product name, with a mandatory generic fallback.
//! Order carries meaning: "wi-fi security plus" sits ahead of "wi-fi
//! security" so the more specific product never falls through to the plainer
//! template.

use crate::domain::customer::CustomerFeatures;
use crate::domain::product::Product;

type TemplateFn = fn(&CustomerFeatures, &Product) -> String;

struct ExplanationRule {
    keyword: &'static str,
    template: TemplateFn,
}

/// Deterministic, pure explanation generator shared by all requests.
pub struct ExplanationGenerator {
    rules: Vec<ExplanationRule>,
}

impl ExplanationGenerator {
    /// The production rule chain. Precedence is the order of this list.
    pub fn standard() -> Self {
        Self {
            rules: vec![
                ExplanationRule { keyword: "fiber", template: fiber },
                ExplanationRule { keyword: "wi-fi security plus", template: security_plus },
                ExplanationRule { keyword: "wi-fi security", template: security },
                ExplanationRule { keyword: "total shield", template: total_shield },
                ExplanationRule { keyword: "whole-home wi-fi", template: whole_home },
                ExplanationRule { keyword: "identity protection", template: identity_protection },
            ],
        }
    }

    /// Render the first matching template, or the fallback when no keyword
    /// rule applies.
    pub fn explain(&self, features: &CustomerFeatures, product: &Product) -> String {
        let name = product.name.to_lowercase();
        for rule in &self.rules {
            if name.contains(rule.keyword) {
                return (rule.template)(features, product);
            }
        }
        fallback(features, product)
    }
}

impl Default for ExplanationGenerator {
    fn default() -> Self {
        Self::standard()
    }
}

fn bandwidth_mbps(features: &CustomerFeatures) -> f64 {
    features.rx_avg_bps / 1_000_000.0
}

fn fiber(features: &CustomerFeatures, product: &Product) -> String {
    format!(
        "Your household averages {:.1} Mbps of downstream traffic on a {:.0} Mbps plan; \
         {} raises that ceiling so peak-hour usage stops competing for bandwidth.",
        bandwidth_mbps(features),
        features.network_speed,
        product.name,
    )
}

fn security_plus(features: &CustomerFeatures, product: &Product) -> String {
    if features.security {
        format!(
            "{} upgrades the protection already on your account with ad blocking and \
             per-device controls across all {:.0} connected devices.",
            product.name, features.total_devices,
        )
    } else {
        format!(
            "{} combines network-level threat blocking with ad blocking and per-device \
             controls for your {:.0} connected devices.",
            product.name, features.total_devices,
        )
    }
}

fn security(features: &CustomerFeatures, product: &Product) -> String {
    format!(
        "With {:.0} devices on your network, {} screens traffic for malware and \
         intrusions before it reaches any of them.",
        features.total_devices, product.name,
    )
}

fn total_shield(features: &CustomerFeatures, product: &Product) -> String {
    format!(
        "{} extends protection beyond your home network to every device you carry, \
         complementing the {:.0} devices already connected at home.",
        product.name, features.total_devices,
    )
}

fn whole_home(features: &CustomerFeatures, product: &Product) -> String {
    format!(
        "{} keeps {:.0} devices connected across your {} coverage home, eliminating \
         dead zones with mesh Wi-Fi.",
        product.name, features.total_devices, features.coverage,
    )
}

fn identity_protection(features: &CustomerFeatures, product: &Product) -> String {
    format!(
        "{} monitors for personal data exposure and credit events, a rising concern \
         for customers in {}.",
        product.name,
        features.region_label(),
    )
}

fn fallback(_features: &CustomerFeatures, product: &Product) -> String {
    if product.features.is_empty() {
        format!("{} fits your overall usage profile.", product.name)
    } else {
        format!("{} includes {}.", product.name, product.features.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::domain::customer::{CoverageSize, Region};

    fn product(name: &str, features: &[&str]) -> Product {
        Product {
            name: name.to_string(),
            features: features.iter().map(|f| f.to_string()).collect(),
            price: Decimal::new(1999, 2),
        }
    }

    fn customer() -> CustomerFeatures {
        CustomerFeatures {
            name: "Dana".to_string(),
            total_devices: 12.0,
            rx_avg_bps: 85_000_000.0,
            network_speed: 500.0,
            region: Some(Region::Ca),
            ..CustomerFeatures::default()
        }
    }

    #[test]
    fn security_plus_never_falls_through_to_plain_security() {
        let generator = ExplanationGenerator::standard();
        let plus = generator.explain(&customer(), &product("Wi-Fi Security Plus", &[]));
        let plain = generator.explain(&customer(), &product("Wi-Fi Security", &[]));

        assert!(plus.contains("ad blocking"));
        assert!(!plain.contains("ad blocking"));
        assert_ne!(plus, plain);
    }

    #[test]
    fn fiber_template_mentions_speed_and_bandwidth() {
        let generator = ExplanationGenerator::standard();
        let explanation = generator.explain(&customer(), &product("Fiber 500", &[]));
        assert!(explanation.contains("500 Mbps plan"));
        assert!(explanation.contains("85.0 Mbps"));
    }

    #[test]
    fn identity_protection_mentions_region() {
        let generator = ExplanationGenerator::standard();
        let explanation = generator.explain(&customer(), &product("Identity Protection", &[]));
        assert!(explanation.contains("CA"));
    }

    #[test]
    fn identity_protection_without_region_reads_unknown() {
        let generator = ExplanationGenerator::standard();
        let mut features = customer();
        features.region = None;
        let explanation = generator.explain(&features, &product("Identity Protection", &[]));
        assert!(explanation.contains("Unknown"));
    }

    #[test]
    fn whole_home_mentions_devices_and_coverage() {
        let generator = ExplanationGenerator::standard();
        let mut features = customer();
        features.coverage = CoverageSize::Large;
        let explanation = generator.explain(&features, &product("Whole-Home Wi-Fi", &[]));
        assert!(explanation.contains("12 devices"));
        assert!(explanation.contains("Large"));
    }

    #[test]
    fn keyword_match_is_case_insensitive() {
        let generator = ExplanationGenerator::standard();
        let upper = generator.explain(&customer(), &product("FIBER 940", &[]));
        assert!(upper.contains("raises that ceiling"));
    }

    #[test]
    fn fallback_lists_benefit_phrases_verbatim() {
        let generator = ExplanationGenerator::standard();
        let explanation = generator
            .explain(&customer(), &product("Streaming Bundle", &["4K streaming", "no contracts"]));
        assert_eq!(explanation, "Streaming Bundle includes 4K streaming, no contracts.");
    }

    #[test]
    fn fallback_without_phrases_is_still_nonempty() {
        let generator = ExplanationGenerator::standard();
        let explanation = generator.explain(&customer(), &product("Mystery Add-On", &[]));
        assert!(explanation.contains("Mystery Add-On"));
    }

    #[test]
    fn security_plus_acknowledges_existing_security_addon() {
        let generator = ExplanationGenerator::standard();
        let mut features = customer();
        features.security = true;
        let explanation = generator.explain(&features, &product("Wi-Fi Security Plus", &[]));
        assert!(explanation.contains("already on your account"));
    }
}
