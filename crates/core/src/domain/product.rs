use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A catalog entry the model can recommend.
///
/// Catalog load order is significant: the scoring model emits one probability
/// per product, and output position `i` belongs to the product loaded at
/// position `i`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique within the catalog; matched case-insensitively by explanation
    /// keyword rules.
    pub name: String,
    /// Benefit phrases shown when no keyword template applies.
    #[serde(default)]
    pub features: Vec<String>,
    /// Monthly price.
    pub price: Decimal,
}
