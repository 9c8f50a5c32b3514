use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One ranked, explained catalog item for a single customer request.
///
/// Ranks are dense and 1-based: a response over an N-product catalog always
/// carries ranks 1..=N with no gaps or duplicates. Produced fresh per request
/// and never persisted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RankedRecommendation {
    pub rank: u32,
    pub product_name: String,
    /// Model score; nominally sigmoid output in [0, 1] but treated only as
    /// "larger means more relevant".
    pub score: f64,
    pub price: Decimal,
    pub explanation: String,
}
