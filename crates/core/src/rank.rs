//! Score-descending ranking with deterministic tie-breaking.

use std::cmp::Ordering;

use crate::domain::product::Product;
use crate::errors::DomainError;

/// A catalog item paired with its score and final dense rank.
#[derive(Clone, Debug, PartialEq)]
pub struct ScoredProduct<'a> {
    pub rank: u32,
    pub product: &'a Product,
    pub score: f64,
}

/// Rank every catalog item by descending score.
///
/// Exact ties keep catalog load order (stable sort), ranks are dense and
/// 1-based, and nothing is filtered out; paging is a caller concern. A
/// score/catalog width mismatch is an explicit error, never silent
/// misalignment.
pub fn rank<'a>(
    catalog: &'a [Product],
    scores: &[f64],
) -> Result<Vec<ScoredProduct<'a>>, DomainError> {
    if scores.len() != catalog.len() {
        return Err(DomainError::ScoreWidthMismatch {
            scores: scores.len(),
            products: catalog.len(),
        });
    }

    let mut order: Vec<usize> = (0..catalog.len()).collect();
    // Unordered (NaN) comparisons fall back to Equal, which the stable sort
    // resolves by catalog order.
    order.sort_by(|&a, &b| scores[b].partial_cmp(&scores[a]).unwrap_or(Ordering::Equal));

    Ok(order
        .into_iter()
        .enumerate()
        .map(|(position, index)| ScoredProduct {
            rank: position as u32 + 1,
            product: &catalog[index],
            score: scores[index],
        })
        .collect())
}
