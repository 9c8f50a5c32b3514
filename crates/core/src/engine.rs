//! The recommendation engine: one immutable service object per process.
//!
//! Constructed once at startup from already-loaded artifacts and handed by
//! reference to every request path. All shared state (schema, parameters,
//! model, catalog) is immutable after construction, so concurrent requests
//! need no locking.

use std::sync::Arc;

use crate::domain::customer::RawCustomerRecord;
use crate::domain::product::Product;
use crate::domain::recommendation::RankedRecommendation;
use crate::errors::{ApplicationError, DomainError};
use crate::explain::ExplanationGenerator;
use crate::extract::extract;
use crate::model::ScoringModel;
use crate::normalize::{normalize, NormalizationParameters};
use crate::rank::rank;
use crate::schema::FeatureSchema;

pub struct RecommendationEngine {
    schema: FeatureSchema,
    params: NormalizationParameters,
    model: Arc<dyn ScoringModel>,
    catalog: Arc<Vec<Product>>,
    explainer: ExplanationGenerator,
}

impl std::fmt::Debug for RecommendationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecommendationEngine")
            .field("schema", &self.schema)
            .field("params", &self.params)
            .field("catalog", &self.catalog)
            .finish_non_exhaustive()
    }
}

impl RecommendationEngine {
    /// Wire up the pipeline. Every cross-artifact alignment the request path
    /// relies on is asserted here, so a constructed engine is ready to serve:
    /// non-empty catalog, parameters matching the schema by name and width,
    /// model input width equal to the schema width, model output width equal
    /// to the catalog size.
    pub fn new(
        schema: FeatureSchema,
        params: NormalizationParameters,
        model: Arc<dyn ScoringModel>,
        catalog: Vec<Product>,
    ) -> Result<Self, ApplicationError> {
        if catalog.is_empty() {
            return Err(DomainError::EmptyCatalog.into());
        }
        params.validate_against(&schema)?;
        if model.input_width() != schema.input_width() {
            return Err(DomainError::InputWidthMismatch {
                expected: model.input_width(),
                actual: schema.input_width(),
            }
            .into());
        }
        if model.output_width() != catalog.len() {
            return Err(DomainError::ScoreWidthMismatch {
                scores: model.output_width(),
                products: catalog.len(),
            }
            .into());
        }

        Ok(Self {
            schema,
            params,
            model,
            catalog: Arc::new(catalog),
            explainer: ExplanationGenerator::standard(),
        })
    }

    /// The single exposed operation: score, rank, and explain every catalog
    /// item for one customer. Pure compute over immutable shared state; a
    /// failure for one customer cannot corrupt another's request.
    pub fn recommendations(
        &self,
        raw: &RawCustomerRecord,
    ) -> Result<Vec<RankedRecommendation>, DomainError> {
        let features = extract(raw);
        let vector = normalize(&features, &self.schema, &self.params);
        let scores = self.model.predict(&vector);
        let ranked = rank(&self.catalog, &scores)?;

        Ok(ranked
            .into_iter()
            .map(|scored| RankedRecommendation {
                rank: scored.rank,
                product_name: scored.product.name.clone(),
                score: scored.score,
                price: scored.product.price,
                explanation: self.explainer.explain(&features, scored.product),
            })
            .collect())
    }

    pub fn catalog(&self) -> &[Product] {
        &self.catalog
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::model::tests::passthrough_model;

    fn test_params(schema: &FeatureSchema) -> NormalizationParameters {
        NormalizationParameters {
            feature_names: schema.continuous().to_vec(),
            min: vec![0.0; schema.continuous().len()],
            max: vec![100.0; schema.continuous().len()],
        }
    }

    fn test_catalog(size: usize) -> Vec<Product> {
        (0..size)
            .map(|i| Product {
                name: format!("Product {i}"),
                features: vec![],
                price: Decimal::new(1000 + i as i64, 2),
            })
            .collect()
    }

    #[test]
    fn empty_catalog_is_rejected_at_construction() {
        let schema = FeatureSchema::telemetry_v1();
        let params = test_params(&schema);
        let model = Arc::new(passthrough_model(schema.input_width(), 2));

        let error = RecommendationEngine::new(schema, params, model, vec![]).unwrap_err();
        assert!(matches!(error, ApplicationError::Domain(DomainError::EmptyCatalog)));
    }

    #[test]
    fn model_output_must_cover_the_catalog() {
        let schema = FeatureSchema::telemetry_v1();
        let params = test_params(&schema);
        let model = Arc::new(passthrough_model(schema.input_width(), 2));

        let error = RecommendationEngine::new(schema, params, model, test_catalog(3)).unwrap_err();
        assert!(matches!(
            error,
            ApplicationError::Domain(DomainError::ScoreWidthMismatch { scores: 2, products: 3 })
        ));
    }

    #[test]
    fn model_input_must_match_schema_width() {
        let schema = FeatureSchema::telemetry_v1();
        let params = test_params(&schema);
        let model = Arc::new(passthrough_model(schema.input_width() + 1, 2));

        let error = RecommendationEngine::new(schema, params, model, test_catalog(2)).unwrap_err();
        assert!(matches!(
            error,
            ApplicationError::Domain(DomainError::InputWidthMismatch { .. })
        ));
    }

    #[test]
    fn every_catalog_item_is_ranked_and_explained() {
        let schema = FeatureSchema::telemetry_v1();
        let params = test_params(&schema);
        let model = Arc::new(passthrough_model(schema.input_width(), 4));
        let engine =
            RecommendationEngine::new(schema, params, model, test_catalog(4)).expect("engine");

        let recommendations =
            engine.recommendations(&RawCustomerRecord::default()).expect("recommendations");

        assert_eq!(recommendations.len(), 4);
        let mut ranks: Vec<u32> = recommendations.iter().map(|r| r.rank).collect();
        ranks.sort_unstable();
        assert_eq!(ranks, [1, 2, 3, 4]);
        assert!(recommendations.iter().all(|r| !r.explanation.is_empty()));
    }
}
