pub mod artifact;
pub mod config;
pub mod domain;
pub mod engine;
pub mod errors;
pub mod explain;
pub mod extract;
pub mod model;
pub mod normalize;
pub mod rank;
pub mod schema;

pub use artifact::{load_catalog, load_customers, load_model, load_normalization, ArtifactError};
pub use domain::customer::{CoverageSize, CustomerFeatures, RawCustomerRecord, Region};
pub use domain::product::Product;
pub use domain::recommendation::RankedRecommendation;
pub use engine::RecommendationEngine;
pub use errors::{ApplicationError, DomainError};
pub use explain::ExplanationGenerator;
pub use extract::extract;
pub use model::{MlpModel, ScoringModel};
pub use normalize::{normalize, NormalizationParameters, MIN_MAX_EPSILON};
pub use rank::{rank, ScoredProduct};
pub use schema::FeatureSchema;
