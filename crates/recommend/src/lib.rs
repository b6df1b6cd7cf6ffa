//! Fashion product recommendation core — rating store, interaction and
//! similarity matrices, similarity-weighted scoring, and display sampling.

pub mod engine;
pub mod filter;
pub mod matrix;
pub mod recommender;
pub mod selector;
pub mod similarity;
pub mod store;

pub use engine::{RecommendationResponse, RecommenderEngine, RecommenderSettings};
pub use filter::FilterMode;
pub use matrix::InteractionMatrix;
pub use recommender::{Recommender, ScoredItem};
pub use selector::ResultSelector;
pub use similarity::SimilarityMatrix;
pub use store::{CsvRatingSource, RatingSource, RatingStore};
