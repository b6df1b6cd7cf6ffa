//! Similarity-weighted scoring, ranking, and candidate filtering for a
//! single user.

use crate::filter::{FilterMode, FilterTable};
use crate::matrix::InteractionMatrix;
use crate::similarity::SimilarityMatrix;
use crate::store::RatingStore;
use fashion_core::config::ScoringMode;
use fashion_core::types::{ProductId, RatingRecord, RecommendationQuery, UserId};
use fashion_core::RecommendResult;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredItem {
    pub product_id: ProductId,
    pub score: f64,
}

pub struct Recommender {
    limit: usize,
    scoring_mode: ScoringMode,
    filters: FilterTable,
}

impl Recommender {
    pub fn new(limit: usize, scoring_mode: ScoringMode, filters: FilterTable) -> Self {
        Self {
            limit,
            scoring_mode,
            filters,
        }
    }

    pub fn scoring_mode(&self) -> ScoringMode {
        self.scoring_mode
    }

    pub fn filter_mode(&self, query: &RecommendationQuery) -> FilterMode {
        self.filters.mode_for(&query.product_name, &query.category)
    }

    /// Raw score for every product, in column order.
    pub fn score(
        &self,
        user_id: UserId,
        matrix: &InteractionMatrix,
        similarity: &SimilarityMatrix,
    ) -> RecommendResult<Vec<ScoredItem>> {
        let row = matrix.row_for(user_id)?;
        let scores = similarity.weighted_scores(row);
        Ok(matrix
            .column_order()
            .iter()
            .zip(scores.iter())
            .map(|(product_id, &score)| ScoredItem {
                product_id: product_id.clone(),
                score,
            })
            .collect())
    }

    /// Top `limit` items. Equal scores keep column order.
    pub fn rank(&self, mut scored: Vec<ScoredItem>) -> Vec<ScoredItem> {
        match self.scoring_mode {
            ScoringMode::Literal => scored.sort_by(|a, b| b.score.total_cmp(&a.score)),
            ScoringMode::SimilarityRanked => scored.sort_by(|a, b| a.score.total_cmp(&b.score)),
        }
        scored.truncate(self.limit);
        scored
    }

    /// Ranked candidate ids for the user, best first.
    pub fn candidates(
        &self,
        user_id: UserId,
        matrix: &InteractionMatrix,
        similarity: &SimilarityMatrix,
    ) -> RecommendResult<Vec<ProductId>> {
        let ranked = self.rank(self.score(user_id, matrix, similarity)?);
        Ok(ranked.into_iter().map(|item| item.product_id).collect())
    }

    /// Score, rank, and filter. An empty result is not an error.
    pub fn recommend(
        &self,
        query: &RecommendationQuery,
        store: &RatingStore,
        matrix: &InteractionMatrix,
        similarity: &SimilarityMatrix,
    ) -> RecommendResult<Vec<RatingRecord>> {
        let candidates = self.candidates(query.user_id, matrix, similarity)?;
        let mode = self.filter_mode(query);
        let records = mode.apply(&candidates, store, self.limit);

        debug!(
            user_id = query.user_id,
            candidates = candidates.len(),
            matched = records.len(),
            filter = ?mode,
            "Filtered ranked candidates"
        );
        Ok(records)
    }
}

impl Default for Recommender {
    fn default() -> Self {
        Self::new(50, ScoringMode::Literal, FilterTable::default())
    }
}
