//! Recommender engine — owns the rating store and the precomputed matrices,
//! and turns a query into the payload shown to the user.

use crate::filter::{FilterMode, FilterTable};
use crate::matrix::InteractionMatrix;
use crate::recommender::Recommender;
use crate::selector::ResultSelector;
use crate::similarity::SimilarityMatrix;
use crate::store::RatingStore;
use chrono::{DateTime, Utc};
use fashion_core::config::{RecommenderConfig, ScoringMode};
use fashion_core::types::{
    HistoryEntry, ProductId, ProductSummary, RatingRecord, RecommendationQuery, UserId,
};
use fashion_core::RecommendResult;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::time::Instant;
use tracing::{debug, info, warn};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct RecommenderSettings {
    pub candidate_limit: usize,
    pub max_display: usize,
    pub scoring_mode: ScoringMode,
    pub merged_pair_names: Vec<String>,
}

impl Default for RecommenderSettings {
    fn default() -> Self {
        Self::from(&RecommenderConfig::default())
    }
}

impl From<&RecommenderConfig> for RecommenderSettings {
    fn from(config: &RecommenderConfig) -> Self {
        Self {
            candidate_limit: config.candidate_limit,
            max_display: config.max_display,
            scoring_mode: config.scoring_mode,
            merged_pair_names: config.merged_pair_names.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationResponse {
    pub request_id: Uuid,
    pub user_id: UserId,
    pub product_name: String,
    pub category: String,
    pub filter_mode: FilterMode,
    pub scoring_mode: ScoringMode,
    /// Distinct products that survived filtering, before sampling.
    pub candidate_count: usize,
    pub products: Vec<ProductSummary>,
    pub history: Vec<HistoryEntry>,
    pub generated_at: DateTime<Utc>,
}

/// Built once at startup, then read-only. Share it behind an `Arc`.
pub struct RecommenderEngine {
    store: RatingStore,
    matrix: InteractionMatrix,
    similarity: SimilarityMatrix,
    recommender: Recommender,
    selector: ResultSelector,
}

impl RecommenderEngine {
    pub fn build(store: RatingStore, settings: RecommenderSettings) -> Self {
        let start = Instant::now();
        let matrix = InteractionMatrix::build(store.records());
        let similarity = SimilarityMatrix::compute(&matrix);

        info!(
            users = matrix.user_count(),
            products = matrix.product_count(),
            scoring_mode = ?settings.scoring_mode,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Recommender engine ready"
        );

        Self {
            recommender: Recommender::new(
                settings.candidate_limit,
                settings.scoring_mode,
                FilterTable::new(settings.merged_pair_names),
            ),
            selector: ResultSelector::new(settings.max_display),
            store,
            matrix,
            similarity,
        }
    }

    pub fn store(&self) -> &RatingStore {
        &self.store
    }

    pub fn matrix(&self) -> &InteractionMatrix {
        &self.matrix
    }

    pub fn similarity(&self) -> &SimilarityMatrix {
        &self.similarity
    }

    /// Selectable product names and categories, in dataset order.
    pub fn options(&self) -> (&[String], &[String]) {
        (
            self.store.distinct_product_names(),
            self.store.distinct_categories(),
        )
    }

    /// Filtered records before display sampling. Deterministic.
    pub fn candidates(&self, query: &RecommendationQuery) -> RecommendResult<Vec<RatingRecord>> {
        self.recommender
            .recommend(query, &self.store, &self.matrix, &self.similarity)
    }

    /// Full query: rank, filter, sample, and assemble the display payload.
    pub fn recommend<R: Rng + ?Sized>(
        &self,
        query: &RecommendationQuery,
        rng: &mut R,
    ) -> RecommendResult<RecommendationResponse> {
        let records = self.candidates(query)?;
        let candidate_count = records
            .iter()
            .map(|r| &r.product_id)
            .collect::<HashSet<_>>()
            .len();
        let selected = self.selector.select(&records, rng);
        let products = self.summaries(&selected);
        let history = self.history(query.user_id);

        info!(
            user_id = query.user_id,
            product_name = %query.product_name,
            category = %query.category,
            candidates = candidate_count,
            shown = products.len(),
            history = history.len(),
            "Recommendations served"
        );

        Ok(RecommendationResponse {
            request_id: Uuid::new_v4(),
            user_id: query.user_id,
            product_name: query.product_name.clone(),
            category: query.category.clone(),
            filter_mode: self.recommender.filter_mode(query),
            scoring_mode: self.recommender.scoring_mode(),
            candidate_count,
            products,
            history,
            generated_at: Utc::now(),
        })
    }

    /// One row per selected product, taken from its first record in the
    /// store that has both brand and color, listed in dataset order.
    /// Products with no complete record are skipped.
    pub fn summaries(&self, selected: &[ProductId]) -> Vec<ProductSummary> {
        let mut wanted: HashMap<&str, bool> =
            selected.iter().map(|id| (id.as_str(), false)).collect();

        let mut rows = Vec::with_capacity(selected.len());
        for record in self.store.records() {
            let Some(done) = wanted.get_mut(record.product_id.as_str()) else {
                continue;
            };
            if *done {
                continue;
            }
            if let Some(row) = record.summary() {
                *done = true;
                rows.push(row);
            }
        }

        for (product_id, _) in wanted.iter().filter(|(_, done)| !**done) {
            warn!(
                product_id = %product_id,
                "Skipping recommended product with missing brand or color"
            );
        }

        debug!(selected = selected.len(), rows = rows.len(), "Product summaries built");
        rows
    }

    /// The user's rated products, deduplicated, in dataset order.
    pub fn history(&self, user_id: UserId) -> Vec<HistoryEntry> {
        let mut seen = HashSet::new();
        let mut entries = Vec::new();
        for record in self.store.records_for_user(user_id) {
            match record.history_entry() {
                Some(entry) => {
                    if seen.insert(entry.clone()) {
                        entries.push(entry);
                    }
                }
                None => warn!(
                    user_id,
                    product_id = %record.product_id,
                    "Skipping history record with missing brand or color"
                ),
            }
        }
        entries
    }
}
