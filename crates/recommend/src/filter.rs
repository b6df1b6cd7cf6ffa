//! Name/category filtering of ranked candidates.

use crate::store::RatingStore;
use fashion_core::types::{ProductId, RatingRecord};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// How a query's product name and category narrow the result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum FilterMode {
    /// Keep candidate records whose name and category both match.
    ExactMatch {
        product_name: String,
        category: String,
    },
    /// Ignore the candidate set and draw each listed name in `category`
    /// straight from the store, an equal share of the limit per name.
    MergedPair {
        names: Vec<String>,
        category: String,
    },
}

/// Maps requested product names to a filter mode.
#[derive(Debug, Clone)]
pub struct FilterTable {
    merged_pair_names: Vec<String>,
}

impl FilterTable {
    pub fn new(merged_pair_names: Vec<String>) -> Self {
        Self { merged_pair_names }
    }

    pub fn mode_for(&self, product_name: &str, category: &str) -> FilterMode {
        if self.merged_pair_names.iter().any(|n| n == product_name) {
            FilterMode::MergedPair {
                names: self.merged_pair_names.clone(),
                category: category.to_string(),
            }
        } else {
            FilterMode::ExactMatch {
                product_name: product_name.to_string(),
                category: category.to_string(),
            }
        }
    }
}

impl Default for FilterTable {
    fn default() -> Self {
        Self::new(vec!["T-shirt".to_string(), "Jeans".to_string()])
    }
}

impl FilterMode {
    /// `candidates` is in rank order. Exact matches come back in rank
    /// order, records of the same product in dataset order.
    pub fn apply(
        &self,
        candidates: &[ProductId],
        store: &RatingStore,
        limit: usize,
    ) -> Vec<RatingRecord> {
        match self {
            FilterMode::ExactMatch {
                product_name,
                category,
            } => {
                let rank: HashMap<&str, usize> = candidates
                    .iter()
                    .enumerate()
                    .map(|(i, id)| (id.as_str(), i))
                    .collect();

                let mut matched: Vec<(usize, &RatingRecord)> = store
                    .records_matching(product_name, category)
                    .filter_map(|r| rank.get(r.product_id.as_str()).map(|&i| (i, r)))
                    .collect();
                matched.sort_by_key(|(i, _)| *i);
                matched.into_iter().map(|(_, r)| r.clone()).collect()
            }
            FilterMode::MergedPair { names, category } => {
                let share = if names.is_empty() { 0 } else { limit / names.len() };
                names
                    .iter()
                    .flat_map(|name| store.records_matching(name, category).take(share))
                    .cloned()
                    .collect()
            }
        }
    }
}
