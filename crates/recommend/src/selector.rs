//! Bounds the filtered record set to a display-sized list of product ids.

use fashion_core::types::{ProductId, RatingRecord};
use rand::Rng;
use std::collections::HashSet;

#[derive(Debug, Clone, Copy)]
pub struct ResultSelector {
    max_display: usize,
}

impl ResultSelector {
    pub fn new(max_display: usize) -> Self {
        Self { max_display }
    }

    /// Distinct product ids from `records`. More than `max_display` of them
    /// are sampled uniformly without replacement using `rng`; otherwise all
    /// are returned in first-occurrence order.
    pub fn select<R: Rng + ?Sized>(&self, records: &[RatingRecord], rng: &mut R) -> Vec<ProductId> {
        let mut seen = HashSet::new();
        let distinct: Vec<&ProductId> = records
            .iter()
            .map(|r| &r.product_id)
            .filter(|id| seen.insert(*id))
            .collect();

        if distinct.len() <= self.max_display {
            return distinct.into_iter().cloned().collect();
        }

        rand::seq::index::sample(rng, distinct.len(), self.max_display)
            .into_iter()
            .map(|i| distinct[i].clone())
            .collect()
    }
}

impl Default for ResultSelector {
    fn default() -> Self {
        Self::new(10)
    }
}
