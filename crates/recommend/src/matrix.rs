//! Dense user × product interaction matrix, zero-filled for unrated pairs.

use fashion_core::types::{ProductId, RatingRecord, UserId};
use fashion_core::{RecommendError, RecommendResult};
use ndarray::{Array2, ArrayView1};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Rows are users, columns are products. Both axes keep first-occurrence
/// order; the column order defines the indices used by ranking.
#[derive(Debug, Clone)]
pub struct InteractionMatrix {
    values: Array2<f64>,
    users: Vec<UserId>,
    products: Vec<ProductId>,
    user_index: HashMap<UserId, usize>,
    product_index: HashMap<ProductId, usize>,
    duplicate_ratings: usize,
}

impl InteractionMatrix {
    /// Build the matrix from ratings. A repeated (user, product) pair keeps
    /// the rating that appears last in `ratings`.
    ///
    /// Columns follow first occurrence in `ratings`, not ascending product id
    /// as a sorted pivot would give. Scores are unaffected; only the order of
    /// equal-score candidates depends on it.
    pub fn build(ratings: &[RatingRecord]) -> Self {
        let mut users = Vec::new();
        let mut products = Vec::new();
        let mut user_index = HashMap::new();
        let mut product_index = HashMap::new();

        for record in ratings {
            user_index.entry(record.user_id).or_insert_with(|| {
                users.push(record.user_id);
                users.len() - 1
            });
            product_index
                .entry(record.product_id.clone())
                .or_insert_with(|| {
                    products.push(record.product_id.clone());
                    products.len() - 1
                });
        }

        let mut values = Array2::<f64>::zeros((users.len(), products.len()));
        let mut filled = HashSet::new();
        let mut duplicate_ratings = 0usize;
        for record in ratings {
            let cell = (user_index[&record.user_id], product_index[&record.product_id]);
            if !filled.insert(cell) {
                duplicate_ratings += 1;
            }
            values[[cell.0, cell.1]] = record.rating;
        }

        debug!(
            users = users.len(),
            products = products.len(),
            duplicate_ratings,
            "Interaction matrix built"
        );

        Self {
            values,
            users,
            products,
            user_index,
            product_index,
            duplicate_ratings,
        }
    }

    /// The user's ratings aligned with `column_order()`.
    pub fn row_for(&self, user_id: UserId) -> RecommendResult<ArrayView1<'_, f64>> {
        let row = self
            .user_index
            .get(&user_id)
            .ok_or(RecommendError::UnknownUser(user_id))?;
        Ok(self.values.row(*row))
    }

    pub fn column_order(&self) -> &[ProductId] {
        &self.products
    }

    pub fn row_order(&self) -> &[UserId] {
        &self.users
    }

    pub fn column_index(&self, product_id: &str) -> Option<usize> {
        self.product_index.get(product_id).copied()
    }

    /// Ratings that replaced an earlier rating of the same pair.
    pub fn duplicate_ratings(&self) -> usize {
        self.duplicate_ratings
    }

    /// Rating of one pair; 0 for an unrated pair, `None` for unknown ids.
    pub fn get(&self, user_id: UserId, product_id: &str) -> Option<f64> {
        let row = self.user_index.get(&user_id)?;
        let col = self.product_index.get(product_id)?;
        Some(self.values[[*row, *col]])
    }

    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    pub fn product_count(&self) -> usize {
        self.products.len()
    }
}
