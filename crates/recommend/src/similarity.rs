//! Item-item distance matrix over interaction-matrix columns.

use crate::matrix::InteractionMatrix;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
use std::time::Instant;
use tracing::info;

/// Square matrix of pairwise Euclidean distances between product columns.
/// Lower means more similar; the diagonal is zero.
#[derive(Debug, Clone)]
pub struct SimilarityMatrix {
    distances: Array2<f64>,
}

impl SimilarityMatrix {
    /// O(P² × U). Computed once per matrix build and never updated.
    pub fn compute(matrix: &InteractionMatrix) -> Self {
        let start = Instant::now();
        let values = matrix.values();
        let products = values.ncols();
        let mut distances = Array2::<f64>::zeros((products, products));

        for i in 0..products {
            let col_i = values.column(i);
            for j in (i + 1)..products {
                let d = euclidean(col_i, values.column(j));
                distances[[i, j]] = d;
                distances[[j, i]] = d;
            }
        }

        info!(
            products,
            users = values.nrows(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Similarity matrix computed"
        );

        Self { distances }
    }

    /// score[i] = Σⱼ distance[i][j] × row[j]
    pub fn weighted_scores(&self, row: ArrayView1<'_, f64>) -> Array1<f64> {
        self.distances.dot(&row)
    }

    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        self.distances.get([i, j]).copied()
    }

    pub fn view(&self) -> ArrayView2<'_, f64> {
        self.distances.view()
    }

    pub fn len(&self) -> usize {
        self.distances.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }
}

fn euclidean(a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use fashion_core::types::RatingRecord;

    #[test]
    fn test_distance_between_two_products() {
        let ratings = vec![
            RatingRecord::new(1, "A", 5.0, "Dress", "Casual"),
            RatingRecord::new(1, "B", 1.0, "Shoes", "Casual"),
            RatingRecord::new(2, "A", 1.0, "Dress", "Casual"),
            RatingRecord::new(2, "B", 5.0, "Shoes", "Casual"),
        ];
        let similarity = SimilarityMatrix::compute(&InteractionMatrix::build(&ratings));
        let d = similarity.get(0, 1).unwrap();
        assert!((d - 32f64.sqrt()).abs() < 1e-12);
        assert!((d - 5.657).abs() < 1e-3);
    }

    #[test]
    fn test_symmetric_with_zero_diagonal() {
        let ratings = vec![
            RatingRecord::new(1, "A", 4.2, "Dress", "Casual"),
            RatingRecord::new(1, "C", 1.3, "Jeans", "Casual"),
            RatingRecord::new(2, "B", 3.0, "Shoes", "Formal"),
            RatingRecord::new(3, "A", 2.2, "Dress", "Casual"),
            RatingRecord::new(3, "B", 0.5, "Shoes", "Formal"),
            RatingRecord::new(4, "D", 4.9, "Sweater", "Casual"),
        ];
        let similarity = SimilarityMatrix::compute(&InteractionMatrix::build(&ratings));
        assert_eq!(similarity.len(), 4);
        for i in 0..4 {
            assert_eq!(similarity.get(i, i), Some(0.0));
            for j in 0..4 {
                assert_eq!(similarity.get(i, j), similarity.get(j, i));
                assert!(similarity.get(i, j).unwrap() >= 0.0);
            }
        }
    }

    #[test]
    fn test_weighted_scores() {
        let ratings = vec![
            RatingRecord::new(1, "A", 5.0, "Dress", "Casual"),
            RatingRecord::new(1, "B", 1.0, "Shoes", "Casual"),
            RatingRecord::new(2, "A", 1.0, "Dress", "Casual"),
            RatingRecord::new(2, "B", 5.0, "Shoes", "Casual"),
        ];
        let matrix = InteractionMatrix::build(&ratings);
        let similarity = SimilarityMatrix::compute(&matrix);
        let scores = similarity.weighted_scores(matrix.row_for(1).unwrap());
        let d = 32f64.sqrt();
        // [0, d] · [5, 1] and [d, 0] · [5, 1]
        assert!((scores[0] - d).abs() < 1e-12);
        assert!((scores[1] - 5.0 * d).abs() < 1e-12);
    }

    #[test]
    fn test_empty_matrix() {
        let similarity = SimilarityMatrix::compute(&InteractionMatrix::build(&[]));
        assert!(similarity.is_empty());
        assert_eq!(similarity.len(), 0);
    }
}
