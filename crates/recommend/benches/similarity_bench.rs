//! Benchmarks for the matrix build and the per-query path.
//! Run with: cargo bench -p fashion-recommend

use fashion_core::types::{RatingRecord, RecommendationQuery};
use fashion_recommend::{RatingStore, RecommenderEngine, RecommenderSettings};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn synthetic_ratings(users: u32, products: u32, per_user: usize) -> Vec<RatingRecord> {
    let names = ["Dress", "Shoes", "T-shirt", "Jeans", "Sweater"];
    let categories = ["Men's Fashion", "Women's Fashion", "Kids' Fashion"];
    let mut rng = StdRng::seed_from_u64(42);
    let mut records = Vec::with_capacity(users as usize * per_user);
    for user in 1..=users {
        for _ in 0..per_user {
            let product = rng.gen_range(1..=products);
            records.push(
                RatingRecord::new(
                    user,
                    product.to_string(),
                    rng.gen_range(1.0..5.0),
                    names[(product % 5) as usize],
                    categories[(product % 3) as usize],
                )
                .with_attributes("Zara", "Black"),
            );
        }
    }
    records
}

fn main() {
    let records = synthetic_ratings(1000, 1000, 3);
    let store = RatingStore::load(&records).expect("synthetic data is valid");

    let start = std::time::Instant::now();
    let engine = RecommenderEngine::build(store, RecommenderSettings::default());
    let build = start.elapsed();

    let iterations = 1_000u32;
    let mut rng = StdRng::seed_from_u64(7);
    let start = std::time::Instant::now();
    for i in 0..iterations {
        let query = RecommendationQuery::new(i % 1000 + 1, "Dress", "Women's Fashion");
        let _ = engine.recommend(&query, &mut rng);
    }
    let elapsed = start.elapsed();

    println!("=== Recommender Benchmark ===");
    println!("Products:    {}", engine.matrix().product_count());
    println!("Users:       {}", engine.matrix().user_count());
    println!("Build time:  {:?}", build);
    println!("Iterations:  {}", iterations);
    println!("Per query:   {:?}", elapsed / iterations);
    println!("Throughput:  {:.0} queries/sec", iterations as f64 / elapsed.as_secs_f64());
}
