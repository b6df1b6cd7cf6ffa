//! Fashion Recommender — similarity-weighted product recommendations from a
//! user/product rating export.
//!
//! Loads the dataset, builds the interaction and similarity matrices once,
//! then answers a single query and prints the result tables.

mod render;

use clap::{Parser, Subcommand};
use fashion_core::config::{AppConfig, ScoringMode};
use fashion_core::types::RecommendationQuery;
use fashion_core::RecommendResult;
use fashion_recommend::{CsvRatingSource, RatingStore, RecommenderEngine, RecommenderSettings};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "fashion-recommender")]
#[command(about = "Similarity-weighted fashion product recommendations")]
#[command(version)]
struct Cli {
    /// Rating dataset CSV (overrides config)
    #[arg(long, env = "FASHION_RECOMMENDER__DATA__PATH")]
    data: Option<PathBuf>,

    /// Optional TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for display sampling (overrides config)
    #[arg(long, env = "FASHION_RECOMMENDER__RECOMMENDER__SEED")]
    seed: Option<u64>,

    /// Print JSON instead of tables
    #[arg(long, default_value_t = false)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Recommend products for a user
    Recommend {
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=1000))]
        user_id: u32,

        #[arg(long)]
        product_name: String,

        #[arg(long)]
        category: String,

        /// Ranked candidate count before filtering (overrides config)
        #[arg(long)]
        limit: Option<usize>,

        /// Maximum products shown (overrides config)
        #[arg(long)]
        max_display: Option<usize>,

        /// Rank nearest items first instead of the literal distance-weighted order
        #[arg(long, default_value_t = false)]
        similarity_ranked: bool,
    },
    /// List selectable product names and categories
    Options,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fashion_recommender=info,fashion_recommend=info".into()),
        )
        .with_writer(std::io::stderr)
        .json()
        .init();

    let cli = Cli::parse();

    let config = resolve_config(&cli)?;

    info!(
        data = %config.data.path.display(),
        candidate_limit = config.recommender.candidate_limit,
        max_display = config.recommender.max_display,
        scoring_mode = ?config.recommender.scoring_mode,
        "Configuration loaded"
    );

    // Missing or malformed data is fatal before any query is served
    let store = RatingStore::load(&CsvRatingSource::new(&config.data.path))?;
    let engine = RecommenderEngine::build(store, RecommenderSettings::from(&config.recommender));

    match cli.command {
        Command::Options => {
            let (names, categories) = engine.options();
            if cli.json {
                let payload = serde_json::json!({
                    "product_names": names,
                    "categories": categories,
                });
                println!("{}", serde_json::to_string_pretty(&payload)?);
            } else {
                print!("{}", render::options(names, categories));
            }
        }
        Command::Recommend {
            user_id,
            product_name,
            category,
            ..
        } => {
            let (names, categories) = engine.options();
            if !names.contains(&product_name) {
                warn!(product_name = %product_name, "Product name not present in dataset");
            }
            if !categories.contains(&category) {
                warn!(category = %category, "Category not present in dataset");
            }

            let mut rng = match config.recommender.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };

            let query = RecommendationQuery::new(user_id, product_name, category);
            match engine.recommend(&query, &mut rng) {
                Ok(response) => {
                    if cli.json {
                        println!("{}", serde_json::to_string_pretty(&response)?);
                    } else {
                        print!("{}", render::response(&response));
                    }
                }
                Err(e) if e.is_recoverable() => {
                    warn!(user_id, error = %e, "Query rejected");
                    eprintln!("{}", e);
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    Ok(())
}

/// Config file and environment, then CLI overrides, then validation. A bad
/// file, unparseable value or out-of-range limit stops the run.
fn resolve_config(cli: &Cli) -> RecommendResult<AppConfig> {
    let mut config = AppConfig::load(cli.config.as_deref())?;

    // Apply CLI overrides
    if let Some(path) = &cli.data {
        config.data.path = path.clone();
    }
    if let Some(seed) = cli.seed {
        config.recommender.seed = Some(seed);
    }
    if let Command::Recommend {
        limit,
        max_display,
        similarity_ranked,
        ..
    } = &cli.command
    {
        if let Some(limit) = limit {
            config.recommender.candidate_limit = *limit;
        }
        if let Some(max_display) = max_display {
            config.recommender.max_display = *max_display;
        }
        if *similarity_ranked {
            config.recommender.scoring_mode = ScoringMode::SimilarityRanked;
        }
    }
    config.validate()?;
    Ok(config)
}
