use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{RecommendError, RecommendResult};

/// Root application configuration. Loaded from an optional TOML file and
/// environment variables with the prefix `FASHION_RECOMMENDER__`.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub recommender: RecommenderConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_path")]
    pub path: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecommenderConfig {
    /// Size of the ranked candidate set before name/category filtering.
    #[serde(default = "default_candidate_limit")]
    pub candidate_limit: usize,
    /// Maximum number of products handed to the presentation sink.
    #[serde(default = "default_max_display")]
    pub max_display: usize,
    #[serde(default)]
    pub scoring_mode: ScoringMode,
    /// Fixed seed for the display sampler. Unset means OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Product names that switch filtering to the merged-pair fallback.
    #[serde(default = "default_merged_pair_names")]
    pub merged_pair_names: Vec<String>,
}

/// How raw distance-weighted scores are turned into a ranking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringMode {
    /// Highest distance-weighted score first. Because the matrix holds
    /// distances, this favors the least similar items.
    #[default]
    Literal,
    /// Lowest distance-weighted score first, i.e. nearest items.
    SimilarityRanked,
}

fn default_data_path() -> PathBuf {
    PathBuf::from("fashion_products.csv")
}
fn default_candidate_limit() -> usize {
    50
}
fn default_max_display() -> usize {
    10
}
fn default_merged_pair_names() -> Vec<String> {
    vec!["T-shirt".to_string(), "Jeans".to_string()]
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: default_data_path(),
        }
    }
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            candidate_limit: default_candidate_limit(),
            max_display: default_max_display(),
            scoring_mode: ScoringMode::default(),
            seed: None,
            merged_pair_names: default_merged_pair_names(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data: DataConfig::default(),
            recommender: RecommenderConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and an optional config file.
    /// Any read, parse or validation failure is returned to the caller.
    pub fn load(file: Option<&Path>) -> RecommendResult<Self> {
        Self::load_with_env(file, None)
    }

    /// Same as [`AppConfig::load`], reading `FASHION_RECOMMENDER__*` keys from
    /// `env` instead of the process environment when given.
    pub fn load_with_env(
        file: Option<&Path>,
        env: Option<HashMap<String, String>>,
    ) -> RecommendResult<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = file {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let config = builder
            .add_source(
                config::Environment::with_prefix("FASHION_RECOMMENDER")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("recommender.merged_pair_names")
                    .source(env),
            )
            .build()?;

        let loaded: AppConfig = config.try_deserialize()?;
        loaded.validate()?;
        Ok(loaded)
    }

    pub fn validate(&self) -> RecommendResult<()> {
        if self.recommender.candidate_limit == 0 {
            return Err(RecommendError::Config(
                "recommender.candidate_limit must be at least 1".to_string(),
            ));
        }
        if self.recommender.max_display == 0 {
            return Err(RecommendError::Config(
                "recommender.max_display must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
