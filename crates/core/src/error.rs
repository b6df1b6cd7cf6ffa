use thiserror::Error;

pub type RecommendResult<T> = Result<T, RecommendError>;

#[derive(Error, Debug)]
pub enum RecommendError {
    #[error("Rating data unavailable: {0}")]
    DataUnavailable(String),

    #[error("Unknown user: {0}")]
    UnknownUser(u32),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl RecommendError {
    /// Whether the caller can keep serving queries after this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, RecommendError::UnknownUser(_))
    }
}

impl From<config::ConfigError> for RecommendError {
    fn from(err: config::ConfigError) -> Self {
        RecommendError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_user_is_recoverable() {
        assert!(RecommendError::UnknownUser(42).is_recoverable());
        assert!(!RecommendError::DataUnavailable("missing".into()).is_recoverable());
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(RecommendError::UnknownUser(7).to_string(), "Unknown user: 7");
        assert_eq!(
            RecommendError::DataUnavailable("no rows".into()).to_string(),
            "Rating data unavailable: no rows"
        );
    }

    #[test]
    fn test_config_error_conversion() {
        let err: RecommendError = config::ConfigError::NotFound("recommender".into()).into();
        assert!(matches!(err, RecommendError::Config(_)));
        assert!(!err.is_recoverable());
    }
}
