use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("Failed to decode analysis payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Unsupported analysis limit: {0} (expected 10, 20, 50, 100, 200 or all)")]
    UnsupportedLimit(String),
}
