#[derive(thiserror::Error, Debug)]
pub enum OverstatsError {
    #[error("Player ID is required")]
    MissingPlayerId,
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// Non-success status from the remote API. The message is either the
    /// body's `message` field or the endpoint's fallback text.
    #[error("{message}")]
    Api { status: u16, message: String },
}

impl OverstatsError {
    /// Upstream HTTP status, if the remote API answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            OverstatsError::Api { status, .. } => Some(*status),
            OverstatsError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
