/// Client-specific result type
pub type Result<T> = std::result::Result<T, StudioClientError>;

/// Errors from the studio client
#[derive(Debug, thiserror::Error)]
pub enum StudioClientError {
    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server returned a non-success response
    #[error("{status}: {}", .detail.as_deref().unwrap_or("no detail"))]
    Api {
        /// HTTP status code
        status: u16,
        /// Human-readable `detail` from the response body, when present
        detail: Option<String>,
    },

    /// Invalid configuration
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl StudioClientError {
    /// Server-provided detail text, if the error carried one
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Api { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }
}
