use thiserror::Error;

/// Failures talking to, or interpreting, the upstream weather provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Weather API key not configured")]
    MissingApiKey,

    #[error("Invalid coordinates: latitude must be -90 to 90, longitude must be -180 to 180")]
    InvalidCoordinates,

    #[error("Search query is empty")]
    EmptyQuery,

    #[error("Upstream request failed with status {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("Failed to reach weather provider: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to parse weather provider JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Weather provider response is missing {0}")]
    MalformedResponse(&'static str),
}

impl ProviderError {
    pub(crate) fn upstream(status: u16, body: &str) -> Self {
        Self::Upstream {
            status,
            body: truncate_body(body),
        }
    }

    /// HTTP status reported by the provider, if the failure came from one.
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            Self::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
