// JSON error responses
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::error;
use weather_core::ProviderError;

#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(message: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.to_string(),
        }
    }

    fn internal(message: &str) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.to_string(),
        }
    }

    /// Map a provider failure; `upstream_message` is what clients see when
    /// the provider itself answered with an error status.
    pub fn from_provider(err: ProviderError, upstream_message: &str) -> Self {
        match err {
            ProviderError::MissingApiKey => Self::internal("Weather API key not configured"),
            ProviderError::InvalidCoordinates => {
                Self::bad_request("Latitude and longitude are required")
            }
            ProviderError::EmptyQuery => Self::bad_request("Search query is required"),
            ProviderError::Upstream { status, ref body } => {
                error!(%status, %body, "{}", upstream_message);
                Self {
                    status: StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                    message: upstream_message.to_string(),
                }
            }
            other => {
                error!(error = %other, "weather provider error");
                Self::internal("Internal server error")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}
