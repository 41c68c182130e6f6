use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::server::error::error_response;

#[derive(Error, Debug)]
pub enum WeatherError {
    /// `OPENWEATHER_API_KEY` is not configured.
    ///
    /// Checked before any outbound request is made.
    #[error("Weather API key is not configured")]
    MissingApiKey,

    /// The upstream call failed.
    ///
    /// Covers transport errors, non-success statuses and bodies that are not JSON.
    #[error("Weather upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),
}

/// Converts weather gateway errors into HTTP responses.
///
/// Both variants map to 500 Internal Server Error with a fixed client message; the
/// upstream failure detail only reaches the client outside production.
impl IntoResponse for WeatherError {
    fn into_response(self) -> Response {
        match self {
            Self::MissingApiKey => error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Weather API key not configured",
                self.to_string(),
            ),
            Self::Upstream(_) => error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to fetch weather data",
                self.to_string(),
            ),
        }
    }
}
