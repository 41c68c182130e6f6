use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::server::{error::AppError, service::weather::WeatherService, state::AppState};

/// Query of `GET /api/weather`, forwarded to the upstream as received.
#[derive(Debug, Deserialize)]
pub struct WeatherQuery {
    pub lat: Option<String>,
    pub lon: Option<String>,
}

/// GET /api/weather - Current weather for a coordinate pair
///
/// `lat` and `lon` are passed through verbatim; the upstream decides whether they
/// are acceptable.
///
/// # Query Parameters
/// - `lat`: Latitude
/// - `lon`: Longitude
///
/// # Returns
/// - `200 OK`: The upstream JSON body, unchanged
/// - `500 Internal Server Error`: No API key configured, or the upstream call failed
///   (including upstream rejection of the coordinates)
pub async fn get_weather(
    State(state): State<AppState>,
    Query(query): Query<WeatherQuery>,
) -> Result<impl IntoResponse, AppError> {
    let weather_service = WeatherService::new(&state.http_client, &state.config.weather);
    let weather = weather_service
        .current(query.lat.as_deref(), query.lon.as_deref())
        .await?;

    Ok((StatusCode::OK, Json(weather)))
}
