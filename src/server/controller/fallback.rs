use axum::{http::StatusCode, response::IntoResponse, Json};

use crate::model::api::ErrorDto;

/// Fallback for every unmatched route.
///
/// # Returns
/// - `404 Not Found`: ErrorDto with `error` "Route not found"
pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorDto::with_message(
            "Route not found",
            "This is an API-only server. The frontend is served separately.",
        )),
    )
}
