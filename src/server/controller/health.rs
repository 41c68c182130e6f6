use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::Utc;

use crate::{
    model::api::{HealthDto, ReadinessDto},
    server::state::AppState,
};

/// GET /api/health - Liveness check
///
/// Answers as long as the process serves requests. The database is not consulted;
/// its last known lifecycle state is reported for information only.
///
/// # Returns
/// - `200 OK`: HealthDto with `status` "OK"
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let health = HealthDto {
        status: "OK".to_string(),
        message: "Server is running".to_string(),
        timestamp: Utc::now(),
        database: state.db.status().label().to_string(),
    };

    (StatusCode::OK, Json(health))
}

/// GET /api/ready - Readiness check
///
/// # Returns
/// - `200 OK`: The database is connected and answered a ping
/// - `503 Service Unavailable`: ReadinessDto with `status` "degraded" and the database state
pub async fn ready(State(state): State<AppState>) -> impl IntoResponse {
    let status = state.db.status();

    let database = if !status.is_connected() {
        status.label()
    } else if let Err(err) = state.db.ping().await {
        tracing::warn!("Readiness ping failed: {}", err);
        "unavailable"
    } else {
        let ready = ReadinessDto {
            status: "ready".to_string(),
            database: status.label().to_string(),
        };
        return (StatusCode::OK, Json(ready));
    };

    let degraded = ReadinessDto {
        status: "degraded".to_string(),
        database: database.to_string(),
    };

    (StatusCode::SERVICE_UNAVAILABLE, Json(degraded))
}
