//! Error types and HTTP response handling.
//!
//! This module provides the application's error hierarchy and conversion logic for
//! transforming errors into HTTP responses. `AppError` is the top-level error type that
//! wraps domain-specific errors and implements `IntoResponse` so handlers can use `?`.
//!
//! Error responses never log on their own. Each one carries an [`ErrorReport`] in its
//! extensions which the terminal error handler (`middleware::error`) logs and, outside
//! production, exposes to the client as `message`.

pub mod config;
pub mod weather;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    model::api::ErrorDto,
    server::error::{config::ConfigError, weather::WeatherError},
};

/// Client-facing text for every unexpected failure.
pub const INTERNAL_SERVER_ERROR: &str = "Internal server error";

/// Top-level application error type.
///
/// Aggregates all possible error types that can occur in the application and provides
/// automatic conversion to HTTP responses. Most variants use `#[from]` for automatic
/// error conversion. `WeatherError` handles its own response mapping, while generic
/// variants provide standard HTTP status codes.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    ///
    /// Aborts startup; at request time it results in 500 Internal Server Error.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Weather gateway error.
    ///
    /// Delegates to `WeatherError::into_response()` for its client-facing message.
    #[error(transparent)]
    WeatherErr(#[from] WeatherError),

    /// Database operation error from SeaORM.
    ///
    /// Results in 500 Internal Server Error with error details logged server-side.
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),

    /// No database connection is available yet, or it was lost.
    ///
    /// Results in 500 Internal Server Error.
    #[error("Database is unavailable ({0})")]
    DatabaseUnavailable(String),

    /// Session store operation error.
    ///
    /// Results in 500 Internal Server Error as session failures prevent
    /// authentication and state management.
    #[error(transparent)]
    SessionErr(#[from] tower_sessions::session::Error),

    /// HTTP client error from reqwest outside the weather gateway.
    #[error(transparent)]
    ReqwestErr(#[from] reqwest::Error),

    /// Cron scheduler error.
    #[error(transparent)]
    SchedulerErr(#[from] tokio_cron_scheduler::JobSchedulerError),

    /// Socket or listener error while serving.
    #[error(transparent)]
    IoErr(#[from] std::io::Error),
}

/// Details of a failed request, attached to the error response's extensions.
///
/// # Fields
/// - `error` - The client-facing error text already present in the body
/// - `detail` - The underlying fault, for logging and non-production responses
#[derive(Clone, Debug)]
pub struct ErrorReport {
    pub error: String,
    pub detail: String,
}

/// Builds a JSON error response carrying an [`ErrorReport`].
///
/// # Arguments
/// - `status` - HTTP status of the response
/// - `error` - Client-facing error text
/// - `detail` - Underlying fault description
///
/// # Returns
/// A response with body `{"error": error}` and the report in its extensions
pub fn error_response(
    status: StatusCode,
    error: impl Into<String>,
    detail: impl Into<String>,
) -> Response {
    let error = error.into();
    let mut response = (status, Json(ErrorDto::new(error.clone()))).into_response();
    response.extensions_mut().insert(ErrorReport {
        error,
        detail: detail.into(),
    });
    response
}

/// Converts application errors into HTTP responses.
///
/// # Returns
/// - Variable - For `WeatherErr`, delegated to `WeatherError::into_response()`
/// - 500 Internal Server Error - For all other error types
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            Self::WeatherErr(err) => err.into_response(),
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Wrapper type for converting any displayable error into a 500 Internal Server Error response.
///
/// The client only ever sees the generic "Internal server error" text in `error`; the
/// wrapped error's message travels in the [`ErrorReport`].
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            INTERNAL_SERVER_ERROR,
            self.0.to_string(),
        )
    }
}
