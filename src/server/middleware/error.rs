//! Terminal error handling.
//!
//! Every error response built by [`crate::server::error`] carries an [`ErrorReport`].
//! [`error_handler`] is the single place those reports are logged, and outside
//! production it exposes the underlying fault to the client as `message`. Panics are
//! turned into the same generic response by [`panic_response`], installed through
//! `tower_http::catch_panic::CatchPanicLayer` inside the error handler.

use std::any::Any;

use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::{
    model::api::ErrorDto,
    server::{
        error::{error_response, ErrorReport, INTERNAL_SERVER_ERROR},
        state::AppState,
    },
};

/// Logs failed requests and, in development, adds the fault detail to the body.
pub async fn error_handler(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let mut response = next.run(request).await;

    let Some(report) = response.extensions_mut().remove::<ErrorReport>() else {
        return response;
    };

    let status = response.status();
    if status.is_server_error() {
        tracing::error!(%method, %path, status = status.as_u16(), "{}", report.detail);
    } else {
        tracing::debug!(%method, %path, status = status.as_u16(), "{}", report.detail);
    }

    if state.config.environment.is_production() || report.detail == report.error {
        return response;
    }

    let mut exposed = (
        status,
        Json(ErrorDto::with_message(report.error, report.detail)),
    )
        .into_response();

    for (name, value) in response.headers() {
        if name != header::CONTENT_TYPE && name != header::CONTENT_LENGTH {
            exposed.headers_mut().append(name.clone(), value.clone());
        }
    }

    exposed
}

/// Converts a handler panic into a generic 500 response.
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response<Body> {
    let detail = if let Some(message) = err.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = err.downcast_ref::<&str>() {
        message.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    error_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        INTERNAL_SERVER_ERROR,
        format!("Handler panicked: {}", detail),
    )
}
