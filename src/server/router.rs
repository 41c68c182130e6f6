use axum::{extract::DefaultBodyLimit, middleware, routing::get, Router};
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

use crate::server::{
    controller::{
        fallback::not_found,
        health::{health, ready},
        weather::get_weather,
    },
    middleware::{
        error::{error_handler, panic_response},
        session::issue_session,
    },
    startup,
    state::AppState,
};

/// Largest accepted request body.
const BODY_LIMIT: usize = 1024 * 1024;

/// Routers mounted under the collaborator prefixes.
///
/// Each router is nested as-is, so its routes are relative to the prefix and share
/// [`AppState`] and the request session with the built-in endpoints.
#[derive(Default)]
pub struct RouteCollaborators {
    /// Mounted at `/api/auth`.
    pub auth: Router<AppState>,
    /// Mounted at `/api/sessions`.
    pub sessions: Router<AppState>,
    /// Mounted at `/api/onboarding`.
    pub onboarding: Router<AppState>,
    /// Mounted at `/api/leaderboard`.
    pub leaderboard: Router<AppState>,
    /// Mounted at `/api/progress`.
    pub progress: Router<AppState>,
}

/// Builds the complete application router.
///
/// Layers, innermost first: panic recovery, the terminal error handler, session
/// issuing, the session layer, CORS (production only), the body limit and request
/// tracing.
pub fn router(state: AppState, collaborators: RouteCollaborators) -> Router {
    let mut app = Router::new()
        .route("/api/health", get(health))
        .route("/api/ready", get(ready))
        .route("/api/weather", get(get_weather))
        .nest("/api/auth", collaborators.auth)
        .nest("/api/sessions", collaborators.sessions)
        .nest("/api/onboarding", collaborators.onboarding)
        .nest("/api/leaderboard", collaborators.leaderboard)
        .nest("/api/progress", collaborators.progress)
        .fallback(not_found)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(middleware::from_fn_with_state(state.clone(), error_handler))
        .layer(middleware::from_fn_with_state(state.clone(), issue_session))
        .layer(startup::connect_to_session(
            &state.config.session,
            &state.db,
        ));

    if let Some(cors) = &state.config.cors {
        app = app.layer(startup::cors_layer(cors));
    }

    app.layer(DefaultBodyLimit::max(BODY_LIMIT))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
