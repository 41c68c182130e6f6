//! Router-level tests driving the complete layer stack with `tower::ServiceExt::oneshot`.


use std::{collections::HashMap, sync::Arc};

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, Response},
    Router,
};
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait};
use serde_json::Value;
use test_utils::builder::TestBuilder;
use tower::ServiceExt;

use crate::server::{
    config::Config,
    database::Database,
    router::{router, RouteCollaborators},
    state::AppState,
};

/// Builds a configuration from the given variables only.
fn config(vars: &[(&str, &str)]) -> Config {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect();

    Config::from_lookup(|name| vars.get(name).cloned()).unwrap()
}

/// Production configuration with a secret and a single allowed origin.
fn production_config() -> Config {
    config(&[
        ("NODE_ENV", "production"),
        ("SESSION_SECRET", "production-secret"),
        ("FRONTEND_ORIGIN", "https://app.example.com"),
    ])
}

async fn session_database() -> DatabaseConnection {
    TestBuilder::new()
        .with_session_table()
        .build()
        .await
        .unwrap()
        .into_database()
        .await
        .unwrap()
}

/// State with a connected in-memory database.
async fn connected_state(config: Config) -> AppState {
    AppState::new(
        Arc::new(config),
        Database::with_connection(session_database().await),
        reqwest::Client::new(),
    )
}

/// State whose database never connected.
fn disconnected_state(config: Config) -> AppState {
    AppState::new(Arc::new(config), Database::new(), reqwest::Client::new())
}

fn app(state: AppState) -> Router {
    router(state, RouteCollaborators::default())
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

async fn json_body(response: Response<Body>) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Returns the `Set-Cookie` header of the session cookie, if any.
fn session_cookie<B>(response: &Response<B>) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find(|value| value.starts_with("sid="))
        .map(str::to_string)
}

/// Turns a `Set-Cookie` value into the matching `Cookie` request header value.
fn cookie_pair(set_cookie: &str) -> String {
    set_cookie
        .split(';')
        .next()
        .unwrap_or_default()
        .to_string()
}

/// Number of persisted session rows.
async fn session_rows(database: &Database) -> u64 {
    entity::prelude::Session::find()
        .count(database.require().unwrap())
        .await
        .unwrap()
}
