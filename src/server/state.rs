//! Application state shared across all request handlers.
//!
//! The state is initialized once during startup and then cloned for each request
//! handler through Axum's state extraction. It holds:
//! - The immutable configuration resolved at startup
//! - The database handle shared with the session store and the scheduler
//! - The HTTP client used by the weather gateway

use std::sync::Arc;

use crate::server::{config::Config, database::Database};

/// Application state containing shared resources and dependencies.
///
/// All fields are cheap to clone:
/// - `Arc<Config>` is a reference-counted pointer
/// - `Database` shares its connection slot and status channel between clones
/// - `reqwest::Client` uses an `Arc` internally
#[derive(Clone)]
pub struct AppState {
    /// Configuration resolved from the environment at startup.
    pub config: Arc<Config>,

    /// Handle to the database connection.
    ///
    /// The connection is attached by the background connector, so handlers must
    /// expect it to be absent while connecting or after a failed start.
    pub db: Database,

    /// HTTP client for outbound API requests.
    ///
    /// Configured without redirects. Used by the weather gateway.
    pub http_client: reqwest::Client,
}

impl AppState {
    /// Creates a new application state with the provided dependencies.
    ///
    /// # Arguments
    /// - `config` - Resolved application configuration
    /// - `db` - Database handle
    /// - `http_client` - HTTP client for outbound requests
    pub fn new(config: Arc<Config>, db: Database, http_client: reqwest::Client) -> Self {
        Self {
            config,
            db,
            http_client,
        }
    }
}
