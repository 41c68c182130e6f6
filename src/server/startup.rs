//! Process initialization: logging, database, sessions, HTTP client and shutdown.

use std::time::Duration;

use axum::http::{
    header::{AUTHORIZATION, CONTENT_TYPE},
    Method,
};
use sha2::{Digest, Sha512};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_sessions::{cookie::Key, service::SignedCookie, Expiry, SessionManagerLayer};
use tracing_subscriber::EnvFilter;

use crate::server::{
    config::{Config, CorsConfig, DatabaseConfig, SessionConfig},
    data::session_store::DatabaseSessionStore,
    database::{Database, DatabaseStatus},
    error::{config::ConfigError, AppError},
};

/// Name of the session cookie.
pub const SESSION_COOKIE_NAME: &str = "sid";

const DEFAULT_LOG_FILTER: &str = "info,sqlx=warn";
const INITIAL_RETRY_DELAY: Duration = Duration::from_millis(500);
const MAX_RETRY_DELAY: Duration = Duration::from_secs(8);

/// Installs the global `tracing` subscriber, filtered by `RUST_LOG`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Connects to the database, runs pending migrations and attaches the connection.
///
/// Connecting is retried with exponential backoff up to
/// `DatabaseConfig::connect_attempts` times. Every outcome is published on the
/// [`Database`] handle, so callers only need to log the returned error.
///
/// # Arguments
/// - `config` - Connection parameters
/// - `database` - Handle that receives the connection and status updates
///
/// # Returns
/// - `Ok(())` - Connected with migrations applied
/// - `Err(AppError::ConfigErr(_))` - No `MONGO_URI`, or it cannot be adjusted for TLS
/// - `Err(AppError::DbErr(_))` - All attempts failed, or migrations failed
pub async fn connect_to_database(
    config: &DatabaseConfig,
    database: &Database,
) -> Result<(), AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database as SeaOrmDatabase};

    let url = match config.connection_url() {
        Ok(Some(url)) => url,
        Ok(None) => {
            let err = ConfigError::MissingEnvVar("MONGO_URI".to_string());
            database.report(DatabaseStatus::Unavailable(err.to_string()));
            return Err(err.into());
        }
        Err(err) => {
            database.report(DatabaseStatus::Unavailable(err.to_string()));
            return Err(err.into());
        }
    };

    let mut opt = ConnectOptions::new(url);
    opt.connect_timeout(config.connect_timeout)
        .acquire_timeout(config.connect_timeout)
        .idle_timeout(config.idle_timeout)
        .sqlx_logging(false);

    database.report(DatabaseStatus::Connecting);

    let mut delay = INITIAL_RETRY_DELAY;
    let mut attempt = 1;
    let db = loop {
        match SeaOrmDatabase::connect(opt.clone()).await {
            Ok(db) => break db,
            Err(err) if attempt < config.connect_attempts => {
                tracing::warn!(
                    "Database connection attempt {}/{} failed: {}; retrying in {:?}",
                    attempt,
                    config.connect_attempts,
                    err,
                    delay
                );
                tokio::time::sleep(delay).await;
                delay = (delay * 2).min(MAX_RETRY_DELAY);
                attempt += 1;
            }
            Err(err) => {
                database.report(DatabaseStatus::Unavailable(err.to_string()));
                return Err(err.into());
            }
        }
    };

    if let Err(err) = Migrator::up(&db, None).await {
        database.report(DatabaseStatus::Unavailable(err.to_string()));
        return Err(err.into());
    }

    database.attach(db);

    Ok(())
}

/// Derives the cookie signing key from the session secret.
///
/// The SHA-512 digest yields the 64 bytes `Key` requires regardless of the secret's
/// length.
pub fn session_key(secret: &str) -> Key {
    Key::from(Sha512::digest(secret.as_bytes()).as_slice())
}

/// Builds the session layer backed by the database session store.
pub fn connect_to_session(
    config: &SessionConfig,
    database: &Database,
) -> SessionManagerLayer<DatabaseSessionStore, SignedCookie> {
    let key = session_key(&config.secret);

    SessionManagerLayer::new(DatabaseSessionStore::new(database.clone()))
        .with_name(SESSION_COOKIE_NAME)
        .with_path("/")
        .with_http_only(true)
        .with_secure(config.cookie_secure)
        .with_same_site(config.cookie_same_site)
        .with_expiry(Expiry::OnInactivity(config.max_age))
        .with_signed(key)
}

/// Creates the HTTP client for outbound requests.
///
/// Redirects are disabled so an upstream cannot bounce requests elsewhere.
pub fn setup_reqwest_client() -> Result<reqwest::Client, AppError> {
    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()?;

    Ok(client)
}

/// Builds the credentialed CORS policy for the configured origin allowlist.
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(config.allowed_origins.clone()))
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
}

/// Logs the startup banner.
pub fn log_banner(config: &Config) {
    tracing::info!(
        "Starting server in {} mode on port {}",
        config.environment.as_str(),
        config.port
    );

    match &config.cors {
        Some(cors) if cors.allowed_origins.is_empty() => {
            tracing::warn!("FRONTEND_ORIGIN is empty, cross-origin requests will be rejected")
        }
        Some(cors) => {
            let origins = cors
                .allowed_origins
                .iter()
                .filter_map(|origin| origin.to_str().ok())
                .collect::<Vec<_>>()
                .join(", ");
            tracing::info!("CORS enabled for: {}", origins);
        }
        None => tracing::info!("CORS disabled in development"),
    }

    if config.weather.api_key.is_some() {
        tracing::info!("Weather API key configured");
    } else {
        tracing::warn!("OPENWEATHER_API_KEY is not set, weather requests will fail");
    }
}

/// Resolves on Ctrl+C or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => tracing::info!("Received Ctrl+C, shutting down"),
            Err(err) => {
                tracing::error!("Failed to install Ctrl+C handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                terminate.recv().await;
                tracing::info!("Received terminate signal, shutting down");
            }
            Err(err) => {
                tracing::error!("Failed to install signal handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
