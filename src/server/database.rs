//! Shared database handle with connection lifecycle events.
//!
//! The server starts listening before the database is reachable, so consumers hold a
//! [`Database`] handle rather than a bare `DatabaseConnection`. The connector attaches
//! the connection once it is established; every lifecycle transition is published on a
//! watch channel and logged.

use std::sync::{Arc, OnceLock};

use sea_orm::DatabaseConnection;
use tokio::sync::watch;

use crate::server::error::AppError;

/// Lifecycle state of the database connection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DatabaseStatus {
    /// Connection attempts are in progress.
    Connecting,
    /// The connection is established and last answered a ping.
    Connected,
    /// Connecting failed or the connection stopped answering.
    Unavailable(String),
}

impl DatabaseStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Connecting => "connecting",
            Self::Connected => "connected",
            Self::Unavailable(_) => "unavailable",
        }
    }

    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Connected)
    }
}

#[derive(Debug)]
struct DatabaseInner {
    connection: OnceLock<DatabaseConnection>,
    status: watch::Sender<DatabaseStatus>,
}

/// Cheaply cloneable handle to the process-wide database connection.
///
/// All clones share the same connection slot and status channel, so the session store
/// and request handlers always observe the same connection.
#[derive(Clone, Debug)]
pub struct Database {
    inner: Arc<DatabaseInner>,
}

impl Database {
    /// Creates a handle with no connection, in the `Connecting` state.
    pub fn new() -> Self {
        let (status, _) = watch::channel(DatabaseStatus::Connecting);
        Self {
            inner: Arc::new(DatabaseInner {
                connection: OnceLock::new(),
                status,
            }),
        }
    }

    /// Creates a handle around an already established connection.
    pub fn with_connection(connection: DatabaseConnection) -> Self {
        let database = Self::new();
        database.attach(connection);
        database
    }

    /// Returns the connection once one has been attached.
    pub fn connection(&self) -> Option<&DatabaseConnection> {
        self.inner.connection.get()
    }

    /// Returns the connection or an `AppError::DatabaseUnavailable`.
    pub fn require(&self) -> Result<&DatabaseConnection, AppError> {
        self.connection()
            .ok_or_else(|| AppError::DatabaseUnavailable(self.status().label().to_string()))
    }

    pub fn status(&self) -> DatabaseStatus {
        self.inner.status.borrow().clone()
    }

    /// Subscribes to lifecycle transitions.
    pub fn subscribe(&self) -> watch::Receiver<DatabaseStatus> {
        self.inner.status.subscribe()
    }

    /// Attaches the established connection and publishes `Connected`.
    ///
    /// The connection slot is set once; later attachments are dropped.
    pub fn attach(&self, connection: DatabaseConnection) {
        if self.inner.connection.set(connection).is_err() {
            tracing::warn!("Database connection already attached, ignoring new connection");
        }
        self.report(DatabaseStatus::Connected);
    }

    /// Publishes a lifecycle transition.
    ///
    /// Repeating the current status is a no-op, so periodic health checks only log
    /// changes.
    pub fn report(&self, status: DatabaseStatus) {
        let changed = self.inner.status.send_if_modified(|current| {
            if *current == status {
                return false;
            }
            *current = status.clone();
            true
        });

        if !changed {
            return;
        }

        match status {
            DatabaseStatus::Connecting => tracing::info!("Connecting to database"),
            DatabaseStatus::Connected => tracing::info!("Database connected"),
            DatabaseStatus::Unavailable(reason) => tracing::error!("Database error: {}", reason),
        }
    }

    /// Checks that the attached connection answers.
    ///
    /// # Returns
    /// - `Ok(())` - The database answered the ping
    /// - `Err(AppError::DatabaseUnavailable)` - No connection is attached
    /// - `Err(AppError::DbErr)` - The ping failed
    pub async fn ping(&self) -> Result<(), AppError> {
        self.require()?.ping().await?;
        Ok(())
    }
}

impl Default for Database {
    fn default() -> Self {
        Self::new()
    }
}
