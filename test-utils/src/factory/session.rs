//! Session factory for inserting session rows directly.
//!
//! Bypasses the session store so tests can arrange rows the store would never write
//! itself, such as already-expired sessions.

use chrono::{Duration, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};
use serde_json::{json, Value};

use crate::factory::helpers::next_id;

/// Factory for creating session rows with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::session::SessionFactory;
///
/// let session = SessionFactory::new(&db)
///     .id("abc")
///     .data(json!({ "user": 42 }))
///     .build()
///     .await?;
/// ```
pub struct SessionFactory<'a> {
    db: &'a DatabaseConnection,
    id: String,
    data: Value,
    expiry_date: i64,
}

impl<'a> SessionFactory<'a> {
    /// Creates a new SessionFactory with default values.
    ///
    /// Defaults:
    /// - id: `"session_{n}"` where n is auto-incremented
    /// - data: `{"user": n}`
    /// - expiry_date: 24 hours from now
    ///
    /// # Arguments
    /// - `db` - Database connection for inserting the entity
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let n = next_id();
        Self {
            db,
            id: format!("session_{}", n),
            data: json!({ "user": n }),
            expiry_date: (Utc::now() + Duration::hours(24)).timestamp(),
        }
    }

    /// Sets the session id.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Sets the payload document.
    pub fn data(mut self, data: Value) -> Self {
        self.data = data;
        self
    }

    /// Sets the expiry as unix seconds.
    pub fn expiry_date(mut self, expiry_date: i64) -> Self {
        self.expiry_date = expiry_date;
        self
    }

    /// Marks the session as expired one hour ago.
    pub fn expired(mut self) -> Self {
        self.expiry_date = (Utc::now() - Duration::hours(1)).timestamp();
        self
    }

    /// Builds and inserts the session row.
    ///
    /// # Returns
    /// - `Ok(entity::session::Model)` - Created session row
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::session::Model, DbErr> {
        let now = Utc::now();
        entity::session::ActiveModel {
            id: ActiveValue::Set(self.id),
            data: ActiveValue::Set(self.data),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            expiry_date: ActiveValue::Set(self.expiry_date),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a live session with default values.
///
/// Shorthand for `SessionFactory::new(db).build().await`.
pub async fn create_session(db: &DatabaseConnection) -> Result<entity::session::Model, DbErr> {
    SessionFactory::new(db).build().await
}
