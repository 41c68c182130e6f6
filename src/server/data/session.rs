//! Session data repository for database operations.
//!
//! This module provides the `SessionRepository` for managing persisted session
//! documents. Expiry is stored as unix seconds; callers pass the current time in so
//! the same instant is used for every comparison within one operation.

use migration::OnConflict;
use sea_orm::{
    ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
};

use crate::server::model::session::UpsertSessionParam;

/// Repository providing database operations for session records.
pub struct SessionRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> SessionRepository<'a> {
    /// Creates a new SessionRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds a session that has not yet expired.
    ///
    /// # Arguments
    /// - `id` - Session id
    /// - `now` - Current time as unix seconds
    ///
    /// # Returns
    /// - `Ok(Some(Model))` - Session exists and expires after `now`
    /// - `Ok(None)` - Session is unknown or expired
    /// - `Err(DbErr)` - Database error during query
    pub async fn find_live(
        &self,
        id: &str,
        now: i64,
    ) -> Result<Option<entity::session::Model>, DbErr> {
        entity::prelude::Session::find_by_id(id.to_string())
            .filter(entity::session::Column::ExpiryDate.gt(now))
            .one(self.db)
            .await
    }

    /// Checks whether any row, live or expired, uses the id.
    ///
    /// # Returns
    /// - `Ok(true)` - The id is taken
    /// - `Ok(false)` - The id is free
    /// - `Err(DbErr)` - Database error during query
    pub async fn exists(&self, id: &str) -> Result<bool, DbErr> {
        let entity = entity::prelude::Session::find_by_id(id.to_string())
            .one(self.db)
            .await?;

        Ok(entity.is_some())
    }

    /// Inserts a session or replaces the payload and expiry of an existing one.
    ///
    /// `created_at` is only written on insert; `updated_at` records every save.
    ///
    /// # Arguments
    /// - `param` - Session id, payload and expiry
    ///
    /// # Returns
    /// - `Ok(())` - Session persisted
    /// - `Err(DbErr)` - Database error during insert or update
    pub async fn upsert(&self, param: UpsertSessionParam) -> Result<(), DbErr> {
        let now = chrono::Utc::now();

        entity::prelude::Session::insert(entity::session::ActiveModel {
            id: ActiveValue::Set(param.id),
            data: ActiveValue::Set(param.data),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            expiry_date: ActiveValue::Set(param.expiry_date),
        })
        .on_conflict(
            OnConflict::column(entity::session::Column::Id)
                .update_columns([
                    entity::session::Column::Data,
                    entity::session::Column::UpdatedAt,
                    entity::session::Column::ExpiryDate,
                ])
                .to_owned(),
        )
        .exec_without_returning(self.db)
        .await?;

        Ok(())
    }

    /// Deletes a session by id.
    ///
    /// # Returns
    /// - `Ok(true)` - A row was removed
    /// - `Ok(false)` - No row had that id
    /// - `Err(DbErr)` - Database error during delete
    pub async fn delete(&self, id: &str) -> Result<bool, DbErr> {
        let result = entity::prelude::Session::delete_by_id(id.to_string())
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Deletes every session that expired at or before `now`.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of rows removed
    /// - `Err(DbErr)` - Database error during delete
    pub async fn delete_expired(&self, now: i64) -> Result<u64, DbErr> {
        let result = entity::prelude::Session::delete_many()
            .filter(entity::session::Column::ExpiryDate.lte(now))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
