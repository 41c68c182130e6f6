use chrono::Utc;
use tokio::task::JoinHandle;
use tokio_cron_scheduler::Job;

use crate::server::{data::session::SessionRepository, database::Database, error::AppError};

/// Every 15 minutes.
const SCHEDULE: &str = "0 */15 * * * *";

/// Creates the job purging expired sessions.
pub fn job(database: Database) -> Result<Job, AppError> {
    let job = Job::new_async(SCHEDULE, move |_uuid, _lock| {
        let database = database.clone();

        Box::pin(async move {
            if let Err(e) = purge_expired_sessions(&database).await {
                tracing::error!("Error purging expired sessions: {}", e);
            }
        })
    })?;

    Ok(job)
}

/// Purges expired sessions once, as soon as the database reports `Connected`.
///
/// Rows that expired while the server was down are removed without waiting for the
/// first scheduled run. The task ends after the purge, or when the handle's status
/// channel closes.
pub fn purge_on_connect(database: Database) -> JoinHandle<()> {
    let mut events = database.subscribe();

    tokio::spawn(async move {
        loop {
            let connected = events.borrow_and_update().is_connected();
            if connected {
                if let Err(e) = purge_expired_sessions(&database).await {
                    tracing::error!("Error purging expired sessions: {}", e);
                }
                return;
            }

            if events.changed().await.is_err() {
                return;
            }
        }
    })
}

/// Deletes session rows whose expiry has passed.
///
/// Skipped while no connection is established.
///
/// # Returns
/// - `Ok(count)` - Number of deleted rows, 0 when skipped
/// - `Err(AppError::DbErr(_))` - The delete failed
pub async fn purge_expired_sessions(database: &Database) -> Result<u64, AppError> {
    if !database.status().is_connected() {
        tracing::debug!("Skipping session cleanup, database is {}", database.status().label());
        return Ok(0);
    }

    let deleted = SessionRepository::new(database.require()?)
        .delete_expired(Utc::now().timestamp())
        .await?;

    if deleted > 0 {
        tracing::info!("Purged {} expired sessions", deleted);
    }

    Ok(deleted)
}

#[cfg(test)]
mod tests {
    use test_utils::{builder::TestBuilder, factory::session::SessionFactory};

    use super::*;

    #[tokio::test]
    async fn purges_only_expired_sessions() -> Result<(), AppError> {
        let test = TestBuilder::new().with_session_table().build().await.unwrap();
        let db = test.into_database().await.unwrap();

        SessionFactory::new(&db).id("live").build().await?;
        SessionFactory::new(&db).id("stale").expired().build().await?;

        let database = Database::with_connection(db);
        let deleted = purge_expired_sessions(&database).await?;

        assert_eq!(deleted, 1);
        let repo = SessionRepository::new(database.require()?);
        assert!(repo.exists("live").await?);
        assert!(!repo.exists("stale").await?);
        Ok(())
    }

    /// Tests the purge triggered by the connector attaching a connection.
    ///
    /// Expected: the expired row is gone once the task finishes
    #[tokio::test]
    async fn purges_when_connection_is_attached() -> Result<(), AppError> {
        let test = TestBuilder::new().with_session_table().build().await.unwrap();
        let db = test.into_database().await.unwrap();
        SessionFactory::new(&db).id("live").build().await?;
        SessionFactory::new(&db).id("stale").expired().build().await?;

        let database = Database::new();
        let task = purge_on_connect(database.clone());
        database.attach(db);
        task.await.unwrap();

        let repo = SessionRepository::new(database.require()?);
        assert!(repo.exists("live").await?);
        assert!(!repo.exists("stale").await?);
        Ok(())
    }

    #[tokio::test]
    async fn skips_without_connection() -> Result<(), AppError> {
        let deleted = purge_expired_sessions(&Database::new()).await?;

        assert_eq!(deleted, 0);
        Ok(())
    }
}
