use tokio_cron_scheduler::Job;

use crate::server::{
    database::{Database, DatabaseStatus},
    error::AppError,
};

/// Every 30 seconds.
const SCHEDULE: &str = "*/30 * * * * *";

/// Creates the job watching the database connection.
pub fn job(database: Database) -> Result<Job, AppError> {
    let job = Job::new_async(SCHEDULE, move |_uuid, _lock| {
        let database = database.clone();

        Box::pin(async move {
            check_connection(&database).await;
        })
    })?;

    Ok(job)
}

/// Pings the attached connection and publishes the outcome.
///
/// Does nothing until the connector has attached a connection; the connector owns the
/// status while it is still trying.
pub async fn check_connection(database: &Database) {
    if database.connection().is_none() {
        return;
    }

    match database.ping().await {
        Ok(()) => database.report(DatabaseStatus::Connected),
        Err(err) => database.report(DatabaseStatus::Unavailable(err.to_string())),
    }
}
