//! Background jobs driven by `tokio-cron-scheduler`.

pub mod database_monitor;
pub mod session_cleanup;

use tokio_cron_scheduler::JobScheduler;

use crate::server::{database::Database, error::AppError};

/// Starts the scheduler with all background jobs.
///
/// Also spawns the one-off purge of expired sessions that runs once the database
/// connects.
///
/// # Arguments
/// - `database` - Handle shared with the request handlers
///
/// # Returns
/// - `Ok(JobScheduler)` - Running scheduler; keep it to shut it down on exit
/// - `Err(AppError::SchedulerErr(_))` - A job could not be created or the scheduler
///   failed to start
pub async fn start_scheduler(database: Database) -> Result<JobScheduler, AppError> {
    let scheduler = JobScheduler::new().await?;

    scheduler
        .add(session_cleanup::job(database.clone())?)
        .await?;
    scheduler
        .add(database_monitor::job(database.clone())?)
        .await?;
    scheduler.start().await?;

    session_cleanup::purge_on_connect(database);

    tracing::info!("Scheduler started");

    Ok(scheduler)
}
