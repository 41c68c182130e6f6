mod model;
mod server;

use std::sync::Arc;

use tokio::net::TcpListener;

use crate::server::{
    config::Config,
    database::Database,
    error::AppError,
    router::{router, RouteCollaborators},
    scheduler, startup,
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    startup::init_tracing();

    let config = Arc::new(Config::from_env()?);
    startup::log_banner(&config);

    let database = Database::new();

    // The listener starts right away; requests needing the database fail until the
    // connector attaches a connection.
    let connector_config = config.database.clone();
    let connector_database = database.clone();
    tokio::spawn(async move {
        if let Err(e) = startup::connect_to_database(&connector_config, &connector_database).await
        {
            tracing::error!("Database connection failed: {}", e);
        }
    });

    let mut scheduler = scheduler::start_scheduler(database.clone()).await?;

    let http_client = startup::setup_reqwest_client()?;
    let state = AppState::new(config.clone(), database, http_client);
    let app = router(state, RouteCollaborators::default());

    let address = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&address).await?;
    tracing::info!("Server running on {}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(startup::shutdown_signal())
        .await?;

    if let Err(e) = scheduler.shutdown().await {
        tracing::error!("Failed to stop scheduler: {}", e);
    }

    tracing::info!("Server stopped");

    Ok(())
}
