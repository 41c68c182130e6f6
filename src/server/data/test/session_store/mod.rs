use std::collections::HashMap;

use crate::server::{
    data::session_store::DatabaseSessionStore, database::Database,
    middleware::session::SESSION_ISSUED_AT,
};
use sea_orm::{EntityTrait, PaginatorTrait};
use serde_json::json;
use test_utils::{builder::TestBuilder, factory};
use time::OffsetDateTime;
use tower_sessions::{
    session::{Id, Record},
    session_store, SessionStore,
};

mod create;
mod load;
mod save;

/// Builds a store over a fresh in-memory database with the session table.
async fn store_with_database() -> (DatabaseSessionStore, Database) {
    let db = TestBuilder::new()
        .with_session_table()
        .build()
        .await
        .unwrap()
        .into_database()
        .await
        .unwrap();
    let database = Database::with_connection(db);

    (DatabaseSessionStore::new(database.clone()), database)
}

fn record(data: &[(&str, serde_json::Value)]) -> Record {
    Record {
        id: Id::default(),
        data: data
            .iter()
            .map(|(key, value)| (key.to_string(), value.clone()))
            .collect::<HashMap<_, _>>(),
        expiry_date: OffsetDateTime::now_utc() + time::Duration::hours(24),
    }
}

async fn row_count(database: &Database) -> u64 {
    entity::prelude::Session::find()
        .count(database.connection().unwrap())
        .await
        .unwrap()
}
