//! SeaORM-backed `tower_sessions` store.
//!
//! The store takes the same [`Database`] handle as every other database consumer, so
//! sessions always live in the connection the persistence connector established.
//!
//! Persistence is lazy: a record whose payload holds nothing besides the issuing
//! timestamp is never written. Anonymous traffic therefore receives a cookie without
//! producing a row, and a session only reaches the database once a route collaborator
//! stores data in it.

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, DbErr};
use time::OffsetDateTime;
use tower_sessions::{
    session::{Id, Record},
    session_store, SessionStore,
};

use crate::server::{
    data::session::SessionRepository, database::Database,
    middleware::session::SESSION_ISSUED_AT, model::session::UpsertSessionParam,
};

/// Session store persisting records in the `session` table.
#[derive(Clone, Debug)]
pub struct DatabaseSessionStore {
    database: Database,
}

impl DatabaseSessionStore {
    /// Creates a store on top of the shared database handle.
    ///
    /// # Arguments
    /// - `database` - Handle shared with the rest of the server
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    fn connection(&self) -> session_store::Result<&DatabaseConnection> {
        self.database.connection().ok_or_else(|| {
            session_store::Error::Backend(format!(
                "database is {}",
                self.database.status().label()
            ))
        })
    }
}

/// True when the payload only holds the issuing bookkeeping.
fn is_anonymous(record: &Record) -> bool {
    record.data.keys().all(|key| key == SESSION_ISSUED_AT)
}

fn backend(err: DbErr) -> session_store::Error {
    session_store::Error::Backend(err.to_string())
}

fn to_param(record: &Record) -> session_store::Result<UpsertSessionParam> {
    let data = serde_json::to_value(&record.data)
        .map_err(|e| session_store::Error::Encode(e.to_string()))?;

    Ok(UpsertSessionParam {
        id: record.id.to_string(),
        data,
        expiry_date: record.expiry_date.unix_timestamp(),
    })
}

fn to_record(id: Id, model: entity::session::Model) -> session_store::Result<Record> {
    let data = serde_json::from_value(model.data)
        .map_err(|e| session_store::Error::Decode(e.to_string()))?;
    let expiry_date = OffsetDateTime::from_unix_timestamp(model.expiry_date)
        .map_err(|e| session_store::Error::Decode(e.to_string()))?;

    Ok(Record {
        id,
        data,
        expiry_date,
    })
}

#[async_trait]
impl SessionStore for DatabaseSessionStore {
    async fn create(&self, record: &mut Record) -> session_store::Result<()> {
        if is_anonymous(record) {
            return Ok(());
        }

        let repo = SessionRepository::new(self.connection()?);

        while repo
            .exists(&record.id.to_string())
            .await
            .map_err(backend)?
        {
            record.id = Id::default();
        }

        repo.upsert(to_param(record)?).await.map_err(backend)
    }

    async fn save(&self, record: &Record) -> session_store::Result<()> {
        let repo = SessionRepository::new(self.connection()?);

        // Everything the collaborators stored was removed again.
        if is_anonymous(record) {
            repo.delete(&record.id.to_string())
                .await
                .map_err(backend)?;
            return Ok(());
        }

        repo.upsert(to_param(record)?).await.map_err(backend)
    }

    async fn load(&self, session_id: &Id) -> session_store::Result<Option<Record>> {
        let repo = SessionRepository::new(self.connection()?);
        let now = OffsetDateTime::now_utc().unix_timestamp();

        repo.find_live(&session_id.to_string(), now)
            .await
            .map_err(backend)?
            .map(|model| to_record(*session_id, model))
            .transpose()
    }

    async fn delete(&self, session_id: &Id) -> session_store::Result<()> {
        SessionRepository::new(self.connection()?)
            .delete(&session_id.to_string())
            .await
            .map_err(backend)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use test_utils::fixture;

    use super::*;

    #[test]
    fn converts_model_into_record() {
        let model = fixture::session::entity_builder()
            .data(json!({ "user": 7, SESSION_ISSUED_AT: 1_700_000_000 }))
            .expiry_date(1_900_000_000)
            .build();
        let id = Id::default();

        let record = to_record(id, model).unwrap();

        assert_eq!(record.id, id);
        assert_eq!(record.data["user"], 7);
        assert_eq!(record.expiry_date.unix_timestamp(), 1_900_000_000);
        assert!(!is_anonymous(&record));
    }

    #[test]
    fn bookkeeping_only_record_is_anonymous() {
        let model = fixture::session::entity_builder()
            .data(json!({ SESSION_ISSUED_AT: 1_700_000_000 }))
            .build();

        let record = to_record(Id::default(), model).unwrap();

        assert!(is_anonymous(&record));
    }

    #[test]
    fn rejects_non_object_payload() {
        let mut model = fixture::session::entity();
        model.data = json!("not a map");

        assert!(matches!(
            to_record(Id::default(), model),
            Err(session_store::Error::Decode(_))
        ));
    }
}
