use chrono::{Duration, Utc};
use serde_json::{json, Value};

/// Creates a session model with default values.
///
/// The model expires 24 hours from now and carries a single `user` entry.
pub fn entity() -> entity::session::Model {
    entity_builder().build()
}

/// Creates a builder for customizing a session model.
pub fn entity_builder() -> SessionEntityBuilder {
    let now = Utc::now();
    SessionEntityBuilder {
        model: entity::session::Model {
            id: "fixture_session".to_string(),
            data: json!({ "user": 1 }),
            created_at: now,
            updated_at: now,
            expiry_date: (now + Duration::hours(24)).timestamp(),
        },
    }
}

/// Builder for in-memory session models.
pub struct SessionEntityBuilder {
    model: entity::session::Model,
}

impl SessionEntityBuilder {
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.model.id = id.into();
        self
    }

    pub fn data(mut self, data: Value) -> Self {
        self.model.data = data;
        self
    }

    pub fn expiry_date(mut self, expiry_date: i64) -> Self {
        self.model.expiry_date = expiry_date;
        self
    }

    pub fn build(self) -> entity::session::Model {
        self.model
    }
}
