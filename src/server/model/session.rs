use serde_json::Value;

/// Parameters for inserting or replacing a persisted session.
#[derive(Debug, Clone, PartialEq)]
pub struct UpsertSessionParam {
    /// Session id as rendered in the cookie.
    pub id: String,
    /// Payload document (a JSON object).
    pub data: Value,
    /// Expiry as unix seconds.
    pub expiry_date: i64,
}
