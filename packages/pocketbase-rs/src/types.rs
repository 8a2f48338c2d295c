use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

/// Paged record listing, as returned by `GET /api/collections/{c}/records`.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordList<T> {
    pub page: u32,
    #[serde(rename = "perPage")]
    pub per_page: u32,
    #[serde(rename = "totalItems")]
    pub total_items: u64,
    pub items: Vec<T>,
}

/// An auth collection record, as returned by auth-refresh.
///
/// Only the fields the catalog consumes are modeled; PocketBase returns
/// more (email visibility flags, verification state, timestamps).
#[derive(Debug, Clone, Deserialize)]
pub struct AuthRecord {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub admin: bool,
}

/// Response of `POST /api/collections/{auth}/auth-refresh`.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthRefreshResponse {
    pub token: String,
    pub record: AuthRecord,
}

/// PocketBase error body: `{"code": 400, "message": "...", "data": {...}}`.
///
/// `data` carries per-field validation failures keyed by field name, each
/// with its own `code`/`message` pair (e.g. `validation_not_unique`).
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: u16,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: HashMap<String, FieldError>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FieldError {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
}

impl ApiErrorBody {
    /// Field name of the first unique-index violation, if any.
    pub fn not_unique_field(&self) -> Option<&str> {
        self.data
            .iter()
            .find(|(_, e)| e.code == "validation_not_unique")
            .map(|(field, _)| field.as_str())
    }
}

/// A raw record as a JSON object. Collection-specific crates deserialize
/// these into their own typed models.
pub type RawRecord = Value;
