//! Registration payloads exchanged with the backend

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body of the registration POST
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormData {
    pub name: String,
    pub email: String,
    pub password: String,
    pub profession: String,
    pub privacy_terms: bool,
    pub created_at: DateTime<Utc>,
}

/// A stored registration as listed by the backend.
///
/// Decoding is lenient so a partially filled record still shows up.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Registration {
    pub id: Option<serde_json::Value>,
    pub name: String,
    pub email: String,
    pub profession: String,
    pub privacy_terms: bool,
    pub created_at: Option<String>,
}

impl Registration {
    /// Id rendered for display, whatever its JSON type
    pub fn display_id(&self) -> String {
        match &self.id {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(serde_json::Value::Null) | None => "-".to_string(),
            Some(other) => other.to_string(),
        }
    }

    /// Creation date trimmed to the day when it parses as RFC 3339
    pub fn created_label(&self) -> String {
        match self.created_at.as_deref() {
            Some(raw) => DateTime::parse_from_rfc3339(raw)
                .map(|dt| dt.with_timezone(&Utc).format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|_| raw.to_string()),
            None => String::new(),
        }
    }
}
