use serde::{Deserialize, Serialize};

/// A line of the append-only audit trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditRecord {
    #[serde(default)]
    pub id: i64,
    pub username: String,
    pub action: String,
    #[serde(default)]
    pub details: String,
    pub timestamp: String,
}

impl AuditRecord {
    pub fn now(username: &str, action: &str, details: &str) -> Self {
        Self {
            id: 0,
            username: username.to_string(),
            action: action.to_string(),
            details: details.to_string(),
            timestamp: chrono::Local::now().to_rfc3339(),
        }
    }
}
