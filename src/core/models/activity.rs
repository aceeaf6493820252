use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Identifier of the entity an activity applies to.
///
/// Call sites hold ids of mixed types (numeric account ids, string license
/// ids, uuids); whatever comes in is rendered to the string form stored on
/// the record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TargetId {
    Numeric(i64),
    Text(String),
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetId::Numeric(id) => write!(f, "{}", id),
            TargetId::Text(id) => f.write_str(id),
        }
    }
}

impl From<i64> for TargetId {
    fn from(id: i64) -> Self {
        TargetId::Numeric(id)
    }
}

impl From<&str> for TargetId {
    fn from(id: &str) -> Self {
        TargetId::Text(id.to_string())
    }
}

impl From<String> for TargetId {
    fn from(id: String) -> Self {
        TargetId::Text(id)
    }
}

impl From<Uuid> for TargetId {
    fn from(id: Uuid) -> Self {
        TargetId::Text(id.to_string())
    }
}

/// One appended entry of the audit trail. Records are immutable once
/// inserted; there is no update or delete path.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ActivityLogRecord {
    pub id: Uuid,
    pub user_id: Option<String>,
    pub user_email: String,
    pub user_name: String,
    pub action: String,
    pub target_type: Option<String>,
    pub target_id: Option<String>,
    pub details: Option<Value>,
    pub ip_address: String,
    pub user_agent: String,
    pub created_at: DateTime<Utc>,
}
