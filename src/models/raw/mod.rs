// Raw payloads handed over by the data-fetching layer.
// Field names follow the camelCase JSON the REST layer returns.

use serde::{Deserialize, Serialize};

/// Identifier that may arrive as a JSON number or string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Number(i64),
    Text(String),
}

impl RawId {
    /// String form of the id; blank strings count as missing.
    pub fn as_key(&self) -> Option<String> {
        match self {
            Self::Number(value) => Some(value.to_string()),
            Self::Text(value) => {
                let trimmed = value.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
        }
    }
}

impl From<i64> for RawId {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for RawId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Nested `user` / `client` display object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPerson {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// One schedule record as fetched from the back office API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawScheduleRecord {
    pub id: Option<RawId>,
    pub title: Option<String>,
    /// `YYYY-MM-DD` or a full date-time string
    pub date: Option<String>,
    /// `HH:MM` or `HH:MM:SS`
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    /// Full date-time alternatives used by event-shaped payloads
    pub start: Option<String>,
    pub end: Option<String>,
    pub user_id: Option<RawId>,
    pub client_id: Option<RawId>,
    #[serde(rename = "type")]
    pub visit_type: Option<String>,
    pub status: Option<String>,
    pub notes: Option<String>,
    pub user: Option<RawPerson>,
    pub client: Option<RawPerson>,
    pub is_leave_event: Option<bool>,
    pub leave_type: Option<String>,
    pub is_unallocated: Option<bool>,
}

/// Staff or client record from the entity endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawEntity {
    pub id: Option<RawId>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub color: Option<String>,
    pub avatar_url: Option<String>,
}

/// One data refresh as served to the calendar page: schedule records plus
/// the three entity lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawBundle {
    pub schedules: Vec<RawScheduleRecord>,
    pub clients: Vec<RawEntity>,
    #[serde(alias = "staff")]
    pub care_workers: Vec<RawEntity>,
    pub office_staff: Vec<RawEntity>,
}
