// Todo record and persisted timestamp format

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single todo entry.
///
/// The `id` is assigned once at creation and never changes; `created_at` is
/// stored at millisecond precision so it survives a save/load round trip
/// unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Todo {
    pub id: String,
    pub text: String,
    pub completed: bool,
    #[serde(rename = "createdAt", with = "iso_millis")]
    pub created_at: DateTime<Utc>,
}

impl Todo {
    /// Build a new open todo with a fresh time-ordered id.
    ///
    /// Callers are expected to hand in already-trimmed, non-empty text; see
    /// `TodoList::add` for the input policy.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7().to_string(),
            text: text.into(),
            completed: false,
            created_at: now_ms(),
        }
    }
}

/// Current time truncated to millisecond precision, matching the persisted
/// `createdAt` format.
pub fn now_ms() -> DateTime<Utc> {
    let now = Utc::now();
    DateTime::from_timestamp_millis(now.timestamp_millis()).unwrap_or(now)
}

/// Serde adapter mapping `DateTime<Utc>` to the stored ISO-8601 string form
/// ("YYYY-MM-DDTHH:MM:SS.sssZ"). Parsing accepts any RFC 3339 offset and
/// normalizes to UTC.
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
