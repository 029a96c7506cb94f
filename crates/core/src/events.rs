//! School events feed: entity, response-shape extraction, and the
//! upcoming/past split.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CoreError;
use crate::types::DbId;

/// A school event as returned by the events endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: DbId,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "texto", default)]
    pub body: String,
    /// Raw date string as sent by the server.
    #[serde(rename = "fecha")]
    pub date: String,
}

impl Event {
    /// Parsed event date, if the server sent a recognisable format.
    pub fn starts_at(&self) -> Option<DateTime<Utc>> {
        parse_event_date(&self.date)
    }

    /// An event is upcoming when its date is at or after `now`.
    /// Events with unparseable dates count as past.
    pub fn is_upcoming(&self, now: DateTime<Utc>) -> bool {
        self.starts_at().is_some_and(|at| at >= now)
    }
}

/// Pull the event list out of any of the three body shapes the endpoint
/// is known to return: `{"results": [...]}`, `{"data": [...]}`, or a
/// bare array.
///
/// The first non-empty candidate wins. If it is not an array the feed is
/// treated as empty.
pub fn extract_events(body: Value) -> Result<Vec<Event>, CoreError> {
    let candidate = match body {
        Value::Object(mut map) => {
            let results = map.remove("results").filter(is_truthy);
            let data = map.remove("data").filter(is_truthy);
            results.or(data).unwrap_or(Value::Object(map))
        }
        other => other,
    };

    match candidate {
        Value::Array(items) => items
            .into_iter()
            .map(|item| {
                serde_json::from_value(item)
                    .map_err(|e| CoreError::Parse(format!("Malformed event: {e}")))
            })
            .collect(),
        _ => Ok(Vec::new()),
    }
}

/// Split events into `(upcoming, past)` relative to `now`, keeping order.
pub fn partition_events(events: &[Event], now: DateTime<Utc>) -> (Vec<Event>, Vec<Event>) {
    events.iter().cloned().partition(|e| e.is_upcoming(now))
}

/// Parse an event date. Accepts RFC 3339, a naive `YYYY-MM-DDTHH:MM:SS`
/// timestamp (UTC), and a bare `YYYY-MM-DD` date (UTC midnight).
pub fn parse_event_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Some(at.with_timezone(&Utc));
    }
    if let Ok(at) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(at.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|at| at.and_utc())
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
