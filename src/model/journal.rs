use super::de;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// One request observed by the mock server and how it was answered
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestLog {
    #[serde(default, deserialize_with = "de::id")]
    pub id: String,

    /// ISO-8601 text or epoch milliseconds, depending on the server build
    #[serde(default, deserialize_with = "de::string_or_json")]
    pub timestamp: String,

    pub request: LoggedRequest,

    #[serde(default)]
    pub response_definition: LoggedResponse,

    #[serde(default)]
    pub was_matched: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stub_mapping: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggedRequest {
    #[serde(default, deserialize_with = "de::text")]
    pub method: String,

    #[serde(default, deserialize_with = "de::text")]
    pub url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub absolute_url: Option<String>,

    #[serde(default)]
    pub headers: BTreeMap<String, Vec<String>>,

    #[serde(default)]
    pub query_params: BTreeMap<String, Vec<String>>,

    #[serde(
        default,
        deserialize_with = "de::opt_string_or_json",
        skip_serializing_if = "Option::is_none"
    )]
    pub body: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggedResponse {
    #[serde(default)]
    pub status: u16,

    #[serde(
        default,
        deserialize_with = "de::opt_string_or_json",
        skip_serializing_if = "Option::is_none"
    )]
    pub body: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_file_name: Option<String>,

    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

impl RequestLog {
    /// Epoch milliseconds or RFC 3339 text, normalized to UTC
    pub fn parsed_timestamp(&self) -> Option<DateTime<Utc>> {
        let ts = self.timestamp.trim();
        if let Ok(millis) = ts.parse::<f64>() {
            if !millis.is_finite() {
                return None;
            }
            return DateTime::from_timestamp_millis(millis as i64);
        }
        DateTime::parse_from_rfc3339(ts)
            .ok()
            .map(|t| t.with_timezone(&Utc))
    }

    /// Chronological comparison; entries without a readable timestamp come
    /// after every dated one
    pub fn cmp_timestamp(&self, other: &Self) -> Ordering {
        match (self.parsed_timestamp(), other.parsed_timestamp()) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn log_at(ts: serde_json::Value) -> RequestLog {
        serde_json::from_value(json!({
            "id": "1",
            "timestamp": ts,
            "request": {"method": "GET", "url": "/ping"},
            "responseDefinition": {"status": 200},
            "wasMatched": true
        }))
        .unwrap()
    }

    #[test]
    fn test_numeric_timestamps_compare_numerically() {
        let a = log_at(json!(900));
        let b = log_at(json!(10000));
        assert_eq!(a.cmp_timestamp(&b), Ordering::Less);
    }

    #[test]
    fn test_iso_timestamps_compare_chronologically() {
        let a = log_at(json!("2024-05-01T10:00:00Z"));
        let b = log_at(json!("2024-05-01T09:59:59Z"));
        assert_eq!(a.cmp_timestamp(&b), Ordering::Greater);

        // Fractional seconds and zone offsets
        let whole = log_at(json!("2024-05-01T10:00:00Z"));
        let half = log_at(json!("2024-05-01T10:00:00.500Z"));
        let shifted = log_at(json!("2024-05-01T11:30:00+02:00"));
        assert_eq!(whole.cmp_timestamp(&half), Ordering::Less);
        assert_eq!(shifted.cmp_timestamp(&whole), Ordering::Less);
    }

    #[test]
    fn test_epoch_and_iso_timestamps_mix() {
        // 2024-05-01T10:00:00Z
        let millis = log_at(json!(1714557600000i64));
        let iso = log_at(json!("2024-05-01T10:00:01Z"));
        assert_eq!(millis.cmp_timestamp(&iso), Ordering::Less);
        assert_eq!(
            millis.parsed_timestamp(),
            iso.parsed_timestamp().map(|t| t - chrono::Duration::seconds(1))
        );
    }

    #[test]
    fn test_unreadable_timestamp_sorts_after_dated() {
        let junk = log_at(json!("yesterday"));
        let dated = log_at(json!("2024-05-01T10:00:00Z"));
        assert_eq!(junk.parsed_timestamp(), None);
        assert_eq!(junk.cmp_timestamp(&dated), Ordering::Greater);
    }

    #[test]
    fn test_missing_collections_default_to_empty() {
        let log = log_at(json!("2024-05-01T10:00:00Z"));
        assert!(log.request.headers.is_empty());
        assert!(log.request.query_params.is_empty());
        assert_eq!(log.response_definition.status, 200);
        assert!(log.was_matched);
    }
}
