//! Client-side mirrors of the records owned by the admin server
//!
//! Every type here (de)serializes with the server's camelCase JSON names.
//! Nothing is validated on deserialization; see `crate::validate` for the
//! rules enforced before a save.

pub mod dashboard;
pub mod graphql;
pub mod journal;
pub mod recording;
pub mod scenario;
pub mod soap;
pub mod stub;

pub use dashboard::DashboardStats;
pub use graphql::GraphQlStub;
pub use journal::RequestLog;
pub use recording::{RecordingState, RecordingStatus};
pub use scenario::ScenarioState;
pub use soap::{SoapStub, SoapVersion, XPathMatchType, XPathMatcher};
pub use stub::{
    BodyPattern, BodyPatternKind, Fault, MatchRule, RequestPattern, ResponseDefinition,
    ScenarioRef, Stub, UrlMatchKind,
};

/// Serde helpers for the loosely typed fields the server sends back
pub(crate) mod de {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// Ids are numeric on the server but treated as opaque strings here.
    /// `null` and a missing key both become the empty string (an unsaved draft).
    pub fn id<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(match value {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s,
            Some(other) => other.to_string(),
        })
    }

    /// Accepts either a JSON string or any JSON value, rendering the latter as
    /// compact JSON text.
    pub fn string_or_json<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::String(s) => s,
            other => other.to_string(),
        })
    }

    pub fn opt_string_or_json<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(match value {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s),
            Some(other) => Some(other.to_string()),
        })
    }

    /// Null-tolerant string: `null` becomes the empty string
    pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Holder {
        #[serde(default, deserialize_with = "super::de::id")]
        id: String,
        #[serde(default, deserialize_with = "super::de::opt_string_or_json")]
        body: Option<String>,
    }

    #[test]
    fn test_numeric_id_becomes_string() {
        let h: Holder = serde_json::from_str(r#"{"id": 42}"#).unwrap();
        assert_eq!(h.id, "42");
        assert_eq!(h.body, None);
    }

    #[test]
    fn test_null_id_is_empty() {
        let h: Holder = serde_json::from_str(r#"{"id": null}"#).unwrap();
        assert_eq!(h.id, "");
    }

    #[test]
    fn test_object_body_is_rendered_as_json_text() {
        let h: Holder = serde_json::from_str(r#"{"body": {"ok": true}}"#).unwrap();
        assert_eq!(h.body.as_deref(), Some(r#"{"ok":true}"#));
    }
}
