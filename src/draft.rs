//! Form mode / JSON mode for an editor draft
//!
//! A draft is either a typed record edited field by field, or the raw JSON text
//! the user is typing. Conversions go through serde in both directions; leaving
//! JSON mode is refused when the text does not parse.

use serde::de::DeserializeOwned;
use serde::Serialize;

pub const CANNOT_LEAVE_JSON_MODE: &str = "Cannot switch to form mode: Invalid JSON format";

#[derive(Debug, Clone, PartialEq)]
pub enum Draft<T> {
    Structured(T),
    Raw(String),
}

impl<T> Draft<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(value: T) -> Self {
        Draft::Structured(value)
    }

    pub fn is_raw(&self) -> bool {
        matches!(self, Draft::Raw(_))
    }

    pub fn structured(&self) -> Option<&T> {
        match self {
            Draft::Structured(value) => Some(value),
            Draft::Raw(_) => None,
        }
    }

    pub fn structured_mut(&mut self) -> Option<&mut T> {
        match self {
            Draft::Structured(value) => Some(value),
            Draft::Raw(_) => None,
        }
    }

    pub fn raw_text(&self) -> Option<&str> {
        match self {
            Draft::Raw(text) => Some(text),
            Draft::Structured(_) => None,
        }
    }

    pub fn raw_mut(&mut self) -> Option<&mut String> {
        match self {
            Draft::Raw(text) => Some(text),
            Draft::Structured(_) => None,
        }
    }

    /// Pretty JSON of the current draft, whichever mode it is in
    pub fn to_json_text(&self) -> String {
        match self {
            Draft::Structured(value) => serde_json::to_string_pretty(value).unwrap_or_default(),
            Draft::Raw(text) => text.clone(),
        }
    }

    /// Serialize the structured draft into editable JSON text. No-op in JSON mode.
    pub fn enter_json_mode(&mut self) -> Result<(), String> {
        if let Draft::Structured(value) = self {
            let text = serde_json::to_string_pretty(value).map_err(|e| e.to_string())?;
            *self = Draft::Raw(text);
        }
        Ok(())
    }

    /// Re-parse the JSON text and replace the draft wholesale. On a parse
    /// failure the draft stays in JSON mode with its text untouched.
    pub fn enter_form_mode(&mut self) -> Result<(), String> {
        if let Draft::Raw(text) = self {
            let value: T = serde_json::from_str(text).map_err(|e| {
                tracing::debug!(error = %e, "JSON draft does not parse");
                CANNOT_LEAVE_JSON_MODE.to_string()
            })?;
            *self = Draft::Structured(value);
        }
        Ok(())
    }

    pub fn toggle(&mut self) -> Result<(), String> {
        if self.is_raw() {
            self.enter_form_mode()
        } else {
            self.enter_json_mode()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        BodyPattern, BodyPatternKind, Fault, GraphQlStub, ScenarioRef, SoapStub, Stub,
    };

    fn rich_stub() -> Stub {
        let mut stub = Stub {
            id: "12".to_string(),
            priority: Some(3),
            persistent: Some(true),
            metadata: Some(serde_json::json!({"team": "payments"})),
            scenario: Some(ScenarioRef {
                name: "checkout".to_string(),
                state: None,
            }),
            required_scenario_state: Some("Started".to_string()),
            new_scenario_state: Some("Paid".to_string()),
            ..Default::default()
        };
        stub.request.set_header("Accept", "application/json");
        stub.request.set_query_parameter("page", "1");
        stub.request
            .body_patterns
            .push(BodyPattern::new(BodyPatternKind::MatchesJsonPath, "$.id"));
        stub.response.fault = Some(Fault::EmptyResponse);
        stub.response.fixed_delay_milliseconds = Some(250);
        stub.response.headers.insert("X-Test".into(), "1".into());
        stub
    }

    #[test]
    fn test_double_toggle_returns_equal_rest_stub() {
        let original = rich_stub();
        let mut draft = Draft::new(original.clone());

        draft.toggle().unwrap();
        assert!(draft.is_raw());
        draft.toggle().unwrap();

        assert_eq!(draft.structured(), Some(&original));
    }

    #[test]
    fn test_double_toggle_returns_equal_graphql_and_soap() {
        let graphql = GraphQlStub {
            variables: Some(r#"{"id": 1}"#.to_string()),
            ..Default::default()
        };
        let mut draft = Draft::new(graphql.clone());
        draft.toggle().unwrap();
        draft.toggle().unwrap();
        assert_eq!(draft.structured(), Some(&graphql));

        let soap = SoapStub::default();
        let mut draft = Draft::new(soap.clone());
        draft.toggle().unwrap();
        draft.toggle().unwrap();
        assert_eq!(draft.structured(), Some(&soap));
    }

    #[test]
    fn test_invalid_json_refuses_switch() {
        let mut draft = Draft::new(Stub::default());
        draft.enter_json_mode().unwrap();
        draft.raw_mut().unwrap().push_str("}}");

        let err = draft.enter_form_mode().unwrap_err();
        assert_eq!(err, CANNOT_LEAVE_JSON_MODE);
        assert!(draft.is_raw());
        assert!(draft.raw_text().unwrap().ends_with("}}"));
    }

    #[test]
    fn test_edited_json_replaces_draft() {
        let mut draft = Draft::new(Stub::default());
        draft.enter_json_mode().unwrap();
        *draft.raw_mut().unwrap() =
            r#"{"name": "Ping", "request": {"method": "GET", "urlPath": "/ping"}, "response": {"status": 200, "body": "pong"}}"#
                .to_string();

        draft.enter_form_mode().unwrap();
        let stub = draft.structured().unwrap();
        assert_eq!(stub.name, "Ping");
        assert_eq!(stub.request.url_path.as_deref(), Some("/ping"));
        assert_eq!(stub.enabled, None);
    }
}
