use super::de;
use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// A REST stub: request matching rule plus the response served on a match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stub {
    #[serde(
        default,
        deserialize_with = "de::id",
        skip_serializing_if = "String::is_empty"
    )]
    pub id: String,

    #[serde(default, deserialize_with = "de::text")]
    pub name: String,

    #[serde(default)]
    pub request: RequestPattern,

    #[serde(default)]
    pub response: ResponseDefinition,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub scenario: Option<ScenarioRef>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_scenario_state: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_scenario_state: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub persistent: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,

    /// Keys this client does not model; kept so a JSON-mode edit survives a save
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Default for Stub {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: "New Stub".to_string(),
            request: RequestPattern {
                method: "GET".to_string(),
                url_path: Some("/".to_string()),
                ..Default::default()
            },
            response: ResponseDefinition {
                status: 200,
                body: Some(r#"{"message": "Hello from WireMock UI!"}"#.to_string()),
                ..Default::default()
            },
            priority: None,
            scenario: None,
            required_scenario_state: None,
            new_scenario_state: None,
            persistent: None,
            enabled: Some(true),
            metadata: None,
            extra: BTreeMap::new(),
        }
    }
}

impl Stub {
    /// A stub with no id has never been saved
    pub fn is_new(&self) -> bool {
        self.id.is_empty()
    }

    /// Missing `enabled` means enabled, matching the server default
    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }

    pub fn scenario_name(&self) -> &str {
        self.scenario.as_ref().map(|s| s.name.as_str()).unwrap_or("")
    }

    /// Set the scenario name. An empty name removes the stub from its scenario
    /// along with both state fields.
    pub fn set_scenario_name(&mut self, name: &str) {
        if name.is_empty() {
            self.scenario = None;
            self.required_scenario_state = None;
            self.new_scenario_state = None;
            return;
        }

        match self.scenario.as_mut() {
            Some(scenario) => scenario.name = name.to_string(),
            None => {
                self.scenario = Some(ScenarioRef {
                    name: name.to_string(),
                    state: None,
                })
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioRef {
    #[serde(default, deserialize_with = "de::text")]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

/// Which of the four mutually exclusive URL fields a pattern matches on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlMatchKind {
    UrlPath,
    UrlPathPattern,
    Url,
    UrlPattern,
}

impl UrlMatchKind {
    pub const ALL: [UrlMatchKind; 4] = [
        UrlMatchKind::UrlPath,
        UrlMatchKind::UrlPathPattern,
        UrlMatchKind::Url,
        UrlMatchKind::UrlPattern,
    ];

    /// JSON field name on the server
    pub fn field_name(self) -> &'static str {
        match self {
            UrlMatchKind::UrlPath => "urlPath",
            UrlMatchKind::UrlPathPattern => "urlPathPattern",
            UrlMatchKind::Url => "url",
            UrlMatchKind::UrlPattern => "urlPattern",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            UrlMatchKind::UrlPath => "URL Path",
            UrlMatchKind::UrlPathPattern => "URL Path Pattern",
            UrlMatchKind::Url => "Full URL",
            UrlMatchKind::UrlPattern => "URL Pattern",
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|k| *k == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Regex kinds are not usable as a literal request target when executing
    pub fn is_regex(self) -> bool {
        matches!(self, UrlMatchKind::UrlPathPattern | UrlMatchKind::UrlPattern)
    }
}

pub const HTTP_METHODS: [&str; 8] = [
    "GET", "POST", "PUT", "DELETE", "PATCH", "HEAD", "OPTIONS", "ANY",
];

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestPattern {
    #[serde(default, deserialize_with = "de::text")]
    pub method: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub url_path: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub url_pattern: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub url_path_pattern: Option<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, MatchRule>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub query_parameters: BTreeMap<String, MatchRule>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub body_patterns: Vec<BodyPattern>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl RequestPattern {
    /// The active URL matching field, checked in the order the editor prefers
    pub fn url_match(&self) -> Option<(UrlMatchKind, &str)> {
        let candidates = [
            (UrlMatchKind::UrlPath, &self.url_path),
            (UrlMatchKind::UrlPattern, &self.url_pattern),
            (UrlMatchKind::UrlPathPattern, &self.url_path_pattern),
            (UrlMatchKind::Url, &self.url),
        ];
        candidates
            .into_iter()
            .find_map(|(kind, value)| value.as_deref().map(|v| (kind, v)))
    }

    pub fn url_match_kind(&self) -> UrlMatchKind {
        self.url_match()
            .map(|(kind, _)| kind)
            .unwrap_or(UrlMatchKind::UrlPath)
    }

    fn slot_mut(&mut self, kind: UrlMatchKind) -> &mut Option<String> {
        match kind {
            UrlMatchKind::UrlPath => &mut self.url_path,
            UrlMatchKind::UrlPathPattern => &mut self.url_path_pattern,
            UrlMatchKind::Url => &mut self.url,
            UrlMatchKind::UrlPattern => &mut self.url_pattern,
        }
    }

    /// Switch the matching mode. The current value text moves to the new field
    /// and the other three fields are cleared.
    pub fn set_url_match_kind(&mut self, kind: UrlMatchKind) {
        let value = self
            .url_match()
            .map(|(_, v)| v.to_string())
            .unwrap_or_default();
        self.url = None;
        self.url_path = None;
        self.url_pattern = None;
        self.url_path_pattern = None;
        *self.slot_mut(kind) = Some(value);
    }

    /// Set the value of the active URL field (URL path when none is active)
    pub fn set_url_value(&mut self, value: &str) {
        let kind = self.url_match_kind();
        self.set_url_match_kind(kind);
        *self.slot_mut(kind) = Some(value.to_string());
    }

    /// True when at least one URL field holds a non-empty value
    pub fn has_url(&self) -> bool {
        [
            &self.url,
            &self.url_path,
            &self.url_pattern,
            &self.url_path_pattern,
        ]
        .iter()
        .any(|v| v.as_deref().is_some_and(|s| !s.is_empty()))
    }

    /// URL shown in list rows and searched by the list filter
    pub fn display_url(&self) -> &str {
        self.url_path
            .as_deref()
            .filter(|s| !s.is_empty())
            .or(self.url_pattern.as_deref().filter(|s| !s.is_empty()))
            .unwrap_or("/")
    }

    pub fn set_header(&mut self, name: &str, value: &str) {
        self.headers
            .insert(name.to_string(), MatchRule::equal_to(value));
    }

    pub fn set_query_parameter(&mut self, name: &str, value: &str) {
        self.query_parameters
            .insert(name.to_string(), MatchRule::equal_to(value));
    }
}

/// A single match rule for a header or query parameter
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRule {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equal_to: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub contains: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub matches: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub does_not_match: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub absent: Option<bool>,
}

impl MatchRule {
    pub fn equal_to(value: &str) -> Self {
        Self {
            equal_to: Some(value.to_string()),
            ..Default::default()
        }
    }

    /// One-line summary such as `equalTo "abc"`
    pub fn describe(&self) -> String {
        if let Some(v) = &self.equal_to {
            format!("equalTo \"{v}\"")
        } else if let Some(v) = &self.contains {
            format!("contains \"{v}\"")
        } else if let Some(v) = &self.matches {
            format!("matches \"{v}\"")
        } else if let Some(v) = &self.does_not_match {
            format!("doesNotMatch \"{v}\"")
        } else if self.absent == Some(true) {
            "absent".to_string()
        } else {
            "any".to_string()
        }
    }

    /// Value used when executing the stub's request
    pub fn sample_value(&self) -> Option<&str> {
        self.equal_to.as_deref().or(self.contains.as_deref())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyPatternKind {
    EqualToJson,
    MatchesJsonPath,
    EqualTo,
    Contains,
    Matches,
    MatchesXPath,
}

impl BodyPatternKind {
    pub const ALL: [BodyPatternKind; 6] = [
        BodyPatternKind::EqualToJson,
        BodyPatternKind::MatchesJsonPath,
        BodyPatternKind::EqualTo,
        BodyPatternKind::Contains,
        BodyPatternKind::Matches,
        BodyPatternKind::MatchesXPath,
    ];

    pub fn key(self) -> &'static str {
        match self {
            BodyPatternKind::EqualToJson => "equalToJson",
            BodyPatternKind::MatchesJsonPath => "matchesJsonPath",
            BodyPatternKind::EqualTo => "equalTo",
            BodyPatternKind::Contains => "contains",
            BodyPatternKind::Matches => "matches",
            BodyPatternKind::MatchesXPath => "matchesXPath",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.key() == key)
    }
}

/// One body matcher, serialized as a single-key object: `{"<kind>": "<value>"}`
#[derive(Debug, Clone, PartialEq)]
pub struct BodyPattern {
    pub kind: BodyPatternKind,
    pub value: String,
}

impl BodyPattern {
    pub fn new(kind: BodyPatternKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}

impl Serialize for BodyPattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.kind.key(), &self.value)?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for BodyPattern {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = Map::<String, Value>::deserialize(deserializer)?;
        // Sibling options such as `ignoreArrayOrder` are tolerated and dropped
        for (key, value) in map {
            if let Some(kind) = BodyPatternKind::from_key(&key) {
                let value = match value {
                    Value::String(s) => s,
                    other => other.to_string(),
                };
                return Ok(BodyPattern { kind, value });
            }
        }
        Err(D::Error::custom("body pattern has no recognised matcher key"))
    }
}

/// Simulated transport failure served instead of a response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Fault {
    ConnectionResetByPeer,
    EmptyResponse,
    MalformedResponseChunk,
    RandomDataThenClose,
}

impl Fault {
    pub const ALL: [Fault; 4] = [
        Fault::ConnectionResetByPeer,
        Fault::EmptyResponse,
        Fault::MalformedResponseChunk,
        Fault::RandomDataThenClose,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Fault::ConnectionResetByPeer => "Connection reset by peer",
            Fault::EmptyResponse => "Empty response",
            Fault::MalformedResponseChunk => "Malformed response chunk",
            Fault::RandomDataThenClose => "Random data then close",
        }
    }

    /// Cycle order used by the editor: none -> each fault -> none
    pub fn cycle(current: Option<Fault>) -> Option<Fault> {
        match current {
            None => Some(Self::ALL[0]),
            Some(f) => {
                let idx = Self::ALL.iter().position(|x| *x == f).unwrap_or(0);
                Self::ALL.get(idx + 1).copied()
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseDefinition {
    /// 0 when the server or the user left it unset
    #[serde(default)]
    pub status: u16,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_message: Option<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,

    #[serde(
        default,
        deserialize_with = "de::opt_string_or_json",
        skip_serializing_if = "Option::is_none"
    )]
    pub body: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixed_delay_milliseconds: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub fault: Option<Fault>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub transformers: Vec<String>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_selecting_url_kind_leaves_exactly_one_field() {
        let mut request = RequestPattern {
            url: Some("/a".to_string()),
            url_path: Some("/b".to_string()),
            ..Default::default()
        };

        for kind in UrlMatchKind::ALL {
            request.set_url_match_kind(kind);
            let set = [
                request.url.is_some(),
                request.url_path.is_some(),
                request.url_pattern.is_some(),
                request.url_path_pattern.is_some(),
            ];
            assert_eq!(set.iter().filter(|s| **s).count(), 1, "kind {kind:?}");
            assert_eq!(request.url_match_kind(), kind);
        }
    }

    #[test]
    fn test_url_kind_switch_keeps_value() {
        let mut request = RequestPattern {
            url_path: Some("/users".to_string()),
            ..Default::default()
        };
        request.set_url_match_kind(UrlMatchKind::UrlPathPattern);
        assert_eq!(request.url_path, None);
        assert_eq!(request.url_path_pattern.as_deref(), Some("/users"));
    }

    #[test]
    fn test_set_url_value_defaults_to_url_path() {
        let mut request = RequestPattern::default();
        request.set_url_value("/ping");
        assert_eq!(request.url_path.as_deref(), Some("/ping"));
        assert!(request.has_url());
    }

    #[test]
    fn test_display_url_fallback() {
        let mut request = RequestPattern::default();
        assert_eq!(request.display_url(), "/");
        request.url_pattern = Some("/api/.*".to_string());
        assert_eq!(request.display_url(), "/api/.*");
    }

    #[test]
    fn test_body_pattern_is_single_key_object() {
        let pattern = BodyPattern::new(BodyPatternKind::MatchesXPath, "//id");
        assert_eq!(
            serde_json::to_value(&pattern).unwrap(),
            json!({"matchesXPath": "//id"})
        );

        let parsed: BodyPattern =
            serde_json::from_value(json!({"equalToJson": {"a": 1}, "ignoreArrayOrder": true}))
                .unwrap();
        assert_eq!(parsed.kind, BodyPatternKind::EqualToJson);
        assert_eq!(parsed.value, r#"{"a":1}"#);
    }

    #[test]
    fn test_unknown_body_pattern_is_rejected() {
        let parsed = serde_json::from_value::<BodyPattern>(json!({"binaryEqualTo": "AA=="}));
        assert!(parsed.is_err());
    }

    #[test]
    fn test_fault_wire_names() {
        assert_eq!(
            serde_json::to_value(Fault::ConnectionResetByPeer).unwrap(),
            json!("CONNECTION_RESET_BY_PEER")
        );
        assert_eq!(
            serde_json::from_value::<Fault>(json!("RANDOM_DATA_THEN_CLOSE")).unwrap(),
            Fault::RandomDataThenClose
        );
    }

    #[test]
    fn test_fault_cycle_returns_to_none() {
        let mut fault = None;
        for _ in 0..Fault::ALL.len() {
            fault = Fault::cycle(fault);
            assert!(fault.is_some());
        }
        assert_eq!(Fault::cycle(fault), None);
    }

    #[test]
    fn test_stub_round_trip_keeps_unknown_keys() {
        let raw = json!({
            "id": 7,
            "name": "Ping",
            "request": {"method": "GET", "urlPath": "/ping", "customMatcher": {"name": "x"}},
            "response": {"status": 200, "body": "pong"},
            "uuid": "abc"
        });
        let stub: Stub = serde_json::from_value(raw).unwrap();
        assert_eq!(stub.id, "7");
        assert_eq!(stub.extra.get("uuid"), Some(&json!("abc")));
        assert!(stub.request.extra.contains_key("customMatcher"));

        let back = serde_json::to_value(&stub).unwrap();
        assert_eq!(back["uuid"], json!("abc"));
        assert_eq!(back["request"]["customMatcher"], json!({"name": "x"}));
    }

    #[test]
    fn test_clearing_scenario_name_removes_states() {
        let mut stub = Stub::default();
        stub.set_scenario_name("checkout");
        stub.required_scenario_state = Some("Started".to_string());
        stub.new_scenario_state = Some("Paid".to_string());
        assert_eq!(stub.scenario_name(), "checkout");

        stub.set_scenario_name("");
        assert!(stub.scenario.is_none());
        assert!(stub.required_scenario_state.is_none());
        assert!(stub.new_scenario_state.is_none());
    }

    #[test]
    fn test_default_stub_is_new_and_enabled() {
        let stub = Stub::default();
        assert!(stub.is_new());
        assert!(stub.is_enabled());
        assert_eq!(stub.request.url_path.as_deref(), Some("/"));
        assert_eq!(stub.response.status, 200);
    }
}
