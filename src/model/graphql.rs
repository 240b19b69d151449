use super::de;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQlStub {
    #[serde(
        default,
        deserialize_with = "de::id",
        skip_serializing_if = "String::is_empty"
    )]
    pub id: String,

    #[serde(default, deserialize_with = "de::text")]
    pub name: String,

    #[serde(default, deserialize_with = "de::text")]
    pub operation_name: String,

    #[serde(default, deserialize_with = "de::text")]
    pub query: String,

    /// JSON text
    #[serde(
        default,
        deserialize_with = "de::opt_string_or_json",
        skip_serializing_if = "Option::is_none"
    )]
    pub variables: Option<String>,

    /// JSON text of the whole GraphQL response document
    #[serde(default, deserialize_with = "de::string_or_json")]
    pub response: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub scenario_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_scenario_state: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_scenario_state: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub persistent: Option<bool>,

    #[serde(default = "enabled_default")]
    pub enabled: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

fn enabled_default() -> bool {
    true
}

impl Default for GraphQlStub {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: "New GraphQL Stub".to_string(),
            operation_name: String::new(),
            query: String::new(),
            variables: None,
            response: r#"{"data": {}}"#.to_string(),
            priority: None,
            scenario_name: None,
            required_scenario_state: None,
            new_scenario_state: None,
            persistent: None,
            enabled: true,
            metadata: None,
            extra: BTreeMap::new(),
        }
    }
}

impl GraphQlStub {
    pub fn is_new(&self) -> bool {
        self.id.is_empty()
    }

    /// The operation keyword of the query text (`query`, `mutation`, `subscription`)
    pub fn operation_type(&self) -> Option<&'static str> {
        let query = self.query.trim_start();
        ["query", "mutation", "subscription"]
            .into_iter()
            .find(|kw| query.starts_with(kw))
            .or_else(|| query.starts_with('{').then_some("query"))
    }
}
