use super::de;
use serde::{Deserialize, Serialize};

/// The server's view of one scenario state machine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioState {
    #[serde(default, deserialize_with = "de::id")]
    pub id: String,

    #[serde(default, deserialize_with = "de::text")]
    pub name: String,

    /// Current state; WireMock calls the initial one `Started`
    #[serde(default, deserialize_with = "de::text")]
    pub state: String,

    #[serde(default)]
    pub possible_states: Vec<String>,
}

/// Body of `PUT /scenarios/{id}`
#[derive(Debug, Serialize)]
pub struct ScenarioStateUpdate<'a> {
    pub state: &'a str,
}
