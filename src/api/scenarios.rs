use super::AdminClient;
use crate::error::ApiResult;
use crate::model::scenario::ScenarioStateUpdate;
use crate::model::ScenarioState;
use reqwest::Method;

impl AdminClient {
    pub async fn list_scenarios(&self) -> ApiResult<Vec<ScenarioState>> {
        self.get_json("/scenarios", "Failed to fetch scenarios").await
    }

    pub async fn set_scenario_state(&self, id: &str, state: &str) -> ApiResult<ScenarioState> {
        self.send_json(
            Method::PUT,
            &format!("/scenarios/{id}"),
            &ScenarioStateUpdate { state },
            "Failed to update scenario",
        )
        .await
    }

    pub async fn reset_scenarios(&self) -> ApiResult<()> {
        self.send_empty(Method::POST, "/scenarios/reset", "Failed to reset scenarios")
            .await
    }
}
