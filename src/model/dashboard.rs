use serde::{Deserialize, Serialize};

/// Aggregate counters shown on the dashboard. Read-only.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardStats {
    pub total_stubs: u64,
    pub active_stubs: u64,
    pub stubs_with_faults: u64,
    pub stubs_with_scenarios: u64,
    #[serde(rename = "totalGraphQLStubs")]
    pub total_graphql_stubs: u64,
    #[serde(rename = "activeGraphQLStubs")]
    pub active_graphql_stubs: u64,
    pub total_soap_stubs: u64,
    pub active_soap_stubs: u64,
    pub total_requests: u64,
    pub recent_requests: u64,
    pub error_requests: u64,
    pub success_requests: u64,
    /// Percentage, 0..=100
    pub success_rate: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_graphql_counters_use_server_names() {
        let stats: DashboardStats = serde_json::from_value(json!({
            "totalStubs": 4,
            "totalGraphQLStubs": 2,
            "activeGraphQLStubs": 1,
            "successRate": 87.5
        }))
        .unwrap();

        assert_eq!(stats.total_stubs, 4);
        assert_eq!(stats.total_graphql_stubs, 2);
        assert_eq!(stats.active_graphql_stubs, 1);
        assert_eq!(stats.success_rate, 87.5);
        assert_eq!(stats.total_soap_stubs, 0);
    }
}
