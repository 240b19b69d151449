use super::AdminClient;
use crate::error::ApiResult;
use crate::model::DashboardStats;

impl AdminClient {
    pub async fn dashboard_stats(&self) -> ApiResult<DashboardStats> {
        self.get_json("/dashboard/stats", "Failed to fetch dashboard statistics")
            .await
    }
}
