use super::AdminClient;
use crate::error::ApiResult;
use crate::model::RequestLog;
use reqwest::Method;

impl AdminClient {
    pub async fn list_requests(&self) -> ApiResult<Vec<RequestLog>> {
        self.get_json("/requests", "Failed to fetch requests").await
    }

    pub async fn clear_requests(&self) -> ApiResult<()> {
        self.send_empty(Method::DELETE, "/requests", "Failed to clear requests")
            .await
    }
}
