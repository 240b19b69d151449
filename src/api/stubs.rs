use super::AdminClient;
use crate::error::{ApiError, ApiResult};
use crate::model::Stub;
use reqwest::Method;

impl AdminClient {
    pub async fn list_stubs(&self) -> ApiResult<Vec<Stub>> {
        self.get_json("/stubs", "Failed to fetch stubs").await
    }

    /// `Ok(None)` when the server reports 404
    pub async fn get_stub(&self, id: &str) -> ApiResult<Option<Stub>> {
        match self
            .get_json(&format!("/stubs/{id}"), "Failed to fetch stub")
            .await
        {
            Ok(stub) => Ok(Some(stub)),
            Err(ApiError::Server { status: 404, .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub async fn create_stub(&self, stub: &Stub) -> ApiResult<Stub> {
        self.send_json(Method::POST, "/stubs", stub, "Failed to create stub")
            .await
    }

    /// Replaces the whole record. No version check is made.
    pub async fn update_stub(&self, id: &str, stub: &Stub) -> ApiResult<Stub> {
        self.send_json(
            Method::PUT,
            &format!("/stubs/{id}"),
            stub,
            "Failed to update stub",
        )
        .await
    }

    pub async fn delete_stub(&self, id: &str) -> ApiResult<()> {
        self.send_empty(
            Method::DELETE,
            &format!("/stubs/{id}"),
            "Failed to delete stub",
        )
        .await
    }

    /// JSON-mode saves send the user's document as-is
    pub async fn create_stub_raw(&self, stub: &serde_json::Value) -> ApiResult<Stub> {
        self.send_json(Method::POST, "/stubs", stub, "Failed to create stub")
            .await
    }

    pub async fn update_stub_raw(&self, id: &str, stub: &serde_json::Value) -> ApiResult<Stub> {
        self.send_json(
            Method::PUT,
            &format!("/stubs/{id}"),
            stub,
            "Failed to update stub",
        )
        .await
    }
}
