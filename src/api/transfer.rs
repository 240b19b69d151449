use super::AdminClient;
use crate::error::ApiResult;
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

#[derive(Serialize)]
struct OpenApiImport<'a> {
    spec: &'a str,
}

impl AdminClient {
    /// Returns the stubs the server created, as raw JSON records
    pub async fn import_openapi(&self, spec: &str) -> ApiResult<Vec<Value>> {
        self.send_json(
            Method::POST,
            "/import/openapi",
            &OpenApiImport { spec },
            "Failed to import OpenAPI spec",
        )
        .await
    }

    /// The full stub set as the server's JSON document, untouched
    pub async fn export_stubs(&self) -> ApiResult<String> {
        tracing::debug!("GET /export/stubs");
        let response = self
            .send(
                self.request(Method::GET, "/export/stubs"),
                "Failed to export stubs",
            )
            .await?;
        Ok(response.text().await?)
    }
}
