use super::AdminClient;
use crate::error::ApiResult;
use crate::model::SoapStub;
use reqwest::Method;
use serde::Serialize;

#[derive(Serialize)]
struct WsdlValidation<'a> {
    url: &'a str,
}

impl AdminClient {
    pub async fn list_soap_stubs(&self) -> ApiResult<Vec<SoapStub>> {
        self.get_json("/soap-stubs", "Failed to fetch SOAP stubs").await
    }

    pub async fn get_soap_stub(&self, id: &str) -> ApiResult<SoapStub> {
        self.get_json(&format!("/soap-stubs/{id}"), "Failed to fetch SOAP stub")
            .await
    }

    pub async fn create_soap_stub(&self, stub: &SoapStub) -> ApiResult<SoapStub> {
        self.send_json(
            Method::POST,
            "/soap-stubs",
            stub,
            "Failed to create SOAP stub",
        )
        .await
    }

    pub async fn update_soap_stub(&self, id: &str, stub: &SoapStub) -> ApiResult<SoapStub> {
        self.send_json(
            Method::PUT,
            &format!("/soap-stubs/{id}"),
            stub,
            "Failed to update SOAP stub",
        )
        .await
    }

    pub async fn delete_soap_stub(&self, id: &str) -> ApiResult<()> {
        self.send_empty(
            Method::DELETE,
            &format!("/soap-stubs/{id}"),
            "Failed to delete SOAP stub",
        )
        .await
    }

    /// Succeeds when the server accepts the WSDL; the body is ignored
    pub async fn validate_wsdl(&self, url: &str) -> ApiResult<()> {
        let builder = self
            .request(Method::POST, "/soap-stubs/validate-wsdl")
            .json(&WsdlValidation { url });
        self.send(builder, "Failed to validate WSDL").await?;
        Ok(())
    }
}
