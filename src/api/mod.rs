//! Typed client for the WireMock UI admin API
//!
//! One method per (resource, operation). Every method issues exactly one HTTP
//! request; there are no retries and no pagination. A non-2xx answer becomes
//! [`ApiError::Server`] carrying the response text, or the operation's fallback
//! message when the server sent an empty body.

mod dashboard;
mod graphql;
mod journal;
mod recording;
mod scenarios;
mod soap;
mod stubs;
mod transfer;

use crate::error::{ApiError, ApiResult};
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

pub const DEFAULT_API_BASE: &str = "http://localhost:8080/api";

#[derive(Debug, Clone)]
pub struct AdminClient {
    http: reqwest::Client,
    base_url: String,
}

impl Default for AdminClient {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE)
    }
}

impl AdminClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, self.endpoint(path))
    }

    /// Send the request and turn a non-2xx status into an error
    async fn send(&self, builder: RequestBuilder, fallback: &str) -> ApiResult<Response> {
        let response = builder.send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let message = if text.trim().is_empty() {
            fallback.to_string()
        } else {
            text
        };

        tracing::warn!(status = status.as_u16(), %message, "admin API call failed");
        Err(ApiError::Server {
            status: status.as_u16(),
            message,
        })
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, fallback: &str) -> ApiResult<T> {
        tracing::debug!(path, "GET");
        let response = self.send(self.request(Method::GET, path), fallback).await?;
        Self::decode(response).await
    }

    async fn send_json<B, T>(
        &self,
        method: Method,
        path: &str,
        body: &B,
        fallback: &str,
    ) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        tracing::debug!(%method, path, "sending JSON body");
        let builder = self.request(method, path).json(body);
        let response = self.send(builder, fallback).await?;
        Self::decode(response).await
    }

    /// For calls whose success body is irrelevant (DELETE, resets, recording control)
    async fn send_empty(&self, method: Method, path: &str, fallback: &str) -> ApiResult<()> {
        tracing::debug!(%method, path, "sending");
        self.send(self.request(method, path), fallback).await?;
        Ok(())
    }
}
