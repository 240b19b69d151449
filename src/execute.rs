//! Fire a stub's request at the running mock server
//!
//! The request is derived from the stub's matching rule: a literal URL field,
//! sample values for headers and query parameters, and the first literal body
//! pattern. The response is shown as received and never affects saving.

use crate::model::{BodyPatternKind, GraphQlStub, SoapStub, Stub};
use crate::state::AppState;
use reqwest::Method;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};
use url::Url;

/// What a stub's matching rule turns into on the wire
#[derive(Debug, Clone, PartialEq)]
pub struct ExecRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// An HTTP response from the mock server
#[derive(Debug, Clone)]
pub struct ExecResponse {
    pub status: u16,
    pub status_text: String,
    /// Keys normalized to lowercase
    pub headers: HashMap<String, String>,
    pub body: String,
    pub duration: Duration,
    /// No HTTP response at all (connection refused, timeout, bad URL)
    pub is_error: bool,
    pub error_message: Option<String>,
}

impl ExecResponse {
    pub fn error(error_message: String) -> Self {
        Self {
            status: 0,
            status_text: String::new(),
            headers: HashMap::new(),
            body: String::new(),
            duration: Duration::from_secs(0),
            is_error: true,
            error_message: Some(error_message),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GraphQlRequestBody<'a> {
    query: &'a str,
    operation_name: &'a str,
    variables: serde_json::Value,
}

/// Build a full URL from a base, a path and literal query parameters
pub(crate) fn build_url_with_params(
    base_url: &str,
    path: &str,
    query_params: &BTreeMap<String, String>,
) -> Result<String, String> {
    let path = if path.starts_with('/') || path.is_empty() {
        path.to_string()
    } else {
        format!("/{path}")
    };
    let full_path = format!("{}{}", base_url.trim_end_matches('/'), path);

    let mut url = Url::parse(&full_path).map_err(|e| format!("Invalid URL: {e}"))?;

    for (key, value) in query_params {
        if !value.is_empty() {
            url.query_pairs_mut().append_pair(key, value);
        }
    }

    Ok(url.to_string())
}

fn parse_method(method: &str) -> Method {
    match method.to_uppercase().as_str() {
        "POST" => Method::POST,
        "PUT" => Method::PUT,
        "PATCH" => Method::PATCH,
        "DELETE" => Method::DELETE,
        "HEAD" => Method::HEAD,
        "OPTIONS" => Method::OPTIONS,
        // ANY and unknown methods go out as GET
        _ => Method::GET,
    }
}

/// Derive the request a REST stub would match
pub fn rest_request(stub: &Stub, mock_base: &str) -> Result<ExecRequest, String> {
    let request = &stub.request;
    let (kind, value) = request
        .url_match()
        .filter(|(_, v)| !v.is_empty())
        .ok_or_else(|| "Stub has no URL to execute".to_string())?;

    if kind.is_regex() {
        return Err(format!(
            "Cannot execute a {} match; switch to a literal URL to try it",
            kind.label()
        ));
    }

    let query: BTreeMap<String, String> = request
        .query_parameters
        .iter()
        .filter_map(|(name, rule)| rule.sample_value().map(|v| (name.clone(), v.to_string())))
        .collect();

    let url = build_url_with_params(mock_base, value, &query)?;

    let headers = request
        .headers
        .iter()
        .filter_map(|(name, rule)| rule.sample_value().map(|v| (name.clone(), v.to_string())))
        .collect();

    let body = request
        .body_patterns
        .iter()
        .find(|p| {
            matches!(
                p.kind,
                BodyPatternKind::EqualToJson
                    | BodyPatternKind::EqualTo
                    | BodyPatternKind::Contains
            )
        })
        .map(|p| p.value.clone());

    Ok(ExecRequest {
        method: parse_method(&request.method),
        url,
        headers,
        body,
    })
}

/// POST `{query, operationName, variables}` to `<mock>/graphql`
pub fn graphql_request(stub: &GraphQlStub, mock_base: &str) -> Result<ExecRequest, String> {
    let variables = match stub.variables.as_deref().filter(|v| !v.trim().is_empty()) {
        Some(text) => serde_json::from_str(text)
            .map_err(|_| "Variables must be valid JSON".to_string())?,
        None => serde_json::Value::Object(Default::default()),
    };

    let body = serde_json::to_string(&GraphQlRequestBody {
        query: &stub.query,
        operation_name: &stub.operation_name,
        variables,
    })
    .map_err(|e| e.to_string())?;

    Ok(ExecRequest {
        method: Method::POST,
        url: build_url_with_params(mock_base, "/graphql", &BTreeMap::new())?,
        headers: vec![("Content-Type".to_string(), "application/json".to_string())],
        body: Some(body),
    })
}

/// POST the request envelope to `<mock>/__admin/soap`
pub fn soap_request(stub: &SoapStub, mock_base: &str) -> Result<ExecRequest, String> {
    Ok(ExecRequest {
        method: Method::POST,
        url: build_url_with_params(mock_base, "/__admin/soap", &BTreeMap::new())?,
        headers: vec![
            (
                "Content-Type".to_string(),
                stub.soap_version.content_type().to_string(),
            ),
            ("SOAPAction".to_string(), stub.soap_action.clone()),
        ],
        body: Some(stub.request.clone()),
    })
}

/// Send the request and record what came back. Never fails: transport
/// problems come back as an error response.
pub async fn send(client: &reqwest::Client, request: ExecRequest) -> ExecResponse {
    tracing::info!(method = %request.method, url = %request.url, "executing stub request");

    let mut builder = client.request(request.method, &request.url);
    for (name, value) in &request.headers {
        builder = builder.header(name, value);
    }
    if let Some(body) = request.body {
        builder = builder.body(body);
    }

    let start = Instant::now();

    match builder.send().await {
        Ok(response) => {
            let duration = start.elapsed();
            let status = response.status().as_u16();
            let status_text = response
                .status()
                .canonical_reason()
                .unwrap_or("Unknown")
                .to_string();

            let headers: HashMap<String, String> = response
                .headers()
                .iter()
                .map(|(key, value)| {
                    (
                        key.as_str().to_lowercase(),
                        value.to_str().unwrap_or("").to_string(),
                    )
                })
                .collect();

            match response.text().await {
                Ok(body) => ExecResponse {
                    status,
                    status_text,
                    headers,
                    body,
                    duration,
                    is_error: false,
                    error_message: None,
                },
                Err(e) => ExecResponse {
                    duration,
                    ..ExecResponse::error(format!("Failed to read response body: {e}"))
                },
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "stub request failed");
            ExecResponse {
                duration: start.elapsed(),
                ..ExecResponse::error(format!("Request failed: {e}"))
            }
        }
    }
}

/// Run the request in the background and park the result in the editor state
pub fn execute_background(state: Arc<RwLock<AppState>>, request: Result<ExecRequest, String>) {
    let request = match request {
        Ok(request) => request,
        Err(message) => {
            let mut s = state.write().unwrap();
            s.editor.executing = false;
            s.editor.exec_response = Some(ExecResponse::error(message));
            return;
        }
    };

    {
        let mut s = state.write().unwrap();
        s.editor.executing = true;
        s.editor.exec_response = None;
        s.editor.response_scroll = 0;
    }

    tokio::spawn(async move {
        let client = reqwest::Client::new();
        let response = send(&client, request).await;

        let mut s = state.write().unwrap();
        s.editor.executing = false;
        s.editor.exec_response = Some(response);
    });
}
