//! Client-side checks run before any save reaches the network
//!
//! Each validator returns every problem it finds, in display order, so the
//! editor can show the whole list at once.

use crate::model::{GraphQlStub, SoapStub, Stub};
use serde_json::Value;

pub type Validation = Result<(), Vec<String>>;

pub const INVALID_JSON: &str = "Invalid JSON format";
pub const MISSING_STUB_KEYS: &str = "Stub must have name, request, and response properties";

/// Namespace prefixes accepted in front of `Envelope` / `Body`
const SOAP_PREFIXES: [&str; 5] = ["soap:", "soapenv:", "SOAP-ENV:", "env:", ""];

fn finish(errors: Vec<String>) -> Validation {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Required fields of a REST stub edited through the form
pub fn validate_rest_form(stub: &Stub) -> Validation {
    let mut errors = Vec::new();

    if stub.name.trim().is_empty() {
        errors.push("Name is required".to_string());
    }
    if stub.request.method.trim().is_empty() {
        errors.push("HTTP method is required".to_string());
    }
    if !stub.request.has_url() {
        errors.push("URL pattern or path is required".to_string());
    }
    match stub.response.status {
        0 => errors.push("Response status is required".to_string()),
        100..=599 => {}
        _ => errors.push("Response status must be between 100 and 599".to_string()),
    }

    finish(errors)
}

/// JSON-mode save: the text must parse and carry non-empty `name`, `request`
/// and `response` keys. Returns the parsed document on success.
pub fn validate_rest_json(text: &str) -> Result<Value, Vec<String>> {
    let value: Value =
        serde_json::from_str(text).map_err(|_| vec![INVALID_JSON.to_string()])?;

    let present = |key: &str| value.get(key).is_some_and(is_truthy);
    if !(present("name") && present("request") && present("response")) {
        return Err(vec![MISSING_STUB_KEYS.to_string()]);
    }

    Ok(value)
}

/// Loose truthiness: null, false, 0 and "" count as missing
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

pub fn validate_graphql(stub: &GraphQlStub) -> Validation {
    let mut errors = Vec::new();

    if stub.name.trim().is_empty() {
        errors.push("Name is required".to_string());
    }
    if stub.operation_name.trim().is_empty() {
        errors.push("Operation name is required".to_string());
    }

    if stub.query.trim().is_empty() {
        errors.push("Query is required".to_string());
    } else if !["query", "mutation", "subscription"]
        .iter()
        .any(|kw| stub.query.contains(kw))
    {
        errors.push(
            "Query must contain a query, mutation, or subscription operation".to_string(),
        );
    }

    if stub.response.trim().is_empty() {
        errors.push("Response is required".to_string());
    } else {
        match serde_json::from_str::<Value>(&stub.response) {
            Ok(doc) => {
                if doc.get("data").is_none() && doc.get("errors").is_none() {
                    errors.push("Response must contain a \"data\" or \"errors\" field".to_string());
                }
            }
            Err(_) => errors.push("Response must be valid JSON".to_string()),
        }
    }

    if let Some(variables) = stub.variables.as_deref().filter(|v| !v.trim().is_empty()) {
        if serde_json::from_str::<Value>(variables).is_err() {
            errors.push("Variables must be valid JSON".to_string());
        }
    }

    finish(errors)
}

fn has_soap_marker(xml: &str, local_name: &str) -> bool {
    SOAP_PREFIXES
        .iter()
        .any(|prefix| xml.contains(&format!("<{prefix}{local_name}")))
}

/// Substring heuristic, not an XML parse: the text must open with an XML
/// declaration or an envelope tag and mention both an envelope and a body.
pub fn looks_like_soap_envelope(xml: &str) -> bool {
    let xml = xml.trim_start();
    let opens_correctly = xml.starts_with("<?xml")
        || SOAP_PREFIXES
            .iter()
            .any(|prefix| xml.starts_with(&format!("<{prefix}Envelope")));

    opens_correctly && has_soap_marker(xml, "Envelope") && has_soap_marker(xml, "Body")
}

pub fn validate_soap(stub: &SoapStub) -> Validation {
    let mut errors = Vec::new();

    if stub.name.trim().is_empty() {
        errors.push("Name is required".to_string());
    }
    if stub.soap_action.trim().is_empty() {
        errors.push("SOAP Action is required".to_string());
    }

    if stub.request.trim().is_empty() {
        errors.push("Request XML is required".to_string());
    } else if !looks_like_soap_envelope(&stub.request) {
        errors.push("Request XML must be a SOAP envelope with a Body".to_string());
    }

    if stub.response.trim().is_empty() {
        errors.push("Response XML is required".to_string());
    } else if !looks_like_soap_envelope(&stub.response) {
        errors.push("Response XML must be a SOAP envelope with a Body".to_string());
    }

    if stub.namespaces().is_err() {
        errors.push("XML Namespaces must be valid JSON".to_string());
    }
    if stub.matchers().is_err() {
        errors.push("XPath Matchers must be valid JSON".to_string());
    }

    finish(errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RequestPattern;

    #[test]
    fn test_default_rest_stub_is_valid() {
        assert!(validate_rest_form(&Stub::default()).is_ok());
    }

    #[test]
    fn test_rest_stub_missing_everything() {
        let stub = Stub {
            name: String::new(),
            request: RequestPattern::default(),
            response: Default::default(),
            ..Default::default()
        };

        let errors = validate_rest_form(&stub).unwrap_err();
        assert_eq!(
            errors,
            vec![
                "Name is required",
                "HTTP method is required",
                "URL pattern or path is required",
                "Response status is required",
            ]
        );
    }

    #[test]
    fn test_empty_url_value_counts_as_missing() {
        let mut stub = Stub::default();
        stub.request.url_path = Some(String::new());
        let errors = validate_rest_form(&stub).unwrap_err();
        assert_eq!(errors, vec!["URL pattern or path is required"]);
    }

    #[test]
    fn test_status_out_of_range() {
        let mut stub = Stub::default();
        stub.response.status = 600;
        let errors = validate_rest_form(&stub).unwrap_err();
        assert_eq!(errors, vec!["Response status must be between 100 and 599"]);
    }

    #[test]
    fn test_json_mode_requires_parseable_text() {
        assert_eq!(validate_rest_json("{name:").unwrap_err(), vec![INVALID_JSON]);
    }

    #[test]
    fn test_json_mode_requires_keys() {
        let errors = validate_rest_json(r#"{"name": "x", "request": {}}"#).unwrap_err();
        assert_eq!(errors, vec![MISSING_STUB_KEYS]);

        let errors =
            validate_rest_json(r#"{"name": "", "request": {}, "response": {}}"#).unwrap_err();
        assert_eq!(errors, vec![MISSING_STUB_KEYS]);

        assert!(validate_rest_json(r#"{"name": "x", "request": {}, "response": {}}"#).is_ok());
    }

    fn graphql_stub() -> GraphQlStub {
        GraphQlStub {
            name: "User".to_string(),
            operation_name: "GetUser".to_string(),
            query: "query GetUser { user { id } }".to_string(),
            response: r#"{"data": {"user": null}}"#.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_graphql_valid() {
        assert!(validate_graphql(&graphql_stub()).is_ok());

        let mut stub = graphql_stub();
        stub.response = r#"{"errors": [{"message": "nope"}]}"#.to_string();
        assert!(validate_graphql(&stub).is_ok());
    }

    #[test]
    fn test_graphql_response_not_json() {
        let mut stub = graphql_stub();
        stub.response = "data: {}".to_string();
        assert_eq!(
            validate_graphql(&stub).unwrap_err(),
            vec!["Response must be valid JSON"]
        );
    }

    #[test]
    fn test_graphql_response_without_data_or_errors() {
        let mut stub = graphql_stub();
        stub.response = r#"{"result": 1}"#.to_string();
        assert_eq!(
            validate_graphql(&stub).unwrap_err(),
            vec![r#"Response must contain a "data" or "errors" field"#]
        );
    }

    #[test]
    fn test_graphql_query_keyword_and_variables() {
        let mut stub = graphql_stub();
        stub.query = "{ user { id } }".to_string();
        stub.variables = Some("{id: 1}".to_string());
        assert_eq!(
            validate_graphql(&stub).unwrap_err(),
            vec![
                "Query must contain a query, mutation, or subscription operation",
                "Variables must be valid JSON",
            ]
        );
    }

    #[test]
    fn test_blank_variables_are_ignored() {
        let mut stub = graphql_stub();
        stub.variables = Some("   ".to_string());
        assert!(validate_graphql(&stub).is_ok());
    }

    #[test]
    fn test_envelope_heuristic() {
        assert!(looks_like_soap_envelope(
            crate::model::soap::DEFAULT_SOAP_REQUEST
        ));
        assert!(looks_like_soap_envelope(
            "<soapenv:Envelope><soapenv:Body/></soapenv:Envelope>"
        ));
        assert!(!looks_like_soap_envelope(
            "<?xml version=\"1.0\"?><soap:Envelope></soap:Envelope>"
        ));
        assert!(!looks_like_soap_envelope("<Request><Body/></Request>"));
        assert!(!looks_like_soap_envelope("hello <soap:Envelope><soap:Body/>"));
    }

    #[test]
    fn test_default_soap_stub_needs_action() {
        let errors = validate_soap(&SoapStub::default()).unwrap_err();
        assert_eq!(errors, vec!["SOAP Action is required"]);
    }

    #[test]
    fn test_soap_rejects_missing_body_and_bad_tables() {
        let stub = SoapStub {
            soap_action: "urn:Get".to_string(),
            response: "<soap:Envelope></soap:Envelope>".to_string(),
            xml_namespaces: "{".to_string(),
            xpath_matchers: "[{]".to_string(),
            ..Default::default()
        };
        assert_eq!(
            validate_soap(&stub).unwrap_err(),
            vec![
                "Response XML must be a SOAP envelope with a Body",
                "XML Namespaces must be valid JSON",
                "XPath Matchers must be valid JSON",
            ]
        );
    }
}
