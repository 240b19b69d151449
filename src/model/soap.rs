use super::de;
use super::stub::ScenarioRef;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

pub const DEFAULT_SOAP_REQUEST: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
  <soap:Body>
    <Request xmlns="http://example.com/soap">
      <Input>Example</Input>
    </Request>
  </soap:Body>
</soap:Envelope>"#;

pub const DEFAULT_SOAP_RESPONSE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
  <soap:Body>
    <Response xmlns="http://example.com/soap">
      <Result>Success</Result>
    </Response>
  </soap:Body>
</soap:Envelope>"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SoapVersion {
    #[default]
    #[serde(rename = "1.1")]
    V11,
    #[serde(rename = "1.2")]
    V12,
}

impl SoapVersion {
    pub fn as_str(self) -> &'static str {
        match self {
            SoapVersion::V11 => "1.1",
            SoapVersion::V12 => "1.2",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            SoapVersion::V11 => SoapVersion::V12,
            SoapVersion::V12 => SoapVersion::V11,
        }
    }

    /// Content type a client of this SOAP version sends
    pub fn content_type(self) -> &'static str {
        match self {
            SoapVersion::V11 => "text/xml; charset=utf-8",
            SoapVersion::V12 => "application/soap+xml; charset=utf-8",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum XPathMatchType {
    #[default]
    EqualTo,
    Contains,
    Matches,
}

impl XPathMatchType {
    pub fn as_str(self) -> &'static str {
        match self {
            XPathMatchType::EqualTo => "equalTo",
            XPathMatchType::Contains => "contains",
            XPathMatchType::Matches => "matches",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "equalTo" => Some(XPathMatchType::EqualTo),
            "contains" => Some(XPathMatchType::Contains),
            "matches" => Some(XPathMatchType::Matches),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct XPathMatcher {
    #[serde(default)]
    pub xpath: String,
    #[serde(default)]
    pub expected_value: String,
    #[serde(default)]
    pub match_type: XPathMatchType,
}

/// A SOAP stub: the base stub shape with XML bodies plus SOAP specifics.
///
/// `xml_namespaces` and `xpath_matchers` are JSON text on the wire; the typed
/// accessors parse and re-serialize them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoapStub {
    #[serde(
        default,
        deserialize_with = "de::id",
        skip_serializing_if = "String::is_empty"
    )]
    pub id: String,

    #[serde(default, deserialize_with = "de::text")]
    pub name: String,

    #[serde(default, deserialize_with = "de::text")]
    pub request: String,

    #[serde(default, deserialize_with = "de::text")]
    pub response: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub scenario: Option<ScenarioRef>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub persistent: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,

    #[serde(default, deserialize_with = "de::text")]
    pub soap_action: String,

    #[serde(default)]
    pub soap_version: SoapVersion,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub wsdl_url: Option<String>,

    #[serde(default, deserialize_with = "de::text")]
    pub xml_namespaces: String,

    #[serde(default, deserialize_with = "de::text")]
    pub xpath_matchers: String,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Default for SoapStub {
    fn default() -> Self {
        let namespaces = BTreeMap::from([
            (
                "soap".to_string(),
                "http://schemas.xmlsoap.org/soap/envelope/".to_string(),
            ),
            ("ns1".to_string(), "http://example.com/soap".to_string()),
        ]);

        Self {
            id: String::new(),
            name: "New SOAP Stub".to_string(),
            request: DEFAULT_SOAP_REQUEST.to_string(),
            response: DEFAULT_SOAP_RESPONSE.to_string(),
            priority: Some(0),
            scenario: None,
            persistent: Some(false),
            enabled: Some(true),
            metadata: None,
            soap_action: String::new(),
            soap_version: SoapVersion::V11,
            wsdl_url: None,
            xml_namespaces: serde_json::to_string(&namespaces).unwrap_or_default(),
            xpath_matchers: "[]".to_string(),
            extra: BTreeMap::new(),
        }
    }
}

impl SoapStub {
    pub fn is_new(&self) -> bool {
        self.id.is_empty()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }

    /// Parsed prefix -> URI table. Blank text is an empty table.
    pub fn namespaces(&self) -> Result<BTreeMap<String, String>, serde_json::Error> {
        if self.xml_namespaces.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&self.xml_namespaces)
    }

    pub fn set_namespaces(&mut self, namespaces: &BTreeMap<String, String>) {
        self.xml_namespaces = serde_json::to_string(namespaces).unwrap_or_default();
    }

    pub fn matchers(&self) -> Result<Vec<XPathMatcher>, serde_json::Error> {
        if self.xpath_matchers.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&self.xpath_matchers)
    }

    pub fn set_matchers(&mut self, matchers: &[XPathMatcher]) {
        self.xpath_matchers = serde_json::to_string(matchers).unwrap_or_default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_side_tables_parse() {
        let stub = SoapStub::default();
        let ns = stub.namespaces().unwrap();
        assert_eq!(ns.len(), 2);
        assert!(ns.contains_key("soap"));
        assert!(stub.matchers().unwrap().is_empty());
    }

    #[test]
    fn test_set_matchers_serializes_camel_case() {
        let mut stub = SoapStub::default();
        stub.set_matchers(&[XPathMatcher {
            xpath: "//Result".to_string(),
            expected_value: "Success".to_string(),
            match_type: XPathMatchType::Contains,
        }]);

        let raw: Value = serde_json::from_str(&stub.xpath_matchers).unwrap();
        assert_eq!(
            raw,
            json!([{"xpath": "//Result", "expectedValue": "Success", "matchType": "contains"}])
        );
        assert_eq!(stub.matchers().unwrap()[0].match_type, XPathMatchType::Contains);
    }

    #[test]
    fn test_version_wire_format() {
        assert_eq!(serde_json::to_value(SoapVersion::V12).unwrap(), json!("1.2"));
        let stub: SoapStub =
            serde_json::from_value(json!({"name": "x", "soapVersion": "1.2"})).unwrap();
        assert_eq!(stub.soap_version, SoapVersion::V12);
        assert_eq!(stub.soap_version.toggle(), SoapVersion::V11);
    }

    #[test]
    fn test_invalid_namespace_text_is_an_error() {
        let stub = SoapStub {
            xml_namespaces: "{soap:".to_string(),
            ..Default::default()
        };
        assert!(stub.namespaces().is_err());
    }
}
