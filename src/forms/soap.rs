use super::{
    format_pairs, optional_number, optional_text, parse_map, parse_metadata, pretty_json, yes_no,
    FormModel,
};
use crate::model::{ScenarioRef, SoapStub, XPathMatchType, XPathMatcher};
use crate::types::{EditorTab, FieldKind};
use crate::validate::{validate_soap, Validation};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoapField {
    SoapAction,
    Version,
    WsdlUrl,
    RequestXml,
    Namespaces,
    XPathMatchers,
    ResponseXml,
    ScenarioName,
    ScenarioState,
    Name,
    Priority,
    Persistent,
    Enabled,
    Metadata,
}

/// `matchType|xpath|expected` per line; the match type may be left out
fn format_matchers(matchers: &[XPathMatcher]) -> String {
    matchers
        .iter()
        .map(|m| format!("{}|{}|{}", m.match_type.as_str(), m.xpath, m.expected_value))
        .collect::<Vec<_>>()
        .join("\n")
}

fn parse_matchers(text: &str) -> Result<Vec<XPathMatcher>, String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            let parts: Vec<&str> = line.splitn(3, '|').map(str::trim).collect();
            let (match_type, xpath, expected) = match parts.as_slice() {
                [kind, xpath, expected] => {
                    let kind = XPathMatchType::parse(kind)
                        .ok_or_else(|| format!("Unknown match type \"{kind}\""))?;
                    (kind, *xpath, *expected)
                }
                [xpath, expected] => (XPathMatchType::EqualTo, *xpath, *expected),
                _ => return Err(format!("Expected matchType|xpath|expected, got \"{line}\"")),
            };
            Ok(XPathMatcher {
                xpath: xpath.to_string(),
                expected_value: expected.to_string(),
                match_type,
            })
        })
        .collect()
}

impl FormModel for SoapStub {
    type Field = SoapField;
    const NOUN: &'static str = "SOAP stub";

    fn fields(tab: EditorTab) -> &'static [SoapField] {
        match tab {
            EditorTab::Request => &[
                SoapField::SoapAction,
                SoapField::Version,
                SoapField::WsdlUrl,
                SoapField::RequestXml,
                SoapField::Namespaces,
                SoapField::XPathMatchers,
            ],
            EditorTab::Response => &[SoapField::ResponseXml],
            EditorTab::Scenarios => &[SoapField::ScenarioName, SoapField::ScenarioState],
            EditorTab::Advanced => &[
                SoapField::Name,
                SoapField::Priority,
                SoapField::Persistent,
                SoapField::Enabled,
                SoapField::Metadata,
            ],
        }
    }

    fn label(field: SoapField) -> &'static str {
        match field {
            SoapField::SoapAction => "SOAP Action",
            SoapField::Version => "SOAP Version",
            SoapField::WsdlUrl => "WSDL URL",
            SoapField::RequestXml => "Request XML",
            SoapField::Namespaces => "XML Namespaces (prefix=uri)",
            SoapField::XPathMatchers => "XPath Matchers (matchType|xpath|expected)",
            SoapField::ResponseXml => "Response XML",
            SoapField::ScenarioName => "Scenario",
            SoapField::ScenarioState => "Scenario State",
            SoapField::Name => "Name",
            SoapField::Priority => "Priority",
            SoapField::Persistent => "Persistent",
            SoapField::Enabled => "Enabled",
            SoapField::Metadata => "Metadata (JSON)",
        }
    }

    fn kind(field: SoapField) -> FieldKind {
        match field {
            SoapField::Version => FieldKind::Cycle,
            SoapField::Persistent | SoapField::Enabled => FieldKind::Toggle,
            SoapField::RequestXml
            | SoapField::ResponseXml
            | SoapField::Namespaces
            | SoapField::XPathMatchers
            | SoapField::Metadata => FieldKind::Multiline,
            _ => FieldKind::Line,
        }
    }

    fn value(&self, field: SoapField) -> String {
        match field {
            SoapField::SoapAction => self.soap_action.clone(),
            SoapField::Version => self.soap_version.as_str().to_string(),
            SoapField::WsdlUrl => self.wsdl_url.clone().unwrap_or_default(),
            SoapField::RequestXml => self.request.clone(),
            // Unparseable tables are shown raw so the user can see what is wrong
            SoapField::Namespaces => self
                .namespaces()
                .map(|ns| format_pairs(&ns))
                .unwrap_or_else(|_| self.xml_namespaces.clone()),
            SoapField::XPathMatchers => self
                .matchers()
                .map(|m| format_matchers(&m))
                .unwrap_or_else(|_| self.xpath_matchers.clone()),
            SoapField::ResponseXml => self.response.clone(),
            SoapField::ScenarioName => self
                .scenario
                .as_ref()
                .map(|s| s.name.clone())
                .unwrap_or_default(),
            SoapField::ScenarioState => self
                .scenario
                .as_ref()
                .and_then(|s| s.state.clone())
                .unwrap_or_default(),
            SoapField::Name => self.name.clone(),
            SoapField::Priority => self.priority.map(|p| p.to_string()).unwrap_or_default(),
            SoapField::Persistent => yes_no(self.persistent.unwrap_or(false)),
            SoapField::Enabled => yes_no(self.is_enabled()),
            SoapField::Metadata => pretty_json(&self.metadata),
        }
    }

    fn set_value(&mut self, field: SoapField, text: &str) -> Result<(), String> {
        match field {
            SoapField::SoapAction => self.soap_action = text.trim().to_string(),
            SoapField::WsdlUrl => self.wsdl_url = optional_text(text),
            SoapField::RequestXml => self.request = text.to_string(),
            SoapField::Namespaces => self.set_namespaces(&parse_map(text)?),
            SoapField::XPathMatchers => self.set_matchers(&parse_matchers(text)?),
            SoapField::ResponseXml => self.response = text.to_string(),
            SoapField::ScenarioName => match optional_text(text) {
                None => self.scenario = None,
                Some(name) => match self.scenario.as_mut() {
                    Some(scenario) => scenario.name = name,
                    None => self.scenario = Some(ScenarioRef { name, state: None }),
                },
            },
            SoapField::ScenarioState => {
                if let Some(scenario) = self.scenario.as_mut() {
                    scenario.state = optional_text(text);
                } else if !text.trim().is_empty() {
                    return Err("Set a scenario name first".to_string());
                }
            }
            SoapField::Name => self.name = text.trim().to_string(),
            SoapField::Priority => self.priority = optional_number(text, "Priority must be a number")?,
            SoapField::Metadata => self.metadata = parse_metadata(text)?,
            SoapField::Version | SoapField::Persistent | SoapField::Enabled => self.cycle(field),
        }
        Ok(())
    }

    fn cycle(&mut self, field: SoapField) {
        match field {
            SoapField::Version => self.soap_version = self.soap_version.toggle(),
            SoapField::Persistent => self.persistent = Some(!self.persistent.unwrap_or(false)),
            SoapField::Enabled => self.enabled = Some(!self.is_enabled()),
            _ => {}
        }
    }

    fn hint(&self, field: SoapField) -> Option<String> {
        match field {
            SoapField::WsdlUrl => Some("press v to validate".to_string()),
            SoapField::XPathMatchers => Some("match types: equalTo, contains, matches".to_string()),
            _ => None,
        }
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: &str) {
        self.id = id.to_string();
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn validate(&self) -> Validation {
        validate_soap(self)
    }
}
