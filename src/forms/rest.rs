use super::{
    format_pairs, optional_number, optional_text, parse_map, parse_metadata, parse_pairs,
    pretty_json, yes_no, FormModel,
};
use crate::model::stub::HTTP_METHODS;
use crate::model::{BodyPattern, BodyPatternKind, Fault, MatchRule, Stub};
use crate::types::{EditorTab, FieldKind};
use crate::validate::{validate_rest_form, Validation};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestField {
    Method,
    UrlKind,
    UrlValue,
    RequestHeaders,
    QueryParams,
    BodyPatterns,
    Status,
    ResponseHeaders,
    Body,
    Delay,
    Fault,
    ScenarioName,
    RequiredState,
    NewState,
    Name,
    Priority,
    Persistent,
    Enabled,
    Metadata,
}

const REQUEST_FIELDS: &[RestField] = &[
    RestField::Method,
    RestField::UrlKind,
    RestField::UrlValue,
    RestField::RequestHeaders,
    RestField::QueryParams,
    RestField::BodyPatterns,
];

const RESPONSE_FIELDS: &[RestField] = &[
    RestField::Status,
    RestField::ResponseHeaders,
    RestField::Body,
    RestField::Delay,
    RestField::Fault,
];

const SCENARIO_FIELDS: &[RestField] = &[
    RestField::ScenarioName,
    RestField::RequiredState,
    RestField::NewState,
];

const ADVANCED_FIELDS: &[RestField] = &[
    RestField::Name,
    RestField::Priority,
    RestField::Persistent,
    RestField::Enabled,
    RestField::Metadata,
];

/// Only plain `equalTo` rules are edited as rows; other rules stay as they are
fn equal_to_rows(rules: &BTreeMap<String, MatchRule>) -> String {
    let rows: BTreeMap<&String, &String> = rules
        .iter()
        .filter_map(|(name, rule)| rule.equal_to.as_ref().map(|v| (name, v)))
        .collect();
    format_pairs(rows)
}

fn replace_equal_to_rows(
    rules: &mut BTreeMap<String, MatchRule>,
    text: &str,
) -> Result<(), String> {
    let rows = parse_pairs(text)?;
    rules.retain(|_, rule| rule.equal_to.is_none());
    for (name, value) in rows {
        rules.insert(name, MatchRule::equal_to(&value));
    }
    Ok(())
}

fn other_rules_hint(rules: &BTreeMap<String, MatchRule>) -> Option<String> {
    let others: Vec<String> = rules
        .iter()
        .filter(|(_, rule)| rule.equal_to.is_none())
        .map(|(name, rule)| format!("{name} {}", rule.describe()))
        .collect();
    (!others.is_empty()).then(|| format!("JSON mode only: {}", others.join(", ")))
}

fn parse_body_patterns(text: &str) -> Result<Vec<BodyPattern>, String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            let (key, value) = line
                .split_once(':')
                .ok_or_else(|| format!("Expected kind:value, got \"{line}\""))?;
            let kind = BodyPatternKind::from_key(key.trim())
                .ok_or_else(|| format!("Unknown body pattern \"{}\"", key.trim()))?;
            Ok(BodyPattern::new(kind, value.trim()))
        })
        .collect()
}

impl FormModel for Stub {
    type Field = RestField;
    const NOUN: &'static str = "stub";

    fn fields(tab: EditorTab) -> &'static [RestField] {
        match tab {
            EditorTab::Request => REQUEST_FIELDS,
            EditorTab::Response => RESPONSE_FIELDS,
            EditorTab::Scenarios => SCENARIO_FIELDS,
            EditorTab::Advanced => ADVANCED_FIELDS,
        }
    }

    fn label(field: RestField) -> &'static str {
        match field {
            RestField::Method => "Method",
            RestField::UrlKind => "URL Match",
            RestField::UrlValue => "URL",
            RestField::RequestHeaders => "Headers (name=value)",
            RestField::QueryParams => "Query Params (name=value)",
            RestField::BodyPatterns => "Body Patterns (kind:value)",
            RestField::Status => "Status",
            RestField::ResponseHeaders => "Headers (name=value)",
            RestField::Body => "Body",
            RestField::Delay => "Fixed Delay (ms)",
            RestField::Fault => "Fault",
            RestField::ScenarioName => "Scenario",
            RestField::RequiredState => "Required State",
            RestField::NewState => "New State",
            RestField::Name => "Name",
            RestField::Priority => "Priority",
            RestField::Persistent => "Persistent",
            RestField::Enabled => "Enabled",
            RestField::Metadata => "Metadata (JSON)",
        }
    }

    fn kind(field: RestField) -> FieldKind {
        match field {
            RestField::Method | RestField::UrlKind | RestField::Fault => FieldKind::Cycle,
            RestField::Persistent | RestField::Enabled => FieldKind::Toggle,
            RestField::RequestHeaders
            | RestField::QueryParams
            | RestField::BodyPatterns
            | RestField::ResponseHeaders
            | RestField::Body
            | RestField::Metadata => FieldKind::Multiline,
            _ => FieldKind::Line,
        }
    }

    fn value(&self, field: RestField) -> String {
        let request = &self.request;
        let response = &self.response;
        match field {
            RestField::Method => request.method.clone(),
            RestField::UrlKind => request.url_match_kind().label().to_string(),
            RestField::UrlValue => request
                .url_match()
                .map(|(_, v)| v.to_string())
                .unwrap_or_default(),
            RestField::RequestHeaders => equal_to_rows(&request.headers),
            RestField::QueryParams => equal_to_rows(&request.query_parameters),
            RestField::BodyPatterns => request
                .body_patterns
                .iter()
                .map(|p| format!("{}:{}", p.kind.key(), p.value))
                .collect::<Vec<_>>()
                .join("\n"),
            RestField::Status => match response.status {
                0 => String::new(),
                status => status.to_string(),
            },
            RestField::ResponseHeaders => format_pairs(&response.headers),
            RestField::Body => response.body.clone().unwrap_or_default(),
            RestField::Delay => response
                .fixed_delay_milliseconds
                .map(|d| d.to_string())
                .unwrap_or_default(),
            RestField::Fault => response
                .fault
                .map(|f| f.label().to_string())
                .unwrap_or_else(|| "None".to_string()),
            RestField::ScenarioName => self.scenario_name().to_string(),
            RestField::RequiredState => self.required_scenario_state.clone().unwrap_or_default(),
            RestField::NewState => self.new_scenario_state.clone().unwrap_or_default(),
            RestField::Name => self.name.clone(),
            RestField::Priority => self.priority.map(|p| p.to_string()).unwrap_or_default(),
            RestField::Persistent => yes_no(self.persistent.unwrap_or(false)),
            RestField::Enabled => yes_no(self.is_enabled()),
            RestField::Metadata => pretty_json(&self.metadata),
        }
    }

    fn set_value(&mut self, field: RestField, text: &str) -> Result<(), String> {
        match field {
            RestField::UrlValue => self.request.set_url_value(text.trim()),
            RestField::RequestHeaders => replace_equal_to_rows(&mut self.request.headers, text)?,
            RestField::QueryParams => {
                replace_equal_to_rows(&mut self.request.query_parameters, text)?
            }
            RestField::BodyPatterns => self.request.body_patterns = parse_body_patterns(text)?,
            RestField::Status => {
                self.response.status =
                    optional_number(text, "Response status must be a number")?.unwrap_or(0)
            }
            RestField::ResponseHeaders => self.response.headers = parse_map(text)?,
            RestField::Body => {
                self.response.body = (!text.is_empty()).then(|| text.to_string())
            }
            RestField::Delay => {
                self.response.fixed_delay_milliseconds =
                    optional_number(text, "Delay must be a whole number of milliseconds")?
            }
            RestField::ScenarioName => self.set_scenario_name(text.trim()),
            RestField::RequiredState => self.required_scenario_state = optional_text(text),
            RestField::NewState => self.new_scenario_state = optional_text(text),
            RestField::Name => self.name = text.trim().to_string(),
            RestField::Priority => self.priority = optional_number(text, "Priority must be a number")?,
            RestField::Metadata => self.metadata = parse_metadata(text)?,
            RestField::Method
            | RestField::UrlKind
            | RestField::Fault
            | RestField::Persistent
            | RestField::Enabled => self.cycle(field),
        }
        Ok(())
    }

    fn cycle(&mut self, field: RestField) {
        match field {
            RestField::Method => {
                let idx = HTTP_METHODS
                    .iter()
                    .position(|m| *m == self.request.method)
                    .map(|i| (i + 1) % HTTP_METHODS.len())
                    .unwrap_or(0);
                self.request.method = HTTP_METHODS[idx].to_string();
            }
            RestField::UrlKind => {
                let next = self.request.url_match_kind().next();
                self.request.set_url_match_kind(next);
            }
            RestField::Fault => self.response.fault = Fault::cycle(self.response.fault),
            RestField::Persistent => {
                self.persistent = Some(!self.persistent.unwrap_or(false));
            }
            RestField::Enabled => self.enabled = Some(!self.is_enabled()),
            _ => {}
        }
    }

    fn hint(&self, field: RestField) -> Option<String> {
        match field {
            RestField::RequestHeaders => other_rules_hint(&self.request.headers),
            RestField::QueryParams => other_rules_hint(&self.request.query_parameters),
            RestField::BodyPatterns => Some(format!(
                "kinds: {}",
                BodyPatternKind::ALL
                    .iter()
                    .map(|k| k.key())
                    .collect::<Vec<_>>()
                    .join(", ")
            )),
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
        validate_rest_form(self)
    }
}
