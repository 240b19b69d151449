//! Field-by-field editing of stub drafts
//!
//! Each stub type lists its fields per editor tab and knows how to render a
//! field as text and parse edited text back. [`EditorSession`] drives one
//! draft through the tabs, the form/JSON toggle and field input.

mod graphql;
mod rest;
mod session;
mod soap;

pub use graphql::GraphQlField;
pub use rest::RestField;
pub use session::{EditorSession, FieldRow, FormSession};
pub use soap::SoapField;

use crate::model::{GraphQlStub, SoapStub, Stub};
use crate::types::{EditorTab, FieldKind};
use crate::validate::Validation;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;

pub trait FormModel: Serialize + DeserializeOwned + Clone + Default {
    type Field: Copy + PartialEq + std::fmt::Debug + 'static;

    /// Used in messages, e.g. "Failed to save GraphQL stub: ..."
    const NOUN: &'static str;

    fn fields(tab: EditorTab) -> &'static [Self::Field];
    fn label(field: Self::Field) -> &'static str;
    fn kind(field: Self::Field) -> FieldKind;

    fn value(&self, field: Self::Field) -> String;
    fn set_value(&mut self, field: Self::Field, text: &str) -> Result<(), String>;
    /// Step a cycle field or flip a toggle. No-op on text fields.
    fn cycle(&mut self, field: Self::Field);

    /// Extra line under a field, e.g. rules only editable as JSON
    fn hint(&self, _field: Self::Field) -> Option<String> {
        None
    }

    fn id(&self) -> &str;
    fn set_id(&mut self, id: &str);
    fn display_name(&self) -> &str;
    fn validate(&self) -> Validation;
}

/// The editor currently open, one per stub kind
#[derive(Debug, Clone)]
pub enum ActiveEditor {
    Rest(EditorSession<Stub>),
    GraphQl(EditorSession<GraphQlStub>),
    Soap(EditorSession<SoapStub>),
}

impl ActiveEditor {
    pub fn session(&self) -> &dyn FormSession {
        match self {
            ActiveEditor::Rest(s) => s,
            ActiveEditor::GraphQl(s) => s,
            ActiveEditor::Soap(s) => s,
        }
    }

    pub fn session_mut(&mut self) -> &mut dyn FormSession {
        match self {
            ActiveEditor::Rest(s) => s,
            ActiveEditor::GraphQl(s) => s,
            ActiveEditor::Soap(s) => s,
        }
    }
}

/// `name=value` rows, one per line. Blank lines are skipped.
pub(crate) fn parse_pairs(text: &str) -> Result<Vec<(String, String)>, String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| match line.split_once('=') {
            Some((name, value)) if !name.trim().is_empty() => {
                Ok((name.trim().to_string(), value.trim().to_string()))
            }
            _ => Err(format!("Expected name=value, got \"{line}\"")),
        })
        .collect()
}

pub(crate) fn format_pairs<'a>(pairs: impl IntoIterator<Item = (&'a String, &'a String)>) -> String {
    pairs
        .into_iter()
        .map(|(name, value)| format!("{name}={value}"))
        .collect::<Vec<_>>()
        .join("\n")
}

pub(crate) fn parse_map(text: &str) -> Result<BTreeMap<String, String>, String> {
    Ok(parse_pairs(text)?.into_iter().collect())
}

/// Empty text clears an optional field
pub(crate) fn optional_text(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

pub(crate) fn optional_number<N: std::str::FromStr>(
    text: &str,
    error: &str,
) -> Result<Option<N>, String> {
    match text.trim() {
        "" => Ok(None),
        t => t.parse().map(Some).map_err(|_| error.to_string()),
    }
}

/// Metadata must be a JSON object. Empty text removes it.
pub(crate) fn parse_metadata(text: &str) -> Result<Option<serde_json::Value>, String> {
    if text.trim().is_empty() {
        return Ok(None);
    }
    match serde_json::from_str::<serde_json::Value>(text) {
        Ok(value @ serde_json::Value::Object(_)) => Ok(Some(value)),
        _ => Err("Metadata must be a JSON object".to_string()),
    }
}

pub(crate) fn pretty_json(value: &Option<serde_json::Value>) -> String {
    value
        .as_ref()
        .and_then(|v| serde_json::to_string_pretty(v).ok())
        .unwrap_or_default()
}

pub(crate) fn yes_no(flag: bool) -> String {
    let text = if flag { "Yes" } else { "No" };
    text.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pairs_trims_and_skips_blank_lines() {
        let pairs = parse_pairs("Accept = application/json\n\n  X-Id=1=2 ").unwrap();
        assert_eq!(
            pairs,
            vec![
                ("Accept".to_string(), "application/json".to_string()),
                ("X-Id".to_string(), "1=2".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_pairs_rejects_rows_without_name() {
        assert!(parse_pairs("novalue").is_err());
        assert!(parse_pairs("=value").is_err());
    }

    #[test]
    fn test_metadata_must_be_object() {
        assert_eq!(parse_metadata("  ").unwrap(), None);
        assert!(parse_metadata("[1]").is_err());
        assert!(parse_metadata(r#"{"team": "a"}"#).unwrap().is_some());
    }

    #[test]
    fn test_optional_number() {
        assert_eq!(optional_number::<u64>("", "bad").unwrap(), None);
        assert_eq!(optional_number::<u64>(" 250 ", "bad").unwrap(), Some(250));
        assert_eq!(optional_number::<u64>("abc", "bad").unwrap_err(), "bad");
    }
}
