use super::{optional_number, optional_text, parse_metadata, pretty_json, yes_no, FormModel};
use crate::model::GraphQlStub;
use crate::types::{EditorTab, FieldKind};
use crate::validate::{validate_graphql, Validation};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphQlField {
    OperationName,
    Query,
    Variables,
    Response,
    ScenarioName,
    RequiredState,
    NewState,
    Name,
    Priority,
    Persistent,
    Enabled,
    Metadata,
}

impl FormModel for GraphQlStub {
    type Field = GraphQlField;
    const NOUN: &'static str = "GraphQL stub";

    fn fields(tab: EditorTab) -> &'static [GraphQlField] {
        match tab {
            EditorTab::Request => &[
                GraphQlField::OperationName,
                GraphQlField::Query,
                GraphQlField::Variables,
            ],
            EditorTab::Response => &[GraphQlField::Response],
            EditorTab::Scenarios => &[
                GraphQlField::ScenarioName,
                GraphQlField::RequiredState,
                GraphQlField::NewState,
            ],
            EditorTab::Advanced => &[
                GraphQlField::Name,
                GraphQlField::Priority,
                GraphQlField::Persistent,
                GraphQlField::Enabled,
                GraphQlField::Metadata,
            ],
        }
    }

    fn label(field: GraphQlField) -> &'static str {
        match field {
            GraphQlField::OperationName => "Operation Name",
            GraphQlField::Query => "Query",
            GraphQlField::Variables => "Variables (JSON)",
            GraphQlField::Response => "Response (JSON)",
            GraphQlField::ScenarioName => "Scenario",
            GraphQlField::RequiredState => "Required State",
            GraphQlField::NewState => "New State",
            GraphQlField::Name => "Name",
            GraphQlField::Priority => "Priority",
            GraphQlField::Persistent => "Persistent",
            GraphQlField::Enabled => "Enabled",
            GraphQlField::Metadata => "Metadata (JSON)",
        }
    }

    fn kind(field: GraphQlField) -> FieldKind {
        match field {
            GraphQlField::Query
            | GraphQlField::Variables
            | GraphQlField::Response
            | GraphQlField::Metadata => FieldKind::Multiline,
            GraphQlField::Persistent | GraphQlField::Enabled => FieldKind::Toggle,
            _ => FieldKind::Line,
        }
    }

    fn value(&self, field: GraphQlField) -> String {
        match field {
            GraphQlField::OperationName => self.operation_name.clone(),
            GraphQlField::Query => self.query.clone(),
            GraphQlField::Variables => self.variables.clone().unwrap_or_default(),
            GraphQlField::Response => self.response.clone(),
            GraphQlField::ScenarioName => self.scenario_name.clone().unwrap_or_default(),
            GraphQlField::RequiredState => self.required_scenario_state.clone().unwrap_or_default(),
            GraphQlField::NewState => self.new_scenario_state.clone().unwrap_or_default(),
            GraphQlField::Name => self.name.clone(),
            GraphQlField::Priority => self.priority.map(|p| p.to_string()).unwrap_or_default(),
            GraphQlField::Persistent => yes_no(self.persistent.unwrap_or(false)),
            GraphQlField::Enabled => yes_no(self.enabled),
            GraphQlField::Metadata => pretty_json(&self.metadata),
        }
    }

    fn set_value(&mut self, field: GraphQlField, text: &str) -> Result<(), String> {
        match field {
            GraphQlField::OperationName => self.operation_name = text.trim().to_string(),
            GraphQlField::Query => self.query = text.to_string(),
            GraphQlField::Variables => {
                self.variables = (!text.trim().is_empty()).then(|| text.to_string())
            }
            GraphQlField::Response => self.response = text.to_string(),
            GraphQlField::ScenarioName => {
                self.scenario_name = optional_text(text);
                if self.scenario_name.is_none() {
                    self.required_scenario_state = None;
                    self.new_scenario_state = None;
                }
            }
            GraphQlField::RequiredState => self.required_scenario_state = optional_text(text),
            GraphQlField::NewState => self.new_scenario_state = optional_text(text),
            GraphQlField::Name => self.name = text.trim().to_string(),
            GraphQlField::Priority => {
                self.priority = optional_number(text, "Priority must be a number")?
            }
            GraphQlField::Metadata => self.metadata = parse_metadata(text)?,
            GraphQlField::Persistent | GraphQlField::Enabled => self.cycle(field),
        }
        Ok(())
    }

    fn cycle(&mut self, field: GraphQlField) {
        match field {
            GraphQlField::Persistent => self.persistent = Some(!self.persistent.unwrap_or(false)),
            GraphQlField::Enabled => self.enabled = !self.enabled,
            _ => {}
        }
    }

    fn hint(&self, field: GraphQlField) -> Option<String> {
        match field {
            GraphQlField::Query => self
                .operation_type()
                .map(|op| format!("operation type: {op}")),
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
        validate_graphql(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_variables_clear_field() {
        let mut stub = GraphQlStub::default();
        stub.set_value(GraphQlField::Variables, r#"{"id": 1}"#).unwrap();
        assert!(stub.variables.is_some());
        stub.set_value(GraphQlField::Variables, "  ").unwrap();
        assert_eq!(stub.variables, None);
    }

    #[test]
    fn test_query_hint_shows_operation_type() {
        let mut stub = GraphQlStub::default();
        stub.set_value(GraphQlField::Query, "mutation Add { add }").unwrap();
        assert_eq!(
            stub.hint(GraphQlField::Query).as_deref(),
            Some("operation type: mutation")
        );
    }

    #[test]
    fn test_clearing_scenario_clears_states() {
        let mut stub = GraphQlStub::default();
        stub.set_value(GraphQlField::ScenarioName, "flow").unwrap();
        stub.set_value(GraphQlField::NewState, "Done").unwrap();
        stub.set_value(GraphQlField::ScenarioName, "").unwrap();
        assert_eq!(stub.new_scenario_state, None);
    }

    #[test]
    fn test_enabled_toggle() {
        let mut stub = GraphQlStub::default();
        stub.cycle(GraphQlField::Enabled);
        assert!(!stub.enabled);
        assert_eq!(stub.value(GraphQlField::Enabled), "No");
    }
}
