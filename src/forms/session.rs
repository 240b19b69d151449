use super::FormModel;
use crate::draft::Draft;
use crate::editor::TextEditor;
use crate::types::{EditorTab, FieldKind};
use crate::validate::INVALID_JSON;

/// One rendered line of the form
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRow {
    pub label: &'static str,
    pub value: String,
    pub kind: FieldKind,
    pub selected: bool,
    pub hint: Option<String>,
}

/// Editor state for one stub draft
#[derive(Debug, Clone)]
pub struct EditorSession<T: FormModel> {
    pub draft: Draft<T>,
    /// Server id of the record the editor was opened on; `None` for a new draft.
    /// Decides create vs update, whatever the JSON buffer says.
    pub original_id: Option<String>,
    pub tab: EditorTab,
    pub field: usize,
    /// Open text input for the selected field
    pub input: Option<TextEditor>,
    /// Buffer of the whole document while in JSON mode
    pub json: Option<TextEditor>,
    /// Validation or save errors, shown above the form
    pub errors: Vec<String>,
    pub saving: bool,
}

impl<T: FormModel> EditorSession<T> {
    pub fn new(value: T) -> Self {
        let original_id = Some(value.id().to_string()).filter(|id| !id.is_empty());
        Self {
            draft: Draft::new(value),
            original_id,
            tab: EditorTab::default(),
            field: 0,
            input: None,
            json: None,
            errors: Vec::new(),
            saving: false,
        }
    }

    fn current_field(&self) -> Option<T::Field> {
        T::fields(self.tab).get(self.field).copied()
    }

    /// The draft as a typed value, parsing the JSON buffer when in JSON mode
    pub fn current_value(&self) -> Result<T, Vec<String>> {
        match &self.draft {
            Draft::Structured(value) => Ok(value.clone()),
            Draft::Raw(text) => {
                serde_json::from_str(text).map_err(|_| vec![INVALID_JSON.to_string()])
            }
        }
    }

    /// Typed value that passed validation, ready to send, carrying the id of
    /// the record being edited
    pub fn prepare_save(&self) -> Result<T, Vec<String>> {
        let mut value = self.current_value()?;
        value.validate()?;
        value.set_id(self.original_id.as_deref().unwrap_or_default());
        Ok(value)
    }

    fn sync_json(&mut self) {
        if let (Some(editor), Some(raw)) = (self.json.as_ref(), self.draft.raw_mut()) {
            *raw = editor.content().to_string();
        }
    }
}

/// Operations the event loop and the renderer need, whatever the stub kind
pub trait FormSession: std::fmt::Debug {
    fn title(&self) -> String;
    fn noun(&self) -> &'static str;
    fn is_new(&self) -> bool;
    fn tab(&self) -> EditorTab;
    fn set_tab(&mut self, tab: EditorTab);
    fn rows(&self) -> Vec<FieldRow>;
    fn select_next(&mut self);
    fn select_prev(&mut self);

    /// Enter on the selected field: cycles choice fields, opens an input for
    /// text fields. Returns true when an input was opened.
    fn activate(&mut self) -> bool;
    fn input(&self) -> Option<&TextEditor>;
    fn input_mut(&mut self) -> Option<&mut TextEditor>;
    /// Store the input in the draft. On a parse error the input stays open.
    fn commit_input(&mut self) -> Result<(), String>;
    fn cancel_input(&mut self);

    fn is_json_mode(&self) -> bool;
    fn toggle_mode(&mut self) -> Result<(), String>;
    fn json_editor(&self) -> Option<&TextEditor>;
    fn json_editor_mut(&mut self) -> Option<&mut TextEditor>;
    /// Copy the JSON buffer into the draft after an edit
    fn json_changed(&mut self);
    fn json_text(&self) -> String;

    fn errors(&self) -> &[String];
    fn set_errors(&mut self, errors: Vec<String>);
    fn is_saving(&self) -> bool;
    fn set_saving(&mut self, saving: bool);
}

impl<T: FormModel + std::fmt::Debug> FormSession for EditorSession<T> {
    fn title(&self) -> String {
        if self.original_id.is_none() {
            return format!("New {}", T::NOUN);
        }
        match self.current_value() {
            Ok(value) => format!("Edit {}: {}", T::NOUN, value.display_name()),
            Err(_) => format!("Edit {}", T::NOUN),
        }
    }

    fn noun(&self) -> &'static str {
        T::NOUN
    }

    fn is_new(&self) -> bool {
        self.original_id.is_none()
    }

    fn tab(&self) -> EditorTab {
        self.tab
    }

    fn set_tab(&mut self, tab: EditorTab) {
        self.tab = tab;
        self.field = 0;
        self.input = None;
    }

    fn rows(&self) -> Vec<FieldRow> {
        let Some(value) = self.draft.structured() else {
            return Vec::new();
        };
        T::fields(self.tab)
            .iter()
            .enumerate()
            .map(|(idx, field)| FieldRow {
                label: T::label(*field),
                value: value.value(*field),
                kind: T::kind(*field),
                selected: idx == self.field,
                hint: value.hint(*field),
            })
            .collect()
    }

    fn select_next(&mut self) {
        let count = T::fields(self.tab).len();
        if self.field + 1 < count {
            self.field += 1;
        }
    }

    fn select_prev(&mut self) {
        self.field = self.field.saturating_sub(1);
    }

    fn activate(&mut self) -> bool {
        let Some(field) = self.current_field() else {
            return false;
        };
        let Some(value) = self.draft.structured_mut() else {
            return false;
        };

        match T::kind(field) {
            FieldKind::Cycle | FieldKind::Toggle => {
                value.cycle(field);
                false
            }
            FieldKind::Line => {
                self.input = Some(TextEditor::single_line(value.value(field)));
                true
            }
            FieldKind::Multiline => {
                self.input = Some(TextEditor::multi_line(value.value(field)));
                true
            }
        }
    }

    fn input(&self) -> Option<&TextEditor> {
        self.input.as_ref()
    }

    fn input_mut(&mut self) -> Option<&mut TextEditor> {
        self.input.as_mut()
    }

    fn commit_input(&mut self) -> Result<(), String> {
        let (Some(field), Some(input)) = (self.current_field(), self.input.as_ref()) else {
            self.input = None;
            return Ok(());
        };
        let text = input.content().to_string();
        if let Some(value) = self.draft.structured_mut() {
            value.set_value(field, &text)?;
        }
        self.input = None;
        Ok(())
    }

    fn cancel_input(&mut self) {
        self.input = None;
    }

    fn is_json_mode(&self) -> bool {
        self.draft.is_raw()
    }

    fn toggle_mode(&mut self) -> Result<(), String> {
        self.input = None;
        self.draft.toggle()?;
        self.json = self.draft.raw_text().map(TextEditor::multi_line);
        Ok(())
    }

    fn json_editor(&self) -> Option<&TextEditor> {
        self.json.as_ref()
    }

    fn json_editor_mut(&mut self) -> Option<&mut TextEditor> {
        self.json.as_mut()
    }

    fn json_changed(&mut self) {
        self.sync_json();
    }

    fn json_text(&self) -> String {
        self.draft.to_json_text()
    }

    fn errors(&self) -> &[String] {
        &self.errors
    }

    fn set_errors(&mut self, errors: Vec<String>) {
        self.errors = errors;
    }

    fn is_saving(&self) -> bool {
        self.saving
    }

    fn set_saving(&mut self, saving: bool) {
        self.saving = saving;
    }
}
