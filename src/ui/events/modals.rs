//! Modal and single-field input handlers
//!
//! - Scenario state modal (quick-select + free text)
//! - Page-level text fields: recording target URL, import file path, settings

use super::helpers::apply;
use crate::actions::AppAction;
use crate::editor::TextEditor;
use crate::state::AppState;
use crate::tasks::Command;
use crate::types::{InputMode, Page};
use crossterm::event::{KeyCode, KeyEvent};
use std::sync::{Arc, RwLock};

pub fn handle_scenario_modal(key: KeyEvent, state: &Arc<RwLock<AppState>>) -> Option<Command> {
    match key.code {
        KeyCode::Esc => {
            apply(state, AppAction::CloseScenarioModal);
            None
        }
        KeyCode::Up => {
            apply(state, AppAction::ScenarioQuickSelect { forward: false });
            None
        }
        KeyCode::Down | KeyCode::Tab => {
            apply(state, AppAction::ScenarioQuickSelect { forward: true });
            None
        }
        KeyCode::Enter => {
            let mut s = state.write().unwrap();
            let modal = s.scenario_page.modal.as_mut()?;
            if modal.saving {
                return None;
            }
            match modal.submission() {
                Ok(new_state) => Some(Command::SetScenarioState {
                    id: modal.id.clone(),
                    state: new_state,
                }),
                Err(message) => {
                    modal.error = Some(message);
                    None
                }
            }
        }
        _ => {
            let mut s = state.write().unwrap();
            if let Some(modal) = s.scenario_page.modal.as_mut() {
                if modal.input.handle_key_event(key) {
                    modal.quick = None;
                    modal.error = None;
                }
            }
            None
        }
    }
}

/// Open the line input for the current page's text field
pub fn begin_line_input(state: &Arc<RwLock<AppState>>) {
    let mut s = state.write().unwrap();
    let initial = match s.page {
        Page::Recording => s.recording.target_url.clone(),
        Page::ImportExport => s.transfer.path.clone(),
        Page::Settings => {
            let field = s.settings.field();
            s.settings.value(field).to_string()
        }
        _ => return,
    };
    s.line_input = Some(TextEditor::single_line(initial));
    s.input_mode = InputMode::EditingField;
}

/// Keys while a page-level field is open. Enter stores the text, Esc drops it.
pub fn handle_line_input(key: KeyEvent, state: &Arc<RwLock<AppState>>) {
    let mut s = state.write().unwrap();
    let Some(input) = s.line_input.as_mut() else {
        s.input_mode = InputMode::Normal;
        return;
    };

    match key.code {
        KeyCode::Esc => {
            s.line_input = None;
            s.input_mode = InputMode::Normal;
        }
        KeyCode::Enter => {
            let text = input.content().trim().to_string();
            s.line_input = None;
            s.input_mode = InputMode::Normal;
            match s.page {
                Page::Recording => {
                    s.recording.target_url = text;
                    s.recording.error = None;
                }
                Page::ImportExport => s.transfer.path = text,
                Page::Settings => {
                    let field = s.settings.field();
                    s.settings.set_value(field, text);
                    s.settings.message = None;
                }
                _ => {}
            }
        }
        _ => {
            input.handle_key_event(key);
        }
    }
}
