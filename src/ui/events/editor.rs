//! Stub editor key handling
//!
//! Normal mode moves between tabs and fields. Enter on a text field opens an
//! input (EditingField); in JSON mode Enter starts typing into the document
//! (EditingJson). Saving and executing are handed back as commands.

use super::helpers::{apply, is_ctrl};
use super::yank;
use crate::actions::AppAction;
use crate::forms::ActiveEditor;
use crate::state::AppState;
use crate::tasks::Command;
use crate::types::{Flash, InputMode};
use crossterm::event::{KeyCode, KeyEvent};
use std::sync::{Arc, RwLock};

/// Keys while the editor is open and nothing is being typed
pub fn handle_editor_key(key: KeyEvent, state: &Arc<RwLock<AppState>>) -> Option<Command> {
    match key.code {
        KeyCode::Char('s') if is_ctrl(&key) => return Some(Command::SaveEditor),
        KeyCode::Char('u') if is_ctrl(&key) => apply(state, AppAction::ScrollResponseUp),
        KeyCode::Char('d') if is_ctrl(&key) => apply(state, AppAction::ScrollResponseDown),
        KeyCode::Esc => apply(state, AppAction::CloseEditor),
        KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => apply(state, AppAction::EditorNextTab),
        KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => {
            apply(state, AppAction::EditorPrevTab)
        }
        KeyCode::Char('j') | KeyCode::Down => apply(state, AppAction::EditorNextField),
        KeyCode::Char('k') | KeyCode::Up => apply(state, AppAction::EditorPrevField),
        KeyCode::Char('J') => apply(state, AppAction::ToggleJsonMode),
        KeyCode::Char('x') => return Some(Command::ExecuteEditor),
        KeyCode::Char('y') => yank::handle_yank_response(state),
        KeyCode::Char('v') => {
            let is_soap = matches!(
                state.read().unwrap().editor.active,
                Some(ActiveEditor::Soap(_))
            );
            if is_soap {
                return Some(Command::ValidateWsdl);
            }
        }
        KeyCode::Enter => start_editing(state),
        _ => {}
    }
    None
}

fn start_editing(state: &Arc<RwLock<AppState>>) {
    let mut s = state.write().unwrap();
    let Some(session) = s.editor.session_mut() else {
        return;
    };
    if session.is_saving() {
        return;
    }

    let mode = if session.is_json_mode() {
        Some(InputMode::EditingJson)
    } else if session.activate() {
        Some(InputMode::EditingField)
    } else {
        None
    };

    if let Some(mode) = mode {
        s.input_mode = mode;
    }
}

/// Typing into the selected form field
pub fn handle_field_input(key: KeyEvent, state: &Arc<RwLock<AppState>>) {
    let mut s = state.write().unwrap();
    let Some(session) = s.editor.session_mut() else {
        s.input_mode = InputMode::Normal;
        return;
    };
    let Some(input) = session.input_mut() else {
        s.input_mode = InputMode::Normal;
        return;
    };

    let commit = match key.code {
        KeyCode::Esc => {
            session.cancel_input();
            s.input_mode = InputMode::Normal;
            return;
        }
        KeyCode::Char('s') if is_ctrl(&key) => true,
        KeyCode::Enter if !input.is_multiline() => true,
        _ => {
            input.handle_key_event(key);
            false
        }
    };

    if commit {
        match session.commit_input() {
            Ok(()) => {
                s.input_mode = InputMode::Normal;
                s.flash = None;
            }
            // Input stays open so the user can fix it
            Err(message) => s.flash = Some(Flash::error(message)),
        }
    }
}

/// Typing into the JSON document
pub fn handle_json_input(key: KeyEvent, state: &Arc<RwLock<AppState>>) -> Option<Command> {
    let mut s = state.write().unwrap();
    let Some(session) = s.editor.session_mut() else {
        s.input_mode = InputMode::Normal;
        return None;
    };

    match key.code {
        KeyCode::Esc => {
            s.input_mode = InputMode::Normal;
        }
        KeyCode::Char('s') if is_ctrl(&key) => {
            s.input_mode = InputMode::Normal;
            return Some(Command::SaveEditor);
        }
        KeyCode::Char('f') if is_ctrl(&key) => {
            let formatted = session.json_editor_mut().map(|editor| editor.format_json());
            session.json_changed();
            if let Some(Err(message)) = formatted {
                s.flash = Some(Flash::error(message));
            }
        }
        _ => {
            if let Some(editor) = session.json_editor_mut() {
                if editor.handle_key_event(key) {
                    session.json_changed();
                }
            }
        }
    }
    None
}
