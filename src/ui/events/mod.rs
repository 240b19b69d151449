//! Event handling for wiremock-tui
//!
//! Input is dispatched on the current input mode:
//! - Normal: page navigation and per-page commands, or editor commands
//!   while a stub editor is open
//! - Searching: typing into the page's search box
//! - EditingField: typing into one field (editor field or page field)
//! - EditingJson: typing into a stub's JSON document
//! - ScenarioModal: the scenario state dialog
//!
//! # Architecture
//!
//! Handlers turn keys into `AppAction`s applied to `AppState` through
//! `apply_action`. Anything that needs the network comes back to the app loop
//! as a `Command`.
//!
//! # Lock Management
//!
//! Handlers take the `RwLock` per step and never hold it across a call into
//! another handler.

mod editor;
mod helpers;
mod modals;
mod navigation;
mod search;
mod yank;

use crate::actions::AppAction;
use crate::state::AppState;
use crate::tasks::Command;
use crate::types::{InputMode, Page};
use color_eyre::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use helpers::{apply, is_ctrl};
use std::sync::{Arc, RwLock};
use std::time::Duration;

#[derive(Debug, Default)]
pub struct EventHandler {
    pub should_quit: bool,
}

impl EventHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait briefly for one input event and handle it
    pub fn handle_events(&mut self, state: &Arc<RwLock<AppState>>) -> Result<Option<Command>> {
        if !event::poll(Duration::from_millis(50))? {
            return Ok(None);
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => Ok(self.handle_key(key, state)),
            _ => Ok(None),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent, state: &Arc<RwLock<AppState>>) -> Option<Command> {
        let (input_mode, editor_open, has_line_input) = {
            let s = state.read().unwrap();
            (
                s.input_mode.clone(),
                s.editor.active.is_some(),
                s.line_input.is_some(),
            )
        };

        match input_mode {
            InputMode::Searching => {
                search::handle_search_input(key, state);
                None
            }
            InputMode::EditingField if editor_open && !has_line_input => {
                editor::handle_field_input(key, state);
                None
            }
            InputMode::EditingField => {
                modals::handle_line_input(key, state);
                None
            }
            InputMode::EditingJson => editor::handle_json_input(key, state),
            InputMode::ScenarioModal => modals::handle_scenario_modal(key, state),
            InputMode::Normal if editor_open => editor::handle_editor_key(key, state),
            InputMode::Normal => self.handle_normal(key, state),
        }
    }

    fn handle_normal(&mut self, key: KeyEvent, state: &Arc<RwLock<AppState>>) -> Option<Command> {
        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                None
            }
            KeyCode::Char('c') if is_ctrl(&key) => {
                self.should_quit = true;
                None
            }
            KeyCode::Char('r') if is_ctrl(&key) => Some(Command::Refresh),
            KeyCode::Char(c @ '1'..='9') => {
                if let Some(page) = Page::from_hotkey(c) {
                    apply(state, AppAction::GoToPage(page));
                }
                None
            }
            KeyCode::Tab => {
                apply(state, AppAction::NextPage);
                None
            }
            KeyCode::BackTab => {
                apply(state, AppAction::PrevPage);
                None
            }
            _ => navigation::handle_page_key(key, state),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Stub;
    use crossterm::event::KeyModifiers;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn shared(state: AppState) -> Arc<RwLock<AppState>> {
        Arc::new(RwLock::new(state))
    }

    fn stubs_state() -> Arc<RwLock<AppState>> {
        let mut state = AppState {
            page: Page::Stubs,
            ..Default::default()
        };
        state.stubs.replace_all(vec![
            Stub {
                id: "a".to_string(),
                name: "Orders".to_string(),
                ..Default::default()
            },
            Stub {
                id: "b".to_string(),
                name: "Users".to_string(),
                ..Default::default()
            },
        ]);
        shared(state)
    }

    #[test]
    fn test_digit_switches_page() {
        let state = shared(AppState::default());
        let mut handler = EventHandler::new();
        handler.handle_key(press(KeyCode::Char('6')), &state);
        assert_eq!(state.read().unwrap().page, Page::Requests);
    }

    #[test]
    fn test_q_quits_only_in_normal_mode() {
        let state = stubs_state();
        let mut handler = EventHandler::new();

        handler.handle_key(press(KeyCode::Char('/')), &state);
        assert_eq!(state.read().unwrap().input_mode, InputMode::Searching);
        assert!(!handler.should_quit);

        handler.handle_key(press(KeyCode::Enter), &state);
        handler.handle_key(press(KeyCode::Char('q')), &state);
        assert!(handler.should_quit);
    }

    #[test]
    fn test_delete_needs_two_presses_on_same_row() {
        let state = stubs_state();
        let mut handler = EventHandler::new();

        assert_eq!(handler.handle_key(press(KeyCode::Char('d')), &state), None);
        assert!(state.read().unwrap().stub_list.confirm.is_armed("a"));

        // Moving away disarms
        handler.handle_key(press(KeyCode::Char('j')), &state);
        assert!(!state.read().unwrap().stub_list.confirm.is_armed("a"));

        assert_eq!(handler.handle_key(press(KeyCode::Char('d')), &state), None);
        let command = handler.handle_key(press(KeyCode::Char('d')), &state);
        assert_eq!(
            command,
            Some(Command::Delete {
                page: Page::Stubs,
                id: "b".to_string()
            })
        );
    }

    #[test]
    fn test_editor_field_flow() {
        let state = stubs_state();
        let mut handler = EventHandler::new();

        handler.handle_key(press(KeyCode::Char('n')), &state);
        // Advanced tab, Name field
        handler.handle_key(press(KeyCode::BackTab), &state);
        handler.handle_key(press(KeyCode::Enter), &state);
        assert_eq!(state.read().unwrap().input_mode, InputMode::EditingField);

        {
            let mut s = state.write().unwrap();
            let input = s.editor.session_mut().unwrap().input_mut().unwrap();
            input.set_content("Ping".to_string());
        }
        handler.handle_key(press(KeyCode::Enter), &state);

        let s = state.read().unwrap();
        assert_eq!(s.input_mode, InputMode::Normal);
        let rows = s.editor.session().unwrap().rows();
        assert_eq!(rows[0].value, "Ping");
    }

    #[test]
    fn test_editor_save_and_close() {
        let state = stubs_state();
        let mut handler = EventHandler::new();
        handler.handle_key(press(KeyCode::Char('n')), &state);

        let save = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);
        assert_eq!(handler.handle_key(save, &state), Some(Command::SaveEditor));

        handler.handle_key(press(KeyCode::Esc), &state);
        assert!(state.read().unwrap().editor.active.is_none());
        assert!(!handler.should_quit);
    }

    #[test]
    fn test_scenario_modal_requires_state() {
        let mut app = AppState {
            page: Page::Scenarios,
            ..Default::default()
        };
        app.scenarios.replace_all(vec![crate::model::ScenarioState {
            id: "s1".to_string(),
            name: "checkout".to_string(),
            state: "Started".to_string(),
            possible_states: vec!["Started".to_string(), "Paid".to_string()],
        }]);
        let state = shared(app);
        let mut handler = EventHandler::new();

        handler.handle_key(press(KeyCode::Enter), &state);
        state
            .write()
            .unwrap()
            .scenario_page
            .modal
            .as_mut()
            .unwrap()
            .input
            .clear();
        assert_eq!(handler.handle_key(press(KeyCode::Enter), &state), None);
        assert_eq!(
            state.read().unwrap().scenario_page.modal.as_ref().unwrap().error.as_deref(),
            Some("New state is required")
        );

        handler.handle_key(press(KeyCode::Down), &state);
        handler.handle_key(press(KeyCode::Down), &state);
        assert_eq!(
            handler.handle_key(press(KeyCode::Enter), &state),
            Some(Command::SetScenarioState {
                id: "s1".to_string(),
                state: "Paid".to_string()
            })
        );
    }

    #[test]
    fn test_recording_keys_map_to_commands() {
        let state = shared(AppState {
            page: Page::Recording,
            ..Default::default()
        });
        let mut handler = EventHandler::new();
        assert_eq!(
            handler.handle_key(press(KeyCode::Char('P')), &state),
            Some(Command::Recording(crate::tasks::RecordingAction::StopPlayback))
        );
    }
}
