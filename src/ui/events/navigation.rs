//! Page-level key handlers in normal mode
//!
//! Each page gets its own small keymap on top of the global one in `mod.rs`.

use super::helpers::apply;
use super::{modals, yank};
use crate::actions::AppAction;
use crate::state::AppState;
use crate::tasks::{Command, RecordingAction};
use crate::types::{Flash, Page};
use crossterm::event::{KeyCode, KeyEvent};
use std::sync::{Arc, RwLock};

pub fn handle_page_key(key: KeyEvent, state: &Arc<RwLock<AppState>>) -> Option<Command> {
    let page = state.read().unwrap().page;

    // Shared list movement
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            apply(state, AppAction::SelectNext);
            return None;
        }
        KeyCode::Char('k') | KeyCode::Up => {
            apply(state, AppAction::SelectPrev);
            return None;
        }
        _ => {}
    }

    match page {
        Page::Stubs | Page::GraphQl | Page::Soap => handle_stub_list(key, state, page),
        Page::Scenarios => handle_scenarios(key, state),
        Page::Requests => handle_journal(key, state),
        Page::Recording => handle_recording(key, state),
        Page::ImportExport => handle_transfer(key, state),
        Page::Settings => handle_settings(key, state),
        Page::Dashboard => None,
    }
}

fn handle_stub_list(key: KeyEvent, state: &Arc<RwLock<AppState>>, page: Page) -> Option<Command> {
    match key.code {
        KeyCode::Char('/') => apply(state, AppAction::EnterSearchMode),
        KeyCode::Char('m') => apply(state, AppAction::CycleMethodFilter),
        KeyCode::Char('n') => apply(state, AppAction::OpenNewEditor),
        KeyCode::Char('e') | KeyCode::Enter => apply(state, AppAction::OpenSelectedEditor),
        KeyCode::Char('y') => yank::handle_yank_stub(state),
        KeyCode::Char('d') => return press_delete(state, page),
        KeyCode::Esc => {
            let mut s = state.write().unwrap();
            if let Some(view) = s.list_view_mut() {
                view.confirm.disarm();
            }
            s.flash = None;
        }
        _ => {}
    }
    None
}

/// First press arms the highlighted row, a second press on the same row deletes it
fn press_delete(state: &Arc<RwLock<AppState>>, page: Page) -> Option<Command> {
    let mut s = state.write().unwrap();
    let id = s.selected_id()?;
    let confirmed = s.list_view_mut()?.confirm.press(&id);

    if confirmed {
        s.flash = None;
        Some(Command::Delete { page, id })
    } else {
        s.flash = Some(Flash::info("Press d again to delete"));
        None
    }
}

fn handle_scenarios(key: KeyEvent, state: &Arc<RwLock<AppState>>) -> Option<Command> {
    match key.code {
        KeyCode::Enter | KeyCode::Char('e') => apply(state, AppAction::OpenScenarioModal),
        KeyCode::Char('R') => return Some(Command::ResetScenarios),
        _ => {}
    }
    None
}

fn handle_journal(key: KeyEvent, state: &Arc<RwLock<AppState>>) -> Option<Command> {
    match key.code {
        KeyCode::Char('/') => apply(state, AppAction::EnterSearchMode),
        KeyCode::Char('m') => apply(state, AppAction::CycleMethodFilter),
        KeyCode::Char('s') => apply(state, AppAction::CycleStatusFilter),
        KeyCode::Char('o') => apply(state, AppAction::ToggleSortOrder),
        KeyCode::Enter => apply(state, AppAction::ToggleDetails),
        KeyCode::Char('C') => return Some(Command::ClearJournal),
        _ => {}
    }
    None
}

fn handle_recording(key: KeyEvent, state: &Arc<RwLock<AppState>>) -> Option<Command> {
    let action = match key.code {
        KeyCode::Char('e') | KeyCode::Enter => {
            modals::begin_line_input(state);
            return None;
        }
        KeyCode::Char('r') => RecordingAction::StartRecording,
        KeyCode::Char('s') => RecordingAction::StopRecording,
        KeyCode::Char('p') => RecordingAction::StartPlayback,
        KeyCode::Char('P') => RecordingAction::StopPlayback,
        _ => return None,
    };
    Some(Command::Recording(action))
}

fn handle_transfer(key: KeyEvent, state: &Arc<RwLock<AppState>>) -> Option<Command> {
    match key.code {
        KeyCode::Char('t') => apply(state, AppAction::CycleImportType),
        KeyCode::Char('e') | KeyCode::Enter => modals::begin_line_input(state),
        KeyCode::Char('i') => return Some(Command::Import),
        KeyCode::Char('x') => return Some(Command::Export),
        _ => {}
    }
    None
}

fn handle_settings(key: KeyEvent, state: &Arc<RwLock<AppState>>) -> Option<Command> {
    match key.code {
        KeyCode::Char('e') | KeyCode::Enter => modals::begin_line_input(state),
        KeyCode::Char('s') => return Some(Command::SaveSettings),
        _ => {}
    }
    None
}
