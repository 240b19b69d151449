//! Search handlers
//!
//! Enter keeps the filter and leaves search mode, Esc clears it.

use super::helpers::{apply, apply_many, collect_paste_batch, is_ctrl};
use crate::actions::AppAction;
use crate::state::AppState;
use crossterm::event::{KeyCode, KeyEvent};
use std::sync::{Arc, RwLock};

pub fn handle_search_input(key: KeyEvent, state: &Arc<RwLock<AppState>>) {
    match key.code {
        KeyCode::Enter => apply(state, AppAction::ExitSearchMode),
        KeyCode::Esc => apply_many(state, vec![AppAction::ClearSearch, AppAction::ExitSearchMode]),
        KeyCode::Backspace => apply(state, AppAction::BackspaceSearch),
        KeyCode::Char('l') if is_ctrl(&key) => apply(state, AppAction::ClearSearch),
        KeyCode::Char(c) if !is_ctrl(&key) => {
            let batch = collect_paste_batch(c);
            tracing::trace!(batch = %batch, "search input");
            apply(state, AppAction::AppendToSearch(batch));
        }
        _ => {}
    }
}
