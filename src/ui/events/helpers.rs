//! Helper functions for event handling
//!
//! - State locking helpers (apply actions)
//! - Paste batching for plain string buffers

use crate::actions::{apply_action, AppAction};
use crate::state::AppState;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use std::sync::{Arc, RwLock};

/// Apply a single action to state
pub fn apply(state: &Arc<RwLock<AppState>>, action: AppAction) {
    let mut s = state.write().unwrap();
    apply_action(action, &mut s);
}

/// Apply multiple actions under one lock
pub fn apply_many(state: &Arc<RwLock<AppState>>, actions: Vec<AppAction>) {
    let mut s = state.write().unwrap();
    for action in actions {
        apply_action(action, &mut s);
    }
}

pub fn is_ctrl(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL)
}

/// Collect a batch of characters for paste support
///
/// When a character is typed, drain any character events already queued so a
/// terminal paste lands in one state update.
pub fn collect_paste_batch(initial_char: char) -> String {
    let mut chars = vec![initial_char];

    while let Ok(true) = event::poll(std::time::Duration::from_millis(0)) {
        match event::read() {
            Ok(Event::Key(next_key)) => match next_key.code {
                KeyCode::Char(next_c) if !next_key.modifiers.contains(KeyModifiers::CONTROL) => {
                    chars.push(next_c);
                }
                _ => break,
            },
            _ => break,
        }
    }

    chars.into_iter().collect()
}
