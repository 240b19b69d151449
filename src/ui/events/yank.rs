//! Yank (copy) handlers
//!
//! Copies the highlighted stub as JSON, or the body of the last execute
//! response, to the system clipboard.

use crate::state::AppState;
use crate::types::Flash;
use crate::ui::draw::try_format_json;
use arboard::Clipboard;
use std::sync::{Arc, RwLock};
use std::time::Duration;

/// Copy the highlighted stub on a list page
pub fn handle_yank_stub(state: &Arc<RwLock<AppState>>) {
    let json = state.read().unwrap().selected_stub_json();
    match json {
        Some(json) => copy_to_clipboard(state, json, "stub JSON"),
        None => tracing::debug!("nothing selected to yank"),
    }
}

/// Copy the body of the last execute response
pub fn handle_yank_response(state: &Arc<RwLock<AppState>>) {
    let body = {
        let s = state.read().unwrap();
        match &s.editor.exec_response {
            Some(response) if !response.is_error => Some(try_format_json(&response.body)),
            Some(_) => {
                tracing::debug!("cannot yank from error response");
                None
            }
            None => None,
        }
    };

    if let Some(body) = body {
        copy_to_clipboard(state, body, "response body");
    }
}

fn copy_to_clipboard(state: &Arc<RwLock<AppState>>, text: String, what: &str) {
    let result = Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text));

    match result {
        Ok(()) => {
            tracing::debug!(what, "yanked to clipboard");
            {
                let mut s = state.write().unwrap();
                s.yank_flash = true;
                s.flash = Some(Flash::info(format!("Copied {what} to clipboard")));
            }

            // Clear the highlight after a short delay
            let state = Arc::clone(state);
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(200)).await;
                state.write().unwrap().yank_flash = false;
            });
        }
        Err(e) => {
            tracing::warn!(error = %e, "clipboard unavailable");
            state.write().unwrap().flash =
                Some(Flash::error(format!("Failed to copy {what}: {e}")));
        }
    }
}
