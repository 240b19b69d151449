use crate::forms::{ActiveEditor, EditorSession};
use crate::model::{GraphQlStub, SoapStub, Stub};
use crate::state::{AppState, ScenarioModal};
use crate::types::{Flash, InputMode, Page};

/// Represents all state changes that need no I/O.
/// Input handling builds these and `apply_action` performs them, so key
/// bindings stay separate from state mutations.
#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    // Navigation
    GoToPage(Page),
    NextPage,
    PrevPage,
    SelectNext,
    SelectPrev,

    // Search and filters
    EnterSearchMode,
    ExitSearchMode,
    AppendToSearch(String),
    BackspaceSearch,
    ClearSearch,
    CycleMethodFilter,
    CycleStatusFilter,
    ToggleSortOrder,
    ToggleDetails,

    // Editor
    OpenNewEditor,
    OpenSelectedEditor,
    CloseEditor,
    EditorNextTab,
    EditorPrevTab,
    EditorNextField,
    EditorPrevField,
    ToggleJsonMode,
    ScrollResponseUp,
    ScrollResponseDown,

    // Scenario modal
    OpenScenarioModal,
    CloseScenarioModal,
    ScenarioQuickSelect { forward: bool },

    // Import / export
    CycleImportType,

    // Status line
    SetFlash(Flash),
    ClearFlash,
}

/// Lines moved per Ctrl+U / Ctrl+D
const SCROLL_STEP: usize = 5;

/// Apply an action to the application state.
/// All state changes that need no network call go through here.
pub fn apply_action(action: AppAction, state: &mut AppState) {
    match action {
        AppAction::GoToPage(page) => go_to_page(state, page),
        AppAction::NextPage => {
            let page = state.page.next();
            go_to_page(state, page);
        }
        AppAction::PrevPage => {
            let page = state.page.prev();
            go_to_page(state, page);
        }

        AppAction::SelectNext => {
            let visible = state.visible_count();
            match state.page {
                Page::Requests => {
                    if state.journal.selected + 1 < visible {
                        state.journal.selected += 1;
                    }
                }
                Page::Scenarios => {
                    if state.scenario_page.selected + 1 < visible {
                        state.scenario_page.selected += 1;
                    }
                }
                Page::Settings => {
                    state.settings.selected =
                        (state.settings.selected + 1).min(state.settings.values.len() - 1);
                }
                _ => {
                    if let Some(view) = state.list_view_mut() {
                        view.select_next(visible);
                    }
                }
            }
        }
        AppAction::SelectPrev => match state.page {
            Page::Requests => state.journal.selected = state.journal.selected.saturating_sub(1),
            Page::Scenarios => {
                state.scenario_page.selected = state.scenario_page.selected.saturating_sub(1)
            }
            Page::Settings => state.settings.selected = state.settings.selected.saturating_sub(1),
            _ => {
                if let Some(view) = state.list_view_mut() {
                    view.select_prev();
                }
            }
        },

        AppAction::EnterSearchMode => {
            if state.search_mut().is_some() {
                state.input_mode = InputMode::Searching;
                if let Some(view) = state.list_view_mut() {
                    view.confirm.disarm();
                }
            }
        }
        AppAction::ExitSearchMode => {
            state.input_mode = InputMode::Normal;
        }
        AppAction::AppendToSearch(text) => {
            if let Some(search) = state.search_mut() {
                search.push_str(&text);
            }
            reset_selection(state);
        }
        AppAction::BackspaceSearch => {
            if let Some(search) = state.search_mut() {
                search.pop();
            }
            reset_selection(state);
        }
        AppAction::ClearSearch => {
            if let Some(search) = state.search_mut() {
                search.clear();
            }
            reset_selection(state);
        }
        AppAction::CycleMethodFilter => match state.page {
            Page::Requests => state.journal.cycle_method(),
            Page::Stubs => state.stub_list.cycle_method(),
            _ => {}
        },
        AppAction::CycleStatusFilter => {
            if state.page == Page::Requests {
                state.journal.cycle_status();
            }
        }
        AppAction::ToggleSortOrder => {
            if state.page == Page::Requests {
                state.journal.toggle_order();
            }
        }
        AppAction::ToggleDetails => {
            if state.page == Page::Requests {
                state.journal.show_details = !state.journal.show_details;
            }
        }

        AppAction::OpenNewEditor => {
            let editor = match state.page {
                Page::Stubs => ActiveEditor::Rest(EditorSession::new(Stub::default())),
                Page::GraphQl => ActiveEditor::GraphQl(EditorSession::new(GraphQlStub::default())),
                Page::Soap => ActiveEditor::Soap(EditorSession::new(SoapStub::default())),
                _ => return,
            };
            open_editor(state, editor);
        }
        AppAction::OpenSelectedEditor => {
            let Some(id) = state.selected_id() else {
                return;
            };
            let editor = match state.page {
                Page::Stubs => state
                    .stubs
                    .get(&id)
                    .map(|stub| ActiveEditor::Rest(EditorSession::new(stub.clone()))),
                Page::GraphQl => state
                    .graphql
                    .get(&id)
                    .map(|stub| ActiveEditor::GraphQl(EditorSession::new(stub.clone()))),
                Page::Soap => state
                    .soap
                    .get(&id)
                    .map(|stub| ActiveEditor::Soap(EditorSession::new(stub.clone()))),
                _ => None,
            };
            if let Some(editor) = editor {
                open_editor(state, editor);
            }
        }
        AppAction::CloseEditor => {
            state.editor.close();
            state.input_mode = InputMode::Normal;
        }
        AppAction::EditorNextTab => {
            if let Some(session) = state.editor.session_mut() {
                let tab = session.tab().next();
                session.set_tab(tab);
            }
        }
        AppAction::EditorPrevTab => {
            if let Some(session) = state.editor.session_mut() {
                let tab = session.tab().prev();
                session.set_tab(tab);
            }
        }
        AppAction::EditorNextField => {
            if let Some(session) = state.editor.session_mut() {
                session.select_next();
            }
        }
        AppAction::EditorPrevField => {
            if let Some(session) = state.editor.session_mut() {
                session.select_prev();
            }
        }
        AppAction::ToggleJsonMode => {
            let result = state.editor.session_mut().map(|session| session.toggle_mode());
            match result {
                Some(Err(message)) => state.flash = Some(Flash::error(message)),
                Some(Ok(())) => state.input_mode = InputMode::Normal,
                None => {}
            }
        }
        AppAction::ScrollResponseUp => {
            state.editor.response_scroll = state.editor.response_scroll.saturating_sub(SCROLL_STEP);
        }
        AppAction::ScrollResponseDown => {
            state.editor.response_scroll = state.editor.response_scroll.saturating_add(SCROLL_STEP);
        }

        AppAction::OpenScenarioModal => {
            if let Some(scenario) = state.selected_scenario() {
                state.scenario_page.modal = Some(ScenarioModal::open(scenario));
                state.input_mode = InputMode::ScenarioModal;
            }
        }
        AppAction::CloseScenarioModal => {
            state.scenario_page.modal = None;
            state.input_mode = InputMode::Normal;
        }
        AppAction::ScenarioQuickSelect { forward } => {
            if let Some(modal) = state.scenario_page.modal.as_mut() {
                modal.quick_select(forward);
                modal.error = None;
            }
        }

        AppAction::CycleImportType => {
            state.transfer.import_type = state.transfer.import_type.next();
            state.transfer.message = None;
        }

        AppAction::SetFlash(flash) => state.flash = Some(flash),
        AppAction::ClearFlash => state.flash = None,
    }
}

/// Leaving a page closes its editor and disarms any pending delete
fn go_to_page(state: &mut AppState, page: Page) {
    if let Some(view) = state.list_view_mut() {
        view.confirm.disarm();
    }
    state.editor.close();
    state.line_input = None;
    state.input_mode = InputMode::Normal;
    state.page = page;
    state.flash = None;
}

fn open_editor(state: &mut AppState, editor: ActiveEditor) {
    if let Some(view) = state.list_view_mut() {
        view.confirm.disarm();
    }
    state.editor.open(editor);
    state.input_mode = InputMode::Normal;
}

/// Filters changed: start from the top
fn reset_selection(state: &mut AppState) {
    match state.page {
        Page::Requests => state.journal.selected = 0,
        _ => {
            if let Some(view) = state.list_view_mut() {
                view.selected = 0;
                view.confirm.disarm();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::CANNOT_LEAVE_JSON_MODE;
    use crate::model::ScenarioState;
    use crate::types::{EditorTab, Tone};

    fn stubs_page() -> AppState {
        let mut state = AppState {
            page: Page::Stubs,
            ..Default::default()
        };
        state.stubs.replace_all(vec![
            Stub {
                id: "1".to_string(),
                name: "Orders".to_string(),
                ..Default::default()
            },
            Stub {
                id: "2".to_string(),
                name: "Users".to_string(),
                ..Default::default()
            },
        ]);
        state
    }

    #[test]
    fn test_select_stays_in_bounds() {
        let mut state = stubs_page();
        apply_action(AppAction::SelectNext, &mut state);
        apply_action(AppAction::SelectNext, &mut state);
        assert_eq!(state.stub_list.selected, 1);

        apply_action(AppAction::SelectPrev, &mut state);
        apply_action(AppAction::SelectPrev, &mut state);
        assert_eq!(state.stub_list.selected, 0);
    }

    #[test]
    fn test_page_change_disarms_delete_and_closes_editor() {
        let mut state = stubs_page();
        state.stub_list.confirm.press("1");
        apply_action(AppAction::OpenNewEditor, &mut state);
        assert!(state.editor.active.is_some());
        assert!(!state.stub_list.confirm.is_armed("1"));

        state.stub_list.confirm.press("2");
        apply_action(AppAction::GoToPage(Page::Dashboard), &mut state);
        assert!(state.editor.active.is_none());
        apply_action(AppAction::GoToPage(Page::Stubs), &mut state);
        assert!(!state.stub_list.confirm.is_armed("2"));
    }

    #[test]
    fn test_search_resets_selection() {
        let mut state = stubs_page();
        state.stub_list.selected = 1;

        apply_action(AppAction::EnterSearchMode, &mut state);
        assert_eq!(state.input_mode, InputMode::Searching);
        apply_action(AppAction::AppendToSearch("ord".to_string()), &mut state);
        assert_eq!(state.stub_list.search, "ord");
        assert_eq!(state.stub_list.selected, 0);

        apply_action(AppAction::BackspaceSearch, &mut state);
        assert_eq!(state.stub_list.search, "or");
        apply_action(AppAction::ExitSearchMode, &mut state);
        assert_eq!(state.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_no_search_on_dashboard() {
        let mut state = AppState::default();
        apply_action(AppAction::EnterSearchMode, &mut state);
        assert_eq!(state.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_open_selected_editor_copies_stub() {
        let mut state = stubs_page();
        apply_action(AppAction::SelectNext, &mut state);
        apply_action(AppAction::OpenSelectedEditor, &mut state);

        let session = state.editor.session().unwrap();
        assert_eq!(session.title(), "Edit stub: Users");
        assert!(!session.is_new());
    }

    #[test]
    fn test_editor_tabs_cycle() {
        let mut state = stubs_page();
        apply_action(AppAction::OpenNewEditor, &mut state);
        apply_action(AppAction::EditorPrevTab, &mut state);
        assert_eq!(state.editor.session().unwrap().tab(), EditorTab::Advanced);
        apply_action(AppAction::EditorNextTab, &mut state);
        assert_eq!(state.editor.session().unwrap().tab(), EditorTab::Request);
    }

    #[test]
    fn test_refused_mode_switch_sets_flash() {
        let mut state = stubs_page();
        apply_action(AppAction::OpenNewEditor, &mut state);
        apply_action(AppAction::ToggleJsonMode, &mut state);

        let session = state.editor.session_mut().unwrap();
        session.json_editor_mut().unwrap().set_content("{".to_string());
        session.json_changed();

        apply_action(AppAction::ToggleJsonMode, &mut state);
        let flash = state.flash.clone().unwrap();
        assert_eq!(flash.tone, Tone::Error);
        assert_eq!(flash.text, CANNOT_LEAVE_JSON_MODE);
        assert!(state.editor.session().unwrap().is_json_mode());
    }

    #[test]
    fn test_response_scroll_saturates() {
        let mut state = AppState::default();
        apply_action(AppAction::ScrollResponseDown, &mut state);
        assert_eq!(state.editor.response_scroll, 5);
        apply_action(AppAction::ScrollResponseUp, &mut state);
        apply_action(AppAction::ScrollResponseUp, &mut state);
        assert_eq!(state.editor.response_scroll, 0);
    }

    #[test]
    fn test_scenario_modal_opens_for_selection() {
        let mut state = AppState {
            page: Page::Scenarios,
            ..Default::default()
        };
        state.scenarios.replace_all(vec![ScenarioState {
            id: "s1".to_string(),
            name: "checkout".to_string(),
            state: "Paid".to_string(),
            possible_states: vec!["Started".to_string(), "Paid".to_string()],
        }]);

        apply_action(AppAction::OpenScenarioModal, &mut state);
        assert_eq!(state.input_mode, InputMode::ScenarioModal);
        apply_action(AppAction::ScenarioQuickSelect { forward: true }, &mut state);
        assert_eq!(
            state.scenario_page.modal.as_ref().unwrap().input.content(),
            "Started"
        );

        apply_action(AppAction::CloseScenarioModal, &mut state);
        assert!(state.scenario_page.modal.is_none());
        assert_eq!(state.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_journal_filters_only_on_journal_page() {
        let mut state = AppState {
            page: Page::Requests,
            ..Default::default()
        };
        apply_action(AppAction::CycleStatusFilter, &mut state);
        apply_action(AppAction::CycleMethodFilter, &mut state);
        assert_eq!(state.journal.status_prefix.as_deref(), Some("2"));
        assert_eq!(state.journal.method.as_deref(), Some("GET"));

        apply_action(AppAction::GoToPage(Page::Stubs), &mut state);
        apply_action(AppAction::CycleStatusFilter, &mut state);
        assert_eq!(state.journal.status_prefix.as_deref(), Some("2"));
    }
}
