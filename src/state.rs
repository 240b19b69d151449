use crate::editor::TextEditor;
use crate::execute::ExecResponse;
use crate::forms::{ActiveEditor, FormSession};
use crate::journal::JournalView;
use crate::listing::{Listable, ListView};
use crate::model::{
    DashboardStats, GraphQlStub, RecordingState, RequestLog, ScenarioState, SoapStub, Stub,
};
use crate::store::ResourceCache;
use crate::transfer::ImportType;
use crate::types::{Flash, InputMode, Page};

/// Everything the UI draws from. Shared with background tasks behind
/// `Arc<RwLock<AppState>>`.
#[derive(Debug, Clone)]
pub struct AppState {
    pub page: Page,
    pub input_mode: InputMode,

    pub stubs: ResourceCache<Stub>,
    pub graphql: ResourceCache<GraphQlStub>,
    pub soap: ResourceCache<SoapStub>,
    pub scenarios: ResourceCache<ScenarioState>,
    pub requests: ResourceCache<RequestLog>,

    pub stub_list: ListView,
    pub graphql_list: ListView,
    pub soap_list: ListView,
    pub journal: JournalView,

    pub dashboard: DashboardPage,
    pub scenario_page: ScenarioPage,
    pub recording: RecordingPage,
    pub transfer: TransferPage,
    pub settings: SettingsPage,

    /// Stub editor, drawn over the list page it was opened from
    pub editor: EditorState,

    /// Page-level text field being typed into (target URL, import path, setting)
    pub line_input: Option<TextEditor>,

    /// Last status message, shown in the footer
    pub flash: Option<Flash>,
    /// Set briefly after a successful yank
    pub yank_flash: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            page: Page::default(),
            input_mode: InputMode::Normal,
            stubs: ResourceCache::default(),
            graphql: ResourceCache::default(),
            soap: ResourceCache::default(),
            scenarios: ResourceCache::default(),
            requests: ResourceCache::default(),
            stub_list: ListView::default(),
            graphql_list: ListView::default(),
            soap_list: ListView::default(),
            journal: JournalView::default(),
            dashboard: DashboardPage::default(),
            scenario_page: ScenarioPage::default(),
            recording: RecordingPage::default(),
            transfer: TransferPage::default(),
            settings: SettingsPage::default(),
            editor: EditorState::default(),
            line_input: None,
            flash: None,
            yank_flash: false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DashboardPage {
    pub stats: Option<DashboardStats>,
    pub loading: bool,
    pub error: Option<String>,
}

/// Modal for moving one scenario to another state
#[derive(Debug, Clone)]
pub struct ScenarioModal {
    pub id: String,
    pub name: String,
    pub possible_states: Vec<String>,
    /// Prefilled with the current state
    pub input: TextEditor,
    /// Quick-select cursor over `possible_states`
    pub quick: Option<usize>,
    pub error: Option<String>,
    pub saving: bool,
}

impl ScenarioModal {
    pub fn open(scenario: &ScenarioState) -> Self {
        Self {
            id: scenario.id.clone(),
            name: scenario.name.clone(),
            possible_states: scenario.possible_states.clone(),
            input: TextEditor::single_line(scenario.state.clone()),
            quick: None,
            error: None,
            saving: false,
        }
    }

    /// Step the quick-select cursor and copy that state into the input
    pub fn quick_select(&mut self, forward: bool) {
        if self.possible_states.is_empty() {
            return;
        }
        let len = self.possible_states.len();
        let next = match (self.quick, forward) {
            (None, true) => 0,
            (None, false) => len - 1,
            (Some(i), true) => (i + 1) % len,
            (Some(i), false) => (i + len - 1) % len,
        };
        self.quick = Some(next);
        self.input.set_content(self.possible_states[next].clone());
    }

    /// Trimmed state to submit, or the inline error to show
    pub fn submission(&self) -> Result<String, String> {
        let state = self.input.content().trim();
        if state.is_empty() {
            Err("New state is required".to_string())
        } else {
            Ok(state.to_string())
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ScenarioPage {
    pub selected: usize,
    pub modal: Option<ScenarioModal>,
    pub busy: bool,
}

#[derive(Debug, Clone, Default)]
pub struct RecordingPage {
    /// Last status the server reported; kept when a poll fails
    pub state: RecordingState,
    pub target_url: String,
    pub error: Option<String>,
    pub busy: bool,
}

#[derive(Debug, Clone, Default)]
pub struct TransferPage {
    pub import_type: ImportType,
    pub path: String,
    pub busy: bool,
    pub message: Option<Flash>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsField {
    ApiBaseUrl,
    MockServerUrl,
    PollInterval,
    ExportDirectory,
}

impl SettingsField {
    pub const ALL: [SettingsField; 4] = [
        SettingsField::ApiBaseUrl,
        SettingsField::MockServerUrl,
        SettingsField::PollInterval,
        SettingsField::ExportDirectory,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SettingsField::ApiBaseUrl => "Admin API URL",
            SettingsField::MockServerUrl => "Mock Server URL",
            SettingsField::PollInterval => "Recording Poll Interval (s)",
            SettingsField::ExportDirectory => "Export Directory",
        }
    }
}

/// Settings as edited, before they are validated and written to disk
#[derive(Debug, Clone, Default)]
pub struct SettingsPage {
    /// One value per [`SettingsField::ALL`] entry
    pub values: [String; 4],
    pub selected: usize,
    pub message: Option<Flash>,
}

impl SettingsPage {
    pub fn field(&self) -> SettingsField {
        SettingsField::ALL[self.selected.min(SettingsField::ALL.len() - 1)]
    }

    pub fn value(&self, field: SettingsField) -> &str {
        &self.values[field as usize]
    }

    pub fn set_value(&mut self, field: SettingsField, value: String) {
        self.values[field as usize] = value;
    }
}

#[derive(Debug, Clone, Default)]
pub struct EditorState {
    pub active: Option<ActiveEditor>,
    pub executing: bool,
    pub exec_response: Option<ExecResponse>,
    pub response_scroll: usize,
    /// WSDL check in flight
    pub validating: bool,
}

impl EditorState {
    pub fn open(&mut self, editor: ActiveEditor) {
        self.active = Some(editor);
        self.executing = false;
        self.exec_response = None;
        self.response_scroll = 0;
        self.validating = false;
    }

    pub fn close(&mut self) {
        *self = Self::default();
    }

    pub fn session(&self) -> Option<&dyn FormSession> {
        self.active.as_ref().map(|e| e.session())
    }

    pub fn session_mut(&mut self) -> Option<&mut dyn FormSession> {
        self.active.as_mut().map(|e| e.session_mut())
    }
}

impl AppState {
    /// List view of the current page, when it is a stub list
    pub fn list_view(&self) -> Option<&ListView> {
        match self.page {
            Page::Stubs => Some(&self.stub_list),
            Page::GraphQl => Some(&self.graphql_list),
            Page::Soap => Some(&self.soap_list),
            _ => None,
        }
    }

    pub fn list_view_mut(&mut self) -> Option<&mut ListView> {
        match self.page {
            Page::Stubs => Some(&mut self.stub_list),
            Page::GraphQl => Some(&mut self.graphql_list),
            Page::Soap => Some(&mut self.soap_list),
            _ => None,
        }
    }

    /// Search text of the current page, if it has a search box
    pub fn search_mut(&mut self) -> Option<&mut String> {
        match self.page {
            Page::Requests => Some(&mut self.journal.search),
            _ => self.list_view_mut().map(|view| &mut view.search),
        }
    }

    /// Rows visible on the current page after filtering
    pub fn visible_count(&self) -> usize {
        match self.page {
            Page::Stubs => self.stub_list.filter(self.stubs.items()).len(),
            Page::GraphQl => self.graphql_list.filter(self.graphql.items()).len(),
            Page::Soap => self.soap_list.filter(self.soap.items()).len(),
            Page::Requests => self.journal.apply(self.requests.items()).len(),
            Page::Scenarios => self.scenarios.items().len(),
            _ => 0,
        }
    }

    /// Id of the highlighted row on a stub list page
    pub fn selected_id(&self) -> Option<String> {
        let id = match self.page {
            Page::Stubs => self
                .stub_list
                .selected_item(self.stubs.items())
                .map(|s| s.id()),
            Page::GraphQl => self
                .graphql_list
                .selected_item(self.graphql.items())
                .map(|s| s.id()),
            Page::Soap => self
                .soap_list
                .selected_item(self.soap.items())
                .map(|s| s.id()),
            _ => None,
        };
        id.map(str::to_string)
    }

    /// Pull cursors back inside their lists after a refetch or delete
    pub fn clamp_selection(&mut self) {
        let visible = self.visible_count();
        let last = visible.saturating_sub(1);
        match self.page {
            Page::Requests => self.journal.selected = self.journal.selected.min(last),
            Page::Scenarios => self.scenario_page.selected = self.scenario_page.selected.min(last),
            _ => {
                if let Some(view) = self.list_view_mut() {
                    view.clamp(visible);
                }
            }
        }
    }

    pub fn selected_scenario(&self) -> Option<&ScenarioState> {
        self.scenarios.items().get(self.scenario_page.selected)
    }

    /// Pretty JSON of the highlighted stub, for yanking
    pub fn selected_stub_json(&self) -> Option<String> {
        let id = self.selected_id()?;
        let text = match self.page {
            Page::Stubs => serde_json::to_string_pretty(self.stubs.get(&id)?),
            Page::GraphQl => serde_json::to_string_pretty(self.graphql.get(&id)?),
            Page::Soap => serde_json::to_string_pretty(self.soap.get(&id)?),
            _ => return None,
        };
        text.ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario() -> ScenarioState {
        ScenarioState {
            id: "s1".to_string(),
            name: "checkout".to_string(),
            state: "Started".to_string(),
            possible_states: vec!["Started".to_string(), "Paid".to_string()],
        }
    }

    #[test]
    fn test_modal_prefills_current_state() {
        let modal = ScenarioModal::open(&scenario());
        assert_eq!(modal.input.content(), "Started");
        assert_eq!(modal.submission().unwrap(), "Started");
    }

    #[test]
    fn test_quick_select_wraps() {
        let mut modal = ScenarioModal::open(&scenario());
        modal.quick_select(true);
        modal.quick_select(true);
        assert_eq!(modal.input.content(), "Paid");
        modal.quick_select(true);
        assert_eq!(modal.input.content(), "Started");
        modal.quick_select(false);
        assert_eq!(modal.input.content(), "Paid");
    }

    #[test]
    fn test_blank_state_is_refused() {
        let mut modal = ScenarioModal::open(&scenario());
        modal.input.set_content("   ".to_string());
        assert_eq!(modal.submission().unwrap_err(), "New state is required");
    }

    #[test]
    fn test_selected_stub_follows_filter() {
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
        state.stub_list.search = "user".to_string();

        assert_eq!(state.visible_count(), 1);
        assert_eq!(state.selected_id().as_deref(), Some("2"));
        assert!(state.selected_stub_json().unwrap().contains("\"Users\""));
    }
}
