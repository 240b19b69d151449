//! Background work against the admin API
//!
//! Every function here updates the shared state to show that work started,
//! spawns a tokio task for the HTTP call and writes the outcome back when it
//! lands. Nothing is cancelled once sent; only the recording poll is aborted,
//! when the user leaves the recording page.

use crate::api::AdminClient;
use crate::error::ApiResult;
use crate::forms::{ActiveEditor, FormModel, FormSession};
use crate::model::{GraphQlStub, RecordingStatus, SoapStub, Stub};
use crate::state::AppState;
use crate::store::{Keyed, ResourceCache};
use crate::transfer::{self, ImportOutcome};
use crate::types::{Flash, InputMode, Page};
use crate::validate::validate_rest_json;
use std::future::Future;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tokio::task::JoinHandle;

pub type SharedState = Arc<RwLock<AppState>>;

type CacheOf<T> = fn(&mut AppState) -> &mut ResourceCache<T>;

/// Side effects requested by the event handler, run by the app loop
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Refetch whatever the current page shows
    Refresh,
    Delete { page: Page, id: String },
    SaveEditor,
    ExecuteEditor,
    ValidateWsdl,
    SetScenarioState { id: String, state: String },
    ResetScenarios,
    ClearJournal,
    Recording(RecordingAction),
    Import,
    Export,
    SaveSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordingAction {
    StartRecording,
    StopRecording,
    StartPlayback,
    StopPlayback,
}

impl RecordingAction {
    /// Whether the action is allowed from `status`
    pub fn allowed(self, status: RecordingStatus) -> bool {
        match self {
            RecordingAction::StartRecording => status.can_start_recording(),
            RecordingAction::StopRecording => status.can_stop_recording(),
            RecordingAction::StartPlayback => status.can_start_playback(),
            RecordingAction::StopPlayback => status.can_stop_playback(),
        }
    }

    fn describe(self) -> &'static str {
        match self {
            RecordingAction::StartRecording => "start recording",
            RecordingAction::StopRecording => "stop recording",
            RecordingAction::StartPlayback => "start playback",
            RecordingAction::StopPlayback => "stop playback",
        }
    }
}

fn fetch_collection<T>(
    state: &SharedState,
    cache: CacheOf<T>,
    what: &'static str,
    fetch: impl Future<Output = ApiResult<Vec<T>>> + Send + 'static,
) where
    T: Keyed + Clone + Send + Sync + 'static,
{
    cache(&mut state.write().unwrap()).mark_loading();

    let state = Arc::clone(state);
    tokio::spawn(async move {
        let result = fetch.await;
        let mut s = state.write().unwrap();
        let cache = cache(&mut s);
        match result {
            Ok(items) => {
                tracing::debug!(what, count = items.len(), "fetched");
                cache.replace_all(items);
            }
            Err(e) => {
                tracing::warn!(what, error = %e, "fetch failed");
                cache.fetch_failed(e.to_string());
            }
        }
    });
}

pub fn fetch_stubs(state: &SharedState, client: &AdminClient) {
    let client = client.clone();
    fetch_collection(state, |s| &mut s.stubs, "stubs", async move {
        client.list_stubs().await
    });
}

pub fn fetch_graphql_stubs(state: &SharedState, client: &AdminClient) {
    let client = client.clone();
    fetch_collection(state, |s| &mut s.graphql, "graphql stubs", async move {
        client.list_graphql_stubs().await
    });
}

pub fn fetch_soap_stubs(state: &SharedState, client: &AdminClient) {
    let client = client.clone();
    fetch_collection(state, |s| &mut s.soap, "soap stubs", async move {
        client.list_soap_stubs().await
    });
}

pub fn fetch_scenarios(state: &SharedState, client: &AdminClient) {
    let client = client.clone();
    fetch_collection(state, |s| &mut s.scenarios, "scenarios", async move {
        client.list_scenarios().await
    });
}

pub fn fetch_requests(state: &SharedState, client: &AdminClient) {
    let client = client.clone();
    fetch_collection(state, |s| &mut s.requests, "requests", async move {
        client.list_requests().await
    });
}

pub fn fetch_dashboard(state: &SharedState, client: &AdminClient) {
    state.write().unwrap().dashboard.loading = true;

    let state = Arc::clone(state);
    let client = client.clone();
    tokio::spawn(async move {
        let result = client.dashboard_stats().await;
        let mut s = state.write().unwrap();
        s.dashboard.loading = false;
        match result {
            Ok(stats) => {
                s.dashboard.stats = Some(stats);
                s.dashboard.error = None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "dashboard fetch failed");
                s.dashboard.error = Some(e.to_string());
            }
        }
    });
}

/// Fetch the current page's data if its cache went stale
pub fn ensure_page_data(state: &SharedState, client: &AdminClient) {
    let (page, stale) = {
        let s = state.read().unwrap();
        let stale = match s.page {
            Page::Stubs => s.stubs.needs_fetch(),
            Page::GraphQl => s.graphql.needs_fetch(),
            Page::Soap => s.soap.needs_fetch(),
            Page::Scenarios => s.scenarios.needs_fetch(),
            Page::Requests => s.requests.needs_fetch(),
            _ => false,
        };
        (s.page, stale)
    };

    if stale {
        refresh_page(state, client, page);
    }
}

pub fn refresh_page(state: &SharedState, client: &AdminClient, page: Page) {
    match page {
        Page::Dashboard => fetch_dashboard(state, client),
        Page::Stubs => fetch_stubs(state, client),
        Page::GraphQl => fetch_graphql_stubs(state, client),
        Page::Soap => fetch_soap_stubs(state, client),
        Page::Scenarios => fetch_scenarios(state, client),
        Page::Requests => fetch_requests(state, client),
        Page::Recording => fetch_recording_status(state, client),
        Page::ImportExport | Page::Settings => {}
    }
}

/// Delete the row the user confirmed. The cache only changes once the server
/// has acknowledged the delete.
pub fn delete_stub(state: &SharedState, client: &AdminClient, page: Page, id: String) {
    let state = Arc::clone(state);
    let client = client.clone();
    tokio::spawn(async move {
        let (result, noun) = match page {
            Page::Stubs => (client.delete_stub(&id).await, Stub::NOUN),
            Page::GraphQl => (client.delete_graphql_stub(&id).await, GraphQlStub::NOUN),
            Page::Soap => (client.delete_soap_stub(&id).await, SoapStub::NOUN),
            _ => return,
        };

        let mut s = state.write().unwrap();
        match result {
            Ok(()) => {
                tracing::info!(%id, noun, "deleted");
                match page {
                    Page::Stubs => s.stubs.apply_removed(&id),
                    Page::GraphQl => s.graphql.apply_removed(&id),
                    _ => s.soap.apply_removed(&id),
                }
                s.flash = Some(Flash::success(format!("Deleted {noun}")));
            }
            Err(e) => {
                let action = format!("delete {noun}");
                match page {
                    Page::Stubs => s.stubs.mutation_failed(&action, &e),
                    Page::GraphQl => s.graphql.mutation_failed(&action, &e),
                    _ => s.soap.mutation_failed(&action, &e),
                }
            }
        }
    });
}

/// What a save will send, worked out under the lock before any I/O
enum SavePlan {
    RestRaw {
        id: Option<String>,
        document: serde_json::Value,
    },
    Rest(Stub),
    GraphQl(GraphQlStub),
    Soap(SoapStub),
}

fn plan_save(editor: &ActiveEditor) -> Result<SavePlan, Vec<String>> {
    match editor {
        ActiveEditor::Rest(session) if session.draft.is_raw() => {
            let mut document = validate_rest_json(&session.json_text())?;
            let id = session.original_id.clone();
            if let Some(fields) = document.as_object_mut() {
                match &id {
                    Some(id) => {
                        fields.insert("id".to_string(), serde_json::Value::String(id.clone()));
                    }
                    None => {
                        fields.remove("id");
                    }
                }
            }
            Ok(SavePlan::RestRaw { id, document })
        }
        ActiveEditor::Rest(session) => session.prepare_save().map(SavePlan::Rest),
        ActiveEditor::GraphQl(session) => session.prepare_save().map(SavePlan::GraphQl),
        ActiveEditor::Soap(session) => session.prepare_save().map(SavePlan::Soap),
    }
}

fn finish_save<T: Keyed + Clone>(
    s: &mut AppState,
    cache: CacheOf<T>,
    noun: &str,
    result: ApiResult<T>,
    label: &str,
) {
    match result {
        Ok(saved) => {
            tracing::info!(id = saved.key(), noun, "saved");
            cache(s).apply_updated(saved);
            s.editor.close();
            s.input_mode = InputMode::Normal;
            s.flash = Some(Flash::success(format!("Saved {noun} {label}")));
        }
        Err(e) => {
            tracing::warn!(noun, error = %e, "save failed");
            if let Some(session) = s.editor.session_mut() {
                session.set_saving(false);
                session.set_errors(vec![e.failure_message(&format!("save {noun}"))]);
            }
        }
    }
}

/// Validate the open editor and create or update its stub
pub fn save_editor(state: &SharedState, client: &AdminClient) {
    let plan = {
        let mut s = state.write().unwrap();
        let Some(editor) = s.editor.active.as_ref() else {
            return;
        };
        if editor.session().is_saving() {
            return;
        }
        let plan = plan_save(editor);
        let Some(session) = s.editor.session_mut() else {
            return;
        };
        match plan {
            Ok(plan) => {
                session.set_errors(Vec::new());
                session.set_saving(true);
                plan
            }
            Err(errors) => {
                session.set_errors(errors);
                return;
            }
        }
    };

    let state = Arc::clone(state);
    let client = client.clone();
    tokio::spawn(async move {
        match plan {
            SavePlan::RestRaw { id, document } => {
                let label = document
                    .get("name")
                    .and_then(|v| v.as_str())
                    .unwrap_or_default()
                    .to_string();
                let result = match id {
                    Some(id) => client.update_stub_raw(&id, &document).await,
                    None => client.create_stub_raw(&document).await,
                };
                finish_save(
                    &mut state.write().unwrap(),
                    |s| &mut s.stubs,
                    Stub::NOUN,
                    result,
                    &label,
                );
            }
            SavePlan::Rest(stub) => {
                let result = if stub.is_new() {
                    client.create_stub(&stub).await
                } else {
                    client.update_stub(&stub.id, &stub).await
                };
                finish_save(
                    &mut state.write().unwrap(),
                    |s| &mut s.stubs,
                    Stub::NOUN,
                    result,
                    &stub.name,
                );
            }
            SavePlan::GraphQl(stub) => {
                let result = if stub.is_new() {
                    client.create_graphql_stub(&stub).await
                } else {
                    client.update_graphql_stub(&stub.id, &stub).await
                };
                finish_save(
                    &mut state.write().unwrap(),
                    |s| &mut s.graphql,
                    GraphQlStub::NOUN,
                    result,
                    &stub.name,
                );
            }
            SavePlan::Soap(stub) => {
                let result = if stub.is_new() {
                    client.create_soap_stub(&stub).await
                } else {
                    client.update_soap_stub(&stub.id, &stub).await
                };
                finish_save(
                    &mut state.write().unwrap(),
                    |s| &mut s.soap,
                    SoapStub::NOUN,
                    result,
                    &stub.name,
                );
            }
        }
    });
}

/// Ask the server whether the SOAP draft's WSDL URL is usable
pub fn validate_wsdl(state: &SharedState, client: &AdminClient) {
    let url = {
        let mut s = state.write().unwrap();
        let url = match s.editor.active.as_ref() {
            Some(ActiveEditor::Soap(session)) => session
                .current_value()
                .ok()
                .and_then(|stub| stub.wsdl_url)
                .unwrap_or_default(),
            _ => return,
        };
        if url.trim().is_empty() {
            s.flash = Some(Flash::error("WSDL URL is required"));
            return;
        }
        s.editor.validating = true;
        url
    };

    let state = Arc::clone(state);
    let client = client.clone();
    tokio::spawn(async move {
        let result = client.validate_wsdl(&url).await;
        let mut s = state.write().unwrap();
        s.editor.validating = false;
        s.flash = Some(match result {
            Ok(()) => Flash::success(format!("WSDL is valid: {url}")),
            Err(e) => {
                tracing::warn!(%url, error = %e, "wsdl validation failed");
                Flash::error(format!("WSDL validation failed: {e}"))
            }
        });
    });
}

pub fn set_scenario_state(state: &SharedState, client: &AdminClient, id: String, new_state: String) {
    if let Some(modal) = state.write().unwrap().scenario_page.modal.as_mut() {
        modal.saving = true;
        modal.error = None;
    }

    let state = Arc::clone(state);
    let client = client.clone();
    tokio::spawn(async move {
        let result = client.set_scenario_state(&id, &new_state).await;
        let mut s = state.write().unwrap();
        match result {
            Ok(_) => {
                tracing::info!(%id, state = %new_state, "scenario state set");
                let name = s
                    .scenario_page
                    .modal
                    .take()
                    .map(|modal| modal.name)
                    .unwrap_or(id);
                s.scenarios.invalidate();
                s.input_mode = InputMode::Normal;
                s.flash = Some(Flash::success(format!(
                    "Scenario {name} moved to {new_state}"
                )));
            }
            Err(e) => {
                tracing::warn!(%id, error = %e, "scenario update failed");
                if let Some(modal) = s.scenario_page.modal.as_mut() {
                    modal.saving = false;
                    modal.error = Some(e.failure_message("update scenario"));
                }
            }
        }
    });
}

pub fn reset_scenarios(state: &SharedState, client: &AdminClient) {
    state.write().unwrap().scenario_page.busy = true;

    let state = Arc::clone(state);
    let client = client.clone();
    tokio::spawn(async move {
        let result = client.reset_scenarios().await;
        let mut s = state.write().unwrap();
        s.scenario_page.busy = false;
        match result {
            Ok(()) => {
                tracing::info!("scenarios reset");
                s.scenarios.invalidate();
                s.flash = Some(Flash::success("All scenarios reset"));
            }
            Err(e) => s.scenarios.mutation_failed("reset scenarios", &e),
        }
    });
}

pub fn clear_journal(state: &SharedState, client: &AdminClient) {
    let state = Arc::clone(state);
    let client = client.clone();
    tokio::spawn(async move {
        let result = client.clear_requests().await;
        let mut s = state.write().unwrap();
        match result {
            Ok(()) => {
                tracing::info!("request journal cleared");
                s.requests.clear();
                s.journal.selected = 0;
                s.journal.show_details = false;
                s.flash = Some(Flash::success("Request journal cleared"));
            }
            Err(e) => s.requests.mutation_failed("clear requests", &e),
        }
    });
}

async fn poll_recording_once(state: &SharedState, client: &AdminClient) {
    let result = client.recording_status().await;
    let mut s = state.write().unwrap();
    match result {
        Ok(status) => {
            s.recording.state = status;
            s.recording.error = None;
        }
        Err(e) => {
            tracing::debug!(error = %e, "recording status poll failed");
            s.recording.error = Some("Failed to fetch recording status".to_string());
        }
    }
}

pub fn fetch_recording_status(state: &SharedState, client: &AdminClient) {
    let state = Arc::clone(state);
    let client = client.clone();
    tokio::spawn(async move {
        poll_recording_once(&state, &client).await;
    });
}

/// Poll the recording status until the returned handle is aborted
pub fn spawn_recording_poll(
    state: &SharedState,
    client: &AdminClient,
    interval_secs: u64,
) -> JoinHandle<()> {
    let state = Arc::clone(state);
    let client = client.clone();
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_secs(interval_secs.max(1)));
        loop {
            ticker.tick().await;
            poll_recording_once(&state, &client).await;
        }
    })
}

/// Run a recording transition if the last known status allows it
pub fn recording_action(state: &SharedState, client: &AdminClient, action: RecordingAction) {
    let target = {
        let mut s = state.write().unwrap();
        let status = s.recording.state.status;
        if s.recording.busy || !action.allowed(status) {
            s.flash = Some(Flash::error(format!(
                "Cannot {} while {}",
                action.describe(),
                status.label()
            )));
            return;
        }
        let target = s.recording.target_url.trim().to_string();
        if action == RecordingAction::StartRecording {
            if let Err(e) = crate::config::validate_url(&target) {
                let message = if target.is_empty() {
                    "Target URL is required".to_string()
                } else {
                    e
                };
                s.recording.error = Some(message);
                return;
            }
        }
        s.recording.busy = true;
        target
    };

    let state = Arc::clone(state);
    let client = client.clone();
    tokio::spawn(async move {
        let result = match action {
            RecordingAction::StartRecording => client.start_recording(&target).await,
            RecordingAction::StopRecording => client.stop_recording().await,
            RecordingAction::StartPlayback => client.start_playback().await,
            RecordingAction::StopPlayback => client.stop_playback().await,
        };

        {
            let mut s = state.write().unwrap();
            s.recording.busy = false;
            match &result {
                Ok(()) => {
                    tracing::info!(action = action.describe(), "recording control");
                    s.recording.error = None;
                }
                Err(e) => {
                    tracing::warn!(action = action.describe(), error = %e, "recording control failed");
                    s.recording.error = Some(e.failure_message(action.describe()));
                }
            }
        }

        if result.is_ok() {
            poll_recording_once(&state, &client).await;
        }
    });
}

pub fn import_spec(state: &SharedState, client: &AdminClient) {
    let (kind, path) = {
        let mut s = state.write().unwrap();
        if s.transfer.busy {
            return;
        }
        let path = s.transfer.path.trim().to_string();
        if path.is_empty() && s.transfer.import_type.is_supported() {
            s.transfer.message = Some(Flash::error("Import failed: choose a file first"));
            return;
        }
        s.transfer.busy = true;
        s.transfer.message = None;
        (s.transfer.import_type, PathBuf::from(path))
    };

    let state = Arc::clone(state);
    let client = client.clone();
    tokio::spawn(async move {
        let result = transfer::import_file(&client, kind, &path).await;
        let text = transfer::import_message(&result);

        let mut s = state.write().unwrap();
        let message = match result {
            Ok(ImportOutcome::Imported { .. }) => {
                s.stubs.invalidate();
                Flash::success(text)
            }
            Ok(ImportOutcome::Unsupported) => Flash::info(text),
            Err(_) => Flash::error(text),
        };
        s.transfer.busy = false;
        s.transfer.message = Some(message);
    });
}

pub fn export_stubs(state: &SharedState, client: &AdminClient, dir: PathBuf) {
    {
        let mut s = state.write().unwrap();
        if s.transfer.busy {
            return;
        }
        s.transfer.busy = true;
        s.transfer.message = None;
    }

    let state = Arc::clone(state);
    let client = client.clone();
    tokio::spawn(async move {
        let result = transfer::export_to_dir(&client, &dir).await;
        let text = transfer::export_message(&result);

        let mut s = state.write().unwrap();
        s.transfer.busy = false;
        s.transfer.message = Some(if result.is_ok() {
            Flash::success(text)
        } else {
            Flash::error(text)
        });
    });
}
