//! Client and background-task behaviour against an in-process fake admin API

use axum::{
    extract::{Path as AxPath, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;
use ratatui::{backend::TestBackend, Terminal};
use wiremock_tui::api::AdminClient;
use wiremock_tui::error::ApiError;
use wiremock_tui::forms::{ActiveEditor, EditorSession, FormSession};
use wiremock_tui::model::{GraphQlStub, RecordingStatus, SoapStub, Stub};
use wiremock_tui::state::AppState;
use wiremock_tui::tasks;
use wiremock_tui::transfer::{self, ImportOutcome, ImportType, EXPORT_FILE_NAME};
use wiremock_tui::types::Page;
use wiremock_tui::ui::draw;

#[derive(Default)]
struct Fake {
    stubs: Mutex<Vec<Value>>,
    next_id: Mutex<u64>,
    scenario_state: Mutex<String>,
    /// Every POST/PUT that reached a stub collection, as "METHOD path"
    writes: Mutex<Vec<String>>,
}

type Shared = Arc<Fake>;

async fn list_stubs(State(fake): State<Shared>) -> Json<Vec<Value>> {
    Json(fake.stubs.lock().unwrap().clone())
}

async fn create_stub(State(fake): State<Shared>, Json(mut stub): Json<Value>) -> Json<Value> {
    let id = {
        let mut next = fake.next_id.lock().unwrap();
        *next += 1;
        *next
    };
    // Numeric ids, as the real server sends them
    stub["id"] = json!(id);
    fake.stubs.lock().unwrap().push(stub.clone());
    fake.writes.lock().unwrap().push("POST /stubs".to_string());
    Json(stub)
}

async fn update_stub(
    State(fake): State<Shared>,
    AxPath(id): AxPath<String>,
    Json(stub): Json<Value>,
) -> Json<Value> {
    fake.writes.lock().unwrap().push(format!("PUT /stubs/{id}"));
    let mut stubs = fake.stubs.lock().unwrap();
    if let Some(slot) = stubs.iter_mut().find(|s| s["id"].to_string() == id) {
        *slot = stub.clone();
    }
    Json(stub)
}

async fn create_graphql(State(fake): State<Shared>, Json(stub): Json<Value>) -> Json<Value> {
    fake.writes.lock().unwrap().push("POST /graphql-stubs".to_string());
    Json(stub)
}

async fn create_soap(State(fake): State<Shared>, Json(stub): Json<Value>) -> Json<Value> {
    fake.writes.lock().unwrap().push("POST /soap-stubs".to_string());
    Json(stub)
}

async fn get_graphql(AxPath(id): AxPath<String>) -> Json<Value> {
    Json(json!({
        "id": id,
        "name": "User lookup",
        "operationName": "GetUser",
        "query": "query GetUser { user { id } }",
        "response": { "data": { "user": { "id": 1 } } }
    }))
}

async fn get_soap(AxPath(id): AxPath<String>) -> Json<Value> {
    Json(json!({
        "id": id,
        "name": "Weather",
        "soapAction": "GetWeather",
        "soapVersion": "1.2",
        "request": "<soap:Envelope><soap:Body/></soap:Envelope>",
        "response": "<soap:Envelope><soap:Body/></soap:Envelope>"
    }))
}

async fn get_stub(State(fake): State<Shared>, AxPath(id): AxPath<String>) -> impl IntoResponse {
    let stubs = fake.stubs.lock().unwrap();
    match stubs.iter().find(|s| s["id"].to_string() == id) {
        Some(stub) => (StatusCode::OK, Json(stub.clone())).into_response(),
        None => (StatusCode::NOT_FOUND, "Stub not found").into_response(),
    }
}

async fn delete_stub(AxPath(_id): AxPath<String>) -> StatusCode {
    // Empty body, so the client has to fall back to its own message
    StatusCode::INTERNAL_SERVER_ERROR
}

async fn set_scenario(
    State(fake): State<Shared>,
    AxPath(id): AxPath<String>,
    Json(body): Json<Value>,
) -> Json<Value> {
    let state = body["state"].as_str().unwrap_or_default().to_string();
    *fake.scenario_state.lock().unwrap() = state.clone();
    Json(json!({ "id": id, "name": "checkout", "state": state, "possibleStates": ["Started", "Paid"] }))
}

async fn import_openapi(Json(body): Json<Value>) -> impl IntoResponse {
    if body["spec"].as_str().unwrap_or_default().contains("openapi") {
        (StatusCode::OK, Json(json!([{ "id": 1 }, { "id": 2 }]))).into_response()
    } else {
        (StatusCode::BAD_REQUEST, "Not an OpenAPI document").into_response()
    }
}

async fn export_stubs() -> &'static str {
    r#"{"mappings":[{"id":"1"}]}"#
}

async fn recording_status() -> Json<Value> {
    Json(json!({ "status": "Recording", "targetUrl": "http://upstream:9000" }))
}

async fn spawn_fake() -> (AdminClient, Shared) {
    let fake = Shared::default();
    let app = Router::new()
        .route("/api/stubs", get(list_stubs).post(create_stub))
        .route(
            "/api/stubs/:id",
            get(get_stub).put(update_stub).delete(delete_stub),
        )
        .route("/api/graphql-stubs", post(create_graphql))
        .route("/api/graphql-stubs/:id", get(get_graphql))
        .route("/api/soap-stubs", post(create_soap))
        .route("/api/soap-stubs/:id", get(get_soap))
        .route("/api/scenarios/:id", put(set_scenario))
        .route("/api/import/openapi", post(import_openapi))
        .route("/api/export/stubs", get(export_stubs))
        .route("/api/recording/status", get(recording_status))
        .with_state(Arc::clone(&fake));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (AdminClient::new(format!("http://127.0.0.1:{port}/api")), fake)
}

/// Wait for a background task to land its result in the shared state
async fn wait_for(state: &Arc<RwLock<AppState>>, done: impl Fn(&AppState) -> bool) {
    for _ in 0..100 {
        if done(&state.read().unwrap()) {
            return;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("background task did not finish");
}

#[tokio::test]
async fn created_stub_shows_up_in_list() {
    let (client, _fake) = spawn_fake().await;

    let created = client
        .create_stub(&Stub {
            name: "Orders".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(created.id, "1");

    let stubs = client.list_stubs().await.unwrap();
    assert_eq!(stubs.len(), 1);
    assert_eq!(stubs[0].name, "Orders");
    assert_eq!(stubs[0].request.method, "GET");
}

#[tokio::test]
async fn missing_stub_is_none() {
    let (client, _fake) = spawn_fake().await;
    assert_eq!(client.get_stub("42").await.unwrap(), None);
}

#[tokio::test]
async fn empty_error_body_uses_fallback_message() {
    let (client, _fake) = spawn_fake().await;

    let err = client.delete_stub("1").await.unwrap_err();
    match &err {
        ApiError::Server { status, .. } => assert_eq!(*status, 500),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.to_string(), "Failed to delete stub");
}

#[tokio::test]
async fn import_reports_created_count() {
    let (client, _fake) = spawn_fake().await;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("petstore.yaml");
    std::fs::write(&path, "openapi: 3.0.0\npaths: {}\n").unwrap();

    let result = transfer::import_file(&client, ImportType::OpenApi, &path).await;
    assert_eq!(
        transfer::import_message(&result),
        "Successfully imported OpenAPI specification (2 stubs created)"
    );
    assert_eq!(result.unwrap(), ImportOutcome::Imported { created: 2 });
}

#[tokio::test]
async fn rejected_import_carries_server_text() {
    let (client, _fake) = spawn_fake().await;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    std::fs::write(&path, "hello").unwrap();

    let result = transfer::import_file(&client, ImportType::OpenApi, &path).await;
    let message = transfer::import_message(&result);
    assert!(message.starts_with("Import failed:"));
    assert!(message.contains("Not an OpenAPI document"));
}

#[tokio::test]
async fn export_writes_server_document() {
    let (client, _fake) = spawn_fake().await;
    let dir = tempfile::tempdir().unwrap();

    let path = transfer::export_to_dir(&client, dir.path()).await.unwrap();
    assert_eq!(path, dir.path().join(EXPORT_FILE_NAME));
    assert_eq!(
        std::fs::read_to_string(path).unwrap(),
        r#"{"mappings":[{"id":"1"}]}"#
    );
}

#[tokio::test]
async fn recording_status_decodes() {
    let (client, _fake) = spawn_fake().await;
    let status = client.recording_status().await.unwrap();
    assert_eq!(status.status, RecordingStatus::Recording);
    assert_eq!(status.target_url.as_deref(), Some("http://upstream:9000"));
}

#[tokio::test]
async fn fetch_task_fills_cache() {
    let (client, _fake) = spawn_fake().await;
    client.create_stub(&Stub::default()).await.unwrap();

    let state = Arc::new(RwLock::new(AppState {
        page: Page::Stubs,
        ..Default::default()
    }));
    tasks::ensure_page_data(&state, &client);
    assert!(state.read().unwrap().stubs.is_loading());

    wait_for(&state, |s| !s.stubs.is_loading()).await;
    let s = state.read().unwrap();
    assert_eq!(s.stubs.items().len(), 1);
    assert!(s.stubs.error.is_none());
}

#[tokio::test]
async fn failed_delete_keeps_row_and_reports() {
    let (client, _fake) = spawn_fake().await;
    let created = client.create_stub(&Stub::default()).await.unwrap();

    let state = Arc::new(RwLock::new(AppState {
        page: Page::Stubs,
        ..Default::default()
    }));
    state.write().unwrap().stubs.replace_all(vec![created.clone()]);

    tasks::delete_stub(&state, &client, Page::Stubs, created.id.clone());
    wait_for(&state, |s| s.stubs.error.is_some()).await;

    let s = state.read().unwrap();
    assert_eq!(s.stubs.items().len(), 1);
    assert_eq!(
        s.stubs.error.as_deref(),
        Some("Failed to delete stub")
    );
}

#[tokio::test]
async fn scenario_state_change_reaches_server() {
    let (client, fake) = spawn_fake().await;
    let updated = client.set_scenario_state("s1", "Paid").await.unwrap();
    assert_eq!(updated.state, "Paid");
    assert_eq!(*fake.scenario_state.lock().unwrap(), "Paid");
}

fn state_with_editor(page: Page, editor: ActiveEditor) -> Arc<RwLock<AppState>> {
    let mut state = AppState {
        page,
        ..Default::default()
    };
    state.editor.open(editor);
    Arc::new(RwLock::new(state))
}

/// Save, then give a stray request time to land before checking the fake
async fn save_rejected_locally(editor: ActiveEditor, page: Page) -> Vec<String> {
    let (client, fake) = spawn_fake().await;
    let state = state_with_editor(page, editor);

    tasks::save_editor(&state, &client);
    tokio::time::sleep(Duration::from_millis(100)).await;

    let s = state.read().unwrap();
    let session = s.editor.session().unwrap();
    assert!(!session.is_saving());
    assert!(fake.writes.lock().unwrap().is_empty());
    session.errors().to_vec()
}

#[tokio::test]
async fn invalid_rest_draft_never_reaches_server() {
    let mut stub = Stub::default();
    stub.name.clear();
    stub.response.status = 700;

    let errors =
        save_rejected_locally(ActiveEditor::Rest(EditorSession::new(stub)), Page::Stubs).await;
    assert_eq!(
        errors,
        vec![
            "Name is required",
            "Response status must be between 100 and 599"
        ]
    );
}

#[tokio::test]
async fn invalid_graphql_response_never_reaches_server() {
    let stub = GraphQlStub {
        operation_name: "GetUser".to_string(),
        query: "query GetUser { user { id } }".to_string(),
        response: r#"{"user": {"id": 1}}"#.to_string(),
        ..Default::default()
    };

    let errors =
        save_rejected_locally(ActiveEditor::GraphQl(EditorSession::new(stub)), Page::GraphQl).await;
    assert_eq!(
        errors,
        vec!["Response must contain a \"data\" or \"errors\" field"]
    );
}

#[tokio::test]
async fn soap_body_without_envelope_body_never_reaches_server() {
    let stub = SoapStub {
        soap_action: "GetWeather".to_string(),
        request: "<soap:Envelope><soap:Header/></soap:Envelope>".to_string(),
        ..Default::default()
    };

    let errors =
        save_rejected_locally(ActiveEditor::Soap(EditorSession::new(stub)), Page::Soap).await;
    assert_eq!(errors, vec!["Request XML must be a SOAP envelope with a Body"]);
}

#[tokio::test]
async fn json_edit_without_id_still_updates_opened_stub() {
    let (client, fake) = spawn_fake().await;
    let created = client.create_stub(&Stub::default()).await.unwrap();
    fake.writes.lock().unwrap().clear();

    let mut session = EditorSession::new(created.clone());
    session.toggle_mode().unwrap();
    let mut doc: Value = serde_json::from_str(&session.json_text()).unwrap();
    doc.as_object_mut().unwrap().remove("id");
    doc["name"] = json!("Renamed");
    session.json_editor_mut().unwrap().set_content(doc.to_string());
    session.json_changed();

    let state = state_with_editor(Page::Stubs, ActiveEditor::Rest(session));
    tasks::save_editor(&state, &client);
    wait_for(&state, |s| s.editor.active.is_none()).await;

    assert_eq!(
        *fake.writes.lock().unwrap(),
        vec![format!("PUT /stubs/{}", created.id)]
    );
    assert_eq!(fake.stubs.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn graphql_and_soap_stubs_fetch_by_id() {
    let (client, _fake) = spawn_fake().await;

    let graphql = client.get_graphql_stub("g1").await.unwrap();
    assert_eq!(graphql.id, "g1");
    assert_eq!(graphql.operation_name, "GetUser");
    assert!(graphql.response.contains("\"data\""));

    let soap = client.get_soap_stub("s1").await.unwrap();
    assert_eq!(soap.id, "s1");
    assert_eq!(soap.soap_action, "GetWeather");
}

#[tokio::test]
async fn ping_stub_lists_with_method_and_status() {
    let (client, _fake) = spawn_fake().await;
    let mut ping = Stub {
        name: "Ping".to_string(),
        ..Default::default()
    };
    ping.request.method = "GET".to_string();
    ping.request.set_url_value("/ping");
    ping.response.status = 200;
    client.create_stub(&ping).await.unwrap();

    let state = Arc::new(RwLock::new(AppState {
        page: Page::Stubs,
        ..Default::default()
    }));
    tasks::ensure_page_data(&state, &client);
    wait_for(&state, |s| !s.stubs.is_loading()).await;

    let mut terminal = Terminal::new(TestBackend::new(80, 12)).unwrap();
    terminal
        .draw(|frame| draw::render_page(frame, frame.area(), &state.read().unwrap(), 0))
        .unwrap();

    let screen: String = terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|cell| cell.symbol())
        .collect();
    assert!(screen.contains("GET"));
    assert!(screen.contains("200"));
    assert!(screen.contains("Ping"));
    assert!(screen.contains("/ping"));
}
