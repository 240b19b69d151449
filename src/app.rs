use crate::api::AdminClient;
use crate::execute;
use crate::forms::ActiveEditor;
use crate::tasks::{self, Command, SharedState};
use crate::types::{Flash, Page};
use crate::ui::{self, draw};
use crate::{config::Config, state::AppState};
use color_eyre::Result;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    DefaultTerminal, Frame,
};
use std::sync::{Arc, RwLock};
use std::time::Instant;
use tokio::task::JoinHandle;

#[derive(Debug)]
pub struct App {
    state: SharedState,
    client: AdminClient,
    config: Config,
    spinner_index: usize,
    last_tick: Instant,
    event_handler: ui::EventHandler,
    /// Background status poll, alive only while the recording page is shown
    recording_poll: Option<JoinHandle<()>>,
    last_page: Option<Page>,
}

impl App {
    pub fn new(config: Config) -> Self {
        let mut state = AppState::default();
        state.settings.values = config.settings_values();

        Self {
            state: Arc::new(RwLock::new(state)),
            client: AdminClient::new(config.api_base_url()),
            config,
            spinner_index: 0,
            last_tick: Instant::now(),
            event_handler: ui::EventHandler::new(),
            recording_poll: None,
            last_page: None,
        }
    }

    pub async fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        tracing::info!(api = self.client.base_url(), "starting");

        while !self.event_handler.should_quit {
            if self.last_tick.elapsed().as_millis() > 100 {
                self.spinner_index = (self.spinner_index + 1) % draw::SPINNER.len();
                self.last_tick = Instant::now();
            }

            self.on_page_change();
            tasks::ensure_page_data(&self.state, &self.client);
            self.state.write().unwrap().clamp_selection();

            terminal.draw(|frame| self.draw(frame))?;

            if let Some(command) = self.event_handler.handle_events(&self.state)? {
                self.run_command(command);
            }
        }

        if let Some(handle) = self.recording_poll.take() {
            handle.abort();
        }
        tracing::info!("shutting down");
        Ok(())
    }

    /// Page-entry work: dashboard stats are refetched on every visit, the
    /// recording status is polled while its page is open.
    fn on_page_change(&mut self) {
        let page = self.state.read().unwrap().page;
        if self.last_page == Some(page) {
            return;
        }

        if let Some(handle) = self.recording_poll.take() {
            handle.abort();
        }
        match page {
            Page::Dashboard => tasks::fetch_dashboard(&self.state, &self.client),
            Page::Recording => {
                self.recording_poll = Some(tasks::spawn_recording_poll(
                    &self.state,
                    &self.client,
                    self.config.poll_interval_secs(),
                ));
            }
            _ => {}
        }
        self.last_page = Some(page);
    }

    fn run_command(&mut self, command: Command) {
        tracing::debug!(?command, "command");
        match command {
            Command::Refresh => {
                let page = self.state.read().unwrap().page;
                tasks::refresh_page(&self.state, &self.client, page);
            }
            Command::Delete { page, id } => tasks::delete_stub(&self.state, &self.client, page, id),
            Command::SaveEditor => tasks::save_editor(&self.state, &self.client),
            Command::ExecuteEditor => self.execute_editor(),
            Command::ValidateWsdl => tasks::validate_wsdl(&self.state, &self.client),
            Command::SetScenarioState { id, state } => {
                tasks::set_scenario_state(&self.state, &self.client, id, state)
            }
            Command::ResetScenarios => tasks::reset_scenarios(&self.state, &self.client),
            Command::ClearJournal => tasks::clear_journal(&self.state, &self.client),
            Command::Recording(action) => {
                tasks::recording_action(&self.state, &self.client, action)
            }
            Command::Import => tasks::import_spec(&self.state, &self.client),
            Command::Export => {
                tasks::export_stubs(&self.state, &self.client, self.config.export_dir())
            }
            Command::SaveSettings => self.save_settings(),
        }
    }

    /// Fire the open stub's request at the mock server
    fn execute_editor(&self) {
        let request = {
            let s = self.state.read().unwrap();
            if s.editor.executing {
                return;
            }
            let Some(active) = &s.editor.active else {
                return;
            };
            let base = self.config.mock_server_url();
            match active {
                ActiveEditor::Rest(session) => session
                    .current_value()
                    .map_err(|errors| errors.join("; "))
                    .and_then(|stub| execute::rest_request(&stub, &base)),
                ActiveEditor::GraphQl(session) => session
                    .current_value()
                    .map_err(|errors| errors.join("; "))
                    .and_then(|stub| execute::graphql_request(&stub, &base)),
                ActiveEditor::Soap(session) => session
                    .current_value()
                    .map_err(|errors| errors.join("; "))
                    .and_then(|stub| execute::soap_request(&stub, &base)),
            }
        };

        execute::execute_background(Arc::clone(&self.state), request);
    }

    /// Validate the settings page, write the config file and point the client
    /// at the new admin API
    fn save_settings(&mut self) {
        let values = self.state.read().unwrap().settings.values.clone();

        let mut saved = false;
        let message = match self.config.with_settings(&values) {
            Err(e) => Flash::error(e),
            Ok(config) => match config.save() {
                Err(e) => {
                    tracing::error!(error = %e, "failed to write config");
                    Flash::error(format!("Failed to save settings: {e}"))
                }
                Ok(()) => {
                    let api_changed = config.api_base_url() != self.config.api_base_url();
                    self.config = config;
                    if api_changed {
                        self.client = AdminClient::new(self.config.api_base_url());
                        self.invalidate_all();
                    }
                    tracing::info!(api = self.client.base_url(), "settings saved");
                    saved = true;
                    Flash::success("Settings saved")
                }
            },
        };

        let mut s = self.state.write().unwrap();
        if saved {
            s.settings.values = self.config.settings_values();
        }
        s.settings.message = Some(message);
    }

    fn invalidate_all(&self) {
        let mut s = self.state.write().unwrap();
        s.stubs.invalidate();
        s.graphql.invalidate();
        s.soap.invalidate();
        s.scenarios.invalidate();
        s.requests.invalidate();
        s.dashboard.stats = None;
    }

    fn draw(&self, frame: &mut Frame) {
        let state = self.state.read().unwrap();

        // Header, Body, Footer
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(frame.area());

        // Sidebar + page
        let body_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(24), Constraint::Min(0)])
            .split(main_chunks[1]);

        draw::render_header(
            frame,
            main_chunks[0],
            &state,
            self.client.base_url(),
            self.spinner_index,
        );
        draw::render_sidebar(frame, body_chunks[0], state.page);

        if state.editor.active.is_some() {
            draw::render_editor(frame, body_chunks[1], &state);
        } else {
            draw::render_page(frame, body_chunks[1], &state, self.spinner_index);
        }

        draw::render_footer(frame, main_chunks[2], &state);

        // Modals LAST
        draw::render_modals(frame, &state);
    }
}
