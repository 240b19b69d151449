//! Page rendering
//!
//! One function per page. The three stub lists share `render_stub_list`; the
//! journal adds a detail panel on the right when details are toggled on.

use super::components::{
    render_empty_message, render_error_message, render_loading_spinner, render_search_bar,
};
use super::styling::{self, get_method_color, get_status_color, METHOD_COLUMN_WIDTH};
use super::tabs::try_format_json;
use crate::editor::TextEditor;
use crate::listing::{Listable, ListView};
use crate::model::{GraphQlStub, RequestLog, SoapStub, Stub};
use crate::state::{AppState, SettingsField};
use crate::store::ResourceCache;
use crate::tasks::RecordingAction;
use crate::types::{InputMode, Page};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

/// Render the body of the current page
pub fn render_page(frame: &mut Frame, area: Rect, state: &AppState, spinner_index: usize) {
    match state.page {
        Page::Dashboard => render_dashboard(frame, area, state, spinner_index),
        Page::Stubs => render_stub_list(
            frame,
            area,
            state,
            spinner_index,
            &state.stubs,
            &state.stub_list,
            rest_columns,
        ),
        Page::GraphQl => render_stub_list(
            frame,
            area,
            state,
            spinner_index,
            &state.graphql,
            &state.graphql_list,
            graphql_columns,
        ),
        Page::Soap => render_stub_list(
            frame,
            area,
            state,
            spinner_index,
            &state.soap,
            &state.soap_list,
            soap_columns,
        ),
        Page::Scenarios => render_scenarios(frame, area, state, spinner_index),
        Page::Requests => render_journal(frame, area, state, spinner_index),
        Page::Recording => render_recording(frame, area, state),
        Page::ImportExport => render_transfer(frame, area, state),
        Page::Settings => render_settings(frame, area, state),
    }
}

/// Text of an open input with a block cursor at the insertion point
pub fn with_cursor(input: &TextEditor) -> String {
    let content = input.content();
    let (before, after) = content.split_at(input.cursor().min(content.len()));
    format!("{before}▊{after}")
}

fn page_block(title: String) -> Block<'static> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(styling::focused_border()))
}

// ============================================================================
// Dashboard
// ============================================================================

fn render_dashboard(frame: &mut Frame, area: Rect, state: &AppState, spinner_index: usize) {
    let title = " Dashboard ";
    let page = &state.dashboard;

    let Some(stats) = &page.stats else {
        if page.loading {
            render_loading_spinner(frame, area, title, spinner_index);
        } else if let Some(error) = &page.error {
            render_error_message(frame, area, title, error);
        } else {
            render_empty_message(frame, area, title, "No statistics yet");
        }
        return;
    };

    let label = Style::default().fg(Color::Cyan);
    let stat = |name: &str, value: String| {
        Line::from(vec![
            Span::styled(format!("{name:<24}"), label),
            Span::raw(value),
        ])
    };

    let mut lines = vec![
        Line::from(Span::styled(
            "Stubs",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        stat(
            "REST",
            format!("{} ({} active)", stats.total_stubs, stats.active_stubs),
        ),
        stat("  with faults", stats.stubs_with_faults.to_string()),
        stat("  with scenarios", stats.stubs_with_scenarios.to_string()),
        stat(
            "GraphQL",
            format!(
                "{} ({} active)",
                stats.total_graphql_stubs, stats.active_graphql_stubs
            ),
        ),
        stat(
            "SOAP",
            format!(
                "{} ({} active)",
                stats.total_soap_stubs, stats.active_soap_stubs
            ),
        ),
        Line::from(""),
        Line::from(Span::styled(
            "Requests",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        stat("Total", stats.total_requests.to_string()),
        stat("Recent", stats.recent_requests.to_string()),
        Line::from(vec![
            Span::styled(format!("{:<24}", "Succeeded / failed"), label),
            Span::styled(
                stats.success_requests.to_string(),
                Style::default().fg(Color::Green),
            ),
            Span::raw(" / "),
            Span::styled(
                stats.error_requests.to_string(),
                Style::default().fg(Color::Red),
            ),
        ]),
        stat("Success rate", format!("{:.1}%", stats.success_rate)),
    ];

    if let Some(error) = &page.error {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(Color::Red),
        )));
    }

    let paragraph = Paragraph::new(lines).block(page_block(title.to_string()));
    frame.render_widget(paragraph, area);
}

// ============================================================================
// Stub lists
// ============================================================================

fn rest_columns(stub: &Stub) -> Vec<Span<'static>> {
    let status = stub.response.status;
    let mut spans = vec![Span::styled(
        format!("{status:<4}"),
        Style::default().fg(get_status_color(status)),
    )];
    if !stub.is_enabled() {
        spans.push(Span::styled("(disabled) ", styling::muted()));
    }
    spans
}

fn graphql_columns(stub: &GraphQlStub) -> Vec<Span<'static>> {
    let kind = stub.operation_type().unwrap_or("operation");
    let mut spans = vec![Span::styled(
        format!("{kind:<13}"),
        Style::default().fg(Color::Magenta),
    )];
    if !stub.enabled {
        spans.push(Span::styled("(disabled) ", styling::muted()));
    }
    spans
}

fn soap_columns(stub: &SoapStub) -> Vec<Span<'static>> {
    let mut spans = vec![Span::styled(
        format!("{:<5}", stub.soap_version.as_str()),
        Style::default().fg(Color::Magenta),
    )];
    if !stub.is_enabled() {
        spans.push(Span::styled("(disabled) ", styling::muted()));
    }
    spans
}

fn render_stub_list<T: Listable>(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    spinner_index: usize,
    cache: &ResourceCache<T>,
    view: &ListView,
    columns: fn(&T) -> Vec<Span<'static>>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let visible = view.filter(cache.items());
    render_search_bar(
        frame,
        chunks[0],
        &view.search,
        state.input_mode == InputMode::Searching,
        visible.len(),
        cache.items().len(),
    );

    let filter = view
        .method
        .as_deref()
        .map(|m| format!(" [{m}]"))
        .unwrap_or_default();
    let title = format!(" {}{filter} ", state.page.title());

    if cache.is_loading() && cache.items().is_empty() {
        render_loading_spinner(frame, chunks[1], &title, spinner_index);
        return;
    }
    if cache.items().is_empty() {
        match &cache.error {
            Some(error) => render_error_message(frame, chunks[1], &title, error),
            None => render_empty_message(frame, chunks[1], &title, "No stubs yet\n\nPress [n] to create one"),
        }
        return;
    }
    if visible.is_empty() {
        render_empty_message(
            frame,
            chunks[1],
            &title,
            "No matching stubs\n\nPress [Esc] or [Ctrl+L] to clear search",
        );
        return;
    }

    let items: Vec<ListItem> = visible
        .iter()
        .map(|item| {
            let armed = view.confirm.is_armed(item.id());
            let mut spans = Vec::new();
            if let Some(method) = item.method() {
                spans.push(Span::styled(
                    format!("{method:<METHOD_COLUMN_WIDTH$}"),
                    Style::default()
                        .fg(get_method_color(method))
                        .add_modifier(Modifier::BOLD),
                ));
            }
            spans.extend(columns(item));
            spans.push(Span::styled(
                item.name().to_string(),
                Style::default().fg(Color::White),
            ));
            spans.push(Span::raw("  "));
            spans.push(Span::styled(item.secondary().to_string(), styling::muted()));
            if armed {
                spans.push(Span::styled(
                    "  Press d again to delete",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ));
            }

            let line = Line::from(spans);
            if armed {
                ListItem::new(line).style(Style::default().bg(Color::Rgb(60, 20, 20)))
            } else {
                ListItem::new(line)
            }
        })
        .collect();

    let mut title = title;
    if let Some(error) = &cache.error {
        title = format!("{title}- {error} ");
    }

    let list = List::new(items)
        .block(page_block(title))
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("→ ");

    let mut list_state = ListState::default().with_selected(Some(view.selected));
    frame.render_stateful_widget(list, chunks[1], &mut list_state);
}

// ============================================================================
// Scenarios
// ============================================================================

fn render_scenarios(frame: &mut Frame, area: Rect, state: &AppState, spinner_index: usize) {
    let title = " Scenarios ";
    let cache = &state.scenarios;

    if cache.is_loading() && cache.items().is_empty() {
        render_loading_spinner(frame, area, title, spinner_index);
        return;
    }
    if cache.items().is_empty() {
        match &cache.error {
            Some(error) => render_error_message(frame, area, title, error),
            None => render_empty_message(frame, area, title, "No scenarios defined"),
        }
        return;
    }

    let items: Vec<ListItem> = cache
        .items()
        .iter()
        .map(|scenario| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:<30}", scenario.name),
                    Style::default().fg(Color::White),
                ),
                Span::styled(
                    format!("[{}]", scenario.state),
                    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                Span::styled(scenario.possible_states.join(" | "), styling::muted()),
            ]))
        })
        .collect();

    let title = match &cache.error {
        Some(error) => format!("{title}- {error} "),
        None => title.to_string(),
    };

    let list = List::new(items)
        .block(page_block(title))
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("→ ");

    let mut list_state = ListState::default().with_selected(Some(state.scenario_page.selected));
    frame.render_stateful_widget(list, area, &mut list_state);
}

// ============================================================================
// Request journal
// ============================================================================

fn render_journal(frame: &mut Frame, area: Rect, state: &AppState, spinner_index: usize) {
    let view = &state.journal;
    let cache = &state.requests;
    let entries = view.apply(cache.items());

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    render_search_bar(
        frame,
        rows[0],
        &view.search,
        state.input_mode == InputMode::Searching,
        entries.len(),
        cache.items().len(),
    );

    let (list_area, detail_area) = if view.show_details {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[1]);
        (cols[0], Some(cols[1]))
    } else {
        (rows[1], None)
    };

    let filters = format!(
        " Request Journal [method: {}] [status: {}] [{}] ",
        view.method.as_deref().unwrap_or("all"),
        view.status_prefix
            .as_deref()
            .map(|p| format!("{p}xx"))
            .unwrap_or_else(|| "all".to_string()),
        view.order.arrow(),
    );

    if cache.is_loading() && cache.items().is_empty() {
        render_loading_spinner(frame, list_area, &filters, spinner_index);
        return;
    }
    if entries.is_empty() {
        match &cache.error {
            Some(error) => render_error_message(frame, list_area, &filters, error),
            None => render_empty_message(frame, list_area, &filters, "No requests recorded"),
        }
        return;
    }

    let items: Vec<ListItem> = entries
        .iter()
        .map(|log| {
            let status = log.response_definition.status;
            let matched = if log.was_matched {
                Span::styled("✓", Style::default().fg(Color::Green))
            } else {
                Span::styled("✗", Style::default().fg(Color::Red))
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:<25}", log.timestamp), styling::muted()),
                Span::styled(
                    format!("{:<METHOD_COLUMN_WIDTH$}", log.request.method),
                    Style::default()
                        .fg(get_method_color(&log.request.method))
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("{status:<4}"),
                    Style::default().fg(get_status_color(status)),
                ),
                matched,
                Span::raw(" "),
                Span::raw(log.request.url.clone()),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(page_block(filters))
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("→ ");

    let mut list_state = ListState::default().with_selected(Some(view.selected));
    frame.render_stateful_widget(list, list_area, &mut list_state);

    if let Some(detail_area) = detail_area {
        let entry = view.selected_entry(cache.items());
        render_journal_details(frame, detail_area, entry);
    }
}

fn render_journal_details(frame: &mut Frame, area: Rect, entry: Option<&RequestLog>) {
    let block = Block::default()
        .title(" Details ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(styling::unfocused_border()));

    let Some(log) = entry else {
        let empty = Paragraph::new("No request selected")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty, area);
        return;
    };

    let heading = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                format!("{} ", log.request.method),
                Style::default().fg(get_method_color(&log.request.method)),
            ),
            Span::raw(
                log.request
                    .absolute_url
                    .clone()
                    .unwrap_or_else(|| log.request.url.clone()),
            ),
        ]),
        Line::from(Span::styled(log.timestamp.clone(), styling::muted())),
    ];

    if let Some(mapping) = &log.stub_mapping {
        lines.push(Line::from(vec![
            Span::styled("Matched stub: ", styling::muted()),
            Span::raw(mapping.clone()),
        ]));
    } else if !log.was_matched {
        lines.push(Line::from(Span::styled(
            "No stub matched",
            Style::default().fg(Color::Red),
        )));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Request headers", heading)));
    for (name, values) in &log.request.headers {
        lines.push(Line::from(format!("  {name}: {}", values.join(", "))));
    }
    if !log.request.query_params.is_empty() {
        lines.push(Line::from(Span::styled("Query parameters", heading)));
        for (name, values) in &log.request.query_params {
            lines.push(Line::from(format!("  {name}={}", values.join(","))));
        }
    }
    if let Some(body) = log.request.body.as_deref().filter(|b| !b.is_empty()) {
        lines.push(Line::from(Span::styled("Request body", heading)));
        lines.extend(try_format_json(body).lines().map(|l| Line::from(l.to_string())));
    }

    let response = &log.response_definition;
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("Response ", heading),
        Span::styled(
            response.status.to_string(),
            Style::default().fg(get_status_color(response.status)),
        ),
    ]));
    for (name, value) in &response.headers {
        lines.push(Line::from(format!("  {name}: {value}")));
    }
    if let Some(body) = response.body.as_deref().filter(|b| !b.is_empty()) {
        lines.extend(try_format_json(body).lines().map(|l| Line::from(l.to_string())));
    } else if let Some(file) = &response.body_file_name {
        lines.push(Line::from(Span::styled(
            format!("(body from file {file})"),
            styling::muted(),
        )));
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

// ============================================================================
// Recording
// ============================================================================

fn action_line(key: &str, label: &str, enabled: bool) -> Line<'static> {
    let (key_style, label_style) = if enabled {
        (
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            Style::default().fg(Color::White),
        )
    } else {
        (
            Style::default().fg(Color::DarkGray),
            Style::default().fg(Color::DarkGray),
        )
    };
    Line::from(vec![
        Span::styled(format!("[{key}] "), key_style),
        Span::styled(label.to_string(), label_style),
    ])
}

fn render_recording(frame: &mut Frame, area: Rect, state: &AppState) {
    let page = &state.recording;
    let status = page.state.status;

    let target = match &state.line_input {
        Some(input) if state.input_mode == InputMode::EditingField => with_cursor(input),
        _ if page.target_url.is_empty() => "[_____]".to_string(),
        _ => page.target_url.clone(),
    };

    let status_color = match status {
        crate::model::RecordingStatus::Recording => Color::Red,
        crate::model::RecordingStatus::Playing => Color::Green,
        _ => Color::Gray,
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Status:     ", Style::default().fg(Color::Cyan)),
            Span::styled(
                status.label(),
                Style::default().fg(status_color).add_modifier(Modifier::BOLD),
            ),
            Span::raw(if page.busy { "  ..." } else { "" }),
        ]),
        Line::from(vec![
            Span::styled("Recording:  ", Style::default().fg(Color::Cyan)),
            Span::raw(page.state.target_url.clone().unwrap_or_else(|| "-".to_string())),
        ]),
        Line::from(vec![
            Span::styled("Target URL: ", Style::default().fg(Color::Cyan)),
            Span::styled(target, Style::default().fg(Color::Yellow)),
            Span::styled("  (e to edit)", styling::muted()),
        ]),
        Line::from(""),
    ];

    let actions = [
        ("r", "Start recording", RecordingAction::StartRecording),
        ("s", "Stop recording", RecordingAction::StopRecording),
        ("p", "Start playback", RecordingAction::StartPlayback),
        ("P", "Stop playback", RecordingAction::StopPlayback),
    ];
    for (key, label, action) in actions {
        lines.push(action_line(key, label, !page.busy && action.allowed(status)));
    }

    if let Some(error) = &page.error {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(Color::Red),
        )));
    }

    let paragraph = Paragraph::new(lines)
        .block(page_block(" Recording ".to_string()))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

// ============================================================================
// Import / export
// ============================================================================

fn render_transfer(frame: &mut Frame, area: Rect, state: &AppState) {
    let page = &state.transfer;
    let label = Style::default().fg(Color::Cyan);

    let path = match &state.line_input {
        Some(input) if state.input_mode == InputMode::EditingField => with_cursor(input),
        _ if page.path.is_empty() => "[_____]".to_string(),
        _ => page.path.clone(),
    };

    let type_style = if page.import_type.is_supported() {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let export_dir = state.settings.value(SettingsField::ExportDirectory);
    let export_dir = if export_dir.is_empty() {
        "current directory"
    } else {
        export_dir
    };

    let mut lines = vec![
        Line::from(Span::styled(
            "Import",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled("Type: ", label),
            Span::styled(page.import_type.label(), type_style),
            Span::styled("  (t to change)", styling::muted()),
        ]),
        Line::from(vec![
            Span::styled("File: ", label),
            Span::styled(path, Style::default().fg(Color::Yellow)),
            Span::styled("  (e to edit)", styling::muted()),
        ]),
        action_line("i", "Import", !page.busy),
        Line::from(""),
        Line::from(Span::styled(
            "Export",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled("Directory: ", label),
            Span::raw(export_dir.to_string()),
        ]),
        action_line("x", "Export all stubs", !page.busy),
    ];

    if page.busy {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "⏳ Working...",
            Style::default().fg(Color::Cyan),
        )));
    } else if let Some(message) = &page.message {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            message.text.clone(),
            Style::default().fg(styling::tone_color(message.tone)),
        )));
    }

    let paragraph = Paragraph::new(lines)
        .block(page_block(" Import / Export ".to_string()))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

// ============================================================================
// Settings
// ============================================================================

fn render_settings(frame: &mut Frame, area: Rect, state: &AppState) {
    let page = &state.settings;
    let editing = state.input_mode == InputMode::EditingField;

    let mut lines: Vec<Line> = SettingsField::ALL
        .iter()
        .enumerate()
        .map(|(idx, field)| {
            let selected = idx == page.selected;
            let value = match &state.line_input {
                Some(input) if selected && editing => format!("[{}]", with_cursor(input)),
                _ if page.value(*field).is_empty() => "[_____]".to_string(),
                _ => format!("[{}]", page.value(*field)),
            };

            let indicator_style = if selected {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            let name_style = if selected {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            let value_style = if selected && editing {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else if selected {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::Gray)
            };

            Line::from(vec![
                Span::styled(if selected { "→ " } else { "  " }, indicator_style),
                Span::styled(format!("{:<22}", field.label()), name_style),
                Span::styled(value, value_style),
            ])
        })
        .collect();

    if let Some(message) = &page.message {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            message.text.clone(),
            Style::default().fg(styling::tone_color(message.tone)),
        )));
    }

    let paragraph = Paragraph::new(lines)
        .block(page_block(" Settings ".to_string()))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_marks_insertion_point() {
        let mut input = TextEditor::single_line("abc");
        input.move_cursor_left();
        assert_eq!(with_cursor(&input), "ab▊c");
    }

    #[test]
    fn test_rest_columns_flag_disabled_stubs() {
        let mut stub = Stub::default();
        stub.response.status = 404;
        stub.enabled = Some(false);
        let text: String = rest_columns(&stub)
            .iter()
            .map(|span| span.content.to_string())
            .collect();
        assert!(text.starts_with("404"));
        assert!(text.contains("(disabled)"));
    }
}
