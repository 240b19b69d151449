//! Stub editor rendering
//!
//! The editor replaces the list it was opened from. Tab bar on top, then the
//! selected tab's fields (or the JSON document in JSON mode), validation
//! errors, and the response of the last execute on the right.

use super::styling::{self, get_status_color};
use crate::forms::{FieldRow, FormSession};
use crate::state::{AppState, EditorState};
use crate::types::{EditorTab, FieldKind, InputMode};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn render_editor(frame: &mut Frame, area: Rect, state: &AppState) {
    let Some(session) = state.editor.session() else {
        return;
    };

    let mut title = format!(" {} ", session.title());
    if session.is_saving() {
        title.push_str("- saving... ");
    }

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(styling::focused_border()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let show_response = state.editor.executing || state.editor.exec_response.is_some();
    let columns = if show_response {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(inner)
    } else {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(100)])
            .split(inner)
    };

    let errors = session.errors();
    let error_height = if errors.is_empty() {
        0
    } else {
        errors.len() as u16 + 2
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),            // Tab bar
            Constraint::Min(0),               // Fields or JSON
            Constraint::Length(error_height), // Validation errors
        ])
        .split(columns[0]);

    render_tab_bar(frame, chunks[0], session);

    if session.is_json_mode() {
        render_json_view(frame, chunks[1], session, state.input_mode == InputMode::EditingJson);
    } else {
        render_form_rows(frame, chunks[1], &session.rows(), session.input().is_some());
    }

    if !errors.is_empty() {
        render_errors(frame, chunks[2], errors);
    }

    if show_response {
        render_response_panel(frame, columns[1], &state.editor, state.yank_flash);
    }
}

/// Render the editor tab bar. JSON mode hides the tabs.
fn render_tab_bar(frame: &mut Frame, area: Rect, session: &dyn FormSession) {
    let active_style = Style::default()
        .fg(Color::Black)
        .bg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let inactive_style = Style::default().fg(Color::Gray);

    let mut spans = Vec::new();
    if session.is_json_mode() {
        spans.push(Span::styled(" JSON ", active_style));
        spans.push(Span::styled("  J:back to form", styling::muted()));
    } else {
        for tab in EditorTab::ALL {
            let style = if tab == session.tab() {
                active_style
            } else {
                inactive_style
            };
            spans.push(Span::styled(format!(" {} ", tab.title()), style));
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled(" J:JSON", styling::muted()));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_form_rows(frame: &mut Frame, area: Rect, rows: &[FieldRow], editing: bool) {
    if rows.is_empty() {
        let empty = Paragraph::new("No fields on this tab").style(styling::muted());
        frame.render_widget(empty, area);
        return;
    }

    let mut lines = vec![Line::from("")];
    for row in rows {
        lines.push(build_field_line(row, editing && row.selected));
        if row.selected {
            if let Some(hint) = &row.hint {
                lines.push(Line::from(Span::styled(format!("    {hint}"), styling::muted())));
            }
        }
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

/// One form field: indicator, label and value. Multi-line values show their
/// first line with a line count.
fn build_field_line(row: &FieldRow, is_editing: bool) -> Line<'static> {
    let indicator = if row.selected { "→ " } else { "  " };

    let value = match row.kind {
        FieldKind::Multiline => {
            let count = row.value.lines().count();
            let first = row.value.lines().next().unwrap_or("");
            if count > 1 {
                format!("{first} … (+{} lines)", count - 1)
            } else {
                first.to_string()
            }
        }
        _ => row.value.clone(),
    };

    let value_display = match row.kind {
        FieldKind::Cycle => format!("< {value} >"),
        FieldKind::Toggle => format!("[{}]", if value == "Yes" { "x" } else { " " }),
        _ if is_editing => "[editing]".to_string(),
        _ if value.is_empty() => "[_____]".to_string(),
        _ => format!("[{value}]"),
    };

    let indicator_style = if row.selected {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let name_style = if row.selected {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };

    let value_style = if is_editing {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else if row.selected {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::Gray)
    };

    Line::from(vec![
        Span::styled(indicator, indicator_style),
        Span::styled(format!("{:<22}", format!("{}:", row.label)), name_style),
        Span::styled(value_display, value_style),
    ])
}

fn render_json_view(frame: &mut Frame, area: Rect, session: &dyn FormSession, editing: bool) {
    let Some(editor) = session.json_editor() else {
        return;
    };

    let (cursor_line, cursor_col) = editor.cursor_line_col();
    let lines: Vec<Line> = editor
        .content()
        .split('\n')
        .enumerate()
        .map(|(idx, text)| {
            let number = Span::styled(format!("{:>4} ", idx + 1), styling::muted());
            if editing && idx == cursor_line {
                let split = text
                    .char_indices()
                    .nth(cursor_col)
                    .map(|(i, _)| i)
                    .unwrap_or(text.len());
                let (before, after) = text.split_at(split);
                Line::from(vec![
                    number,
                    Span::raw(before.to_string()),
                    Span::styled("▊", Style::default().fg(Color::Yellow)),
                    Span::raw(after.to_string()),
                ])
            } else {
                Line::from(vec![number, Span::raw(text.to_string())])
            }
        })
        .collect();

    // Keep the cursor line on screen
    let height = area.height.saturating_sub(2) as usize;
    let scroll = cursor_line.saturating_sub(height.saturating_sub(1));

    let border = if editing {
        styling::focused_border()
    } else {
        styling::unfocused_border()
    };
    let title = if editing {
        " JSON (editing) "
    } else {
        " JSON (Enter to edit) "
    };

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border)),
        )
        .scroll((scroll as u16, 0));
    frame.render_widget(paragraph, area);
}

fn render_errors(frame: &mut Frame, area: Rect, errors: &[String]) {
    let lines: Vec<Line> = errors
        .iter()
        .map(|e| Line::from(Span::styled(format!("• {e}"), Style::default().fg(Color::Red))))
        .collect();

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .title(" Validation ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red)),
    );
    frame.render_widget(paragraph, area);
}

/// Render the response of the last execute
fn render_response_panel(frame: &mut Frame, area: Rect, editor: &EditorState, yank_flash: bool) {
    let mut lines: Vec<Line> = Vec::new();

    if editor.executing {
        lines.push(Line::from(vec![Span::styled(
            "⏳ Executing request...",
            Style::default().fg(Color::Cyan),
        )]));
    } else if let Some(ref response) = editor.exec_response {
        if response.is_error {
            lines.push(Line::from(vec![Span::styled(
                "❌ Error",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]));
            lines.push(Line::from(""));

            if let Some(ref err_msg) = response.error_message {
                for line in err_msg.lines() {
                    lines.push(Line::from(Span::styled(
                        line.to_string(),
                        Style::default().fg(Color::Red),
                    )));
                }
            }
        } else {
            lines.push(Line::from(vec![
                Span::styled("Status: ", Style::default().fg(Color::Cyan)),
                Span::styled(
                    format!("{} {}", response.status, response.status_text),
                    Style::default().fg(get_status_color(response.status)),
                ),
                Span::raw("  "),
                Span::styled("Duration: ", Style::default().fg(Color::Cyan)),
                Span::raw(format!("{}ms", response.duration.as_millis())),
            ]));

            let mut headers: Vec<_> = response.headers.iter().collect();
            headers.sort();
            for (name, value) in headers {
                lines.push(Line::from(vec![
                    Span::styled(format!("{name}: "), styling::muted()),
                    Span::raw(value.clone()),
                ]));
            }
            lines.push(Line::from(""));

            let body_style = if yank_flash {
                Style::default()
                    .bg(Color::Green)
                    .fg(Color::Black)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            for line in try_format_json(&response.body).lines() {
                lines.push(Line::from(Span::styled(line.to_string(), body_style)));
            }
        }
    }

    let content = Paragraph::new(lines)
        .block(
            Block::default()
                .title(" Response (Ctrl+U/Ctrl+D scroll) ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(styling::unfocused_border())),
        )
        .wrap(Wrap { trim: false })
        .scroll((editor.response_scroll as u16, 0));

    frame.render_widget(content, area);
}

/// Attempts to pretty-print JSON, returns original string if not valid JSON
pub fn try_format_json(body: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(json) => serde_json::to_string_pretty(&json).unwrap_or_else(|_| body.to_string()),
        Err(_) => body.to_string(),
    }
}
