//! Modal dialog rendering
//!
//! - Scenario state modal (possible states + free text)
//! - Field input modal for the stub editor

use super::panels::with_cursor;
use super::styling;
use crate::state::{AppState, ScenarioModal};
use crate::types::InputMode;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Rect of `width` x `height` centered in `area`, clipped to fit
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    }
}

fn modal_block(title: String) -> Block<'static> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(styling::modal_border(Color::Cyan))
        .style(styling::modal_style())
}

/// Draw whichever modal the current input mode calls for
pub fn render_modals(frame: &mut Frame, state: &AppState) {
    match state.input_mode {
        InputMode::ScenarioModal => {
            if let Some(modal) = &state.scenario_page.modal {
                render_scenario_modal(frame, modal);
            }
        }
        InputMode::EditingField if state.line_input.is_none() => {
            render_field_input_modal(frame, state);
        }
        _ => {}
    }
}

/// Render the scenario state modal
pub fn render_scenario_modal(frame: &mut Frame, modal: &ScenarioModal) {
    let area = frame.area();

    let list_height = modal.possible_states.len().min(8) as u16;
    let modal_width = (area.width as f32 * 0.6).min(70.0) as u16;
    let modal_height = 9 + list_height;
    let modal_area = centered_rect(area, modal_width, modal_height);

    frame.render_widget(Clear, modal_area);

    let block = modal_block(format!(" Set state: {} ", modal.name));
    let inner = block.inner(modal_area);
    frame.render_widget(block, modal_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),           // Label
            Constraint::Length(list_height), // Possible states
            Constraint::Length(1),           // Spacer
            Constraint::Length(1),           // Input label
            Constraint::Length(1),           // Input
            Constraint::Length(1),           // Error
            Constraint::Min(0),
            Constraint::Length(1), // Help
        ])
        .split(inner);

    let label = Paragraph::new("Possible states:").style(Style::default().fg(Color::LightCyan));
    frame.render_widget(label, chunks[0]);

    let states: Vec<Line> = modal
        .possible_states
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            if modal.quick == Some(idx) {
                Line::from(vec![
                    Span::styled("→ ", Style::default().fg(Color::Yellow)),
                    Span::styled(
                        name.clone(),
                        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                    ),
                ])
            } else {
                Line::from(vec![Span::raw("  "), Span::raw(name.clone())])
            }
        })
        .collect();
    frame.render_widget(Paragraph::new(states), chunks[1]);

    let input_label = Paragraph::new("New state:").style(Style::default().fg(Color::LightCyan));
    frame.render_widget(input_label, chunks[3]);

    let input = Paragraph::new(with_cursor(&modal.input)).style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );
    frame.render_widget(input, chunks[4]);

    if let Some(error) = &modal.error {
        let error = Paragraph::new(error.clone()).style(Style::default().fg(Color::Red));
        frame.render_widget(error, chunks[5]);
    } else if modal.saving {
        let saving = Paragraph::new("Saving...").style(Style::default().fg(Color::Cyan));
        frame.render_widget(saving, chunks[5]);
    }

    let help = Paragraph::new("↑/↓: Choose  |  Enter: Apply  |  Esc: Cancel")
        .style(styling::muted())
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[7]);
}

/// Render the input for the selected editor field
pub fn render_field_input_modal(frame: &mut Frame, state: &AppState) {
    let Some(session) = state.editor.session() else {
        return;
    };
    let Some(input) = session.input() else {
        return;
    };
    let label = session
        .rows()
        .into_iter()
        .find(|row| row.selected)
        .map(|row| row.label)
        .unwrap_or("Value");

    let area = frame.area();
    let modal_width = (area.width as f32 * 0.7).min(100.0) as u16;
    let modal_height = if input.is_multiline() {
        (area.height as f32 * 0.6) as u16
    } else {
        5
    };
    let modal_area = centered_rect(area, modal_width, modal_height);

    frame.render_widget(Clear, modal_area);

    let block = modal_block(format!(" {label} "));
    let inner = block.inner(modal_area);
    frame.render_widget(block, modal_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);

    let (cursor_line, _) = input.cursor_line_col();
    let scroll = cursor_line.saturating_sub(chunks[0].height.saturating_sub(1) as usize);
    let text = Paragraph::new(with_cursor(input))
        .style(Style::default().fg(Color::Yellow))
        .wrap(Wrap { trim: false })
        .scroll((scroll as u16, 0));
    frame.render_widget(text, chunks[0]);

    let help_text = if input.is_multiline() {
        "Ctrl+S: Store  |  Enter: New line  |  Esc: Cancel"
    } else {
        "Enter: Store  |  Esc: Cancel"
    };
    let help = Paragraph::new(help_text)
        .style(styling::muted())
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[1]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_fits_inside_area() {
        let area = Rect::new(0, 0, 100, 40);
        let rect = centered_rect(area, 60, 10);
        assert_eq!(rect, Rect::new(20, 15, 60, 10));
    }

    #[test]
    fn test_centered_rect_clips_to_small_area() {
        let area = Rect::new(0, 0, 30, 5);
        let rect = centered_rect(area, 60, 10);
        assert_eq!(rect, Rect::new(0, 0, 30, 5));
    }
}
