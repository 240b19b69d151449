//! Reusable UI components
//!
//! Shared pieces drawn around every page:
//! - Header (admin API, activity)
//! - Sidebar (pages and their hotkeys)
//! - Footer (context help or the last status message)
//! - Search bar
//! - Loading spinner, error and empty messages

use super::styling;
use crate::state::AppState;
use crate::types::{InputMode, Page};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

pub const SPINNER: [&str; 4] = ["⠋", "⠙", "⠹", "⠸"];

/// Render the application header with the admin API and background activity
pub fn render_header(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    api_base: &str,
    spinner_index: usize,
) {
    let busy = is_busy(state);
    let activity = if busy {
        format!("{} working", SPINNER[spinner_index % SPINNER.len()])
    } else {
        "idle".to_string()
    };

    let header_text = format!("wiremock tui - {api_base} [{activity}]");

    let header = Paragraph::new(header_text)
        .style(Style::default().fg(Color::Cyan))
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(header, area);
}

fn is_busy(state: &AppState) -> bool {
    state.stubs.is_loading()
        || state.graphql.is_loading()
        || state.soap.is_loading()
        || state.scenarios.is_loading()
        || state.requests.is_loading()
        || state.dashboard.loading
        || state.editor.executing
        || state.recording.busy
        || state.transfer.busy
        || state.scenario_page.busy
}

/// Render the page list with hotkeys
pub fn render_sidebar(frame: &mut Frame, area: Rect, current: Page) {
    let items: Vec<ListItem> = Page::ALL
        .iter()
        .enumerate()
        .map(|(idx, page)| {
            let selected = *page == current;
            let style = if selected {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("[{}] ", idx + 1), styling::muted()),
                Span::styled(page.title(), style),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title(" Pages ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(styling::unfocused_border())),
    );

    frame.render_widget(list, area);
}

/// Key help for whatever currently has the keyboard
pub fn footer_help(state: &AppState) -> &'static str {
    match state.input_mode {
        InputMode::Searching => "Type to filter  Enter:Keep  Esc:Clear  Ctrl+L:Clear",
        InputMode::EditingField => "Enter:Store  Ctrl+S:Store multi-line  Esc:Cancel",
        InputMode::EditingJson => "Ctrl+S:Save  Ctrl+F:Format  Esc:Stop editing",
        InputMode::ScenarioModal => "↑/↓:Choose state  Enter:Apply  Esc:Cancel",
        InputMode::Normal if state.editor.active.is_some() => {
            "Tab/h/l:Tab  j/k:Field  Enter:Edit  J:JSON  x:Execute  y:Yank  Ctrl+S:Save  Esc:Close"
        }
        InputMode::Normal => match state.page {
            Page::Dashboard => "1-9:Page  Tab:Next page  Ctrl+R:Refresh  q:Quit",
            Page::Stubs | Page::GraphQl | Page::Soap => {
                "j/k:Nav  /:Search  m:Method  n:New  e:Edit  d:Delete  y:Yank  Ctrl+R:Refresh  q:Quit"
            }
            Page::Scenarios => "j/k:Nav  Enter:Set state  R:Reset all  Ctrl+R:Refresh  q:Quit",
            Page::Requests => {
                "j/k:Nav  /:Search  m:Method  s:Status  o:Order  Enter:Details  C:Clear  q:Quit"
            }
            Page::Recording => {
                "e:Target URL  r:Record  s:Stop recording  p:Play  P:Stop playback  q:Quit"
            }
            Page::ImportExport => "t:Type  e:File path  i:Import  x:Export  q:Quit",
            Page::Settings => "j/k:Nav  e:Edit  s:Save  q:Quit",
        },
    }
}

/// Render the footer: the status message when there is one, key help otherwise
pub fn render_footer(frame: &mut Frame, area: Rect, state: &AppState) {
    let (text, color) = match &state.flash {
        Some(flash) => (flash.text.clone(), styling::tone_color(flash.tone)),
        None => (footer_help(state).to_string(), Color::Yellow),
    };

    let footer = Paragraph::new(text)
        .style(Style::default().fg(color))
        .block(Block::default().borders(Borders::ALL).title("Commands"));

    frame.render_widget(footer, area);
}

/// Render the search bar with active filter indication
pub fn render_search_bar(
    frame: &mut Frame,
    area: Rect,
    query: &str,
    is_active: bool,
    shown: usize,
    total: usize,
) {
    let border_style = if is_active {
        Style::default().fg(Color::Cyan)
    } else if !query.is_empty() {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let title = if !query.is_empty() {
        format!(" Search [{shown}/{total}] ")
    } else {
        " Search (/) ".to_string()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title);

    let search_text = if is_active {
        format!("{query}_")
    } else {
        query.to_string()
    };

    frame.render_widget(Paragraph::new(search_text).block(block), area);
}

pub fn render_loading_spinner(frame: &mut Frame, area: Rect, title: &str, spinner_index: usize) {
    let loading_text = format!(
        "{} Loading...\n\nPlease wait...",
        SPINNER[spinner_index % SPINNER.len()]
    );

    let loading = Paragraph::new(loading_text)
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL).title(title.to_string()));

    frame.render_widget(loading, area);
}

/// Render error message with retry instructions
pub fn render_error_message(frame: &mut Frame, area: Rect, title: &str, error: &str) {
    let error_msg = format!("❌ {error}\n\nPress [Ctrl+R] to retry");

    let error_widget = Paragraph::new(error_msg)
        .style(Style::default().fg(Color::Red))
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(title.to_string()));

    frame.render_widget(error_widget, area);
}

pub fn render_empty_message(frame: &mut Frame, area: Rect, title: &str, message: &str) {
    let empty = Paragraph::new(message.to_string())
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::ALL).title(title.to_string()));

    frame.render_widget(empty, area);
}
