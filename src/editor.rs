//! Text editor used for every editable field
//!
//! One buffer with a byte cursor kept on UTF-8 boundaries. Single-line fields
//! ignore newlines; multi-line fields (bodies, XML, JSON mode, row lists)
//! accept Enter and move between lines with Up/Down.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct TextEditor {
    content: String,
    /// Byte offset into `content`
    cursor: usize,
    multiline: bool,
    dirty: bool,
}

impl Default for TextEditor {
    fn default() -> Self {
        Self::single_line(String::new())
    }
}

impl TextEditor {
    pub fn single_line(content: impl Into<String>) -> Self {
        let content = content.into().replace('\n', " ");
        Self {
            cursor: content.len(),
            content,
            multiline: false,
            dirty: false,
        }
    }

    pub fn multi_line(content: impl Into<String>) -> Self {
        let content = content.into();
        Self {
            cursor: content.len(),
            content,
            multiline: true,
            dirty: false,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn into_content(self) -> String {
        self.content
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_multiline(&self) -> bool {
        self.multiline
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
        self.dirty = true;
    }

    pub fn set_content(&mut self, content: String) {
        self.cursor = content.len();
        self.content = content;
        self.dirty = true;
    }

    pub fn insert_char(&mut self, c: char) {
        if c == '\n' && !self.multiline {
            return;
        }
        let cursor = self.clamp_cursor_to_boundary(self.cursor);
        self.content.insert(cursor, c);
        self.cursor = cursor + c.len_utf8();
        self.dirty = true;
    }

    /// Insert pasted text. Curly quotes become straight quotes so pasted JSON
    /// stays parseable.
    pub fn insert_str_normalized(&mut self, s: &str) {
        let mut normalized = s
            .replace(['\u{201C}', '\u{201D}'], "\"")
            .replace(['\u{2018}', '\u{2019}'], "'");
        if !self.multiline {
            normalized = normalized.replace(['\r', '\n'], " ");
        }

        let cursor = self.clamp_cursor_to_boundary(self.cursor);
        self.content.insert_str(cursor, &normalized);
        self.cursor = cursor + normalized.len();
        self.dirty = true;
    }

    pub fn delete_char_before_cursor(&mut self) -> bool {
        let Some((idx, _)) = self.content[..self.cursor].char_indices().next_back() else {
            return false;
        };
        self.content.remove(idx);
        self.cursor = idx;
        self.dirty = true;
        true
    }

    pub fn delete_char_after_cursor(&mut self) -> bool {
        if self.cursor >= self.content.len() {
            return false;
        }
        let cursor = self.clamp_cursor_to_boundary(self.cursor);
        self.content.remove(cursor);
        self.dirty = true;
        true
    }

    /// Ctrl+W: drop the word before the cursor and any spaces after it
    pub fn delete_word_before_cursor(&mut self) -> bool {
        let before = &self.content[..self.cursor];
        let trimmed = before.trim_end_matches(' ');
        let start = trimmed
            .rfind(|c: char| c == ' ' || c == '\n')
            .map(|i| i + 1)
            .unwrap_or(0);
        if start == self.cursor {
            return false;
        }
        self.content.replace_range(start..self.cursor, "");
        self.cursor = start;
        self.dirty = true;
        true
    }

    pub fn move_cursor_left(&mut self) -> bool {
        match self.content[..self.cursor].char_indices().next_back() {
            Some((idx, _)) => {
                self.cursor = idx;
                true
            }
            None => false,
        }
    }

    pub fn move_cursor_right(&mut self) -> bool {
        match self.content[self.cursor..].chars().next() {
            Some(c) => {
                self.cursor += c.len_utf8();
                true
            }
            None => false,
        }
    }

    fn line_start(&self, pos: usize) -> usize {
        self.content[..pos].rfind('\n').map(|i| i + 1).unwrap_or(0)
    }

    fn line_end(&self, pos: usize) -> usize {
        self.content[pos..]
            .find('\n')
            .map(|i| pos + i)
            .unwrap_or(self.content.len())
    }

    /// Zero-based (line, column in chars) of the cursor
    pub fn cursor_line_col(&self) -> (usize, usize) {
        let before = &self.content[..self.cursor];
        let line = before.matches('\n').count();
        let col = before[self.line_start(self.cursor)..].chars().count();
        (line, col)
    }

    /// Byte offset of `col` chars into the line starting at `start`
    fn offset_in_line(&self, start: usize, col: usize) -> usize {
        let end = self.line_end(start);
        self.content[start..end]
            .char_indices()
            .nth(col)
            .map(|(i, _)| start + i)
            .unwrap_or(end)
    }

    pub fn move_cursor_up(&mut self) -> bool {
        let start = self.line_start(self.cursor);
        if start == 0 {
            return false;
        }
        let (_, col) = self.cursor_line_col();
        let prev_start = self.line_start(start - 1);
        self.cursor = self.offset_in_line(prev_start, col);
        true
    }

    pub fn move_cursor_down(&mut self) -> bool {
        let end = self.line_end(self.cursor);
        if end >= self.content.len() {
            return false;
        }
        let (_, col) = self.cursor_line_col();
        self.cursor = self.offset_in_line(end + 1, col);
        true
    }

    pub fn move_cursor_to_line_start(&mut self) {
        self.cursor = self.line_start(self.cursor);
    }

    pub fn move_cursor_to_line_end(&mut self) {
        self.cursor = self.line_end(self.cursor);
    }

    /// Pretty-print the buffer as JSON. The buffer is untouched when it does
    /// not parse.
    pub fn format_json(&mut self) -> Result<(), String> {
        let json = serde_json::from_str::<Value>(&self.content)
            .map_err(|e| format!("Invalid JSON: {e}"))?;
        self.content = serde_json::to_string_pretty(&json).map_err(|e| e.to_string())?;
        self.cursor = self.content.len();
        self.dirty = true;
        Ok(())
    }

    /// Returns true if the key changed the buffer or the cursor
    pub fn handle_key_event(&mut self, key: KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Backspace => self.delete_char_before_cursor(),
            KeyCode::Delete => self.delete_char_after_cursor(),
            KeyCode::Left => self.move_cursor_left(),
            KeyCode::Right => self.move_cursor_right(),
            KeyCode::Up if self.multiline => self.move_cursor_up(),
            KeyCode::Down if self.multiline => self.move_cursor_down(),
            KeyCode::Home => {
                self.move_cursor_to_line_start();
                true
            }
            KeyCode::End => {
                self.move_cursor_to_line_end();
                true
            }
            KeyCode::Enter if self.multiline => {
                self.insert_char('\n');
                true
            }
            KeyCode::Tab if self.multiline => {
                self.insert_str_normalized("  ");
                true
            }
            KeyCode::Char('a') if ctrl => {
                self.move_cursor_to_line_start();
                true
            }
            KeyCode::Char('e') if ctrl => {
                self.move_cursor_to_line_end();
                true
            }
            KeyCode::Char('w') if ctrl => self.delete_word_before_cursor(),
            KeyCode::Char('l') if ctrl => {
                self.clear();
                true
            }
            KeyCode::Char(c) if !ctrl => {
                self.handle_paste_batch(c);
                true
            }
            _ => false,
        }
    }

    /// Terminal paste arrives as a burst of key events. Drain whatever is
    /// already queued and insert it in one go.
    pub fn handle_paste_batch(&mut self, initial_char: char) -> usize {
        let mut chars = vec![initial_char];

        while let Ok(true) = crossterm::event::poll(std::time::Duration::from_millis(0)) {
            match crossterm::event::read() {
                Ok(Event::Key(next_key)) => match next_key.code {
                    KeyCode::Char(next_c)
                        if !next_key.modifiers.contains(KeyModifiers::CONTROL) =>
                    {
                        chars.push(next_c);
                    }
                    KeyCode::Enter if self.multiline => chars.push('\n'),
                    _ => break,
                },
                _ => break,
            }
        }

        let count = chars.len();
        let batch: String = chars.into_iter().collect();
        self.insert_str_normalized(&batch);
        count
    }

    fn clamp_cursor_to_boundary(&self, cursor: usize) -> usize {
        let mut pos = cursor.min(self.content.len());
        while pos > 0 && !self.content.is_char_boundary(pos) {
            pos -= 1;
        }
        pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_line_drops_newlines() {
        let mut editor = TextEditor::single_line("a\nb");
        assert_eq!(editor.content(), "a b");
        editor.insert_char('\n');
        assert_eq!(editor.content(), "a b");
        editor.insert_str_normalized("c\nd");
        assert_eq!(editor.content(), "a bc d");
    }

    #[test]
    fn test_insert_and_backspace() {
        let mut editor = TextEditor::default();
        editor.insert_char('h');
        editor.insert_char('i');
        assert_eq!(editor.content(), "hi");
        assert!(editor.is_dirty());
        assert!(editor.delete_char_before_cursor());
        assert_eq!(editor.content(), "h");
        assert_eq!(editor.cursor(), 1);
    }

    #[test]
    fn test_backspace_at_start_is_noop() {
        let mut editor = TextEditor::single_line("hello");
        editor.move_cursor_to_line_start();
        assert!(!editor.delete_char_before_cursor());
        assert_eq!(editor.content(), "hello");
    }

    #[test]
    fn test_utf8_handling() {
        let mut editor = TextEditor::default();
        editor.insert_char('é');
        editor.insert_char('😀');
        assert_eq!(editor.cursor(), 6);
        assert!(editor.move_cursor_left());
        assert_eq!(editor.cursor(), 2);
        assert!(editor.delete_char_before_cursor());
        assert_eq!(editor.content(), "😀");
    }

    #[test]
    fn test_vertical_movement_keeps_column() {
        let mut editor = TextEditor::multi_line("abcd\nxy\nlonger");
        assert_eq!(editor.cursor_line_col(), (2, 6));

        assert!(editor.move_cursor_up());
        assert_eq!(editor.cursor_line_col(), (1, 2));
        assert!(editor.move_cursor_up());
        assert_eq!(editor.cursor_line_col(), (0, 2));
        assert!(!editor.move_cursor_up());

        assert!(editor.move_cursor_down());
        assert_eq!(editor.cursor_line_col(), (1, 2));
    }

    #[test]
    fn test_delete_word() {
        let mut editor = TextEditor::single_line("http://host/api  ");
        assert!(editor.delete_word_before_cursor());
        assert_eq!(editor.content(), "");

        let mut editor = TextEditor::single_line("one two");
        assert!(editor.delete_word_before_cursor());
        assert_eq!(editor.content(), "one ");
    }

    #[test]
    fn test_format_json() {
        let mut editor = TextEditor::multi_line(r#"{"name":"test","age":30}"#);
        assert!(editor.format_json().is_ok());
        assert!(editor.content().contains("\n  \"name\""));

        let mut editor = TextEditor::multi_line("{invalid json");
        assert!(editor.format_json().is_err());
        assert_eq!(editor.content(), "{invalid json");
    }

    #[test]
    fn test_smart_quote_normalization() {
        let mut editor = TextEditor::multi_line("");
        editor.insert_str_normalized("{\u{201C}username\u{201D}:\u{201D}test\u{201D}}");
        assert_eq!(editor.content(), r#"{"username":"test"}"#);
        assert!(editor.format_json().is_ok());

        let mut editor = TextEditor::default();
        editor.insert_str_normalized("\u{2018}key\u{2019}");
        assert_eq!(editor.content(), "'key'");
    }
}
