//! SearchInput — tui-input backed text field for the title search.

use ratatui::crossterm::event::{Event, KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tui_input::{backend::crossterm::EventHandler, Input};

use crate::theme::{C_FILTER_BG, C_FILTER_FG, C_MUTED};

#[derive(Debug, Clone, PartialEq)]
pub enum SearchAction {
    Changed(String),
    Confirmed,
    Cancelled,
    None,
}

pub struct SearchInput {
    input: Input,
    active: bool,
    placeholder: String,
}

impl SearchInput {
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            input: Input::default(),
            active: false,
            placeholder: placeholder.into(),
        }
    }

    pub fn activate(&mut self) {
        self.active = true;
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    pub fn clear(&mut self) {
        self.input = Input::default();
    }

    pub fn set_value(&mut self, value: &str) {
        self.input = Input::new(value.to_string());
    }

    pub fn text(&self) -> &str {
        self.input.value()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Esc clears a non-empty field first; a second Esc closes it.
    /// Enter closes the field and keeps the term.
    pub fn handle_key(&mut self, key: KeyEvent) -> SearchAction {
        match key.code {
            KeyCode::Esc => {
                if !self.input.value().is_empty() {
                    self.clear();
                    SearchAction::Changed(String::new())
                } else {
                    self.deactivate();
                    SearchAction::Cancelled
                }
            }
            KeyCode::Enter => {
                self.deactivate();
                SearchAction::Confirmed
            }
            _ => {
                let before = self.input.value().to_string();
                self.input.handle_event(&Event::Key(key));
                if self.input.value() == before {
                    SearchAction::None
                } else {
                    SearchAction::Changed(self.input.value().to_string())
                }
            }
        }
    }

    /// Render the field into a single-row `area`.
    pub fn draw(&self, frame: &mut Frame, area: Rect) {
        let scroll = self
            .input
            .visual_scroll(area.width.saturating_sub(3) as usize);
        let value = self.input.value();
        let display = if value.is_empty() && !self.active {
            Span::styled(format!("/ {}", self.placeholder), Style::default().fg(C_MUTED))
        } else {
            let visible: String = value.chars().skip(scroll).collect();
            Span::styled(format!("/ {}", visible), Style::default().fg(C_FILTER_FG))
        };

        frame.render_widget(
            Paragraph::new(Line::from(display)).style(Style::default().bg(C_FILTER_BG)),
            area,
        );

        if self.active && area.width > 0 {
            let cursor_x = area.x + 2 + (self.input.visual_cursor().saturating_sub(scroll)) as u16;
            frame.set_cursor_position((cursor_x.min(area.x + area.width - 1), area.y));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn typing_reports_each_change() {
        let mut s = SearchInput::new("title");
        s.activate();
        assert_eq!(s.handle_key(key(KeyCode::Char('a'))), SearchAction::Changed("a".into()));
        assert_eq!(s.handle_key(key(KeyCode::Char('l'))), SearchAction::Changed("al".into()));
        assert_eq!(s.handle_key(key(KeyCode::Backspace)), SearchAction::Changed("a".into()));
    }

    #[test]
    fn esc_clears_then_closes() {
        let mut s = SearchInput::new("title");
        s.activate();
        s.set_value("beta");
        assert_eq!(s.handle_key(key(KeyCode::Esc)), SearchAction::Changed(String::new()));
        assert!(s.is_active());
        assert_eq!(s.handle_key(key(KeyCode::Esc)), SearchAction::Cancelled);
        assert!(!s.is_active());
    }

    #[test]
    fn enter_keeps_term() {
        let mut s = SearchInput::new("title");
        s.activate();
        s.set_value("beta");
        assert_eq!(s.handle_key(key(KeyCode::Enter)), SearchAction::Confirmed);
        assert_eq!(s.text(), "beta");
        assert!(!s.is_active());
    }
}
