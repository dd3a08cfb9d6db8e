//! ControlsBar — genre picker, sort picker and search field above the grid.
//!
//! The bar never touches the view state itself. Every change goes out as an
//! Action and comes back through `AppState::view` on the next draw.

use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    theme::{C_ACCENT, C_MUTED, C_PRIMARY, C_SELECTION_BG},
    widgets::{
        pane_chrome::pane_chrome,
        search_input::{SearchAction, SearchInput},
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    Genre,
    Sort,
    Search,
}

impl Segment {
    const ALL: [Segment; 3] = [Segment::Genre, Segment::Sort, Segment::Search];

    fn index(self) -> usize {
        match self {
            Segment::Genre => 0,
            Segment::Sort => 1,
            Segment::Search => 2,
        }
    }

    /// Action for a forward activation (Enter / left click).
    fn forward(self) -> Action {
        match self {
            Segment::Genre => Action::CycleGenre,
            Segment::Sort => Action::CycleSort,
            Segment::Search => Action::OpenSearch,
        }
    }

    fn backward(self) -> Action {
        match self {
            Segment::Genre => Action::CycleGenreReverse,
            Segment::Sort => Action::CycleSortReverse,
            Segment::Search => Action::OpenSearch,
        }
    }
}

pub struct ControlsBar {
    search: SearchInput,
    cursor: Segment,
    /// Segment rects from the last draw, for mouse hits.
    segments: [Rect; 3],
}

impl ControlsBar {
    pub fn new(initial_search: &str) -> Self {
        let mut search = SearchInput::new("search titles");
        search.set_value(initial_search);
        Self {
            search,
            cursor: Segment::Genre,
            segments: [Rect::default(); 3],
        }
    }

    pub fn search_active(&self) -> bool {
        self.search.is_active()
    }

    #[cfg(test)]
    pub fn search_text(&self) -> &str {
        self.search.text()
    }

    #[cfg(test)]
    pub fn cursor(&self) -> Segment {
        self.cursor
    }

    fn segment_at(&self, column: u16, row: u16) -> Option<Segment> {
        Segment::ALL.into_iter().find(|s| {
            let r = self.segments[s.index()];
            column >= r.x && column < r.x + r.width && row >= r.y && row < r.y + r.height
        })
    }

    fn picker<'a>(&self, seg: Segment, label: &'a str, value: String, focused: bool) -> Line<'a> {
        let marked = focused && self.cursor == seg;
        let value_style = if marked {
            Style::default()
                .fg(C_ACCENT)
                .bg(C_SELECTION_BG)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(C_PRIMARY)
        };
        Line::from(vec![
            Span::styled(format!("{}: ", label), Style::default().fg(C_MUTED)),
            Span::styled(format!("‹ {} ›", value), value_style),
        ])
    }
}

impl Component for ControlsBar {
    fn id(&self) -> ComponentId {
        ComponentId::Controls
    }

    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        if self.search.is_active() {
            return match self.search.handle_key(key) {
                SearchAction::Changed(term) => vec![Action::SearchChanged(term)],
                SearchAction::Confirmed | SearchAction::Cancelled => vec![Action::CloseSearch],
                SearchAction::None => vec![],
            };
        }
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => {
                self.cursor = Segment::ALL[self.cursor.index().saturating_sub(1)];
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.cursor = Segment::ALL[(self.cursor.index() + 1).min(2)];
            }
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Down | KeyCode::Char('j') => {
                return vec![self.cursor.forward()];
            }
            KeyCode::Up | KeyCode::Char('k') => return vec![self.cursor.backward()],
            _ => {}
        }
        vec![]
    }

    fn handle_mouse(&mut self, event: MouseEvent, _area: Rect, _state: &AppState) -> Vec<Action> {
        let Some(seg) = self.segment_at(event.column, event.row) else {
            return vec![];
        };
        self.cursor = seg;
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) | MouseEventKind::ScrollDown => {
                vec![seg.forward()]
            }
            MouseEventKind::Down(MouseButton::Right) | MouseEventKind::ScrollUp => {
                vec![seg.backward()]
            }
            _ => vec![],
        }
    }

    fn on_action(&mut self, action: &Action, _state: &AppState) -> Vec<Action> {
        match action {
            Action::OpenSearch => {
                self.cursor = Segment::Search;
                self.search.activate();
            }
            Action::CloseSearch => self.search.deactivate(),
            Action::ClearFilters => {
                self.search.clear();
                self.search.deactivate();
            }
            _ => {}
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let block = pane_chrome("browse", focused, None);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(28),
                Constraint::Length(24),
                Constraint::Min(10),
            ])
            .split(inner);

        let genre = self.picker(Segment::Genre, "genre", state.genre_label(), focused);
        let sort = self.picker(
            Segment::Sort,
            "sort",
            state.view.sort_key.label().to_string(),
            focused,
        );
        frame.render_widget(Paragraph::new(genre), cols[0]);
        frame.render_widget(Paragraph::new(sort), cols[1]);
        self.search.draw(frame, cols[2]);

        self.segments = [cols[0], cols[1], cols[2]];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use podcast_catalog::{Catalog, ViewState};
    use ratatui::crossterm::event::KeyModifiers;
    use std::sync::Arc;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn state() -> AppState {
        AppState::new(Arc::new(Catalog::default()), ViewState::default())
    }

    #[test]
    fn segments_map_to_view_actions() {
        let s = state();
        let mut bar = ControlsBar::new("");
        assert_eq!(bar.handle_key(key(KeyCode::Enter), &s), vec![Action::CycleGenre]);
        assert_eq!(bar.handle_key(key(KeyCode::Up), &s), vec![Action::CycleGenreReverse]);
        bar.handle_key(key(KeyCode::Right), &s);
        assert_eq!(bar.cursor(), Segment::Sort);
        assert_eq!(bar.handle_key(key(KeyCode::Enter), &s), vec![Action::CycleSort]);
        bar.handle_key(key(KeyCode::Right), &s);
        bar.handle_key(key(KeyCode::Right), &s);
        assert_eq!(bar.handle_key(key(KeyCode::Enter), &s), vec![Action::OpenSearch]);
    }

    #[test]
    fn search_round_trip() {
        let s = state();
        let mut bar = ControlsBar::new("");
        bar.on_action(&Action::OpenSearch, &s);
        assert!(bar.search_active());
        assert_eq!(
            bar.handle_key(key(KeyCode::Char('b')), &s),
            vec![Action::SearchChanged("b".into())]
        );
        assert_eq!(bar.handle_key(key(KeyCode::Enter), &s), vec![Action::CloseSearch]);
        assert!(!bar.search_active());
        assert_eq!(bar.search_text(), "b");

        bar.on_action(&Action::ClearFilters, &s);
        assert_eq!(bar.search_text(), "");
    }

    #[test]
    fn initial_search_is_shown() {
        let bar = ControlsBar::new("history");
        assert_eq!(bar.search_text(), "history");
        assert!(!bar.search_active());
    }
}
