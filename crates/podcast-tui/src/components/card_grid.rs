//! CardGrid — the pane that lays out preview cards in rows and columns.
//!
//! The grid only arranges and navigates cards. Which cards exist is decided
//! by the browse controller, which replaces the whole set on every view change.

use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    layout::Rect,
    style::Style,
    text::Span,
    widgets::Paragraph,
    Frame,
};

use podcast_catalog::PodcastId;

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    components::preview_card::PreviewCard,
    theme::{C_MUTED, C_SECONDARY},
    widgets::pane_chrome::{pane_chrome, Badge},
};

pub const CARD_WIDTH: u16 = 38;
pub const CARD_HEIGHT: u16 = 6;

#[derive(Default)]
pub struct CardGrid {
    cards: Vec<PreviewCard>,
    selected: usize,
    /// First visible row of cards.
    scroll_row: usize,
    /// Column count from the last draw; drives up/down navigation.
    columns: usize,
    /// Card index → screen rect, from the last draw.
    tiles: Vec<(usize, Rect)>,
}

impl CardGrid {
    pub fn new() -> Self {
        Self {
            columns: 1,
            ..Default::default()
        }
    }

    /// Replace every card. The cursor stays on the same podcast when it is
    /// still visible, otherwise it returns to the first card.
    pub fn set_cards(&mut self, cards: Vec<PreviewCard>) {
        let previous = self.selected_id().cloned();
        self.cards = cards;
        self.tiles.clear();
        self.selected = previous
            .and_then(|id| self.cards.iter().position(|c| c.podcast_id() == Some(&id)))
            .unwrap_or(0);
        if self.selected == 0 {
            self.scroll_row = 0;
        }
    }

    #[cfg(test)]
    pub fn cards(&self) -> &[PreviewCard] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[cfg(test)]
    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_id(&self) -> Option<&PodcastId> {
        self.cards.get(self.selected).and_then(|c| c.podcast_id())
    }

    #[cfg(test)]
    pub fn select(&mut self, idx: usize) {
        if idx < self.cards.len() {
            self.selected = idx;
        }
    }

    /// Activate the card under the cursor. Returns whether a signal went out.
    pub fn activate_selected(&self) -> bool {
        self.cards
            .get(self.selected)
            .map_or(false, |card| card.activate())
    }

    /// Index of the card drawn at (`column`, `row`), if any.
    pub fn card_at(&self, column: u16, row: u16) -> Option<usize> {
        self.tiles
            .iter()
            .find(|(_, r)| hit(*r, column, row))
            .map(|(i, _)| *i)
    }

    fn move_by(&mut self, delta: isize) {
        if self.is_empty() {
            return;
        }
        let last = self.cards.len() as isize - 1;
        self.selected = (self.selected as isize + delta).clamp(0, last) as usize;
    }

    fn ensure_visible(&mut self, rows_in_view: usize) {
        let row = self.selected / self.columns.max(1);
        if row < self.scroll_row {
            self.scroll_row = row;
        } else if rows_in_view > 0 && row >= self.scroll_row + rows_in_view {
            self.scroll_row = row + 1 - rows_in_view;
        }
    }
}

fn hit(r: Rect, column: u16, row: u16) -> bool {
    column >= r.x && column < r.x + r.width && row >= r.y && row < r.y + r.height
}

impl Component for CardGrid {
    fn id(&self) -> ComponentId {
        ComponentId::CardGrid
    }

    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        let cols = self.columns.max(1) as isize;
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => self.move_by(-1),
            KeyCode::Right | KeyCode::Char('l') => self.move_by(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_by(-cols),
            KeyCode::Down | KeyCode::Char('j') => self.move_by(cols),
            KeyCode::PageUp => self.move_by(-cols * 3),
            KeyCode::PageDown => self.move_by(cols * 3),
            KeyCode::Home => self.selected = 0,
            KeyCode::End => self.selected = self.cards.len().saturating_sub(1),
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.activate_selected();
            }
            _ => {}
        }
        vec![]
    }

    fn handle_mouse(&mut self, event: MouseEvent, _area: Rect, _state: &AppState) -> Vec<Action> {
        match event.kind {
            MouseEventKind::ScrollUp => self.move_by(-(self.columns.max(1) as isize)),
            MouseEventKind::ScrollDown => self.move_by(self.columns.max(1) as isize),
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(idx) = self.card_at(event.column, event.row) {
                    self.selected = idx;
                    self.activate_selected();
                }
                return vec![Action::FocusPane(ComponentId::CardGrid)];
            }
            _ => {}
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let badge = Badge {
            text: format!("{}/{}", self.cards.len(), state.catalog.len()),
            color: C_SECONDARY,
        };
        let block = pane_chrome("podcasts", focused, Some(badge));
        let inner = block.inner(area);
        frame.render_widget(block, area);
        self.tiles.clear();

        if self.is_empty() {
            let msg = if state.catalog.is_empty() {
                "  catalog is empty"
            } else {
                "  no podcasts match the current filters"
            };
            frame.render_widget(
                Paragraph::new(Span::styled(msg, Style::default().fg(C_MUTED))),
                inner,
            );
            return;
        }

        self.columns = ((inner.width / CARD_WIDTH) as usize).max(1);
        let rows_in_view = ((inner.height / CARD_HEIGHT) as usize).max(1);
        self.ensure_visible(rows_in_view);

        let card_width = if self.columns == 1 {
            inner.width
        } else {
            inner.width / self.columns as u16
        };
        let first = self.scroll_row * self.columns;
        let last = (first + rows_in_view * self.columns).min(self.cards.len());

        for idx in first..last {
            let pos = idx - first;
            let col = (pos % self.columns) as u16;
            let row = (pos / self.columns) as u16;
            let y = inner.y + row * CARD_HEIGHT;
            let height = CARD_HEIGHT.min(inner.y + inner.height - y);
            if height == 0 {
                break;
            }
            let tile = Rect {
                x: inner.x + col * card_width,
                y,
                width: card_width,
                height,
            };
            self.cards[idx].draw(frame, tile, focused && idx == self.selected);
            self.tiles.push((idx, tile));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::preview_card::CardData;
    use crate::signal::selection_channel;
    use podcast_catalog::{Catalog, ViewState};
    use ratatui::{backend::TestBackend, Terminal};
    use std::sync::Arc;

    fn card(id: &str, tx: &crate::signal::SelectionSender) -> PreviewCard {
        let mut c = PreviewCard::new();
        c.update(CardData {
            id: PodcastId::new(id),
            title: format!("Show {}", id),
            image: String::new(),
            genres: vec![],
            seasons: 1,
            updated: String::new(),
        });
        c.on_select(tx.clone());
        c
    }

    #[test]
    fn cursor_follows_podcast_across_rebuilds() {
        let (tx, _rx) = selection_channel();
        let mut grid = CardGrid::new();
        grid.set_cards(vec![card("a", &tx), card("b", &tx), card("c", &tx)]);
        grid.select(2);
        grid.set_cards(vec![card("c", &tx), card("a", &tx)]);
        assert_eq!(grid.selected_id(), Some(&PodcastId::new("c")));
        grid.set_cards(vec![card("b", &tx)]);
        assert_eq!(grid.selected(), 0);
    }

    #[test]
    fn click_activates_card_under_pointer() {
        let (tx, mut rx) = selection_channel();
        let mut grid = CardGrid::new();
        grid.set_cards(vec![card("a", &tx), card("b", &tx), card("c", &tx)]);
        let state = AppState::new(Arc::new(Catalog::default()), ViewState::default());

        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                grid.draw(f, area, true, &state)
            })
            .unwrap();

        // 78 inner columns fit two cards; "b" sits top-right
        let target = grid.card_at(45, 2);
        assert_eq!(target, Some(1));

        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 45,
            row: 2,
            modifiers: ratatui::crossterm::event::KeyModifiers::NONE,
        };
        grid.handle_mouse(click, Rect::default(), &state);
        assert_eq!(rx.try_next().unwrap().podcast_id, PodcastId::new("b"));
        assert!(rx.try_next().is_none());
    }
}
