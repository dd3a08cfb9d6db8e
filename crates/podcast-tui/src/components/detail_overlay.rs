//! DetailOverlay — centered popup with the full record of one podcast.
//!
//! The controller fills it with `open` and the overlay only toggles its own
//! visibility. There is exactly one instance; opening while already open
//! swaps the content in place.

use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use podcast_catalog::{PodcastId, Season};

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    theme::{
        style_heading, style_label, style_muted, C_ACCENT, C_BACKDROP, C_DATE, C_LINK,
        C_OVERLAY_BG, C_PANEL_BORDER_FOCUSED, C_PRIMARY, C_SECONDARY, C_TAG,
    },
    widgets::popup::centered_rect,
};

const CLOSE_LABEL: &str = "[ close ]";

/// Resolved record shown in the overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailContent {
    pub podcast_id: PodcastId,
    pub title: String,
    pub image: String,
    pub description: String,
    pub genres: Vec<String>,
    pub seasons: Vec<Season>,
    /// Already formatted for display.
    pub updated: String,
}

/// What a pointer press landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayTarget {
    CloseButton,
    Content,
    Backdrop,
}

#[derive(Default)]
pub struct DetailOverlay {
    content: Option<DetailContent>,
    scroll: u16,
    popup: Rect,
    close_button: Rect,
}

impl DetailOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `content`, replacing whatever is currently shown.
    pub fn open(&mut self, content: DetailContent) {
        self.content = Some(content);
        self.scroll = 0;
    }

    pub fn close(&mut self) {
        self.content = None;
        self.scroll = 0;
    }

    pub fn is_open(&self) -> bool {
        self.content.is_some()
    }

    pub fn content(&self) -> Option<&DetailContent> {
        self.content.as_ref()
    }

    /// Classify a point against the last drawn layout. Anything outside the
    /// content panel is backdrop.
    pub fn hit_test(&self, column: u16, row: u16) -> OverlayTarget {
        if hit(self.close_button, column, row) {
            OverlayTarget::CloseButton
        } else if hit(self.popup, column, row) {
            OverlayTarget::Content
        } else {
            OverlayTarget::Backdrop
        }
    }

    /// Apply a pointer press. Returns `true` when the overlay was dismissed.
    pub fn on_click(&mut self, target: OverlayTarget) -> bool {
        if !self.is_open() {
            return false;
        }
        match target {
            OverlayTarget::CloseButton | OverlayTarget::Backdrop => {
                self.close();
                true
            }
            OverlayTarget::Content => false,
        }
    }

    fn body_lines(content: &DetailContent) -> Vec<Line<'static>> {
        let mut lines = vec![
            Line::from(vec![
                Span::styled("Genres: ", style_label()),
                Span::styled(content.genres.join(", "), Style::default().fg(C_TAG)),
            ]),
            Line::from(vec![
                Span::styled("Updated: ", style_label()),
                Span::styled(content.updated.clone(), Style::default().fg(C_DATE)),
            ]),
            Line::from(Span::styled(content.image.clone(), Style::default().fg(C_LINK))),
            Line::from(""),
        ];

        if !content.description.is_empty() {
            lines.push(Line::from(Span::styled(
                content.description.clone(),
                Style::default().fg(C_PRIMARY),
            )));
            lines.push(Line::from(""));
        }

        lines.push(Line::from(Span::styled("Seasons", style_heading())));
        let pad = content
            .seasons
            .iter()
            .map(|s| s.title.width())
            .max()
            .unwrap_or(0);
        for season in &content.seasons {
            let gap = " ".repeat(pad - season.title.width());
            let unit = if season.episodes == 1 { "episode" } else { "episodes" };
            lines.push(Line::from(vec![
                Span::styled(format!("  {}{}", season.title, gap), Style::default().fg(C_PRIMARY)),
                Span::styled(
                    format!(" - {} {}", season.episodes, unit),
                    Style::default().fg(C_SECONDARY),
                ),
            ]));
        }
        if content.seasons.is_empty() {
            lines.push(Line::from(Span::styled("  none listed", style_muted())));
        }
        lines
    }
}

fn hit(r: Rect, column: u16, row: u16) -> bool {
    column >= r.x && column < r.x + r.width && row >= r.y && row < r.y + r.height
}

impl Component for DetailOverlay {
    fn id(&self) -> ComponentId {
        ComponentId::DetailOverlay
    }

    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release || !self.is_open() {
            return vec![];
        }
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Backspace => {
                self.close();
                return vec![Action::CloseDetail];
            }
            KeyCode::Up | KeyCode::Char('k') => self.scroll = self.scroll.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => self.scroll = self.scroll.saturating_add(1),
            KeyCode::PageUp => self.scroll = self.scroll.saturating_sub(10),
            KeyCode::PageDown => self.scroll = self.scroll.saturating_add(10),
            KeyCode::Char('y') => {
                if let Some(c) = &self.content {
                    if !c.image.is_empty() {
                        return vec![Action::CopyToClipboard(c.image.clone())];
                    }
                }
            }
            _ => {}
        }
        // Consume all keys while the overlay is open
        vec![]
    }

    fn handle_mouse(&mut self, event: MouseEvent, _area: Rect, _state: &AppState) -> Vec<Action> {
        if !self.is_open() {
            return vec![];
        }
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let target = self.hit_test(event.column, event.row);
                if self.on_click(target) {
                    return vec![Action::CloseDetail];
                }
            }
            MouseEventKind::ScrollUp => self.scroll = self.scroll.saturating_sub(1),
            MouseEventKind::ScrollDown => self.scroll = self.scroll.saturating_add(1),
            _ => {}
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, _focused: bool, _state: &AppState) {
        let Some(content) = &self.content else {
            return;
        };

        let body = Self::body_lines(content);
        let wanted = body.len() as u16 + 6;
        let popup = centered_rect(70, wanted.min(area.height.saturating_sub(2)), area);

        // Backdrop first so everything outside the panel reads as inactive.
        frame.render_widget(Block::default().style(Style::default().bg(C_BACKDROP)), area);
        frame.render_widget(Clear, popup);

        let title = Line::from(Span::styled(
            format!(" {} ", content.title),
            Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
        ));
        let close = Line::from(Span::styled(
            CLOSE_LABEL,
            Style::default().fg(C_ACCENT).add_modifier(Modifier::BOLD),
        ))
        .right_aligned();
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(C_PANEL_BORDER_FOCUSED))
            .style(Style::default().bg(C_OVERLAY_BG))
            .title(title)
            .title_top(close);
        let inner = block.inner(popup);
        frame.render_widget(block, popup);

        let text_area = Rect {
            x: inner.x + 1,
            width: inner.width.saturating_sub(2),
            y: inner.y + 1,
            height: inner.height.saturating_sub(1),
        };
        frame.render_widget(
            Paragraph::new(body)
                .wrap(Wrap { trim: false })
                .scroll((self.scroll, 0)),
            text_area,
        );

        let close_width = CLOSE_LABEL.width() as u16;
        self.popup = popup;
        self.close_button = Rect {
            x: (popup.x + popup.width).saturating_sub(close_width + 1),
            y: popup.y,
            width: close_width,
            height: 1,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use podcast_catalog::{Catalog, ViewState};
    use ratatui::{backend::TestBackend, Terminal};
    use std::sync::Arc;

    fn content(title: &str) -> DetailContent {
        DetailContent {
            podcast_id: PodcastId::new("p1"),
            title: title.to_string(),
            image: "https://img.example/p1.jpg".into(),
            description: "A long description.".into(),
            genres: vec!["History".into()],
            seasons: vec![
                Season {
                    title: "Season 1".into(),
                    episodes: 10,
                },
                Season {
                    title: "Specials".into(),
                    episodes: 1,
                },
            ],
            updated: "Jan 1, 2023".into(),
        }
    }

    fn drawn(overlay: &mut DetailOverlay) -> String {
        let state = AppState::new(Arc::new(Catalog::default()), ViewState::default());
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                overlay.draw(f, area, true, &state)
            })
            .unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn opening_again_replaces_content() {
        let mut o = DetailOverlay::new();
        o.open(content("First"));
        o.open(content("Second"));
        assert!(o.is_open());
        assert_eq!(o.content().unwrap().title, "Second");
    }

    #[test]
    fn content_click_never_dismisses() {
        let mut o = DetailOverlay::new();
        o.open(content("First"));
        assert!(!o.on_click(OverlayTarget::Content));
        assert!(o.is_open());
    }

    #[test]
    fn backdrop_and_close_button_dismiss() {
        let mut o = DetailOverlay::new();
        o.open(content("First"));
        assert!(o.on_click(OverlayTarget::Backdrop));
        assert!(!o.is_open());

        o.open(content("First"));
        assert!(o.on_click(OverlayTarget::CloseButton));
        assert!(!o.is_open());
        assert!(!o.on_click(OverlayTarget::Backdrop));
    }

    #[test]
    fn hit_test_uses_drawn_layout() {
        let mut o = DetailOverlay::new();
        o.open(content("First"));
        let screen = drawn(&mut o);
        assert!(screen.contains("First"));
        assert!(screen.contains("Season 1 - 10 episodes"));
        assert!(screen.contains("Specials - 1 episode"));

        assert_eq!(o.hit_test(0, 0), OverlayTarget::Backdrop);
        let p = o.popup;
        assert_eq!(o.hit_test(p.x + 2, p.y + 2), OverlayTarget::Content);
        let b = o.close_button;
        assert_eq!(o.hit_test(b.x, b.y), OverlayTarget::CloseButton);
    }

    #[test]
    fn closed_overlay_draws_nothing() {
        let mut o = DetailOverlay::new();
        let screen = drawn(&mut o);
        assert!(screen.trim().is_empty());
    }
}
