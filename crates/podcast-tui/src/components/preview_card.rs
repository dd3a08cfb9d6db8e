//! PreviewCard — one podcast summary tile.
//!
//! A plain view object: the controller hands it a `CardData` through
//! `update`, which rebuilds the rendered lines from scratch, and subscribes to
//! it with `on_select`. The card never looks anything up in the catalog.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use podcast_catalog::dates::format_date;
use podcast_catalog::PodcastId;

use crate::signal::SelectionSender;
use crate::theme::{
    C_CARD_BORDER_SELECTED, C_DATE, C_LINK, C_PANEL_BORDER, C_PRIMARY, C_SECONDARY,
    C_SELECTION_BG, C_TAG,
};

pub const UNTITLED: &str = "Untitled Podcast";

/// Everything a card shows, already resolved by the controller.
#[derive(Debug, Clone, PartialEq)]
pub struct CardData {
    pub id: PodcastId,
    pub title: String,
    pub image: String,
    pub genres: Vec<String>,
    pub seasons: u32,
    /// Raw ISO-8601 timestamp; formatted at render time.
    pub updated: String,
}

#[derive(Default)]
pub struct PreviewCard {
    data: Option<CardData>,
    lines: Vec<Line<'static>>,
    subscriber: Option<SelectionSender>,
}

impl PreviewCard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the card's data and re-render it in full.
    pub fn update(&mut self, data: CardData) {
        self.lines = render_lines(&data);
        self.data = Some(data);
    }

    /// Register the selection subscriber, replacing any previous one.
    pub fn on_select(&mut self, sender: SelectionSender) {
        self.subscriber = Some(sender);
    }

    /// Emit one selection signal for this card's podcast.
    /// Returns `false` when there is no data or nobody is listening.
    pub fn activate(&self) -> bool {
        match (&self.data, &self.subscriber) {
            (Some(data), Some(sender)) => sender.emit(data.id.clone()),
            _ => false,
        }
    }

    pub fn podcast_id(&self) -> Option<&PodcastId> {
        self.data.as_ref().map(|d| &d.id)
    }

    pub fn lines(&self) -> &[Line<'static>] {
        &self.lines
    }

    pub fn draw(&self, frame: &mut Frame, area: Rect, selected: bool) {
        let (border, bg) = if selected {
            (
                Style::default().fg(C_CARD_BORDER_SELECTED),
                Style::default().bg(C_SELECTION_BG),
            )
        } else {
            (Style::default().fg(C_PANEL_BORDER), Style::default())
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .style(bg);
        frame.render_widget(Paragraph::new(self.lines.clone()).block(block), area);
    }
}

fn season_summary(seasons: u32) -> String {
    if seasons == 1 {
        "1 season".to_string()
    } else {
        format!("{} seasons", seasons)
    }
}

fn render_lines(data: &CardData) -> Vec<Line<'static>> {
    let title = if data.title.trim().is_empty() {
        UNTITLED.to_string()
    } else {
        data.title.clone()
    };

    let mut badges: Vec<Span<'static>> = Vec::with_capacity(data.genres.len() * 2);
    for (i, genre) in data.genres.iter().enumerate() {
        if i > 0 {
            badges.push(Span::raw(" "));
        }
        badges.push(Span::styled(format!("[{}]", genre), Style::default().fg(C_TAG)));
    }

    vec![
        Line::from(Span::styled(
            title,
            Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(data.image.clone(), Style::default().fg(C_LINK))),
        Line::from(vec![
            Span::styled(season_summary(data.seasons), Style::default().fg(C_SECONDARY)),
            Span::styled(" · Updated ", Style::default().fg(C_SECONDARY)),
            Span::styled(format_date(&data.updated), Style::default().fg(C_DATE)),
        ]),
        Line::from(badges),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::selection_channel;

    fn data(title: &str, updated: &str) -> CardData {
        CardData {
            id: PodcastId::new("p1"),
            title: title.to_string(),
            image: "https://img.example/p1.jpg".to_string(),
            genres: vec!["History".into(), "Comedy".into()],
            seasons: 3,
            updated: updated.to_string(),
        }
    }

    fn text(card: &PreviewCard) -> Vec<String> {
        card.lines()
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn renders_summary_lines() {
        let mut card = PreviewCard::new();
        card.update(data("Old Times", "2023-01-01T00:00:00Z"));
        assert_eq!(
            text(&card),
            vec![
                "Old Times",
                "https://img.example/p1.jpg",
                "3 seasons · Updated Jan 1, 2023",
                "[History] [Comedy]",
            ]
        );
    }

    #[test]
    fn fallbacks_for_missing_fields() {
        let mut card = PreviewCard::new();
        let mut d = data("", "garbage");
        d.image.clear();
        d.genres.clear();
        d.seasons = 1;
        card.update(d);
        assert_eq!(
            text(&card),
            vec![UNTITLED, "", "1 season · Updated Unknown", ""]
        );
    }

    #[test]
    fn rerender_is_idempotent() {
        let mut card = PreviewCard::new();
        card.update(data("Old Times", ""));
        let first = card.lines().to_vec();
        card.update(data("Old Times", ""));
        assert_eq!(card.lines(), first.as_slice());

        card.update(data("New Times", ""));
        assert_eq!(text(&card)[0], "New Times");
    }

    #[test]
    fn activation_emits_exactly_one_signal() {
        let (tx, mut rx) = selection_channel();
        let mut card = PreviewCard::new();
        card.update(data("Old Times", ""));
        card.on_select(tx.clone());
        // re-subscribing and re-rendering must not duplicate the binding
        card.on_select(tx);
        card.update(data("Old Times", ""));

        assert!(card.activate());
        assert_eq!(rx.try_next().unwrap().podcast_id, PodcastId::new("p1"));
        assert!(rx.try_next().is_none());
    }

    #[test]
    fn activation_without_data_or_subscriber_is_silent() {
        let (tx, mut rx) = selection_channel();
        let mut empty = PreviewCard::new();
        empty.on_select(tx);
        assert!(!empty.activate());
        assert!(rx.try_next().is_none());

        let mut unsubscribed = PreviewCard::new();
        unsubscribed.update(data("Old Times", ""));
        assert!(!unsubscribed.activate());
    }
}
