//! Status bar — bottom line with mode, visible count, status message and key hints.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::theme::{
    C_MODE_DETAIL, C_MODE_NORMAL, C_MODE_SEARCH, C_MUTED, C_PRIMARY, C_SECONDARY,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputMode {
    Normal,
    Search,
    Detail,
}

impl InputMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Normal => "BROWSE",
            Self::Search => "SEARCH",
            Self::Detail => "DETAIL",
        }
    }

    pub fn color(self) -> ratatui::style::Color {
        match self {
            Self::Normal => C_MODE_NORMAL,
            Self::Search => C_MODE_SEARCH,
            Self::Detail => C_MODE_DETAIL,
        }
    }

    fn key_hints(self) -> &'static str {
        match self {
            Self::Normal => {
                "←↑↓→/hjkl move  Enter open  g/G genre  s/S sort  / search  x clear  Tab focus  ? help  q quit"
            }
            Self::Search => "type to search  Enter keep  Esc clear+close",
            Self::Detail => "↑↓ scroll  y copy image  Esc/q close",
        }
    }
}

/// One-row status line. The visible/total count is right-aligned.
pub fn draw_status_bar(
    frame: &mut Frame,
    area: Rect,
    mode: InputMode,
    visible: usize,
    total: usize,
    status: Option<&str>,
) {
    let mut spans = vec![
        Span::styled(
            format!(" {} ", mode.label()),
            Style::default().fg(mode.color()).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
    ];
    if let Some(msg) = status {
        spans.push(Span::styled(msg.to_string(), Style::default().fg(C_PRIMARY)));
        spans.push(Span::raw("  "));
    }
    spans.push(Span::styled(mode.key_hints(), Style::default().fg(C_MUTED)));

    let count = format!("{} of {} podcasts ", visible, total);
    let used: usize = spans.iter().map(|s| s.content.width()).sum();
    let pad = (area.width as usize).saturating_sub(used + count.width());
    if pad > 0 {
        spans.push(Span::raw(" ".repeat(pad)));
        spans.push(Span::styled(count, Style::default().fg(C_SECONDARY)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
