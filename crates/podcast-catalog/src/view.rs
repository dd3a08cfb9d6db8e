//! View state and the derivation of the visible podcast sequence.
//!
//! `visible_podcasts` is a pure function of the catalog and a `ViewState`:
//! genre filter first, then title search, then the sort. Filtering never
//! reorders and both sorts are stable, so podcasts with equal keys keep
//! their catalog order.

use std::cmp::Ordering;

use feruca::Collator;

use crate::catalog::Catalog;
use crate::dates::parse_timestamp;
use crate::model::{GenreId, Podcast};

/// Sort order for the visible sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Catalog order.
    #[default]
    None,
    /// Title, ascending.
    Title,
    /// Last update, newest first.
    Updated,
}

impl SortKey {
    pub fn next(self) -> Self {
        match self {
            Self::None => Self::Title,
            Self::Title => Self::Updated,
            Self::Updated => Self::None,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::None => Self::Updated,
            Self::Title => Self::None,
            Self::Updated => Self::Title,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Title => "title",
            Self::Updated => "updated",
        }
    }

    /// Unknown labels fall back to catalog order.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "title" => Self::Title,
            "updated" => Self::Updated,
            _ => Self::None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub active_genre: Option<GenreId>,
    pub search_term: String,
    pub sort_key: SortKey,
}

impl ViewState {
    /// Apply a genre filter value coming from text input. Empty or
    /// non-numeric input clears the filter.
    pub fn set_genre_input(&mut self, raw: &str) {
        self.active_genre = parse_genre_input(raw);
    }
}

pub fn parse_genre_input(raw: &str) -> Option<GenreId> {
    raw.parse::<GenreId>().ok()
}

pub fn matches_genre(podcast: &Podcast, genre: Option<GenreId>) -> bool {
    genre.map_or(true, |g| podcast.genres.contains(&g))
}

/// `term_lower` must already be lowercased.
pub fn matches_search(podcast: &Podcast, term_lower: &str) -> bool {
    term_lower.is_empty() || podcast.title.to_lowercase().contains(term_lower)
}

/// Locale-aware title order: Unicode Collation Algorithm with the CLDR
/// root tailoring, so "Étude" sorts with "E" and lowercase precedes
/// uppercase on otherwise equal titles.
pub fn compare_titles(collator: &mut Collator, a: &str, b: &str) -> Ordering {
    collator.collate(a, b)
}

/// Newest first; unparseable timestamps go last.
fn compare_updated_desc(a: &Podcast, b: &Podcast) -> Ordering {
    match (parse_timestamp(&a.updated), parse_timestamp(&b.updated)) {
        (Some(ta), Some(tb)) => tb.cmp(&ta),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

pub fn visible_podcasts<'a>(catalog: &'a Catalog, view: &ViewState) -> Vec<&'a Podcast> {
    let term = view.search_term.to_lowercase();
    let mut visible: Vec<&Podcast> = catalog
        .podcasts()
        .iter()
        .filter(|p| matches_genre(p, view.active_genre))
        .filter(|p| matches_search(p, &term))
        .collect();

    match view.sort_key {
        SortKey::None => {}
        SortKey::Title => {
            let mut collator = Collator::default();
            visible.sort_by(|a, b| compare_titles(&mut collator, &a.title, &b.title));
        }
        SortKey::Updated => visible.sort_by(|a, b| compare_updated_desc(a, b)),
    }
    visible
}
