//! BrowseController — owns the view state and drives cards and the overlay.
//!
//! Every view-state change derives the visible list again and rebuilds the
//! whole card set. Cards report activation over the selection channel, whose
//! only receiver lives here; `pump_signals` drains it after each event.

use std::sync::Arc;

use tracing::debug;

use podcast_catalog::dates::format_date;
use podcast_catalog::{visible_podcasts, Catalog, GenreId, PodcastId, SortKey, ViewState};

use crate::components::card_grid::CardGrid;
use crate::components::detail_overlay::{DetailContent, DetailOverlay};
use crate::components::preview_card::{CardData, PreviewCard};
use crate::signal::{selection_channel, SelectionReceiver, SelectionSender};

pub struct BrowseController {
    catalog: Arc<Catalog>,
    view: ViewState,
    grid: CardGrid,
    overlay: DetailOverlay,
    selection_tx: SelectionSender,
    selection_rx: SelectionReceiver,
}

impl BrowseController {
    /// Takes its collaborators ready-made and renders the initial view.
    pub fn new(
        catalog: Arc<Catalog>,
        initial_view: ViewState,
        grid: CardGrid,
        overlay: DetailOverlay,
    ) -> Self {
        let (selection_tx, selection_rx) = selection_channel();
        let mut controller = Self {
            catalog,
            view: initial_view,
            grid,
            overlay,
            selection_tx,
            selection_rx,
        };
        controller.render();
        controller
    }

    pub fn view_state(&self) -> &ViewState {
        &self.view
    }

    pub fn grid(&self) -> &CardGrid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut CardGrid {
        &mut self.grid
    }

    pub fn overlay(&self) -> &DetailOverlay {
        &self.overlay
    }

    pub fn overlay_mut(&mut self) -> &mut DetailOverlay {
        &mut self.overlay
    }

    #[cfg(test)]
    pub fn visible_ids(&self) -> Vec<PodcastId> {
        self.grid
            .cards()
            .iter()
            .filter_map(|c| c.podcast_id().cloned())
            .collect()
    }

    // ── View state ───────────────────────────────────────────────────────────

    pub fn set_genre(&mut self, genre: Option<GenreId>) {
        debug!("genre filter -> {:?}", genre);
        self.view.active_genre = genre;
        self.render();
    }

    /// Genre from free text; empty or non-numeric input clears the filter.
    pub fn set_genre_input(&mut self, raw: &str) {
        self.view.set_genre_input(raw);
        debug!("genre input {:?} -> {:?}", raw, self.view.active_genre);
        self.render();
    }

    /// Step through "All" followed by every genre choice, wrapping around.
    pub fn cycle_genre(&mut self, forward: bool) {
        let mut ring: Vec<Option<GenreId>> = vec![None];
        ring.extend(self.catalog.all_genre_ids().into_iter().map(Some));
        let pos = ring
            .iter()
            .position(|g| *g == self.view.active_genre)
            .unwrap_or(0);
        let next = if forward {
            (pos + 1) % ring.len()
        } else {
            (pos + ring.len() - 1) % ring.len()
        };
        self.set_genre(ring[next]);
    }

    pub fn set_search(&mut self, term: &str) {
        debug!("search term -> {:?}", term);
        self.view.search_term = term.to_string();
        self.render();
    }

    pub fn set_sort(&mut self, key: SortKey) {
        debug!("sort -> {}", key.label());
        self.view.sort_key = key;
        self.render();
    }

    pub fn cycle_sort(&mut self, forward: bool) {
        let key = if forward {
            self.view.sort_key.next()
        } else {
            self.view.sort_key.prev()
        };
        self.set_sort(key);
    }

    pub fn clear_filters(&mut self) {
        debug!("filters cleared");
        self.view = ViewState::default();
        self.render();
    }

    /// Discard every card and build one per visible podcast, in order.
    fn render(&mut self) {
        let cards: Vec<PreviewCard> = visible_podcasts(&self.catalog, &self.view)
            .into_iter()
            .map(|p| {
                let mut card = PreviewCard::new();
                card.update(CardData {
                    id: p.id.clone(),
                    title: p.title.clone(),
                    image: p.image.clone(),
                    genres: self
                        .catalog
                        .find_genre_titles(&p.genres)
                        .into_iter()
                        .map(str::to_string)
                        .collect(),
                    seasons: p.seasons,
                    updated: p.updated.clone(),
                });
                card.on_select(self.selection_tx.clone());
                card
            })
            .collect();
        debug!("rendered {} of {} podcasts", cards.len(), self.catalog.len());
        self.grid.set_cards(cards);
    }

    // ── Selection ────────────────────────────────────────────────────────────

    /// Handle every queued selection signal. Returns how many were handled.
    pub fn pump_signals(&mut self) -> usize {
        let mut handled = 0;
        while let Some(signal) = self.selection_rx.try_next() {
            self.handle_selection(&signal.podcast_id);
            handled += 1;
        }
        handled
    }

    /// Open the overlay for `id`. Unknown ids leave everything untouched.
    pub fn handle_selection(&mut self, id: &PodcastId) {
        let Some(podcast) = self.catalog.podcast(id) else {
            debug!("selection for unknown podcast {} ignored", id);
            return;
        };
        let content = DetailContent {
            podcast_id: podcast.id.clone(),
            title: podcast.title.clone(),
            image: podcast.image.clone(),
            description: podcast.description.clone(),
            genres: self
                .catalog
                .find_genre_titles(&podcast.genres)
                .into_iter()
                .map(str::to_string)
                .collect(),
            seasons: self.catalog.find_seasons(id).to_vec(),
            updated: format_date(&podcast.updated),
        };
        debug!("opening details for {}", id);
        self.overlay.open(content);
    }

    pub fn close_overlay(&mut self) {
        self.overlay.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::detail_overlay::OverlayTarget;
    use podcast_catalog::{Genre, Podcast, Season, SeasonGroup};

    fn podcast(id: &str, title: &str, genres: &[u32], updated: &str) -> Podcast {
        Podcast {
            id: PodcastId::new(id),
            title: title.to_string(),
            image: format!("https://img.example/{}.jpg", id),
            description: format!("About {}", title),
            updated: updated.to_string(),
            genres: genres.iter().map(|&g| GenreId(g)).collect(),
            seasons: 2,
        }
    }

    fn catalog() -> Arc<Catalog> {
        Arc::new(Catalog::new(
            vec![
                podcast("1", "Alpha", &[1, 99], "2023-01-01T00:00:00Z"),
                podcast("2", "Beta", &[2], "2024-01-01T00:00:00Z"),
            ],
            vec![
                Genre {
                    id: GenreId(1),
                    title: "History".into(),
                },
                Genre {
                    id: GenreId(2),
                    title: "Comedy".into(),
                },
            ],
            vec![SeasonGroup {
                id: PodcastId::new("1"),
                season_details: vec![
                    Season {
                        title: "Season 1".into(),
                        episodes: 10,
                    },
                    Season {
                        title: "Season 2".into(),
                        episodes: 8,
                    },
                ],
            }],
        ))
    }

    fn controller() -> BrowseController {
        BrowseController::new(
            catalog(),
            ViewState::default(),
            CardGrid::new(),
            DetailOverlay::new(),
        )
    }

    fn ids(c: &BrowseController) -> Vec<String> {
        c.visible_ids().into_iter().map(|id| id.0).collect()
    }

    #[test]
    fn scenario_through_the_controller() {
        let mut c = controller();
        assert_eq!(ids(&c), vec!["1", "2"]);

        c.set_sort(SortKey::Title);
        assert_eq!(ids(&c), vec!["1", "2"]);
        c.set_sort(SortKey::Updated);
        assert_eq!(ids(&c), vec!["2", "1"]);
        c.set_search("alp");
        assert_eq!(ids(&c), vec!["1"]);
        c.clear_filters();
        assert_eq!(ids(&c), vec!["1", "2"]);
    }

    #[test]
    fn genre_cycle_wraps_through_all() {
        let mut c = controller();
        c.cycle_genre(true);
        assert_eq!(c.view_state().active_genre, Some(GenreId(1)));
        assert_eq!(ids(&c), vec!["1"]);
        c.cycle_genre(true);
        assert_eq!(ids(&c), vec!["2"]);
        c.cycle_genre(true);
        assert_eq!(c.view_state().active_genre, None);
        c.cycle_genre(false);
        assert_eq!(c.view_state().active_genre, Some(GenreId(2)));
    }

    #[test]
    fn genre_input_parsing() {
        let mut c = controller();
        c.set_genre_input("2");
        assert_eq!(ids(&c), vec!["2"]);
        c.set_genre_input("not a number");
        assert_eq!(c.view_state().active_genre, None);
        assert_eq!(ids(&c), vec!["1", "2"]);
        c.set_genre_input("");
        assert_eq!(ids(&c), vec!["1", "2"]);
        // a well-formed id outside the catalog still filters
        c.set_genre_input("42");
        assert!(c.visible_ids().is_empty());
    }

    #[test]
    fn selection_round_trip_opens_overlay() {
        let mut c = controller();
        assert!(c.grid().activate_selected());
        assert_eq!(c.pump_signals(), 1);

        let content = c.overlay().content().unwrap();
        assert_eq!(content.title, "Alpha");
        assert_eq!(content.description, "About Alpha");
        assert_eq!(content.genres, vec!["History".to_string()]);
        assert_eq!(content.updated, "Jan 1, 2023");
        let seasons: Vec<&str> = content.seasons.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(seasons, vec!["Season 1", "Season 2"]);
    }

    #[test]
    fn unknown_selection_signal_is_ignored() {
        let mut c = controller();
        let tx = c.selection_tx.clone();

        assert!(tx.emit(PodcastId::new("nope")));
        assert_eq!(c.pump_signals(), 1);
        assert!(!c.overlay().is_open());

        // an open overlay keeps its content
        assert!(tx.emit(PodcastId::new("2")));
        assert!(tx.emit(PodcastId::new("nope")));
        assert_eq!(c.pump_signals(), 2);
        let content = c.overlay().content().unwrap();
        assert_eq!(content.podcast_id, PodcastId::new("2"));
        assert_eq!(content.title, "Beta");
    }

    #[test]
    fn second_selection_replaces_overlay() {
        let mut c = controller();
        c.handle_selection(&PodcastId::new("1"));
        c.handle_selection(&PodcastId::new("2"));
        let content = c.overlay().content().unwrap();
        assert_eq!(content.title, "Beta");
        assert!(content.seasons.is_empty());

        assert!(!c.overlay_mut().on_click(OverlayTarget::Content));
        assert!(c.overlay().is_open());
        c.close_overlay();
        assert!(!c.overlay().is_open());
    }

    #[test]
    fn rebuilt_cards_still_signal() {
        let mut c = controller();
        c.set_sort(SortKey::Updated);
        c.set_sort(SortKey::Updated);
        assert!(c.grid().activate_selected());
        // one card activation, one signal, regardless of rebuild count
        assert_eq!(c.pump_signals(), 1);
        // the cursor followed "Alpha" to its new position
        assert_eq!(c.overlay().content().unwrap().title, "Alpha");
    }
}
