//! AppState — shared read-only data passed to all components during render/event.
//!
//! The App event loop is the only writer. `view` mirrors the browse
//! controller's view state after every change so panels can display it.

use std::sync::Arc;

use podcast_catalog::{Catalog, ViewState};

use crate::widgets::status_bar::InputMode;

pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub view: ViewState,
    /// Number of cards currently rendered.
    pub visible_count: usize,
    pub input_mode: InputMode,
    /// Last status line message (clipboard results, load warnings).
    pub status: Option<String>,
}

impl AppState {
    pub fn new(catalog: Arc<Catalog>, view: ViewState) -> Self {
        Self {
            catalog,
            view,
            visible_count: 0,
            input_mode: InputMode::Normal,
            status: None,
        }
    }

    /// Display name of the active genre filter.
    pub fn genre_label(&self) -> String {
        match self.view.active_genre {
            None => "All".to_string(),
            Some(id) => self
                .catalog
                .genre(id)
                .map(|g| g.title.clone())
                .unwrap_or_else(|| format!("#{}", id)),
        }
    }
}
