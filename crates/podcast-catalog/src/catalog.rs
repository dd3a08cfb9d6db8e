//! Catalog store — the immutable set of podcasts, genres and season groups.
//!
//! Every query is infallible. A reference that does not resolve (unknown
//! genre id, podcast without a season group, unknown podcast id) yields an
//! empty result or `None`; callers render whatever did resolve.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::model::{CatalogFile, Genre, GenreId, Podcast, PodcastId, Season, SeasonGroup};

/// Sample catalog compiled into the binary.
const BUNDLED_CATALOG: &str = include_str!("../data/catalog.json");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    podcasts: Vec<Podcast>,
    genres: Vec<Genre>,
    podcast_index: HashMap<PodcastId, usize>,
    genre_index: HashMap<GenreId, usize>,
    seasons: HashMap<PodcastId, Vec<Season>>,
    /// Filter choices, deduplicated by id in catalog order. Fixed at load.
    genre_choices: Vec<Genre>,
}

impl Catalog {
    /// Build the lookup tables. The first record wins when ids repeat.
    pub fn new(podcasts: Vec<Podcast>, genres: Vec<Genre>, seasons: Vec<SeasonGroup>) -> Self {
        let mut podcast_index = HashMap::with_capacity(podcasts.len());
        for (i, p) in podcasts.iter().enumerate() {
            if podcast_index.contains_key(&p.id) {
                warn!("duplicate podcast id {} ignored for lookups", p.id);
                continue;
            }
            podcast_index.insert(p.id.clone(), i);
        }

        let mut genre_index = HashMap::with_capacity(genres.len());
        for (i, g) in genres.iter().enumerate() {
            genre_index.entry(g.id).or_insert(i);
        }

        let mut seen = HashSet::new();
        let genre_choices: Vec<Genre> = genres
            .iter()
            .filter(|g| seen.insert(g.id))
            .cloned()
            .collect();

        let mut season_map: HashMap<PodcastId, Vec<Season>> = HashMap::new();
        for group in seasons {
            if season_map.contains_key(&group.id) {
                warn!("duplicate season group for podcast {} ignored", group.id);
                continue;
            }
            season_map.insert(group.id, group.season_details);
        }

        Self {
            podcasts,
            genres,
            podcast_index,
            genre_index,
            seasons: season_map,
            genre_choices,
        }
    }

    pub fn from_file(file: CatalogFile) -> Self {
        Self::new(file.podcasts, file.genres, file.seasons)
    }

    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(json)?;
        Ok(Self::from_file(file))
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json_str(&content)?;
        info!(
            "loaded catalog from {}: {} podcasts, {} genres",
            path.display(),
            catalog.len(),
            catalog.genre_choices.len()
        );
        Ok(catalog)
    }

    /// The sample catalog shipped with the binary.
    pub fn bundled() -> Self {
        match Self::from_json_str(BUNDLED_CATALOG) {
            Ok(c) => c,
            Err(e) => {
                warn!("bundled catalog unreadable: {}", e);
                Self::default()
            }
        }
    }

    pub fn podcasts(&self) -> &[Podcast] {
        &self.podcasts
    }

    pub fn podcast(&self, id: &PodcastId) -> Option<&Podcast> {
        self.podcast_index.get(id).map(|&i| &self.podcasts[i])
    }

    pub fn genre(&self, id: GenreId) -> Option<&Genre> {
        self.genre_index.get(&id).map(|&i| &self.genres[i])
    }

    /// Resolve genre ids to titles, keeping input order.
    ///
    /// Ids with no matching genre are dropped: no error, no placeholder.
    pub fn find_genre_titles(&self, ids: &[GenreId]) -> Vec<&str> {
        ids.iter()
            .filter_map(|&id| match self.genre(id) {
                Some(g) => Some(g.title.as_str()),
                None => {
                    debug!("genre {} not in catalog, omitted", id);
                    None
                }
            })
            .collect()
    }

    /// Seasons documented for a podcast, in source order. Empty when none.
    pub fn find_seasons(&self, id: &PodcastId) -> &[Season] {
        self.seasons.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn genre_choices(&self) -> &[Genre] {
        &self.genre_choices
    }

    pub fn all_genre_ids(&self) -> Vec<GenreId> {
        self.genre_choices.iter().map(|g| g.id).collect()
    }

    pub fn len(&self) -> usize {
        self.podcasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.podcasts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn podcast(id: &str, genres: &[u32]) -> Podcast {
        Podcast {
            id: PodcastId::new(id),
            title: format!("Show {}", id),
            image: String::new(),
            description: String::new(),
            updated: String::new(),
            genres: genres.iter().copied().map(GenreId).collect(),
            seasons: 1,
        }
    }

    fn genre(id: u32, title: &str) -> Genre {
        Genre {
            id: GenreId(id),
            title: title.to_string(),
        }
    }

    fn sample() -> Catalog {
        Catalog::new(
            vec![podcast("a", &[1, 2]), podcast("b", &[2])],
            vec![genre(1, "Comedy"), genre(2, "History"), genre(1, "Dup")],
            vec![SeasonGroup {
                id: PodcastId::new("a"),
                season_details: vec![
                    Season {
                        title: "S1".into(),
                        episodes: 4,
                    },
                    Season {
                        title: "S2".into(),
                        episodes: 9,
                    },
                ],
            }],
        )
    }

    #[test]
    fn unknown_genre_ids_are_dropped() {
        let c = sample();
        assert_eq!(c.find_genre_titles(&[GenreId(1), GenreId(99)]), vec!["Comedy"]);
        assert!(c.find_genre_titles(&[GenreId(42)]).is_empty());
    }

    #[test]
    fn genre_titles_keep_input_order() {
        let c = sample();
        assert_eq!(
            c.find_genre_titles(&[GenreId(2), GenreId(1)]),
            vec!["History", "Comedy"]
        );
    }

    #[test]
    fn missing_season_group_is_empty() {
        let c = sample();
        assert_eq!(c.find_seasons(&PodcastId::new("a")).len(), 2);
        assert!(c.find_seasons(&PodcastId::new("b")).is_empty());
        assert!(c.find_seasons(&PodcastId::new("nope")).is_empty());
    }

    #[test]
    fn genre_choices_are_deduplicated() {
        let c = sample();
        assert_eq!(c.all_genre_ids(), vec![GenreId(1), GenreId(2)]);
        assert_eq!(c.genre_choices()[0].title, "Comedy");
    }

    #[test]
    fn first_duplicate_podcast_wins() {
        let mut second = podcast("a", &[]);
        second.title = "Shadow".into();
        let c = Catalog::new(vec![podcast("a", &[1]), second], vec![], vec![]);
        assert_eq!(c.len(), 2);
        assert_eq!(c.podcast(&PodcastId::new("a")).unwrap().title, "Show a");
    }

    #[test]
    fn bundled_catalog_parses() {
        let c = Catalog::bundled();
        assert!(!c.is_empty());
        assert!(!c.genre_choices().is_empty());
    }
}
