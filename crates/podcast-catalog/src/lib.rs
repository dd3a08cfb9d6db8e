pub mod catalog;
pub mod config;
pub mod dates;
pub mod model;
pub mod platform;
pub mod view;

pub use catalog::{Catalog, CatalogError};
pub use model::{Genre, GenreId, Podcast, PodcastId, Season, SeasonGroup};
pub use view::{visible_podcasts, SortKey, ViewState};
