use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Stable identifier of a podcast record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PodcastId(pub String);

impl PodcastId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PodcastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PodcastId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Numeric genre identifier, referenced from `Podcast::genres`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GenreId(pub u32);

impl fmt::Display for GenreId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for GenreId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u32>().map(GenreId)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Podcast {
    pub id: PodcastId,
    #[serde(default)]
    pub title: String,
    /// Cover art URI. Empty when the source has none.
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub description: String,
    /// ISO-8601 timestamp of the last update, kept verbatim from the source.
    #[serde(default)]
    pub updated: String,
    #[serde(default)]
    pub genres: Vec<GenreId>,
    /// Number of seasons advertised by the feed.
    #[serde(default)]
    pub seasons: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: GenreId,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Season {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub episodes: u32,
}

/// All documented seasons of one podcast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonGroup {
    /// Id of the podcast these seasons belong to.
    pub id: PodcastId,
    #[serde(rename = "seasonDetails", default)]
    pub season_details: Vec<Season>,
}

/// On-disk catalog document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub podcasts: Vec<Podcast>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub seasons: Vec<SeasonGroup>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn genre_id_parses_trimmed_numbers_only() {
        assert_eq!(" 7 ".parse::<GenreId>().ok(), Some(GenreId(7)));
        assert!("".parse::<GenreId>().is_err());
        assert!("comedy".parse::<GenreId>().is_err());
        assert!("-1".parse::<GenreId>().is_err());
    }

    #[test]
    fn podcast_optional_fields_default() {
        let p: Podcast = serde_json::from_str(r#"{ "id": "42" }"#).unwrap();
        assert_eq!(p.id, PodcastId::new("42"));
        assert!(p.title.is_empty());
        assert!(p.image.is_empty());
        assert!(p.genres.is_empty());
        assert_eq!(p.seasons, 0);
    }

    #[test]
    fn season_group_reads_season_details_key() {
        let g: SeasonGroup = serde_json::from_str(
            r#"{ "id": "1", "seasonDetails": [{ "title": "Season 1", "episodes": 12 }] }"#,
        )
        .unwrap();
        assert_eq!(g.season_details.len(), 1);
        assert_eq!(g.season_details[0].episodes, 12);
    }
}
