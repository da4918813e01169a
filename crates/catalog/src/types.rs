//! Core domain types shared by every crate in the workspace.
//!
//! Two families live here:
//! - what the user did (`InteractionRecord`), stored in camelCase JSON so
//!   exported files stay compatible with the web app's local storage
//! - what the catalog returns (`MovieSummary`, `MoviePage`, `MovieDetails`),
//!   decoded from TMDB's snake_case payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Type Aliases
// =============================================================================

/// Identifier of a movie in the external catalog
pub type MovieId = u32;

/// Identifier of a genre in the external catalog (e.g. 28 = Action)
pub type GenreId = u32;

// =============================================================================
// Interaction Types
// =============================================================================

/// One movie the user has viewed, favorited, or watch-listed.
///
/// `genre_ids` is `None` for records captured before genre enrichment.
/// `popularity` is only carried so that a record can stand in for a
/// catalog summary when the recommender falls back to the user's own logs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionRecord {
    pub id: MovieId,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub rating: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viewed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre_ids: Option<Vec<GenreId>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub popularity: Option<f64>,
}

impl InteractionRecord {
    /// Create a bare record with no genre information
    pub fn new(id: MovieId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            poster_path: None,
            rating: 0.0,
            release_date: None,
            viewed_at: None,
            genre_ids: None,
            popularity: None,
        }
    }

    /// Attach genre ids (builder pattern)
    pub fn with_genres(mut self, genre_ids: Vec<GenreId>) -> Self {
        self.genre_ids = Some(genre_ids);
        self
    }

    /// Attach a popularity value (builder pattern)
    pub fn with_popularity(mut self, popularity: f64) -> Self {
        self.popularity = Some(popularity);
        self
    }

    /// Genre ids if the record was enriched, `None` otherwise
    pub fn genres(&self) -> Option<&[GenreId]> {
        self.genre_ids.as_deref()
    }

    /// Build a genre-enriched record from a details lookup
    pub fn from_details(details: &MovieDetails) -> Self {
        Self {
            id: details.id,
            title: details.title.clone(),
            poster_path: details.poster_path.clone(),
            rating: details.vote_average,
            release_date: details.release_date.clone(),
            viewed_at: None,
            genre_ids: Some(details.genre_ids()),
            popularity: Some(details.popularity),
        }
    }
}

// =============================================================================
// Catalog Types
// =============================================================================

/// Summary of a movie as returned by list endpoints (discover, search, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieSummary {
    pub id: MovieId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub vote_average: f32,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub popularity: f64,
    #[serde(default)]
    pub genre_ids: Vec<GenreId>,
}

impl MovieSummary {
    /// Minimal summary, mostly useful for fixtures
    pub fn new(id: MovieId, title: impl Into<String>, popularity: f64) -> Self {
        Self {
            id,
            title: title.into(),
            poster_path: None,
            vote_average: 0.0,
            release_date: None,
            popularity,
            genre_ids: Vec::new(),
        }
    }
}

impl From<&InteractionRecord> for MovieSummary {
    fn from(record: &InteractionRecord) -> Self {
        Self {
            id: record.id,
            title: record.title.clone(),
            poster_path: record.poster_path.clone(),
            vote_average: record.rating,
            release_date: record.release_date.clone(),
            popularity: record.popularity.unwrap_or(0.0),
            genre_ids: record.genre_ids.clone().unwrap_or_default(),
        }
    }
}

/// One page of a paginated list endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoviePage {
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default)]
    pub results: Vec<MovieSummary>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u32,
}

fn first_page() -> u32 {
    1
}

impl MoviePage {
    /// A single-page result wrapping `results`
    pub fn single(results: Vec<MovieSummary>) -> Self {
        let total_results = results.len() as u32;
        Self {
            page: 1,
            results,
            total_pages: 1,
            total_results,
        }
    }
}

/// Named genre as it appears in details payloads and the genre list
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Genre {
    pub id: GenreId,
    pub name: String,
}

/// Full details of one movie
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetails {
    pub id: MovieId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: f32,
    #[serde(default)]
    pub popularity: f64,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub genres: Vec<Genre>,
}

impl MovieDetails {
    /// Genre ids in the order the catalog listed them
    pub fn genre_ids(&self) -> Vec<GenreId> {
        self.genres.iter().map(|g| g.id).collect()
    }
}
