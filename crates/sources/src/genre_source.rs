//! Genre Source - candidate generation from the user's top genres
//!
//! ## Algorithm
//! 1. Take the top `genre_count` genres of the profile (default: 2)
//! 2. Fetch page 1 of the catalog's most popular movies for each genre,
//!    all genres concurrently
//! 3. Concatenate the pages in genre rank order, so the best genre's movies
//!    come first regardless of which response arrived first
//!
//! A genre whose fetch fails contributes nothing. Deduplication and
//! exclusion of already-seen movies are left to the filter pipeline.

use crate::fetch;
use crate::genre_profile::GenreProfile;
use catalog::{GenreId, MovieCatalog, MovieSummary};
use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Candidates gathered for one computation
#[derive(Debug, Clone, Default)]
pub struct CandidateBatch {
    /// Concatenated pages, best genre first, not yet deduplicated
    pub movies: Vec<MovieSummary>,
    /// Genres a fetch was attempted for, in rank order
    pub genres: Vec<GenreId>,
    /// Genres whose fetch failed
    pub failed: Vec<GenreId>,
}

impl CandidateBatch {
    /// True when fetches were attempted and none of them succeeded
    pub fn all_failed(&self) -> bool {
        !self.genres.is_empty() && self.failed.len() == self.genres.len()
    }
}

/// Fetches candidate movies for the best-scoring genres
#[derive(Clone)]
pub struct GenreSource {
    catalog: Arc<dyn MovieCatalog>,

    /// How many top genres to fetch
    genre_count: usize,

    /// Catalog page requested per genre
    page: u32,

    fetch_timeout: Option<Duration>,
}

impl GenreSource {
    pub fn new(catalog: Arc<dyn MovieCatalog>) -> Self {
        Self {
            catalog,
            genre_count: 2,
            page: 1,
            fetch_timeout: None,
        }
    }

    /// Configure how many top genres to fetch (default: 2)
    pub fn with_genre_count(mut self, genre_count: usize) -> Self {
        self.genre_count = genre_count;
        self
    }

    /// Bound each genre fetch (default: unbounded)
    pub fn with_fetch_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    /// Generate candidates for the profile's top genres
    #[instrument(skip(self, profile), fields(catalog = self.catalog.name()))]
    pub async fn get_candidates(&self, profile: &GenreProfile) -> CandidateBatch {
        let genres = profile.top_genres(self.genre_count);
        debug!(?genres, "Fetching candidates for top genres");

        let fetches = genres.iter().map(|&genre_id| async move {
            let page = fetch::bounded(
                "movies_by_genre",
                self.fetch_timeout,
                self.catalog.movies_by_genre(genre_id, self.page),
            )
            .await;
            (genre_id, page)
        });

        let mut batch = CandidateBatch {
            genres: genres.clone(),
            ..CandidateBatch::default()
        };

        for (genre_id, page) in join_all(fetches).await {
            match page {
                Ok(page) => {
                    debug!(genre_id, count = page.results.len(), "Fetched genre page");
                    batch.movies.extend(page.results);
                }
                Err(e) => {
                    warn!(genre_id, error = %e, "Genre fetch failed, no candidates from this genre");
                    batch.failed.push(genre_id);
                }
            }
        }

        debug!(
            "Generated {} genre candidates ({} of {} fetches failed)",
            batch.movies.len(),
            batch.failed.len(),
            batch.genres.len()
        );
        batch
    }
}
