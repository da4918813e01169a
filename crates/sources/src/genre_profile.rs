//! Genre preference scoring from implicit interaction signals.
//!
//! Every genre tagged on an interaction accumulates weight into one shared
//! map:
//! - recently viewed: `viewed * (1 + (N - i) / N)` for the record at index
//!   `i` of a log of length `N`, so recent views count up to twice as much
//! - favorites: `favorite` per genre; favorites without genre ids are
//!   backfilled from the catalog's details endpoint
//! - watchlist: `watchlist` per genre, no backfill
//!
//! The profile is rebuilt from scratch on every computation.

use crate::fetch;
use crate::types::InteractionContext;
use catalog::{GenreId, InteractionRecord, MovieCatalog, MovieId};
use futures::stream::{self, StreamExt};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};

/// Per-signal genre weights
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalWeights {
    /// Base weight of a view, before the recency multiplier
    pub viewed: f64,
    pub favorite: f64,
    pub watchlist: f64,
}

impl Default for SignalWeights {
    fn default() -> Self {
        Self {
            viewed: 1.0,
            favorite: 2.0,
            watchlist: 1.5,
        }
    }
}

/// Accumulated weight per genre
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenreProfile {
    scores: HashMap<GenreId, f64>,
}

impl GenreProfile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `weight` to every genre in `genres`
    pub fn add(&mut self, genres: &[GenreId], weight: f64) {
        for genre in genres {
            *self.scores.entry(*genre).or_insert(0.0) += weight;
        }
    }

    pub fn score(&self, genre: GenreId) -> f64 {
        self.scores.get(&genre).copied().unwrap_or(0.0)
    }

    /// True when no genre has a positive score
    pub fn is_empty(&self) -> bool {
        !self.scores.values().any(|&score| score > 0.0)
    }

    /// Genres with a positive score, best first.
    ///
    /// Ties go to the lower genre id.
    pub fn ranked(&self) -> Vec<(GenreId, f64)> {
        let mut ranked: Vec<(GenreId, f64)> = self
            .scores
            .iter()
            .filter(|(_, score)| **score > 0.0)
            .map(|(genre, score)| (*genre, *score))
            .collect();

        ranked.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });
        ranked
    }

    /// The `n` best genres
    pub fn top_genres(&self, n: usize) -> Vec<GenreId> {
        self.ranked().into_iter().take(n).map(|(genre, _)| genre).collect()
    }

    /// Score every record that already carries genre ids.
    ///
    /// Returns the profile and the ids of favorites that need a details
    /// lookup before they can contribute.
    pub fn from_known_genres(
        context: &InteractionContext<'_>,
        weights: &SignalWeights,
    ) -> (Self, Vec<MovieId>) {
        let mut profile = Self::new();

        profile.add_recently_viewed(context.recently_viewed, weights.viewed);

        let mut missing = Vec::new();
        for favorite in context.favorites {
            match favorite.genres() {
                Some(genres) => profile.add(genres, weights.favorite),
                None => missing.push(favorite.id),
            }
        }

        for movie in context.watchlist {
            if let Some(genres) = movie.genres() {
                profile.add(genres, weights.watchlist);
            }
        }

        (profile, missing)
    }

    fn add_recently_viewed(&mut self, records: &[InteractionRecord], base_weight: f64) {
        let n = records.len() as f64;
        for (index, movie) in records.iter().enumerate() {
            if let Some(genres) = movie.genres() {
                let recency = 1.0 + (n - index as f64) / n;
                self.add(genres, base_weight * recency);
            }
        }
    }
}

/// Build the full genre profile, backfilling favorites that lack genre ids.
///
/// At most `max_concurrent_lookups` details lookups are in flight at once.
/// A failed lookup is logged and that favorite contributes nothing; it
/// never aborts the build.
pub async fn build_genre_profile(
    context: &InteractionContext<'_>,
    catalog: &dyn MovieCatalog,
    weights: &SignalWeights,
    fetch_timeout: Option<Duration>,
    max_concurrent_lookups: usize,
) -> GenreProfile {
    let (mut profile, missing) = GenreProfile::from_known_genres(context, weights);

    if !missing.is_empty() {
        debug!(count = missing.len(), catalog = catalog.name(), "Backfilling favorite genres");

        let lookups = missing.iter().map(|&movie_id| async move {
            let details = fetch::bounded(
                "movie_details",
                fetch_timeout,
                catalog.movie_details(movie_id),
            )
            .await;

            match details {
                Ok(details) => details.genre_ids(),
                Err(e) => {
                    warn!(movie_id, error = %e, "Genre backfill failed, favorite contributes no weight");
                    Vec::new()
                }
            }
        });

        let backfilled: Vec<Vec<GenreId>> = stream::iter(lookups)
            .buffered(max_concurrent_lookups.max(1))
            .collect()
            .await;

        for genres in backfilled {
            profile.add(&genres, weights.favorite);
        }
    }

    debug!(genres = profile.scores.len(), "Built genre profile");
    profile
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use catalog::{CatalogError, Genre, MovieDetails, MoviePage, Result};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Details-only catalog: known ids return their genres, others fail
    #[derive(Default)]
    struct DetailsCatalog {
        details: HashMap<MovieId, Vec<GenreId>>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl MovieCatalog for DetailsCatalog {
        async fn movies_by_genre(&self, _genre_id: GenreId, _page: u32) -> Result<MoviePage> {
            Ok(MoviePage::single(Vec::new()))
        }

        async fn movie_details(&self, movie_id: MovieId) -> Result<MovieDetails> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let genres = self.details.get(&movie_id).ok_or(CatalogError::Status {
                endpoint: format!("/movie/{}", movie_id),
                status: 404,
            })?;

            Ok(MovieDetails {
                id: movie_id,
                title: format!("Movie {}", movie_id),
                overview: None,
                poster_path: None,
                release_date: None,
                vote_average: 0.0,
                popularity: 0.0,
                runtime: None,
                genres: genres
                    .iter()
                    .map(|&id| Genre { id, name: format!("Genre {}", id) })
                    .collect(),
            })
        }
    }

    fn viewed(id: MovieId, genres: Vec<GenreId>) -> InteractionRecord {
        InteractionRecord::new(id, format!("Viewed {}", id)).with_genres(genres)
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!((actual - expected).abs() < 1e-9, "expected {}, got {}", expected, actual);
    }

    #[test]
    fn test_recency_weights() {
        // N = 4: index 0 -> 2.0, 1 -> 1.75, 2 -> 1.5, 3 -> 1.25
        let records = vec![
            viewed(1, vec![10]),
            viewed(2, vec![11]),
            viewed(3, vec![12]),
            viewed(4, vec![13]),
        ];
        let context = InteractionContext::new(&records, &[], &[]);
        let (profile, missing) = GenreProfile::from_known_genres(&context, &SignalWeights::default());

        assert!(missing.is_empty());
        assert_close(profile.score(10), 2.0);
        assert_close(profile.score(11), 1.75);
        assert_close(profile.score(12), 1.5);
        assert_close(profile.score(13), 1.25);
        assert!(profile.score(10) > profile.score(13));
    }

    #[test]
    fn test_more_views_raise_the_score() {
        let weights = SignalWeights::default();
        let mut records = Vec::new();
        let mut previous = 0.0;

        for id in 1..=8 {
            records.push(viewed(id, vec![27]));
            let context = InteractionContext::new(&records, &[], &[]);
            let (profile, _) = GenreProfile::from_known_genres(&context, &weights);

            assert!(profile.score(27) > previous);
            previous = profile.score(27);
        }
    }

    #[test]
    fn test_signal_weights_accumulate() {
        let recently_viewed = vec![viewed(1, vec![28, 12]), InteractionRecord::new(2, "untagged")];
        let favorites = vec![InteractionRecord::new(3, "F").with_genres(vec![28])];
        let watchlist = vec![
            InteractionRecord::new(4, "W").with_genres(vec![12]),
            InteractionRecord::new(5, "W2"),
        ];
        let context = InteractionContext::new(&recently_viewed, &favorites, &watchlist);

        let (profile, missing) = GenreProfile::from_known_genres(&context, &SignalWeights::default());

        // 28: view at index 0 of 2 (2.0) + favorite (2.0)
        assert_close(profile.score(28), 4.0);
        // 12: view (2.0) + watchlist (1.5)
        assert_close(profile.score(12), 3.5);
        // Untagged watchlist entries are never backfilled
        assert!(missing.is_empty());
        assert_eq!(profile.top_genres(2), vec![28, 12]);
    }

    #[test]
    fn test_favorite_outranks_older_view() {
        // The tagged view sits at index 1 of 2, worth 1.5 < 2.0
        let recently_viewed = vec![InteractionRecord::new(1, "untagged"), viewed(2, vec![5])];
        let favorites = vec![InteractionRecord::new(3, "F").with_genres(vec![99])];
        let context = InteractionContext::new(&recently_viewed, &favorites, &[]);

        let (profile, _) = GenreProfile::from_known_genres(&context, &SignalWeights::default());

        assert_eq!(profile.top_genres(1), vec![99]);
    }

    #[test]
    fn test_ties_prefer_lower_genre_id() {
        let mut profile = GenreProfile::new();
        profile.add(&[35], 2.0);
        profile.add(&[18], 2.0);
        profile.add(&[80], 3.0);

        assert_eq!(profile.top_genres(3), vec![80, 18, 35]);
    }

    #[test]
    fn test_empty_profile() {
        let records = vec![InteractionRecord::new(1, "A"), InteractionRecord::new(2, "B")];
        let context = InteractionContext::new(&records, &[], &records);
        let (profile, _) = GenreProfile::from_known_genres(&context, &SignalWeights::default());

        assert!(profile.is_empty());
        assert!(profile.top_genres(2).is_empty());
    }

    #[tokio::test]
    async fn test_backfill_favorites_without_genres() {
        let mut catalog = DetailsCatalog::default();
        catalog.details.insert(7, vec![16, 10751]);

        let favorites = vec![
            InteractionRecord::new(7, "needs lookup"),
            // Empty but present genre ids: no lookup
            InteractionRecord::new(8, "tagged empty").with_genres(Vec::new()),
        ];
        let context = InteractionContext::new(&[], &favorites, &[]);

        let profile = build_genre_profile(&context, &catalog, &SignalWeights::default(), None, 8).await;

        assert_eq!(catalog.calls.load(Ordering::SeqCst), 1);
        assert_close(profile.score(16), 2.0);
        assert_close(profile.score(10751), 2.0);
    }

    #[tokio::test]
    async fn test_failed_backfill_is_skipped() {
        let mut catalog = DetailsCatalog::default();
        catalog.details.insert(2, vec![14]);

        // Lookup for 1 fails, 2 succeeds, 3 is already tagged
        let favorites = vec![
            InteractionRecord::new(1, "missing"),
            InteractionRecord::new(2, "found"),
            InteractionRecord::new(3, "tagged").with_genres(vec![36]),
        ];
        let context = InteractionContext::new(&[], &favorites, &[]);

        let profile = build_genre_profile(&context, &catalog, &SignalWeights::default(), None, 8).await;

        assert_eq!(catalog.calls.load(Ordering::SeqCst), 2);
        assert_close(profile.score(14), 2.0);
        assert_close(profile.score(36), 2.0);
        assert_eq!(profile.ranked().len(), 2);
    }

    /// Catalog that tracks how many details lookups overlap
    #[derive(Default)]
    struct ThrottledCatalog {
        in_flight: AtomicUsize,
        peak: AtomicUsize,
    }

    #[async_trait]
    impl MovieCatalog for ThrottledCatalog {
        async fn movies_by_genre(&self, _genre_id: GenreId, _page: u32) -> Result<MoviePage> {
            Ok(MoviePage::single(Vec::new()))
        }

        async fn movie_details(&self, movie_id: MovieId) -> Result<MovieDetails> {
            let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(current, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            Ok(MovieDetails {
                id: movie_id,
                title: format!("Movie {}", movie_id),
                overview: None,
                poster_path: None,
                release_date: None,
                vote_average: 0.0,
                popularity: 0.0,
                runtime: None,
                genres: vec![Genre { id: 18, name: "Drama".to_string() }],
            })
        }
    }

    #[tokio::test]
    async fn test_backfill_limits_lookups_in_flight() {
        let catalog = ThrottledCatalog::default();
        let favorites: Vec<_> = (1..=40)
            .map(|id| InteractionRecord::new(id, format!("Favorite {}", id)))
            .collect();
        let context = InteractionContext::new(&[], &favorites, &[]);

        let profile = build_genre_profile(&context, &catalog, &SignalWeights::default(), None, 4).await;

        let peak = catalog.peak.load(Ordering::SeqCst);
        assert!(peak <= 4, "{} lookups were in flight at once", peak);
        assert!(peak > 1);
        // Every favorite still counted
        assert_close(profile.score(18), 80.0);
    }

    #[tokio::test]
    async fn test_zero_lookup_limit_still_backfills() {
        let mut catalog = DetailsCatalog::default();
        catalog.details.insert(7, vec![16]);
        let favorites = vec![InteractionRecord::new(7, "needs lookup")];
        let context = InteractionContext::new(&[], &favorites, &[]);

        let profile = build_genre_profile(&context, &catalog, &SignalWeights::default(), None, 0).await;

        assert_close(profile.score(16), 2.0);
    }
}
