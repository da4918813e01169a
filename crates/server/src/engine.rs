//! # Recommendation Engine
//!
//! This module coordinates the entire recommendation pipeline:
//! 1. Check that the user has enough interactions to go on
//! 2. Score genres from the three interaction logs (backfilling favorites)
//! 3. Fetch candidates for the top two genres
//! 4. Deduplicate and drop movies the user already interacted with
//! 5. Sort by popularity and keep the top 12
//!
//! When no genre carries any weight the engine falls back to the user's own
//! interaction records. No catalog failure ever escapes: the worst case is a
//! shorter or empty list.

use std::sync::Arc;
use std::time::{Duration, Instant};

use catalog::{InteractionRecord, MovieCatalog, MovieSummary};
use pipeline::filters::{AlreadyInteractedFilter, DuplicateFilter};
use pipeline::{Filter, FilterPipeline, PopularityRanker};
use sources::{build_genre_profile, GenreProfile, GenreSource, InteractionContext, SignalWeights};
use tracing::{debug, info, instrument, warn};

/// Tuning knobs for the engine
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Minimum total interactions before recommending anything
    pub min_interactions: usize,
    /// Maximum length of the recommendation list
    pub max_results: usize,
    /// How many top genres to fetch candidates for
    pub genre_count: usize,
    pub weights: SignalWeights,
    /// Bound on each catalog call; `None` waits indefinitely
    pub fetch_timeout: Option<Duration>,
    /// Favorite genre lookups allowed in flight at once
    pub max_concurrent_lookups: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_interactions: 5,
            max_results: 12,
            genre_count: 2,
            weights: SignalWeights::default(),
            fetch_timeout: None,
            max_concurrent_lookups: 8,
        }
    }
}

/// One computation's output
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Recommendations {
    pub movies: Vec<MovieSummary>,
    /// Genre scores behind `movies`; empty below the signal threshold
    pub profile: GenreProfile,
    /// `movies` came from the user's own logs rather than genre fetches
    pub fallback: bool,
}

/// Stateless recommender over an injected movie catalog
#[derive(Clone)]
pub struct RecommendationEngine {
    catalog: Arc<dyn MovieCatalog>,
    config: EngineConfig,
    genre_source: GenreSource,
    filter_pipeline: Arc<FilterPipeline>,
    ranker: PopularityRanker,
}

impl RecommendationEngine {
    /// Create an engine with the default configuration
    pub fn new(catalog: Arc<dyn MovieCatalog>) -> Self {
        Self::with_config(catalog, EngineConfig::default())
    }

    pub fn with_config(catalog: Arc<dyn MovieCatalog>, config: EngineConfig) -> Self {
        let genre_source = GenreSource::new(catalog.clone())
            .with_genre_count(config.genre_count)
            .with_fetch_timeout(config.fetch_timeout);
        let filter_pipeline = Arc::new(
            FilterPipeline::new()
                .add_filter(DuplicateFilter)
                .add_filter(AlreadyInteractedFilter),
        );
        let ranker = PopularityRanker::new(config.max_results);

        Self {
            catalog,
            config,
            genre_source,
            filter_pipeline,
            ranker,
        }
    }

    /// Bound every catalog call by `timeout`
    pub fn with_fetch_timeout(self, timeout: Duration) -> Self {
        let config = EngineConfig {
            fetch_timeout: Some(timeout),
            ..self.config
        };
        Self::with_config(self.catalog, config)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// True iff the three logs together hold at least `min_interactions` entries
    pub fn has_enough_signal(
        &self,
        recently_viewed: &[InteractionRecord],
        favorites: &[InteractionRecord],
        watchlist: &[InteractionRecord],
    ) -> bool {
        recently_viewed.len() + favorites.len() + watchlist.len() >= self.config.min_interactions
    }

    /// Main entry point: compute the recommendation list.
    ///
    /// # Returns
    /// At most `max_results` movies with unique ids, most popular first,
    /// none of them present in any log. Empty when there is not enough
    /// signal, in which case the catalog is not called at all.
    pub async fn compute_recommendations(
        &self,
        recently_viewed: &[InteractionRecord],
        favorites: &[InteractionRecord],
        watchlist: &[InteractionRecord],
    ) -> Vec<MovieSummary> {
        self.recommend(recently_viewed, favorites, watchlist)
            .await
            .movies
    }

    /// Same as [`compute_recommendations`](Self::compute_recommendations),
    /// also returning the genre profile and whether the fallback was used
    #[instrument(
        skip_all,
        fields(
            viewed = recently_viewed.len(),
            favorites = favorites.len(),
            watchlist = watchlist.len()
        )
    )]
    pub async fn recommend(
        &self,
        recently_viewed: &[InteractionRecord],
        favorites: &[InteractionRecord],
        watchlist: &[InteractionRecord],
    ) -> Recommendations {
        let start_time = Instant::now();

        if !self.has_enough_signal(recently_viewed, favorites, watchlist) {
            debug!(
                "Not enough interactions to recommend (need {})",
                self.config.min_interactions
            );
            return Recommendations::default();
        }

        let context = InteractionContext::new(recently_viewed, favorites, watchlist);

        // Score genres
        let profile = self.build_genre_profile(&context).await;
        if profile.is_empty() {
            info!("No genre signal in interaction logs, falling back to interacted movies");
            return self.fallback(&context, profile);
        }
        debug!(top_genres = ?profile.top_genres(self.config.genre_count), "Ranked genres");

        // Generate candidates
        let batch = self.genre_source.get_candidates(&profile).await;
        if batch.all_failed() {
            warn!(
                genres = ?batch.genres,
                "Every genre fetch failed, falling back to interacted movies"
            );
            return self.fallback(&context, profile);
        }

        // Filter and rank
        let filtered = self.filter_pipeline.apply(batch.movies, &context);
        let movies = self.ranker.rank(filtered);

        info!(
            "Selected {} recommendations in {:.2?}",
            movies.len(),
            start_time.elapsed()
        );
        Recommendations {
            movies,
            profile,
            fallback: false,
        }
    }

    async fn build_genre_profile(&self, context: &InteractionContext<'_>) -> GenreProfile {
        build_genre_profile(
            context,
            self.catalog.as_ref(),
            &self.config.weights,
            self.config.fetch_timeout,
            self.config.max_concurrent_lookups,
        )
        .await
    }

    /// The user's own records: viewed, favorites, watchlist, deduplicated
    /// and truncated. Neither sorted nor filtered against the logs.
    fn fallback(&self, context: &InteractionContext<'_>, profile: GenreProfile) -> Recommendations {
        let own: Vec<MovieSummary> = context.all_records().map(MovieSummary::from).collect();
        let mut movies = DuplicateFilter.apply(own, context);
        movies.truncate(self.config.max_results);
        Recommendations {
            movies,
            profile,
            fallback: true,
        }
    }
}
