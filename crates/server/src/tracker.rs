//! Recommendation state for a single consumer.
//!
//! Every computation is tagged with a generation number when it starts. A
//! result is only published if no newer computation has started since, so
//! a slow, stale computation can never overwrite a fresher one.

use std::sync::{Mutex, MutexGuard, PoisonError};

use catalog::{InteractionRecord, MovieSummary};
use sources::GenreProfile;
use tracing::debug;

use crate::engine::{RecommendationEngine, Recommendations};

/// Monotonic id of a computation
pub type Generation = u64;

/// Last published recommendation list
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecommendationState {
    pub movies: Vec<MovieSummary>,
    pub profile: GenreProfile,
    pub fallback: bool,
    pub has_enough_signal: bool,
    /// Generation that produced this state (0 before the first publish)
    pub generation: Generation,
}

#[derive(Debug)]
struct TrackerInner {
    latest_started: Generation,
    loading: bool,
    state: RecommendationState,
}

/// Holds the latest recommendations and the loading flag.
///
/// `is_loading` starts out `true` and stays `true` until the newest started
/// computation has published.
#[derive(Debug)]
pub struct RecommendationTracker {
    inner: Mutex<TrackerInner>,
}

impl RecommendationTracker {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(TrackerInner {
                latest_started: 0,
                loading: true,
                state: RecommendationState::default(),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, TrackerInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Start a computation, superseding any in flight
    pub fn begin(&self) -> Generation {
        let mut inner = self.lock();
        inner.latest_started += 1;
        inner.loading = true;
        inner.latest_started
    }

    /// Publish a result. Returns `false` (and drops the result) when a newer
    /// computation has started since `generation` began.
    pub fn complete(
        &self,
        generation: Generation,
        recommendations: Recommendations,
        has_enough_signal: bool,
    ) -> bool {
        let mut inner = self.lock();
        if generation != inner.latest_started {
            debug!(
                generation,
                latest = inner.latest_started,
                "Discarding stale recommendations"
            );
            return false;
        }

        inner.state = RecommendationState {
            movies: recommendations.movies,
            profile: recommendations.profile,
            fallback: recommendations.fallback,
            has_enough_signal,
            generation,
        };
        inner.loading = false;
        true
    }

    pub fn is_loading(&self) -> bool {
        self.lock().loading
    }

    pub fn latest(&self) -> RecommendationState {
        self.lock().state.clone()
    }

    /// Recompute from the given logs and publish if still the newest.
    pub async fn refresh(
        &self,
        engine: &RecommendationEngine,
        recently_viewed: &[InteractionRecord],
        favorites: &[InteractionRecord],
        watchlist: &[InteractionRecord],
    ) -> bool {
        let generation = self.begin();
        let has_enough_signal = engine.has_enough_signal(recently_viewed, favorites, watchlist);
        let recommendations = engine
            .recommend(recently_viewed, favorites, watchlist)
            .await;

        self.complete(generation, recommendations, has_enough_signal)
    }
}

impl Default for RecommendationTracker {
    fn default() -> Self {
        Self::new()
    }
}
