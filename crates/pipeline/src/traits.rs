//! Core traits for the filtering pipeline.
//!
//! This module defines the Filter trait that allows composable,
//! extensible filters to be applied to candidate sets.

use catalog::MovieSummary;
use sources::InteractionContext;

/// Core trait for filtering candidates.
///
/// All filters must implement this trait to be used in the FilterPipeline.
/// Filters take ownership of the candidate list and return the kept
/// candidates in their original relative order. They cannot fail: a filter
/// that has nothing to say returns its input unchanged.
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Apply this filter to a set of candidates.
    ///
    /// # Arguments
    /// * `candidates` - The candidates to filter (takes ownership)
    /// * `context` - The user's interaction logs
    fn apply(
        &self,
        candidates: Vec<MovieSummary>,
        context: &InteractionContext<'_>,
    ) -> Vec<MovieSummary>;
}
