//! The FilterPipeline orchestrates multiple filters.
//!
//! This module provides the main FilterPipeline struct that chains
//! multiple filters together using the builder pattern.

use crate::traits::Filter;
use catalog::MovieSummary;
use sources::InteractionContext;
use tracing;

/// Chains multiple filters together into a processing pipeline.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::new()
///     .add_filter(DuplicateFilter)
///     .add_filter(AlreadyInteractedFilter);
///
/// let filtered = pipeline.apply(candidates, &context);
/// ```
pub struct FilterPipeline {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterPipeline {
    /// Create a new empty FilterPipeline.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Add a filter to the pipeline (builder pattern).
    pub fn add_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Apply all filters in sequence to the candidates.
    pub fn apply(
        &self,
        candidates: Vec<MovieSummary>,
        context: &InteractionContext<'_>,
    ) -> Vec<MovieSummary> {
        let mut current = candidates;
        for filter in &self.filters {
            tracing::debug!(
                "Applying filter: {} (input count: {})",
                filter.name(),
                current.len()
            );
            current = filter.apply(current, context);
            tracing::debug!(
                "Filter applied: {} (output count: {})",
                filter.name(),
                current.len()
            );
        }
        current
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::{AlreadyInteractedFilter, DuplicateFilter};
    use catalog::InteractionRecord;

    #[test]
    fn test_empty_pipeline() {
        let pipeline = FilterPipeline::new();
        let context = InteractionContext::new(&[], &[], &[]);

        let candidates = vec![
            MovieSummary::new(1, "A", 9.0),
            MovieSummary::new(1, "A", 9.0),
        ];

        let filtered = pipeline.apply(candidates, &context);
        assert_eq!(filtered.len(), 2);
        assert!(pipeline.is_empty());
    }

    #[test]
    fn test_filters_run_in_order() {
        let favorites = vec![InteractionRecord::new(2, "B")];
        let context = InteractionContext::new(&[], &favorites, &[]);

        let pipeline = FilterPipeline::new()
            .add_filter(DuplicateFilter)
            .add_filter(AlreadyInteractedFilter);

        let candidates = vec![
            MovieSummary::new(1, "A", 9.0),
            MovieSummary::new(2, "B", 8.0),
            MovieSummary::new(1, "A again", 7.0),
            MovieSummary::new(3, "C", 6.0),
        ];

        let filtered = pipeline.apply(candidates, &context);
        let ids: Vec<_> = filtered.iter().map(|m| m.id).collect();

        assert_eq!(pipeline.len(), 2);
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(filtered[0].title, "A");
    }
}
