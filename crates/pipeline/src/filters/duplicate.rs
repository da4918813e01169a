//! Filter to drop repeated movies.
//!
//! Candidates come from several genre pages, so the same movie can show up
//! more than once. The first occurrence wins, which keeps the better
//! ranked genre's copy.

use crate::traits::Filter;
use catalog::{MovieId, MovieSummary};
use sources::InteractionContext;
use std::collections::HashSet;

/// Keeps only the first candidate for each movie id.
pub struct DuplicateFilter;

impl Filter for DuplicateFilter {
    fn name(&self) -> &str {
        "DuplicateFilter"
    }

    fn apply(
        &self,
        candidates: Vec<MovieSummary>,
        _context: &InteractionContext<'_>,
    ) -> Vec<MovieSummary> {
        let mut seen: HashSet<MovieId> = HashSet::with_capacity(candidates.len());
        candidates
            .into_iter()
            .filter(|candidate| seen.insert(candidate.id))
            .collect()
    }
}
