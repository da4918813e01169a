//! Filter to remove movies the user has already interacted with.
//!
//! There's no point in recommending a movie that is already in the user's
//! recently viewed list, favorites or watchlist.

use crate::traits::Filter;
use catalog::MovieSummary;
use sources::InteractionContext;

/// Removes candidates present in any of the three interaction logs.
///
/// ## Algorithm
/// Uses the id set built by InteractionContext for O(1) lookups.
pub struct AlreadyInteractedFilter;

impl Filter for AlreadyInteractedFilter {
    fn name(&self) -> &str {
        "AlreadyInteractedFilter"
    }

    fn apply(
        &self,
        candidates: Vec<MovieSummary>,
        context: &InteractionContext<'_>,
    ) -> Vec<MovieSummary> {
        candidates
            .into_iter()
            .filter(|candidate| !context.has_interacted(candidate.id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::InteractionRecord;

    #[test]
    fn test_already_interacted_filter() {
        let viewed = vec![InteractionRecord::new(100, "Viewed")];
        let favorites = vec![InteractionRecord::new(200, "Favorite")];
        let watchlist = vec![InteractionRecord::new(300, "Queued")];
        let context = InteractionContext::new(&viewed, &favorites, &watchlist);

        let candidates = vec![
            MovieSummary::new(100, "Viewed", 9.0),
            MovieSummary::new(101, "New", 8.0),
            MovieSummary::new(200, "Favorite", 7.0),
            MovieSummary::new(300, "Queued", 6.5),
            MovieSummary::new(400, "Also new", 6.0),
        ];

        let filtered = AlreadyInteractedFilter.apply(candidates, &context);

        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].id, 101);
        assert_eq!(filtered[1].id, 400);
    }
}
