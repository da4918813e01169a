//! Final ordering of filtered candidates.

use catalog::MovieSummary;
use std::cmp::Ordering;

/// Sorts candidates by descending popularity and keeps the first `limit`.
///
/// The sort is stable: equally popular movies keep their incoming order,
/// so the better ranked genre's movies stay ahead on ties.
#[derive(Debug, Clone, Copy)]
pub struct PopularityRanker {
    limit: usize,
}

impl PopularityRanker {
    pub fn new(limit: usize) -> Self {
        Self { limit }
    }

    pub fn rank(&self, mut candidates: Vec<MovieSummary>) -> Vec<MovieSummary> {
        candidates.sort_by(|a, b| {
            b.popularity
                .partial_cmp(&a.popularity)
                .unwrap_or(Ordering::Equal)
        });
        candidates.truncate(self.limit);
        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(movies: &[MovieSummary]) -> Vec<u32> {
        movies.iter().map(|m| m.id).collect()
    }

    #[test]
    fn test_sorts_by_popularity_descending() {
        let ranked = PopularityRanker::new(10).rank(vec![
            MovieSummary::new(1, "A", 5.0),
            MovieSummary::new(2, "B", 50.0),
            MovieSummary::new(3, "C", 20.0),
        ]);

        assert_eq!(ids(&ranked), vec![2, 3, 1]);
    }

    #[test]
    fn test_truncates_to_limit() {
        let candidates = (1..=20)
            .map(|id| MovieSummary::new(id, format!("Movie {}", id), id as f64))
            .collect();

        let ranked = PopularityRanker::new(12).rank(candidates);

        assert_eq!(ranked.len(), 12);
        assert_eq!(ranked[0].id, 20);
        assert_eq!(ranked[11].id, 9);
    }

    #[test]
    fn test_ties_keep_incoming_order() {
        let ranked = PopularityRanker::new(10).rank(vec![
            MovieSummary::new(7, "first", 10.0),
            MovieSummary::new(3, "second", 10.0),
            MovieSummary::new(9, "top", 11.0),
        ]);

        assert_eq!(ids(&ranked), vec![9, 7, 3]);
    }

    #[test]
    fn test_nan_popularity_does_not_panic() {
        let ranked = PopularityRanker::new(10).rank(vec![
            MovieSummary::new(1, "A", f64::NAN),
            MovieSummary::new(2, "B", 3.0),
        ]);

        assert_eq!(ranked.len(), 2);
    }
}
