//! Shared input type for scoring and candidate generation.

use catalog::{InteractionRecord, InteractionSnapshot, MovieId};
use std::collections::HashSet;

/// Read-only view over the three interaction logs for one computation.
///
/// Index 0 of each slice is the most recent / most relevant entry. The set
/// of interacted ids is built once so filters get O(1) lookups.
#[derive(Debug, Clone)]
pub struct InteractionContext<'a> {
    pub recently_viewed: &'a [InteractionRecord],
    pub favorites: &'a [InteractionRecord],
    pub watchlist: &'a [InteractionRecord],
    interacted: HashSet<MovieId>,
}

impl<'a> InteractionContext<'a> {
    pub fn new(
        recently_viewed: &'a [InteractionRecord],
        favorites: &'a [InteractionRecord],
        watchlist: &'a [InteractionRecord],
    ) -> Self {
        let interacted = recently_viewed
            .iter()
            .chain(favorites)
            .chain(watchlist)
            .map(|r| r.id)
            .collect();

        Self {
            recently_viewed,
            favorites,
            watchlist,
            interacted,
        }
    }

    pub fn from_snapshot(snapshot: &'a InteractionSnapshot) -> Self {
        Self::new(
            snapshot.recently_viewed.records(),
            snapshot.favorites.records(),
            snapshot.watchlist.records(),
        )
    }

    /// Number of interactions across all three logs (duplicates included)
    pub fn total(&self) -> usize {
        self.recently_viewed.len() + self.favorites.len() + self.watchlist.len()
    }

    pub fn has_interacted(&self, movie_id: MovieId) -> bool {
        self.interacted.contains(&movie_id)
    }

    pub fn interacted_ids(&self) -> &HashSet<MovieId> {
        &self.interacted
    }

    /// Viewed, then favorites, then watchlist, each in log order
    pub fn all_records(&self) -> impl Iterator<Item = &'a InteractionRecord> + use<'a> {
        self.recently_viewed
            .iter()
            .chain(self.favorites)
            .chain(self.watchlist)
    }
}
