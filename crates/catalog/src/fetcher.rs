//! The port through which the recommender reaches the movie catalog.

use crate::error::Result;
use crate::types::{GenreId, MovieDetails, MovieId, MoviePage};
use async_trait::async_trait;

/// Read access to a remote movie catalog.
///
/// Implementations fail with a `CatalogError` on any network or HTTP
/// problem. Callers in the recommender treat every failure as "no data"
/// for that call and never propagate it.
#[async_trait]
pub trait MovieCatalog: Send + Sync {
    /// One page of movies tagged with `genre_id`, most popular first
    async fn movies_by_genre(&self, genre_id: GenreId, page: u32) -> Result<MoviePage>;

    /// Full details of a single movie, including its named genres
    async fn movie_details(&self, movie_id: MovieId) -> Result<MovieDetails>;

    /// Catalog name for logging
    fn name(&self) -> &str {
        "catalog"
    }
}
