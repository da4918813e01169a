//! Fixtures shared by the engine and tracker tests.

use async_trait::async_trait;
use catalog::{
    CatalogError, Genre, GenreId, InteractionRecord, MovieCatalog, MovieDetails, MovieId,
    MoviePage, MovieSummary, Result,
};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// In-memory catalog with call counters, failure injection and delays
#[derive(Default)]
pub struct FakeCatalog {
    pub pages: HashMap<GenreId, Vec<MovieSummary>>,
    pub details: HashMap<MovieId, Vec<GenreId>>,
    pub failing_genres: HashSet<GenreId>,
    pub slow_genres: HashSet<GenreId>,
    pub slow_details: bool,
    pub genre_calls: AtomicUsize,
    pub detail_calls: AtomicUsize,
    pub details_in_flight: AtomicUsize,
    pub peak_details_in_flight: AtomicUsize,
}

impl FakeCatalog {
    pub fn with_page(mut self, genre_id: GenreId, movies: Vec<MovieSummary>) -> Self {
        self.pages.insert(genre_id, movies);
        self
    }

    pub fn with_details(mut self, movie_id: MovieId, genres: Vec<GenreId>) -> Self {
        self.details.insert(movie_id, genres);
        self
    }

    pub fn failing(mut self, genre_id: GenreId) -> Self {
        self.failing_genres.insert(genre_id);
        self
    }

    pub fn slow(mut self, genre_id: GenreId) -> Self {
        self.slow_genres.insert(genre_id);
        self
    }

    /// Every details lookup takes 20ms
    pub fn with_slow_details(mut self) -> Self {
        self.slow_details = true;
        self
    }

    pub fn genre_calls(&self) -> usize {
        self.genre_calls.load(Ordering::SeqCst)
    }

    pub fn detail_calls(&self) -> usize {
        self.detail_calls.load(Ordering::SeqCst)
    }

    pub fn peak_details_in_flight(&self) -> usize {
        self.peak_details_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MovieCatalog for FakeCatalog {
    async fn movies_by_genre(&self, genre_id: GenreId, _page: u32) -> Result<MoviePage> {
        self.genre_calls.fetch_add(1, Ordering::SeqCst);
        if self.slow_genres.contains(&genre_id) {
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        if self.failing_genres.contains(&genre_id) {
            return Err(CatalogError::Status {
                endpoint: "/discover/movie".to_string(),
                status: 500,
            });
        }
        Ok(MoviePage::single(self.pages.get(&genre_id).cloned().unwrap_or_default()))
    }

    async fn movie_details(&self, movie_id: MovieId) -> Result<MovieDetails> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        let current = self.details_in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_details_in_flight.fetch_max(current, Ordering::SeqCst);
        if self.slow_details {
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        self.details_in_flight.fetch_sub(1, Ordering::SeqCst);

        let genres = self.details.get(&movie_id).ok_or_else(|| CatalogError::Request {
            endpoint: format!("/movie/{}", movie_id),
            reason: "connection refused".to_string(),
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

pub fn tagged(id: MovieId, genres: &[GenreId]) -> InteractionRecord {
    InteractionRecord::new(id, format!("Movie {}", id)).with_genres(genres.to_vec())
}

pub fn untagged(id: MovieId) -> InteractionRecord {
    InteractionRecord::new(id, format!("Movie {}", id))
}

pub fn movie(id: MovieId, popularity: f64) -> MovieSummary {
    MovieSummary::new(id, format!("Movie {}", id), popularity)
}

pub fn ids(movies: &[MovieSummary]) -> Vec<MovieId> {
    movies.iter().map(|m| m.id).collect()
}
