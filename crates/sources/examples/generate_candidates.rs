//! Example: Score genres and generate candidates from sample logs
//!
//! Run with: cargo run --package sources --example generate_candidates
//!
//! This example shows how to:
//! 1. Build an interaction context from three logs
//! 2. Score genres, backfilling a favorite without genre ids
//! 3. Fetch candidates for the two best genres
//! 4. Display the results
//!
//! The catalog is an in-memory stand-in so the example runs offline.

use async_trait::async_trait;
use catalog::{
    CatalogError, Genre, GenreId, InteractionRecord, MovieCatalog, MovieDetails, MovieId,
    MoviePage, MovieSummary, Result,
};
use sources::{build_genre_profile, GenreSource, InteractionContext, SignalWeights};
use std::sync::Arc;
use std::time::Instant;

const SCIENCE_FICTION: GenreId = 878;
const DRAMA: GenreId = 18;
const THRILLER: GenreId = 53;

struct SampleCatalog;

#[async_trait]
impl MovieCatalog for SampleCatalog {
    async fn movies_by_genre(&self, genre_id: GenreId, _page: u32) -> Result<MoviePage> {
        let movies = match genre_id {
            SCIENCE_FICTION => vec![
                MovieSummary::new(438631, "Dune", 212.4),
                MovieSummary::new(157336, "Interstellar", 140.2),
                MovieSummary::new(329865, "Arrival", 61.0),
            ],
            DRAMA => vec![
                MovieSummary::new(965150, "Aftersun", 38.7),
                MovieSummary::new(157336, "Interstellar", 140.2),
            ],
            _ => Vec::new(),
        };
        Ok(MoviePage::single(movies))
    }

    async fn movie_details(&self, movie_id: MovieId) -> Result<MovieDetails> {
        if movie_id != 335984 {
            return Err(CatalogError::Status {
                endpoint: format!("/movie/{}", movie_id),
                status: 404,
            });
        }
        Ok(MovieDetails {
            id: movie_id,
            title: "Blade Runner 2049".to_string(),
            overview: None,
            poster_path: None,
            release_date: Some("2017-10-04".to_string()),
            vote_average: 7.6,
            popularity: 75.3,
            runtime: Some(164),
            genres: vec![
                Genre { id: SCIENCE_FICTION, name: "Science Fiction".to_string() },
                Genre { id: DRAMA, name: "Drama".to_string() },
            ],
        })
    }

    fn name(&self) -> &str {
        "sample"
    }
}

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter("info,sources=debug")
        .init();

    println!("=== Moxie Candidate Generation Example ===\n");

    let recently_viewed = vec![
        InteractionRecord::new(329865, "Arrival").with_genres(vec![SCIENCE_FICTION, DRAMA]),
        InteractionRecord::new(273481, "Sicario").with_genres(vec![THRILLER, DRAMA]),
        InteractionRecord::new(78, "Blade Runner").with_genres(vec![SCIENCE_FICTION]),
    ];
    let favorites = vec![InteractionRecord::new(335984, "Blade Runner 2049")];
    let watchlist = vec![InteractionRecord::new(965150, "Aftersun").with_genres(vec![DRAMA])];

    let context = InteractionContext::new(&recently_viewed, &favorites, &watchlist);
    println!("Interactions: {}\n", context.total());

    let catalog: Arc<dyn MovieCatalog> = Arc::new(SampleCatalog);

    // Score genres
    let start = Instant::now();
    let profile =
        build_genre_profile(&context, catalog.as_ref(), &SignalWeights::default(), None, 8).await;
    println!("Scored genres in {:?}", start.elapsed());
    for (genre, score) in profile.ranked() {
        println!("  genre {:>4}: {:.3}", genre, score);
    }

    // Generate candidates
    let start = Instant::now();
    let batch = GenreSource::new(catalog).get_candidates(&profile).await;
    println!(
        "\nFetched {} candidates for genres {:?} in {:?}",
        batch.movies.len(),
        batch.genres,
        start.elapsed()
    );
    for movie in &batch.movies {
        let seen = if context.has_interacted(movie.id) { " (already seen)" } else { "" };
        println!("  {} - popularity {:.1}{}", movie.title, movie.popularity, seen);
    }
}
