//! # Catalog Crate
//!
//! Shared vocabulary for the recommender: catalog types, the async port
//! used to reach the movie catalog, and the user's interaction logs.
//!
//! ## Main Components
//!
//! - **types**: `InteractionRecord`, `MovieSummary`, `MoviePage`, `MovieDetails`
//! - **fetcher**: the `MovieCatalog` trait implemented by HTTP clients and test fakes
//! - **interactions**: recently viewed / favorites / watchlist logs and their mutation rules
//! - **store**: JSON-file persistence of the logs, one slot per log
//! - **error**: Error types for fetching and persistence
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::{InteractionStore, JsonFileStore, LogKind};
//!
//! let store = JsonFileStore::new("~/.moxie");
//! let snapshot = store.load_snapshot()?;
//! println!("{} interactions recorded", snapshot.total());
//! ```

// Public modules
pub mod error;
pub mod fetcher;
pub mod interactions;
pub mod store;
pub mod types;

// Re-export commonly used types for convenience
pub use error::{CatalogError, Result};
pub use fetcher::MovieCatalog;
pub use interactions::{InteractionLog, LogKind, MAX_RECENTLY_VIEWED};
pub use store::{InteractionSnapshot, InteractionStore, JsonFileStore};
pub use types::{
    // Type aliases
    GenreId,
    MovieId,
    // Core types
    Genre,
    InteractionRecord,
    MovieDetails,
    MoviePage,
    MovieSummary,
};
