//! # Sources Crate
//!
//! This crate turns the user's interaction logs into genre preferences and
//! then into candidate movies.
//!
//! ## Components
//!
//! ### Genre Profile
//! Weighted, multi-signal genre scoring:
//! - Recently viewed movies, with a recency bias (index 0 counts double)
//! - Favorites at 2x, backfilled from the catalog when genre ids are missing
//! - Watchlist at 1.5x
//!
//! ### Genre Source
//! Fetches the most popular catalog movies for the top two genres,
//! concurrently, and concatenates them in genre rank order.
//!
//! ## Example Usage
//!
//! ```ignore
//! use sources::{build_genre_profile, GenreSource, InteractionContext, SignalWeights};
//!
//! let context = InteractionContext::from_snapshot(&snapshot);
//! let profile = build_genre_profile(&context, catalog.as_ref(), &SignalWeights::default(), None, 8).await;
//!
//! let source = GenreSource::new(catalog.clone());
//! let batch = source.get_candidates(&profile).await;
//! ```
//!
//! Every catalog call is fault-isolated: a failure is logged and treated as
//! "no data" for that call.

// Public modules
pub mod fetch;
pub mod genre_profile;
pub mod genre_source;
pub mod types;

// Re-export commonly used types
pub use genre_profile::{build_genre_profile, GenreProfile, SignalWeights};
pub use genre_source::{CandidateBatch, GenreSource};
pub use types::InteractionContext;
