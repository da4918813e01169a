//! Pipeline for filtering and ranking genre candidates.
//!
//! This crate provides:
//! - Filter trait and implementations for candidate filtering
//! - FilterPipeline for composing filters
//! - PopularityRanker for the final sort and truncation
//!
//! ## Architecture
//! The pipeline processes candidates in stages:
//! 1. Filters remove unwanted candidates (duplicates, movies already in a log)
//! 2. The ranker orders the rest by popularity and keeps the top N
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{FilterPipeline, PopularityRanker};
//! use pipeline::filters::*;
//!
//! let pipeline = FilterPipeline::new()
//!     .add_filter(DuplicateFilter)
//!     .add_filter(AlreadyInteractedFilter);
//!
//! let filtered = pipeline.apply(batch.movies, &context);
//! let recommendations = PopularityRanker::new(12).rank(filtered);
//! ```

pub mod traits;
pub mod filters;
pub mod filter_pipeline;
pub mod ranking;

// Re-export main types
pub use traits::Filter;
pub use filter_pipeline::FilterPipeline;
pub use ranking::PopularityRanker;
