//! Server crate for the Moxie recommendation engine.
//!
//! This crate contains the engine that coordinates all components of the
//! recommendation pipeline, plus the tracker that publishes its results
//! to a consumer.

pub mod engine;
pub mod tracker;

#[cfg(test)]
mod test_support;

pub use engine::{EngineConfig, RecommendationEngine, Recommendations};
pub use tracker::{Generation, RecommendationState, RecommendationTracker};
