//! # Forumgate Testkit
//!
//! Testing utilities for the forumgate policy engine.
//!
//! ## Decision Vectors
//!
//! Named scenarios with the exact decision each must produce. If one of
//! these changes, the access policy has changed.
//!
//! ## Property Testing
//!
//! Proptest strategies that generate well-formed forums: linked ancestor
//! chains, pages matching their chains, and non-conflicting grants.
//!
//! ## Test Fixtures
//!
//! [`ForumFixture`] builds an in-memory forum and runs checks against it.

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::ForumFixture;
pub use generators::ScenarioParams;
pub use vectors::{all_vectors, verify_all_vectors, DecisionVector};
