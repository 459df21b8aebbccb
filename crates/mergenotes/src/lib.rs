//! mergenotes library
//!
//! This module exports the core functionality of mergenotes for use in
//! integration tests and as a library.

pub mod config;
pub mod extract;
pub mod notes;
pub mod pipeline;
pub mod range;
pub mod sync;
