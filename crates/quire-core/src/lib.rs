//! Quire Core
//!
//! Small utilities shared by the Quire crates: math re-exports, generic
//! geometry, hashing collections, logging setup and profiling scopes.

pub mod alloc;
pub mod geometry;
pub mod logging;
pub mod math;
pub mod profiling;
