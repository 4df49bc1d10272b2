//! Test utilities for Quire crates.
//!
//! # Overview
//!
//! - [`fixtures`] - small hand-built layouts used across test suites
//! - [`assertions`] - invariant and tab-conservation assertions
//! - [`generator`] - deterministic random action streams for fuzz-style tests
//! - [`strategies`] - proptest strategies for layout descriptions
//!
//! # Example
//!
//! ```rust
//! use quire_dock::dispatch;
//! use quire_test_utils::{Lcg, assert_invariants, random_action, scenario_tree};
//!
//! let mut tree = scenario_tree();
//! let mut rng = Lcg::new(7);
//! for _ in 0..32 {
//!     let action = random_action(&tree, &mut rng);
//!     tree = dispatch(&tree, action).unwrap();
//!     assert_invariants(&tree);
//! }
//! ```

pub mod assertions;
pub mod fixtures;
pub mod generator;
pub mod strategies;

pub use assertions::{assert_invariants, assert_invariants_with, assert_weights_close, tab_multiset};
pub use fixtures::{nested_tree, scenario_description, scenario_tree, three_column_tree};
pub use generator::{Lcg, random_action};
pub use strategies::{arb_description, arb_weights};
