//! Utility types and functions shared by the SchemaLearner crates.
//!
//! Forbid unsafe code in this crate.
#![forbid(unsafe_code)]

mod error;
mod permutation;
mod tagged_index;
mod vecset;

pub use error::*;
pub use permutation::*;
pub use random_test::*;
pub use tagged_index::*;
pub use vecset::*;
