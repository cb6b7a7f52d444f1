//!
//! A crate containing the single occurrence automaton that is learned from
//! example sequences, and related functionality.
//!
//! This crate does not use unsafe code.

#![forbid(unsafe_code)]

mod io;
mod random_sequences;
mod single_occurrence_automaton;

pub use io::*;
pub use random_sequences::*;
pub use single_occurrence_automaton::*;
