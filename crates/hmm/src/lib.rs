//! A hidden Markov model over a fixed number of states and emitted labels.
//!
//! This crate contains no unsafe code.
#![forbid(unsafe_code)]

mod hidden_markov_model;

pub use hidden_markov_model::*;
