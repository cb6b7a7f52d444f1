//! This crate provides the regular expression syntax tree that is produced by
//! the schema inference, together with a visitor protocol to traverse it and
//! the canonical textual rendering.
//!
//! This crate contains no unsafe code.
#![forbid(unsafe_code)]

mod regex;
mod regex_display;
mod visitor;

pub use regex::*;
pub use regex_display::*;
pub use visitor::*;
