//! Converts a single occurrence automaton into a regular expression.
//!
//! The conversion follows the CHARE scheme: the states of the automaton are
//! grouped into slots of interchangeable symbols, the slots are ordered
//! topologically and every slot becomes a repeated factor of the resulting
//! sequence. The graph algorithms used on the way are exposed as well.

#![forbid(unsafe_code)]

mod chare;
mod graph;
mod partition;
mod reachability;
mod scc_decomposition;
mod sort_topological;

pub use chare::*;
pub use graph::*;
pub use partition::*;
pub use reachability::*;
pub use scc_decomposition::*;
pub use sort_topological::*;
