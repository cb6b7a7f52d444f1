use std::fmt;

use rustc_hash::FxHashMap;

use schema_soa::SingleOccurrenceAutomaton;
use schema_soa::StateIndex;
use schema_utilities::TagIndex;
use schema_utilities::VecSet;

use crate::Partition;

/// A unique type for the nodes.
pub struct NodeTag;

/// The index for a node of a [Graph].
pub type NodeIndex = TagIndex<usize, NodeTag>;

/// A directed graph over the nodes `0..num_of_nodes`, storing both the
/// successors and the predecessors of every node.
#[derive(Clone, PartialEq, Eq)]
pub struct Graph {
    successors: Vec<VecSet<NodeIndex>>,
    predecessors: Vec<VecSet<NodeIndex>>,
}

impl Graph {
    /// Creates a graph with the given number of nodes and the given edges.
    /// Duplicated edges are ignored.
    pub fn new<I>(num_of_nodes: usize, edges: I) -> Graph
    where
        I: IntoIterator<Item = (NodeIndex, NodeIndex)>,
    {
        let mut graph = Graph {
            successors: vec![VecSet::new(); num_of_nodes],
            predecessors: vec![VecSet::new(); num_of_nodes],
        };

        for (from, to) in edges {
            graph.successors[*from].insert(to);
            graph.predecessors[*to].insert(from);
        }

        graph
    }

    /// Returns the graph formed by the learned states of the automaton, the
    /// start and end states and their edges are left out.
    ///
    /// The i-th node corresponds to the i-th state of [SingleOccurrenceAutomaton::states].
    pub fn from_automaton<S>(automaton: &SingleOccurrenceAutomaton<S>) -> Graph {
        let state_to_node: FxHashMap<StateIndex, NodeIndex> = automaton
            .states()
            .enumerate()
            .map(|(node, state)| (state, NodeIndex::new(node)))
            .collect();

        let edges = automaton.iter_edges().filter_map(|(from, to)| {
            Some((*state_to_node.get(&from)?, *state_to_node.get(&to)?))
        });

        Graph::new(state_to_node.len(), edges)
    }

    /// Returns the graph with one node per block of the partition, and an edge
    /// between two different blocks whenever there is an edge between their
    /// members. Edges within a block are dropped.
    pub fn quotient(&self, partition: &impl Partition) -> Graph {
        debug_assert_eq!(
            partition.len(),
            self.num_of_nodes(),
            "The partition must cover the nodes of the graph"
        );

        let edges = self.iter_edges().filter_map(|(from, to)| {
            let from_block = partition.block_number(from);
            let to_block = partition.block_number(to);

            (from_block != to_block).then(|| (NodeIndex::new(*from_block), NodeIndex::new(*to_block)))
        });

        Graph::new(partition.num_of_blocks(), edges)
    }

    /// Returns the number of nodes.
    pub fn num_of_nodes(&self) -> usize {
        self.successors.len()
    }

    /// Returns the number of edges.
    pub fn num_of_edges(&self) -> usize {
        self.successors.iter().map(VecSet::len).sum()
    }

    /// Iterate over all nodes of the graph.
    pub fn iter_nodes(&self) -> impl Iterator<Item = NodeIndex> + use<> {
        (0..self.num_of_nodes()).map(NodeIndex::new)
    }

    /// Iterate over all edges `(from, to)`, ordered by `from` and then by `to`.
    pub fn iter_edges(&self) -> impl Iterator<Item = (NodeIndex, NodeIndex)> + '_ {
        self.iter_nodes()
            .flat_map(move |from| self.successors(from).iter().map(move |&to| (from, to)))
    }

    /// Returns the nodes with an edge from the given node.
    pub fn successors(&self, node: NodeIndex) -> &VecSet<NodeIndex> {
        &self.successors[*node]
    }

    /// Returns the nodes with an edge into the given node.
    pub fn predecessors(&self, node: NodeIndex) -> &VecSet<NodeIndex> {
        &self.predecessors[*node]
    }
}

impl fmt::Debug for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Number of nodes: {}", self.num_of_nodes())?;
        writeln!(f, "Number of edges: {}", self.num_of_edges())?;

        for (from, to) in self.iter_edges() {
            writeln!(f, "{from} --> {to}")?;
        }

        Ok(())
    }
}
