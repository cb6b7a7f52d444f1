use std::collections::VecDeque;

use bitvec::bitvec;
use bitvec::order::Lsb0;
use bitvec::vec::BitVec;

use crate::Graph;
use crate::NodeIndex;

/// The transitive closure of the edge relation of a graph.
///
/// A node reaches another node iff there is a non-empty path between them, so
/// a node only reaches itself when it lies on a cycle.
pub struct Reachability {
    reachable: Vec<BitVec<usize, Lsb0>>,
}

impl Reachability {
    /// Returns true iff there is a non-empty path from `from` to `to`.
    pub fn reaches(&self, from: NodeIndex, to: NodeIndex) -> bool {
        self.reachable[*from][*to]
    }

    /// Returns true iff neither node reaches the other.
    pub fn is_incomparable(&self, x: NodeIndex, y: NodeIndex) -> bool {
        !self.reaches(x, y) && !self.reaches(y, x)
    }
}

/// Computes for every node of the graph the set of nodes that it reaches, by
/// a breadth first search from every node.
pub fn compute_reachability(graph: &Graph) -> Reachability {
    let num_of_nodes = graph.num_of_nodes();
    let mut queue = VecDeque::new();

    let reachable = graph
        .iter_nodes()
        .map(|node| {
            let mut visited = bitvec![usize, Lsb0; 0; num_of_nodes];

            // The node itself is not marked, it is only reachable through a cycle.
            queue.extend(graph.successors(node).iter().copied());
            while let Some(current) = queue.pop_front() {
                if visited[*current] {
                    continue;
                }

                visited.set(*current, true);
                queue.extend(
                    graph
                        .successors(current)
                        .iter()
                        .copied()
                        .filter(|successor| !visited[**successor]),
                );
            }

            visited
        })
        .collect();

    Reachability { reachable }
}
