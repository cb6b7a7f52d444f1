use bitvec::bitvec;
use bitvec::order::Lsb0;
use log::trace;

use crate::BlockIndex;
use crate::Graph;
use crate::IndexedPartition;
use crate::NodeIndex;

/// Computes the strongly connected components of the graph using Tarjan's
/// algorithm, with an explicit stack instead of recursion.
///
/// The resulting blocks are numbered in the order of their smallest node.
pub fn scc_decomposition(graph: &Graph) -> IndexedPartition {
    let num_of_nodes = graph.num_of_nodes();

    let mut visited = bitvec![usize, Lsb0; 0; num_of_nodes];
    let mut on_stack = bitvec![usize, Lsb0; 0; num_of_nodes];
    let mut index = vec![0usize; num_of_nodes];
    let mut lowlink = vec![0usize; num_of_nodes];

    // Nodes of which the component has not been determined yet.
    let mut stack: Vec<NodeIndex> = Vec::new();
    let mut components = vec![BlockIndex::new(0); num_of_nodes];
    let mut num_of_components = 0;
    let mut counter = 0;

    // The depth first search stack, with the position of the next successor to explore.
    let mut depth_stack: Vec<(NodeIndex, usize)> = Vec::new();

    for root in graph.iter_nodes() {
        if visited[*root] {
            continue;
        }

        depth_stack.push((root, 0));
        while let Some((node, position)) = depth_stack.pop() {
            if position == 0 {
                visited.set(*node, true);
                index[*node] = counter;
                lowlink[*node] = counter;
                counter += 1;

                stack.push(node);
                on_stack.set(*node, true);
            }

            if let Some(&successor) = graph.successors(node).as_slice().get(position) {
                // Revisit this node for its next successor afterwards.
                depth_stack.push((node, position + 1));

                if !visited[*successor] {
                    depth_stack.push((successor, 0));
                } else if on_stack[*successor] {
                    lowlink[*node] = lowlink[*node].min(index[*successor]);
                }
                continue;
            }

            // All successors have been explored, so the node is finished.
            if lowlink[*node] == index[*node] {
                let component = BlockIndex::new(num_of_components);
                num_of_components += 1;

                while let Some(member) = stack.pop() {
                    on_stack.set(*member, false);
                    components[*member] = component;

                    if member == node {
                        break;
                    }
                }
            }

            if let Some(&(parent, _)) = depth_stack.last() {
                lowlink[*parent] = lowlink[*parent].min(lowlink[*node]);
            }
        }
    }

    let partition = IndexedPartition::from_blocks(components).normalise();
    trace!("Strongly connected components: {partition:?}");
    partition
}
