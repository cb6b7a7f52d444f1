use std::cmp::Reverse;
use std::collections::BinaryHeap;

use log::trace;
use thiserror::Error;

use schema_utilities::is_valid_permutation;

use crate::Graph;
use crate::NodeIndex;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TopologicalSortError {
    #[error("The graph contains a cycle through node {0}")]
    Cycle(NodeIndex),
}

/// Returns a topological ordering of the nodes of the given graph.
///
/// Among the nodes whose predecessors have all been placed, the node with the
/// smallest priority comes first, and ties are broken by the node index. The
/// result is therefore fully determined by the graph and the priorities.
///
/// An error is returned if the graph contains a cycle, self loops included.
pub fn sort_topological<K, F>(graph: &Graph, priority: F) -> Result<Vec<NodeIndex>, TopologicalSortError>
where
    K: Ord,
    F: Fn(NodeIndex) -> K,
{
    let mut in_degree: Vec<usize> = graph
        .iter_nodes()
        .map(|node| graph.predecessors(node).len())
        .collect();

    let mut ready: BinaryHeap<Reverse<(K, NodeIndex)>> = graph
        .iter_nodes()
        .filter(|node| in_degree[**node] == 0)
        .map(|node| Reverse((priority(node), node)))
        .collect();

    let mut order = Vec::with_capacity(graph.num_of_nodes());
    while let Some(Reverse((_, node))) = ready.pop() {
        order.push(node);

        for &successor in graph.successors(node) {
            in_degree[*successor] -= 1;
            if in_degree[*successor] == 0 {
                ready.push(Reverse((priority(successor), successor)));
            }
        }
    }

    if let Some(node) = graph.iter_nodes().find(|node| in_degree[**node] > 0) {
        trace!("There is a cycle through node {node} in {graph:?}");
        return Err(TopologicalSortError::Cycle(node));
    }

    trace!("Topological order: {order:?}");
    debug_assert!(
        is_topologically_sorted(graph, &order),
        "The order {order:?} is not a valid topological ordering of the nodes of the given graph: {graph:?}"
    );

    Ok(order)
}

/// Returns true iff the given order contains every node exactly once, and
/// every node appears before its successors.
pub fn is_topologically_sorted(graph: &Graph, order: &[NodeIndex]) -> bool {
    if order.len() != graph.num_of_nodes() {
        return false;
    }

    let mut position = vec![usize::MAX; graph.num_of_nodes()];
    for (i, node) in order.iter().enumerate() {
        position[**node] = i;
    }

    if !is_valid_permutation(|i| position[i], graph.num_of_nodes()) {
        return false;
    }

    // Check that each node appears before its successors.
    graph
        .iter_edges()
        .all(|(from, to)| position[*from] < position[*to])
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use schema_soa::SingleOccurrenceAutomaton;
    use schema_soa::random_sequences;
    use schema_utilities::random_test;

    use crate::scc_decomposition;

    use super::*;

    #[test]
    fn test_sort_topological_priority() {
        let node = NodeIndex::new;
        // 0 -> 3, 1 -> 2, both 0 and 1 are initially ready.
        let graph = Graph::new(4, [(node(0), node(3)), (node(1), node(2))]);

        let order = sort_topological(&graph, |node| *node).unwrap();
        assert_eq!(order, vec![node(0), node(1), node(2), node(3)]);

        // Reversing the priorities places the other chain first.
        let order = sort_topological(&graph, |node| Reverse(*node)).unwrap();
        assert_eq!(order, vec![node(1), node(2), node(0), node(3)]);
    }

    #[test]
    fn test_sort_topological_cycle() {
        let node = NodeIndex::new;
        let graph = Graph::new(3, [(node(0), node(1)), (node(1), node(2)), (node(2), node(1))]);

        assert_eq!(
            sort_topological(&graph, |node| *node),
            Err(TopologicalSortError::Cycle(node(1)))
        );

        let self_loop = Graph::new(1, [(node(0), node(0))]);
        assert!(sort_topological(&self_loop, |node| *node).is_err());
    }

    #[test]
    fn test_random_sort_topological_components() {
        random_test(100, |rng| {
            let mut automaton = SingleOccurrenceAutomaton::new();
            for sequence in random_sequences(rng, 6, 10, 5) {
                automaton.learn(sequence);
            }

            let graph = Graph::from_automaton(&automaton);
            let quotient = graph.quotient(&scc_decomposition(&graph));

            let order = sort_topological(&quotient, |node| *node).unwrap();
            assert!(is_topologically_sorted(&quotient, &order));
        });
    }
}
