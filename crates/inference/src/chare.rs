use log::debug;
use log::trace;
use rustc_hash::FxHashMap;

use schema_regex::Regex;
use schema_regex::RegexTerm;
use schema_regex::Symbol;
use schema_soa::SingleOccurrenceAutomaton;
use schema_soa::StateIndex;
use schema_utilities::VecSet;

use crate::BlockIndex;
use crate::Graph;
use crate::IndexedPartition;
use crate::NodeIndex;
use crate::Partition;
use crate::Reachability;
use crate::compute_reachability;
use crate::scc_decomposition;
use crate::sort_topological;

/// Converts the automaton into a sequence of repeated slots.
///
/// A slot is a set of symbols that are interchangeable in the examples, it
/// becomes the bare symbol when it contains a single symbol and a choice
/// otherwise, ordered by the time the symbols were first learned. Every slot
/// is repeated since a finite set of examples does not tell how often a
/// position may occur. The slots are sequenced in a topological order of the
/// automaton, ties are broken by the earliest learned symbol of the slot.
///
/// The root of the result is always a sequence, and it has no children when
/// the automaton has not learned any symbols.
pub fn chare_convert<S: Symbol>(automaton: &SingleOccurrenceAutomaton<S>) -> Regex<S> {
    let start = std::time::Instant::now();
    trace!("{automaton:?}");

    // The i-th node of the graph is the i-th learned state.
    let states: Vec<StateIndex> = automaton.states().collect();
    let graph = Graph::from_automaton(automaton);

    let slots = compute_slots(&graph);
    let slot_graph = graph.quotient(&slots);

    // Nodes are numbered in first-seen order, so the first member is the earliest learned symbol.
    let members = slots.blocks();
    let order = sort_topological(&slot_graph, |slot| members[*slot][0])
        .expect("The slots of a single occurrence automaton form an acyclic graph");

    let factors: Vec<Regex<S>> = order
        .into_iter()
        .map(|slot| {
            let content: RegexTerm<S> = match members[*slot].as_slice() {
                [node] => RegexTerm::Leaf(slot_symbol(automaton, states[**node])),
                nodes => RegexTerm::Node(Regex::choice(
                    nodes.iter().map(|node| slot_symbol(automaton, states[**node])),
                )),
            };

            Regex::<S>::repeated([content])
        })
        .collect();

    debug!(
        "Converted {} states into {} slots",
        graph.num_of_nodes(),
        slots.num_of_blocks()
    );
    debug!("Time chare_convert: {:.3}s", start.elapsed().as_secs_f64());

    Regex::sequence(factors)
}

/// Partitions the nodes of the graph into slots of interchangeable nodes.
///
/// Nodes that reach each other always share a slot. Furthermore, two of the
/// resulting components share a slot when neither reaches the other and they
/// have the same predecessor and successor components.
///
/// The slots are numbered in the order of their smallest node.
pub fn compute_slots(graph: &Graph) -> IndexedPartition {
    let components = scc_decomposition(graph);
    let component_graph = graph.quotient(&components);
    let reachability = compute_reachability(&component_graph);

    // The slots created so far, as lists of components.
    let mut slots: Vec<Vec<NodeIndex>> = Vec::new();
    let mut signatures: FxHashMap<(&VecSet<NodeIndex>, &VecSet<NodeIndex>), Vec<BlockIndex>> = FxHashMap::default();
    let mut component_to_slot = Vec::with_capacity(component_graph.num_of_nodes());

    // The components are numbered by their smallest node, so the slots are as well.
    for component in component_graph.iter_nodes() {
        let signature = (
            component_graph.predecessors(component),
            component_graph.successors(component),
        );
        let candidates = signatures.entry(signature).or_default();

        let existing = candidates
            .iter()
            .copied()
            .find(|slot| is_independent(&reachability, &slots[**slot], component));

        let slot = match existing {
            Some(slot) => slot,
            None => {
                let slot = BlockIndex::new(slots.len());
                slots.push(Vec::new());
                candidates.push(slot);
                slot
            }
        };

        slots[*slot].push(component);
        component_to_slot.push(slot);
    }

    let slots = components.compose(&IndexedPartition::from_blocks(component_to_slot));
    trace!("Slots: {slots:?}");
    slots
}

/// Returns true iff the component does not reach and is not reached by any of the given components.
fn is_independent(reachability: &Reachability, components: &[NodeIndex], component: NodeIndex) -> bool {
    components
        .iter()
        .all(|&other| reachability.is_incomparable(other, component))
}

/// Returns the symbol of a learned state.
fn slot_symbol<S: Symbol>(automaton: &SingleOccurrenceAutomaton<S>, state: StateIndex) -> S {
    automaton
        .symbol(state)
        .cloned()
        .expect("Only learned states are part of a slot")
}
