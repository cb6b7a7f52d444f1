use std::fmt;

use log::trace;
use rustc_hash::FxHashMap;

use schema_regex::Symbol;
use schema_utilities::TagIndex;
use schema_utilities::VecSet;

/// A unique type for the states.
pub struct StateTag;

/// The index for a state.
pub type StateIndex = TagIndex<usize, StateTag>;

/// The virtual state that precedes the first symbol of every sequence.
const START_STATE: StateIndex = StateIndex::new(0);

/// The virtual state that follows the last symbol of every sequence.
const END_STATE: StateIndex = StateIndex::new(1);

/// The number of virtual states, the learned states are numbered after them.
const NUM_OF_ANCHORS: usize = 2;

/// A single occurrence automaton (SOA) summarises a set of example sequences.
///
/// Every distinct symbol is represented by exactly one state, and there is an
/// edge between two states whenever the corresponding symbols occurred next to
/// each other in one of the examples. The virtual start and end states are
/// connected to the first and last symbol of every example.
///
/// The states are stored in an arena and addressed by [StateIndex]; learned
/// states are numbered in the order in which their symbols were first seen.
#[derive(Clone)]
pub struct SingleOccurrenceAutomaton<S> {
    states: Vec<State<S>>,

    /// Maps every learned symbol to its unique state.
    symbol_to_state: FxHashMap<S, StateIndex>,

    num_of_edges: usize,
    num_of_sequences: usize,
}

/// A state of the automaton with its incoming and outgoing edges.
#[derive(Clone, Debug)]
struct State<S> {
    /// The symbol of a learned state, the anchors have no symbol.
    symbol: Option<S>,
    predecessors: VecSet<StateIndex>,
    successors: VecSet<StateIndex>,

    /// The number of times the symbol occurred in all learned sequences.
    occurrences: usize,
}

impl<S> State<S> {
    fn new(symbol: Option<S>) -> Self {
        Self {
            symbol,
            predecessors: VecSet::new(),
            successors: VecSet::new(),
            occurrences: 0,
        }
    }
}

impl<S: Symbol> SingleOccurrenceAutomaton<S> {
    /// Creates an automaton without any learned states.
    pub fn new() -> Self {
        Self {
            states: vec![State::new(None), State::new(None)],
            symbol_to_state: FxHashMap::default(),
            num_of_edges: 0,
            num_of_sequences: 0,
        }
    }

    /// Adds the structure of the given example sequence to the automaton.
    ///
    /// Learning is idempotent: learning the same sequence again only changes
    /// the occurrence counts. An empty sequence is ignored.
    pub fn learn<I>(&mut self, sequence: I)
    where
        I: IntoIterator<Item = S>,
    {
        let mut previous = START_STATE;

        for symbol in sequence {
            let state = self.state_or_insert(symbol);
            self.states[*state].occurrences += 1;

            self.add_edge(previous, state);
            previous = state;
        }

        if previous == START_STATE {
            return;
        }

        self.add_edge(previous, END_STATE);
        self.num_of_sequences += 1;
    }

    /// Returns the state of the given symbol, if it has been learned.
    pub fn state_of(&self, symbol: &S) -> Option<StateIndex> {
        self.symbol_to_state.get(symbol).copied()
    }

    /// Returns the state for the given symbol, a new state is introduced when
    /// the symbol has not been seen before.
    fn state_or_insert(&mut self, symbol: S) -> StateIndex {
        if let Some(state) = self.state_of(&symbol) {
            return state;
        }

        let state = StateIndex::new(self.states.len());
        trace!("New state {state} for symbol {symbol:?}");

        self.symbol_to_state.insert(symbol.clone(), state);
        self.states.push(State::new(Some(symbol)));
        state
    }

    /// Inserts the edge `from -> to`, unless it is already present.
    fn add_edge(&mut self, from: StateIndex, to: StateIndex) {
        if self.states[*from].successors.insert(to) {
            self.states[*to].predecessors.insert(from);
            self.num_of_edges += 1;
        }
    }
}

impl<S> SingleOccurrenceAutomaton<S> {
    /// Returns the virtual state preceding every sequence.
    pub fn start_state(&self) -> StateIndex {
        START_STATE
    }

    /// Returns the virtual state following every sequence.
    pub fn end_state(&self) -> StateIndex {
        END_STATE
    }

    /// Returns true iff the given state is the start or the end state.
    pub fn is_anchor(&self, state: StateIndex) -> bool {
        *state < NUM_OF_ANCHORS
    }

    /// Iterate over the learned states, in the order in which their symbols were first seen.
    pub fn states(&self) -> impl Iterator<Item = StateIndex> + '_ {
        (NUM_OF_ANCHORS..self.states.len()).map(StateIndex::new)
    }

    /// Returns the number of learned states, the anchors are not counted.
    pub fn num_of_states(&self) -> usize {
        self.states.len() - NUM_OF_ANCHORS
    }

    /// Returns the number of distinct edges, including those to the anchors.
    pub fn num_of_edges(&self) -> usize {
        self.num_of_edges
    }

    /// Returns the number of non-empty sequences that were learned.
    pub fn num_of_sequences(&self) -> usize {
        self.num_of_sequences
    }

    /// Returns the symbol of the given state, or `None` for the anchors.
    pub fn symbol(&self, state: StateIndex) -> Option<&S> {
        self.states[*state].symbol.as_ref()
    }

    /// Returns the number of times the symbol of the given state occurred in
    /// all learned sequences.
    pub fn occurrences(&self, state: StateIndex) -> usize {
        self.states[*state].occurrences
    }

    /// Returns the states with an edge into the given state.
    pub fn predecessors(&self, state: StateIndex) -> &VecSet<StateIndex> {
        &self.states[*state].predecessors
    }

    /// Returns the states with an edge from the given state.
    pub fn successors(&self, state: StateIndex) -> &VecSet<StateIndex> {
        &self.states[*state].successors
    }

    /// Iterate over all edges `(from, to)`, including the edges to the anchors.
    pub fn iter_edges(&self) -> impl Iterator<Item = (StateIndex, StateIndex)> + '_ {
        self.states.iter().enumerate().flat_map(|(from, state)| {
            state
                .successors
                .iter()
                .map(move |&to| (StateIndex::new(from), to))
        })
    }
}

impl<S: Symbol> Default for SingleOccurrenceAutomaton<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> fmt::Display for SingleOccurrenceAutomaton<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Print some information about the automaton.
        writeln!(f, "Number of sequences: {}", self.num_of_sequences())?;
        writeln!(f, "Number of states: {}", self.num_of_states())?;
        write!(f, "Number of edges: {}", self.num_of_edges())
    }
}

impl<S: fmt::Debug> fmt::Debug for SingleOccurrenceAutomaton<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{self}")?;

        let name = |state: StateIndex| match self.symbol(state) {
            Some(symbol) => format!("{symbol:?}"),
            None if state == START_STATE => "start".to_string(),
            None => "end".to_string(),
        };

        for (from, to) in self.iter_edges() {
            writeln!(f, "{} --> {}", name(from), name(to))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use schema_utilities::vecset;

    use super::*;

    #[test]
    fn test_learn_empty_sequence() {
        let mut automaton = SingleOccurrenceAutomaton::<&str>::new();
        automaton.learn([]);

        assert_eq!(automaton.num_of_states(), 0);
        assert_eq!(automaton.num_of_edges(), 0);
        assert_eq!(automaton.num_of_sequences(), 0);
        assert!(automaton.successors(automaton.start_state()).is_empty());
    }

    #[test]
    fn test_learn_anchors_boundary_states() {
        let mut automaton = SingleOccurrenceAutomaton::new();
        automaton.learn(["a", "b", "c"]);

        let a = automaton.state_of(&"a").unwrap();
        let b = automaton.state_of(&"b").unwrap();
        let c = automaton.state_of(&"c").unwrap();

        assert_eq!(automaton.predecessors(a), &vecset![automaton.start_state()]);
        assert_eq!(automaton.successors(a), &vecset![b]);
        assert_eq!(automaton.predecessors(c), &vecset![b]);
        assert_eq!(automaton.successors(c), &vecset![automaton.end_state()]);
        assert_eq!(automaton.num_of_edges(), 4);
    }

    #[test]
    fn test_learn_twice_is_idempotent() {
        let mut once = SingleOccurrenceAutomaton::new();
        once.learn(["a", "b", "a"]);

        let mut twice = SingleOccurrenceAutomaton::new();
        twice.learn(["a", "b", "a"]);
        twice.learn(["a", "b", "a"]);

        assert_eq!(once.num_of_states(), twice.num_of_states());
        assert_eq!(
            once.iter_edges().collect::<Vec<_>>(),
            twice.iter_edges().collect::<Vec<_>>()
        );

        // Only the counters differ.
        assert_eq!(twice.num_of_sequences(), 2);
        assert_eq!(twice.occurrences(twice.state_of(&"a").unwrap()), 4);
    }

    #[test]
    fn test_single_occurrence() {
        let mut automaton = SingleOccurrenceAutomaton::new();
        automaton.learn(["c", "c", "c", "a"]);
        automaton.learn(["a", "c"]);
        automaton.learn(["c"]);

        assert_eq!(automaton.num_of_states(), 2);

        let c = automaton.state_of(&"c").unwrap();
        assert!(automaton.successors(c).contains(&c), "Repeated symbols introduce a self loop");
        assert_eq!(automaton.occurrences(c), 5);
    }

    #[test]
    fn test_states_in_first_seen_order() {
        let mut automaton = SingleOccurrenceAutomaton::new();
        automaton.learn(["b", "a"]);
        automaton.learn(["c", "a", "b"]);

        let symbols: Vec<&str> = automaton
            .states()
            .map(|state| *automaton.symbol(state).unwrap())
            .collect();
        assert_eq!(symbols, vec!["b", "a", "c"]);

        assert!(automaton.states().all(|state| !automaton.is_anchor(state)));
        assert_eq!(automaton.symbol(automaton.end_state()), None);
    }

    #[test]
    fn test_debug_lists_edges() {
        let mut automaton = SingleOccurrenceAutomaton::new();
        automaton.learn(["a"]);

        let output = format!("{automaton:?}");
        assert!(output.contains("start --> \"a\""));
        assert!(output.contains("\"a\" --> end"));
    }
}
