use rand::Rng;

/// Generates `num_of_sequences` random example sequences over the first
/// `num_of_symbols` lower case letters. Every sequence has a length in
/// `0..=max_length`, so empty sequences are generated as well.
pub fn random_sequences(
    rng: &mut impl Rng,
    num_of_sequences: usize,
    num_of_symbols: usize,
    max_length: usize,
) -> Vec<Vec<String>> {
    assert!(
        (1..=26).contains(&num_of_symbols),
        "Only alphabetic symbols are supported, requested {num_of_symbols}"
    );

    let symbols: Vec<String> = (b'a'..b'a' + num_of_symbols as u8)
        .map(|letter| char::from(letter).to_string())
        .collect();

    (0..num_of_sequences)
        .map(|_| {
            let length = rng.random_range(0..=max_length);
            (0..length)
                .map(|_| symbols[rng.random_range(0..symbols.len())].clone())
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use schema_utilities::random_test;

    use crate::SingleOccurrenceAutomaton;

    use super::*;

    #[test]
    fn test_random_sequences_single_occurrence() {
        random_test(100, |rng| {
            let sequences = random_sequences(rng, 10, 5, 6);
            assert_eq!(sequences.len(), 10);

            let mut automaton = SingleOccurrenceAutomaton::new();
            for sequence in &sequences {
                automaton.learn(sequence.iter().cloned());
            }

            // Every distinct symbol has exactly one state.
            let mut distinct: Vec<&String> = sequences.iter().flatten().collect();
            distinct.sort();
            distinct.dedup();
            assert_eq!(automaton.num_of_states(), distinct.len());

            for symbol in distinct {
                let state = automaton.state_of(symbol).unwrap();
                assert_eq!(automaton.symbol(state), Some(symbol));
            }

            // The neighbour relations are each other's inverse.
            for (from, to) in automaton.iter_edges() {
                assert!(automaton.predecessors(to).contains(&from));
            }
        });
    }
}
