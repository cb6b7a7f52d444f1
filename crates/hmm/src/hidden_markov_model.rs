use log::debug;
use rand::Rng;
use thiserror::Error;

/// The resolution with which random probabilities are drawn.
const GRANULARITY: f64 = 10000.0;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ModelError {
    #[error("Index {index} is out of range, it must be below {bound}")]
    OutOfRange { index: usize, bound: usize },
}

/// A hidden Markov model with a start distribution over the states, a
/// transition matrix between the states and an emission matrix from states to
/// labels. Every row of both matrices, and the start distribution, sums to one.
#[derive(Clone, Debug)]
pub struct HiddenMarkovModel<L> {
    labels: Vec<L>,
    start: Vec<f64>,

    /// The adjacency matrix with transition probabilities, indexed by `[from][to]`.
    transition: Vec<Vec<f64>>,

    /// The emission probabilities, indexed by `[state][label]`.
    emission: Vec<Vec<f64>>,
}

impl<L> HiddenMarkovModel<L> {
    /// Creates a model with the given number of states that emits the given
    /// labels. All distributions are uniform.
    ///
    /// # Panics
    ///
    /// When there are no states or no labels.
    pub fn new(num_of_states: usize, labels: impl IntoIterator<Item = L>) -> Self {
        let labels: Vec<L> = labels.into_iter().collect();
        assert!(num_of_states > 0, "A hidden Markov model must have at least one state");
        assert!(!labels.is_empty(), "A hidden Markov model must have at least one label");

        let uniform_state = 1.0 / num_of_states as f64;
        let uniform_label = 1.0 / labels.len() as f64;

        Self {
            start: vec![uniform_state; num_of_states],
            transition: vec![vec![uniform_state; num_of_states]; num_of_states],
            emission: vec![vec![uniform_label; labels.len()]; num_of_states],
            labels,
        }
    }

    /// Returns the probability of moving from state `x` to state `y`.
    pub fn transition(&self, x: usize, y: usize) -> Result<f64, ModelError> {
        let row = self.transition.get(x).ok_or(ModelError::OutOfRange {
            index: x,
            bound: self.num_of_states(),
        })?;

        row.get(y).copied().ok_or(ModelError::OutOfRange {
            index: y,
            bound: self.num_of_states(),
        })
    }

    /// Returns the probability that state `state` emits the label with index `label`.
    pub fn emission(&self, state: usize, label: usize) -> Result<f64, ModelError> {
        let row = self.emission.get(state).ok_or(ModelError::OutOfRange {
            index: state,
            bound: self.num_of_states(),
        })?;

        row.get(label).copied().ok_or(ModelError::OutOfRange {
            index: label,
            bound: self.num_of_labels(),
        })
    }

    /// Returns the probability of starting in the given state.
    pub fn start(&self, state: usize) -> Result<f64, ModelError> {
        self.start.get(state).copied().ok_or(ModelError::OutOfRange {
            index: state,
            bound: self.num_of_states(),
        })
    }

    /// Returns the label with the given index.
    pub fn label(&self, x: usize) -> Result<&L, ModelError> {
        self.labels.get(x).ok_or(ModelError::OutOfRange {
            index: x,
            bound: self.num_of_labels(),
        })
    }

    /// Returns the labels of the model.
    pub fn labels(&self) -> &[L] {
        &self.labels
    }

    /// Returns the number of states, the dimension of the model.
    pub fn num_of_states(&self) -> usize {
        self.transition.len()
    }

    /// Returns the number of labels.
    pub fn num_of_labels(&self) -> usize {
        self.labels.len()
    }

    /// Replaces all distributions of the model by random distributions drawn
    /// from the given generator.
    pub fn randomize(&mut self, rng: &mut impl Rng) {
        let num_of_states = self.num_of_states();
        let num_of_labels = self.num_of_labels();

        for row in &mut self.transition {
            *row = random_distribution(rng, num_of_states);
        }

        for row in &mut self.emission {
            *row = random_distribution(rng, num_of_labels);
        }

        self.start = random_distribution(rng, num_of_states);
        debug!("Randomized a model with {num_of_states} states and {num_of_labels} labels");
    }
}

/// Returns `size` random probabilities that sum up to one.
///
/// Every value is drawn uniformly from the probability mass that is left, in
/// steps of `1 / GRANULARITY`, and the last value takes the remainder.
fn random_distribution(rng: &mut impl Rng, size: usize) -> Vec<f64> {
    let mut distribution = Vec::with_capacity(size);
    let mut left = 1.0;

    for _ in 1..size {
        let steps = (left * GRANULARITY).floor().max(0.0) as u64;
        let value = rng.random_range(0..=steps) as f64 / GRANULARITY;

        distribution.push(value);
        left = (left - value).max(0.0);
    }

    if size > 0 {
        distribution.push(left);
    }

    distribution
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use test_log::test;

    use schema_utilities::random_test;

    use super::*;

    fn assert_distribution(values: impl IntoIterator<Item = f64>) {
        let values: Vec<f64> = values.into_iter().collect();
        assert!(values.iter().all(|&value| (0.0..=1.0).contains(&value)), "{values:?}");

        let sum: f64 = values.iter().sum();
        assert!((sum - 1.0).abs() < 1e-9, "Probabilities {values:?} sum to {sum}");
    }

    fn assert_stochastic(model: &HiddenMarkovModel<&str>) {
        for x in 0..model.num_of_states() {
            assert_distribution((0..model.num_of_states()).map(|y| model.transition(x, y).unwrap()));
            assert_distribution((0..model.num_of_labels()).map(|label| model.emission(x, label).unwrap()));
        }

        assert_distribution((0..model.num_of_states()).map(|x| model.start(x).unwrap()));
    }

    #[test]
    fn test_uniform_model() {
        let model = HiddenMarkovModel::new(4, ["a", "b"]);

        assert_eq!(model.num_of_states(), 4);
        assert_eq!(model.transition(1, 3), Ok(0.25));
        assert_eq!(model.emission(2, 1), Ok(0.5));
        assert_eq!(model.label(1), Ok(&"b"));
        assert_eq!(model.labels(), &["a", "b"]);
        assert_eq!(model.num_of_labels(), 2);
        assert_stochastic(&model);
    }

    #[test]
    fn test_out_of_range() {
        let model = HiddenMarkovModel::new(2, ["a", "b", "c"]);

        assert_eq!(model.transition(2, 0), Err(ModelError::OutOfRange { index: 2, bound: 2 }));
        assert_eq!(model.transition(0, 5), Err(ModelError::OutOfRange { index: 5, bound: 2 }));
        assert_eq!(model.label(3), Err(ModelError::OutOfRange { index: 3, bound: 3 }));
        assert!(model.emission(1, 3).is_err());
        assert!(model.start(2).is_err());

        // Labels are bounded by the number of labels, not by the number of states.
        assert_eq!(model.label(2), Ok(&"c"));
    }

    #[test]
    fn test_random_model_is_stochastic() {
        random_test(100, |rng| {
            let mut model = HiddenMarkovModel::new(rng.random_range(1..8), ["a", "b", "c", "d"]);
            model.randomize(rng);

            assert_stochastic(&model);
        });
    }

    #[test]
    fn test_randomize_is_reproducible() {
        let mut first = HiddenMarkovModel::new(3, ["a", "b"]);
        first.randomize(&mut StdRng::seed_from_u64(42));

        let mut second = HiddenMarkovModel::new(3, ["a", "b"]);
        second.randomize(&mut StdRng::seed_from_u64(42));

        for x in 0..3 {
            for y in 0..3 {
                assert_eq!(first.transition(x, y), second.transition(x, y));
            }
        }
    }

    #[test]
    #[should_panic]
    fn test_model_without_states() {
        let _ = HiddenMarkovModel::new(0, ["a"]);
    }
}
