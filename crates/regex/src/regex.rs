use std::fmt;
use std::hash::Hash;

use crate::RegexVisitor;
use crate::visit;

/// The requirements on the symbols that occur in the learned sequences and in
/// the leaves of a regular expression.
pub trait Symbol: Clone + Eq + Hash + fmt::Debug {}

impl<T: Clone + Eq + Hash + fmt::Debug> Symbol for T {}

/// The operator at the root of a [Regex].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RegexKind {
    /// Ordered concatenation of the children.
    Sequence,
    /// Mutually exclusive alternation of the children.
    Choice,
    /// Zero or one occurrence of the single child.
    Optional,
    /// Zero or more occurrences of the single child.
    Repeated,
}

/// A child of a [Regex], either a literal symbol or a nested expression.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum RegexTerm<S> {
    Leaf(S),
    Node(Regex<S>),
}

/// A regular expression over symbols `S`.
///
/// Expressions are immutable once constructed. Equality is structural: two
/// expressions are equal iff they have the same kind and pairwise equal
/// children, in the same order. This also holds for [RegexKind::Choice], the
/// order of alternatives is fixed when the expression is constructed.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Regex<S> {
    kind: RegexKind,
    children: Vec<RegexTerm<S>>,
}

impl<S> Regex<S> {
    /// Creates the concatenation of the given children.
    pub fn sequence<I, T>(children: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<RegexTerm<S>>,
    {
        Self::new(RegexKind::Sequence, children)
    }

    /// Creates the alternation of the given children.
    pub fn choice<I, T>(children: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<RegexTerm<S>>,
    {
        Self::new(RegexKind::Choice, children)
    }

    /// Creates `child?`, the given children must consist of exactly one element.
    pub fn optional<I, T>(children: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<RegexTerm<S>>,
    {
        Self::new(RegexKind::Optional, children)
    }

    /// Creates `child*`, the given children must consist of exactly one element.
    pub fn repeated<I, T>(children: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<RegexTerm<S>>,
    {
        Self::new(RegexKind::Repeated, children)
    }

    /// Creates an expression with the given kind and children.
    ///
    /// # Panics
    ///
    /// When an optional or repeated expression does not have exactly one child.
    pub fn new<I, T>(kind: RegexKind, children: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<RegexTerm<S>>,
    {
        let children: Vec<RegexTerm<S>> = children.into_iter().map(Into::into).collect();

        if matches!(kind, RegexKind::Optional | RegexKind::Repeated) {
            assert_eq!(
                children.len(),
                1,
                "A {kind:?} expression must have exactly one child"
            );
        }

        Self { kind, children }
    }

    /// Returns the operator of this expression.
    pub fn kind(&self) -> RegexKind {
        self.kind
    }

    /// Returns the children in their original order.
    pub fn children(&self) -> &[RegexTerm<S>] {
        &self.children
    }

    /// Returns the operand of an optional or repeated expression.
    pub(crate) fn single_child(&self) -> &RegexTerm<S> {
        debug_assert_eq!(self.children.len(), 1, "{:?} should have exactly one child", self.kind);
        &self.children[0]
    }

    /// Returns all symbols occurring in the expression, from left to right.
    pub fn symbols(&self) -> Vec<&S> {
        visit(self, &mut SymbolCollector)
    }
}

impl<S> From<S> for RegexTerm<S> {
    fn from(symbol: S) -> Self {
        RegexTerm::Leaf(symbol)
    }
}

impl<S> From<Regex<S>> for RegexTerm<S> {
    fn from(regex: Regex<S>) -> Self {
        RegexTerm::Node(regex)
    }
}

/// Gathers the leaves of an expression.
struct SymbolCollector;

impl<'a, S: 'a> RegexVisitor<'a, S> for SymbolCollector {
    type Output = Vec<&'a S>;

    fn visit_symbol(&mut self, symbol: &'a S) -> Self::Output {
        vec![symbol]
    }

    fn visit_sequence(&mut self, children: Vec<Self::Output>) -> Self::Output {
        children.concat()
    }

    fn visit_choice(&mut self, children: Vec<Self::Output>) -> Self::Output {
        children.concat()
    }

    fn visit_optional(&mut self, child: Self::Output) -> Self::Output {
        child
    }

    fn visit_repeated(&mut self, child: Self::Output) -> Self::Output {
        child
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    #[test]
    fn test_structural_equality() {
        let left: Regex<&str> = Regex::sequence([Regex::repeated([Regex::choice(["a", "b"])])]);
        let right: Regex<&str> = Regex::sequence([Regex::repeated([Regex::choice(["a", "b"])])]);
        assert_eq!(left, right);

        // The order of the alternatives matters.
        let swapped: Regex<&str> = Regex::sequence([Regex::repeated([Regex::choice(["b", "a"])])]);
        assert_ne!(left, swapped);

        // The kind matters.
        let optional: Regex<&str> = Regex::sequence([Regex::optional([Regex::choice(["a", "b"])])]);
        assert_ne!(left, optional);
    }

    #[test]
    fn test_leaf_differs_from_nested_sequence() {
        let leaf: Regex<&str> = Regex::sequence(["a"]);
        let nested: Regex<&str> = Regex::sequence([Regex::sequence(["a"])]);
        assert_ne!(leaf, nested);
    }

    #[test]
    fn test_symbols_in_order() {
        let regex: Regex<&str> = Regex::sequence([
            RegexTerm::Leaf("x"),
            RegexTerm::Node(Regex::repeated([Regex::choice(["a", "b"])])),
            RegexTerm::Node(Regex::optional(["c"])),
        ]);

        assert_eq!(regex.symbols(), vec![&"x", &"a", &"b", &"c"]);
        assert_eq!(regex.kind(), RegexKind::Sequence);
        assert_eq!(regex.children().len(), 3);
    }

    #[test]
    #[should_panic]
    fn test_repeated_requires_single_child() {
        let _: Regex<&str> = Regex::repeated(["a", "b"]);
    }
}
