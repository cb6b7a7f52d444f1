use crate::Regex;
use crate::RegexKind;
use crate::RegexTerm;

/// A bottom-up visitor over a [Regex].
///
/// The children of an expression are visited first, from left to right, and
/// their results are handed to the method for the operator of the parent.
pub trait RegexVisitor<'a, S: 'a> {
    type Output;

    /// Called for every leaf.
    fn visit_symbol(&mut self, symbol: &'a S) -> Self::Output;

    fn visit_sequence(&mut self, children: Vec<Self::Output>) -> Self::Output;

    fn visit_choice(&mut self, children: Vec<Self::Output>) -> Self::Output;

    fn visit_optional(&mut self, child: Self::Output) -> Self::Output;

    fn visit_repeated(&mut self, child: Self::Output) -> Self::Output;
}

/// Applies the given visitor recursively to the expression and returns the
/// result for the root.
pub fn visit<'a, S, V>(regex: &'a Regex<S>, visitor: &mut V) -> V::Output
where
    S: 'a,
    V: RegexVisitor<'a, S>,
{
    match regex.kind() {
        RegexKind::Sequence => {
            let children = visit_children(regex, visitor);
            visitor.visit_sequence(children)
        }
        RegexKind::Choice => {
            let children = visit_children(regex, visitor);
            visitor.visit_choice(children)
        }
        RegexKind::Optional => {
            let child = visit_term(regex.single_child(), visitor);
            visitor.visit_optional(child)
        }
        RegexKind::Repeated => {
            let child = visit_term(regex.single_child(), visitor);
            visitor.visit_repeated(child)
        }
    }
}

/// Applies the visitor to a single child.
pub fn visit_term<'a, S, V>(term: &'a RegexTerm<S>, visitor: &mut V) -> V::Output
where
    S: 'a,
    V: RegexVisitor<'a, S>,
{
    match term {
        RegexTerm::Leaf(symbol) => visitor.visit_symbol(symbol),
        RegexTerm::Node(regex) => visit(regex, visitor),
    }
}

fn visit_children<'a, S, V>(regex: &'a Regex<S>, visitor: &mut V) -> Vec<V::Output>
where
    S: 'a,
    V: RegexVisitor<'a, S>,
{
    regex.children().iter().map(|child| visit_term(child, visitor)).collect()
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    /// Computes the nesting depth of an expression.
    struct DepthVisitor;

    impl<'a, S: 'a> RegexVisitor<'a, S> for DepthVisitor {
        type Output = usize;

        fn visit_symbol(&mut self, _symbol: &'a S) -> usize {
            0
        }

        fn visit_sequence(&mut self, children: Vec<usize>) -> usize {
            children.into_iter().max().unwrap_or(0) + 1
        }

        fn visit_choice(&mut self, children: Vec<usize>) -> usize {
            children.into_iter().max().unwrap_or(0) + 1
        }

        fn visit_optional(&mut self, child: usize) -> usize {
            child + 1
        }

        fn visit_repeated(&mut self, child: usize) -> usize {
            child + 1
        }
    }

    #[test]
    fn test_visit_depth() {
        let regex: Regex<&str> = Regex::sequence([
            Regex::repeated([Regex::choice(["a", "b"])]),
            Regex::repeated(["c"]),
        ]);

        assert_eq!(visit(&regex, &mut DepthVisitor), 3);

        let empty: Regex<&str> = Regex::sequence(Vec::<RegexTerm<&str>>::new());
        assert_eq!(visit(&empty, &mut DepthVisitor), 1);
    }
}
