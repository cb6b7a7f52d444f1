use std::fmt;

use itertools::Itertools;

use crate::Regex;
use crate::RegexTerm;
use crate::RegexVisitor;
use crate::visit;

/// Renders an expression in the canonical textual form:
///
/// - a sequence as `( a b )`, with the children separated by a single space,
/// - a choice as `( a + b )`,
/// - an optional expression as `a?` and a repeated expression as `a*`.
///
/// Only sequences and choices introduce parentheses. An empty sequence renders
/// as `(  )`.
pub struct StringVisitor;

impl<'a, S: fmt::Display + 'a> RegexVisitor<'a, S> for StringVisitor {
    type Output = String;

    fn visit_symbol(&mut self, symbol: &'a S) -> String {
        symbol.to_string()
    }

    fn visit_sequence(&mut self, children: Vec<String>) -> String {
        format!("( {} )", children.iter().format(" "))
    }

    fn visit_choice(&mut self, children: Vec<String>) -> String {
        format!("( {} )", children.iter().format(" + "))
    }

    fn visit_optional(&mut self, child: String) -> String {
        format!("{child}?")
    }

    fn visit_repeated(&mut self, child: String) -> String {
        format!("{child}*")
    }
}

/// Returns the canonical textual form of the given expression, see [StringVisitor].
pub fn render<S: fmt::Display>(regex: &Regex<S>) -> String {
    visit(regex, &mut StringVisitor)
}

impl<S: fmt::Display> fmt::Display for Regex<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", render(self))
    }
}

impl<S: fmt::Display> fmt::Display for RegexTerm<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegexTerm::Leaf(symbol) => write!(f, "{symbol}"),
            RegexTerm::Node(regex) => write!(f, "{regex}"),
        }
    }
}
