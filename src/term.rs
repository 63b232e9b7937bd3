use std::fmt;
use std::slice;
use std::str::FromStr;

use thiserror::Error;

/// Violations of the structural invariants of a [`Term`].
///
/// These indicate a defect in tree construction, not bad external input;
/// the parser never produces either case.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TermError {
    #[error("operator {0:?} is not valid")]
    InvalidOperator(String),
    #[error("a term cannot have zero children")]
    Empty,
}

/// The boolean operator carried by a term node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    And,
    Or,
}

impl Op {
    pub fn as_str(self) -> &'static str {
        match self {
            Op::And => "and",
            Op::Or => "or",
        }
    }
}

impl FromStr for Op {
    type Err = TermError;

    fn from_str(s: &str) -> Result<Op, TermError> {
        match s {
            "and" => Ok(Op::And),
            "or" => Ok(Op::Or),
            other => Err(TermError::InvalidOperator(other.to_string())),
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A child of a term: either a bare leaf or a nested term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node<L> {
    Leaf(L),
    Term(Term<L>),
}

impl<L: fmt::Display> fmt::Display for Node<L> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Node::Leaf(leaf) => write!(f, "{}", leaf),
            Node::Term(term) => write!(f, "{}", term),
        }
    }
}

/// An n-ary boolean tree over leaves of type `L`, represented as an
/// abstract syntax tree.
///
/// A term always has at least one child and never changes after
/// construction; transforms return new trees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term<L> {
    op: Op,
    children: Vec<Node<L>>,
}

impl<L> Term<L> {
    /// Builds a term, enforcing the non-empty-children invariant.
    pub fn new(op: Op, children: Vec<Node<L>>) -> Result<Term<L>, TermError> {
        if children.is_empty() {
            return Err(TermError::Empty);
        }
        Ok(Term { op, children })
    }

    // Internal constructor for paths where non-emptiness already holds.
    pub(crate) fn nary(op: Op, children: Vec<Node<L>>) -> Term<L> {
        debug_assert!(!children.is_empty());
        Term { op, children }
    }

    pub fn op(&self) -> Op {
        self.op
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn children(&self) -> &[Node<L>] {
        &self.children
    }

    pub fn iter(&self) -> slice::Iter<Node<L>> {
        self.children.iter()
    }
}

impl<'a, L> IntoIterator for &'a Term<L> {
    type Item = &'a Node<L>;
    type IntoIter = slice::Iter<'a, Node<L>>;

    fn into_iter(self) -> Self::IntoIter {
        self.children.iter()
    }
}

impl<L: Clone> Term<L> {
    /// Returns an equivalent condensed tree: children that are terms with
    /// the same operator as their parent are spliced into the parent's
    /// child list, preserving order. Idempotent.
    pub fn collapse(&self) -> Term<L> {
        let mut children = Vec::with_capacity(self.children.len());
        for child in &self.children {
            match child {
                Node::Leaf(leaf) => children.push(Node::Leaf(leaf.clone())),
                Node::Term(term) => {
                    let term = term.collapse();
                    if term.op == self.op {
                        children.extend(term.children);
                    } else {
                        children.push(Node::Term(term));
                    }
                }
            }
        }
        Term::nary(self.op, children)
    }

    /// Returns an equivalent strictly left-associative binary tree.
    ///
    /// A singleton term rewrites to its sole child, so the result is a
    /// [`Node`] rather than a [`Term`].
    pub fn binary(&self) -> Node<L> {
        let mut tree = Self::binary_node(&self.children[0]);
        for child in &self.children[1..] {
            tree = Node::Term(Term::nary(self.op, vec![tree, Self::binary_node(child)]));
        }
        tree
    }

    fn binary_node(node: &Node<L>) -> Node<L> {
        match node {
            Node::Leaf(leaf) => Node::Leaf(leaf.clone()),
            Node::Term(term) => term.binary(),
        }
    }
}

impl<L: fmt::Display> fmt::Display for Term<L> {
    /// Displays the expression in-line with infix notation.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "(")?;
        for (i, child) in self.children.iter().enumerate() {
            if i > 0 {
                write!(f, " {} ", self.op)?;
            }
            write!(f, "{}", child)?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(s: &str) -> Node<&str> {
        Node::Leaf(s)
    }

    #[test]
    fn new_rejects_empty_children() {
        assert_eq!(Term::<&str>::new(Op::And, vec![]), Err(TermError::Empty));
    }

    #[test]
    fn op_from_str() {
        assert_eq!("and".parse(), Ok(Op::And));
        assert_eq!("or".parse(), Ok(Op::Or));
        assert_eq!(
            "xor".parse::<Op>(),
            Err(TermError::InvalidOperator("xor".to_string()))
        );
    }

    #[test]
    fn display_is_infix() {
        let t = Term::new(
            Op::Or,
            vec![
                Node::Term(Term::new(Op::And, vec![leaf("a"), leaf("b")]).unwrap()),
                leaf("c"),
            ],
        )
        .unwrap();
        assert_eq!(t.to_string(), "((a and b) or c)");
    }

    #[test]
    fn collapse_splices_same_operator() {
        let nested = Term::new(
            Op::And,
            vec![
                leaf("a"),
                Node::Term(Term::new(Op::And, vec![leaf("b"), leaf("c")]).unwrap()),
            ],
        )
        .unwrap();
        let flat = nested.collapse();
        assert_eq!(flat.len(), 3);
        assert_eq!(flat.to_string(), "(a and b and c)");
    }

    #[test]
    fn collapse_keeps_mixed_operators() {
        let t = Term::new(
            Op::And,
            vec![
                Node::Term(Term::new(Op::Or, vec![leaf("a"), leaf("b")]).unwrap()),
                leaf("c"),
            ],
        )
        .unwrap();
        assert_eq!(t.collapse(), t);
    }

    #[test]
    fn collapse_is_idempotent() {
        let t = Term::new(
            Op::Or,
            vec![
                Node::Term(
                    Term::new(
                        Op::Or,
                        vec![
                            leaf("a"),
                            Node::Term(Term::new(Op::Or, vec![leaf("b"), leaf("c")]).unwrap()),
                        ],
                    )
                    .unwrap(),
                ),
                Node::Term(Term::new(Op::And, vec![leaf("d"), leaf("e")]).unwrap()),
            ],
        )
        .unwrap();
        let once = t.collapse();
        assert_eq!(once.collapse(), once);
    }

    #[test]
    fn binary_is_left_associative() {
        let t = Term::new(Op::Or, vec![leaf("a"), leaf("b"), leaf("c")]).unwrap();
        assert_eq!(t.binary().to_string(), "((a or b) or c)");
    }

    #[test]
    fn binary_of_singleton_is_the_child() {
        let t = Term::new(Op::And, vec![leaf("a")]).unwrap();
        assert_eq!(t.binary(), leaf("a"));
    }

    #[test]
    fn binary_recurses_into_children() {
        let t = Term::new(
            Op::And,
            vec![
                Node::Term(Term::new(Op::Or, vec![leaf("a"), leaf("b"), leaf("c")]).unwrap()),
                leaf("d"),
            ],
        )
        .unwrap();
        assert_eq!(t.binary().to_string(), "(((a or b) or c) and d)");
    }
}
