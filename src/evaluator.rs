use std::collections::HashSet;

use crate::course::Course;
use crate::term::{Node, Op, Term};

/// Whether the given taken courses satisfy the prerequisite tree: every
/// child of an AND node, at least one child of an OR node, and membership
/// in the taken-set for a course leaf.
///
/// A pure recursive walk; short-circuits but does not depend on order.
pub fn valid(tree: &Term<Course>, taken: &HashSet<Course>) -> bool {
    let satisfied = |child: &Node<Course>| match child {
        Node::Leaf(course) => taken.contains(course),
        Node::Term(term) => valid(term, taken),
    };
    match tree.op() {
        Op::And => tree.iter().all(satisfied),
        Op::Or => tree.iter().any(satisfied),
    }
}
