use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::evaluator;
use crate::parse::{self, ParseError};
use crate::term::{Node, Op, Term};

/// Errors raised while decoding course leaves or list entries.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CourseError {
    #[error("malformed leaf {0:?}: expected at least 5 whitespace-delimited fields")]
    MalformedLeaf(String),
    #[error("malformed course {0:?}: expected \"DEPT CODE\"")]
    MalformedCourse(String),
}

/// Errors raised while building a course-aware prerequisite tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PrereqError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Course(#[from] CourseError),
}

/// A course, identified by a department and course code pair.
///
/// Equality and hashing follow the canonical rendering `"DEPT CODE"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Course {
    department: String,
    code: String,
}

impl Course {
    pub fn new(department: &str, code: &str) -> Course {
        Course {
            department: department.to_string(),
            code: code.to_string(),
        }
    }

    /// Decodes a raw registration record. The record carries metadata
    /// fields ahead of the course itself; the department and code sit at
    /// fields 3 and 4. This format is an upstream contract, not something
    /// to validate further.
    pub fn from_record(raw: &str) -> Result<Course, CourseError> {
        let fields: Vec<&str> = raw.split_whitespace().collect();
        if fields.len() < 5 {
            return Err(CourseError::MalformedLeaf(raw.to_string()));
        }
        Ok(Course::new(fields[3], fields[4]))
    }

    pub fn department(&self) -> &str {
        &self.department
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    /// Whether the course is at the undergraduate level, i.e. its code
    /// starts with a digit below 5.
    pub fn undergrad(&self) -> bool {
        self.code
            .chars()
            .next()
            .and_then(|c| c.to_digit(10))
            .map_or(false, |d| d < 5)
    }
}

impl FromStr for Course {
    type Err = CourseError;

    /// Parses the canonical `"DEPT CODE"` rendering, the format of prune
    /// and taken list entries.
    fn from_str(s: &str) -> Result<Course, CourseError> {
        let mut fields = s.split_whitespace();
        match (fields.next(), fields.next(), fields.next()) {
            (Some(department), Some(code), None) => Ok(Course::new(department, code)),
            _ => Err(CourseError::MalformedCourse(s.to_string())),
        }
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.department, self.code)
    }
}

/// Builds a course set from `"DEPT CODE"` lines, e.g. a loaded prune or
/// taken list.
pub fn course_set(lines: &[String]) -> Result<HashSet<Course>, CourseError> {
    lines.iter().map(|line| line.parse()).collect()
}

/// A course prerequisite: either no requirement at all, or a term tree
/// whose leaves are courses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prereq(Option<Term<Course>>);

impl Prereq {
    /// The no-prerequisite value; unconditionally satisfied.
    pub fn none() -> Prereq {
        Prereq(None)
    }

    /// Parses a raw prerequisite string into a course-aware tree, pruning
    /// interchangeable alternatives as the tree is built. An empty string
    /// means no prerequisite.
    ///
    /// Pruning can reduce the whole tree to a bare course, so a bare-leaf
    /// result is re-wrapped in a singleton AND node; the shape is always
    /// a tree.
    pub fn parse(input: &str, prune: &HashSet<Course>) -> Result<Prereq, PrereqError> {
        if input.is_empty() {
            return Ok(Prereq(None));
        }
        let tree = match from_term(&parse::parse(input)?, prune)? {
            Node::Term(term) => term,
            bare => Term::nary(Op::And, vec![bare]),
        };
        Ok(Prereq(Some(tree)))
    }

    pub fn tree(&self) -> Option<&Term<Course>> {
        self.0.as_ref()
    }

    pub fn is_none(&self) -> bool {
        self.0.is_none()
    }

    /// Whether the tree is displayable as a flat requirement: no
    /// prerequisite, or a single AND node whose children are all courses.
    pub fn is_simple(&self) -> bool {
        match &self.0 {
            None => true,
            Some(tree) => {
                tree.op() == Op::And
                    && tree.iter().all(|child| matches!(child, Node::Leaf(_)))
            }
        }
    }

    /// Whether the given taken courses satisfy the prerequisite.
    pub fn valid(&self, taken: &HashSet<Course>) -> bool {
        match &self.0 {
            None => true,
            Some(tree) => evaluator::valid(tree, taken),
        }
    }
}

impl fmt::Display for Prereq {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.0 {
            None => f.write_str("none"),
            Some(tree) => write!(f, "{}", tree),
        }
    }
}

/// Rebuilds a generic tree bottom-up with course leaves, applying the
/// pruning rule at each node once its children are complete: an OR node
/// with at least one course child in the prune-set collapses to the first
/// such child, discarding the remaining alternatives. AND nodes never
/// collapse. Pruning runs exactly once per node and is not re-applied to
/// ancestors.
fn from_term(term: &Term<&str>, prune: &HashSet<Course>) -> Result<Node<Course>, CourseError> {
    let mut children = Vec::with_capacity(term.len());
    for child in term {
        children.push(match child {
            Node::Leaf(raw) => Node::Leaf(Course::from_record(raw)?),
            Node::Term(term) => from_term(term, prune)?,
        });
    }
    if term.op() == Op::Or {
        let hit = children
            .iter()
            .position(|child| matches!(child, Node::Leaf(course) if prune.contains(course)));
        if let Some(hit) = hit {
            return Ok(children.swap_remove(hit));
        }
    }
    Ok(Node::Term(Term::nary(term.op(), children)))
}
