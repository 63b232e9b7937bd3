//! prereq -- parse once, evaluate often
//!
//! Prereq interprets course-registration prerequisite strings -- infix
//! "and"/"or" expressions with parenthetical grouping -- into boolean
//! term trees, normalizes them, prunes interchangeable alternatives, and
//! answers whether a set of completed courses satisfies the requirement.
//!
//! Trees are built once and never mutated; a parsed tree can be evaluated
//! against any number of taken-sets.
//!
//! ```
//! use std::collections::HashSet;
//! use prereq::course::{course_set, Prereq};
//!
//! let prune = course_set(&["CS 1332".to_string()]).unwrap();
//! let taken = course_set(&["CS 1331".to_string(), "CS 1332".to_string()]).unwrap();
//! // raw registration records carry the course at fields 3 and 4
//! let s = "Undergraduate Semester level CS 1331 Minimum Grade of C \
//!          and (Undergraduate Semester level CS 1332 Minimum Grade of C \
//!          or Undergraduate Semester level CS 1332H Minimum Grade of C)";
//! let tree = Prereq::parse(s, &prune).unwrap();
//! assert_eq!(tree.to_string(), "(CS 1331 and CS 1332)");
//! assert!(tree.valid(&taken));
//! ```

pub mod course;
pub mod evaluator;
pub mod loader;
pub mod parse;
pub mod term;
