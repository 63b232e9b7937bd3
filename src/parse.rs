use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{char, multispace0},
    error::ErrorKind,
    multi::separated_nonempty_list,
    sequence::{delimited, preceded},
    IResult,
};

use thiserror::Error;

use crate::term::{Node, Op, Term};

/// Errors raised while parsing a prerequisite expression.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("syntax error: {0}")]
    Syntax(String),
    #[error("unconsumed input: {0:?}")]
    UnconsumedInput(String),
}

// Grammar, with and binding tighter than or:
//
//   expr       := or_clause
//   or_clause  := and_clause (" or " and_clause)*
//   and_clause := atom (" and " atom)*
//   atom       := "(" expr ")" | leaf
//
// Clause lists of length one collapse to their sole element, so "(a)"
// parses to the leaf a, never to a one-child node.

/// A leaf is the maximal run of characters containing no parenthesis and
/// not beginning an infix delimiter. Leaves may contain internal spaces;
/// raw registration records do.
fn leaf(input: &str) -> IResult<&str, Node<&str>> {
    let mut end = input.len();
    for (i, c) in input.char_indices() {
        if c == '(' || c == ')' || input[i..].starts_with(" and ") || input[i..].starts_with(" or ")
        {
            end = i;
            break;
        }
    }
    let token = input[..end].trim();
    if token.is_empty() {
        return Err(nom::Err::Error((input, ErrorKind::TakeWhile1)));
    }
    Ok((&input[end..], Node::Leaf(token)))
}

fn group(input: &str) -> IResult<&str, Node<&str>> {
    delimited(char('('), expr, preceded(multispace0, char(')')))(input)
}

fn atom(input: &str) -> IResult<&str, Node<&str>> {
    preceded(multispace0, alt((group, leaf)))(input)
}

fn and_clause(input: &str) -> IResult<&str, Node<&str>> {
    let (input, atoms) = separated_nonempty_list(tag(" and "), atom)(input)?;
    Ok((input, clause(Op::And, atoms)))
}

fn or_clause(input: &str) -> IResult<&str, Node<&str>> {
    let (input, clauses) = separated_nonempty_list(tag(" or "), and_clause)(input)?;
    Ok((input, clause(Op::Or, clauses)))
}

fn expr(input: &str) -> IResult<&str, Node<&str>> {
    or_clause(input)
}

fn clause(op: Op, mut nodes: Vec<Node<&str>>) -> Node<&str> {
    if nodes.len() == 1 {
        nodes.remove(0)
    } else {
        Node::Term(Term::nary(op, nodes))
    }
}

/// Recursively builds a parse tree on the string. The result is a bare
/// leaf when the whole input is a single token.
pub fn parse_tree(input: &str) -> Result<Node<&str>, ParseError> {
    match expr(input) {
        Ok((rest, node)) if rest.trim().is_empty() => Ok(node),
        Ok((rest, _)) => Err(ParseError::UnconsumedInput(rest.to_string())),
        Err(e) => Err(ParseError::Syntax(format!("{:?}", e))),
    }
}

/// Parses a prerequisite expression into a normalized term tree.
///
/// A bare leaf is wrapped in a singleton AND node so the result is always
/// a tree, and the tree is condensed with [`Term::collapse`].
pub fn parse(input: &str) -> Result<Term<&str>, ParseError> {
    let tree = match parse_tree(input)? {
        Node::Term(term) => term,
        bare => Term::nary(Op::And, vec![bare]),
    };
    Ok(tree.collapse())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaves<'a>(term: &Term<&'a str>) -> Vec<&'a str> {
        term.iter()
            .map(|child| match child {
                Node::Leaf(leaf) => *leaf,
                Node::Term(_) => panic!("expected a leaf, got {}", child),
            })
            .collect()
    }

    #[test]
    fn single_token_is_a_leaf() {
        assert_eq!(parse_tree("a").unwrap(), Node::Leaf("a"));
    }

    #[test]
    fn parenthesized_token_is_a_leaf() {
        // never a one-child node
        assert_eq!(parse_tree("(a)").unwrap(), Node::Leaf("a"));
    }

    #[test]
    fn leaves_keep_internal_spaces() {
        assert_eq!(parse_tree("CS 1331").unwrap(), Node::Leaf("CS 1331"));
    }

    #[test]
    fn conjunction_is_flat() {
        let tree = parse("a and b and c").unwrap();
        assert_eq!(tree.op(), Op::And);
        assert_eq!(leaves(&tree), vec!["a", "b", "c"]);
    }

    #[test]
    fn and_binds_tighter_than_or() {
        let tree = parse("a and b or c and d").unwrap();
        assert_eq!(tree.op(), Op::Or);
        assert_eq!(tree.to_string(), "((a and b) or (c and d))");
    }

    #[test]
    fn parentheses_override_precedence() {
        let tree = parse("(a or b) and c").unwrap();
        assert_eq!(tree.op(), Op::And);
        assert_eq!(tree.to_string(), "((a or b) and c)");
    }

    #[test]
    fn nested_same_operator_collapses() {
        let tree = parse("a and (b and c)").unwrap();
        assert_eq!(tree.op(), Op::And);
        assert_eq!(leaves(&tree), vec!["a", "b", "c"]);
    }

    #[test]
    fn bare_leaf_is_wrapped() {
        let tree = parse("a").unwrap();
        assert_eq!(tree.op(), Op::And);
        assert_eq!(leaves(&tree), vec!["a"]);
    }

    #[test]
    fn deep_nesting() {
        let tree =
            parse("a and b and c or (a and b and (a or c) and b) or (c and d ) and e").unwrap();
        assert_eq!(
            tree.to_string(),
            "((a and b and c) or (a and b and (a or c) and b) or (c and d and e))"
        );
    }

    #[test]
    fn tolerates_spaces_inside_parentheses() {
        let tree = parse("( a or b ) and c").unwrap();
        assert_eq!(tree.to_string(), "((a or b) and c)");
    }

    #[test]
    fn unbalanced_parenthesis_is_a_syntax_error() {
        assert!(matches!(parse("(a or b"), Err(ParseError::Syntax(_))));
    }

    #[test]
    fn trailing_operator_is_unconsumed_input() {
        assert!(matches!(
            parse("a or "),
            Err(ParseError::UnconsumedInput(_))
        ));
    }

    #[test]
    fn parsed_trees_collapse_idempotently() {
        let tree = parse("a and (b and (c or d) and e) or f").unwrap();
        assert_eq!(tree.collapse(), tree);
    }
}
