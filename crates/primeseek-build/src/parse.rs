//! Token streams and their conversion to typed expression trees.
//!
//! The rendered text of a candidate and its tree are derived from the same
//! token sequence, so the tree always means exactly what the text says: a
//! closing bracket pairs with the nearest unclosed opener.

use std::fmt;

use primeseek_core::{ExprArena, ExprHandle, Operator, Term, WrapTemplate};
use thiserror::Error;

use crate::slot::NodeSlot;

/// One lexical unit of an assembled expression.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Token {
    /// A wrap prefix such as `(` or `sin(`.
    Open(WrapTemplate),
    /// A node term.
    Term(Term),
    /// A wrap suffix.
    Close,
    /// A binary operator.
    Op(Operator),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Open(template) => f.write_str(template.prefix()),
            Token::Term(term) => f.write_str(term.text()),
            Token::Close => f.write_str(")"),
            Token::Op(op) => f.write_str(op.symbol()),
        }
    }
}

/// Flattens slots and operators into a token sequence.
///
/// Operator `i` is placed between slot `i` and slot `i + 1`; surplus
/// operators are ignored.
#[must_use]
pub fn tokenize(slots: &[NodeSlot], operators: &[Operator]) -> Vec<Token> {
    let mut tokens = Vec::with_capacity(slots.len() * 4);
    for (i, slot) in slots.iter().enumerate() {
        if i > 0 {
            if let Some(&op) = operators.get(i - 1) {
                tokens.push(Token::Op(op));
            }
        }
        tokens.extend(slot.prefixes().map(Token::Open));
        tokens.push(Token::Term(slot.base));
        tokens.extend(slot.suffixes().map(|_| Token::Close));
    }
    tokens
}

/// Concatenates the textual form of every token.
#[must_use]
pub fn render(tokens: &[Token]) -> String {
    tokens.iter().map(ToString::to_string).collect()
}

/// A token sequence that does not form an expression.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("expression ended where an operand was expected")]
    UnexpectedEnd,

    #[error("unexpected `{found}` at token {position}")]
    UnexpectedToken { position: usize, found: String },

    #[error("wrap opened at token {position} is never closed")]
    UnclosedWrap { position: usize },

    #[error("`)` at token {position} has no matching opener")]
    UnmatchedClose { position: usize },
}

/// Builds a tree from `tokens` into `arena` and returns its root.
///
/// Precedence follows the usual convention: `**` binds tightest and groups
/// to the right, then `*` `/` `%`, then `+` `-`, all left-associative.
///
/// # Errors
///
/// Returns a [`ParseError`] if brackets are unbalanced or operands and
/// operators do not alternate.
pub fn parse(tokens: &[Token], arena: &mut ExprArena) -> Result<ExprHandle, ParseError> {
    let mut parser = Parser {
        tokens,
        cursor: 0,
        arena,
    };
    let root = parser.expression(0)?;
    match parser.peek() {
        None => Ok(root),
        Some(Token::Close) => Err(ParseError::UnmatchedClose {
            position: parser.cursor,
        }),
        Some(token) => Err(ParseError::UnexpectedToken {
            position: parser.cursor,
            found: token.to_string(),
        }),
    }
}

struct Parser<'t, 'a> {
    tokens: &'t [Token],
    cursor: usize,
    arena: &'a mut ExprArena,
}

impl Parser<'_, '_> {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.cursor).copied()
    }

    fn expression(&mut self, min_precedence: u8) -> Result<ExprHandle, ParseError> {
        let mut lhs = self.operand()?;

        while let Some(Token::Op(op)) = self.peek() {
            let precedence = op.precedence();
            if precedence < min_precedence {
                break;
            }
            self.cursor += 1;

            let next_min = if op.is_right_associative() {
                precedence
            } else {
                precedence + 1
            };
            let rhs = self.expression(next_min)?;
            lhs = self.arena.binary(op, lhs, rhs);
        }

        Ok(lhs)
    }

    fn operand(&mut self) -> Result<ExprHandle, ParseError> {
        let position = self.cursor;
        let token = self.peek().ok_or(ParseError::UnexpectedEnd)?;
        self.cursor += 1;

        match token {
            Token::Term(term) => Ok(self.arena.term(term)),
            Token::Open(template) => {
                let inner = self.expression(0)?;
                match self.peek() {
                    Some(Token::Close) => self.cursor += 1,
                    _ => return Err(ParseError::UnclosedWrap { position }),
                }
                Ok(match template.function() {
                    Some(func) => self.arena.call(func, inner),
                    None => inner,
                })
            }
            Token::Close => Err(ParseError::UnmatchedClose { position }),
            Token::Op(op) => Err(ParseError::UnexpectedToken {
                position,
                found: op.symbol().to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use primeseek_core::{ExprNode, Function};

    fn t(term: Term) -> Token {
        Token::Term(term)
    }

    #[test]
    fn test_precedence() {
        // n + 1 * PI  =>  n + (1 * PI)
        let tokens = [
            t(Term::Index),
            Token::Op(Operator::Add),
            t(Term::One),
            Token::Op(Operator::Mul),
            t(Term::Pi),
        ];
        let mut arena = ExprArena::new();
        let root = parse(&tokens, &mut arena).unwrap();
        match arena.get(root) {
            ExprNode::Binary { op, rhs, .. } => {
                assert_eq!(*op, Operator::Add);
                assert!(matches!(
                    arena.get(*rhs),
                    ExprNode::Binary { op: Operator::Mul, .. }
                ));
            }
            other => panic!("unexpected root {other:?}"),
        }
    }

    #[test]
    fn test_power_is_right_associative() {
        // n ** 1 ** PI  =>  n ** (1 ** PI)
        let tokens = [
            t(Term::Index),
            Token::Op(Operator::Pow),
            t(Term::One),
            Token::Op(Operator::Pow),
            t(Term::Pi),
        ];
        let mut arena = ExprArena::new();
        let root = parse(&tokens, &mut arena).unwrap();
        match arena.get(root) {
            ExprNode::Binary { lhs, rhs, .. } => {
                assert!(arena.get(*lhs).is_index());
                assert!(matches!(
                    arena.get(*rhs),
                    ExprNode::Binary { op: Operator::Pow, .. }
                ));
            }
            other => panic!("unexpected root {other:?}"),
        }
    }

    #[test]
    fn test_subtraction_is_left_associative() {
        // n - 1 - PI  =>  (n - 1) - PI
        let tokens = [
            t(Term::Index),
            Token::Op(Operator::Sub),
            t(Term::One),
            Token::Op(Operator::Sub),
            t(Term::Pi),
        ];
        let mut arena = ExprArena::new();
        let root = parse(&tokens, &mut arena).unwrap();
        match arena.get(root) {
            ExprNode::Binary { lhs, rhs, .. } => {
                assert!(matches!(
                    arena.get(*lhs),
                    ExprNode::Binary { op: Operator::Sub, .. }
                ));
                assert_eq!(arena.get(*rhs), &ExprNode::Term(Term::Pi));
            }
            other => panic!("unexpected root {other:?}"),
        }
    }

    #[test]
    fn test_call_and_group() {
        // sin((n))
        let tokens = [
            Token::Open(WrapTemplate::Call(Function::Sin)),
            Token::Open(WrapTemplate::Paren),
            t(Term::Index),
            Token::Close,
            Token::Close,
        ];
        assert_eq!(render(&tokens), "sin((n))");

        let mut arena = ExprArena::new();
        let root = parse(&tokens, &mut arena).unwrap();
        assert!(matches!(
            arena.get(root),
            ExprNode::Call { func: Function::Sin, .. }
        ));
        // Plain parentheses add no node.
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn test_unbalanced_streams() {
        let mut arena = ExprArena::new();

        let unclosed = [Token::Open(WrapTemplate::Paren), t(Term::Index)];
        assert_eq!(
            parse(&unclosed, &mut arena),
            Err(ParseError::UnclosedWrap { position: 0 })
        );

        let stray = [t(Term::Index), Token::Close];
        assert_eq!(
            parse(&stray, &mut arena),
            Err(ParseError::UnmatchedClose { position: 1 })
        );

        let dangling = [t(Term::Index), Token::Op(Operator::Add)];
        assert_eq!(parse(&dangling, &mut arena), Err(ParseError::UnexpectedEnd));

        assert_eq!(parse(&[], &mut arena), Err(ParseError::UnexpectedEnd));
    }
}
