//! The parser combinator engine (C5): `Parser<A>` as an explicit value
//! exposing its first-set, rather than an opaque closure, per the
//! specification's design note that parsers must be inspectable before any
//! input is consumed.
//!
//! `alt` (`<|>`) and `alt_long` (`<|?>`) are the two ways to combine parsers
//! here; the Language grammar (`crate::grammar`) builds small `Parser<A>`
//! values at each call site and runs them immediately rather than wiring up
//! one global combinator graph, since Rust has no built-in laziness to tie
//! the knot on genuinely recursive productions (expressions calling
//! expressions, patterns calling patterns). The disjointness check in `alt`
//! still runs every time two alternatives are combined, so it catches an
//! overlapping grammar the same moment the combination is attempted.

use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use curry_lexer::TokenKind;

use crate::error::{InvariantViolation, ParseError, ParseErrorKind};
use crate::state::State;

type Action<'s, A> = Rc<dyn Fn(&mut State<'s>) -> Result<A, ParseError> + 's>;

/// `(optional empty-action, map<token-category, lookahead-action>)`, per
/// §4.4.
pub struct Parser<'s, A> {
    empty: Option<Action<'s, A>>,
    branches: FxHashMap<TokenKind, Action<'s, A>>,
}

impl<'s, A> Clone for Parser<'s, A> {
    fn clone(&self) -> Self {
        Parser { empty: self.empty.clone(), branches: self.branches.clone() }
    }
}

impl<'s, A: 's> Parser<'s, A> {
    /// A single-branch parser: on seeing `kind`, consume it and apply `f`.
    pub fn token(kind: TokenKind, f: impl Fn(&mut State<'s>) -> Result<A, ParseError> + 's) -> Self {
        let mut branches = FxHashMap::default();
        branches.insert(kind, Rc::new(f) as Action<'s, A>);
        Parser { empty: None, branches }
    }

    /// A parser that succeeds without consuming input.
    pub fn pure(value: A) -> Self
    where
        A: Clone,
    {
        Parser {
            empty: Some(Rc::new(move |_state: &mut State<'s>| Ok(value.clone()))),
            branches: FxHashMap::default(),
        }
    }

    pub fn first_set(&self) -> Vec<TokenKind> {
        self.branches.keys().copied().collect()
    }

    pub fn has_empty_action(&self) -> bool {
        self.empty.is_some()
    }

    pub fn map<B: 's>(self, f: impl Fn(A) -> B + 's) -> Parser<'s, B> {
        let f = Rc::new(f);
        let empty = self.empty.map(|action| {
            let f = f.clone();
            Rc::new(move |state: &mut State<'s>| action(state).map(|a| f(a))) as Action<'s, B>
        });
        let branches = self
            .branches
            .into_iter()
            .map(|(k, action)| {
                let f = f.clone();
                (k, Rc::new(move |state: &mut State<'s>| action(state).map(|a| f(a))) as Action<'s, B>)
            })
            .collect();
        Parser { empty, branches }
    }

    /// Deterministic choice (`<|>`): legal only when the first-sets are
    /// disjoint and at most one side has an empty action. Violating this is
    /// a grammar bug, not a data error -- it surfaces as `InvariantViolation`
    /// rather than a `ParseError`.
    pub fn alt(self, other: Parser<'s, A>) -> Result<Parser<'s, A>, InvariantViolation> {
        let overlap: Vec<TokenKind> =
            self.branches.keys().filter(|k| other.branches.contains_key(k)).copied().collect();
        if !overlap.is_empty() {
            return Err(InvariantViolation {
                reason: format!("alt: overlapping first-sets {overlap:?}"),
            });
        }
        if self.empty.is_some() && other.empty.is_some() {
            return Err(InvariantViolation {
                reason: "alt: both alternatives have an empty action".into(),
            });
        }
        let empty = self.empty.or(other.empty);
        let mut branches = self.branches;
        branches.extend(other.branches);
        Ok(Parser { empty, branches })
    }

    /// `restrict(p, keys)`: a parser identical to `p` but with the given
    /// lookahead keys removed, used to resolve an overlap without falling
    /// back to `alt_long`.
    pub fn restrict(mut self, keys: &[TokenKind]) -> Self {
        for key in keys {
            self.branches.remove(key);
        }
        self
    }

    pub fn run(&self, state: &mut State<'s>) -> Result<A, ParseError> {
        let kind = state.peek_kind();
        if let Some(action) = self.branches.get(&kind) {
            return action(state);
        }
        if let Some(action) = &self.empty {
            return action(state);
        }
        Err(ParseError::new(
            ParseErrorKind::UnexpectedToken { expected: self.first_set(), found: kind },
            state.position(),
        ))
    }
}

/// Non-deterministic choice (`<|?>`, §4.4): for overlapping first-sets, both
/// branches run against independent clones of `state`; the one that
/// consumed more input wins. A tie where both succeed at the same position
/// is reported as an ambiguity rather than picked arbitrarily.
pub fn alt_long<'s, A>(
    state: &mut State<'s>,
    left: impl Fn(&mut State<'s>) -> Result<A, ParseError>,
    right: impl Fn(&mut State<'s>) -> Result<A, ParseError>,
) -> Result<A, crate::error::AmbiguityError>
where
    A: 's,
{
    let start_position = state.position();
    let mut left_state = state.clone();
    let left_result = left(&mut left_state);
    let mut right_state = state.clone();
    let right_result = right(&mut right_state);

    match (left_result, right_result) {
        (Ok(a), Err(_)) => {
            *state = left_state;
            Ok(a)
        }
        (Err(_), Ok(b)) => {
            *state = right_state;
            Ok(b)
        }
        (Ok(_), Ok(_)) if left_state.consumed() == right_state.consumed() => {
            Err(crate::error::AmbiguityError { position: start_position })
        }
        (Ok(a), Ok(b)) => {
            if left_state.consumed() >= right_state.consumed() {
                *state = left_state;
                Ok(a)
            } else {
                *state = right_state;
                Ok(b)
            }
        }
        (Err(e1), Err(e2)) => {
            if left_state.consumed() >= right_state.consumed() {
                *state = left_state;
                Err(crate::error::AmbiguityError { position: e1.position })
            } else {
                *state = right_state;
                Err(crate::error::AmbiguityError { position: e2.position })
            }
        }
    }
}

impl<'s, A> fmt::Debug for Parser<'s, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parser")
            .field("first_set", &self.first_set())
            .field("has_empty_action", &self.has_empty_action())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disjoint_alt_combines_branches() {
        let a = Parser::token(TokenKind::KwLet, |s| {
            s.bump()?;
            Ok("let")
        });
        let b = Parser::token(TokenKind::KwIf, |s| {
            s.bump()?;
            Ok("if")
        });
        let combined = a.alt(b).unwrap();
        assert_eq!(combined.first_set().len(), 2);
    }

    #[test]
    fn overlapping_alt_is_an_invariant_violation() {
        let a = Parser::token(TokenKind::KwLet, |s| {
            s.bump()?;
            Ok(1)
        });
        let b = Parser::token(TokenKind::KwLet, |s| {
            s.bump()?;
            Ok(2)
        });
        assert!(a.alt(b).is_err());
    }

    #[test]
    fn two_empty_actions_is_an_invariant_violation() {
        let a = Parser::<i32>::pure(1);
        let b = Parser::<i32>::pure(2);
        assert!(a.alt(b).is_err());
    }

    #[test]
    fn restrict_removes_named_keys() {
        let a = Parser::token(TokenKind::KwLet, |s| {
            s.bump()?;
            Ok(())
        })
        .restrict(&[TokenKind::KwLet]);
        assert!(a.first_set().is_empty());
    }

    #[test]
    fn run_dispatches_on_lookahead() {
        let mut state = State::new("let x = 1", "T.curry").unwrap();
        let p = Parser::token(TokenKind::KwLet, |s| {
            s.bump()?;
            Ok("matched")
        });
        assert_eq!(p.run(&mut state).unwrap(), "matched");
    }
}
