//! Type expressions (§3.5: variable, constructor application, tuple, list,
//! arrow, parenthesized).

use curry_ast::TypeExpr;
use curry_lexer::TokenKind;

use crate::error::ParseError;
use crate::state::State;
use crate::util::{expect_plain_name, expect_qualified};

/// `type ::= btype ['->' type]` -- arrow is right-associative.
pub fn parse_type(state: &mut State) -> Result<TypeExpr, ParseError> {
    let domain = parse_btype(state)?;
    if state.peek_kind() == TokenKind::Arrow {
        state.bump()?;
        let range = parse_type(state)?;
        Ok(TypeExpr::Arrow(Box::new(domain), Box::new(range)))
    } else {
        Ok(domain)
    }
}

/// `btype ::= atype+` when the head is a type constructor (constructor
/// application); otherwise a single `atype`.
fn parse_btype(state: &mut State) -> Result<TypeExpr, ParseError> {
    let head = parse_atype(state)?;
    match head {
        TypeExpr::Cons(name, _) => {
            let mut args = Vec::new();
            while starts_atype(state) {
                args.push(parse_atype(state)?);
            }
            Ok(TypeExpr::Cons(name, args))
        }
        other => Ok(other),
    }
}

fn starts_atype(state: &State) -> bool {
    matches!(
        state.peek_kind(),
        TokenKind::Ident | TokenKind::ConsIdent | TokenKind::LParen | TokenKind::LBracket
    )
}

fn parse_atype(state: &mut State) -> Result<TypeExpr, ParseError> {
    match state.peek_kind() {
        TokenKind::Ident => {
            let name = expect_plain_name(state, TokenKind::Ident)?;
            Ok(TypeExpr::Var(name))
        }
        TokenKind::ConsIdent => {
            let name = expect_qualified(state, TokenKind::ConsIdent)?;
            Ok(TypeExpr::Cons(name, Vec::new()))
        }
        TokenKind::LBracket => {
            state.bump()?;
            let elem = parse_type(state)?;
            state.expect(TokenKind::RBracket)?;
            Ok(TypeExpr::List(Box::new(elem)))
        }
        TokenKind::LParen => {
            state.bump()?;
            if state.peek_kind() == TokenKind::RParen {
                state.bump()?;
                return Ok(TypeExpr::Tuple(Vec::new()));
            }
            let mut items = vec![parse_type(state)?];
            while state.peek_kind() == TokenKind::Comma {
                state.bump()?;
                items.push(parse_type(state)?);
            }
            state.expect(TokenKind::RParen)?;
            if items.len() == 1 {
                Ok(TypeExpr::Paren(Box::new(items.into_iter().next().unwrap())))
            } else {
                Ok(TypeExpr::Tuple(items))
            }
        }
        _ => Err(crate::util::unexpected(state, "type")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(src: &str) -> TypeExpr {
        let mut state = State::new(src, "T.curry").unwrap();
        parse_type(&mut state).unwrap()
    }

    #[test]
    fn arrow_type_is_right_associative() {
        let ty = parse("a -> b -> c");
        match ty {
            TypeExpr::Arrow(_, range) => assert!(matches!(*range, TypeExpr::Arrow(_, _))),
            _ => panic!("expected arrow type"),
        }
    }

    #[test]
    fn constructor_application_collects_args() {
        let ty = parse("Maybe Int");
        match ty {
            TypeExpr::Cons(name, args) => {
                assert_eq!(name.name(), "Maybe");
                assert_eq!(args.len(), 1);
            }
            _ => panic!("expected constructor application"),
        }
    }

    #[test]
    fn list_and_tuple_types() {
        assert!(matches!(parse("[a]"), TypeExpr::List(_)));
        assert!(matches!(parse("(a, b)"), TypeExpr::Tuple(items) if items.len() == 2));
    }
}
