//! Patterns (§3.5: literal, negative literal, variable, constructor,
//! infix, parenthesized, record, tuple, list, as-pattern, lazy,
//! function-pattern, infix-function-pattern).

use curry_ast::{FieldPattern, Pattern};
use curry_lexer::TokenKind;

use crate::error::ParseError;
use crate::state::State;
use crate::util::{expect_plain_name, expect_qualified, literal_from_token};

/// `pattern ::= pattern10 [op pattern]` -- infix constructor/function
/// patterns (e.g. `x:xs`) are right-associative, matching list-cons.
pub fn parse_pattern(state: &mut State) -> Result<Pattern, ParseError> {
    let left = parse_pattern10(state)?;
    if state.peek_kind() == TokenKind::SymbolicIdent || state.peek_kind() == TokenKind::Backtick {
        let op = parse_infix_operator(state)?;
        let right = parse_pattern(state)?;
        let is_constructor = op.name().starts_with(':');
        return Ok(if is_constructor {
            Pattern::Infix(Box::new(left), op, Box::new(right))
        } else {
            Pattern::InfixFunctionPattern(Box::new(left), op, Box::new(right))
        });
    }
    Ok(left)
}

fn parse_infix_operator(state: &mut State) -> Result<curry_ast::QualifiedIdent, ParseError> {
    if state.peek_kind() == TokenKind::Backtick {
        state.bump()?;
        let name = expect_qualified(state, TokenKind::Ident)?;
        state.expect(TokenKind::Backtick)?;
        Ok(name)
    } else {
        expect_qualified(state, TokenKind::SymbolicIdent)
    }
}

/// `pattern10 ::= ConsIdent apattern*` (constructor pattern) | `Ident
/// apattern*` (function pattern if args follow, else a variable) |
/// `apattern`.
fn parse_pattern10(state: &mut State) -> Result<Pattern, ParseError> {
    if let Some(neg) = try_negative_literal(state)? {
        return Ok(neg);
    }
    match state.peek_kind() {
        TokenKind::ConsIdent => {
            let name = expect_qualified(state, TokenKind::ConsIdent)?;
            let mut args = Vec::new();
            while starts_apattern(state) {
                args.push(parse_apattern(state)?);
            }
            Ok(Pattern::Constructor(name, args))
        }
        TokenKind::Ident => {
            let name = expect_qualified(state, TokenKind::Ident)?;
            let mut args = Vec::new();
            while starts_apattern(state) {
                args.push(parse_apattern(state)?);
            }
            if args.is_empty() {
                Ok(Pattern::Var(name.ident))
            } else {
                Ok(Pattern::FunctionPattern(name, args))
            }
        }
        _ => parse_apattern(state),
    }
}

fn try_negative_literal(state: &mut State) -> Result<Option<Pattern>, ParseError> {
    if state.peek_kind() != TokenKind::SymbolicIdent {
        return Ok(None);
    }
    let is_minus = matches!(state.peek().attrs.as_text(), Some("-") | Some("-."));
    if !is_minus {
        return Ok(None);
    }
    // `State` caches only one token of lookahead by design (§4.4a); a
    // second token of lookahead is resolved here by probing a throwaway
    // clone rather than widening `State`'s own API for this one grammar
    // point.
    let mut probe = state.clone();
    probe.bump()?;
    if !matches!(probe.peek_kind(), TokenKind::IntLit | TokenKind::FloatLit) {
        return Ok(None);
    }
    state.bump()?; // the '-' or '-.' operator
    let lit_token = state.bump()?;
    Ok(Some(Pattern::NegLiteral(literal_from_token(state, lit_token))))
}

pub(crate) fn starts_apattern(state: &State) -> bool {
    matches!(
        state.peek_kind(),
        TokenKind::Ident
            | TokenKind::ConsIdent
            | TokenKind::IntLit
            | TokenKind::FloatLit
            | TokenKind::CharLit
            | TokenKind::StringLit
            | TokenKind::LParen
            | TokenKind::LBracket
            | TokenKind::Underscore
            | TokenKind::Tilde
    )
}

pub(crate) fn parse_apattern(state: &mut State) -> Result<Pattern, ParseError> {
    match state.peek_kind() {
        TokenKind::Underscore => {
            let token = state.bump()?;
            Ok(Pattern::Var(curry_ast::Ident::new("_", token.position)))
        }
        TokenKind::IntLit | TokenKind::FloatLit | TokenKind::CharLit | TokenKind::StringLit => {
            let token = state.bump()?;
            Ok(Pattern::Literal(literal_from_token(state, token)))
        }
        TokenKind::Tilde => {
            state.bump()?;
            Ok(Pattern::Lazy(Box::new(parse_apattern(state)?)))
        }
        TokenKind::ConsIdent => {
            let name = expect_qualified(state, TokenKind::ConsIdent)?;
            if state.peek_kind() == TokenKind::LBrace {
                return parse_record_pattern(state, name);
            }
            Ok(Pattern::Constructor(name, Vec::new()))
        }
        TokenKind::Ident => {
            let name = expect_plain_name(state, TokenKind::Ident)?;
            if state.peek_kind() == TokenKind::At {
                state.bump()?;
                let inner = parse_apattern(state)?;
                return Ok(Pattern::As(name, Box::new(inner)));
            }
            Ok(Pattern::Var(name))
        }
        TokenKind::LParen => {
            state.bump()?;
            if state.peek_kind() == TokenKind::RParen {
                state.bump()?;
                return Ok(Pattern::Tuple(Vec::new()));
            }
            let mut items = vec![parse_pattern(state)?];
            while state.peek_kind() == TokenKind::Comma {
                state.bump()?;
                items.push(parse_pattern(state)?);
            }
            state.expect(TokenKind::RParen)?;
            if items.len() == 1 {
                Ok(Pattern::Paren(Box::new(items.into_iter().next().unwrap())))
            } else {
                Ok(Pattern::Tuple(items))
            }
        }
        TokenKind::LBracket => {
            state.bump()?;
            let mut items = Vec::new();
            if state.peek_kind() != TokenKind::RBracket {
                items.push(parse_pattern(state)?);
                while state.peek_kind() == TokenKind::Comma {
                    state.bump()?;
                    items.push(parse_pattern(state)?);
                }
            }
            state.expect(TokenKind::RBracket)?;
            Ok(Pattern::List(items))
        }
        _ => Err(crate::util::unexpected(state, "pattern")),
    }
}

fn parse_record_pattern(
    state: &mut State,
    name: curry_ast::QualifiedIdent,
) -> Result<Pattern, ParseError> {
    state.expect(TokenKind::LBrace)?;
    let mut fields = Vec::new();
    if state.peek_kind() != TokenKind::RBrace {
        fields.push(parse_field_pattern(state)?);
        while state.peek_kind() == TokenKind::Comma {
            state.bump()?;
            fields.push(parse_field_pattern(state)?);
        }
    }
    state.expect(TokenKind::RBrace)?;
    Ok(Pattern::Record(name, fields))
}

fn parse_field_pattern(state: &mut State) -> Result<FieldPattern, ParseError> {
    let field = expect_qualified(state, TokenKind::Ident)?;
    state.expect(TokenKind::Equals)?;
    let pattern = parse_pattern(state)?;
    Ok(FieldPattern { field, pattern })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(src: &str) -> Pattern {
        let mut state = State::new(src, "T.curry").unwrap();
        parse_pattern(&mut state).unwrap()
    }

    #[test]
    fn variable_pattern() {
        assert!(matches!(parse("x"), Pattern::Var(_)));
    }

    #[test]
    fn constructor_pattern_with_args() {
        match parse("Just x") {
            Pattern::Constructor(name, args) => {
                assert_eq!(name.name(), "Just");
                assert_eq!(args.len(), 1);
            }
            other => panic!("expected constructor pattern, got {other:?}"),
        }
    }

    #[test]
    fn infix_cons_pattern() {
        match parse("x : xs") {
            Pattern::Infix(_, op, _) => assert_eq!(op.name(), ":"),
            other => panic!("expected infix pattern, got {other:?}"),
        }
    }

    #[test]
    fn negative_literal_pattern() {
        match parse("-1") {
            Pattern::NegLiteral(_) => {}
            other => panic!("expected negative literal pattern, got {other:?}"),
        }
    }

    #[test]
    fn as_pattern() {
        match parse("all@(x:xs)") {
            Pattern::As(name, inner) => {
                assert_eq!(name.name, "all");
                assert!(matches!(*inner, Pattern::Paren(_)));
            }
            other => panic!("expected as-pattern, got {other:?}"),
        }
    }

    #[test]
    fn tuple_and_list_patterns() {
        assert!(matches!(parse("(x, y)"), Pattern::Tuple(items) if items.len() == 2));
        assert!(matches!(parse("[x, y]"), Pattern::List(items) if items.len() == 2));
    }
}
