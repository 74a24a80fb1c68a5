//! The hand-written recursive grammar (C6) built on top of the parser
//! engine (C5) and `State`. Each production is a plain function over
//! `State` rather than one combinator graph assembled from [`crate::engine::Parser`]
//! values, for the reason recorded in `state.rs` and `engine.rs`: genuinely
//! recursive productions (`expr` calling `expr`, `pattern` calling
//! `pattern`) can't be tied as a lazily-shared value without Haskell-style
//! laziness, so recursive descent is used directly while still rebuilding
//! and checking `Parser` values at the handful of call sites that combine
//! true alternatives.

pub mod decl;
pub mod expr;
pub mod module;
pub mod pattern;
pub mod ty;

use curry_lexer::TokenKind;

use crate::error::ParseError;
use crate::state::State;

/// A layout-sensitive block (§4.5): either an explicit `{ item; item }`
/// (parser must call [`State::layout_end`] itself after consuming the
/// closing `}`, since the lexer never auto-pops an explicit sentinel), or
/// an implicit block opened by [`State::layout_on`] and closed by the
/// lexer synthesizing a `VirtualCloseBrace` (which already popped the
/// layout stack, so no manual pop follows here).
pub(crate) fn layout_block<'s, T>(
    state: &mut State<'s>,
    mut parse_item: impl FnMut(&mut State<'s>) -> Result<T, ParseError>,
) -> Result<Vec<T>, ParseError> {
    if state.peek_kind() == TokenKind::LBrace {
        state.bump()?;
        state.layout_off();
        let mut items = Vec::new();
        if state.peek_kind() != TokenKind::RBrace {
            items.push(parse_item(state)?);
            while state.peek_kind() == TokenKind::Semicolon {
                state.bump()?;
                if state.peek_kind() == TokenKind::RBrace {
                    break;
                }
                items.push(parse_item(state)?);
            }
        }
        state.expect(TokenKind::RBrace)?;
        state.layout_end();
        Ok(items)
    } else {
        state.layout_on();
        let mut items = Vec::new();
        if state.peek_kind() != TokenKind::VirtualCloseBrace {
            items.push(parse_item(state)?);
            loop {
                match state.peek_kind() {
                    TokenKind::Semicolon | TokenKind::VirtualSemicolon => {
                        state.bump()?;
                        if state.peek_kind() == TokenKind::VirtualCloseBrace {
                            break;
                        }
                        items.push(parse_item(state)?);
                    }
                    _ => break,
                }
            }
        }
        if state.peek_kind() == TokenKind::VirtualCloseBrace {
            state.bump()?;
        }
        Ok(items)
    }
}
