//! Shared test fixtures, not part of the public API.

use curry_ast::{Ident, QualifiedIdent};
use curry_span::Position;

pub fn pos() -> Position {
    Position::first("T.curry")
}

pub fn qname(name: &str) -> QualifiedIdent {
    QualifiedIdent::unqualified(Ident::new(name, pos()))
}
