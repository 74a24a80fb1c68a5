//! Error types for the parser engine (C5) and the Language grammar (C6).

use std::fmt;

use curry_span::Position;
use curry_lexer::TokenKind;

/// An ordinary, recoverable-by-the-caller parse failure: the first syntax
/// error for a translation unit is fatal (no error recovery, per the
/// non-goals), but it is still reported as data rather than a panic.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub position: Position,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, position: Position) -> Self {
        ParseError { kind, position }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParseErrorKind {
    /// A token category other than any expected was found.
    UnexpectedToken { expected: Vec<TokenKind>, found: TokenKind },
    /// One of the specific required-keyword messages named in §4.6
    /// (`"then expected"`, `"else expected"`, `"in expected"`, ...).
    Expected(&'static str),
    Message(String),
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseErrorKind::UnexpectedToken { expected, found } => {
                write!(f, "unexpected {found:?}, expected one of {expected:?}")
            }
            ParseErrorKind::Expected(what) => write!(f, "{what} expected"),
            ParseErrorKind::Message(msg) => write!(f, "{msg}"),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}

impl std::error::Error for ParseError {}

/// A success/success tie at the same input position between the two
/// branches of a non-deterministic (`alt_long`) choice.
#[derive(Debug, Clone, PartialEq)]
pub struct AmbiguityError {
    pub position: Position,
}

impl fmt::Display for AmbiguityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ambiguous parse: two alternatives both matched the same input")
    }
}

impl std::error::Error for AmbiguityError {}

/// Combining two parsers whose first-sets overlap, or where more than one
/// carries an empty action, is a programmer error in the grammar itself
/// (§4.4) -- caught when `Parser::alt` is called, not at grammar-definition
/// time once-and-for-all (this engine rebuilds small parser values per
/// call rather than memoizing a single combinator graph), but still always
/// before any token is consumed by the combination.
#[derive(Debug, Clone, PartialEq)]
pub struct InvariantViolation {
    pub reason: String,
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InvariantViolation: {}", self.reason)
    }
}

impl std::error::Error for InvariantViolation {}
