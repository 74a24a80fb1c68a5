use std::fmt;

use curry_span::Position;

/// A literate-preprocessing error (§4.1): empty script, or a Program line
/// adjacent to a Comment line.
#[derive(Debug, Clone, PartialEq)]
pub struct LiterateError {
    pub kind: LiterateErrorKind,
    pub position: Position,
}

impl LiterateError {
    pub fn new(kind: LiterateErrorKind, position: Position) -> Self {
        LiterateError { kind, position }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LiterateErrorKind {
    NoCode,
    PrecededByComment,
    FollowedByComment,
}

impl fmt::Display for LiterateErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiterateErrorKind::NoCode => write!(f, "No code in literate script"),
            LiterateErrorKind::PrecededByComment => {
                write!(f, "Program line is preceded by comment line")
            }
            LiterateErrorKind::FollowedByComment => {
                write!(f, "Program line is followed by comment line")
            }
        }
    }
}

impl fmt::Display for LiterateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}

impl std::error::Error for LiterateError {}

/// A lexer error with location information.
///
/// Errors are not recovered from: the first one halts lexing and becomes the
/// translation unit's fatal diagnostic.
#[derive(Debug, Clone, PartialEq)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub position: Position,
}

impl LexError {
    pub fn new(kind: LexErrorKind, position: Position) -> Self {
        LexError { kind, position }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LexErrorKind {
    UnexpectedCharacter(char),
    UnterminatedString,
    UnterminatedChar,
    UnterminatedBlockComment,
    UnterminatedPragma,
    InvalidEscapeSequence(char),
    InvalidNumberLiteral(String),
    EmptyCharLiteral,
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexErrorKind::UnexpectedCharacter(c) => write!(f, "unexpected character: {c:?}"),
            LexErrorKind::UnterminatedString => write!(f, "unterminated string literal"),
            LexErrorKind::UnterminatedChar => write!(f, "unterminated character literal"),
            LexErrorKind::UnterminatedBlockComment => write!(f, "unterminated block comment"),
            LexErrorKind::UnterminatedPragma => write!(f, "unterminated pragma"),
            LexErrorKind::InvalidEscapeSequence(c) => write!(f, "invalid escape sequence: \\{c}"),
            LexErrorKind::InvalidNumberLiteral(s) => write!(f, "invalid number literal: {s}"),
            LexErrorKind::EmptyCharLiteral => write!(f, "empty character literal"),
        }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}

impl std::error::Error for LexError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lex_error_display() {
        let err = LexError::new(
            LexErrorKind::UnexpectedCharacter('@'),
            Position::first("M.curry"),
        );
        assert_eq!(err.to_string(), "unexpected character: '@'");
    }

    #[test]
    fn literate_error_display_all_variants() {
        assert_eq!(
            LiterateErrorKind::NoCode.to_string(),
            "No code in literate script"
        );
        assert_eq!(
            LiterateErrorKind::PrecededByComment.to_string(),
            "Program line is preceded by comment line"
        );
        assert_eq!(
            LiterateErrorKind::FollowedByComment.to_string(),
            "Program line is followed by comment line"
        );
    }
}
