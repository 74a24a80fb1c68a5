//! The fatal-error-plus-warnings channel (`Diagnosed<T>`) threaded through
//! every pipeline stage, plus the `Diagnostic` value it carries.
//!
//! Mirrors a writer-over-result: warnings never stop the computation, a
//! fatal diagnostic always does. Diagnostics from any stage (literate
//! preprocessing, lexing, parsing, IR traversal) funnel through the same
//! small vocabulary here; each stage's own error enum (`LexError`,
//! `ParseError`, ...) converts into a `Diagnostic` at the point it's reported,
//! rather than this crate depending on every stage's crate.

use std::fmt;

use serde::{Deserialize, Serialize};

use curry_span::Position;

/// Which pipeline stage produced a diagnostic, per §7 of the specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticKind {
    Literate,
    Lex,
    Parse,
    Ambiguity,
    SelectorMismatch,
    InvariantViolation,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DiagnosticKind::Literate => "literate",
            DiagnosticKind::Lex => "lex",
            DiagnosticKind::Parse => "parse",
            DiagnosticKind::Ambiguity => "ambiguity",
            DiagnosticKind::SelectorMismatch => "selector",
            DiagnosticKind::InvariantViolation => "invariant",
        };
        write!(f, "{s}")
    }
}

/// A single diagnostic: a stage tag, an optional position, and a message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub position: Position,
    pub message: String,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, position: Position, message: impl Into<String>) -> Self {
        Diagnostic {
            kind,
            position,
            message: message.into(),
        }
    }

    pub fn at(kind: DiagnosticKind, position: &Position, message: impl Into<String>) -> Self {
        Self::new(kind, position.clone(), message)
    }
}

impl fmt::Display for Diagnostic {
    /// `<file>:<line>.<column>: <message>`, falling back to just the message
    /// when the position carries no concrete location.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.position.is_concrete() {
            write!(f, "{}: {}", self.position, self.message)
        } else {
            write!(f, "{}", self.message)
        }
    }
}

impl std::error::Error for Diagnostic {}

/// A result paired with the warnings accumulated alongside it.
///
/// `and_then` only runs its continuation when the current result is `Ok`,
/// and always merges the warning lists from both sides, so warnings survive
/// across a chain of fallible stages regardless of where it eventually
/// fails.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnosed<T> {
    pub result: Result<T, Diagnostic>,
    pub warnings: Vec<Diagnostic>,
}

impl<T> Diagnosed<T> {
    pub fn pure(value: T) -> Self {
        Diagnosed {
            result: Ok(value),
            warnings: Vec::new(),
        }
    }

    pub fn fatal(diagnostic: Diagnostic) -> Self {
        Diagnosed {
            result: Err(diagnostic),
            warnings: Vec::new(),
        }
    }

    /// Append a warning without affecting the result.
    pub fn warn(mut self, diagnostic: Diagnostic) -> Self {
        self.warnings.push(diagnostic);
        self
    }

    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Diagnosed<U> {
        Diagnosed {
            result: self.result.map(f),
            warnings: self.warnings,
        }
    }

    pub fn and_then<U>(self, f: impl FnOnce(T) -> Diagnosed<U>) -> Diagnosed<U> {
        match self.result {
            Ok(value) => {
                let next = f(value);
                let mut warnings = self.warnings;
                warnings.extend(next.warnings);
                Diagnosed {
                    result: next.result,
                    warnings,
                }
            }
            Err(e) => Diagnosed {
                result: Err(e),
                warnings: self.warnings,
            },
        }
    }

    /// Unwrap into the plain `Result`, discarding accumulated warnings --
    /// useful at a boundary that only cares whether the pipeline succeeded.
    pub fn into_result(self) -> Result<T, Diagnostic> {
        self.result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diag(msg: &str) -> Diagnostic {
        Diagnostic::new(DiagnosticKind::Lex, Position::None, msg)
    }

    #[test]
    fn pure_has_no_warnings() {
        let d = Diagnosed::pure(42);
        assert_eq!(d.result, Ok(42));
        assert!(d.warnings.is_empty());
    }

    #[test]
    fn warn_accumulates() {
        let d = Diagnosed::pure(1).warn(diag("careful")).warn(diag("again"));
        assert_eq!(d.warnings.len(), 2);
    }

    #[test]
    fn and_then_short_circuits_on_fatal() {
        let d = Diagnosed::<i32>::fatal(diag("boom"))
            .and_then(|v| Diagnosed::pure(v + 1))
            .warn(diag("late"));
        assert!(d.result.is_err());
        // `warn` after a fatal result still records the warning: it does
        // not inspect `result`, only appends.
        assert_eq!(d.warnings.len(), 1);
    }

    #[test]
    fn and_then_merges_warnings_from_both_sides() {
        let d = Diagnosed::pure(1)
            .warn(diag("first"))
            .and_then(|v| Diagnosed::pure(v + 1).warn(diag("second")));
        assert_eq!(d.result, Ok(2));
        assert_eq!(d.warnings.len(), 2);
    }

    #[test]
    fn display_with_concrete_position() {
        let d = Diagnostic::new(
            DiagnosticKind::Parse,
            Position::first("M.curry"),
            "then expected",
        );
        assert_eq!(d.to_string(), "M.curry:1.1: then expected");
    }

    #[test]
    fn display_without_position() {
        let d = diag("no code in literate script");
        assert_eq!(d.to_string(), "no code in literate script");
    }
}
