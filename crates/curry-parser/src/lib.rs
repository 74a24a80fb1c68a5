//! LL(1) parser combinator engine (C5) and the Language grammar (C6):
//! literate preprocessing, lexing, and parsing a module, converting any
//! fatal failure into a [`curry_diagnostics::Diagnostic`].

pub mod engine;
pub mod error;
mod grammar;
pub mod state;
pub mod util;

use std::borrow::Cow;

use curry_ast::Module;
use curry_diagnostics::{Diagnosed, Diagnostic, DiagnosticKind};
use curry_lexer::{is_literate_extension, literate, LexError};

use crate::error::{AmbiguityError, InvariantViolation, ParseError};
use crate::state::State;

pub use grammar::decl::parse_decl;
pub use grammar::expr::parse_expr;
pub use grammar::module::parse_module as parse_module_items;
pub use grammar::pattern::parse_pattern;
pub use grammar::ty::parse_type;

/// Runs literate preprocessing (when `file`'s extension calls for it),
/// lexing, and the module grammar over `source`, reporting the first fatal
/// error as a `Diagnostic` rather than a panic (§4.6, §7).
pub fn parse_module(source: &str, file: &str) -> Diagnosed<Module> {
    let source: Cow<str> = if is_literate_extension(file) {
        match literate::delitter(source, file) {
            Ok(stripped) => Cow::Owned(stripped),
            Err(e) => {
                return Diagnosed::fatal(Diagnostic::at(
                    DiagnosticKind::Literate,
                    &e.position,
                    e.to_string(),
                ));
            }
        }
    } else {
        Cow::Borrowed(source)
    };

    let mut state = match State::new(&source, file.to_string()) {
        Ok(state) => state,
        Err(e) => return Diagnosed::fatal(lex_error_to_diagnostic(&e)),
    };

    match grammar::module::parse_module(&mut state) {
        Ok(module) => Diagnosed::pure(module),
        Err(e) => Diagnosed::fatal(parse_error_to_diagnostic(&e)),
    }
}

pub fn lex_error_to_diagnostic(e: &LexError) -> Diagnostic {
    Diagnostic::at(DiagnosticKind::Lex, &e.position, e.to_string())
}

pub fn parse_error_to_diagnostic(e: &ParseError) -> Diagnostic {
    Diagnostic::at(DiagnosticKind::Parse, &e.position, e.to_string())
}

pub fn ambiguity_error_to_diagnostic(e: &AmbiguityError) -> Diagnostic {
    Diagnostic::at(DiagnosticKind::Ambiguity, &e.position, e.to_string())
}

pub fn invariant_violation_to_diagnostic(e: &InvariantViolation, position: curry_span::Position) -> Diagnostic {
    Diagnostic::at(DiagnosticKind::InvariantViolation, &position, e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_minimal_module() {
        let diagnosed = parse_module("module Main where\nmain = 1\n", "Main.curry");
        assert!(diagnosed.is_ok());
        let module = diagnosed.into_result().unwrap();
        assert_eq!(module.name.dotted(), "Main");
        assert_eq!(module.decls.len(), 1);
    }

    #[test]
    fn lex_error_becomes_a_lex_diagnostic() {
        let diagnosed = parse_module("x = §", "Bad.curry");
        let err = diagnosed.into_result().unwrap_err();
        assert_eq!(err.kind, DiagnosticKind::Lex);
    }

    #[test]
    fn syntax_error_becomes_a_parse_diagnostic() {
        let diagnosed = parse_module("x = ", "Bad.curry");
        let err = diagnosed.into_result().unwrap_err();
        assert_eq!(err.kind, DiagnosticKind::Parse);
    }

    #[test]
    fn literate_file_is_preprocessed_before_lexing() {
        let diagnosed = parse_module("Comment text\n\n> x = 1\n", "Lit.lcurry");
        assert!(diagnosed.is_ok());
    }

    #[test]
    fn malformed_literate_file_becomes_a_literate_diagnostic() {
        let diagnosed = parse_module("> x = 1\nadjacent comment\n", "Bad.lcurry");
        let err = diagnosed.into_result().unwrap_err();
        assert_eq!(err.kind, DiagnosticKind::Literate);
    }
}
