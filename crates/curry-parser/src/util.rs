//! Shared token-to-AST conversion helpers used across the grammar modules.

use curry_ast::{Ident, Literal, ModuleIdent, QualifiedIdent};
use curry_lexer::{Token, TokenAttrs, TokenKind};
use curry_span::SourceRef;

use crate::error::{ParseError, ParseErrorKind};
use crate::state::State;

/// Consume one `Ident` or `ConsIdent` token (qualified or not) as a plain
/// `Ident`, discarding any module-path prefix. Used where the grammar wants
/// just a binder name (e.g. a data-type's own name), not a reference.
pub fn expect_plain_name(state: &mut State, kind: TokenKind) -> Result<Ident, ParseError> {
    let token = state.expect(kind)?;
    let name = match &token.attrs {
        TokenAttrs::Text(s) => s.clone(),
        TokenAttrs::Qualified { name, .. } => name.clone(),
        _ => unreachable!("identifier token without text attrs"),
    };
    Ok(Ident::new(name, token.position))
}

/// Consume an identifier-shaped token as a possibly-qualified reference.
pub fn expect_qualified(state: &mut State, kind: TokenKind) -> Result<QualifiedIdent, ParseError> {
    let token = state.expect(kind)?;
    Ok(qualified_from_token(&token))
}

pub fn qualified_from_token(token: &Token) -> QualifiedIdent {
    match &token.attrs {
        TokenAttrs::Qualified { module_path, name } => {
            let module = ModuleIdent::new(module_path.clone(), token.position.clone());
            QualifiedIdent::qualified(module, Ident::new(name.clone(), token.position.clone()))
        }
        TokenAttrs::Text(name) => {
            QualifiedIdent::unqualified(Ident::new(name.clone(), token.position.clone()))
        }
        _ => unreachable!("identifier token without text attrs"),
    }
}

/// Parse a dotted module name: `KwModule`-free sequence of `ConsIdent`
/// components already fused into one token by the lexer's qualified-name
/// scanning (`Data.List` lexes as a single `ConsIdent` with a qualified
/// attrs payload only when followed by a lowercase/symbolic tail; a bare
/// module name is the degenerate one-component case).
pub fn expect_module_ident(state: &mut State) -> Result<ModuleIdent, ParseError> {
    let token = state.expect(TokenKind::ConsIdent)?;
    match &token.attrs {
        TokenAttrs::Qualified { module_path, name } => {
            let mut components = module_path.clone();
            components.push(name.clone());
            Ok(ModuleIdent::new(components, token.position))
        }
        TokenAttrs::Text(name) => Ok(ModuleIdent::new(vec![name.clone()], token.position)),
        _ => unreachable!("ConsIdent token without text attrs"),
    }
}

pub fn literal_from_token(state: &mut State, token: Token) -> Literal {
    match token.attrs {
        TokenAttrs::IntLit(value) => {
            let ident = state.fresh_lit_ident(token.position.clone());
            Literal::Int { ident, value, source_ref: SourceRef::default() }
        }
        TokenAttrs::FloatLit(value) => {
            Literal::Float { value, source_ref: SourceRef::default() }
        }
        TokenAttrs::CharLit(value) => {
            Literal::Char { value, source_ref: SourceRef::default() }
        }
        TokenAttrs::StringLit(value) => {
            Literal::Str { value, source_ref: SourceRef::default() }
        }
        _ => unreachable!("literal_from_token called on a non-literal token"),
    }
}

pub fn unexpected(state: &State, expected: &'static str) -> ParseError {
    ParseError::new(ParseErrorKind::Expected(expected), state.position())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expect_plain_name_strips_qualification() {
        let mut state = State::new("f = 1", "T.curry").unwrap();
        let ident = expect_plain_name(&mut state, TokenKind::Ident).unwrap();
        assert_eq!(ident.name, "f");
    }

    #[test]
    fn expect_module_ident_reads_dotted_name() {
        let mut state = State::new("Data.List", "T.curry").unwrap();
        let module = expect_module_ident(&mut state).unwrap();
        assert_eq!(module.dotted(), "Data.List");
    }
}
