//! Module header: pragmas, module name, optional export list, imports
//! (§4.6).

use curry_ast::{
    ExportItem, ExportSub, ImportDecl, ImportItem, ImportSpec, LanguageExtension, Module, Pragma,
};
use curry_lexer::{TokenAttrs, TokenKind};

use crate::error::ParseError;
use crate::grammar::decl::{merge_function_equations, parse_decl};
use crate::grammar::layout_block;
use crate::state::State;
use crate::util::{expect_module_ident, expect_plain_name, unexpected};

/// Extensions this grammar recognizes by name; anything else still parses,
/// just as `LanguageExtension::Unknown`.
const KNOWN_EXTENSIONS: &[&str] = &["CPP", "NoImplicitPrelude", "FunctionalPatterns"];

enum BodyItem {
    Import(ImportDecl),
    Decl(curry_ast::Decl),
}

pub fn parse_module(state: &mut State) -> Result<Module, ParseError> {
    let pragmas = parse_pragmas(state)?;
    let (name, exports) = if state.peek_kind() == TokenKind::KwModule {
        state.bump()?;
        let name = expect_module_ident(state)?;
        let exports =
            if state.peek_kind() == TokenKind::LParen { Some(parse_export_list(state)?) } else { None };
        if state.peek_kind() != TokenKind::KwWhere {
            return Err(unexpected(state, "where"));
        }
        state.bump()?;
        (name, exports)
    } else {
        (curry_ast::ModuleIdent::new(vec![Module::DEFAULT_NAME.to_string()], state.position()), None)
    };

    let items = layout_block(state, parse_body_item)?;
    let mut imports = Vec::new();
    let mut decls = Vec::new();
    for item in items {
        match item {
            BodyItem::Import(i) => imports.push(i),
            BodyItem::Decl(d) => decls.push(d),
        }
    }
    let decls = merge_function_equations(decls);
    Ok(Module { pragmas, name, exports, imports, decls })
}

fn parse_body_item(state: &mut State) -> Result<BodyItem, ParseError> {
    if state.peek_kind() == TokenKind::KwImport {
        Ok(BodyItem::Import(parse_import_decl(state)?))
    } else {
        Ok(BodyItem::Decl(parse_decl(state)?))
    }
}

fn parse_pragmas(state: &mut State) -> Result<Vec<Pragma>, ParseError> {
    let mut pragmas = Vec::new();
    loop {
        match state.peek_kind() {
            TokenKind::PragmaLanguage => {
                let token = state.bump()?;
                match token.attrs {
                    TokenAttrs::LanguagePragma(exts) => {
                        let exts = exts.into_iter().map(classify_extension).collect();
                        pragmas.push(Pragma::Language(exts));
                    }
                    _ => unreachable!("PragmaLanguage token without LanguagePragma attrs"),
                }
            }
            TokenKind::PragmaOptions => {
                let token = state.bump()?;
                match token.attrs {
                    TokenAttrs::OptionsPragma { tool, args } => {
                        pragmas.push(Pragma::Options { tool, args });
                    }
                    _ => unreachable!("PragmaOptions token without OptionsPragma attrs"),
                }
            }
            _ => break,
        }
    }
    Ok(pragmas)
}

fn classify_extension(name: String) -> LanguageExtension {
    if KNOWN_EXTENSIONS.contains(&name.as_str()) {
        LanguageExtension::Known(name)
    } else {
        LanguageExtension::Unknown(name)
    }
}

fn parse_export_list(state: &mut State) -> Result<Vec<ExportItem>, ParseError> {
    state.expect(TokenKind::LParen)?;
    let mut items = Vec::new();
    if state.peek_kind() != TokenKind::RParen {
        items.push(parse_export_item(state)?);
        while state.peek_kind() == TokenKind::Comma {
            state.bump()?;
            if state.peek_kind() == TokenKind::RParen {
                break;
            }
            items.push(parse_export_item(state)?);
        }
    }
    state.expect(TokenKind::RParen)?;
    Ok(items)
}

fn parse_export_item(state: &mut State) -> Result<ExportItem, ParseError> {
    match state.peek_kind() {
        TokenKind::KwModule => {
            state.bump()?;
            Ok(ExportItem::Module(expect_module_ident(state)?))
        }
        TokenKind::ConsIdent => {
            let name = crate::util::expect_qualified(state, TokenKind::ConsIdent)?;
            let sub = parse_opt_export_sub(state)?;
            Ok(ExportItem::TypeOrClass(name, sub))
        }
        TokenKind::Ident | TokenKind::LParen => {
            let name = parse_export_var_name(state)?;
            Ok(ExportItem::Var(name))
        }
        _ => Err(unexpected(state, "export item")),
    }
}

fn parse_export_var_name(state: &mut State) -> Result<curry_ast::QualifiedIdent, ParseError> {
    if state.peek_kind() == TokenKind::LParen {
        state.bump()?;
        let name = crate::util::expect_qualified(state, TokenKind::SymbolicIdent)?;
        state.expect(TokenKind::RParen)?;
        Ok(name)
    } else {
        crate::util::expect_qualified(state, TokenKind::Ident)
    }
}

fn parse_opt_export_sub(state: &mut State) -> Result<Option<ExportSub>, ParseError> {
    if state.peek_kind() != TokenKind::LParen {
        return Ok(None);
    }
    state.bump()?;
    if state.peek_kind() == TokenKind::DotDot {
        state.bump()?;
        state.expect(TokenKind::RParen)?;
        return Ok(Some(ExportSub::All));
    }
    let mut names = Vec::new();
    if state.peek_kind() != TokenKind::RParen {
        names.push(expect_plain_name(state, TokenKind::ConsIdent).or_else(|_| {
            expect_plain_name(state, TokenKind::Ident)
        })?);
        while state.peek_kind() == TokenKind::Comma {
            state.bump()?;
            names.push(
                expect_plain_name(state, TokenKind::ConsIdent)
                    .or_else(|_| expect_plain_name(state, TokenKind::Ident))?,
            );
        }
    }
    state.expect(TokenKind::RParen)?;
    Ok(Some(ExportSub::Some(names)))
}

fn parse_import_decl(state: &mut State) -> Result<ImportDecl, ParseError> {
    state.bump()?; // `import`
    let qualified = if state.peek_kind() == TokenKind::KwQualified {
        state.bump()?;
        true
    } else {
        false
    };
    let module = expect_module_ident(state)?;
    let alias = if state.peek_kind() == TokenKind::KwAs {
        state.bump()?;
        Some(expect_module_ident(state)?)
    } else {
        None
    };
    let spec = if state.peek_kind() == TokenKind::KwHiding {
        state.bump()?;
        Some(ImportSpec::Hiding(parse_import_item_list(state)?))
    } else if state.peek_kind() == TokenKind::LParen {
        Some(ImportSpec::Only(parse_import_item_list(state)?))
    } else {
        None
    };
    Ok(ImportDecl { qualified, module, alias, spec })
}

fn parse_import_item_list(state: &mut State) -> Result<Vec<ImportItem>, ParseError> {
    state.expect(TokenKind::LParen)?;
    let mut items = Vec::new();
    if state.peek_kind() != TokenKind::RParen {
        items.push(parse_import_item(state)?);
        while state.peek_kind() == TokenKind::Comma {
            state.bump()?;
            if state.peek_kind() == TokenKind::RParen {
                break;
            }
            items.push(parse_import_item(state)?);
        }
    }
    state.expect(TokenKind::RParen)?;
    Ok(items)
}

fn parse_import_item(state: &mut State) -> Result<ImportItem, ParseError> {
    match state.peek_kind() {
        TokenKind::ConsIdent => {
            let name = expect_plain_name(state, TokenKind::ConsIdent)?;
            let sub = parse_opt_export_sub(state)?;
            Ok(ImportItem::TypeOrClass(name, sub))
        }
        TokenKind::LParen => {
            state.bump()?;
            let name = expect_plain_name(state, TokenKind::SymbolicIdent)?;
            state.expect(TokenKind::RParen)?;
            Ok(ImportItem::Var(name))
        }
        _ => Ok(ImportItem::Var(expect_plain_name(state, TokenKind::Ident)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(src: &str) -> Module {
        let mut state = State::new(src, "T.curry").unwrap();
        parse_module(&mut state).unwrap()
    }

    #[test]
    fn header_absent_defaults_module_name() {
        let m = parse("x = 1");
        assert_eq!(m.name.dotted(), Module::DEFAULT_NAME);
        assert_eq!(m.decls.len(), 1);
    }

    #[test]
    fn explicit_header_with_exports_and_imports() {
        let m = parse(
            "module Foo (bar, Baz(..)) where\nimport Data.List\nimport qualified Data.Map as M\nbar = 1",
        );
        assert_eq!(m.name.dotted(), "Foo");
        assert_eq!(m.exports.as_ref().unwrap().len(), 2);
        assert_eq!(m.imports.len(), 2);
        assert!(m.imports[1].qualified);
        assert!(m.imports[1].alias.is_some());
    }

    #[test]
    fn language_pragma_classifies_known_and_unknown_extensions() {
        let mut state = State::new("{-# LANGUAGE CPP, FooBar #-}\nmodule M where\nx = 1", "T.curry")
            .unwrap();
        let module = parse_module(&mut state).unwrap();
        match &module.pragmas[0] {
            Pragma::Language(exts) => {
                assert_eq!(exts[0], LanguageExtension::Known("CPP".into()));
                assert_eq!(exts[1], LanguageExtension::Unknown("FooBar".into()));
            }
            other => panic!("expected a language pragma, got {other:?}"),
        }
    }

    #[test]
    fn hiding_import_is_recognized() {
        let m = parse("import Data.List hiding (sort)\nx = 1");
        assert!(matches!(m.imports[0].spec, Some(ImportSpec::Hiding(_))));
    }
}
