//! Declarations (§3.5: data, newtype, type-synonym, type-signature,
//! function, foreign, external, pattern, free, fixity) and the three
//! left-hand-side shapes equations can take (§4.6).

use curry_ast::{
    Assoc as AstAssoc, ConstructorDecl, DataDecl, Decl, Equation, ExternalDecl, FixityDecl,
    ForeignDecl, FreeDecl, FunctionDecl, Ident, Lhs, NewtypeDecl, Pattern, PatternDecl,
    TypeSigDecl, TypeSynDecl,
};
use curry_lexer::{TokenAttrs, TokenKind};
use rustc_hash::FxHashMap;

use crate::error::ParseError;
use crate::grammar::expr::parse_rhs;
use crate::grammar::pattern::{parse_apattern, starts_apattern};
use crate::grammar::ty::{parse_atype, parse_type, starts_atype};
use crate::state::{Assoc as StateAssoc, Fixity, State};
use crate::util::expect_plain_name;

/// Any declaration legal at module scope.
pub fn parse_decl(state: &mut State) -> Result<Decl, ParseError> {
    match state.peek_kind() {
        TokenKind::KwData => parse_data_decl(state),
        TokenKind::KwNewtype => parse_newtype_decl(state),
        TokenKind::KwType => parse_type_syn_decl(state),
        TokenKind::KwForeign => parse_foreign_decl(state),
        TokenKind::KwExternal => parse_external_decl(state),
        _ => parse_local_decl(state),
    }
}

/// The subset of [`parse_decl`] legal inside a `where`/`let` block: no
/// data/newtype/type-synonym/foreign/external declarations, matching how
/// those forms are module-scope-only in the source language this grammar
/// is modeled on.
pub(crate) fn parse_local_decl(state: &mut State) -> Result<Decl, ParseError> {
    match state.peek_kind() {
        TokenKind::KwInfixl | TokenKind::KwInfixr | TokenKind::KwInfix => parse_fixity_decl(state),
        TokenKind::KwFree => parse_free_decl(state),
        _ => parse_binding_decl(state),
    }
}

fn parse_data_decl(state: &mut State) -> Result<Decl, ParseError> {
    state.bump()?; // `data`
    let name = expect_plain_name(state, TokenKind::ConsIdent)?;
    let type_params = parse_type_params(state)?;
    let mut constructors = Vec::new();
    if state.peek_kind() == TokenKind::Equals {
        state.bump()?;
        constructors.push(parse_constructor_decl(state)?);
        while state.peek_kind() == TokenKind::Pipe {
            state.bump()?;
            constructors.push(parse_constructor_decl(state)?);
        }
    }
    Ok(Decl::Data(DataDecl { name, type_params, constructors }))
}

fn parse_newtype_decl(state: &mut State) -> Result<Decl, ParseError> {
    state.bump()?; // `newtype`
    let name = expect_plain_name(state, TokenKind::ConsIdent)?;
    let type_params = parse_type_params(state)?;
    state.expect(TokenKind::Equals)?;
    let constructor = parse_constructor_decl(state)?;
    Ok(Decl::Newtype(NewtypeDecl { name, type_params, constructor }))
}

fn parse_type_syn_decl(state: &mut State) -> Result<Decl, ParseError> {
    state.bump()?; // `type`
    let name = expect_plain_name(state, TokenKind::ConsIdent)?;
    let type_params = parse_type_params(state)?;
    state.expect(TokenKind::Equals)?;
    let type_expr = parse_type(state)?;
    Ok(Decl::TypeSyn(TypeSynDecl { name, type_params, type_expr }))
}

fn parse_type_params(state: &mut State) -> Result<Vec<Ident>, ParseError> {
    let mut params = Vec::new();
    while state.peek_kind() == TokenKind::Ident {
        params.push(expect_plain_name(state, TokenKind::Ident)?);
    }
    Ok(params)
}

fn parse_constructor_decl(state: &mut State) -> Result<ConstructorDecl, ParseError> {
    let name = expect_plain_name(state, TokenKind::ConsIdent)?;
    let mut arg_types = Vec::new();
    while starts_atype(state) {
        arg_types.push(parse_atype(state)?);
    }
    Ok(ConstructorDecl { name, exist_vars: Vec::new(), arg_types })
}

fn parse_foreign_decl(state: &mut State) -> Result<Decl, ParseError> {
    state.bump()?; // `foreign`
    let name = expect_plain_name(state, TokenKind::Ident)?;
    state.expect(TokenKind::DoubleColon)?;
    let type_expr = parse_type(state)?;
    let entity_token = state.expect(TokenKind::StringLit)?;
    let entity = match entity_token.attrs {
        TokenAttrs::StringLit(s) => s,
        _ => unreachable!("StringLit token without string attrs"),
    };
    Ok(Decl::Foreign(ForeignDecl { name, type_expr, entity }))
}

fn parse_external_decl(state: &mut State) -> Result<Decl, ParseError> {
    state.bump()?; // `external`
    let name = expect_plain_name(state, TokenKind::Ident)?;
    Ok(Decl::External(ExternalDecl { name }))
}

fn parse_free_decl(state: &mut State) -> Result<Decl, ParseError> {
    state.bump()?; // `free`
    let mut vars = vec![expect_plain_name(state, TokenKind::Ident)?];
    while state.peek_kind() == TokenKind::Comma {
        state.bump()?;
        vars.push(expect_plain_name(state, TokenKind::Ident)?);
    }
    Ok(Decl::Free(FreeDecl { vars }))
}

fn parse_fixity_decl(state: &mut State) -> Result<Decl, ParseError> {
    let assoc = match state.peek_kind() {
        TokenKind::KwInfixl => AstAssoc::Left,
        TokenKind::KwInfixr => AstAssoc::Right,
        TokenKind::KwInfix => AstAssoc::None,
        _ => unreachable!("parse_fixity_decl called off an infix keyword"),
    };
    state.bump()?;
    let precedence = if state.peek_kind() == TokenKind::IntLit {
        let token = state.bump()?;
        match token.attrs {
            TokenAttrs::IntLit(v) => Some(v as u8),
            _ => None,
        }
    } else {
        None
    };
    let mut ops = vec![parse_fixity_operator(state)?];
    while state.peek_kind() == TokenKind::Comma {
        state.bump()?;
        ops.push(parse_fixity_operator(state)?);
    }

    // The climb in `grammar::expr` consults `State`'s fixity table, so the
    // declaration must register immediately, not only once the whole
    // module has been parsed.
    let fixity = Fixity {
        assoc: match assoc {
            AstAssoc::Left => StateAssoc::Left,
            AstAssoc::Right => StateAssoc::Right,
            AstAssoc::None => StateAssoc::None,
        },
        precedence: precedence.unwrap_or(9),
    };
    for op in &ops {
        state.declare_fixity(op.name.clone(), fixity);
    }
    Ok(Decl::Fixity(FixityDecl { assoc, precedence, ops }))
}

fn parse_fixity_operator(state: &mut State) -> Result<Ident, ParseError> {
    if state.peek_kind() == TokenKind::Backtick {
        state.bump()?;
        let name = expect_plain_name(state, TokenKind::Ident)?;
        state.expect(TokenKind::Backtick)?;
        Ok(name)
    } else {
        expect_plain_name(state, TokenKind::SymbolicIdent)
    }
}

fn is_infix_op_start(state: &State) -> bool {
    matches!(state.peek_kind(), TokenKind::SymbolicIdent | TokenKind::Backtick)
}

fn parse_lhs_operator(state: &mut State) -> Result<Ident, ParseError> {
    if state.peek_kind() == TokenKind::Backtick {
        state.bump()?;
        let name = expect_plain_name(state, TokenKind::Ident)?;
        state.expect(TokenKind::Backtick)?;
        Ok(name)
    } else {
        expect_plain_name(state, TokenKind::SymbolicIdent)
    }
}

/// Either a type signature, a function equation, or a pattern binding --
/// the three overlap completely on a bare leading variable, so a type
/// signature is tried first (speculatively, via a cloned probe) before
/// falling back to the equation/pattern grammar.
fn parse_binding_decl(state: &mut State) -> Result<Decl, ParseError> {
    if let Some(decl) = try_parse_type_sig(state)? {
        return Ok(decl);
    }
    parse_equation_or_pattern_decl(state)
}

fn try_parse_type_sig(state: &mut State) -> Result<Option<Decl>, ParseError> {
    let mut probe = state.clone();
    if let Ok(names) = parse_var_list(&mut probe) {
        if probe.peek_kind() == TokenKind::DoubleColon {
            *state = probe;
            state.bump()?; // `::`
            let type_expr = parse_type(state)?;
            return Ok(Some(Decl::TypeSig(TypeSigDecl { names, type_expr })));
        }
    }
    Ok(None)
}

fn parse_var_list(state: &mut State) -> Result<Vec<Ident>, ParseError> {
    let mut names = vec![expect_plain_name(state, TokenKind::Ident)?];
    while state.peek_kind() == TokenKind::Comma {
        state.bump()?;
        names.push(expect_plain_name(state, TokenKind::Ident)?);
    }
    Ok(names)
}

fn parse_equation_or_pattern_decl(state: &mut State) -> Result<Decl, ParseError> {
    if state.peek_kind() == TokenKind::Ident {
        let name = expect_plain_name(state, TokenKind::Ident)?;
        let mut params = Vec::new();
        while starts_apattern(state) {
            params.push(parse_apattern(state)?);
        }
        if params.is_empty() && is_infix_op_start(state) {
            let op = parse_lhs_operator(state)?;
            let right = parse_apattern(state)?;
            let lhs = wrap_extra_params(
                state,
                Lhs::Infix { left: Box::new(Pattern::Var(name)), op, right: Box::new(right) },
            )?;
            return finish_equation(state, lhs);
        }
        finish_equation(state, Lhs::Prefix { name, params })
    } else {
        let left = parse_apattern(state)?;
        if is_infix_op_start(state) {
            let op = parse_lhs_operator(state)?;
            let right = parse_apattern(state)?;
            let lhs = wrap_extra_params(state, Lhs::Infix { left: Box::new(left), op, right: Box::new(right) })?;
            return finish_equation(state, lhs);
        }
        let rhs = parse_rhs(state, TokenKind::Equals)?;
        Ok(Decl::Pattern(PatternDecl { pattern: left, rhs }))
    }
}

fn wrap_extra_params(state: &mut State, base: Lhs) -> Result<Lhs, ParseError> {
    if starts_apattern(state) {
        let mut params = Vec::new();
        while starts_apattern(state) {
            params.push(parse_apattern(state)?);
        }
        Ok(Lhs::Applied { base: Box::new(base), params })
    } else {
        Ok(base)
    }
}

fn finish_equation(state: &mut State, lhs: Lhs) -> Result<Decl, ParseError> {
    let rhs = parse_rhs(state, TokenKind::Equals)?;
    let name = lhs.function_name().clone();
    Ok(Decl::Function(FunctionDecl { name, equations: vec![Equation { lhs, rhs }] }))
}

/// A layout block yields one `Decl::Function` per textual equation;
/// clauses belonging to the same function are folded into one
/// `FunctionDecl` here, keeping first-occurrence order.
pub(crate) fn merge_function_equations(decls: Vec<Decl>) -> Vec<Decl> {
    let mut order: Vec<Decl> = Vec::with_capacity(decls.len());
    let mut index_by_name: FxHashMap<String, usize> = FxHashMap::default();
    for decl in decls {
        match decl {
            Decl::Function(FunctionDecl { name, mut equations }) => {
                if let Some(&i) = index_by_name.get(&name.name) {
                    if let Decl::Function(existing) = &mut order[i] {
                        existing.equations.append(&mut equations);
                        continue;
                    }
                }
                index_by_name.insert(name.name.clone(), order.len());
                order.push(Decl::Function(FunctionDecl { name, equations }));
            }
            other => order.push(other),
        }
    }
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(src: &str) -> Decl {
        let mut state = State::new(src, "T.curry").unwrap();
        parse_decl(&mut state).unwrap()
    }

    #[test]
    fn data_decl_with_multiple_constructors() {
        match parse("data Maybe a = Nothing | Just a") {
            Decl::Data(d) => {
                assert_eq!(d.name.name, "Maybe");
                assert_eq!(d.type_params.len(), 1);
                assert_eq!(d.constructors.len(), 2);
                assert_eq!(d.constructors[1].arg_types.len(), 1);
            }
            other => panic!("expected data decl, got {other:?}"),
        }
    }

    #[test]
    fn type_signature_is_not_confused_with_a_caf() {
        match parse("f :: Int -> Int") {
            Decl::TypeSig(sig) => assert_eq!(sig.names[0].name, "f"),
            other => panic!("expected type signature, got {other:?}"),
        }
    }

    #[test]
    fn zero_arg_binding_is_a_prefix_function_equation() {
        match parse("x = 1") {
            Decl::Function(f) => {
                assert_eq!(f.name.name, "x");
                assert!(matches!(f.equations[0].lhs, Lhs::Prefix { .. }));
            }
            other => panic!("expected function decl, got {other:?}"),
        }
    }

    #[test]
    fn structural_pattern_binding() {
        match parse("(a, b) = pair") {
            Decl::Pattern(p) => assert!(matches!(p.pattern, Pattern::Tuple(_))),
            other => panic!("expected pattern decl, got {other:?}"),
        }
    }

    #[test]
    fn prefix_function_with_params() {
        match parse("map f (x:xs) = f x : map f xs") {
            Decl::Function(d) => {
                match &d.equations[0].lhs {
                    Lhs::Prefix { name, params } => {
                        assert_eq!(name.name, "map");
                        assert_eq!(params.len(), 2);
                    }
                    other => panic!("expected prefix lhs, got {other:?}"),
                }
            }
            other => panic!("expected function decl, got {other:?}"),
        }
    }

    #[test]
    fn infix_function_equation() {
        match parse("x +++ y = x") {
            Decl::Function(d) => {
                assert_eq!(d.name.name, "+++");
                assert!(matches!(d.equations[0].lhs, Lhs::Infix { .. }));
            }
            other => panic!("expected function decl, got {other:?}"),
        }
    }

    #[test]
    fn fixity_decl_is_registered_immediately() {
        let mut state = State::new("infixr 5 +++", "T.curry").unwrap();
        let decl = parse_decl(&mut state).unwrap();
        assert!(matches!(decl, Decl::Fixity(_)));
        assert_eq!(state.fixity_of("+++").precedence, 5);
    }

    #[test]
    fn equations_for_the_same_name_are_merged() {
        let decls = vec![
            {
                let mut state = State::new("f Nothing = 0", "T.curry").unwrap();
                parse_decl(&mut state).unwrap()
            },
            {
                let mut state = State::new("f (Just x) = x", "T.curry").unwrap();
                parse_decl(&mut state).unwrap()
            },
        ];
        let merged = merge_function_equations(decls);
        assert_eq!(merged.len(), 1);
        match &merged[0] {
            Decl::Function(f) => assert_eq!(f.equations.len(), 2),
            other => panic!("expected a single merged function decl, got {other:?}"),
        }
    }
}
