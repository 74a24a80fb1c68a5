//! Expressions, statements, and right-hand sides (§3.5, §4.6).
//!
//! Operator precedence is resolved by a standard precedence-climb over the
//! fixity table threaded through `State` (populated by `infixl`/`infixr`/
//! `infix` declarations seen earlier in the same module); an operator with
//! no declaration defaults to `infixl 9`, matching ordinary application
//! binding tighter than any declared operator.

use curry_ast::{Alt, CaseKind, Decl, Expr, FieldExpr, GuardedExpr, QualifiedIdent, Rhs, Stmt};
use curry_lexer::TokenKind;

use crate::error::ParseError;
use crate::grammar::decl::{merge_function_equations, parse_local_decl};
use crate::grammar::layout_block;
use crate::grammar::pattern::{parse_apattern, parse_pattern, starts_apattern};
use crate::grammar::ty::parse_type;
use crate::state::{Assoc, State};
use crate::util::{expect_qualified, literal_from_token, unexpected};

pub fn parse_expr(state: &mut State) -> Result<Expr, ParseError> {
    let e = parse_op_expr(state, 0)?;
    maybe_typed(state, e)
}

fn maybe_typed(state: &mut State, e: Expr) -> Result<Expr, ParseError> {
    if state.peek_kind() == TokenKind::DoubleColon {
        state.bump()?;
        let ty = parse_type(state)?;
        Ok(Expr::Typed(Box::new(e), ty))
    } else {
        Ok(e)
    }
}

fn is_operator_start(state: &State) -> bool {
    matches!(state.peek_kind(), TokenKind::SymbolicIdent | TokenKind::Backtick)
}

fn parse_operator(state: &mut State) -> Result<QualifiedIdent, ParseError> {
    if state.peek_kind() == TokenKind::Backtick {
        state.bump()?;
        let name = expect_qualified(state, TokenKind::Ident)?;
        state.expect(TokenKind::Backtick)?;
        Ok(name)
    } else {
        expect_qualified(state, TokenKind::SymbolicIdent)
    }
}

fn parse_op_expr(state: &mut State, min_prec: u8) -> Result<Expr, ParseError> {
    let left = parse_unary_or_app(state)?;
    parse_op_expr_from(state, left, min_prec)
}

fn parse_op_expr_from(state: &mut State, mut left: Expr, min_prec: u8) -> Result<Expr, ParseError> {
    loop {
        if !is_operator_start(state) {
            break;
        }
        let op_name = peek_operator_text(state);
        let fixity = state.fixity_of(&op_name);
        if fixity.precedence < min_prec {
            break;
        }
        let op = parse_operator(state)?;
        let next_min = match fixity.assoc {
            Assoc::Left | Assoc::None => fixity.precedence + 1,
            Assoc::Right => fixity.precedence,
        };
        let right = parse_op_expr(state, next_min)?;
        left = Expr::InfixApply(Box::new(left), op, Box::new(right));
    }
    Ok(left)
}

fn peek_operator_text(state: &State) -> String {
    state.peek().attrs.as_text().unwrap_or_default().to_string()
}

/// `lexp ::= '-' app | app` -- unary minus binds looser than application
/// (`-f x` parses as `-(f x)`) but is otherwise a plain prefix form, not
/// folded into the general infix machinery.
fn parse_unary_or_app(state: &mut State) -> Result<Expr, ParseError> {
    if state.peek_kind() == TokenKind::SymbolicIdent
        && state.peek().attrs.as_text() == Some("-")
    {
        state.bump()?;
        let operand = parse_unary_or_app(state)?;
        return Ok(Expr::UnaryMinus(Box::new(operand)));
    }
    parse_app(state)
}

fn parse_app(state: &mut State) -> Result<Expr, ParseError> {
    let mut e = parse_aexpr(state)?;
    while starts_aexpr(state) {
        let arg = parse_aexpr(state)?;
        e = Expr::Apply(Box::new(e), Box::new(arg));
    }
    Ok(e)
}

fn starts_aexpr(state: &State) -> bool {
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
            | TokenKind::Backslash
            | TokenKind::KwLet
            | TokenKind::KwDo
            | TokenKind::KwIf
            | TokenKind::KwCase
            | TokenKind::KwFcase
    )
}

fn parse_aexpr(state: &mut State) -> Result<Expr, ParseError> {
    let e = match state.peek_kind() {
        TokenKind::IntLit | TokenKind::FloatLit | TokenKind::CharLit | TokenKind::StringLit => {
            let token = state.bump()?;
            Expr::Literal(literal_from_token(state, token))
        }
        TokenKind::Ident => {
            let name = expect_qualified(state, TokenKind::Ident)?;
            Expr::Var(name)
        }
        TokenKind::ConsIdent => {
            let name = expect_qualified(state, TokenKind::ConsIdent)?;
            if state.peek_kind() == TokenKind::LBrace {
                return parse_record_construct(state, name);
            }
            Expr::Constructor(name)
        }
        TokenKind::LParen => return parse_paren_expr(state),
        TokenKind::LBracket => parse_bracket_expr(state)?,
        TokenKind::Backslash => return parse_lambda(state),
        TokenKind::KwLet => return parse_let_expr(state),
        TokenKind::KwDo => return parse_do_expr(state),
        TokenKind::KwIf => return parse_if_expr(state),
        TokenKind::KwCase => return parse_case_expr(state, CaseKind::Rigid),
        TokenKind::KwFcase => return parse_case_expr(state, CaseKind::Flex),
        _ => return Err(unexpected(state, "expression")),
    };
    if state.peek_kind() == TokenKind::LBrace {
        return parse_record_update(state, e);
    }
    Ok(e)
}

fn parse_record_construct(state: &mut State, name: QualifiedIdent) -> Result<Expr, ParseError> {
    let fields = parse_field_list(state)?;
    Ok(Expr::Record(name, fields))
}

fn parse_record_update(state: &mut State, target: Expr) -> Result<Expr, ParseError> {
    let fields = parse_field_list(state)?;
    Ok(Expr::RecordUpdate(Box::new(target), fields))
}

fn parse_field_list(state: &mut State) -> Result<Vec<FieldExpr>, ParseError> {
    state.expect(TokenKind::LBrace)?;
    let mut fields = Vec::new();
    if state.peek_kind() != TokenKind::RBrace {
        fields.push(parse_field_expr(state)?);
        while state.peek_kind() == TokenKind::Comma {
            state.bump()?;
            fields.push(parse_field_expr(state)?);
        }
    }
    state.expect(TokenKind::RBrace)?;
    Ok(fields)
}

fn parse_field_expr(state: &mut State) -> Result<FieldExpr, ParseError> {
    let field = expect_qualified(state, TokenKind::Ident)?;
    state.expect(TokenKind::Equals)?;
    let expr = parse_expr(state)?;
    Ok(FieldExpr { field, expr })
}

/// Parenthesized expressions, tuples, and operator sections (`(1+)`,
/// `(+1)`, `(+)`).
fn parse_paren_expr(state: &mut State) -> Result<Expr, ParseError> {
    state.expect(TokenKind::LParen)?;
    if state.peek_kind() == TokenKind::RParen {
        state.bump()?;
        return Ok(Expr::Tuple(Vec::new()));
    }
    if is_operator_start(state) {
        let op = parse_operator(state)?;
        if state.peek_kind() == TokenKind::RParen {
            state.bump()?;
            return Ok(Expr::Var(op));
        }
        let rhs = parse_op_expr(state, 0)?;
        state.expect(TokenKind::RParen)?;
        return Ok(Expr::RightSection(op, Box::new(rhs)));
    }

    let first = parse_unary_or_app(state)?;
    if is_operator_start(state) {
        let mut probe = state.clone();
        let op = parse_operator(&mut probe)?;
        if probe.peek_kind() == TokenKind::RParen {
            *state = probe;
            state.bump()?;
            return Ok(Expr::LeftSection(Box::new(first), op));
        }
    }

    let full = parse_op_expr_from(state, first, 0)?;
    let full = maybe_typed(state, full)?;
    if state.peek_kind() == TokenKind::Comma {
        let mut items = vec![full];
        while state.peek_kind() == TokenKind::Comma {
            state.bump()?;
            items.push(parse_expr(state)?);
        }
        state.expect(TokenKind::RParen)?;
        return Ok(Expr::Tuple(items));
    }
    state.expect(TokenKind::RParen)?;
    Ok(Expr::Paren(Box::new(full)))
}

/// List literals, enumerations, and list comprehensions -- all introduced
/// by `[`, disambiguated only after the first element is parsed.
fn parse_bracket_expr(state: &mut State) -> Result<Expr, ParseError> {
    state.expect(TokenKind::LBracket)?;
    if state.peek_kind() == TokenKind::RBracket {
        state.bump()?;
        return Ok(Expr::List(Vec::new()));
    }
    let first = parse_expr(state)?;
    match state.peek_kind() {
        TokenKind::Pipe => {
            state.bump()?;
            let stmts = parse_comma_stmts(state)?;
            state.expect(TokenKind::RBracket)?;
            Ok(Expr::ListComp(Box::new(first), stmts))
        }
        TokenKind::DotDot => {
            state.bump()?;
            if state.peek_kind() == TokenKind::RBracket {
                state.bump()?;
                Ok(Expr::EnumFrom(Box::new(first)))
            } else {
                let to = parse_expr(state)?;
                state.expect(TokenKind::RBracket)?;
                Ok(Expr::EnumFromTo(Box::new(first), Box::new(to)))
            }
        }
        TokenKind::Comma => {
            state.bump()?;
            let second = parse_expr(state)?;
            if state.peek_kind() == TokenKind::DotDot {
                state.bump()?;
                if state.peek_kind() == TokenKind::RBracket {
                    state.bump()?;
                    Ok(Expr::EnumFromThen(Box::new(first), Box::new(second)))
                } else {
                    let to = parse_expr(state)?;
                    state.expect(TokenKind::RBracket)?;
                    Ok(Expr::EnumFromThenTo(Box::new(first), Box::new(second), Box::new(to)))
                }
            } else {
                let mut items = vec![first, second];
                while state.peek_kind() == TokenKind::Comma {
                    state.bump()?;
                    items.push(parse_expr(state)?);
                }
                state.expect(TokenKind::RBracket)?;
                Ok(Expr::List(items))
            }
        }
        TokenKind::RBracket => {
            state.bump()?;
            Ok(Expr::List(vec![first]))
        }
        _ => Err(unexpected(state, "`,`, `..`, `|`, or `]`")),
    }
}

fn parse_comma_stmts(state: &mut State) -> Result<Vec<Stmt>, ParseError> {
    let mut stmts = vec![parse_stmt(state)?];
    while state.peek_kind() == TokenKind::Comma {
        state.bump()?;
        stmts.push(parse_stmt(state)?);
    }
    Ok(stmts)
}

fn parse_lambda(state: &mut State) -> Result<Expr, ParseError> {
    state.expect(TokenKind::Backslash)?;
    let mut params = vec![parse_apattern(state)?];
    while starts_apattern(state) {
        params.push(parse_apattern(state)?);
    }
    state.expect(TokenKind::Arrow)?;
    let body = parse_expr(state)?;
    Ok(Expr::Lambda(params, Box::new(body)))
}

fn parse_let_expr(state: &mut State) -> Result<Expr, ParseError> {
    state.expect(TokenKind::KwLet)?;
    let decls = parse_layout_decls(state)?;
    if state.peek_kind() != TokenKind::KwIn {
        return Err(unexpected(state, "in"));
    }
    state.bump()?;
    let body = parse_expr(state)?;
    Ok(Expr::Let(decls, Box::new(body)))
}

fn parse_do_expr(state: &mut State) -> Result<Expr, ParseError> {
    state.expect(TokenKind::KwDo)?;
    let stmts = layout_block(state, parse_stmt)?;
    Ok(Expr::Do(stmts))
}

fn parse_if_expr(state: &mut State) -> Result<Expr, ParseError> {
    state.expect(TokenKind::KwIf)?;
    let cond = parse_expr(state)?;
    if state.peek_kind() != TokenKind::KwThen {
        return Err(unexpected(state, "then"));
    }
    state.bump()?;
    let then_branch = parse_expr(state)?;
    if state.peek_kind() != TokenKind::KwElse {
        return Err(unexpected(state, "else"));
    }
    state.bump()?;
    let else_branch = parse_expr(state)?;
    Ok(Expr::If(Box::new(cond), Box::new(then_branch), Box::new(else_branch)))
}

fn parse_case_expr(state: &mut State, kind: CaseKind) -> Result<Expr, ParseError> {
    state.bump()?; // `case` or `fcase`
    let scrutinee = parse_expr(state)?;
    if state.peek_kind() != TokenKind::KwOf {
        return Err(unexpected(state, "of"));
    }
    state.bump()?;
    let alts = layout_block(state, parse_alt)?;
    Ok(Expr::Case(kind, Box::new(scrutinee), alts))
}

fn parse_alt(state: &mut State) -> Result<Alt, ParseError> {
    let pattern = parse_pattern(state)?;
    let rhs = parse_rhs(state, TokenKind::Arrow)?;
    Ok(Alt { pattern, rhs })
}

/// `rhs ::= '=' expr ['where' decls] | ('|' expr '=' expr)+ ['where' decls]`
/// for equations; case alternatives use the same shape with `->` in place
/// of `=` (passed in as `sep`).
pub(crate) fn parse_rhs(state: &mut State, sep: TokenKind) -> Result<Rhs, ParseError> {
    if state.peek_kind() == TokenKind::Pipe {
        let mut guards = Vec::new();
        while state.peek_kind() == TokenKind::Pipe {
            state.bump()?;
            let guard = parse_expr(state)?;
            state.expect(sep)?;
            let expr = parse_expr(state)?;
            guards.push(GuardedExpr { guard, expr });
        }
        let decls = parse_opt_where(state)?;
        Ok(Rhs::Guarded(guards, decls))
    } else {
        state.expect(sep)?;
        let expr = parse_expr(state)?;
        let decls = parse_opt_where(state)?;
        Ok(Rhs::Simple(expr, decls))
    }
}

fn parse_opt_where(state: &mut State) -> Result<Vec<Decl>, ParseError> {
    if state.peek_kind() == TokenKind::KwWhere {
        state.bump()?;
        parse_layout_decls(state)
    } else {
        Ok(Vec::new())
    }
}

pub(crate) fn parse_layout_decls(state: &mut State) -> Result<Vec<Decl>, ParseError> {
    let decls = layout_block(state, parse_local_decl)?;
    Ok(merge_function_equations(decls))
}

/// A do-block or list-comprehension statement: a bare expression (a
/// boolean guard, in comprehension position), a group of local
/// declarations, or a pattern bind -- disambiguated from a `let`-expression
/// statement by whether `in` follows the bindings (§4.6).
fn parse_stmt(state: &mut State) -> Result<Stmt, ParseError> {
    if state.peek_kind() == TokenKind::KwLet {
        state.bump()?;
        let decls = parse_layout_decls(state)?;
        if state.peek_kind() == TokenKind::KwIn {
            state.bump()?;
            let body = parse_expr(state)?;
            return Ok(Stmt::Expr(Expr::Let(decls, Box::new(body))));
        }
        return Ok(Stmt::Decl(decls));
    }

    // `pattern <- expr` and a bare expression overlap completely on plain
    // variables and constructors; only the `<-` token disambiguates them,
    // so try the bind shape speculatively against a clone first.
    let mut probe = state.clone();
    if let Ok(pattern) = parse_pattern(&mut probe) {
        if probe.peek_kind() == TokenKind::LeftArrow {
            *state = probe;
            state.bump()?; // `<-`
            let expr = parse_expr(state)?;
            return Ok(Stmt::Bind(pattern, expr));
        }
    }
    let expr = parse_expr(state)?;
    Ok(Stmt::Expr(expr))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(src: &str) -> Expr {
        let mut state = State::new(src, "T.curry").unwrap();
        parse_expr(&mut state).unwrap()
    }

    #[test]
    fn application_is_left_associative() {
        match parse("f x y") {
            Expr::Apply(lhs, _) => assert!(matches!(*lhs, Expr::Apply(_, _))),
            other => panic!("expected nested application, got {other:?}"),
        }
    }

    #[test]
    fn default_fixity_makes_application_bind_tighter_than_operators() {
        // `f x + 1` should parse as `(f x) + 1`, not `f (x + 1)`.
        match parse("f x + 1") {
            Expr::InfixApply(lhs, op, _) => {
                assert_eq!(op.name(), "+");
                assert!(matches!(*lhs, Expr::Apply(_, _)));
            }
            other => panic!("expected infix application, got {other:?}"),
        }
    }

    #[test]
    fn declared_right_associativity_is_honored() {
        let mut state = State::new("a +++ b +++ c", "T.curry").unwrap();
        state.declare_fixity("+++".into(), crate::state::Fixity {
            assoc: Assoc::Right,
            precedence: 5,
        });
        let e = parse_expr(&mut state).unwrap();
        match e {
            Expr::InfixApply(_, _, rhs) => assert!(matches!(*rhs, Expr::InfixApply(_, _, _))),
            other => panic!("expected right-associated chain, got {other:?}"),
        }
    }

    #[test]
    fn unary_minus_binds_looser_than_application() {
        match parse("- f x") {
            Expr::UnaryMinus(operand) => assert!(matches!(*operand, Expr::Apply(_, _))),
            other => panic!("expected unary minus wrapping an application, got {other:?}"),
        }
    }

    #[test]
    fn if_then_else_requires_all_three_keywords() {
        let mut state = State::new("if True then 1 else 2", "T.curry").unwrap();
        assert!(parse_expr(&mut state).is_ok());
        let mut missing_else = State::new("if True then 1", "T.curry").unwrap();
        assert!(parse_expr(&mut missing_else).is_err());
    }

    #[test]
    fn left_and_right_sections() {
        assert!(matches!(parse("(1+)"), Expr::LeftSection(_, _)));
        assert!(matches!(parse("(+1)"), Expr::RightSection(_, _)));
    }

    #[test]
    fn enumeration_forms() {
        assert!(matches!(parse("[1..]"), Expr::EnumFrom(_)));
        assert!(matches!(parse("[1..10]"), Expr::EnumFromTo(_, _)));
        assert!(matches!(parse("[1,3..]"), Expr::EnumFromThen(_, _)));
        assert!(matches!(parse("[1,3..9]"), Expr::EnumFromThenTo(_, _, _)));
    }

    #[test]
    fn list_comprehension_and_bind_statement() {
        match parse("[x | x <- xs]") {
            Expr::ListComp(_, stmts) => {
                assert_eq!(stmts.len(), 1);
                assert!(matches!(stmts[0], Stmt::Bind(_, _)));
            }
            other => panic!("expected list comprehension, got {other:?}"),
        }
    }

    #[test]
    fn fcase_is_flex_case_is_rigid() {
        assert!(matches!(
            parse("case x of { y -> y }"),
            Expr::Case(CaseKind::Rigid, _, _)
        ));
        assert!(matches!(
            parse("fcase x of { y -> y }"),
            Expr::Case(CaseKind::Flex, _, _)
        ));
    }
}
