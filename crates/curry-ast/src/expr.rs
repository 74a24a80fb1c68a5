//! Surface expressions, statements, and right-hand sides.
//!
//! Right-hand sides are shared between function equations (`decl.rs`) and
//! case alternatives (this module), so both live where they're read most:
//! `Rhs` here, referenced from `decl::Equation` and `Alt` alike.

use crate::decl::Decl;
use crate::ident::QualifiedIdent;
use crate::literal::Literal;
use crate::pattern::Pattern;
use crate::ty::TypeExpr;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    Literal(Literal),
    Var(QualifiedIdent),
    Constructor(QualifiedIdent),
    Paren(Box<Expr>),
    Typed(Box<Expr>, TypeExpr),
    Record(QualifiedIdent, Vec<FieldExpr>),
    RecordUpdate(Box<Expr>, Vec<FieldExpr>),
    Tuple(Vec<Expr>),
    List(Vec<Expr>),
    ListComp(Box<Expr>, Vec<Stmt>),
    EnumFrom(Box<Expr>),
    EnumFromThen(Box<Expr>, Box<Expr>),
    EnumFromTo(Box<Expr>, Box<Expr>),
    EnumFromThenTo(Box<Expr>, Box<Expr>, Box<Expr>),
    UnaryMinus(Box<Expr>),
    Apply(Box<Expr>, Box<Expr>),
    InfixApply(Box<Expr>, QualifiedIdent, Box<Expr>),
    LeftSection(Box<Expr>, QualifiedIdent),
    RightSection(QualifiedIdent, Box<Expr>),
    Lambda(Vec<Pattern>, Box<Expr>),
    Let(Vec<Decl>, Box<Expr>),
    Do(Vec<Stmt>),
    If(Box<Expr>, Box<Expr>, Box<Expr>),
    Case(CaseKind, Box<Expr>, Vec<Alt>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldExpr {
    pub field: QualifiedIdent,
    pub expr: Expr,
}

/// A statement shared by do-blocks and list comprehensions (§4.6): a bare
/// expression (a boolean guard, in comprehension position), a group of
/// local declarations, or a pattern bind (`pat <- expr`, do-only).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Stmt {
    Expr(Expr),
    Decl(Vec<Decl>),
    Bind(Pattern, Expr),
}

/// `case` is rigid (suspends on an unbound scrutinee); `fcase` is flex (may
/// narrow it).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CaseKind {
    Rigid,
    Flex,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alt {
    pub pattern: Pattern,
    pub rhs: Rhs,
}

/// The right-hand side of an equation or case alternative: a single
/// expression, or a list of boolean-guarded alternatives tried in order;
/// either way, bringing its own `where`-bound local declarations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Rhs {
    Simple(Expr, Vec<Decl>),
    Guarded(Vec<GuardedExpr>, Vec<Decl>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuardedExpr {
    pub guard: Expr,
    pub expr: Expr,
}

#[cfg(test)]
mod tests {
    use super::*;
    use curry_span::{Position, SourceRef};

    fn qident(name: &str) -> QualifiedIdent {
        QualifiedIdent::unqualified(crate::ident::Ident::new(name, Position::first("T.curry")))
    }

    #[test]
    fn case_kind_distinguishes_rigid_and_flex() {
        assert_ne!(CaseKind::Rigid, CaseKind::Flex);
    }

    #[test]
    fn rhs_simple_carries_where_bindings() {
        let lit = Literal::Int {
            ident: crate::ident::Ident::new("_lit0", Position::first("T.curry")),
            value: 1,
            source_ref: SourceRef::default(),
        };
        let rhs = Rhs::Simple(Expr::Literal(lit), Vec::new());
        match rhs {
            Rhs::Simple(_, decls) => assert!(decls.is_empty()),
            _ => panic!("expected simple rhs"),
        }
    }

    #[test]
    fn enum_from_to_holds_both_bounds() {
        let e = Expr::EnumFromTo(
            Box::new(Expr::Var(qident("lo"))),
            Box::new(Expr::Var(qident("hi"))),
        );
        assert!(matches!(e, Expr::EnumFromTo(_, _)));
    }
}
