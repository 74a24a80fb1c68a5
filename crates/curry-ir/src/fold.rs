//! Structural fold for [`Expr`] (§4.7): the single recursion point every
//! selector, tester, updater, and renamer in [`crate::query`] is built on.

use curry_ast::QualifiedIdent;
use curry_span::SourceRef;

use crate::expr::{CaseKind, CombType, Expr, Literal, Pattern};
use crate::program::TypeExpr;

/// One callback per [`Expr`] variant, plus the two auxiliary callbacks the
/// distilled fold calls for (branches, typed), all carried as boxed `Fn`s
/// so a fold can be built up from local closures that capture state.
pub struct ExprFold<R> {
    pub variable: Box<dyn Fn(usize) -> R>,
    pub literal: Box<dyn Fn(&Literal) -> R>,
    pub combined: Box<dyn Fn(CombType, &QualifiedIdent, Vec<R>) -> R>,
    pub let_: Box<dyn Fn(&[usize], Vec<R>, R) -> R>,
    pub free: Box<dyn Fn(&[usize], R) -> R>,
    pub or: Box<dyn Fn(R, R) -> R>,
    pub case: Box<dyn Fn(&SourceRef, CaseKind, R, Vec<R>) -> R>,
    pub branch: Box<dyn Fn(&Pattern, R) -> R>,
    pub typed: Box<dyn Fn(R, &TypeExpr) -> R>,
}

pub fn fold_expr<R>(fold: &ExprFold<R>, expr: &Expr) -> R {
    match expr {
        Expr::Variable(idx) => (fold.variable)(*idx),
        Expr::Literal(lit) => (fold.literal)(lit),
        Expr::Combined(comb, qname, args) => {
            let args = args.iter().map(|a| fold_expr(fold, a)).collect();
            (fold.combined)(*comb, qname, args)
        }
        Expr::Let(bindings, body) => {
            let idxs: Vec<usize> = bindings.iter().map(|(idx, _)| *idx).collect();
            let rhss = bindings.iter().map(|(_, rhs)| fold_expr(fold, rhs)).collect();
            let body = fold_expr(fold, body);
            (fold.let_)(&idxs, rhss, body)
        }
        Expr::Free(vars, body) => {
            let body = fold_expr(fold, body);
            (fold.free)(vars, body)
        }
        Expr::Or(lhs, rhs) => {
            let lhs = fold_expr(fold, lhs);
            let rhs = fold_expr(fold, rhs);
            (fold.or)(lhs, rhs)
        }
        Expr::Case(source_ref, kind, scrutinee, branches) => {
            let scrutinee = fold_expr(fold, scrutinee);
            let branches = branches
                .iter()
                .map(|b| (fold.branch)(&b.pattern, fold_expr(fold, &b.expr)))
                .collect();
            (fold.case)(source_ref, *kind, scrutinee, branches)
        }
        Expr::Typed(inner, ty) => {
            let inner = fold_expr(fold, inner);
            (fold.typed)(inner, ty)
        }
    }
}
