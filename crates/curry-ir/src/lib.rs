//! Flat desugared IR (C8) and the traversal framework built over it (C9):
//! a structural fold, per-variant selectors/testers/updaters, qualified-name
//! rewriting, module renaming, variable renumbering, free-variable
//! computation, `typeOf`, and the `ground`/`whnf` predicates.

pub mod error;
pub mod expr;
pub mod fold;
pub mod goodies;
pub mod program;
pub mod query;

#[cfg(test)]
mod test_support;

pub use error::IrError;
pub use expr::{Branch, CaseKind, CombType, Expr, Literal, Pattern, Rule};
pub use fold::{fold_expr, ExprFold};
pub use program::{Assoc, ConsDecl, FuncDecl, OpDecl, Program, TypeDecl, TypeExpr, Visibility};
pub use query::{
    free_vars, is_ground, is_whnf, rename_program, renumber_vars, renumber_vars_expr, type_of,
    upd_qnames, upd_qnames_expr,
};
