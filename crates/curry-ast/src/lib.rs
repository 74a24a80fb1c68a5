//! The surface AST data model (C7): a plain value tree produced by
//! `curry-parser` and consumed by the flat-IR desugaring pass and the
//! `curryc --dump-ast` driver command.
//!
//! Unlike a lossless CST, nodes here carry only the position information
//! identifiers and literals need (§3.5); there is no token-level green tree
//! to reconstruct source text from, since this library performs no
//! source-to-source transformation.

pub mod decl;
pub mod expr;
pub mod ident;
pub mod literal;
pub mod module;
pub mod pattern;
pub mod ty;

pub use decl::{
    Assoc, ConstructorDecl, DataDecl, Decl, Equation, ExternalDecl, FixityDecl, ForeignDecl,
    FreeDecl, FunctionDecl, Lhs, NewtypeDecl, PatternDecl, TypeSigDecl, TypeSynDecl,
};
pub use expr::{Alt, CaseKind, Expr, FieldExpr, GuardedExpr, Rhs, Stmt};
pub use ident::{Ident, ModuleIdent, QualifiedIdent};
pub use literal::Literal;
pub use module::{ExportItem, ExportSub, ImportDecl, ImportItem, ImportSpec, LanguageExtension, Module, Pragma};
pub use pattern::{FieldPattern, Pattern};
pub use ty::TypeExpr;
