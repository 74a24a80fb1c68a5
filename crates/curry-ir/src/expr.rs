//! Flat IR expressions (§3.6): the desugared core every surface expression
//! form elaborates to. Variables are de Bruijn-style indices rather than
//! names, so a rule's parameter count is exactly its bound variable range.

use curry_ast::{Ident, QualifiedIdent};
use curry_span::SourceRef;
use serde::{Deserialize, Serialize};

use crate::program::TypeExpr;

/// A function's defining rule: either a set of desugared parameters and a
/// body, or a foreign binding to an external symbol name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Rule {
    Defined { params: Vec<usize>, body: Expr },
    External(String),
}

/// Literals at the flat-IR level carry no string form: string literals are
/// elaborated to character lists before reaching this layer. Integer
/// literals keep the attached identity tag from the surface AST, since
/// overload resolution upstream of this IR hangs off it; float and char
/// literals carry a plain source reference instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    Int { ident: Ident, value: i64 },
    Float { source_ref: SourceRef, value: f64 },
    Char { source_ref: SourceRef, value: char },
}

/// Which combinator kind a `combined` expression invokes, and whether it is
/// fully or partially applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombType {
    FuncCall,
    FuncPartCall(usize),
    ConsCall,
    ConsPartCall(usize),
}

impl CombType {
    pub fn missing(self) -> usize {
        match self {
            CombType::FuncPartCall(n) | CombType::ConsPartCall(n) => n,
            CombType::FuncCall | CombType::ConsCall => 0,
        }
    }

    pub fn is_func(self) -> bool {
        matches!(self, CombType::FuncCall | CombType::FuncPartCall(_))
    }

    pub fn is_cons(self) -> bool {
        matches!(self, CombType::ConsCall | CombType::ConsPartCall(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CaseKind {
    Rigid,
    Flex,
}

/// A structural match pattern in a case branch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Pattern {
    Constructor(QualifiedIdent, Vec<usize>),
    Literal(Literal),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Branch {
    pub pattern: Pattern,
    pub expr: Expr,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    Variable(usize),
    Literal(Literal),
    Combined(CombType, QualifiedIdent, Vec<Expr>),
    Let(Vec<(usize, Expr)>, Box<Expr>),
    Free(Vec<usize>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
    Case(SourceRef, CaseKind, Box<Expr>, Vec<Branch>),
    Typed(Box<Expr>, TypeExpr),
}
