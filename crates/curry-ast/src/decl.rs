//! Top-level and local declarations (§3.5: data, newtype, type-synonym,
//! type-signature, function, foreign, external, pattern, free, fixity).
//!
//! The same `Decl` enum serves both module-level and `where`/`let`-local
//! declaration lists; the grammar doesn't distinguish the two syntactically
//! beyond which forms are legal in which position, and that restriction is
//! a parser concern, not a data-model one.

use crate::expr::Rhs;
use crate::ident::Ident;
use crate::pattern::Pattern;
use crate::ty::TypeExpr;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Decl {
    Data(DataDecl),
    Newtype(NewtypeDecl),
    TypeSyn(TypeSynDecl),
    TypeSig(TypeSigDecl),
    Function(FunctionDecl),
    Foreign(ForeignDecl),
    External(ExternalDecl),
    Pattern(PatternDecl),
    Free(FreeDecl),
    Fixity(FixityDecl),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataDecl {
    pub name: Ident,
    pub type_params: Vec<Ident>,
    pub constructors: Vec<ConstructorDecl>,
}

/// `exist_vars` is retained on every constructor even though the grammar
/// never populates it with anything but an empty list; see the recorded
/// open-question decision in this crate's design notes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstructorDecl {
    pub name: Ident,
    pub exist_vars: Vec<Ident>,
    pub arg_types: Vec<TypeExpr>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewtypeDecl {
    pub name: Ident,
    pub type_params: Vec<Ident>,
    pub constructor: ConstructorDecl,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeSynDecl {
    pub name: Ident,
    pub type_params: Vec<Ident>,
    pub type_expr: TypeExpr,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeSigDecl {
    pub names: Vec<Ident>,
    pub type_expr: TypeExpr,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDecl {
    pub name: Ident,
    pub equations: Vec<Equation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equation {
    pub lhs: Lhs,
    pub rhs: Rhs,
}

/// A left-hand side in exactly the shape the source text presented (§4.6):
/// the parser never normalizes one shape into another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Lhs {
    Prefix { name: Ident, params: Vec<Pattern> },
    Infix { left: Box<Pattern>, op: Ident, right: Box<Pattern> },
    Applied { base: Box<Lhs>, params: Vec<Pattern> },
}

impl Lhs {
    /// The function name this left-hand side ultimately binds, looked up
    /// through any `Applied` wrapping.
    pub fn function_name(&self) -> &Ident {
        match self {
            Lhs::Prefix { name, .. } => name,
            Lhs::Infix { op, .. } => op,
            Lhs::Applied { base, .. } => base.function_name(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForeignDecl {
    pub name: Ident,
    pub type_expr: TypeExpr,
    pub entity: String,
}

/// A declaration that marks a function as implemented outside the module
/// (no equations follow).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalDecl {
    pub name: Ident,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternDecl {
    pub pattern: Pattern,
    pub rhs: Rhs,
}

/// A local `free` declaration, introducing unbound logic variables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FreeDecl {
    pub vars: Vec<Ident>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Assoc {
    Left,
    Right,
    None,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixityDecl {
    pub assoc: Assoc,
    pub precedence: Option<u8>,
    pub ops: Vec<Ident>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use curry_span::Position;

    fn ident(name: &str) -> Ident {
        Ident::new(name, Position::first("T.curry"))
    }

    #[test]
    fn applied_lhs_resolves_function_name_through_wrapping() {
        let base = Lhs::Prefix { name: ident("compose"), params: vec![] };
        let applied = Lhs::Applied { base: Box::new(base), params: vec![] };
        assert_eq!(applied.function_name().name, "compose");
    }

    #[test]
    fn infix_lhs_names_the_operator() {
        let lhs = Lhs::Infix {
            left: Box::new(Pattern::Var(ident("x"))),
            op: ident("+++"),
            right: Box::new(Pattern::Var(ident("y"))),
        };
        assert_eq!(lhs.function_name().name, "+++");
    }
}
