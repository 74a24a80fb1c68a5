//! Program-level flat IR types (§3.6): everything but expressions, which
//! live in [`crate::expr`].

use curry_ast::{Ident, ModuleIdent, QualifiedIdent};
use serde::{Deserialize, Serialize};

use crate::expr::Rule;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Visibility {
    Public,
    Private,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Assoc {
    Left,
    Right,
    None,
}

/// A flat module: desugared declarations with no remaining surface-level
/// sugar (sections, list comprehensions, multi-equation functions, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub module_name: ModuleIdent,
    pub imports: Vec<ModuleIdent>,
    pub type_decls: Vec<TypeDecl>,
    pub func_decls: Vec<FuncDecl>,
    pub op_decls: Vec<OpDecl>,
}

/// A type declaration: either an algebraic data type with constructors, or
/// a type synonym expanding to another type expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TypeDecl {
    Algebraic {
        qname: QualifiedIdent,
        visibility: Visibility,
        type_params: Vec<Ident>,
        constructors: Vec<ConsDecl>,
    },
    Synonym {
        qname: QualifiedIdent,
        visibility: Visibility,
        type_params: Vec<Ident>,
        type_expr: TypeExpr,
    },
}

impl TypeDecl {
    pub fn qname(&self) -> &QualifiedIdent {
        match self {
            TypeDecl::Algebraic { qname, .. } | TypeDecl::Synonym { qname, .. } => qname,
        }
    }

    pub fn visibility(&self) -> Visibility {
        match self {
            TypeDecl::Algebraic { visibility, .. } | TypeDecl::Synonym { visibility, .. } => {
                *visibility
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsDecl {
    pub qname: QualifiedIdent,
    pub arity: usize,
    pub visibility: Visibility,
    pub arg_types: Vec<TypeExpr>,
}

/// A flat type expression: a bound type variable by de Bruijn-style index
/// into the enclosing declaration's `type_params`, a constructor applied to
/// zero or more argument types, or a function arrow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TypeExpr {
    Variable(usize),
    Cons(QualifiedIdent, Vec<TypeExpr>),
    Function(Box<TypeExpr>, Box<TypeExpr>),
}

impl TypeExpr {
    /// Number of arrows one can peel before reaching a non-function type.
    pub fn arrow_count(&self) -> usize {
        match self {
            TypeExpr::Function(_, range) => 1 + range.arrow_count(),
            _ => 0,
        }
    }

    /// Peels `n` domains off a function type, returning the remaining
    /// range, or `None` if there are fewer than `n` arrows.
    pub fn peel(&self, n: usize) -> Option<&TypeExpr> {
        if n == 0 {
            return Some(self);
        }
        match self {
            TypeExpr::Function(_, range) => range.peel(n - 1),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpDecl {
    pub qname: QualifiedIdent,
    pub assoc: Assoc,
    pub precedence: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuncDecl {
    pub qname: QualifiedIdent,
    pub arity: usize,
    pub visibility: Visibility,
    pub type_expr: TypeExpr,
    pub rule: Rule,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn qname(name: &str) -> QualifiedIdent {
        crate::test_support::qname(name)
    }

    #[test]
    fn arrow_count_counts_nested_function_arrows() {
        let ty = TypeExpr::Function(
            Box::new(TypeExpr::Variable(0)),
            Box::new(TypeExpr::Function(
                Box::new(TypeExpr::Variable(1)),
                Box::new(TypeExpr::Cons(qname("Int"), Vec::new())),
            )),
        );
        assert_eq!(ty.arrow_count(), 2);
    }

    #[test]
    fn peel_strips_one_domain_per_argument() {
        let result = TypeExpr::Cons(qname("Int"), Vec::new());
        let ty = TypeExpr::Function(
            Box::new(TypeExpr::Variable(0)),
            Box::new(TypeExpr::Function(Box::new(TypeExpr::Variable(1)), Box::new(result.clone()))),
        );
        assert_eq!(ty.peel(2), Some(&result));
        assert_eq!(ty.peel(3), None);
    }

    #[test]
    fn type_decl_selectors_read_through_either_shape() {
        let algebraic = TypeDecl::Algebraic {
            qname: qname("List"),
            visibility: Visibility::Public,
            type_params: Vec::new(),
            constructors: Vec::new(),
        };
        assert_eq!(algebraic.qname().name(), "List");
        assert_eq!(algebraic.visibility(), Visibility::Public);
    }
}
