//! Surface type expressions.

use crate::ident::{Ident, QualifiedIdent};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TypeExpr {
    Var(Ident),
    Cons(QualifiedIdent, Vec<TypeExpr>),
    Tuple(Vec<TypeExpr>),
    List(Box<TypeExpr>),
    Arrow(Box<TypeExpr>, Box<TypeExpr>),
    Paren(Box<TypeExpr>),
}

impl TypeExpr {
    /// Flattens a chain of `Arrow` nodes into argument types, left to right.
    pub fn arg_types(&self) -> Vec<&TypeExpr> {
        let mut args = Vec::new();
        let mut cur = self;
        while let TypeExpr::Arrow(domain, range) = cur {
            args.push(domain.as_ref());
            cur = range.as_ref();
        }
        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use curry_span::Position;

    fn ident(name: &str) -> Ident {
        Ident::new(name, Position::first("T.curry"))
    }

    #[test]
    fn arrow_chain_flattens_to_arg_types() {
        let ty = TypeExpr::Arrow(
            Box::new(TypeExpr::Var(ident("a"))),
            Box::new(TypeExpr::Arrow(
                Box::new(TypeExpr::Var(ident("b"))),
                Box::new(TypeExpr::Var(ident("c"))),
            )),
        );
        assert_eq!(ty.arg_types().len(), 2);
    }
}
