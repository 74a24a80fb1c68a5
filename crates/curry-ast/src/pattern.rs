//! Surface patterns.

use crate::ident::{Ident, QualifiedIdent};
use crate::literal::Literal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Pattern {
    Literal(Literal),
    /// `-`/`-.` directly followed by a numeric literal, parsed as one
    /// pattern rather than unary minus applied to a literal pattern.
    NegLiteral(Literal),
    Var(Ident),
    Constructor(QualifiedIdent, Vec<Pattern>),
    Infix(Box<Pattern>, QualifiedIdent, Box<Pattern>),
    Paren(Box<Pattern>),
    Record(QualifiedIdent, Vec<FieldPattern>),
    Tuple(Vec<Pattern>),
    List(Vec<Pattern>),
    As(Ident, Box<Pattern>),
    Lazy(Box<Pattern>),
    FunctionPattern(QualifiedIdent, Vec<Pattern>),
    InfixFunctionPattern(Box<Pattern>, QualifiedIdent, Box<Pattern>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldPattern {
    pub field: QualifiedIdent,
    pub pattern: Pattern,
}

#[cfg(test)]
mod tests {
    use super::*;
    use curry_span::{Position, SourceRef};

    fn ident(name: &str) -> Ident {
        Ident::new(name, Position::first("T.curry"))
    }

    fn qident(name: &str) -> QualifiedIdent {
        QualifiedIdent::unqualified(ident(name))
    }

    #[test]
    fn neg_literal_is_distinct_from_literal() {
        let lit = Literal::Int { ident: ident("_lit0"), value: 1, source_ref: SourceRef::default() };
        let p1 = Pattern::Literal(lit.clone());
        let p2 = Pattern::NegLiteral(lit);
        assert_ne!(p1, p2);
    }

    #[test]
    fn constructor_pattern_holds_subpatterns() {
        let p = Pattern::Constructor(qident("Just"), vec![Pattern::Var(ident("x"))]);
        match p {
            Pattern::Constructor(c, args) => {
                assert_eq!(c.name(), "Just");
                assert_eq!(args.len(), 1);
            }
            _ => panic!("expected constructor pattern"),
        }
    }
}
