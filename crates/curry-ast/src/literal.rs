//! Literal values, each carrying a source reference per §3.5.

use crate::ident::Ident;
use curry_span::SourceRef;
use serde::{Deserialize, Serialize};

/// A literal in source position. Integer literals carry an attached
/// [`Ident`] rather than a bare number: the Language treats numeric
/// literals as polymorphic over numeric types, and that identity tag is
/// what downstream overload resolution hangs off of (the tag is a
/// placeholder at parse time and gets filled in by elaboration).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    Int { ident: Ident, value: i64, source_ref: SourceRef },
    Float { value: f64, source_ref: SourceRef },
    Char { value: char, source_ref: SourceRef },
    Str { value: String, source_ref: SourceRef },
}

impl Literal {
    pub fn source_ref(&self) -> &SourceRef {
        match self {
            Literal::Int { source_ref, .. }
            | Literal::Float { source_ref, .. }
            | Literal::Char { source_ref, .. }
            | Literal::Str { source_ref, .. } => source_ref,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use curry_span::Position;

    #[test]
    fn int_literal_carries_attached_ident() {
        let lit = Literal::Int {
            ident: Ident::new("_lit0", Position::first("T.curry")),
            value: 42,
            source_ref: SourceRef::default(),
        };
        match &lit {
            Literal::Int { ident, value, .. } => {
                assert_eq!(ident.name, "_lit0");
                assert_eq!(*value, 42);
            }
            _ => panic!("expected Int literal"),
        }
    }
}
