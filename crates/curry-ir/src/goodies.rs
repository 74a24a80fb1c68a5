//! Per-variant selectors, testers, and updaters over the flat IR (§4.7).
//!
//! Product-type projections are plain field accesses on the generated
//! structs -- Rust structs already are the selector family the distilled
//! spec calls `Goodies` for products, so only the sum types (the ones with
//! more than one shape) get named accessors here.

use crate::error::IrError;
use crate::expr::{Expr, Literal, Pattern, Rule};
use crate::program::TypeDecl;

impl Expr {
    pub fn is_variable(&self) -> bool {
        matches!(self, Expr::Variable(_))
    }
    pub fn as_variable(&self) -> Result<usize, IrError> {
        match self {
            Expr::Variable(idx) => Ok(*idx),
            other => Err(mismatch("asVariable", other)),
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Expr::Literal(_))
    }
    pub fn as_literal(&self) -> Result<&Literal, IrError> {
        match self {
            Expr::Literal(lit) => Ok(lit),
            other => Err(mismatch("asLiteral", other)),
        }
    }

    pub fn is_combined(&self) -> bool {
        matches!(self, Expr::Combined(..))
    }
    pub fn as_combined(
        &self,
    ) -> Result<(crate::expr::CombType, &curry_ast::QualifiedIdent, &[Expr]), IrError> {
        match self {
            Expr::Combined(comb, qname, args) => Ok((*comb, qname, args)),
            other => Err(mismatch("asCombined", other)),
        }
    }

    pub fn is_let(&self) -> bool {
        matches!(self, Expr::Let(..))
    }
    pub fn as_let(&self) -> Result<(&[(usize, Expr)], &Expr), IrError> {
        match self {
            Expr::Let(bindings, body) => Ok((bindings, body)),
            other => Err(mismatch("asLet", other)),
        }
    }

    pub fn is_free(&self) -> bool {
        matches!(self, Expr::Free(..))
    }
    pub fn as_free(&self) -> Result<(&[usize], &Expr), IrError> {
        match self {
            Expr::Free(vars, body) => Ok((vars, body)),
            other => Err(mismatch("asFree", other)),
        }
    }

    pub fn is_or(&self) -> bool {
        matches!(self, Expr::Or(..))
    }
    pub fn as_or(&self) -> Result<(&Expr, &Expr), IrError> {
        match self {
            Expr::Or(lhs, rhs) => Ok((lhs, rhs)),
            other => Err(mismatch("asOr", other)),
        }
    }

    pub fn is_case(&self) -> bool {
        matches!(self, Expr::Case(..))
    }
    pub fn as_case(
        &self,
    ) -> Result<
        (&curry_span::SourceRef, crate::expr::CaseKind, &Expr, &[crate::expr::Branch]),
        IrError,
    > {
        match self {
            Expr::Case(source_ref, kind, scrutinee, branches) => {
                Ok((source_ref, *kind, scrutinee, branches))
            }
            other => Err(mismatch("asCase", other)),
        }
    }

    pub fn is_typed(&self) -> bool {
        matches!(self, Expr::Typed(..))
    }
    pub fn as_typed(&self) -> Result<(&Expr, &crate::program::TypeExpr), IrError> {
        match self {
            Expr::Typed(inner, ty) => Ok((inner, ty)),
            other => Err(mismatch("asTyped", other)),
        }
    }
}

fn mismatch(op: &'static str, found: &Expr) -> IrError {
    let shape = match found {
        Expr::Variable(_) => "variable",
        Expr::Literal(_) => "literal",
        Expr::Combined(..) => "combined",
        Expr::Let(..) => "let",
        Expr::Free(..) => "free",
        Expr::Or(..) => "or",
        Expr::Case(..) => "case",
        Expr::Typed(..) => "typed",
    };
    IrError::selector_mismatch(op, format!("found a {shape} expression"))
}

impl Rule {
    pub fn is_defined(&self) -> bool {
        matches!(self, Rule::Defined { .. })
    }
    pub fn as_defined(&self) -> Result<(&[usize], &Expr), IrError> {
        match self {
            Rule::Defined { params, body } => Ok((params, body)),
            Rule::External(_) => {
                Err(IrError::selector_mismatch("asDefined", "found an external rule"))
            }
        }
    }

    pub fn is_external(&self) -> bool {
        matches!(self, Rule::External(_))
    }
    pub fn as_external(&self) -> Result<&str, IrError> {
        match self {
            Rule::External(name) => Ok(name),
            Rule::Defined { .. } => {
                Err(IrError::selector_mismatch("asExternal", "found a defined rule"))
            }
        }
    }
}

impl Pattern {
    pub fn is_constructor(&self) -> bool {
        matches!(self, Pattern::Constructor(..))
    }
    pub fn as_constructor(&self) -> Result<(&curry_ast::QualifiedIdent, &[usize]), IrError> {
        match self {
            Pattern::Constructor(qname, vars) => Ok((qname, vars)),
            Pattern::Literal(_) => {
                Err(IrError::selector_mismatch("asConstructorPattern", "found a literal pattern"))
            }
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Pattern::Literal(_))
    }
    pub fn as_literal(&self) -> Result<&Literal, IrError> {
        match self {
            Pattern::Literal(lit) => Ok(lit),
            Pattern::Constructor(..) => {
                Err(IrError::selector_mismatch("asLiteralPattern", "found a constructor pattern"))
            }
        }
    }
}

impl TypeDecl {
    pub fn is_algebraic(&self) -> bool {
        matches!(self, TypeDecl::Algebraic { .. })
    }
    pub fn is_synonym(&self) -> bool {
        matches!(self, TypeDecl::Synonym { .. })
    }
}

/// `updExprs`: rewrites every immediate sub-expression of a [`Rule`] through
/// `f`, applied once per call -- callers fold `f` itself with [`crate::fold::fold_expr`]
/// when a full-depth rewrite is wanted.
pub fn update_rule_body(rule: Rule, f: impl FnOnce(Expr) -> Expr) -> Rule {
    match rule {
        Rule::Defined { params, body } => Rule::Defined { params, body: f(body) },
        Rule::External(name) => Rule::External(name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::CombType;

    #[test]
    fn as_variable_succeeds_on_a_variable() {
        assert_eq!(Expr::Variable(3).as_variable().unwrap(), 3);
    }

    #[test]
    fn as_variable_fails_with_the_goodies_message_shape() {
        let err = Expr::Literal(Literal::Int {
            ident: curry_ast::Ident::new("_lit0", crate::test_support::pos()),
            value: 1,
        })
        .as_variable()
        .unwrap_err();
        assert!(err.to_string().starts_with("Goodies.asVariable:"));
    }

    #[test]
    fn as_combined_exposes_comb_type_head_and_args() {
        let e = Expr::Combined(CombType::FuncCall, crate::test_support::qname("f"), vec![Expr::Variable(0)]);
        let (comb, qname, args) = e.as_combined().unwrap();
        assert_eq!(comb, CombType::FuncCall);
        assert_eq!(qname.name(), "f");
        assert_eq!(args.len(), 1);
    }

    #[test]
    fn rule_selectors_distinguish_defined_from_external() {
        let defined = Rule::Defined { params: vec![0], body: Expr::Variable(0) };
        assert!(defined.is_defined());
        assert!(defined.as_external().is_err());

        let external = Rule::External("prim_add".into());
        assert!(external.is_external());
        assert!(external.as_defined().is_err());
    }

    #[test]
    fn update_rule_body_leaves_external_rules_untouched() {
        let external = Rule::External("prim".into());
        let updated = update_rule_body(external, |e| e);
        assert!(updated.is_external());
    }
}
