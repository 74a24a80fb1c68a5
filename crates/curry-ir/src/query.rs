//! Whole-program queries and rewrites built on the flat IR (§4.7):
//! free-variable computation, type-of, ground/whnf predicates, qualified-
//! name rewriting, module renaming, and variable renumbering.
//!
//! `free_vars` is expressed directly on top of [`crate::fold::fold_expr`]
//! since its result type (a variable-index set) is a pure aggregate with no
//! structure to preserve. `upd_qnames`/`renumber_vars` instead recurse by
//! hand: their output has to rebuild `Branch`'s paired pattern and body,
//! which doesn't fit cleanly through a fold whose single result type `R`
//! would otherwise have to stand in for both a rewritten pattern and a
//! rewritten expression.

use rustc_hash::{FxHashMap, FxHashSet};

use curry_ast::{Ident, ModuleIdent, QualifiedIdent};

use crate::expr::{Branch, CombType, Expr, Literal, Pattern, Rule};
use crate::fold::{fold_expr, ExprFold};
use crate::program::{ConsDecl, FuncDecl, OpDecl, Program, TypeDecl, TypeExpr};

/// Free variables of `expr`, per the definition in §3.6: every `Variable`
/// occurrence, minus those bound by enclosing `let`s, `free`s, and case
/// branch patterns.
pub fn free_vars(expr: &Expr) -> FxHashSet<usize> {
    let fold: ExprFold<FxHashSet<usize>> = ExprFold {
        variable: Box::new(|idx| {
            let mut s = FxHashSet::default();
            s.insert(idx);
            s
        }),
        literal: Box::new(|_| FxHashSet::default()),
        combined: Box::new(|_, _, args| args.into_iter().flatten().collect()),
        let_: Box::new(|idxs, rhss, body| {
            let mut s: FxHashSet<usize> = rhss.into_iter().flatten().collect();
            s.extend(body);
            for idx in idxs {
                s.remove(idx);
            }
            s
        }),
        free: Box::new(|vars, body| {
            let mut s = body;
            for v in vars {
                s.remove(v);
            }
            s
        }),
        or: Box::new(|lhs, rhs| lhs.into_iter().chain(rhs).collect()),
        case: Box::new(|_, _, scrutinee, branches| {
            let mut s = scrutinee;
            for b in branches {
                s.extend(b);
            }
            s
        }),
        branch: Box::new(|pattern, body| {
            let mut s = body;
            if let Pattern::Constructor(_, vars) = pattern {
                for v in vars {
                    s.remove(v);
                }
            }
            s
        }),
        typed: Box::new(|inner, _| inner),
    };
    fold_expr(&fold, expr)
}

fn prelude_type(name: &str) -> TypeExpr {
    let module = ModuleIdent::new(vec!["Prelude".to_string()], curry_span::Position::None);
    let ident = Ident::new(name, curry_span::Position::None);
    TypeExpr::Cons(QualifiedIdent::qualified(module, ident), Vec::new())
}

fn literal_type(lit: &Literal) -> TypeExpr {
    match lit {
        Literal::Int { .. } => prelude_type("Int"),
        Literal::Float { .. } => prelude_type("Float"),
        Literal::Char { .. } => prelude_type("Char"),
    }
}

/// `typeOf(e)` (§4.7). `var_types` records the type recorded on each bound
/// variable index; `head_types` records each combination head's full
/// (possibly multi-arrow) type. An explicit `Typed` annotation always wins
/// outright rather than being combined with its inner expression's type --
/// the one place the distilled rule for `typed` reads two different ways
/// (as an immediate answer in the first bullet, as "recurse on body" in the
/// third); this toolchain takes the annotation literally.
pub fn type_of(
    expr: &Expr,
    var_types: &FxHashMap<usize, TypeExpr>,
    head_types: &FxHashMap<String, TypeExpr>,
) -> Option<TypeExpr> {
    match expr {
        Expr::Variable(idx) => var_types.get(idx).cloned(),
        Expr::Literal(lit) => Some(literal_type(lit)),
        Expr::Typed(_, ty) => Some(ty.clone()),
        Expr::Let(_, body) | Expr::Free(_, body) => type_of(body, var_types, head_types),
        Expr::Or(lhs, rhs) => {
            type_of(lhs, var_types, head_types).or_else(|| type_of(rhs, var_types, head_types))
        }
        Expr::Case(_, _, _, branches) => {
            branches.iter().find_map(|b| type_of(&b.expr, var_types, head_types))
        }
        Expr::Combined(_, qname, args) => {
            let head_ty = head_types.get(qname.name())?;
            if args.len() > head_ty.arrow_count() {
                return None;
            }
            head_ty.peel(args.len()).cloned()
        }
    }
}

/// "ground" (§3.6): a literal, or a full constructor combination whose every
/// argument is ground. A partial constructor combination is not ground --
/// it is still missing arguments.
pub fn is_ground(expr: &Expr) -> bool {
    match expr {
        Expr::Literal(_) => true,
        Expr::Combined(CombType::ConsCall, _, args) => args.iter().all(is_ground),
        _ => false,
    }
}

/// "weak-head normal form" (§3.6): a literal, or any combination whose
/// comb type is not a full function call.
pub fn is_whnf(expr: &Expr) -> bool {
    match expr {
        Expr::Literal(_) => true,
        Expr::Combined(comb, _, _) => !matches!(comb, CombType::FuncCall),
        _ => false,
    }
}

/// `updQNames(f)`: rewrites every [`QualifiedIdent`] occurrence in a single
/// expression, leaving variable indices untouched.
pub fn upd_qnames_expr(expr: &Expr, f: &impl Fn(&QualifiedIdent) -> QualifiedIdent) -> Expr {
    match expr {
        Expr::Variable(idx) => Expr::Variable(*idx),
        Expr::Literal(lit) => Expr::Literal(lit.clone()),
        Expr::Combined(comb, qname, args) => Expr::Combined(
            *comb,
            f(qname),
            args.iter().map(|a| upd_qnames_expr(a, f)).collect(),
        ),
        Expr::Let(bindings, body) => Expr::Let(
            bindings.iter().map(|(idx, rhs)| (*idx, upd_qnames_expr(rhs, f))).collect(),
            Box::new(upd_qnames_expr(body, f)),
        ),
        Expr::Free(vars, body) => Expr::Free(vars.clone(), Box::new(upd_qnames_expr(body, f))),
        Expr::Or(lhs, rhs) => {
            Expr::Or(Box::new(upd_qnames_expr(lhs, f)), Box::new(upd_qnames_expr(rhs, f)))
        }
        Expr::Case(source_ref, kind, scrutinee, branches) => Expr::Case(
            source_ref.clone(),
            *kind,
            Box::new(upd_qnames_expr(scrutinee, f)),
            branches.iter().map(|b| upd_qnames_branch(b, f)).collect(),
        ),
        Expr::Typed(inner, ty) => {
            Expr::Typed(Box::new(upd_qnames_expr(inner, f)), upd_qnames_type(ty, f))
        }
    }
}

fn upd_qnames_branch(branch: &Branch, f: &impl Fn(&QualifiedIdent) -> QualifiedIdent) -> Branch {
    let pattern = match &branch.pattern {
        Pattern::Constructor(qname, vars) => Pattern::Constructor(f(qname), vars.clone()),
        Pattern::Literal(lit) => Pattern::Literal(lit.clone()),
    };
    Branch { pattern, expr: upd_qnames_expr(&branch.expr, f) }
}

fn upd_qnames_type(ty: &TypeExpr, f: &impl Fn(&QualifiedIdent) -> QualifiedIdent) -> TypeExpr {
    match ty {
        TypeExpr::Variable(idx) => TypeExpr::Variable(*idx),
        TypeExpr::Cons(qname, args) => {
            TypeExpr::Cons(f(qname), args.iter().map(|a| upd_qnames_type(a, f)).collect())
        }
        TypeExpr::Function(domain, range) => TypeExpr::Function(
            Box::new(upd_qnames_type(domain, f)),
            Box::new(upd_qnames_type(range, f)),
        ),
    }
}

/// `updQNames(f)` over a whole program: type declarations, constructors,
/// type expressions, function signatures, operator declarations, and
/// combination/pattern heads inside every rule body.
pub fn upd_qnames(program: &Program, f: impl Fn(&QualifiedIdent) -> QualifiedIdent) -> Program {
    let type_decls = program
        .type_decls
        .iter()
        .map(|decl| match decl {
            TypeDecl::Algebraic { qname, visibility, type_params, constructors } => {
                TypeDecl::Algebraic {
                    qname: f(qname),
                    visibility: *visibility,
                    type_params: type_params.clone(),
                    constructors: constructors
                        .iter()
                        .map(|c| ConsDecl {
                            qname: f(&c.qname),
                            arity: c.arity,
                            visibility: c.visibility,
                            arg_types: c.arg_types.iter().map(|t| upd_qnames_type(t, &f)).collect(),
                        })
                        .collect(),
                }
            }
            TypeDecl::Synonym { qname, visibility, type_params, type_expr } => TypeDecl::Synonym {
                qname: f(qname),
                visibility: *visibility,
                type_params: type_params.clone(),
                type_expr: upd_qnames_type(type_expr, &f),
            },
        })
        .collect();

    let func_decls = program
        .func_decls
        .iter()
        .map(|decl| FuncDecl {
            qname: f(&decl.qname),
            arity: decl.arity,
            visibility: decl.visibility,
            type_expr: upd_qnames_type(&decl.type_expr, &f),
            rule: match &decl.rule {
                Rule::Defined { params, body } => {
                    Rule::Defined { params: params.clone(), body: upd_qnames_expr(body, &f) }
                }
                Rule::External(name) => Rule::External(name.clone()),
            },
        })
        .collect();

    let op_decls = program
        .op_decls
        .iter()
        .map(|decl| OpDecl { qname: f(&decl.qname), assoc: decl.assoc, precedence: decl.precedence })
        .collect();

    Program {
        module_name: program.module_name.clone(),
        imports: program.imports.clone(),
        type_decls,
        func_decls,
        op_decls,
    }
}

/// `renameProgram(newName, p)`: sets the module name, and replaces the
/// module qualifier of every qualified name whose module component equals
/// the program's *old* name with `newName`, leaving every other qualifier
/// untouched.
pub fn rename_program(new_name: ModuleIdent, program: &Program) -> Program {
    let old_name = program.module_name.clone();
    let renamed = upd_qnames(program, |qname| {
        if qname.module.as_ref().map(|m| m.dotted()) == Some(old_name.dotted()) {
            QualifiedIdent::qualified(new_name.clone(), qname.ident.clone())
        } else {
            qname.clone()
        }
    });
    Program { module_name: new_name, ..renamed }
}

/// `renumberVars(f)`: maps every variable index occurrence -- pattern
/// binders, let-binders, free-declaration binders, and usage sites -- through
/// `f`, preserving structure and scoping exactly.
pub fn renumber_vars_expr(expr: &Expr, f: &impl Fn(usize) -> usize) -> Expr {
    match expr {
        Expr::Variable(idx) => Expr::Variable(f(*idx)),
        Expr::Literal(lit) => Expr::Literal(lit.clone()),
        Expr::Combined(comb, qname, args) => Expr::Combined(
            *comb,
            qname.clone(),
            args.iter().map(|a| renumber_vars_expr(a, f)).collect(),
        ),
        Expr::Let(bindings, body) => Expr::Let(
            bindings.iter().map(|(idx, rhs)| (f(*idx), renumber_vars_expr(rhs, f))).collect(),
            Box::new(renumber_vars_expr(body, f)),
        ),
        Expr::Free(vars, body) => Expr::Free(
            vars.iter().map(|v| f(*v)).collect(),
            Box::new(renumber_vars_expr(body, f)),
        ),
        Expr::Or(lhs, rhs) => Expr::Or(
            Box::new(renumber_vars_expr(lhs, f)),
            Box::new(renumber_vars_expr(rhs, f)),
        ),
        Expr::Case(source_ref, kind, scrutinee, branches) => Expr::Case(
            source_ref.clone(),
            *kind,
            Box::new(renumber_vars_expr(scrutinee, f)),
            branches.iter().map(|b| renumber_vars_branch(b, f)).collect(),
        ),
        Expr::Typed(inner, ty) => {
            Expr::Typed(Box::new(renumber_vars_expr(inner, f)), ty.clone())
        }
    }
}

fn renumber_vars_branch(branch: &Branch, f: &impl Fn(usize) -> usize) -> Branch {
    let pattern = match &branch.pattern {
        Pattern::Constructor(qname, vars) => {
            Pattern::Constructor(qname.clone(), vars.iter().map(|v| f(*v)).collect())
        }
        Pattern::Literal(lit) => Pattern::Literal(lit.clone()),
    };
    Branch { pattern, expr: renumber_vars_expr(&branch.expr, f) }
}

pub fn renumber_vars(program: &Program, f: impl Fn(usize) -> usize) -> Program {
    let func_decls = program
        .func_decls
        .iter()
        .map(|decl| FuncDecl {
            rule: match &decl.rule {
                Rule::Defined { params, body } => Rule::Defined {
                    params: params.iter().map(|p| f(*p)).collect(),
                    body: renumber_vars_expr(body, &f),
                },
                Rule::External(name) => Rule::External(name.clone()),
            },
            ..decl.clone()
        })
        .collect();
    Program { func_decls, ..program.clone() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::qname;

    #[test]
    fn free_vars_excludes_let_bound_and_case_pattern_vars() {
        let expr = Expr::Let(
            vec![(0, Expr::Variable(1))],
            Box::new(Expr::Case(
                curry_span::SourceRef::none(),
                crate::expr::CaseKind::Rigid,
                Box::new(Expr::Variable(0)),
                vec![Branch {
                    pattern: Pattern::Constructor(qname("Cons"), vec![2, 3]),
                    expr: Expr::Combined(CombType::FuncCall, qname("add"), vec![
                        Expr::Variable(2),
                        Expr::Variable(4),
                    ]),
                }],
            )),
        );
        let fv = free_vars(&expr);
        assert_eq!(fv, [1, 4].into_iter().collect());
    }

    #[test]
    fn is_whnf_accepts_partial_and_constructor_combinations_but_not_full_func_call() {
        assert!(is_whnf(&Expr::Literal(Literal::Int {
            ident: curry_ast::Ident::new("_lit0", crate::test_support::pos()),
            value: 1,
        })));
        assert!(is_whnf(&Expr::Combined(CombType::ConsCall, qname("Cons"), vec![])));
        assert!(is_whnf(&Expr::Combined(CombType::FuncPartCall(1), qname("add"), vec![])));
        assert!(!is_whnf(&Expr::Combined(CombType::FuncCall, qname("add"), vec![])));
        assert!(!is_whnf(&Expr::Variable(0)));
    }

    #[test]
    fn is_ground_requires_every_argument_ground_and_rejects_partial_calls() {
        let lit = |v| Expr::Literal(Literal::Int {
            ident: curry_ast::Ident::new("_lit0", crate::test_support::pos()),
            value: v,
        });
        let full = Expr::Combined(CombType::ConsCall, qname("Pair"), vec![lit(1), lit(2)]);
        assert!(is_ground(&full));
        let partial = Expr::Combined(CombType::ConsPartCall(1), qname("Pair"), vec![lit(1)]);
        assert!(!is_ground(&partial));
    }

    #[test]
    fn upd_qnames_rewrites_combination_and_pattern_heads_only() {
        let expr = Expr::Case(
            curry_span::SourceRef::none(),
            crate::expr::CaseKind::Rigid,
            Box::new(Expr::Combined(CombType::FuncCall, qname("f"), vec![])),
            vec![Branch {
                pattern: Pattern::Constructor(qname("Cons"), vec![0, 1]),
                expr: Expr::Variable(0),
            }],
        );
        let renamed = upd_qnames_expr(&expr, &|q| qname(&format!("renamed_{}", q.name())));
        match renamed {
            Expr::Case(_, _, scrutinee, branches) => {
                assert!(matches!(*scrutinee, Expr::Combined(_, ref q, _) if q.name() == "renamed_f"));
                assert!(
                    matches!(&branches[0].pattern, Pattern::Constructor(q, vars) if q.name() == "renamed_Cons" && vars.as_slice() == [0, 1])
                );
            }
            other => panic!("expected case, got {other:?}"),
        }
    }

    #[test]
    fn renumber_vars_maps_binders_and_usages_consistently() {
        let expr = Expr::Let(
            vec![(0, Expr::Variable(1))],
            Box::new(Expr::Variable(0)),
        );
        let renumbered = renumber_vars_expr(&expr, &|i| i + 10);
        match renumbered {
            Expr::Let(bindings, body) => {
                assert_eq!(bindings[0].0, 10);
                assert!(matches!(bindings[0].1, Expr::Variable(11)));
                assert!(matches!(*body, Expr::Variable(10)));
            }
            other => panic!("expected let, got {other:?}"),
        }
    }
}
