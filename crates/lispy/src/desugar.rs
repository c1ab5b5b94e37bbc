//! Syntactic sugar expansion
//!
//! High-level forms are rewritten into the primitive form set just before
//! they are evaluated:
//!
//! ```text
//! [def name params body]      →  [var name [lambda params body]]
//! [for init cond step body]   →  [begin init [while cond [begin body step]]]
//! [++ x] / [-- x]             →  [set x [+ x 1]] / [set x [- x 1]]
//! [+= x v] / [-= x v]         →  [set x [+ x v]] / [set x [- x v]]
//! [switch [c1 b1] ... [else bN]]  →  [if c1 b1 [if c2 b2 ... bN]]
//! ```
//!
//! Every rewrite is pure: it reads the input expression and builds a new
//! one, with no access to any environment.

use crate::error::EvalError;
use crate::expr::Expr;

/// Rewrite `expr` if its head is a sugared keyword.
///
/// Returns `Ok(None)` when the expression is not sugar and should be
/// evaluated as-is.
pub fn expand(expr: &Expr) -> Result<Option<Expr>, EvalError> {
    let Some(items) = expr.as_list() else {
        return Ok(None);
    };
    let Some(head) = items.first().and_then(Expr::as_symbol) else {
        return Ok(None);
    };
    let operands = &items[1..];

    let expanded = match head {
        "def" => def_to_var_lambda(operands)?,
        "for" => for_to_while(operands)?,
        "switch" => switch_to_if(operands)?,
        "++" => step_to_set("++", "+", operands)?,
        "--" => step_to_set("--", "-", operands)?,
        "+=" => update_to_set("+=", "+", operands)?,
        "-=" => update_to_set("-=", "-", operands)?,
        _ => return Ok(None),
    };
    Ok(Some(expanded))
}

fn list(items: Vec<Expr>) -> Expr {
    Expr::List(items)
}

fn sym(name: &str) -> Expr {
    Expr::symbol(name)
}

fn expect_operands<'a, const N: usize>(
    form: &'static str,
    operands: &'a [Expr],
    shape: &str,
) -> Result<&'a [Expr; N], EvalError> {
    operands
        .try_into()
        .map_err(|_| EvalError::malformed(form, format!("expected `[{} {}]`", form, shape)))
}

/// `[def name params body]` → `[var name [lambda params body]]`
pub fn def_to_var_lambda(operands: &[Expr]) -> Result<Expr, EvalError> {
    let [name, params, body] = expect_operands::<3>("def", operands, "name [params] body")?;
    Ok(list(vec![
        sym("var"),
        name.clone(),
        list(vec![sym("lambda"), params.clone(), body.clone()]),
    ]))
}

/// `[for init cond step body]` → `[begin init [while cond [begin body step]]]`
pub fn for_to_while(operands: &[Expr]) -> Result<Expr, EvalError> {
    let [init, cond, step, body] =
        expect_operands::<4>("for", operands, "init condition step body")?;
    Ok(list(vec![
        sym("begin"),
        init.clone(),
        list(vec![
            sym("while"),
            cond.clone(),
            list(vec![sym("begin"), body.clone(), step.clone()]),
        ]),
    ]))
}

/// `[++ x]` → `[set x [+ x 1]]`, and likewise for `--`.
pub fn step_to_set(form: &'static str, op: &str, operands: &[Expr]) -> Result<Expr, EvalError> {
    let [target] = expect_operands::<1>(form, operands, "target")?;
    Ok(set_with(target, op, Expr::Int(1)))
}

/// `[+= x v]` → `[set x [+ x v]]`, and likewise for `-=`.
pub fn update_to_set(form: &'static str, op: &str, operands: &[Expr]) -> Result<Expr, EvalError> {
    let [target, value] = expect_operands::<2>(form, operands, "target value")?;
    Ok(set_with(target, op, value.clone()))
}

fn set_with(target: &Expr, op: &str, operand: Expr) -> Expr {
    list(vec![
        sym("set"),
        target.clone(),
        list(vec![sym(op), target.clone(), operand]),
    ])
}

/// Rewrite a switch into a right-nested `if` chain.
///
/// The first clause becomes the outermost condition. A trailing
/// `[else block]` clause becomes the innermost alternate. Without one, the
/// innermost alternate is an empty `[switch]`, which fails with
/// `MalformedSwitch` if evaluation ever reaches it.
pub fn switch_to_if(clauses: &[Expr]) -> Result<Expr, EvalError> {
    if clauses.is_empty() {
        return Err(EvalError::MalformedSwitch {
            reason: "no clause matched and there is no `else` clause".to_string(),
        });
    }

    let pairs = clauses.iter().map(clause).collect::<Result<Vec<_>, _>>()?;
    let last = pairs.len() - 1;
    if pairs[..last].iter().any(|(cond, _)| cond.is_symbol("else")) {
        return Err(EvalError::MalformedSwitch {
            reason: "`else` must be the last clause".to_string(),
        });
    }

    let (mut chain, conditional) = match pairs[last] {
        (cond, block) if cond.is_symbol("else") => (block.clone(), &pairs[..last]),
        _ => (list(vec![sym("switch")]), &pairs[..]),
    };
    for (cond, block) in conditional.iter().rev() {
        chain = list(vec![sym("if"), (*cond).clone(), (*block).clone(), chain]);
    }
    Ok(chain)
}

fn clause(expr: &Expr) -> Result<(&Expr, &Expr), EvalError> {
    match expr.as_list() {
        Some([cond, block]) => Ok((cond, block)),
        _ => Err(EvalError::MalformedSwitch {
            reason: format!("clause `{}` is not a [condition block] pair", expr),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;
    use pretty_assertions::assert_eq;

    fn expand_src(src: &str) -> Expr {
        expand(&parse(src).unwrap()).unwrap().expect("sugar form")
    }

    #[test]
    fn test_def() {
        assert_eq!(
            expand_src("[def square [x] [* x x]]"),
            parse("[var square [lambda [x] [* x x]]]").unwrap()
        );
    }

    #[test]
    fn test_for() {
        assert_eq!(
            expand_src("[for [var i 0] [< i 3] [++ i] [print i]]"),
            parse("[begin [var i 0] [while [< i 3] [begin [print i] [++ i]]]]").unwrap()
        );
    }

    #[test]
    fn test_increments() {
        assert_eq!(expand_src("[++ x]"), parse("[set x [+ x 1]]").unwrap());
        assert_eq!(expand_src("[-- x]"), parse("[set x [- x 1]]").unwrap());
        assert_eq!(expand_src("[+= x 5]"), parse("[set x [+ x 5]]").unwrap());
        assert_eq!(expand_src("[-= x y]"), parse("[set x [- x y]]").unwrap());
    }

    #[test]
    fn test_switch_with_else() {
        assert_eq!(
            expand_src("[switch [[= x 1] 100] [[> x 1] 200] [else 300]]"),
            parse("[if [= x 1] 100 [if [> x 1] 200 300]]").unwrap()
        );
        assert_eq!(
            expand_src("[switch [[> x 1] 200] [else 300]]"),
            parse("[if [> x 1] 200 300]").unwrap()
        );
        assert!(matches!(
            expand(&parse("[switch [else 1] [[> x 1] 2]]").unwrap()),
            Err(EvalError::MalformedSwitch { .. })
        ));
    }

    #[test]
    fn test_switch_without_else_ends_in_empty_switch() {
        assert_eq!(
            expand_src("[switch [[= x 1] 100] [[= x 2] 200]]"),
            parse("[if [= x 1] 100 [if [= x 2] 200 [switch]]]").unwrap()
        );
        assert!(matches!(
            expand(&parse("[switch]").unwrap()),
            Err(EvalError::MalformedSwitch { .. })
        ));
    }

    #[test]
    fn test_not_sugar() {
        assert_eq!(expand(&parse("[+ 1 2]").unwrap()).unwrap(), None);
        assert_eq!(expand(&Expr::Int(1)).unwrap(), None);
    }

    #[test]
    fn test_wrong_shape() {
        assert!(matches!(
            expand(&parse("[def f [x]]").unwrap()),
            Err(EvalError::MalformedForm { form: "def", .. })
        ));
    }
}
