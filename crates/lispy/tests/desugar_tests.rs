//! Desugaring tests: rewrites and their equivalence with primitive forms

use lispy::desugar::expand;
use lispy::*;
use pretty_assertions::assert_eq;

// Helper to expand one sugared form
fn expand_src(src: &str) -> Expr {
    expand(&parse(src).unwrap())
        .unwrap()
        .expect("expected a sugared form")
}

// Evaluate `setup` then `src` in a fresh interpreter, returning the result
// and the interpreter for inspecting side effects.
fn run(setup: &str, src: &str) -> (std::result::Result<Value, EvalError>, Interpreter) {
    let interp = Interpreter::new();
    interp.evaluate(setup).unwrap();
    let result = interp.evaluate(src);
    (result, interp)
}

// Assert that a sugared form and its hand-written expansion produce the
// same result and the same values for `observed` names.
fn assert_equivalent(setup: &str, sugared: &str, expanded: &str, observed: &[&str]) {
    let (sugar_result, sugar_interp) = run(setup, sugared);
    let (plain_result, plain_interp) = run(setup, expanded);
    assert_eq!(sugar_result, plain_result);
    for name in observed {
        assert_eq!(
            sugar_interp.global().get(name),
            plain_interp.global().get(name),
            "binding `{}` differs",
            name
        );
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Rewrites
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_def_rewrite() {
    assert_eq!(
        expand_src("[def square [x] [* x x]]"),
        parse("[var square [lambda [x] [* x x]]]").unwrap()
    );
}

#[test]
fn test_for_rewrite() {
    assert_eq!(
        expand_src("[for [var i 0] [< i 10] [++ i] [+= total i]]"),
        parse("[begin [var i 0] [while [< i 10] [begin [+= total i] [++ i]]]]").unwrap()
    );
}

#[test]
fn test_step_rewrites() {
    assert_eq!(expand_src("[++ x]"), parse("[set x [+ x 1]]").unwrap());
    assert_eq!(expand_src("[-- x]"), parse("[set x [- x 1]]").unwrap());
    assert_eq!(expand_src("[+= x 10]"), parse("[set x [+ x 10]]").unwrap());
    assert_eq!(expand_src("[-= x [* 2 y]]"), parse("[set x [- x [* 2 y]]]").unwrap());
}

#[test]
fn test_property_step_rewrite() {
    assert_eq!(
        expand_src("[++ [prop self count]]"),
        parse("[set [prop self count] [+ [prop self count] 1]]").unwrap()
    );
}

#[test]
fn test_switch_rewrite() {
    assert_eq!(
        expand_src("[switch [[= x 10] 100] [[> x 10] 200] [else 300]]"),
        parse("[if [= x 10] 100 [if [> x 10] 200 300]]").unwrap()
    );
}

#[test]
fn test_switch_single_clause_with_else() {
    assert_eq!(
        expand_src("[switch [[= x 1] 1] [else 2]]"),
        parse("[if [= x 1] 1 2]").unwrap()
    );
}

#[test]
fn test_primitive_forms_are_not_rewritten() {
    for src in ["[var x 1]", "[set x 2]", "[begin]", "[f 1 2]", "x", "10"] {
        assert_eq!(expand(&parse(src).unwrap()).unwrap(), None, "{}", src);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Evaluation
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_eval_increment_decrement() {
    let interp = Interpreter::new();
    interp.evaluate("[var x 1]").unwrap();
    assert_eq!(interp.evaluate("[++ x]").unwrap(), Value::Int(2));
    assert_eq!(interp.evaluate("[+= x 10]").unwrap(), Value::Int(12));
    assert_eq!(interp.evaluate("[-= x 2]").unwrap(), Value::Int(10));
    assert_eq!(interp.evaluate("[-- x]").unwrap(), Value::Int(9));
    assert_eq!(interp.evaluate("x").unwrap(), Value::Int(9));
}

#[test]
fn test_eval_for_loop() {
    let interp = Interpreter::new();
    let src = "
        [var total 0]
        [for [var i 0] [< i 5] [++ i]
            [+= total i]]
        total";
    assert_eq!(interp.evaluate(src).unwrap(), Value::Int(10));
    // The loop variable lives in the loop's own block
    assert!(interp.global().get("i").is_none());
}

#[test]
fn test_eval_switch() {
    let src = "[switch [[= x 10] 100] [[> x 10] 200] [else 300]]";
    assert_eq!(run("[var x 10]", src).0.unwrap(), Value::Int(100));
    assert_eq!(run("[var x 20]", src).0.unwrap(), Value::Int(200));
    assert_eq!(run("[var x 5]", src).0.unwrap(), Value::Int(300));
}

#[test]
fn test_eval_switch_without_else_matching() {
    let src = "[switch [[= x 1] 100] [[= x 2] 200]]";
    assert_eq!(run("[var x 2]", src).0.unwrap(), Value::Int(200));
}

// ═══════════════════════════════════════════════════════════════════════
// Equivalence with Primitive Forms
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_def_equivalent_to_var_lambda() {
    assert_equivalent(
        "",
        "[def square [x] [* x x]] [square 7]",
        "[var square [lambda [x] [* x x]]] [square 7]",
        &[],
    );
}

#[test]
fn test_steps_equivalent_to_set() {
    assert_equivalent(
        "[var x 5] [var y 3]",
        "[++ x] [-- y] [+= x y] [-= y 1]",
        "[set x [+ x 1]] [set y [- y 1]] [set x [+ x y]] [set y [- y 1]]",
        &["x", "y"],
    );
}

#[test]
fn test_for_equivalent_to_while() {
    assert_equivalent(
        "[var total 0]",
        "[for [var i 0] [< i 4] [++ i] [+= total [* i i]]]",
        "[begin [var i 0] [while [< i 4] [begin [set total [+ total [* i i]]] [set i [+ i 1]]]]]",
        &["total", "i"],
    );
}

#[test]
fn test_switch_equivalent_to_if_chain() {
    for setup in ["[var x 1] [var hits 0]", "[var x 2] [var hits 0]", "[var x 3] [var hits 0]"] {
        assert_equivalent(
            setup,
            "[switch [[= x 1] [+= hits 1]] [[= x 2] [+= hits 2]] [else [+= hits 3]]]",
            "[if [= x 1] [set hits [+ hits 1]] \
                 [if [= x 2] [set hits [+ hits 2]] [set hits [+ hits 3]]]]",
            &["hits"],
        );
    }
}

#[test]
fn test_nested_sugar() {
    let src = "
        [def sum_to [n]
            [begin
                [var total 0]
                [for [var i 1] [<= i n] [++ i]
                    [+= total i]]
                total]]
        [sum_to 10]";
    assert_eq!(Interpreter::new().evaluate(src).unwrap(), Value::Int(55));
}
