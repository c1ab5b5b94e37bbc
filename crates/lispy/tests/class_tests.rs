//! Class, instance, and property tests

use lispy::*;

const POINT: &str = "
    [class Point null
        [begin
            [def constructor [self x y]
                [begin
                    [set [prop self x] x]
                    [set [prop self y] y]]]
            [def calc [self]
                [+ [prop self x] [prop self y]]]]]";

const POINT3D: &str = "
    [class Point3D Point
        [begin
            [def constructor [self x y z]
                [begin
                    [[prop [super Point3D] constructor] self x y]
                    [set [prop self z] z]]]
            [def calc [self]
                [+ [[prop [super Point3D] calc] self] [prop self z]]]]]";

// Helper: interpreter with Point and Point3D declared
fn with_classes() -> Interpreter {
    let interp = Interpreter::new();
    interp.evaluate(POINT).unwrap();
    interp.evaluate(POINT3D).unwrap();
    interp
}

fn env_of(value: Value) -> Environment {
    match value {
        Value::Env(env) => env,
        other => panic!("expected an environment, got {:?}", other),
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Declaration
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_class_declaration_binds_environment() {
    let interp = Interpreter::new();
    let class = env_of(interp.evaluate(POINT).unwrap());

    assert_eq!(interp.global().lookup("Point").unwrap(), Value::Env(class.clone()));
    assert!(class.contains_local("constructor"));
    assert!(class.contains_local("calc"));
}

#[test]
fn test_class_without_parent_uses_defining_scope() {
    let src = "
        [def make []
            [begin
                [var secret 42]
                [class Hidden null
                    [begin
                        [def constructor [self] self]
                        [def reveal [self] secret]]]]]
        [var Hidden [make]]
        [var h [new Hidden]]
        [[prop h reveal] h]";
    assert_eq!(Interpreter::new().evaluate(src).unwrap(), Value::Int(42));
}

#[test]
fn test_class_body_may_be_single_form() {
    let interp = Interpreter::new();
    let class = env_of(interp.evaluate("[class Unit null [var size 1]]").unwrap());
    assert_eq!(class.names(), vec!["size"]);
}

#[test]
fn test_class_parent_must_be_class_or_null() {
    assert!(matches!(
        Interpreter::new().evaluate("[class Bad 5 [var x 1]]"),
        Err(EvalError::TypeError { .. })
    ));
}

// ═══════════════════════════════════════════════════════════════════════
// Instances
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_new_runs_constructor() {
    let interp = with_classes();
    interp.evaluate("[var p [new Point 10 20]]").unwrap();

    assert_eq!(interp.evaluate("[prop p x]").unwrap(), Value::Int(10));
    assert_eq!(interp.evaluate("[prop p y]").unwrap(), Value::Int(20));
    assert_eq!(interp.evaluate("[[prop p calc] p]").unwrap(), Value::Int(30));
}

#[test]
fn test_instance_is_child_of_class() {
    let interp = with_classes();
    let point = env_of(interp.evaluate("Point").unwrap());
    let p = env_of(interp.evaluate("[new Point 1 2]").unwrap());

    assert!(p.parent().unwrap().ptr_eq(&point));
    assert_eq!(p.names(), vec!["x", "y"]);
}

#[test]
fn test_instances_do_not_share_fields() {
    let interp = with_classes();
    interp
        .evaluate("[var a [new Point 1 2]] [var b [new Point 3 4]]")
        .unwrap();
    interp.evaluate("[set [prop a x] 100]").unwrap();

    assert_eq!(interp.evaluate("[prop a x]").unwrap(), Value::Int(100));
    assert_eq!(interp.evaluate("[prop b x]").unwrap(), Value::Int(3));
}

#[test]
fn test_constructor_args_evaluated_in_caller_scope() {
    let interp = with_classes();
    let src = "
        [begin
            [var a 5]
            [var p [new Point a [* a 2]]]
            [[prop p calc] p]]";
    assert_eq!(interp.evaluate(src).unwrap(), Value::Int(15));
}

#[test]
fn test_property_set_creates_on_instance() {
    let interp = with_classes();
    interp.evaluate("[var p [new Point 1 2]]").unwrap();
    interp.evaluate("[set [prop p label] \"origin\"]").unwrap();

    assert_eq!(interp.evaluate("[prop p label]").unwrap(), Value::string("origin"));
    assert!(interp.evaluate("[prop Point label]").is_err());
}

#[test]
fn test_property_increment() {
    let interp = with_classes();
    interp.evaluate("[var p [new Point 1 2]]").unwrap();
    assert_eq!(interp.evaluate("[++ [prop p x]]").unwrap(), Value::Int(2));
    assert_eq!(interp.evaluate("[+= [prop p y] 8]").unwrap(), Value::Int(10));
}

// ═══════════════════════════════════════════════════════════════════════
// Inheritance
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_subclass_overrides_and_calls_super() {
    let interp = with_classes();
    interp.evaluate("[var p [new Point3D 10 20 30]]").unwrap();
    assert_eq!(interp.evaluate("[[prop p calc] p]").unwrap(), Value::Int(60));
    assert_eq!(interp.evaluate("[prop p z]").unwrap(), Value::Int(30));
}

#[test]
fn test_subclass_inherits_method() {
    let interp = with_classes();
    let src = "
        [class Named Point
            [def describe [self] [+ \"point \" [prop self name]]]]
        [var n [new Named 1 2]]
        [set [prop n name] \"a\"]";
    interp.evaluate(src).unwrap();

    // `calc` and `constructor` are found on Point
    assert_eq!(interp.evaluate("[[prop n calc] n]").unwrap(), Value::Int(3));
    assert_eq!(
        interp.evaluate("[[prop n describe] n]").unwrap(),
        Value::string("point a")
    );
}

#[test]
fn test_super_returns_parent_class() {
    let interp = with_classes();
    assert_eq!(
        interp.evaluate("[= [super Point3D] Point]").unwrap(),
        Value::Bool(true)
    );

    let p = env_of(interp.evaluate("[new Point3D 1 2 3]").unwrap());
    let parent = env_of(interp.evaluate("[super Point3D]").unwrap());
    assert!(!parent.ptr_eq(&p));
    assert!(!parent.ptr_eq(p.parent().unwrap()));
}

#[test]
fn test_super_of_root_class_is_defining_scope() {
    let interp = with_classes();
    let parent = env_of(interp.evaluate("[super Point]").unwrap());
    assert!(parent.ptr_eq(interp.global()));
}
