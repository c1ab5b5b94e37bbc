//! Standard prelude: constants and built-in functions of the root environment

use std::cmp::Ordering;
use std::io::{self, Write};

use super::Environment;
use crate::error::{type_name, EvalError};
use crate::value::{Arity, BuiltinFn, Value};

/// Version banner bound to `VERSION` in every root environment.
pub const VERSION_INFO: &str = concat!("lispy version ", env!("CARGO_PKG_VERSION"));

const BUILTINS: &[BuiltinFn] = &[
    // Arithmetic
    BuiltinFn::new("+", Arity::Range(1, 2), builtin_add),
    BuiltinFn::new("-", Arity::Range(1, 2), builtin_sub),
    BuiltinFn::new("*", Arity::Exact(2), builtin_mul),
    BuiltinFn::new("/", Arity::Exact(2), builtin_div),
    BuiltinFn::new("//", Arity::Exact(2), builtin_floor_div),
    BuiltinFn::new("%", Arity::Exact(2), builtin_mod),
    // Comparison
    BuiltinFn::new(">", Arity::Exact(2), builtin_gt),
    BuiltinFn::new("<", Arity::Exact(2), builtin_lt),
    BuiltinFn::new(">=", Arity::Exact(2), builtin_ge),
    BuiltinFn::new("<=", Arity::Exact(2), builtin_le),
    BuiltinFn::new("=", Arity::Exact(2), builtin_eq),
    // Output
    BuiltinFn::new("print", Arity::Variadic, builtin_print),
];

impl Environment {
    /// Create a root environment with the standard constants and builtins.
    pub fn with_prelude() -> Self {
        let env = Self::new();
        env.load_prelude();
        env
    }

    /// Load the standard prelude into this environment.
    pub fn load_prelude(&self) {
        self.define("null", Value::Null);
        self.define("true", Value::Bool(true));
        self.define("false", Value::Bool(false));
        self.define("VERSION", Value::string(VERSION_INFO));

        for builtin in BUILTINS {
            self.define_builtin(*builtin);
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Numeric Helpers
// ═══════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy)]
enum Num {
    Int(i64),
    Float(f64),
}

impl Num {
    fn of(value: &Value) -> Result<Num, EvalError> {
        match value {
            Value::Int(n) => Ok(Num::Int(*n)),
            Value::Float(n) => Ok(Num::Float(*n)),
            other => Err(EvalError::expected("a number", other)),
        }
    }

    fn to_f64(self) -> f64 {
        match self {
            Num::Int(n) => n as f64,
            Num::Float(n) => n,
        }
    }

    fn is_zero(self) -> bool {
        match self {
            Num::Int(n) => n == 0,
            Num::Float(n) => n == 0.0,
        }
    }
}

/// Apply an integer op (checked) when both sides are integers, otherwise
/// a float op on the promoted operands.
fn arith(
    a: &Value,
    b: &Value,
    int_op: fn(i64, i64) -> Option<i64>,
    float_op: fn(f64, f64) -> f64,
) -> Result<Value, EvalError> {
    match (Num::of(a)?, Num::of(b)?) {
        (Num::Int(x), Num::Int(y)) => int_op(x, y)
            .map(Value::Int)
            .ok_or(EvalError::IntegerOverflow),
        (x, y) => Ok(Value::Float(float_op(x.to_f64(), y.to_f64()))),
    }
}

fn arity_error(name: &str, args: &[Value]) -> EvalError {
    EvalError::Arity {
        name: name.to_string(),
        expected: Arity::Range(1, 2).to_string(),
        got: args.len(),
    }
}

fn nonzero_divisor(b: &Value) -> Result<(), EvalError> {
    if Num::of(b)?.is_zero() {
        return Err(EvalError::DivisionByZero);
    }
    Ok(())
}

fn floor_div_i64(a: i64, b: i64) -> Option<i64> {
    let q = a.checked_div(b)?;
    if a % b != 0 && ((a < 0) != (b < 0)) {
        q.checked_sub(1)
    } else {
        Some(q)
    }
}

// Result takes the sign of the divisor.
fn floor_mod_i64(a: i64, b: i64) -> Option<i64> {
    let r = a.checked_rem(b)?;
    if r != 0 && ((r < 0) != (b < 0)) {
        r.checked_add(b)
    } else {
        Some(r)
    }
}

fn floor_mod_f64(a: f64, b: f64) -> f64 {
    let r = a % b;
    if r != 0.0 && ((r < 0.0) != (b < 0.0)) {
        r + b
    } else {
        r
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Built-in Function Implementations
// ═══════════════════════════════════════════════════════════════════════

fn builtin_add(args: &[Value]) -> Result<Value, EvalError> {
    match args {
        [a] => Num::of(a).map(|_| a.clone()),
        [Value::String(a), Value::String(b)] => Ok(Value::from(format!("{}{}", a, b))),
        [a, b] => arith(a, b, i64::checked_add, |x, y| x + y),
        _ => Err(arity_error("+", args)),
    }
}

fn builtin_sub(args: &[Value]) -> Result<Value, EvalError> {
    match args {
        [a] => match Num::of(a)? {
            Num::Int(n) => n.checked_neg().map(Value::Int).ok_or(EvalError::IntegerOverflow),
            Num::Float(n) => Ok(Value::Float(-n)),
        },
        [a, b] => arith(a, b, i64::checked_sub, |x, y| x - y),
        _ => Err(arity_error("-", args)),
    }
}

fn builtin_mul(args: &[Value]) -> Result<Value, EvalError> {
    arith(&args[0], &args[1], i64::checked_mul, |x, y| x * y)
}

fn builtin_div(args: &[Value]) -> Result<Value, EvalError> {
    let (a, b) = (Num::of(&args[0])?, Num::of(&args[1])?);
    if b.is_zero() {
        return Err(EvalError::DivisionByZero);
    }
    Ok(Value::Float(a.to_f64() / b.to_f64()))
}

fn builtin_floor_div(args: &[Value]) -> Result<Value, EvalError> {
    nonzero_divisor(&args[1])?;
    arith(&args[0], &args[1], floor_div_i64, |x, y| (x / y).floor())
}

fn builtin_mod(args: &[Value]) -> Result<Value, EvalError> {
    nonzero_divisor(&args[1])?;
    arith(&args[0], &args[1], floor_mod_i64, floor_mod_f64)
}

fn compare(a: &Value, b: &Value) -> Result<Ordering, EvalError> {
    match (a, b) {
        (Value::Int(x), Value::Int(y)) => Ok(x.cmp(y)),
        (Value::String(x), Value::String(y)) => Ok(x.cmp(y)),
        _ if a.is_number() && b.is_number() => {
            let (x, y) = (Num::of(a)?.to_f64(), Num::of(b)?.to_f64());
            x.partial_cmp(&y).ok_or_else(|| EvalError::TypeError {
                message: "cannot order NaN".to_string(),
            })
        }
        _ => Err(EvalError::TypeError {
            message: format!(
                "cannot compare `{}` with `{}`",
                type_name(a),
                type_name(b)
            ),
        }),
    }
}

fn builtin_gt(args: &[Value]) -> Result<Value, EvalError> {
    compare(&args[0], &args[1]).map(|o| Value::Bool(o == Ordering::Greater))
}

fn builtin_lt(args: &[Value]) -> Result<Value, EvalError> {
    compare(&args[0], &args[1]).map(|o| Value::Bool(o == Ordering::Less))
}

fn builtin_ge(args: &[Value]) -> Result<Value, EvalError> {
    compare(&args[0], &args[1]).map(|o| Value::Bool(o != Ordering::Less))
}

fn builtin_le(args: &[Value]) -> Result<Value, EvalError> {
    compare(&args[0], &args[1]).map(|o| Value::Bool(o != Ordering::Greater))
}

/// Structural equality, with integers and floats compared by value.
pub(crate) fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Int(x), Value::Float(y)) | (Value::Float(y), Value::Int(x)) => (*x as f64) == *y,
        (Value::Sequence(xs), Value::Sequence(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys.iter()).all(|(x, y)| values_equal(x, y))
        }
        _ => a == b,
    }
}

fn builtin_eq(args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::Bool(values_equal(&args[0], &args[1])))
}

fn builtin_print(args: &[Value]) -> Result<Value, EvalError> {
    print_to(&mut io::stdout().lock(), args)
}

fn print_to(out: &mut impl Write, args: &[Value]) -> Result<Value, EvalError> {
    let line = args
        .iter()
        .map(Value::to_print_string)
        .collect::<Vec<_>>()
        .join(" ");
    writeln!(out, "{}", line).map_err(|err| EvalError::BuiltinError {
        name: "print".to_string(),
        message: err.to_string(),
    })?;
    Ok(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_floor_division_follows_divisor_sign() {
        assert_eq!(floor_div_i64(7, 2), Some(3));
        assert_eq!(floor_div_i64(-7, 2), Some(-4));
        assert_eq!(floor_div_i64(7, -2), Some(-4));
        assert_eq!(floor_div_i64(i64::MIN, -1), None);
    }

    #[test]
    fn test_modulo_follows_divisor_sign() {
        assert_eq!(floor_mod_i64(7, 3), Some(1));
        assert_eq!(floor_mod_i64(-7, 3), Some(2));
        assert_eq!(floor_mod_i64(7, -3), Some(-2));
        assert_eq!(floor_mod_f64(-7.5, 2.0), 0.5);
    }

    #[test]
    fn test_values_equal_across_number_subtypes() {
        assert!(values_equal(&Value::Int(1), &Value::Float(1.0)));
        assert!(!values_equal(&Value::Int(1), &Value::string("1")));
    }

    #[test]
    fn test_prelude_binds_constants() {
        let env = Environment::with_prelude();
        assert_eq!(env.lookup("null").unwrap(), Value::Null);
        assert_eq!(env.lookup("true").unwrap(), Value::Bool(true));
        assert_eq!(env.lookup("VERSION").unwrap(), Value::string(VERSION_INFO));
        assert!(env.lookup("+").unwrap().is_callable());
    }

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_print_joins_arguments() {
        let mut out = Vec::new();
        let args = [Value::string("x ="), Value::Int(3)];
        assert_eq!(print_to(&mut out, &args).unwrap(), Value::Null);
        assert_eq!(String::from_utf8(out).unwrap(), "x = 3\n");
    }

    #[test]
    fn test_print_reports_write_failure() {
        match print_to(&mut ClosedPipe, &[Value::Int(1)]) {
            Err(EvalError::BuiltinError { name, message }) => {
                assert_eq!(name, "print");
                assert_eq!(message, "closed");
            }
            other => panic!("unexpected result {:?}", other),
        }
    }
}
