//! Primitive form classification
//!
//! After desugaring, every sequence is one of a fixed set of primitive
//! forms or a function application. Classification checks the shape of
//! the operands once so the individual evaluators can work with typed
//! pieces instead of re-indexing the raw sequence.

use crate::error::EvalError;
use crate::expr::Expr;

/// A primitive form, borrowed from the expression it was classified from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Form<'a> {
    /// `[begin e ...]`
    Begin(&'a [Expr]),

    /// `[var name value]`
    Var {
        /// Bound name
        name: &'a str,
        /// Initializer
        value: &'a Expr,
    },

    /// `[set target value]`
    Set {
        /// Variable or property being written
        target: SetTarget<'a>,
        /// New value
        value: &'a Expr,
    },

    /// `[if cond then alt]`; `alt` may be omitted
    If {
        /// Condition
        cond: &'a Expr,
        /// Consequent
        then: &'a Expr,
        /// Alternate
        alt: Option<&'a Expr>,
    },

    /// `[while cond body]`
    While {
        /// Loop condition
        cond: &'a Expr,
        /// Loop body
        body: &'a Expr,
    },

    /// `[lambda [params] body]`
    Lambda {
        /// Parameter list (checked to be symbols at evaluation)
        params: &'a [Expr],
        /// Function body
        body: &'a Expr,
    },

    /// `[class name parent body]`
    Class {
        /// Class name
        name: &'a str,
        /// Parent class expression (`null` for none)
        parent: &'a Expr,
        /// Class body
        body: &'a Expr,
    },

    /// `[super class]`
    Super {
        /// Class whose parent is requested
        class: &'a Expr,
    },

    /// `[new class args ...]`
    New {
        /// Class expression
        class: &'a Expr,
        /// Constructor arguments
        args: &'a [Expr],
    },

    /// `[prop object name]`
    Prop {
        /// Instance, class, or module expression
        object: &'a Expr,
        /// Property name
        name: &'a str,
    },

    /// `[module name body]`
    Module {
        /// Module name
        name: &'a str,
        /// Module body
        body: &'a Expr,
    },

    /// `[import name]`
    Import {
        /// Module name
        name: &'a str,
    },

    /// `[quote datum]`
    Quote(&'a Expr),

    /// `[callee args ...]`
    Apply {
        /// Function expression
        callee: &'a Expr,
        /// Arguments
        args: &'a [Expr],
    },
}

/// The target of a `set`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SetTarget<'a> {
    /// A variable, assigned where it is already bound
    Name(&'a str),

    /// `[prop object name]`, defined directly on the object
    Prop {
        /// Object expression
        object: &'a Expr,
        /// Property name
        name: &'a str,
    },
}

impl<'a> Form<'a> {
    /// Classify the items of a (non-sugared) sequence.
    ///
    /// # Errors
    ///
    /// `UnimplementedForm` for an empty sequence or one headed by a
    /// literal; `MalformedForm` when a keyword has the wrong operands.
    pub fn classify(items: &'a [Expr]) -> Result<Self, EvalError> {
        let Some((head, operands)) = items.split_first() else {
            return Err(unimplemented(items));
        };

        let keyword = match head {
            Expr::Symbol(name) => name.as_ref(),
            Expr::List(_) => "",
            _ => return Err(unimplemented(items)),
        };

        let form = match keyword {
            "begin" => Form::Begin(operands),
            "var" => {
                let [name, value] = shape::<2>("var", operands, "name value")?;
                Form::Var {
                    name: symbol("var", name)?,
                    value,
                }
            }
            "set" => {
                let [target, value] = shape::<2>("set", operands, "target value")?;
                Form::Set {
                    target: set_target(target)?,
                    value,
                }
            }
            "if" => match operands {
                [cond, then] => Form::If {
                    cond,
                    then,
                    alt: None,
                },
                [cond, then, alt] => Form::If {
                    cond,
                    then,
                    alt: Some(alt),
                },
                _ => {
                    return Err(EvalError::malformed(
                        "if",
                        "expected `[if condition consequent alternate]`",
                    ))
                }
            },
            "while" => {
                let [cond, body] = shape::<2>("while", operands, "condition body")?;
                Form::While { cond, body }
            }
            "lambda" => {
                let [params, body] = shape::<2>("lambda", operands, "[params] body")?;
                let params = params
                    .as_list()
                    .ok_or_else(|| EvalError::malformed("lambda", "parameters must be a list"))?;
                Form::Lambda { params, body }
            }
            "class" => {
                let [name, parent, body] = shape::<3>("class", operands, "name parent body")?;
                Form::Class {
                    name: symbol("class", name)?,
                    parent,
                    body,
                }
            }
            "super" => {
                let [class] = shape::<1>("super", operands, "class")?;
                Form::Super { class }
            }
            "new" => match operands.split_first() {
                Some((class, args)) => Form::New { class, args },
                None => return Err(EvalError::malformed("new", "expected `[new class args...]`")),
            },
            "prop" => {
                let [object, name] = shape::<2>("prop", operands, "object name")?;
                Form::Prop {
                    object,
                    name: symbol("prop", name)?,
                }
            }
            "module" => {
                let [name, body] = shape::<2>("module", operands, "name body")?;
                Form::Module {
                    name: symbol("module", name)?,
                    body,
                }
            }
            "import" => {
                let [name] = shape::<1>("import", operands, "name")?;
                Form::Import {
                    name: symbol("import", name)?,
                }
            }
            "quote" => {
                let [datum] = shape::<1>("quote", operands, "datum")?;
                Form::Quote(datum)
            }
            _ => Form::Apply {
                callee: head,
                args: operands,
            },
        };
        Ok(form)
    }
}

fn unimplemented(items: &[Expr]) -> EvalError {
    EvalError::UnimplementedForm {
        form: Expr::List(items.to_vec()).to_string(),
    }
}

fn shape<'a, const N: usize>(
    form: &'static str,
    operands: &'a [Expr],
    expected: &str,
) -> Result<&'a [Expr; N], EvalError> {
    operands
        .try_into()
        .map_err(|_| EvalError::malformed(form, format!("expected `[{} {}]`", form, expected)))
}

fn symbol<'a>(form: &'static str, expr: &'a Expr) -> Result<&'a str, EvalError> {
    expr.as_symbol()
        .ok_or_else(|| EvalError::malformed(form, format!("`{}` is not a name", expr)))
}

fn set_target(target: &Expr) -> Result<SetTarget<'_>, EvalError> {
    if let Some(name) = target.as_symbol() {
        return Ok(SetTarget::Name(name));
    }
    match target.as_list() {
        Some([head, object, name]) if head.is_symbol("prop") => Ok(SetTarget::Prop {
            object,
            name: symbol("set", name)?,
        }),
        _ => Err(EvalError::malformed(
            "set",
            format!("cannot assign to `{}`", target),
        )),
    }
}
