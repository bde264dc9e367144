use std::io::Write;

use crate::{
    ast::Position,
    error::RuntimeError,
    interpreter::{
        evaluator::{core::EvalResult, statement::expect_bool},
        value::core::Value,
    },
};

/// Type alias for builtin function handlers.
///
/// A builtin receives the output sink, a slice of evaluated argument values
/// and the position of the call.
pub type BuiltinFn = fn(&mut dyn Write, &[Value], Position) -> EvalResult<Value>;

/// Specifies the allowed number of arguments for a builtin.
///
/// - `Exact(n)` means the builtin must receive exactly `n` arguments.
/// - `Any` accepts any number, including none.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exact(usize),
    Any,
}

impl Arity {
    /// Tests whether the given argument count satisfies this arity constraint.
    #[must_use]
    pub const fn check(self, n: usize) -> bool {
        match self {
            Self::Exact(m) => n == m,
            Self::Any => true,
        }
    }
}

/// Defines builtin functions by generating a lookup table and a name list.
///
/// Each entry provides:
/// - a string name,
/// - an arity specification,
/// - a function pointer implementing the builtin.
///
/// The macro produces:
/// - `BuiltinDef` (builtin metadata),
/// - `BUILTIN_TABLE` (static table for lookup),
/// - `BUILTIN_FUNCTIONS` (public list of builtin names).
macro_rules! builtin_functions {
    (
        $(
            $name:literal => {
                arity: $arity:expr,
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        /// A builtin's name, accepted argument counts and implementation.
        pub struct BuiltinDef {
            pub name:  &'static str,
            pub arity: Arity,
            pub func:  BuiltinFn,
        }
        static BUILTIN_TABLE: &[BuiltinDef] = &[
            $(
                BuiltinDef { name: $name, arity: $arity, func: $func },
            )*
        ];
        /// Names of all builtin functions.
        pub const BUILTIN_FUNCTIONS: &[&str] = &[
            $($name,)*
        ];
    };
}

builtin_functions! {
    "print"    => { arity: Arity::Any,      func: print },
    "println"  => { arity: Arity::Any,      func: println },
    "assert"   => { arity: Arity::Exact(1), func: assert },
    "str"      => { arity: Arity::Exact(1), func: to_str },
    "len"      => { arity: Arity::Exact(1), func: len },
    "list"     => { arity: Arity::Any,      func: list },
    "head"     => { arity: Arity::Exact(1), func: head },
    "rest"     => { arity: Arity::Exact(1), func: rest },
    "is_empty" => { arity: Arity::Exact(1), func: is_empty },
    "is_nil"   => { arity: Arity::Exact(1), func: is_nil },
}

/// Finds the builtin called `name`.
///
/// Builtins are the last place a called name is looked up, so a variable
/// or procedure of the same name hides them.
///
/// # Example
/// ```
/// use linger::interpreter::evaluator::function::builtin::{Arity, find};
///
/// assert_eq!(find("len").unwrap().arity, Arity::Exact(1));
/// assert!(find("sqrt").is_none());
/// ```
#[must_use]
pub fn find(name: &str) -> Option<&'static BuiltinDef> {
    BUILTIN_TABLE.iter().find(|b| b.name == name)
}

/// Writes the arguments separated by single spaces.
fn print(out: &mut dyn Write, args: &[Value], pos: Position) -> EvalResult<Value> {
    let line = args.iter()
                   .map(ToString::to_string)
                   .collect::<Vec<_>>()
                   .join(" ");
    write!(out, "{line}").map_err(|e| output_error(&e, pos))?;
    Ok(Value::Void)
}

/// Like `print`, followed by a newline.
fn println(out: &mut dyn Write, args: &[Value], pos: Position) -> EvalResult<Value> {
    print(out, args, pos)?;
    writeln!(out).map_err(|e| output_error(&e, pos))?;
    Ok(Value::Void)
}

fn assert(_: &mut dyn Write, args: &[Value], pos: Position) -> EvalResult<Value> {
    if expect_bool(&args[0], pos)? {
        Ok(Value::Void)
    } else {
        Err(RuntimeError::AssertionFailed { pos })
    }
}

fn to_str(_: &mut dyn Write, args: &[Value], _: Position) -> EvalResult<Value> {
    Ok(Value::Str(args[0].to_string()))
}

/// Number of characters in a string or elements in a list.
fn len(_: &mut dyn Write, args: &[Value], pos: Position) -> EvalResult<Value> {
    let count = match &args[0] {
        Value::Str(s) => s.chars().count(),
        Value::List(values) => values.len(),
        other => {
            return Err(RuntimeError::TypeMismatch { details:
                                                        format!("len expects a string or a list, found {}",
                                                                other.type_name()),
                                                    pos });
        },
    };
    i64::try_from(count).map(Value::Int)
                        .map_err(|_| RuntimeError::IntegerOverflow { pos })
}

/// Collects the arguments into a new list.
fn list(_: &mut dyn Write, args: &[Value], _: Position) -> EvalResult<Value> {
    Ok(Value::from(args.to_vec()))
}

/// First element of a list, or `nil` when it is empty.
fn head(_: &mut dyn Write, args: &[Value], pos: Position) -> EvalResult<Value> {
    Ok(expect_list(&args[0], pos)?.first().cloned().unwrap_or(Value::Nil))
}

/// Everything after the first element, or `nil` when the list is empty.
fn rest(_: &mut dyn Write, args: &[Value], pos: Position) -> EvalResult<Value> {
    match expect_list(&args[0], pos)? {
        [] => Ok(Value::Nil),
        [_, tail @ ..] => Ok(Value::from(tail.to_vec())),
    }
}

fn is_empty(_: &mut dyn Write, args: &[Value], pos: Position) -> EvalResult<Value> {
    Ok(Value::Bool(expect_list(&args[0], pos)?.is_empty()))
}

fn is_nil(_: &mut dyn Write, args: &[Value], _: Position) -> EvalResult<Value> {
    Ok(Value::Bool(matches!(args[0], Value::Nil)))
}

fn expect_list(value: &Value, pos: Position) -> EvalResult<&[Value]> {
    match value {
        Value::List(values) => Ok(values.as_slice()),
        other => Err(RuntimeError::ExpectedList { found: other.type_name(),
                                                  pos }),
    }
}

fn output_error(e: &std::io::Error, pos: Position) -> RuntimeError {
    RuntimeError::Output { details: e.to_string(),
                           pos }
}

#[cfg(test)]
mod tests {
    use super::*;

    const POS: Position = Position::new(1, 1);

    fn call(name: &str, args: &[Value]) -> (EvalResult<Value>, String) {
        let mut out = Vec::new();
        let builtin = find(name).unwrap();
        let result = (builtin.func)(&mut out, args, POS);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn print_joins_arguments_with_spaces() {
        let (result, out) = call("print", &[Value::Int(1), "a".into(), Value::Float(2.0)]);
        assert_eq!(result, Ok(Value::Void));
        assert_eq!(out, "1 a 2.0");
    }

    #[test]
    fn println_ends_the_line() {
        let (_, out) = call("println", &[]);
        assert_eq!(out, "\n");
    }

    #[test]
    fn assert_fails_on_false() {
        let (result, _) = call("assert", &[Value::Bool(false)]);
        assert_eq!(result, Err(RuntimeError::AssertionFailed { pos: POS }));
    }

    #[test]
    fn len_counts_characters() {
        let (result, _) = call("len", &["héllo".into()]);
        assert_eq!(result, Ok(Value::Int(5)));
    }

    #[test]
    fn len_counts_list_elements() {
        let (result, _) = call("len", &[Value::from(vec![Value::Nil, Value::Int(2)])]);
        assert_eq!(result, Ok(Value::Int(2)));
    }

    #[test]
    fn head_and_rest_split_a_list() {
        let xs = Value::from(vec![Value::Int(1), Value::Int(2), Value::Int(3)]);
        assert_eq!(call("head", &[xs.clone()]).0, Ok(Value::Int(1)));
        assert_eq!(call("rest", &[xs]).0,
                   Ok(Value::from(vec![Value::Int(2), Value::Int(3)])));
    }

    #[test]
    fn head_and_rest_of_an_empty_list_are_nil() {
        let empty = Value::from(Vec::new());
        assert_eq!(call("head", &[empty.clone()]).0, Ok(Value::Nil));
        assert_eq!(call("rest", &[empty.clone()]).0, Ok(Value::Nil));
        assert_eq!(call("is_empty", &[empty]).0, Ok(Value::Bool(true)));
    }

    #[test]
    fn list_builtins_reject_other_types() {
        assert_eq!(call("is_empty", &[Value::Bool(true)]).0,
                   Err(RuntimeError::ExpectedList { found: "bool",
                                                    pos:   POS, }));
        assert_eq!(call("head", &["abc".into()]).0,
                   Err(RuntimeError::ExpectedList { found: "string",
                                                    pos:   POS, }));
    }

    #[test]
    fn is_nil_only_matches_nil() {
        assert_eq!(call("is_nil", &[Value::Nil]).0, Ok(Value::Bool(true)));
        for other in [Value::Void, Value::Int(0), Value::from(Vec::new()), "".into()] {
            assert_eq!(call("is_nil", &[other]).0, Ok(Value::Bool(false)));
        }
    }

    #[test]
    fn every_builtin_is_listed() {
        assert!(BUILTIN_FUNCTIONS.iter().all(|name| find(name).is_some()));
    }
}
