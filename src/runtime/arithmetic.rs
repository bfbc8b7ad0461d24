use std::cmp::Ordering;

use crate::ast::{BinaryOp, UnaryOp};
use crate::error::Error;
use crate::runtime::utils::{compare_or_err, float_to_int, values_equal};
use crate::types::{format_float, Value};

fn int_pair(a: &Value, b: &Value) -> Option<(i64, i64)> {
    match (a, b) {
        (Value::Integer(_) | Value::Boolean(_), Value::Integer(_) | Value::Boolean(_)) => {
            Some((a.as_integer()?, b.as_integer()?))
        }
        _ => None,
    }
}

fn float_pair(a: &Value, b: &Value) -> Option<(f64, f64)> {
    Some((a.as_number()?, b.as_number()?))
}

fn unsupported(op: &str, a: &Value, b: &Value) -> Error {
    Error::new(
        format!("Unsupported operand types for {}: {} and {}", op, a.type_name(), b.type_name()),
        None,
    )
}

fn overflow(op: &str) -> Error {
    Error::new(format!("Integer overflow in '{}'", op), None)
}

fn zero_division() -> Error {
    Error::new("Division by zero", None)
}

/// Upper bound on the length of a repeated string (bytes) or list (items).
pub const MAX_REPEAT_LEN: usize = 1 << 24;

/// Repetition count for `seq * times`, rejecting results above [`MAX_REPEAT_LEN`].
fn repeat_count(len: usize, times: i64) -> Result<usize, Error> {
    if len == 0 || times <= 0 {
        return Ok(0);
    }
    usize::try_from(times)
        .ok()
        .and_then(|t| len.checked_mul(t).map(|total| (t, total)))
        .filter(|(_, total)| *total <= MAX_REPEAT_LEN)
        .map(|(t, _)| t)
        .ok_or_else(|| Error::new("Repetition result too large", None))
}

fn repeat<T: Clone>(items: &[T], times: i64) -> Result<Vec<T>, Error> {
    let times = repeat_count(items.len(), times)?;
    let mut out = Vec::with_capacity(items.len() * times);
    for _ in 0..times {
        out.extend_from_slice(items);
    }
    Ok(out)
}

fn integral(name: &str, n: f64) -> Result<Value, Error> {
    float_to_int(n)
        .map(Value::Integer)
        .ok_or_else(|| Error::new(format!("{} result {} does not fit an int", name, format_float(n)), None))
}

fn floor_div(a: i64, b: i64) -> Option<i64> {
    let q = a.checked_div(b)?;
    if a % b != 0 && ((a < 0) != (b < 0)) {
        Some(q - 1)
    } else {
        Some(q)
    }
}

fn floor_mod(a: f64, b: f64) -> f64 {
    let r = a % b;
    if r != 0.0 && ((r < 0.0) != (b < 0.0)) { r + b } else { r }
}

pub fn unary_op(op: UnaryOp, v: Value) -> Result<Value, Error> {
    match op {
        UnaryOp::Not => Ok(Value::Boolean(!v.truthy())),
        UnaryOp::Plus => match v {
            Value::Float(n) => Ok(Value::Float(n)),
            other => other
                .as_integer()
                .map(Value::Integer)
                .ok_or_else(|| Error::new(format!("Unary '+' on {}", other.type_name()), None)),
        },
        UnaryOp::Minus => match v {
            Value::Float(n) => Ok(Value::Float(-n)),
            other => match other.as_integer() {
                Some(n) => n.checked_neg().map(Value::Integer).ok_or_else(|| overflow("-")),
                None => Err(Error::new(format!("Unary '-' on {}", other.type_name()), None)),
            },
        },
    }
}

pub fn binary_op(op: BinaryOp, a: Value, b: Value) -> Result<Value, Error> {
    match op {
        BinaryOp::Add => match (&a, &b) {
            (Value::String(x), Value::String(y)) => Ok(Value::String(format!("{}{}", x, y))),
            (Value::Array(x), Value::Array(y)) => Ok(Value::Array(x.iter().chain(y.iter()).cloned().collect())),
            _ => match int_pair(&a, &b) {
                Some((x, y)) => x.checked_add(y).map(Value::Integer).ok_or_else(|| overflow("+")),
                None => float_pair(&a, &b).map(|(x, y)| Value::Float(x + y)).ok_or_else(|| unsupported("+", &a, &b)),
            },
        },
        BinaryOp::Sub => match int_pair(&a, &b) {
            Some((x, y)) => x.checked_sub(y).map(Value::Integer).ok_or_else(|| overflow("-")),
            None => float_pair(&a, &b).map(|(x, y)| Value::Float(x - y)).ok_or_else(|| unsupported("-", &a, &b)),
        },
        BinaryOp::Mul => match (&a, &b) {
            (Value::String(s), Value::Integer(n)) | (Value::Integer(n), Value::String(s)) => {
                Ok(Value::String(s.repeat(repeat_count(s.len(), *n)?)))
            }
            (Value::Array(items), Value::Integer(n)) | (Value::Integer(n), Value::Array(items)) => {
                Ok(Value::Array(repeat(items, *n)?))
            }
            _ => match int_pair(&a, &b) {
                Some((x, y)) => x.checked_mul(y).map(Value::Integer).ok_or_else(|| overflow("*")),
                None => float_pair(&a, &b).map(|(x, y)| Value::Float(x * y)).ok_or_else(|| unsupported("*", &a, &b)),
            },
        },
        BinaryOp::Div => {
            let (x, y) = float_pair(&a, &b).ok_or_else(|| unsupported("/", &a, &b))?;
            if y == 0.0 {
                return Err(zero_division());
            }
            Ok(Value::Float(x / y))
        }
        BinaryOp::FloorDiv => match int_pair(&a, &b) {
            Some((_, 0)) => Err(zero_division()),
            Some((x, y)) => floor_div(x, y).map(Value::Integer).ok_or_else(|| overflow("//")),
            None => {
                let (x, y) = float_pair(&a, &b).ok_or_else(|| unsupported("//", &a, &b))?;
                if y == 0.0 {
                    return Err(zero_division());
                }
                Ok(Value::Float((x / y).floor()))
            }
        },
        BinaryOp::Mod => match int_pair(&a, &b) {
            Some((_, 0)) => Err(zero_division()),
            Some((x, y)) => {
                let r = x.checked_rem(y).ok_or_else(|| overflow("%"))?;
                Ok(Value::Integer(if r != 0 && ((r < 0) != (y < 0)) { r + y } else { r }))
            }
            None => {
                let (x, y) = float_pair(&a, &b).ok_or_else(|| unsupported("%", &a, &b))?;
                if y == 0.0 {
                    return Err(zero_division());
                }
                Ok(Value::Float(floor_mod(x, y)))
            }
        },
        BinaryOp::Pow => match int_pair(&a, &b) {
            Some((x, y)) if y >= 0 => {
                let exp = u32::try_from(y).map_err(|_| overflow("**"))?;
                x.checked_pow(exp).map(Value::Integer).ok_or_else(|| overflow("**"))
            }
            _ => {
                let (x, y) = float_pair(&a, &b).ok_or_else(|| unsupported("**", &a, &b))?;
                if x == 0.0 && y < 0.0 {
                    return Err(Error::new("Zero cannot be raised to a negative power", None));
                }
                Ok(Value::Float(x.powf(y)))
            }
        },
        BinaryOp::Eq => Ok(Value::Boolean(values_equal(&a, &b))),
        BinaryOp::Ne => Ok(Value::Boolean(!values_equal(&a, &b))),
        BinaryOp::Gt => Ok(Value::Boolean(compare_or_err(&a, &b, ">")? == Ordering::Greater)),
        BinaryOp::Lt => Ok(Value::Boolean(compare_or_err(&a, &b, "<")? == Ordering::Less)),
        BinaryOp::Ge => Ok(Value::Boolean(compare_or_err(&a, &b, ">=")? != Ordering::Less)),
        BinaryOp::Le => Ok(Value::Boolean(compare_or_err(&a, &b, "<=")? != Ordering::Greater)),
        BinaryOp::In => contains(&b, &a).map(Value::Boolean),
        BinaryOp::NotIn => contains(&b, &a).map(|found| Value::Boolean(!found)),
    }
}

pub fn contains(haystack: &Value, needle: &Value) -> Result<bool, Error> {
    match (haystack, needle) {
        (Value::Array(items), _) => Ok(items.iter().any(|v| values_equal(v, needle))),
        (Value::String(s), Value::String(sub)) => Ok(s.contains(sub.as_str())),
        _ => Err(Error::new(
            format!("'in' requires a list or a string pair, got {} in {}", needle.type_name(), haystack.type_name()),
            None,
        )),
    }
}

/// Flattens a single array argument, as `MIN([1, 2])` and `MIN(1, 2)` are the same call.
fn operands(args: &[Value]) -> &[Value] {
    match args {
        [Value::Array(items)] => items,
        _ => args,
    }
}

fn number_arg(name: &str, args: &[Value], i: usize) -> Result<f64, Error> {
    args.get(i)
        .and_then(Value::as_number)
        .ok_or_else(|| Error::new(format!("{} expects a number as argument {}", name, i + 1), None))
}

fn extreme(name: &str, args: &[Value], wanted: Ordering) -> Result<Value, Error> {
    let items = operands(args);
    let mut best = items
        .first()
        .cloned()
        .ok_or_else(|| Error::new(format!("{} of an empty sequence", name), None))?;
    for it in &items[1..] {
        if compare_or_err(it, &best, name)? == wanted {
            best = it.clone();
        }
    }
    Ok(best)
}

pub fn exec_arithmetic(name: &str, args: &[Value]) -> Result<Value, Error> {
    match name {
        "SUM" => {
            let mut acc = Value::Integer(0);
            for it in operands(args) {
                acc = binary_op(BinaryOp::Add, acc, it.clone())?;
            }
            Ok(acc)
        }
        "AVG" | "AVERAGE" => {
            let items = operands(args);
            if items.is_empty() {
                return Err(Error::new("AVG of an empty sequence", None));
            }
            let mut total = 0.0;
            for it in items {
                total += it.as_number().ok_or_else(|| Error::new("AVG expects numbers", None))?;
            }
            Ok(Value::Float(total / items.len() as f64))
        }
        "MIN" => extreme("MIN", args, Ordering::Less),
        "MAX" => extreme("MAX", args, Ordering::Greater),
        "ABS" => match args.first() {
            Some(Value::Float(n)) => Ok(Value::Float(n.abs())),
            Some(v @ (Value::Integer(_) | Value::Boolean(_))) => v
                .as_integer()
                .and_then(i64::checked_abs)
                .map(Value::Integer)
                .ok_or_else(|| overflow("abs")),
            _ => Err(Error::new("ABS expects a number", None)),
        },
        "ROUND" => {
            let n = number_arg("ROUND", args, 0)?;
            match args.get(1) {
                None => {
                    if let Some(Value::Integer(i)) = args.first() {
                        return Ok(Value::Integer(*i));
                    }
                    integral("ROUND", n.round())
                }
                Some(_) => {
                    let decimals = number_arg("ROUND", args, 1)? as i32;
                    let factor = 10f64.powi(decimals);
                    Ok(Value::Float((n * factor).round() / factor))
                }
            }
        }
        "FLOOR" => integral("FLOOR", number_arg("FLOOR", args, 0)?.floor()),
        "CEIL" | "CEILING" => integral("CEIL", number_arg("CEIL", args, 0)?.ceil()),
        "SQRT" => {
            let n = number_arg("SQRT", args, 0)?;
            if n < 0.0 {
                return Err(Error::new("SQRT of a negative number", None));
            }
            Ok(Value::Float(n.sqrt()))
        }
        "POW" | "POWER" => match args {
            [a, b] => binary_op(BinaryOp::Pow, a.clone(), b.clone()),
            _ => Err(Error::new("POW expects 2 arguments", None)),
        },
        "MOD" => match args {
            [a, b] => binary_op(BinaryOp::Mod, a.clone(), b.clone()),
            _ => Err(Error::new("MOD expects 2 arguments", None)),
        },
        _ => Err(Error::new(format!("Unknown arithmetic function: {}", name), None)),
    }
}
