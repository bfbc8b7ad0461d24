use std::cmp::Ordering;

use crate::error::Error;
use crate::types::Value;

/// Exact conversion of an integral float to `i64`; `None` for NaN,
/// infinities and anything outside the `i64` range.
pub fn float_to_int(n: f64) -> Option<i64> {
    // i64::MAX as f64 rounds up to 2^63, hence the strict bound
    if n.is_finite() && n >= i64::MIN as f64 && n < i64::MAX as f64 {
        Some(n as i64)
    } else {
        None
    }
}

pub fn clamp_index(len: usize, idx: i64) -> Option<usize> {
    if idx >= 0 {
        let i = idx as usize;
        if i < len {
            Some(i)
        } else {
            None
        }
    } else {
        let neg = idx.unsigned_abs() as usize;
        if neg <= len {
            Some(len - neg)
        } else {
            None
        }
    }
}

fn index_of(v: &Value) -> Result<i64, Error> {
    v.as_integer().ok_or_else(|| Error::new(format!("Indices must be integers, not {}", v.type_name()), None))
}

pub fn index_value(recv: Value, idx: &Value) -> Result<Value, Error> {
    let idx = index_of(idx)?;
    match recv {
        Value::Array(items) => match clamp_index(items.len(), idx) {
            Some(i) => Ok(items[i].clone()),
            None => Err(Error::new("List index out of range", None)),
        },
        Value::String(s) => {
            let chars: Vec<char> = s.chars().collect();
            match clamp_index(chars.len(), idx) {
                Some(i) => Ok(Value::String(chars[i].to_string())),
                None => Err(Error::new("String index out of range", None)),
            }
        }
        other => Err(Error::new(format!("'{}' object is not subscriptable", other.type_name()), None)),
    }
}

fn slice_bounds(len: usize, start: Option<Value>, end: Option<Value>) -> Result<(usize, usize), Error> {
    let len = len as i64;
    let s = match start {
        Some(v) => index_of(&v)?,
        None => 0,
    };
    let e = match end {
        Some(v) => index_of(&v)?,
        None => len,
    };
    let s_norm = if s < 0 { len + s } else { s };
    let e_norm = if e < 0 { len + e } else { e };
    let s_idx = s_norm.clamp(0, len) as usize;
    let e_idx = e_norm.clamp(0, len) as usize;
    Ok((s_idx, e_idx.max(s_idx)))
}

pub fn slice_value(recv: Value, start: Option<Value>, end: Option<Value>) -> Result<Value, Error> {
    match recv {
        Value::Array(items) => {
            let (s, e) = slice_bounds(items.len(), start, end)?;
            Ok(Value::Array(items[s..e].to_vec()))
        }
        Value::String(text) => {
            let chars: Vec<char> = text.chars().collect();
            let (s, e) = slice_bounds(chars.len(), start, end)?;
            Ok(Value::String(chars[s..e].iter().collect()))
        }
        other => Err(Error::new(format!("'{}' object cannot be sliced", other.type_name()), None)),
    }
}

fn is_numeric(v: &Value) -> bool {
    matches!(v, Value::Integer(_) | Value::Float(_) | Value::Boolean(_))
}

pub fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Integer(x), Value::Integer(y)) => x == y,
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Null, Value::Null) => true,
        // Arrays: shallow equality by elements
        (Value::Array(ax), Value::Array(ay)) => {
            ax.len() == ay.len() && ax.iter().zip(ay.iter()).all(|(u, v)| values_equal(u, v))
        }
        (x, y) if is_numeric(x) && is_numeric(y) => x.as_number() == y.as_number(),
        _ => false,
    }
}

/// Ordering for `<`, `>`, `min`, `max` and `sorted`; `None` when the types don't compare.
pub fn compare_values(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Integer(x), Value::Integer(y)) => Some(x.cmp(y)),
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        (Value::Array(ax), Value::Array(ay)) => {
            for (u, v) in ax.iter().zip(ay.iter()) {
                match compare_values(u, v)? {
                    Ordering::Equal => continue,
                    other => return Some(other),
                }
            }
            Some(ax.len().cmp(&ay.len()))
        }
        (x, y) if is_numeric(x) && is_numeric(y) => x.as_number()?.partial_cmp(&y.as_number()?),
        _ => None,
    }
}

pub fn compare_or_err(a: &Value, b: &Value, op: &str) -> Result<Ordering, Error> {
    compare_values(a, b).ok_or_else(|| {
        Error::new(
            format!("'{}' not supported between {} and {}", op, a.type_name(), b.type_name()),
            None,
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float_to_int_range() {
        assert_eq!(float_to_int(-6.0), Some(-6));
        assert_eq!(float_to_int(i64::MIN as f64), Some(i64::MIN));
        assert_eq!(float_to_int(i64::MAX as f64), None);
        assert_eq!(float_to_int(f64::NAN), None);
    }

    #[test]
    fn negative_indices() {
        let items = Value::Array(vec![Value::Integer(10), Value::Integer(20), Value::Integer(30)]);
        assert_eq!(index_value(items.clone(), &Value::Integer(-1)).unwrap(), Value::Integer(30));
        assert!(index_value(items, &Value::Integer(3)).is_err());
    }

    #[test]
    fn string_slices() {
        let s = Value::String("lambda".into());
        assert_eq!(slice_value(s, Some(Value::Integer(1)), Some(Value::Integer(-1))).unwrap(), Value::String("ambd".into()));
    }

    #[test]
    fn numeric_equality_crosses_types() {
        assert!(values_equal(&Value::Integer(2), &Value::Float(2.0)));
        assert!(!values_equal(&Value::Integer(2), &Value::String("2".into())));
        assert_eq!(compare_values(&Value::Integer(1), &Value::String("a".into())), None);
    }
}
