use crate::error::Error;
use crate::runtime::utils::{compare_or_err, values_equal};
use crate::types::Value;

fn array_arg<'v>(name: &str, args: &'v [Value]) -> Result<&'v [Value], Error> {
    match args.first() {
        Some(Value::Array(items)) => Ok(items),
        _ => Err(Error::new(format!("{} expects a list", name), None)),
    }
}

fn int_arg(name: &str, v: &Value) -> Result<i64, Error> {
    v.as_integer().ok_or_else(|| Error::new(format!("{} expects integer arguments", name), None))
}

fn range(args: &[Value]) -> Result<Value, Error> {
    let (start, stop, step) = match args {
        [stop] => (0, int_arg("RANGE", stop)?, 1),
        [start, stop] => (int_arg("RANGE", start)?, int_arg("RANGE", stop)?, 1),
        [start, stop, step] => (int_arg("RANGE", start)?, int_arg("RANGE", stop)?, int_arg("RANGE", step)?),
        _ => return Err(Error::new("RANGE expects 1 to 3 arguments", None)),
    };
    if step == 0 {
        return Err(Error::new("RANGE step cannot be zero", None));
    }
    let mut out = Vec::new();
    let mut cur = start;
    while (step > 0 && cur < stop) || (step < 0 && cur > stop) {
        out.push(Value::Integer(cur));
        cur = match cur.checked_add(step) {
            Some(next) => next,
            None => break,
        };
    }
    Ok(Value::Array(out))
}

fn sorted(items: &[Value]) -> Result<Vec<Value>, Error> {
    // insertion sort keeps comparison errors propagating instead of panicking
    let mut out: Vec<Value> = Vec::with_capacity(items.len());
    for it in items {
        let mut pos = out.len();
        while pos > 0 && compare_or_err(it, &out[pos - 1], "<")? == std::cmp::Ordering::Less {
            pos -= 1;
        }
        out.insert(pos, it.clone());
    }
    Ok(out)
}

pub fn exec_array(name: &str, args: &[Value]) -> Result<Value, Error> {
    match name {
        "LEN" | "LENGTH" | "COUNT" => match args.first() {
            Some(Value::Array(items)) => Ok(Value::Integer(items.len() as i64)),
            Some(Value::String(s)) => Ok(Value::Integer(s.chars().count() as i64)),
            _ => Err(Error::new("LEN expects a list or a string", None)),
        },
        "FIRST" => array_arg(name, args)?.first().cloned().ok_or_else(|| Error::new("FIRST on empty list", None)),
        "LAST" => array_arg(name, args)?.last().cloned().ok_or_else(|| Error::new("LAST on empty list", None)),
        "CONTAINS" => match args {
            [haystack, needle] => crate::runtime::arithmetic::contains(haystack, needle).map(Value::Boolean),
            _ => Err(Error::new("CONTAINS expects (list or string, value)", None)),
        },
        "UNIQUE" => {
            let mut out: Vec<Value> = Vec::new();
            for it in array_arg(name, args)? {
                if !out.iter().any(|seen| values_equal(seen, it)) {
                    out.push(it.clone());
                }
            }
            Ok(Value::Array(out))
        }
        "SORT" | "SORTED" => {
            let mut out = sorted(array_arg(name, args)?)?;
            if args.get(1).map(Value::truthy).unwrap_or(false) {
                out.reverse();
            }
            Ok(Value::Array(out))
        }
        "REVERSE" | "REVERSED" => match args.first() {
            Some(Value::Array(items)) => Ok(Value::Array(items.iter().rev().cloned().collect())),
            Some(Value::String(s)) => Ok(Value::String(s.chars().rev().collect())),
            _ => Err(Error::new("REVERSE expects a list or a string", None)),
        },
        "FLATTEN" => {
            fn flatten(v: &Value, out: &mut Vec<Value>) {
                match v {
                    Value::Array(items) => { for it in items { flatten(it, out); } }
                    other => out.push(other.clone()),
                }
            }
            let mut out = Vec::new();
            for a in args { flatten(a, &mut out); }
            Ok(Value::Array(out))
        }
        "JOIN" => {
            let items = array_arg(name, args)?;
            let sep = match args.get(1) {
                Some(Value::String(s)) => s.as_str(),
                Some(_) => return Err(Error::new("JOIN separator must be a string", None)),
                None => ",",
            };
            let parts: Vec<String> = items.iter().map(|v| v.to_string()).collect();
            Ok(Value::String(parts.join(sep)))
        }
        "RANGE" => range(args),
        _ => Err(Error::new(format!("Unknown array function: {}", name), None)),
    }
}
