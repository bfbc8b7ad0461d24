use std::collections::HashMap;

use crate::ast::TypeName;
use crate::error::Error;
use crate::runtime::utils::float_to_int;
use crate::types::Value;

lazy_static::lazy_static! {
    // Type names accepted by `--dtype` and the `::` cast operator.
    static ref TYPE_REGISTRY: HashMap<&'static str, TypeName> = {
        let mut m = HashMap::new();
        m.insert("str", TypeName::String);
        m.insert("string", TypeName::String);
        m.insert("int", TypeName::Integer);
        m.insert("integer", TypeName::Integer);
        m.insert("float", TypeName::Float);
        m.insert("number", TypeName::Float);
        m.insert("bool", TypeName::Boolean);
        m.insert("boolean", TypeName::Boolean);
        m.insert("list", TypeName::Array);
        m.insert("array", TypeName::Array);
        m.insert("none", TypeName::Null);
        m.insert("null", TypeName::Null);
        m.insert("nonetype", TypeName::Null);
        m
    };
}

pub fn resolve_type(name: &str) -> Option<TypeName> {
    TYPE_REGISTRY.get(name.trim().to_lowercase().as_str()).copied()
}

fn cast_error(v: &Value, ty: &TypeName) -> Error {
    Error::new(format!("Cannot convert {} {} to {}", v.type_name(), v.repr(), ty.name()), None)
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "y" | "on" => Some(true),
        "false" | "0" | "no" | "n" | "off" => Some(false),
        _ => None,
    }
}

/// Best-effort literal inference for the items of a `[a, b, c]` list token.
pub fn infer_value(s: &str) -> Value {
    let s = s.trim();
    if s.len() >= 2 && ((s.starts_with('"') && s.ends_with('"')) || (s.starts_with('\'') && s.ends_with('\''))) {
        return Value::String(s[1..s.len() - 1].to_string());
    }
    match s.to_lowercase().as_str() {
        "true" => return Value::Boolean(true),
        "false" => return Value::Boolean(false),
        "null" | "none" => return Value::Null,
        _ => {}
    }
    if let Ok(n) = s.parse::<i64>() {
        return Value::Integer(n);
    }
    if let Ok(n) = s.parse::<f64>() {
        return Value::Float(n);
    }
    Value::String(s.to_string())
}

fn parse_list(s: &str) -> Option<Vec<Value>> {
    let inner = s.trim().strip_prefix('[')?.strip_suffix(']')?;
    if inner.trim().is_empty() {
        return Some(Vec::new());
    }
    Some(inner.split(',').map(infer_value).collect())
}

pub fn cast_value(v: Value, ty: &TypeName) -> Result<Value, Error> {
    Ok(match ty {
        TypeName::Integer => match v {
            Value::Integer(n) => Value::Integer(n),
            Value::Float(n) => match float_to_int(n.trunc()) {
                Some(i) => Value::Integer(i),
                None => return Err(cast_error(&v, ty)),
            },
            Value::Boolean(b) => Value::Integer(b as i64),
            Value::String(ref s) => match s.trim().parse::<i64>() {
                Ok(n) => Value::Integer(n),
                Err(_) => return Err(cast_error(&v, ty)),
            },
            other => return Err(cast_error(&other, ty)),
        },
        TypeName::Float => match v {
            Value::Integer(n) => Value::Float(n as f64),
            Value::Float(n) => Value::Float(n),
            Value::Boolean(b) => Value::Float(if b { 1.0 } else { 0.0 }),
            Value::String(ref s) => match s.trim().parse::<f64>() {
                Ok(n) => Value::Float(n),
                Err(_) => return Err(cast_error(&v, ty)),
            },
            other => return Err(cast_error(&other, ty)),
        },
        TypeName::String => match v {
            Value::String(s) => Value::String(s),
            other => Value::String(other.to_string()),
        },
        TypeName::Boolean => match v {
            Value::String(ref s) => match parse_bool(s) {
                Some(b) => Value::Boolean(b),
                None => return Err(cast_error(&v, ty)),
            },
            other => Value::Boolean(other.truthy()),
        },
        TypeName::Array => match v {
            Value::Array(items) => Value::Array(items),
            Value::String(s) => match parse_list(&s) {
                Some(items) => Value::Array(items),
                None => Value::Array(vec![Value::String(s)]),
            },
            other => Value::Array(vec![other]),
        },
        TypeName::Null => match v {
            Value::Null => Value::Null,
            Value::String(ref s) if matches!(s.trim().to_lowercase().as_str(), "" | "none" | "null") => Value::Null,
            other => return Err(cast_error(&other, ty)),
        },
    })
}
