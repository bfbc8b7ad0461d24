use log::debug;

use crate::ast::TypeName;
use crate::error::{LambdaError, Result};
use crate::runtime::type_casting::{cast_value, resolve_type};
use crate::types::Value;

pub const DEFAULT_DTYPE: &str = "str";

pub fn lookup_type(declared: &str) -> Result<TypeName> {
    resolve_type(declared).ok_or_else(|| LambdaError::invalid_argument(format!("unknown type `{}`", declared)))
}

fn coerce_one(value: Value, ty: &TypeName) -> Result<Value> {
    cast_value(value, ty).map_err(|e| LambdaError::invalid_argument(e.message))
}

/// Converts raw arguments and the optional reduce seed to the declared type.
///
/// `str` is an identity coercion: strings pass through, anything else is
/// replaced by its display text.
pub fn coerce(raw: Vec<Value>, declared: &str, seed: Option<Value>) -> Result<(Vec<Value>, Option<Value>)> {
    let ty = lookup_type(declared)?;
    debug!("Coercing {} argument(s) to {}", raw.len(), ty.name());
    let args: Result<Vec<Value>> = raw.into_iter().map(|v| coerce_one(v, &ty)).collect();
    let seed = seed.map(|v| coerce_one(v, &ty)).transpose();
    Ok((args?, seed?))
}

/// Wraps command line tokens as string values.
pub fn raw_values<S: AsRef<str>>(tokens: &[S]) -> Vec<Value> {
    tokens.iter().map(|t| Value::String(t.as_ref().to_string())).collect()
}
