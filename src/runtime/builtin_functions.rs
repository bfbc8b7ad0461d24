use std::collections::HashMap;

use crate::ast::TypeName;
use crate::error::Error;
use crate::types::Value;
use super::{arithmetic, array, logical, string, type_casting};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Category {
    Arithmetic,
    Logical,
    String,
    Array,
    Conversion,
}

lazy_static::lazy_static! {
    // The allow-list of callable names; anything else is an unknown function.
    static ref FUNCTIONS: HashMap<&'static str, Category> = {
        let mut m = HashMap::new();
        for name in ["SUM", "AVG", "AVERAGE", "MIN", "MAX", "ABS", "ROUND", "FLOOR", "CEIL", "CEILING", "SQRT", "POW", "POWER", "MOD"] {
            m.insert(name, Category::Arithmetic);
        }
        for name in ["IF", "ANY", "ALL", "XOR"] {
            m.insert(name, Category::Logical);
        }
        for name in ["UPPER", "LOWER", "TRIM", "STRIP", "SPLIT", "REPLACE", "STARTSWITH", "ENDSWITH"] {
            m.insert(name, Category::String);
        }
        for name in ["LEN", "LENGTH", "COUNT", "FIRST", "LAST", "CONTAINS", "UNIQUE", "SORT", "SORTED", "REVERSE", "REVERSED", "FLATTEN", "JOIN", "RANGE"] {
            m.insert(name, Category::Array);
        }
        for name in ["INT", "FLOAT", "STR", "BOOL", "LIST", "TYPE"] {
            m.insert(name, Category::Conversion);
        }
        m
    };
}

fn exec_conversion(name: &str, args: &[Value]) -> Result<Value, Error> {
    let v = match args {
        [v] => v.clone(),
        _ => return Err(Error::new(format!("{} expects 1 argument", name), None)),
    };
    let ty = match name {
        "TYPE" => return Ok(Value::String(v.type_name().to_string())),
        "INT" => TypeName::Integer,
        "FLOAT" => TypeName::Float,
        "STR" => TypeName::String,
        "BOOL" => return Ok(Value::Boolean(v.truthy())),
        "LIST" => TypeName::Array,
        _ => return Err(Error::new(format!("Unknown conversion function: {}", name), None)),
    };
    type_casting::cast_value(v, &ty)
}

pub fn is_builtin(name: &str) -> bool {
    FUNCTIONS.contains_key(name)
}

pub fn exec_builtin(name: &str, args: &[Value]) -> Result<Value, Error> {
    match FUNCTIONS.get(name) {
        Some(Category::Arithmetic) => arithmetic::exec_arithmetic(name, args),
        Some(Category::Logical) => logical::exec_logical(name, args),
        Some(Category::String) => string::exec_string(name, args),
        Some(Category::Array) => array::exec_array(name, args),
        Some(Category::Conversion) => exec_conversion(name, args),
        None => Err(Error::new(format!("Unknown function: {}", name), None)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatches_by_category() {
        assert_eq!(exec_builtin("INT", &[Value::String("7".into())]).unwrap(), Value::Integer(7));
        assert_eq!(exec_builtin("TYPE", &[Value::Float(1.0)]).unwrap(), Value::String("float".into()));
        assert_eq!(exec_builtin("LEN", &[Value::String("abc".into())]).unwrap(), Value::Integer(3));
        assert!(is_builtin("UPPER"));
    }

    #[test]
    fn unknown_functions_are_rejected() {
        let err = exec_builtin("EXEC", &[]).unwrap_err();
        assert_eq!(err.message, "Unknown function: EXEC");
    }
}
