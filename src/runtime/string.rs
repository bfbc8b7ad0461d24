use crate::error::Error;
use crate::types::Value;

fn string_arg<'v>(name: &str, args: &'v [Value], i: usize) -> Result<&'v str, Error> {
    match args.get(i) {
        Some(Value::String(s)) => Ok(s.as_str()),
        _ => Err(Error::new(format!("{} expects a string as argument {}", name, i + 1), None)),
    }
}

pub fn exec_string(name: &str, args: &[Value]) -> Result<Value, Error> {
    match name {
        "UPPER" => Ok(Value::String(string_arg(name, args, 0)?.to_uppercase())),
        "LOWER" => Ok(Value::String(string_arg(name, args, 0)?.to_lowercase())),
        "TRIM" | "STRIP" => Ok(Value::String(string_arg(name, args, 0)?.trim().to_string())),
        "SPLIT" => {
            // SPLIT(text, [separator]); without separator splits on whitespace
            let text = string_arg(name, args, 0)?;
            let parts: Vec<Value> = match args.get(1) {
                Some(_) => {
                    let sep = string_arg(name, args, 1)?;
                    if sep.is_empty() {
                        return Err(Error::new("SPLIT separator cannot be empty", None));
                    }
                    text.split(sep).map(|p| Value::String(p.to_string())).collect()
                }
                None => text.split_whitespace().map(|p| Value::String(p.to_string())).collect(),
            };
            Ok(Value::Array(parts))
        }
        "REPLACE" => {
            let text = string_arg(name, args, 0)?;
            let from = string_arg(name, args, 1)?;
            let to = string_arg(name, args, 2)?;
            Ok(Value::String(text.replace(from, to)))
        }
        "STARTSWITH" => Ok(Value::Boolean(string_arg(name, args, 0)?.starts_with(string_arg(name, args, 1)?))),
        "ENDSWITH" => Ok(Value::Boolean(string_arg(name, args, 0)?.ends_with(string_arg(name, args, 1)?))),
        _ => Err(Error::new(format!("Unknown string function: {}", name), None)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: &str) -> Value {
        Value::String(v.to_string())
    }

    #[test]
    fn case_and_trim() {
        assert_eq!(exec_string("UPPER", &[s("hello")]).unwrap(), s("HELLO"));
        assert_eq!(exec_string("STRIP", &[s("  x ")]).unwrap(), s("x"));
        assert!(exec_string("UPPER", &[Value::Integer(1)]).is_err());
    }

    #[test]
    fn split_with_and_without_separator() {
        assert_eq!(exec_string("SPLIT", &[s("a,b")]).unwrap(), Value::Array(vec![s("a,b")]));
        assert_eq!(exec_string("SPLIT", &[s("a,b"), s(",")]).unwrap(), Value::Array(vec![s("a"), s("b")]));
    }
}
