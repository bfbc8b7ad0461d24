use crate::types::Value;
use crate::error::Error;

pub fn exec_logical(name: &str, args: &[Value]) -> Result<Value, Error> {
    match name {
        "IF" => {
            if args.len() < 2 { return Err(Error::new("IF expects at least 2 arguments", None)); }
            if args[0].truthy() {
                Ok(args[1].clone())
            } else {
                Ok(args.get(2).cloned().unwrap_or(Value::Null))
            }
        }
        "ANY" => match args {
            [Value::Array(items)] => Ok(Value::Boolean(items.iter().any(Value::truthy))),
            _ => Ok(Value::Boolean(args.iter().any(Value::truthy))),
        },
        "ALL" => match args {
            [Value::Array(items)] => Ok(Value::Boolean(items.iter().all(Value::truthy))),
            _ => Ok(Value::Boolean(args.iter().all(Value::truthy))),
        },
        "XOR" => {
            if args.len() != 2 { return Err(Error::new("XOR expects 2 arguments", None)); }
            Ok(Value::Boolean(args[0].truthy() != args[1].truthy()))
        }
        _ => Err(Error::new(format!("Unknown logical function: {}", name), None)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn if_picks_branch_by_truthiness() {
        let args = [Value::String(String::new()), Value::Integer(1), Value::Integer(2)];
        assert_eq!(exec_logical("IF", &args).unwrap(), Value::Integer(2));
        assert_eq!(exec_logical("IF", &[Value::Boolean(true), Value::Integer(1)]).unwrap(), Value::Integer(1));
        assert_eq!(exec_logical("IF", &[Value::Boolean(false), Value::Integer(1)]).unwrap(), Value::Null);
    }

    #[test]
    fn any_all_accept_a_list() {
        let list = Value::Array(vec![Value::Integer(0), Value::Integer(3)]);
        assert_eq!(exec_logical("ANY", &[list.clone()]).unwrap(), Value::Boolean(true));
        assert_eq!(exec_logical("ALL", &[list]).unwrap(), Value::Boolean(false));
        assert!(exec_logical("XOR", &[Value::Boolean(true)]).is_err());
    }
}
