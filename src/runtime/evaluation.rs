use std::collections::HashMap;

use crate::ast::{Expr, LogicalOp};
use crate::error::Error;
use crate::runtime::{
    arithmetic::{binary_op, unary_op},
    builtin_functions::{exec_builtin, is_builtin},
    type_casting::cast_value,
    utils::{index_value, slice_value},
};
use crate::types::Value;

pub fn eval(expr: &Expr) -> Result<Value, Error> {
    eval_with_vars(expr, &HashMap::new())
}

fn eval_all(exprs: &[Expr], vars: &HashMap<String, Value>) -> Result<Vec<Value>, Error> {
    let mut out = Vec::with_capacity(exprs.len());
    for e in exprs {
        out.push(eval_with_vars(e, vars)?);
    }
    Ok(out)
}

pub fn eval_with_vars(expr: &Expr, vars: &HashMap<String, Value>) -> Result<Value, Error> {
    match expr {
        Expr::Integer(n) => Ok(Value::Integer(*n)),
        Expr::Float(n) => Ok(Value::Float(*n)),
        Expr::StringLit(s) => Ok(Value::String(s.clone())),
        Expr::Boolean(b) => Ok(Value::Boolean(*b)),
        Expr::Null => Ok(Value::Null),

        Expr::Variable(name) => vars
            .get(name)
            .cloned()
            .ok_or_else(|| Error::new(format!("Name '{}' is not defined", name), None)),

        Expr::Unary(op, e) => unary_op(*op, eval_with_vars(e, vars)?),

        Expr::Binary(l, op, r) => {
            let a = eval_with_vars(l, vars)?;
            let b = eval_with_vars(r, vars)?;
            binary_op(*op, a, b)
        }

        Expr::Logical(l, op, r) => {
            let left = eval_with_vars(l, vars)?.truthy();
            let result = match op {
                LogicalOp::And => left && eval_with_vars(r, vars)?.truthy(),
                LogicalOp::Or => left || eval_with_vars(r, vars)?.truthy(),
            };
            Ok(Value::Boolean(result))
        }

        Expr::Ternary { cond, then, otherwise } => {
            if eval_with_vars(cond, vars)?.truthy() {
                eval_with_vars(then, vars)
            } else {
                eval_with_vars(otherwise, vars)
            }
        }

        Expr::Array(items) => Ok(Value::Array(eval_all(items, vars)?)),

        Expr::Comprehension { body, var, iter, filter } => {
            let items = match eval_with_vars(iter, vars)? {
                Value::Array(items) => items,
                Value::String(s) => s.chars().map(|c| Value::String(c.to_string())).collect(),
                other => {
                    return Err(Error::new(format!("'{}' object is not iterable", other.type_name()), None))
                }
            };
            let mut env = vars.clone();
            let mut out = Vec::with_capacity(items.len());
            for it in items {
                env.insert(var.clone(), it);
                if let Some(f) = filter {
                    if !eval_with_vars(f, &env)?.truthy() {
                        continue;
                    }
                }
                out.push(eval_with_vars(body, &env)?);
            }
            Ok(Value::Array(out))
        }

        Expr::TypeCast { expr, ty } => cast_value(eval_with_vars(expr, vars)?, ty),

        Expr::Index { target, index } => {
            let recv = eval_with_vars(target, vars)?;
            let idx = eval_with_vars(index, vars)?;
            index_value(recv, &idx)
        }

        Expr::Slice { target, start, end } => {
            let recv = eval_with_vars(target, vars)?;
            slice_value(
                recv,
                start.as_ref().map(|e| eval_with_vars(e, vars)).transpose()?,
                end.as_ref().map(|e| eval_with_vars(e, vars)).transpose()?,
            )
        }

        Expr::FunctionCall { name, args } => {
            if !is_builtin(name) {
                return Err(Error::new(format!("Unknown function: {}", name), None));
            }
            exec_builtin(name, &eval_all(args, vars)?)
        }

        Expr::MethodCall { target, name, args } => {
            let mut all = vec![eval_with_vars(target, vars)?];
            all.extend(eval_all(args, vars)?);
            exec_builtin(name, &all)
        }
    }
}
