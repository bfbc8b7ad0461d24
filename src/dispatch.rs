//! Picks the evaluation mode of one expression and runs it.

use std::collections::HashMap;

use log::debug;

use crate::error::{LambdaError, Result};
use crate::evaluator::{compile, evaluate};
use crate::rewriter::{is_aggregate, max_placeholder_index, rewrite, COLLECTION_NAME};
use crate::types::Value;

/// Placeholders a reduce expression may use: `#1` is the accumulator, `#2` the element.
pub const REDUCE_ARITY: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Aggregate,
    Positional,
    Reduce,
}

pub fn detect_mode(expression: &str, reducing: bool) -> Mode {
    if is_aggregate(expression) {
        Mode::Aggregate
    } else if reducing {
        Mode::Reduce
    } else {
        Mode::Positional
    }
}

/// Evaluates `expression` against already coerced arguments.
pub fn dispatch(expression: &str, args: &[Value], seed: Option<Value>) -> Result<Value> {
    if expression.trim().is_empty() {
        return Err(LambdaError::EmptyExpression);
    }
    match (detect_mode(expression, seed.is_some()), seed) {
        (Mode::Reduce, Some(seed)) => eval_reduce(expression, args, seed),
        (Mode::Aggregate, _) => eval_aggregate(expression, args),
        _ => eval_positional(expression, args),
    }
}

fn eval_aggregate(expression: &str, args: &[Value]) -> Result<Value> {
    let form = rewrite(expression, args.len(), true);
    debug!("Comprehension form: {}", form);
    let mut bindings = HashMap::new();
    bindings.insert(COLLECTION_NAME.to_string(), Value::Array(args.to_vec()));
    Ok(evaluate(&form, &bindings)?)
}

fn eval_positional(expression: &str, args: &[Value]) -> Result<Value> {
    let arity = max_placeholder_index(expression)?;
    if args.len() < arity {
        return Err(LambdaError::invalid_argument(format!(
            "expression uses #{} but only {} argument(s) were given",
            arity,
            args.len()
        )));
    }
    let form = rewrite(expression, arity, false);
    debug!("Callable form: {}", form);
    let lambda = compile(&form)?;
    if args.len() > arity {
        debug!("Ignoring {} argument(s) beyond #{}", args.len() - arity, arity);
    }
    lambda.apply(&args[..arity])
}

fn eval_reduce(expression: &str, args: &[Value], seed: Value) -> Result<Value> {
    let max = max_placeholder_index(expression)?;
    if max > REDUCE_ARITY {
        return Err(LambdaError::invalid_argument(format!(
            "reduce expressions take #1 (accumulator) and #2 (element), found #{}",
            max
        )));
    }
    let form = rewrite(expression, REDUCE_ARITY, false);
    debug!("Reduce form: {} starting from {}", form, seed.repr());
    let lambda = compile(&form)?;
    args.iter().try_fold(seed, |acc, v| lambda.apply(&[acc, v.clone()]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn ints(ns: &[i64]) -> Vec<Value> {
        ns.iter().map(|n| Value::Integer(*n)).collect()
    }

    #[test]
    fn mode_detection() {
        assert_eq!(detect_mode("#i for #i in #?", true), Mode::Aggregate);
        assert_eq!(detect_mode("#1 + #2", true), Mode::Reduce);
        assert_eq!(detect_mode("#1 + #2", false), Mode::Positional);
    }

    #[test]
    fn positional_truncates_excess_arguments() {
        assert_eq!(dispatch("#1+#2", &ints(&[2, 4, 5]), None).unwrap(), Value::Integer(6));
    }

    #[test]
    fn gaps_still_bind_by_index() {
        assert_eq!(dispatch("#3 - #1", &ints(&[1, 100, 10]), None).unwrap(), Value::Integer(9));
    }

    #[test]
    fn reduce_is_a_left_fold() {
        assert_eq!(dispatch("#1+#2", &ints(&[2, 4, 20, 24]), Some(Value::Integer(0))).unwrap(), Value::Integer(50));
        // ((100 - 1) - 2) - 3
        assert_eq!(dispatch("#1-#2", &ints(&[1, 2, 3]), Some(Value::Integer(100))).unwrap(), Value::Integer(94));
    }

    #[test]
    fn reduce_over_nothing_returns_the_seed() {
        assert_eq!(dispatch("#1+#2", &[], Some(Value::Integer(7))).unwrap(), Value::Integer(7));
    }

    #[test]
    fn reduce_rejects_third_placeholder() {
        let err = dispatch("#1+#3", &ints(&[1, 2]), Some(Value::Integer(0))).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn aggregate_preserves_order_and_length() {
        assert_eq!(
            dispatch("#i+1 for #i in #?", &ints(&[2, 4, 5, 10]), None).unwrap(),
            Value::Array(ints(&[3, 5, 6, 11]))
        );
    }

    #[test]
    fn blank_expression_is_generic() {
        assert_eq!(dispatch("   ", &[], None).unwrap_err().kind(), ErrorKind::Generic);
    }
}
