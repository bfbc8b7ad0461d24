//! Turns callable forms into values. The expression grammar is closed: only
//! the operators and allow-listed functions of the runtime can be reached.

use std::collections::HashMap;

use crate::ast::Lambda;
use crate::error::{Error, LambdaError, Result};
use crate::parser::Parser;
use crate::rewriter::CallableForm;
use crate::runtime::eval_with_vars;
use crate::types::Value;

/// Parses a positional callable form into an invocable [`Lambda`].
pub fn compile(form: &CallableForm) -> std::result::Result<Lambda, Error> {
    Parser::new(&form.to_string())?.parse_lambda()
}

/// Evaluates a comprehension form once against `bindings`.
pub fn evaluate(form: &CallableForm, bindings: &HashMap<String, Value>) -> std::result::Result<Value, Error> {
    let expr = Parser::new(&form.to_string())?.parse()?;
    eval_with_vars(&expr, bindings)
}

impl Lambda {
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Binds `args` to the parameters in order and evaluates the body.
    pub fn apply(&self, args: &[Value]) -> Result<Value> {
        if args.len() < self.arity() {
            return Err(LambdaError::invalid_argument(format!(
                "expression expects {} argument(s) but {} were given",
                self.arity(),
                args.len()
            )));
        }
        let env: HashMap<String, Value> = self.params.iter().cloned().zip(args.iter().cloned()).collect();
        Ok(eval_with_vars(&self.body, &env)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::rewriter::rewrite;

    #[test]
    fn compiled_lambda_applies_in_order() {
        let lambda = compile(&rewrite("#1 - #2", 2, false)).unwrap();
        assert_eq!(lambda.arity(), 2);
        assert_eq!(lambda.apply(&[Value::Integer(10), Value::Integer(4)]).unwrap(), Value::Integer(6));
    }

    #[test]
    fn too_few_arguments() {
        let lambda = compile(&rewrite("#1 + #2", 2, false)).unwrap();
        let err = lambda.apply(&[Value::Integer(1)]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn evaluation_errors_are_generic() {
        let lambda = compile(&rewrite("#1 / 0", 1, false)).unwrap();
        let err = lambda.apply(&[Value::Integer(1)]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Generic);
    }

    #[test]
    fn comprehension_sees_bindings() {
        let mut bindings = HashMap::new();
        bindings.insert("_argv".to_string(), Value::Array(vec![Value::Integer(1), Value::Integer(2)]));
        let result = evaluate(&rewrite("#i * 10 for #i in #?", 0, true), &bindings).unwrap();
        assert_eq!(result, Value::Array(vec![Value::Integer(10), Value::Integer(20)]));
    }
}
