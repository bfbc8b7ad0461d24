pub mod ast;
pub mod cli_args;
pub mod coercion;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod evaluator;
pub mod input;
pub mod lexer;
pub mod output;
pub mod parser;
pub mod rewriter;
pub mod runtime;
pub mod script;
pub mod types;

pub use ast::Expr;
pub use config::Options;
pub use error::{Error, ErrorKind, LambdaError, Result};
pub use types::Value;

use log::debug;

use coercion::{coerce, raw_values};

/// Parse a standalone expression (no placeholders) into an AST.
pub fn parse(input: &str) -> std::result::Result<Expr, Error> {
    let mut parser = parser::Parser::new(input)?;
    parser.parse()
}

/// Runs one invocation: script chaining when the expression carries the
/// `script::` marker, otherwise coercion followed by dispatch.
pub fn run(options: &Options, raw_args: Vec<String>) -> Result<Value> {
    let args = raw_values(&raw_args);
    let seed = options.reduce.clone().map(Value::String);
    if let Some(path) = options.script_path() {
        debug!("Running script `{}`", path.display());
        return script::run_script(path, args, &options.dtype, seed);
    }
    let (args, seed) = coerce(args, &options.dtype, seed)?;
    dispatch::dispatch(&options.expression, &args, seed)
}

/// Evaluate `expression` over textual arguments converted to `dtype`.
pub fn evaluate(expression: &str, args: &[&str], dtype: &str) -> Result<Value> {
    let options = Options::new(expression).with_dtype(dtype);
    run(&options, args.iter().map(|s| s.to_string()).collect())
}

/// Fold `args` with `expression`, starting from `seed`.
pub fn reduce(expression: &str, args: &[&str], dtype: &str, seed: &str) -> Result<Value> {
    let options = Options::new(expression).with_dtype(dtype).with_reduce(seed);
    run(&options, args.iter().map(|s| s.to_string()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_plain_expression() {
        assert!(parse("1 + 2 * 3").is_ok());
        assert!(parse("1 +").is_err());
    }

    #[test]
    fn run_is_idempotent() {
        let options = Options::new("#1 * 2").with_dtype("int");
        let first = run(&options, vec!["21".into()]).unwrap();
        let second = run(&options, vec!["21".into()]).unwrap();
        assert_eq!(first, Value::Integer(42));
        assert_eq!(first, second);
    }

    #[test]
    fn string_arguments_by_default() {
        assert_eq!(evaluate("#1 + #2", &["ab", "cd"], "str").unwrap(), Value::String("abcd".into()));
    }

    #[test]
    fn reduce_convenience() {
        assert_eq!(reduce("#1 * #2", &["2", "3", "4"], "int", "1").unwrap(), Value::Integer(24));
    }
}
