//! Script chaining: each line of a script is an expression whose result is
//! the only argument of the next line.

use std::fs;
use std::path::Path;

use log::debug;

use crate::coercion::coerce;
use crate::dispatch::dispatch;
use crate::error::{LambdaError, Result};
use crate::types::Value;

/// Carry-over between two script steps.
struct ChainState {
    args: Vec<Value>,
    dtype: String,
    seed: Option<Value>,
}

impl ChainState {
    fn after(result: &Value) -> Self {
        Self {
            args: vec![result.clone()],
            dtype: result.type_name().to_string(),
            seed: None,
        }
    }
}

pub fn read_script(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path).map_err(|e| LambdaError::io_error("script", path, e))?;
    Ok(content.lines().map(|line| line.trim().to_string()).collect())
}

/// Runs already loaded script lines. The first step sees the invocation's
/// arguments, type and seed; later steps never reduce.
pub fn run_lines(path: &Path, lines: &[String], args: Vec<Value>, dtype: &str, seed: Option<Value>) -> Result<Value> {
    let (terminal, steps) = match lines.split_last() {
        Some((terminal, steps)) if !(steps.is_empty() && terminal.is_empty()) => (terminal, steps),
        _ => return Err(LambdaError::EmptyScript { path: path.to_path_buf() }),
    };

    let mut state = ChainState { args, dtype: dtype.to_string(), seed };
    for (idx, expr) in steps.iter().enumerate() {
        debug!("Script step {}/{} ({}): `{}`", idx + 1, lines.len(), state.dtype, expr);
        let result = step(expr, &mut state)?;
        state = ChainState::after(&result);
    }
    debug!("Script step {}/{} ({}): `{}`", lines.len(), lines.len(), state.dtype, terminal);
    step(terminal, &mut state)
}

fn step(expr: &str, state: &mut ChainState) -> Result<Value> {
    let (args, seed) = coerce(std::mem::take(&mut state.args), &state.dtype, state.seed.take())?;
    dispatch(expr, &args, seed)
}

/// Reads `path` and runs it as a chain.
pub fn run_script(path: &Path, args: Vec<Value>, dtype: &str, seed: Option<Value>) -> Result<Value> {
    let lines = read_script(path)?;
    debug!("Loaded script `{}` with {} line(s)", path.display(), lines.len());
    run_lines(path, &lines, args, dtype, seed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coercion::raw_values;
    use crate::error::ErrorKind;

    fn lines(src: &[&str]) -> Vec<String> {
        src.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn results_are_threaded() {
        let result = run_lines(Path::new("t"), &lines(&["#1+#2", "#1*2"]), raw_values(&["2", "4"]), "int", None).unwrap();
        assert_eq!(result, Value::Integer(12));
    }

    #[test]
    fn type_follows_previous_result() {
        let steps = lines(&["#1 / 2", "type(#1)"]);
        let result = run_lines(Path::new("t"), &steps, raw_values(&["5"]), "int", None).unwrap();
        assert_eq!(result, Value::String("float".into()));
    }

    #[test]
    fn seed_only_applies_to_first_step() {
        let steps = lines(&["#1+#2", "#1+#2"]);
        // second step has a single argument and no seed, so #2 is unbound
        let err = run_lines(Path::new("t"), &steps, raw_values(&["1", "2"]), "int", Some(Value::String("0".into())))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn empty_scripts_are_generic_errors() {
        for src in [vec![], vec![""]] {
            let err = run_lines(Path::new("t"), &lines(&src), vec![], "str", None).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Generic);
        }
    }

    #[test]
    fn failing_step_aborts_the_chain() {
        let steps = lines(&["#1 / 0", "#1 + 1"]);
        let err = run_lines(Path::new("t"), &steps, raw_values(&["1"]), "int", None).unwrap_err();
        assert!(matches!(err, LambdaError::Evaluation(_)));
    }
}
