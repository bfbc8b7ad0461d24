use std::io::Write;

use lambda_eval::{run, ErrorKind, LambdaError, Options, Value};
use tempfile::NamedTempFile;

fn script(lines: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(lines.as_bytes()).unwrap();
    file
}

fn run_script(file: &NamedTempFile, args: &[&str], dtype: &str, seed: Option<&str>) -> lambda_eval::Result<Value> {
    let mut options = Options::new(format!("script::{}", file.path().display())).with_dtype(dtype);
    if let Some(seed) = seed {
        options = options.with_reduce(seed);
    }
    run(&options, args.iter().map(|s| s.to_string()).collect())
}

#[test]
fn test_results_thread_through_lines() {
    let file = script("#1+#2\n#1*2\n");
    assert_eq!(run_script(&file, &["2", "4"], "int", None).unwrap(), Value::Integer(12));
}

#[test]
fn test_lines_are_trimmed() {
    let file = script("   #1 + 1  \n\t#1 * 3\n");
    assert_eq!(run_script(&file, &["1"], "int", None).unwrap(), Value::Integer(6));
}

#[test]
fn test_type_follows_each_result() {
    // int -> float -> str
    let file = script("#1 / 2\nstr(#1)\n#1 + '!'");
    assert_eq!(run_script(&file, &["5"], "int", None).unwrap(), Value::String("2.5!".into()));
}

#[test]
fn test_aggregate_then_positional() {
    let file = script("#i * 2 for #i in #?\nsum(#1)");
    assert_eq!(run_script(&file, &["1", "2", "3"], "int", None).unwrap(), Value::Integer(12));
}

#[test]
fn test_reduce_applies_to_first_line() {
    let file = script("#1+#2\n#1*10");
    assert_eq!(run_script(&file, &["1", "2", "3"], "int", Some("0")).unwrap(), Value::Integer(60));
}

#[test]
fn test_empty_script_is_generic() {
    for content in ["", "\n", "   "] {
        let file = script(content);
        let err = run_script(&file, &["1"], "int", None).unwrap_err();
        assert!(matches!(err, LambdaError::EmptyScript { .. }), "{content:?}");
        assert_eq!(err.exit_code(), 32);
    }
}

#[test]
fn test_blank_line_inside_script_fails() {
    let file = script("#1 + 1\n\n#1 + 2");
    assert!(matches!(run_script(&file, &["1"], "int", None).unwrap_err(), LambdaError::EmptyExpression));
}

#[test]
fn test_missing_script_is_generic() {
    let options = Options::new("script::/nonexistent/steps.lambda");
    let err = run(&options, vec![]).unwrap_err();
    assert!(matches!(err, LambdaError::Io { .. }));
    assert_eq!(err.kind(), ErrorKind::Generic);
}

#[test]
fn test_failing_line_aborts() {
    let file = script("#1 + 1\n#1 / 0\n#1 + 1");
    assert_eq!(run_script(&file, &["1"], "int", None).unwrap_err().kind(), ErrorKind::Generic);
}
