use std::fs;

use serde::Serialize;

use crate::config::Options;
use crate::error::{Error, LambdaError, Result};
use crate::types::Value;

#[derive(Debug, Serialize)]
struct JsonOutput {
    result: serde_json::Value,
    #[serde(rename = "type")]
    type_name: &'static str,
    execution_time: String,
}

/// Plain rendering: lists print one element per line in their list form
/// (strings quoted), scalars as-is.
pub fn render(value: &Value) -> String {
    match value {
        Value::Array(items) => items.iter().map(Value::repr).collect::<Vec<_>>().join("\n"),
        other => other.to_string(),
    }
}

pub fn render_json(value: &Value, execution_time_ms: f64) -> Result<String> {
    let output = JsonOutput {
        result: value.to_json(),
        type_name: value.type_name(),
        execution_time: format!("{:.2} ms", execution_time_ms),
    };
    serde_json::to_string_pretty(&output)
        .map_err(|e| LambdaError::from(Error::new(format!("Failed to serialize result: {}", e), None)))
}

/// Writes the result to `--output` or stdout.
pub fn write_result(value: &Value, options: &Options, execution_time_ms: f64) -> Result<()> {
    let text = if options.output_json {
        render_json(value, execution_time_ms)?
    } else {
        render(value)
    };
    match &options.output {
        Some(path) => fs::write(path, text).map_err(|e| LambdaError::io_error("output", path, e)),
        None => {
            println!("{}", text);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_render_one_per_line() {
        let v = Value::Array(vec![Value::Integer(3), Value::String("a".into())]);
        assert_eq!(render(&v), "3\n'a'");
        assert_eq!(render(&Value::Float(12.0)), "12.0");
    }

    #[test]
    fn json_carries_type() {
        let text = render_json(&Value::Integer(6), 0.5).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed["result"], serde_json::json!(6));
        assert_eq!(parsed["type"], "int");
        assert_eq!(parsed["execution_time"], "0.50 ms");
    }
}
