use std::path::{Path, PathBuf};

use crate::coercion::DEFAULT_DTYPE;
use crate::rewriter::PLACEHOLDER_INDICATOR;

/// Prefix that turns the expression argument into a script path.
pub const SCRIPT_MARKER: &str = "script::";

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Everything one invocation needs, built once from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub expression: String,
    pub dtype: String,
    pub reduce: Option<String>,
    pub source: Option<PathBuf>,
    pub delimiter: Option<String>,
    pub output: Option<PathBuf>,
    pub debug: bool,
    pub output_json: bool,
}

impl Options {
    pub fn new<E: Into<String>>(expression: E) -> Self {
        Self {
            expression: expression.into(),
            dtype: DEFAULT_DTYPE.to_string(),
            reduce: None,
            source: None,
            delimiter: None,
            output: None,
            debug: false,
            output_json: false,
        }
    }

    pub fn with_dtype<T: Into<String>>(mut self, dtype: T) -> Self {
        self.dtype = dtype.into();
        self
    }

    pub fn with_reduce<T: Into<String>>(mut self, seed: T) -> Self {
        self.reduce = Some(seed.into());
        self
    }

    pub fn with_source<P: Into<PathBuf>>(mut self, path: P, delimiter: Option<&str>) -> Self {
        self.source = Some(path.into());
        self.delimiter = delimiter.map(str::to_string);
        self
    }

    /// Path of the script when the expression is `script::<path>`,
    /// optionally written as `#script::<path>`.
    pub fn script_path(&self) -> Option<&Path> {
        let expr = self.expression.trim();
        expr.strip_prefix(PLACEHOLDER_INDICATOR)
            .unwrap_or(expr)
            .strip_prefix(SCRIPT_MARKER)
            .map(|p| Path::new(p.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_string_type() {
        let options = Options::new("#1");
        assert_eq!(options.dtype, "str");
        assert!(options.reduce.is_none());
        assert!(options.script_path().is_none());
    }

    #[test]
    fn script_marker() {
        let options = Options::new("script::/tmp/steps.lambda");
        assert_eq!(options.script_path(), Some(Path::new("/tmp/steps.lambda")));
        let options = Options::new(" #script::/tmp/steps.lambda");
        assert_eq!(options.script_path(), Some(Path::new("/tmp/steps.lambda")));
        assert!(Options::new("#1 + 1").script_path().is_none());
        assert!(Options::new("##script::/tmp/x").script_path().is_none());
    }
}
