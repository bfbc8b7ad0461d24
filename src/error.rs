use std::fmt::{Display, Formatter};
use std::path::PathBuf;

use thiserror::Error as ThisError;

/// Error raised while lexing, parsing or evaluating an expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    pub message: String,
    pub position: Option<usize>,
}

impl Error {
    pub fn new<M: Into<String>>(message: M, position: Option<usize>) -> Self {
        Self { message: message.into(), position }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.position {
            Some(pos) => write!(f, "{} at position {}", self.message, pos),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for Error {}

/// Exit code for argument and coercion failures (`EINVAL`).
pub const EXIT_INVALID_ARGUMENT: i32 = 22;
/// Exit code for every other runtime failure.
pub const EXIT_GENERIC_ERROR: i32 = 32;

pub type Result<T> = std::result::Result<T, LambdaError>;

/// The two failure classes an invocation can end in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    Generic,
}

#[derive(ThisError, Debug)]
pub enum LambdaError {
    #[error("Invalid argument: {}", .0)]
    InvalidArgument(String),

    #[error("Evaluation failed: {}", .0)]
    Evaluation(#[from] Error),

    #[error("Expression is empty")]
    EmptyExpression,

    #[error("Script `{}` has no expression to evaluate", .path.display())]
    EmptyScript { path: PathBuf },

    #[error("IO error with {} at path `{}`: {}", .description, .path.display(), .source)]
    Io {
        description: String,
        path: PathBuf,
        source: std::io::Error,
    },
}

impl LambdaError {
    pub fn invalid_argument<M: Into<String>>(message: M) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn io_error(description: &str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            description: description.to_string(),
            path: path.into(),
            source,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            LambdaError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            _ => ErrorKind::Generic,
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.kind() {
            ErrorKind::InvalidArgument => EXIT_INVALID_ARGUMENT,
            ErrorKind::Generic => EXIT_GENERIC_ERROR,
        }
    }

    /// Short message for the user; the full error is only shown in debug mode.
    pub fn summary(&self) -> &'static str {
        match self.kind() {
            ErrorKind::InvalidArgument => "Either wrong argument type or missing a --dtype flag.",
            ErrorKind::Generic => {
                "An error occurred during the execution, re-run it with -D to see what's wrong."
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_exit_codes() {
        assert_eq!(LambdaError::invalid_argument("x").exit_code(), 22);
        assert_eq!(LambdaError::from(Error::new("boom", None)).exit_code(), 32);
        assert_eq!(LambdaError::EmptyExpression.kind(), ErrorKind::Generic);
    }

    #[test]
    fn position_is_rendered() {
        assert_eq!(Error::new("Unexpected character", Some(3)).to_string(), "Unexpected character at position 3");
    }
}
