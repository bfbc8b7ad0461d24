use std::fs;

use log::debug;

use crate::config::Options;
use crate::error::{LambdaError, Result};

/// Splits file content into arguments: one per trimmed line, each line
/// further split on `delimiter` when given.
pub fn split_arguments(content: &str, delimiter: Option<&str>) -> Vec<String> {
    let lines = content.lines().map(str::trim);
    match delimiter {
        Some(delim) if !delim.is_empty() => lines.flat_map(|line| line.split(delim)).map(str::to_string).collect(),
        _ => lines.map(str::to_string).collect(),
    }
}

/// Raw arguments of the invocation: the command line ones, or the
/// contents of `--filepath` when it is set.
pub fn load_arguments(options: &Options, cli_arguments: Vec<String>) -> Result<Vec<String>> {
    let path = match &options.source {
        Some(path) => path,
        None => return Ok(cli_arguments),
    };
    if !cli_arguments.is_empty() {
        debug!("Ignoring {} command line argument(s) in favour of `{}`", cli_arguments.len(), path.display());
    }
    let content = fs::read_to_string(path).map_err(|e| LambdaError::io_error("input", path, e))?;
    let arguments = split_arguments(&content, options.delimiter.as_deref());
    debug!("Read {} argument(s) from `{}`", arguments.len(), path.display());
    Ok(arguments)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_argument_per_trimmed_line() {
        assert_eq!(split_arguments(" 1 \n2\n", None), vec!["1", "2"]);
    }

    #[test]
    fn delimiter_flattens_rows() {
        assert_eq!(split_arguments("1,2\n3", Some(",")), vec!["1", "2", "3"]);
    }

    #[test]
    fn command_line_arguments_without_source() {
        let options = Options::new("#1");
        assert_eq!(load_arguments(&options, vec!["a".into()]).unwrap(), vec!["a".to_string()]);
    }
}
