use std::path::PathBuf;

use chrono::{Datelike, Local};
use clap::{ArgAction, Parser};

use crate::coercion::DEFAULT_DTYPE;
use crate::config::{Options, VERSION};

fn epilog() -> String {
    format!(
        "Expressions use #1, #2, ... for arguments, or #i/#? to map over all of them.\n\
         Prefix the expression with script:: to run a file of chained expressions.\n\n\
         lambda {} (c) {}",
        VERSION,
        Local::now().year()
    )
}

#[derive(Parser, Debug)]
#[command(
    name = "lambda",
    version = VERSION,
    about = "Evaluate placeholder expressions over command line or file arguments",
    after_help = epilog(),
    disable_version_flag = true,
    allow_negative_numbers = true,
    term_width = 0
)]
pub struct Args {
    /// Expression using #1..#n, or #i and #? for aggregates; `script::<path>` runs a script.
    pub expression: String,

    /// Arguments bound to the placeholders.
    pub arguments: Vec<String>,

    /// Fold the arguments, starting from this accumulator (#1) with each element as #2.
    #[arg(long, short = 'r')]
    pub reduce: Option<String>,

    /// Type every argument is converted to.
    #[arg(long, short = 't', visible_alias = "dt", default_value = DEFAULT_DTYPE)]
    pub dtype: String,

    /// Read arguments from a file, one per line.
    #[arg(long, short = 'f')]
    pub filepath: Option<PathBuf>,

    /// Split each line of --filepath on this delimiter.
    #[arg(long, short = 'd', requires = "filepath")]
    pub delim: Option<String>,

    /// Write the result to a file instead of stdout.
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Print debug logs and full error details.
    #[arg(long, short = 'D', action)]
    pub debug: bool,

    /// Print the result as JSON with its type and execution time.
    #[arg(long, short = 'j', action)]
    pub output_json: bool,

    /// Print version.
    #[arg(long, short = 'v', action = ArgAction::Version)]
    version: Option<bool>,
}

impl From<&Args> for Options {
    fn from(args: &Args) -> Self {
        Options {
            expression: args.expression.clone(),
            dtype: args.dtype.clone(),
            reduce: args.reduce.clone(),
            source: args.filepath.clone(),
            delimiter: args.delim.clone(),
            output: args.output.clone(),
            debug: args.debug,
            output_json: args.output_json,
        }
    }
}
