use std::error::Error as StdError;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use env_logger::{Builder, Env};
use lambda_eval::cli_args::Args;
use lambda_eval::error::{LambdaError, Result};
use lambda_eval::{input, output, run, Options};
use log::debug;

fn execute(options: &Options, arguments: Vec<String>) -> Result<()> {
    let started = Instant::now();
    let arguments = input::load_arguments(options, arguments)?;
    let result = run(options, arguments)?;
    let elapsed = started.elapsed().as_secs_f64() * 1000.0;
    debug!("Evaluated to {} ({}) in {:.2} ms", result.repr(), result.type_name(), elapsed);
    output::write_result(&result, options, elapsed)
}

fn report(e: &LambdaError, debug: bool) {
    eprintln!("Error: {e}");
    if debug {
        eprintln!("{e:#?}");
        let mut source = e.source();
        while let Some(cause) = source {
            eprintln!("Caused by: {cause}");
            source = cause.source();
        }
    } else {
        eprintln!("{}", e.summary());
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    let level = if args.debug { "debug" } else { "warn" };
    Builder::from_env(Env::default().default_filter_or(level)).init();

    let options = Options::from(&args);
    debug!("Options: {:?}", options);

    match execute(&options, args.arguments) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report(&e, options.debug);
            ExitCode::from(e.exit_code() as u8)
        }
    }
}
