//! Command line front end: reads polygons from a text file, runs one operation over them and
//! reports every result.
mod error;
mod sink;
mod source;

use error::CliError;
use polyclip::{
    boolean::BooleanOptions,
    ops::{deliver, run, Operation, PolygonSource},
};
use sink::ReportSink;
use source::TextFileSource;
use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
    process::ExitCode,
};

#[derive(Debug, Default, PartialEq)]
struct Args {
    input: Option<PathBuf>,
    operation: Option<String>,
    out: Option<PathBuf>,
}

fn parse_args<I>(args: I) -> Result<Args, CliError>
where
    I: IntoIterator<Item = String>,
{
    let mut result = Args::default();
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        if arg == "--out" {
            result.out = Some(args.next().ok_or(CliError::Usage)?.into());
        } else if arg == "-h" || arg == "--help" {
            return Err(CliError::Usage);
        } else if result.input.is_none() {
            result.input = Some(arg.into());
        } else if result.operation.is_none() {
            result.operation = Some(arg);
        } else {
            return Err(CliError::Usage);
        }
    }

    Ok(result)
}

fn prompt(message: &str) -> Result<String, CliError> {
    print!("{}", message);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn run_cli(args: Args) -> Result<(), CliError> {
    let input = match args.input {
        Some(input) => input,
        None => prompt("Enter the input file name: ")?.into(),
    };
    let polygons = TextFileSource::new(input).polygons()?;

    let operation: Operation = match args.operation {
        Some(operation) => operation.parse()?,
        None => prompt("Choose operation (1 for Union, 2 for Intersection, 3 for Difference): ")?
            .parse()?,
    };

    let result = run(operation, &polygons, &BooleanOptions::new())?;
    let out_dir = args.out.unwrap_or_else(|| PathBuf::from("."));
    let mut sink = ReportSink::new(io::stdout().lock(), Some(out_dir));
    deliver(&result, &mut sink)
}

fn main() -> ExitCode {
    env_logger::init();

    let result = parse_args(std::env::args().skip(1)).and_then(run_cli);
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Result<Args, CliError> {
        parse_args(values.iter().map(|s| s.to_string()))
    }

    #[test]
    fn positional_and_out() {
        let parsed = args(&["shapes.txt", "union", "--out", "results"]).unwrap();
        assert_eq!(
            parsed,
            Args {
                input: Some("shapes.txt".into()),
                operation: Some("union".to_string()),
                out: Some("results".into()),
            }
        );

        let parsed = args(&["--out", "results", "shapes.txt"]).unwrap();
        assert_eq!(parsed.input, Some("shapes.txt".into()));
        assert_eq!(parsed.operation, None);
    }

    #[test]
    fn missing_arguments_are_left_for_prompting() {
        assert_eq!(args(&[]).unwrap(), Args::default());
    }

    #[test]
    fn usage_errors() {
        assert!(matches!(args(&["a", "b", "c"]), Err(CliError::Usage)));
        assert!(matches!(args(&["a", "--out"]), Err(CliError::Usage)));
        assert!(matches!(args(&["--help"]), Err(CliError::Usage)));
    }
}
