use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::errors::PartError;

fn level(cli: &Cli) -> &'static str {
    match (cli.debug, cli.quiet) {
        (true, _) => "debug",
        (false, true) => "error",
        (false, false) => "info",
    }
}

/// Sets up the global tracing subscriber.
/// `RUST_LOG` takes precedence over `--debug` and `--quiet`.
pub fn init(cli: &Cli) -> Result<(), PartError> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level(cli)));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    match cli.logfile {
        Some(ref logfile) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(logfile)
                .map_err(|err| PartError::NoSuchFile(err, logfile.clone()))?;

            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None => builder.with_writer(std::io::stderr).init(),
    }

    Ok(())
}

#[test]
fn test_level() {
    use clap::Parser;

    let tests = vec![
        (vec!["partman-rs", "validate"], "info"),
        (vec!["partman-rs", "--debug", "validate"], "debug"),
        (vec!["partman-rs", "--quiet", "validate"], "error"),
    ];

    for (args, expected) in tests {
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(level(&cli), expected);
    }
}
