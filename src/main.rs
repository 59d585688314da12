mod cli;
mod constants;
mod entity;
mod errors;
mod linux;
mod logging;
mod manifest;
mod parted;
mod run;
mod runner;
mod utils;

use clap::Parser;
use colored::Colorize;

fn main() {
    let cli_args = cli::Cli::parse();

    if let Err(err) = logging::init(&cli_args) {
        eprintln!("{}", format!("failed to initialize logging: {err}").red());
        std::process::exit(2);
    }

    if let Err(err) = run::run(cli_args) {
        eprintln!("{}", format!("error: {err}").red());

        if let Some(output) = err.output() {
            eprintln!("{output}");
        }

        std::process::exit(1);
    }
}
