pub mod apply;
pub mod print;
pub mod validate;

use std::env;

use crate::cli;
use crate::constants::{
    self,
    defaults,
};
use crate::errors::PartError;

pub fn run(cli_args: cli::Cli) -> Result<(), PartError> {
    let tool = parted_tool();

    match cli_args.commands {
        cli::Commands::Validate(args_validate) => {
            validate::run(&cli_args.manifest, args_validate)
        }
        cli::Commands::Apply(args_apply) => {
            let report = apply::run(&cli_args.manifest, &tool, cli_args.dry_run, args_apply)?;
            println!("{}", report.to_json_string());

            Ok(())
        }
        cli::Commands::Print(args_print) => print::run(&tool, args_print),
    }
}

fn parted_tool() -> String {
    env::var(constants::ENV_PARTMAN_PARTED).unwrap_or(defaults::PARTED.to_string())
}
