use clap::{
    Args,
    Parser,
    Subcommand,
};

use crate::constants::defaults;
use crate::errors::PartError;

#[derive(Debug, Parser)]
#[clap(version, about = "Declarative disk partitioning with GNU parted")]
pub struct Cli {
    #[command(subcommand)]
    pub commands: Commands,

    /// Manifest file (YAML, or TOML if the name ends with .toml)
    #[arg(
        global = true,
        short = 'f',
        long = "file",
        value_parser = validate_filename,
        default_value_t = String::from(defaults::MANIFEST)
    )]
    pub manifest: String,

    /// Dry-run, partman-rs will not commit any changes to disks,
    /// and will just print parted commands to be executed
    #[arg(global = true, short = 'n', default_value_t = false)]
    pub dry_run: bool,

    /// Enable debug output
    #[arg(global = true, long = "debug", default_value_t = false)]
    pub debug: bool,

    /// Only log errors
    #[arg(global = true, long = "quiet", conflicts_with = "debug")]
    pub quiet: bool,

    /// Write logs to this file instead of stderr
    #[arg(global = true, long = "logfile")]
    pub logfile: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Apply manifest partitioning to disks
    Apply(ArgsApply),

    /// Validate manifest
    Validate(ArgsValidate),

    /// Print partition table of a device
    Print(ArgsPrint),
}

#[derive(Debug, Args)]
pub struct ArgsApply {
    /// Do not validate manifest entries
    #[arg(long = "no-validate")]
    pub no_validate: bool,
}

#[derive(Debug, Args)]
pub struct ArgsValidate {
    /// Also check that disk devices exist on this system
    #[arg(long = "check-devices")]
    pub check_devices: bool,
}

#[derive(Debug, Args)]
pub struct ArgsPrint {
    /// Block device, e.g. /dev/sda
    #[arg(value_parser = validate_device)]
    pub device: String,

    /// Print JSON instead of a table
    #[arg(long = "json")]
    pub json: bool,
}

fn validate_filename(name: &str) -> Result<String, PartError> {
    if name.is_empty() {
        return Err(PartError::BadArgs(String::from("empty filename")));
    }

    Ok(name.to_string())
}

fn validate_device(device: &str) -> Result<String, PartError> {
    if !device.starts_with('/') {
        return Err(PartError::BadArgs(format!(
            "device must be an absolute path: {device}"
        )));
    }

    Ok(device.to_string())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn test_parse_cli() {
        let cli = Cli::try_parse_from(["partman-rs", "-n", "-f", "disks.toml", "apply"]).unwrap();
        assert!(cli.dry_run);
        assert_eq!(cli.manifest, "disks.toml");
        assert!(matches!(cli.commands, Commands::Apply(ArgsApply { no_validate: false })));

        let cli = Cli::try_parse_from(["partman-rs", "print", "/dev/sda", "--json"]).unwrap();
        assert_eq!(cli.manifest, defaults::MANIFEST);
        match cli.commands {
            Commands::Print(args) => {
                assert_eq!(args.device, "/dev/sda");
                assert!(args.json);
            }
            cmd => panic!("unexpected command {cmd:?}"),
        }

        assert!(Cli::try_parse_from(["partman-rs", "print", "sda"]).is_err());
        assert!(Cli::try_parse_from(["partman-rs", "-f", "", "validate"]).is_err());
        assert!(Cli::try_parse_from(["partman-rs", "--debug", "--quiet", "validate"]).is_err());
    }
}
