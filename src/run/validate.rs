use crate::cli;
use crate::errors::PartError;
use crate::manifest::{
    validation,
    Manifest,
};

pub(super) fn run(manifest_file: &str, args: cli::ArgsValidate) -> Result<(), PartError> {
    let start = std::time::Instant::now();

    let manifest = Manifest::from_file(manifest_file)?;
    validation::validate(&manifest, args.check_devices)?;

    println!("validation done in {:?}", start.elapsed());

    Ok(())
}
