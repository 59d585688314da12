use tracing::{debug, warn};

use crate::errors::PartError;
use crate::utils::shell;

/// Runner executes external commands on behalf of partitioning code.
///
/// Implementations must return captured output even on failure,
/// via [`PartError::CmdFailed`], so that diagnostics are not lost.
pub trait Runner {
    fn run(&self, cmd: &str, args: &[String]) -> Result<String, PartError>;
}

impl<R: Runner + ?Sized> Runner for &R {
    fn run(&self, cmd: &str, args: &[String]) -> Result<String, PartError> {
        (**self).run(cmd, args)
    }
}

/// Renders `cmd args..` as a shell-quoted command line
pub fn cmdline(cmd: &str, args: &[String]) -> String {
    let words = std::iter::once(cmd).chain(args.iter().map(String::as_str));

    shlex::try_join(words.clone()).unwrap_or_else(|_| words.collect::<Vec<_>>().join(" "))
}

/// Spawns real processes
#[derive(Debug, Default, Clone, Copy)]
pub struct ShellRunner;

impl Runner for ShellRunner {
    fn run(&self, cmd: &str, args: &[String]) -> Result<String, PartError> {
        debug!(command = %cmdline(cmd, args), "executing");

        shell::exec_output(cmd, args).map_err(|err| {
            warn!(command = %cmdline(cmd, args), "{err}");
            err
        })
    }
}

/// Prints commands instead of executing them.
/// Every call succeeds with empty output.
#[derive(Debug, Default, Clone, Copy)]
pub struct DryRunner;

impl Runner for DryRunner {
    fn run(&self, cmd: &str, args: &[String]) -> Result<String, PartError> {
        println!("{}", cmdline(cmd, args));

        Ok(String::new())
    }
}


#[test]
fn test_cmdline() {
    let args: Vec<String> = ["--script", "/dev/sda", "mkpart", "my root", "ext4"]
        .into_iter()
        .map(String::from)
        .collect();

    let line = cmdline("parted", &args);
    assert!(line.starts_with("parted --script /dev/sda mkpart "));

    // Quoted names must survive a round trip through a shell
    let words = shlex::split(&line).expect("cmdline should be valid shell words");
    assert_eq!(words[0], "parted");
    assert_eq!(&words[1..], args.as_slice());
}

#[test]
fn test_dry_runner() {
    let out = DryRunner
        .run("parted", &["print".to_string()])
        .expect("dry runner never fails");

    assert!(out.is_empty());
}
