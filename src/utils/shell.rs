use std::env;
use std::fs;
use std::process::Command;

use crate::errors::PartError;

/// Runs `cmd` with `args` and collects its stdout and stderr.
///
/// Output is returned in full on success. On failure the captured
/// output is kept inside [`PartError::CmdFailed`] so callers can still log it.
pub fn exec_output(cmd: &str, args: &[String]) -> Result<String, PartError> {
    match Command::new(cmd).args(args).output() {
        // Spawned but may still fail
        Ok(result) => {
            let mut output = String::from_utf8_lossy(&result.stdout).into_owned();
            output.push_str(&String::from_utf8_lossy(&result.stderr));

            match result.status.code() {
                Some(0) => Ok(output),
                Some(code) => Err(PartError::CmdFailed {
                    error: None,
                    context: format!("command {cmd} exited with non-zero status {code}"),
                    output,
                }),
                None => Err(PartError::CmdFailed {
                    error: None,
                    context: format!("command {cmd} terminated by signal"),
                    output,
                }),
            }
        }

        // Failed to spawn
        Err(err) => Err(PartError::CmdFailed {
            error: Some(err),
            context: format!("command {cmd} failed to spawn"),
            output: String::new(),
        }),
    }
}

pub fn in_path(program: &str) -> bool {
    if program.contains('/') {
        return fs::metadata(program).is_ok();
    }

    if let Ok(path) = env::var("PATH") {
        for p in path.split(':') {
            let p_str = format!("{}/{}", p, program);
            if fs::metadata(p_str).is_ok() {
                return true;
            }
        }
    }

    false
}

#[ignore]
#[test]
fn test_exec_output() {
    let out = exec_output("echo", &["hello, world!".to_string()])
        .expect("failed to execute `echo \"hello, world!\"` command");
    assert_eq!(out, "hello, world!\n");

    let err = exec_output("sh", &["-c".to_string(), "echo oops; exit 3".to_string()])
        .expect_err("`exit 3` should fail");
    assert_eq!(err.output(), Some("oops\n"));

    let err = exec_output("no-such-program-partman", &[])
        .expect_err("missing program should fail to spawn");
    assert!(matches!(err, PartError::CmdFailed { error: Some(_), .. }));
}

#[test]
fn test_in_path() {
    assert!(!in_path("no-such-program-partman"));
    assert!(!in_path("/no/such/dir/parted"));
}
