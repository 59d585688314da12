use thiserror::Error;

use crate::entity::action::Action;

#[derive(Debug, Error)]
pub enum PartError {
    #[error("no such file: {1}")]
    NoSuchFile(std::io::Error, String),

    #[error("no such device: {0}")]
    NoSuchDevice(String),

    #[error("bad manifest: {0}")]
    BadManifest(String),

    #[error("bad cli arguments: {0}")]
    BadArgs(String),

    #[error("shell command failed: {context}")]
    CmdFailed {
        error: Option<std::io::Error>,
        context: String,
        output: String,
    },

    #[error("failed parsing parted header data: {0}")]
    HeaderParse(String),

    #[error("failed parsing parted output: {0}")]
    Parse(String),

    #[error("apply error: {error}")]
    ApplyError {
        error: Box<PartError>,
        action_failed: Box<Action>,
        actions_performed: Vec<Action>,
    },
}

impl PartError {
    /// Returns tool output captured before the failure, if any
    pub fn output(&self) -> Option<&str> {
        match self {
            PartError::CmdFailed { output, .. } if !output.is_empty() => Some(output),
            PartError::ApplyError { error, .. } => error.output(),
            _ => None,
        }
    }
}

#[test]
fn test_error_output() {
    let err = PartError::CmdFailed {
        error: None,
        context: "command parted exited with non-zero status 1".to_string(),
        output: "Error: Partition(s) 1 on /dev/sda have been written".to_string(),
    };
    assert_eq!(
        err.output(),
        Some("Error: Partition(s) 1 on /dev/sda have been written")
    );

    let wrapped = PartError::ApplyError {
        error: Box::new(err),
        action_failed: Box::new(Action::WriteChanges {
            device: "/dev/sda".to_string(),
        }),
        actions_performed: vec![],
    };
    assert!(wrapped.output().is_some());

    let no_output = PartError::CmdFailed {
        error: None,
        context: "command parted terminated by signal".to_string(),
        output: String::new(),
    };
    assert_eq!(no_output.output(), None);
    assert_eq!(PartError::Parse("bad".into()).output(), None);
}
