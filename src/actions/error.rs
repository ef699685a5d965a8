// ABOUTME: Error types for action handlers
// Every failure ends up as one [Error] line in the status log; nothing here is fatal

use crate::host::HostError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ActionError {
    #[error("{0} not installed")]
    ToolMissing(String),

    #[error("`{command}` {}", exit_label(.code))]
    CommandFailed { command: String, code: Option<i32> },

    #[error("proxychains config not found. Is proxychains4 installed?")]
    ConfigNotFound,

    #[error("{} not found", .0.display())]
    MissingFile(PathBuf),

    #[error("Unexpected output: {0}")]
    Parse(String),

    #[error("{0}")]
    Cancelled(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Host(#[from] HostError),
}

#[allow(clippy::ref_option)]
fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exited with status {}", code),
        None => "was terminated by a signal".to_string(),
    }
}
