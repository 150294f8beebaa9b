//! Error taxonomy for the wiki update run.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WikiError {
    #[error("Must provide REZ_SOURCE_DIR which points at root of rez source clone")]
    MissingSourceDir,

    #[error("missing delimiter {marker} in {path}")]
    MissingDelimiter {
        marker: &'static str,
        path: String,
    },

    #[error("invalid repository '{0}': expected owner/name")]
    InvalidRepo(String),

    #[error("\"{tool}\" needed but not found in PATH")]
    ToolNotFound { tool: String },

    #[error("failed to run {command}: {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },

    #[error("{command} exited with status {code}")]
    CommandFailed { command: String, code: i32 },

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl WikiError {
    /// Process exit code for this error. Failed child processes propagate
    /// their own status.
    pub fn exit_code(&self) -> i32 {
        match self {
            WikiError::CommandFailed { code, .. } if *code != 0 => *code,
            _ => 1,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        WikiError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, WikiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_failure_propagates_status() {
        let err = WikiError::CommandFailed {
            command: "git clone".to_string(),
            code: 128,
        };
        assert_eq!(err.exit_code(), 128);
    }

    #[test]
    fn configuration_errors_exit_one() {
        assert_eq!(WikiError::MissingSourceDir.exit_code(), 1);
        assert_eq!(WikiError::InvalidRepo("x".into()).exit_code(), 1);
    }

    #[test]
    fn tool_not_found_message() {
        let err = WikiError::ToolNotFound {
            tool: "git".to_string(),
        };
        assert_eq!(err.to_string(), "\"git\" needed but not found in PATH");
    }
}
