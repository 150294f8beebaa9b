//! Version control collaborator.
//!
//! Every call shells out once; there are no retries.

use crate::error::{Result, WikiError};
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Output};

/// Operations the wiki update needs from version control.
pub trait VersionControl {
    /// Confirm the tool is installed, returning its version string.
    fn version(&self) -> Result<String>;

    /// Clone `url` into `dest` without checking out a working tree.
    fn clone_no_checkout(&self, url: &str, dest: &Path) -> Result<()>;

    /// Commit counts per author for `HEAD` of the repository at `repo`.
    fn shortlog(&self, repo: &Path) -> Result<String>;
}

fn spawn_error(tool: &str, command: &str, e: io::Error) -> WikiError {
    match e.kind() {
        ErrorKind::NotFound => WikiError::ToolNotFound {
            tool: tool.to_string(),
        },
        _ => WikiError::Spawn {
            command: command.to_string(),
            source: e,
        },
    }
}

fn check_status(status: ExitStatus, command: String) -> Result<()> {
    if status.success() {
        return Ok(());
    }
    Err(WikiError::CommandFailed {
        command,
        code: status.code().unwrap_or(1),
    })
}

/// Run a prepared command and capture its output, mapping a missing
/// executable to [`WikiError::ToolNotFound`] and a non-zero exit to
/// [`WikiError::CommandFailed`].
pub(crate) fn run(mut cmd: Command, command: String) -> Result<Output> {
    let tool = cmd.get_program().to_string_lossy().into_owned();
    tracing::debug!("running {}", command);

    let output = cmd
        .output()
        .map_err(|e| spawn_error(&tool, &command, e))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.trim().is_empty() {
            tracing::error!("{}", stderr.trim_end());
        }
    }
    check_status(output.status, command)?;
    Ok(output)
}

/// Like [`run`], but the child writes straight to this process's stdout and
/// stderr so long-running progress shows up in the log.
pub(crate) fn run_streaming(mut cmd: Command, command: String) -> Result<()> {
    let tool = cmd.get_program().to_string_lossy().into_owned();
    tracing::debug!("running {}", command);

    let status = cmd
        .status()
        .map_err(|e| spawn_error(&tool, &command, e))?;
    check_status(status, command)
}

/// The `git` command-line client.
#[derive(Debug, Clone)]
pub struct GitCli {
    program: PathBuf,
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new("git")
    }
}

impl GitCli {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn command(&self, args: &[&str]) -> (Command, String) {
        let mut cmd = Command::new(&self.program);
        cmd.args(args);
        let shown = format!("{} {}", self.program.display(), args.join(" "));
        (cmd, shown)
    }
}

impl VersionControl for GitCli {
    fn version(&self) -> Result<String> {
        let (cmd, shown) = self.command(&["--version"]);
        let output = run(cmd, shown)?;
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    fn clone_no_checkout(&self, url: &str, dest: &Path) -> Result<()> {
        let dest_str = dest.to_string_lossy().into_owned();
        let (cmd, shown) = self.command(&["clone", "--no-checkout", url, dest_str.as_str()]);
        run_streaming(cmd, shown)
    }

    fn shortlog(&self, repo: &Path) -> Result<String> {
        let (mut cmd, shown) = self.command(&["shortlog", "-sn", "HEAD"]);
        cmd.current_dir(repo);
        let output = run(cmd, shown)?;
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_program_is_tool_not_found() {
        let git = GitCli::new("definitely-not-a-real-git-binary");
        match git.version() {
            Err(WikiError::ToolNotFound { tool }) => {
                assert_eq!(tool, "definitely-not-a-real-git-binary")
            }
            other => panic!("expected ToolNotFound, got {:?}", other),
        }
    }

    #[test]
    fn missing_program_on_clone_is_tool_not_found() {
        let git = GitCli::new("definitely-not-a-real-git-binary");
        let err = git
            .clone_no_checkout("git@example.com:wiki.git", Path::new("/tmp/none"))
            .unwrap_err();
        assert!(matches!(err, WikiError::ToolNotFound { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn non_zero_exit_is_command_failed() {
        let mut cmd = Command::new("sh");
        cmd.args(["-c", "exit 3"]);
        match run(cmd, "sh -c 'exit 3'".to_string()) {
            Err(WikiError::CommandFailed { code, command }) => {
                assert_eq!(code, 3);
                assert_eq!(command, "sh -c 'exit 3'");
            }
            other => panic!("expected CommandFailed, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn streaming_run_propagates_status() {
        let mut cmd = Command::new("sh");
        cmd.args(["-c", "echo progress >&2; exit 5"]);
        match run_streaming(cmd, "sh".to_string()) {
            Err(WikiError::CommandFailed { code, .. }) => assert_eq!(code, 5),
            other => panic!("expected CommandFailed, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn streaming_run_succeeds() {
        let mut cmd = Command::new("sh");
        cmd.args(["-c", "exit 0"]);
        assert!(run_streaming(cmd, "sh".to_string()).is_ok());
    }
}
