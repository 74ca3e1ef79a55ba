//! Live shell runner using `tokio::process::Command`

use super::{ShellError, ShellOutput, ShellRunner};
use async_trait::async_trait;
use tokio::process::Command;

/// Runs command lines through the host shell
///
/// Unix: `<program> -c <line>` (program defaults to `sh`).
/// Windows: `cmd /C <line>`.
///
/// The child is not tied to the caller: dropping the `run` future leaves the
/// command running to exit.
pub struct SystemShell {
    program: String,
}

impl SystemShell {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Binary actually launched on this host
    fn program(&self) -> &str {
        if cfg!(windows) {
            "cmd"
        } else {
            &self.program
        }
    }

    fn command(&self, line: &str) -> Command {
        let mut cmd = Command::new(self.program());
        if cfg!(windows) {
            cmd.args(["/C", line]);
        } else {
            cmd.arg("-c").arg(line);
        }
        cmd
    }
}

#[async_trait]
impl ShellRunner for SystemShell {
    async fn run(&self, line: &str) -> Result<ShellOutput, ShellError> {
        let output = self
            .command(line)
            .output()
            .await
            .map_err(|source| ShellError::Launch {
                program: self.program().to_string(),
                source,
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !output.status.success() {
            return Err(ShellError::NonZeroExit {
                status: output.status,
                stderr: stderr.trim().to_string(),
            });
        }

        Ok(ShellOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr,
        })
    }

    fn name(&self) -> &'static str {
        "system"
    }
}
