//! Runners that restrict or refuse shell execution

use super::{ShellError, ShellOutput, ShellRunner};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::warn;

/// Refuses every command without spawning anything
pub struct DisabledShell;

#[async_trait]
impl ShellRunner for DisabledShell {
    async fn run(&self, line: &str) -> Result<ShellOutput, ShellError> {
        warn!(cmd = line, "refused shell command: execution disabled");
        Err(ShellError::Disabled)
    }

    fn name(&self) -> &'static str {
        "disabled"
    }
}

/// Characters that let a shell chain, substitute or redirect commands
const SHELL_METACHARACTERS: &[char] = &[';', '&', '|', '`', '$', '(', ')', '<', '>', '\n', '\r'];

/// Forwards a command only when its first word is allow-listed and the line
/// is a single plain command
pub struct AllowListShell {
    inner: Arc<dyn ShellRunner>,
    allowed: HashSet<String>,
}

impl AllowListShell {
    pub fn new(inner: Arc<dyn ShellRunner>, allowed: impl IntoIterator<Item = String>) -> Self {
        Self {
            inner,
            allowed: allowed.into_iter().collect(),
        }
    }

    fn permits(&self, line: &str) -> bool {
        if line.contains(SHELL_METACHARACTERS) {
            return false;
        }
        line.split_whitespace()
            .next()
            .is_some_and(|program| self.allowed.contains(program))
    }
}

#[async_trait]
impl ShellRunner for AllowListShell {
    async fn run(&self, line: &str) -> Result<ShellOutput, ShellError> {
        if !self.permits(line) {
            warn!(cmd = line, "refused shell command: not allow-listed");
            return Err(ShellError::NotAllowed(line.to_string()));
        }
        self.inner.run(line).await
    }

    fn name(&self) -> &'static str {
        "allow-list"
    }
}
