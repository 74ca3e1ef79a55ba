//! Command handlers for the two execution strategies

mod shell;
mod volume;

pub use shell::handle_shell;
pub use volume::handle_volume;

use crate::audio::AudioControl;
use crate::shell::ShellRunner;
use std::sync::Arc;

/// Host capabilities passed to command handlers
#[derive(Clone)]
pub struct HandlerContext {
    pub audio: Arc<dyn AudioControl>,
    pub shell: Arc<dyn ShellRunner>,
}
