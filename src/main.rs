mod audio;
mod command;
mod config;
mod http;
mod shell;

use crate::audio::{AudioControl, SystemMixer};
use crate::command::CommandExecutor;
use crate::config::GatewayConfig;
use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let config_path = std::env::args().nth(1);
    let config = GatewayConfig::load(config_path.as_deref())
        .context("failed to load configuration")?;

    info!("gkb gateway starting");
    info!("  Port: {}", config.port);
    if let Some(dir) = &config.static_dir {
        info!("  Static assets: {}", dir.display());
    }

    let mixer = SystemMixer::new(config.audio.mixer_control.clone());
    let audio: Arc<dyn AudioControl> = Arc::new(mixer);
    info!("  Audio backend: {} ({})", audio.name(), config.audio.mixer_control);

    let shell = crate::shell::from_config(&config.shell);
    info!("  Shell runner: {}", shell.name());

    let executor = CommandExecutor::new(audio, shell);

    http::serve(&config, executor).await
}
