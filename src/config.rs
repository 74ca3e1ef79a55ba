//! Gateway configuration
//!
//! Loaded from an optional YAML file and `GKB__`-prefixed environment
//! variables, e.g. `GKB__PORT=9090` or `GKB__SHELL__ENABLED=false`.

use serde::Deserialize;
use std::path::PathBuf;

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "gkb.yaml";
/// Environment variable for configuration file path.
pub const CONFIG_ENV_VAR: &str = "GKB_CONFIG";
/// Prefix for configuration environment variables.
pub const CONFIG_ENV_PREFIX: &str = "GKB";
/// Default listen port.
pub const DEFAULT_PORT: u16 = 8080;

/// Top-level gateway configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listen address. When unset, the preferred outbound IP is used.
    pub host: Option<String>,
    /// Listen port
    pub port: u16,
    /// Directory holding `index.html` and `assets/` for the web client
    pub static_dir: Option<PathBuf>,
    /// Shell strategy settings
    pub shell: ShellConfig,
    /// Volume strategy settings
    pub audio: AudioConfig,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: None,
            port: DEFAULT_PORT,
            static_dir: None,
            shell: ShellConfig::default(),
            audio: AudioConfig::default(),
        }
    }
}

/// Shell strategy configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// When false, every shell command is refused without spawning anything
    pub enabled: bool,
    /// Programs allowed as the first word of a command line. Empty allows all.
    pub allow_list: Vec<String>,
    /// Shell binary used on Unix hosts
    pub program: String,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            allow_list: Vec::new(),
            program: "sh".into(),
        }
    }
}

/// Volume strategy configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// ALSA simple mixer control driven on Linux
    pub mixer_control: String,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            mixer_control: "Master".into(),
        }
    }
}

impl GatewayConfig {
    /// Load configuration from file and environment.
    ///
    /// Configuration sources (in order of priority, later overrides earlier):
    /// 1. `gkb.yaml` in current directory (if exists)
    /// 2. File specified by `path` argument (if provided)
    /// 3. File specified by `CONFIG_ENV_VAR` environment variable (if set)
    /// 4. Environment variables with `CONFIG_ENV_PREFIX` prefix
    pub fn load(path: Option<&str>) -> Result<Self, ::config::ConfigError> {
        use ::config::{Config, File, FileFormat};

        let mut builder = Config::builder()
            .add_source(File::new(DEFAULT_CONFIG_FILE, FileFormat::Yaml).required(false));

        if let Some(config_path) = path {
            builder = builder.add_source(File::new(config_path, FileFormat::Yaml).required(true));
        }

        if let Ok(config_path) = std::env::var(CONFIG_ENV_VAR) {
            builder = builder.add_source(File::new(&config_path, FileFormat::Yaml).required(true));
        }

        builder.add_source(environment()).build()?.try_deserialize()
    }
}

fn environment() -> ::config::Environment {
    ::config::Environment::with_prefix(CONFIG_ENV_PREFIX)
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("shell.allow_list")
}
