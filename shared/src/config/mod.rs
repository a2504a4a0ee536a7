pub mod loader;

pub use loader::{AgentConfig, FritzboxConfig, FritzpollConfig, ObservabilityConfig};
pub use loader::{DEFAULT_HOST, DEFAULT_PORT};

use crate::error::FritzpollError;
use std::path::Path;

/// Load configuration from TOML files with environment-variable overrides.
///
/// Resolution order:
/// 1. `config/default.toml`: base configuration
/// 2. `config/{env}.toml`: environment overlay (development, production)
/// 3. Environment variables with prefix `FRITZPOLL_` (double underscore for nesting)
///
/// Every key has a default, so both files are optional.
///
/// # Example
///
/// `FRITZPOLL_FRITZBOX__HOST=192.168.178.1` overrides `fritzbox.host`.
pub fn load_config(config_dir: &Path, env: &str) -> crate::Result<FritzpollConfig> {
    load_config_with_env(config_dir, env, None)
}

/// Like [`load_config`], but reads `FRITZPOLL_*` overrides from `vars`
/// instead of the process environment when `vars` is `Some`.
pub fn load_config_with_env(
    config_dir: &Path,
    env: &str,
    vars: Option<config::Map<String, String>>,
) -> crate::Result<FritzpollConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::from(config_dir.join("default.toml")).required(false))
        .add_source(config::File::from(config_dir.join(format!("{}.toml", env))).required(false))
        .add_source(
            config::Environment::with_prefix("FRITZPOLL")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(vars),
        )
        .build()
        .map_err(|e| FritzpollError::ConfigLoadFailed(Box::new(e)))?;

    let cfg: FritzpollConfig = settings
        .try_deserialize()
        .map_err(|e| FritzpollError::ConfigLoadFailed(Box::new(e)))?;
    cfg.validate()?;
    Ok(cfg)
}
