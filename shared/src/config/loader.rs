use crate::error::FritzpollError;
use serde::Deserialize;

/// Router host used when none is configured.
pub const DEFAULT_HOST: &str = "fritz.box";

/// UPnP control port used when none is configured.
pub const DEFAULT_PORT: u16 = 49000;

/// Root configuration for the fritzpoll daemon.
///
/// Loaded from TOML files via the `config` crate with environment-variable
/// overrides (prefix: `FRITZPOLL_`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FritzpollConfig {
    /// Router connection settings.
    #[serde(default)]
    pub fritzbox: FritzboxConfig,
    /// Scheduling settings.
    #[serde(default)]
    pub agent: AgentConfig,
    /// Observability settings.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// Router connection configuration.
///
/// An empty host or a zero port means "unset". Defaults are substituted at
/// poll time by [`FritzboxConfig::resolved_host`] and
/// [`FritzboxConfig::resolved_port`], not while loading.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FritzboxConfig {
    /// Router hostname or address.
    #[serde(default)]
    pub host: String,
    /// UPnP control port.
    #[serde(default)]
    pub port: u16,
}

impl FritzboxConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// The configured host, or [`DEFAULT_HOST`] when unset.
    pub fn resolved_host(&self) -> &str {
        if self.host.is_empty() {
            DEFAULT_HOST
        } else {
            &self.host
        }
    }

    /// The configured port, or [`DEFAULT_PORT`] when unset.
    pub fn resolved_port(&self) -> u16 {
        if self.port == 0 {
            DEFAULT_PORT
        } else {
            self.port
        }
    }
}

/// Scheduling configuration for the daemon loop.
#[derive(Debug, Clone, Deserialize)]
pub struct AgentConfig {
    /// Seconds between poll cycles.
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    /// Run a single cycle and exit.
    #[serde(default)]
    pub run_once: bool,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            run_once: false,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level filter (e.g. `info`, `debug`, `trace`), used when
    /// `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl FritzpollConfig {
    /// Reject values no poll loop can run with.
    pub fn validate(&self) -> crate::Result<()> {
        if self.agent.interval_secs == 0 {
            return Err(FritzpollError::ConfigInvalid {
                key: "agent.interval_secs".to_string(),
                reason: "must be at least 1 second".to_string(),
            });
        }
        Ok(())
    }
}

// ── Default value functions ─────────────────────────────────────────

fn default_interval_secs() -> u64 {
    10
}
fn default_log_level() -> String {
    "info".to_string()
}
