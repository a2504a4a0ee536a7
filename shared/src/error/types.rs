use crate::metrics::labels;
use thiserror::Error;

/// Top-level error type for fritzpoll.
///
/// Only `DirectoryLoad` is fatal to a poll cycle. The per-entry variants are
/// built so the cycle can log a uniform message before skipping the entry.
#[derive(Debug, Error)]
pub enum FritzpollError {
    // ── Directory ──────────────────────────────────────────────
    #[error("fritzbox: unable to load services from {host}:{port}")]
    DirectoryLoad {
        host: String,
        port: u16,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    // ── Per-entry ──────────────────────────────────────────────
    #[error("upnp: cannot find service '{0}'")]
    ServiceNotFound(String),

    #[error("upnp: cannot find action '{action}' on service '{service}'")]
    ActionNotFound { service: String, action: String },

    #[error("upnp: unable to call action '{action}' on service '{service}'")]
    ActionFailed {
        service: String,
        action: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    // ── Config ─────────────────────────────────────────────────
    #[error("config: failed to load configuration")]
    ConfigLoadFailed(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("config: invalid value for '{key}': {reason}")]
    ConfigInvalid { key: String, reason: String },

    // ── Generic ────────────────────────────────────────────────
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl FritzpollError {
    /// Short label used when counting skipped catalog entries.
    pub fn skip_reason(&self) -> &'static str {
        match self {
            FritzpollError::ServiceNotFound(_) => labels::REASON_SERVICE_NOT_FOUND,
            FritzpollError::ActionNotFound { .. } => labels::REASON_ACTION_NOT_FOUND,
            FritzpollError::ActionFailed { .. } => labels::REASON_ACTION_FAILED,
            _ => labels::REASON_OTHER,
        }
    }
}
