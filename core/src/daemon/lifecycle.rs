use tokio::signal;
use tracing::{info, warn};

/// Tracks the daemon through startup, polling and shutdown.
pub struct Lifecycle {
  state: LifecycleState,
}

/// Current lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LifecycleState {
  /// Loading config and building the runtime.
  Initializing,
  /// Poll loop running.
  Running,
  /// Waiting for the in-flight cycle to finish.
  ShuttingDown,
  /// Stopped.
  Stopped,
}

/// Why the poll loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownSignal {
  Interrupt,
  Terminate,
}

impl Lifecycle {
  pub fn new() -> Self {
    Self {
      state: LifecycleState::Initializing,
    }
  }

  /// Move to `new_state`. States only move forward; a backward request is
  /// logged and ignored.
  pub fn transition(&mut self, new_state: LifecycleState) -> bool {
    if new_state < self.state {
      warn!(from = ?self.state, to = ?new_state, "ignoring backward lifecycle transition");
      return false;
    }
    info!(
        from = ?self.state,
        to = ?new_state,
        "lifecycle state transition"
    );
    self.state = new_state;
    true
  }

  /// Current state.
  pub fn state(&self) -> LifecycleState {
    self.state
  }

  pub fn is_running(&self) -> bool {
    self.state == LifecycleState::Running
  }

  /// Wait for a shutdown signal (SIGINT or SIGTERM).
  pub async fn wait_for_shutdown() -> std::io::Result<ShutdownSignal> {
    #[cfg(unix)]
    {
      let mut terminate = signal::unix::signal(signal::unix::SignalKind::terminate())?;
      tokio::select! {
          res = signal::ctrl_c() => res.map(|_| ShutdownSignal::Interrupt),
          _ = terminate.recv() => Ok(ShutdownSignal::Terminate),
      }
    }

    #[cfg(not(unix))]
    {
      signal::ctrl_c().await.map(|_| ShutdownSignal::Interrupt)
    }
  }
}

impl Default for Lifecycle {
  fn default() -> Self {
    Self::new()
  }
}
