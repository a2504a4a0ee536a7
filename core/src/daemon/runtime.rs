use tracing::info;

/// Daemon runtime configuration.
///
/// Poll cycles block on network calls, so they run on the blocking pool;
/// the worker threads only drive timers, signals and the UPnP client.
pub struct RuntimeConfig {
  /// Number of Tokio worker threads.
  pub worker_threads: usize,
  /// Upper bound for the blocking pool.
  pub max_blocking_threads: usize,
  /// Thread name prefix.
  pub thread_name: String,
}

impl Default for RuntimeConfig {
  fn default() -> Self {
    Self {
      worker_threads: num_cpus().min(2),
      max_blocking_threads: 4,
      thread_name: "fritzpoll-worker".to_string(),
    }
  }
}

impl RuntimeConfig {
  /// Build a Tokio runtime from this config.
  pub fn build_runtime(&self) -> anyhow::Result<tokio::runtime::Runtime> {
    let rt = tokio::runtime::Builder::new_multi_thread()
      .worker_threads(self.worker_threads)
      .max_blocking_threads(self.max_blocking_threads)
      .thread_name(&self.thread_name)
      .enable_all()
      .build()?;

    info!(
      workers = self.worker_threads,
      blocking = self.max_blocking_threads,
      "tokio runtime configured"
    );

    Ok(rt)
  }
}

fn num_cpus() -> usize {
  std::thread::available_parallelism()
    .map(|n| n.get())
    .unwrap_or(1)
}
