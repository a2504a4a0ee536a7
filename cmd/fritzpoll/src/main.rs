use clap::Parser;
use fritzpoll_core::catalog::{distinct_calls, DEFAULT_CATALOG};
use fritzpoll_core::daemon::{Lifecycle, LifecycleState, RuntimeConfig};
use fritzpoll_core::input::{Fritzbox, Input, SAMPLE_CONFIG};
use fritzpoll_core::metrics::MetricsRegistry;
use fritzpoll_core::sink::LineProtocolWriter;
use fritzpoll_upnp::UpnpLoader;
use shared::config::{self, FritzpollConfig};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fritzpoll")]
#[command(version)]
#[command(about = "Poll FRITZ!Box UPnP counters and print them as line protocol")]
struct Cli {
  /// Directory holding default.toml and the environment overlays
  #[arg(long, env = "FRITZPOLL_CONFIG_DIR", default_value = "config")]
  config_dir: PathBuf,

  /// Environment overlay to load (config/{env}.toml)
  #[arg(long, env = "FRITZPOLL_ENV", default_value = "development")]
  env: String,

  /// Run a single poll cycle and exit
  #[arg(long)]
  once: bool,

  /// Print an example configuration and exit
  #[arg(long)]
  sample_config: bool,
}

fn main() -> anyhow::Result<()> {
  let cli = Cli::parse();
  if cli.sample_config {
    print!("{SAMPLE_CONFIG}");
    return Ok(());
  }

  let cfg = config::load_config(&cli.config_dir, &cli.env)?;
  init_logging(&cfg.observability.log_level);
  info!(env = %cli.env, dir = %cli.config_dir.display(), "configuration loaded");

  let rt = RuntimeConfig::default().build_runtime()?;
  let run_once = cli.once || cfg.agent.run_once;
  rt.block_on(async move { run_daemon(cfg, run_once).await })
}

async fn run_daemon(cfg: FritzpollConfig, run_once: bool) -> anyhow::Result<()> {
  let mut lifecycle = Lifecycle::new();

  let metrics = Arc::new(MetricsRegistry::new()?);
  let loader = UpnpLoader::new(Handle::current());
  let input = Arc::new(Fritzbox::new(cfg.fritzbox.clone(), loader).with_metrics(Arc::clone(&metrics)));
  info!(
    input = input.name(),
    host = input.config().resolved_host(),
    port = input.config().resolved_port(),
    interval_secs = cfg.agent.interval_secs,
    calls_per_cycle = distinct_calls(DEFAULT_CATALOG),
    "polling FRITZ!Box"
  );

  lifecycle.transition(LifecycleState::Running);

  if run_once {
    let result = gather_once(Arc::clone(&input)).await;
    lifecycle.transition(LifecycleState::Stopped);
    return result;
  }

  let mut ticker = tokio::time::interval(Duration::from_secs(cfg.agent.interval_secs));
  ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
  let shutdown = Lifecycle::wait_for_shutdown();
  tokio::pin!(shutdown);

  loop {
    tokio::select! {
        signal = &mut shutdown => {
          match signal {
            Ok(signal) => info!(?signal, "shutdown requested"),
            Err(e) => warn!(error = %e, "signal handler failed, shutting down"),
          }
          break;
        }
        _ = ticker.tick() => {
          // A failed cycle is reported and the next tick tries again.
          if let Err(e) = gather_once(Arc::clone(&input)).await {
            error!(error = %format!("{e:#}"), "poll cycle failed");
          }
        }
    }
  }

  lifecycle.transition(LifecycleState::ShuttingDown);
  debug!(metrics = %metrics.encode(), "self-metrics at shutdown");
  lifecycle.transition(LifecycleState::Stopped);
  info!("fritzpoll stopped");

  Ok(())
}

/// Run one blocking gather on the blocking pool, writing to stdout.
async fn gather_once<I: Input + 'static>(input: Arc<I>) -> anyhow::Result<()> {
  tokio::task::spawn_blocking(move || {
    let mut writer = LineProtocolWriter::new(std::io::stdout().lock());
    input.gather(&mut writer)
  })
  .await??;
  Ok(())
}

fn init_logging(default_level: &str) {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_target(true)
    .with_writer(std::io::stderr)
    .init();
}
