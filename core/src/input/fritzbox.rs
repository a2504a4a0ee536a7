use super::Input;
use crate::catalog::DEFAULT_CATALOG;
use crate::directory::DirectoryLoader;
use crate::gather::{GatherReport, PollCycle};
use crate::metrics::MetricsRegistry;
use crate::sink::Accumulator;
use shared::config::FritzboxConfig;
use std::sync::Arc;
use tracing::info;

pub const SAMPLE_CONFIG: &str = r#"
  ## Host and port of the FRITZ!Box UPnP service.
  ## An empty host or a zero port falls back to the default shown.
  [fritzbox]
  host = "fritz.box"
  port = 49000
"#;

/// Traffic and connection counters of a FRITZ!Box, read over UPnP.
pub struct Fritzbox<L> {
  config: FritzboxConfig,
  loader: L,
  metrics: Option<Arc<MetricsRegistry>>,
}

impl<L: DirectoryLoader> Fritzbox<L> {
  pub fn new(config: FritzboxConfig, loader: L) -> Self {
    Self {
      config,
      loader,
      metrics: None,
    }
  }

  pub fn with_metrics(mut self, metrics: Arc<MetricsRegistry>) -> Self {
    self.metrics = Some(metrics);
    self
  }

  pub fn config(&self) -> &FritzboxConfig {
    &self.config
  }

  /// Run one poll cycle and return its report.
  pub fn gather_report(&self, acc: &mut dyn Accumulator) -> shared::Result<GatherReport> {
    let mut cycle = PollCycle::new(&self.loader, DEFAULT_CATALOG);
    if let Some(metrics) = self.metrics.as_deref() {
      cycle = cycle.with_metrics(metrics);
    }
    cycle.run(&self.config, acc)
  }
}

impl<L: DirectoryLoader> Input for Fritzbox<L> {
  fn name(&self) -> &'static str {
    "fritzbox"
  }

  fn description(&self) -> &'static str {
    "Read WAN traffic and connection status from a FRITZ!Box via UPnP"
  }

  fn sample_config(&self) -> &'static str {
    SAMPLE_CONFIG
  }

  fn gather(&self, acc: &mut dyn Accumulator) -> shared::Result<()> {
    let report = self.gather_report(acc)?;
    if !report.is_complete() {
      info!(
        collected = report.fields_collected,
        skipped = report.entries_skipped(),
        "fritzbox: partial measurement reported"
      );
    }
    Ok(())
  }
}
