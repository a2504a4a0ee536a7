use crate::gather::GatherReport;
use prometheus::{Histogram, HistogramOpts, IntCounter, IntCounterVec, IntGauge, Opts, Registry};
use shared::metrics::labels::LABEL_REASON;
use std::time::Duration;

/// Prometheus registry for the poller's own health.
pub struct MetricsRegistry {
  pub registry: Registry,
  // Cycle metrics
  pub gather_cycles: IntCounter,
  pub gather_failures: IntCounter,
  pub gather_duration: Histogram,
  // Catalog walk metrics
  pub actions_invoked: IntCounter,
  pub entries_skipped: IntCounterVec,
  pub fields_collected: IntGauge,
}

impl MetricsRegistry {
  pub fn new() -> anyhow::Result<Self> {
    let registry = Registry::new();

    let gather_cycles = IntCounter::new(
      "fritzpoll_gather_cycles_total",
      "Total poll cycles that reported a measurement",
    )?;
    let gather_failures = IntCounter::new(
      "fritzpoll_gather_failures_total",
      "Total poll cycles aborted because the service directory could not be loaded",
    )?;
    let gather_duration = Histogram::with_opts(
      HistogramOpts::new("fritzpoll_gather_duration_seconds", "Poll cycle duration")
        .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]),
    )?;

    let actions_invoked = IntCounter::new(
      "fritzpoll_actions_invoked_total",
      "Total successful UPnP action calls",
    )?;
    let entries_skipped = IntCounterVec::new(
      Opts::new(
        "fritzpoll_entries_skipped_total",
        "Total catalog entries that produced no field",
      ),
      &[LABEL_REASON],
    )?;
    let fields_collected = IntGauge::new(
      "fritzpoll_fields_collected",
      "Fields reported by the last poll cycle",
    )?;

    registry.register(Box::new(gather_cycles.clone()))?;
    registry.register(Box::new(gather_failures.clone()))?;
    registry.register(Box::new(gather_duration.clone()))?;
    registry.register(Box::new(actions_invoked.clone()))?;
    registry.register(Box::new(entries_skipped.clone()))?;
    registry.register(Box::new(fields_collected.clone()))?;

    Ok(Self {
      registry,
      gather_cycles,
      gather_failures,
      gather_duration,
      actions_invoked,
      entries_skipped,
      fields_collected,
    })
  }

  /// Record a completed poll cycle.
  pub fn observe_cycle(&self, report: &GatherReport, elapsed: Duration) {
    self.gather_cycles.inc();
    self.gather_duration.observe(elapsed.as_secs_f64());
    self.actions_invoked.inc_by(report.actions_invoked as u64);
    self.fields_collected.set(report.fields_collected as i64);
    for (reason, count) in &report.skipped {
      self
        .entries_skipped
        .with_label_values(&[*reason])
        .inc_by(*count as u64);
    }
  }

  /// Record a poll cycle that failed before reaching the sink.
  pub fn observe_failure(&self, elapsed: Duration) {
    self.gather_failures.inc();
    self.gather_duration.observe(elapsed.as_secs_f64());
  }

  /// Encode all metrics in Prometheus text format.
  pub fn encode(&self) -> String {
    use prometheus::Encoder;
    let encoder = prometheus::TextEncoder::new();
    let families = self.registry.gather();
    let mut buf = Vec::new();
    encoder.encode(&families, &mut buf).unwrap_or_default();
    String::from_utf8(buf).unwrap_or_default()
  }
}
