use crate::catalog::MetricDescriptor;
use crate::directory::{CallResult, DirectoryLoader, ServiceDirectory};
use crate::metrics::MetricsRegistry;
use crate::sink::Accumulator;
use shared::config::FritzboxConfig;
use shared::metrics::labels::{MEASUREMENT_FRITZBOX, REASON_RESULT_MISSING, TAG_HOST};
use shared::{FieldSet, FritzpollError, TagSet};
use std::time::Instant;
use tracing::{debug, error, warn};

use super::report::GatherReport;

/// One round of collection: load the directory, walk the catalog, report.
///
/// Holds no state between runs. The directory and every call result live
/// only for the duration of [`PollCycle::run`].
pub struct PollCycle<'a> {
  loader: &'a dyn DirectoryLoader,
  catalog: &'a [MetricDescriptor],
  metrics: Option<&'a MetricsRegistry>,
}

impl<'a> PollCycle<'a> {
  pub fn new(loader: &'a dyn DirectoryLoader, catalog: &'a [MetricDescriptor]) -> Self {
    Self {
      loader,
      catalog,
      metrics: None,
    }
  }

  /// Record cycle outcomes into `metrics`.
  pub fn with_metrics(mut self, metrics: &'a MetricsRegistry) -> Self {
    self.metrics = Some(metrics);
    self
  }

  /// Run one cycle against the router described by `config`.
  ///
  /// Fails only when the service directory cannot be loaded; in that case
  /// the accumulator is not called. Otherwise exactly one measurement is
  /// added, even when no field could be collected.
  pub fn run(
    &self,
    config: &FritzboxConfig,
    acc: &mut dyn Accumulator,
  ) -> shared::Result<GatherReport> {
    let host = config.resolved_host();
    let port = config.resolved_port();
    let started = Instant::now();

    let directory = match self.loader.load(host, port) {
      Ok(directory) => directory,
      Err(e) => {
        if let Some(metrics) = self.metrics {
          metrics.observe_failure(started.elapsed());
        }
        return Err(FritzpollError::DirectoryLoad {
          host: host.to_string(),
          port,
          source: e.into(),
        });
      }
    };
    debug!(host, port, services = directory.len(), "service directory loaded");

    let (fields, report) = self.collect(&directory);

    let tags = TagSet::from([(TAG_HOST.to_string(), host.to_string())]);
    acc.add_fields(MEASUREMENT_FRITZBOX, fields, tags);

    if let Some(metrics) = self.metrics {
      metrics.observe_cycle(&report, started.elapsed());
    }
    debug!(
      host,
      fields = report.fields_collected,
      calls = report.actions_invoked,
      skipped = report.entries_skipped(),
      "poll cycle finished"
    );
    Ok(report)
  }

  /// Walk the catalog against `directory`.
  ///
  /// Adjacent entries naming the same service and action share one call.
  /// Lookup and call failures are logged and the entry is skipped; a failed
  /// call is attempted again by the next entry that needs it.
  ///
  /// A successful response that lacks the entry's result field yields no
  /// output field, never a placeholder; it is logged and counted as
  /// `result_missing`.
  pub fn collect(&self, directory: &ServiceDirectory) -> (FieldSet, GatherReport) {
    let mut fields = FieldSet::new();
    let mut report = GatherReport::default();
    let mut last: Option<(&MetricDescriptor, CallResult)> = None;

    for entry in self.catalog {
      let reuse = matches!(&last, Some((prev, _)) if prev.same_call(entry));
      if !reuse {
        match invoke(directory, entry) {
          Ok(result) => {
            report.actions_invoked += 1;
            last = Some((entry, result));
          }
          Err(err) => {
            match &err {
              FritzpollError::ActionFailed { .. } => {
                error!(
                  service = entry.service,
                  action = entry.action,
                  error = ?err,
                  "unable to call action, skipping metric"
                )
              }
              _ => warn!(service = entry.service, action = entry.action, "{err}"),
            }
            report.record_skip(err.skip_reason());
            continue;
          }
        }
      }

      let Some((_, result)) = &last else {
        continue;
      };
      match result.get(entry.result) {
        Some(value) => {
          fields.insert(entry.name.to_string(), value.clone());
        }
        None => {
          warn!(
            service = entry.service,
            action = entry.action,
            result = entry.result,
            "action response has no such result field"
          );
          report.record_skip(REASON_RESULT_MISSING);
        }
      }
    }

    report.fields_collected = fields.len();
    (fields, report)
  }
}

fn invoke(directory: &ServiceDirectory, entry: &MetricDescriptor) -> shared::Result<CallResult> {
  let service = directory
    .service(entry.service)
    .ok_or_else(|| FritzpollError::ServiceNotFound(entry.service.to_string()))?;
  let action = service
    .action(entry.action)
    .ok_or_else(|| FritzpollError::ActionNotFound {
      service: entry.service.to_string(),
      action: entry.action.to_string(),
    })?;
  action.call().map_err(|e| FritzpollError::ActionFailed {
    service: entry.service.to_string(),
    action: entry.action.to_string(),
    source: e.into(),
  })
}
