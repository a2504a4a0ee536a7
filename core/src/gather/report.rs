use std::collections::BTreeMap;

/// Outcome of one poll cycle's catalog walk.
///
/// The sink only sees the field set; this report lets the caller tell a
/// complete cycle from a partial one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GatherReport {
  /// Fields handed to the sink.
  pub fields_collected: usize,
  /// Successful action calls.
  pub actions_invoked: usize,
  /// Skipped catalog entries keyed by reason label.
  pub skipped: BTreeMap<&'static str, usize>,
}

impl GatherReport {
  pub fn record_skip(&mut self, reason: &'static str) {
    *self.skipped.entry(reason).or_default() += 1;
  }

  /// Total catalog entries that produced no field.
  pub fn entries_skipped(&self) -> usize {
    self.skipped.values().sum()
  }

  pub fn is_complete(&self) -> bool {
    self.skipped.is_empty()
  }
}
