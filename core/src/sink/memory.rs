use super::{Accumulator, Measurement};
use shared::{FieldSet, TagSet};

/// Keeps every measurement in memory.
#[derive(Debug, Default)]
pub struct MemoryAccumulator {
  measurements: Vec<Measurement>,
}

impl MemoryAccumulator {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn measurements(&self) -> &[Measurement] {
    &self.measurements
  }

  /// Drain the collected measurements.
  pub fn take(&mut self) -> Vec<Measurement> {
    std::mem::take(&mut self.measurements)
  }

  pub fn len(&self) -> usize {
    self.measurements.len()
  }

  pub fn is_empty(&self) -> bool {
    self.measurements.is_empty()
  }
}

impl Accumulator for MemoryAccumulator {
  fn add_fields(&mut self, measurement: &str, fields: FieldSet, tags: TagSet) {
    self
      .measurements
      .push(Measurement::new(measurement, fields, tags));
  }
}
