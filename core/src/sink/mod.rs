//! Destinations for collected measurements.

pub mod line_protocol;
pub mod memory;

pub use line_protocol::LineProtocolWriter;
pub use memory::MemoryAccumulator;

use chrono::{DateTime, Utc};
use shared::{FieldSet, TagSet};

/// Receives one measurement per poll cycle.
pub trait Accumulator {
  /// Add a named measurement with its fields and tags.
  fn add_fields(&mut self, measurement: &str, fields: FieldSet, tags: TagSet);
}

/// A measurement as handed to a sink, stamped on arrival.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
  pub name: String,
  pub fields: FieldSet,
  pub tags: TagSet,
  pub timestamp: DateTime<Utc>,
}

impl Measurement {
  pub fn new(name: impl Into<String>, fields: FieldSet, tags: TagSet) -> Self {
    Self {
      name: name.into(),
      fields,
      tags,
      timestamp: Utc::now(),
    }
  }
}
