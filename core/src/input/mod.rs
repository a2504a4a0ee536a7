//! Input plugins: named collectors an agent can schedule.

pub mod fritzbox;

pub use fritzbox::{Fritzbox, SAMPLE_CONFIG};

use crate::sink::Accumulator;

/// A collector the daemon runs once per interval.
pub trait Input: Send + Sync {
  /// Plugin name, as used in configuration.
  fn name(&self) -> &'static str;

  /// One-line description for `--help` style listings.
  fn description(&self) -> &'static str;

  /// Annotated TOML showing the plugin's settings.
  fn sample_config(&self) -> &'static str;

  /// Collect once and hand the result to `acc`.
  fn gather(&self, acc: &mut dyn Accumulator) -> shared::Result<()>;
}
