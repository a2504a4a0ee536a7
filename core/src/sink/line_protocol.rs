use super::{Accumulator, Measurement};
use shared::{FieldSet, FieldValue, TagSet};
use std::io::Write;
use tracing::{debug, error};

/// Writes measurements as InfluxDB line protocol, one line per measurement.
///
/// Line protocol cannot express a measurement without fields, so empty
/// field sets are dropped here with a debug log.
pub struct LineProtocolWriter<W: Write> {
  out: W,
  lines_written: u64,
}

impl<W: Write> LineProtocolWriter<W> {
  pub fn new(out: W) -> Self {
    Self {
      out,
      lines_written: 0,
    }
  }

  pub fn lines_written(&self) -> u64 {
    self.lines_written
  }

  pub fn into_inner(self) -> W {
    self.out
  }

  fn write_measurement(&mut self, m: &Measurement) -> std::io::Result<()> {
    writeln!(self.out, "{}", format_line(m))?;
    self.out.flush()
  }
}

impl<W: Write> Accumulator for LineProtocolWriter<W> {
  fn add_fields(&mut self, measurement: &str, fields: FieldSet, tags: TagSet) {
    if fields.is_empty() {
      debug!(measurement, "dropping measurement without fields");
      return;
    }
    let m = Measurement::new(measurement, fields, tags);
    match self.write_measurement(&m) {
      Ok(()) => self.lines_written += 1,
      Err(e) => error!(measurement, error = %e, "failed to write measurement"),
    }
  }
}

/// Render one measurement as a line-protocol line (without newline).
pub fn format_line(m: &Measurement) -> String {
  let mut line = escape(&m.name, &[',', ' ']);
  for (key, value) in &m.tags {
    line.push(',');
    line.push_str(&escape(key, &[',', '=', ' ']));
    line.push('=');
    line.push_str(&escape(value, &[',', '=', ' ']));
  }

  let fields: Vec<String> = m
    .fields
    .iter()
    .map(|(key, value)| format!("{}={}", escape(key, &[',', '=', ' ']), format_value(value)))
    .collect();
  line.push(' ');
  line.push_str(&fields.join(","));

  if let Some(ts) = m.timestamp.timestamp_nanos_opt() {
    line.push(' ');
    line.push_str(&ts.to_string());
  }
  line
}

fn format_value(value: &FieldValue) -> String {
  match value {
    FieldValue::Integer(v) => format!("{v}i"),
    FieldValue::Unsigned(v) => format!("{v}u"),
    FieldValue::Float(v) => format!("{v}"),
    FieldValue::Boolean(v) => format!("{v}"),
    FieldValue::String(v) => format!("\"{}\"", escape(v, &['"', '\\'])),
  }
}

fn escape(raw: &str, special: &[char]) -> String {
  let mut out = String::with_capacity(raw.len());
  for c in raw.chars() {
    if special.contains(&c) {
      out.push('\\');
    }
    out.push(c);
  }
  out
}
