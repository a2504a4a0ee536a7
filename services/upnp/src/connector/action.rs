use fritzpoll_core::directory::{Action, CallResult};
use rupnp::Device;
use shared::FieldValue;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;

/// Lowercased `dataType` of each state variable of a service.
pub(crate) type StateTypes = Arc<HashMap<String, String>>;

/// A UPnP action bound to the device that exposes it.
///
/// Calls are made with an empty argument list; every counter this poller
/// reads is a parameterless getter.
pub struct UpnpAction {
  device: Arc<Device>,
  service_type: String,
  name: String,
  types: StateTypes,
  handle: Handle,
  timeout: Duration,
}

impl UpnpAction {
  pub(crate) fn new(
    device: Arc<Device>,
    service_type: String,
    name: String,
    types: StateTypes,
    handle: Handle,
    timeout: Duration,
  ) -> Self {
    Self {
      device,
      service_type,
      name,
      types,
      handle,
      timeout,
    }
  }
}

impl Action for UpnpAction {
  fn call(&self) -> anyhow::Result<CallResult> {
    let service = self
      .device
      .services_iter()
      .find(|s| s.service_type().to_string() == self.service_type)
      .ok_or_else(|| anyhow::anyhow!("service {} not on device", self.service_type))?;

    let call = service.action(self.device.url(), &self.name, "");
    let response = self
      .handle
      .block_on(async { tokio::time::timeout(self.timeout, call).await })
      .map_err(|_| anyhow::anyhow!("{} timed out after {:?}", self.name, self.timeout))??;

    Ok(coerce(response, &self.types))
  }
}

/// Convert SOAP response arguments into typed field values.
///
/// Out arguments are named after their state variable with a `New` prefix
/// (`NewUptime` for `Uptime`); results are keyed by the state variable name
/// and typed by its declared `dataType` when the service description has one.
pub(crate) fn coerce<I>(response: I, types: &HashMap<String, String>) -> CallResult
where
  I: IntoIterator<Item = (String, String)>,
{
  response
    .into_iter()
    .map(|(key, raw)| {
      let key = if key.starts_with("New") && key.len() > 3 {
        key[3..].to_string()
      } else {
        key
      };
      let value = match types.get(&key) {
        Some(data_type) => FieldValue::parse_typed(&raw, data_type),
        None => FieldValue::parse(&raw),
      };
      (key, value)
    })
    .collect()
}
