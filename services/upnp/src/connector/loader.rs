use super::action::UpnpAction;
use fritzpoll_core::directory::{DirectoryLoader, Service, ServiceDirectory};
use rupnp::scpd::{StateVariable, StateVariableKind};
use rupnp::Device;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tracing::{debug, info, warn};

/// Device description served by the FRITZ!Box IGD endpoint.
pub const IGD_DESCRIPTION_PATH: &str = "igddesc.xml";

/// Loads a router's service directory over UPnP.
///
/// The core is synchronous, so the async `rupnp` calls are driven to
/// completion on `handle`. Loading must therefore happen outside an async
/// context, e.g. inside `spawn_blocking`.
pub struct UpnpLoader {
  handle: Handle,
  description_path: String,
  timeout: Duration,
}

impl UpnpLoader {
  pub fn new(handle: Handle) -> Self {
    Self {
      handle,
      description_path: IGD_DESCRIPTION_PATH.to_string(),
      timeout: Duration::from_secs(10),
    }
  }

  /// Fetch a different device description document.
  pub fn with_description_path(mut self, path: impl Into<String>) -> Self {
    self.description_path = path.into();
    self
  }

  /// Per-request timeout for descriptions and action calls.
  pub fn with_timeout(mut self, timeout: Duration) -> Self {
    self.timeout = timeout;
    self
  }

  /// URL of the device description for `host:port`.
  pub fn description_url(&self, host: &str, port: u16) -> String {
    format!(
      "http://{}:{}/{}",
      host,
      port,
      self.description_path.trim_start_matches('/')
    )
  }

  async fn fetch(&self, url: &str) -> anyhow::Result<ServiceDirectory> {
    let device = tokio::time::timeout(self.timeout, Device::from_url(url.parse()?))
      .await
      .map_err(|_| anyhow::anyhow!("timed out fetching {url}"))??;
    info!(url, device = %device.friendly_name(), "loaded device description");

    let device = Arc::new(device);
    let mut directory = ServiceDirectory::new();
    for service in device.services_iter() {
      let service_type = service.service_type().to_string();
      let scpd = match tokio::time::timeout(self.timeout, service.scpd(device.url())).await {
        Ok(Ok(scpd)) => scpd,
        Ok(Err(e)) => {
          warn!(service = %service_type, error = %e, "unable to load service description");
          continue;
        }
        Err(_) => {
          warn!(service = %service_type, "timed out loading service description");
          continue;
        }
      };

      let types: HashMap<String, String> = scpd
        .state_variables()
        .iter()
        .filter_map(|var| declared_type(var).map(|t| (var.name().to_string(), t)))
        .collect();
      let types = Arc::new(types);

      let mut actions = Service::new();
      for action in scpd.actions() {
        actions.insert_action(
          action.name(),
          UpnpAction::new(
            Arc::clone(&device),
            service_type.clone(),
            action.name().to_string(),
            Arc::clone(&types),
            self.handle.clone(),
            self.timeout,
          ),
        );
      }
      debug!(service = %service_type, actions = actions.len(), "service loaded");
      directory.insert_service(service_type, actions);
    }

    Ok(directory)
  }
}

/// Lowercased `dataType` of a state variable. Ranges are left untyped since
/// the description no longer carries their type.
fn declared_type(var: &StateVariable) -> Option<String> {
  match var.kind() {
    StateVariableKind::Simple(data_type) => Some(data_type.to_string().to_lowercase()),
    StateVariableKind::Enum(_) => Some("string".to_string()),
    StateVariableKind::Range(_) => None,
  }
}

impl DirectoryLoader for UpnpLoader {
  fn load(&self, host: &str, port: u16) -> anyhow::Result<ServiceDirectory> {
    let url = self.description_url(host, port);
    self.handle.block_on(self.fetch(&url))
  }
}
