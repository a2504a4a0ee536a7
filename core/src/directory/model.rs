use shared::FieldValue;
use std::collections::HashMap;

/// Named values returned by one action call.
pub type CallResult = HashMap<String, FieldValue>;

/// A remotely invocable UPnP action bound to its service.
pub trait Action: Send + Sync {
  /// Invoke the action with no input arguments.
  fn call(&self) -> anyhow::Result<CallResult>;
}

impl<F> Action for F
where
  F: Fn() -> anyhow::Result<CallResult> + Send + Sync,
{
  fn call(&self) -> anyhow::Result<CallResult> {
    self()
  }
}

/// A UPnP service: its actions keyed by name.
#[derive(Default)]
pub struct Service {
  actions: HashMap<String, Box<dyn Action>>,
}

impl Service {
  pub fn new() -> Self {
    Self::default()
  }

  /// Builder-style [`Service::insert_action`].
  pub fn with_action(mut self, name: impl Into<String>, action: impl Action + 'static) -> Self {
    self.insert_action(name, action);
    self
  }

  pub fn insert_action(&mut self, name: impl Into<String>, action: impl Action + 'static) {
    self.actions.insert(name.into(), Box::new(action));
  }

  /// Look up an action by name.
  pub fn action(&self, name: &str) -> Option<&dyn Action> {
    self.actions.get(name).map(|a| a.as_ref())
  }

  pub fn action_names(&self) -> impl Iterator<Item = &str> {
    self.actions.keys().map(String::as_str)
  }

  pub fn len(&self) -> usize {
    self.actions.len()
  }

  pub fn is_empty(&self) -> bool {
    self.actions.is_empty()
  }
}

impl std::fmt::Debug for Service {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let mut names: Vec<_> = self.action_names().collect();
    names.sort_unstable();
    f.debug_struct("Service").field("actions", &names).finish()
  }
}

/// Services exposed by one device, keyed by service type URN.
///
/// Built fresh for every poll cycle and dropped at its end.
#[derive(Debug, Default)]
pub struct ServiceDirectory {
  services: HashMap<String, Service>,
}

impl ServiceDirectory {
  pub fn new() -> Self {
    Self::default()
  }

  /// Builder-style [`ServiceDirectory::insert_service`].
  pub fn with_service(mut self, id: impl Into<String>, service: Service) -> Self {
    self.insert_service(id, service);
    self
  }

  /// Add a service. A device tree can list the same service type on
  /// several embedded devices; the first one registered is kept.
  pub fn insert_service(&mut self, id: impl Into<String>, service: Service) {
    self.services.entry(id.into()).or_insert(service);
  }

  /// Look up a service by identifier.
  pub fn service(&self, id: &str) -> Option<&Service> {
    self.services.get(id)
  }

  pub fn len(&self) -> usize {
    self.services.len()
  }

  pub fn is_empty(&self) -> bool {
    self.services.is_empty()
  }
}
