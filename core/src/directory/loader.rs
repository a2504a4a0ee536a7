use super::model::ServiceDirectory;

/// Loads the service directory of a device.
///
/// Implementations do the UPnP discovery: fetch the device description at
/// `host:port`, then the description of every service it lists.
pub trait DirectoryLoader: Send + Sync {
  fn load(&self, host: &str, port: u16) -> anyhow::Result<ServiceDirectory>;
}

impl<L: DirectoryLoader + ?Sized> DirectoryLoader for std::sync::Arc<L> {
  fn load(&self, host: &str, port: u16) -> anyhow::Result<ServiceDirectory> {
    (**self).load(host, port)
  }
}
