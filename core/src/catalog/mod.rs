//! Static catalog of the router counters to collect.
//!
//! Each descriptor maps one UPnP (service, action, result field) triple to an
//! output field name. Entries that share a service and action must be
//! adjacent so a poll cycle calls the action only once.

/// WAN interface counters (packets, bytes, link state).
pub const WAN_COMMON_INTERFACE_CONFIG: &str =
  "urn:schemas-upnp-org:service:WANCommonInterfaceConfig:1";

/// WAN IP connection status.
pub const WAN_IP_CONNECTION: &str = "urn:schemas-upnp-org:service:WANIPConnection:1";

/// One output field and where to read it from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricDescriptor {
  /// UPnP service type URN.
  pub service: &'static str,
  /// Action to invoke on the service.
  pub action: &'static str,
  /// Argument name in the action's response.
  pub result: &'static str,
  /// Output field name.
  pub name: &'static str,
}

impl MetricDescriptor {
  pub const fn new(
    service: &'static str,
    action: &'static str,
    result: &'static str,
    name: &'static str,
  ) -> Self {
    Self {
      service,
      action,
      result,
      name,
    }
  }

  /// Whether `other` is served by the same action call.
  pub fn same_call(&self, other: &MetricDescriptor) -> bool {
    self.service == other.service && self.action == other.action
  }
}

/// Counters collected from a FRITZ!Box by default.
pub static DEFAULT_CATALOG: &[MetricDescriptor] = &[
  MetricDescriptor::new(
    WAN_COMMON_INTERFACE_CONFIG,
    "GetTotalPacketsReceived",
    "TotalPacketsReceived",
    "packets_received",
  ),
  MetricDescriptor::new(
    WAN_COMMON_INTERFACE_CONFIG,
    "GetTotalPacketsSent",
    "TotalPacketsSent",
    "packets_sent",
  ),
  MetricDescriptor::new(
    WAN_COMMON_INTERFACE_CONFIG,
    "GetAddonInfos",
    "TotalBytesReceived",
    "bytes_received",
  ),
  MetricDescriptor::new(
    WAN_COMMON_INTERFACE_CONFIG,
    "GetAddonInfos",
    "TotalBytesSent",
    "bytes_sent",
  ),
  MetricDescriptor::new(
    WAN_COMMON_INTERFACE_CONFIG,
    "GetCommonLinkProperties",
    "PhysicalLinkStatus",
    "link_status",
  ),
  MetricDescriptor::new(
    WAN_IP_CONNECTION,
    "GetStatusInfo",
    "ConnectionStatus",
    "connection_status",
  ),
  MetricDescriptor::new(WAN_IP_CONNECTION, "GetStatusInfo", "Uptime", "uptime"),
];

/// Number of distinct action calls a walk over `catalog` needs at most.
pub fn distinct_calls(catalog: &[MetricDescriptor]) -> usize {
  catalog
    .iter()
    .enumerate()
    .filter(|(i, m)| *i == 0 || !catalog[i - 1].same_call(m))
    .count()
}
