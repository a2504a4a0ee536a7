//! UPnP discovery and SOAP calls for fritzpoll, backed by `rupnp`.

pub mod connector;

pub use connector::{UpnpAction, UpnpLoader};
