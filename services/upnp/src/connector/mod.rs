pub mod action;
pub mod loader;

pub use action::UpnpAction;
pub use loader::UpnpLoader;
