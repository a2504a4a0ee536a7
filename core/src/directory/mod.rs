pub mod loader;
pub mod model;

pub use loader::DirectoryLoader;
pub use model::{Action, CallResult, Service, ServiceDirectory};
