pub mod types;

pub use types::FritzpollError;

/// Shorthand Result type used throughout fritzpoll.
pub type Result<T> = std::result::Result<T, FritzpollError>;
