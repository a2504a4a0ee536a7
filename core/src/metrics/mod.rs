pub mod registry;

pub use registry::MetricsRegistry;
