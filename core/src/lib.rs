//! Core of the fritzpoll router poller: the metric catalog, the service
//! directory seam, the poll cycle and the sinks it reports to.

pub mod catalog;
pub mod daemon;
pub mod directory;
pub mod gather;
pub mod input;
pub mod metrics;
pub mod sink;

pub use catalog::{MetricDescriptor, DEFAULT_CATALOG};
pub use directory::{Action, CallResult, DirectoryLoader, Service, ServiceDirectory};
pub use gather::{GatherReport, PollCycle};
pub use input::{Fritzbox, Input};
pub use sink::{Accumulator, Measurement, MemoryAccumulator};
