pub mod cycle;
pub mod report;

pub use cycle::PollCycle;
pub use report::GatherReport;
