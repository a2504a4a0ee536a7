//! Types shared across the fritzpoll workspace: configuration, errors,
//! field values and measurement/tag naming constants.

pub mod config;
pub mod error;
pub mod field;
pub mod metrics;

pub use error::{FritzpollError, Result};
pub use field::{FieldSet, FieldValue, TagSet};
