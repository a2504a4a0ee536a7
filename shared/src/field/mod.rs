pub mod value;

pub use value::{FieldSet, FieldValue, TagSet};
