pub mod name_normalizer;
pub mod operations;
pub mod registry;
pub mod schema_resolver;
pub mod spec_to_ir;

pub use spec_to_ir::{transform, transform_with_options};
