pub mod emitters;
pub mod generator;
pub mod sanitize;
pub mod type_mapper;

pub use generator::CSharpClientGenerator;
