pub mod config;
pub mod error;
pub mod ir;
pub mod parse;
pub mod transform;

pub use config::{GeneratorConfig, TransformOptions};
pub use error::{GeneratorError, ParseError};

/// A generated file with path and content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: String,
    pub content: String,
}

/// Trait for code generators that produce files from a pass result.
pub trait CodeGenerator {
    fn generate(
        &self,
        ir: &ir::IrSpec,
        config: &GeneratorConfig,
    ) -> Result<Vec<GeneratedFile>, GeneratorError>;
}
