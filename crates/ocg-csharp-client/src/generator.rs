use ocg_core::config::GeneratorConfig;
use ocg_core::ir::IrSpec;
use ocg_core::{CodeGenerator, GeneratedFile, GeneratorError};

use crate::emitters;
use crate::sanitize::{is_valid_namespace, sanitize_identifier};

/// File name of the envelope unit.
pub const RESPONSES_FILE: &str = "ApiResponse.g.cs";
/// File name of the models unit.
pub const MODELS_FILE: &str = "ApiModels.g.cs";

/// C# client generator: models, response envelopes and a partial client
/// class of method stubs.
pub struct CSharpClientGenerator;

impl CodeGenerator for CSharpClientGenerator {
    fn generate(
        &self,
        ir: &IrSpec,
        config: &GeneratorConfig,
    ) -> Result<Vec<GeneratedFile>, GeneratorError> {
        if !is_valid_namespace(&config.namespace) {
            return Err(GeneratorError::Config(format!(
                "invalid namespace {:?}",
                config.namespace
            )));
        }
        let client_name = sanitize_identifier(&config.client_name);
        if client_name.is_empty() || client_name.starts_with('@') {
            return Err(GeneratorError::Config(format!(
                "invalid client class name {:?}",
                config.client_name
            )));
        }

        log::debug!(
            "rendering {} enums, {} models, {} methods into {}",
            ir.enums.len(),
            ir.models.len(),
            ir.operations.len(),
            config.namespace
        );

        Ok(vec![
            GeneratedFile {
                path: RESPONSES_FILE.to_string(),
                content: emitters::responses::emit_responses(&config.namespace)?,
            },
            GeneratedFile {
                path: MODELS_FILE.to_string(),
                content: emitters::models::emit_models(ir, &config.namespace)?,
            },
            GeneratedFile {
                path: format!("{client_name}.g.cs"),
                content: emitters::client::emit_client(ir, config)?,
            },
        ])
    }
}
