use crate::config::TransformOptions;
use crate::ir::{IrInfo, IrSpec};
use crate::parse::spec::OpenApiSpec;

use super::operations::OperationEmitter;
use super::registry::TypeRegistry;

/// Run one generation pass with the default options.
pub fn transform(spec: &OpenApiSpec) -> IrSpec {
    transform_with_options(spec, &TransformOptions::default())
}

/// Run one generation pass.
///
/// Operations are visited in document order, which fixes the order in which
/// types are registered. Component schemas that no response reaches are not
/// generated. Each call starts from an empty registry.
pub fn transform_with_options(spec: &OpenApiSpec, options: &TransformOptions) -> IrSpec {
    let emitter = OperationEmitter::new(spec, options);
    let mut registry = TypeRegistry::new();

    let mut operations = Vec::new();
    for (path, item) in &spec.paths {
        for (method, op) in item.operations() {
            operations.push(emitter.emit(method, path, op, &mut registry));
        }
    }

    log::debug!(
        "pass complete: {} operations, {} types",
        operations.len(),
        registry.len()
    );
    let (enums, models) = registry.into_parts();

    IrSpec {
        info: IrInfo {
            title: spec.info.title.clone(),
            description: spec.info.description.clone(),
            version: spec.info.version.clone(),
        },
        enums,
        models,
        operations,
    }
}
