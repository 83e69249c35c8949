use minijinja::context;
use ocg_core::GeneratorError;
use ocg_core::config::GeneratorConfig;
use ocg_core::ir::{IrOperation, IrSpec};

use super::render;
use crate::sanitize::sanitize_identifier;
use crate::type_mapper::envelope_type;

/// Emit `<ClientName>.g.cs`: one stub method per operation on a partial
/// client class.
pub fn emit_client(ir: &IrSpec, config: &GeneratorConfig) -> Result<String, GeneratorError> {
    let operations: Vec<minijinja::Value> = ir
        .operations
        .iter()
        .map(|op| operation_to_ctx(op, config.typed_responses))
        .collect();

    render(
        "client.cs.j2",
        include_str!("../../templates/client.cs.j2"),
        context! {
            namespace => config.namespace.clone(),
            client_name => sanitize_identifier(&config.client_name),
            operations => operations,
        },
    )
}

fn operation_to_ctx(op: &IrOperation, typed_responses: bool) -> minijinja::Value {
    context! {
        name => sanitize_identifier(&op.name),
        http_method => op.method.as_str(),
        path => op.path.clone(),
        summary => op.summary.clone().unwrap_or_default(),
        description => op.description.clone().unwrap_or_default(),
        deprecated => op.deprecated,
        return_type => envelope_type(op, typed_responses),
    }
}
