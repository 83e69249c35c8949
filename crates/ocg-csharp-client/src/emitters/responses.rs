use minijinja::context;
use ocg_core::GeneratorError;

use super::render;

/// Emit `ApiResponse.g.cs`: the fixed response envelope types.
pub fn emit_responses(namespace: &str) -> Result<String, GeneratorError> {
    render(
        "responses.cs.j2",
        include_str!("../../templates/responses.cs.j2"),
        context! { namespace => namespace },
    )
}
