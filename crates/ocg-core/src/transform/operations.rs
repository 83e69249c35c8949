use crate::config::{MissingOperationId, TransformOptions};
use crate::ir::{HttpMethod, IrOperation, IrResponse, IrResponseBody};
use crate::parse::media_type::{APPLICATION_JSON, is_binary_media_type};
use crate::parse::operation::Operation;
use crate::parse::ref_resolve::RefResolver;
use crate::parse::spec::OpenApiSpec;

use super::name_normalizer::{normalize, path_to_name, route_to_name};
use super::registry::TypeRegistry;
use super::schema_resolver::SchemaResolver;

/// Turns document operations into method stubs, resolving their response
/// schemas into the registry on the way.
#[derive(Debug, Clone, Copy)]
pub struct OperationEmitter<'a> {
    refs: RefResolver<'a>,
    schemas: SchemaResolver<'a>,
    missing_operation_id: MissingOperationId,
}

impl<'a> OperationEmitter<'a> {
    pub fn new(spec: &'a OpenApiSpec, options: &TransformOptions) -> Self {
        let refs = RefResolver::new(spec);
        Self {
            refs,
            schemas: SchemaResolver::new(refs, options.collision_strategy),
            missing_operation_id: options.missing_operation_id,
        }
    }

    /// Build the stub for one operation.
    pub fn emit(
        &self,
        method: HttpMethod,
        path: &str,
        op: &'a Operation,
        registry: &mut TypeRegistry,
    ) -> IrOperation {
        let name = self.method_name(method, path, op);
        log::debug!("emitting {method} {path} as {name:?}");

        let mut responses = Vec::new();
        for (status, response) in &op.responses {
            let response = match self.refs.response(response) {
                Ok(r) => r,
                Err(e) => {
                    log::warn!("skipping response {status} of {method} {path}: {e}");
                    continue;
                }
            };

            for (content_type, media) in &response.content {
                let body = if content_type == APPLICATION_JSON {
                    let Some(schema) = &media.schema else {
                        continue;
                    };
                    let path_name = path_to_name(path);
                    let candidate = schema.reference_id().unwrap_or(&path_name);
                    IrResponseBody::Json(self.schemas.resolve(schema, candidate, registry))
                } else if is_binary_media_type(content_type) {
                    IrResponseBody::Binary
                } else {
                    continue;
                };
                responses.push(IrResponse {
                    status: status.clone(),
                    content_type: content_type.clone(),
                    body,
                });
            }
        }

        IrOperation {
            name,
            method,
            path: path.to_string(),
            summary: op.summary.clone(),
            description: op.description.clone(),
            deprecated: op.deprecated.unwrap_or(false),
            declared_statuses: op.responses.keys().cloned().collect(),
            responses,
        }
    }

    fn method_name(&self, method: HttpMethod, path: &str, op: &Operation) -> String {
        match (&op.operation_id, self.missing_operation_id) {
            (Some(id), _) => normalize(id),
            (None, MissingOperationId::Empty) => String::new(),
            (None, MissingOperationId::Route) => normalize(&route_to_name(method.as_str(), path)),
        }
    }
}
