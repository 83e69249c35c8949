use std::collections::HashSet;

use super::components::Components;
use super::response::{Response, ResponseOrRef};
use super::schema::SchemaOrRef;
use super::spec::OpenApiSpec;
use crate::error::ResolveError;

/// Looks up local `#/components/...` references on demand.
///
/// Schema references are handed back unresolved one level at a time so the
/// caller can decide how to break cycles; response references are followed
/// until an inline response is reached.
#[derive(Debug, Clone, Copy)]
pub struct RefResolver<'a> {
    components: Option<&'a Components>,
}

impl<'a> RefResolver<'a> {
    pub fn new(spec: &'a OpenApiSpec) -> Self {
        Self {
            components: spec.components.as_ref(),
        }
    }

    /// Return the `components.schemas` entry a `$ref` points at.
    pub fn schema(&self, ref_path: &str) -> Result<&'a SchemaOrRef, ResolveError> {
        let name = parse_ref_name(ref_path, "schemas")?;
        self.components
            .and_then(|c| c.schemas.get(name))
            .ok_or_else(|| ResolveError::RefTargetNotFound(ref_path.to_string()))
    }

    /// Resolve a response, following `components.responses` references.
    pub fn response(&self, response: &'a ResponseOrRef) -> Result<&'a Response, ResolveError> {
        let mut visited = HashSet::new();
        let mut current = response;
        loop {
            match current {
                ResponseOrRef::Response(r) => return Ok(r),
                ResponseOrRef::Ref { ref_path } => {
                    if !visited.insert(ref_path.as_str()) {
                        return Err(ResolveError::RefTargetNotFound(ref_path.clone()));
                    }
                    let name = parse_ref_name(ref_path, "responses")?;
                    current = self
                        .components
                        .and_then(|c| c.responses.get(name))
                        .ok_or_else(|| ResolveError::RefTargetNotFound(ref_path.clone()))?;
                }
            }
        }
    }
}

/// Parse a `$ref` path like `#/components/schemas/Foo` and extract the name.
pub fn parse_ref_name<'a>(
    ref_path: &'a str,
    expected_section: &str,
) -> Result<&'a str, ResolveError> {
    let stripped = ref_path
        .strip_prefix("#/components/")
        .ok_or_else(|| ResolveError::InvalidRefFormat(ref_path.to_string()))?;
    let (section, name) = stripped
        .split_once('/')
        .ok_or_else(|| ResolveError::InvalidRefFormat(ref_path.to_string()))?;
    if section != expected_section {
        return Err(ResolveError::InvalidRefFormat(format!(
            "expected section '{}', got '{}' in {}",
            expected_section, section, ref_path
        )));
    }
    Ok(name)
}
