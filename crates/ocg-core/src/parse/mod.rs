pub mod components;
mod http;
pub mod media_type;
pub mod operation;
pub mod ref_resolve;
pub mod response;
pub mod schema;
pub mod spec;

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ParseError;
use spec::OpenApiSpec;

pub use http::{HttpDocumentReader, is_url};

/// Parse an OpenAPI spec from YAML.
pub fn from_yaml(input: &str) -> Result<OpenApiSpec, ParseError> {
    let spec: OpenApiSpec = serde_yaml_ng::from_str(input)?;
    validate_version(&spec)?;
    Ok(spec)
}

/// Parse an OpenAPI spec from JSON.
pub fn from_json(input: &str) -> Result<OpenApiSpec, ParseError> {
    let spec: OpenApiSpec = serde_json::from_str(input)?;
    validate_version(&spec)?;
    Ok(spec)
}

/// Read and parse a spec file. `.json` files are parsed as JSON, anything
/// else as YAML.
pub fn from_path(path: &Path) -> Result<OpenApiSpec, ParseError> {
    let content = fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.display().to_string(),
        source,
    })?;
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => from_json(&content),
        _ => from_yaml(&content),
    }
}

/// Parse content of unknown format: JSON if it starts with `{`, YAML
/// otherwise.
fn from_content(content: &str) -> Result<OpenApiSpec, ParseError> {
    if content.trim_start().starts_with('{') {
        from_json(content)
    } else {
        from_yaml(content)
    }
}

fn validate_version(spec: &OpenApiSpec) -> Result<(), ParseError> {
    if !spec.openapi.starts_with("3.") {
        return Err(ParseError::UnsupportedVersion(spec.openapi.clone()));
    }
    Ok(())
}

/// A source of OpenAPI documents. Readers either return a complete document
/// or fail; they never hand back a partially populated spec.
pub trait DocumentReader {
    fn read(&self) -> Result<OpenApiSpec, ParseError>;
}

/// Reads a document from a file on disk.
#[derive(Debug, Clone)]
pub struct FileDocumentReader {
    path: PathBuf,
}

impl FileDocumentReader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DocumentReader for FileDocumentReader {
    fn read(&self) -> Result<OpenApiSpec, ParseError> {
        log::debug!("reading OpenAPI document from {}", self.path.display());
        from_path(&self.path)
    }
}

/// Reads a document from an in-memory string. Content starting with `{` is
/// treated as JSON.
#[derive(Debug, Clone)]
pub struct StringDocumentReader {
    content: String,
}

impl StringDocumentReader {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

impl DocumentReader for StringDocumentReader {
    fn read(&self) -> Result<OpenApiSpec, ParseError> {
        from_content(&self.content)
    }
}
