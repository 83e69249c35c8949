use std::fs;
use std::path::Path;

use serde::Deserialize;

/// Top-level project configuration loaded from `.ocg.yaml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OcgConfig {
    pub input: String,
    pub output: String,
    pub namespace: String,
    pub client_name: String,
    pub naming: NamingConfig,
    pub types: TypesConfig,
    pub client: ClientConfig,
}

impl Default for OcgConfig {
    fn default() -> Self {
        Self {
            input: "openapi.yaml".to_string(),
            output: "generated".to_string(),
            namespace: "Generated.Api".to_string(),
            client_name: "ApiClient".to_string(),
            naming: NamingConfig::default(),
            types: TypesConfig::default(),
            client: ClientConfig::default(),
        }
    }
}

impl OcgConfig {
    /// Options for the schema/operation pass.
    pub fn transform_options(&self) -> TransformOptions {
        TransformOptions {
            missing_operation_id: self.naming.missing_operation_id,
            collision_strategy: self.types.collision_strategy,
        }
    }

    /// Options for an emitter.
    pub fn generator_config(&self) -> GeneratorConfig {
        GeneratorConfig {
            namespace: self.namespace.clone(),
            client_name: self.client_name.clone(),
            typed_responses: self.client.typed_responses,
        }
    }
}

/// Operation naming options.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NamingConfig {
    pub missing_operation_id: MissingOperationId,
}

/// What to name a method whose operation has no `operationId`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingOperationId {
    /// Leave the method name empty.
    #[default]
    Empty,
    /// Derive a name from the HTTP method and path.
    Route,
}

/// Generated type options.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TypesConfig {
    pub collision_strategy: CollisionStrategy,
}

/// How two schemas that normalize to the same type name are handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionStrategy {
    /// The first schema registered under a name wins; later ones reuse it.
    #[default]
    Merge,
    /// Same-shaped schemas share a type; differently shaped ones get a
    /// numeric suffix.
    Disambiguate,
}

/// Client generation options.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Return `ApiResponse<T>` / `FileApiResponse` instead of the plain
    /// envelope when the success response type is known.
    pub typed_responses: bool,
}

/// Options controlling the transform pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransformOptions {
    pub missing_operation_id: MissingOperationId,
    pub collision_strategy: CollisionStrategy,
}

/// Per-run emitter configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub namespace: String,
    pub client_name: String,
    pub typed_responses: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        OcgConfig::default().generator_config()
    }
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".ocg.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<OcgConfig>, String> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)
        .map_err(|e| format!("failed to read config {}: {}", path.display(), e))?;
    let config: OcgConfig = serde_yaml_ng::from_str(&content)
        .map_err(|e| format!("failed to parse config {}: {}", path.display(), e))?;
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# ocg configuration
input: openapi.yaml
output: generated
namespace: Generated.Api
client_name: ApiClient

naming:
  missing_operation_id: empty   # empty | route

types:
  collision_strategy: merge     # merge | disambiguate

client:
  typed_responses: false        # return ApiResponse<T> when the body type is known
"#
}
