use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::ref_resolve::parse_ref_name;

/// A JSON Schema type keyword value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
    Null,
}

/// The `type` field can be a single type or an array of types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeSet {
    Single(SchemaType),
    Multiple(Vec<SchemaType>),
}

impl TypeSet {
    /// The type that drives code generation. For `["string", "null"]` style
    /// sets this is the first non-null member.
    pub fn primary(&self) -> Option<SchemaType> {
        match self {
            TypeSet::Single(t) => Some(*t),
            TypeSet::Multiple(types) => types
                .iter()
                .copied()
                .find(|t| *t != SchemaType::Null)
                .or_else(|| types.first().copied()),
        }
    }
}

/// A reference or inline schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SchemaOrRef {
    Ref {
        #[serde(rename = "$ref")]
        ref_path: String,
    },
    Schema(Box<Schema>),
}

/// The subset of a JSON Schema object that drives model generation.
/// Unknown keywords are ignored when deserializing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Schema {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<TypeSet>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub nullable: Option<bool>,

    // Object properties
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, SchemaOrRef>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,

    #[serde(
        rename = "additionalProperties",
        skip_serializing_if = "Option::is_none"
    )]
    pub additional_properties: Option<AdditionalProperties>,

    // Array items
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<SchemaOrRef>>,

    // Enum values
    #[serde(rename = "enum", default, skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<serde_json::Value>,
}

/// `additionalProperties` can be a boolean or a schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AdditionalProperties {
    Bool(bool),
    Schema(Box<SchemaOrRef>),
}

/// Borrowed, closed view over what a schema node describes.
///
/// Classification mirrors the order in which the resolver has to look at a
/// node: references first, then arrays, scalars (with enums carved out),
/// string-keyed maps, objects, and finally anything else.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SchemaKind<'a> {
    Reference(&'a str),
    Array(&'a SchemaOrRef),
    Enum {
        schema_type: SchemaType,
        values: &'a [serde_json::Value],
    },
    Primitive {
        schema_type: SchemaType,
        format: Option<&'a str>,
    },
    Map(&'a SchemaOrRef),
    Object(&'a IndexMap<String, SchemaOrRef>),
    Unknown,
}

impl SchemaOrRef {
    /// Classify this node.
    pub fn kind(&self) -> SchemaKind<'_> {
        match self {
            SchemaOrRef::Ref { ref_path } => SchemaKind::Reference(ref_path),
            SchemaOrRef::Schema(schema) => schema.kind(),
        }
    }

    /// Name of the `components.schemas` entry this node points at, if it is a
    /// well-formed local schema reference.
    pub fn reference_id(&self) -> Option<&str> {
        match self {
            SchemaOrRef::Ref { ref_path } => parse_ref_name(ref_path, "schemas").ok(),
            SchemaOrRef::Schema(_) => None,
        }
    }
}

impl Schema {
    pub fn kind(&self) -> SchemaKind<'_> {
        let schema_type = self.schema_type.as_ref().and_then(TypeSet::primary);

        match schema_type {
            Some(SchemaType::Array) => match self.items.as_deref() {
                Some(items) => SchemaKind::Array(items),
                None => SchemaKind::Unknown,
            },
            Some(SchemaType::Object) | None => {
                if schema_type.is_some()
                    && self.properties.is_empty()
                    && let Some(AdditionalProperties::Schema(values)) = &self.additional_properties
                {
                    return SchemaKind::Map(values);
                }
                if schema_type.is_some() || !self.properties.is_empty() {
                    SchemaKind::Object(&self.properties)
                } else {
                    SchemaKind::Unknown
                }
            }
            Some(scalar) if !self.enum_values.is_empty() => SchemaKind::Enum {
                schema_type: scalar,
                values: &self.enum_values,
            },
            Some(scalar) => SchemaKind::Primitive {
                schema_type: scalar,
                format: self.format.as_deref(),
            },
        }
    }
}
