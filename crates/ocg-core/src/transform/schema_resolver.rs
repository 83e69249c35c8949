use crate::config::CollisionStrategy;
use crate::ir::{IrEnumKind, IrEnumMember, IrField, IrType};
use crate::parse::ref_resolve::RefResolver;
use crate::parse::schema::{SchemaKind, SchemaOrRef, SchemaType};

use super::name_normalizer::normalize;
use super::registry::{NameClaim, TypeRegistry};

/// Maps schemas to type references, generating named models and enums into a
/// [`TypeRegistry`] as it goes.
///
/// Types are named after the use site: the candidate name passed down is a
/// component name, a property name, or a name derived from the request path.
/// The registry is consulted before anything is generated, which is also what
/// terminates recursion on self-referential schemas.
#[derive(Debug, Clone, Copy)]
pub struct SchemaResolver<'a> {
    refs: RefResolver<'a>,
    strategy: CollisionStrategy,
}

impl<'a> SchemaResolver<'a> {
    pub fn new(refs: RefResolver<'a>, strategy: CollisionStrategy) -> Self {
        Self { refs, strategy }
    }

    /// Resolve `schema` to a type reference, naming any generated type after
    /// `candidate`.
    pub fn resolve(
        &self,
        schema: &'a SchemaOrRef,
        candidate: &str,
        registry: &mut TypeRegistry,
    ) -> IrType {
        let mut chain = Vec::new();
        self.resolve_node(schema, candidate, registry, &mut chain)
    }

    /// `chain` holds the references followed since the nearest enclosing
    /// named type. Revisiting one means the loop never passes through a
    /// model or enum and would recurse forever.
    fn resolve_node(
        &self,
        schema: &'a SchemaOrRef,
        candidate: &str,
        registry: &mut TypeRegistry,
        chain: &mut Vec<&'a str>,
    ) -> IrType {
        let name = normalize(candidate);
        if let Some(existing) = self.memoized(schema, &name, registry) {
            return IrType::Ref(existing);
        }

        match schema.kind() {
            SchemaKind::Reference(ref_path) => {
                self.resolve_reference(ref_path, candidate, registry, chain)
            }
            SchemaKind::Array(items) => {
                let element =
                    self.resolve_node(items, child_candidate(items, candidate), registry, chain);
                IrType::Array(Box::new(element))
            }
            SchemaKind::Enum {
                schema_type,
                values,
            } => self.generate_enum(schema, name, schema_type, values, registry),
            SchemaKind::Primitive {
                schema_type,
                format,
            } => map_primitive(schema_type, format),
            SchemaKind::Map(values) => {
                let value =
                    self.resolve_node(values, child_candidate(values, candidate), registry, chain);
                IrType::Map(Box::new(value))
            }
            SchemaKind::Object(properties) => {
                self.generate_model(schema, name, properties, registry)
            }
            SchemaKind::Unknown => IrType::Any,
        }
    }

    fn resolve_reference(
        &self,
        ref_path: &'a str,
        candidate: &str,
        registry: &mut TypeRegistry,
        chain: &mut Vec<&'a str>,
    ) -> IrType {
        if chain.contains(&ref_path) {
            log::warn!("reference cycle through {ref_path} has no named type, using an untyped value");
            return IrType::Any;
        }
        let target = match self.refs.schema(ref_path) {
            Ok(target) => target,
            Err(e) => {
                log::warn!("{e}, using an untyped value");
                return IrType::Any;
            }
        };
        chain.push(ref_path);
        let resolved = self.resolve_node(target, candidate, registry, chain);
        chain.pop();
        resolved
    }

    fn generate_enum(
        &self,
        schema: &'a SchemaOrRef,
        name: String,
        schema_type: SchemaType,
        values: &[serde_json::Value],
        registry: &mut TypeRegistry,
    ) -> IrType {
        let name = match self.claim(schema, name, registry) {
            NameClaim::Existing(existing) => return IrType::Ref(existing),
            NameClaim::Fresh(name) => name,
        };

        let kind = match schema_type {
            SchemaType::Integer => IrEnumKind::Integer,
            _ => IrEnumKind::String,
        };
        let mut members: Vec<IrEnumMember> = Vec::with_capacity(values.len());
        for value in values {
            let Some((member, literal)) = enum_member(kind, value) else {
                if !value.is_null() {
                    log::warn!("skipping enum value {value} of {name}: not a {kind:?} literal");
                }
                continue;
            };
            if member.is_empty() || members.iter().any(|m| m.name == member) {
                log::warn!("skipping enum value {literal:?} of {name}: no distinct member name");
                continue;
            }
            members.push(IrEnumMember {
                name: member,
                value: literal,
            });
        }

        registry.register_enum(&name, kind, members);
        self.record_fingerprint(schema, &name, registry);
        IrType::Ref(name)
    }

    fn generate_model(
        &self,
        schema: &'a SchemaOrRef,
        name: String,
        properties: &'a indexmap::IndexMap<String, SchemaOrRef>,
        registry: &mut TypeRegistry,
    ) -> IrType {
        let name = match self.claim(schema, name, registry) {
            NameClaim::Existing(existing) => return IrType::Ref(existing),
            NameClaim::Fresh(name) => name,
        };

        // Reserve first so properties that lead back here resolve to `name`.
        registry.reserve_model(&name);
        self.record_fingerprint(schema, &name, registry);

        let fields = properties
            .iter()
            .map(|(prop_name, prop)| {
                let mut chain = Vec::new();
                let candidate = prop.reference_id().unwrap_or(prop_name);
                IrField {
                    name: normalize(prop_name),
                    original_name: prop_name.clone(),
                    field_type: self.resolve_node(prop, candidate, registry, &mut chain),
                }
            })
            .collect();

        registry.register_model(&name, fields);
        IrType::Ref(name)
    }

    fn memoized(&self, schema: &'a SchemaOrRef, name: &str, registry: &TypeRegistry) -> Option<String> {
        match self.strategy {
            CollisionStrategy::Merge => registry.contains(name).then(|| name.to_string()),
            CollisionStrategy::Disambiguate => {
                if !registry.contains(name) {
                    return None;
                }
                registry.lookup(name, &self.fingerprint(schema))
            }
        }
    }

    fn claim(&self, schema: &'a SchemaOrRef, name: String, registry: &TypeRegistry) -> NameClaim {
        match self.strategy {
            CollisionStrategy::Merge => NameClaim::Fresh(name),
            CollisionStrategy::Disambiguate => registry.claim(&name, &self.fingerprint(schema)),
        }
    }

    fn record_fingerprint(&self, schema: &'a SchemaOrRef, name: &str, registry: &mut TypeRegistry) {
        if self.strategy == CollisionStrategy::Disambiguate {
            registry.set_fingerprint(name, self.fingerprint(schema));
        }
    }

    /// Structural identity of a schema: its serialized form after following
    /// references. Nested references are compared by path, not expanded.
    fn fingerprint(&self, schema: &'a SchemaOrRef) -> String {
        let mut current = schema;
        let mut seen: Vec<&str> = Vec::new();
        while let SchemaOrRef::Ref { ref_path } = current {
            if seen.contains(&ref_path.as_str()) {
                break;
            }
            seen.push(ref_path);
            match self.refs.schema(ref_path) {
                Ok(target) => current = target,
                Err(_) => break,
            }
        }
        serde_json::to_string(current).unwrap_or_default()
    }
}

/// Member name and wire literal for one enum value, if it fits the enum's
/// kind. Negative integers get a `Minus` prefix so `-1` and `1` stay distinct.
fn enum_member(kind: IrEnumKind, value: &serde_json::Value) -> Option<(String, String)> {
    match (kind, value) {
        (IrEnumKind::String, serde_json::Value::String(s)) => Some((normalize(s), s.clone())),
        (IrEnumKind::Integer, serde_json::Value::Number(n)) => {
            let n = n.as_i64()?;
            let member = if n < 0 {
                format!("Minus{}", n.unsigned_abs())
            } else {
                n.to_string()
            };
            Some((member, n.to_string()))
        }
        _ => None,
    }
}

/// Candidate name for a nested schema: its component name when it is a
/// reference, otherwise the enclosing candidate.
fn child_candidate<'s>(child: &'s SchemaOrRef, candidate: &'s str) -> &'s str {
    child.reference_id().unwrap_or(candidate)
}

/// Map a scalar `type`/`format` pair to a type reference.
pub fn map_primitive(schema_type: SchemaType, format: Option<&str>) -> IrType {
    match (schema_type, format) {
        (SchemaType::Integer, Some("int64")) => IrType::Int64,
        (SchemaType::Integer, _) => IrType::Int32,
        (SchemaType::Number, Some("float")) => IrType::Float,
        (SchemaType::Number, Some("decimal")) => IrType::Decimal,
        (SchemaType::Number, _) => IrType::Double,
        (SchemaType::Boolean, _) => IrType::Boolean,
        (SchemaType::String, Some("date-time")) => IrType::DateTime,
        (SchemaType::String, Some("date")) => IrType::Date,
        (SchemaType::String, Some("uuid")) => IrType::Uuid,
        (SchemaType::String, _) => IrType::String,
        _ => IrType::Any,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;
    use crate::parse::spec::OpenApiSpec;

    fn spec(components: &str) -> OpenApiSpec {
        let yaml = format!(
            "openapi: 3.0.3\ninfo:\n  title: T\n  version: '1'\npaths: {{}}\ncomponents:\n  schemas:\n{components}"
        );
        parse::from_yaml(&yaml).unwrap()
    }

    fn schema(yaml: &str) -> SchemaOrRef {
        serde_yaml_ng::from_str(yaml).unwrap()
    }

    fn component<'a>(spec: &'a OpenApiSpec, name: &str) -> &'a SchemaOrRef {
        &spec.components.as_ref().unwrap().schemas[name]
    }

    #[test]
    fn test_primitive_table() {
        use SchemaType::*;
        assert_eq!(map_primitive(Integer, None), IrType::Int32);
        assert_eq!(map_primitive(Integer, Some("int32")), IrType::Int32);
        assert_eq!(map_primitive(Integer, Some("int64")), IrType::Int64);
        assert_eq!(map_primitive(Number, Some("float")), IrType::Float);
        assert_eq!(map_primitive(Number, Some("double")), IrType::Double);
        assert_eq!(map_primitive(Number, None), IrType::Double);
        assert_eq!(map_primitive(Number, Some("decimal")), IrType::Decimal);
        assert_eq!(map_primitive(Boolean, None), IrType::Boolean);
        assert_eq!(map_primitive(String, Some("date-time")), IrType::DateTime);
        assert_eq!(map_primitive(String, Some("date")), IrType::Date);
        assert_eq!(map_primitive(String, Some("uuid")), IrType::Uuid);
        assert_eq!(map_primitive(String, Some("email")), IrType::String);
        assert_eq!(map_primitive(Null, None), IrType::Any);
    }

    #[test]
    fn test_primitive_creates_no_entry() {
        let spec = spec("    Unused:\n      type: object\n");
        let resolver = SchemaResolver::new(RefResolver::new(&spec), CollisionStrategy::Merge);
        let mut registry = TypeRegistry::new();
        let s = schema("type: string\nformat: uuid");
        assert_eq!(resolver.resolve(&s, "id", &mut registry), IrType::Uuid);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_array_and_map_wrap_without_entries() {
        let spec = spec("    Unused:\n      type: object\n");
        let resolver = SchemaResolver::new(RefResolver::new(&spec), CollisionStrategy::Merge);
        let mut registry = TypeRegistry::new();

        let array = schema("type: array\nitems:\n  type: integer\n  format: int64");
        assert_eq!(
            resolver.resolve(&array, "ids", &mut registry),
            IrType::Array(Box::new(IrType::Int64))
        );

        let map = schema("type: object\nadditionalProperties:\n  type: boolean");
        assert_eq!(
            resolver.resolve(&map, "flags", &mut registry),
            IrType::Map(Box::new(IrType::Boolean))
        );
        assert!(registry.is_empty());
    }

    #[test]
    fn test_array_of_reference_uses_component_name() {
        let spec = spec("    Pet:\n      type: object\n      properties:\n        name:\n          type: string\n");
        let resolver = SchemaResolver::new(RefResolver::new(&spec), CollisionStrategy::Merge);
        let mut registry = TypeRegistry::new();
        let s = schema("type: array\nitems:\n  $ref: '#/components/schemas/Pet'");

        let resolved = resolver.resolve(&s, "_pets", &mut registry);
        assert_eq!(resolved, IrType::Array(Box::new(IrType::Ref("Pet".into()))));
        assert!(registry.has_model("Pet"));
        assert!(!registry.has_model("Pets"));
    }

    #[test]
    fn test_inline_array_items_use_enclosing_candidate() {
        let spec = spec("    Unused:\n      type: object\n");
        let resolver = SchemaResolver::new(RefResolver::new(&spec), CollisionStrategy::Merge);
        let mut registry = TypeRegistry::new();
        let s = schema("type: array\nitems:\n  type: object\n  properties:\n    id:\n      type: integer");

        let resolved = resolver.resolve(&s, "line-items", &mut registry);
        assert_eq!(
            resolved,
            IrType::Array(Box::new(IrType::Ref("LineItems".into())))
        );
    }

    #[test]
    fn test_self_reference_terminates() {
        let spec = spec(concat!(
            "    Node:\n",
            "      type: object\n",
            "      properties:\n",
            "        value:\n",
            "          type: string\n",
            "        next:\n",
            "          $ref: '#/components/schemas/Node'\n",
            "        children:\n",
            "          type: array\n",
            "          items:\n",
            "            $ref: '#/components/schemas/Node'\n",
        ));
        let resolver = SchemaResolver::new(RefResolver::new(&spec), CollisionStrategy::Merge);
        let mut registry = TypeRegistry::new();

        let resolved = resolver.resolve(component(&spec, "Node"), "Node", &mut registry);
        assert_eq!(resolved, IrType::Ref("Node".into()));
        assert_eq!(registry.len(), 1);

        let (_, models) = registry.into_parts();
        let node = &models[0];
        assert_eq!(node.fields[1].field_type, IrType::Ref("Node".into()));
        assert_eq!(
            node.fields[2].field_type,
            IrType::Array(Box::new(IrType::Ref("Node".into())))
        );
    }

    #[test]
    fn test_mutual_reference_terminates() {
        let spec = spec(concat!(
            "    Owner:\n",
            "      type: object\n",
            "      properties:\n",
            "        pet:\n",
            "          $ref: '#/components/schemas/Pet'\n",
            "    Pet:\n",
            "      type: object\n",
            "      properties:\n",
            "        owner:\n",
            "          $ref: '#/components/schemas/Owner'\n",
        ));
        let resolver = SchemaResolver::new(RefResolver::new(&spec), CollisionStrategy::Merge);
        let mut registry = TypeRegistry::new();

        resolver.resolve(component(&spec, "Owner"), "Owner", &mut registry);
        let (_, models) = registry.into_parts();
        let names: Vec<&str> = models.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Owner", "Pet"]);
        assert_eq!(models[1].fields[0].field_type, IrType::Ref("Owner".into()));
    }

    #[test]
    fn test_reference_loop_without_named_type_is_any() {
        let spec = spec(concat!(
            "    A:\n",
            "      $ref: '#/components/schemas/B'\n",
            "    B:\n",
            "      $ref: '#/components/schemas/A'\n",
        ));
        let resolver = SchemaResolver::new(RefResolver::new(&spec), CollisionStrategy::Merge);
        let mut registry = TypeRegistry::new();
        let s = schema("$ref: '#/components/schemas/A'");
        assert_eq!(resolver.resolve(&s, "A", &mut registry), IrType::Any);
    }

    #[test]
    fn test_recursive_array_alias_is_any_inside() {
        let spec = spec(concat!(
            "    Tree:\n",
            "      type: array\n",
            "      items:\n",
            "        $ref: '#/components/schemas/Tree'\n",
        ));
        let resolver = SchemaResolver::new(RefResolver::new(&spec), CollisionStrategy::Merge);
        let mut registry = TypeRegistry::new();
        let s = schema("$ref: '#/components/schemas/Tree'");
        assert_eq!(
            resolver.resolve(&s, "Tree", &mut registry),
            IrType::Array(Box::new(IrType::Any))
        );
    }

    #[test]
    fn test_dangling_reference_is_any() {
        let spec = spec("    Unused:\n      type: object\n");
        let resolver = SchemaResolver::new(RefResolver::new(&spec), CollisionStrategy::Merge);
        let mut registry = TypeRegistry::new();
        let s = schema("$ref: '#/components/schemas/Missing'");
        assert_eq!(resolver.resolve(&s, "Missing", &mut registry), IrType::Any);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_enum_members_normalized() {
        let spec = spec("    Unused:\n      type: object\n");
        let resolver = SchemaResolver::new(RefResolver::new(&spec), CollisionStrategy::Merge);
        let mut registry = TypeRegistry::new();
        let s = schema("type: string\nenum: [in-stock, sold_out, in_stock, null]");

        assert_eq!(
            resolver.resolve(&s, "stock-state", &mut registry),
            IrType::Ref("StockState".into())
        );
        let (enums, _) = registry.into_parts();
        let members: Vec<(&str, &str)> = enums[0]
            .members
            .iter()
            .map(|m| (m.name.as_str(), m.value.as_str()))
            .collect();
        assert_eq!(members, vec![("InStock", "in-stock"), ("SoldOut", "sold_out")]);
        assert_eq!(enums[0].kind, IrEnumKind::String);
    }

    #[test]
    fn test_integer_enum_keeps_values() {
        let spec = spec("    Unused:\n      type: object\n");
        let resolver = SchemaResolver::new(RefResolver::new(&spec), CollisionStrategy::Merge);
        let mut registry = TypeRegistry::new();
        let s = schema("type: integer\nenum: [1, 2, -1, 2.5, high]");

        assert_eq!(
            resolver.resolve(&s, "priority", &mut registry),
            IrType::Ref("Priority".into())
        );
        let (enums, _) = registry.into_parts();
        assert_eq!(enums[0].kind, IrEnumKind::Integer);
        let members: Vec<(&str, &str)> = enums[0]
            .members
            .iter()
            .map(|m| (m.name.as_str(), m.value.as_str()))
            .collect();
        assert_eq!(members, vec![("1", "1"), ("2", "2"), ("Minus1", "-1")]);
    }

    #[test]
    fn test_string_enum_drops_non_string_literals() {
        let spec = spec("    Unused:\n      type: object\n");
        let resolver = SchemaResolver::new(RefResolver::new(&spec), CollisionStrategy::Merge);
        let mut registry = TypeRegistry::new();
        let s = schema("type: string\nenum: [low, 2, true]");

        resolver.resolve(&s, "level", &mut registry);
        let (enums, _) = registry.into_parts();
        assert_eq!(enums[0].members.len(), 1);
        assert_eq!(enums[0].members[0].value, "low");
    }

    #[test]
    fn test_same_name_merges_in_default_strategy() {
        let spec = spec("    Unused:\n      type: object\n");
        let resolver = SchemaResolver::new(RefResolver::new(&spec), CollisionStrategy::Merge);
        let mut registry = TypeRegistry::new();
        let first = schema("type: object\nproperties:\n  a:\n    type: string");
        let second = schema("type: object\nproperties:\n  b:\n    type: integer");

        assert_eq!(resolver.resolve(&first, "items", &mut registry), IrType::Ref("Items".into()));
        assert_eq!(resolver.resolve(&second, "items", &mut registry), IrType::Ref("Items".into()));
        let (_, models) = registry.into_parts();
        assert_eq!(models.len(), 1);
        assert_eq!(models[0].fields[0].name, "A");
    }

    #[test]
    fn test_memo_applies_before_array_wrapping() {
        let spec = spec("    Unused:\n      type: object\n");
        let resolver = SchemaResolver::new(RefResolver::new(&spec), CollisionStrategy::Merge);
        let mut registry = TypeRegistry::new();
        let object = schema("type: object\nproperties:\n  a:\n    type: string");
        let array = schema("type: array\nitems:\n  type: string");

        resolver.resolve(&object, "tags", &mut registry);
        assert_eq!(resolver.resolve(&array, "tags", &mut registry), IrType::Ref("Tags".into()));
    }

    #[test]
    fn test_disambiguate_suffixes_different_shapes() {
        let spec = spec("    Unused:\n      type: object\n");
        let resolver =
            SchemaResolver::new(RefResolver::new(&spec), CollisionStrategy::Disambiguate);
        let mut registry = TypeRegistry::new();
        let first = schema("type: object\nproperties:\n  a:\n    type: string");
        let second = schema("type: object\nproperties:\n  b:\n    type: integer");
        let first_again = schema("type: object\nproperties:\n  a:\n    type: string");

        assert_eq!(resolver.resolve(&first, "items", &mut registry), IrType::Ref("Items".into()));
        assert_eq!(resolver.resolve(&second, "items", &mut registry), IrType::Ref("Items2".into()));
        assert_eq!(
            resolver.resolve(&first_again, "items", &mut registry),
            IrType::Ref("Items".into())
        );
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_disambiguate_keeps_self_reference() {
        let spec = spec(concat!(
            "    Node:\n",
            "      type: object\n",
            "      properties:\n",
            "        next:\n",
            "          $ref: '#/components/schemas/Node'\n",
        ));
        let resolver =
            SchemaResolver::new(RefResolver::new(&spec), CollisionStrategy::Disambiguate);
        let mut registry = TypeRegistry::new();

        resolver.resolve(component(&spec, "Node"), "Node", &mut registry);
        let (_, models) = registry.into_parts();
        assert_eq!(models.len(), 1);
        assert_eq!(models[0].fields[0].field_type, IrType::Ref("Node".into()));
    }

    #[test]
    fn test_disambiguate_does_not_collapse_array_onto_model() {
        let spec = spec("    Unused:\n      type: object\n");
        let resolver =
            SchemaResolver::new(RefResolver::new(&spec), CollisionStrategy::Disambiguate);
        let mut registry = TypeRegistry::new();
        let object = schema("type: object\nproperties:\n  a:\n    type: string");
        let array = schema("type: array\nitems:\n  type: string");

        resolver.resolve(&object, "tags", &mut registry);
        assert_eq!(
            resolver.resolve(&array, "tags", &mut registry),
            IrType::Array(Box::new(IrType::String))
        );
    }

    #[test]
    fn test_unknown_is_any() {
        let spec = spec("    Unused:\n      type: object\n");
        let resolver = SchemaResolver::new(RefResolver::new(&spec), CollisionStrategy::Merge);
        let mut registry = TypeRegistry::new();
        let s = schema("oneOf:\n  - type: string\n  - type: integer");
        assert_eq!(resolver.resolve(&s, "choice", &mut registry), IrType::Any);
    }
}
