use std::collections::HashSet;

use minijinja::context;
use ocg_core::GeneratorError;
use ocg_core::ir::{IrEnum, IrEnumKind, IrModel, IrSpec};

use super::render;
use crate::sanitize::sanitize_identifier;
use crate::type_mapper::ir_type_to_csharp;

/// Emit `ApiModels.g.cs`: every enum, then every model, in registration
/// order.
pub fn emit_models(ir: &IrSpec, namespace: &str) -> Result<String, GeneratorError> {
    let enums: Vec<minijinja::Value> = ir.enums.iter().map(enum_to_ctx).collect();
    let models: Vec<minijinja::Value> = ir.models.iter().map(model_to_ctx).collect();

    render(
        "models.cs.j2",
        include_str!("../../templates/models.cs.j2"),
        context! {
            namespace => namespace,
            enums => enums,
            models => models,
        },
    )
}

fn enum_to_ctx(e: &IrEnum) -> minijinja::Value {
    let members: Vec<minijinja::Value> = e
        .members
        .iter()
        .map(|m| {
            context! {
                name => sanitize_identifier(&m.name),
                value => m.value.clone(),
            }
        })
        .collect();

    let integer = e.kind == IrEnumKind::Integer;
    // Values outside the `int` range need a `long` backing type.
    let backing = if integer && e.members.iter().any(|m| m.value.parse::<i32>().is_err()) {
        " : long"
    } else {
        ""
    };

    context! {
        name => sanitize_identifier(&e.name),
        integer => integer,
        backing => backing,
        members => members,
    }
}

fn model_to_ctx(model: &IrModel) -> minijinja::Value {
    let class_name = sanitize_identifier(&model.name);
    let mut used = HashSet::new();
    let fields: Vec<minijinja::Value> = model
        .fields
        .iter()
        .map(|f| {
            context! {
                name => member_name(&class_name, &f.name, &mut used),
                json_name => f.original_name.clone(),
                type_name => ir_type_to_csharp(&f.field_type),
            }
        })
        .collect();

    context! {
        name => class_name,
        fields => fields,
    }
}

/// A property identifier that C# accepts inside `class_name`: never empty,
/// never the enclosing type's own name, and unique within the class.
fn member_name(class_name: &str, field: &str, used: &mut HashSet<String>) -> String {
    let mut base = sanitize_identifier(field);
    if base.is_empty() {
        base = "Value".to_string();
    } else if base == class_name {
        base.push_str("Value");
    }

    let mut name = base.clone();
    let mut suffix = 2usize;
    while name == class_name || used.contains(&name) {
        name = format!("{base}{suffix}");
        suffix += 1;
    }
    used.insert(name.clone());
    name
}
