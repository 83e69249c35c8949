use ocg_core::ir::{IrOperation, IrResponseBody, IrType};

use crate::sanitize::sanitize_identifier;

/// Map an `IrType` to its C# type syntax.
pub fn ir_type_to_csharp(ir_type: &IrType) -> String {
    match ir_type {
        IrType::Int32 => "int".to_string(),
        IrType::Int64 => "long".to_string(),
        IrType::Float => "float".to_string(),
        IrType::Double => "double".to_string(),
        IrType::Decimal => "decimal".to_string(),
        IrType::Boolean => "bool".to_string(),
        IrType::DateTime => "DateTime".to_string(),
        IrType::Date => "DateOnly".to_string(),
        IrType::Uuid => "Guid".to_string(),
        IrType::String => "string".to_string(),
        IrType::Any => "object".to_string(),
        IrType::Ref(name) => sanitize_identifier(name),
        IrType::Array(inner) => format!("List<{}>", ir_type_to_csharp(inner)),
        IrType::Map(value) => format!("Dictionary<string, {}>", ir_type_to_csharp(value)),
    }
}

/// The envelope a client method returns.
///
/// Without typed responses every method returns the plain `ApiResponse`.
pub fn envelope_type(op: &IrOperation, typed_responses: bool) -> String {
    if !typed_responses {
        return "ApiResponse".to_string();
    }
    match op.success_response().map(|r| &r.body) {
        Some(IrResponseBody::Json(body)) => format!("ApiResponse<{}>", ir_type_to_csharp(body)),
        Some(IrResponseBody::Binary) => "FileApiResponse".to_string(),
        None => "ApiResponse".to_string(),
    }
}
