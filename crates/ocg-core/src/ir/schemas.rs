use std::fmt;

/// A generated model: a named record type with ordered fields.
#[derive(Debug, Clone, PartialEq)]
pub struct IrModel {
    pub name: String,
    pub fields: Vec<IrField>,
}

/// A field on a generated model.
#[derive(Debug, Clone, PartialEq)]
pub struct IrField {
    /// Normalized member name.
    pub name: String,
    /// Property name as written in the document, used for serialization.
    pub original_name: String,
    pub field_type: IrType,
}

/// A generated enum.
#[derive(Debug, Clone, PartialEq)]
pub struct IrEnum {
    pub name: String,
    pub kind: IrEnumKind,
    pub members: Vec<IrEnumMember>,
}

/// How enum members travel on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IrEnumKind {
    /// Members serialize as their string literal.
    String,
    /// Members serialize as their integer value.
    Integer,
}

/// One enum member.
#[derive(Debug, Clone, PartialEq)]
pub struct IrEnumMember {
    /// Normalized member name.
    pub name: String,
    /// Literal value as written in the document.
    pub value: String,
}

/// A resolved type reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IrType {
    Int32,
    Int64,
    Float,
    Double,
    Decimal,
    Boolean,
    DateTime,
    Date,
    Uuid,
    String,
    Array(Box<IrType>),
    Map(Box<IrType>), // string-keyed
    Ref(String),      // generated model or enum name
    Any,
}

impl fmt::Display for IrType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IrType::Int32 => f.write_str("int32"),
            IrType::Int64 => f.write_str("int64"),
            IrType::Float => f.write_str("float"),
            IrType::Double => f.write_str("double"),
            IrType::Decimal => f.write_str("decimal"),
            IrType::Boolean => f.write_str("boolean"),
            IrType::DateTime => f.write_str("date-time"),
            IrType::Date => f.write_str("date"),
            IrType::Uuid => f.write_str("uuid"),
            IrType::String => f.write_str("string"),
            IrType::Array(inner) => write!(f, "array<{inner}>"),
            IrType::Map(inner) => write!(f, "map<string, {inner}>"),
            IrType::Ref(name) => f.write_str(name),
            IrType::Any => f.write_str("any"),
        }
    }
}
