use super::operations::IrOperation;
use super::schemas::{IrEnum, IrModel};

/// The result of one generation pass: every generated type plus one method
/// stub per operation, in deterministic order.
#[derive(Debug, Clone)]
pub struct IrSpec {
    pub info: IrInfo,
    /// Enums in registration order.
    pub enums: Vec<IrEnum>,
    /// Models in registration order.
    pub models: Vec<IrModel>,
    /// Operations in document order.
    pub operations: Vec<IrOperation>,
}

impl IrSpec {
    /// Total number of generated named types.
    pub fn type_count(&self) -> usize {
        self.enums.len() + self.models.len()
    }

    pub fn find_model(&self, name: &str) -> Option<&IrModel> {
        self.models.iter().find(|m| m.name == name)
    }

    pub fn find_enum(&self, name: &str) -> Option<&IrEnum> {
        self.enums.iter().find(|e| e.name == name)
    }
}

/// API metadata.
#[derive(Debug, Clone)]
pub struct IrInfo {
    pub title: String,
    pub description: Option<String>,
    pub version: String,
}
