use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::response::ResponseOrRef;
use super::schema::SchemaOrRef;

/// Components object holding reusable definitions. Only the sections the
/// generator reads are modelled.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Components {
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub schemas: IndexMap<String, SchemaOrRef>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub responses: IndexMap<String, ResponseOrRef>,
}
