use serde::{Deserialize, Serialize};

use crate::StoreResult;

/// Per-serializer settings, fixed when a
/// [`PayloadSerializer`](crate::PayloadSerializer) is built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SerializerConfig {
    /// Resolve record types from their own `type` field before the root name.
    pub polymorphic: bool,
    /// Type name reported as primary regardless of the requested model.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_type_name: Option<String>,
    /// Root key used when serializing a record back into a payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,
}

impl SerializerConfig {
    /// Root-name type resolution only.
    pub fn plain() -> Self {
        Self::default()
    }

    /// Type resolution that honours each record's `type` field.
    pub fn polymorphic() -> Self {
        Self {
            polymorphic: true,
            ..Self::default()
        }
    }

    pub fn with_primary_type_name(mut self, name: impl Into<String>) -> Self {
        self.primary_type_name = Some(name.into());
        self
    }

    pub fn with_root(mut self, root: impl Into<String>) -> Self {
        self.root = Some(root.into());
        self
    }

    pub fn from_json(json: &str) -> StoreResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
