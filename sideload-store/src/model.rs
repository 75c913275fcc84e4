use serde::{Deserialize, Serialize};

use crate::StoreResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipKind {
    BelongsTo,
    HasMany,
}

/// A relationship declared on a model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    /// Name on the client side, camel case (`user`, `tasks`).
    pub name: String,
    pub kind: RelationshipKind,
    /// References carry `{id, type}` instead of a bare id.
    #[serde(default)]
    pub polymorphic: bool,
}

/// A client-side model: a type key and its relationships.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelType {
    type_key: String,
    #[serde(default)]
    relationships: Vec<Relationship>,
}

impl ModelType {
    pub fn new(type_key: impl Into<String>) -> Self {
        Self {
            type_key: type_key.into(),
            relationships: Vec::new(),
        }
    }

    pub fn from_json(json: &str) -> StoreResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn belongs_to(self, name: impl Into<String>) -> Self {
        self.relationship(name, RelationshipKind::BelongsTo, false)
    }

    pub fn belongs_to_polymorphic(self, name: impl Into<String>) -> Self {
        self.relationship(name, RelationshipKind::BelongsTo, true)
    }

    pub fn has_many(self, name: impl Into<String>) -> Self {
        self.relationship(name, RelationshipKind::HasMany, false)
    }

    pub fn has_many_polymorphic(self, name: impl Into<String>) -> Self {
        self.relationship(name, RelationshipKind::HasMany, true)
    }

    fn relationship(mut self, name: impl Into<String>, kind: RelationshipKind, polymorphic: bool) -> Self {
        self.relationships.push(Relationship {
            name: name.into(),
            kind,
            polymorphic,
        });
        self
    }

    pub fn type_key(&self) -> &str {
        &self.type_key
    }

    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }

    pub fn relationship_named(&self, name: &str) -> Option<&Relationship> {
        self.relationships.iter().find(|r| r.name == name)
    }
}
