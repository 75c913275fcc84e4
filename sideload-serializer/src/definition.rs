use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{
    AssociationDescriptor, AssociationKind, AssociationOptions, SerializerError, SerializerResult,
};

/// Declares which attributes and associations a resource exposes.
///
/// Built once through [`SerializerDefinition::builder`] or loaded with
/// [`SerializerDefinition::from_json`]; read-only afterwards. Deserializing
/// through any serde entry point validates the definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDefinition")]
pub struct SerializerDefinition {
    root: String,
    attributes: Vec<String>,
    associations: Vec<AssociationDescriptor>,
}

/// Unvalidated wire form of a [`SerializerDefinition`].
#[derive(Deserialize)]
struct RawDefinition {
    root: String,
    #[serde(default)]
    attributes: Vec<String>,
    #[serde(default)]
    associations: Vec<AssociationDescriptor>,
}

impl TryFrom<RawDefinition> for SerializerDefinition {
    type Error = SerializerError;

    fn try_from(raw: RawDefinition) -> SerializerResult<Self> {
        let definition = Self {
            root: raw.root,
            attributes: raw.attributes,
            associations: raw.associations,
        };
        definition.validate()?;
        Ok(definition)
    }
}

impl SerializerDefinition {
    /// Starts a definition rendered under `root` (e.g. `calendar_day`).
    pub fn builder(root: impl Into<String>) -> SerializerDefinitionBuilder {
        SerializerDefinitionBuilder {
            definition: Self {
                root: root.into(),
                attributes: Vec::new(),
                associations: Vec::new(),
            },
        }
    }

    /// Loads and validates a definition from JSON.
    pub fn from_json(json: &str) -> SerializerResult<Self> {
        let raw: RawDefinition = serde_json::from_str(json)?;
        Self::try_from(raw)
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }

    pub fn associations(&self) -> &[AssociationDescriptor] {
        &self.associations
    }

    pub fn association(&self, name: &str) -> Option<&AssociationDescriptor> {
        self.associations.iter().find(|a| a.name == name)
    }

    fn validate(&self) -> SerializerResult<()> {
        if self.root.is_empty() {
            return Err(SerializerError::InvalidDefinition("root is required".into()));
        }
        let mut seen = HashSet::new();
        let names = self
            .attributes
            .iter()
            .chain(self.associations.iter().map(|a| &a.name));
        for name in names {
            if name.is_empty() {
                return Err(SerializerError::InvalidDefinition(format!(
                    "{}: empty attribute or association name",
                    self.root
                )));
            }
            if !seen.insert(name.as_str()) {
                return Err(SerializerError::InvalidDefinition(format!(
                    "{}: `{name}` declared twice",
                    self.root
                )));
            }
        }
        Ok(())
    }
}

/// Accumulates attributes and associations for a [`SerializerDefinition`].
#[derive(Debug, Clone)]
pub struct SerializerDefinitionBuilder {
    definition: SerializerDefinition,
}

impl SerializerDefinitionBuilder {
    pub fn attribute(mut self, name: impl Into<String>) -> Self {
        self.definition.attributes.push(name.into());
        self
    }

    pub fn attributes<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.definition
            .attributes
            .extend(names.into_iter().map(Into::into));
        self
    }

    pub fn has_one(mut self, name: impl Into<String>, options: AssociationOptions) -> Self {
        self.definition.associations.push(AssociationDescriptor::new(
            name,
            AssociationKind::HasOne,
            options,
        ));
        self
    }

    pub fn has_many(mut self, name: impl Into<String>, options: AssociationOptions) -> Self {
        self.definition.associations.push(AssociationDescriptor::new(
            name,
            AssociationKind::HasMany,
            options,
        ));
        self
    }

    pub fn build(self) -> SerializerResult<SerializerDefinition> {
        self.definition.validate()?;
        Ok(self.definition)
    }
}
