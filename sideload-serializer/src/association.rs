use serde::{Deserialize, Serialize};

/// How an association appears in the serialized hash.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Embed {
    /// Only identifiers (`user_id`, `task_ids`).
    #[serde(alias = "id")]
    Ids,
    /// Full nested objects.
    #[default]
    Objects,
    /// Omitted from the hash.
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssociationKind {
    HasOne,
    HasMany,
}

/// Options attached to an association declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssociationOptions {
    /// Explicit key in the serialized hash.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub embed: Embed,
    /// Sideload the associated objects next to the primary root.
    pub include: bool,
    /// Targets vary in concrete type; references carry a `type`.
    pub polymorphic: bool,
    /// Root name for sideloaded objects. Defaults to the plural association name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,
    /// Attribute embedded as the identifier. Defaults to `id`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embed_key: Option<String>,
}

impl AssociationOptions {
    /// Embed identifiers only.
    pub fn ids() -> Self {
        Self {
            embed: Embed::Ids,
            ..Self::default()
        }
    }

    /// Embed full objects.
    pub fn objects() -> Self {
        Self::default()
    }

    /// Leave the association out of the hash.
    pub fn omitted() -> Self {
        Self {
            embed: Embed::None,
            ..Self::default()
        }
    }

    pub fn include(mut self, include: bool) -> Self {
        self.include = include;
        self
    }

    pub fn polymorphic(mut self) -> Self {
        self.polymorphic = true;
        self
    }

    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn root(mut self, root: impl Into<String>) -> Self {
        self.root = Some(root.into());
        self
    }

    pub fn embed_key(mut self, embed_key: impl Into<String>) -> Self {
        self.embed_key = Some(embed_key.into());
        self
    }
}

/// A declared association: name, kind and options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssociationDescriptor {
    pub name: String,
    pub kind: AssociationKind,
    #[serde(flatten)]
    pub options: AssociationOptions,
}

impl AssociationDescriptor {
    pub fn new(name: impl Into<String>, kind: AssociationKind, options: AssociationOptions) -> Self {
        Self {
            name: name.into(),
            kind,
            options,
        }
    }

    pub fn is_polymorphic(&self) -> bool {
        self.options.polymorphic
    }

    pub fn embeds_ids(&self) -> bool {
        self.options.embed == Embed::Ids
    }

    /// Whether associated objects are sideloaded. Only id embedding sideloads;
    /// embedded objects already carry everything.
    pub fn sideloads(&self) -> bool {
        self.options.include && self.embeds_ids()
    }

    /// Attribute used as the embedded identifier.
    pub fn embed_key(&self) -> &str {
        self.options.embed_key.as_deref().unwrap_or("id")
    }

    /// Root under which included objects are sideloaded.
    pub fn include_root(&self) -> String {
        match &self.options.root {
            Some(root) => root.clone(),
            None => match self.kind {
                AssociationKind::HasOne => sideload_types::inflect::pluralize(&self.name),
                AssociationKind::HasMany => self.name.clone(),
            },
        }
    }
}
