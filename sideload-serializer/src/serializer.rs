//! Rendering objects into root-keyed documents.

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde_json::Value;
use sideload_types::{Hash, coerce_id, demodulize, inflect};
use tracing::{debug, warn};

use crate::embedding::{AssociationEmbedding, PolymorphicEmbedding, StandardEmbedding, type_name_of};
use crate::model::Model;
use crate::{AssociationDescriptor, AssociationKind, Embed, SerializerDefinition};

/// Renders objects according to a [`SerializerDefinition`].
///
/// The embedding strategy is fixed at construction: [`Serializer::new`]
/// uses [`PolymorphicEmbedding`] over [`StandardEmbedding`], so associations
/// declared polymorphic serialize as `{id, type}` references.
pub struct Serializer {
    definition: SerializerDefinition,
    embedding: Box<dyn AssociationEmbedding + Send + Sync>,
}

impl fmt::Debug for Serializer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Serializer")
            .field("definition", &self.definition)
            .finish_non_exhaustive()
    }
}

impl Serializer {
    pub fn new(definition: SerializerDefinition) -> Self {
        Self::with_embedding(definition, PolymorphicEmbedding::new(StandardEmbedding))
    }

    /// Uses a custom embedding strategy, e.g. [`StandardEmbedding`] alone to
    /// ignore polymorphism.
    pub fn with_embedding<E>(definition: SerializerDefinition, embedding: E) -> Self
    where
        E: AssociationEmbedding + Send + Sync + 'static,
    {
        Self {
            definition,
            embedding: Box::new(embedding),
        }
    }

    pub fn definition(&self) -> &SerializerDefinition {
        &self.definition
    }

    /// Attributes in declared order, then associations per their embedding.
    pub fn serializable_hash(&self, object: &dyn Model, registry: &SerializerRegistry) -> Hash {
        let mut hash = Hash::new();
        for attribute in self.definition.attributes() {
            hash.insert(attribute.clone(), object.read_attribute(attribute));
        }
        for association in self.definition.associations() {
            let items = associated(object, association);
            let value = match association.options.embed {
                Embed::None => continue,
                Embed::Ids => self.embedding.serialize_ids(association, &items),
                Embed::Objects => {
                    let mut rendered = items
                        .iter()
                        .map(|item| render_associated(*item, association, registry));
                    match association.kind {
                        AssociationKind::HasOne => rendered.next().unwrap_or(Value::Null),
                        AssociationKind::HasMany => Value::Array(rendered.collect()),
                    }
                }
            };
            hash.insert(self.embedding.key(association), value);
        }
        hash
    }

    /// `{ <root>: hash, <included root>: [...] }` for a single object.
    pub fn as_json(&self, object: &dyn Model, registry: &SerializerRegistry) -> Value {
        let root = self.definition.root();
        let mut sideloads = Sideloads::default();
        if let Some(id) = coerce_id(&object.id()) {
            sideloads.seen.insert((inflect::pluralize(root), id));
        }

        let mut document = Hash::new();
        document.insert(
            root.to_string(),
            Value::Object(self.serializable_hash(object, registry)),
        );
        self.collect_included(object, registry, &mut sideloads);
        sideloads.merge_into(&mut document);
        Value::Object(document)
    }

    /// `{ <plural root>: [...], <included root>: [...] }` for a collection.
    pub fn array_as_json(&self, objects: &[&dyn Model], registry: &SerializerRegistry) -> Value {
        let root = inflect::pluralize(self.definition.root());
        let mut sideloads = Sideloads::default();
        for object in objects {
            if let Some(id) = coerce_id(&object.id()) {
                sideloads.seen.insert((root.clone(), id));
            }
        }

        let hashes = objects
            .iter()
            .map(|object| Value::Object(self.serializable_hash(*object, registry)))
            .collect();
        let mut document = Hash::new();
        document.insert(root, Value::Array(hashes));
        for object in objects {
            self.collect_included(*object, registry, &mut sideloads);
        }
        sideloads.merge_into(&mut document);
        Value::Object(document)
    }

    fn collect_included(
        &self,
        object: &dyn Model,
        registry: &SerializerRegistry,
        sideloads: &mut Sideloads,
    ) {
        for association in self.definition.associations() {
            if !association.sideloads() {
                continue;
            }
            let root = association.include_root();
            for item in associated(object, association) {
                if let Some(id) = coerce_id(&item.id()) {
                    if !sideloads.seen.insert((root.clone(), id)) {
                        continue;
                    }
                }
                sideloads.push(&root, render_associated(item, association, registry));
                if let Some(serializer) = registry.serializer_for(item) {
                    serializer.collect_included(item, registry, sideloads);
                }
            }
        }
    }
}

fn associated<'a>(object: &'a dyn Model, association: &AssociationDescriptor) -> Vec<&'a dyn Model> {
    match association.kind {
        AssociationKind::HasOne => object.association_one(&association.name).into_iter().collect(),
        AssociationKind::HasMany => object.association_many(&association.name),
    }
}

/// Full representation of an associated object. Polymorphic associations
/// tag every object with its unqualified type.
fn render_associated(
    item: &dyn Model,
    association: &AssociationDescriptor,
    registry: &SerializerRegistry,
) -> Value {
    let mut hash = match registry.serializer_for(item) {
        Some(serializer) => serializer.serializable_hash(item, registry),
        None => item.attributes(),
    };
    if association.is_polymorphic() {
        hash.insert("type".into(), Value::String(type_name_of(item)));
    }
    Value::Object(hash)
}

/// Included objects grouped by root, deduplicated by `(root, id)`.
#[derive(Default)]
struct Sideloads {
    roots: Vec<(String, Vec<Value>)>,
    seen: HashSet<(String, String)>,
}

impl Sideloads {
    fn push(&mut self, root: &str, value: Value) {
        match self.roots.iter_mut().find(|(name, _)| name == root) {
            Some((_, items)) => items.push(value),
            None => self.roots.push((root.to_string(), vec![value])),
        }
    }

    fn merge_into(self, document: &mut Hash) {
        for (root, items) in self.roots {
            if document.contains_key(&root) {
                warn!("Included root `{}` collides with the primary root; dropping {} objects", root, items.len());
                continue;
            }
            debug!("Sideloading {} objects under `{}`", items.len(), root);
            document.insert(root, Value::Array(items));
        }
    }
}

/// Serializers keyed by the underscored, unqualified class name
/// (`Tasks::PhoneCall` → `phone_call`).
#[derive(Debug, Default)]
pub struct SerializerRegistry {
    serializers: HashMap<String, Serializer>,
}

impl SerializerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a serializer for a class, replacing any previous one.
    pub fn register(&mut self, class_name: &str, serializer: Serializer) -> Option<Serializer> {
        self.serializers.insert(class_key(class_name), serializer)
    }

    pub fn with(mut self, class_name: &str, serializer: Serializer) -> Self {
        self.register(class_name, serializer);
        self
    }

    pub fn get(&self, class_name: &str) -> Option<&Serializer> {
        self.serializers.get(&class_key(class_name))
    }

    /// The serializer for an object's type tag, falling back to its class.
    pub fn serializer_for(&self, object: &dyn Model) -> Option<&Serializer> {
        object
            .type_tag()
            .and_then(|tag| self.get(&tag))
            .or_else(|| self.get(object.class_name()))
    }

    /// Renders an object with its registered serializer.
    pub fn render(&self, object: &dyn Model) -> Option<Value> {
        self.serializer_for(object).map(|s| s.as_json(object, self))
    }
}

fn class_key(class_name: &str) -> String {
    inflect::underscore(demodulize(class_name))
}
