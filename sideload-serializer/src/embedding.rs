//! Association key and id computation.
//!
//! [`StandardEmbedding`] implements the plain conventions (`user_id`,
//! `task_ids`). [`PolymorphicEmbedding`] wraps any strategy and takes over
//! only for associations declared polymorphic; everything else passes
//! through to the wrapped strategy unchanged.

use serde_json::{Value, json};
use sideload_types::{demodulize, inflect};

use crate::model::Model;
use crate::{AssociationDescriptor, AssociationKind, Embed};

/// Computes how an association is keyed and identified in a serialized hash.
pub trait AssociationEmbedding {
    /// Key under which the association appears.
    fn key(&self, association: &AssociationDescriptor) -> String;

    /// Identifier value for the associated objects: a single id (or `null`)
    /// for has-one, an array for has-many.
    fn serialize_ids(&self, association: &AssociationDescriptor, items: &[&dyn Model]) -> Value;
}

/// Plain embedding conventions.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardEmbedding;

impl AssociationEmbedding for StandardEmbedding {
    fn key(&self, association: &AssociationDescriptor) -> String {
        if let Some(key) = &association.options.key {
            return key.clone();
        }
        match (association.options.embed, association.kind) {
            (Embed::Ids, AssociationKind::HasOne) => format!("{}_id", association.name),
            (Embed::Ids, AssociationKind::HasMany) => {
                format!("{}_ids", inflect::singularize(&association.name))
            }
            _ => association.name.clone(),
        }
    }

    fn serialize_ids(&self, association: &AssociationDescriptor, items: &[&dyn Model]) -> Value {
        let embed_key = association.embed_key();
        let id_of = |item: &&dyn Model| {
            if embed_key == "id" {
                item.id()
            } else {
                item.read_attribute(embed_key)
            }
        };
        match association.kind {
            AssociationKind::HasOne => items.first().map(id_of).unwrap_or(Value::Null),
            AssociationKind::HasMany => Value::Array(items.iter().map(id_of).collect()),
        }
    }
}

/// Decorator that keys polymorphic associations by their own name and
/// embeds `{id, type}` pairs.
#[derive(Debug, Clone, Copy, Default)]
pub struct PolymorphicEmbedding<E> {
    inner: E,
}

impl<E: AssociationEmbedding> PolymorphicEmbedding<E> {
    pub fn new(inner: E) -> Self {
        Self { inner }
    }
}

impl<E: AssociationEmbedding> AssociationEmbedding for PolymorphicEmbedding<E> {
    fn key(&self, association: &AssociationDescriptor) -> String {
        if association.is_polymorphic() && association.options.key.is_none() {
            return association.name.clone();
        }
        self.inner.key(association)
    }

    fn serialize_ids(&self, association: &AssociationDescriptor, items: &[&dyn Model]) -> Value {
        if !association.is_polymorphic() {
            return self.inner.serialize_ids(association, items);
        }
        let reference = |item: &&dyn Model| json!({"id": item.id(), "type": type_name_of(*item)});
        match association.kind {
            AssociationKind::HasOne => items.first().map(reference).unwrap_or(Value::Null),
            AssociationKind::HasMany => Value::Array(items.iter().map(reference).collect()),
        }
    }
}

/// Unqualified type name of an object: its explicit type tag if present,
/// else its class name, with any module prefix removed.
///
/// An empty type tag counts as absent, so `""` falls back to the class name.
pub fn type_name_of(item: &dyn Model) -> String {
    match item.type_tag() {
        Some(tag) => demodulize(&tag).to_string(),
        None => demodulize(item.class_name()).to_string(),
    }
}
