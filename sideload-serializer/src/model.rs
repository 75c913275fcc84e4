use std::collections::HashMap;

use serde_json::Value;
use sideload_types::Hash;

/// An object that can be rendered by a [`Serializer`](crate::Serializer).
///
/// This is the seam to whatever object layer backs the server: the
/// serializer only reads attributes, associations and type information
/// through it.
pub trait Model {
    /// Concrete class name, possibly module-qualified (`Tasks::Meeting`).
    fn class_name(&self) -> &str;

    /// Reads one attribute. Missing attributes read as `null`.
    fn read_attribute(&self, name: &str) -> Value;

    /// Every attribute, used when no serializer is registered for the object.
    fn attributes(&self) -> Hash;

    /// The single object behind a has-one association, if any.
    fn association_one(&self, name: &str) -> Option<&dyn Model>;

    /// The objects behind a has-many association, in order.
    fn association_many(&self, name: &str) -> Vec<&dyn Model>;

    /// Primary key.
    fn id(&self) -> Value {
        self.read_attribute("id")
    }

    /// Explicit type tag stored on the object (single-table inheritance).
    /// Empty tags count as absent.
    fn type_tag(&self) -> Option<String> {
        match self.read_attribute("type") {
            Value::String(tag) if !tag.is_empty() => Some(tag),
            _ => None,
        }
    }
}

/// A plain in-memory [`Model`]: a class name, an ordered attribute map and
/// named associations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    class_name: String,
    attributes: Hash,
    has_one: HashMap<String, Option<Record>>,
    has_many: HashMap<String, Vec<Record>>,
}

impl Record {
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            ..Self::default()
        }
    }

    /// Sets an attribute, keeping first-insertion order.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Sets the explicit `type` tag.
    pub fn typed(self, tag: impl Into<String>) -> Self {
        self.attr("type", tag.into())
    }

    pub fn has_one(mut self, name: impl Into<String>, target: Option<Record>) -> Self {
        self.has_one.insert(name.into(), target);
        self
    }

    pub fn has_many(mut self, name: impl Into<String>, targets: Vec<Record>) -> Self {
        self.has_many.insert(name.into(), targets);
        self
    }
}

impl Model for Record {
    fn class_name(&self) -> &str {
        &self.class_name
    }

    fn read_attribute(&self, name: &str) -> Value {
        self.attributes.get(name).cloned().unwrap_or(Value::Null)
    }

    fn attributes(&self) -> Hash {
        self.attributes.clone()
    }

    fn association_one(&self, name: &str) -> Option<&dyn Model> {
        self.has_one
            .get(name)
            .and_then(Option::as_ref)
            .map(|r| r as &dyn Model)
    }

    fn association_many(&self, name: &str) -> Vec<&dyn Model> {
        self.has_many
            .get(name)
            .map(|items| items.iter().map(|r| r as &dyn Model).collect())
            .unwrap_or_default()
    }
}
