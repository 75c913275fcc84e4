//! Record type resolution.
//!
//! [`RootTypeResolver`] derives a record's type from the root it was found
//! under. [`PolymorphicTypeResolver`] wraps another resolver and answers
//! from the record's own `type` field when it has one.

use serde_json::Value;
use sideload_types::payload::split_root;
use sideload_types::{Hash, type_for_root, type_key_for};
use tracing::warn;

/// Maps a root name and a record hash to the record's type name.
pub trait TypeResolver {
    fn extract_type_name(&self, prop: &str, hash: &Hash) -> String;

    /// Rewrites type information inside a hash before normalization.
    fn normalize_type(&self, hash: Hash) -> Hash {
        hash
    }
}

/// Type from the root name: `_calendar_days` → `calendarDay`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RootTypeResolver;

impl TypeResolver for RootTypeResolver {
    fn extract_type_name(&self, prop: &str, _hash: &Hash) -> String {
        type_for_root(split_root(prop).0)
    }
}

/// Type from the record's `type` field (namespace stripped), falling back
/// to the wrapped resolver.
#[derive(Debug, Clone, Copy, Default)]
pub struct PolymorphicTypeResolver<R> {
    inner: R,
}

impl<R: TypeResolver> PolymorphicTypeResolver<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }
}

impl<R: TypeResolver> TypeResolver for PolymorphicTypeResolver<R> {
    fn extract_type_name(&self, prop: &str, hash: &Hash) -> String {
        match hash.get("type") {
            Some(Value::String(tag)) if !tag.is_empty() => type_key_for(tag),
            None | Some(Value::Null) | Some(Value::String(_)) => self.inner.extract_type_name(prop, hash),
            Some(other) => {
                warn!("Ignoring non-string type {} under `{}`", other, prop);
                self.inner.extract_type_name(prop, hash)
            }
        }
    }

    fn normalize_type(&self, mut hash: Hash) -> Hash {
        if let Some(Value::String(tag)) = hash.get_mut("type") {
            if !tag.is_empty() {
                *tag = type_key_for(tag);
            }
        }
        self.inner.normalize_type(hash)
    }
}
