//! Client-side payload extraction into a typed record store.
//!
//! A [`PayloadSerializer`] splits a root-keyed document into the primary
//! record (or array) for the current request and secondary records, which
//! are pushed into a [`Store`] under their resolved type.
//!
//! - [`ModelType`]: a type key and its declared relationships
//! - [`Store`]: registered models, per-type serializers, pushed records
//! - [`TypeResolver`]: maps a root name and record hash to a type name;
//!   [`PolymorphicTypeResolver`] decorates [`RootTypeResolver`] so a record's
//!   own `type` wins over its root
//! - [`SerializerConfig`]: selects the resolver and naming overrides
//! - [`serializers`]: the application's concrete serializers

mod config;
mod error;
mod model;
mod resolver;
mod serializer;
pub mod serializers;
mod store;

pub use config::SerializerConfig;
pub use error::{StoreError, StoreResult};
pub use model::{ModelType, Relationship, RelationshipKind};
pub use resolver::{PolymorphicTypeResolver, RootTypeResolver, TypeResolver};
pub use serializer::PayloadSerializer;
pub use store::Store;
