//! Server-side serializers for root-keyed JSON with sideloaded associations.
//!
//! - [`SerializerDefinition`]: declarative attributes and association
//!   descriptors, immutable once built
//! - [`AssociationEmbedding`]: how an association computes its key and ids;
//!   [`PolymorphicEmbedding`] decorates [`StandardEmbedding`] so polymorphic
//!   has-many associations emit `{id, type}` pairs under their own name
//! - [`Serializer`] / [`SerializerRegistry`]: render objects into
//!   `{ <root>: {...}, <included root>: [...] }` documents
//! - [`definitions`]: the application's concrete serializer definitions

mod association;
mod definition;
pub mod definitions;
mod embedding;
mod error;
mod model;
mod serializer;

pub use association::{AssociationDescriptor, AssociationKind, AssociationOptions, Embed};
pub use definition::{SerializerDefinition, SerializerDefinitionBuilder};
pub use embedding::{AssociationEmbedding, PolymorphicEmbedding, StandardEmbedding, type_name_of};
pub use error::{SerializerError, SerializerResult};
pub use model::{Model, Record};
pub use serializer::{Serializer, SerializerRegistry};
