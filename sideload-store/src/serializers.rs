//! The application's payload serializers.

use crate::{PayloadSerializer, SerializerConfig};

/// Default serializer: polymorphic type resolution, primary type taken
/// from the requested model.
pub fn application() -> PayloadSerializer {
    PayloadSerializer::new(SerializerConfig::polymorphic())
}

/// Serializer for task records. Every concrete task type answers to the
/// `task` primary type and serializes under the `task` root.
pub fn task() -> PayloadSerializer {
    PayloadSerializer::new(
        SerializerConfig::polymorphic()
            .with_primary_type_name("task")
            .with_root("task"),
    )
}
