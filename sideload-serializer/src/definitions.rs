//! Serializer definitions for the application's resources.

use crate::{AssociationOptions, SerializerDefinition, SerializerResult};

/// A calendar day: its own attributes, its owner as a bare foreign key, and
/// its tasks as polymorphic `{id, type}` references with the task objects
/// sideloaded under `tasks`.
pub fn calendar_day() -> SerializerResult<SerializerDefinition> {
    SerializerDefinition::builder("calendar_day")
        .attributes(["id", "date", "label"])
        .has_one("user", AssociationOptions::ids())
        .has_many("tasks", AssociationOptions::ids().include(true).polymorphic())
        .build()
}
