mod common;

use common::{calendar_day, init_tracing, meeting, phone_call, user};
use pretty_assertions::assert_eq;
use serde_json::json;
use sideload_serializer::{
    AssociationOptions, Model, Record, Serializer, SerializerDefinition, SerializerRegistry,
    StandardEmbedding, definitions,
};

fn calendar_day_serializer() -> Serializer {
    Serializer::new(definitions::calendar_day().unwrap())
}

// ── serializable_hash ─────────────────────────────────────────────

#[test]
fn hash_has_attributes_then_associations() {
    let day = calendar_day(1, vec![meeting(10), phone_call(11)]);
    let hash = calendar_day_serializer().serializable_hash(&day, &SerializerRegistry::new());
    let keys: Vec<&str> = hash.keys().map(String::as_str).collect();
    assert_eq!(keys, ["id", "date", "label", "user_id", "tasks"]);
    assert!(!hash.contains_key("notes"));
}

#[test]
fn missing_has_one_serializes_null() {
    let day = Record::new("CalendarDay").attr("id", 2);
    let hash = calendar_day_serializer().serializable_hash(&day, &SerializerRegistry::new());
    assert_eq!(hash["user_id"], json!(null));
    assert_eq!(hash["tasks"], json!([]));
    assert_eq!(hash["label"], json!(null));
}

#[test]
fn embedded_objects_are_nested() {
    let def = SerializerDefinition::builder("calendar_day")
        .attribute("id")
        .has_one("user", AssociationOptions::objects())
        .has_many("tasks", AssociationOptions::objects().polymorphic())
        .build()
        .unwrap();
    let day = calendar_day(1, vec![meeting(10)]);
    let hash = Serializer::new(def).serializable_hash(&day, &SerializerRegistry::new());
    assert_eq!(hash["user"], json!({"id": 7, "name": "Ada"}));
    assert_eq!(
        hash["tasks"],
        json!([{"id": 10, "title": "Standup", "type": "Meeting"}])
    );
}

#[test]
fn omitted_association_is_absent() {
    let def = SerializerDefinition::builder("calendar_day")
        .attribute("id")
        .has_one("user", AssociationOptions::omitted())
        .build()
        .unwrap();
    let day = calendar_day(1, vec![]);
    let hash = Serializer::new(def).serializable_hash(&day, &SerializerRegistry::new());
    assert_eq!(hash.len(), 1);
}

// ── as_json ───────────────────────────────────────────────────────

#[test]
fn calendar_day_document_sideloads_typed_tasks() {
    init_tracing();
    let day = calendar_day(1, vec![meeting(10), phone_call(11)]);
    let doc = calendar_day_serializer().as_json(&day, &SerializerRegistry::new());
    assert_eq!(
        doc,
        json!({
            "calendar_day": {
                "id": 1,
                "date": "2024-03-01",
                "label": "Friday",
                "user_id": 7,
                "tasks": [
                    {"id": 10, "type": "Meeting"},
                    {"id": 11, "type": "PhoneCall"}
                ]
            },
            "tasks": [
                {"id": 10, "title": "Standup", "type": "Meeting"},
                {"id": 11, "number": "555-0100", "type": "PhoneCall"}
            ]
        })
    );
}

#[test]
fn registered_serializers_render_included_objects() {
    let registry = SerializerRegistry::new()
        .with(
            "Meeting",
            Serializer::new(
                SerializerDefinition::builder("meeting")
                    .attribute("id")
                    .build()
                    .unwrap(),
            ),
        )
        .with(
            "PhoneCall",
            Serializer::new(
                SerializerDefinition::builder("phone_call")
                    .attributes(["id", "number"])
                    .build()
                    .unwrap(),
            ),
        );
    let day = calendar_day(1, vec![meeting(10), phone_call(11)]);
    let doc = calendar_day_serializer().as_json(&day, &registry);
    assert_eq!(
        doc["tasks"],
        json!([
            {"id": 10, "type": "Meeting"},
            {"id": 11, "number": "555-0100", "type": "PhoneCall"}
        ])
    );
}

#[test]
fn standard_embedding_ignores_polymorphism_in_keys() {
    let serializer =
        Serializer::with_embedding(definitions::calendar_day().unwrap(), StandardEmbedding);
    let day = calendar_day(1, vec![meeting(10), phone_call(11)]);
    let doc = serializer.as_json(&day, &SerializerRegistry::new());
    assert_eq!(doc["calendar_day"]["task_ids"], json!([10, 11]));
    assert!(doc["calendar_day"].get("tasks").is_none());
}

#[test]
fn nested_includes_are_sideloaded() {
    let room = Record::new("Room").attr("id", 5).attr("name", "Blue");
    let task = meeting(10).has_one("room", Some(room));
    let registry = SerializerRegistry::new().with(
        "Meeting",
        Serializer::new(
            SerializerDefinition::builder("meeting")
                .attributes(["id", "title"])
                .has_one("room", AssociationOptions::ids().include(true))
                .build()
                .unwrap(),
        ),
    );
    let day = calendar_day(1, vec![task]);
    let doc = calendar_day_serializer().as_json(&day, &registry);
    assert_eq!(
        doc["tasks"],
        json!([{"id": 10, "title": "Standup", "room_id": 5, "type": "Meeting"}])
    );
    assert_eq!(doc["rooms"], json!([{"id": 5, "name": "Blue"}]));
}

// ── array_as_json ─────────────────────────────────────────────────

#[test]
fn array_document_deduplicates_shared_includes() {
    let first = calendar_day(1, vec![meeting(10), phone_call(11)]);
    let second = calendar_day(2, vec![meeting(10)]);
    let days: Vec<&dyn Model> = vec![&first, &second];
    let doc = calendar_day_serializer().array_as_json(&days, &SerializerRegistry::new());

    assert_eq!(doc["calendar_days"].as_array().unwrap().len(), 2);
    assert_eq!(doc["calendar_days"][1]["tasks"], json!([{"id": 10, "type": "Meeting"}]));
    let included: Vec<_> = doc["tasks"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].clone())
        .collect();
    assert_eq!(included, vec![json!(10), json!(11)]);
}

#[test]
fn include_colliding_with_primary_root_is_dropped() {
    init_tracing();
    let def = SerializerDefinition::builder("node")
        .attribute("id")
        .has_many("nodes", AssociationOptions::ids().include(true))
        .build()
        .unwrap();
    let child = Record::new("Node").attr("id", 2);
    let parent = Record::new("Node").attr("id", 1).has_many("nodes", vec![child]);
    let nodes: Vec<&dyn Model> = vec![&parent];
    let doc = Serializer::new(def).array_as_json(&nodes, &SerializerRegistry::new());
    assert_eq!(doc, json!({"nodes": [{"id": 1, "node_ids": [2]}]}));
}

// ── Registry ──────────────────────────────────────────────────────

#[test]
fn registry_prefers_type_tag_over_class() {
    let registry = SerializerRegistry::new()
        .with("Task", calendar_day_serializer())
        .with(
            "PhoneCall",
            Serializer::new(SerializerDefinition::builder("phone_call").build().unwrap()),
        );
    let found = registry.serializer_for(&phone_call(1)).unwrap();
    assert_eq!(found.definition().root(), "phone_call");
}

#[test]
fn registry_keys_ignore_namespaces() {
    let registry = SerializerRegistry::new().with(
        "Tasks::Meeting",
        Serializer::new(SerializerDefinition::builder("meeting").build().unwrap()),
    );
    assert!(registry.get("Meeting").is_some());
    assert!(registry.serializer_for(&meeting(1)).is_some());
    assert!(registry.serializer_for(&user()).is_none());
}

#[test]
fn registry_render_uses_root() {
    let registry = SerializerRegistry::new().with("CalendarDay", calendar_day_serializer());
    let doc = registry.render(&calendar_day(1, vec![])).unwrap();
    assert_eq!(doc["calendar_day"]["id"], json!(1));
    assert!(doc.get("tasks").is_none());
}
