//! Payload extraction and record normalization.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::{Value, json};
use sideload_types::payload::{self, split_root};
use sideload_types::{Hash, coerce_id, inflect, record_id, type_for_root, type_key_for};
use tracing::{debug, warn};

use crate::{
    ModelType, PolymorphicTypeResolver, Relationship, RelationshipKind, RootTypeResolver,
    SerializerConfig, Store, StoreResult, TypeResolver,
};

/// Splits root-keyed payloads into a primary result and store pushes, and
/// normalizes server-side records into client conventions.
///
/// The [`TypeResolver`] is chosen from the [`SerializerConfig`] when the
/// serializer is built: polymorphic configs wrap [`RootTypeResolver`] in a
/// [`PolymorphicTypeResolver`].
pub struct PayloadSerializer {
    config: SerializerConfig,
    resolver: Box<dyn TypeResolver + Send + Sync>,
}

impl fmt::Debug for PayloadSerializer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PayloadSerializer")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl PayloadSerializer {
    pub fn new(config: SerializerConfig) -> Self {
        if config.polymorphic {
            Self::with_resolver(config, PolymorphicTypeResolver::new(RootTypeResolver))
        } else {
            Self::with_resolver(config, RootTypeResolver)
        }
    }

    pub fn with_resolver<R>(config: SerializerConfig, resolver: R) -> Self
    where
        R: TypeResolver + Send + Sync + 'static,
    {
        Self {
            config,
            resolver: Box::new(resolver),
        }
    }

    pub fn config(&self) -> &SerializerConfig {
        &self.config
    }

    /// String identity of an id; `null` stays `None`.
    pub fn coerce_id(&self, id: &Value) -> Option<String> {
        coerce_id(id)
    }

    /// Type name for a payload root: `calendar_days` → `calendarDay`.
    pub fn type_for_root(&self, root: &str) -> String {
        type_for_root(root)
    }

    pub fn extract_type_name(&self, prop: &str, hash: &Hash) -> String {
        self.resolver.extract_type_name(prop, hash)
    }

    /// Type name that counts as primary when `primary_type` is requested.
    pub fn primary_type_name(&self, primary_type: &ModelType) -> String {
        self.config
            .primary_type_name
            .clone()
            .unwrap_or_else(|| primary_type.type_key().to_string())
    }

    pub fn normalize_type(&self, hash: Hash) -> Hash {
        self.resolver.normalize_type(hash)
    }

    /// Unwraps the payload's roots. `primary_type` is `None` when the
    /// payload was pushed without a request.
    pub fn normalize_payload(&self, primary_type: Option<&ModelType>, payload: Value) -> StoreResult<Hash> {
        if let Some(model) = primary_type {
            debug!("Normalizing payload for {}", model.type_key());
        }
        Ok(payload::into_roots(payload)?)
    }

    /// Brings one server record into client conventions: the id becomes a
    /// string, relationship keys (`user_id`, `task_ids`, polymorphic
    /// `{id, type}` references) move to their relationship names, and the
    /// remaining keys are camelized.
    pub fn normalize(&self, model: &ModelType, hash: Hash, prop: &str) -> Hash {
        let keys = relationship_keys(model);
        let mut normalized = Hash::with_capacity(hash.len());
        for (key, value) in &hash {
            if key == "id" {
                normalized.insert(key.clone(), id_value(value));
                continue;
            }
            match keys.get(key.as_str()) {
                Some((relationship, PayloadKey::Id)) => {
                    let value = if relationship.kind == RelationshipKind::HasMany {
                        id_list(value)
                    } else {
                        reference_id(value)
                    };
                    normalized.insert(relationship.name.clone(), value);
                }
                Some((relationship, PayloadKey::Reference)) => {
                    normalized.insert(relationship.name.clone(), reference(value));
                }
                Some((relationship, PayloadKey::PolymorphicId)) => {
                    let type_field = format!("{}_type", inflect::underscore(&relationship.name));
                    let value = if value.is_null() {
                        Value::Null
                    } else {
                        json!({"id": id_value(value), "type": type_value(hash.get(&type_field))})
                    };
                    normalized.insert(relationship.name.clone(), value);
                }
                Some((_, PayloadKey::PolymorphicType)) => {}
                None => {
                    normalized.insert(inflect::camelize(key), value.clone());
                }
            }
        }
        debug!("Normalized {} record from `{}`", model.type_key(), prop);
        normalized
    }

    /// Extracts the primary record of a single-record response.
    ///
    /// Every root except the primary one is pushed into `store`. A root
    /// prefixed with `_` is always secondary. Within a primary array, the
    /// first record becomes primary when no `record_id` was requested, and
    /// a record whose id matches `record_id` becomes primary wherever it
    /// appears. Further id-less primary records cannot be stored and are
    /// skipped.
    pub fn extract_single(
        &self,
        store: &mut Store,
        primary_type: &ModelType,
        payload: Value,
        record_id_requested: Option<&str>,
    ) -> StoreResult<Option<Hash>> {
        let payload = self.normalize_payload(Some(primary_type), payload)?;
        let primary_type_name = self.primary_type_name(primary_type);
        let mut primary_record = None;

        for (prop, value) in payload {
            let (type_root, forced_secondary) = split_root(&prop);
            let type_name = self.type_for_root(type_root);
            let is_primary =
                !forced_secondary && store.model_for(&type_name)?.type_key() == primary_type_name;

            if is_primary {
                if let Value::Object(hash) = value {
                    let hash = self.normalize_type(hash);
                    let type_name = self.extract_type_name(&prop, &hash);
                    let model = store.model_for(&type_name)?.clone();
                    primary_record = Some(self.normalize(&model, hash, &prop));
                    continue;
                }
            }

            for hash in payload::records(&prop, value)? {
                let hash = self.normalize_type(hash);
                let type_name = self.extract_type_name(&prop, &hash);
                let model = store.model_for(&type_name)?.clone();
                let hash = store.serializer_for(model.type_key()).normalize(&model, hash, &prop);

                let is_first_created =
                    is_primary && record_id_requested.is_none() && primary_record.is_none();
                let is_updated = is_primary
                    && record_id_requested.is_some()
                    && record_id(&hash).as_deref() == record_id_requested;
                if is_first_created || is_updated {
                    primary_record = Some(hash);
                } else if is_primary && record_id_requested.is_none() && record_id(&hash).is_none() {
                    warn!("Skipping extra unsaved {} record in `{}`", model.type_key(), prop);
                } else {
                    store.push(model.type_key(), hash)?;
                }
            }
        }
        Ok(primary_record)
    }

    /// Extracts the primary records of a collection response.
    ///
    /// The primary root's records are returned; every other root, and
    /// every root prefixed with `_`, is pushed into `store`. Each record is
    /// normalized by the serializer of its own type.
    pub fn extract_array(
        &self,
        store: &mut Store,
        primary_type: &ModelType,
        payload: Value,
    ) -> StoreResult<Option<Vec<Hash>>> {
        let payload = self.normalize_payload(Some(primary_type), payload)?;
        let primary_type_name = self.primary_type_name(primary_type);
        let mut primary_array = None;

        for (prop, value) in payload {
            let (type_root, forced_secondary) = split_root(&prop);
            let type_name = self.type_for_root(type_root);
            let root_model = store.model_for(&type_name)?.clone();
            let is_primary = !forced_secondary && root_model.type_key() == primary_type_name;

            let normalized = self.normalize_records(store, &root_model, &prop, value)?;
            if is_primary {
                primary_array = Some(normalized.into_iter().map(|(_, hash)| hash).collect());
            } else {
                for (type_key, hash) in normalized {
                    store.push(&type_key, hash)?;
                }
            }
        }
        Ok(primary_array)
    }

    /// Pushes every record of a payload into `store` without designating
    /// a primary one.
    pub fn push_payload(&self, store: &mut Store, payload: Value) -> StoreResult<()> {
        let payload = self.normalize_payload(None, payload)?;
        for (prop, value) in payload {
            let type_name = self.type_for_root(split_root(&prop).0);
            let root_model = store.model_for(&type_name)?.clone();
            for (type_key, hash) in self.normalize_records(store, &root_model, &prop, value)? {
                store.push(&type_key, hash)?;
            }
        }
        Ok(())
    }

    /// Normalizes every record under one root, pairing each with the type
    /// key it belongs to.
    fn normalize_records(
        &self,
        store: &Store,
        root_model: &ModelType,
        prop: &str,
        value: Value,
    ) -> StoreResult<Vec<(String, Hash)>> {
        let root_serializer = store.serializer_for(root_model.type_key());
        payload::records(prop, value)?
            .into_iter()
            .map(|hash| -> StoreResult<(String, Hash)> {
                let hash = self.normalize_type(hash);
                let item_model = store.model_for(&self.extract_type_name(prop, &hash))?;
                let serializer = if item_model.type_key() == root_model.type_key() {
                    Arc::clone(&root_serializer)
                } else {
                    store.serializer_for(item_model.type_key())
                };
                let hash = serializer.normalize(item_model, hash, prop);
                Ok((item_model.type_key().to_string(), hash))
            })
            .collect()
    }

    /// Serializes a client record back into server conventions.
    ///
    /// Attribute keys are underscored, belongs-to relationships become
    /// `<name>_id` (plus `<name>_type` when polymorphic), and has-many
    /// relationships are left for the server to own.
    pub fn serialize(&self, model: &ModelType, record: &Hash, include_id: bool) -> Hash {
        let mut data = Hash::with_capacity(record.len());
        for (key, value) in record {
            if key == "id" {
                if include_id {
                    data.insert("id".into(), value.clone());
                }
                continue;
            }
            let Some(relationship) = model.relationship_named(key) else {
                data.insert(inflect::underscore(key), value.clone());
                continue;
            };
            if relationship.kind == RelationshipKind::HasMany {
                continue;
            }
            let base = inflect::underscore(&relationship.name);
            match value {
                Value::Object(target) if relationship.polymorphic => {
                    let type_name = target
                        .get("type")
                        .and_then(Value::as_str)
                        .map(inflect::classify)
                        .map_or(Value::Null, Value::String);
                    data.insert(format!("{base}_id"), reference_id(value));
                    data.insert(format!("{base}_type"), type_name);
                }
                _ => {
                    data.insert(format!("{base}_id"), reference_id(value));
                    if relationship.polymorphic {
                        data.insert(format!("{base}_type"), Value::Null);
                    }
                }
            }
        }
        data
    }

    /// Serializes `record` under its root key inside `data`: the configured
    /// root, else the underscored type key.
    pub fn serialize_into_hash(&self, data: &mut Hash, model: &ModelType, record: &Hash, include_id: bool) {
        let root = self
            .config
            .root
            .clone()
            .unwrap_or_else(|| inflect::underscore(model.type_key()));
        data.insert(root, Value::Object(self.serialize(model, record, include_id)));
    }
}

/// How a payload key maps onto a relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PayloadKey {
    /// Bare id or id list (`user_id`, `task_ids`).
    Id,
    /// `{id, type}` reference or list of references.
    Reference,
    /// `<name>_id` of a polymorphic belongs-to, paired with `<name>_type`.
    PolymorphicId,
    /// `<name>_type`, consumed together with its `_id`.
    PolymorphicType,
}

/// Every payload key that can carry each relationship of `model`.
fn relationship_keys(model: &ModelType) -> HashMap<String, (&Relationship, PayloadKey)> {
    let mut keys = HashMap::new();
    for relationship in model.relationships() {
        let base = inflect::underscore(&relationship.name);
        let mut add = |key: String, shape: PayloadKey| {
            keys.entry(key).or_insert((relationship, shape));
        };
        match (relationship.kind, relationship.polymorphic) {
            (RelationshipKind::BelongsTo, false) => {
                add(format!("{base}_id"), PayloadKey::Id);
                add(base, PayloadKey::Id);
                add(relationship.name.clone(), PayloadKey::Id);
            }
            (RelationshipKind::HasMany, false) => {
                add(format!("{}_ids", inflect::singularize(&base)), PayloadKey::Id);
                add(base, PayloadKey::Id);
                add(relationship.name.clone(), PayloadKey::Id);
            }
            (RelationshipKind::BelongsTo, true) => {
                add(format!("{base}_id"), PayloadKey::PolymorphicId);
                add(format!("{base}_type"), PayloadKey::PolymorphicType);
                add(base, PayloadKey::Reference);
                add(relationship.name.clone(), PayloadKey::Reference);
            }
            (RelationshipKind::HasMany, true) => {
                add(format!("{}_ids", inflect::singularize(&base)), PayloadKey::Reference);
                add(base, PayloadKey::Reference);
                add(relationship.name.clone(), PayloadKey::Reference);
            }
        }
    }
    keys
}

fn id_value(value: &Value) -> Value {
    coerce_id(value).map_or(Value::Null, Value::String)
}

/// Id of a reference that may be a bare id or an embedded object.
fn reference_id(value: &Value) -> Value {
    match value {
        Value::Object(hash) => id_value(hash.get("id").unwrap_or(&Value::Null)),
        other => id_value(other),
    }
}

fn id_list(value: &Value) -> Value {
    match value {
        Value::Array(items) => Value::Array(items.iter().map(reference_id).collect()),
        Value::Null => Value::Array(Vec::new()),
        other => Value::Array(vec![reference_id(other)]),
    }
}

fn type_value(value: Option<&Value>) -> Value {
    match value {
        Some(Value::String(tag)) if !tag.is_empty() => Value::String(type_key_for(tag)),
        _ => Value::Null,
    }
}

/// Normalizes `{id, type}` references, singly or in a list. Missing fields
/// stay `null`.
fn reference(value: &Value) -> Value {
    match value {
        Value::Array(items) => Value::Array(items.iter().map(reference).collect()),
        Value::Object(hash) => json!({
            "id": id_value(hash.get("id").unwrap_or(&Value::Null)),
            "type": type_value(hash.get("type")),
        }),
        Value::Null => Value::Null,
        other => id_value(other),
    }
}
