//! In-memory record store.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use sideload_types::{Hash, record_id, type_key_for};
use tracing::debug;

use crate::{ModelType, PayloadSerializer, StoreError, StoreResult, serializers};

/// Registered models, their serializers, and every record pushed so far.
///
/// Records are keyed by type key, then by coerced string id, in push order.
#[derive(Debug)]
pub struct Store {
    models: HashMap<String, ModelType>,
    serializers: HashMap<String, Arc<PayloadSerializer>>,
    default_serializer: Arc<PayloadSerializer>,
    records: HashMap<String, Hash>,
}

impl Default for Store {
    fn default() -> Self {
        Self::new(serializers::application())
    }
}

impl Store {
    /// Creates an empty store whose fallback serializer is `default_serializer`.
    pub fn new(default_serializer: PayloadSerializer) -> Self {
        Self {
            models: HashMap::new(),
            serializers: HashMap::new(),
            default_serializer: Arc::new(default_serializer),
            records: HashMap::new(),
        }
    }

    pub fn register_model(&mut self, model: ModelType) {
        self.models.insert(model.type_key().to_string(), model);
    }

    pub fn with_model(mut self, model: ModelType) -> Self {
        self.register_model(model);
        self
    }

    /// Registers the serializer used for records of `type_key`.
    pub fn register_serializer(&mut self, type_key: impl Into<String>, serializer: PayloadSerializer) {
        self.serializers.insert(type_key.into(), Arc::new(serializer));
    }

    pub fn with_serializer(mut self, type_key: impl Into<String>, serializer: PayloadSerializer) -> Self {
        self.register_serializer(type_key, serializer);
        self
    }

    /// Looks up a model by type key, accepting qualified or plural
    /// spellings (`Tasks::Meeting`, `meetings`).
    pub fn model_for(&self, type_name: &str) -> StoreResult<&ModelType> {
        self.models
            .get(type_name)
            .or_else(|| self.models.get(&type_key_for(type_name)))
            .ok_or_else(|| StoreError::UnknownModel(type_name.to_string()))
    }

    /// The serializer registered for `type_key`, else the store default.
    pub fn serializer_for(&self, type_key: &str) -> Arc<PayloadSerializer> {
        self.serializers
            .get(type_key)
            .unwrap_or(&self.default_serializer)
            .clone()
    }

    /// Loads one record. A record already present under the same id has
    /// the pushed fields merged over its existing ones.
    pub fn push(&mut self, type_name: &str, hash: Hash) -> StoreResult<()> {
        let type_key = self.model_for(type_name)?.type_key().to_string();
        let id = record_id(&hash).ok_or_else(|| StoreError::MissingId(type_key.clone()))?;
        let records = self.records.entry(type_key.clone()).or_default();
        match records.get_mut(&id) {
            Some(Value::Object(existing)) => {
                existing.extend(hash);
                debug!("Updated {} {}", type_key, id);
            }
            _ => {
                records.insert(id.clone(), Value::Object(hash));
                debug!("Pushed {} {}", type_key, id);
            }
        }
        Ok(())
    }

    pub fn push_many(&mut self, type_name: &str, hashes: Vec<Hash>) -> StoreResult<()> {
        for hash in hashes {
            self.push(type_name, hash)?;
        }
        Ok(())
    }

    /// The record of `type_name` with the given (coerced) id.
    pub fn record(&self, type_name: &str, id: &str) -> Option<&Hash> {
        let type_key = self.model_for(type_name).ok()?.type_key();
        self.records.get(type_key)?.get(id)?.as_object()
    }

    /// Every record of `type_name`, in push order.
    pub fn records(&self, type_name: &str) -> Vec<&Hash> {
        let Ok(model) = self.model_for(type_name) else {
            return Vec::new();
        };
        self.records
            .get(model.type_key())
            .map(|records| records.values().filter_map(Value::as_object).collect())
            .unwrap_or_default()
    }

    /// Total number of records across all types.
    pub fn len(&self) -> usize {
        self.records.values().map(|records| records.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
