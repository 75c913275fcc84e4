//! Shared fixtures for store tests.

#![allow(dead_code)]

use std::sync::Once;

use sideload_store::{ModelType, Store, serializers};
use tracing_subscriber::EnvFilter;

static TRACING: Once = Once::new();

/// Routes `tracing` output through the test harness. Set `RUST_LOG=debug`
/// to see per-root extraction decisions.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

pub fn calendar_day_model() -> ModelType {
    ModelType::new("calendarDay")
        .belongs_to("user")
        .has_many_polymorphic("tasks")
}

pub fn task_model() -> ModelType {
    ModelType::new("task").belongs_to("calendarDay")
}

/// A store with the calendar models, where meetings and phone calls are
/// concrete task types sharing the task serializer.
pub fn calendar_store() -> Store {
    init_tracing();
    Store::default()
        .with_model(calendar_day_model())
        .with_model(ModelType::new("user"))
        .with_model(task_model())
        .with_model(ModelType::new("meeting").belongs_to("calendarDay"))
        .with_model(ModelType::new("phoneCall").belongs_to("calendarDay"))
        .with_model(ModelType::new("comment").belongs_to_polymorphic("commentable"))
        .with_serializer("task", serializers::task())
        .with_serializer("meeting", serializers::task())
        .with_serializer("phoneCall", serializers::task())
}
