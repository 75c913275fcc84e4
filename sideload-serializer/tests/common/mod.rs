//! Shared fixtures for serializer tests.

#![allow(dead_code)]

use std::sync::Once;

use sideload_serializer::Record;
use tracing_subscriber::EnvFilter;

static TRACING: Once = Once::new();

/// Routes `tracing` output through the test harness. Set `RUST_LOG=debug`
/// to see sideloading decisions.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

pub fn user() -> Record {
    Record::new("User").attr("id", 7).attr("name", "Ada")
}

/// A task whose concrete class is namespaced.
pub fn meeting(id: i64) -> Record {
    Record::new("Tasks::Meeting")
        .attr("id", id)
        .attr("title", "Standup")
}

/// A task whose type comes from an explicit tag rather than its class.
pub fn phone_call(id: i64) -> Record {
    Record::new("Task")
        .attr("id", id)
        .typed("Tasks::PhoneCall")
        .attr("number", "555-0100")
}

pub fn calendar_day(id: i64, tasks: Vec<Record>) -> Record {
    Record::new("CalendarDay")
        .attr("id", id)
        .attr("date", "2024-03-01")
        .attr("label", "Friday")
        .attr("notes", "not exposed")
        .has_one("user", Some(user()))
        .has_many("tasks", tasks)
}
