use sideload_types::inflect::{camelize, classify, pluralize, singularize, underscore};
use sideload_types::{demodulize, type_for_root, type_key_for};

// ── singularize ───────────────────────────────────────────────────

#[test]
fn singularize_regular_plurals() {
    assert_eq!(singularize("tasks"), "task");
    assert_eq!(singularize("users"), "user");
    assert_eq!(singularize("calendar_days"), "calendar_day");
    assert_eq!(singularize("calendarDays"), "calendarDay");
}

#[test]
fn singularize_suffix_rules() {
    assert_eq!(singularize("categories"), "category");
    assert_eq!(singularize("boxes"), "box");
    assert_eq!(singularize("addresses"), "address");
    assert_eq!(singularize("statuses"), "status");
    assert_eq!(singularize("wolves"), "wolf");
    assert_eq!(singularize("knives"), "knife");
    assert_eq!(singularize("analyses"), "analysis");
}

#[test]
fn singularize_irregular_and_uncountable() {
    assert_eq!(singularize("people"), "person");
    assert_eq!(singularize("children"), "child");
    assert_eq!(singularize("news"), "news");
    assert_eq!(singularize("series"), "series");
}

#[test]
fn singularize_leaves_singulars_alone() {
    assert_eq!(singularize("task"), "task");
    assert_eq!(singularize("status"), "status");
    assert_eq!(singularize("address"), "address");
    assert_eq!(singularize("person"), "person");
}

// ── pluralize ─────────────────────────────────────────────────────

#[test]
fn pluralize_regular_and_suffix_rules() {
    assert_eq!(pluralize("task"), "tasks");
    assert_eq!(pluralize("calendar_day"), "calendar_days");
    assert_eq!(pluralize("category"), "categories");
    assert_eq!(pluralize("box"), "boxes");
    assert_eq!(pluralize("status"), "statuses");
    assert_eq!(pluralize("knife"), "knives");
    assert_eq!(pluralize("wolf"), "wolves");
}

#[test]
fn pluralize_irregular_and_uncountable() {
    assert_eq!(pluralize("person"), "people");
    assert_eq!(pluralize("sheep"), "sheep");
    assert_eq!(pluralize("people"), "people");
}

// ── case conversion ───────────────────────────────────────────────

#[test]
fn camelize_snake_and_pascal() {
    assert_eq!(camelize("calendar_day"), "calendarDay");
    assert_eq!(camelize("CalendarDay"), "calendarDay");
    assert_eq!(camelize("phone-call"), "phoneCall");
    assert_eq!(camelize("admin/user_task"), "admin/userTask");
}

#[test]
fn classify_produces_pascal_case() {
    assert_eq!(classify("calendar_day"), "CalendarDay");
    assert_eq!(classify("meetingTask"), "MeetingTask");
}

#[test]
fn underscore_camel_and_acronyms() {
    assert_eq!(underscore("calendarDay"), "calendar_day");
    assert_eq!(underscore("CalendarDay"), "calendar_day");
    assert_eq!(underscore("HTMLParser"), "html_parser");
    assert_eq!(underscore("phone-call"), "phone_call");
    assert_eq!(underscore("already_snake"), "already_snake");
}

// ── type resolution ───────────────────────────────────────────────

#[test]
fn demodulize_strips_through_last_separator() {
    assert_eq!(demodulize("Tasks::Meeting"), "Meeting");
    assert_eq!(demodulize("App::Tasks::PhoneCall"), "PhoneCall");
    assert_eq!(demodulize("Meeting"), "Meeting");
}

#[test]
fn type_for_root_singularizes_and_camelizes() {
    assert_eq!(type_for_root("calendar_days"), "calendarDay");
    assert_eq!(type_for_root("calendarDay"), "calendarDay");
    assert_eq!(type_for_root("tasks"), "task");
}

#[test]
fn type_key_for_namespaced_tags() {
    assert_eq!(type_key_for("Tasks::MeetingTask"), "meetingTask");
    assert_eq!(type_key_for("PhoneCall"), "phoneCall");
}
