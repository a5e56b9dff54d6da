//! Integration tests for translateable attributes
//!
//! These tests drive registered fields through whole record lifecycles
//! in memory. Round trips through PostgreSQL live in database_tests.rs.

use serde_json::json;
use translateable::config::Config;
use translateable::db::ColumnInfo;
use translateable::{
    DynamicRecord, Error, GetOptions, LocaleRegistry, NestedAttributes, Record, Translateable,
    Translations,
};

// ==================== Test Helpers ====================

fn registry() -> LocaleRegistry {
    LocaleRegistry::new(["en", "ru", "it"], "en")
}

fn test_models() -> Translateable {
    let columns = vec![
        ColumnInfo::new("id", "bigint"),
        ColumnInfo::new("title", "jsonb"),
        ColumnInfo::new("description", "character varying"),
    ];
    Translateable::register("test_models", &["title"], Some(columns.as_slice()), &Config::default())
        .expect("Failed to register title")
}

/// Stand-in for a save/reload cycle: the stored columns survive, the record
/// is no longer new
fn reload(record: &DynamicRecord, id: i64) -> DynamicRecord {
    let mut reloaded = DynamicRecord::persisted(id);
    for (name, value) in record.columns() {
        reloaded.set_column(name, value.cloned());
    }
    reloaded
}

fn get(model: &Translateable, record: &DynamicRecord, locale: &str) -> Option<String> {
    let title = model.field("title").unwrap();
    title.get(record, &registry().context_for(locale), GetOptions::default())
}

// ==================== Locale Scenarios ====================

#[test]
fn test_creates_record_with_provided_locale() {
    let model = test_models();
    let title = model.field("title").unwrap();

    for (locale, text) in [("en", "hello"), ("ru", "привет"), ("it", "ciao")] {
        let cx = registry().context_for(locale);
        let mut record = DynamicRecord::new();
        title.set(&mut record, &cx, text);
        assert_eq!(title.get(&record, &cx, GetOptions::default()).as_deref(), Some(text));
    }
}

#[test]
fn test_adds_new_locales_to_existing_records() {
    let model = test_models();
    let title = model.field("title").unwrap();
    let en = registry().context();
    let ru = registry().context_for("ru");

    let mut record = DynamicRecord::new();
    title.set(&mut record, &en, "the quick brown fox");
    let mut record = reload(&record, 1);

    title.set(&mut record, &ru, "прыгает через ленивую собаку");
    let record = reload(&record, 1);

    assert_eq!(get(&model, &record, "ru").as_deref(), Some("прыгает через ленивую собаку"));
    assert_eq!(get(&model, &record, "en").as_deref(), Some("the quick brown fox"));
}

#[test]
fn test_replaces_all_locales_when_map_is_assigned() {
    let model = test_models();
    let title = model.field("title").unwrap();
    let en = registry().context();

    let mut record = DynamicRecord::new();
    title.set(&mut record, &en, "jumps over the lazy dog");
    let replacement: Translations = [("en", "hello"), ("ru", "привет")].into_iter().collect();
    title.set(&mut record, &en, replacement);
    let record = reload(&record, 1);

    assert_eq!(get(&model, &record, "en").as_deref(), Some("hello"));
    assert_eq!(get(&model, &record, "ru").as_deref(), Some("привет"));
    assert_eq!(record.read_attribute("title").unwrap().len(), 2);
}

// ==================== Fallback Scenarios ====================

#[test]
fn test_falls_back_to_default_locale() {
    let model = test_models();
    let title = model.field("title").unwrap();

    let mut record = DynamicRecord::new();
    title.set(&mut record, &registry().context(), "hello world");
    let record = reload(&record, 1);

    assert_eq!(get(&model, &record, "ru").as_deref(), Some("hello world"));
}

#[test]
fn test_falls_back_to_first_available_locale() {
    let model = test_models();
    let title = model.field("title").unwrap();

    let mut record = DynamicRecord::new();
    title.set(&mut record, &registry().context_for("ru"), "привет мир");
    let record = reload(&record, 1);

    assert_eq!(get(&model, &record, "it").as_deref(), Some("привет мир"));
}

#[test]
fn test_nil_when_nothing_is_stored() {
    let model = test_models();
    let record = DynamicRecord::persisted(1);

    assert_eq!(get(&model, &record, "it"), None);
}

#[test]
fn test_strict_returns_nil_for_other_locales() {
    let model = test_models();
    let title = model.field("title").unwrap();

    let mut record = DynamicRecord::new();
    title.set(&mut record, &registry().context(), "The Krankenwagen");
    let record = reload(&record, 1);

    let strict = GetOptions::strict();
    assert_eq!(
        title.get(&record, &registry().context_for("en"), strict).as_deref(),
        Some("The Krankenwagen")
    );
    assert_eq!(title.get(&record, &registry().context_for("ru"), strict), None);
    assert_eq!(get(&model, &record, "it").as_deref(), Some("The Krankenwagen"));
}

// ==================== Nested Attributes ====================

fn nested(value: serde_json::Value) -> NestedAttributes {
    serde_json::from_value(value).expect("Invalid nested attributes")
}

#[test]
fn test_nested_attributes_create() {
    let model = test_models();
    let title = model.field("title").unwrap();

    let mut record = DynamicRecord::new();
    title.set_from_nested_attributes(
        &mut record,
        &nested(json!({ "0": { "locale": "it", "data": "volpe veloce" } })),
    );

    assert_eq!(get(&model, &record, "it").as_deref(), Some("volpe veloce"));
}

#[test]
fn test_nested_attributes_update() {
    let model = test_models();
    let title = model.field("title").unwrap();

    let mut record = DynamicRecord::new();
    title.set_from_nested_attributes(
        &mut record,
        &nested(json!({ "0": { "locale": "it", "data": "volpe veloce" } })),
    );
    let mut record = reload(&record, 1);
    title.set_from_nested_attributes(
        &mut record,
        &nested(json!({ "0": { "locale": "it", "data": "salti sopra" } })),
    );

    assert_eq!(get(&model, &record, "it").as_deref(), Some("salti sopra"));
}

#[test]
fn test_nested_attributes_update_and_add() {
    let model = test_models();
    let title = model.field("title").unwrap();

    let mut record = DynamicRecord::new();
    title.set_from_nested_attributes(
        &mut record,
        &nested(json!({ "0": { "locale": "it", "data": "volpe veloce" } })),
    );
    title.set_from_nested_attributes(
        &mut record,
        &nested(json!({
            "0": { "locale": "it", "data": "salti sopra" },
            "1": { "locale": "ru", "data": "прыгает через" }
        })),
    );

    assert_eq!(get(&model, &record, "it").as_deref(), Some("salti sopra"));
    assert_eq!(get(&model, &record, "ru").as_deref(), Some("прыгает через"));
}

#[test]
fn test_nested_attributes_destroy() {
    let model = test_models();
    let title = model.field("title").unwrap();

    let mut record = DynamicRecord::new();
    title.set_from_nested_attributes(
        &mut record,
        &nested(json!({
            "0": { "locale": "it", "data": "salti sopra" },
            "1": { "locale": "ru", "data": "прыгает через" }
        })),
    );
    title.set_from_nested_attributes(
        &mut record,
        &nested(json!({
            "0": { "locale": "it", "data": "salti sopra", "_destroy": 1 },
            "1": { "locale": "ru", "data": "прыгает через" }
        })),
    );

    // Falls back to the first available locale
    assert_eq!(get(&model, &record, "it").as_deref(), Some("прыгает через"));
    assert_eq!(get(&model, &record, "ru").as_deref(), Some("прыгает через"));
}

#[test]
fn test_entries_render_one_row_per_locale() {
    let model = test_models();
    let title = model.field("title").unwrap();
    let cx = registry().context();

    // A blank form gets one row for the current locale
    let blank = DynamicRecord::new();
    let rows = title.list_as_entries(&blank, &cx);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].locale.as_str(), "en");

    let mut record = DynamicRecord::new();
    title.set(&mut record, &cx, "hello");
    title.set(&mut record, &registry().context_for("ru"), "привет");
    let rows = title.list_as_entries(&record, &cx);
    let locales: Vec<&str> = rows.iter().map(|row| row.locale.as_str()).collect();
    assert_eq!(locales, vec!["en", "ru"]);
}

// ==================== Raw Access ====================

#[test]
fn test_raw_value_is_the_whole_map_in_every_locale() {
    let registry = LocaleRegistry::new(["en", "ru", "de", "it"], "en");
    let model = test_models();
    let title = model.field("title").unwrap();

    let mut record = DynamicRecord::new();
    title.set(&mut record, &registry.context_for("en"), "Hello World");
    title.set(&mut record, &registry.context_for("de"), "Hallo Welt");

    let raw = serde_json::to_value(record.read_attribute("title").unwrap()).unwrap();
    assert_eq!(raw, json!({ "en": "Hello World", "de": "Hallo Welt" }));
    for locale in ["en", "ru", "de", "it"] {
        let read = title.read(&record, &registry.context_for(locale));
        assert_eq!(serde_json::to_value(read).unwrap(), raw);
    }
}

// ==================== Registration ====================

#[test]
fn test_registering_missing_column_fails() {
    let columns = vec![ColumnInfo::new("title", "jsonb")];
    let result =
        Translateable::register("test_models", &["nonexist"], Some(columns.as_slice()), &Config::default());

    assert!(matches!(result, Err(Error::Configuration(_))));
    assert!(result
        .unwrap_err()
        .to_string()
        .contains("no such column 'nonexist' in 'test_models'"));
}

#[test]
fn test_permitted_nested_attributes_for_form_binding() {
    let model = test_models();

    assert_eq!(
        serde_json::to_value(model.permitted_nested_attributes()).unwrap(),
        json!([{ "title_nested_attributes": ["locale", "data", "destroy"] }])
    );
    assert_eq!(
        model.field("title").unwrap().entries_attribute_name(),
        "title_translateable"
    );
}

#[test]
fn test_unavailable_locale_is_rejected_by_registry() {
    let result = registry().ensure_available("fr");
    assert!(matches!(result, Err(Error::UnavailableLocale { .. })));
}
