//! State migration: turn a possibly-stale raw document into the current
//! [`SiteDocument`] shape without ever failing.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::defaults;
use super::model::{SiteConfig, SiteDocument};

/// Fill in whatever a stored document is missing.
///
/// Pure and total: any input, including `null` and non-objects, produces a
/// complete document (the bootstrap case). Idempotent, so re-migrating an
/// already-migrated document changes nothing.
///
/// Rules:
/// - list fields missing from the input get their documented default
///   (seeded content for courses, teachers, achievements and categories;
///   empty lists for everything else);
/// - `config` is shallow-merged over the defaults, provided keys winning;
/// - `categories` is completed so every course category is present;
/// - `isAuthenticated` is session-local and gets stripped, never persisted;
/// - unrecognized top-level keys are carried through untouched.
pub fn migrate(raw: Value) -> SiteDocument {
    let mut map = match raw {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    map.remove("isAuthenticated");

    let config = migrate_config(map.remove("config"));
    let courses = take_list(&mut map, "courses").unwrap_or_else(defaults::default_courses);
    let teachers = take_list(&mut map, "teachers").unwrap_or_else(defaults::default_teachers);
    let achievements =
        take_list(&mut map, "achievements").unwrap_or_else(defaults::default_achievements);
    let testimonials = take_list(&mut map, "testimonials").unwrap_or_default();
    let blog_posts = take_list(&mut map, "blogPosts").unwrap_or_default();
    let messages = take_list(&mut map, "messages").unwrap_or_default();
    let public_documents = take_list(&mut map, "publicDocuments").unwrap_or_default();

    let mut categories: Vec<String> =
        take_list(&mut map, "categories").unwrap_or_else(defaults::default_categories);
    for course in &courses {
        if !course.category.is_empty() && !categories.contains(&course.category) {
            categories.push(course.category.clone());
        }
    }

    SiteDocument {
        config,
        courses,
        teachers,
        achievements,
        testimonials,
        blog_posts,
        messages,
        categories,
        public_documents,
        extra: map,
    }
}

/// Shallow merge: defaults underneath, provided keys on top. A config that
/// fails to deserialize even after merging falls back to the defaults
/// wholesale rather than aborting the load.
fn migrate_config(raw: Option<Value>) -> SiteConfig {
    let mut merged = match serde_json::to_value(defaults::default_config()) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    };
    if let Some(Value::Object(provided)) = raw {
        for (key, value) in provided {
            merged.insert(key, value);
        }
    }
    serde_json::from_value(Value::Object(merged)).unwrap_or_else(|_| defaults::default_config())
}

/// Remove `key` and decode it as a list, dropping entries that no longer
/// decode. A missing or non-array value yields `None` so the caller can
/// substitute the documented default.
fn take_list<T: DeserializeOwned>(map: &mut Map<String, Value>, key: &str) -> Option<Vec<T>> {
    match map.remove(key)? {
        Value::Array(items) => Some(
            items
                .into_iter()
                .filter_map(|item| serde_json::from_value(item).ok())
                .collect(),
        ),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_object_gets_documented_defaults() {
        let doc = migrate(json!({}));
        assert_eq!(doc.config, defaults::default_config());
        assert!(doc.messages.is_empty());
        assert!(doc.testimonials.is_empty());
        assert!(doc.blog_posts.is_empty());
        assert!(doc.public_documents.is_empty());
        assert_eq!(doc.courses, defaults::default_courses());
        // seeded categories plus nothing extra, since the seeded courses
        // only use seeded categories
        assert_eq!(doc.categories, defaults::default_categories());
    }

    #[test]
    fn non_object_input_bootstraps() {
        let from_null = migrate(Value::Null);
        let from_string = migrate(json!("garbage"));
        assert_eq!(from_null, from_string);
        assert_eq!(from_null.teachers, defaults::default_teachers());
    }

    #[test]
    fn provided_config_keys_win_over_defaults() {
        let doc = migrate(json!({
            "config": {"heroTitle": "Summer enrolment", "statsYears": "10+"}
        }));
        assert_eq!(doc.config.hero_title, "Summer enrolment");
        assert_eq!(doc.config.stats_years.as_deref(), Some("10+"));
        // untouched keys keep their defaults
        assert_eq!(doc.config.address, defaults::default_config().address);
    }

    #[test]
    fn is_authenticated_is_stripped() {
        let doc = migrate(json!({"isAuthenticated": true, "courses": []}));
        assert!(!doc.extra.contains_key("isAuthenticated"));
        let value = serde_json::to_value(&doc).unwrap();
        assert!(value.get("isAuthenticated").is_none());
    }

    #[test]
    fn categories_cover_every_course_category() {
        let doc = migrate(json!({
            "categories": ["Kids"],
            "courses": [
                {"id": "1", "category": "Kids"},
                {"id": "2", "category": "Business"}
            ]
        }));
        assert_eq!(doc.categories, vec!["Kids".to_string(), "Business".to_string()]);
    }

    #[test]
    fn idempotent() {
        let inputs = vec![
            json!({}),
            Value::Null,
            json!({"config": {"heroTitle": "x"}, "courses": [{"id": "9", "category": "New"}]}),
            json!({"extraKey": [1, 2, 3], "messages": [{"id": "m1", "replied": true}]}),
        ];
        for input in inputs {
            let once = migrate(input);
            let twice = migrate(serde_json::to_value(&once).unwrap());
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn malformed_list_entries_are_dropped_not_fatal() {
        let doc = migrate(json!({
            "teachers": [
                {"id": "1", "name": "Ms. Lan"},
                42
            ]
        }));
        assert_eq!(doc.teachers.len(), 1);
        assert_eq!(doc.teachers[0].name, "Ms. Lan");
    }

    #[test]
    fn unknown_top_level_keys_survive() {
        let doc = migrate(json!({"announcement": "enrolment open"}));
        assert_eq!(doc.extra["announcement"], json!("enrolment open"));
    }
}
