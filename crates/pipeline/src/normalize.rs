//! Pure defaulting applied to refiner JSON before schema validation.
//!
//! Normalization fills gaps the refiner is allowed to leave; it never
//! overwrites a value the refiner supplied. Validation stays a separate
//! step in [`crate::schema`].

use serde_json::{Value, json};

use crate::safety;

/// Default the `disclaimer` field of a prescription summary if the key is
/// absent. A present-but-null disclaimer is left alone and fails
/// validation, same as any other type error.
pub fn prescription(mut value: Value) -> Value {
    if let Some(obj) = value.as_object_mut() {
        if !obj.contains_key("disclaimer") {
            obj.insert("disclaimer".to_string(), json!(safety::DISCLAIMER));
        }
    }
    value
}

/// Normalize a Q&A response object.
///
/// Guarantees a complete `safety` block: a missing or non-object block is
/// replaced wholesale with the fixed footer, and individually missing
/// sub-fields are filled from it without touching present ones. A missing
/// or non-array `sources` field is replaced with `fallback_sources`, the
/// merged context sources computed upstream.
pub fn answer(mut value: Value, fallback_sources: &[String]) -> Value {
    let Some(obj) = value.as_object_mut() else {
        return value;
    };

    let has_safety_block = obj.get("safety").is_some_and(Value::is_object);
    if !has_safety_block {
        obj.insert("safety".to_string(), json!(safety::safety_footer()));
    } else if let Some(block) = obj.get_mut("safety").and_then(Value::as_object_mut) {
        block
            .entry("disclaimer")
            .or_insert_with(|| json!(safety::DISCLAIMER));
        block
            .entry("emergency")
            .or_insert_with(|| json!(safety::EMERGENCY));
        block
            .entry("version")
            .or_insert_with(|| json!(safety::FOOTER_VERSION));
    }

    let has_source_list = obj.get("sources").is_some_and(Value::is_array);
    if !has_source_list {
        obj.insert("sources".to_string(), json!(fallback_sources));
    }

    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn backfills_missing_disclaimer() {
        let value = prescription(json!({"medicines": []}));
        assert_eq!(value["disclaimer"], json!(safety::DISCLAIMER));
    }

    #[test]
    fn keeps_refiner_disclaimer() {
        let value = prescription(json!({"disclaimer": "custom"}));
        assert_eq!(value["disclaimer"], "custom");
    }

    #[test]
    fn replaces_missing_safety_block() {
        let value = answer(json!({"answer": "ok"}), &[]);
        assert_eq!(value["safety"]["disclaimer"], json!(safety::DISCLAIMER));
        assert_eq!(value["safety"]["emergency"], json!(safety::EMERGENCY));
        assert_eq!(value["safety"]["version"], "v1");
    }

    #[test]
    fn replaces_non_object_safety_block() {
        let value = answer(json!({"answer": "ok", "safety": "yes"}), &[]);
        assert_eq!(value["safety"]["version"], "v1");
    }

    #[test]
    fn fills_only_missing_safety_fields() {
        let value = answer(
            json!({"answer": "ok", "safety": {"disclaimer": "mine"}}),
            &[],
        );
        assert_eq!(value["safety"]["disclaimer"], "mine");
        assert_eq!(value["safety"]["emergency"], json!(safety::EMERGENCY));
        assert_eq!(value["safety"]["version"], "v1");
    }

    #[test]
    fn backfills_missing_sources() {
        let fallback = vec!["Omez 20 (20 mg) — before food".to_string()];
        let value = answer(json!({"answer": "ok"}), &fallback);
        assert_eq!(value["sources"], json!(fallback));
    }

    #[test]
    fn replaces_non_array_sources() {
        let fallback = vec!["a".to_string()];
        let value = answer(json!({"answer": "ok", "sources": "none"}), &fallback);
        assert_eq!(value["sources"], json!(["a"]));
    }

    #[test]
    fn keeps_refiner_sources() {
        let value = answer(
            json!({"answer": "ok", "sources": ["theirs"]}),
            &["ours".to_string()],
        );
        assert_eq!(value["sources"], json!(["theirs"]));
    }
}
