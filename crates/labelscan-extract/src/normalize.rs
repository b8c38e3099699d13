//! Shape normalization of raw model JSON.
//!
//! The model answers in one of two shapes: already flat (field names at the
//! top level) or grouped under six fixed category headings. Classification
//! is an explicit tagged decision, then grouped objects are flattened into
//! the canonical flat shape. Flat input passes through unchanged.

use serde_json::{Map, Value};

const GROUP_BASIC: &str = "Basic Information";
const GROUP_DATES: &str = "Dates & Batch";
const GROUP_NUTRITION: &str = "Ingredients & Nutrition";
const GROUP_REGULATORY: &str = "Manufacturing & Regulatory";
const GROUP_CONTACT: &str = "Contact Information";
const GROUP_OTHER: &str = "Other Details";

/// A raw model response object, classified by shape.
///
/// The six constants above are the only recognized category headings; no
/// other grouping shape exists.
#[derive(Debug, Clone, PartialEq)]
pub enum RawShape {
    Flat(Map<String, Value>),
    Grouped(Map<String, Value>),
}

/// A value counts as present only if it is JSON-truthy.
///
/// Empty strings, `0`, `false`, and empty collections inside a recognized
/// group are treated as absent. This drops a legitimately-present-but-empty
/// field, which is intentional parity with the upstream contract.
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Classifies a raw response object as flat or grouped.
///
/// Flat iff the object carries a non-empty `name` or `company` key, or
/// lacks both of the two most distinctive headings ("Basic Information" and
/// "Dates & Batch"). Everything else is grouped.
#[must_use]
pub fn classify_shape(object: Map<String, Value>) -> RawShape {
    let has_identity = ["name", "company"]
        .iter()
        .any(|k| object.get(*k).is_some_and(is_present));
    let has_group_marker = object.contains_key(GROUP_BASIC) || object.contains_key(GROUP_DATES);

    if has_identity || !has_group_marker {
        RawShape::Flat(object)
    } else {
        RawShape::Grouped(object)
    }
}

/// Renders a scalar group value as a string (`fssaiLicense`, `vegetarian`).
fn coerce_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Joins an `fssaiLicense` array into one comma-separated string.
/// Deliberately lossy: multiple license numbers become one field.
fn join_licenses(items: &[Value]) -> String {
    items
        .iter()
        .map(coerce_to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn group<'a>(object: &'a Map<String, Value>, key: &str) -> Option<&'a Map<String, Value>> {
    object.get(key).and_then(Value::as_object)
}

/// Copies `key` out of `source` into `flat` if it is present and truthy.
fn lift(flat: &mut Map<String, Value>, source: &Map<String, Value>, key: &str) {
    if let Some(value) = source.get(key).filter(|v| is_present(v)) {
        flat.insert(key.to_string(), value.clone());
    }
}

fn flatten_grouped(groups: &Map<String, Value>) -> Map<String, Value> {
    let mut flat = Map::new();

    // Field names under these two headings already match canonical names.
    for heading in [GROUP_BASIC, GROUP_DATES] {
        if let Some(section) = group(groups, heading) {
            for (key, value) in section {
                if is_present(value) {
                    flat.insert(key.clone(), value.clone());
                }
            }
        }
    }

    if let Some(section) = group(groups, GROUP_NUTRITION) {
        lift(&mut flat, section, "ingredients");
        lift(&mut flat, section, "nutritionalInfo");
    }

    if let Some(section) = group(groups, GROUP_REGULATORY) {
        lift(&mut flat, section, "manufacturingAddresses");
        if let Some(license) = section.get("fssaiLicense").filter(|v| is_present(v)) {
            let joined = match license {
                Value::Array(items) => join_licenses(items),
                other => coerce_to_string(other),
            };
            flat.insert("fssaiLicense".to_string(), Value::String(joined));
        }
        if let Some(veg) = section.get("vegetarian").filter(|v| is_present(v)) {
            flat.insert(
                "vegetarian".to_string(),
                Value::String(coerce_to_string(veg)),
            );
        }
    }

    if let Some(section) = group(groups, GROUP_CONTACT) {
        lift(&mut flat, section, "consumerContact");
    }

    if let Some(section) = group(groups, GROUP_OTHER) {
        lift(&mut flat, section, "otherDetails");
    }

    flat
}

/// Produces the canonical flat object from a raw response object.
///
/// Identity on flat input; grouped input is flattened. Missing groups are
/// simply skipped, never an error.
#[must_use]
pub fn normalize_shape(object: Map<String, Value>) -> Map<String, Value> {
    match classify_shape(object) {
        RawShape::Flat(flat) => flat,
        RawShape::Grouped(groups) => flatten_grouped(&groups),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn as_map(value: Value) -> Map<String, Value> {
        value.as_object().expect("test value is an object").clone()
    }

    #[test]
    fn flat_input_with_name_stays_flat() {
        let object = as_map(serde_json::json!({"name": "Choco Bar", "mrp": "₹50"}));
        assert_eq!(classify_shape(object.clone()), RawShape::Flat(object));
    }

    #[test]
    fn object_without_group_markers_is_flat() {
        // Neither identity keys nor the two distinctive headings: passes
        // through untouched even if it carries other group headings.
        let object = as_map(serde_json::json!({"Other Details": {"otherDetails": {}}}));
        assert_eq!(classify_shape(object.clone()), RawShape::Flat(object));
    }

    #[test]
    fn empty_name_does_not_force_flat() {
        let object = as_map(serde_json::json!({
            "name": "",
            "Basic Information": {"name": "Tea"}
        }));
        assert!(matches!(classify_shape(object), RawShape::Grouped(_)));
    }

    #[test]
    fn normalize_is_identity_on_flat_input() {
        let object = as_map(serde_json::json!({
            "name": "Choco Bar",
            "ingredients": ["Cocoa", "Sugar"]
        }));
        assert_eq!(normalize_shape(object.clone()), object);
    }

    #[test]
    fn grouped_input_flattens_all_six_groups() {
        let object = as_map(serde_json::json!({
            "Basic Information": {"name": "Choco Bar", "company": "CocoaCo", "barcode": "890123"},
            "Dates & Batch": {"expiryDate": "DEC 2025", "batchNumber": "B1"},
            "Ingredients & Nutrition": {
                "ingredients": ["Cocoa", "Sugar"],
                "nutritionalInfo": {"energy": "250 kcal"}
            },
            "Manufacturing & Regulatory": {
                "manufacturingAddresses": ["Plot 1, Industrial Area"],
                "fssaiLicense": ["A1234", "B5678"],
                "vegetarian": "green dot"
            },
            "Contact Information": {
                "consumerContact": {"phone": "1800-000-000"}
            },
            "Other Details": {
                "otherDetails": {"storage": "Keep cool and dry"}
            }
        }));

        let flat = normalize_shape(object);
        assert_eq!(flat["name"], "Choco Bar");
        assert_eq!(flat["company"], "CocoaCo");
        assert_eq!(flat["barcode"], "890123");
        assert_eq!(flat["expiryDate"], "DEC 2025");
        assert_eq!(flat["batchNumber"], "B1");
        assert_eq!(flat["ingredients"], serde_json::json!(["Cocoa", "Sugar"]));
        assert_eq!(
            flat["nutritionalInfo"],
            serde_json::json!({"energy": "250 kcal"})
        );
        assert_eq!(
            flat["manufacturingAddresses"],
            serde_json::json!(["Plot 1, Industrial Area"])
        );
        assert_eq!(flat["fssaiLicense"], "A1234, B5678");
        assert_eq!(flat["vegetarian"], "green dot");
        assert_eq!(
            flat["consumerContact"],
            serde_json::json!({"phone": "1800-000-000"})
        );
        assert_eq!(
            flat["otherDetails"],
            serde_json::json!({"storage": "Keep cool and dry"})
        );
    }

    #[test]
    fn scalar_fssai_license_coerces_to_string() {
        let object = as_map(serde_json::json!({
            "Basic Information": {"name": "Tea"},
            "Manufacturing & Regulatory": {"fssaiLicense": 10012031000001_i64}
        }));
        let flat = normalize_shape(object);
        assert_eq!(flat["fssaiLicense"], "10012031000001");
    }

    #[test]
    fn missing_groups_are_skipped_silently() {
        let object = as_map(serde_json::json!({
            "Basic Information": {"name": "Tea"},
            "Dates & Batch": {"expiryDate": "2025-12-01"}
        }));
        let flat = normalize_shape(object);
        assert_eq!(
            Value::Object(flat),
            serde_json::json!({"name": "Tea", "expiryDate": "2025-12-01"})
        );
    }

    #[test]
    fn falsy_values_inside_groups_are_dropped() {
        let object = as_map(serde_json::json!({
            "Basic Information": {"name": "Tea", "company": "", "barcode": null},
            "Dates & Batch": {"batchNumber": 0},
            "Contact Information": {"consumerContact": {}}
        }));
        let flat = normalize_shape(object);
        assert_eq!(
            Value::Object(flat),
            serde_json::json!({"name": "Tea"})
        );
    }

    #[test]
    fn group_with_non_object_value_is_ignored() {
        let object = as_map(serde_json::json!({
            "Basic Information": {"name": "Tea"},
            "Ingredients & Nutrition": "none found"
        }));
        let flat = normalize_shape(object);
        assert_eq!(Value::Object(flat), serde_json::json!({"name": "Tea"}));
    }
}
