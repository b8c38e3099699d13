//! Record validation: strict first, best-effort second, never a rejection.
//!
//! `strict_validate` deserializes the flat object against the canonical
//! schema. When that fails — the model put a number where a string belongs,
//! or an object where a list belongs — `best_effort_extract` copies every
//! plausible field individually so the caller still receives a structurally
//! valid record. Validation failure is a warning, not an error.

use serde_json::{Map, Value};
use thiserror::Error;

use labelscan_core::{ConsumerContact, NutritionalInfo, ProductRecord};

/// Why strict validation refused the flat object. Non-fatal by contract:
/// it only downgrades to best-effort extraction.
#[derive(Debug, Error)]
#[error("record validation failed: {detail}")]
pub struct ValidationIssues {
    pub detail: String,
}

/// Validates and coerces the flat object against the canonical schema.
///
/// Every scalar field accepts a string, `null`, or absence; sequences must
/// be arrays of strings; nested records must match their sub-schema. Empty
/// strings normalize to the missing sentinel after deserialization.
///
/// # Errors
///
/// Returns [`ValidationIssues`] when any field cannot coerce to its
/// expected shape. Callers fall back to [`best_effort_extract`].
pub fn strict_validate(flat: &Map<String, Value>) -> Result<ProductRecord, ValidationIssues> {
    serde_json::from_value::<ProductRecord>(Value::Object(flat.clone()))
        .map(ProductRecord::normalize_missing)
        .map_err(|e| ValidationIssues {
            detail: e.to_string(),
        })
}

fn get_string(object: &Map<String, Value>, key: &str) -> Option<String> {
    object
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
}

fn get_string_list(object: &Map<String, Value>, key: &str) -> Option<Vec<String>> {
    let items: Vec<String> = object
        .get(key)?
        .as_array()?
        .iter()
        .filter_map(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
        .collect();
    if items.is_empty() {
        None
    } else {
        Some(items)
    }
}

fn get_object<'a>(object: &'a Map<String, Value>, key: &str) -> Option<&'a Map<String, Value>> {
    object.get(key).and_then(Value::as_object)
}

/// Copies every canonical field out of the flat object if present and of a
/// plausible type, defaulting to the missing sentinel otherwise.
///
/// This function never fails: one malformed field never poisons the rest of
/// the record.
#[must_use]
pub fn best_effort_extract(flat: &Map<String, Value>) -> ProductRecord {
    let nutritional_info = get_object(flat, "nutritionalInfo").map(|info| NutritionalInfo {
        energy: get_string(info, "energy"),
        protein: get_string(info, "protein"),
        total_carbohydrate: get_string(info, "totalCarbohydrate"),
        sugars: get_string(info, "sugars"),
        total_fat: get_string(info, "totalFat"),
        saturated_fat: get_string(info, "saturatedFat"),
        trans_fat: get_string(info, "transFat"),
        sodium: get_string(info, "sodium"),
        serving_size: get_string(info, "servingSize"),
    });

    let consumer_contact = get_object(flat, "consumerContact").map(|contact| ConsumerContact {
        phone: get_string(contact, "phone"),
        email: get_string(contact, "email"),
        address: get_string(contact, "address"),
        website: get_string(contact, "website"),
    });

    let other_details = get_object(flat, "otherDetails").map(|details| {
        details
            .iter()
            .filter_map(|(k, v)| Some((k.clone(), v.as_str()?.to_owned())))
            .collect()
    });

    ProductRecord {
        name: get_string(flat, "name"),
        company: get_string(flat, "company"),
        manufacturer: get_string(flat, "manufacturer"),
        trademark: get_string(flat, "trademark"),
        barcode: get_string(flat, "barcode"),
        net_weight: get_string(flat, "netWeight"),
        mrp: get_string(flat, "mrp"),
        price: get_string(flat, "price"),
        expiry_date: get_string(flat, "expiryDate"),
        best_before: get_string(flat, "bestBefore"),
        manufacturing_date: get_string(flat, "manufacturingDate"),
        batch_number: get_string(flat, "batchNumber"),
        ingredients: get_string_list(flat, "ingredients"),
        nutritional_info,
        manufacturing_addresses: get_string_list(flat, "manufacturingAddresses"),
        fssai_license: get_string(flat, "fssaiLicense"),
        vegetarian: get_string(flat, "vegetarian"),
        consumer_contact,
        other_details,
    }
    .normalize_missing()
}
