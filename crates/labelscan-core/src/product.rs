//! Canonical product record types.
//!
//! Every scan normalizes into this single flat shape. All fields are
//! optional; `None` is the one uniform "missing" representation — upstream
//! model output mixes `null`, absent keys, and empty strings, and all three
//! collapse to `None` here. Records are plain values: once assembled they
//! are never mutated.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The flat product record every label scan resolves to.
///
/// Field names serialize in camelCase to match the shape requested from the
/// extraction model and returned to API consumers. Commerce and temporal
/// fields stay free-form strings on purpose: labels use inconsistent units,
/// currency notation, and partial dates, so callers must treat them as
/// opaque display text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trademark: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub net_weight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mrp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_before: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacturing_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch_number: Option<String>,
    /// Ingredient list in label order; order is never normalized.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nutritional_info: Option<NutritionalInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacturing_addresses: Option<Vec<String>>,
    /// Multiple license numbers are joined into one comma-separated string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fssai_license: Option<String>,
    /// Free-text status ("green dot symbol", "non-veg"), not a boolean.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vegetarian: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consumer_contact: Option<ConsumerContact>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_details: Option<BTreeMap<String, String>>,
}

/// Per-serving nutrient values as printed on the label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NutritionalInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub energy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protein: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_carbohydrate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sugars: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_fat: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saturated_fat: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trans_fat: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sodium: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serving_size: Option<String>,
}

/// Customer-care details from the label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConsumerContact {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

fn prune(field: &mut Option<String>) {
    if field.as_deref().is_some_and(|s| s.trim().is_empty()) {
        *field = None;
    }
}

impl ProductRecord {
    /// The all-missing record returned on unrecoverable pipeline failure.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Collapses empty-string and whitespace-only values to `None` so the
    /// missing sentinel stays uniform regardless of how the upstream model
    /// encoded absence. Empty sequences and maps collapse the same way.
    #[must_use]
    pub fn normalize_missing(mut self) -> Self {
        prune(&mut self.name);
        prune(&mut self.company);
        prune(&mut self.manufacturer);
        prune(&mut self.trademark);
        prune(&mut self.barcode);
        prune(&mut self.net_weight);
        prune(&mut self.mrp);
        prune(&mut self.price);
        prune(&mut self.expiry_date);
        prune(&mut self.best_before);
        prune(&mut self.manufacturing_date);
        prune(&mut self.batch_number);
        prune(&mut self.fssai_license);
        prune(&mut self.vegetarian);

        if let Some(list) = &mut self.ingredients {
            list.retain(|s| !s.trim().is_empty());
        }
        if self.ingredients.as_ref().is_some_and(Vec::is_empty) {
            self.ingredients = None;
        }
        if let Some(list) = &mut self.manufacturing_addresses {
            list.retain(|s| !s.trim().is_empty());
        }
        if self
            .manufacturing_addresses
            .as_ref()
            .is_some_and(Vec::is_empty)
        {
            self.manufacturing_addresses = None;
        }

        if let Some(info) = &mut self.nutritional_info {
            prune(&mut info.energy);
            prune(&mut info.protein);
            prune(&mut info.total_carbohydrate);
            prune(&mut info.sugars);
            prune(&mut info.total_fat);
            prune(&mut info.saturated_fat);
            prune(&mut info.trans_fat);
            prune(&mut info.sodium);
            prune(&mut info.serving_size);
        }
        if self.nutritional_info == Some(NutritionalInfo::default()) {
            self.nutritional_info = None;
        }

        if let Some(contact) = &mut self.consumer_contact {
            prune(&mut contact.phone);
            prune(&mut contact.email);
            prune(&mut contact.address);
            prune(&mut contact.website);
        }
        if self.consumer_contact == Some(ConsumerContact::default()) {
            self.consumer_contact = None;
        }

        if let Some(details) = &mut self.other_details {
            details.retain(|k, v| !k.trim().is_empty() && !v.trim().is_empty());
        }
        if self.other_details.as_ref().is_some_and(BTreeMap::is_empty) {
            self.other_details = None;
        }

        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_record_has_all_fields_missing() {
        let record = ProductRecord::empty();
        assert_eq!(record, ProductRecord::default());
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json, serde_json::json!({}));
    }

    #[test]
    fn normalize_missing_collapses_empty_strings() {
        let record = ProductRecord {
            name: Some("Choco Bar".to_string()),
            company: Some(String::new()),
            barcode: Some("   ".to_string()),
            ..ProductRecord::default()
        }
        .normalize_missing();

        assert_eq!(record.name.as_deref(), Some("Choco Bar"));
        assert_eq!(record.company, None);
        assert_eq!(record.barcode, None);
    }

    #[test]
    fn normalize_missing_drops_empty_nested_records() {
        let record = ProductRecord {
            nutritional_info: Some(NutritionalInfo {
                energy: Some(String::new()),
                ..NutritionalInfo::default()
            }),
            consumer_contact: Some(ConsumerContact::default()),
            other_details: Some(BTreeMap::new()),
            ..ProductRecord::default()
        }
        .normalize_missing();

        assert_eq!(record.nutritional_info, None);
        assert_eq!(record.consumer_contact, None);
        assert_eq!(record.other_details, None);
    }

    #[test]
    fn normalize_missing_keeps_populated_nested_records() {
        let record = ProductRecord {
            nutritional_info: Some(NutritionalInfo {
                energy: Some("250 kcal".to_string()),
                protein: Some(String::new()),
                ..NutritionalInfo::default()
            }),
            ..ProductRecord::default()
        }
        .normalize_missing();

        let info = record.nutritional_info.expect("nutritional info kept");
        assert_eq!(info.energy.as_deref(), Some("250 kcal"));
        assert_eq!(info.protein, None);
    }

    #[test]
    fn record_serializes_camel_case_and_skips_missing() {
        let record = ProductRecord {
            net_weight: Some("100 g".to_string()),
            fssai_license: Some("A1234".to_string()),
            ..ProductRecord::default()
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"netWeight": "100 g", "fssaiLicense": "A1234"})
        );
    }

    #[test]
    fn record_deserializes_null_fields_as_missing() {
        let record: ProductRecord =
            serde_json::from_value(serde_json::json!({"name": "Tea", "mrp": null})).unwrap();
        assert_eq!(record.name.as_deref(), Some("Tea"));
        assert_eq!(record.mrp, None);
    }
}
