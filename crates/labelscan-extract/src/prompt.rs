//! Extraction instructions sent to the hosted model.
//!
//! Pure string construction: every target field is enumerated with its
//! meaning and an example format, and the model is told to answer with a
//! single JSON object and nothing else.

/// Shared description of the target record shape.
const RECORD_SPEC: &str = r#"Return a single JSON object with exactly these keys (use null for anything not present on the label, never omit a key):
- "name": product name as printed, e.g. "Choco Crunch Bar"
- "company": marketing company or brand owner
- "manufacturer": manufacturing company if stated separately
- "trademark": trademark owner if stated
- "barcode": barcode digits, e.g. "8901234567890"
- "netWeight": net quantity with unit as printed, e.g. "100 g"
- "mrp": maximum retail price as printed including currency, e.g. "₹50.00 (incl. of all taxes)"
- "price": any other price text on the label
- "expiryDate": expiry/use-by text exactly as printed, e.g. "DEC 2025"
- "bestBefore": best-before text, e.g. "Best before 9 months from manufacture"
- "manufacturingDate": manufacturing/packing date as printed
- "batchNumber": batch or lot number, e.g. "B2412A"
- "ingredients": array of ingredient strings in label order
- "nutritionalInfo": object with keys "energy", "protein", "totalCarbohydrate", "sugars", "totalFat", "saturatedFat", "transFat", "sodium", "servingSize" (values as printed with units, e.g. "250 kcal")
- "manufacturingAddresses": array of full address strings
- "fssaiLicense": FSSAI license number(s); join multiple with ", "
- "vegetarian": the veg/non-veg declaration as text, e.g. "green dot (vegetarian)"
- "consumerContact": object with keys "phone", "email", "address", "website"
- "otherDetails": object of any remaining label text as key/value string pairs

Keep values verbatim from the label. Do not convert units, currencies, or dates. Respond with JSON only: no prose, no markdown fences."#;

/// Builds the instruction for raw OCR text input.
#[must_use]
pub fn text_extraction_prompt(label_text: &str) -> String {
    format!(
        "You are given text extracted from a packaged product label by OCR. \
         It may contain recognition noise and broken line ordering.\n\n\
         {RECORD_SPEC}\n\nLabel text:\n{label_text}"
    )
}

/// Builds the instruction paired with an image payload.
///
/// The image itself travels as a separate message part; this is only the
/// textual half of the request.
#[must_use]
pub fn image_extraction_prompt() -> String {
    format!(
        "You are given a photo of a packaged product label. Read all visible \
         text on it.\n\n{RECORD_SPEC}"
    )
}
