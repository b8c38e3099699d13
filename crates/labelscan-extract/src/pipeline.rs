//! Pipeline orchestration: prompt → gateway → normalize → validate.
//!
//! Every public entry point returns a [`ScanOutcome`]; no upstream failure
//! escapes as an error. The one exception is a missing credential, which is
//! rejected at construction time before any network attempt.

use serde_json::{Map, Value};

use labelscan_core::{AppConfig, ProductRecord, ScanOutcome};

use crate::error::ExtractError;
use crate::gateway::{CompletionGateway, ModelClient};
use crate::normalize::normalize_shape;
use crate::prompt;
use crate::validate::{best_effort_extract, strict_validate};

/// One stateless extraction pipeline. Independent per scan; holds no shared
/// mutable state, so concurrent scans need no coordination.
pub struct LabelExtractor<G> {
    gateway: G,
}

impl LabelExtractor<ModelClient> {
    /// Builds the production pipeline from application config.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::Configuration`] when the model credential is
    /// absent — no scan may attempt network I/O without one.
    pub fn from_config(config: &AppConfig) -> Result<Self, ExtractError> {
        let api_key = config
            .model_api_key
            .as_deref()
            .ok_or(ExtractError::Configuration)?;
        let gateway = ModelClient::with_base_url(
            api_key,
            &config.model,
            config.request_timeout_secs,
            &config.model_base_url,
        )?;
        Ok(Self::new(gateway))
    }
}

impl<G: CompletionGateway> LabelExtractor<G> {
    #[must_use]
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    /// Access to the underlying gateway, mainly for test doubles that track
    /// invocation counts.
    #[must_use]
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Runs the pipeline over OCR text from the on-device recognizer.
    pub async fn scan_text(&self, label_text: &str) -> ScanOutcome {
        let instruction = prompt::text_extraction_prompt(label_text);
        let response = self.gateway.complete_text(&instruction).await;
        assemble(response)
    }

    /// Runs the pipeline over raw image bytes and their MIME type.
    pub async fn scan_image(&self, image_bytes: &[u8], mime_type: &str) -> ScanOutcome {
        let instruction = prompt::image_extraction_prompt();
        let response = self
            .gateway
            .complete_image(&instruction, image_bytes, mime_type)
            .await;
        assemble(response)
    }
}

/// Models wrap answers in markdown fences often enough that stripping them
/// is cheaper than re-asking.
fn strip_code_fences(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner.strip_suffix("```").unwrap_or(inner).trim()
}

/// Parses the raw response content into a JSON object.
fn parse_object(content: &str) -> Result<Map<String, Value>, ExtractError> {
    let value: Value =
        serde_json::from_str(strip_code_fences(content)).map_err(|e| ExtractError::MalformedJson {
            detail: e.to_string(),
        })?;
    match value {
        Value::Object(object) => Ok(object),
        other => Err(ExtractError::MalformedJson {
            detail: format!("expected a JSON object, got {other}"),
        }),
    }
}

/// Terminal stage: any failure becomes an all-missing record plus its
/// classification. This path does not fail.
fn assemble(response: Result<String, ExtractError>) -> ScanOutcome {
    let content = match response {
        Ok(content) => content,
        Err(err) => {
            tracing::warn!(error = %err, "model call failed; returning empty record");
            return ScanOutcome::failed(err.classify());
        }
    };

    let object = match parse_object(&content) {
        Ok(object) => object,
        Err(err) => {
            tracing::warn!(error = %err, "unparsable model response; returning empty record");
            return ScanOutcome::failed(err.classify());
        }
    };

    let flat = normalize_shape(object);
    let record = validate_or_salvage(&flat);
    ScanOutcome::success(record)
}

fn validate_or_salvage(flat: &Map<String, Value>) -> ProductRecord {
    match strict_validate(flat) {
        Ok(record) => record,
        Err(issues) => {
            tracing::warn!(error = %issues, "strict validation failed; extracting best-effort");
            best_effort_extract(flat)
        }
    }
}
