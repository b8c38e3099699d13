//! Scan endpoints: the HTTP boundary over the extraction pipeline.
//!
//! The pipeline itself never fails; handlers translate its failure
//! classification into a human-readable advisory and, for the text path,
//! echo the submitted OCR text so the caller always has something to show.

use axum::{extract::State, Extension, Json};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};

use labelscan_core::{FailureKind, ScanOutcome};

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct TextScanRequest {
    text: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ImageScanRequest {
    image_base64: String,
    mime_type: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ScanData {
    record: labelscan_core::ProductRecord,
    failure: FailureKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    advisory: Option<&'static str>,
    /// The OCR text as submitted, echoed back verbatim so the UI can show
    /// it as a fallback artifact when extraction comes back empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    extracted_text: Option<String>,
}

/// Maps a failure classification to the advisory shown to the user.
fn advisory(failure: FailureKind) -> Option<&'static str> {
    match failure {
        FailureKind::None => None,
        FailureKind::AuthenticationFailure => {
            Some("The scan service could not authenticate with the extraction model.")
        }
        FailureKind::QuotaExceeded => {
            Some("The scan service is over its usage limit. Please try again in a few minutes.")
        }
        FailureKind::ServiceUnavailable => {
            Some("The extraction model is currently unavailable. Please try again later.")
        }
        FailureKind::EmptyResponse => {
            Some("The model returned nothing for this label. Try a clearer photo.")
        }
        FailureKind::ParsingFailed => {
            Some("The model's answer could not be understood. The raw label text is shown instead.")
        }
        FailureKind::UpstreamError => {
            Some("Something went wrong while contacting the extraction service. Please try again.")
        }
    }
}

fn scan_data(outcome: ScanOutcome, extracted_text: Option<String>) -> ScanData {
    ScanData {
        advisory: advisory(outcome.failure),
        record: outcome.record,
        failure: outcome.failure,
        extracted_text,
    }
}

pub(super) async fn scan_text(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(request): Json<TextScanRequest>,
) -> Result<Json<ApiResponse<ScanData>>, ApiError> {
    if request.text.trim().is_empty() {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            "text must not be empty",
        ));
    }

    let outcome = state.extractor.scan_text(&request.text).await;
    Ok(Json(ApiResponse {
        data: scan_data(outcome, Some(request.text)),
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn scan_image(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(request): Json<ImageScanRequest>,
) -> Result<Json<ApiResponse<ScanData>>, ApiError> {
    if request.mime_type.trim().is_empty() {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            "mimeType must not be empty",
        ));
    }

    let image_bytes = BASE64.decode(request.image_base64.as_bytes()).map_err(|e| {
        ApiError::new(
            req_id.0.clone(),
            "validation_error",
            format!("imageBase64 is not valid base64: {e}"),
        )
    })?;

    let outcome = state
        .extractor
        .scan_image(&image_bytes, &request.mime_type)
        .await;
    Ok(Json(ApiResponse {
        data: scan_data(outcome, None),
        meta: ResponseMeta::new(req_id.0),
    }))
}
