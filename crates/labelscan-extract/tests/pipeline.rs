//! Pipeline tests through the `CompletionGateway` seam with an in-process
//! mock, no HTTP involved.

use std::sync::atomic::{AtomicUsize, Ordering};

use labelscan_core::FailureKind;
use labelscan_extract::{CompletionGateway, ExtractError, LabelExtractor};

/// Gateway double that counts invocations and replays a canned result.
struct ScriptedGateway {
    calls: AtomicUsize,
    response: fn() -> Result<String, ExtractError>,
}

impl ScriptedGateway {
    fn new(response: fn() -> Result<String, ExtractError>) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            response,
        }
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl CompletionGateway for ScriptedGateway {
    async fn complete_text(&self, _prompt: &str) -> Result<String, ExtractError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        (self.response)()
    }

    async fn complete_image(
        &self,
        _prompt: &str,
        _image_bytes: &[u8],
        _mime_type: &str,
    ) -> Result<String, ExtractError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        (self.response)()
    }
}

#[tokio::test]
async fn scan_text_calls_gateway_exactly_once() {
    let extractor = LabelExtractor::new(ScriptedGateway::new(|| {
        Ok(r#"{"name":"Choco Bar"}"#.to_string())
    }));

    let outcome = extractor.scan_text("CHOCO BAR").await;

    assert_eq!(outcome.failure, FailureKind::None);
    assert_eq!(outcome.record.name.as_deref(), Some("Choco Bar"));
    assert_eq!(extractor.gateway().call_count(), 1);
}

#[tokio::test]
async fn gateway_exception_yields_all_missing_record() {
    let extractor = LabelExtractor::new(ScriptedGateway::new(|| {
        Err(ExtractError::UnexpectedStatus { status: 502 })
    }));

    let outcome = extractor.scan_text("anything").await;

    assert_eq!(outcome.failure, FailureKind::UpstreamError);
    assert_eq!(outcome.record, labelscan_core::ProductRecord::empty());
}

#[tokio::test]
async fn no_internal_retry_on_quota_errors() {
    let extractor = LabelExtractor::new(ScriptedGateway::new(|| Err(ExtractError::QuotaExceeded)));

    let outcome = extractor.scan_text("anything").await;

    assert_eq!(outcome.failure, FailureKind::QuotaExceeded);
    // Retry/backoff is the caller's concern; one scan means one call.
    assert_eq!(extractor.gateway().call_count(), 1);
}

#[tokio::test]
async fn scan_image_routes_through_gateway_once() {
    let extractor =
        LabelExtractor::new(ScriptedGateway::new(|| Ok(r#"{"name":"Tea"}"#.to_string())));

    let outcome = extractor.scan_image(b"bytes", "image/png").await;

    assert_eq!(outcome.failure, FailureKind::None);
    assert_eq!(outcome.record.name.as_deref(), Some("Tea"));
    assert_eq!(extractor.gateway().call_count(), 1);
}
