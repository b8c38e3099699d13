use labelscan_core::FailureKind;
use thiserror::Error;

/// Errors raised inside the extraction pipeline.
///
/// Only [`ExtractError::Configuration`] ever surfaces to a caller; every
/// other variant is caught by the orchestrator and converted into an empty
/// record plus a [`FailureKind`].
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The model credential is empty or missing. Raised before any network
    /// attempt.
    #[error("model API credential is not configured")]
    Configuration,

    /// The upstream rejected the credential (HTTP 401/403).
    #[error("model rejected the API credential (HTTP {status})")]
    Authentication { status: u16 },

    /// Rate or billing limit hit (HTTP 429).
    #[error("model rate or billing limit exceeded")]
    QuotaExceeded,

    /// The model or route does not exist (HTTP 404).
    #[error("model endpoint not found: {url}")]
    ServiceUnavailable { url: String },

    /// The call succeeded but carried no usable content.
    #[error("model returned an empty response")]
    EmptyResponse,

    /// The response (or its content) is not the JSON we asked for.
    #[error("model response is not valid JSON: {detail}")]
    MalformedJson { detail: String },

    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Any other non-2xx status from the upstream.
    #[error("unexpected HTTP status {status} from model endpoint")]
    UnexpectedStatus { status: u16 },
}

impl ExtractError {
    /// Maps an error onto the classification handed across the boundary.
    #[must_use]
    pub fn classify(&self) -> FailureKind {
        match self {
            ExtractError::Authentication { .. } => FailureKind::AuthenticationFailure,
            ExtractError::QuotaExceeded => FailureKind::QuotaExceeded,
            ExtractError::ServiceUnavailable { .. } => FailureKind::ServiceUnavailable,
            ExtractError::EmptyResponse => FailureKind::EmptyResponse,
            ExtractError::MalformedJson { .. } => FailureKind::ParsingFailed,
            // Configuration surfaces as `Err` at construction time and never
            // reaches the assembly path that calls `classify`.
            ExtractError::Configuration => FailureKind::UpstreamError,
            ExtractError::Http(_) | ExtractError::UnexpectedStatus { .. } => {
                FailureKind::UpstreamError
            }
        }
    }
}
