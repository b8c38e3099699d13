//! Scan outcome: a record paired with an explicit failure classification.

use serde::{Deserialize, Serialize};

use crate::product::ProductRecord;

/// Why a scan produced less than a fully-extracted record.
///
/// Classified from transport status codes, never by string-matching response
/// bodies. `None` means the pipeline ran end to end; it does not promise the
/// model found anything on the label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    None,
    AuthenticationFailure,
    QuotaExceeded,
    ServiceUnavailable,
    EmptyResponse,
    ParsingFailed,
    UpstreamError,
}

impl FailureKind {
    #[must_use]
    pub fn is_failure(self) -> bool {
        self != FailureKind::None
    }
}

/// What every public pipeline entry point returns.
///
/// The record is always structurally valid; on failure it is simply empty
/// and `failure` says why. No exception crosses the core/boundary line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanOutcome {
    pub record: ProductRecord,
    pub failure: FailureKind,
}

impl ScanOutcome {
    #[must_use]
    pub fn success(record: ProductRecord) -> Self {
        Self {
            record,
            failure: FailureKind::None,
        }
    }

    /// The terminal safety net: an all-missing record plus the reason.
    #[must_use]
    pub fn failed(failure: FailureKind) -> Self {
        Self {
            record: ProductRecord::empty(),
            failure,
        }
    }
}
