//! Text-to-structured-data extraction pipeline for product labels.
//!
//! Raw OCR text (or image bytes) go in; a validated flat
//! [`labelscan_core::ProductRecord`] plus a failure classification comes out.
//! The hosted model upstream is unreliable and schema-inconsistent, so the
//! pipeline is deliberately defensive: shape normalization for grouped JSON,
//! strict validation with a non-failing best-effort fallback, and an
//! all-missing record as the terminal safety net.

mod error;
mod gateway;
mod normalize;
mod pipeline;
pub mod prompt;
mod validate;

pub use error::ExtractError;
pub use gateway::{CompletionGateway, ModelClient};
pub use normalize::{classify_shape, normalize_shape, RawShape};
pub use pipeline::LabelExtractor;
pub use validate::{best_effort_extract, strict_validate, ValidationIssues};
