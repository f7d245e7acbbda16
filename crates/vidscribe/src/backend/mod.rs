//! Processing backends.
//!
//! A backend receives newly submitted reports and eventually reports
//! progress back through the lifecycle transitions. Dispatch is
//! fire-and-forget: a lost dispatch leaves the report PENDING, where
//! the polling worker will find it.

pub mod mock;
pub mod webhook;

use serde::{Deserialize, Serialize};

use crate::db::report_repo::CompletionUpdate;

pub use mock::MockBackend;
pub use webhook::WebhookBackend;

/// Work order handed to a backend when a report is submitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchRequest {
    pub report_id: String,
    pub source_url: String,
}

/// What a finished transcription run produces.
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    pub synopsis: String,
    pub key_takeaways: Vec<String>,
    pub cleaned_transcript: String,
    pub original_transcript: String,
}

impl AnalysisResult {
    /// The store-level update carrying this result.
    pub fn into_update(self) -> CompletionUpdate {
        CompletionUpdate {
            title: None,
            synopsis: Some(self.synopsis),
            key_takeaways: Some(self.key_takeaways),
            cleaned_transcript: Some(self.cleaned_transcript),
            original_transcript: Some(self.original_transcript),
        }
    }
}

/// A destination for submitted reports.
pub trait ProcessingBackend: Send + Sync {
    /// Hands a new report to the backend without blocking. Delivery
    /// failures are the backend's to log; the report simply stays
    /// PENDING.
    fn dispatch(&self, request: DispatchRequest);
}
