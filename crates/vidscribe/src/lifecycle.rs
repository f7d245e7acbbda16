//! Report lifecycle controller.
//!
//! Owns the PENDING → PROCESSING → COMPLETED | FAILED state machine.
//! Every transition is a single conditional update in the store; the
//! controller holds no report state of its own, so any number of
//! backends and polling readers can race through it safely.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::backend::{AnalysisResult, DispatchRequest, ProcessingBackend};
use crate::db::report_repo::{self, CompletionUpdate, ReportRow};
use crate::db::Database;
use crate::error::LifecycleError;
use crate::report::{Report, ReportStatus};

/// Title given to new reports until the user renames them.
pub const DEFAULT_TITLE: &str = "Untitled Transcription";

pub struct ReportLifecycle {
    db: Database,
    backend: Arc<dyn ProcessingBackend>,
}

impl ReportLifecycle {
    pub fn new(db: Database, backend: Arc<dyn ProcessingBackend>) -> Self {
        Self { db, backend }
    }

    /// Validates the URL, creates the PENDING record, and hands the
    /// report to the backend. Dispatch is fire-and-forget; the new id
    /// is returned to the caller immediately.
    pub fn submit(&self, source_url: &str) -> Result<String, LifecycleError> {
        let source_url = source_url.trim();
        if source_url.is_empty()
            || !(source_url.starts_with("http://") || source_url.starts_with("https://"))
        {
            return Err(LifecycleError::Validation {
                message: "Please provide a valid URL.".to_string(),
            });
        }

        let report = ReportRow {
            id: Uuid::new_v4().to_string(),
            created_at: Utc::now().to_rfc3339(),
            title: Some(DEFAULT_TITLE.to_string()),
            source_url: source_url.to_string(),
            status: ReportStatus::Pending.as_str().to_string(),
            synopsis: None,
            key_takeaways: None,
            cleaned_transcript: None,
            original_transcript: None,
            error_message: None,
        };
        report_repo::insert(&self.db, &report)?;
        log::info!("Report {} created for {}", report.id, source_url);

        self.backend.dispatch(DispatchRequest {
            report_id: report.id.clone(),
            source_url: source_url.to_string(),
        });

        Ok(report.id)
    }

    pub fn get(&self, id: &str) -> Result<Report, LifecycleError> {
        let row = report_repo::find_by_id(&self.db, id)?
            .ok_or_else(|| LifecycleError::NotFound { id: id.to_string() })?;
        Ok(Report::from_row(&row))
    }

    /// All reports, newest first.
    pub fn list_all(&self) -> Result<Vec<Report>, LifecycleError> {
        let rows = report_repo::list_all(&self.db)?;
        Ok(rows.iter().map(Report::from_row).collect())
    }

    /// The PENDING → PROCESSING claim. Returns whether this caller won
    /// it; false means another backend got there first or the report is
    /// already past PENDING.
    pub fn mark_processing(&self, id: &str) -> Result<bool, LifecycleError> {
        self.ensure_exists(id)?;
        let claimed = report_repo::claim_pending(&self.db, id)?;
        if claimed {
            log::info!("Report {} claimed for processing", id);
        } else {
            log::debug!("Report {} not claimable", id);
        }
        Ok(claimed)
    }

    /// Records a successful run. Idempotent: a report already in a
    /// terminal state is left untouched and reported as false.
    pub fn mark_completed(&self, id: &str, result: AnalysisResult) -> Result<bool, LifecycleError> {
        self.apply_completion(id, result.into_update())
    }

    /// Applies a partial completion patch, as delivered by webhook
    /// backends. Fields absent from the update keep their stored value;
    /// terminal reports are untouched.
    pub fn apply_completion(
        &self,
        id: &str,
        update: CompletionUpdate,
    ) -> Result<bool, LifecycleError> {
        self.ensure_exists(id)?;
        let applied = report_repo::complete(&self.db, id, &update)?;
        if applied {
            log::info!("Report {} completed", id);
        } else {
            log::warn!("Completion for report {} ignored (already terminal)", id);
        }
        Ok(applied)
    }

    /// Records a failed run. Same terminal idempotency as
    /// `mark_completed`.
    pub fn mark_failed(&self, id: &str, error_message: &str) -> Result<bool, LifecycleError> {
        self.ensure_exists(id)?;
        let applied = report_repo::fail(&self.db, id, error_message)?;
        if applied {
            log::info!("Report {} failed: {}", id, error_message);
        } else {
            log::warn!("Failure for report {} ignored (already terminal)", id);
        }
        Ok(applied)
    }

    /// Renames a report. An empty new title is a silent no-op, as is a
    /// title equal to the current one.
    pub fn rename(&self, id: &str, new_title: &str) -> Result<(), LifecycleError> {
        let new_title = new_title.trim();
        if new_title.is_empty() {
            return Ok(());
        }

        let row = report_repo::find_by_id(&self.db, id)?
            .ok_or_else(|| LifecycleError::NotFound { id: id.to_string() })?;
        if row.title.as_deref() == Some(new_title) {
            return Ok(());
        }

        if !report_repo::update_title(&self.db, id, new_title)? {
            return Err(LifecycleError::NotFound { id: id.to_string() });
        }
        log::info!("Report {} renamed to '{}'", id, new_title);
        Ok(())
    }

    /// Copies a report. The copy gets a fresh id and timestamp, the
    /// title gains a " (Copy)" suffix, and the status is forced to
    /// COMPLETED regardless of the source status.
    pub fn duplicate(&self, id: &str) -> Result<Report, LifecycleError> {
        let source = report_repo::find_by_id(&self.db, id)?
            .ok_or_else(|| LifecycleError::NotFound { id: id.to_string() })?;

        let copy = ReportRow {
            id: Uuid::new_v4().to_string(),
            created_at: Utc::now().to_rfc3339(),
            title: Some(format!(
                "{} (Copy)",
                source.title.as_deref().unwrap_or(DEFAULT_TITLE)
            )),
            source_url: source.source_url.clone(),
            status: ReportStatus::Completed.as_str().to_string(),
            synopsis: source.synopsis.clone(),
            key_takeaways: source.key_takeaways.clone(),
            cleaned_transcript: source.cleaned_transcript.clone(),
            original_transcript: source.original_transcript.clone(),
            error_message: source.error_message.clone(),
        };
        report_repo::insert(&self.db, &copy)?;
        log::info!("Report {} duplicated as {}", id, copy.id);

        Ok(Report::from_row(&copy))
    }

    pub fn delete(&self, id: &str) -> Result<(), LifecycleError> {
        if !report_repo::delete(&self.db, id)? {
            return Err(LifecycleError::NotFound { id: id.to_string() });
        }
        log::info!("Report {} deleted", id);
        Ok(())
    }

    fn ensure_exists(&self, id: &str) -> Result<(), LifecycleError> {
        if report_repo::find_by_id(&self.db, id)?.is_none() {
            return Err(LifecycleError::NotFound { id: id.to_string() });
        }
        Ok(())
    }
}
