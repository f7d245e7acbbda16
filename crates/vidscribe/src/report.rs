//! Report model shared by the store, the lifecycle controller, and the
//! HTTP API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::db::report_repo::ReportRow;

// ─── Helpers ────────────────────────────────────────────────────────────────

fn parse_status(s: &str, report_id: &str) -> ReportStatus {
    match s {
        "PENDING" => ReportStatus::Pending,
        "PROCESSING" => ReportStatus::Processing,
        "COMPLETED" => ReportStatus::Completed,
        "FAILED" => ReportStatus::Failed,
        other => {
            log::warn!(
                "Unknown report status '{}' for report {}, defaulting to Pending",
                other,
                report_id
            );
            ReportStatus::Pending
        }
    }
}

fn parse_timestamp(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|e| {
            log::warn!("parse_timestamp: failed to parse '{}': {}", s, e);
            Utc::now()
        })
}

fn parse_takeaways(raw: &str, report_id: &str) -> Option<Vec<String>> {
    match serde_json::from_str(raw) {
        Ok(takeaways) => Some(takeaways),
        Err(e) => {
            log::warn!(
                "Malformed key_takeaways for report {}: {}",
                report_id,
                e
            );
            None
        }
    }
}

// ─── ReportStatus ───────────────────────────────────────────────────────────

/// Lifecycle state of a report.
///
/// `Pending` and `Processing` are transient; `Completed` and `Failed`
/// are terminal and never change again.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReportStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl ReportStatus {
    /// The stored (and wire) representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Pending => "PENDING",
            ReportStatus::Processing => "PROCESSING",
            ReportStatus::Completed => "COMPLETED",
            ReportStatus::Failed => "FAILED",
        }
    }

    /// True for states no further transition can leave.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ReportStatus::Completed | ReportStatus::Failed)
    }
}

// ─── Report ─────────────────────────────────────────────────────────────────

/// A transcription report as exposed to clients.
///
/// Optional fields serialize as explicit `null` so polling clients can
/// distinguish "not produced yet" without field probing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Unique report identifier.
    pub id: String,
    /// When the report was submitted.
    pub created_at: DateTime<Utc>,
    /// Display title, user-editable.
    pub title: Option<String>,
    /// The video URL this report was created for.
    pub source_url: String,
    /// Current lifecycle state.
    pub status: ReportStatus,
    /// Short summary (set on completion).
    pub synopsis: Option<String>,
    /// Ordered list of key points (set on completion).
    pub key_takeaways: Option<Vec<String>>,
    /// Transcript with filler words removed (set on completion).
    pub cleaned_transcript: Option<String>,
    /// Raw transcript (set on completion).
    pub original_transcript: Option<String>,
    /// What went wrong (set on failure).
    pub error_message: Option<String>,
}

impl Report {
    /// Builds the API model from a database row. Unknown status strings
    /// and malformed takeaway arrays degrade with a warning instead of
    /// failing the read path.
    pub fn from_row(row: &ReportRow) -> Self {
        let status = parse_status(&row.status, &row.id);
        let created_at = parse_timestamp(&row.created_at);
        let key_takeaways = row
            .key_takeaways
            .as_ref()
            .and_then(|raw| parse_takeaways(raw, &row.id));

        Self {
            id: row.id.clone(),
            created_at,
            title: row.title.clone(),
            source_url: row.source_url.clone(),
            status,
            synopsis: row.synopsis.clone(),
            key_takeaways,
            cleaned_transcript: row.cleaned_transcript.clone(),
            original_transcript: row.original_transcript.clone(),
            error_message: row.error_message.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row() -> ReportRow {
        ReportRow {
            id: "rep-1".to_string(),
            created_at: "2026-02-10T12:30:00Z".to_string(),
            title: Some("Untitled Transcription".to_string()),
            source_url: "https://example.com/watch?v=abc".to_string(),
            status: "COMPLETED".to_string(),
            synopsis: Some("Summary.".to_string()),
            key_takeaways: Some(r#"["First","Second"]"#.to_string()),
            cleaned_transcript: Some("Clean.".to_string()),
            original_transcript: Some("uh, raw".to_string()),
            error_message: None,
        }
    }

    #[test]
    fn test_status_wire_format() {
        assert_eq!(
            serde_json::to_value(ReportStatus::Pending).unwrap(),
            serde_json::json!("PENDING")
        );
        let parsed: ReportStatus = serde_json::from_value(serde_json::json!("FAILED")).unwrap();
        assert_eq!(parsed, ReportStatus::Failed);
    }

    #[test]
    fn test_status_terminal() {
        assert!(!ReportStatus::Pending.is_terminal());
        assert!(!ReportStatus::Processing.is_terminal());
        assert!(ReportStatus::Completed.is_terminal());
        assert!(ReportStatus::Failed.is_terminal());
    }

    #[test]
    fn test_parse_status_lenient() {
        assert_eq!(parse_status("PROCESSING", "x"), ReportStatus::Processing);
        assert_eq!(parse_status("bogus", "x"), ReportStatus::Pending);
    }

    #[test]
    fn test_from_row() {
        let report = Report::from_row(&sample_row());
        assert_eq!(report.id, "rep-1");
        assert_eq!(report.status, ReportStatus::Completed);
        assert_eq!(report.created_at.to_rfc3339(), "2026-02-10T12:30:00+00:00");
        assert_eq!(
            report.key_takeaways,
            Some(vec!["First".to_string(), "Second".to_string()])
        );
    }

    #[test]
    fn test_from_row_malformed_takeaways() {
        let mut row = sample_row();
        row.key_takeaways = Some("not-json".to_string());
        let report = Report::from_row(&row);
        assert!(report.key_takeaways.is_none());
    }

    #[test]
    fn test_report_serializes_explicit_nulls() {
        let mut row = sample_row();
        row.status = "PENDING".to_string();
        row.synopsis = None;
        row.key_takeaways = None;
        let value = serde_json::to_value(Report::from_row(&row)).unwrap();
        assert!(value.get("synopsis").is_some());
        assert!(value["synopsis"].is_null());
        assert!(value["key_takeaways"].is_null());
        assert_eq!(value["status"], "PENDING");
    }
}
