//! CRUD and status transitions for the `reports` table.
//!
//! Status transitions are single conditional UPDATE statements; the
//! affected-row count tells the caller whether the transition applied.
//! That is what makes concurrent backends safe: only one claimer can
//! move a report out of PENDING, and terminal rows never change again.

use rusqlite::{params, Row};

use super::{Database, DatabaseError};

/// A raw report row from the database.
///
/// `key_takeaways` holds a JSON array of strings, encoded at the repo
/// boundary and decoded when converting to the API model.
#[derive(Debug, Clone)]
pub struct ReportRow {
    pub id: String,
    pub created_at: String,
    pub title: Option<String>,
    pub source_url: String,
    pub status: String,
    pub synopsis: Option<String>,
    pub key_takeaways: Option<String>,
    pub cleaned_transcript: Option<String>,
    pub original_transcript: Option<String>,
    pub error_message: Option<String>,
}

impl ReportRow {
    fn from_row(row: &Row<'_>) -> Result<Self, rusqlite::Error> {
        Ok(Self {
            id: row.get("id")?,
            created_at: row.get("created_at")?,
            title: row.get("title")?,
            source_url: row.get("source_url")?,
            status: row.get("status")?,
            synopsis: row.get("synopsis")?,
            key_takeaways: row.get("key_takeaways")?,
            cleaned_transcript: row.get("cleaned_transcript")?,
            original_transcript: row.get("original_transcript")?,
            error_message: row.get("error_message")?,
        })
    }
}

/// Fields a finished backend may report. Absent fields keep their
/// stored value.
#[derive(Debug, Default, Clone)]
pub struct CompletionUpdate {
    pub title: Option<String>,
    pub synopsis: Option<String>,
    pub key_takeaways: Option<Vec<String>>,
    pub cleaned_transcript: Option<String>,
    pub original_transcript: Option<String>,
}

/// Inserts a new report row.
pub fn insert(db: &Database, report: &ReportRow) -> Result<(), DatabaseError> {
    db.with_conn(|conn| {
        conn.execute(
            "INSERT INTO reports (id, created_at, title, source_url, status, synopsis,
             key_takeaways, cleaned_transcript, original_transcript, error_message)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                report.id,
                report.created_at,
                report.title,
                report.source_url,
                report.status,
                report.synopsis,
                report.key_takeaways,
                report.cleaned_transcript,
                report.original_transcript,
                report.error_message,
            ],
        )?;
        Ok(())
    })
}

/// Finds a report by its ID.
pub fn find_by_id(db: &Database, id: &str) -> Result<Option<ReportRow>, DatabaseError> {
    db.with_conn(|conn| {
        let mut stmt = conn.prepare("SELECT * FROM reports WHERE id = ?1")?;
        let mut rows = stmt.query_map(params![id], ReportRow::from_row)?;
        match rows.next() {
            Some(Ok(row)) => Ok(Some(row)),
            Some(Err(e)) => Err(DatabaseError::Sqlite(e)),
            None => Ok(None),
        }
    })
}

/// Returns all reports, newest first.
pub fn list_all(db: &Database) -> Result<Vec<ReportRow>, DatabaseError> {
    db.with_conn(|conn| {
        let mut stmt = conn.prepare("SELECT * FROM reports ORDER BY created_at DESC")?;
        let rows: Vec<ReportRow> = stmt
            .query_map([], ReportRow::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    })
}

/// IDs of all PENDING reports, oldest first.
pub fn pending_ids(db: &Database) -> Result<Vec<String>, DatabaseError> {
    db.with_conn(|conn| {
        let mut stmt = conn.prepare(
            "SELECT id FROM reports WHERE status = 'PENDING' ORDER BY created_at ASC",
        )?;
        let ids: Vec<String> = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ids)
    })
}

/// Sets a report's title. Returns false when no such report exists.
pub fn update_title(db: &Database, id: &str, title: &str) -> Result<bool, DatabaseError> {
    db.with_conn(|conn| {
        let affected = conn.execute(
            "UPDATE reports SET title = ?2 WHERE id = ?1",
            params![id, title],
        )?;
        Ok(affected > 0)
    })
}

/// Deletes a report. Returns false when no such report exists.
pub fn delete(db: &Database, id: &str) -> Result<bool, DatabaseError> {
    db.with_conn(|conn| {
        let affected = conn.execute("DELETE FROM reports WHERE id = ?1", params![id])?;
        Ok(affected > 0)
    })
}

/// Claims a PENDING report for processing. Returns false when the
/// report is missing or already past PENDING, so concurrent claimers
/// cannot both win.
pub fn claim_pending(db: &Database, id: &str) -> Result<bool, DatabaseError> {
    db.with_conn(|conn| {
        let affected = conn.execute(
            "UPDATE reports SET status = 'PROCESSING' WHERE id = ?1 AND status = 'PENDING'",
            params![id],
        )?;
        Ok(affected > 0)
    })
}

/// Marks a report COMPLETED, storing whichever result fields the update
/// carries. Terminal rows are left untouched and reported as false.
pub fn complete(db: &Database, id: &str, update: &CompletionUpdate) -> Result<bool, DatabaseError> {
    db.with_conn(|conn| {
        let mut assignments = vec!["status = 'COMPLETED'".to_string()];
        let mut param_values: Vec<Box<dyn rusqlite::types::ToSql>> = Vec::new();

        if let Some(ref title) = update.title {
            param_values.push(Box::new(title.clone()));
            assignments.push(format!("title = ?{}", param_values.len()));
        }
        if let Some(ref synopsis) = update.synopsis {
            param_values.push(Box::new(synopsis.clone()));
            assignments.push(format!("synopsis = ?{}", param_values.len()));
        }
        if let Some(ref takeaways) = update.key_takeaways {
            // Stored as a JSON array of strings.
            param_values.push(Box::new(serde_json::Value::from(takeaways.clone()).to_string()));
            assignments.push(format!("key_takeaways = ?{}", param_values.len()));
        }
        if let Some(ref cleaned) = update.cleaned_transcript {
            param_values.push(Box::new(cleaned.clone()));
            assignments.push(format!("cleaned_transcript = ?{}", param_values.len()));
        }
        if let Some(ref original) = update.original_transcript {
            param_values.push(Box::new(original.clone()));
            assignments.push(format!("original_transcript = ?{}", param_values.len()));
        }

        param_values.push(Box::new(id.to_string()));
        let sql = format!(
            "UPDATE reports SET {} WHERE id = ?{} AND status NOT IN ('COMPLETED', 'FAILED')",
            assignments.join(", "),
            param_values.len()
        );

        let params_ref: Vec<&dyn rusqlite::types::ToSql> =
            param_values.iter().map(|p| p.as_ref()).collect();
        let affected = conn.execute(&sql, params_ref.as_slice())?;
        Ok(affected > 0)
    })
}

/// Marks a report FAILED with the given error message. Terminal rows
/// are left untouched and reported as false.
pub fn fail(db: &Database, id: &str, error_message: &str) -> Result<bool, DatabaseError> {
    db.with_conn(|conn| {
        let affected = conn.execute(
            "UPDATE reports SET status = 'FAILED', error_message = ?2
             WHERE id = ?1 AND status NOT IN ('COMPLETED', 'FAILED')",
            params![id, error_message],
        )?;
        Ok(affected > 0)
    })
}
