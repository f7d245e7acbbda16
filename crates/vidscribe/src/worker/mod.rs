//! Poll-based processing fallback.
//!
//! Push dispatch is at-most-once, so a report whose dispatch was lost
//! would sit PENDING forever. The worker sweeps the PENDING backlog on
//! an interval and runs the mock pipeline on each report; the
//! conditional claim keeps it safe to run next to a push backend.

use std::sync::Arc;
use std::time::Duration;

use tokio::time;

use crate::backend::mock::run_mock_job;
use crate::db::{report_repo, Database};
use crate::error::Result;

pub struct ReportWorker {
    db: Database,
    poll_interval: Duration,
    processing_delay: Duration,
}

impl ReportWorker {
    pub fn new(db: Database, poll_interval: Duration, processing_delay: Duration) -> Self {
        Self {
            db,
            poll_interval,
            processing_delay,
        }
    }

    /// One pass over the PENDING backlog, oldest first. Returns how
    /// many reports were picked up for an attempt.
    pub async fn sweep(&self) -> Result<usize> {
        let ids = report_repo::pending_ids(&self.db)?;
        if ids.is_empty() {
            return Ok(0);
        }

        log::info!("Worker sweep found {} pending report(s)", ids.len());
        let count = ids.len();
        for id in ids {
            run_mock_job(&self.db, &id, self.processing_delay).await;
        }
        Ok(count)
    }

    /// Sweeps forever on the configured interval. Sweep errors are
    /// logged, never fatal.
    pub async fn run(self: Arc<Self>) {
        let mut ticker = time::interval(self.poll_interval);

        loop {
            ticker.tick().await;

            if let Err(e) = self.sweep().await {
                log::error!("Worker sweep failed: {}", e);
            }
        }
    }
}
