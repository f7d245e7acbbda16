//! Built-in mock transcription pipeline.
//!
//! Simulates the real flow end to end: claim the report, wait out a
//! configurable processing delay, then store a canned analysis. Used
//! whenever no webhook is configured, and by the polling worker.

use std::time::Duration;

use crate::backend::{AnalysisResult, DispatchRequest, ProcessingBackend};
use crate::db::{report_repo, Database, DatabaseError};

/// In-process backend that fakes the transcription work.
pub struct MockBackend {
    db: Database,
    processing_delay: Duration,
}

impl MockBackend {
    pub fn new(db: Database, processing_delay: Duration) -> Self {
        Self {
            db,
            processing_delay,
        }
    }
}

impl ProcessingBackend for MockBackend {
    fn dispatch(&self, request: DispatchRequest) {
        let db = self.db.clone();
        let delay = self.processing_delay;
        tokio::spawn(async move {
            run_mock_job(&db, &request.report_id, delay).await;
        });
    }
}

/// Drives one report through the simulated pipeline. Reports that are
/// not claimable (already picked up, or gone) are skipped; processing
/// errors are recorded as a FAILED transition.
pub async fn run_mock_job(db: &Database, report_id: &str, delay: Duration) {
    if let Err(e) = process_report(db, report_id, delay).await {
        log::error!("Mock processing failed for report {}: {}", report_id, e);
        match report_repo::fail(db, report_id, &e.to_string()) {
            Ok(true) => {}
            Ok(false) => {
                log::warn!("Report {} already terminal, failure not recorded", report_id)
            }
            Err(db_err) => {
                log::error!("Could not record failure for report {}: {}", report_id, db_err)
            }
        }
    }
}

async fn process_report(
    db: &Database,
    report_id: &str,
    delay: Duration,
) -> Result<(), DatabaseError> {
    if !report_repo::claim_pending(db, report_id)? {
        log::debug!("Report {} not claimable, skipping mock run", report_id);
        return Ok(());
    }
    log::info!("Mock processing started for report {}", report_id);

    tokio::time::sleep(delay).await;

    let applied = report_repo::complete(db, report_id, &mock_analysis().into_update())?;
    if applied {
        log::info!("Mock processing completed for report {}", report_id);
    } else {
        log::warn!("Report {} turned terminal mid-run, result discarded", report_id);
    }
    Ok(())
}

/// The canned analysis every mock run produces. Stands in for the
/// transcription and summarization services a real deployment would
/// call.
pub fn mock_analysis() -> AnalysisResult {
    AnalysisResult {
        synopsis: "This video discusses the future of renewable energy, focusing on \
            advancements in solar panel efficiency and battery storage. The speaker \
            highlights three key areas of innovation that could lead to a significant \
            reduction in carbon emissions over the next decade."
            .to_string(),
        key_takeaways: vec![
            "Solar panel efficiency has doubled in the last five years due to new \
             perovskite materials."
                .to_string(),
            "Grid-scale battery storage is becoming economically viable, solving the \
             intermittency problem of renewables."
                .to_string(),
            "Decentralized power grids (microgrids) are increasing energy resilience \
             for communities."
                .to_string(),
            "Government policies and subsidies are crucial for accelerating the \
             adoption of green technology."
                .to_string(),
        ],
        cleaned_transcript: "The future of energy is at a critical turning point. For \
            decades, we've relied on fossil fuels, but the climate crisis demands a \
            rapid transition to cleaner sources. The good news is that we're witnessing \
            an unprecedented wave of innovation in the renewable energy sector.\n\n\
            One of the most exciting developments is in solar technology. The \
            efficiency of photovoltaic cells has skyrocketed. We're not just talking \
            about incremental improvements anymore. New materials, particularly \
            perovskites, are allowing us to capture more energy from the sun than ever \
            before. This means more power from a smaller footprint, making solar viable \
            for a wider range of applications.\n\n\
            But generating power is only half the battle. Storing it is the other. The \
            biggest criticism of solar and wind has always been their intermittency: \
            the sun doesn't always shine, and the wind doesn't always blow. That's \
            where battery technology comes in. We're now able to build massive, \
            grid-scale batteries that can store excess energy and release it when \
            needed, ensuring a stable and reliable power supply. This is a \
            game-changer.\n\n\
            Finally, we're seeing a shift in how we think about the grid itself. The \
            old model of large, centralized power plants is giving way to a more \
            distributed network of microgrids. These smaller, localized grids can \
            operate independently, which dramatically increases resilience against \
            outages caused by extreme weather or other disruptions. It's about making \
            our energy system not just cleaner, but smarter and more robust."
            .to_string(),
        original_transcript: "uh, you know, the future of energy is, like, at a \
            critical turning point. For, like, decades, we've relied on fossil fuels, \
            but the climate crisis, you know, demands a rapid transition to cleaner \
            sources. The good news is that we're, um, witnessing an unprecedented wave \
            of innovation in the renewable energy sector. you know. ..."
            .to_string(),
    }
}
