use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::signal;
use tracing_subscriber::EnvFilter;

use vidscribe::db::{self, Database};
use vidscribe::{MockBackend, ProcessingBackend, ReportLifecycle, ReportWorker, WebhookBackend};
use vidscribe_server::app;
use vidscribe_server::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("vidscribe=info".parse()?))
        .init();

    let args: Vec<String> = std::env::args().collect();
    let config_path = args
        .get(1)
        .map(|s| s.as_str())
        .unwrap_or("config/vidscribe.json");
    let config = vidscribe::load_or_default(config_path)?;

    let db_path = match &config.database.path {
        Some(path) => path.clone(),
        None => db::default_database_path()
            .ok_or_else(|| anyhow::anyhow!("Could not resolve a home directory for the database"))?,
    };

    tracing::info!(
        host = %config.server.host,
        port = config.server.port,
        db = %db_path.display(),
        "vidscribe-server starting"
    );

    let db = Database::open(&db_path)?;

    let processing_delay = Duration::from_secs(config.worker.processing_delay_secs);
    let backend: Arc<dyn ProcessingBackend> = match &config.dispatch.webhook_url {
        Some(url) => {
            tracing::info!(url = %url, "Dispatching new reports to external webhook");
            Arc::new(WebhookBackend::new(url)?)
        }
        None => {
            tracing::info!("Dispatching new reports to the in-process mock backend");
            Arc::new(MockBackend::new(db.clone(), processing_delay))
        }
    };

    let lifecycle = Arc::new(ReportLifecycle::new(db.clone(), backend));

    // Poll-based fallback for reports whose dispatch never arrived.
    let worker_handle = if config.worker.enabled {
        let worker = Arc::new(ReportWorker::new(
            db.clone(),
            Duration::from_secs(config.worker.poll_interval_secs),
            processing_delay,
        ));
        Some(tokio::spawn(async move {
            worker.run().await;
        }))
    } else {
        tracing::info!("Pending-report worker disabled");
        None
    };

    let state = AppState { lifecycle };
    let router = app::build_router(state);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(http = %addr, "Server started");

    let server = axum::serve(listener, router);
    tokio::select! {
        result = server.with_graceful_shutdown(async { signal::ctrl_c().await.ok(); }) => {
            if let Err(e) = result {
                tracing::error!(error = %e, "HTTP server error");
            }
        }
        _ = signal::ctrl_c() => {
            tracing::info!("Shutting down gracefully");
        }
    }

    if let Some(h) = worker_handle {
        h.abort();
    }
    tracing::info!("Server stopped");

    Ok(())
}
