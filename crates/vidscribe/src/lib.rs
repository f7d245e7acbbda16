pub mod backend;
pub mod config;
pub mod db;
pub mod error;
pub mod lifecycle;
pub mod report;
pub mod worker;

pub use backend::{AnalysisResult, DispatchRequest, MockBackend, ProcessingBackend, WebhookBackend};
pub use config::{load_config, load_or_default, Config};
pub use db::Database;
pub use error::{ConfigError, DispatchError, LifecycleError, Result, VidscribeError};
pub use lifecycle::ReportLifecycle;
pub use report::{Report, ReportStatus};
pub use worker::ReportWorker;
