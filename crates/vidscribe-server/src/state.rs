use std::sync::Arc;

use vidscribe::ReportLifecycle;

/// Shared handles available to every HTTP handler.
#[derive(Clone)]
pub struct AppState {
    pub lifecycle: Arc<ReportLifecycle>,
}
