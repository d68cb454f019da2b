use std::sync::Arc;

use laudos_completion::service::CompletionService;
use laudos_report::assist::Assistant;
use laudos_report::orchestrator::ReportGenerator;

/// The completion backend shared by every handler.
pub type SharedService = Arc<dyn CompletionService>;

/// Shared application state, injected into all route handlers via Axum state.
#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<ReportGenerator<SharedService>>,
    pub assistant: Arc<Assistant<SharedService>>,
}

impl AppState {
    pub fn new(
        generator: ReportGenerator<SharedService>,
        assistant: Assistant<SharedService>,
    ) -> Self {
        Self {
            generator: Arc::new(generator),
            assistant: Arc::new(assistant),
        }
    }
}
