use crate::core::AppConfig;
use crate::intent::IntentResponder;

pub struct AppState {
    pub responder: IntentResponder,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(responder: IntentResponder, config: AppConfig) -> Self {
        Self { responder, config }
    }
}
