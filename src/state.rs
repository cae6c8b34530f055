use std::sync::Arc;

use crate::{config::AppConfig, storage::WeeklyLogStore};

/// Shared by every handler through the dispatcher's dependency map.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub logs: WeeklyLogStore,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let logs = WeeklyLogStore::new(config.log.dir.clone(), config.timezone);
        info!("Weekly logs stored in {}", logs.dir().display());

        Self {
            config: Arc::new(config),
            logs,
        }
    }
}
