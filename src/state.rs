use std::sync::Arc;

use crate::api::{HttpApi, PhysiqueApi};
use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub api: Arc<dyn PhysiqueApi>,
}

impl AppState {
    pub fn init(config: AppConfig) -> anyhow::Result<Self> {
        let config = Arc::new(config);
        let api = Arc::new(HttpApi::new(config.clone())?) as Arc<dyn PhysiqueApi>;
        Ok(Self { config, api })
    }

    pub fn from_parts(config: Arc<AppConfig>, api: Arc<dyn PhysiqueApi>) -> Self {
        Self { config, api }
    }
}
