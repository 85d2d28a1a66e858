/// Shared application state
use crate::config::SkillConfig;
use crate::services::AttributesManager;
use pco_client::PlanningCenterClient;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub attributes: Arc<AttributesManager>,
    pub client: Arc<PlanningCenterClient>,
    pub config: Arc<SkillConfig>,
}

impl AppState {
    pub fn new(
        attributes: Arc<AttributesManager>,
        client: Arc<PlanningCenterClient>,
        config: Arc<SkillConfig>,
    ) -> Self {
        Self {
            attributes,
            client,
            config,
        }
    }
}
