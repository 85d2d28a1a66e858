/// Per-user session attributes: load, first-use initialization, save
use crate::error::Result;
use pco_core::{AttributesStore, SessionAttributes, UserId};
use std::sync::Arc;
use tracing::{debug, info};

/// Loads and saves the attribute bundle around each invocation
pub struct AttributesManager {
    store: Arc<dyn AttributesStore>,
}

impl AttributesManager {
    pub fn new(store: Arc<dyn AttributesStore>) -> Self {
        Self { store }
    }

    /// Load the user's attributes, storing defaults on first-ever use
    ///
    /// Defaults are written at most once per user, even when several
    /// first requests race.
    pub async fn load_or_initialize(&self, user_id: &UserId) -> Result<SessionAttributes> {
        if let Some(attributes) = self.store.load(user_id).await? {
            debug!(user_id = %user_id, "Loaded session attributes");
            return Ok(attributes);
        }

        let defaults = SessionAttributes::default();
        if self.store.insert_if_absent(user_id, &defaults).await? {
            info!(user_id = %user_id, "Initialized session attributes for new user");
            return Ok(defaults);
        }

        // Another request created them first
        Ok(self.store.load(user_id).await?.unwrap_or(defaults))
    }

    /// Stored attributes, without initializing
    pub async fn get(&self, user_id: &UserId) -> Result<Option<SessionAttributes>> {
        Ok(self.store.load(user_id).await?)
    }

    /// Persist the attributes at the end of a successful invocation
    pub async fn save(&self, user_id: &UserId, attributes: &SessionAttributes) -> Result<()> {
        self.store.save(user_id, attributes).await?;
        debug!(user_id = %user_id, status = %attributes.playback_info.status, "Saved session attributes");
        Ok(())
    }

    /// Forget a user entirely
    pub async fn reset(&self, user_id: &UserId) -> Result<bool> {
        let removed = self.store.delete(user_id).await?;
        info!(user_id = %user_id, removed = removed, "Reset session attributes");
        Ok(removed)
    }
}
