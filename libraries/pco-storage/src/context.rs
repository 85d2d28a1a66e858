use crate::session_attributes;
use async_trait::async_trait;
use pco_core::{AttributesStore, Result, SessionAttributes, UserId};
use sqlx::SqlitePool;

/// Attributes store backed by `SQLite`
#[derive(Clone)]
pub struct SqliteAttributesStore {
    pool: SqlitePool,
}

impl SqliteAttributesStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl AttributesStore for SqliteAttributesStore {
    async fn load(&self, user_id: &UserId) -> Result<Option<SessionAttributes>> {
        Ok(session_attributes::get(&self.pool, user_id).await?)
    }

    async fn save(&self, user_id: &UserId, attributes: &SessionAttributes) -> Result<()> {
        Ok(session_attributes::upsert(&self.pool, user_id, attributes).await?)
    }

    async fn insert_if_absent(
        &self,
        user_id: &UserId,
        attributes: &SessionAttributes,
    ) -> Result<bool> {
        Ok(session_attributes::insert_if_absent(&self.pool, user_id, attributes).await?)
    }

    async fn delete(&self, user_id: &UserId) -> Result<bool> {
        Ok(session_attributes::delete(&self.pool, user_id).await?)
    }
}
