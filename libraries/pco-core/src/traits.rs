//! Core traits for pluggable persistence

use crate::error::Result;
use crate::types::{SessionAttributes, UserId};
use async_trait::async_trait;

/// Per-user persistence of the session attribute bundle
///
/// Implementations store `(PlaybackSetting, PlaybackInfo, Playlist)` as one
/// unit keyed by the voice-platform user id.
#[async_trait]
pub trait AttributesStore: Send + Sync {
    /// Load the bundle for a user, `None` if the user has never been seen
    async fn load(&self, user_id: &UserId) -> Result<Option<SessionAttributes>>;

    /// Create or replace the bundle for a user
    async fn save(&self, user_id: &UserId, attributes: &SessionAttributes) -> Result<()>;

    /// Store the bundle only if the user has none yet
    ///
    /// Returns `true` if a row was created.
    async fn insert_if_absent(
        &self,
        user_id: &UserId,
        attributes: &SessionAttributes,
    ) -> Result<bool>;

    /// Delete the bundle for a user
    ///
    /// Returns `true` if something was deleted.
    async fn delete(&self, user_id: &UserId) -> Result<bool>;
}
