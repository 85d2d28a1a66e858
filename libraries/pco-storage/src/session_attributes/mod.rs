//! Session attributes persistence
//!
//! One JSON document per user. Fields missing from a stored document take
//! their defaults when read back.

use crate::error::Result;
use pco_core::{SessionAttributes, UserId};
use sqlx::{Row, SqlitePool};
use tracing::debug;

/// Get the stored attributes for a user
///
/// Returns `None` if nothing was stored yet
pub async fn get(pool: &SqlitePool, user_id: &UserId) -> Result<Option<SessionAttributes>> {
    let row = sqlx::query("SELECT attributes FROM session_attributes WHERE user_id = ?")
        .bind(user_id.as_str())
        .fetch_optional(pool)
        .await?;

    match row {
        Some(row) => {
            let json: String = row.try_get("attributes")?;
            Ok(Some(serde_json::from_str(&json)?))
        }
        None => Ok(None),
    }
}

/// Create or replace the attributes for a user
pub async fn upsert(pool: &SqlitePool, user_id: &UserId, attributes: &SessionAttributes) -> Result<()> {
    let json = serde_json::to_string(attributes)?;
    let now = chrono::Utc::now().timestamp();

    sqlx::query(
        "INSERT INTO session_attributes (user_id, attributes, created_at, updated_at)
         VALUES (?, ?, ?, ?)
         ON CONFLICT(user_id)
         DO UPDATE SET
            attributes = excluded.attributes,
            updated_at = excluded.updated_at",
    )
    .bind(user_id.as_str())
    .bind(json)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    debug!(user_id = %user_id, "Session attributes saved");
    Ok(())
}

/// Store attributes only if the user has none yet
///
/// Returns `true` if this call created the row.
pub async fn insert_if_absent(
    pool: &SqlitePool,
    user_id: &UserId,
    attributes: &SessionAttributes,
) -> Result<bool> {
    let json = serde_json::to_string(attributes)?;
    let now = chrono::Utc::now().timestamp();

    let result = sqlx::query(
        "INSERT INTO session_attributes (user_id, attributes, created_at, updated_at)
         VALUES (?, ?, ?, ?)
         ON CONFLICT(user_id) DO NOTHING",
    )
    .bind(user_id.as_str())
    .bind(json)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() == 1)
}

/// Delete the attributes for a user
///
/// Returns `true` if a row was removed.
pub async fn delete(pool: &SqlitePool, user_id: &UserId) -> Result<bool> {
    let result = sqlx::query("DELETE FROM session_attributes WHERE user_id = ?")
        .bind(user_id.as_str())
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Number of users with stored attributes
pub async fn count(pool: &SqlitePool) -> Result<i64> {
    let row = sqlx::query("SELECT COUNT(*) AS count FROM session_attributes")
        .fetch_one(pool)
        .await?;
    Ok(row.try_get("count")?)
}
