//! PCO Skill Storage
//!
//! `SQLite` persistence for the per-user session attributes of the skill:
//! playback settings, playback position and the current playlist.
//!
//! Attributes are stored as one JSON document per user, keyed by the
//! voice-assistant user id.
//!
//! # Example
//!
//! ```rust,no_run
//! use pco_core::{AttributesStore, SessionAttributes, UserId};
//! use pco_storage::{create_pool, run_migrations, SqliteAttributesStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool("sqlite://skill.db").await?;
//! run_migrations(&pool).await?;
//!
//! let store = SqliteAttributesStore::new(pool);
//! let user = UserId::new("amzn1.ask.account.TEST");
//! store.insert_if_absent(&user, &SessionAttributes::default()).await?;
//! let attributes = store.load(&user).await?;
//! # Ok(())
//! # }
//! ```

mod context;
mod error;

// Vertical slices
pub mod session_attributes;

pub use context::SqliteAttributesStore;
pub use error::StorageError;

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;
use tracing::debug;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// This should be called once when the application starts to ensure
/// the database schema is up to date.
///
/// # Errors
///
/// Returns an error if migrations fail to run
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await
}

/// Create a new `SQLite` pool
///
/// In-memory URLs get a single connection, since every `SQLite` memory
/// connection is its own database.
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `<sqlite://skill.db>`)
///
/// # Errors
///
/// Returns an error if the connection fails
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    debug!(database_url = %database_url, "Creating SQLite pool");

    let in_memory = database_url.contains(":memory:");

    let mut options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .busy_timeout(std::time::Duration::from_secs(30));
    if !in_memory {
        options = options.journal_mode(SqliteJournalMode::Wal);
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(if in_memory { 1 } else { 5 })
        .connect_with(options)
        .await?;

    debug!("SQLite pool created");

    Ok(pool)
}
