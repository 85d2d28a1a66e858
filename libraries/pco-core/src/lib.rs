//! PCO Skill Core
//!
//! Shared domain types, traits, and error handling for the Planning Center
//! song-player skill.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Song`, `PlaybackSetting`, `PlaybackInfo`, `SessionAttributes`
//! - **Core Traits**: `AttributesStore` (per-user persistence of the session bundle)
//! - **Error Handling**: Unified `PcoError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use pco_core::types::{SessionAttributes, SessionStatus, Song};
//!
//! let mut attributes = SessionAttributes::default();
//! assert_eq!(attributes.playback_info.status, SessionStatus::Idle);
//!
//! attributes.playlist.push(Song::new("Amazing Grace.mp3", "https://example.com/open"));
//! attributes.playback_info.play_order = vec![0];
//! assert_eq!(attributes.current_song().map(|s| s.title.as_str()), Some("Amazing Grace.mp3"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod traits;
pub mod types;

pub use error::{PcoError, Result};
pub use traits::AttributesStore;
pub use types::{PlaybackInfo, PlaybackSetting, SessionAttributes, SessionStatus, Song, UserId};
