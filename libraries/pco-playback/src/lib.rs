//! PCO Skill - Playback State Machine
//!
//! Tracks where a user is in their playlist and decides what the device
//! should do next.
//!
//! This crate provides:
//! - Play / resume from the last known offset
//! - Next / previous with optional looping at both ends
//! - Fisher-Yates shuffle of the play order, and restoring the original order
//! - Reactions to device playback events (started, stopped, finished,
//!   nearly finished, failed)
//!
//! # Architecture
//!
//! `pco-playback` performs no I/O:
//! - No dependency on the voice-platform envelope
//! - No dependency on the Planning Center client (stream URLs are resolved by the caller)
//! - No dependency on pco-storage (the caller loads and saves the bundle)
//!
//! Every operation mutates the owned `SessionAttributes` and returns a
//! [`PlaybackAction`] describing the directive to send.
//!
//! # Example
//!
//! ```rust
//! use pco_core::types::{SessionAttributes, Song};
//! use pco_playback::{PlaybackAction, PlaybackEvent, PlaybackSession};
//!
//! let mut session = PlaybackSession::new(SessionAttributes::default());
//! session.load_playlist(vec![
//!     Song::new("Opening.mp3", "https://example.com/1/open"),
//!     Song::new("Closing.mp3", "https://example.com/2/open"),
//! ]);
//!
//! let action = session.play().unwrap();
//! assert!(matches!(action, PlaybackAction::Play(_)));
//!
//! // The device confirms playback with the token it was given
//! session.handle_event(PlaybackEvent::Started { token: "0".to_string() });
//! assert!(session.status().in_playback_session());
//!
//! // Skip ahead
//! let action = session.next().unwrap();
//! assert_eq!(action.stream().unwrap().song.title, "Closing.mp3");
//! ```

mod error;
mod events;
mod session;
mod shuffle;
pub mod types;

// Public exports
pub use error::{PlaybackError, Result};
pub use events::PlaybackEvent;
pub use session::PlaybackSession;
pub use shuffle::{identity_order, is_permutation, shuffle_order};
pub use types::{PlaybackAction, StreamRequest};
