//! Device playback events
//!
//! Reported by the device while it plays the streams it was given. Tokens are
//! the ones handed out in play and enqueue directives.

use serde::{Deserialize, Serialize};

/// Events reported by the playback device
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// The device started playing a stream
    Started {
        /// Token of the stream that started
        token: String,
    },

    /// The current stream played to its end
    Finished,

    /// Playback stopped before the end (pause, interruption)
    Stopped {
        /// Token of the stream that stopped
        token: String,
        /// Where in the stream the device stopped
        offset_in_milliseconds: u64,
    },

    /// The current stream is about to end; time to enqueue the next one
    NearlyFinished,

    /// The device could not play the stream
    Failed {
        /// Error description reported by the device
        error: Option<String>,
    },
}

impl PlaybackEvent {
    /// Short event name for logging
    pub fn name(&self) -> &'static str {
        match self {
            Self::Started { .. } => "PlaybackStarted",
            Self::Finished => "PlaybackFinished",
            Self::Stopped { .. } => "PlaybackStopped",
            Self::NearlyFinished => "PlaybackNearlyFinished",
            Self::Failed { .. } => "PlaybackFailed",
        }
    }
}
