//! Outputs of the playback state machine

use pco_core::types::Song;
use serde::{Deserialize, Serialize};

/// A stream the device should play or queue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamRequest {
    /// Token identifying the track (its playlist index as a string)
    pub token: String,

    /// The song to stream; its `url` still has to be opened
    pub song: Song,

    /// Where to start in the stream
    pub offset_in_milliseconds: u64,

    /// Token the device must currently be playing (enqueue only)
    pub expected_previous_token: Option<String>,
}

/// What the device should do after a command or event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackAction {
    /// Replace everything on the device with this stream
    Play(StreamRequest),

    /// Queue this stream after the one currently playing
    Enqueue(StreamRequest),

    /// Stop playback
    Stop,

    /// Ran off the end of the playlist with loop off
    EndOfPlaylist,

    /// Ran off the start of the playlist with loop off
    StartOfPlaylist,

    /// Nothing to send
    None,
}

impl PlaybackAction {
    /// The stream carried by a play or enqueue action
    pub fn stream(&self) -> Option<&StreamRequest> {
        match self {
            Self::Play(stream) | Self::Enqueue(stream) => Some(stream),
            _ => None,
        }
    }
}
