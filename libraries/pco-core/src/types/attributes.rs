/// The persisted per-user session bundle
use serde::{Deserialize, Serialize};

use super::{PlaybackInfo, PlaybackSetting, Song};

/// Everything the skill remembers about a user between invocations
///
/// Loaded at the start of every invocation and saved at the end.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionAttributes {
    /// Loop and shuffle preferences
    #[serde(default)]
    pub playback_setting: PlaybackSetting,

    /// Progress through the playlist
    #[serde(default)]
    pub playback_info: PlaybackInfo,

    /// Songs in fetch order
    #[serde(default)]
    pub playlist: Vec<Song>,
}

impl SessionAttributes {
    /// The song at the current playback position
    #[must_use]
    pub fn current_song(&self) -> Option<&Song> {
        self.playback_info
            .current_song_index()
            .and_then(|i| self.playlist.get(i))
    }
}
