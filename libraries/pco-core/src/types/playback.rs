/// Playback setting and progress types
use serde::{Deserialize, Serialize};

/// User playback preferences, persisted across sessions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackSetting {
    /// Wrap around at either end of the playlist
    #[serde(rename = "loop")]
    pub loop_enabled: bool,

    /// Play in a shuffled order
    pub shuffle: bool,
}

/// Where the user is in their listening session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    /// Nothing played yet, or the playlist ran to completion
    #[default]
    Idle,
    /// Not playing, but there is a track to resume
    Paused,
    /// The device confirmed that audio is playing
    Playing,
}

impl SessionStatus {
    /// Whether the device is currently in a playback session
    #[must_use]
    pub fn in_playback_session(self) -> bool {
        matches!(self, Self::Playing)
    }

    /// Whether there is an earlier session that can be resumed
    #[must_use]
    pub fn has_previous_playback_session(self) -> bool {
        matches!(self, Self::Paused | Self::Playing)
    }

    /// Status after playback leaves the device without finishing
    ///
    /// Playing becomes Paused, other states are unchanged.
    #[must_use]
    pub fn suspended(self) -> Self {
        match self {
            Self::Playing => Self::Paused,
            other => other,
        }
    }

    /// Convert to string representation
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Paused => "paused",
            Self::Playing => "playing",
        }
    }
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Playback progress through the playlist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlaybackInfo {
    /// Permutation mapping playback position to playlist index
    pub play_order: Vec<usize>,

    /// Current position into `play_order`
    pub index: usize,

    /// Last known offset into the current track
    pub offset_in_milliseconds: u64,

    /// Token of the track the device last reported
    pub token: String,

    /// An enqueue directive for the following track is pending
    pub next_stream_enqueued: bool,

    /// Session status
    pub status: SessionStatus,

    /// The index moved since the last device report
    pub playback_index_changed: bool,
}

impl Default for PlaybackInfo {
    fn default() -> Self {
        Self {
            play_order: Vec::new(),
            index: 0,
            offset_in_milliseconds: 0,
            playback_index_changed: true,
            token: String::new(),
            next_stream_enqueued: false,
            status: SessionStatus::Idle,
        }
    }
}

impl PlaybackInfo {
    /// Playlist index of the current track, if any
    #[must_use]
    pub fn current_song_index(&self) -> Option<usize> {
        self.play_order.get(self.index).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_flags() {
        assert!(!SessionStatus::Idle.in_playback_session());
        assert!(!SessionStatus::Idle.has_previous_playback_session());
        assert!(!SessionStatus::Paused.in_playback_session());
        assert!(SessionStatus::Paused.has_previous_playback_session());
        assert!(SessionStatus::Playing.in_playback_session());
        assert!(SessionStatus::Playing.has_previous_playback_session());
    }

    #[test]
    fn test_suspended() {
        assert_eq!(SessionStatus::Playing.suspended(), SessionStatus::Paused);
        assert_eq!(SessionStatus::Paused.suspended(), SessionStatus::Paused);
        assert_eq!(SessionStatus::Idle.suspended(), SessionStatus::Idle);
    }

    #[test]
    fn test_setting_serializes_loop_key() {
        let setting = PlaybackSetting {
            loop_enabled: true,
            shuffle: false,
        };
        let json = serde_json::to_value(setting).unwrap();
        assert_eq!(json, serde_json::json!({"loop": true, "shuffle": false}));
    }

    #[test]
    fn test_partial_setting_takes_defaults() {
        let setting: PlaybackSetting = serde_json::from_str(r#"{"loop": true}"#).unwrap();
        assert!(setting.loop_enabled);
        assert!(!setting.shuffle);
    }

    #[test]
    fn test_partial_info_takes_defaults() {
        let info: PlaybackInfo =
            serde_json::from_str(r#"{"index": 1, "playOrder": [1, 0]}"#).unwrap();
        assert_eq!(info.index, 1);
        assert_eq!(info.play_order, vec![1, 0]);
        assert_eq!(info.offset_in_milliseconds, 0);
        assert!(info.playback_index_changed);
        assert_eq!(info.status, SessionStatus::Idle);
        assert!(info.token.is_empty());
    }

    #[test]
    fn test_info_camel_case_fields() {
        let json = serde_json::to_value(PlaybackInfo::default()).unwrap();
        assert_eq!(json["playOrder"], serde_json::json!([]));
        assert_eq!(json["offsetInMilliseconds"], 0);
        assert_eq!(json["nextStreamEnqueued"], false);
        assert_eq!(json["playbackIndexChanged"], true);
        assert_eq!(json["status"], "idle");
    }
}
