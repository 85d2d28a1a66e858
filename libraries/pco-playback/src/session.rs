//! Playback session - the state machine
//!
//! Applies voice commands and device events to a user's session attributes.

use crate::{
    error::{PlaybackError, Result},
    events::PlaybackEvent,
    shuffle::{identity_order, is_permutation, shuffle_order},
    types::{PlaybackAction, StreamRequest},
};
use pco_core::types::{PlaybackInfo, PlaybackSetting, SessionAttributes, SessionStatus, Song};
use tracing::{debug, warn};

/// A user's playback session
///
/// Owns the session attribute bundle for the duration of one invocation.
/// Commands that start audio return [`PlaybackAction::Play`]; the caller is
/// responsible for resolving the stream URL and sending the directive.
#[derive(Debug, Clone)]
pub struct PlaybackSession {
    attributes: SessionAttributes,
}

impl PlaybackSession {
    /// Wrap loaded attributes, repairing a play order that no longer matches
    /// the playlist
    pub fn new(mut attributes: SessionAttributes) -> Self {
        repair(&mut attributes);
        Self { attributes }
    }

    /// Current attributes
    pub fn attributes(&self) -> &SessionAttributes {
        &self.attributes
    }

    /// Give the attributes back for saving
    pub fn into_attributes(self) -> SessionAttributes {
        self.attributes
    }

    /// Session status
    pub fn status(&self) -> SessionStatus {
        self.attributes.playback_info.status
    }

    /// Loop and shuffle preferences
    pub fn setting(&self) -> &PlaybackSetting {
        &self.attributes.playback_setting
    }

    /// Playback progress
    pub fn info(&self) -> &PlaybackInfo {
        &self.attributes.playback_info
    }

    /// Songs in fetch order
    pub fn playlist(&self) -> &[Song] {
        &self.attributes.playlist
    }

    /// Song at the current position
    pub fn current_song(&self) -> Option<&Song> {
        self.attributes.current_song()
    }

    /// Whether there is nothing to play
    pub fn is_empty(&self) -> bool {
        self.attributes.playlist.is_empty()
    }

    // ===== Playlist =====

    /// Replace the playlist with freshly fetched songs
    ///
    /// Playback restarts from the first position; the order is shuffled if
    /// shuffle is on.
    pub fn load_playlist(&mut self, songs: Vec<Song>) {
        let len = songs.len();
        self.attributes.playlist = songs;
        self.attributes.playback_info.play_order = if self.attributes.playback_setting.shuffle {
            shuffle_order(len)
        } else {
            identity_order(len)
        };
        self.attributes.playback_info.next_stream_enqueued = false;
        self.attributes.playback_info.token.clear();
        self.move_to(0);

        debug!(songs = len, "Playlist loaded");
    }

    /// Playlist index of the first song whose title contains `query`
    /// (case-insensitive)
    pub fn find_song(&self, query: &str) -> Option<usize> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return None;
        }

        self.attributes
            .playlist
            .iter()
            .position(|song| song.title.to_lowercase().contains(&query))
    }

    // ===== Commands =====

    /// Play the current track from the last known offset
    ///
    /// The session is not marked as playing until the device reports
    /// [`PlaybackEvent::Started`].
    pub fn play(&mut self) -> Result<PlaybackAction> {
        let stream = self.stream_at(self.attributes.playback_info.index, None)?;

        let info = &mut self.attributes.playback_info;
        info.status = info.status.suspended();
        // REPLACE_ALL clears whatever the device had queued
        info.next_stream_enqueued = false;

        Ok(PlaybackAction::Play(stream))
    }

    /// Advance to the next track
    pub fn next(&mut self) -> Result<PlaybackAction> {
        let len = self.len()?;
        let next = (self.attributes.playback_info.index + 1) % len;

        if next == 0 && !self.attributes.playback_setting.loop_enabled {
            debug!("Reached end of playlist");
            return Ok(PlaybackAction::EndOfPlaylist);
        }

        self.move_to(next);
        self.play()
    }

    /// Go back to the previous track
    pub fn previous(&mut self) -> Result<PlaybackAction> {
        let len = self.len()?;
        let index = self.attributes.playback_info.index;

        let previous = if index == 0 {
            if !self.attributes.playback_setting.loop_enabled {
                debug!("Reached start of playlist");
                return Ok(PlaybackAction::StartOfPlaylist);
            }
            len - 1
        } else {
            index - 1
        };

        self.move_to(previous);
        self.play()
    }

    /// Stop the device, keeping the position for a later resume
    pub fn pause(&self) -> PlaybackAction {
        PlaybackAction::Stop
    }

    /// Turn looping on or off
    pub fn set_loop(&mut self, enabled: bool) {
        self.attributes.playback_setting.loop_enabled = enabled;
    }

    /// Shuffle the play order and start from its first track
    pub fn shuffle_on(&mut self) -> Result<PlaybackAction> {
        let len = self.len()?;

        self.attributes.playback_setting.shuffle = true;
        self.attributes.playback_info.play_order = shuffle_order(len);
        self.move_to(0);

        self.play()
    }

    /// Restore the original order, staying on the current track
    pub fn shuffle_off(&mut self) -> Result<PlaybackAction> {
        self.len()?;

        if self.attributes.playback_setting.shuffle {
            let info = &mut self.attributes.playback_info;
            self.attributes.playback_setting.shuffle = false;
            info.index = info.play_order[info.index];
            info.play_order = identity_order(info.play_order.len());
        }

        self.play()
    }

    /// Forget everything: settings, progress and playlist
    pub fn start_over(&mut self) {
        self.attributes = SessionAttributes::default();
    }

    /// Decline to resume: play from the top of the current order
    pub fn restart_from_top(&mut self) -> Result<PlaybackAction> {
        self.len()?;

        self.move_to(0);
        self.attributes.playback_info.status = SessionStatus::Idle;

        self.play()
    }

    /// Play a specific song from the start
    pub fn jump_to_song(&mut self, song_index: usize) -> Result<PlaybackAction> {
        self.len()?;

        let position = self
            .attributes
            .playback_info
            .play_order
            .iter()
            .position(|&i| i == song_index)
            .ok_or(PlaybackError::IndexOutOfBounds(song_index))?;

        self.move_to(position);
        self.play()
    }

    /// Note that the user left mid-session; Playing becomes Paused
    pub fn suspend(&mut self) {
        let info = &mut self.attributes.playback_info;
        info.status = info.status.suspended();
    }

    // ===== Device events =====

    /// Apply a playback event reported by the device
    pub fn handle_event(&mut self, event: PlaybackEvent) -> PlaybackAction {
        debug!(event = event.name(), "Handling playback event");

        match event {
            PlaybackEvent::Started { token } => {
                self.record_token(token);
                self.attributes.playback_info.status = SessionStatus::Playing;
                PlaybackAction::None
            }
            PlaybackEvent::Finished => {
                let info = &mut self.attributes.playback_info;
                info.status = SessionStatus::Idle;
                info.next_stream_enqueued = false;
                PlaybackAction::None
            }
            PlaybackEvent::Stopped {
                token,
                offset_in_milliseconds,
            } => {
                self.record_token(token);
                self.attributes.playback_info.offset_in_milliseconds = offset_in_milliseconds;
                PlaybackAction::None
            }
            PlaybackEvent::NearlyFinished => self.enqueue_next(),
            PlaybackEvent::Failed { error } => {
                warn!(error = ?error, "Device reported playback failure");
                self.suspend();
                PlaybackAction::None
            }
        }
    }

    // ===== Internals =====

    fn len(&self) -> Result<usize> {
        match self.attributes.playlist.len() {
            0 => Err(PlaybackError::QueueEmpty),
            len => Ok(len),
        }
    }

    fn move_to(&mut self, index: usize) {
        let info = &mut self.attributes.playback_info;
        info.index = index;
        info.offset_in_milliseconds = 0;
        info.playback_index_changed = true;
    }

    fn stream_at(
        &self,
        position: usize,
        expected_previous_token: Option<String>,
    ) -> Result<StreamRequest> {
        self.len()?;

        let info = &self.attributes.playback_info;
        let song_index = *info
            .play_order
            .get(position)
            .ok_or(PlaybackError::IndexOutOfBounds(position))?;
        let song = self
            .attributes
            .playlist
            .get(song_index)
            .ok_or(PlaybackError::IndexOutOfBounds(song_index))?;

        let offset_in_milliseconds = if expected_previous_token.is_some() {
            0
        } else {
            info.offset_in_milliseconds
        };

        Ok(StreamRequest {
            token: song_index.to_string(),
            song: song.clone(),
            offset_in_milliseconds,
            expected_previous_token,
        })
    }

    fn record_token(&mut self, token: String) {
        let position = token.parse::<usize>().ok().and_then(|song_index| {
            self.attributes
                .playback_info
                .play_order
                .iter()
                .position(|&i| i == song_index)
        });

        let info = &mut self.attributes.playback_info;
        match position {
            // A stored offset belongs to the track it was reported for
            Some(index) if index != info.index => {
                info.index = index;
                info.offset_in_milliseconds = 0;
            }
            Some(_) => {}
            None => warn!(token = %token, "Token not found in play order, keeping index"),
        }
        info.token = token;
    }

    fn enqueue_next(&mut self) -> PlaybackAction {
        if self.attributes.playback_info.next_stream_enqueued {
            debug!("Next stream already enqueued");
            return PlaybackAction::None;
        }

        let Ok(len) = self.len() else {
            return PlaybackAction::None;
        };

        let enqueue_index = (self.attributes.playback_info.index + 1) % len;
        if enqueue_index == 0 && !self.attributes.playback_setting.loop_enabled {
            return PlaybackAction::None;
        }

        let expected = self.attributes.playback_info.token.clone();
        match self.stream_at(enqueue_index, Some(expected)) {
            Ok(stream) => {
                self.attributes.playback_info.next_stream_enqueued = true;
                PlaybackAction::Enqueue(stream)
            }
            Err(e) => {
                warn!(error = %e, "Could not enqueue next stream");
                PlaybackAction::None
            }
        }
    }
}

impl From<SessionAttributes> for PlaybackSession {
    fn from(attributes: SessionAttributes) -> Self {
        Self::new(attributes)
    }
}

/// Restore the play order and index invariants after loading
fn repair(attributes: &mut SessionAttributes) {
    let len = attributes.playlist.len();
    let info = &mut attributes.playback_info;

    if !is_permutation(&info.play_order, len) {
        if !info.play_order.is_empty() || len > 0 {
            warn!(
                order_len = info.play_order.len(),
                playlist_len = len,
                "Play order does not match playlist, rebuilding"
            );
        }
        info.play_order = if attributes.playback_setting.shuffle {
            shuffle_order(len)
        } else {
            identity_order(len)
        };
        info.index = 0;
        info.offset_in_milliseconds = 0;
    }

    if info.index >= len.max(1) {
        info.index = 0;
        info.offset_in_milliseconds = 0;
    }
}
