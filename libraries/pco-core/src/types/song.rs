/// Playlist entry type
use serde::{Deserialize, Serialize};

/// A playable song in the user's playlist
///
/// `url` points at the attachment's `open` action. The actual stream URL is
/// short-lived and resolved right before each play or enqueue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    /// Spoken title (the attachment filename)
    pub title: String,

    /// URL of the attachment's `open` action
    pub url: String,
}

impl Song {
    /// Create a new song entry
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }
}
