//! Intent names the skill understands

/// Slot of `PlaySingleSongIntent` carrying the spoken title
pub const SONG_TITLE_SLOT: &str = "songTitle";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntentName {
    PlayAudio,
    PlaySongs,
    PlaySingleSong,
    Help,
    Yes,
    No,
    Resume,
    Next,
    Previous,
    Stop,
    Cancel,
    Pause,
    LoopOn,
    LoopOff,
    ShuffleOn,
    ShuffleOff,
    StartOver,
    Other(String),
}

impl IntentName {
    pub fn parse(name: &str) -> Self {
        match name {
            "PlayAudio" => Self::PlayAudio,
            "PlaySongsIntent" => Self::PlaySongs,
            "PlaySingleSongIntent" => Self::PlaySingleSong,
            "AMAZON.HelpIntent" => Self::Help,
            "AMAZON.YesIntent" => Self::Yes,
            "AMAZON.NoIntent" => Self::No,
            "AMAZON.ResumeIntent" => Self::Resume,
            "AMAZON.NextIntent" => Self::Next,
            "AMAZON.PreviousIntent" => Self::Previous,
            "AMAZON.StopIntent" => Self::Stop,
            "AMAZON.CancelIntent" => Self::Cancel,
            "AMAZON.PauseIntent" => Self::Pause,
            "AMAZON.LoopOnIntent" => Self::LoopOn,
            "AMAZON.LoopOffIntent" => Self::LoopOff,
            "AMAZON.ShuffleOnIntent" => Self::ShuffleOn,
            "AMAZON.ShuffleOffIntent" => Self::ShuffleOff,
            "AMAZON.StartOverIntent" => Self::StartOver,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::PlayAudio => "PlayAudio",
            Self::PlaySongs => "PlaySongsIntent",
            Self::PlaySingleSong => "PlaySingleSongIntent",
            Self::Help => "AMAZON.HelpIntent",
            Self::Yes => "AMAZON.YesIntent",
            Self::No => "AMAZON.NoIntent",
            Self::Resume => "AMAZON.ResumeIntent",
            Self::Next => "AMAZON.NextIntent",
            Self::Previous => "AMAZON.PreviousIntent",
            Self::Stop => "AMAZON.StopIntent",
            Self::Cancel => "AMAZON.CancelIntent",
            Self::Pause => "AMAZON.PauseIntent",
            Self::LoopOn => "AMAZON.LoopOnIntent",
            Self::LoopOff => "AMAZON.LoopOffIntent",
            Self::ShuffleOn => "AMAZON.ShuffleOnIntent",
            Self::ShuffleOff => "AMAZON.ShuffleOffIntent",
            Self::StartOver => "AMAZON.StartOverIntent",
            Self::Other(name) => name,
        }
    }
}

impl std::fmt::Display for IntentName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
