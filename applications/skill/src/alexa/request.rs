//! Inbound request envelope

use pco_core::UserId;
use pco_playback::PlaybackEvent;
use serde::Deserialize;
use std::collections::HashMap;

/// A request from the voice platform
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestEnvelope {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub session: Option<Session>,
    pub context: Context,
    pub request: Request,
}

impl RequestEnvelope {
    /// Voice-platform user id, the key of the persisted attributes
    pub fn user_id(&self) -> UserId {
        UserId::new(self.context.system.user.user_id.clone())
    }

    /// Linked Planning Center access token, if the account is linked
    pub fn access_token(&self) -> Option<&str> {
        self.context
            .system
            .user
            .access_token
            .as_deref()
            .filter(|token| !token.trim().is_empty())
    }

    /// Id of the skill the request is addressed to
    pub fn application_id(&self) -> &str {
        &self.context.system.application.application_id
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(default)]
    pub new: bool,
    #[serde(default)]
    pub session_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Context {
    #[serde(rename = "System")]
    pub system: SystemContext,
    #[serde(rename = "AudioPlayer", default)]
    pub audio_player: Option<AudioPlayerContext>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemContext {
    pub application: Application,
    pub user: User,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub application_id: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_id: String,
    #[serde(default)]
    pub access_token: Option<String>,
}

/// What the device reports about its player
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioPlayerContext {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub offset_in_milliseconds: Option<u64>,
    #[serde(default)]
    pub player_activity: Option<String>,
}

/// The request body, by `type`
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum Request {
    LaunchRequest(RequestInfo),
    IntentRequest(IntentRequest),
    SessionEndedRequest(SessionEndedRequest),
    #[serde(rename = "System.ExceptionEncountered")]
    ExceptionEncountered(ExceptionEncountered),
    #[serde(rename = "AudioPlayer.PlaybackStarted")]
    PlaybackStarted(AudioPlayerRequest),
    #[serde(rename = "AudioPlayer.PlaybackFinished")]
    PlaybackFinished(AudioPlayerRequest),
    #[serde(rename = "AudioPlayer.PlaybackStopped")]
    PlaybackStopped(AudioPlayerRequest),
    #[serde(rename = "AudioPlayer.PlaybackNearlyFinished")]
    PlaybackNearlyFinished(AudioPlayerRequest),
    #[serde(rename = "AudioPlayer.PlaybackFailed")]
    PlaybackFailed(PlaybackFailedRequest),
    #[serde(rename = "PlaybackController.PlayCommandIssued")]
    PlayCommandIssued(RequestInfo),
    #[serde(rename = "PlaybackController.PauseCommandIssued")]
    PauseCommandIssued(RequestInfo),
    #[serde(rename = "PlaybackController.NextCommandIssued")]
    NextCommandIssued(RequestInfo),
    #[serde(rename = "PlaybackController.PreviousCommandIssued")]
    PreviousCommandIssued(RequestInfo),
    #[serde(other)]
    Unknown,
}

impl Request {
    /// Request type name for logging
    pub fn kind(&self) -> &'static str {
        match self {
            Self::LaunchRequest(_) => "LaunchRequest",
            Self::IntentRequest(_) => "IntentRequest",
            Self::SessionEndedRequest(_) => "SessionEndedRequest",
            Self::ExceptionEncountered(_) => "System.ExceptionEncountered",
            Self::PlaybackStarted(_) => "AudioPlayer.PlaybackStarted",
            Self::PlaybackFinished(_) => "AudioPlayer.PlaybackFinished",
            Self::PlaybackStopped(_) => "AudioPlayer.PlaybackStopped",
            Self::PlaybackNearlyFinished(_) => "AudioPlayer.PlaybackNearlyFinished",
            Self::PlaybackFailed(_) => "AudioPlayer.PlaybackFailed",
            Self::PlayCommandIssued(_) => "PlaybackController.PlayCommandIssued",
            Self::PauseCommandIssued(_) => "PlaybackController.PauseCommandIssued",
            Self::NextCommandIssued(_) => "PlaybackController.NextCommandIssued",
            Self::PreviousCommandIssued(_) => "PlaybackController.PreviousCommandIssued",
            Self::Unknown => "Unknown",
        }
    }

    /// Requests sent by the device rather than spoken by the user
    ///
    /// Responses to these must not carry speech, cards or reprompts.
    pub fn is_device_request(&self) -> bool {
        matches!(
            self,
            Self::PlaybackStarted(_)
                | Self::PlaybackFinished(_)
                | Self::PlaybackStopped(_)
                | Self::PlaybackNearlyFinished(_)
                | Self::PlaybackFailed(_)
                | Self::PlayCommandIssued(_)
                | Self::PauseCommandIssued(_)
                | Self::NextCommandIssued(_)
                | Self::PreviousCommandIssued(_)
        )
    }

    /// The playback event carried by an `AudioPlayer.*` request
    pub fn playback_event(&self) -> Option<PlaybackEvent> {
        match self {
            Self::PlaybackStarted(r) => Some(PlaybackEvent::Started {
                token: r.token.clone().unwrap_or_default(),
            }),
            Self::PlaybackFinished(_) => Some(PlaybackEvent::Finished),
            Self::PlaybackStopped(r) => Some(PlaybackEvent::Stopped {
                token: r.token.clone().unwrap_or_default(),
                offset_in_milliseconds: r.offset_in_milliseconds.unwrap_or(0),
            }),
            Self::PlaybackNearlyFinished(_) => Some(PlaybackEvent::NearlyFinished),
            Self::PlaybackFailed(r) => Some(PlaybackEvent::Failed {
                error: r.error.as_ref().map(ErrorInfo::describe),
            }),
            _ => None,
        }
    }
}

/// Fields common to every request type
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestInfo {
    #[serde(default)]
    pub request_id: String,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub locale: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentRequest {
    #[serde(default)]
    pub request_id: String,
    pub intent: Intent,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Intent {
    pub name: String,
    #[serde(default)]
    pub slots: HashMap<String, Slot>,
}

impl Intent {
    /// Spoken value of a slot, if filled
    pub fn slot_value(&self, name: &str) -> Option<&str> {
        self.slots
            .get(name)
            .and_then(|slot| slot.value.as_deref())
            .filter(|value| !value.trim().is_empty())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Slot {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub value: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionEndedRequest {
    #[serde(default)]
    pub request_id: String,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub error: Option<ErrorInfo>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExceptionEncountered {
    #[serde(default)]
    pub request_id: String,
    #[serde(default)]
    pub error: Option<ErrorInfo>,
    #[serde(default)]
    pub cause: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioPlayerRequest {
    #[serde(default)]
    pub request_id: String,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub offset_in_milliseconds: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackFailedRequest {
    #[serde(default)]
    pub request_id: String,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub error: Option<ErrorInfo>,
}

/// Error details attached to a failure report
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorInfo {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorInfo {
    pub fn describe(&self) -> String {
        match (&self.kind, &self.message) {
            (Some(kind), Some(message)) => format!("{}: {}", kind, message),
            (Some(kind), None) => kind.clone(),
            (None, Some(message)) => message.clone(),
            (None, None) => "unknown error".to_string(),
        }
    }
}
