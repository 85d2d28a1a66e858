//! Outbound response envelope and builder

use serde::{Deserialize, Serialize};

/// Response envelope version
pub const VERSION: &str = "1.0";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub version: String,
    pub response: Response,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_speech: Option<OutputSpeech>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card: Option<Card>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reprompt: Option<Reprompt>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub directives: Vec<Directive>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub should_end_session: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSpeech {
    #[serde(rename = "type")]
    pub kind: String,
    pub ssml: String,
}

impl OutputSpeech {
    pub fn ssml(text: &str) -> Self {
        Self {
            kind: "SSML".to_string(),
            ssml: format!("<speak>{}</speak>", escape_xml(text)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reprompt {
    pub output_speech: OutputSpeech,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Card {
    /// Asks the user to link their account in the companion app
    LinkAccount,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Directive {
    #[serde(rename = "AudioPlayer.Play")]
    Play(PlayDirective),
    #[serde(rename = "AudioPlayer.Stop")]
    Stop,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayDirective {
    pub play_behavior: PlayBehavior,
    pub audio_item: AudioItem,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlayBehavior {
    /// Stop the current stream and clear the queue
    ReplaceAll,
    /// Append after the last queued stream
    Enqueue,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioItem {
    pub stream: Stream,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stream {
    pub token: String,
    pub url: String,
    pub offset_in_milliseconds: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_previous_token: Option<String>,
}

/// Fluent builder for [`ResponseEnvelope`]
///
/// ```
/// use pco_skill::alexa::ResponseBuilder;
///
/// let envelope = ResponseBuilder::new()
///     .speak("Loop turned on.")
///     .build();
/// assert_eq!(
///     envelope.response.output_speech.unwrap().ssml,
///     "<speak>Loop turned on.</speak>"
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct ResponseBuilder {
    response: Response,
}

impl ResponseBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Say something; text is XML-escaped into SSML
    pub fn speak(mut self, text: impl AsRef<str>) -> Self {
        self.response.output_speech = Some(OutputSpeech::ssml(text.as_ref()));
        self
    }

    /// Say something if the user does not answer; keeps the session open
    pub fn reprompt(mut self, text: impl AsRef<str>) -> Self {
        self.response.reprompt = Some(Reprompt {
            output_speech: OutputSpeech::ssml(text.as_ref()),
        });
        if self.response.should_end_session.is_none() {
            self.response.should_end_session = Some(false);
        }
        self
    }

    pub fn link_account_card(mut self) -> Self {
        self.response.card = Some(Card::LinkAccount);
        self
    }

    pub fn end_session(mut self, end: bool) -> Self {
        self.response.should_end_session = Some(end);
        self
    }

    /// Add an `AudioPlayer.Play` directive
    pub fn play(mut self, play_behavior: PlayBehavior, stream: Stream) -> Self {
        self.response.directives.push(Directive::Play(PlayDirective {
            play_behavior,
            audio_item: AudioItem { stream },
        }));
        self
    }

    /// Add an `AudioPlayer.Stop` directive
    pub fn stop(mut self) -> Self {
        self.response.directives.push(Directive::Stop);
        self
    }

    /// Drop everything a device request cannot carry
    pub fn silent(mut self) -> Self {
        self.response.output_speech = None;
        self.response.reprompt = None;
        self.response.card = None;
        self.response.should_end_session = None;
        self
    }

    pub fn build(self) -> ResponseEnvelope {
        ResponseEnvelope {
            version: VERSION.to_string(),
            response: self.response,
        }
    }
}

/// Escape text for inclusion in SSML
pub fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            c => escaped.push(c),
        }
    }
    escaped
}
