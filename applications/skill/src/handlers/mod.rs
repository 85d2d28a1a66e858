//! Request handlers
//!
//! Every request maps to exactly one handler. The checks run in a fixed
//! order, so a `StopIntent` pauses while audio is playing and says goodbye
//! otherwise.

pub mod audio_player;
pub mod launch;
pub mod playback;
pub mod songs;
pub mod system;

use crate::alexa::{IntentName, Request, RequestEnvelope, ResponseBuilder};
use crate::error::{Result, SkillError};
use pco_client::{PlanningCenterClient, ServicesClient};
use pco_playback::PlaybackSession;
use tracing::{debug, warn};

/// Spoken when a request fails or nothing handles it
pub const ERROR_MESSAGE: &str =
    "Sorry, this is not a valid command. Please say help to hear what you can say.";

/// Spoken when the Planning Center account is not linked
pub const LINK_ACCOUNT_MESSAGE: &str =
    "Please use the Alexa app to link your Planning Center account.";

/// Everything a handler works with during one invocation
pub struct SkillContext<'a> {
    pub envelope: &'a RequestEnvelope,
    pub client: &'a PlanningCenterClient,
    pub session: PlaybackSession,
}

impl<'a> SkillContext<'a> {
    pub fn new(
        envelope: &'a RequestEnvelope,
        client: &'a PlanningCenterClient,
        session: PlaybackSession,
    ) -> Self {
        Self {
            envelope,
            client,
            session,
        }
    }

    /// Planning Center API scoped to the requesting user's token
    pub fn services(&self) -> Result<ServicesClient<'a>> {
        let envelope: &'a RequestEnvelope = self.envelope;
        let client: &'a PlanningCenterClient = self.client;
        let token = envelope
            .access_token()
            .ok_or(SkillError::AccountNotLinked)?;
        Ok(client.services(token)?)
    }
}

/// Route the request to its handler
///
/// Responses to device requests are stripped of speech.
pub async fn handle(ctx: &mut SkillContext<'_>) -> Result<ResponseBuilder> {
    let builder = dispatch(ctx).await?;

    if ctx.envelope.request.is_device_request() {
        Ok(builder.silent())
    } else {
        Ok(builder)
    }
}

async fn dispatch(ctx: &mut SkillContext<'_>) -> Result<ResponseBuilder> {
    let envelope: &RequestEnvelope = ctx.envelope;
    let playing = ctx.session.status().in_playback_session();

    debug!(
        request = envelope.request.kind(),
        status = %ctx.session.status(),
        "Dispatching request"
    );

    match &envelope.request {
        Request::LaunchRequest(_) => launch::launch(ctx).await,
        Request::IntentRequest(request) => {
            let intent = IntentName::parse(&request.intent.name);
            match intent {
                IntentName::Help => Ok(system::help(ctx)),
                IntentName::Yes if !playing => playback::play(ctx).await,
                IntentName::No if !playing => playback::restart_from_top(ctx).await,
                IntentName::PlayAudio | IntentName::Resume => playback::play(ctx).await,
                IntentName::Next if playing => playback::next(ctx).await,
                IntentName::Previous if playing => playback::previous(ctx).await,
                IntentName::Stop | IntentName::Cancel | IntentName::Pause if playing => {
                    Ok(playback::pause(ctx))
                }
                IntentName::LoopOn if playing => Ok(playback::set_loop(ctx, true)),
                IntentName::LoopOff if playing => Ok(playback::set_loop(ctx, false)),
                IntentName::ShuffleOn if playing => playback::shuffle_on(ctx).await,
                IntentName::ShuffleOff if playing => playback::shuffle_off(ctx).await,
                IntentName::StartOver => Ok(system::start_over(ctx)),
                IntentName::Stop | IntentName::Cancel => Ok(system::exit()),
                IntentName::PlaySingleSong => {
                    playback::play_single_song(ctx, &request.intent).await
                }
                IntentName::PlaySongs => songs::play_songs(ctx).await,
                other => Err(SkillError::UnhandledRequest(format!(
                    "{} while {}",
                    other,
                    ctx.session.status()
                ))),
            }
        }
        Request::ExceptionEncountered(request) => Ok(system::exception_encountered(request)),
        Request::SessionEndedRequest(request) => Ok(system::session_ended(request)),
        Request::PlayCommandIssued(_) => playback::play(ctx).await,
        Request::NextCommandIssued(_) if playing => playback::next(ctx).await,
        Request::PreviousCommandIssued(_) if playing => playback::previous(ctx).await,
        Request::PauseCommandIssued(_) => Ok(playback::pause(ctx)),
        request => match request.playback_event() {
            Some(event) => audio_player::handle_event(ctx, event).await,
            None => Err(SkillError::UnhandledRequest(format!(
                "{} while {}",
                request.kind(),
                ctx.session.status()
            ))),
        },
    }
}

/// Response for a failed invocation
pub fn error_response(envelope: &RequestEnvelope, error: &SkillError) -> ResponseBuilder {
    warn!(
        request = envelope.request.kind(),
        error = %error,
        "Request failed"
    );

    if envelope.request.is_device_request() {
        return ResponseBuilder::new();
    }

    if error.needs_account_link() {
        return ResponseBuilder::new()
            .speak(LINK_ACCOUNT_MESSAGE)
            .link_account_card()
            .end_session(true);
    }

    ResponseBuilder::new()
        .speak(ERROR_MESSAGE)
        .reprompt(ERROR_MESSAGE)
}
