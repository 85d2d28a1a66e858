/// Help, start over, exit and lifecycle notifications
use super::SkillContext;
use crate::alexa::request::{ExceptionEncountered, SessionEndedRequest};
use crate::alexa::ResponseBuilder;
use tracing::{error, info};

const WELCOME_MESSAGE: &str = "Welcome to Planning Center. You can say, play my upcoming songs.";

const PLAYING_HELP: &str = "You are listening to song on Planning Center. You can say, Next or Previous to navigate through the playlist. At any time, you can say Pause to pause the audio and Resume to resume.";

/// Help text for the current state
pub fn help(ctx: &SkillContext<'_>) -> ResponseBuilder {
    let status = ctx.session.status();

    let message = match ctx.session.current_song() {
        Some(_) if status.in_playback_session() => PLAYING_HELP.to_string(),
        Some(song) if status.has_previous_playback_session() => format!(
            "You were listening to {}. Would you like to resume?",
            song.title
        ),
        _ => WELCOME_MESSAGE.to_string(),
    };

    ResponseBuilder::new().speak(&message).reprompt(&message)
}

/// Forget settings, progress and playlist
pub fn start_over(ctx: &mut SkillContext<'_>) -> ResponseBuilder {
    ctx.session.start_over();
    info!(user_id = %ctx.envelope.user_id(), "Session reset");

    ResponseBuilder::new()
        .speak(WELCOME_MESSAGE)
        .reprompt(WELCOME_MESSAGE)
}

pub fn exit() -> ResponseBuilder {
    ResponseBuilder::new().speak("Goodbye!").end_session(true)
}

pub fn exception_encountered(request: &ExceptionEncountered) -> ResponseBuilder {
    error!(
        error = ?request.error.as_ref().map(|e| e.describe()),
        cause = ?request.cause,
        "System exception encountered"
    );
    ResponseBuilder::new()
}

pub fn session_ended(request: &SessionEndedRequest) -> ResponseBuilder {
    info!(
        reason = request.reason.as_deref().unwrap_or("unknown"),
        error = ?request.error.as_ref().map(|e| e.describe()),
        "Session ended"
    );
    ResponseBuilder::new()
}
