//! Playback commands
//!
//! Each command runs the state machine and turns the resulting action into
//! directives. Play and enqueue actions open the attachment first to get a
//! fresh stream URL.

use super::SkillContext;
use crate::alexa::request::Intent;
use crate::alexa::{intents::SONG_TITLE_SLOT, PlayBehavior, ResponseBuilder, Stream};
use crate::error::Result;
use pco_playback::{PlaybackAction, StreamRequest};
use tracing::{debug, info};

/// Play the current track from the saved offset
pub async fn play(ctx: &mut SkillContext<'_>) -> Result<ResponseBuilder> {
    let action = ctx.session.play()?;
    respond(ctx, action).await
}

/// "No" to resuming: start again from the top of the play order
pub async fn restart_from_top(ctx: &mut SkillContext<'_>) -> Result<ResponseBuilder> {
    let action = ctx.session.restart_from_top()?;
    respond(ctx, action).await
}

pub async fn next(ctx: &mut SkillContext<'_>) -> Result<ResponseBuilder> {
    let action = ctx.session.next()?;
    respond(ctx, action).await
}

pub async fn previous(ctx: &mut SkillContext<'_>) -> Result<ResponseBuilder> {
    let action = ctx.session.previous()?;
    respond(ctx, action).await
}

/// Stop the device; the offset arrives with the `PlaybackStopped` event
pub fn pause(ctx: &SkillContext<'_>) -> ResponseBuilder {
    match ctx.session.pause() {
        PlaybackAction::Stop => ResponseBuilder::new().stop(),
        _ => ResponseBuilder::new(),
    }
}

pub fn set_loop(ctx: &mut SkillContext<'_>, enabled: bool) -> ResponseBuilder {
    ctx.session.set_loop(enabled);
    info!(enabled = enabled, "Loop changed");

    if enabled {
        ResponseBuilder::new().speak("Loop turned on.")
    } else {
        ResponseBuilder::new().speak("Loop turned off.")
    }
}

pub async fn shuffle_on(ctx: &mut SkillContext<'_>) -> Result<ResponseBuilder> {
    let action = ctx.session.shuffle_on()?;
    respond(ctx, action).await
}

pub async fn shuffle_off(ctx: &mut SkillContext<'_>) -> Result<ResponseBuilder> {
    let action = ctx.session.shuffle_off()?;
    respond(ctx, action).await
}

/// Play the first song whose title contains the spoken words
pub async fn play_single_song(
    ctx: &mut SkillContext<'_>,
    intent: &Intent,
) -> Result<ResponseBuilder> {
    let query = intent.slot_value(SONG_TITLE_SLOT).unwrap_or_default();

    let Some(song_index) = ctx.session.find_song(query) else {
        debug!(query = %query, "No song matches");
        return Ok(ResponseBuilder::new()
            .speak(format!(
                "I didn't find any songs matching {}. What's the name of a song you'd like to hear?",
                query
            ))
            .reprompt("I can match on part of the title as well."));
    };

    let action = ctx.session.jump_to_song(song_index)?;
    respond(ctx, action).await
}

/// Turn a state-machine action into a response
pub async fn respond(ctx: &SkillContext<'_>, action: PlaybackAction) -> Result<ResponseBuilder> {
    match action {
        PlaybackAction::Play(request) => {
            let title = request.song.title.clone();
            let stream = open_stream(ctx, request).await?;
            info!(token = %stream.token, title = %title, "Playing");

            Ok(ResponseBuilder::new()
                .speak(format!("This is {}", title))
                .end_session(true)
                .play(PlayBehavior::ReplaceAll, stream))
        }
        PlaybackAction::Enqueue(request) => {
            let stream = open_stream(ctx, request).await?;
            debug!(token = %stream.token, "Enqueued next stream");

            Ok(ResponseBuilder::new().play(PlayBehavior::Enqueue, stream))
        }
        PlaybackAction::Stop => Ok(ResponseBuilder::new().stop()),
        PlaybackAction::EndOfPlaylist => Ok(ResponseBuilder::new()
            .speak("You have reached the end of the playlist")
            .stop()),
        PlaybackAction::StartOfPlaylist => Ok(ResponseBuilder::new()
            .speak("You have reached the start of the playlist")
            .stop()),
        PlaybackAction::None => Ok(ResponseBuilder::new()),
    }
}

async fn open_stream(ctx: &SkillContext<'_>, request: StreamRequest) -> Result<Stream> {
    let url = ctx.services()?.open_stream_url(&request.song.url).await?;

    Ok(Stream {
        token: request.token,
        url,
        offset_in_milliseconds: request.offset_in_milliseconds,
        expected_previous_token: request.expected_previous_token,
    })
}
