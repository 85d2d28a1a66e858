/// `AudioPlayer.*` device events
use super::{playback, SkillContext};
use crate::alexa::ResponseBuilder;
use crate::error::Result;
use pco_playback::PlaybackEvent;

/// Apply a device event; only `PlaybackNearlyFinished` can produce a directive
pub async fn handle_event(
    ctx: &mut SkillContext<'_>,
    event: PlaybackEvent,
) -> Result<ResponseBuilder> {
    let action = ctx.session.handle_event(event);
    playback::respond(ctx, action).await
}
