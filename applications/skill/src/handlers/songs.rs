/// Building the playlist from the user's upcoming plans
use super::{playback, SkillContext};
use crate::alexa::ResponseBuilder;
use crate::error::Result;
use crate::services::playlist::build_playlist;
use tracing::info;

const NO_SONGS_MESSAGE: &str = "I couldn't find any songs in your upcoming confirmed plans.";

/// Fetch the songs of all confirmed plans and start playing them
///
/// The playlist is replaced, not extended. It is shuffled when shuffle is on.
pub async fn play_songs(ctx: &mut SkillContext<'_>) -> Result<ResponseBuilder> {
    let services = ctx.services()?;
    let plans = services.my_plans().await?;
    let attachments = services.streamable_attachments(&plans.confirmed).await?;
    let songs = build_playlist(&attachments);

    info!(
        plans = plans.confirmed.len(),
        songs = songs.len(),
        "Fetched songs from confirmed plans"
    );

    if songs.is_empty() {
        return Ok(ResponseBuilder::new().speak(NO_SONGS_MESSAGE).end_session(true));
    }

    ctx.session.load_playlist(songs);
    playback::play(ctx).await
}
