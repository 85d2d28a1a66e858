/// Skill launch
use super::{SkillContext, LINK_ACCOUNT_MESSAGE};
use crate::alexa::ResponseBuilder;
use crate::error::Result;
use tracing::{info, warn};

/// Greet the user, offering to resume an earlier session
pub async fn launch(ctx: &mut SkillContext<'_>) -> Result<ResponseBuilder> {
    if ctx.envelope.access_token().is_none() {
        info!("Launch without linked account");
        return Ok(ResponseBuilder::new()
            .speak(LINK_ACCOUNT_MESSAGE)
            .link_account_card()
            .end_session(true));
    }

    let first_name = match fetch_first_name(ctx).await {
        Ok(name) => name,
        Err(e) => {
            warn!(error = %e, "Could not fetch the user's first name");
            String::new()
        }
    };

    if ctx.session.status().has_previous_playback_session() {
        if let Some(title) = ctx.session.current_song().map(|song| song.title.clone()) {
            ctx.session.suspend();
            return Ok(ResponseBuilder::new()
                .speak(format!(
                    "You were listening to {}. Would you like to resume?",
                    title
                ))
                .reprompt("You can say yes to resume or no to play from the top."));
        }
    }

    Ok(ResponseBuilder::new()
        .speak(welcome_message(&first_name))
        .reprompt("You can say, play my upcoming songs, to begin."))
}

async fn fetch_first_name(ctx: &SkillContext<'_>) -> Result<String> {
    Ok(ctx.services()?.user_first_name().await?)
}

fn welcome_message(first_name: &str) -> String {
    let first_name = first_name.trim();
    if first_name.is_empty() {
        "Welcome to Planning Center. You can ask me to play upcoming songs.".to_string()
    } else {
        format!(
            "Welcome to Planning Center {}. You can ask me to play upcoming songs.",
            first_name
        )
    }
}
