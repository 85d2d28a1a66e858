/// Skill endpoint
use crate::alexa::{RequestEnvelope, ResponseEnvelope};
use crate::error::{Result, SkillError};
use crate::handlers::{self, SkillContext};
use crate::state::AppState;
use axum::{extract::State, Json};
use pco_playback::PlaybackSession;
use tracing::{info, warn};

/// POST /skill - Handle one voice-platform request
///
/// Attributes are saved only when the handler succeeds; a failed invocation
/// leaves the stored session as it was.
pub async fn handle_skill_request(
    State(state): State<AppState>,
    Json(envelope): Json<RequestEnvelope>,
) -> Result<Json<ResponseEnvelope>> {
    if let Some(expected) = &state.config.skill.application_id {
        if envelope.application_id() != expected {
            warn!(
                application_id = %envelope.application_id(),
                "Request for another skill rejected"
            );
            return Err(SkillError::Forbidden(
                "Request is not addressed to this skill".to_string(),
            ));
        }
    }

    let user_id = envelope.user_id();
    info!(
        user_id = %user_id,
        request = envelope.request.kind(),
        "Skill request"
    );

    let attributes = state.attributes.load_or_initialize(&user_id).await?;
    let mut ctx = SkillContext::new(&envelope, &state.client, PlaybackSession::new(attributes));

    let builder = match handlers::handle(&mut ctx).await {
        Ok(builder) => {
            state
                .attributes
                .save(&user_id, ctx.session.attributes())
                .await?;
            builder
        }
        Err(e) => handlers::error_response(&envelope, &e),
    };

    Ok(Json(builder.build()))
}
