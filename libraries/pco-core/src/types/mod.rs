mod attributes;
mod ids;
mod playback;
mod song;

pub use attributes::SessionAttributes;
pub use ids::UserId;
pub use playback::{PlaybackInfo, PlaybackSetting, SessionStatus};
pub use song::Song;
