//! Voice-platform request and response envelopes
//!
//! Only the parts of the Alexa Skills Kit JSON interface the skill reads or
//! writes are modelled; unknown fields are ignored.

pub mod intents;
pub mod request;
pub mod response;

pub use intents::IntentName;
pub use request::{Request, RequestEnvelope};
pub use response::{PlayBehavior, ResponseBuilder, ResponseEnvelope, Stream};
