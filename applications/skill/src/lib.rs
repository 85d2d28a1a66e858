//! PCO Skill Library
//!
//! Voice-assistant skill backend that plays the web-streamable song
//! attachments of the user's upcoming Planning Center plans.
//!
//! This library exposes the core components for testing purposes.

pub mod alexa;
pub mod api;
pub mod config;
pub mod error;
pub mod handlers;
pub mod services;
pub mod state;

// Re-export commonly used types for convenience
pub use config::SkillConfig;
pub use error::{Result, SkillError};
pub use services::attributes::AttributesManager;
pub use state::AppState;
