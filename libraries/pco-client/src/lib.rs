//! Planning Center Services Client
//!
//! HTTP client library for the parts of the Planning Center Services API the
//! skill needs.
//!
//! # Features
//!
//! - **People**: the signed-in user (`/me`)
//! - **Plans**: upcoming plans the user is scheduled on, by confirmation status
//! - **Attachments**: streamable attachments of those plans, and opening them
//!   for a short-lived stream URL
//!
//! The access token is request-scoped: the client holds no credentials, each
//! call goes through a [`ServicesClient`] borrowed for one token.
//!
//! # Example
//!
//! ```ignore
//! use pco_client::{ClientConfig, PlanningCenterClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = PlanningCenterClient::new(ClientConfig::default())?;
//!     let services = client.services("oauth-access-token")?;
//!
//!     let plans = services.my_plans().await?;
//!     let attachments = services.streamable_attachments(&plans.confirmed).await?;
//!     println!("Found {} songs", attachments.len());
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod services;
mod types;

// Re-export main types
pub use client::PlanningCenterClient;
pub use error::{ClientError, Result};
pub use services::ServicesClient;
pub use types::{
    Attachment, ClientConfig, Document, Links, Linkage, Person, Plan, PlanPersonStatus,
    PlansByStatus, Relationship, Resource, ResourceIdentifier, ServiceType, DEFAULT_BASE_URL,
};
