//! Types for Planning Center API requests and responses.

use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

/// Base URL of the Planning Center Services API (v2).
pub const DEFAULT_BASE_URL: &str = "https://api.planningcenteronline.com/services/v2";

/// Configuration for the Planning Center client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the Services API
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
}

impl ClientConfig {
    /// Create a config for a different base URL (tests, proxies).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Override the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

// =============================================================================
// JSON:API envelope
// =============================================================================

/// Links object of a document or resource.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct Links(HashMap<String, serde_json::Value>);

impl Links {
    /// Get a link by name, ignoring null links.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(serde_json::Value::as_str)
    }

    /// The `self` link.
    pub fn self_link(&self) -> Option<&str> {
        self.get("self")
    }

    /// The `next` page link.
    pub fn next(&self) -> Option<&str> {
        self.get("next")
    }
}

/// Type and id of a related resource.
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceIdentifier {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Resource linkage of a relationship.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Linkage {
    One(ResourceIdentifier),
    Many(Vec<ResourceIdentifier>),
}

/// A relationship of a resource.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Relationship {
    #[serde(default)]
    pub data: Option<Linkage>,
}

impl Relationship {
    /// Id of a to-one related resource.
    pub fn id(&self) -> Option<&str> {
        match &self.data {
            Some(Linkage::One(identifier)) => Some(&identifier.id),
            _ => None,
        }
    }
}

/// A JSON:API resource object.
#[derive(Debug, Clone, Deserialize)]
pub struct Resource<A> {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub attributes: A,
    #[serde(default)]
    pub relationships: HashMap<String, Relationship>,
    #[serde(default)]
    pub links: Links,
}

/// A JSON:API top-level document.
#[derive(Debug, Clone, Deserialize)]
pub struct Document<D> {
    pub data: D,
    #[serde(default)]
    pub included: Vec<Resource<serde_json::Value>>,
    #[serde(default)]
    pub links: Links,
    #[serde(default)]
    pub meta: serde_json::Value,
}

// =============================================================================
// Resource attributes
// =============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PersonAttributes {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PlanPersonAttributes {
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PlanAttributes {
    pub title: Option<String>,
    pub dates: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AttachmentAttributes {
    pub filename: String,
    pub web_streamable: bool,
    pub content_type: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AttachmentActivityAttributes {
    pub attachment_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ServiceTypeAttributes {
    pub name: Option<String>,
}

// =============================================================================
// Domain types
// =============================================================================

/// The signed-in person.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    /// Link to the person's plan schedule
    pub plan_people_url: Option<String>,
}

impl From<Resource<PersonAttributes>> for Person {
    fn from(resource: Resource<PersonAttributes>) -> Self {
        Self {
            plan_people_url: resource.links.get("plan_people").map(str::to_string),
            id: resource.id,
            first_name: resource.attributes.first_name.unwrap_or_default(),
            last_name: resource.attributes.last_name.unwrap_or_default(),
        }
    }
}

/// Whether the person accepted a scheduled plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanPersonStatus {
    Confirmed,
    Unconfirmed,
    Declined,
}

impl PlanPersonStatus {
    /// Parse the single-letter status code (`C`, `U`, `D`).
    ///
    /// Unknown codes count as unconfirmed.
    pub fn from_code(code: Option<&str>) -> Self {
        match code {
            Some("C") => Self::Confirmed,
            Some("D") => Self::Declined,
            _ => Self::Unconfirmed,
        }
    }
}

/// A scheduled service plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub id: String,
    pub title: Option<String>,
    pub dates: Option<String>,
    pub self_link: Option<String>,
}

impl From<Resource<PlanAttributes>> for Plan {
    fn from(resource: Resource<PlanAttributes>) -> Self {
        Self {
            self_link: resource.links.self_link().map(str::to_string),
            id: resource.id,
            title: resource.attributes.title,
            dates: resource.attributes.dates,
        }
    }
}

/// The user's plans, bucketed by confirmation status.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlansByStatus {
    pub confirmed: Vec<Plan>,
    pub unconfirmed: Vec<Plan>,
    pub declined: Vec<Plan>,
}

impl PlansByStatus {
    /// Add a plan to its bucket, ignoring plans already present.
    pub fn insert(&mut self, status: PlanPersonStatus, plan: Plan) {
        let bucket = match status {
            PlanPersonStatus::Confirmed => &mut self.confirmed,
            PlanPersonStatus::Unconfirmed => &mut self.unconfirmed,
            PlanPersonStatus::Declined => &mut self.declined,
        };
        if !bucket.iter().any(|p| p.id == plan.id) {
            bucket.push(plan);
        }
    }

    /// Number of plans not confirmed (unconfirmed or declined).
    pub fn not_confirmed_count(&self) -> usize {
        self.unconfirmed.len() + self.declined.len()
    }
}

/// A file attached to a plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub id: String,
    pub filename: String,
    pub web_streamable: bool,
    pub content_type: Option<String>,
    pub self_link: Option<String>,
}

impl Attachment {
    /// URL of the attachment's `open` action.
    pub fn open_url(&self) -> Option<String> {
        self.self_link
            .as_deref()
            .map(|link| format!("{}/open", link.trim_end_matches('/')))
    }
}

impl From<Resource<AttachmentAttributes>> for Attachment {
    fn from(resource: Resource<AttachmentAttributes>) -> Self {
        Self {
            self_link: resource.links.self_link().map(str::to_string),
            id: resource.id,
            filename: resource.attributes.filename,
            web_streamable: resource.attributes.web_streamable,
            content_type: resource.attributes.content_type,
        }
    }
}

/// A service type (e.g. "Sunday Morning").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceType {
    pub id: String,
    pub name: String,
}

impl From<Resource<ServiceTypeAttributes>> for ServiceType {
    fn from(resource: Resource<ServiceTypeAttributes>) -> Self {
        Self {
            id: resource.id,
            name: resource.attributes.name.unwrap_or_default(),
        }
    }
}
