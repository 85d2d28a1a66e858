//! Services API operations for one access token.

use crate::error::{ClientError, Result};
use crate::types::{
    Attachment, AttachmentActivityAttributes, AttachmentAttributes, Document, Person,
    PersonAttributes, Plan, PlanAttributes, PlanPersonAttributes, PlanPersonStatus,
    PlansByStatus, Resource, ServiceType, ServiceTypeAttributes,
};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Upper bound on followed `next` links for one listing.
const MAX_PAGES: usize = 50;

/// Page size requested from list endpoints.
const PER_PAGE: &str = "100";

/// Services API client bound to one access token.
pub struct ServicesClient<'a> {
    http: &'a Client,
    base_url: &'a str,
    access_token: &'a str,
}

impl<'a> ServicesClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str, access_token: &'a str) -> Self {
        Self {
            http,
            base_url,
            access_token,
        }
    }

    /// Get the signed-in person (`/me`).
    pub async fn current_user(&self) -> Result<Person> {
        let url = self.resolve("me");
        debug!(url = %url, "Fetching current user");

        let document: Document<Resource<PersonAttributes>> =
            self.execute(self.http.get(&url), "current user").await?;

        Ok(document.data.into())
    }

    /// First name of the signed-in person, empty if not set.
    pub async fn user_first_name(&self) -> Result<String> {
        Ok(self.current_user().await?.first_name)
    }

    /// List all service types.
    pub async fn service_types(&self) -> Result<Vec<ServiceType>> {
        let url = self.resolve("service_types");
        let (resources, _) = self
            .get_all::<ServiceTypeAttributes>(&url, &[("per_page", PER_PAGE)])
            .await?;

        debug!(count = resources.len(), "Fetched service types");
        Ok(resources.into_iter().map(ServiceType::from).collect())
    }

    /// Plans the signed-in person is scheduled on, by confirmation status.
    pub async fn my_plans(&self) -> Result<PlansByStatus> {
        let me = self.current_user().await?;
        let plan_people_url = me
            .plan_people_url
            .ok_or_else(|| ClientError::MissingLink("plan_people".to_string()))?;

        let (plan_people, included) = self
            .get_all::<PlanPersonAttributes>(
                &plan_people_url,
                &[("include", "plan"), ("per_page", PER_PAGE)],
            )
            .await?;

        let mut plans = PlansByStatus::default();
        for plan_person in plan_people {
            let Some(plan_id) = plan_person.relationships.get("plan").and_then(|r| r.id()) else {
                warn!(plan_person = %plan_person.id, "Plan person without a plan");
                continue;
            };

            let Some(plan) = included
                .iter()
                .find(|r| r.kind == "Plan" && r.id == plan_id)
            else {
                warn!(plan_id = %plan_id, "Plan missing from included resources");
                continue;
            };

            let plan: Resource<PlanAttributes> = Resource {
                id: plan.id.clone(),
                kind: plan.kind.clone(),
                attributes: serde_json::from_value(plan.attributes.clone()).map_err(|e| {
                    ClientError::ParseError(format!("Failed to parse plan {}: {}", plan_id, e))
                })?,
                relationships: plan.relationships.clone(),
                links: plan.links.clone(),
            };

            let status = PlanPersonStatus::from_code(plan_person.attributes.status.as_deref());
            plans.insert(status, plan.into());
        }

        info!(
            confirmed = plans.confirmed.len(),
            unconfirmed = plans.unconfirmed.len(),
            declined = plans.declined.len(),
            "Fetched scheduled plans"
        );

        Ok(plans)
    }

    /// Web-streamable attachments of the given plans.
    ///
    /// Attachments shared by several plans are returned once.
    pub async fn streamable_attachments(&self, plans: &[Plan]) -> Result<Vec<Attachment>> {
        let mut seen = HashSet::new();
        let mut attachments = Vec::new();

        for plan in plans {
            let Some(self_link) = plan.self_link.as_deref() else {
                warn!(plan_id = %plan.id, "Plan has no self link, skipping attachments");
                continue;
            };

            let url = format!("{}/all_attachments", self_link.trim_end_matches('/'));
            debug!(url = %url, "Fetching attachments");

            let (resources, _) = self
                .get_all::<AttachmentAttributes>(&url, &[("per_page", PER_PAGE)])
                .await?;

            for resource in resources {
                let attachment = Attachment::from(resource);
                if attachment.web_streamable && seen.insert(attachment.id.clone()) {
                    attachments.push(attachment);
                }
            }
        }

        info!(count = attachments.len(), "Fetched streamable attachments");
        Ok(attachments)
    }

    /// Open an attachment and return its short-lived stream URL.
    pub async fn open_stream_url(&self, open_url: &str) -> Result<String> {
        let url = self.resolve(open_url);
        debug!(url = %url, "Opening attachment");

        let document: Document<Resource<AttachmentActivityAttributes>> =
            self.execute(self.http.post(&url), "attachment activity").await?;

        document.data.attributes.attachment_url.ok_or_else(|| {
            ClientError::ParseError("Attachment activity has no attachment_url".to_string())
        })
    }

    // ===== Internals =====

    /// Resolve a path against the base URL; absolute links pass through.
    fn resolve(&self, url: &str) -> String {
        if url.starts_with("http://") || url.starts_with("https://") {
            url.to_string()
        } else {
            format!("{}/{}", self.base_url, url.trim_start_matches('/'))
        }
    }

    /// Fetch every page of a listing, following `links.next`.
    async fn get_all<A: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<(Vec<Resource<A>>, Vec<Resource<serde_json::Value>>)> {
        let mut data = Vec::new();
        let mut included = Vec::new();

        let mut request = self.http.get(url).query(query);
        for page in 1..=MAX_PAGES {
            let document: Document<Vec<Resource<A>>> = self.execute(request, "listing").await?;
            data.extend(document.data);
            included.extend(document.included);

            match document.links.next() {
                Some(next) => {
                    debug!(page = page, next = %next, "Following next page");
                    request = self.http.get(self.resolve(next));
                }
                None => return Ok((data, included)),
            }
        }

        warn!(url = %url, pages = MAX_PAGES, "Stopped following pagination links");
        Ok((data, included))
    }

    /// Send an authenticated request and decode the JSON body.
    async fn execute<D: DeserializeOwned>(&self, request: RequestBuilder, what: &str) -> Result<D> {
        let response = request
            .bearer_auth(self.access_token)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() || e.is_timeout() {
                    ClientError::ServerUnreachable(e.to_string())
                } else {
                    ClientError::Request(e)
                }
            })?;

        let status = response.status();

        if status.is_success() {
            response.json().await.map_err(|e| {
                ClientError::ParseError(format!("Failed to parse {}: {}", what, e))
            })
        } else if status == StatusCode::UNAUTHORIZED {
            warn!(what = what, "Access token rejected");
            Err(ClientError::AuthRequired)
        } else if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok())
                .unwrap_or(20);
            Err(ClientError::RateLimited { retry_after_secs })
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(ClientError::ServerError {
                status: status.as_u16(),
                message: error_text,
            })
        }
    }
}
