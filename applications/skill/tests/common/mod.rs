/// Common test utilities and fixtures
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use pco_client::PlanningCenterClient;
use pco_core::{SessionAttributes, SessionStatus, Song, UserId};
use pco_skill::{api, AppState, AttributesManager, SkillConfig};
use pco_storage::SqliteAttributesStore;
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::TempDir;
use tower::util::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const USER_ID: &str = "amzn1.ask.account.TESTUSER";
pub const APP_ID: &str = "amzn1.ask.skill.test";
pub const ACCESS_TOKEN: &str = "pco-access-token";

/// Skill router backed by a temp `SQLite` file and a mock Planning Center
pub struct TestApp {
    pub router: Router,
    pub pco: MockServer,
    pub attributes: Arc<AttributesManager>,
    _temp_dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_config(|_| {}).await
    }

    pub async fn with_config(configure: impl FnOnce(&mut SkillConfig)) -> Self {
        let pco = MockServer::start().await;
        let temp_dir = TempDir::new().unwrap();

        let mut config = SkillConfig::default();
        config.planning_center.api_base_url = pco.uri();
        config.storage.database_url =
            format!("sqlite://{}", temp_dir.path().join("skill.db").display());
        configure(&mut config);

        let pool = pco_storage::create_pool(&config.storage.database_url)
            .await
            .unwrap();
        pco_storage::run_migrations(&pool).await.unwrap();
        let attributes = Arc::new(AttributesManager::new(Arc::new(
            SqliteAttributesStore::new(pool),
        )));

        let client = PlanningCenterClient::new(config.client_config()).unwrap();
        let state = AppState::new(Arc::clone(&attributes), Arc::new(client), Arc::new(config));

        Self {
            router: api::create_router(state),
            pco,
            attributes,
            _temp_dir: temp_dir,
        }
    }

    /// POST a request envelope, expecting 200
    pub async fn send(&self, body: Value) -> Value {
        let (status, json) = self.send_raw(body).await;
        assert_eq!(status, StatusCode::OK, "unexpected status, body: {json}");
        json
    }

    pub async fn send_raw(&self, body: Value) -> (StatusCode, Value) {
        let response = self
            .router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/skill")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    /// Stored attributes of the test user
    pub async fn stored(&self) -> SessionAttributes {
        self.attributes
            .get(&UserId::new(USER_ID))
            .await
            .unwrap()
            .expect("attributes stored")
    }

    pub async fn store(&self, attributes: &SessionAttributes) {
        self.attributes
            .save(&UserId::new(USER_ID), attributes)
            .await
            .unwrap();
    }

    /// Song pointing at the mock attachment `open` endpoint
    pub fn song(&self, id: &str, title: &str) -> Song {
        Song::new(title, format!("{}/attachments/{}/open", self.pco.uri(), id))
    }

    /// Three songs, device playing the first
    pub fn playing_attributes(&self) -> SessionAttributes {
        let mut attributes = SessionAttributes::default();
        attributes.playlist = vec![
            self.song("a1", "Amazing Grace.mp3"),
            self.song("a2", "Oceans.mp3"),
            self.song("a3", "Holy Spirit.mp3"),
        ];
        attributes.playback_info.play_order = vec![0, 1, 2];
        attributes.playback_info.token = "0".to_string();
        attributes.playback_info.status = SessionStatus::Playing;
        attributes
    }

    /// `/me` for Jane Doe
    pub async fn mount_me(&self) {
        Mock::given(method("GET"))
            .and(path("/me"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {
                    "type": "Person",
                    "id": "1",
                    "attributes": { "first_name": "Jane", "last_name": "Doe" },
                    "links": {
                        "plan_people": format!("{}/people/1/plan_people", self.pco.uri())
                    }
                }
            })))
            .mount(&self.pco)
            .await;
    }

    /// One confirmed plan carrying the given `(id, filename)` attachments,
    /// plus a declined plan that must be ignored
    pub async fn mount_plan_with_songs(&self, songs: &[(&str, &str)]) {
        self.mount_me().await;

        Mock::given(method("GET"))
            .and(path("/people/1/plan_people"))
            .and(query_param("include", "plan"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [
                    {
                        "type": "PlanPerson",
                        "id": "pp1",
                        "attributes": { "status": "C" },
                        "relationships": { "plan": { "data": { "type": "Plan", "id": "10" } } }
                    },
                    {
                        "type": "PlanPerson",
                        "id": "pp2",
                        "attributes": { "status": "D" },
                        "relationships": { "plan": { "data": { "type": "Plan", "id": "11" } } }
                    }
                ],
                "included": [
                    {
                        "type": "Plan",
                        "id": "10",
                        "attributes": { "title": "Sunday" },
                        "links": { "self": format!("{}/plans/10", self.pco.uri()) }
                    },
                    {
                        "type": "Plan",
                        "id": "11",
                        "attributes": { "title": "Wednesday" },
                        "links": { "self": format!("{}/plans/11", self.pco.uri()) }
                    }
                ],
                "links": {}
            })))
            .mount(&self.pco)
            .await;

        let attachments: Vec<Value> = songs
            .iter()
            .map(|(id, filename)| {
                json!({
                    "type": "Attachment",
                    "id": id,
                    "attributes": { "filename": filename, "web_streamable": true },
                    "links": { "self": format!("{}/attachments/{}", self.pco.uri(), id) }
                })
            })
            .collect();

        Mock::given(method("GET"))
            .and(path("/plans/10/all_attachments"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": attachments })))
            .mount(&self.pco)
            .await;

        for (id, _) in songs {
            self.mount_open(id).await;
        }
    }

    /// Opening attachment `id` yields `https://cdn.example.com/{id}.mp3`
    pub async fn mount_open(&self, id: &str) {
        Mock::given(method("POST"))
            .and(path(format!("/attachments/{}/open", id)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {
                    "type": "AttachmentActivity",
                    "id": "1",
                    "attributes": { "attachment_url": stream_url(id) }
                }
            })))
            .mount(&self.pco)
            .await;
    }
}

pub fn stream_url(id: &str) -> String {
    format!("https://cdn.example.com/{}.mp3", id)
}

// =============================================================================
// Request envelopes
// =============================================================================

pub fn envelope(request: Value, access_token: Option<&str>) -> Value {
    let mut user = json!({ "userId": USER_ID });
    if let Some(token) = access_token {
        user["accessToken"] = json!(token);
    }

    json!({
        "version": "1.0",
        "context": {
            "System": {
                "application": { "applicationId": APP_ID },
                "user": user
            }
        },
        "request": request
    })
}

pub fn launch() -> Value {
    envelope(json!({ "type": "LaunchRequest", "requestId": "r" }), Some(ACCESS_TOKEN))
}

pub fn intent(name: &str) -> Value {
    envelope(
        json!({ "type": "IntentRequest", "requestId": "r", "intent": { "name": name } }),
        Some(ACCESS_TOKEN),
    )
}

pub fn intent_with_slot(name: &str, slot: &str, value: &str) -> Value {
    envelope(
        json!({
            "type": "IntentRequest",
            "requestId": "r",
            "intent": {
                "name": name,
                "slots": { slot: { "name": slot, "value": value } }
            }
        }),
        Some(ACCESS_TOKEN),
    )
}

pub fn audio_event(kind: &str, token: &str, offset: u64) -> Value {
    envelope(
        json!({
            "type": format!("AudioPlayer.{}", kind),
            "requestId": "r",
            "token": token,
            "offsetInMilliseconds": offset
        }),
        Some(ACCESS_TOKEN),
    )
}

pub fn controller(kind: &str) -> Value {
    envelope(
        json!({ "type": format!("PlaybackController.{}", kind), "requestId": "r" }),
        Some(ACCESS_TOKEN),
    )
}

// =============================================================================
// Response accessors
// =============================================================================

pub fn speech(response: &Value) -> Option<String> {
    response["response"]["outputSpeech"]["ssml"]
        .as_str()
        .map(str::to_string)
}

pub fn directives(response: &Value) -> Vec<Value> {
    response["response"]["directives"]
        .as_array()
        .cloned()
        .unwrap_or_default()
}

pub fn stream(directive: &Value) -> &Value {
    &directive["audioItem"]["stream"]
}
