/// Skill API integration tests
/// Drive the router end to end against a mock Planning Center and a real
/// `SQLite` file
mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use common::*;
use pco_core::{SessionAttributes, SessionStatus};
use serde_json::json;
use tower::util::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

const ERROR_SPEECH: &str =
    "<speak>Sorry, this is not a valid command. Please say help to hear what you can say.</speak>";

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_health() {
    let app = TestApp::new().await;

    let response = app
        .router
        .clone()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "ok");
}

// =============================================================================
// Launch
// =============================================================================

mod launch {
    use super::*;

    #[tokio::test]
    async fn test_without_linked_account_asks_to_link() {
        let app = TestApp::new().await;

        let response = app
            .send(envelope(json!({ "type": "LaunchRequest" }), None))
            .await;

        assert_eq!(response["response"]["card"]["type"], "LinkAccount");
        assert_eq!(response["response"]["shouldEndSession"], true);
        assert!(speech(&response).unwrap().contains("link your Planning Center account"));
    }

    #[tokio::test]
    async fn test_first_launch_greets_and_initializes() {
        let app = TestApp::new().await;
        app.mount_me().await;

        let response = app.send(launch()).await;

        assert_eq!(
            speech(&response).unwrap(),
            "<speak>Welcome to Planning Center Jane. You can ask me to play upcoming songs.</speak>"
        );
        assert_eq!(
            response["response"]["reprompt"]["outputSpeech"]["ssml"],
            "<speak>You can say, play my upcoming songs, to begin.</speak>"
        );
        assert_eq!(app.stored().await, SessionAttributes::default());
    }

    #[tokio::test]
    async fn test_name_lookup_failure_still_greets() {
        let app = TestApp::new().await;
        Mock::given(method("GET"))
            .and(path("/me"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&app.pco)
            .await;

        let response = app.send(launch()).await;

        assert_eq!(
            speech(&response).unwrap(),
            "<speak>Welcome to Planning Center. You can ask me to play upcoming songs.</speak>"
        );
    }

    #[tokio::test]
    async fn test_with_history_offers_resume_and_suspends() {
        let app = TestApp::new().await;
        app.mount_me().await;
        let mut attributes = app.playing_attributes();
        attributes.playback_info.index = 1;
        app.store(&attributes).await;

        let response = app.send(launch()).await;

        assert_eq!(
            speech(&response).unwrap(),
            "<speak>You were listening to Oceans.mp3. Would you like to resume?</speak>"
        );
        assert_eq!(app.stored().await.playback_info.status, SessionStatus::Paused);
    }
}

// =============================================================================
// Building the playlist
// =============================================================================

mod play_songs {
    use super::*;

    #[tokio::test]
    async fn test_plays_first_song_of_confirmed_plans() {
        let app = TestApp::new().await;
        app.mount_plan_with_songs(&[
            ("a1", "Amazing Grace.mp3"),
            ("a2", "Oceans.mp3"),
            ("a3", "Holy Spirit.mp3"),
        ])
        .await;

        let response = app.send(intent("PlaySongsIntent")).await;

        assert_eq!(speech(&response).unwrap(), "<speak>This is Amazing Grace.mp3</speak>");
        assert_eq!(response["response"]["shouldEndSession"], true);

        let directives = directives(&response);
        assert_eq!(directives.len(), 1);
        assert_eq!(directives[0]["type"], "AudioPlayer.Play");
        assert_eq!(directives[0]["playBehavior"], "REPLACE_ALL");
        assert_eq!(stream(&directives[0])["token"], "0");
        assert_eq!(stream(&directives[0])["url"], stream_url("a1"));
        assert_eq!(stream(&directives[0])["offsetInMilliseconds"], 0);

        let stored = app.stored().await;
        let titles: Vec<_> = stored.playlist.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Amazing Grace.mp3", "Oceans.mp3", "Holy Spirit.mp3"]);
        assert_eq!(stored.playback_info.play_order, vec![0, 1, 2]);
        assert_eq!(stored.playback_info.status, SessionStatus::Idle);
    }

    #[tokio::test]
    async fn test_rebuild_replaces_previous_playlist() {
        let app = TestApp::new().await;
        app.store(&app.playing_attributes()).await;
        app.mount_plan_with_songs(&[("b1", "New Song.mp3")]).await;

        app.send(intent("PlaySongsIntent")).await;

        let stored = app.stored().await;
        assert_eq!(stored.playlist.len(), 1);
        assert_eq!(stored.playlist[0].title, "New Song.mp3");
        assert_eq!(stored.playback_info.index, 0);
    }

    #[tokio::test]
    async fn test_no_songs() {
        let app = TestApp::new().await;
        app.mount_plan_with_songs(&[]).await;

        let response = app.send(intent("PlaySongsIntent")).await;

        assert_eq!(
            speech(&response).unwrap(),
            "<speak>I couldn&apos;t find any songs in your upcoming confirmed plans.</speak>"
        );
        assert!(directives(&response).is_empty());
    }

    #[tokio::test]
    async fn test_without_linked_account() {
        let app = TestApp::new().await;

        let response = app
            .send(envelope(
                json!({ "type": "IntentRequest", "intent": { "name": "PlaySongsIntent" } }),
                None,
            ))
            .await;

        assert_eq!(response["response"]["card"]["type"], "LinkAccount");
    }

    #[tokio::test]
    async fn test_planning_center_failure_keeps_stored_state() {
        let app = TestApp::new().await;
        let attributes = app.playing_attributes();
        app.store(&attributes).await;
        Mock::given(method("GET"))
            .and(path("/me"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&app.pco)
            .await;

        let response = app.send(intent("PlaySongsIntent")).await;

        assert_eq!(speech(&response).unwrap(), ERROR_SPEECH);
        assert_eq!(app.stored().await, attributes);
    }
}

// =============================================================================
// Listening through the playlist
// =============================================================================

mod device_events {
    use super::*;

    #[tokio::test]
    async fn test_listen_through_with_enqueue() {
        let app = TestApp::new().await;
        app.mount_plan_with_songs(&[("a1", "Amazing Grace.mp3"), ("a2", "Oceans.mp3")])
            .await;

        app.send(intent("PlaySongsIntent")).await;

        // Device confirms playback
        let response = app.send(audio_event("PlaybackStarted", "0", 0)).await;
        assert!(directives(&response).is_empty());
        assert_eq!(app.stored().await.playback_info.status, SessionStatus::Playing);

        // Enqueue the next song once
        let response = app.send(audio_event("PlaybackNearlyFinished", "0", 0)).await;
        assert!(speech(&response).is_none());
        let queued = directives(&response);
        assert_eq!(queued.len(), 1);
        assert_eq!(queued[0]["playBehavior"], "ENQUEUE");
        assert_eq!(stream(&queued[0])["token"], "1");
        assert_eq!(stream(&queued[0])["url"], stream_url("a2"));
        assert_eq!(stream(&queued[0])["expectedPreviousToken"], "0");

        let response = app.send(audio_event("PlaybackNearlyFinished", "0", 0)).await;
        assert!(directives(&response).is_empty());

        // Second song starts
        app.send(audio_event("PlaybackFinished", "0", 0)).await;
        app.send(audio_event("PlaybackStarted", "1", 0)).await;
        let stored = app.stored().await;
        assert_eq!(stored.playback_info.index, 1);
        assert_eq!(stored.playback_info.token, "1");

        // End of playlist without loop: nothing more to enqueue
        let response = app.send(audio_event("PlaybackNearlyFinished", "1", 0)).await;
        assert!(directives(&response).is_empty());

        app.send(audio_event("PlaybackFinished", "1", 0)).await;
        assert_eq!(app.stored().await.playback_info.status, SessionStatus::Idle);
    }

    #[tokio::test]
    async fn test_pause_and_resume_from_offset() {
        let app = TestApp::new().await;
        app.mount_me().await;
        app.mount_open("a2").await;
        let mut attributes = app.playing_attributes();
        attributes.playback_info.index = 1;
        attributes.playback_info.token = "1".to_string();
        app.store(&attributes).await;

        let response = app.send(intent("AMAZON.PauseIntent")).await;
        assert_eq!(directives(&response), vec![json!({ "type": "AudioPlayer.Stop" })]);

        app.send(audio_event("PlaybackStopped", "1", 42_000)).await;
        assert_eq!(app.stored().await.playback_info.offset_in_milliseconds, 42_000);

        let response = app.send(launch()).await;
        assert!(speech(&response).unwrap().contains("Oceans.mp3"));

        let response = app.send(intent("AMAZON.YesIntent")).await;
        let directives = directives(&response);
        assert_eq!(stream(&directives[0])["token"], "1");
        assert_eq!(stream(&directives[0])["offsetInMilliseconds"], 42_000);
    }

    #[tokio::test]
    async fn test_no_plays_from_the_top() {
        let app = TestApp::new().await;
        app.mount_open("a1").await;
        let mut attributes = app.playing_attributes();
        attributes.playback_info.index = 2;
        attributes.playback_info.offset_in_milliseconds = 9_000;
        attributes.playback_info.status = SessionStatus::Paused;
        app.store(&attributes).await;

        let response = app.send(intent("AMAZON.NoIntent")).await;

        let directives = directives(&response);
        assert_eq!(stream(&directives[0])["token"], "0");
        assert_eq!(stream(&directives[0])["offsetInMilliseconds"], 0);
        assert_eq!(app.stored().await.playback_info.status, SessionStatus::Idle);
    }

    #[tokio::test]
    async fn test_failed_enqueue_is_silent_and_not_saved() {
        let app = TestApp::new().await;
        Mock::given(method("POST"))
            .and(path("/attachments/a2/open"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&app.pco)
            .await;
        app.store(&app.playing_attributes()).await;

        let response = app.send(audio_event("PlaybackNearlyFinished", "0", 0)).await;

        assert_eq!(response, json!({ "version": "1.0", "response": {} }));
        assert!(!app.stored().await.playback_info.next_stream_enqueued);
    }

    #[tokio::test]
    async fn test_playback_failed_leaves_playing() {
        let app = TestApp::new().await;
        app.store(&app.playing_attributes()).await;

        let response = app
            .send(envelope(
                json!({
                    "type": "AudioPlayer.PlaybackFailed",
                    "token": "0",
                    "error": { "type": "MEDIA_ERROR_SERVICE_UNAVAILABLE", "message": "gone" }
                }),
                Some(ACCESS_TOKEN),
            ))
            .await;

        assert!(directives(&response).is_empty());
        assert_eq!(app.stored().await.playback_info.status, SessionStatus::Paused);
    }
}

// =============================================================================
// Voice and button navigation
// =============================================================================

mod navigation {
    use super::*;

    #[tokio::test]
    async fn test_next_intent() {
        let app = TestApp::new().await;
        app.mount_open("a2").await;
        app.store(&app.playing_attributes()).await;

        let response = app.send(intent("AMAZON.NextIntent")).await;

        assert_eq!(speech(&response).unwrap(), "<speak>This is Oceans.mp3</speak>");
        assert_eq!(stream(&directives(&response)[0])["token"], "1");
        assert_eq!(app.stored().await.playback_info.index, 1);
    }

    #[tokio::test]
    async fn test_next_button_is_silent() {
        let app = TestApp::new().await;
        app.mount_open("a2").await;
        app.store(&app.playing_attributes()).await;

        let response = app.send(controller("NextCommandIssued")).await;

        assert!(speech(&response).is_none());
        assert!(response["response"].get("shouldEndSession").is_none());
        assert_eq!(stream(&directives(&response)[0])["token"], "1");
    }

    #[tokio::test]
    async fn test_previous_at_start_without_loop() {
        let app = TestApp::new().await;
        app.store(&app.playing_attributes()).await;

        let response = app.send(intent("AMAZON.PreviousIntent")).await;

        assert_eq!(
            speech(&response).unwrap(),
            "<speak>You have reached the start of the playlist</speak>"
        );
        assert_eq!(directives(&response), vec![json!({ "type": "AudioPlayer.Stop" })]);
        assert_eq!(app.stored().await.playback_info.index, 0);
    }

    #[tokio::test]
    async fn test_previous_at_start_with_loop_wraps() {
        let app = TestApp::new().await;
        app.mount_open("a3").await;
        let mut attributes = app.playing_attributes();
        attributes.playback_setting.loop_enabled = true;
        app.store(&attributes).await;

        let response = app.send(intent("AMAZON.PreviousIntent")).await;

        assert_eq!(stream(&directives(&response)[0])["token"], "2");
        assert_eq!(app.stored().await.playback_info.index, 2);
    }

    #[tokio::test]
    async fn test_next_while_not_playing_is_invalid() {
        let app = TestApp::new().await;
        let mut attributes = app.playing_attributes();
        attributes.playback_info.status = SessionStatus::Paused;
        app.store(&attributes).await;

        let response = app.send(intent("AMAZON.NextIntent")).await;

        assert_eq!(speech(&response).unwrap(), ERROR_SPEECH);
        assert_eq!(app.stored().await, attributes);
    }

    #[tokio::test]
    async fn test_pause_button() {
        let app = TestApp::new().await;
        app.store(&app.playing_attributes()).await;

        let response = app.send(controller("PauseCommandIssued")).await;

        assert_eq!(directives(&response), vec![json!({ "type": "AudioPlayer.Stop" })]);
        assert!(speech(&response).is_none());
    }

    #[tokio::test]
    async fn test_play_single_song() {
        let app = TestApp::new().await;
        app.mount_open("a2").await;
        app.store(&app.playing_attributes()).await;

        let response = app
            .send(intent_with_slot("PlaySingleSongIntent", "songTitle", "OCEANS"))
            .await;

        assert_eq!(speech(&response).unwrap(), "<speak>This is Oceans.mp3</speak>");
        assert_eq!(stream(&directives(&response)[0])["token"], "1");
    }

    #[tokio::test]
    async fn test_play_single_song_not_found() {
        let app = TestApp::new().await;
        app.store(&app.playing_attributes()).await;

        let response = app
            .send(intent_with_slot("PlaySingleSongIntent", "songTitle", "Blessed Be"))
            .await;

        assert_eq!(
            speech(&response).unwrap(),
            "<speak>I didn&apos;t find any songs matching Blessed Be. What&apos;s the name of a song you&apos;d like to hear?</speak>"
        );
        assert!(directives(&response).is_empty());
    }
}

// =============================================================================
// Settings
// =============================================================================

mod settings {
    use super::*;

    #[tokio::test]
    async fn test_loop_on_and_off() {
        let app = TestApp::new().await;
        app.store(&app.playing_attributes()).await;

        let response = app.send(intent("AMAZON.LoopOnIntent")).await;
        assert_eq!(speech(&response).unwrap(), "<speak>Loop turned on.</speak>");
        assert!(app.stored().await.playback_setting.loop_enabled);

        let response = app.send(intent("AMAZON.LoopOffIntent")).await;
        assert_eq!(speech(&response).unwrap(), "<speak>Loop turned off.</speak>");
        assert!(!app.stored().await.playback_setting.loop_enabled);
    }

    #[tokio::test]
    async fn test_shuffle_on_then_off_keeps_current_song() {
        let app = TestApp::new().await;
        for id in ["a1", "a2", "a3"] {
            app.mount_open(id).await;
        }
        app.store(&app.playing_attributes()).await;

        app.send(intent("AMAZON.ShuffleOnIntent")).await;
        let stored = app.stored().await;
        assert!(stored.playback_setting.shuffle);
        let mut order = stored.playback_info.play_order.clone();
        order.sort_unstable();
        assert_eq!(order, vec![0, 1, 2]);
        let current = stored.playback_info.play_order[stored.playback_info.index];

        // The device confirms before the next command
        app.send(audio_event("PlaybackStarted", &current.to_string(), 0))
            .await;

        let response = app.send(intent("AMAZON.ShuffleOffIntent")).await;
        let stored = app.stored().await;
        assert!(!stored.playback_setting.shuffle);
        assert_eq!(stored.playback_info.play_order, vec![0, 1, 2]);
        assert_eq!(stored.playback_info.index, current);
        assert_eq!(
            stream(&directives(&response)[0])["token"],
            current.to_string()
        );
    }

    #[tokio::test]
    async fn test_start_over_resets_everything() {
        let app = TestApp::new().await;
        let mut attributes = app.playing_attributes();
        attributes.playback_setting.loop_enabled = true;
        app.store(&attributes).await;

        let response = app.send(intent("AMAZON.StartOverIntent")).await;

        assert_eq!(
            speech(&response).unwrap(),
            "<speak>Welcome to Planning Center. You can say, play my upcoming songs.</speak>"
        );
        assert_eq!(app.stored().await, SessionAttributes::default());
    }
}

// =============================================================================
// Help, exit and errors
// =============================================================================

mod conversation {
    use super::*;

    #[tokio::test]
    async fn test_help_while_playing() {
        let app = TestApp::new().await;
        app.store(&app.playing_attributes()).await;

        let response = app.send(intent("AMAZON.HelpIntent")).await;

        assert!(speech(&response).unwrap().contains("Next or Previous"));
    }

    #[tokio::test]
    async fn test_stop_when_not_playing_says_goodbye() {
        let app = TestApp::new().await;

        let response = app.send(intent("AMAZON.StopIntent")).await;

        assert_eq!(speech(&response).unwrap(), "<speak>Goodbye!</speak>");
        assert_eq!(response["response"]["shouldEndSession"], true);
    }

    #[tokio::test]
    async fn test_unknown_intent() {
        let app = TestApp::new().await;

        let response = app.send(intent("AMAZON.RepeatIntent")).await;

        assert_eq!(speech(&response).unwrap(), ERROR_SPEECH);
        assert_eq!(
            response["response"]["reprompt"]["outputSpeech"]["ssml"],
            ERROR_SPEECH
        );
    }

    #[tokio::test]
    async fn test_play_with_empty_playlist() {
        let app = TestApp::new().await;

        let response = app.send(intent("PlayAudio")).await;

        assert_eq!(speech(&response).unwrap(), ERROR_SPEECH);
    }

    #[tokio::test]
    async fn test_session_ended() {
        let app = TestApp::new().await;

        let response = app
            .send(envelope(
                json!({ "type": "SessionEndedRequest", "reason": "USER_INITIATED" }),
                Some(ACCESS_TOKEN),
            ))
            .await;

        assert_eq!(response, json!({ "version": "1.0", "response": {} }));
    }

    #[tokio::test]
    async fn test_wrong_application_is_rejected() {
        let app = TestApp::with_config(|config| {
            config.skill.application_id = Some("amzn1.ask.skill.other".to_string());
        })
        .await;

        let (status, body) = app.send_raw(launch()).await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_matching_application_is_accepted() {
        let app = TestApp::with_config(|config| {
            config.skill.application_id = Some(APP_ID.to_string());
        })
        .await;
        app.mount_me().await;

        let (status, _) = app.send_raw(launch()).await;

        assert_eq!(status, StatusCode::OK);
    }
}
