//! Tests for the Sonora Server Client library.
//!
//! These tests use mock servers to verify client behavior without
//! requiring a real backend.

use serde_json::json;
use sonora_core::types::CreateSessionRequest;
use sonora_core::{
    CommitPlaylistRequest, Difficulty, ExclusionSet, Mbid, PlaylistId, RadioBackend, RadioError,
    RadioRequest, RadioWorkflow, RecordingId, SessionId,
};
use std::sync::Arc;
use sonora_server_client::{ServerClientError, ServerConfig, SonoraServerClient};
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn client_for(mock_server: &MockServer) -> SonoraServerClient {
    let config = ServerConfig::new(format!("{}/api", mock_server.uri()));
    SonoraServerClient::new(config).unwrap()
}

fn recording_json(i: usize) -> serde_json::Value {
    json!({
        "id": format!("song-{}", i),
        "mbid": format!("mbid-{}", i),
        "durationMs": 200_400,
        "title": format!("Song {}", i),
        "year": 1999,
        "artists": [{"mbid": "artist-1", "name": "Artist"}],
        "release": {"mbid": "release-1", "name": "Release"}
    })
}

// =============================================================================
// Client Creation Tests
// =============================================================================

mod client_creation {
    use super::*;

    #[test]
    fn test_default_timeout() {
        let config = ServerConfig::new("https://example.com/api");
        assert_eq!(config.timeout_secs, 120);
        assert_eq!(config.with_timeout(5).timeout_secs, 5);
    }

    #[test]
    fn test_empty_url_rejected() {
        let result = SonoraServerClient::new(ServerConfig::new(""));

        match result {
            Err(ServerClientError::InvalidUrl(msg)) => assert!(msg.contains("empty")),
            _ => panic!("Expected InvalidUrl error"),
        }
    }

    #[test]
    fn test_url_without_scheme_rejected() {
        let result = SonoraServerClient::new(ServerConfig::new("example.com/api"));

        match result {
            Err(ServerClientError::InvalidUrl(msg)) => {
                assert!(msg.contains("http://") || msg.contains("https://"));
            }
            _ => panic!("Expected InvalidUrl error"),
        }
    }

    #[test]
    fn test_url_normalization_trailing_slash() {
        let client = SonoraServerClient::new(ServerConfig::new("https://example.com/api/")).unwrap();
        assert_eq!(client.url(), "https://example.com/api");
    }
}

// =============================================================================
// Authentication Tests
// =============================================================================

mod authentication {
    use super::*;

    #[tokio::test]
    async fn test_successful_login() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/login"))
            .and(body_json(json!({"username": "testuser", "password": "password123"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        assert!(client.login("testuser", "password123").await.is_ok());
    }

    #[tokio::test]
    async fn test_login_cookie_is_replayed() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/login"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("set-cookie", "session=abc123; Path=/")
                    .set_body_json(json!({})),
            )
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/api/session"))
            .and(header("cookie", "session=abc123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        client.login("testuser", "password123").await.unwrap();

        let sessions = client.radio().list_sessions().await.unwrap();
        assert!(sessions.is_empty());
    }

    #[tokio::test]
    async fn test_login_invalid_credentials() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/login"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({"error": "Login failed"})))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;

        match client.login("wronguser", "wrongpassword").await {
            Err(ServerClientError::AuthFailed(msg)) => assert_eq!(msg, "Login failed"),
            other => panic!("Expected AuthFailed, got: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_logout() {
        let mock_server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/api/logout"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        assert!(client.logout().await.is_ok());
    }

    #[tokio::test]
    async fn test_timed_out_session_requires_auth() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/playlists"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;

        match client.playlists().list().await {
            Err(ServerClientError::AuthRequired) => {}
            other => panic!("Expected AuthRequired, got: {:?}", other),
        }
    }
}

// =============================================================================
// Radio Tests
// =============================================================================

mod radio {
    use super::*;

    #[tokio::test]
    async fn test_prompt_request_wire_shape() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/radio"))
            .and(body_json(json!({
                "excludedIds": ["a", "b"],
                "source": {"type": "prompt", "prompt": "artist:(A1)", "difficulty": "hard"}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "log": "HatedRecordingsFilterElement 75",
                "playlist": {
                    "name": "Radio A1",
                    "recordings": [recording_json(1), recording_json(2)]
                }
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let excluded: ExclusionSet = ["b", "a"].into_iter().map(Mbid::new).collect();
        let request = RadioRequest::from_prompt("artist:(A1)", Difficulty::Hard, excluded);

        let response = client.radio().generate(&request).await.unwrap();
        assert_eq!(response.playlist.name, "Radio A1");
        assert_eq!(response.playlist.recordings.len(), 2);
        assert_eq!(response.playlist.recordings[0].duration_ms, 200_400);
        assert_eq!(response.playlist.recordings[0].duration_secs_rounded(), 200);
        assert_eq!(response.log, "HatedRecordingsFilterElement 75");
    }

    #[tokio::test]
    async fn test_session_request_wire_shape() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/radio"))
            .and(body_json(json!({
                "excludedIds": [],
                "source": {"type": "session", "id": 12}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "log": "",
                "playlist": {"name": "Session", "recordings": [recording_json(1)]}
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let response = client
            .radio()
            .generate(&RadioRequest::from_session(SessionId::new(12)))
            .await
            .unwrap();
        assert_eq!(response.playlist.recordings.len(), 1);
    }

    #[tokio::test]
    async fn test_error_body_is_rejection() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/radio"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": "could not find recordings to make a playlist"
            })))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let request = RadioRequest::from_session(SessionId::new(3));

        match client.radio().generate(&request).await {
            Err(ServerClientError::ServerError { status, message }) => {
                assert_eq!(status, 400);
                assert_eq!(message, "could not find recordings to make a playlist");
            }
            other => panic!("Expected ServerError, got: {:?}", other),
        }

        // Through the backend seam it is a rejection
        let err = RadioBackend::radio(&client, &request).await.unwrap_err();
        assert!(err.is_rejection());
    }

    #[tokio::test]
    async fn test_error_body_with_success_status() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/radio"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"error": "Bad mode"})))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let request = RadioRequest::from_prompt("tag:(rock)", Difficulty::Easy, ExclusionSet::new());

        match client.radio().generate(&request).await {
            Err(ServerClientError::ServerError { status, message }) => {
                assert_eq!(status, 200);
                assert_eq!(message, "Bad mode");
            }
            other => panic!("Expected ServerError, got: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_proxy_error_page_is_not_a_rejection() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/radio"))
            .respond_with(ResponseTemplate::new(502).set_body_string("<html>502 Bad Gateway</html>"))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let request = RadioRequest::from_session(SessionId::new(4));

        match client.radio().generate(&request).await {
            Err(ServerClientError::HttpStatus { status, body }) => {
                assert_eq!(status, 502);
                assert!(body.contains("Bad Gateway"));
            }
            other => panic!("Expected HttpStatus, got: {:?}", other),
        }

        let err = RadioBackend::radio(&client, &request).await.unwrap_err();
        assert!(matches!(err, RadioError::Transport(_)));
        assert!(!err.is_rejection());
    }

    #[tokio::test]
    async fn test_malformed_response() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/radio"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not valid json"))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let request = RadioRequest::from_prompt("tag:(rock)", Difficulty::Easy, ExclusionSet::new());

        match client.radio().generate(&request).await {
            Err(ServerClientError::ParseError(_)) => {}
            other => panic!("Expected ParseError, got: {:?}", other),
        }

        let err = RadioBackend::radio(&client, &request).await.unwrap_err();
        assert!(matches!(err, RadioError::Transport(_)));
    }

    #[tokio::test]
    async fn test_unreachable_server() {
        let client = SonoraServerClient::new(
            ServerConfig::new("http://127.0.0.1:1/api").with_timeout(2),
        )
        .unwrap();
        let request = RadioRequest::from_session(SessionId::new(1));

        let err = RadioBackend::radio(&client, &request).await.unwrap_err();
        assert!(matches!(err, RadioError::Transport(_)));
    }
}

// =============================================================================
// Session Tests
// =============================================================================

mod sessions {
    use super::*;

    #[tokio::test]
    async fn test_create_session() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/session"))
            .and(body_json(json!({
                "ids": ["m1", "m2"],
                "difficulty": "medium",
                "name": "Radio",
                "prompt": "tag:(rock)"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 42})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let request = CreateSessionRequest {
            ids: vec![Mbid::new("m1"), Mbid::new("m2")],
            difficulty: Difficulty::Medium,
            name: "Radio".into(),
            prompt: "tag:(rock)".into(),
        };

        let id = client.radio().create_session(&request).await.unwrap();
        assert_eq!(id, SessionId::new(42));
    }

    #[tokio::test]
    async fn test_list_sessions() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/session"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 1, "name": "Morning", "seen": 50},
                {"id": 2, "name": "Evening", "seen": 150}
            ])))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let sessions = client.radio().list_sessions().await.unwrap();

        assert_eq!(sessions.len(), 2);
        assert_eq!(sessions[1].label(), "Evening (seen: 150)");
    }

    #[tokio::test]
    async fn test_gateway_failure_keeps_session() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/session"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 4, "name": "Evening", "seen": 50}
            ])))
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/api/playlists"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&mock_server)
            .await;

        Mock::given(method("POST"))
            .and(path("/api/radio"))
            .respond_with(ResponseTemplate::new(502).set_body_string("<html>502 Bad Gateway</html>"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let mut workflow = RadioWorkflow::new(Arc::new(client_for(&mock_server).await));
        workflow.refresh().await.unwrap();

        let err = workflow
            .continue_session(SessionId::new(4))
            .await
            .unwrap_err();
        assert!(matches!(err, RadioError::Transport(_)));

        let session = workflow.sessions().get(SessionId::new(4)).unwrap();
        assert_eq!(session.seen_count, 50);
        assert!(workflow.draft().is_none());
    }

    #[tokio::test]
    async fn test_exhausted_session_is_dropped() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/session"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 4, "name": "Evening", "seen": 50}
            ])))
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/api/playlists"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&mock_server)
            .await;

        Mock::given(method("POST"))
            .and(path("/api/radio"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": "could not find recordings to make a playlist"
            })))
            .mount(&mock_server)
            .await;

        let mut workflow = RadioWorkflow::new(Arc::new(client_for(&mock_server).await));
        workflow.refresh().await.unwrap();

        let outcome = workflow.continue_session(SessionId::new(4)).await.unwrap();
        assert!(matches!(
            outcome,
            sonora_core::RadioOutcome::SessionFinished { id, .. } if id == SessionId::new(4)
        ));
        assert!(workflow.sessions().get(SessionId::new(4)).is_none());
    }

    #[tokio::test]
    async fn test_delete_session() {
        let mock_server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/api/session/7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        assert!(client.radio().delete_session(SessionId::new(7)).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_missing_session() {
        let mock_server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/api/session/8"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;

        match client.radio().delete_session(SessionId::new(8)).await {
            Err(ServerClientError::NotFound { entity, id }) => {
                assert_eq!(entity, "Session");
                assert_eq!(id, "8");
            }
            other => panic!("Expected NotFound, got: {:?}", other),
        }

        let err = RadioBackend::delete_session(&client, SessionId::new(8))
            .await
            .unwrap_err();
        assert!(matches!(err, RadioError::NotFound { .. }));
    }
}

// =============================================================================
// Playlist Tests
// =============================================================================

mod playlists {
    use super::*;

    #[tokio::test]
    async fn test_list_playlists() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/playlists"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": "p1", "name": "Favourites", "songs": 12, "duration": 3725}
            ])))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let playlists = client.playlists().list().await.unwrap();

        assert_eq!(playlists.len(), 1);
        assert_eq!(playlists[0].label(), "Favourites (12 songs, 01:02:05)");
    }

    #[tokio::test]
    async fn test_create_playlist() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/createPlaylist"))
            .and(body_json(json!({"name": "Mine", "ids": ["s2", "s1"]})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "new-1"})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let request = CommitPlaylistRequest::Create {
            name: "Mine".into(),
            ids: vec![RecordingId::new("s2"), RecordingId::new("s1")],
        };

        let id = client.playlists().commit(&request).await.unwrap();
        assert_eq!(id, PlaylistId::new("new-1"));
    }

    #[tokio::test]
    async fn test_replace_playlist() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/createPlaylist"))
            .and(body_json(json!({"id": "p1", "ids": ["s1"]})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "p1"})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let request = CommitPlaylistRequest::Update {
            id: PlaylistId::new("p1"),
            ids: vec![RecordingId::new("s1")],
        };

        let id = RadioBackend::commit_playlist(&client, &request).await.unwrap();
        assert_eq!(id, PlaylistId::new("p1"));
    }
}

// =============================================================================
// Library Tests
// =============================================================================

mod library {
    use super::*;

    #[tokio::test]
    async fn test_tags() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/tags"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "artists": [
                    {"count": 4, "mbid": "a1", "name": "Björk", "subsonic_name": "Bjork", "subsonic_id": "ar-1"},
                    {"count": 2, "mbid": "a2", "name": "Low", "subsonic_name": null, "subsonic_id": null}
                ],
                "resolved_recordings": 6,
                "tags": [{"count": 5, "name": "rock"}]
            })))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let tags = client.library().tags().await.unwrap();

        assert_eq!(tags.resolved_recordings, 6);
        assert_eq!(tags.artists[0].display_name(), "Bjork ⋅ Björk");
        assert_eq!(tags.artists[1].display_name(), "Low");
    }

    #[tokio::test]
    async fn test_start_scan() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/scan"))
            .and(body_json(json!({"full": true})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"started": true})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let started = client.library().start_scan(true).await.unwrap();
        assert!(started.started);
    }

    #[tokio::test]
    async fn test_wait_for_scan() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/scanStatus"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"fetched": 10, "scanning": true})),
            )
            .up_to_n_times(2)
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/api/scanStatus"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"fetched": 25, "scanning": false})),
            )
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let mut progress = Vec::new();
        let status = client
            .library()
            .wait_for_scan(Duration::from_millis(10), |s| progress.push(s.fetched))
            .await
            .unwrap();

        assert_eq!(status.fetched, 25);
        assert!(!status.scanning);
        assert_eq!(progress, vec![10, 10]);
    }
}

// =============================================================================
// Error Tests
// =============================================================================

mod errors {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = ServerClientError::AuthRequired;
        assert_eq!(format!("{}", error), "Authentication required");

        let error = ServerClientError::ServerError {
            status: 500,
            message: "Internal error".to_string(),
        };
        assert!(format!("{}", error).contains("500"));
        assert!(format!("{}", error).contains("Internal error"));

        let error = ServerClientError::HttpStatus {
            status: 503,
            body: "Service Unavailable".to_string(),
        };
        assert!(format!("{}", error).contains("503"));

        let error = ServerClientError::NotFound {
            entity: "Session".into(),
            id: "4".into(),
        };
        assert_eq!(format!("{}", error), "Session not found: 4");
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ServerClientError>();
    }
}
