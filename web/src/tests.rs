/*
 * SPDX-FileCopyrightText: 2025 Capo Contributors
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use axum::http::StatusCode;
use axum::response::IntoResponse;
use capo_core::types::*;
use sea_orm::{DatabaseBackend, MockDatabase};
use std::sync::Arc;

use crate::auth::{TokenError, TokenKind};
use crate::error::WebError;

fn create_mock_cli() -> Cli {
    Cli {
        log_level: "info".to_string(),
        ip: "127.0.0.1".to_string(),
        port: 3000,
        serve_url: "http://127.0.0.1:8000".to_string(),
        database_url: Some("mock://test".to_string()),
        database_url_file: None,
        jwt_secret_file: "test_jwt".to_string(),
        access_token_ttl_minutes: 15,
        refresh_token_ttl_days: 7,
        disable_registration: false,
        report_errors: false,
    }
}

fn create_mock_state() -> Arc<ServerState> {
    let cli = create_mock_cli();
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

    Arc::new(ServerState { db, cli })
}

#[test]
fn test_server_state_configuration() {
    let state = create_mock_state();

    assert!(!state.cli.disable_registration);
    assert!(!state.cli.report_errors);
    assert_eq!(state.cli.ip, "127.0.0.1");
    assert_eq!(state.cli.port, 3000);
    assert_eq!(state.cli.access_token_ttl_minutes, 15);
    assert_eq!(state.cli.refresh_token_ttl_days, 7);
}

#[test]
fn test_token_kind_serialization() {
    assert_eq!(serde_json::to_string(&TokenKind::Access).unwrap(), "\"access\"");
    assert_eq!(serde_json::to_string(&TokenKind::Refresh).unwrap(), "\"refresh\"");

    let kind: TokenKind = serde_json::from_str("\"refresh\"").unwrap();
    assert_eq!(kind, TokenKind::Refresh);
}

#[test]
fn test_token_errors_have_distinct_messages() {
    // Callers must be able to tell the three failure modes apart
    let expired = TokenError::Expired.to_string();
    let invalid = TokenError::Invalid.to_string();
    let wrong_kind = TokenError::WrongKind.to_string();

    assert_ne!(expired, invalid);
    assert_ne!(expired, wrong_kind);
    assert_ne!(invalid, wrong_kind);
}

#[test]
fn test_token_error_maps_to_unauthorized() {
    for err in [TokenError::Expired, TokenError::Invalid, TokenError::WrongKind] {
        let web_err = WebError::from(err);
        let response = web_err.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}

#[test]
fn test_web_error_status_codes() {
    let cases = [
        (WebError::BadRequest("x".to_string()), StatusCode::BAD_REQUEST),
        (WebError::Unauthorized("x".to_string()), StatusCode::UNAUTHORIZED),
        (WebError::Forbidden("x".to_string()), StatusCode::FORBIDDEN),
        (WebError::NotFound("x".to_string()), StatusCode::NOT_FOUND),
        (WebError::Conflict("x".to_string()), StatusCode::CONFLICT),
    ];

    for (err, expected) in cases {
        assert_eq!(err.into_response().status(), expected);
    }
}

mod auth_tests {
    use crate::endpoints::auth::*;

    #[test]
    fn test_make_user_request_serialization() {
        let request = MakeUserRequest {
            email: "test@example.com".to_string(),
            password: "password123".to_string(),
        };

        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("test@example.com"));
        assert!(json.contains("password123"));
    }

    #[test]
    fn test_token_response_serialization() {
        let response = TokenResponse {
            access_token: "aaa".to_string(),
            refresh_token: "rrr".to_string(),
            token_type: "bearer".to_string(),
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("access_token"));
        assert!(json.contains("refresh_token"));
        assert!(json.contains("bearer"));
    }
}

mod collaborator_tests {
    use crate::endpoints::collaborators::*;
    use entity::project_collaborator::{CollaboratorRole, CollaboratorStatus};

    #[test]
    fn test_invite_request_deserialization() {
        let request: MakeInviteRequest =
            serde_json::from_str(r#"{"identifier": "b@x.com", "role": "editor"}"#).unwrap();

        assert_eq!(request.identifier, "b@x.com");
        assert_eq!(request.role, CollaboratorRole::Editor);
    }

    #[test]
    fn test_unknown_role_is_rejected_at_the_boundary() {
        let result: Result<MakeInviteRequest, _> =
            serde_json::from_str(r#"{"identifier": "b@x.com", "role": "superuser"}"#);

        assert!(result.is_err());
    }

    #[test]
    fn test_status_update_deserialization() {
        let request: UpdateStatusRequest =
            serde_json::from_str(r#"{"status": "accepted"}"#).unwrap();

        assert_eq!(request.status, CollaboratorStatus::Accepted);
    }
}

mod chord_tests {
    use crate::endpoints::chords::*;
    use entity::chord::ChordMarker;

    #[test]
    fn test_make_chord_request_defaults() {
        let request: MakeChordRequest = serde_json::from_str("{}").unwrap();

        assert_eq!(request.name, None);
        assert!(request.markers.0.is_empty());
        assert_eq!(request.string_count, 6);
        assert_eq!(request.tuning, "EADGBE");
        assert_eq!(request.starting_fret, 0);
    }

    #[test]
    fn test_make_chord_request_markers() {
        let request: MakeChordRequest = serde_json::from_str(
            r#"{"name": "Am", "markers": [{"string": 2, "fret": 1}, {"string": 3, "fret": 2}]}"#,
        )
        .unwrap();

        assert_eq!(request.name.as_deref(), Some("Am"));
        assert_eq!(
            request.markers.0,
            vec![
                ChordMarker { string: 2, fret: 1 },
                ChordMarker { string: 3, fret: 2 },
            ]
        );
    }

    #[test]
    fn test_reorder_request_deserialization() {
        let request: ReorderRequest = serde_json::from_str(
            r#"{"chord_ids": ["00000000-0000-0000-0000-000000000001"]}"#,
        )
        .unwrap();

        assert_eq!(request.chord_ids.len(), 1);
    }
}

mod sequence_tests {
    use crate::endpoints::sequence::*;

    #[test]
    fn test_make_sequence_request_defaults_to_common_time() {
        let request: MakeSequenceRequest = serde_json::from_str("{}").unwrap();

        assert_eq!(request.time_signature_numerator, 4);
        assert_eq!(request.time_signature_denominator, 4);
        assert_eq!(request.measures_per_line, 4);
    }

    #[test]
    fn test_update_sequence_request_nested_tree() {
        let request: UpdateSequenceRequest = serde_json::from_str(
            r#"{
                "time_signature_numerator": 3,
                "time_signature_denominator": 4,
                "measures_per_line": 2,
                "measures": [
                    {"position": 0, "beats": [{"beat_position": 0, "chord_id": null}]},
                    {"position": 1, "repeat_end": true, "ending_number": 1, "beats": []}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(request.measures.len(), 2);
        assert_eq!(request.measures[0].beats.len(), 1);
        assert!(!request.measures[0].repeat_end);
        assert!(request.measures[1].repeat_end);
        assert_eq!(request.measures[1].ending_number, Some(1));
    }
}
