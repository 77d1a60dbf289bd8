//! HTTP-level tests for the Twilio client against a local mock server.

use serde_json::json;
use twilio::{TwilioError, TwilioOptions, TwilioService};
use wiremock::matchers::{basic_auth, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn service(server: &MockServer) -> TwilioService {
    TwilioService::with_base_url(
        TwilioOptions {
            account_sid: "AC123".to_string(),
            auth_token: "secret".to_string(),
        },
        server.uri(),
    )
}

#[tokio::test]
async fn test_list_calls_sends_page_size_and_credentials() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/2010-04-01/Accounts/AC123/Calls.json"))
        .and(query_param("PageSize", "50"))
        .and(basic_auth("AC123", "secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "calls": [
                {
                    "sid": "CA1",
                    "from": "+15550001111",
                    "to": "+15550002222",
                    "status": "completed",
                    "duration": "31",
                    "start_time": "Mon, 02 Jun 2025 14:00:00 +0000",
                    "end_time": "Mon, 02 Jun 2025 14:00:31 +0000"
                },
                {
                    "sid": "CA2",
                    "from": "+15550001111",
                    "to": "+15550003333",
                    "status": "busy",
                    "duration": "0",
                    "start_time": null,
                    "end_time": null
                }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let calls = service(&server).list_calls(50).await.unwrap();

    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].sid, "CA1");
    assert_eq!(calls[1].status, "busy");
    assert!(calls[1].start_time.is_none());
}

#[tokio::test]
async fn test_list_recordings_filters_by_call_sid() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/2010-04-01/Accounts/AC123/Recordings.json"))
        .and(query_param("CallSid", "CA9"))
        .and(query_param("PageSize", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "recordings": [{
                "sid": "RE1",
                "call_sid": "CA9",
                "duration": "12",
                "uri": "/2010-04-01/Accounts/AC123/Recordings/RE1.json"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let recordings = service(&server)
        .list_recordings(Some("CA9"), 20)
        .await
        .unwrap();

    assert_eq!(recordings.len(), 1);
    assert_eq!(
        recordings[0].media_url(),
        "https://api.twilio.com/2010-04-01/Accounts/AC123/Recordings/RE1"
    );
}

#[tokio::test]
async fn test_fetch_missing_recording_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/2010-04-01/Accounts/AC123/Recordings/RE404.json"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "code": 20404,
            "message": "The requested resource was not found",
            "status": 404
        })))
        .mount(&server)
        .await;

    let result = service(&server).fetch_recording("RE404").await;

    assert!(matches!(result, Err(TwilioError::NotFound)));
}

#[tokio::test]
async fn test_fetch_recording_with_path_segments_stays_off_other_resources() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/2010-04-01/Accounts/AC123/Calls.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"calls": []})))
        .expect(0)
        .mount(&server)
        .await;

    let service = service(&server);
    for sid in ["../Calls", "..%2FCalls", "RE1?PageSize=1000", "RE1/../../Calls"] {
        let result = service.fetch_recording(sid).await;
        assert!(
            matches!(result, Err(TwilioError::NotFound)),
            "sid {:?} should be not found",
            sid
        );
    }
}

#[tokio::test]
async fn test_fetch_recording_requests_recordings_path() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/2010-04-01/Accounts/AC123/Recordings/RE77.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sid": "RE77",
            "call_sid": "CA7",
            "duration": "5",
            "uri": "/2010-04-01/Accounts/AC123/Recordings/RE77.json"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let recording = service(&server).fetch_recording("RE77").await.unwrap();

    assert_eq!(recording.call_sid.as_deref(), Some("CA7"));
}

#[tokio::test]
async fn test_api_error_message_is_passed_through() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/2010-04-01/Accounts/AC123/Messages.json"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "code": 20003,
            "message": "Authenticate",
            "status": 401
        })))
        .mount(&server)
        .await;

    let err = service(&server).list_messages(100).await.unwrap_err();

    match err {
        TwilioError::Api {
            status,
            code,
            message,
        } => {
            assert_eq!(status, 401);
            assert_eq!(code, Some(20003));
            assert_eq!(message, "Authenticate");
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/2010-04-01/Accounts/AC123/Calls.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = service(&server).list_calls(500).await.unwrap_err();

    assert!(matches!(err, TwilioError::Decode(_)));
}
