//! Grant client tests against a mock authorization server.
#![cfg(feature = "remote")]

use std::time::Duration;

use gnap_codec::gnap::{
    AccessTokenRequest, Client, GrantRequest, GrantResponse, InteractionFinish, InteractionRequest,
    ResourceAccess, UserCode,
};
use gnap_codec::{ClientError, ClientOptions, FinishMode, GrantClient, OpenRecord, StartMode};
use mockito::{Matcher, Server};

const RESPONSE: &str = r#"{
    "interact": {"redirect": "https://server.example.com/interact/4CF492MLVMSW9MKMXKHQ"},
    "continue": {
        "access_token": {"value": "80UPRY5NM33OMUKMKSKU", "access": [{"type": "continue"}]},
        "uri": "https://server.example.com/continue",
        "wait": 30
    }
}"#;

fn grant_client(server: &Server) -> GrantClient {
    let options = ClientOptions::new().timeout(Duration::from_secs(5));
    GrantClient::new(format!("{}/gnap", server.url()), options).unwrap()
}

#[test]
fn grant_request_round_trip() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/gnap")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Exact(
            r#"{"client":"7C7C4AZ9KHRS6X63AJAO","interact":{"finish":[{"method":"redirect","nonce":"1234567890","uri":"https://localhost:8080/finish"}],"start":["redirect"]}}"#
                .to_string(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(RESPONSE)
        .create();

    let mut interact = InteractionRequest::new(StartMode::Redirect);
    interact.add_finish([InteractionFinish::new(
        FinishMode::Redirect,
        "1234567890",
        "https://localhost:8080/finish",
    )]);

    let client = grant_client(&server);
    let response = client
        .grant_request()
        .client(Client::default().set_instance_id("7C7C4AZ9KHRS6X63AJAO").clone())
        .interact(interact)
        .send()
        .unwrap();

    mock.assert();
    let continuation = response.continuation().unwrap();
    assert_eq!(continuation.wait(), 30);
    assert_eq!(
        continuation.access_token().map(|t| t.value()),
        Some("80UPRY5NM33OMUKMKSKU")
    );
    assert_eq!(
        response.interact().map(|i| i.redirect()),
        Some("https://server.example.com/interact/4CF492MLVMSW9MKMXKHQ")
    );
}

#[test]
fn send_any_record_pair() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/gnap")
        .with_status(200)
        .with_body(r#"{"code":"A1BC-3DFF","ext":true}"#)
        .create();

    let client = grant_client(&server);
    let request = AccessTokenRequest::new(ResourceAccess::new("photo-api"));
    let code: UserCode = client.send(&request).unwrap();

    mock.assert();
    assert_eq!(code.code(), "A1BC-3DFF");
    assert_eq!(code.extension("ext"), Some(&serde_json::json!(true)));
}

#[test]
fn error_status_is_http_error() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/gnap")
        .with_status(400)
        .with_body(r#"{"error":"invalid_request"}"#)
        .create();

    let client = grant_client(&server);
    let err = client
        .grant_request()
        .access_token(AccessTokenRequest::new(ResourceAccess::new("a")))
        .send()
        .unwrap_err();

    mock.assert();
    assert!(matches!(err, ClientError::Http { .. }));
    assert_eq!(err.exit_code(), 3);
}

#[test]
fn undecodable_response() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/gnap")
        .with_status(200)
        .with_body(r#"{"continue":"later"}"#)
        .create();

    let client = grant_client(&server);
    let err = client.send::<_, GrantResponse>(&GrantRequest::default()).unwrap_err();

    mock.assert();
    let ClientError::Response { source, .. } = &err else {
        panic!("expected response error, got {:?}", err);
    };
    assert_eq!(source.path(), Some("/continue"));
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn invalid_request_never_reaches_server() {
    let mut server = Server::new();
    let mock = server.mock("POST", "/gnap").expect(0).create();

    let client = grant_client(&server);
    let err = client
        .send::<_, GrantResponse>(&UserCode::default())
        .unwrap_err();

    mock.assert();
    assert!(matches!(err, ClientError::Invalid(_)));
}
