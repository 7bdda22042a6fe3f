use mockito::{Matcher, Server};
use myadmin_rs::{ClientError, ClientOptions, MyAdminApiClient, WireFormat};
use pretty_assertions::assert_eq;
use serde_json::json;

fn options(server: &Server) -> ClientOptions {
    ClientOptions::new("a username", "a password").with_uri(server.url())
}

#[tokio::test]
async fn test_json_round_trip_against_http_server() {
    let mut server = Server::new_async().await;

    let auth = server
        .mock("POST", "/")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({
            "id": -1,
            "method": "Authenticate",
            "params": {"username": "a username", "password": "a password"}
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"result":{"userId":"a userId","sessionId":"a session Id"}}"#)
        .create_async()
        .await;

    let countries = server
        .mock("POST", "/")
        .match_body(Matcher::PartialJson(json!({
            "method": "GetCountries",
            "params": {"apiKey": "a userId", "sessionId": "a session Id"}
        })))
        .with_status(200)
        .with_body(r#"{"result":["Canada","Philippines","United States"]}"#)
        .expect(2)
        .create_async()
        .await;

    let mut client = MyAdminApiClient::new(options(&server)).unwrap();
    client.authenticate().await.unwrap();

    let first = client.call("GetCountries", None).await.unwrap();
    let second = client.call("GetCountries", None).await.unwrap();

    assert_eq!(first, json!(["Canada", "Philippines", "United States"]));
    assert_eq!(first, second);
    auth.assert_async().await;
    countries.assert_async().await;
}

#[tokio::test]
async fn test_form_wire_format_sends_single_field() {
    let mut server = Server::new_async().await;
    let envelope = r#"{"id":-1,"method":"Authenticate","params":{"password":"a password","username":"a username"}}"#;

    let auth = server
        .mock("POST", "/")
        .match_header("content-type", "application/x-www-form-urlencoded")
        .match_body(Matcher::UrlEncoded("JSON-RPC".to_string(), envelope.to_string()))
        .with_status(200)
        .with_body(r#"{"result":{"userId":"K1","sessionId":"S1"}}"#)
        .create_async()
        .await;

    let mut client =
        MyAdminApiClient::new(options(&server).with_wire_format(WireFormat::Form)).unwrap();
    client.authenticate().await.unwrap();

    assert_eq!(client.credentials().api_key.as_deref(), Some("K1"));
    auth.assert_async().await;
}

#[tokio::test]
async fn test_server_error_with_application_error_body() {
    let mut server = Server::new_async().await;

    let _mock = server
        .mock("POST", "/")
        .with_status(500)
        .with_body(
            json!({"result": {"error": {
                "message": "An error has occurred and this string contains info.",
                "name": "MissingMethodException"
            }}})
            .to_string(),
        )
        .create_async()
        .await;

    let client = MyAdminApiClient::new(options(&server)).unwrap();
    let err = client.post("", json!({})).await.unwrap_err();

    let record = err.record().unwrap();
    assert_eq!(record.name, "MissingMethodException");
    assert_eq!(record.code, None);
}

#[tokio::test]
async fn test_server_error_without_body_is_transport_error() {
    let mut server = Server::new_async().await;

    let _mock = server
        .mock("POST", "/")
        .with_status(503)
        .create_async()
        .await;

    let client = MyAdminApiClient::new(options(&server)).unwrap();
    let err = client.post("GetCountries", json!({})).await.unwrap_err();

    match err {
        ClientError::Transport(record) => {
            assert_eq!(record.code, Some(503));
            assert_eq!(record.message, "Service Unavailable");
        }
        other => panic!("expected transport error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unreachable_server_is_transport_error() {
    let mut client =
        MyAdminApiClient::new(ClientOptions::new("u", "p").with_uri("http://127.0.0.1:1")).unwrap();
    let err = client.authenticate().await.unwrap_err();

    assert!(matches!(err, ClientError::Transport(_)));
    assert!(client.credentials().session_id.is_none());
}
