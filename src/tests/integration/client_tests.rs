//! `RemoteCardStore` against a mocked card service.

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::core::card::CardData;
use crate::core::client::{ClientError, RemoteCardStore};
use crate::tests::common::fixtures::alexa_card;

#[tokio::test]
async fn test_save_posts_card_and_returns_id() {
    let mock_server = MockServer::start().await;
    let card = alexa_card();

    Mock::given(method("POST"))
        .and(path("/cards"))
        .and(header("content-type", "application/json"))
        .and(body_json(&card))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "a1b2c3d4e5f6" })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = RemoteCardStore::new(mock_server.uri()).unwrap();
    let id = client.save(&card).await.unwrap();
    assert_eq!(id, "a1b2c3d4e5f6");
}

#[tokio::test]
async fn test_base_url_trailing_slash_is_trimmed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/cards"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "abc" })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = RemoteCardStore::new(format!("{}/", mock_server.uri())).unwrap();
    assert_eq!(client.base_url(), mock_server.uri());
    assert_eq!(client.save(&CardData::sample()).await.unwrap(), "abc");
}

#[tokio::test]
async fn test_save_server_error_is_retriable() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/cards"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(json!({ "error": "Could not save card data due to a server issue." })),
        )
        .mount(&mock_server)
        .await;

    let client = RemoteCardStore::new(mock_server.uri()).unwrap();
    let err = client.save(&alexa_card()).await.unwrap_err();

    match &err {
        ClientError::Server { status, message } => {
            assert_eq!(*status, 500);
            assert_eq!(message, "Could not save card data due to a server issue.");
        }
        other => panic!("Expected Server error, got {other:?}"),
    }
    assert!(err.is_retriable());
}

#[tokio::test]
async fn test_save_rejected_is_not_retriable() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/cards"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({ "error": "Invalid card data format." })))
        .mount(&mock_server)
        .await;

    let client = RemoteCardStore::new(mock_server.uri()).unwrap();
    let err = client.save(&alexa_card()).await.unwrap_err();

    assert!(matches!(
        &err,
        ClientError::InvalidRequest { status: 400, message } if message == "Invalid card data format."
    ));
    assert!(!err.is_retriable());
    assert_eq!(err.user_message(), "The card data was rejected as invalid.");
}

#[tokio::test]
async fn test_save_plain_text_error_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/cards"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&mock_server)
        .await;

    let client = RemoteCardStore::new(mock_server.uri()).unwrap();
    match client.save(&alexa_card()).await.unwrap_err() {
        ClientError::Server { status, message } => {
            assert_eq!(status, 502);
            assert_eq!(message, "Bad Gateway");
        }
        other => panic!("Expected Server error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_save_missing_id_is_invalid_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/cards"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "key": "abc" })))
        .mount(&mock_server)
        .await;

    let client = RemoteCardStore::new(mock_server.uri()).unwrap();
    let err = client.save(&alexa_card()).await.unwrap_err();
    assert!(matches!(err, ClientError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_fetch_returns_sanitized_card() {
    let mock_server = MockServer::start().await;

    // Stored by an older build: no customColors on a custom theme.
    Mock::given(method("GET"))
        .and(path("/cards/a1b2c3d4e5f6"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "Jordan",
            "themeId": "custom",
            "socialLinks": [{ "id": "1", "type": "GitHub", "url": "https://github.com/jordan" }]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = RemoteCardStore::new(mock_server.uri()).unwrap();
    let card = client.fetch("a1b2c3d4e5f6").await.unwrap().unwrap();

    assert_eq!(card.name, "Jordan");
    assert_eq!(card.social_links.len(), 1);
    assert!(card.is_custom_theme());
    assert!(card.custom_colors.is_some());
    assert!(card.fun_facts.is_empty());
}

#[tokio::test]
async fn test_fetch_not_found_is_none() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cards/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "error": "Card not found" })))
        .mount(&mock_server)
        .await;

    let client = RemoteCardStore::new(mock_server.uri()).unwrap();
    assert!(client.fetch("missing").await.unwrap().is_none());
}

#[tokio::test]
async fn test_fetch_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cards/abc"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "error": "Could not retrieve card data" })))
        .mount(&mock_server)
        .await;

    let client = RemoteCardStore::new(mock_server.uri()).unwrap();
    let err = client.fetch("abc").await.unwrap_err();
    assert!(matches!(err, ClientError::Server { status: 500, .. }));
}

#[tokio::test]
async fn test_fetch_non_json_body_is_invalid_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cards/abc"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&mock_server)
        .await;

    let client = RemoteCardStore::new(mock_server.uri()).unwrap();
    let err = client.fetch("abc").await.unwrap_err();
    assert!(matches!(err, ClientError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_unreachable_service_is_network_error() {
    // Grab a free port, then release it so nothing is listening there.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = RemoteCardStore::new(format!("http://{addr}")).unwrap();
    let err = client.fetch("abc").await.unwrap_err();

    assert!(matches!(err, ClientError::Network(_)));
    assert!(err.is_retriable());
    assert!(err.user_message().starts_with("Network issue"));
}
