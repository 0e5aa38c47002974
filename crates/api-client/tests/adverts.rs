//! Advert endpoints against a mocked backend

mod common;

use advertboard_api_client::endpoints::adverts::{CreateAdvertRequest, SearchParams, UpdateAdvertRequest};
use advertboard_api_client::{ApiError, CustomField, ErrorKind, Visibility};
use common::{access_only, client_for, client_with_tokens};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn list_sends_search_parameters_and_normalizes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/adverts"))
        .and(query_param("query", "bike"))
        .and(query_param("tags[]", "sport"))
        .and(query_param("location", "Berlin"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "adverts": [
                {"_id": "a1", "title": "Bike", "description": "Blue", "customFields": [{"name": "size", "value": "M"}]},
                {"id": "a2", "title": "Helmet", "description": "Red", "custom_fields": [{"name": "size", "value": "L"}]}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _) = client_for(&server);
    let params = SearchParams::new()
        .with_query("bike")
        .with_tag("sport")
        .with_location("Berlin");
    let adverts = client.adverts().list(&params).await.unwrap();

    assert_eq!(adverts.len(), 2);
    assert_eq!(adverts[0].id, "a1");
    assert_eq!(adverts[1].id, "a2");
    assert_eq!(adverts[1].legacy_id, "a2");
    assert_eq!(adverts[1].custom_fields, vec![CustomField::new("size", "L")]);
}

#[tokio::test]
async fn access_token_is_sent_as_bearer() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/adverts/user/me"))
        .and(header("authorization", "Bearer token-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"adverts": []})))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _) = client_with_tokens(&server, access_only("token-123"));
    let adverts = client.adverts().mine().await.unwrap();
    assert!(adverts.is_empty());
}

#[tokio::test]
async fn get_private_advert_without_key_requires_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/adverts/p1"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "message": "This advert is private",
            "requiresKey": true
        })))
        .mount(&server)
        .await;

    let (client, _) = client_for(&server);
    let err = client.adverts().get("p1", None).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::RequiresKey);
    assert_eq!(err.message(), "This advert is private");
}

#[tokio::test]
async fn get_private_advert_with_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/adverts/p1"))
        .and(query_param("key", "secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "advert": {"_id": "p1", "title": "Private", "description": "", "visibility": "private"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _) = client_for(&server);
    let advert = client.adverts().get("p1", Some("secret")).await.unwrap();
    assert_eq!(advert.visibility, Visibility::Private);
}

#[tokio::test]
async fn create_sends_camel_case_fields() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/adverts"))
        .and(body_json(json!({
            "title": "Bike",
            "description": "Blue",
            "customFields": [{"name": "size", "value": "M"}],
            "tags": ["sport"]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "advert": {"_id": "a1", "title": "Bike", "description": "Blue", "customFields": [{"name": "size", "value": "M"}], "tags": ["sport"]},
            "message": "Advert created"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _) = client_for(&server);
    let mut request = CreateAdvertRequest::new("Bike", "Blue");
    request.custom_fields = Some(vec![CustomField::new("size", "M")]);
    request.tags = Some(vec!["sport".to_string()]);

    let created = client.adverts().create(&request).await.unwrap();
    assert_eq!(created.advert.id, "a1");
    assert_eq!(created.message, "Advert created");
}

#[tokio::test]
async fn create_over_limit_is_marked() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/adverts"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "message": "Free accounts can have 5 adverts",
            "limitReached": true
        })))
        .mount(&server)
        .await;

    let (client, _) = client_for(&server);
    let err = client
        .adverts()
        .create(&CreateAdvertRequest::new("One more", "..."))
        .await
        .unwrap_err();

    assert!(err.limit_reached());
    assert_eq!(err.message(), "Free accounts can have 5 adverts");
}

#[tokio::test]
async fn update_sends_only_changed_fields() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/adverts/a1"))
        .and(body_json(json!({"title": "Renamed"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "advert": {"_id": "a1", "title": "Renamed", "description": "Blue"},
            "message": "Advert updated"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _) = client_for(&server);
    let request = UpdateAdvertRequest {
        title: Some("Renamed".to_string()),
        ..Default::default()
    };
    let updated = client.adverts().update("a1", &request).await.unwrap();
    assert_eq!(updated.advert.title, "Renamed");
}

#[tokio::test]
async fn delete_returns_message() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/adverts/a1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "Advert deleted"})))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _) = client_for(&server);
    let response = client.adverts().delete("a1").await.unwrap();
    assert_eq!(response.message, "Advert deleted");
}

#[tokio::test]
async fn upvote_own_listing_is_marked() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/adverts/mine1/upvote"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "message": "You cannot upvote your own advert",
            "cannotUpvoteOwn": true
        })))
        .mount(&server)
        .await;

    let (client, _) = client_with_tokens(&server, access_only("t"));
    let err = client.adverts().upvote("mine1").await.unwrap_err();

    assert!(err.cannot_upvote_own());
    assert!(matches!(err, ApiError::Api { status: 400, .. }));
}

#[tokio::test]
async fn upvote_other_listing_increments() {
    let server = MockServer::start().await;
    let prior = 4;
    Mock::given(method("GET"))
        .and(path("/api/adverts/other1/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "upvotes": prior, "views": 12, "upvoted": false
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/adverts/other1/upvote"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "upvotes": prior + 1, "upvoted": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _) = client_with_tokens(&server, access_only("t"));
    let before = client.adverts().stats("other1").await.unwrap();
    let vote = client.adverts().upvote("other1").await.unwrap();

    assert_eq!(vote.upvotes, before.upvotes + 1);
    assert!(vote.upvoted);
}

#[tokio::test]
async fn view_and_share_links() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/adverts/a1/view"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"views": 8})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/adverts/a1/share"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"url": "https://boards.example.com/a/a1"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/adverts/a1/share-private"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "url": "https://boards.example.com/a/a1?key=k9",
            "key": "k9",
            "message": "Private link generated"
        })))
        .mount(&server)
        .await;

    let (client, _) = client_for(&server);
    let adverts = client.adverts();

    assert_eq!(adverts.track_view("a1").await.unwrap().views, 8);
    assert!(adverts.share_link("a1").await.unwrap().url.ends_with("/a/a1"));
    let private = adverts.private_share_link("a1").await.unwrap();
    assert_eq!(private.key, "k9");
}

#[tokio::test]
async fn error_without_message_uses_status_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/adverts/a1/stats"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let (client, _) = client_for(&server);
    let err = client.adverts().stats("a1").await.unwrap_err();

    assert_eq!(err.message(), "Request failed with status code 500");
    assert_eq!(err.kind(), ErrorKind::Generic);
}

#[tokio::test]
async fn ids_cannot_escape_the_advert_route() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"user": {"_id": "u1"}})))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/adverts/..%2Fauth%2Fme"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Advert not found"})))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _) = client_for(&server);
    let err = client.adverts().get("../auth/me", None).await.unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.message(), "Advert not found");

    let err = client.adverts().delete("..").await.unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));
}
