//! End-to-end submission flow against a mocked backend.

use marketdesk_api::StoreApiClient;
use marketdesk_submission::{
    ImageCollection, NoticeLevel, Notifier, SchemaResolver, SessionError, SessionState,
    SubmissionSession, UploadedImage,
};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> StoreApiClient {
    StoreApiClient::new(base_url, 5, "marketdesk-test/0.1").expect("failed to build test client")
}

async fn mount_laptop_category(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/categories/5/fields"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "required": ["processor", "ramGb", "images"],
            "optional": ["graphics"]
        })))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/categories/5/items"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 21, "name": "XPS 13"},
            {"id": 22, "name": "XPS 15"}
        ])))
        .mount(server)
        .await;
}

fn fill_laptop(session: &mut SubmissionSession) {
    session.set_field("name", "XPS 13");
    session.set_field("description", "2023, barely used");
    session.set_field("price", "1099.50");
    session.set_field("categoryItemId", "21");
    session.set_field("processor", "i7-1360P");
    session.set_field("ramGb", "16");
    session.add_url_slot();
    session.set_url(0, " https://cdn.example.com/xps-front.jpg ");
    session.add_files([UploadedImage::new("lid.png", vec![1, 2, 3])]);
}

#[tokio::test]
async fn laptop_submission_round_trip() {
    let server = MockServer::start().await;
    mount_laptop_category(&server).await;
    Mock::given(method("POST"))
        .and(path("/products/submit"))
        .and(body_partial_json(json!({
            "name": "XPS 13",
            "price": 1099.5,
            "categoryId": 5,
            "categoryItemId": 21,
            "processor": "i7-1360P",
            "ramGb": "16",
            "graphics": "",
            "storageGb": "512",
            "os": "",
            "display": null
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"message": "Listed"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let notifier = Notifier::default();
    let mut notices = notifier.subscribe();
    let resolver = SchemaResolver::new(&client, notifier.clone());
    let mut session = SubmissionSession::new(notifier);

    assert!(session.choose_category(&resolver, 5).await);
    assert_eq!(session.schema().fields(), ["processor", "ramGb", "images", "graphics"]);
    fill_laptop(&mut session);

    let upload_position = session.images().absolute_index(ImageCollection::Uploads, 0);
    assert_eq!(upload_position, 0);

    let response = session.submit(&client).await.expect("submission should succeed");

    assert_eq!(response.message.as_deref(), Some("Listed"));
    assert_eq!(session.state(), SessionState::Success);
    let notice = notices.try_recv().expect("success notice");
    assert_eq!(notice.level, NoticeLevel::Success);

    let requests = server.received_requests().await.expect("request recording enabled");
    let submit = requests
        .iter()
        .find(|r| r.url.path() == "/products/submit")
        .expect("submit request");
    let body: serde_json::Value = serde_json::from_slice(&submit.body).expect("json body");
    let images = body["images"].as_array().expect("images array");
    assert_eq!(images.len(), 2);
    assert!(images[0]["imageUrl"]
        .as_str()
        .is_some_and(|u| u.starts_with("data:image/png;base64,")));
    assert_eq!(images[0]["viewType"], "FRONT");
    assert_eq!(images[1]["imageUrl"], "https://cdn.example.com/xps-front.jpg");
    assert_eq!(images[1]["viewType"], "FRONT");
}

#[tokio::test]
async fn rejected_submission_keeps_everything_for_retry() {
    let server = MockServer::start().await;
    mount_laptop_category(&server).await;
    Mock::given(method("POST"))
        .and(path("/products/submit"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"error": "Price too high for model"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let notifier = Notifier::default();
    let resolver = SchemaResolver::new(&client, notifier.clone());
    let mut notices = notifier.subscribe();
    let mut session = SubmissionSession::new(notifier);

    session.choose_category(&resolver, 5).await;
    fill_laptop(&mut session);

    let err = session.submit(&client).await.expect_err("backend rejects");

    assert!(matches!(err, SessionError::Transport(_)));
    assert_eq!(session.state(), SessionState::Failed);
    assert_eq!(session.form().value("processor"), Some("i7-1360P"));
    assert_eq!(session.images().len(), 2);
    let notice = notices.try_recv().expect("error notice");
    assert_eq!(notice.level, NoticeLevel::Error);
    assert_eq!(notice.message, "Price too high for model");
}

#[tokio::test]
async fn schema_failure_still_allows_static_validation() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/categories/6/fields"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/categories/6/items"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let notifier = Notifier::default();
    let resolver = SchemaResolver::new(&client, notifier.clone());
    let mut notices = notifier.subscribe();
    let mut session = SubmissionSession::new(notifier);

    session.choose_category(&resolver, 6).await;
    assert!(session.schema().is_empty());
    assert_eq!(notices.try_recv().expect("warning").level, NoticeLevel::Warning);

    let err = session.submit(&client).await.expect_err("form is empty");
    let SessionError::Validation(errors) = err else {
        panic!("expected validation errors");
    };
    let fields: Vec<&str> = errors.fields().collect();
    assert_eq!(fields, ["description", "images", "name", "price"]);
}
