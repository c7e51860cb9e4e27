mod common;

use reqwest::StatusCode;
use serde_json::json;
use wiremock::matchers::{any, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use kitchen_feed::forms::FormRegistry;
use kitchen_feed::settings::StaticSettings;

use common::{ADMIN_TOKEN, API_TOKEN, mock_status};

const CREATE_PATH: &str = "/api/v1/app-integrations/gravity-forms";

// ── Health ──────────────────────────────────────────────────────

#[tokio::test]
async fn health_returns_ok() {
    let server = MockServer::start().await;
    let app = common::spawn_app(&server.uri()).await;

    let resp = app.client.get(app.url("/health")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.text().await.unwrap(), "ok");
}

// ── Submissions ─────────────────────────────────────────────────

#[tokio::test]
async fn submit_json_creates_project() {
    let server = MockServer::start().await;
    mock_status(&server, 200).await;
    Mock::given(method("POST"))
        .and(path(CREATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 1 })))
        .expect(1)
        .mount(&server)
        .await;

    let app = common::spawn_app(&server.uri()).await;
    let (body, status) = app
        .submit_json(
            1,
            &json!({
                "1": "Jane Doe",
                "2": "jane@example.com",
                "3": "Hello",
                "source_url": "https://example.com/contact",
            }),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "received");
    assert!(body["entry_id"].is_u64());
    assert!(app.state.feed_log.is_empty());

    let requests = server.received_requests().await.unwrap();
    let create = requests
        .iter()
        .find(|r| r.url.path() == CREATE_PATH)
        .unwrap();
    let sent: serde_json::Value = serde_json::from_slice(&create.body).unwrap();
    assert_eq!(sent["referer"], "https://example.com/contact");
    assert_eq!(sent["fields"][2]["value"], "Hello");
}

#[tokio::test]
async fn submit_form_uses_referer_header() {
    let server = MockServer::start().await;
    mock_status(&server, 200).await;
    Mock::given(method("POST"))
        .and(path(CREATE_PATH))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let app = common::spawn_app(&server.uri()).await;
    let (_, status) = app
        .submit_form(
            1,
            &[("1", "Jane Doe"), ("2", "jane@example.com")],
            Some("https://example.com/landing"),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let requests = server.received_requests().await.unwrap();
    let create = requests
        .iter()
        .find(|r| r.url.path() == CREATE_PATH)
        .unwrap();
    let sent: serde_json::Value = serde_json::from_slice(&create.body).unwrap();
    assert_eq!(sent["referer"], "https://example.com/landing");
}

#[tokio::test]
async fn feed_failure_is_invisible_to_submitter() {
    let server = MockServer::start().await;
    mock_status(&server, 200).await;
    Mock::given(method("POST"))
        .and(path(CREATE_PATH))
        .respond_with(
            ResponseTemplate::new(422).set_body_json(json!({ "message": "Invalid token" })),
        )
        .mount(&server)
        .await;

    let app = common::spawn_app(&server.uri()).await;
    let (_, status) = app
        .submit_json(1, &json!({ "1": "Jane Doe", "2": "jane@example.com" }))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (errors, status) = app.get_auth("/api/v1/forms/1/feed-errors", ADMIN_TOKEN).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(errors.as_array().unwrap().len(), 1);
    assert_eq!(errors[0]["message"], "Unable to create project: Invalid token");
    assert_eq!(errors[0]["form_id"], 1);
}

#[tokio::test]
async fn invalid_submission_is_logged_not_rejected() {
    let server = MockServer::start().await;
    mock_status(&server, 200).await;

    let app = common::spawn_app(&server.uri()).await;
    let (_, status) = app
        .submit_json(1, &json!({ "1": "Jane Doe", "2": "not-an-email" }))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (errors, _) = app.get_auth("/api/v1/forms/1/feed-errors", ADMIN_TOKEN).await;
    assert_eq!(errors[0]["message"], "A valid Email address must be provided.");
}

#[tokio::test]
async fn submit_to_unknown_form() {
    let server = MockServer::start().await;
    let app = common::spawn_app(&server.uri()).await;

    let (_, status) = app.submit_json(99, &json!({ "1": "x" })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn submit_malformed_body() {
    let server = MockServer::start().await;
    let app = common::spawn_app(&server.uri()).await;

    let resp = app
        .client
        .post(app.url("/v1/forms/1/submissions"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn form_without_feed_makes_no_calls() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let forms = FormRegistry::new();
    forms.upsert_form(common::contact_form());
    let app = common::spawn_with(
        common::test_config(None),
        StaticSettings::new(server.uri(), API_TOKEN),
        forms,
    )
    .await;

    let (_, status) = app
        .submit_json(1, &json!({ "1": "Jane Doe", "2": "jane@example.com" }))
        .await;
    assert_eq!(status, StatusCode::CREATED);
}

// ── Admin ───────────────────────────────────────────────────────

#[tokio::test]
async fn admin_routes_require_token() {
    let server = MockServer::start().await;
    let app = common::spawn_app(&server.uri()).await;

    let resp = app
        .client
        .get(app.url("/api/v1/forms/1/feed-errors"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let (_, status) = app.get_auth("/api/v1/connection", "wrong-token").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn admin_routes_disabled_without_admin_token() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let forms = FormRegistry::new();
    forms.upsert_form(common::contact_form());
    let app = common::spawn_with(
        common::test_config(None),
        StaticSettings::new(server.uri(), API_TOKEN),
        forms,
    )
    .await;

    let resp = app
        .client
        .get(app.url("/api/v1/forms/1/feed-errors"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let (_, status) = app.get_auth("/api/v1/connection", "anything").await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let form = serde_json::to_value(common::quote_form()).unwrap();
    let (_, status) = app.put_auth("/api/v1/forms/2", "anything", &form).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(app.state.forms.get(2).is_none());
}

#[tokio::test]
async fn connection_check() {
    let server = MockServer::start().await;
    mock_status(&server, 200).await;
    let app = common::spawn_app(&server.uri()).await;

    let (body, status) = app.get_auth("/api/v1/connection", ADMIN_TOKEN).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["connected"], true);
    assert_eq!(body["message"], "Successfully connected to Kitchen.co");
    assert_eq!(body["settings"]["workspace"], true);
    assert_eq!(body["settings"]["api_token"], true);
}

#[tokio::test]
async fn connection_check_without_credentials() {
    let app = common::spawn_with(
        common::test_config(Some(ADMIN_TOKEN)),
        StaticSettings::default(),
        FormRegistry::new(),
    )
    .await;

    let (body, status) = app.get_auth("/api/v1/connection", ADMIN_TOKEN).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["connected"], false);
    assert_eq!(body["message"], "Unable to connect to Kitchen.co: Unable to initialize");
    assert_eq!(body["settings"]["workspace"], false);
}

#[tokio::test]
async fn register_form_and_feed() {
    let server = MockServer::start().await;
    mock_status(&server, 200).await;
    let app = common::spawn_app(&server.uri()).await;

    let form = serde_json::to_value(common::quote_form()).unwrap();
    let (body, status) = app.put_auth("/api/v1/forms/2", ADMIN_TOKEN, &form).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["form"]["title"], "Request a Quote");
    assert!(body["feed"].is_null());

    let feed = json!({ "id": 5, "form_id": 0, "base_fields": { "name": "1", "email": "2" } });
    let (body, status) = app.put_auth("/api/v1/forms/2/feed", ADMIN_TOKEN, &feed).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["form_id"], 2);
    assert_eq!(body["enabled"], true);

    let record = app.state.forms.get(2).unwrap();
    assert_eq!(record.feed.unwrap().id, 5);
}

#[tokio::test]
async fn feed_with_bad_field_map_rejected() {
    let server = MockServer::start().await;
    let app = common::spawn_app(&server.uri()).await;

    let feed = json!({ "id": 5, "form_id": 1, "base_fields": { "name": "3", "email": "9" } });
    let (body, status) = app.put_auth("/api/v1/forms/1/feed", ADMIN_TOKEN, &feed).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error = body["error"].as_str().unwrap();
    assert!(error.contains("Name must be mapped"));
    assert!(error.contains("Email Address is mapped to unknown field 9"));
}

#[tokio::test]
async fn feed_rejected_when_api_unavailable() {
    let server = MockServer::start().await;
    mock_status(&server, 401).await;
    let app = common::spawn_app(&server.uri()).await;

    let feed = json!({ "id": 5, "form_id": 1, "base_fields": { "name": "1", "email": "2" } });
    let (body, status) = app.put_auth("/api/v1/forms/1/feed", ADMIN_TOKEN, &feed).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(
        body["error"],
        "Unable to create feed because API could not be initialized."
    );
}

#[tokio::test]
async fn feed_errors_for_unknown_form() {
    let server = MockServer::start().await;
    let app = common::spawn_app(&server.uri()).await;

    let (_, status) = app.get_auth("/api/v1/forms/42/feed-errors", ADMIN_TOKEN).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
