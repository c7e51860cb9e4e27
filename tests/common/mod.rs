#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;

use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use kitchen_feed::config::Config;
use kitchen_feed::feed::model::{BaseFieldMap, FeedConfig, FieldInput, FormDefinition, FormField};
use kitchen_feed::forms::FormRegistry;
use kitchen_feed::settings::StaticSettings;
use kitchen_feed::state::SharedState;

pub const API_TOKEN: &str = "test-api-token";
pub const ADMIN_TOKEN: &str = "test-admin-token";

/// A running host instance wired to a mock Kitchen workspace.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub state: SharedState,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Submit JSON field values to a form, return (body, status).
    pub async fn submit_json(&self, form_id: u32, data: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url(&format!("/v1/forms/{form_id}/submissions")))
            .json(data)
            .send()
            .await
            .expect("submit json failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Submit form-urlencoded data to a form, return (body, status).
    pub async fn submit_form(
        &self,
        form_id: u32,
        data: &[(&str, &str)],
        referer: Option<&str>,
    ) -> (Value, StatusCode) {
        let mut req = self
            .client
            .post(self.url(&format!("/v1/forms/{form_id}/submissions")))
            .form(data);
        if let Some(referer) = referer {
            req = req.header("referer", referer);
        }
        let resp = req.send().await.expect("submit form failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Make an authenticated GET request.
    pub async fn get_auth(&self, path: &str, token: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .get(self.url(path))
            .bearer_auth(token)
            .send()
            .await
            .expect("get request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Make an authenticated PUT request with JSON body.
    pub async fn put_auth(&self, path: &str, token: &str, body: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .put(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .expect("put request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }
}

/// Contact form: name, email, comments.
pub fn contact_form() -> FormDefinition {
    FormDefinition {
        id: 1,
        title: "Contact Us".to_string(),
        fields: vec![
            field(1, "Name", "name"),
            field(2, "Email", "email"),
            field(3, "Comments", "textarea"),
        ],
    }
}

/// Quote form with a composite name field and two extra fields.
pub fn quote_form() -> FormDefinition {
    let mut name = field(1, "Your Name", "name");
    name.inputs = vec![
        FieldInput { id: "1.3".to_string(), label: "First".to_string() },
        FieldInput { id: "1.6".to_string(), label: "Last".to_string() },
    ];
    FormDefinition {
        id: 2,
        title: "Request a Quote".to_string(),
        fields: vec![
            field(4, "Budget", "select"),
            name,
            field(2, "Email", "email"),
            field(5, "Details", "textarea"),
        ],
    }
}

pub fn field(id: u32, label: &str, kind: &str) -> FormField {
    FormField {
        id,
        label: label.to_string(),
        kind: kind.to_string(),
        inputs: vec![],
    }
}

pub fn feed(form_id: u32, name: &str, email: &str) -> FeedConfig {
    FeedConfig {
        id: 10 + form_id,
        form_id,
        enabled: true,
        base_fields: BaseFieldMap {
            name: name.to_string(),
            email: email.to_string(),
        },
    }
}

pub async fn mock_status(server: &MockServer, status: u16) {
    Mock::given(method("GET"))
        .and(path("/api/v1/status"))
        .respond_with(ResponseTemplate::new(status).set_body_json(json!({ "status": "ok" })))
        .mount(server)
        .await;
}

pub fn test_config(admin_token: Option<&str>) -> Config {
    Config {
        host: "127.0.0.1".parse().unwrap(),
        port: 0, // unused, we bind to random port
        log_level: "warn".to_string(),
        admin_token: admin_token.map(str::to_string),
        http_timeout_secs: 5,
        ..Config::default()
    }
}

/// Spawn a test app pointed at `workspace` with the contact form registered
/// and its feed enabled.
pub async fn spawn_app(workspace: &str) -> TestApp {
    let forms = FormRegistry::new();
    forms.upsert_form(contact_form());
    forms.set_feed(feed(1, "1", "2"));

    spawn_with(
        test_config(Some(ADMIN_TOKEN)),
        StaticSettings::new(workspace, API_TOKEN),
        forms,
    )
    .await
}

pub async fn spawn_with(config: Config, settings: StaticSettings, forms: FormRegistry) -> TestApp {
    let (app, state) = kitchen_feed::build_app(config, Arc::new(settings), forms);

    // Bind to random port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    // Spawn server in background
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    let client = Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();

    TestApp {
        addr,
        client,
        state,
    }
}
