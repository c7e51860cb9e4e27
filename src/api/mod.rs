pub mod options;
pub mod session;
pub mod status;

use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Method, Url};
use serde_json::Value;

use crate::error::ApiError;
use crate::feed::payload::ProjectPayload;
use crate::settings::is_blank;

pub use options::{ClientOptions, RequestArgs, RequestArgsFilter};
pub use session::ApiSession;
pub use status::{ConnectionStatus, check_connection};

pub const API_VERSION: &str = "v1";

const CREATE_PROJECT_PATH: &str = "app-integrations/gravity-forms";
const STATUS_PATH: &str = "status";

/// Client for a single Kitchen workspace.
///
/// Holds credentials, transport options and one pooled HTTP client that is
/// reused across calls.
#[derive(Debug, Clone)]
pub struct KitchenClient {
    api_token: String,
    workspace: String,
    options: ClientOptions,
    http: Option<reqwest::Client>,
}

impl KitchenClient {
    pub fn new(api_token: impl Into<String>, workspace: impl Into<String>) -> Self {
        Self::with_options(api_token, workspace, ClientOptions::default())
    }

    pub fn with_options(
        api_token: impl Into<String>,
        workspace: impl Into<String>,
        options: ClientOptions,
    ) -> Self {
        // A builder failure is reported by the first request instead.
        let http = build_http(options.verify_tls).ok();
        Self {
            api_token: api_token.into(),
            workspace: workspace.into(),
            options,
            http,
        }
    }

    pub fn workspace(&self) -> &str {
        &self.workspace
    }

    /// Create a project in the workspace.
    pub async fn create_project(&self, payload: &ProjectPayload) -> Result<Value, ApiError> {
        let data = serde_json::to_value(payload)
            .map_err(|e| ApiError::Config(format!("Unable to encode project: {e}")))?;
        self.request(CREATE_PROJECT_PATH, Some(&data), Method::POST, None)
            .await
    }

    /// Connectivity and credential check. The body is not inspected.
    pub async fn get_status(&self) -> Result<Value, ApiError> {
        self.request(STATUS_PATH, None, Method::GET, None).await
    }

    /// Send a request to `{workspace}/api/v1/{path}`.
    ///
    /// GET requests carry `data` as query parameters; every other method
    /// sends it as a JSON body. With `return_key`, the matching member of the
    /// decoded body is returned when present.
    pub async fn request(
        &self,
        path: &str,
        data: Option<&Value>,
        method: Method,
        return_key: Option<&str>,
    ) -> Result<Value, ApiError> {
        if is_blank(Some(&self.api_token)) {
            return Err(ApiError::Config(
                "API token must be defined to process an API request.".to_string(),
            ));
        }
        if is_blank(Some(&self.workspace)) {
            return Err(ApiError::Config(
                "Workspace must be defined to process an API request.".to_string(),
            ));
        }

        let mut url = Url::parse(&format!("{}/api/{API_VERSION}/{path}", self.workspace))
            .map_err(|e| ApiError::Connectivity(format!("A valid URL was not provided: {e}")))?;

        if method == Method::GET {
            if let Some(data) = data.filter(|d| !is_empty_data(d)) {
                append_query(&mut url, data);
            }
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let bearer = HeaderValue::from_str(&format!("Bearer {}", self.api_token)).map_err(|_| {
            ApiError::Config("API token contains invalid characters.".to_string())
        })?;
        headers.insert(AUTHORIZATION, bearer);

        let body = if method == Method::GET {
            None
        } else {
            let encoded = serde_json::to_vec(data.unwrap_or(&Value::Null))
                .map_err(|e| ApiError::Config(format!("Unable to encode request body: {e}")))?;
            Some(encoded)
        };

        let args = self.options.apply_filter(
            RequestArgs {
                method,
                headers,
                body,
                timeout: self.options.timeout,
                verify_tls: self.options.verify_tls,
            },
            path,
        );

        tracing::debug!("Kitchen API {} {}", args.method, url.path());

        let http = match &self.http {
            Some(http) if args.verify_tls == self.options.verify_tls => http.clone(),
            _ => build_http(args.verify_tls)?,
        };

        let mut req = http
            .request(args.method, url)
            .headers(args.headers)
            .timeout(args.timeout);
        if let Some(body) = args.body {
            req = req.body(body);
        }

        let response = req.send().await?;
        let status = response.status();
        let raw = response.bytes().await?;
        let body: Value = serde_json::from_slice(&raw).unwrap_or(Value::Null);

        if !matches!(status.as_u16(), 200 | 204) {
            tracing::debug!("Kitchen API {path} returned {status}");

            if let Some(message) = body.get("message").filter(|m| !m.is_null()) {
                return Err(ApiError::Api {
                    message: value_to_string(message),
                    code: None,
                });
            }

            let reason = status
                .canonical_reason()
                .map(str::to_string)
                .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
            return Err(ApiError::Api {
                message: reason,
                code: Some(status.as_u16()),
            });
        }

        if let Some(key) = return_key.filter(|k| !k.is_empty()) {
            if let Some(value) = body.get(key).filter(|v| !v.is_null()) {
                return Ok(value.clone());
            }
        }

        Ok(body)
    }
}

fn build_http(verify_tls: bool) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .danger_accept_invalid_certs(!verify_tls)
        .build()
}

fn is_empty_data(data: &Value) -> bool {
    match data {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
        _ => false,
    }
}

fn append_query(url: &mut Url, data: &Value) {
    let Some(obj) = data.as_object() else {
        return;
    };
    let mut pairs = url.query_pairs_mut();
    for (key, value) in obj {
        pairs.append_pair(key, &value_to_string(value));
    }
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
