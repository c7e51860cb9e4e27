use std::sync::Arc;
use std::time::Duration;

use reqwest::header::HeaderMap;
use reqwest::Method;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Arguments of a single outgoing request, after the client has filled in
/// method, headers and body.
#[derive(Debug, Clone)]
pub struct RequestArgs {
    pub method: Method,
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
    pub timeout: Duration,
    pub verify_tls: bool,
}

/// Hook for rewriting request arguments right before they are sent.
pub trait RequestArgsFilter: Send + Sync {
    fn filter(&self, args: RequestArgs, path: &str) -> RequestArgs;
}

/// Transport settings shared by every client built from them.
#[derive(Clone)]
pub struct ClientOptions {
    /// Certificate verification is off unless explicitly enabled.
    pub verify_tls: bool,
    pub timeout: Duration,
    pub args_filter: Option<Arc<dyn RequestArgsFilter>>,
}

impl ClientOptions {
    pub fn with_args_filter(mut self, filter: Arc<dyn RequestArgsFilter>) -> Self {
        self.args_filter = Some(filter);
        self
    }

    pub(crate) fn apply_filter(&self, args: RequestArgs, path: &str) -> RequestArgs {
        match &self.args_filter {
            Some(filter) => filter.filter(args, path),
            None => args,
        }
    }
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            verify_tls: false,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            args_filter: None,
        }
    }
}

impl std::fmt::Debug for ClientOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientOptions")
            .field("verify_tls", &self.verify_tls)
            .field("timeout", &self.timeout)
            .field("args_filter", &self.args_filter.is_some())
            .finish()
    }
}
