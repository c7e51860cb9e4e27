use std::net::IpAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::api::ClientOptions;
use crate::api::options::DEFAULT_TIMEOUT_SECS;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub log_level: String,
    pub admin_token: Option<String>,
    pub verify_tls: bool,
    pub http_timeout_secs: u64,
    pub forms_file: Option<PathBuf>,
    pub max_body_size: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let host: IpAddr = env_or("KITCHEN_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid KITCHEN_HOST: {e}"))?;

        let port: u16 = env_or("KITCHEN_PORT", "3000")
            .parse()
            .map_err(|e| format!("Invalid KITCHEN_PORT: {e}"))?;

        let log_level = env_or("KITCHEN_LOG_LEVEL", "info");

        let admin_token = std::env::var("KITCHEN_ADMIN_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty());

        let verify_tls = match env_or("KITCHEN_VERIFY_TLS", "false").to_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" | "" => false,
            other => return Err(format!("Invalid KITCHEN_VERIFY_TLS: {other}")),
        };

        let default_timeout = DEFAULT_TIMEOUT_SECS.to_string();
        let http_timeout_secs: u64 = env_or("KITCHEN_HTTP_TIMEOUT_SECS", &default_timeout)
            .parse()
            .map_err(|e| format!("Invalid KITCHEN_HTTP_TIMEOUT_SECS: {e}"))?;

        let forms_file = std::env::var("KITCHEN_FORMS_FILE")
            .ok()
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        let max_body_size: usize = env_or("KITCHEN_MAX_BODY_SIZE", "1048576")
            .parse()
            .map_err(|e| format!("Invalid KITCHEN_MAX_BODY_SIZE: {e}"))?;

        Ok(Config {
            host,
            port,
            log_level,
            admin_token,
            verify_tls,
            http_timeout_secs,
            forms_file,
            max_body_size,
        })
    }

    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            verify_tls: self.verify_tls,
            timeout: Duration::from_secs(self.http_timeout_secs),
            ..ClientOptions::default()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            log_level: "info".to_string(),
            admin_token: None,
            verify_tls: false,
            http_timeout_secs: DEFAULT_TIMEOUT_SECS,
            forms_file: None,
            max_body_size: 1_048_576,
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
