use std::sync::Arc;

use serde::Serialize;

use super::{ApiSession, ClientOptions, KitchenClient};
use crate::settings::SettingsProvider;

/// Outcome of the live connectivity check shown next to the settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionStatus {
    Connected,
    Failed(String),
}

impl ConnectionStatus {
    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionStatus::Connected)
    }

    pub fn message(&self) -> String {
        match self {
            ConnectionStatus::Connected => "Successfully connected to Kitchen.co".to_string(),
            ConnectionStatus::Failed(reason) => {
                format!("Unable to connect to Kitchen.co: {reason}")
            }
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ConnectionReport {
    pub connected: bool,
    pub message: String,
}

impl From<ConnectionStatus> for ConnectionReport {
    fn from(status: ConnectionStatus) -> Self {
        ConnectionReport {
            connected: status.is_connected(),
            message: status.message(),
        }
    }
}

/// Probe the configured workspace once and report the result.
pub async fn check_connection(
    settings: Arc<dyn SettingsProvider>,
    options: ClientOptions,
) -> ConnectionStatus {
    let session = ApiSession::new(settings, options.clone());
    let Some((token, workspace)) = session.resolve_credentials(None, None) else {
        return ConnectionStatus::Failed("Unable to initialize".to_string());
    };

    match KitchenClient::with_options(token, workspace, options)
        .get_status()
        .await
    {
        Ok(_) => ConnectionStatus::Connected,
        Err(e) => ConnectionStatus::Failed(e.to_string()),
    }
}
