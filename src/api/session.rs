use std::sync::Arc;

use super::{ClientOptions, KitchenClient};
use crate::settings::{SettingsProvider, is_blank, untrailingslashit};

/// Lazily initialized API client for one processing pass.
///
/// Once a status probe has succeeded the client is kept and reused for the
/// rest of the pass. A failed probe leaves the slot empty so the next call
/// probes again.
pub struct ApiSession {
    settings: Arc<dyn SettingsProvider>,
    options: ClientOptions,
    client: Option<KitchenClient>,
}

impl ApiSession {
    pub fn new(settings: Arc<dyn SettingsProvider>, options: ClientOptions) -> Self {
        Self {
            settings,
            options,
            client: None,
        }
    }

    /// Resolve the token and workspace, overrides first, then settings.
    /// Returns `None` when either is blank.
    pub fn resolve_credentials(
        &self,
        token_override: Option<&str>,
        workspace_override: Option<&str>,
    ) -> Option<(String, String)> {
        let token = match token_override {
            Some(token) if !is_blank(Some(token)) => Some(token.to_string()),
            _ => self.settings.api_token(),
        };
        let workspace = match workspace_override {
            Some(workspace) if !is_blank(Some(workspace)) => Some(workspace.to_string()),
            _ => self.settings.workspace(),
        }
        .map(|w| untrailingslashit(&w).to_string());

        if is_blank(token.as_deref()) || is_blank(workspace.as_deref()) {
            return None;
        }

        token.zip(workspace)
    }

    /// Make sure a working client is available. Blank credentials fail
    /// without touching the network.
    pub async fn ensure_client(
        &mut self,
        token_override: Option<&str>,
        workspace_override: Option<&str>,
    ) -> bool {
        if self.client.is_some() {
            return true;
        }

        let Some((token, workspace)) = self.resolve_credentials(token_override, workspace_override)
        else {
            tracing::debug!("Kitchen API credentials are not configured");
            return false;
        };

        let client = KitchenClient::with_options(token, workspace, self.options.clone());

        match client.get_status().await {
            Ok(_) => {
                tracing::debug!("Kitchen API initialized for {}", client.workspace());
                self.client = Some(client);
                true
            }
            Err(e) => {
                tracing::warn!("Kitchen API status check failed: {e}");
                false
            }
        }
    }

    pub fn client(&self) -> Option<&KitchenClient> {
        self.client.as_ref()
    }
}
