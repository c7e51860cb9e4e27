/// Source of the add-on's account settings.
///
/// Implementations are queried every time a fresh client is needed; values
/// are never cached by the caller.
pub trait SettingsProvider: Send + Sync {
    /// Workspace base URL, e.g. `https://acme.kitchen.co`.
    fn workspace(&self) -> Option<String>;
    fn api_token(&self) -> Option<String>;
}

/// Reads `KITCHEN_WORKSPACE` and `KITCHEN_API_TOKEN` from the environment.
#[derive(Debug, Clone, Default)]
pub struct EnvSettings;

impl SettingsProvider for EnvSettings {
    fn workspace(&self) -> Option<String> {
        std::env::var("KITCHEN_WORKSPACE").ok()
    }

    fn api_token(&self) -> Option<String> {
        std::env::var("KITCHEN_API_TOKEN").ok()
    }
}

/// Fixed credentials.
#[derive(Debug, Clone, Default)]
pub struct StaticSettings {
    pub workspace: Option<String>,
    pub api_token: Option<String>,
}

impl StaticSettings {
    pub fn new(workspace: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self {
            workspace: Some(workspace.into()),
            api_token: Some(api_token.into()),
        }
    }
}

impl SettingsProvider for StaticSettings {
    fn workspace(&self) -> Option<String> {
        self.workspace.clone()
    }

    fn api_token(&self) -> Option<String> {
        self.api_token.clone()
    }
}

/// True when the value is missing, empty or whitespace only.
pub fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}

/// Strip every trailing forward or back slash.
pub fn untrailingslashit(url: &str) -> &str {
    url.trim_end_matches(['/', '\\'])
}

/// Feedback callback for the settings page inputs.
pub fn is_valid_setting(value: &str) -> bool {
    !value.is_empty()
}
