use std::time::Duration;

use serde::Deserialize;

/// Controller behaviour settings
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UiConfig {
    /// How long an error banner stays visible
    #[serde(default = "default_error_display", deserialize_with = "duration_str::deserialize_duration")]
    pub error_display: Duration,
    /// Substring of the service auth status that marks an active login
    #[serde(default = "default_auth_marker")]
    pub auth_marker: String,
    /// Maximum characters of the token preview shown in the auth hint
    #[serde(default = "default_token_preview_chars")]
    pub token_preview_chars: usize,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            error_display: default_error_display(),
            auth_marker: default_auth_marker(),
            token_preview_chars: default_token_preview_chars(),
        }
    }
}

const fn default_error_display() -> Duration {
    Duration::from_secs(5)
}

fn default_auth_marker() -> String {
    "Logged in".to_string()
}

const fn default_token_preview_chars() -> usize {
    12
}
