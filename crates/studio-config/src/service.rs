use std::time::Duration;

use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

/// Synthesis service connection settings
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    /// Base URL of the service; endpoint paths are appended under `/api`
    #[serde(default = "default_base_url")]
    pub base_url: Url,
    /// Bearer token sent with every request
    #[serde(default)]
    pub api_key: Option<SecretString>,
    /// Transport timeout (e.g. "90s"); unset leaves it to the transport
    #[serde(default, deserialize_with = "duration_str::deserialize_option_duration")]
    pub timeout: Option<Duration>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            timeout: None,
        }
    }
}

fn default_base_url() -> Url {
    Url::parse("http://127.0.0.1:8000").expect("default base URL must parse")
}
