use std::time::Duration;

use bytes::Bytes;
use reqwest::header::AUTHORIZATION;
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::error::{Result, StudioClientError};
use crate::types::{GenerationRequest, HealthReport, PresetBody, VoiceDescriptor, VoiceList};

/// Message used when a failed generation carries no readable detail
const GENERIC_FAILURE: &str = "Generation failed";

/// Typed client for the synthesis service
#[derive(Debug, Clone)]
pub struct StudioClient {
    base_url: Url,
    http: reqwest::Client,
    api_key: Option<SecretString>,
}

impl StudioClient {
    /// Create a new client pointing at the given base URL
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| StudioClientError::Config(format!("invalid base URL: {e}")))?;

        Ok(Self {
            base_url,
            http: reqwest::Client::new(),
            api_key: None,
        })
    }

    /// Set the API key sent as a bearer token
    #[must_use]
    pub fn with_api_key(mut self, api_key: SecretString) -> Self {
        self.api_key = Some(api_key);
        self
    }

    /// Replace the transport with one that enforces a request timeout
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
        self.http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(self)
    }

    /// Get the base URL
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    // -- Catalog --

    /// List the preset voices in server order
    pub async fn list_voices(&self) -> Result<Vec<VoiceDescriptor>> {
        let url = make_url(&self.base_url, "/api/voices");

        let response = self.request(reqwest::Method::GET, &url).send().await?;

        let list: VoiceList = handle_error(response).await?.json().await?;
        Ok(list.voices)
    }

    // -- Health --

    /// Fetch service version and authentication status
    pub async fn health(&self) -> Result<HealthReport> {
        let url = make_url(&self.base_url, "/api/health");

        let response = self.request(reqwest::Method::GET, &url).send().await?;

        handle_error(response).await?.json().await.map_err(Into::into)
    }

    // -- Generation --

    /// Generate speech, returning the raw audio payload
    ///
    /// Preset requests are sent as JSON; clone requests are sent as multipart
    /// with the sample attached under `file` and no `voice` field
    pub async fn generate(&self, req: &GenerationRequest) -> Result<Bytes> {
        let url = make_url(&self.base_url, "/api/generate");
        let builder = self.request(reqwest::Method::POST, &url);

        let builder = match req {
            GenerationRequest::Preset { text, voice } => {
                tracing::debug!(voice = %voice, text_len = text.len(), "sending preset generation request");
                builder.json(&PresetBody { text, voice })
            }
            GenerationRequest::Clone { text, sample } => {
                tracing::debug!(
                    file_name = %sample.file_name,
                    sample_len = sample.bytes.len(),
                    text_len = text.len(),
                    "sending clone generation request"
                );

                let mut part = reqwest::multipart::Part::bytes(sample.bytes.to_vec())
                    .file_name(sample.file_name.clone());
                if let Some(ref content_type) = sample.content_type {
                    part = part.mime_str(content_type).map_err(|e| {
                        StudioClientError::Config(format!("invalid mime type: {e}"))
                    })?;
                }

                let form = reqwest::multipart::Form::new()
                    .text("text", text.clone())
                    .part("file", part);

                builder.multipart(form)
            }
        };

        let response = builder.send().await?;

        Ok(handle_error(response).await?.bytes().await?)
    }

    /// Build a request, attaching the bearer token if configured
    fn request(&self, method: reqwest::Method, url: &Url) -> reqwest::RequestBuilder {
        let mut builder = self.http.request(method, url.as_str());

        if let Some(ref key) = self.api_key {
            builder = builder.header(AUTHORIZATION, format!("Bearer {}", key.expose_secret()));
        }

        builder
    }
}

// -- Helper functions --

/// Build a URL from a base and path
fn make_url(base_url: &Url, path: &str) -> Url {
    let mut url = base_url.clone();
    url.set_path(path);
    url
}

/// Check an HTTP response for errors
async fn handle_error(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    // The body may be absent or not JSON at all
    let body = response.text().await.unwrap_or_default();

    Err(StudioClientError::Api {
        status: status.as_u16(),
        detail: parse_error_detail(&body),
    })
}

/// Extract the `detail` field from an error body
///
/// String details are returned verbatim. Structured details (validation
/// error lists) are returned as compact JSON.
fn parse_error_detail(body: &str) -> Option<String> {
    let json = serde_json::from_str::<serde_json::Value>(body).ok()?;

    match json.get("detail")? {
        serde_json::Value::Null => None,
        serde_json::Value::String(detail) if detail.is_empty() => None,
        serde_json::Value::String(detail) => Some(detail.clone()),
        other => Some(other.to_string()),
    }
}

/// Human-readable failure text for a generation error
///
/// Falls back to a generic message when the server gave no usable detail
pub fn failure_detail(error: &StudioClientError) -> String {
    match error {
        StudioClientError::Api { detail: Some(detail), .. } => detail.clone(),
        StudioClientError::Api { detail: None, .. } => GENERIC_FAILURE.to_owned(),
        other => other.to_string(),
    }
}
