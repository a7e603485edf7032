//! Mock synthesis service for integration tests
//!
//! Serves the voice, health and generation endpoints with canned responses
//! and records every generation request it receives

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{FromRequest, Multipart, Request, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing};
use serde::Deserialize;
use tokio_util::sync::CancellationToken;

/// Preset voices listed by the service, in server order
pub const PRESET_VOICES: &[(&str, &str)] = &[
    ("alba", "Alba (Casual)"),
    ("marius", "Marius (Selfie)"),
    ("javert", "Javert (Butter)"),
    ("jean", "Jean (Freeform)"),
    ("fantine", "Fantine (VCTK)"),
    ("cosette", "Cosette (Expresso)"),
    ("eponine", "Eponine (VCTK)"),
    ("azelma", "Azelma (VCTK)"),
];

/// Bytes returned by a successful generation
pub const AUDIO: &[u8] = b"RIFF\x24\x00\x00\x00WAVEfmt ";

/// A generation request as the service saw it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordedRequest {
    pub content_type: String,
    pub text: Option<String>,
    pub voice: Option<String>,
    pub file_name: Option<String>,
    pub file: Option<Vec<u8>>,
}

/// How the generation endpoint answers
#[derive(Debug, Clone)]
pub enum GenerateReply {
    Audio,
    Error { status: StatusCode, body: Option<String> },
}

/// Mock service that returns predictable responses
pub struct MockService {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockState>,
}

struct MockState {
    voice_requests: AtomicU32,
    health_requests: AtomicU32,
    generate_requests: Mutex<Vec<RecordedRequest>>,
    voices: Vec<(String, String)>,
    voices_available: bool,
    health: Option<serde_json::Value>,
    reply: GenerateReply,
}

/// Builder for `MockService`
pub struct MockServiceBuilder {
    voices: Vec<(String, String)>,
    voices_available: bool,
    health: Option<serde_json::Value>,
    reply: GenerateReply,
}

impl MockServiceBuilder {
    /// Replace the preset list
    pub fn voices(mut self, voices: &[(&str, &str)]) -> Self {
        self.voices = voices.iter().map(|(id, name)| ((*id).to_owned(), (*name).to_owned())).collect();
        self
    }

    /// Answer the voice listing with 500
    pub fn voices_unavailable(mut self) -> Self {
        self.voices_available = false;
        self
    }

    /// Answer the health endpoint with 503
    pub fn health_unavailable(mut self) -> Self {
        self.health = None;
        self
    }

    /// Answer generation with the given status and raw body
    pub fn generate_error(mut self, status: u16, body: Option<&str>) -> Self {
        self.reply = GenerateReply::Error {
            status: StatusCode::from_u16(status).expect("valid status code"),
            body: body.map(str::to_owned),
        };
        self
    }

    pub async fn start(self) -> anyhow::Result<MockService> {
        let state = Arc::new(MockState {
            voice_requests: AtomicU32::new(0),
            health_requests: AtomicU32::new(0),
            generate_requests: Mutex::new(Vec::new()),
            voices: self.voices,
            voices_available: self.voices_available,
            health: self.health,
            reply: self.reply,
        });

        let app = Router::new()
            .route("/api/voices", routing::get(handle_voices))
            .route("/api/health", routing::get(handle_health))
            .route("/api/generate", routing::post(handle_generate))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(MockService { addr, shutdown, state })
    }
}

impl MockService {
    pub fn builder() -> MockServiceBuilder {
        MockServiceBuilder {
            voices: PRESET_VOICES
                .iter()
                .map(|(id, name)| ((*id).to_owned(), (*name).to_owned()))
                .collect(),
            voices_available: true,
            health: Some(serde_json::json!({
                "version": "0.1.0",
                "auth_status": "Logged in as tester",
                "token_preview": "hf_abcdefghijklmnop",
            })),
            reply: GenerateReply::Audio,
        }
    }

    /// Start a mock with the default presets, a logged-in health status and
    /// successful generation
    pub async fn start() -> anyhow::Result<Self> {
        Self::builder().start().await
    }

    /// Base URL for configuring the client
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Requests of any kind received so far
    pub fn request_count(&self) -> u32 {
        self.state.voice_requests.load(Ordering::Relaxed)
            + self.state.health_requests.load(Ordering::Relaxed)
            + u32::try_from(self.generate_requests().len()).unwrap_or(u32::MAX)
    }

    /// Generation requests received so far
    pub fn generate_requests(&self) -> Vec<RecordedRequest> {
        self.state.generate_requests.lock().unwrap().clone()
    }
}

impl Drop for MockService {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn handle_voices(State(state): State<Arc<MockState>>) -> Response {
    state.voice_requests.fetch_add(1, Ordering::Relaxed);

    if !state.voices_available {
        return (StatusCode::INTERNAL_SERVER_ERROR, "voices unavailable").into_response();
    }

    let voices: Vec<_> = state
        .voices
        .iter()
        .map(|(id, name)| serde_json::json!({ "id": id, "name": name }))
        .collect();

    Json(serde_json::json!({ "voices": voices })).into_response()
}

async fn handle_health(State(state): State<Arc<MockState>>) -> Response {
    state.health_requests.fetch_add(1, Ordering::Relaxed);

    match state.health {
        Some(ref body) => Json(body.clone()).into_response(),
        None => StatusCode::SERVICE_UNAVAILABLE.into_response(),
    }
}

#[derive(Debug, Deserialize)]
struct PresetBody {
    text: String,
    #[serde(default = "default_voice")]
    voice: String,
}

fn default_voice() -> String {
    "alba".to_owned()
}

async fn handle_generate(State(state): State<Arc<MockState>>, request: Request) -> Response {
    let content_type = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_owned();

    let recorded = if content_type.starts_with("multipart/form-data") {
        match record_multipart(request, content_type).await {
            Ok(recorded) => recorded,
            Err(response) => return response,
        }
    } else {
        match Json::<PresetBody>::from_request(request, &()).await {
            Ok(Json(body)) => RecordedRequest {
                content_type,
                text: Some(body.text),
                voice: Some(body.voice),
                ..RecordedRequest::default()
            },
            Err(rejection) => return rejection.into_response(),
        }
    };

    state.generate_requests.lock().unwrap().push(recorded);

    match state.reply {
        GenerateReply::Audio => ([(header::CONTENT_TYPE, "audio/wav")], AUDIO).into_response(),
        GenerateReply::Error { status, ref body } => match body {
            Some(body) => (status, [(header::CONTENT_TYPE, "application/json")], body.clone()).into_response(),
            None => status.into_response(),
        },
    }
}

async fn record_multipart(request: Request, content_type: String) -> Result<RecordedRequest, Response> {
    let mut multipart = Multipart::from_request(request, &())
        .await
        .map_err(IntoResponse::into_response)?;

    let mut recorded = RecordedRequest {
        content_type,
        ..RecordedRequest::default()
    };

    while let Some(field) = multipart.next_field().await.map_err(IntoResponse::into_response)? {
        match field.name() {
            Some("text") => recorded.text = Some(field.text().await.map_err(IntoResponse::into_response)?),
            Some("voice") => recorded.voice = Some(field.text().await.map_err(IntoResponse::into_response)?),
            Some("file") => {
                recorded.file_name = field.file_name().map(str::to_owned);
                recorded.file = Some(field.bytes().await.map_err(IntoResponse::into_response)?.to_vec());
            }
            _ => {}
        }
    }

    Ok(recorded)
}
