//! In-process stand-in for the synthesis service

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use studio_client::{GenerationRequest, HealthReport, StudioClientError, VoiceDescriptor};
use tokio::sync::Notify;

use crate::service::SynthesisService;

pub fn voice(id: &str, name: &str) -> VoiceDescriptor {
    VoiceDescriptor {
        id: id.to_owned(),
        name: name.to_owned(),
    }
}

#[derive(Debug, Clone)]
pub enum Reply {
    Audio(Bytes),
    Status(u16, Option<String>),
}

impl Reply {
    fn into_result(self) -> studio_client::Result<Bytes> {
        match self {
            Self::Audio(bytes) => Ok(bytes),
            Self::Status(status, detail) => Err(StudioClientError::Api { status, detail }),
        }
    }
}

pub struct FakeService {
    voices: Mutex<Result<Vec<VoiceDescriptor>, u16>>,
    health: Mutex<Option<HealthReport>>,
    reply: Mutex<Reply>,
    requests: Mutex<Vec<GenerationRequest>>,
    calls: AtomicUsize,
    gate: Option<Arc<Notify>>,
}

impl FakeService {
    pub fn new() -> Self {
        Self {
            voices: Mutex::new(Ok(Vec::new())),
            health: Mutex::new(None),
            reply: Mutex::new(Reply::Audio(Bytes::from_static(b"RIFF"))),
            requests: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
            gate: None,
        }
    }

    pub fn with_voices(self, voices: Vec<VoiceDescriptor>) -> Self {
        self.set_voices(voices);
        self
    }

    pub fn with_voices_status(self, status: u16) -> Self {
        *self.voices.lock().unwrap() = Err(status);
        self
    }

    pub fn with_health(self, report: HealthReport) -> Self {
        self.set_health(Some(report));
        self
    }

    pub fn with_reply(self, reply: Reply) -> Self {
        *self.reply.lock().unwrap() = reply;
        self
    }

    /// Hold every generation until the returned handle is notified
    pub fn gated(mut self) -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        self.gate = Some(gate.clone());
        (self, gate)
    }

    pub fn set_reply(&self, reply: Reply) {
        *self.reply.lock().unwrap() = reply;
    }

    pub fn set_voices(&self, voices: Vec<VoiceDescriptor>) {
        *self.voices.lock().unwrap() = Ok(voices);
    }

    /// `None` makes the health endpoint answer 503
    pub fn set_health(&self, report: Option<HealthReport>) {
        *self.health.lock().unwrap() = report;
    }

    /// Number of network calls of any kind
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl SynthesisService for FakeService {
    async fn list_voices(&self) -> studio_client::Result<Vec<VoiceDescriptor>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.voices
            .lock()
            .unwrap()
            .clone()
            .map_err(|status| StudioClientError::Api { status, detail: None })
    }

    async fn health(&self) -> studio_client::Result<HealthReport> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.health.lock().unwrap().clone().ok_or(StudioClientError::Api {
            status: 503,
            detail: None,
        })
    }

    async fn generate(&self, request: &GenerationRequest) -> studio_client::Result<Bytes> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());

        if let Some(ref gate) = self.gate {
            gate.notified().await;
        }

        let reply = self.reply.lock().unwrap().clone();
        reply.into_result()
    }
}
