use async_trait::async_trait;
use bytes::Bytes;
use studio_client::{GenerationRequest, HealthReport, StudioClient, VoiceDescriptor};

/// The remote synthesis service as seen by the controller
#[async_trait]
pub trait SynthesisService: Send + Sync {
    /// Preset voices in server order
    async fn list_voices(&self) -> studio_client::Result<Vec<VoiceDescriptor>>;

    /// Service version and authentication status
    async fn health(&self) -> studio_client::Result<HealthReport>;

    /// Generate audio for a validated request
    async fn generate(&self, request: &GenerationRequest) -> studio_client::Result<Bytes>;
}

#[async_trait]
impl SynthesisService for StudioClient {
    async fn list_voices(&self) -> studio_client::Result<Vec<VoiceDescriptor>> {
        Self::list_voices(self).await
    }

    async fn health(&self) -> studio_client::Result<HealthReport> {
        Self::health(self).await
    }

    async fn generate(&self, request: &GenerationRequest) -> studio_client::Result<Bytes> {
        Self::generate(self, request).await
    }
}
