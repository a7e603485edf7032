use std::sync::Arc;
use std::time::Duration;

use studio_client::{VoiceDescriptor, VoiceSample};
use studio_config::UiConfig;

use crate::catalog::VoiceCatalog;
use crate::error::Result;
use crate::health::{HealthMonitor, HealthStatus};
use crate::mode::{Mode, ModeController};
use crate::orchestrator::{GenerateOutcome, GenerationOrchestrator};
use crate::reporter::{AuthHelpReporter, BannerReporter, Reporter};
use crate::resource::{ResourceDecoder, ResourceStore};
use crate::service::SynthesisService;
use crate::state::StudioState;
use crate::surface::Surface;

/// Outcome of the two independent startup fetches
#[derive(Debug)]
pub struct Startup {
    pub voices: Result<Vec<VoiceDescriptor>>,
    pub health: Result<HealthStatus>,
}

/// The controller behind one studio view
///
/// Owns the shared state and wires every collaborator to the same surface
/// and the same (auth-help decorated) error reporter.
pub struct Studio {
    state: Arc<StudioState>,
    surface: Arc<dyn Surface>,
    reporter: Arc<dyn Reporter>,
    store: Arc<ResourceStore>,
    mode: ModeController,
    catalog: Arc<VoiceCatalog>,
    health: HealthMonitor,
    orchestrator: GenerationOrchestrator,
}

impl Studio {
    pub fn builder(service: Arc<dyn SynthesisService>, surface: Arc<dyn Surface>) -> StudioBuilder {
        StudioBuilder::new(service, surface)
    }

    /// Render the default mode, then load voices and check health concurrently
    ///
    /// Neither fetch gates the other, and neither gates generation.
    pub async fn startup(&self) -> Startup {
        self.mode.render();
        self.surface.set_trigger_enabled(true);

        let (voices, health) = tokio::join!(self.catalog.load_voices(), self.health.check_health());

        Startup { voices, health }
    }

    pub fn switch_mode(&self, mode: Mode) {
        self.mode.switch_mode(mode);
    }

    pub fn mode(&self) -> Mode {
        self.state.mode()
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    pub fn set_text(&self, text: &str) {
        self.orchestrator.set_text(text);
    }

    pub fn attach_sample(&self, sample: VoiceSample) {
        self.orchestrator.attach_sample(sample);
    }

    pub fn clear_sample(&self) {
        self.orchestrator.clear_sample();
    }

    /// Select a preset voice by id
    ///
    /// # Errors
    ///
    /// Returns `UnknownVoice` if the id is not in the catalog
    pub fn select_voice(&self, voice_id: &str) -> Result<()> {
        self.catalog.select_voice(voice_id)
    }

    pub fn selected_voice(&self) -> Option<String> {
        self.catalog.selected_voice()
    }

    pub fn voices(&self) -> Vec<VoiceDescriptor> {
        self.catalog.voices()
    }

    pub async fn load_voices(&self) -> Result<Vec<VoiceDescriptor>> {
        self.catalog.load_voices().await
    }

    pub async fn check_health(&self) -> Result<HealthStatus> {
        self.health.check_health().await
    }

    pub async fn generate(&self) -> Result<GenerateOutcome> {
        self.orchestrator.generate().await
    }

    /// Report a message through the decorated reporter
    pub fn report(&self, message: &str) {
        self.reporter.report(message);
    }

    pub fn hide_error(&self) {
        self.reporter.hide();
    }

    /// Close the auth-help panel
    pub fn dismiss_auth_help(&self) {
        self.surface.set_auth_help_visible(false);
    }

    /// Live generated audio, for inspection and downloads
    pub fn resources(&self) -> &ResourceStore {
        &self.store
    }

    pub fn current_audio(&self) -> Option<crate::resource::ObjectUrl> {
        self.orchestrator.decoder().current_url()
    }
}

/// Builder for `Studio`
pub struct StudioBuilder {
    service: Arc<dyn SynthesisService>,
    surface: Arc<dyn Surface>,
    error_display: Duration,
    auth_marker: String,
    preview_chars: usize,
}

impl StudioBuilder {
    pub fn new(service: Arc<dyn SynthesisService>, surface: Arc<dyn Surface>) -> Self {
        let defaults = UiConfig::default();

        Self {
            service,
            surface,
            error_display: defaults.error_display,
            auth_marker: defaults.auth_marker,
            preview_chars: defaults.token_preview_chars,
        }
    }

    /// Take banner and badge settings from configuration
    #[must_use]
    pub fn ui(mut self, config: &UiConfig) -> Self {
        self.error_display = config.error_display;
        self.auth_marker.clone_from(&config.auth_marker);
        self.preview_chars = config.token_preview_chars;
        self
    }

    #[must_use]
    pub const fn error_display(mut self, display: Duration) -> Self {
        self.error_display = display;
        self
    }

    pub fn build(self) -> Studio {
        let state = Arc::new(StudioState::new());
        let store = Arc::new(ResourceStore::new());

        let reporter: Arc<dyn Reporter> = Arc::new(AuthHelpReporter::new(
            BannerReporter::new(Arc::clone(&self.surface), self.error_display),
            Arc::clone(&state),
            Arc::clone(&self.surface),
        ));

        let mode = ModeController::new(Arc::clone(&state), Arc::clone(&self.surface));

        let catalog = Arc::new(VoiceCatalog::new(
            Arc::clone(&self.service),
            Arc::clone(&self.surface),
            Arc::clone(&reporter),
        ));

        let health = HealthMonitor::new(
            Arc::clone(&self.service),
            Arc::clone(&self.surface),
            Arc::clone(&reporter),
            self.auth_marker,
            self.preview_chars,
        );

        let decoder = ResourceDecoder::new(Arc::clone(&store), Arc::clone(&self.surface));

        let orchestrator = GenerationOrchestrator::new(
            Arc::clone(&state),
            self.service,
            Arc::clone(&self.surface),
            Arc::clone(&reporter),
            Arc::clone(&catalog),
            decoder,
        );

        Studio {
            state,
            surface: self.surface,
            reporter,
            store,
            mode,
            catalog,
            health,
            orchestrator,
        }
    }
}
