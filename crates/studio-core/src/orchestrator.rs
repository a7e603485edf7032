use std::sync::{Arc, Mutex, PoisonError};

use studio_client::{GenerationRequest, VoiceSample, failure_detail};

use crate::catalog::VoiceCatalog;
use crate::error::{Result, StudioError};
use crate::mode::Mode;
use crate::reporter::Reporter;
use crate::resource::{ObjectUrl, ResourceDecoder};
use crate::service::SynthesisService;
use crate::state::StudioState;
use crate::surface::Surface;

/// Result of a `generate` call that did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateOutcome {
    /// Audio was generated and published under this URL
    Completed(ObjectUrl),
    /// Another generation was already in flight, nothing was done
    Ignored,
}

/// Current contents of the input form
#[derive(Debug, Default)]
struct FormInputs {
    text: String,
    sample: Option<VoiceSample>,
}

/// Holds the loading state for one request
///
/// Dropping the guard leaves the loading state and re-enables the trigger,
/// whichever way the request ended.
struct LoadingGuard<'a> {
    state: &'a StudioState,
    surface: &'a dyn Surface,
}

impl<'a> LoadingGuard<'a> {
    fn acquire(state: &'a StudioState, surface: &'a dyn Surface) -> Option<Self> {
        if !state.try_begin_loading() {
            return None;
        }

        surface.set_trigger_enabled(false);
        Some(Self { state, surface })
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.state.end_loading();
        self.surface.set_trigger_enabled(true);
    }
}

/// Validates input, dispatches generation and routes the outcome
pub struct GenerationOrchestrator {
    state: Arc<StudioState>,
    service: Arc<dyn SynthesisService>,
    surface: Arc<dyn Surface>,
    reporter: Arc<dyn Reporter>,
    catalog: Arc<VoiceCatalog>,
    decoder: ResourceDecoder,
    inputs: Mutex<FormInputs>,
}

impl GenerationOrchestrator {
    pub fn new(
        state: Arc<StudioState>,
        service: Arc<dyn SynthesisService>,
        surface: Arc<dyn Surface>,
        reporter: Arc<dyn Reporter>,
        catalog: Arc<VoiceCatalog>,
        decoder: ResourceDecoder,
    ) -> Self {
        Self {
            state,
            service,
            surface,
            reporter,
            catalog,
            decoder,
            inputs: Mutex::default(),
        }
    }

    pub fn set_text(&self, text: &str) {
        text.clone_into(&mut self.inputs().text);
    }

    pub fn attach_sample(&self, sample: VoiceSample) {
        self.inputs().sample = Some(sample);
    }

    pub fn clear_sample(&self) {
        self.inputs().sample = None;
    }

    pub fn decoder(&self) -> &ResourceDecoder {
        &self.decoder
    }

    /// Run one generation attempt
    ///
    /// Calls made while a request is in flight are ignored. Validation
    /// failures are reported without any network traffic; service failures
    /// are reported with the server's detail text.
    pub async fn generate(&self) -> Result<GenerateOutcome> {
        if self.state.is_loading() {
            tracing::debug!("generation already in flight, ignoring");
            return Ok(GenerateOutcome::Ignored);
        }

        let request = match self.build_request() {
            Ok(request) => request,
            Err(e) => {
                self.reporter.report(&e.to_string());
                return Err(e);
            }
        };

        let Some(_loading) = LoadingGuard::acquire(&self.state, self.surface.as_ref()) else {
            tracing::debug!("generation already in flight, ignoring");
            return Ok(GenerateOutcome::Ignored);
        };

        self.reporter.hide();
        self.surface.set_output_visible(false);

        tracing::info!(mode = %self.state.mode(), text_len = request.text().len(), "generating audio");

        match self.service.generate(&request).await {
            Ok(audio) => Ok(GenerateOutcome::Completed(self.decoder.decode(audio))),
            Err(e) => {
                let detail = failure_detail(&e);
                tracing::warn!(error = %e, "generation failed");

                self.reporter.report(&detail);
                Err(StudioError::GenerationFailed(detail))
            }
        }
    }

    /// Validate the form against the active mode, first failure wins
    fn build_request(&self) -> Result<GenerationRequest> {
        let inputs = self.inputs();

        let text = inputs.text.trim();
        if text.is_empty() {
            return Err(StudioError::EmptyText);
        }

        match self.state.mode() {
            Mode::Preset => {
                let voice = self
                    .catalog
                    .selected_voice()
                    .filter(|id| !id.is_empty())
                    .ok_or(StudioError::NoVoiceSelected)?;

                Ok(GenerationRequest::Preset {
                    text: text.to_owned(),
                    voice,
                })
            }
            Mode::Clone => {
                let sample = inputs.sample.clone().ok_or(StudioError::NoSampleUploaded)?;

                Ok(GenerationRequest::Clone {
                    text: text.to_owned(),
                    sample,
                })
            }
        }
    }

    fn inputs(&self) -> std::sync::MutexGuard<'_, FormInputs> {
        self.inputs.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
