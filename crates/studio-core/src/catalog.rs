use std::sync::{Arc, PoisonError, RwLock};

use studio_client::VoiceDescriptor;

use crate::error::{Result, StudioError};
use crate::reporter::Reporter;
use crate::service::SynthesisService;
use crate::surface::Surface;

#[derive(Debug, Default)]
struct CatalogState {
    voices: Vec<VoiceDescriptor>,
    selected: Option<String>,
}

/// Preset voice list and the current selection
pub struct VoiceCatalog {
    service: Arc<dyn SynthesisService>,
    surface: Arc<dyn Surface>,
    reporter: Arc<dyn Reporter>,
    state: RwLock<CatalogState>,
}

impl VoiceCatalog {
    pub fn new(service: Arc<dyn SynthesisService>, surface: Arc<dyn Surface>, reporter: Arc<dyn Reporter>) -> Self {
        Self {
            service,
            surface,
            reporter,
            state: RwLock::default(),
        }
    }

    /// Fetch the preset voices and replace the list with them
    ///
    /// The first voice becomes the selection. On failure the list is left
    /// empty and a fixed message is reported.
    pub async fn load_voices(&self) -> Result<Vec<VoiceDescriptor>> {
        self.surface.show_voice_placeholder();

        match self.service.list_voices().await {
            Ok(voices) => {
                tracing::info!(count = voices.len(), "loaded voice catalog");

                let selected = voices.first().map(|v| v.id.clone());
                self.replace(voices.clone(), selected);

                Ok(voices)
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to load voices");

                self.replace(Vec::new(), None);

                let error = StudioError::CatalogUnavailable;
                self.reporter.report(&error.to_string());
                Err(error)
            }
        }
    }

    /// Select a voice by id
    ///
    /// # Errors
    ///
    /// Returns `UnknownVoice` if the id is not in the loaded catalog
    pub fn select_voice(&self, voice_id: &str) -> Result<()> {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);

        if !state.voices.iter().any(|v| v.id == voice_id) {
            drop(state);
            let error = StudioError::UnknownVoice(voice_id.to_owned());
            self.reporter.report(&error.to_string());
            return Err(error);
        }

        state.selected = Some(voice_id.to_owned());
        drop(state);

        self.surface.set_selected_voice(Some(voice_id));
        Ok(())
    }

    /// Id of the selected voice, if any
    pub fn selected_voice(&self) -> Option<String> {
        self.state.read().unwrap_or_else(PoisonError::into_inner).selected.clone()
    }

    /// Voices from the last successful load
    pub fn voices(&self) -> Vec<VoiceDescriptor> {
        self.state.read().unwrap_or_else(PoisonError::into_inner).voices.clone()
    }

    fn replace(&self, voices: Vec<VoiceDescriptor>, selected: Option<String>) {
        self.surface.set_voice_options(&voices);
        self.surface.set_selected_voice(selected.as_deref());

        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.voices = voices;
        state.selected = selected;
    }
}
