//! Headless surface that keeps the rendered view in memory
//!
//! Useful for driving the controller without a real view, and for asserting
//! on what a view would have shown.

use std::sync::{Mutex, MutexGuard, PoisonError};

use bytes::Bytes;
use studio_client::VoiceDescriptor;

use crate::health::StatusBadges;
use crate::mode::Mode;
use crate::resource::{ObjectUrl, Playable};
use crate::surface::{PlaybackError, Surface};

/// Everything a view would currently display
#[derive(Debug, Clone)]
pub struct SurfaceSnapshot {
    pub preset_section_visible: bool,
    pub clone_section_visible: bool,
    pub preset_tab_active: bool,
    pub clone_tab_active: bool,
    pub voice_placeholder: bool,
    pub voice_options: Vec<VoiceDescriptor>,
    pub selected_voice: Option<String>,
    pub trigger_enabled: bool,
    /// Every value the trigger was set to, in order
    pub trigger_history: Vec<bool>,
    pub output_visible: bool,
    /// Number of hidden-to-visible transitions of the output area
    pub output_reveals: usize,
    pub player_source: Option<ObjectUrl>,
    pub download_target: Option<ObjectUrl>,
    pub downloaded: Option<Bytes>,
    pub play_attempts: usize,
    pub error_text: String,
    pub error_visible: bool,
    pub auth_help_visible: bool,
    pub status: Option<StatusBadges>,
}

impl Default for SurfaceSnapshot {
    fn default() -> Self {
        Self {
            preset_section_visible: false,
            clone_section_visible: false,
            preset_tab_active: false,
            clone_tab_active: false,
            voice_placeholder: false,
            voice_options: Vec::new(),
            selected_voice: None,
            trigger_enabled: true,
            trigger_history: Vec::new(),
            output_visible: false,
            output_reveals: 0,
            player_source: None,
            download_target: None,
            downloaded: None,
            play_attempts: 0,
            error_text: String::new(),
            error_visible: false,
            auth_help_visible: false,
            status: None,
        }
    }
}

/// In-memory `Surface`
#[derive(Debug, Default)]
pub struct MemorySurface {
    view: Mutex<SurfaceSnapshot>,
    autoplay_blocked: Mutex<bool>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `play` call fail like a browser autoplay policy
    pub fn block_autoplay(&self) {
        *self.autoplay_blocked.lock().unwrap_or_else(PoisonError::into_inner) = true;
    }

    /// Copy of the current view
    pub fn snapshot(&self) -> SurfaceSnapshot {
        self.view().clone()
    }

    fn view(&self) -> MutexGuard<'_, SurfaceSnapshot> {
        self.view.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Surface for MemorySurface {
    fn set_section_visible(&self, mode: Mode, visible: bool) {
        let mut view = self.view();
        match mode {
            Mode::Preset => view.preset_section_visible = visible,
            Mode::Clone => view.clone_section_visible = visible,
        }
    }

    fn set_tab_active(&self, mode: Mode, active: bool) {
        let mut view = self.view();
        match mode {
            Mode::Preset => view.preset_tab_active = active,
            Mode::Clone => view.clone_tab_active = active,
        }
    }

    fn show_voice_placeholder(&self) {
        let mut view = self.view();
        view.voice_options.clear();
        view.voice_placeholder = true;
    }

    fn set_voice_options(&self, voices: &[VoiceDescriptor]) {
        let mut view = self.view();
        view.voice_placeholder = false;
        view.voice_options = voices.to_vec();
    }

    fn set_selected_voice(&self, voice_id: Option<&str>) {
        self.view().selected_voice = voice_id.map(str::to_owned);
    }

    fn set_trigger_enabled(&self, enabled: bool) {
        let mut view = self.view();
        view.trigger_enabled = enabled;
        view.trigger_history.push(enabled);
    }

    fn set_output_visible(&self, visible: bool) {
        let mut view = self.view();
        if visible && !view.output_visible {
            view.output_reveals += 1;
        }
        view.output_visible = visible;
    }

    fn set_player_source(&self, playable: &Playable) {
        self.view().player_source = Some(playable.url.clone());
    }

    fn set_download_target(&self, playable: &Playable) {
        let mut view = self.view();
        view.download_target = Some(playable.url.clone());
        view.downloaded = Some(playable.audio.clone());
    }

    fn play(&self) -> Result<(), PlaybackError> {
        self.view().play_attempts += 1;

        if *self.autoplay_blocked.lock().unwrap_or_else(PoisonError::into_inner) {
            return Err(PlaybackError::Blocked("user gesture required".to_owned()));
        }

        Ok(())
    }

    fn set_error_text(&self, message: &str) {
        message.clone_into(&mut self.view().error_text);
    }

    fn set_error_visible(&self, visible: bool) {
        self.view().error_visible = visible;
    }

    fn set_auth_help_visible(&self, visible: bool) {
        self.view().auth_help_visible = visible;
    }

    fn render_status(&self, badges: &StatusBadges) {
        self.view().status = Some(badges.clone());
    }
}
