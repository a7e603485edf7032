use studio_client::VoiceDescriptor;

use crate::health::StatusBadges;
use crate::mode::Mode;
use crate::resource::Playable;

/// Autoplay refusal reported by a surface
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlaybackError {
    /// The host refused to start playback without a user gesture
    #[error("autoplay blocked: {0}")]
    Blocked(String),
    /// The host has no audio output
    #[error("playback not supported by this surface")]
    Unsupported,
}

/// The view elements the controller drives
///
/// A surface owns presentation only: it never makes decisions, it just
/// reflects what the controller tells it. Implementations use interior
/// mutability since the controller shares one surface between collaborators.
pub trait Surface: Send + Sync {
    /// Show or hide the input section belonging to `mode`
    fn set_section_visible(&self, mode: Mode, visible: bool);

    /// Toggle the active indicator on the tab belonging to `mode`
    fn set_tab_active(&self, mode: Mode, active: bool);

    /// Replace the voice list with a single "loading..." entry
    fn show_voice_placeholder(&self);

    /// Replace the whole voice list, placeholder included
    fn set_voice_options(&self, voices: &[VoiceDescriptor]);

    /// Reflect the current voice selection
    fn set_selected_voice(&self, voice_id: Option<&str>);

    /// Enable or disable the generate trigger
    fn set_trigger_enabled(&self, enabled: bool);

    fn set_output_visible(&self, visible: bool);

    /// Point the audio player at a playable resource
    fn set_player_source(&self, playable: &Playable);

    /// Point the download link at a playable resource
    fn set_download_target(&self, playable: &Playable);

    /// Start playback of the current player source
    ///
    /// # Errors
    ///
    /// Returns an error if the host refuses to autoplay
    fn play(&self) -> Result<(), PlaybackError>;

    fn set_error_text(&self, message: &str);

    fn set_error_visible(&self, visible: bool);

    /// Show or hide the provider authentication help panel
    fn set_auth_help_visible(&self, visible: bool);

    /// Render version, connectivity and authentication badges
    fn render_status(&self, badges: &StatusBadges);
}
