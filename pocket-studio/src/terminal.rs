use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use studio_core::{AuthBadge, Connectivity, Mode, Playable, PlaybackError, StatusBadges, Surface, VoiceDescriptor};

const AUTH_HELP: &str = "\
Voice cloning needs an authenticated Hugging Face account on the server:
  1. accept the model terms on the Hugging Face model page
  2. run `huggingface-cli login` (or set HF_TOKEN) where the service runs
  3. restart the service and try again";

/// Surface that renders to the terminal and saves downloads to disk
pub struct TerminalSurface {
    output: PathBuf,
    print_catalog: bool,
    error_text: Mutex<String>,
    saved: Mutex<Option<PathBuf>>,
}

impl TerminalSurface {
    pub fn new(output: PathBuf) -> Self {
        Self {
            output,
            print_catalog: false,
            error_text: Mutex::new(String::new()),
            saved: Mutex::new(None),
        }
    }

    /// Print the voice list whenever it is replaced
    #[must_use]
    pub const fn print_catalog(mut self) -> Self {
        self.print_catalog = true;
        self
    }

    /// Path of the last successfully saved download
    pub fn saved_path(&self) -> Option<PathBuf> {
        self.saved.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn save(&self, playable: &Playable) -> std::io::Result<()> {
        if let Some(parent) = self.output.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&self.output, &playable.audio)
    }
}

impl Surface for TerminalSurface {
    fn set_section_visible(&self, mode: Mode, visible: bool) {
        if visible {
            tracing::debug!(%mode, "input section shown");
        }
    }

    fn set_tab_active(&self, _mode: Mode, _active: bool) {}

    fn show_voice_placeholder(&self) {
        tracing::debug!("loading voices...");
    }

    fn set_voice_options(&self, voices: &[VoiceDescriptor]) {
        if !self.print_catalog {
            return;
        }

        for voice in voices {
            println!("{:<12} {}", voice.id, voice.name);
        }
    }

    fn set_selected_voice(&self, voice_id: Option<&str>) {
        tracing::debug!(voice = voice_id.unwrap_or("-"), "voice selected");
    }

    fn set_trigger_enabled(&self, enabled: bool) {
        if !enabled {
            println!("generating...");
        }
    }

    fn set_output_visible(&self, visible: bool) {
        if visible && let Some(path) = self.saved_path() {
            println!("saved {}", path.display());
        }
    }

    fn set_player_source(&self, playable: &Playable) {
        tracing::debug!(url = %playable.url, "player source set");
    }

    fn set_download_target(&self, playable: &Playable) {
        match self.save(playable) {
            Ok(()) => {
                *self.saved.lock().unwrap_or_else(PoisonError::into_inner) = Some(self.output.clone());
            }
            Err(e) => tracing::error!(path = %self.output.display(), error = %e, "failed to save audio"),
        }
    }

    fn play(&self) -> Result<(), PlaybackError> {
        Err(PlaybackError::Unsupported)
    }

    fn set_error_text(&self, message: &str) {
        *self.error_text.lock().unwrap_or_else(PoisonError::into_inner) = message.to_owned();
    }

    fn set_error_visible(&self, visible: bool) {
        if visible {
            eprintln!("error: {}", self.error_text.lock().unwrap_or_else(PoisonError::into_inner));
        }
    }

    fn set_auth_help_visible(&self, visible: bool) {
        if visible {
            eprintln!("{AUTH_HELP}");
        }
    }

    fn render_status(&self, badges: &StatusBadges) {
        println!("{}", status_line(badges));
    }
}

/// One-line rendering of the status badges
fn status_line(badges: &StatusBadges) -> String {
    let connectivity = match badges.connectivity {
        Connectivity::Online => "online",
        Connectivity::Offline => "offline / updating",
    };

    let auth = match &badges.auth {
        AuthBadge::Authenticated { label, hint: Some(hint) } => format!("{label} ({hint})"),
        AuthBadge::Authenticated { label, hint: None } | AuthBadge::Unauthenticated { label } => label.clone(),
        AuthBadge::Unknown => "unknown".to_owned(),
    };

    format!("version {} | {connectivity} | auth: {auth}", badges.version)
}

/// Best-effort MIME type for a voice sample file
pub fn sample_content_type(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();

    match extension.as_str() {
        "wav" => Some("audio/wav"),
        "mp3" => Some("audio/mpeg"),
        "flac" => Some("audio/flac"),
        "ogg" => Some("audio/ogg"),
        "m4a" => Some("audio/mp4"),
        "webm" => Some("audio/webm"),
        _ => None,
    }
}
