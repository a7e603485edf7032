//! Error banner with auto-dismiss, and the auth-help decoration around it

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::mode::Mode;
use crate::state::StudioState;
use crate::surface::Surface;

/// Substrings (lowercase) that point at a provider login or consent problem
const AUTH_FAILURE_MARKERS: &[&str] = &[
    "hugging face",
    "huggingface",
    "terms",
    "login",
    "log in",
    "logged in",
    "clone",
    "cloning",
];

/// Whether an error message looks like a provider authentication or
/// terms-of-service failure
///
/// The provider's error wording is not stable, so this is a substring
/// heuristic over the lowercased message.
pub fn is_provider_auth_failure(message: &str) -> bool {
    let message = message.to_lowercase();
    AUTH_FAILURE_MARKERS.iter().any(|marker| message.contains(marker))
}

/// Something that can surface an error message to the user
pub trait Reporter: Send + Sync {
    /// Show `message`, replacing whatever is currently shown
    fn report(&self, message: &str);

    /// Hide the message immediately
    fn hide(&self);
}

/// Transient error banner
///
/// Each report schedules its own hide timer. A timer only hides the banner if
/// no newer report arrived in the meantime, so visibility always lasts the
/// full delay after the most recent report.
pub struct BannerReporter {
    surface: Arc<dyn Surface>,
    display: Duration,
    generation: Arc<AtomicU64>,
}

impl BannerReporter {
    pub fn new(surface: Arc<dyn Surface>, display: Duration) -> Self {
        Self {
            surface,
            display,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    fn schedule_hide(&self, generation: u64) {
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            tracing::debug!("no async runtime, error banner stays until hidden");
            return;
        };

        let surface = Arc::clone(&self.surface);
        let current = Arc::clone(&self.generation);
        let display = self.display;

        handle.spawn(async move {
            tokio::time::sleep(display).await;

            if current.load(Ordering::Acquire) == generation {
                surface.set_error_visible(false);
            }
        });
    }
}

impl Reporter for BannerReporter {
    fn report(&self, message: &str) {
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;

        tracing::warn!(message, "reporting error");

        self.surface.set_error_text(message);
        self.surface.set_error_visible(true);
        self.schedule_hide(generation);
    }

    fn hide(&self) {
        self.surface.set_error_visible(false);
    }
}

/// Reveals the auth-help panel alongside provider login failures
///
/// Only applies in clone mode: preset voices never need provider
/// authentication. The panel stays open until dismissed or the mode changes.
pub struct AuthHelpReporter<R> {
    inner: R,
    state: Arc<StudioState>,
    surface: Arc<dyn Surface>,
}

impl<R: Reporter> AuthHelpReporter<R> {
    pub fn new(inner: R, state: Arc<StudioState>, surface: Arc<dyn Surface>) -> Self {
        Self { inner, state, surface }
    }
}

impl<R: Reporter> Reporter for AuthHelpReporter<R> {
    fn report(&self, message: &str) {
        self.inner.report(message);

        if self.state.mode() == Mode::Clone && is_provider_auth_failure(message) {
            tracing::info!("provider authentication failure, showing auth help");
            self.surface.set_auth_help_visible(true);
        }
    }

    fn hide(&self) {
        self.inner.hide();
    }
}
