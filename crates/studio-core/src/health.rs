use std::sync::Arc;

use studio_client::HealthReport;

use crate::error::{Result, StudioError};
use crate::reporter::Reporter;
use crate::service::SynthesisService;
use crate::surface::Surface;

const UNKNOWN_VERSION: &str = "unknown";

/// Service status as last observed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthStatus {
    pub version: String,
    pub online: bool,
    pub auth_status: String,
    pub token_preview: Option<String>,
}

impl From<HealthReport> for HealthStatus {
    fn from(report: HealthReport) -> Self {
        Self {
            version: report.version,
            online: true,
            auth_status: report.auth_status,
            token_preview: report.token_preview,
        }
    }
}

/// Connectivity badge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connectivity {
    Online,
    /// Offline, or the service is restarting
    Offline,
}

/// Authentication badge
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthBadge {
    /// Active provider login; `hint` carries the truncated token preview
    Authenticated { label: String, hint: Option<String> },
    /// The service answered but is not logged in
    Unauthenticated { label: String },
    /// Status could not be determined
    Unknown,
}

/// What the status area shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusBadges {
    pub version: String,
    pub connectivity: Connectivity,
    pub auth: AuthBadge,
}

impl StatusBadges {
    /// Badges for a reachable service
    ///
    /// The login state is derived by looking for `auth_marker` in the
    /// service's auth status text.
    pub fn online(status: &HealthStatus, auth_marker: &str, preview_chars: usize) -> Self {
        let auth = if status.auth_status.contains(auth_marker) {
            AuthBadge::Authenticated {
                label: status.auth_status.clone(),
                hint: status
                    .token_preview
                    .as_deref()
                    .map(|preview| format!("Token: {}", truncate(preview, preview_chars))),
            }
        } else {
            AuthBadge::Unauthenticated {
                label: status.auth_status.clone(),
            }
        };

        Self {
            version: status.version.clone(),
            connectivity: Connectivity::Online,
            auth,
        }
    }

    /// Badges for an unreachable service
    pub fn offline() -> Self {
        Self {
            version: UNKNOWN_VERSION.to_owned(),
            connectivity: Connectivity::Offline,
            auth: AuthBadge::Unknown,
        }
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_owned(),
    }
}

/// Polls the service status and renders the badges
///
/// Purely informational: it never touches the generate trigger.
pub struct HealthMonitor {
    service: Arc<dyn SynthesisService>,
    surface: Arc<dyn Surface>,
    reporter: Arc<dyn Reporter>,
    auth_marker: String,
    preview_chars: usize,
}

impl HealthMonitor {
    pub fn new(
        service: Arc<dyn SynthesisService>,
        surface: Arc<dyn Surface>,
        reporter: Arc<dyn Reporter>,
        auth_marker: String,
        preview_chars: usize,
    ) -> Self {
        Self {
            service,
            surface,
            reporter,
            auth_marker,
            preview_chars,
        }
    }

    /// Fetch status and re-render the badges from it
    pub async fn check_health(&self) -> Result<HealthStatus> {
        match self.service.health().await {
            Ok(report) => {
                let status = HealthStatus::from(report);
                tracing::info!(version = %status.version, auth = %status.auth_status, "service online");

                let badges = StatusBadges::online(&status, &self.auth_marker, self.preview_chars);
                self.surface.render_status(&badges);

                Ok(status)
            }
            Err(e) => {
                tracing::warn!(error = %e, "health check failed");

                self.surface.render_status(&StatusBadges::offline());

                let error = StudioError::HealthUnavailable;
                self.reporter.report(&error.to_string());
                Err(error)
            }
        }
    }
}
