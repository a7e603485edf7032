#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

//! Request orchestration and view state for the Pocket Studio client
//!
//! A `Studio` tracks the input mode, loads the voice catalog, checks service
//! health, validates and dispatches generation requests, and publishes the
//! resulting audio. All presentation goes through a `Surface`.

mod catalog;
mod error;
mod health;
pub mod memory;
mod mode;
mod orchestrator;
mod reporter;
mod resource;
mod service;
mod state;
mod studio;
mod surface;
#[cfg(test)]
mod testing;

pub use catalog::VoiceCatalog;
pub use error::{Result, StudioError};
pub use health::{AuthBadge, Connectivity, HealthMonitor, HealthStatus, StatusBadges};
pub use mode::{Mode, ModeController};
pub use orchestrator::{GenerateOutcome, GenerationOrchestrator};
pub use reporter::{AuthHelpReporter, BannerReporter, Reporter, is_provider_auth_failure};
pub use resource::{ObjectUrl, Playable, ResourceDecoder, ResourceStore};
pub use service::SynthesisService;
pub use state::StudioState;
pub use studio::{Startup, Studio, StudioBuilder};
pub use surface::{PlaybackError, Surface};

pub use studio_client::{GenerationRequest, VoiceDescriptor, VoiceSample};
