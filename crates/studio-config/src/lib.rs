#![allow(clippy::must_use_candidate)]

mod env;
mod loader;
pub mod output;
pub mod service;
pub mod telemetry;
pub mod ui;

use serde::Deserialize;

pub use output::*;
pub use service::*;
pub use telemetry::TelemetryConfig;
pub use ui::*;

/// Top-level Pocket Studio configuration
///
/// Every section has defaults, so an empty file (or no file at all) yields
/// a client pointed at a local service.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Synthesis service connection
    #[serde(default)]
    pub service: ServiceConfig,
    /// Controller behaviour (error banner, auth badge)
    #[serde(default)]
    pub ui: UiConfig,
    /// Where downloaded audio is written
    #[serde(default)]
    pub output: OutputConfig,
    /// Logging configuration
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}
