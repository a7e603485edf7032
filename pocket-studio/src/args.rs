use std::path::PathBuf;

use clap::{Parser, Subcommand};
use url::Url;

/// Pocket Studio
#[derive(Debug, Parser)]
#[command(name = "pocket-studio", about = "Generate speech from preset or cloned voices via a Pocket TTS service")]
pub struct Args {
    /// Path to configuration file (optional; defaults apply when missing)
    #[arg(short, long, default_value = "pocket-studio.toml", env = "POCKET_STUDIO_CONFIG")]
    pub config: PathBuf,

    /// Override the service base URL
    #[arg(long, env = "POCKET_STUDIO_URL")]
    pub base_url: Option<Url>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the preset voices offered by the service
    Voices,

    /// Show service version and authentication status
    Health,

    /// Generate speech and save it
    Generate(GenerateArgs),
}

#[derive(Debug, clap::Args)]
pub struct GenerateArgs {
    /// Text to synthesize
    #[arg(short, long)]
    pub text: String,

    /// Preset voice id (defaults to the first voice in the catalog)
    #[arg(short, long, conflicts_with = "sample")]
    pub voice: Option<String>,

    /// Audio sample to clone the voice from
    #[arg(short, long)]
    pub sample: Option<PathBuf>,

    /// Where to save the generated audio
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
