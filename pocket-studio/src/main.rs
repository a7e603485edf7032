#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod args;
mod terminal;

use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use args::{Args, Command, GenerateArgs};
use clap::Parser;
use studio_client::StudioClient;
use studio_config::Config;
use studio_core::{GenerateOutcome, Mode, Studio, StudioError, VoiceSample};
use terminal::TerminalSurface;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    // Load configuration
    let mut config = Config::load_or_default(&args.config)?;
    if let Some(base_url) = args.base_url.clone() {
        config.service.base_url = base_url;
        config.validate()?;
    }

    studio_telemetry::init(&config.telemetry)?;

    tracing::debug!(
        config_path = %args.config.display(),
        base_url = %config.service.base_url,
        "starting pocket-studio"
    );

    let client = build_client(&config)?;

    let result = tokio::select! {
        result = run(args.command, client, &config) => result,
        () = shutdown_signal() => Ok(()),
    };

    match result {
        Ok(()) => Ok(ExitCode::SUCCESS),
        // The surface has already printed these
        Err(e) => match e.downcast_ref::<StudioError>() {
            Some(error) => Ok(ExitCode::from(exit_status(error))),
            None => Err(e),
        },
    }
}

/// Exit status for a failure the surface has already reported
///
/// Input problems exit with 2, service failures with 1.
const fn exit_status(error: &StudioError) -> u8 {
    if error.is_validation() { 2 } else { 1 }
}

fn build_client(config: &Config) -> anyhow::Result<StudioClient> {
    let mut client = StudioClient::new(config.service.base_url.as_str())?;

    if let Some(ref api_key) = config.service.api_key {
        client = client.with_api_key(api_key.clone());
    }

    if let Some(timeout) = config.service.timeout {
        client = client.with_timeout(timeout)?;
    }

    Ok(client)
}

async fn run(command: Command, client: StudioClient, config: &Config) -> anyhow::Result<()> {
    match command {
        Command::Voices => {
            let surface = Arc::new(TerminalSurface::new(config.output.default_path()).print_catalog());
            let studio = Studio::builder(Arc::new(client), surface).ui(&config.ui).build();

            studio.load_voices().await?;
        }
        Command::Health => {
            let surface = Arc::new(TerminalSurface::new(config.output.default_path()));
            let studio = Studio::builder(Arc::new(client), surface).ui(&config.ui).build();

            studio.check_health().await?;
        }
        Command::Generate(generate) => run_generate(generate, client, config).await?,
    }

    Ok(())
}

async fn run_generate(args: GenerateArgs, client: StudioClient, config: &Config) -> anyhow::Result<()> {
    let output = args.output.unwrap_or_else(|| config.output.default_path());
    let surface = Arc::new(TerminalSurface::new(output));
    let studio = Studio::builder(Arc::new(client), surface.clone()).ui(&config.ui).build();

    // Health only informs; a failed catalog load matters for presets alone
    let startup = studio.startup().await;

    if let Some(ref path) = args.sample {
        studio.switch_mode(Mode::Clone);
        studio.attach_sample(read_sample(path).await?);
    } else {
        startup.voices?;

        if let Some(ref voice) = args.voice {
            studio.select_voice(voice)?;
        }
    }

    studio.set_text(&args.text);

    match studio.generate().await? {
        GenerateOutcome::Completed(url) => {
            tracing::debug!(url = %url, "generation complete");

            if surface.saved_path().is_none() {
                anyhow::bail!("audio was generated but could not be saved");
            }
        }
        GenerateOutcome::Ignored => anyhow::bail!("another generation is already running"),
    }

    Ok(())
}

async fn read_sample(path: &Path) -> anyhow::Result<VoiceSample> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| anyhow::anyhow!("failed to read voice sample {}: {e}", path.display()))?;

    let file_name = path
        .file_name()
        .map_or_else(|| "sample.wav".to_owned(), |name| name.to_string_lossy().into_owned());

    let sample = VoiceSample::new(file_name, bytes);

    Ok(match terminal::sample_content_type(path) {
        Some(content_type) => sample.with_content_type(content_type),
        None => sample,
    })
}

/// Wait for a shutdown signal (`SIGINT` or `SIGTERM`)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }

    tracing::info!("interrupted, request abandoned");
}
