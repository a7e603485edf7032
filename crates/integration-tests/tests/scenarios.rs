mod harness;

use std::sync::Arc;

use harness::mock_service::{AUDIO, MockService};
use studio_client::StudioClient;
use studio_core::memory::MemorySurface;
use studio_core::{AuthBadge, Connectivity, GenerateOutcome, Mode, Studio, StudioError, VoiceSample};

fn studio_for(mock: &MockService) -> (Studio, Arc<MemorySurface>) {
    let client = StudioClient::new(&mock.base_url()).unwrap();
    let surface = Arc::new(MemorySurface::new());
    let studio = Studio::builder(Arc::new(client), surface.clone()).build();

    (studio, surface)
}

#[tokio::test]
async fn startup_populates_catalog_and_status() {
    let mock = MockService::start().await.unwrap();
    let (studio, surface) = studio_for(&mock);

    let startup = studio.startup().await;
    assert_eq!(startup.voices.unwrap().len(), 8);
    assert!(startup.health.is_ok());

    let snapshot = surface.snapshot();
    assert!(snapshot.preset_section_visible);
    assert!(!snapshot.clone_section_visible);
    assert_eq!(snapshot.selected_voice.as_deref(), Some("alba"));
    assert!(!snapshot.voice_placeholder);

    let status = snapshot.status.unwrap();
    assert_eq!(status.version, "0.1.0");
    assert_eq!(status.connectivity, Connectivity::Online);
    assert_eq!(
        status.auth,
        AuthBadge::Authenticated {
            label: "Logged in as tester".to_owned(),
            hint: Some("Token: hf_abcdefghi...".to_owned()),
        }
    );
}

#[tokio::test]
async fn preset_generation_publishes_audio() {
    let mock = MockService::builder()
        .voices(&[("en-US-1", "English (US)")])
        .start()
        .await
        .unwrap();
    let (studio, surface) = studio_for(&mock);
    studio.startup().await;

    studio.set_text("Hello world");
    let outcome = studio.generate().await.unwrap();

    let GenerateOutcome::Completed(url) = outcome else {
        panic!("expected completed generation, got {outcome:?}");
    };

    let requests = mock.generate_requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].text.as_deref(), Some("Hello world"));
    assert_eq!(requests[0].voice.as_deref(), Some("en-US-1"));

    let snapshot = surface.snapshot();
    assert!(snapshot.output_visible);
    assert_eq!(snapshot.player_source.as_ref(), Some(&url));
    assert_eq!(snapshot.download_target.as_ref(), Some(&url));
    assert_eq!(snapshot.downloaded.as_deref(), Some(AUDIO));
    assert!(snapshot.trigger_enabled);
    assert!(!snapshot.error_visible);
    assert!(!studio.is_loading());
    assert_eq!(studio.resources().live_count(), 1);
}

#[tokio::test]
async fn clone_without_sample_sends_nothing() {
    let mock = MockService::start().await.unwrap();
    let (studio, surface) = studio_for(&mock);
    studio.startup().await;
    let before = mock.request_count();

    studio.switch_mode(Mode::Clone);
    studio.set_text("Clone me");
    let err = studio.generate().await.unwrap_err();

    assert!(matches!(err, StudioError::NoSampleUploaded));
    assert_eq!(mock.request_count(), before);

    let snapshot = surface.snapshot();
    assert!(snapshot.error_visible);
    assert_eq!(snapshot.error_text, "Please upload a voice sample.");
    assert!(!snapshot.auth_help_visible);
}

#[tokio::test]
async fn clone_generation_uploads_sample() {
    let mock = MockService::start().await.unwrap();
    let (studio, surface) = studio_for(&mock);
    studio.startup().await;

    studio.switch_mode(Mode::Clone);
    studio.attach_sample(VoiceSample::new("voice.wav", b"RIFFvoice".to_vec()).with_content_type("audio/wav"));
    studio.set_text("  Say it like me  ");
    let outcome = studio.generate().await.unwrap();

    assert!(matches!(outcome, GenerateOutcome::Completed(_)));

    let requests = mock.generate_requests();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].content_type.starts_with("multipart/form-data"));
    assert_eq!(requests[0].text.as_deref(), Some("Say it like me"));
    assert_eq!(requests[0].file_name.as_deref(), Some("voice.wav"));
    assert!(surface.snapshot().output_visible);
}

#[tokio::test]
async fn provider_auth_failure_in_clone_mode_reveals_help() {
    let mock = MockService::builder()
        .generate_error(403, Some(r#"{"detail":"Hugging Face login required"}"#))
        .start()
        .await
        .unwrap();
    let (studio, surface) = studio_for(&mock);
    studio.startup().await;

    studio.switch_mode(Mode::Clone);
    studio.attach_sample(VoiceSample::new("voice.wav", b"RIFFvoice".to_vec()));
    studio.set_text("Clone me");
    let err = studio.generate().await.unwrap_err();

    assert!(matches!(err, StudioError::GenerationFailed(ref detail) if detail == "Hugging Face login required"));

    let snapshot = surface.snapshot();
    assert!(snapshot.error_visible);
    assert_eq!(snapshot.error_text, "Hugging Face login required");
    assert!(snapshot.auth_help_visible);
    assert!(snapshot.trigger_enabled);
    assert!(!snapshot.output_visible);
    assert!(!studio.is_loading());
}

#[tokio::test]
async fn provider_auth_failure_in_preset_mode_keeps_help_hidden() {
    let mock = MockService::builder()
        .generate_error(403, Some(r#"{"detail":"Hugging Face login required"}"#))
        .start()
        .await
        .unwrap();
    let (studio, surface) = studio_for(&mock);
    studio.startup().await;

    studio.set_text("Hello");
    studio.generate().await.unwrap_err();

    let snapshot = surface.snapshot();
    assert_eq!(snapshot.error_text, "Hugging Face login required");
    assert!(!snapshot.auth_help_visible);
}

#[tokio::test]
async fn malformed_error_body_shows_generic_message() {
    let mock = MockService::builder()
        .generate_error(500, Some("Internal Server Error"))
        .start()
        .await
        .unwrap();
    let (studio, surface) = studio_for(&mock);
    studio.startup().await;

    studio.set_text("Hello");
    let err = studio.generate().await.unwrap_err();

    assert!(matches!(err, StudioError::GenerationFailed(ref detail) if detail == "Generation failed"));
    assert_eq!(surface.snapshot().error_text, "Generation failed");
    assert!(surface.snapshot().trigger_enabled);
}

#[tokio::test]
async fn health_failure_does_not_block_generation() {
    let mock = MockService::builder().health_unavailable().start().await.unwrap();
    let (studio, surface) = studio_for(&mock);

    let startup = studio.startup().await;
    assert!(matches!(startup.health, Err(StudioError::HealthUnavailable)));
    assert!(startup.voices.is_ok());

    let status = surface.snapshot().status.unwrap();
    assert_eq!(status.version, "unknown");
    assert_eq!(status.connectivity, Connectivity::Offline);
    assert!(surface.snapshot().trigger_enabled);

    studio.set_text("Still works");
    let outcome = studio.generate().await.unwrap();

    assert!(matches!(outcome, GenerateOutcome::Completed(_)));
    assert_eq!(mock.generate_requests().len(), 1);
}

#[tokio::test]
async fn catalog_failure_blocks_preset_generation_only() {
    let mock = MockService::builder().voices_unavailable().start().await.unwrap();
    let (studio, surface) = studio_for(&mock);

    let startup = studio.startup().await;
    assert!(matches!(startup.voices, Err(StudioError::CatalogUnavailable)));
    assert!(surface.snapshot().voice_options.is_empty());
    assert_eq!(
        surface.snapshot().error_text,
        "Could not load voices. Is the server running?"
    );

    studio.set_text("Hello");
    let err = studio.generate().await.unwrap_err();
    assert!(matches!(err, StudioError::NoVoiceSelected));
    assert!(mock.generate_requests().is_empty());

    studio.switch_mode(Mode::Clone);
    studio.attach_sample(VoiceSample::new("voice.wav", b"RIFFvoice".to_vec()));
    assert!(matches!(studio.generate().await.unwrap(), GenerateOutcome::Completed(_)));
}

#[tokio::test]
async fn regenerating_releases_previous_audio() {
    let mock = MockService::start().await.unwrap();
    let (studio, _surface) = studio_for(&mock);
    studio.startup().await;
    studio.set_text("Once");

    let GenerateOutcome::Completed(first) = studio.generate().await.unwrap() else {
        panic!("first generation ignored");
    };
    let GenerateOutcome::Completed(second) = studio.generate().await.unwrap() else {
        panic!("second generation ignored");
    };

    assert_ne!(first, second);
    assert_eq!(studio.resources().live_count(), 1);
    assert!(studio.resources().resolve(&first).is_none());
    assert_eq!(studio.current_audio(), Some(second));
}
