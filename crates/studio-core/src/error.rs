/// Controller result type
pub type Result<T> = std::result::Result<T, StudioError>;

/// Failures surfaced to the user
///
/// The `Display` text of each variant is exactly what the error banner shows.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StudioError {
    /// Text was empty or whitespace-only
    #[error("Please enter some text.")]
    EmptyText,

    /// Preset mode without a selected voice
    #[error("Please select a voice.")]
    NoVoiceSelected,

    /// Clone mode without an attached sample
    #[error("Please upload a voice sample.")]
    NoSampleUploaded,

    /// A voice id that is not in the loaded catalog
    #[error("Unknown voice '{0}'.")]
    UnknownVoice(String),

    /// The voice listing could not be fetched
    #[error("Could not load voices. Is the server running?")]
    CatalogUnavailable,

    /// The health endpoint could not be reached
    #[error("Could not connect to the server.")]
    HealthUnavailable,

    /// The service (or transport) rejected a generation request
    #[error("{0}")]
    GenerationFailed(String),
}

impl StudioError {
    /// Whether the failure was detected locally, before any network call
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::EmptyText | Self::NoVoiceSelected | Self::NoSampleUploaded | Self::UnknownVoice(_)
        )
    }
}
