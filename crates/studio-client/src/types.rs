use bytes::Bytes;
use serde::{Deserialize, Serialize};

// -- Voice catalog types --

/// A preset voice offered by the service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceDescriptor {
    /// Identifier submitted back to the service
    pub id: String,
    /// User-facing name
    pub name: String,
}

/// Response body of the voice listing endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct VoiceList {
    /// Voices in server order
    pub voices: Vec<VoiceDescriptor>,
}

// -- Health types --

/// Response body of the health endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct HealthReport {
    /// Service version string
    pub version: String,
    /// Free-form authentication status reported by the service
    #[serde(default)]
    pub auth_status: String,
    /// Truncated credential preview, only present when logged in
    #[serde(default)]
    pub token_preview: Option<String>,
}

// -- Generation types --

/// An uploaded audio file used as the voice reference for cloning
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceSample {
    /// Original file name, forwarded in the multipart part
    pub file_name: String,
    /// MIME type of the sample, if known
    pub content_type: Option<String>,
    /// Raw file contents
    pub bytes: Bytes,
}

impl VoiceSample {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: None,
            bytes: bytes.into(),
        }
    }

    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

/// A validated generation request
///
/// Exactly one voice source is carried: a preset id or an uploaded sample.
/// The two variants travel with different encodings since only multipart
/// can carry the binary sample.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationRequest {
    /// Synthesize with a preset voice, sent as JSON
    Preset {
        /// Trimmed, non-empty text
        text: String,
        /// Preset voice id
        voice: String,
    },
    /// Synthesize with a cloned voice, sent as multipart
    Clone {
        /// Trimmed, non-empty text
        text: String,
        /// Reference audio
        sample: VoiceSample,
    },
}

impl GenerationRequest {
    /// Text to synthesize
    pub fn text(&self) -> &str {
        match self {
            Self::Preset { text, .. } | Self::Clone { text, .. } => text,
        }
    }
}

/// JSON body for preset generation
#[derive(Debug, Serialize)]
pub(crate) struct PresetBody<'a> {
    pub text: &'a str,
    pub voice: &'a str,
}
