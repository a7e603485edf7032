use std::path::PathBuf;

use serde::Deserialize;

/// Download destination settings
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Directory generated audio is saved into
    #[serde(default = "default_directory")]
    pub directory: PathBuf,
    /// File name used when none is given on the command line
    #[serde(default = "default_file_name")]
    pub file_name: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            file_name: default_file_name(),
        }
    }
}

impl OutputConfig {
    /// Default path for a downloaded artifact
    pub fn default_path(&self) -> PathBuf {
        self.directory.join(&self.file_name)
    }
}

fn default_directory() -> PathBuf {
    PathBuf::from(".")
}

fn default_file_name() -> String {
    "speech.wav".to_string()
}
