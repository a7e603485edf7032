use std::path::Path;

use crate::Config;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        Self::parse(&raw)
    }

    /// Load the file if it exists, otherwise fall back to defaults
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file fails to load
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            return Self::load(path);
        }

        tracing::debug!(path = %path.display(), "config file not found, using defaults");

        let config = Self::default();
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from raw TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if expansion, parsing, or validation fails
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is usable
    ///
    /// # Errors
    ///
    /// Returns an error if the service URL or UI settings are invalid
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_service()?;
        self.validate_ui()?;
        Ok(())
    }

    fn validate_service(&self) -> anyhow::Result<()> {
        let scheme = self.service.base_url.scheme();
        if scheme != "http" && scheme != "https" {
            anyhow::bail!("service.base_url must use http or https, got '{scheme}'");
        }

        if self.service.timeout.is_some_and(|t| t.is_zero()) {
            anyhow::bail!("service.timeout must be greater than 0");
        }

        Ok(())
    }

    fn validate_ui(&self) -> anyhow::Result<()> {
        if self.ui.error_display.is_zero() {
            anyhow::bail!("ui.error_display must be greater than 0");
        }

        if self.ui.auth_marker.trim().is_empty() {
            anyhow::bail!("ui.auth_marker must not be empty");
        }

        Ok(())
    }
}
