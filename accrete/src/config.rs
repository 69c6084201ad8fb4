//! Engine configuration, layered from defaults, a file, and the environment.

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use crate::error::{AccreteError, AccreteResult};

/// Configuration file consulted in the working directory.
pub const CONFIG_FILE: &str = "accrete.toml";

/// Prefix of the environment variables that override the file.
pub const ENV_PREFIX: &str = "ACCRETE_";

/// Switches read once when an engine is created.
///
/// # Examples
///
/// ```
/// use accrete::config::EngineConfig;
///
/// let config = EngineConfig::default().with_verbose(true);
/// assert!(config.verbose);
/// assert_eq!(config.file_extension, "java");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Follow each handler failure with a note carrying the full error.
    pub verbose: bool,
    /// Start companion fragments with a comment naming their type.
    pub emit_header: bool,
    /// Extension of generated source artefacts, without the dot.
    pub file_extension: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            emit_header: true,
            file_extension: "java".to_owned(),
        }
    }
}

impl EngineConfig {
    /// Defaults, then [`CONFIG_FILE`] if present, then `ACCRETE_*`
    /// variables.
    #[must_use]
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    /// Loads the configuration from the standard layers.
    ///
    /// # Errors
    ///
    /// Returns [`AccreteError::Config`] when a layer holds a value of the
    /// wrong type.
    pub fn load() -> AccreteResult<Self> {
        Self::load_from(&Self::figment())
    }

    /// Extracts the configuration from caller-supplied layers.
    ///
    /// # Errors
    ///
    /// Returns [`AccreteError::Config`] when extraction fails.
    pub fn load_from(figment: &Figment) -> AccreteResult<Self> {
        let config: Self = figment.extract().map_err(AccreteError::config)?;
        tracing::debug!(
            verbose = config.verbose,
            emit_header = config.emit_header,
            extension = %config.file_extension,
            "loaded engine configuration"
        );
        Ok(config)
    }

    /// Returns the configuration with `verbose` replaced.
    #[must_use]
    pub const fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn defaults_apply_without_file_or_environment() {
        figment::Jail::expect_with(|_| {
            let config = EngineConfig::load().map_err(|e| e.to_string())?;
            assert_eq!(config, EngineConfig::default());
            Ok(())
        });
    }

    #[rstest]
    fn environment_overrides_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(CONFIG_FILE, "verbose = false\nfile_extension = \"jav\"")?;
            jail.set_env("ACCRETE_VERBOSE", "true");
            let config = EngineConfig::load().map_err(|e| e.to_string())?;
            assert!(config.verbose);
            assert_eq!(config.file_extension, "jav");
            assert!(config.emit_header);
            Ok(())
        });
    }

    #[rstest]
    fn mistyped_values_are_reported() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(CONFIG_FILE, "emit_header = \"sometimes\"")?;
            let err = EngineConfig::load()
                .err()
                .ok_or_else(|| "expected a config error".to_owned())?;
            assert!(matches!(err, AccreteError::Config(_)));
            Ok(())
        });
    }
}
