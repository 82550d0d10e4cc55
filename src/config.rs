//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/treewalk/treewalk.toml`
//! 3. Explicit config file passed with `--config`
//! 4. Environment variables: `TREEWALK_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::domain::EMPTY_LABEL;

/// Prefix of environment variable overrides.
pub const ENV_PREFIX: &str = "TREEWALK";

/// Unified configuration for treewalk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Serialize trees one token per line
    pub pretty: bool,
    /// Text shown when rendering an empty tree
    pub empty_label: String,
    /// Colored terminal output
    pub color: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            pretty: false,
            empty_label: EMPTY_LABEL.to_string(),
            color: true,
        }
    }
}

/// Get the XDG config directory for treewalk.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "treewalk").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("treewalk.toml"))
}

impl Settings {
    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `explicit` - Optional config file; unlike the global file it must exist
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_layers(global_config_path().as_deref(), explicit, ENV_PREFIX)
    }

    /// Load settings from the given layers.
    ///
    /// A missing `global` file is skipped; a missing `explicit` file is an error.
    #[instrument(level = "debug")]
    pub fn load_layers(
        global: Option<&Path>,
        explicit: Option<&Path>,
        env_prefix: &str,
    ) -> Result<Self, ConfigError> {
        let defaults = Settings::default();
        let mut builder = Config::builder()
            .set_default("pretty", defaults.pretty)?
            .set_default("empty_label", defaults.empty_label.clone())?
            .set_default("color", defaults.color)?;

        if let Some(global_path) = global {
            debug!("global config: {}", global_path.display());
            builder = builder.add_source(File::from(global_path).required(false));
        }
        if let Some(explicit_path) = explicit {
            debug!("explicit config: {}", explicit_path.display());
            builder = builder.add_source(File::from(explicit_path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix(env_prefix)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings: Self = builder.build()?.try_deserialize()?;
        debug!(?settings, "settings loaded");
        Ok(settings)
    }

    /// Effective settings rendered as TOML.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string(self)
    }
}
