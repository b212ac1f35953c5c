//! YAML configuration for the fleet binaries.
//!
//! Supports precedence: CLI > file > defaults. Every key is optional.

use crate::alert::Thresholds;
use crate::error::{FleetError, Result};
use crate::parser::{FormatErrorPolicy, FormatProfile, ParseOptions};
use crate::workload::WorkloadConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Input file settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputConfig {
    /// Line format of the input file.
    #[serde(default)]
    pub profile: FormatProfile,

    /// Malformed-line policy; the profile's default when absent.
    #[serde(default)]
    pub on_format_error: Option<FormatErrorPolicy>,
}

impl InputConfig {
    /// Resolves the parser options.
    #[must_use]
    pub fn parse_options(&self) -> ParseOptions {
        let options = ParseOptions::new(self.profile);
        match self.on_format_error {
            Some(policy) => options.with_policy(policy),
            None => options,
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Configuration version.
    #[serde(default = "default_version")]
    pub version: u32,

    /// Input settings.
    #[serde(default)]
    pub input: InputConfig,

    /// Alert limits.
    #[serde(default)]
    pub thresholds: Thresholds,

    /// Workload comparison size.
    #[serde(default)]
    pub workload: WorkloadConfig,
}

fn default_version() -> u32 {
    1
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            input: InputConfig::default(),
            thresholds: Thresholds::default(),
            workload: WorkloadConfig::default(),
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Per-user config location, `<config dir>/fleet-telemetry/config.yaml`.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("fleet-telemetry").join("config.yaml"))
    }

    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .map_err(|_| FleetError::ConfigNotFound(path.display().to_string()))?;

        Self::parse(&content)
    }

    /// Parses configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error with line number if parsing fails.
    pub fn parse(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml_ng::from_str(yaml).map_err(|e| {
            let line = e.location().map_or(0, |l| l.line());
            FleetError::ConfigParse { line, message: e.to_string() }
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration with fallback to defaults.
    ///
    /// A file that exists but fails to load is reported with `warn!` before
    /// the defaults are used.
    #[must_use]
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            return Self::default();
        }
        Self::load(path).unwrap_or_else(|e| {
            log::warn!("ignoring config {}: {e}", path.display());
            Self::default()
        })
    }

    /// Resolves the configuration the binaries start from.
    ///
    /// An explicit path must load. Otherwise the per-user file is used when
    /// present and valid, and the defaults when not.
    ///
    /// # Errors
    ///
    /// Returns an error only when `explicit` cannot be loaded.
    pub fn load_user(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None => Ok(Self::default_path().map(Self::load_or_default).unwrap_or_default()),
        }
    }

    /// Applies command-line input settings over the file values.
    ///
    /// A profile given without a policy drops any policy from the file, so
    /// the new profile brings its own default.
    pub fn apply_overrides(&mut self, profile: Option<FormatProfile>, policy: Option<FormatErrorPolicy>) {
        if let Some(profile) = profile {
            self.input.profile = profile;
            if policy.is_none() {
                self.input.on_format_error = None;
            }
        }
        if let Some(policy) = policy {
            self.input.on_format_error = Some(policy);
        }
    }

    /// Checks value ranges that YAML typing cannot express.
    pub fn validate(&self) -> Result<()> {
        for (key, value) in [
            ("thresholds.overheat_celsius", self.thresholds.overheat_celsius),
            ("thresholds.low_fuel_percent", self.thresholds.low_fuel_percent),
        ] {
            if !value.is_finite() {
                return Err(FleetError::ConfigInvalid {
                    key: key.to_string(),
                    message: "must be a finite number".to_string(),
                });
            }
        }
        self.workload.validate()
    }
}
