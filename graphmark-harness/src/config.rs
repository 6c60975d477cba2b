//! Configuration Loading from graphmark.toml
//!
//! Sweep and validation settings can live in a `graphmark.toml` file,
//! discovered by walking up from the current directory. Every field has
//! a default matching the original benchmark tooling; command-line
//! flags override whatever the file provides.

use crate::oracle::DEFAULT_TOLERANCE;
use crate::schedule::DEFAULT_MAX_SCHEDULE_LEN;
use crate::session::SessionOptions;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors from configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("cannot read config: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid TOML for this schema.
    #[error("cannot parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level harness configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HarnessConfig {
    /// Sweep shape: trials, thread list, variant and sort selections.
    #[serde(default)]
    pub sweep: SweepConfig,
    /// Oracle settings.
    #[serde(default)]
    pub validate: ValidateConfig,
}

/// Sweep configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepConfig {
    /// Timed trials per configuration.
    #[serde(default = "default_trials")]
    pub trials: usize,
    /// Explicit thread list; empty or leading 0 means auto-halving,
    /// a non-leading 0 delegates that slot to the accelerator.
    #[serde(default)]
    pub threads: Vec<u32>,
    /// Cap on the auto-generated schedule length.
    #[serde(default = "default_max_schedule_len")]
    pub max_schedule_len: usize,
    /// Variant names to sweep; empty means the kernel's full set.
    #[serde(default)]
    pub variants: Vec<String>,
    /// Sort policy names to sweep; empty means `none`.
    #[serde(default)]
    pub sort_policies: Vec<String>,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            trials: default_trials(),
            threads: Vec::new(),
            max_schedule_len: default_max_schedule_len(),
            variants: Vec::new(),
            sort_policies: Vec::new(),
        }
    }
}

fn default_trials() -> usize {
    3
}
fn default_max_schedule_len() -> usize {
    DEFAULT_MAX_SCHEDULE_LEN
}

/// Oracle configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateConfig {
    /// Absolute-error tolerance for the warmup validation.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    /// Treat a validation mismatch as fatal instead of diagnostic.
    #[serde(default)]
    pub strict: bool,
}

impl Default for ValidateConfig {
    fn default() -> Self {
        Self {
            tolerance: default_tolerance(),
            strict: false,
        }
    }
}

fn default_tolerance() -> f64 {
    DEFAULT_TOLERANCE
}

impl HarnessConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Ok(toml::from_str(&content)?)
    }

    /// Discover `graphmark.toml` by walking up from the current directory.
    pub fn discover() -> Option<Self> {
        let mut dir = std::env::current_dir().ok()?;
        loop {
            let path = dir.join("graphmark.toml");
            if path.exists() {
                return Self::load(&path).ok();
            }
            if !dir.pop() {
                break;
            }
        }
        None
    }

    /// Session options implied by this configuration.
    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            trials: self.sweep.trials,
            tolerance: self.validate.tolerance,
            strict_validation: self.validate.strict,
            max_schedule_len: self.sweep.max_schedule_len,
            explicit_threads: self.sweep.threads.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_original_tooling() {
        let config = HarnessConfig::default();
        assert_eq!(config.sweep.trials, 3);
        assert_eq!(config.sweep.max_schedule_len, 7);
        assert!(config.sweep.threads.is_empty());
        assert!((config.validate.tolerance - 1e-6).abs() < f64::EPSILON);
        assert!(!config.validate.strict);
    }

    #[test]
    fn parses_partial_toml() {
        let toml_str = r#"
            [sweep]
            trials = 5
            threads = [40, 0]

            [validate]
            strict = true
        "#;
        let config: HarnessConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.sweep.trials, 5);
        assert_eq!(config.sweep.threads, vec![40, 0]);
        assert!(config.validate.strict);
        // defaults still apply
        assert_eq!(config.sweep.max_schedule_len, 7);
        assert!((config.validate.tolerance - 1e-6).abs() < f64::EPSILON);
    }

    #[test]
    fn session_options_carry_through() {
        let toml_str = r#"
            [sweep]
            trials = 7
            max_schedule_len = 2
        "#;
        let config: HarnessConfig = toml::from_str(toml_str).unwrap();
        let options = config.session_options();
        assert_eq!(options.trials, 7);
        assert_eq!(options.max_schedule_len, 2);
    }
}
