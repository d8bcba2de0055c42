//! Runtime configuration read from environment variables.
//!
//! | Variable | Default | Meaning |
//! |---|---|---|
//! | `EOS_LOG_MODE` | `auto` | `auto`, `file` or `stdout` |
//! | `EOS_LOG_FILE` | `eoscalc.log` | log file used in file mode |
//! | `EOS_BASELINE_INCIDENCE` | `0.8` | starting EOS incidence per 1000 births |
//!
//! Log filtering itself uses the standard `RUST_LOG` directives.

use std::path::PathBuf;

use crate::domain::{ClinicalInputs, InputField};
use crate::EosError;

/// Where log output goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogMode {
    /// File when stdout is an interactive terminal, stdout otherwise
    Auto,
    File,
    Stdout,
}

impl std::str::FromStr for LogMode {
    type Err = EosError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "file" => Ok(Self::File),
            "stdout" => Ok(Self::Stdout),
            other => Err(EosError::Config(format!(
                "EOS_LOG_MODE must be auto, file or stdout (got {other:?})"
            ))),
        }
    }
}

impl LogMode {
    /// Resolve `Auto` against whether stdout is a terminal.
    #[must_use]
    pub fn use_file(&self, interactive: bool) -> bool {
        match self {
            Self::File => true,
            Self::Stdout => false,
            Self::Auto => interactive,
        }
    }
}

/// Application settings.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub log_mode: LogMode,
    pub log_file: PathBuf,
    /// Starting EOS incidence, already snapped to the slider grid
    pub baseline_incidence: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_mode: LogMode::Auto,
            log_file: PathBuf::from("eoscalc.log"),
            baseline_incidence: ClinicalInputs::default().eos_incidence,
        }
    }
}

impl AppConfig {
    /// Read settings from the process environment.
    ///
    /// # Errors
    /// Returns `EosError::Config` if a variable is set to an invalid value.
    pub fn from_env() -> crate::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through an arbitrary variable lookup.
    ///
    /// # Errors
    /// Returns `EosError::Config` if a variable is set to an invalid value.
    pub fn from_lookup<F>(lookup: F) -> crate::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(mode) = lookup("EOS_LOG_MODE") {
            config.log_mode = mode.parse()?;
        }

        if let Some(path) = lookup("EOS_LOG_FILE").filter(|p| !p.trim().is_empty()) {
            config.log_file = PathBuf::from(path.trim());
        }

        if let Some(raw) = lookup("EOS_BASELINE_INCIDENCE") {
            config.baseline_incidence = parse_incidence(&raw)?;
        }

        Ok(config)
    }

    /// Inputs a new session starts from.
    #[must_use]
    pub fn initial_inputs(&self) -> ClinicalInputs {
        ClinicalInputs {
            eos_incidence: self.baseline_incidence,
            ..Default::default()
        }
    }
}

fn parse_incidence(raw: &str) -> crate::Result<f64> {
    let bounds = InputField::EosIncidence
        .bounds()
        .ok_or_else(|| EosError::Config("EOS incidence has no slider bounds".to_string()))?;

    let value: f64 = raw.trim().parse().map_err(|_| {
        EosError::Config(format!("EOS_BASELINE_INCIDENCE is not a number (got {raw:?})"))
    })?;

    if !bounds.contains(value) {
        return Err(EosError::Config(format!(
            "EOS_BASELINE_INCIDENCE {value} out of range [{}, {}]",
            bounds.min, bounds.max
        )));
    }

    Ok(bounds.snap(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> crate::Result<AppConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = config_from(&[]).expect("Should load");
        assert_eq!(config.log_mode, LogMode::Auto);
        assert_eq!(config.log_file, PathBuf::from("eoscalc.log"));
        assert_eq!(config.baseline_incidence, 0.8);
        assert_eq!(config.initial_inputs(), ClinicalInputs::default());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("EOS_LOG_MODE", "STDOUT"),
            ("EOS_LOG_FILE", "/tmp/eos.log"),
            ("EOS_BASELINE_INCIDENCE", "0.34"),
        ])
        .expect("Should load");
        assert_eq!(config.log_mode, LogMode::Stdout);
        assert_eq!(config.log_file, PathBuf::from("/tmp/eos.log"));
        assert_eq!(config.baseline_incidence, 0.3);
        assert_eq!(config.initial_inputs().eos_incidence, 0.3);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(matches!(
            config_from(&[("EOS_LOG_MODE", "syslog")]),
            Err(EosError::Config(_))
        ));
        assert!(matches!(
            config_from(&[("EOS_BASELINE_INCIDENCE", "abc")]),
            Err(EosError::Config(_))
        ));
        assert!(matches!(
            config_from(&[("EOS_BASELINE_INCIDENCE", "2.5")]),
            Err(EosError::Config(_))
        ));
    }

    #[test]
    fn test_auto_mode_follows_terminal() {
        assert!(LogMode::Auto.use_file(true));
        assert!(!LogMode::Auto.use_file(false));
        assert!(LogMode::File.use_file(false));
        assert!(!LogMode::Stdout.use_file(true));
    }
}
