//! Cadence configuration.
//!
//! Loaded from `~/.cadence/config.toml`. Every key is optional and the
//! file itself may be absent; defaults keep the tool usable from the
//! first run.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Monthly lead target used when the config doesn't set one.
pub const DEFAULT_MONTHLY_TARGET: u32 = 4500;

/// Cadence configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    /// The default profile for commands that don't pass `--profile`.
    pub profile: Option<String>,

    /// How many new leads a month counts as on target.
    pub monthly_target: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            profile: None,
            monthly_target: DEFAULT_MONTHLY_TARGET,
        }
    }
}

impl Config {
    /// Load config from `~/.cadence/config.toml`, falling back to defaults
    /// when the file doesn't exist.
    pub fn load() -> Result<Self, String> {
        let Some(path) = Self::path() else {
            return Ok(Self::default());
        };

        let contents = match fs::read_to_string(&path) {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(format!("failed to read {}: {e}", path.display())),
        };

        toml::from_str(&contents).map_err(|e| format!("invalid config at {}: {e}", path.display()))
    }

    /// The config file path: `~/.cadence/config.toml`.
    pub fn path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".cadence").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_keys() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.profile, None);
        assert_eq!(config.monthly_target, DEFAULT_MONTHLY_TARGET);
    }

    #[test]
    fn parses_all_keys() {
        let config: Config = toml::from_str(
            "profile = \"trainers\"\n\
             monthly-target = 600\n",
        )
        .unwrap();
        assert_eq!(config.profile.as_deref(), Some("trainers"));
        assert_eq!(config.monthly_target, 600);
    }
}
