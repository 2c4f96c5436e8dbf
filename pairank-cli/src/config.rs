/// Config file loading and creation for the pairank CLI.
///
/// Config lives at ~/.config/pairank/config.toml.
/// All fields are optional — CLI args override config values.
use pairank_core::SessionConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::bail;

#[derive(Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct PairankConfig {
    pub rounds: Option<usize>,
    pub k_factor: Option<f64>,
    pub baseline_rating: Option<f64>,
    pub max_pair_attempts: Option<usize>,
}

impl PairankConfig {
    /// Merge with CLI overrides (CLI wins) on top of the engine defaults.
    pub fn session_config(&self, rounds: Option<usize>, k_factor: Option<f64>) -> SessionConfig {
        let defaults = SessionConfig::default();
        SessionConfig {
            total_rounds: rounds.or(self.rounds).unwrap_or(defaults.total_rounds),
            k_factor: k_factor.or(self.k_factor).unwrap_or(defaults.k_factor),
            baseline_rating: self.baseline_rating.unwrap_or(defaults.baseline_rating),
            max_pair_attempts: self.max_pair_attempts.unwrap_or(defaults.max_pair_attempts),
        }
    }
}

const DEFAULT_CONFIG_TEMPLATE: &str = "\
# pairank configuration
# All values here can be overridden by CLI flags.

# Number of comparisons per session
# rounds = 30

# Rating points exchanged per comparison (Elo K-factor)
# k_factor = 32.0

# Starting rating for every item
# baseline_rating = 1000.0

# Redraws per pair before an already-compared pair may be shown again
# max_pair_attempts = 30
";

/// Returns the default config path: ~/.config/pairank/config.toml
pub fn config_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| bail("HOME environment variable not set"));
    PathBuf::from(home).join(".config").join("pairank").join("config.toml")
}

/// Load config from a file path. Returns default (all None) if file doesn't exist.
pub fn load_config(path: &Path) -> PairankConfig {
    match std::fs::read_to_string(path) {
        Ok(content) => toml::from_str(&content)
            .unwrap_or_else(|e| bail(format!("Failed to parse config at {}: {e}", path.display()))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => PairankConfig::default(),
        Err(e) => bail(format!("Failed to read config at {}: {e}", path.display())),
    }
}

/// Create the default config file. Errors if it already exists.
pub fn create_default_config() -> PathBuf {
    let path = config_path();

    if path.exists() {
        bail(format!("Config file already exists at {}", path.display()));
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .unwrap_or_else(|e| bail(format!("Failed to create directory {}: {e}", parent.display())));
    }

    std::fs::write(&path, DEFAULT_CONFIG_TEMPLATE)
        .unwrap_or_else(|e| bail(format!("Failed to write config to {}: {e}", path.display())));

    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_parses_to_defaults() {
        let cfg: PairankConfig = toml::from_str(DEFAULT_CONFIG_TEMPLATE).unwrap();
        assert_eq!(cfg.session_config(None, None), SessionConfig::default());
    }

    #[test]
    fn test_cli_overrides_file() {
        let cfg: PairankConfig = toml::from_str("rounds = 12\nk_factor = 16.0\nbaseline_rating = 1500.0").unwrap();

        let merged = cfg.session_config(Some(5), None);
        assert_eq!(merged.total_rounds, 5);
        assert_eq!(merged.k_factor, 16.0);
        assert_eq!(merged.baseline_rating, 1500.0);
        assert_eq!(merged.max_pair_attempts, 30);
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(toml::from_str::<PairankConfig>("roundz = 3").is_err());
    }
}
