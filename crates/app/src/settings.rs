//! Launch settings from the environment.
//!
//! | variable         | meaning                                        |
//! |------------------|------------------------------------------------|
//! | `GARDEN_CONFIG`  | path to a JSON `GardenConfig` override         |
//! | `GARDEN_FEED_DIR`| directory of `<user>.json` goal files          |
//! | `GARDEN_USER`    | user id to fetch (default `demo`)              |
//! | `GARDEN_SEED`    | session seed for grass; random when unset      |

use std::fmt;
use std::path::PathBuf;

use garden::config::{ConfigError, GardenConfig};

pub const DEFAULT_USER: &str = "demo";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Settings {
    pub config_path: Option<PathBuf>,
    pub feed_dir: Option<PathBuf>,
    pub user_id: String,
    pub seed: Option<u64>,
}

#[derive(Debug)]
pub enum SettingsError {
    BadSeed(String),
    Io(std::io::Error),
    Config(ConfigError),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::BadSeed(raw) => write!(f, "GARDEN_SEED is not a u64: '{raw}'"),
            SettingsError::Io(e) => write!(f, "cannot read config file: {e}"),
            SettingsError::Config(e) => write!(f, "invalid config: {e}"),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io(e) => Some(e),
            SettingsError::Config(e) => Some(e),
            SettingsError::BadSeed(_) => None,
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        SettingsError::Io(e)
    }
}

impl From<ConfigError> for SettingsError {
    fn from(e: ConfigError) -> Self {
        SettingsError::Config(e)
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SettingsError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let seed = match get("GARDEN_SEED") {
            Some(raw) => Some(
                raw.trim()
                    .parse::<u64>()
                    .map_err(|_| SettingsError::BadSeed(raw.clone()))?,
            ),
            None => None,
        };
        Ok(Self {
            config_path: get("GARDEN_CONFIG").map(PathBuf::from),
            feed_dir: get("GARDEN_FEED_DIR").map(PathBuf::from),
            user_id: get("GARDEN_USER").unwrap_or_else(|| DEFAULT_USER.to_string()),
            seed,
        })
    }

    /// The configured `GardenConfig`, or defaults when no path is set.
    pub fn load_config(&self) -> Result<GardenConfig, SettingsError> {
        match &self.config_path {
            Some(path) => {
                let text = std::fs::read_to_string(path)?;
                Ok(GardenConfig::from_json(&text)?)
            }
            None => Ok(GardenConfig::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let settings = Settings::from_lookup(lookup(&[])).expect("settings");
        assert_eq!(settings.user_id, DEFAULT_USER);
        assert_eq!(settings.seed, None);
        assert!(settings.feed_dir.is_none());
        assert_eq!(
            settings.load_config().expect("default config"),
            GardenConfig::default()
        );
    }

    #[test]
    fn test_reads_all_variables() {
        let settings = Settings::from_lookup(lookup(&[
            ("GARDEN_USER", "alice"),
            ("GARDEN_SEED", " 99 "),
            ("GARDEN_FEED_DIR", "/srv/goals"),
            ("GARDEN_CONFIG", "/etc/garden.json"),
        ]))
        .expect("settings");
        assert_eq!(settings.user_id, "alice");
        assert_eq!(settings.seed, Some(99));
        assert_eq!(settings.feed_dir, Some(PathBuf::from("/srv/goals")));
        assert_eq!(settings.config_path, Some(PathBuf::from("/etc/garden.json")));
    }

    #[test]
    fn test_blank_values_are_unset() {
        let settings = Settings::from_lookup(lookup(&[("GARDEN_USER", "  ")])).expect("settings");
        assert_eq!(settings.user_id, DEFAULT_USER);
    }

    #[test]
    fn test_bad_seed_is_error() {
        let err = Settings::from_lookup(lookup(&[("GARDEN_SEED", "soon")])).unwrap_err();
        assert!(matches!(err, SettingsError::BadSeed(_)));
        assert!(err.to_string().contains("soon"));
    }

    #[test]
    fn test_missing_config_file_is_io_error() {
        let settings = Settings {
            config_path: Some(PathBuf::from("/definitely/not/here.json")),
            ..Settings::default()
        };
        assert!(matches!(settings.load_config(), Err(SettingsError::Io(_))));
    }
}
