//! TOML configuration: observer location, data directory and scan windows.
//!
//! Every section is optional; the default observer is Gaya, Bihar.
//!
//! ```toml
//! [observer]
//! name = "Gaya, Bihar"
//! latitude_deg = 24.7914
//! longitude_deg = 85.0002
//! altitude_m = 111.0
//!
//! [store]
//! data_dir = "~/.local/share/uposatha"
//!
//! [search]
//! max_forward_days = 30
//! backfill_days = 45
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;
use uposatha_vedic::GeoLocation;

/// Errors from loading or validating configuration.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config value: {0}")]
    Invalid(&'static str),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UposathaConfig {
    pub observer: ObserverConfig,
    pub store: StoreConfig,
    pub search: SearchConfig,
}

/// Where the observer stands; sunrise and tithi depend on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObserverConfig {
    pub name: String,
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    pub altitude_m: f64,
}

impl Default for ObserverConfig {
    fn default() -> Self {
        Self {
            name: "Gaya, Bihar".to_string(),
            latitude_deg: 24.7914,
            longitude_deg: 85.0002,
            altitude_m: 111.0,
        }
    }
}

impl ObserverConfig {
    pub fn location(&self) -> GeoLocation {
        GeoLocation::new(self.latitude_deg, self.longitude_deg, self.altitude_m)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Record directory; a leading `~` expands to the home directory.
    pub data_dir: Option<PathBuf>,
}

/// Platform data directory for records, e.g. `~/.local/share/uposatha` on
/// Linux or `~/Library/Application Support/uposatha` on macOS.
pub fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("uposatha")
}

fn expand_home(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}

impl StoreConfig {
    /// Configured directory (home-expanded), else [`default_data_dir`].
    pub fn resolved_data_dir(&self) -> PathBuf {
        match &self.data_dir {
            Some(dir) => expand_home(dir),
            None => default_data_dir(),
        }
    }
}

/// Scan bounds, in days.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub max_forward_days: u32,
    pub backfill_days: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_forward_days: 30,
            backfill_days: 45,
        }
    }
}

impl UposathaConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&raw)?;
        debug!(path = %path.display(), observer = %config.observer.name, "config loaded");
        Ok(config)
    }

    /// Load `path` when given; otherwise the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let o = &self.observer;
        if !(-90.0..=90.0).contains(&o.latitude_deg) {
            return Err(ConfigError::Invalid("observer.latitude_deg must be in [-90, 90]"));
        }
        if !(-180.0..=180.0).contains(&o.longitude_deg) {
            return Err(ConfigError::Invalid("observer.longitude_deg must be in [-180, 180]"));
        }
        if !o.altitude_m.is_finite() {
            return Err(ConfigError::Invalid("observer.altitude_m must be finite"));
        }
        if self.search.max_forward_days == 0 {
            return Err(ConfigError::Invalid("search.max_forward_days must be > 0"));
        }
        if self.search.backfill_days == 0 {
            return Err(ConfigError::Invalid("search.backfill_days must be > 0"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_default() {
        let c = UposathaConfig::from_toml_str("").unwrap();
        assert_eq!(c, UposathaConfig::default());
        assert_eq!(c.observer.name, "Gaya, Bihar");
        assert_eq!(c.search.backfill_days, 45);
    }

    #[test]
    fn partial_sections_keep_defaults() {
        let c = UposathaConfig::from_toml_str(
            "[observer]\nname = \"Colombo\"\nlatitude_deg = 6.93\nlongitude_deg = 79.85\n\n[search]\nbackfill_days = 60\n",
        )
        .unwrap();
        assert_eq!(c.observer.name, "Colombo");
        assert_eq!(c.observer.altitude_m, 111.0);
        assert_eq!(c.search.max_forward_days, 30);
        assert_eq!(c.search.backfill_days, 60);
        let loc = c.observer.location();
        assert_eq!(loc.latitude_deg, 6.93);
    }

    #[test]
    fn rejects_out_of_range_values() {
        let err = UposathaConfig::from_toml_str("[observer]\nlatitude_deg = 91.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        let err = UposathaConfig::from_toml_str("[search]\nbackfill_days = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        let err = UposathaConfig::from_toml_str("[observer\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("uposatha.toml");
        std::fs::write(&path, "[store]\ndata_dir = \"/srv/uposatha\"\n").unwrap();
        let c = UposathaConfig::load_or_default(Some(&path)).unwrap();
        assert_eq!(c.store.resolved_data_dir(), PathBuf::from("/srv/uposatha"));

        let missing = UposathaConfig::load(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(missing, ConfigError::Io { .. }));
        assert!(UposathaConfig::load_or_default(None).is_ok());
    }

    #[test]
    fn data_dir_uses_platform_locations() {
        let unset = StoreConfig::default();
        assert_eq!(unset.resolved_data_dir(), default_data_dir());
        assert!(default_data_dir().ends_with("uposatha"));
        if let Some(local) = dirs::data_local_dir() {
            assert_eq!(default_data_dir(), local.join("uposatha"));
        }

        let tilde = StoreConfig {
            data_dir: Some(PathBuf::from("~/observances")),
        };
        match dirs::home_dir() {
            Some(home) => assert_eq!(tilde.resolved_data_dir(), home.join("observances")),
            None => assert_eq!(tilde.resolved_data_dir(), PathBuf::from("~/observances")),
        }
    }
}
