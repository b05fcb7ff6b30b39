//! Configuration management for Tilawa.
//!
//! Configuration is read from `~/.config/tilawa/config.toml` at startup.
//! If the file doesn't exist, a default configuration with comments is created.

pub mod api;

pub use api::ApiConfig;

use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

use crate::domain::hadith::DEFAULT_PAGE_SIZE;
use crate::domain::{Coordinates, Location};

/// Main configuration struct.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub fetcher: FetcherConfig,
    pub location: LocationConfig,
    pub prayer: PrayerConfig,
    pub reader: ReaderConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetcherConfig {
    /// Request timeout in seconds (default: 10)
    pub timeout_secs: u64,
    /// Maximum concurrent requests for batch lookups (default: 10)
    pub workers: usize,
    pub user_agent: String,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            workers: 10,
            user_agent: concat!("tilawa/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Where prayer times and qibla are computed when no position is available.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LocationConfig {
    pub city: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            city: "Jakarta".to_string(),
            country: "Indonesia".to_string(),
            latitude: -6.2088,
            longitude: 106.8456,
        }
    }
}

impl LocationConfig {
    pub fn to_location(&self) -> Location {
        Location {
            city: self.city.clone(),
            country: self.country.clone(),
            coordinates: Coordinates::new(self.latitude, self.longitude),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PrayerConfig {
    /// Calculation method id understood by the prayer-time API (11: Majlis Ugama Islam Singapura)
    pub method: u32,
}

impl Default for PrayerConfig {
    fn default() -> Self {
        Self { method: 11 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReaderConfig {
    /// Reciter key used to pick audio references ("01".."06")
    pub reciter: String,
    pub hadith_page_size: u32,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            reciter: "05".to_string(),
            hadith_page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, creates a default one with comments.
    /// If the config file exists but is invalid, returns an error.
    /// Missing fields in the config file will use default values.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::default_config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
            return Ok(Self::default());
        }

        Self::load_from(config_path)
    }

    pub fn load_from(config_path: PathBuf) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(&config_path).map_err(|e| ConfigError::Io {
            path: config_path.clone(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: config_path,
            source: e,
        })?;

        Ok(config)
    }

    /// Get the default config file path: `~/.config/tilawa/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("tilawa").join("config.toml"))
    }

    /// Create a default config file with comments.
    fn create_default_config(path: &PathBuf) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.clone(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.clone(),
                source: e,
            })?;

        Ok(())
    }

    /// Generate the default config file content with comments.
    fn default_config_content() -> String {
        r##"# Tilawa Configuration

[api]
# Surah list, surah detail and tafsir (equran.id v2 layout)
quran_base = "https://equran.id/api/v2"
# Hadith books and ranges
hadith_base = "https://api.hadith.gading.dev"
# Prayer times and qibla bearing
aladhan_base = "https://api.aladhan.com/v1"
# Full-text verse search and the edition searched
search_base = "https://api.alquran.cloud/v1"
search_edition = "id.indonesian"
# Daily prayers list (JSON array)
doa_url = "https://open-api.my.id/api/doa"

[fetcher]
timeout_secs = 10
workers = 10

[location]
# Used when no coordinates are given on the command line
city = "Jakarta"
country = "Indonesia"
latitude = -6.2088
longitude = 106.8456

[prayer]
# Calculation method id (see https://aladhan.com/calculation-methods)
method = 11

[reader]
# Reciter for audio: 01 Abdullah Al-Juhany, 02 Abdul Muhsin Al-Qasim,
# 03 Abdurrahman as-Sudais, 04 Ibrahim Al-Dossari, 05 Misyari Rasyid Al-Afasi,
# 06 Yasser Al-Dosari
reciter = "05"
hadith_page_size = 20
"##
        .to_string()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_deserializes() {
        let content = Config::default_config_content();
        let config: Config = toml::from_str(&content).expect("Default config should be valid TOML");

        assert_eq!(config.api.quran_base, "https://equran.id/api/v2");
        assert_eq!(config.location.city, "Jakarta");
        assert_eq!(config.prayer.method, 11);
        assert_eq!(config.reader.reciter, "05");
        assert_eq!(config.reader.hadith_page_size, 20);
    }

    #[test]
    fn test_partial_config() {
        let content = r##"
[location]
city = "Makassar"
latitude = -5.1477
longitude = 119.4327
"##;
        let config: Config = toml::from_str(content).expect("Partial config should work");

        assert_eq!(config.location.city, "Makassar");
        // Untouched fields keep their defaults
        assert_eq!(config.location.country, "Indonesia");
        assert_eq!(config.fetcher.timeout_secs, 10);
    }

    #[test]
    fn test_empty_config() {
        let config: Config = toml::from_str("").expect("Empty config should work");

        assert_eq!(config.api.hadith_base, "https://api.hadith.gading.dev");
        assert_eq!(
            config.location.to_location().coordinates,
            Coordinates::new(-6.2088, 106.8456)
        );
    }

    #[test]
    fn test_load_from_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[prayer]\nmethod = \"eleven\"\n").unwrap();

        assert!(matches!(
            Config::load_from(path),
            Err(ConfigError::Parse { .. })
        ));
    }
}
