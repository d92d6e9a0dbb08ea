/// User configuration
///
/// Read from `config.toml` in the user's config directory:
/// - Linux: ~/.config/wallpapers/config.toml
/// - macOS: ~/Library/Application Support/wallpapers/config.toml
/// - Windows: %APPDATA%\wallpapers\config.toml
///
/// Every key is optional. A missing file means defaults.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Environment variable that overrides `api.client_id`
pub const CLIENT_ID_ENV: &str = "WALLPAPERS_CLIENT_ID";

/// The photo API refuses batches larger than this
pub const MAX_BATCH: u8 = 30;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub library: LibraryConfig,
    pub share: ShareConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ApiConfig {
    /// Root of the photo API, without a trailing slash
    pub base_url: String,
    /// Static application identifier sent with every request
    pub client_id: Option<String>,
    /// Photos per batch
    pub count: u8,
    /// Whole-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.unsplash.com".to_string(),
            client_id: None,
            count: MAX_BATCH,
            timeout_secs: 30,
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct LibraryConfig {
    /// Where downloads land before they are added to the library
    pub download_dir: Option<PathBuf>,
    /// The photo library itself
    pub library_dir: Option<PathBuf>,
    /// When false, saving never prompts
    pub ask_permission: bool,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            download_dir: None,
            library_dir: None,
            ask_permission: true,
        }
    }
}

impl LibraryConfig {
    /// Download directory, defaulting to ~/.cache/wallpapers/downloads on Linux
    pub fn download_dir(&self) -> PathBuf {
        self.download_dir.clone().unwrap_or_else(|| {
            let mut path = dirs::cache_dir().unwrap_or_else(std::env::temp_dir);
            path.push("wallpapers");
            path.push("downloads");
            path
        })
    }

    /// Library directory, defaulting to ~/Pictures/Wallpapers
    ///
    /// None when the platform reports neither a pictures nor a home directory.
    pub fn library_dir(&self) -> Option<PathBuf> {
        self.library_dir.clone().or_else(|| {
            dirs::picture_dir()
                .or_else(|| dirs::home_dir().map(|home| home.join("Pictures")))
                .map(|pictures| pictures.join("Wallpapers"))
        })
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ShareConfig {
    /// Text placed before the full-size URL
    pub message_prefix: String,
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            message_prefix: "Checkout this wallpaper ".to_string(),
        }
    }
}

impl Config {
    /// Path of the configuration file
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("wallpapers").join("config.toml")
    }

    /// Load from the default path, then apply the environment override
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::load_from(&Self::config_path())?;
        config.apply_client_id_override(std::env::var(CLIENT_ID_ENV).ok());
        Ok(config)
    }

    /// Like `load`, but falls back to defaults (plus the environment
    /// override) after logging whatever went wrong
    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("⚠️  {}, using defaults", e);
                let mut config = Self::default();
                config.apply_client_id_override(std::env::var(CLIENT_ID_ENV).ok());
                config
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// A non-empty value replaces the configured client id
    pub fn apply_client_id_override(&mut self, value: Option<String>) {
        if let Some(id) = value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
            self.api.client_id = Some(id);
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api.count == 0 || self.api.count > MAX_BATCH {
            return Err(ConfigError::Invalid(format!(
                "api.count must be between 1 and {}, got {}",
                MAX_BATCH, self.api.count
            )));
        }
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "api.timeout_secs must be greater than zero".to_string(),
            ));
        }
        if !self.api.base_url.starts_with("http://") && !self.api.base_url.starts_with("https://") {
            return Err(ConfigError::Invalid(format!(
                "api.base_url must be an http(s) URL, got '{}'",
                self.api.base_url
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();

        assert_eq!(config.api.count, 30);
        assert_eq!(config.api.base_url, "https://api.unsplash.com");
        assert!(config.api.client_id.is_none());
        assert!(config.library.ask_permission);
        assert_eq!(config.share.message_prefix, "Checkout this wallpaper ");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(
            file,
            "[api]\nclient_id = \"abc\"\ncount = 10\n\n[library]\nask_permission = false"
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();

        assert_eq!(config.api.client_id.as_deref(), Some("abc"));
        assert_eq!(config.api.count, 10);
        assert_eq!(config.api.timeout_secs, 30);
        assert!(!config.library.ask_permission);
        assert_eq!(config.share, ShareConfig::default());
    }

    #[test]
    fn test_parse_error_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[api\ncount = ").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn test_count_out_of_range() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[api]\ncount = 31").unwrap();

        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_client_id_override() {
        let mut config = Config::default();
        config.api.client_id = Some("from-file".to_string());

        config.apply_client_id_override(Some("  ".to_string()));
        assert_eq!(config.api.client_id.as_deref(), Some("from-file"));

        config.apply_client_id_override(None);
        assert_eq!(config.api.client_id.as_deref(), Some("from-file"));

        config.apply_client_id_override(Some("from-env".to_string()));
        assert_eq!(config.api.client_id.as_deref(), Some("from-env"));
    }

    #[test]
    fn test_explicit_dirs_win() {
        let library = LibraryConfig {
            download_dir: Some(PathBuf::from("/tmp/dl")),
            library_dir: Some(PathBuf::from("/tmp/lib")),
            ask_permission: true,
        };

        assert_eq!(library.download_dir(), PathBuf::from("/tmp/dl"));
        assert_eq!(library.library_dir(), Some(PathBuf::from("/tmp/lib")));
    }
}
