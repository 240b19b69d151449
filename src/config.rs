use crate::api::DEFAULT_API_BASE;
use color_eyre::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 2;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub recording: RecordingConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Admin API base, e.g. http://localhost:8080/api
    pub api_base_url: Option<String>,
    /// Where the mock runtime answers stubbed requests
    pub mock_server_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordingConfig {
    pub poll_interval_secs: u64,
}

impl Default for RecordingConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    pub directory: Option<PathBuf>,
}

impl Config {
    /// ~/.config/wiremock-tui, created on first use
    pub fn config_dir() -> Result<PathBuf> {
        // Use ~/.config instead of platform-specific directory
        let home_dir = dirs::home_dir()
            .ok_or_else(|| color_eyre::eyre::eyre!("Could not find home directory"))?;

        let app_dir = home_dir.join(".config").join("wiremock-tui");
        if !app_dir.exists() {
            fs::create_dir_all(&app_dir)?;
        }

        Ok(app_dir)
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load config from file, or return default if file doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let toml_string = toml::to_string_pretty(self)?;
        fs::write(path, toml_string)?;
        Ok(())
    }

    pub fn api_base_url(&self) -> String {
        self.server
            .api_base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
    }

    /// Falls back to the origin of the admin API
    pub fn mock_server_url(&self) -> String {
        self.server
            .mock_server_url
            .clone()
            .unwrap_or_else(|| extract_origin(&self.api_base_url()))
    }

    pub fn poll_interval_secs(&self) -> u64 {
        self.recording.poll_interval_secs.max(1)
    }

    /// Configured directory, else the current directory
    pub fn export_dir(&self) -> PathBuf {
        self.export
            .directory
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Editable values in settings-page order: admin API, mock server, poll
    /// interval, export directory
    pub fn settings_values(&self) -> [String; 4] {
        [
            self.api_base_url(),
            self.server.mock_server_url.clone().unwrap_or_default(),
            self.poll_interval_secs().to_string(),
            self.export
                .directory
                .as_ref()
                .map(|dir| dir.display().to_string())
                .unwrap_or_default(),
        ]
    }

    /// Copy of this config with the settings-page values applied.
    /// Empty optional values fall back to their defaults.
    pub fn with_settings(&self, values: &[String; 4]) -> Result<Config, String> {
        let [api_base, mock_server, interval, directory] = values.each_ref().map(|v| v.trim());

        validate_url(api_base).map_err(|e| format!("Admin API URL: {e}"))?;
        if !mock_server.is_empty() {
            validate_url(mock_server).map_err(|e| format!("Mock server URL: {e}"))?;
        }
        let poll_interval_secs = match interval.parse::<u64>() {
            Ok(secs) if secs >= 1 => secs,
            _ => return Err("Poll interval must be a whole number of seconds, at least 1".into()),
        };

        let mut config = self.clone();
        config.server.api_base_url = Some(api_base.to_string());
        config.server.mock_server_url = Some(mock_server.to_string()).filter(|s| !s.is_empty());
        config.recording.poll_interval_secs = poll_interval_secs;
        config.export.directory = if directory.is_empty() {
            None
        } else {
            Some(PathBuf::from(directory))
        };
        Ok(config)
    }
}

/// Simple URL validation
pub fn validate_url(url: &str) -> Result<(), String> {
    if url.is_empty() {
        return Err("URL cannot be empty".to_string());
    }

    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err("URL must start with http:// or https://".to_string());
    }

    url::Url::parse(url).map_err(|_| "Invalid URL format".to_string())?;
    Ok(())
}

/// Scheme, host and port of a URL
/// Example: http://localhost:8080/api -> http://localhost:8080
pub fn extract_origin(url: &str) -> String {
    if let Ok(parsed) = url::Url::parse(url) {
        let scheme = parsed.scheme();
        let host = parsed.host_str().unwrap_or("localhost");

        if let Some(port) = parsed.port() {
            format!("{scheme}://{host}:{port}")
        } else {
            format!("{scheme}://{host}")
        }
    } else {
        url.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api_base_url(), "http://localhost:8080/api");
        assert_eq!(config.mock_server_url(), "http://localhost:8080");
        assert_eq!(config.poll_interval_secs(), 2);
        assert_eq!(config.export_dir(), PathBuf::from("."));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.server.api_base_url = Some("http://wiremock:9000/api".to_string());
        config.recording.poll_interval_secs = 5;
        config.export.directory = Some(dir.path().to_path_buf());
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.mock_server_url(), "http://wiremock:9000");
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = Config::load_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[server]\nmock_server_url = \"http://mock:8081\"\n").unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.mock_server_url(), "http://mock:8081");
        assert_eq!(loaded.poll_interval_secs(), 2);
    }

    #[test]
    fn test_validate_url() {
        assert!(validate_url("").is_err());
        assert!(validate_url("localhost:8080").is_err());
        assert!(validate_url("https://").is_err());
        assert!(validate_url("http://localhost:8080/api").is_ok());
    }

    #[test]
    fn test_with_settings_applies_values() {
        let values = [
            "http://wiremock:9000/api".to_string(),
            String::new(),
            "5".to_string(),
            "/tmp/exports".to_string(),
        ];
        let config = Config::default().with_settings(&values).unwrap();
        assert_eq!(config.api_base_url(), "http://wiremock:9000/api");
        assert_eq!(config.mock_server_url(), "http://wiremock:9000");
        assert_eq!(config.poll_interval_secs(), 5);
        assert_eq!(config.export_dir(), PathBuf::from("/tmp/exports"));
        assert_eq!(config.settings_values(), values);
    }

    #[test]
    fn test_with_settings_rejects_bad_values() {
        let mut values = Config::default().settings_values();
        values[2] = "0".to_string();
        assert!(Config::default().with_settings(&values).is_err());

        let mut values = Config::default().settings_values();
        values[1] = "mock:8081".to_string();
        let err = Config::default().with_settings(&values).unwrap_err();
        assert!(err.starts_with("Mock server URL"));
    }
}
