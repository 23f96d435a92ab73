use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use serde::Deserialize;

/// License tier of the deployment. Only the enterprise tier supports a
/// business-hour timezone independent from the host machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LicenseTier {
    Community,
    Enterprise,
}

impl LicenseTier {
    pub fn is_enterprise(&self) -> bool {
        matches!(self, LicenseTier::Enterprise)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub database: DatabaseSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
    #[serde(default)]
    pub license: LicenseSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    #[serde(default = "default_database_url")]
    pub url: String,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: default_database_url(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_dir")]
    pub dir: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            dir: default_log_dir(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct LicenseSettings {
    #[serde(default)]
    pub enterprise: bool,
}

impl Settings {
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read config at {}: {}", path.display(), e))?;
        let mut settings: Settings = serde_json::from_str(&data)
            .map_err(|e| anyhow!("Failed to parse config JSON at {}: {}", path.display(), e))?;

        settings.database.url = settings.database.url.trim().to_string();
        if settings.database.url.is_empty() {
            settings.database.url = default_database_url();
        }

        settings.logging.dir = settings.logging.dir.trim().trim_end_matches('/').to_string();
        if settings.logging.dir.is_empty() {
            settings.logging.dir = default_log_dir();
        }

        Ok(settings)
    }

    pub fn load_default() -> Result<(Self, PathBuf)> {
        let path = resolve_config_path();
        let settings = Self::load_from_path(&path)?;
        Ok((settings, path))
    }

    pub fn license_tier(&self) -> LicenseTier {
        if self.license.enterprise {
            LicenseTier::Enterprise
        } else {
            LicenseTier::Community
        }
    }
}

fn default_database_url() -> String {
    "mysql://localhost/livechat".to_string()
}

fn default_log_dir() -> String {
    "/var/log/livechat-business-hours".to_string()
}

pub fn resolve_config_path() -> PathBuf {
    if let Ok(path) = std::env::var("BUSINESS_HOURS_CONFIG_PATH") {
        return expand_path(path);
    }

    default_config_path()
}

fn expand_path(input: String) -> PathBuf {
    if let Some(stripped) = input.strip_prefix("~/") {
        if let Some(home) = home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(input)
}

fn default_config_path() -> PathBuf {
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".livechat")
        .join("business-hours.json")
}

fn home_dir() -> Option<PathBuf> {
    if cfg!(windows) {
        std::env::var_os("USERPROFILE").map(PathBuf::from)
    } else {
        std::env::var_os("HOME").map(PathBuf::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn missing_sections_get_defaults() {
        let file = write_config("{}");
        let settings = Settings::load_from_path(file.path()).unwrap();
        assert_eq!(settings.database.url, "mysql://localhost/livechat");
        assert!(!settings.license.enterprise);
        assert_eq!(settings.license_tier(), LicenseTier::Community);
    }

    #[test]
    fn enterprise_flag_maps_to_tier() {
        let file = write_config(r#"{"license": {"enterprise": true}}"#);
        let settings = Settings::load_from_path(file.path()).unwrap();
        assert_eq!(settings.license_tier(), LicenseTier::Enterprise);
        assert!(settings.license_tier().is_enterprise());
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let file = write_config(r#"{"database": {"url": "  "}, "logging": {"dir": "/tmp/logs/"}}"#);
        let settings = Settings::load_from_path(file.path()).unwrap();
        assert_eq!(settings.database.url, "mysql://localhost/livechat");
        assert_eq!(settings.logging.dir, "/tmp/logs");
    }
}
