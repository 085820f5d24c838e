use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::{instrument, trace};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read config file {}: {}", .0.display(), .1)]
    Read(PathBuf, #[source] std::io::Error),

    #[error("Invalid config file {}: {}", .0.display(), .1)]
    Parse(PathBuf, #[source] toml::de::Error),

    #[error("Unknown clipboard backend '{0}' (expected auto, system, osc52 or memory)")]
    InvalidBackend(String),
}

/// Which host capability receives clipboard writes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ClipboardBackend {
    /// OSC 52 inside an SSH session, the desktop clipboard otherwise
    #[default]
    Auto,
    /// Desktop clipboard (wl-copy, xclip, xsel or the native API)
    System,
    /// Terminal escape sequence, for remote shells
    Osc52,
    /// Process memory only, nothing leaves clipwrite
    Memory,
}

impl FromStr for ClipboardBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(ClipboardBackend::Auto),
            "system" => Ok(ClipboardBackend::System),
            "osc52" => Ok(ClipboardBackend::Osc52),
            "memory" => Ok(ClipboardBackend::Memory),
            _ => Err(ConfigError::InvalidBackend(s.to_string())),
        }
    }
}

impl fmt::Display for ClipboardBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ClipboardBackend::Auto => "auto",
            ClipboardBackend::System => "system",
            ClipboardBackend::Osc52 => "osc52",
            ClipboardBackend::Memory => "memory",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Settings {
    /// Clipboard backend (default: "auto")
    #[serde(default)]
    pub backend: ClipboardBackend,
}

fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|p| p.join(".config/clipwrite/config.toml"))
}

fn read_config_file(path: &Path) -> Result<Settings, ConfigError> {
    let text =
        std::fs::read_to_string(path).map_err(|e| ConfigError::Read(path.to_path_buf(), e))?;
    toml::from_str::<Settings>(&text).map_err(|e| ConfigError::Parse(path.to_path_buf(), e))
}

/// Defaults, then the config file, then `CLIPWRITE_BACKEND`.
///
/// An explicit `config_path` must exist; the default location is optional.
#[instrument(level = "debug")]
pub fn load_settings(config_path: Option<&Path>) -> Result<Settings, ConfigError> {
    trace!("Loading settings");

    let mut settings = match config_path {
        Some(path) => read_config_file(path)?,
        None => match default_config_path() {
            Some(path) if path.exists() => {
                trace!("Loading config from: {:?}", path);
                read_config_file(&path)?
            }
            _ => Settings::default(),
        },
    };

    if let Ok(backend) = std::env::var("CLIPWRITE_BACKEND") {
        trace!("Using CLIPWRITE_BACKEND from environment: {}", backend);
        settings.backend = backend.parse()?;
    }

    trace!("Settings loaded: {:?}", settings);
    Ok(settings)
}

pub fn generate_default_config() -> String {
    toml::to_string_pretty(&Settings::default())
        .unwrap_or_else(|_| "# Error generating default configuration".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::testing::EnvGuard;
    use serial_test::serial;
    use std::env;
    use std::fs;
    use tempfile::TempDir;

    fn create_temp_config_file(content: &str) -> (TempDir, PathBuf) {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, content).unwrap();
        (temp_dir, config_path)
    }

    #[test]
    #[serial]
    fn given_no_overrides_when_loading_then_defaults_to_auto() {
        let _guard = EnvGuard::new();
        env::remove_var("CLIPWRITE_BACKEND");

        let (_dir, path) = create_temp_config_file("");
        let settings = load_settings(Some(path.as_path())).unwrap();

        assert_eq!(settings.backend, ClipboardBackend::Auto);
    }

    #[test]
    #[serial]
    fn given_config_file_when_loading_then_uses_file_backend() {
        let _guard = EnvGuard::new();
        env::remove_var("CLIPWRITE_BACKEND");

        let (_dir, path) = create_temp_config_file(r#"backend = "osc52""#);
        let settings = load_settings(Some(path.as_path())).unwrap();

        assert_eq!(settings.backend, ClipboardBackend::Osc52);
    }

    #[test]
    #[serial]
    fn given_env_var_when_loading_then_overrides_config_file() {
        let _guard = EnvGuard::new();
        env::set_var("CLIPWRITE_BACKEND", "Memory");

        let (_dir, path) = create_temp_config_file(r#"backend = "system""#);
        let settings = load_settings(Some(path.as_path())).unwrap();

        assert_eq!(settings.backend, ClipboardBackend::Memory);
    }

    #[test]
    #[serial]
    fn given_unknown_env_backend_when_loading_then_rejected() {
        let _guard = EnvGuard::new();
        env::set_var("CLIPWRITE_BACKEND", "carrier-pigeon");

        let (_dir, path) = create_temp_config_file("");
        let result = load_settings(Some(path.as_path()));

        assert!(matches!(
            result,
            Err(ConfigError::InvalidBackend(name)) if name == "carrier-pigeon"
        ));
    }

    #[test]
    #[serial]
    fn given_missing_explicit_config_when_loading_then_read_error() {
        let _guard = EnvGuard::new();
        env::remove_var("CLIPWRITE_BACKEND");

        let temp_dir = tempfile::tempdir().unwrap();
        let missing = temp_dir.path().join("absent.toml");
        let result = load_settings(Some(missing.as_path()));

        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::Read(_, _)));
        assert!(err.to_string().starts_with("Cannot read config file "));
        assert!(err.to_string().contains("absent.toml"));
    }

    #[test]
    #[serial]
    fn given_malformed_config_when_loading_then_parse_error() {
        let _guard = EnvGuard::new();
        env::remove_var("CLIPWRITE_BACKEND");

        let (_dir, path) = create_temp_config_file(r#"backend = "clipboard-of-doom""#);
        let result = load_settings(Some(path.as_path()));

        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_, _)));
        assert!(err.to_string().starts_with("Invalid config file "));
    }

    #[test]
    fn given_default_settings_when_generating_config_then_round_trips() {
        let text = generate_default_config();
        assert!(text.contains(r#"backend = "auto""#));
        let parsed: Settings = toml::from_str(&text).unwrap();
        assert_eq!(parsed, Settings::default());
    }
}
