// Configuration for the shell
//
// Configuration is loaded in order of precedence:
// 1. Environment variables (highest priority)
// 2. Config file (~/.config/wefriendz/config.toml)
// 3. Built-in defaults (lowest priority)

use serde::Deserialize;
use std::path::PathBuf;

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Log file rotation policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogRotation {
    Hourly,
    #[default]
    Daily,
    Never,
}

impl LogRotation {
    fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "hourly" => LogRotation::Hourly,
            "never" => LogRotation::Never,
            _ => LogRotation::Daily,
        }
    }

    fn name(self) -> &'static str {
        match self {
            LogRotation::Hourly => "hourly",
            LogRotation::Daily => "daily",
            LogRotation::Never => "never",
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    pub level: String,

    /// Also write logs to rotating files
    pub file_enabled: bool,

    /// Directory for log files
    pub file_dir: PathBuf,

    /// Log file name prefix
    pub file_prefix: String,

    /// Rotation policy for log files
    pub file_rotation: LogRotation,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_enabled: false,
            file_dir: PathBuf::from("./logs"),
            file_prefix: "wefriendz.log".to_string(),
            file_rotation: LogRotation::default(),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the backend-for-frontend the feature API clients talk to
    pub api_url: String,

    /// Directory for analytics session files
    pub log_dir: PathBuf,

    /// Whether to enable the TUI (can be disabled for headless smoke runs)
    pub enable_tui: bool,

    /// Theme name: "dark" or "light"
    pub theme: String,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Logging settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
struct FileLogging {
    level: Option<String>,
    file_enabled: Option<bool>,
    file_dir: Option<String>,
    file_prefix: Option<String>,
    file_rotation: Option<String>,
}

/// Config file structure (subset of Config that makes sense to persist)
#[derive(Debug, Deserialize, Default)]
struct FileConfig {
    api_url: Option<String>,
    log_dir: Option<String>,
    theme: Option<String>,

    /// Optional [logging] section
    logging: Option<FileLogging>,
}

impl Config {
    /// Get the config file path: ~/.config/wefriendz/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("wefriendz").join("config.toml"))
    }

    /// Create config template if it doesn't exist
    /// Called during startup to help users discover configuration options
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };

        // Don't overwrite existing config
        if path.exists() {
            return;
        }

        // Create parent directory
        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return; // Silently fail - config is optional
            }
        }

        let template = r#"# wefriendz configuration
# Uncomment and modify options as needed

# Theme: dark, light (cycle at runtime with 't')
# theme = "dark"

# Backend-for-frontend base URL used by the feature API clients
# api_url = "https://bff.wefriendz.example"

# Directory for analytics session files (default: ./logs)
# log_dir = "./logs"

# Logging configuration
# [logging]
# level = "info"       # trace, debug, info, warn, error (RUST_LOG overrides)
# file_enabled = false # also write JSON logs to rotating files
# file_dir = "./logs"
# file_prefix = "wefriendz.log"
# file_rotation = "daily"  # hourly, daily, never
"#;

        // Write template (ignore errors - config is optional)
        let _ = std::fs::write(&path, template);
    }

    /// Load file config if it exists
    fn load_file_config() -> FileConfig {
        let Some(path) = Self::config_path() else {
            return FileConfig::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => toml::from_str(&contents).unwrap_or_else(|e| {
                eprintln!("Warning: Failed to parse {}: {}", path.display(), e);
                FileConfig::default()
            }),
            Err(_) => FileConfig::default(), // File doesn't exist, use defaults
        }
    }

    /// Serialize config to TOML string (single source of truth for format)
    pub fn to_toml(&self) -> String {
        format!(
            r#"# wefriendz configuration

# Theme: dark, light (cycle at runtime with 't')
theme = "{theme}"

# Backend-for-frontend base URL used by the feature API clients
api_url = "{api_url}"

# Directory for analytics session files
log_dir = "{log_dir}"

# Logging configuration (RUST_LOG env var overrides)
[logging]
level = "{log_level}"
file_enabled = {file_enabled}
file_dir = "{file_dir}"
file_prefix = "{file_prefix}"
file_rotation = "{file_rotation}"
"#,
            theme = self.theme,
            api_url = self.api_url,
            log_dir = self.log_dir.display(),
            log_level = self.logging.level,
            file_enabled = self.logging.file_enabled,
            file_dir = self.logging.file_dir.display(),
            file_prefix = self.logging.file_prefix,
            file_rotation = self.logging.file_rotation.name(),
        )
    }

    /// Load configuration: file -> env vars -> defaults
    pub fn from_env() -> Self {
        let file = Self::load_file_config();

        // API URL: env > file > default
        let api_url = std::env::var("WEFRIENDZ_API_URL")
            .ok()
            .or(file.api_url)
            .unwrap_or_else(|| "https://bff.wefriendz.example".to_string());

        // Analytics log directory: env > file > default
        let log_dir = std::env::var("WEFRIENDZ_LOG_DIR")
            .ok()
            .or(file.log_dir)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./logs"));

        // TUI toggle: env only (runtime flag)
        let enable_tui = std::env::var("WEFRIENDZ_NO_TUI")
            .map(|v| v != "1" && v.to_lowercase() != "true")
            .unwrap_or(true);

        // Theme: env > file > default
        let theme = std::env::var("WEFRIENDZ_THEME")
            .ok()
            .or(file.theme)
            .unwrap_or_else(|| "dark".to_string());

        // Logging settings: file config only (RUST_LOG env var handled in main.rs)
        let file_logging = file.logging.unwrap_or_default();
        let defaults = LoggingConfig::default();
        let logging = LoggingConfig {
            level: file_logging.level.unwrap_or(defaults.level),
            file_enabled: file_logging.file_enabled.unwrap_or(defaults.file_enabled),
            file_dir: file_logging
                .file_dir
                .map(PathBuf::from)
                .unwrap_or(defaults.file_dir),
            file_prefix: file_logging.file_prefix.unwrap_or(defaults.file_prefix),
            file_rotation: file_logging
                .file_rotation
                .as_deref()
                .map(LogRotation::from_name)
                .unwrap_or(defaults.file_rotation),
        };

        Self {
            api_url,
            log_dir,
            enable_tui,
            theme,
            logging,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: "https://bff.wefriendz.example".to_string(),
            log_dir: PathBuf::from("./logs"),
            enable_tui: true,
            theme: "dark".to_string(),
            logging: LoggingConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Verify that serialized config can be parsed back.
    /// Catches TOML syntax errors in the to_toml template.
    #[test]
    fn config_roundtrips_through_toml() {
        let config = Config::default();
        let toml_str = config.to_toml();

        let parsed: Result<FileConfig, _> = toml::from_str(&toml_str);
        assert!(
            parsed.is_ok(),
            "Default config should round-trip.\nTOML:\n{}\nError: {:?}",
            toml_str,
            parsed.err()
        );

        let file = parsed.unwrap();
        assert_eq!(file.theme.as_deref(), Some("dark"));
        assert_eq!(
            file.api_url.as_deref(),
            Some("https://bff.wefriendz.example")
        );
        let logging = file.logging.unwrap();
        assert_eq!(logging.level.as_deref(), Some("info"));
        assert_eq!(logging.file_rotation.as_deref(), Some("daily"));
    }

    #[test]
    fn rotation_parsing_falls_back_to_daily() {
        assert_eq!(LogRotation::from_name("hourly"), LogRotation::Hourly);
        assert_eq!(LogRotation::from_name("NEVER"), LogRotation::Never);
        assert_eq!(LogRotation::from_name("weekly"), LogRotation::Daily);
    }
}
