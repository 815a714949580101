//! Shell configuration
//!
//! Loaded from a TOML file. Every field has a default, so an empty file (or
//! no file at all) yields a working configuration.
//!
//! ```toml
//! [user]
//! name = "John Smith"
//! role = "Senior Technician"
//! id = "TECH001"
//!
//! [layout]
//! tab_bar_height = 3
//!
//! [behavior]
//! tick_rate_ms = 250
//! auto_login = false
//! open_path = "/tasks"
//!
//! [auth]
//! require_credentials = false
//! ```

use app_state::{AcceptAll, CredentialVerifier, RequireFields, UserSummary};
use app_ui::{sizing, LayoutShell};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file could not be read
    #[error("Failed to read configuration file {path}: {source}")]
    Read {
        /// File path
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// Configuration file is not valid TOML for this schema
    #[error("Failed to parse configuration file {path}: {source}")]
    ParseFile {
        /// File path
        path: PathBuf,
        /// Underlying error
        source: toml::de::Error,
    },

    /// Configuration text is not valid TOML for this schema
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value is out of range
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Chrome sizes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Rows reserved for the tab bar
    #[serde(default = "default_tab_bar_height")]
    pub tab_bar_height: u16,
    /// Rows reserved for the header
    #[serde(default = "default_header_height")]
    pub header_height: u16,
}

fn default_tab_bar_height() -> u16 {
    sizing::TAB_BAR_HEIGHT
}

fn default_header_height() -> u16 {
    sizing::HEADER_HEIGHT
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            tab_bar_height: default_tab_bar_height(),
            header_height: default_header_height(),
        }
    }
}

/// Runtime behavior
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BehaviorConfig {
    /// Event poll interval in milliseconds
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
    /// Skip the login view at startup
    #[serde(default)]
    pub auto_login: bool,
    /// Path to open after the first login
    #[serde(default)]
    pub open_path: Option<String>,
}

fn default_tick_rate_ms() -> u64 {
    250
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate_ms(),
            auto_login: false,
            open_path: None,
        }
    }
}

/// Login checks
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Require a non-empty email and password and disable quick access
    #[serde(default)]
    pub require_credentials: bool,
}

/// Complete shell configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TuiConfig {
    /// Technician shown on every screen
    #[serde(default)]
    pub user: UserSummary,
    /// Chrome sizes
    #[serde(default)]
    pub layout: LayoutConfig,
    /// Runtime behavior
    #[serde(default)]
    pub behavior: BehaviorConfig,
    /// Login checks
    #[serde(default)]
    pub auth: AuthConfig,
}

impl TuiConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::parse(&content).map_err(|e| match e {
            ConfigError::Parse(source) => ConfigError::ParseFile {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })?;
        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if given, falling back to defaults when it is missing or invalid
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Using default configuration: {}", e);
                Self::default()
            }
        }
    }

    fn validate(&self) -> Result<()> {
        if self.layout.tab_bar_height < sizing::MIN_TAB_BAR_HEIGHT {
            return Err(ConfigError::InvalidValue(format!(
                "layout.tab_bar_height must be at least {}",
                sizing::MIN_TAB_BAR_HEIGHT
            )));
        }
        if self.behavior.tick_rate_ms == 0 {
            return Err(ConfigError::InvalidValue(
                "behavior.tick_rate_ms must be greater than 0".to_string(),
            ));
        }
        if let Some(path) = &self.behavior.open_path {
            if !path.starts_with('/') {
                return Err(ConfigError::InvalidValue(format!(
                    "behavior.open_path must be absolute: {}",
                    path
                )));
            }
        }
        Ok(())
    }

    /// Poll interval
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.behavior.tick_rate_ms)
    }

    /// Layout shell with the configured chrome sizes
    pub fn layout_shell(&self) -> LayoutShell {
        LayoutShell::new(self.layout.header_height, self.layout.tab_bar_height)
    }

    /// Verifier selected by `auth.require_credentials`
    pub fn verifier(&self) -> Box<dyn CredentialVerifier> {
        if self.auth.require_credentials {
            Box::new(RequireFields)
        } else {
            Box::new(AcceptAll)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use app_state::{LoginRequest, SessionError};
    use std::io::Write;

    #[test]
    fn test_empty_config_is_default() {
        let config = TuiConfig::parse("").unwrap();
        assert_eq!(config, TuiConfig::default());
        assert_eq!(config.user.id, "TECH001");
        assert_eq!(config.layout.tab_bar_height, 3);
        assert_eq!(config.tick_rate(), Duration::from_millis(250));
    }

    #[test]
    fn test_partial_sections() {
        let config = TuiConfig::parse(
            r#"
            [user]
            name = "Ana Reyes"
            role = "Technician"
            id = "TECH042"

            [behavior]
            auto_login = true
            open_path = "/tasks"
            "#,
        )
        .unwrap();
        assert_eq!(config.user.initials(), "AR");
        assert!(config.user.avatar.is_none());
        assert!(config.behavior.auto_login);
        assert_eq!(config.behavior.open_path.as_deref(), Some("/tasks"));
        assert_eq!(config.behavior.tick_rate_ms, 250);
        assert_eq!(config.layout, LayoutConfig::default());
    }

    #[test]
    fn test_partial_user_section() {
        let config = TuiConfig::parse(
            r#"
            [user]
            name = "Ana Reyes"

            [auth]
            require_credentials = true
            "#,
        )
        .unwrap();
        assert_eq!(config.user.name, "Ana Reyes");
        assert_eq!(config.user.id, UserSummary::default().id);
        assert!(config.auth.require_credentials);
    }

    #[test]
    fn test_tab_bar_height_has_a_floor() {
        for height in [0, 1] {
            let err = TuiConfig::parse(&format!("[layout]\ntab_bar_height = {}\n", height))
                .unwrap_err();
            assert!(matches!(err, ConfigError::InvalidValue(_)));
            assert!(err.to_string().contains("tab_bar_height"));
        }
        let config = TuiConfig::parse("[layout]\ntab_bar_height = 2\n").unwrap();
        assert_eq!(config.layout_shell().tab_bar_height, 2);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = TuiConfig::parse("[behavior]\ntick_rate_ms = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(_)));

        let err = TuiConfig::parse("[behavior]\nopen_path = \"tasks\"\n").unwrap_err();
        assert!(err.to_string().contains("open_path"));

        let err = TuiConfig::parse("[layout]\ntab_bar_height = \"tall\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().starts_with("Failed to parse configuration: "));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[layout]\ntab_bar_height = 4\n\n[auth]\nrequire_credentials = true").unwrap();

        let config = TuiConfig::load(file.path()).unwrap();
        assert_eq!(config.layout_shell(), LayoutShell::new(2, 4));
        assert_eq!(
            config.verifier().verify(&LoginRequest::QuickAccess),
            Err(SessionError::QuickAccessDisabled)
        );
    }

    #[test]
    fn test_load_errors_name_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        let err = TuiConfig::load(&missing).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));

        let bad = dir.path().join("bad.toml");
        std::fs::write(&bad, "[user\n").unwrap();
        let err = TuiConfig::load(&bad).unwrap_err();
        assert!(matches!(err, ConfigError::ParseFile { .. }));
        assert!(err.to_string().contains("bad.toml"));
    }

    #[test]
    fn test_load_or_default_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert_eq!(TuiConfig::load_or_default(Some(&missing)), TuiConfig::default());
        assert_eq!(TuiConfig::load_or_default(None), TuiConfig::default());
    }

    #[test]
    fn test_default_verifier_accepts_quick_access() {
        let config = TuiConfig::default();
        assert!(config.verifier().verify(&LoginRequest::QuickAccess).is_ok());
    }
}
