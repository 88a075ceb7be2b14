use std::path::{Path, PathBuf};

use log::warn;

use crate::error::ConfigError;
use crate::game::{DEFAULT_PLAYER1_NAME, DEFAULT_PLAYER2_NAME};
use crate::save::{validate_slot_name, SaveConfig};

/// Display names for the two sides.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PlayersConfig {
    /// Plays SECOND and opens the game
    pub player1: String,
    /// Plays FIRST
    pub player2: String,
}

impl Default for PlayersConfig {
    fn default() -> Self {
        PlayersConfig {
            player1: DEFAULT_PLAYER1_NAME.to_string(),
            player2: DEFAULT_PLAYER2_NAME.to_string(),
        }
    }
}

/// Terminal front end settings.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Mark the legal destinations of the selected piece
    pub highlight_moves: bool,
    /// How many of the latest history records the side panel shows
    pub history_lines: usize,
    /// Turn the board around so the red side sees its own pieces at the
    /// bottom on its turn
    pub flip_board: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            highlight_moves: true,
            history_lines: 20,
            flip_board: false,
        }
    }
}

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log file used while the terminal UI owns the screen. Logging is off
    /// when unset.
    pub file: Option<PathBuf>,
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub players: PlayersConfig,
    pub saves: SaveConfig,
    pub ui: UiConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Read and validate a settings file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }

    /// Like [`AppConfig::load`], but a settings file that does not exist
    /// yet means "play with the defaults".
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        match Self::load(path) {
            Err(ConfigError::FileRead { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                warn!("no settings at '{}', playing with defaults", path.display());
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Parse and validate settings text.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_player_name("players.player1", &self.players.player1)?;
        validate_player_name("players.player2", &self.players.player2)?;

        if validate_slot_name(&self.saves.quicksave_slot).is_err() {
            return Err(ConfigError::Validation(
                "saves.quicksave_slot must be a non-empty file name".into(),
            ));
        }
        if self.saves.save_dir.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "saves.save_dir must not be empty".into(),
            ));
        }

        if self.ui.history_lines == 0 {
            return Err(ConfigError::Validation(
                "ui.history_lines must be > 0".into(),
            ));
        }

        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).expect("default config serializes")
    }
}

/// Names end up on their own line in saved games.
pub fn validate_player_name(field: &str, name: &str) -> Result<(), ConfigError> {
    if name.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{} must not be empty", field)));
    }
    if name.contains(['\n', '\r']) {
        return Err(ConfigError::Validation(format!(
            "{} must be a single line",
            field
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        config.validate().expect("default config should be valid");
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let toml_str = r#"
[players]
player1 = "Blue"
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.players.player1, "Blue");
        assert_eq!(config.players.player2, DEFAULT_PLAYER2_NAME);
        assert_eq!(config.saves.quicksave_slot, "quicksave");
        assert!(config.ui.highlight_moves);
        assert!(!config.ui.flip_board);
        assert!(config.logging.file.is_none());
    }

    #[test]
    fn test_empty_toml_uses_all_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        let default = AppConfig::default();
        assert_eq!(config.players.player1, default.players.player1);
        assert_eq!(config.saves.save_dir, default.saves.save_dir);
        assert_eq!(config.ui.history_lines, default.ui.history_lines);
    }

    #[test]
    fn test_validation_rejects_empty_name() {
        let mut config = AppConfig::default();
        config.players.player2 = "   ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_multiline_name() {
        let mut config = AppConfig::default();
        config.players.player1 = "Blue\nHISTORY_START".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_bad_slot() {
        let mut config = AppConfig::default();
        config.saves.quicksave_slot = "../outside".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_history_lines() {
        let mut config = AppConfig::default();
        config.ui.history_lines = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = AppConfig::load_or_default(Path::new("nonexistent_config.toml")).unwrap();
        assert_eq!(config.players.player1, DEFAULT_PLAYER1_NAME);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test_config.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(
            f,
            r#"
[saves]
save_dir = "my_saves"

[logging]
file = "kwazam.log"
"#
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.saves.save_dir, PathBuf::from("my_saves"));
        assert_eq!(config.logging.file, Some(PathBuf::from("kwazam.log")));
        // Others are defaults
        assert_eq!(config.ui.history_lines, 20);
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[ui]\nhistory_lines = 0\n").unwrap();
        assert!(matches!(
            AppConfig::load(&path),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_from_toml_reports_syntax_errors() {
        assert!(matches!(
            AppConfig::from_toml("[ui\nflip_board = true"),
            Err(ConfigError::TomlParse(_))
        ));
        let config = AppConfig::from_toml("[ui]\nflip_board = true\n").unwrap();
        assert!(config.ui.flip_board);
    }

    #[test]
    fn test_load_reports_unreadable_path() {
        let dir = tempfile::tempdir().unwrap();
        // A directory exists but cannot be read as a file.
        let err = AppConfig::load_or_default(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::FileRead { .. }), "got: {err}");
    }

    #[test]
    fn test_default_toml_roundtrips() {
        let toml_str = AppConfig::default_toml();
        let config: AppConfig = toml::from_str(&toml_str).unwrap();
        config.validate().expect("roundtripped config should be valid");
    }
}
