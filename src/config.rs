use std::path::Path;

use crate::error::ConfigError;
use crate::game::{Board, Cell, Player, DEFAULT_COLS, DEFAULT_ROWS};

/// Board dimensions.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub width: usize,
    pub height: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig {
            width: DEFAULT_COLS,
            height: DEFAULT_ROWS,
        }
    }
}

/// Characters used by the plain text board.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub empty: char,
    pub red: char,
    pub green: char,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            empty: '|',
            red: 'R',
            green: 'G',
        }
    }
}

impl DisplayConfig {
    /// Character for a player's marker
    pub fn marker(&self, player: Player) -> char {
        match player {
            Player::Red => self.red,
            Player::Green => self.green,
        }
    }

    pub fn cell_char(&self, cell: Cell) -> char {
        cell.owner().map_or(self.empty, |player| self.marker(player))
    }
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub board: BoardConfig,
    pub display: DisplayConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            log::warn!("config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board.width == 0 {
            return Err(ConfigError::Validation("board.width must be > 0".into()));
        }
        if self.board.height == 0 {
            return Err(ConfigError::Validation("board.height must be > 0".into()));
        }

        let DisplayConfig { empty, red, green } = self.display;
        if [empty, red, green].iter().any(|c| c.is_whitespace()) {
            return Err(ConfigError::Validation(
                "display characters must not be whitespace".into(),
            ));
        }
        if empty == red || empty == green || red == green {
            return Err(ConfigError::Validation(
                "display.empty, display.red and display.green must differ".into(),
            ));
        }

        Ok(())
    }

    /// Build an empty board with the configured dimensions.
    pub fn new_board(&self) -> Result<Board, ConfigError> {
        Board::new(self.board.width, self.board.height)
            .map_err(|e| ConfigError::Validation(e.to_string()))
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        config.validate().expect("default config should be valid");
        assert_eq!(config.board.width, 7);
        assert_eq!(config.board.height, 6);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let toml_str = r#"
[board]
width = 9
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.board.width, 9);
        // Other fields should be defaults
        assert_eq!(config.board.height, 6);
        assert_eq!(config.display, DisplayConfig::default());
    }

    #[test]
    fn test_empty_toml_uses_all_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_display_chars_parse_from_strings() {
        let toml_str = r#"
[display]
empty = "."
red = "X"
green = "O"
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.display.empty, '.');
        assert_eq!(config.display.red, 'X');
        assert_eq!(config.display.green, 'O');
        config.validate().unwrap();
    }

    #[test]
    fn test_display_chars_follow_config() {
        let display = DisplayConfig {
            empty: '.',
            red: 'X',
            green: 'O',
        };
        assert_eq!(display.marker(Player::Red), 'X');
        assert_eq!(display.marker(Player::Green), 'O');
        assert_eq!(display.cell_char(Cell::Empty), '.');
        assert_eq!(display.cell_char(Player::Red.to_cell()), 'X');
        assert_eq!(display.cell_char(Cell::Green), 'O');

        let default = DisplayConfig::default();
        assert_eq!(default.marker(Player::Red), 'R');
        assert_eq!(default.cell_char(Cell::Empty), '|');
    }

    #[test]
    fn test_validation_rejects_zero_width() {
        let mut config = AppConfig::default();
        config.board.width = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_height() {
        let mut config = AppConfig::default();
        config.board.height = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_duplicate_display_chars() {
        let mut config = AppConfig::default();
        config.display.green = 'R';
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.display.empty = 'G';
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_whitespace_display_char() {
        let mut config = AppConfig::default();
        config.display.empty = ' ';
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_new_board_uses_dimensions() {
        let mut config = AppConfig::default();
        config.board.width = 5;
        config.board.height = 4;
        let board = config.new_board().unwrap();
        assert_eq!((board.width(), board.height()), (5, 4));

        config.board.height = 0;
        assert!(config.new_board().is_err());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = AppConfig::load_or_default(Path::new("nonexistent_config.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test_config.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(
            f,
            r#"
[board]
height = 8
"#
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.board.height, 8);
        // Others are defaults
        assert_eq!(config.board.width, 7);
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[board]\nwidth = 0\n").unwrap();
        assert!(matches!(
            AppConfig::load(&path),
            Err(ConfigError::Validation(_))
        ));

        std::fs::write(&path, "[board\n").unwrap();
        assert!(matches!(
            AppConfig::load(&path),
            Err(ConfigError::TomlParse(_))
        ));
    }

    #[test]
    fn test_load_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        assert!(matches!(
            AppConfig::load(&path),
            Err(ConfigError::FileRead { .. })
        ));
    }

    #[test]
    fn test_default_toml_roundtrips() {
        let toml_str = AppConfig::default_toml();
        let config: AppConfig = toml::from_str(&toml_str).unwrap();
        config
            .validate()
            .expect("roundtripped config should be valid");
        assert_eq!(config, AppConfig::default());
    }
}
