//! Configuration management for hookline.
//!
//! Configuration is read from `~/.config/hookline/config.toml` at startup.
//! If the file doesn't exist, a default configuration with comments is created.

pub mod colors;
pub mod keybindings;

pub use colors::ColorConfig;
pub use keybindings::KeybindingConfig;

use crate::integrations::IntegrationsConfig;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration struct.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub colors: ColorConfig,
    pub keybindings: KeybindingConfig,
    pub integrations: IntegrationsConfig,
}

impl Config {
    /// Load configuration from the default path, creating a commented
    /// default file on first run.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::default_config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit path. Missing fields use defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the default config file path: `~/.config/hookline/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("hookline").join("config.toml"))
    }

    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        let io_err = |p: &Path| {
            let p = p.to_path_buf();
            move |source| ConfigError::Io { path: p, source }
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err(parent))?;
        }
        fs::write(path, Self::default_config_content()).map_err(io_err(path))?;

        tracing::info!("Wrote default config to {}", path.display());
        Ok(())
    }

    fn default_config_content() -> &'static str {
        r##"# hookline configuration
#
# Colors can be named (Black, Red, Green, Yellow, Blue, Magenta, Cyan, Gray,
# DarkGray, LightRed, LightGreen, LightYellow, LightBlue, LightMagenta,
# LightCyan, White, Reset) or hex ("#RRGGBB" / "#RGB").
#
# Keys can be single characters ("a", "/"), special keys (Enter, Tab,
# BackTab, Backspace, Delete, Home, End, PageUp, PageDown, Up, Down, Left,
# Right, Esc, Space, F1-F12) and may carry modifiers ("Ctrl+c", "Alt+Enter").

[colors]
active_border = "Cyan"
inactive_border = "DarkGray"
selection_bg = "Cyan"
selection_fg = "Black"
reddit_badge = "LightRed"
newsletter_badge = "LightBlue"
saved_marker = "Red"
metrics = "Gray"
hook_type = "Magenta"
copied = "Green"
status_fg = "White"
status_bg = "DarkGray"
toast_fg = "White"
toast_bg = "Green"

[keybindings]
quit = ["q", "Ctrl+c"]
move_up = ["k", "Up"]
move_down = ["j", "Down"]
next_page = ["n", "PageDown"]
prev_page = ["p", "PageUp"]
switch_tab = ["Tab", "BackTab"]
search = ["/", "Ctrl+f"]
cycle_filter = ["f"]
cycle_sort = ["o"]
toggle_save = ["s", "Space"]
open_hooks = ["Enter", "h"]
generate = ["g"]
copy_hook = ["c", "y"]
close = ["Esc"]
import = ["i", "R"]

[integrations]
# Simulated latency of the built-in collaborators (milliseconds)
scrape_delay_ms = 2500
sync_delay_ms = 1000
generate_delay_ms = 1500

# Capacity of the CRM sync queue
sync_queue_size = 32

# Import scraped items from a JSON file instead of the built-in batch
# scrape_file = "/path/to/scraped.json"
"##
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
    use ratatui::style::Color;
    use std::io::Write;

    #[test]
    fn test_default_config_deserializes() {
        let config: Config = toml::from_str(Config::default_config_content())
            .expect("Default config should be valid TOML");

        assert_eq!(config.colors.active_border, Color::Cyan);
        assert_eq!(config.keybindings.quit, vec!["q", "Ctrl+c"]);
        assert_eq!(config.integrations, IntegrationsConfig::default());
    }

    #[test]
    fn test_partial_config() {
        let content = r##"
[colors]
toast_bg = "#00FF00"

[integrations]
generate_delay_ms = 10
"##;
        let config: Config = toml::from_str(content).expect("Partial config should work");

        assert_eq!(config.colors.toast_bg, Color::Rgb(0, 255, 0));
        assert_eq!(config.colors.inactive_border, Color::DarkGray);
        assert_eq!(config.integrations.generate_delay_ms, 10);
        assert_eq!(config.integrations.scrape_delay_ms, 2500);
    }

    #[test]
    fn test_empty_config() {
        let config: Config = toml::from_str("").expect("Empty config should work");
        assert_eq!(config.keybindings.generate, vec!["g"]);
        assert!(config.integrations.scrape_file.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[integrations]\nscrape_file = \"/tmp/batch.json\"").unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(
            config.integrations.scrape_file,
            Some(PathBuf::from("/tmp/batch.json"))
        );
    }

    #[test]
    fn test_load_from_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[colors]\nactive_border = \"chartreuse-ish\"").unwrap();

        let err = Config::load_from(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
