//! Config file
//!
//! The text pad reads an optional TOML file. `TEXTPAD_CONFIG` names it explicitly; otherwise
//! `textpad.toml` in the current directory is used when present. Every field is optional:
//!
//! ```toml
//! count_mode = "graphemes"    # chars | graphemes | utf16
//! history_limit = 10000       # omit for unbounded history
//! clipboard_on_exit = true
//! log_file = "/tmp/textpad.log"
//! log_level = "debug"
//!
//! [keys]
//! "alt+u" = "uppercase"
//! "ctrl+shift+u" = "none"     # unbind
//! ```

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use log::LevelFilter;
use serde::{Deserialize, Deserializer};
use textpad_core::{CountMode, EditorOptions, Keymap};

use crate::error::AppError;

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "TEXTPAD_CONFIG";
/// Config file looked up in the current directory.
pub const DEFAULT_CONFIG_FILE: &str = "textpad.toml";
/// Log file name used when `log_file` is not set.
const DEFAULT_LOG_FILE: &str = "textpad.log";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    #[serde(deserialize_with = "deserialize_count_mode")]
    pub count_mode: CountMode,
    pub history_limit: Option<usize>,
    pub clipboard_on_exit: bool,
    pub log_file: Option<PathBuf>,
    pub log_level: LevelFilter,
    /// Key string -> command name (`"none"` unbinds).
    pub keys: BTreeMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            count_mode: CountMode::default(),
            history_limit: None,
            clipboard_on_exit: true,
            log_file: None,
            log_level: LevelFilter::Info,
            keys: BTreeMap::new(),
        }
    }
}

fn deserialize_count_mode<'de, D>(deserializer: D) -> Result<CountMode, D::Error>
where
    D: Deserializer<'de>,
{
    let name = String::deserialize(deserializer)?;
    name.parse().map_err(serde::de::Error::custom)
}

impl Config {
    /// Load the config, returning it with the path it came from (if any).
    pub fn load() -> Result<(Self, Option<PathBuf>), AppError> {
        let path = match env::var_os(CONFIG_ENV) {
            Some(path) => PathBuf::from(path),
            None => {
                let path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !path.is_file() {
                    return Ok((Self::default(), None));
                }
                path
            }
        };
        let config = Self::from_path(&path)?;
        Ok((config, Some(path)))
    }

    /// Read and parse a config file.
    pub fn from_path(path: &Path) -> Result<Self, AppError> {
        let text = fs::read_to_string(path).map_err(|source| AppError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| AppError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Engine options, with `[keys]` applied on top of the default shortcut table.
    pub fn editor_options(&self) -> Result<EditorOptions, AppError> {
        let mut keymap = Keymap::default();
        for (binding, command) in &self.keys {
            keymap
                .bind_str(binding, command)
                .map_err(|source| AppError::Key {
                    binding: binding.clone(),
                    source,
                })?;
        }

        Ok(EditorOptions {
            count_mode: self.count_mode,
            history_limit: self.history_limit,
            keymap,
        })
    }

    /// Where log records go.
    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| env::temp_dir().join(DEFAULT_LOG_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use textpad_core::{EditorCommand, Key, KeyCombo, Modifiers};

    #[test]
    fn test_empty_file_gives_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert!(config.clipboard_on_exit);
    }

    #[test]
    fn test_full_config() {
        let config: Config = toml::from_str(
            r#"
            count_mode = "utf16"
            history_limit = 50
            clipboard_on_exit = false
            log_file = "/tmp/pad.log"
            log_level = "debug"

            [keys]
            "alt+u" = "uppercase"
            "ctrl+shift+u" = "none"
            "#,
        )
        .unwrap();

        assert_eq!(config.count_mode, CountMode::Utf16);
        assert_eq!(config.history_limit, Some(50));
        assert_eq!(config.log_level, LevelFilter::Debug);
        assert_eq!(config.log_path(), PathBuf::from("/tmp/pad.log"));

        let options = config.editor_options().unwrap();
        assert_eq!(options.history_limit, Some(50));
        assert_eq!(
            options
                .keymap
                .lookup(&KeyCombo::new(Key::Char('u'), Modifiers::ALT)),
            Some(EditorCommand::Uppercase)
        );
        assert_eq!(
            options.keymap.lookup(&KeyCombo::new(
                Key::Char('u'),
                Modifiers::CONTROL | Modifiers::SHIFT
            )),
            None
        );
    }

    #[test]
    fn test_unknown_fields_and_modes_are_rejected() {
        assert!(toml::from_str::<Config>("colour = \"red\"").is_err());
        assert!(toml::from_str::<Config>("count_mode = \"bytes\"").is_err());
    }

    #[test]
    fn test_bad_binding_names_the_key() {
        let config: Config = toml::from_str("[keys]\n\"ctrl+q\" = \"explode\"").unwrap();
        let err = config.editor_options().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid key binding `ctrl+q`: unknown command `explode`"
        );
    }
}
