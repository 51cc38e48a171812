//! User configuration and the validated feature set built from it.
//!
//! [`HotkeyConfig`] mirrors what a user writes (TOML or any serde format).
//! [`Features`] is what the dispatcher runs on: one typed entry per optional
//! handler, each either absent or a parsed value.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::hint::EnterSuppression;
use crate::hotkey::{DescriptorError, HotkeyDescriptor};

/// Toolbar entry name whose presence enables suggestion navigation.
pub const EMOJI_ENTRY: &str = "emoji";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config file {path:?} failed")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse config failed")]
    Parse(#[from] toml::de::Error),
    #[error("invalid hotkey for '{binding}'")]
    Descriptor {
        binding: String,
        #[source]
        source: DescriptorError,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeymapConfig {
    pub delete_line: Option<String>,
    pub duplicate: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HintConfig {
    /// Enables @-mention suggestions.
    pub at: bool,
}

/// One shortcut-table entry: a named editor action with an optional hotkey.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolbarEntry {
    pub name: String,
    #[serde(default)]
    pub hotkey: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HotkeyConfig {
    /// Invoke the host's escape callback on Escape.
    pub esc: bool,
    /// Invoke the host's ctrl-enter callback on Ctrl/Cmd+Enter.
    pub ctrl_enter: bool,
    pub keymap: KeymapConfig,
    /// Indent string for Tab; absent or empty disables tab indentation.
    pub tab: Option<String>,
    pub hint: HintConfig,
    pub toolbar: Vec<ToolbarEntry>,
    pub suppress_enter_ms: u64,
}

impl Default for HotkeyConfig {
    fn default() -> Self {
        Self {
            esc: false,
            ctrl_enter: false,
            keymap: KeymapConfig::default(),
            tab: None,
            hint: HintConfig::default(),
            toolbar: Vec::new(),
            suppress_enter_ms: EnterSuppression::DEFAULT_WINDOW.as_millis() as u64,
        }
    }
}

impl HotkeyConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }
}

/// A shortcut-table entry with a parsed hotkey.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shortcut {
    pub name: String,
    pub hotkey: HotkeyDescriptor,
}

/// The validated set of optional dispatcher behaviours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Features {
    pub escape: bool,
    pub ctrl_enter: bool,
    pub delete_line: Option<HotkeyDescriptor>,
    pub duplicate_line: Option<HotkeyDescriptor>,
    /// Bound entries only, in configuration order.
    pub shortcuts: Vec<Shortcut>,
    pub indent: Option<String>,
    pub hints: bool,
    pub enter_suppression: Duration,
}

impl Default for Features {
    fn default() -> Self {
        Self {
            escape: false,
            ctrl_enter: false,
            delete_line: None,
            duplicate_line: None,
            shortcuts: Vec::new(),
            indent: None,
            hints: false,
            enter_suppression: EnterSuppression::DEFAULT_WINDOW,
        }
    }
}

impl Features {
    /// Builds features, dropping bindings whose hotkey does not parse.
    ///
    /// A dropped binding is logged and never matches; the rest of the
    /// configuration stays in effect.
    pub fn from_config(config: &HotkeyConfig) -> Self {
        Self::build(config, |binding, raw| match raw.parse::<HotkeyDescriptor>() {
            Ok(descriptor) => Ok(Some(descriptor)),
            Err(source) => {
                warn!(binding, hotkey = raw, error = %source, "ignoring invalid hotkey");
                Ok(None)
            }
        })
        .unwrap_or_default()
    }

    /// Builds features, failing on the first hotkey that does not parse.
    pub fn try_from_config(config: &HotkeyConfig) -> Result<Self, ConfigError> {
        Self::build(config, |binding, raw| {
            raw.parse::<HotkeyDescriptor>().map(Some).map_err(|source| ConfigError::Descriptor {
                binding: binding.to_string(),
                source,
            })
        })
    }

    fn build<F>(config: &HotkeyConfig, mut parse: F) -> Result<Self, ConfigError>
    where
        F: FnMut(&str, &str) -> Result<Option<HotkeyDescriptor>, ConfigError>,
    {
        let mut bind = |binding: &str, raw: Option<&str>| match raw {
            Some(raw) if !raw.is_empty() => parse(binding, raw),
            _ => Ok(None),
        };

        let delete_line = bind("delete_line", config.keymap.delete_line.as_deref())?;
        let duplicate_line = bind("duplicate", config.keymap.duplicate.as_deref())?;
        let mut shortcuts = Vec::new();
        for entry in &config.toolbar {
            if let Some(hotkey) = bind(&entry.name, entry.hotkey.as_deref())? {
                shortcuts.push(Shortcut {
                    name: entry.name.clone(),
                    hotkey,
                });
            }
        }

        Ok(Self {
            escape: config.esc,
            ctrl_enter: config.ctrl_enter,
            delete_line,
            duplicate_line,
            shortcuts,
            indent: config.tab.clone().filter(|tab| !tab.is_empty()),
            hints: config.hint.at || config.toolbar.iter().any(|e| e.name == EMOJI_ENTRY),
            enter_suppression: Duration::from_millis(config.suppress_enter_ms),
        })
    }
}

impl From<&HotkeyConfig> for Features {
    fn from(config: &HotkeyConfig) -> Self {
        Self::from_config(config)
    }
}
