//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/tagtree/tagtree.toml`
//! 3. Explicit config: file passed with `--config`
//! 4. Environment variables: `TAGTREE_*` prefix, `__` between section and key

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use config::{Config, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::TagRules;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("config file not found: {0}")]
    NotFound(PathBuf),

    #[error("config error: {message}")]
    Config { message: String },
}

pub type SettingsResult<T> = Result<T, SettingsError>;

/// Settings for tag removal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RemoveConfig {
    /// Tags whose removal turns their children into paragraphs
    pub list_labels: Vec<String>,
    /// Label for the children of a removed list
    pub paragraph_label: String,
}

/// Settings for word wrapping.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AddConfig {
    /// Characters that may follow a matched word, e.g. "!?.;:"
    pub trailing_punctuation: String,
    /// Keep scanning the rest of a leaf after wrapping a word
    pub rescan_remainder: bool,
}

/// Settings for row bolding.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BoldConfig {
    pub label: String,
    pub body_label: String,
    pub table_label: String,
}

impl Default for RemoveConfig {
    fn default() -> Self {
        let rules = TagRules::default();
        Self {
            list_labels: rules.list_labels,
            paragraph_label: rules.paragraph_label,
        }
    }
}

impl Default for AddConfig {
    fn default() -> Self {
        let rules = TagRules::default();
        Self {
            trailing_punctuation: rules.trailing_punctuation.into_iter().collect(),
            rescan_remainder: rules.rescan_remainder,
        }
    }
}

impl Default for BoldConfig {
    fn default() -> Self {
        let rules = TagRules::default();
        Self {
            label: rules.bold_label,
            body_label: rules.body_label,
            table_label: rules.table_label,
        }
    }
}

/// Raw settings for intermediate parsing.
///
/// `None` means "not specified, inherit"; used while merging layers.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub remove: RawRemoveConfig,
    pub add: RawAddConfig,
    pub bold: RawBoldConfig,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawRemoveConfig {
    pub list_labels: Option<Vec<String>>,
    pub paragraph_label: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawAddConfig {
    pub trailing_punctuation: Option<String>,
    pub rescan_remainder: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawBoldConfig {
    pub label: Option<String>,
    pub body_label: Option<String>,
    pub table_label: Option<String>,
}

/// Merge arrays with union semantics and negation support.
///
/// - Items from overlay are added to base
/// - Items prefixed with `!` remove the corresponding item from the result
/// - Order of first appearance is kept, duplicates are dropped
///
/// # Examples
/// ```ignore
/// merge_array(&["ol", "ul"], &["dl"])   // → ["ol", "ul", "dl"]
/// merge_array(&["ol", "ul"], &["!ol"])  // → ["ul"]
/// ```
pub fn merge_array(base: &[String], overlay: &[String]) -> Vec<String> {
    let removed: HashSet<&str> = overlay
        .iter()
        .filter_map(|item| item.strip_prefix('!'))
        .collect();
    let mut seen: HashSet<String> = HashSet::new();

    base.iter()
        .chain(overlay.iter().filter(|item| !item.starts_with('!')))
        .filter(|item| !removed.contains(item.as_str()))
        .filter(|item| seen.insert(item.to_string()))
        .cloned()
        .collect()
}

/// Unified configuration for tagtree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Settings {
    pub remove: RemoveConfig,
    pub add: AddConfig,
    pub bold: BoldConfig,
}

/// Get the XDG config directory for tagtree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "tagtree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("tagtree.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> SettingsResult<RawSettings> {
    let content = std::fs::read_to_string(path).map_err(|e| SettingsError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| SettingsError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Apply a global config layer: every specified value REPLACES the current one.
    fn apply_global(&self, global: &RawSettings) -> Self {
        let mut next = self.clone();
        if let Some(labels) = &global.remove.list_labels {
            next.remove.list_labels = labels.clone();
        }
        next.apply_scalars(global);
        next
    }

    /// Merge an explicit config layer: list labels UNION with negation, scalars replace.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        let mut next = self.clone();
        if let Some(labels) = &overlay.remove.list_labels {
            next.remove.list_labels = merge_array(&self.remove.list_labels, labels);
        }
        next.apply_scalars(overlay);
        next
    }

    fn apply_scalars(&mut self, raw: &RawSettings) {
        if let Some(v) = &raw.remove.paragraph_label {
            self.remove.paragraph_label = v.clone();
        }
        if let Some(v) = &raw.add.trailing_punctuation {
            self.add.trailing_punctuation = v.clone();
        }
        if let Some(v) = raw.add.rescan_remainder {
            self.add.rescan_remainder = v;
        }
        if let Some(v) = &raw.bold.label {
            self.bold.label = v.clone();
        }
        if let Some(v) = &raw.bold.body_label {
            self.bold.body_label = v.clone();
        }
        if let Some(v) = &raw.bold.table_label {
            self.bold.table_label = v.clone();
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `explicit` - Optional config file given on the command line; must exist
    ///
    /// # Array Merge Semantics
    /// - Defaults → Global: REPLACE
    /// - Global → Explicit: UNION with `!item` negation
    /// - Any → Env vars: REPLACE
    pub fn load(explicit: Option<&Path>) -> SettingsResult<Self> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.apply_global(&raw);
            }
        }

        if let Some(path) = explicit {
            if !path.exists() {
                return Err(SettingsError::NotFound(path.to_path_buf()));
            }
            let raw = load_raw_settings(path)?;
            current = current.merge_with(&raw);
        }

        Self::apply_env_overrides(current)
    }

    /// Apply TAGTREE_* environment variables as explicit overrides.
    ///
    /// `TAGTREE_REMOVE__LIST_LABELS=ol,ul,dl` sets `remove.list_labels`.
    fn apply_env_overrides(mut settings: Self) -> SettingsResult<Self> {
        let builder = Config::builder().add_source(
            Environment::with_prefix("TAGTREE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("remove.list_labels"),
        );

        let config = builder.build().map_err(config_err)?;

        if let Ok(val) = config.get::<Vec<String>>("remove.list_labels") {
            settings.remove.list_labels = val;
        }
        if let Ok(val) = config.get_string("remove.paragraph_label") {
            settings.remove.paragraph_label = val;
        }
        if let Ok(val) = config.get_string("add.trailing_punctuation") {
            settings.add.trailing_punctuation = val;
        }
        if let Ok(val) = config.get_bool("add.rescan_remainder") {
            settings.add.rescan_remainder = val;
        }
        if let Ok(val) = config.get_string("bold.label") {
            settings.bold.label = val;
        }
        if let Ok(val) = config.get_string("bold.body_label") {
            settings.bold.body_label = val;
        }
        if let Ok(val) = config.get_string("bold.table_label") {
            settings.bold.table_label = val;
        }

        Ok(settings)
    }

    /// The tag rules the tree edits run with.
    pub fn rules(&self) -> TagRules {
        TagRules {
            list_labels: self.remove.list_labels.clone(),
            paragraph_label: self.remove.paragraph_label.clone(),
            bold_label: self.bold.label.clone(),
            body_label: self.bold.body_label.clone(),
            table_label: self.bold.table_label.clone(),
            trailing_punctuation: self.add.trailing_punctuation.chars().collect(),
            rescan_remainder: self.add.rescan_remainder,
        }
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> SettingsResult<String> {
        toml::to_string_pretty(self).map_err(|e| SettingsError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# tagtree configuration
#
# Locations (by precedence, lowest to highest):
#   Global:   ~/.config/tagtree/tagtree.toml  (defines your baseline)
#   Explicit: --config <FILE>                 (per-run additions)
#   Env:      TAGTREE_<SECTION>__<KEY>        (explicit overrides)
#
# list_labels in an explicit config UNION with the global ones.
# Prefix an entry with "!" to drop an inherited label:
#   list_labels = ["dl", "!ol"]

[remove]
# Tags removed with list policy; their children become paragraphs
# list_labels = ["ol", "ul"]
# paragraph_label = "p"

[add]
# Characters allowed right after a matched word
# trailing_punctuation = "!?.;:"
# Wrap every occurrence in a text line instead of the first one only
# rescan_remainder = false

[bold]
# label = "bold"
# body_label = "body"
# table_label = "table"
"#
        .to_string()
    }
}

fn config_err(e: config::ConfigError) -> SettingsError {
    SettingsError::Config {
        message: e.to_string(),
    }
}
