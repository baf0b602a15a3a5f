//! User configuration files (`.poplrrc`)
//!
//! Settings are layered: built-in defaults, then `~/.poplrrc`, then
//! `./.poplrrc`. Each layer is merged into the previous one key by key,
//! recursing into nested groups; arrays and scalars replace. A file that
//! cannot be read or parsed is skipped with a warning.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{PoplrError, Result};
use crate::output::write_atomic;
use crate::tree::{
    Configuration, DEFAULT_EXCLUDES, ExclusionPattern, FileTypes, OutputFormat, SortStrategy,
};

pub const CONFIG_FILE_NAME: &str = ".poplrrc";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DisplaySettings {
    pub fancy: bool,
    pub use_icons: bool,
    pub use_colors: bool,
    pub show_size: bool,
    pub show_stats: bool,
    pub show_root: bool,
    pub full_path: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            fancy: true,
            use_icons: false,
            use_colors: true,
            show_size: false,
            show_stats: false,
            show_root: false,
            full_path: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SortingSettings {
    pub enabled: bool,
    pub default: String,
}

impl Default for SortingSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            default: "directory-first".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilteringSettings {
    pub max_depth: Option<usize>,
    pub exclude: Vec<String>,
}

impl Default for FilteringSettings {
    fn default() -> Self {
        Self {
            max_depth: None,
            exclude: DEFAULT_EXCLUDES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExportSettings {
    pub default_format: String,
    pub output_dir: PathBuf,
    /// Put a timestamp in exported file names.
    pub timestamp: bool,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            default_format: "ascii".to_string(),
            output_dir: PathBuf::from("./"),
            timestamp: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub display: DisplaySettings,
    pub sorting: SortingSettings,
    pub filtering: FilteringSettings,
    pub export: ExportSettings,
    pub file_types: FileTypes,
}

impl Settings {
    /// Load defaults merged with the home and working directory config files.
    pub fn load() -> Self {
        let global = dirs::home_dir().map(|home| home.join(CONFIG_FILE_NAME));
        let local = std::env::current_dir()
            .ok()
            .map(|cwd| cwd.join(CONFIG_FILE_NAME));
        Self::load_from(&[global, local].into_iter().flatten().collect::<Vec<_>>())
    }

    /// Load defaults merged with each existing file in `paths`, later files winning.
    pub fn load_from(paths: &[PathBuf]) -> Self {
        let mut merged = match serde_json::to_value(Self::default()) {
            Ok(value) => value,
            Err(e) => {
                log::error!("failed to serialize default configuration: {e}");
                return Self::default();
            }
        };

        for path in paths {
            if let Some(layer) = read_layer(path) {
                deep_merge(&mut merged, layer);
            }
        }

        serde_json::from_value(merged).unwrap_or_else(|e| {
            log::warn!("Failed to load configuration, using defaults: {e}");
            Self::default()
        })
    }

    /// Write the default settings to `path` as pretty JSON.
    pub fn write_default(path: &Path) -> Result<Self> {
        let settings = Self::default();
        settings.write_to(path)?;
        Ok(settings)
    }

    pub fn write_to(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        write_atomic(path, &content)
    }

    /// Resolve into a validated [`Configuration`].
    ///
    /// Fails with [`PoplrError::InvalidConfiguration`] on an unknown format,
    /// sort strategy or malformed exclusion pattern.
    pub fn to_configuration(&self) -> Result<Configuration> {
        let sort_by = if self.sorting.enabled {
            self.sorting.default.parse::<SortStrategy>()?
        } else {
            SortStrategy::default()
        };

        Ok(Configuration {
            format: self.export.default_format.parse::<OutputFormat>()?,
            max_depth: self.filtering.max_depth,
            show_size: self.display.show_size,
            full_path: self.display.full_path,
            show_root: self.display.show_root,
            fancy: self.display.fancy,
            exclude: ExclusionPattern::parse_all(&self.filtering.exclude)?,
            use_colors: self.display.use_colors,
            show_stats: self.display.show_stats,
            use_icons: self.display.use_icons,
            sort_by,
            file_types: self.file_types.clone(),
        })
    }

    /// Path of the config file written by `init`.
    pub fn init_path(global: bool) -> Result<PathBuf> {
        let base = if global {
            dirs::home_dir()
        } else {
            std::env::current_dir().ok()
        };
        base.map(|dir| dir.join(CONFIG_FILE_NAME))
            .ok_or_else(|| PoplrError::InvalidConfiguration {
                field: "config location",
                value: if global { "home" } else { "current" }.to_string(),
                expected: "an accessible directory".to_string(),
            })
    }
}

fn read_layer(path: &Path) -> Option<Value> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
        Err(e) => {
            log::warn!("ignoring unreadable config {}: {e}", path.display());
            return None;
        }
    };

    match serde_json::from_str::<Value>(&content) {
        Ok(value @ Value::Object(_)) => {
            log::debug!("loaded config {}", path.display());
            Some(value)
        }
        Ok(_) => {
            log::warn!("ignoring config {}: not a JSON object", path.display());
            None
        }
        Err(e) => {
            log::warn!("ignoring malformed config {}: {e}", path.display());
            None
        }
    }
}

/// Merge `layer` into `base`, recursing into objects.
fn deep_merge(base: &mut Value, layer: Value) {
    match (base, layer) {
        (Value::Object(base), Value::Object(layer)) => {
            for (key, value) in layer {
                if let Some(existing) = base.get_mut(&key) {
                    if existing.is_object() && value.is_object() {
                        deep_merge(existing, value);
                        continue;
                    }
                }
                base.insert(key, value);
            }
        }
        (base, layer) => *base = layer,
    }
}
