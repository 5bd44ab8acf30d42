//! Generator configuration.
//!
//! Handles loading, merging, and validating `sheetdocs.toml`. Configuration
//! is layered, later layers overriding earlier ones key by key:
//!
//! ```text
//! stock defaults  →  sheetdocs.toml (or --config)  →  command-line flags
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! spreadsheet = "handbook.xlsx"   # Workbook to read
//! # sheet = "Pages"               # Worksheet name (default: first sheet)
//! output_dir = "generated"        # Where <page_id>.md files are written
//! root_page_id = "00000000_en"    # Welcome/root row, never written
//!
//! [defaults]
//! layout = "home"                 # Used when the layout cell is blank
//! lang_code = "en"                # Used when the lang_code cell is blank
//! nav_order = 1                   # Used when display_order is blank or < 1
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Config file looked up in the working directory when `--config` is not given.
pub const CONFIG_FILE: &str = "sheetdocs.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),
}

/// Generator configuration loaded from `sheetdocs.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Path to the input workbook.
    pub spreadsheet: String,
    /// Worksheet to read. `None` reads the first sheet.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sheet: Option<String>,
    /// Directory that receives one `<page_id>.md` per row.
    pub output_dir: String,
    /// The welcome/root page. Its row is counted as skipped, never written.
    pub root_page_id: String,
    /// Fallbacks for blank cells.
    pub defaults: DefaultsConfig,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            spreadsheet: "handbook.xlsx".to_string(),
            sheet: None,
            output_dir: "generated".to_string(),
            root_page_id: "00000000_en".to_string(),
            defaults: DefaultsConfig::default(),
        }
    }
}

impl GeneratorConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("spreadsheet", &self.spreadsheet),
            ("output_dir", &self.output_dir),
            ("defaults.layout", &self.defaults.layout),
            ("defaults.lang_code", &self.defaults.lang_code),
        ];
        for (key, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::Validation(format!("{key} must not be empty")));
            }
        }
        if self.defaults.nav_order < 1 {
            return Err(ConfigError::Validation(
                "defaults.nav_order must be at least 1".into(),
            ));
        }
        Ok(())
    }

    pub fn spreadsheet_path(&self) -> &Path {
        Path::new(&self.spreadsheet)
    }

    pub fn output_path(&self) -> &Path {
        Path::new(&self.output_dir)
    }
}

/// Values used when a row leaves a cell blank.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DefaultsConfig {
    pub layout: String,
    pub lang_code: String,
    /// Replaces a `display_order` that is missing, zero, or negative.
    pub nav_order: i64,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            layout: "home".to_string(),
            lang_code: "en".to_string(),
            nav_order: 1,
        }
    }
}

/// Command-line values that take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub spreadsheet: Option<PathBuf>,
    pub sheet: Option<String>,
    pub output_dir: Option<PathBuf>,
}

impl Overrides {
    /// The overrides as a TOML layer, or `None` when nothing was given.
    pub fn to_toml(&self) -> Option<toml::Value> {
        let mut table = toml::Table::new();
        if let Some(path) = &self.spreadsheet {
            table.insert(
                "spreadsheet".into(),
                path.to_string_lossy().into_owned().into(),
            );
        }
        if let Some(sheet) = &self.sheet {
            table.insert("sheet".into(), sheet.clone().into());
        }
        if let Some(dir) = &self.output_dir {
            table.insert(
                "output_dir".into(),
                dir.to_string_lossy().into_owned().into(),
            );
        }
        (!table.is_empty()).then_some(toml::Value::Table(table))
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer that user overrides are merged onto.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(GeneratorConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge overlays onto a base value in order, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlays: impl IntoIterator<Item = Option<toml::Value>>,
) -> Result<GeneratorConfig, ConfigError> {
    let merged = overlays.into_iter().flatten().fold(base, merge_toml);
    let config: GeneratorConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load the effective configuration.
///
/// An explicit `config_path` must exist. Without one, [`CONFIG_FILE`] in
/// the working directory is used if present.
pub fn load_config(
    config_path: Option<&Path>,
    overrides: &Overrides,
) -> Result<GeneratorConfig, ConfigError> {
    let file_layer = match config_path {
        Some(path) => Some(
            load_raw_config(path)?.ok_or_else(|| ConfigError::NotFound(path.to_path_buf()))?,
        ),
        None => load_raw_config(Path::new(CONFIG_FILE))?,
    };
    resolve_config(stock_defaults_value(), [file_layer, overrides.to_toml()])
}

/// Returns a fully-commented stock `sheetdocs.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# sheetdocs Configuration
# =======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Command-line flags (--spreadsheet, --sheet, --output) override these.
# Unknown keys will cause an error.

# Workbook with one row per page (.xlsx, .xlsm, .xls, .ods).
# Required columns: page_id, title.
# Optional columns: layout, lang_code, parent_id, has_children, display_order.
spreadsheet = "handbook.xlsx"

# Worksheet to read. Omit to use the first sheet.
# sheet = "Pages"

# Directory receiving one <page_id>.md per row.
output_dir = "generated"

# The welcome/root page row. It is skipped and never written.
root_page_id = "00000000_en"

# ---------------------------------------------------------------------------
# Fallbacks for blank cells
# ---------------------------------------------------------------------------
[defaults]
layout = "home"
lang_code = "en"

# Used when display_order is blank, zero, or negative.
nav_order = 1
"##
}
