//! Configuration file loading with precedence handling.

use chrono::{NaiveDate, Weekday};
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

use crate::calendar::date_math::LocaleConfig;
use crate::state::calendar_state::{CalendarProps, DEFAULT_COLOR, DEFAULT_RANGE_COLORS};
use crate::state::navigator::{DateBounds, DEFAULT_MAX_YEARS_AHEAD, DEFAULT_MIN_YEARS_BACK};
use crate::view_state::scroll_area::{Direction, ScrollOptions};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "RANGECAL_CONFIG";
/// Environment variable overriding the week start.
pub const WEEK_START_ENV_VAR: &str = "RANGECAL_WEEK_START";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Config file path contains invalid UTF-8 or cannot be resolved.
    #[error("Invalid config path: {0}")]
    InvalidPath(String),

    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// An environment override could not be parsed.
    #[error("Invalid value {value:?} for {name}")]
    InvalidEnvValue {
        /// Variable name.
        name: &'static str,
        /// Raw value.
        value: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/rangecal/config.toml`:
///
/// ```toml
/// week_start = "Mon"
/// months = 2
/// direction = "horizontal"
///
/// [scroll]
/// enabled = true
/// month_width = 300
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// First day of the week ("Sun", "Monday", ...).
    #[serde(default)]
    pub week_start: Option<Weekday>,

    /// Months shown at once.
    #[serde(default)]
    pub months: Option<u32>,

    /// Month stacking axis.
    #[serde(default)]
    pub direction: Option<Direction>,

    /// Pointer-down starts a drag.
    #[serde(default)]
    pub drag_selection: Option<bool>,

    /// Hover previews.
    #[serde(default)]
    pub show_preview: Option<bool>,

    /// Date display header.
    #[serde(default)]
    pub show_date_display: Option<bool>,

    /// Calendar color.
    #[serde(default)]
    pub color: Option<String>,

    /// Per-range palette.
    #[serde(default)]
    pub range_colors: Option<Vec<String>>,

    /// Virtualized scrolling section.
    #[serde(default)]
    pub scroll: Option<ScrollOptions>,

    /// Years before today that stay selectable.
    #[serde(default)]
    pub min_years_back: Option<i32>,

    /// Years after today that stay selectable.
    #[serde(default)]
    pub max_years_ahead: Option<i32>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// First day of the week.
    pub week_start: Weekday,
    /// Months shown at once.
    pub months: u32,
    /// Month stacking axis.
    pub direction: Direction,
    /// Pointer-down starts a drag.
    pub drag_selection: bool,
    /// Hover previews.
    pub show_preview: bool,
    /// Date display header.
    pub show_date_display: bool,
    /// Calendar color.
    pub color: String,
    /// Per-range palette.
    pub range_colors: Vec<String>,
    /// Virtualized scrolling.
    pub scroll: ScrollOptions,
    /// Years before today that stay selectable.
    pub min_years_back: i32,
    /// Years after today that stay selectable.
    pub max_years_ahead: i32,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            week_start: LocaleConfig::default().week_start,
            months: 1,
            direction: Direction::default(),
            drag_selection: true,
            show_preview: true,
            show_date_display: true,
            color: DEFAULT_COLOR.to_string(),
            range_colors: DEFAULT_RANGE_COLORS.iter().map(|c| c.to_string()).collect(),
            scroll: ScrollOptions::default(),
            min_years_back: DEFAULT_MIN_YEARS_BACK,
            max_years_ahead: DEFAULT_MAX_YEARS_AHEAD,
            log_file_path: default_log_path(),
        }
    }
}

impl ResolvedConfig {
    /// Calendar props seeded from this configuration. Selection state is empty.
    pub fn calendar_props(&self, today: NaiveDate) -> CalendarProps {
        CalendarProps {
            bounds: Some(DateBounds::spanning(today, self.min_years_back, self.max_years_ahead)),
            months: self.months,
            locale: LocaleConfig::with_week_start(self.week_start),
            scroll: self.scroll,
            direction: self.direction,
            drag_selection_enabled: self.drag_selection,
            show_preview: self.show_preview,
            show_date_display: self.show_date_display,
            color: self.color.clone(),
            range_colors: self.range_colors.clone(),
            ..CalendarProps::default()
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/rangecal/rangecal.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    match dirs::state_dir() {
        Some(state_dir) => state_dir.join("rangecal").join("rangecal.log"),
        None => PathBuf::from("rangecal.log"),
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/rangecal/config.toml` on Unix, appropriate path on other platforms.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("rangecal").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `RANGECAL_CONFIG` environment variable
/// 3. Default path `~/.config/rangecal/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
        return load_config_file(PathBuf::from(env_path));
    }

    match default_config_path() {
        Some(default_path) => load_config_file(default_path),
        None => Ok(None),
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks `RANGECAL_WEEK_START` ("Mon", "sunday", ...).
///
/// # Errors
///
/// Returns error if the variable is set but is not a weekday name.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> Result<ResolvedConfig, ConfigError> {
    if let Ok(value) = std::env::var(WEEK_START_ENV_VAR) {
        config.week_start = value
            .trim()
            .parse::<Weekday>()
            .map_err(|_| ConfigError::InvalidEnvValue {
                name: WEEK_START_ENV_VAR,
                value,
            })?;
    }

    Ok(config)
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        week_start: config.week_start.unwrap_or(defaults.week_start),
        months: config.months.unwrap_or(defaults.months),
        direction: config.direction.unwrap_or(defaults.direction),
        drag_selection: config.drag_selection.unwrap_or(defaults.drag_selection),
        show_preview: config.show_preview.unwrap_or(defaults.show_preview),
        show_date_display: config
            .show_date_display
            .unwrap_or(defaults.show_date_display),
        color: config.color.unwrap_or(defaults.color),
        range_colors: config.range_colors.unwrap_or(defaults.range_colors),
        scroll: config.scroll.unwrap_or(defaults.scroll),
        min_years_back: config.min_years_back.unwrap_or(defaults.min_years_back),
        max_years_ahead: config.max_years_ahead.unwrap_or(defaults.max_years_ahead),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    week_start_override: Option<Weekday>,
    months_override: Option<u32>,
    direction_override: Option<Direction>,
) -> ResolvedConfig {
    if let Some(week_start) = week_start_override {
        config.week_start = week_start;
    }

    if let Some(months) = months_override {
        config.months = months;
    }

    if let Some(direction) = direction_override {
        config.direction = direction;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
