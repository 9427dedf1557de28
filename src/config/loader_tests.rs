//! Tests for configuration file loading.

use super::*;
use serial_test::serial;
use std::env;
use std::fs;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

/// RAII guard to ensure environment variable cleanup even under test parallelism.
/// Removes the var on drop, preventing test pollution in parallel execution.
struct EnvGuard(&'static str);

impl EnvGuard {
    fn new(name: &'static str) -> Self {
        env::remove_var(name);
        EnvGuard(name)
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        env::remove_var(self.0);
    }
}

// ===== Paths =====

#[test]
fn default_config_path_contains_rangecal_config_toml() {
    let Some(path) = default_config_path() else {
        return;
    };
    let path_str = path.to_string_lossy();
    assert!(
        path_str.contains("rangecal") && path_str.ends_with("config.toml"),
        "Path should contain 'rangecal' and end with 'config.toml', got: {}",
        path_str
    );
}

#[test]
fn default_log_path_ends_with_rangecal_log() {
    let path = default_log_path();
    assert!(
        path.to_string_lossy().ends_with("rangecal.log"),
        "Default log path should end with 'rangecal.log', got: {:?}",
        path
    );
}

// ===== Loading =====

#[test]
fn load_config_file_returns_ok_none_for_missing_file() {
    let result = load_config_file("/nonexistent/path/to/config.toml");
    assert_eq!(
        result,
        Ok(None),
        "Missing config file should return Ok(None), not an error"
    );
}

#[test]
fn load_config_file_parses_valid_toml() {
    let config_path = env::temp_dir().join("rangecal_test_config.toml");

    let toml_content = r##"
week_start = "Mon"
months = 2
direction = "horizontal"
drag_selection = false
color = "#112233"
range_colors = ["#aa0000", "#00aa00"]
min_years_back = 5

[scroll]
enabled = true
month_width = 300
"##;

    fs::write(&config_path, toml_content).expect("Failed to write test config");

    let config = load_config_file(&config_path)
        .expect("Should successfully parse valid TOML")
        .expect("Should return Some(ConfigFile) for existing file");

    assert_eq!(config.week_start, Some(Weekday::Mon));
    assert_eq!(config.months, Some(2));
    assert_eq!(config.direction, Some(Direction::Horizontal));
    assert_eq!(config.drag_selection, Some(false));
    assert_eq!(config.color.as_deref(), Some("#112233"));
    assert_eq!(
        config.range_colors,
        Some(vec!["#aa0000".to_string(), "#00aa00".to_string()])
    );
    assert_eq!(config.min_years_back, Some(5));
    assert_eq!(config.max_years_ahead, None);
    let scroll = config.scroll.expect("scroll section");
    assert!(scroll.enabled);
    assert_eq!(scroll.month_width, Some(300));
    assert_eq!(scroll.month_height, None);

    fs::remove_file(config_path).ok();
}

#[test]
fn load_config_file_returns_error_for_invalid_toml() {
    let config_path = env::temp_dir().join("rangecal_test_invalid.toml");
    fs::write(&config_path, "months = [unclosed").expect("Failed to write test config");

    let result = load_config_file(&config_path);
    assert!(
        matches!(result, Err(ConfigError::ParseError { .. })),
        "Invalid TOML should be a parse error, got {:?}",
        result
    );

    fs::remove_file(config_path).ok();
}

#[test]
fn config_file_accepts_full_weekday_names() {
    let config: ConfigFile = toml::from_str(r#"week_start = "Saturday""#).unwrap();
    assert_eq!(config.week_start, Some(Weekday::Sat));
}

#[test]
fn config_file_rejects_unknown_fields() {
    let result: Result<ConfigFile, _> = toml::from_str(
        r#"
months = 1
theme = "should fail"
"#,
    );
    assert!(
        result.is_err(),
        "Should reject TOML with unknown fields due to deny_unknown_fields"
    );
}

#[test]
fn scroll_section_rejects_unknown_fields() {
    let result: Result<ConfigFile, _> = toml::from_str(
        r#"
[scroll]
enabled = true
row_height = 10
"#,
    );
    assert!(result.is_err());
}

// ===== Merging =====

#[test]
fn resolved_config_default_has_expected_values() {
    let config = ResolvedConfig::default();

    assert_eq!(config.week_start, Weekday::Sun);
    assert_eq!(config.months, 1);
    assert_eq!(config.direction, Direction::Vertical);
    assert!(config.drag_selection);
    assert!(config.show_preview);
    assert_eq!(config.color, "#3d91ff");
    assert_eq!(config.range_colors, vec!["#3d91ff", "#3ecf8e", "#fed14c"]);
    assert!(!config.scroll.enabled);
    assert_eq!(config.min_years_back, 100);
    assert_eq!(config.max_years_ahead, 20);
}

#[test]
fn merge_config_uses_defaults_when_none() {
    assert_eq!(merge_config(None), ResolvedConfig::default());
}

#[test]
fn merge_config_uses_defaults_for_none_fields() {
    let config_file = ConfigFile {
        months: Some(3),
        ..ConfigFile::default()
    };
    let resolved = merge_config(Some(config_file));
    let defaults = ResolvedConfig::default();

    assert_eq!(resolved.months, 3);
    assert_eq!(resolved.week_start, defaults.week_start);
    assert_eq!(resolved.color, defaults.color);
    assert_eq!(resolved.log_file_path, defaults.log_file_path);
}

#[test]
fn config_file_log_path_overrides_default() {
    let custom_path = PathBuf::from("/custom/path/to/rangecal.log");
    let config_file = ConfigFile {
        log_file_path: Some(custom_path.clone()),
        ..ConfigFile::default()
    };
    assert_eq!(merge_config(Some(config_file)).log_file_path, custom_path);
}

#[test]
fn calendar_props_carry_resolved_settings() {
    let config = ResolvedConfig {
        week_start: Weekday::Mon,
        months: 2,
        min_years_back: 1,
        max_years_ahead: 2,
        drag_selection: false,
        ..ResolvedConfig::default()
    };
    let props = config.calendar_props(d(2024, 6, 15));

    assert_eq!(props.locale.week_start, Weekday::Mon);
    assert_eq!(props.months, 2);
    assert!(!props.drag_selection_enabled);
    assert_eq!(
        props.bounds,
        Some(DateBounds::new(d(2023, 6, 15), d(2026, 6, 15)))
    );
    assert!(props.ranges.is_empty());
}

// ===== Environment =====

#[test]
#[serial(rangecal_week_start)]
fn apply_env_overrides_respects_week_start() {
    let _guard = EnvGuard::new(WEEK_START_ENV_VAR);
    env::set_var(WEEK_START_ENV_VAR, "monday");

    let result = apply_env_overrides(ResolvedConfig::default()).unwrap();
    assert_eq!(result.week_start, Weekday::Mon);
}

#[test]
#[serial(rangecal_week_start)]
fn apply_env_overrides_no_change_when_env_var_not_set() {
    let _guard = EnvGuard::new(WEEK_START_ENV_VAR);

    let base = ResolvedConfig::default();
    assert_eq!(apply_env_overrides(base.clone()), Ok(base));
}

#[test]
#[serial(rangecal_week_start)]
fn apply_env_overrides_rejects_garbage() {
    let _guard = EnvGuard::new(WEEK_START_ENV_VAR);
    env::set_var(WEEK_START_ENV_VAR, "someday");

    let result = apply_env_overrides(ResolvedConfig::default());
    assert_eq!(
        result,
        Err(ConfigError::InvalidEnvValue {
            name: WEEK_START_ENV_VAR,
            value: "someday".to_string(),
        })
    );
}

#[test]
#[serial(rangecal_config)]
fn load_config_with_precedence_prefers_explicit_path() {
    let _guard = EnvGuard::new(CONFIG_ENV_VAR);

    let temp_dir = env::temp_dir();
    let explicit_path = temp_dir.join("rangecal_explicit.toml");
    fs::write(&explicit_path, "months = 4").expect("Failed to write explicit config");

    // CONFIG_ENV_VAR points elsewhere and must be ignored
    let env_path = temp_dir.join("rangecal_env.toml");
    fs::write(&env_path, "months = 9").expect("Failed to write env config");
    env::set_var(CONFIG_ENV_VAR, env_path.to_str().unwrap());

    let config = load_config_with_precedence(Some(explicit_path.clone()))
        .unwrap()
        .unwrap();
    assert_eq!(config.months, Some(4), "Should use explicit path, not env var");

    fs::remove_file(explicit_path).ok();
    fs::remove_file(env_path).ok();
}

#[test]
#[serial(rangecal_config)]
fn load_config_with_precedence_uses_env_var_when_no_explicit_path() {
    let _guard = EnvGuard::new(CONFIG_ENV_VAR);

    let env_path = env::temp_dir().join("rangecal_env_only.toml");
    fs::write(&env_path, "months = 6").expect("Failed to write env config");
    env::set_var(CONFIG_ENV_VAR, env_path.to_str().unwrap());

    let config = load_config_with_precedence(None).unwrap().unwrap();
    assert_eq!(config.months, Some(6));

    fs::remove_file(env_path).ok();
}

// ===== CLI =====

#[test]
fn apply_cli_overrides_no_overrides() {
    let base = ResolvedConfig::default();
    assert_eq!(apply_cli_overrides(base.clone(), None, None, None), base);
}

#[test]
#[serial(rangecal_week_start)]
fn precedence_chain_full_defaults_to_cli() {
    let _guard = EnvGuard::new(WEEK_START_ENV_VAR);

    // Defaults → Config File
    let config_file = ConfigFile {
        week_start: Some(Weekday::Tue),
        months: Some(2),
        ..ConfigFile::default()
    };
    let merged = merge_config(Some(config_file));
    assert_eq!(merged.week_start, Weekday::Tue);

    // → Env Vars
    env::set_var(WEEK_START_ENV_VAR, "Wed");
    let with_env = apply_env_overrides(merged).unwrap();
    assert_eq!(with_env.week_start, Weekday::Wed, "Env overrides config file");

    // → CLI Args
    let with_cli = apply_cli_overrides(
        with_env,
        Some(Weekday::Thu),
        None,
        Some(Direction::Horizontal),
    );
    assert_eq!(with_cli.week_start, Weekday::Thu, "CLI overrides env");
    assert_eq!(with_cli.months, 2, "Config file value survives");
    assert_eq!(with_cli.direction, Direction::Horizontal, "CLI overrides default");
}
