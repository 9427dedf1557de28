//! rangecal - Entry Point
//!
//! Drives the selection engine from the command line: prints month grids,
//! replays navigation and pointer gestures, and dumps virtualized list sizes.

use chrono::{NaiveDate, Weekday};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

use rangecal::config::ResolvedConfig;
use rangecal::model::{AppError, CalendarEvent, DisplayMode};
use rangecal::report;
use rangecal::state::{CalendarProps, CalendarState, DateBounds, ShownDateChange};
use rangecal::view_state::{Direction, VirtualListHost, VisibleMonths};

/// rangecal - inspect the calendar selection engine
#[derive(Parser, Debug)]
#[command(name = "rangecal")]
#[command(version)]
#[command(about = "Inspect month grids, navigation and drag selection of a calendar engine")]
pub struct Args {
    /// Path to configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// First day of the week (e.g. "Mon", "sunday")
    #[arg(long, global = true, value_parser = parse_weekday)]
    pub week_start: Option<Weekday>,

    /// Months shown at once (must be positive)
    #[arg(long, global = true, value_parser = clap::value_parser!(u32).range(1..))]
    pub months: Option<u32>,

    /// Month stacking axis
    #[arg(long, global = true, value_enum)]
    pub direction: Option<DirectionArg>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Print the day grid of a month
    Grid {
        /// Month as YYYY-MM or any date inside it
        #[arg(long)]
        month: String,
    },

    /// Apply one navigation step and print the resulting shown date
    Navigate {
        /// Currently shown date
        #[arg(long)]
        from: NaiveDate,

        /// Kind of navigation
        #[arg(long, value_enum)]
        mode: NavigateMode,

        /// Month offset, month number (1-12), year, or date, per mode
        #[arg(long, allow_hyphen_values = true)]
        value: String,

        /// Earliest selectable date
        #[arg(long)]
        min: Option<NaiveDate>,

        /// Latest selectable date
        #[arg(long)]
        max: Option<NaiveDate>,
    },

    /// Replay a pointer gesture and print the emitted events
    Drag {
        /// Selection mode
        #[arg(long, value_enum, default_value = "date-range")]
        mode: ModeArg,

        /// Day where the pointer is pressed
        #[arg(long)]
        down: NaiveDate,

        /// Days the held pointer moves over, in order
        #[arg(long = "move")]
        moves: Vec<NaiveDate>,

        /// Day where the pointer is released
        #[arg(long, conflicts_with = "leave")]
        up: Option<NaiveDate>,

        /// Pointer leaves the calendar instead of releasing
        #[arg(long)]
        leave: bool,
    },

    /// Print the extent and offset of every month in the scrolling list
    Sizes {
        /// Earliest selectable date
        #[arg(long)]
        min: Option<NaiveDate>,

        /// Latest selectable date
        #[arg(long)]
        max: Option<NaiveDate>,

        /// Scroll position of the list
        #[arg(long, default_value = "0")]
        scroll_offset: u64,
    },
}

/// Month stacking axis.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectionArg {
    /// Months stacked top to bottom
    Vertical,
    /// Months side by side
    Horizontal,
}

impl From<DirectionArg> for Direction {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::Vertical => Direction::Vertical,
            DirectionArg::Horizontal => Direction::Horizontal,
        }
    }
}

/// Navigation kind.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigateMode {
    /// Move by whole months
    MonthOffset,
    /// Jump to a month of the current year
    SetMonth,
    /// Jump to the same month of another year
    SetYear,
    /// Jump to an explicit date
    Set,
}

/// Selection mode.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeArg {
    /// Single date
    Date,
    /// Date range
    DateRange,
}

impl From<ModeArg> for DisplayMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Date => DisplayMode::Date,
            ModeArg::DateRange => DisplayMode::DateRange,
        }
    }
}

fn parse_weekday(raw: &str) -> Result<Weekday, String> {
    raw.trim()
        .parse::<Weekday>()
        .map_err(|_| format!("{raw:?} is not a weekday name"))
}

/// Parse `YYYY-MM` or `YYYY-MM-DD`.
fn parse_month(raw: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d"))
        .map_err(|e| AppError::invalid_argument("--month", raw, e.to_string()))
}

fn parse_value<T>(raw: &str) -> Result<T, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse::<T>()
        .map_err(|e| AppError::invalid_argument("--value", raw, e.to_string()))
}

fn parse_change(mode: NavigateMode, raw: &str) -> Result<ShownDateChange, AppError> {
    Ok(match mode {
        NavigateMode::MonthOffset => ShownDateChange::MonthOffset(parse_value::<i32>(raw)?),
        NavigateMode::SetMonth => ShownDateChange::SetMonth(parse_value::<u32>(raw)?),
        NavigateMode::SetYear => ShownDateChange::SetYear(parse_value::<i32>(raw)?),
        NavigateMode::Set => ShownDateChange::Set(parse_value::<NaiveDate>(raw)?),
    })
}

/// Explicit bounds override the configured span around `today`.
fn bounds_from(
    config: &ResolvedConfig,
    today: NaiveDate,
    min: Option<NaiveDate>,
    max: Option<NaiveDate>,
) -> DateBounds {
    let span = DateBounds::spanning(today, config.min_years_back, config.max_years_ahead);
    DateBounds::new(min.unwrap_or(span.min_date), max.unwrap_or(span.max_date))
}

#[derive(Serialize)]
struct NavigateOutput {
    shown_date: NaiveDate,
    events: Vec<CalendarEvent>,
}

#[derive(Serialize)]
struct SizesOutput {
    visible: VisibleMonths,
    months: Vec<report::SizeRow>,
}

fn emit(json: bool, value: &impl Serialize, text: impl FnOnce() -> String) -> Result<(), AppError> {
    let mut stdout = std::io::stdout().lock();
    if json {
        serde_json::to_writer_pretty(&mut stdout, value)?;
        writeln!(stdout)?;
    } else {
        writeln!(stdout, "{}", text())?;
    }
    Ok(())
}

fn run(
    command: Command,
    config: &ResolvedConfig,
    today: NaiveDate,
    json: bool,
) -> Result<(), AppError> {
    match command {
        Command::Grid { month } => {
            let month = parse_month(&month)?;
            let props = config.calendar_props(today);
            let locale = props.locale;
            let state = CalendarState::new(props, today);
            let grid = state.month_grid(month);
            emit(json, &grid, || report::render_month_grid(&grid, &locale))
        }

        Command::Navigate { from, mode, value, min, max } => {
            let change = parse_change(mode, &value)?;
            let props = CalendarProps {
                shown_date: Some(from),
                bounds: Some(bounds_from(config, today, min, max)),
                ..config.calendar_props(today)
            };
            let mut state = CalendarState::new(props, today);
            let events = state.change_shown_date(change, None);
            let output = NavigateOutput {
                shown_date: state.focused_date(),
                events,
            };
            emit(json, &output, || report::render_events(&output.events))
        }

        Command::Drag { mode, down, moves, up, leave } => {
            let props = CalendarProps {
                display_mode: mode.into(),
                ..config.calendar_props(today)
            };
            let mut state = CalendarState::new(props, today);
            let mut events = state.pointer_down(down);
            for date in moves {
                state.pointer_move(date);
            }
            if let Some(date) = up {
                events.extend(state.pointer_up(date));
            } else if leave {
                events.extend(state.pointer_leave());
            }
            emit(json, &events, || report::render_events(&events))
        }

        Command::Sizes { min, max, scroll_offset } => {
            let mut props = config.calendar_props(today);
            props.bounds = Some(bounds_from(config, today, min, max));
            props.scroll.enabled = true;
            let state = CalendarState::new(props, today);
            let mut viewport = state.build_viewport();
            viewport.set_scroll_offset(scroll_offset);
            let output = SizesOutput {
                visible: viewport.visible_range(),
                months: report::size_rows(&state),
            };
            emit(json, &output, || report::render_sizes(&output.months, output.visible))
        }
    }
}

fn main() -> Result<(), AppError> {
    let args = Args::parse();

    // Load configuration with full precedence chain:
    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = rangecal::config::load_config_with_precedence(args.config.clone())?;
        let merged = rangecal::config::merge_config(config_file);
        let with_env = rangecal::config::apply_env_overrides(merged)?;
        rangecal::config::apply_cli_overrides(
            with_env,
            args.week_start,
            args.months,
            args.direction.map(Direction::from),
        )
    };

    rangecal::logging::init(&config.log_file_path)?;

    info!(
        config = ?config,
        command = ?args.command,
        "Configuration loaded and resolved"
    );

    let today = chrono::Local::now().date_naive();
    run(args.command, &config, today, args.json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn help_does_not_error() {
        let err = Args::try_parse_from(["rangecal", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn version_does_not_error() {
        let err = Args::try_parse_from(["rangecal", "--version"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Args::try_parse_from(["rangecal"]).is_err());
    }

    #[test]
    fn grid_defaults() {
        let args = Args::parse_from(["rangecal", "grid", "--month", "2024-02"]);
        assert_eq!(
            args.command,
            Command::Grid {
                month: "2024-02".to_string()
            }
        );
        assert_eq!(args.config, None);
        assert_eq!(args.week_start, None);
        assert_eq!(args.months, None);
        assert_eq!(args.direction, None);
        assert!(!args.json);
    }

    #[test]
    fn global_options_after_subcommand() {
        let args = Args::parse_from([
            "rangecal", "grid", "--month", "2024-02", "--week-start", "monday", "--json",
        ]);
        assert_eq!(args.week_start, Some(Weekday::Mon));
        assert!(args.json);
    }

    #[test]
    fn week_start_rejects_garbage() {
        let result = Args::try_parse_from([
            "rangecal", "--week-start", "someday", "grid", "--month", "2024-02",
        ]);
        assert_eq!(result.unwrap_err().kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn months_rejects_zero() {
        let result =
            Args::try_parse_from(["rangecal", "--months", "0", "grid", "--month", "2024-02"]);
        assert_eq!(result.unwrap_err().kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn direction_parses_value_enum() {
        let args = Args::parse_from([
            "rangecal", "--direction", "horizontal", "grid", "--month", "2024-02",
        ]);
        assert_eq!(args.direction, Some(DirectionArg::Horizontal));
        assert_eq!(Direction::from(DirectionArg::Horizontal), Direction::Horizontal);
    }

    #[test]
    fn navigate_accepts_negative_offset() {
        let args = Args::parse_from([
            "rangecal", "navigate", "--from", "2024-03-15", "--mode", "month-offset",
            "--value", "-2",
        ]);
        assert_eq!(
            args.command,
            Command::Navigate {
                from: d(2024, 3, 15),
                mode: NavigateMode::MonthOffset,
                value: "-2".to_string(),
                min: None,
                max: None,
            }
        );
    }

    #[test]
    fn drag_collects_moves_in_order() {
        let args = Args::parse_from([
            "rangecal", "drag", "--down", "2024-03-05", "--move", "2024-03-07",
            "--move", "2024-03-02", "--up", "2024-03-02",
        ]);
        let Command::Drag { mode, moves, up, leave, .. } = args.command else {
            panic!("expected drag");
        };
        assert_eq!(mode, ModeArg::DateRange);
        assert_eq!(moves, vec![d(2024, 3, 7), d(2024, 3, 2)]);
        assert_eq!(up, Some(d(2024, 3, 2)));
        assert!(!leave);
    }

    #[test]
    fn drag_up_conflicts_with_leave() {
        let result = Args::try_parse_from([
            "rangecal", "drag", "--down", "2024-03-05", "--up", "2024-03-06", "--leave",
        ]);
        assert_eq!(result.unwrap_err().kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn parse_month_accepts_month_or_date() {
        assert_eq!(parse_month("2024-02").unwrap(), d(2024, 2, 1));
        assert_eq!(parse_month("2024-02-14").unwrap(), d(2024, 2, 14));
        assert!(matches!(
            parse_month("2024-13"),
            Err(AppError::InvalidArgument { argument: "--month", .. })
        ));
    }

    #[test]
    fn parse_change_follows_mode() {
        assert_eq!(
            parse_change(NavigateMode::MonthOffset, "-3").unwrap(),
            ShownDateChange::MonthOffset(-3)
        );
        assert_eq!(
            parse_change(NavigateMode::SetMonth, "7").unwrap(),
            ShownDateChange::SetMonth(7)
        );
        assert_eq!(
            parse_change(NavigateMode::SetYear, "1999").unwrap(),
            ShownDateChange::SetYear(1999)
        );
        assert_eq!(
            parse_change(NavigateMode::Set, "2024-02-29").unwrap(),
            ShownDateChange::Set(d(2024, 2, 29))
        );
        assert!(matches!(
            parse_change(NavigateMode::SetYear, "soon"),
            Err(AppError::InvalidArgument { argument: "--value", .. })
        ));
    }

    #[test]
    fn explicit_bounds_override_configured_span() {
        let config = ResolvedConfig {
            min_years_back: 1,
            max_years_ahead: 1,
            ..ResolvedConfig::default()
        };
        let today = d(2024, 6, 15);
        assert_eq!(
            bounds_from(&config, today, None, None),
            DateBounds::new(d(2023, 6, 15), d(2025, 6, 15))
        );
        assert_eq!(
            bounds_from(&config, today, Some(d(2024, 1, 1)), None),
            DateBounds::new(d(2024, 1, 1), d(2025, 6, 15))
        );
    }
}
