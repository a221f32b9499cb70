mod app;
mod help;
use crate::app::App;
use anyhow::Context;
use datepick::{HolidayTable, LocaleOverrides, PickerOptions};
use lexopt::{Arg, Parser, ValueExt};
use ratatui::DefaultTerminal;
use std::ffi::OsString;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use time::{format_description::FormatItem, macros::format_description, Date, OffsetDateTime};

static YMD_FMT: &[FormatItem<'_>] = format_description!("[year]-[month]-[day]");

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run(Config),
    Help,
    Version,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut config = Config::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Long("min") => config.min_date = Some(parse_date(parser.value()?)?),
                Arg::Long("max") => config.max_date = Some(parse_date(parser.value()?)?),
                Arg::Long("disable-past") => config.disable_past = true,
                Arg::Long("disable-future") => config.disable_future = true,
                Arg::Long("show-today") => config.show_today = true,
                Arg::Long("no-holidays") => config.no_holidays = true,
                Arg::Long("holidays") => config.holidays = Some(PathBuf::from(parser.value()?)),
                Arg::Long("format") => config.format = Some(parser.value()?.string()?),
                Arg::Long("locale") => config.locale = parser.value()?.parse()?,
                Arg::Long("log-file") => config.log_file = Some(PathBuf::from(parser.value()?)),
                Arg::Value(value) if config.date.is_none() => {
                    config.date = Some(parse_date(value)?);
                }
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run(config))
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run(config) => {
                if let Some(path) = &config.log_file {
                    init_logging(path)?;
                }
                let today = OffsetDateTime::now_local()
                    .context("failed to determine local date")?
                    .date();
                let picker = config
                    .picker_options()
                    .build(today)
                    .context("invalid display format or locale")?;
                let value = with_terminal(|terminal| {
                    App::new(picker, local_today)
                        .run(terminal)
                        .context("failed to run date picker")
                })?;
                if let Some(s) = value {
                    println!("{s}");
                }
                Ok(())
            }
            Command::Help => {
                println!("Usage: datepick [OPTIONS] [YYYY-MM-DD]");
                println!();
                println!("Date-entry widget with free-text parsing and a popover calendar");
                println!();
                println!("Options:");
                println!("  --min YYYY-MM-DD      Earliest selectable date");
                println!("  --max YYYY-MM-DD      Latest selectable date");
                println!("  --disable-past        Do not allow dates before today");
                println!("  --disable-future      Do not allow dates after today");
                println!("  --show-today          Highlight today in the calendar");
                println!("  --no-holidays         Do not color holidays");
                println!("  --holidays FILE       Read holidays from the given JSON file");
                println!("  --format FMT          Display dates using the given format");
                println!("                        description, e.g. \"[month]/[day]/[year]\"");
                println!("  --locale en|ko        Language of the widget [default: en]");
                println!("  --log-file FILE       Write log messages to the given file");
                println!("  -h, --help            Display this help message and exit");
                println!("  -V, --version         Show the program version and exit");
                Ok(())
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

/// Settings for running the picker, gathered from the command line
#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct Config {
    date: Option<Date>,
    min_date: Option<Date>,
    max_date: Option<Date>,
    disable_past: bool,
    disable_future: bool,
    show_today: bool,
    no_holidays: bool,
    holidays: Option<PathBuf>,
    format: Option<String>,
    locale: LocaleName,
    log_file: Option<PathBuf>,
}

impl Config {
    fn picker_options(&self) -> PickerOptions {
        let mut options = PickerOptions::new()
            .value(self.date)
            .min_date(self.min_date)
            .max_date(self.max_date)
            .disable_past(self.disable_past)
            .disable_future(self.disable_future)
            .show_today(self.show_today)
            .show_holidays(!self.no_holidays)
            .locale(self.locale.overrides());
        if let Some(fmt) = &self.format {
            options = options.display_format(fmt.as_str());
        }
        if let Some(path) = self.holidays.as_ref().filter(|_| !self.no_holidays) {
            options = options.holidays(HolidayTable::load_or_empty(path));
        }
        options
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
enum LocaleName {
    #[default]
    English,
    Korean,
}

impl LocaleName {
    fn overrides(self) -> LocaleOverrides {
        match self {
            LocaleName::English => LocaleOverrides::new(),
            LocaleName::Korean => LocaleOverrides::korean(),
        }
    }
}

impl FromStr for LocaleName {
    type Err = UnknownLocaleError;

    fn from_str(s: &str) -> Result<LocaleName, UnknownLocaleError> {
        match s {
            "en" => Ok(LocaleName::English),
            "ko" => Ok(LocaleName::Korean),
            _ => Err(UnknownLocaleError),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, Hash, PartialEq)]
#[error(r#"unknown locale; expected "en" or "ko""#)]
struct UnknownLocaleError;

fn parse_date(value: OsString) -> Result<Date, lexopt::Error> {
    let value = value.string()?;
    match Date::parse(&value, &YMD_FMT) {
        Ok(d) => Ok(d),
        Err(e) => Err(lexopt::Error::ParsingFailed {
            value,
            error: Box::new(e),
        }),
    }
}

/// Send log messages to `path`.  The terminal belongs to the UI, so nothing
/// is logged unless a file is given.
fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    log::debug!("{} {} starting", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    Ok(())
}

fn local_today() -> Option<Date> {
    OffsetDateTime::now_local().ok().map(OffsetDateTime::date)
}

fn main() -> anyhow::Result<()> {
    Command::from_parser(Parser::from_env())?.run()
}

fn with_terminal<F, T>(func: F) -> anyhow::Result<T>
where
    F: FnOnce(DefaultTerminal) -> anyhow::Result<T>,
{
    let terminal = ratatui::init();
    let r = func(terminal);
    ratatui::restore();
    r
}
