use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;
use thiserror::Error;
use time::{
    error::InvalidFormatDescription,
    format_description::{self, OwnedFormatItem},
    macros::date,
    Date, Month, Weekday,
};

static DEFAULT_LOCALE: LazyLock<Locale> =
    LazyLock::new(|| english().expect("built-in English locale should be valid"));

/// A `time` format description such as `[year]-[month]-[day]`, parsed once
/// and kept together with its source text.
#[derive(Clone)]
pub struct DateFormat {
    source: String,
    items: OwnedFormatItem,
}

impl DateFormat {
    pub fn new(source: &str) -> Result<DateFormat, LocaleError> {
        let items =
            format_description::parse_owned::<1>(source).map_err(|e| LocaleError::Format {
                format: source.to_owned(),
                source: e,
            })?;
        // Descriptions with time-of-day or offset components cannot format a
        // bare date; catch them here instead of at display time.
        if let Err(e) = date!(2000 - 01 - 01).format(&items) {
            return Err(LocaleError::Unformattable {
                format: source.to_owned(),
                source: e,
            });
        }
        Ok(DateFormat {
            source: source.to_owned(),
            items,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn format(&self, date: Date) -> String {
        date.format(&self.items).unwrap_or_else(|_| date.to_string())
    }
}

impl FromStr for DateFormat {
    type Err = LocaleError;

    fn from_str(s: &str) -> Result<DateFormat, LocaleError> {
        DateFormat::new(s)
    }
}

impl PartialEq for DateFormat {
    fn eq(&self, other: &DateFormat) -> bool {
        self.source == other.source
    }
}

impl Eq for DateFormat {}

impl fmt::Debug for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DateFormat").field(&self.source).finish()
    }
}

/// Text, formats, and input patterns used by the picker.
///
/// `week_days` starts on Sunday.  Every entry of `parse_patterns` has exactly
/// three capture groups: year, month, and day, in that order.
#[derive(Clone, Debug)]
pub struct Locale {
    pub week_days: [String; 7],
    pub month_names: [String; 12],
    pub today: String,
    pub placeholder: String,
    pub error_message: String,
    pub date_format: DateFormat,
    pub year_format: DateFormat,
    pub month_format: DateFormat,
    pub year_range_format: fn(i32, i32) -> String,
    pub parse_patterns: Vec<Regex>,
    pub parse_examples: Vec<String>,
}

impl Locale {
    /// Build a new locale from `self`, replacing each field that is set in
    /// `overrides`
    pub fn merge(&self, overrides: LocaleOverrides) -> Result<Locale, LocaleError> {
        let LocaleOverrides {
            week_days,
            month_names,
            today,
            placeholder,
            error_message,
            date_format,
            year_format,
            month_format,
            year_range_format,
            parse_patterns,
            parse_examples,
        } = overrides;
        Ok(Locale {
            week_days: week_days.unwrap_or_else(|| self.week_days.clone()),
            month_names: month_names.unwrap_or_else(|| self.month_names.clone()),
            today: today.unwrap_or_else(|| self.today.clone()),
            placeholder: placeholder.unwrap_or_else(|| self.placeholder.clone()),
            error_message: error_message.unwrap_or_else(|| self.error_message.clone()),
            date_format: merge_format(date_format, &self.date_format)?,
            year_format: merge_format(year_format, &self.year_format)?,
            month_format: merge_format(month_format, &self.month_format)?,
            year_range_format: year_range_format.unwrap_or(self.year_range_format),
            parse_patterns: match parse_patterns {
                Some(patterns) => patterns
                    .iter()
                    .map(|p| compile_pattern(p))
                    .collect::<Result<Vec<_>, _>>()?,
                None => self.parse_patterns.clone(),
            },
            parse_examples: parse_examples.unwrap_or_else(|| self.parse_examples.clone()),
        })
    }

    pub fn month_name(&self, month: Month) -> &str {
        &self.month_names[usize::from(u8::from(month)) - 1]
    }

    pub fn weekday_name(&self, weekday: Weekday) -> &str {
        &self.week_days[usize::from(weekday.number_days_from_sunday())]
    }

    pub fn year_range(&self, start: i32, end: i32) -> String {
        (self.year_range_format)(start, end)
    }
}

impl Default for Locale {
    fn default() -> Locale {
        DEFAULT_LOCALE.clone()
    }
}

impl TryFrom<LocaleOverrides> for Locale {
    type Error = LocaleError;

    fn try_from(overrides: LocaleOverrides) -> Result<Locale, LocaleError> {
        DEFAULT_LOCALE.merge(overrides)
    }
}

/// A partial [`Locale`]: every field left as `None` falls back to the locale
/// it is merged over.
///
/// Formats and patterns are given as source text and validated on merge.
#[derive(Clone, Debug, Default)]
pub struct LocaleOverrides {
    pub week_days: Option<[String; 7]>,
    pub month_names: Option<[String; 12]>,
    pub today: Option<String>,
    pub placeholder: Option<String>,
    pub error_message: Option<String>,
    pub date_format: Option<String>,
    pub year_format: Option<String>,
    pub month_format: Option<String>,
    pub year_range_format: Option<fn(i32, i32) -> String>,
    pub parse_patterns: Option<Vec<String>>,
    pub parse_examples: Option<Vec<String>>,
}

impl LocaleOverrides {
    pub fn new() -> LocaleOverrides {
        LocaleOverrides::default()
    }

    pub fn korean() -> LocaleOverrides {
        LocaleOverrides {
            week_days: Some(["일", "월", "화", "수", "목", "금", "토"].map(String::from)),
            month_names: Some(
                [
                    "1월", "2월", "3월", "4월", "5월", "6월", "7월", "8월", "9월", "10월", "11월",
                    "12월",
                ]
                .map(String::from),
            ),
            today: Some(String::from("오늘")),
            placeholder: Some(String::from("날짜를 입력해주세요")),
            error_message: Some(String::from(
                "올바른 날짜 형식을 입력해주세요 (예: 20240112, 2025-01-01, 2025년1월1일)",
            )),
            date_format: Some(String::from("[year]년 [month padding:none]월 [day]일")),
            year_format: Some(String::from("[year]년")),
            month_format: Some(String::from("[year]년 [month padding:none]월")),
            year_range_format: Some(korean_year_range),
            parse_patterns: Some(
                [
                    r"^(\d{4})-(\d{1,2})-(\d{1,2})$",
                    r"^(\d{4})년\s*(\d{1,2})월\s*(\d{1,2})일$",
                    r"^(\d{4})/(\d{1,2})/(\d{1,2})$",
                    r"^(\d{4})\.\s*(\d{1,2})\.\s*(\d{1,2})$",
                ]
                .map(String::from)
                .to_vec(),
            ),
            parse_examples: Some(
                ["20240112", "2025-01-01", "2025년1월1일"]
                    .map(String::from)
                    .to_vec(),
            ),
        }
    }
}

#[derive(Debug, Error)]
pub enum LocaleError {
    #[error("invalid date format {format:?}")]
    Format {
        format: String,
        source: InvalidFormatDescription,
    },
    #[error("date format {format:?} cannot display a bare date")]
    Unformattable {
        format: String,
        source: time::error::Format,
    },
    #[error("invalid parse pattern")]
    Pattern(#[from] regex::Error),
    #[error("parse pattern {pattern:?} must have exactly 3 capture groups, found {groups}")]
    PatternGroups { pattern: String, groups: usize },
}

fn english() -> Result<Locale, LocaleError> {
    Ok(Locale {
        week_days: ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"].map(String::from),
        month_names: [
            "January",
            "February",
            "March",
            "April",
            "May",
            "June",
            "July",
            "August",
            "September",
            "October",
            "November",
            "December",
        ]
        .map(String::from),
        today: String::from("Today"),
        placeholder: String::from("Enter a date"),
        error_message: String::from(
            "Please enter a valid date format (e.g., 20240112, 2025-01-01, 2025/01/01)",
        ),
        date_format: DateFormat::new("[year]-[month]-[day]")?,
        year_format: DateFormat::new("[year]")?,
        month_format: DateFormat::new("[month repr:long] [year]")?,
        year_range_format: english_year_range,
        parse_patterns: [
            r"^(\d{4})-(\d{1,2})-(\d{1,2})$",
            r"^(\d{4})/(\d{1,2})/(\d{1,2})$",
            r"^(\d{4})\.\s*(\d{1,2})\.\s*(\d{1,2})$",
        ]
        .into_iter()
        .map(compile_pattern)
        .collect::<Result<Vec<_>, _>>()?,
        parse_examples: ["20240112", "2025-01-01", "2025/01/01"]
            .map(String::from)
            .to_vec(),
    })
}

fn english_year_range(start: i32, end: i32) -> String {
    format!("{start} - {end}")
}

fn korean_year_range(start: i32, end: i32) -> String {
    format!("{start}년 - {end}년")
}

fn merge_format(
    source: Option<String>,
    fallback: &DateFormat,
) -> Result<DateFormat, LocaleError> {
    match source {
        Some(s) => DateFormat::new(&s),
        None => Ok(fallback.clone()),
    }
}

fn compile_pattern(pattern: &str) -> Result<Regex, LocaleError> {
    let re = Regex::new(pattern)?;
    // captures_len() counts the implicit whole-match group
    let groups = re.captures_len() - 1;
    if groups == 3 {
        Ok(re)
    } else {
        Err(LocaleError::PatternGroups {
            pattern: pattern.to_owned(),
            groups,
        })
    }
}
