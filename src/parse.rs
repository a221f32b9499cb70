use crate::locale::{DateFormat, Locale};
use regex::Regex;
use std::ops::RangeInclusive;
use time::{Date, Month};

/// Years accepted from typed input
const YEAR_RANGE: RangeInclusive<i32> = 1900..=2100;

/// Result of parsing the text typed into the picker
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum ParseOutcome {
    /// The text named a valid date; `text` is that date in the display
    /// format.
    Parsed { date: Date, text: String },
    /// The text did not name a date.  `echo` is the text's digits (so that
    /// the user can see what was understood) or empty if there were none.
    Unparsed { echo: String },
}

impl ParseOutcome {
    pub fn date(&self) -> Option<Date> {
        match self {
            ParseOutcome::Parsed { date, .. } => Some(*date),
            ParseOutcome::Unparsed { .. } => None,
        }
    }
}

/// Parse typed text into a date.
///
/// The locale's literal patterns are tried first, in order.  Failing those,
/// all non-digits are dropped and the remaining run of digits is read as one
/// of:
///
/// - `YYYYMMDD`
/// - `YYYYMDD`, `YYYYMMD`, or `YYYYMD` (see below)
/// - `YYYYMM`, meaning the first of that month
/// - `YYYYM`, meaning the first of that month; a lone `1` is always January
///
/// With seven digits, a month digit of 2 through 9 is a one-digit month
/// followed by a two-digit day (or, if that is not a valid date, by just the
/// last digit).  A month digit of 1 is read as October–December with a
/// one-digit day if possible, and otherwise as January with a two-digit day.
pub fn parse(input: &str, locale: &Locale, format: &DateFormat) -> ParseOutcome {
    let input = input.trim();
    if input.is_empty() {
        return ParseOutcome::Unparsed {
            echo: String::new(),
        };
    }
    if let Some(date) = match_patterns(input, &locale.parse_patterns) {
        return ParseOutcome::Parsed {
            date,
            text: format.format(date),
        };
    }
    let digits = input
        .chars()
        .filter(char::is_ascii_digit)
        .collect::<String>();
    match parse_digit_run(&digits) {
        Some(date) => ParseOutcome::Parsed {
            date,
            text: format.format(date),
        },
        None => ParseOutcome::Unparsed { echo: digits },
    }
}

fn match_patterns(input: &str, patterns: &[Regex]) -> Option<Date> {
    patterns.iter().find_map(|pattern| {
        let caps = pattern.captures(input)?;
        let year = caps.get(1)?.as_str().parse::<i32>().ok()?;
        let month = caps.get(2)?.as_str().parse::<u8>().ok()?;
        let day = caps.get(3)?.as_str().parse::<u8>().ok()?;
        ymd(year, month, day)
    })
}

fn parse_digit_run(digits: &str) -> Option<Date> {
    let year = digits.get(..4)?.parse::<i32>().ok()?;
    let rest = digits.bytes().skip(4).map(|b| b - b'0').collect::<Vec<_>>();
    match *rest.as_slice() {
        [m1, m2, d1, d2] => ymd(year, m1 * 10 + m2, d1 * 10 + d2),
        [r0, r1, r2] => {
            let candidates = match r0 {
                0 => return None,
                1 => [(10 + r1, r2), (1, r1 * 10 + r2)],
                m => [(m, r1 * 10 + r2), (m, r2)],
            };
            candidates
                .into_iter()
                .find_map(|(month, day)| ymd(year, month, day))
        }
        [m1, m2] => ymd(year, m1 * 10 + m2, 1),
        // Unlike with seven digits, a lone 1 is never the start of 10–12.
        [1] => ymd(year, 1, 1),
        [m @ 2..=9] => ymd(year, m, 1),
        _ => None,
    }
}

/// Build a date from typed fields, rejecting years outside [`YEAR_RANGE`] and
/// combinations that do not exist on the calendar (e.g., April 31)
fn ymd(year: i32, month: u8, day: u8) -> Option<Date> {
    if !YEAR_RANGE.contains(&year) || !(1..=31).contains(&day) {
        return None;
    }
    let month = Month::try_from(month).ok()?;
    Date::from_calendar_date(year, month, day).ok()
}
