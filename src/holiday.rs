use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;
use time::{format_description::FormatItem, macros::format_description, Date};

static YEAR_FMT: &[FormatItem<'_>] = format_description!("[year]");

static YMD_FMT: &[FormatItem<'_>] = format_description!("[year]-[month]-[day]");

/// Holiday names keyed by year (`"2025"`) and then by ISO date
/// (`"2025-01-01"`).
///
/// This is the shape of the JSON holiday files:
///
/// ```json
/// {"2025": {"2025-01-01": ["New Year's Day"], "2025-12-25": ["Christmas"]}}
/// ```
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(transparent)]
pub struct HolidayTable(BTreeMap<String, BTreeMap<String, Vec<String>>>);

impl HolidayTable {
    pub fn new() -> HolidayTable {
        HolidayTable::default()
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<HolidayTable, HolidayError> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<HolidayTable, HolidayError> {
        let path = path.as_ref();
        let fp = File::open(path).map_err(|source| HolidayError::Read {
            path: path.to_owned(),
            source,
        })?;
        HolidayTable::from_reader(BufReader::new(fp))
    }

    /// Load a table, falling back to an empty one if the file cannot be read
    /// or parsed.  The failure is logged and not retried.
    pub fn load_or_empty<P: AsRef<Path>>(path: P) -> HolidayTable {
        let path = path.as_ref();
        match HolidayTable::from_path(path) {
            Ok(table) => {
                log::debug!(
                    "Loaded holidays for {} years from {}",
                    table.0.len(),
                    path.display()
                );
                table
            }
            Err(e) => {
                log::warn!("Could not load holidays from {}: {e}", path.display());
                HolidayTable::new()
            }
        }
    }

    pub fn insert<S: Into<String>>(&mut self, date: Date, name: S) {
        self.0
            .entry(year_key(date))
            .or_default()
            .entry(date_key(date))
            .or_default()
            .push(name.into());
    }

    pub fn is_holiday(&self, date: Date) -> bool {
        !self.names(date).is_empty()
    }

    /// The names of the holidays on `date`, in the order they were listed
    pub fn names(&self, date: Date) -> &[String] {
        self.0
            .get(&year_key(date))
            .and_then(|days| days.get(&date_key(date)))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

#[derive(Debug, Error)]
pub enum HolidayError {
    #[error("failed to read holiday file {}", .path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("invalid holiday data")]
    Json(#[from] serde_json::Error),
}

fn year_key(date: Date) -> String {
    date.format(&YEAR_FMT).expect("formatting a year should not fail")
}

fn date_key(date: Date) -> String {
    date.format(&YMD_FMT).expect("formatting a date as YYYY-MM-DD should not fail")
}
