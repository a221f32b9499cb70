use time::{Date, Month, Weekday};

pub(crate) const DAYS_IN_WEEK: usize = 7;

const MONTHS_IN_YEAR: i32 = 12;

/// Number of years shown on one page of the year grid
pub(crate) const YEARS_PER_PAGE: i32 = 12;

pub(crate) trait WeekdayExt {
    fn index0(&self) -> usize;
}

impl WeekdayExt for Weekday {
    fn index0(&self) -> usize {
        self.number_days_from_sunday().into()
    }
}

pub(crate) fn start_of_month(date: Date) -> Date {
    date.replace_day(1).expect("every month should have a first day")
}

pub(crate) fn end_of_month(date: Date) -> Date {
    with_clamped_day(date.year(), date.month(), 31)
        .expect("the month of a valid date should have a last day")
}

/// Construct a date, moving `day` back to the end of the month if the month
/// is too short.  Returns `None` if the year is out of range.
pub(crate) fn with_clamped_day(year: i32, month: Month, day: u8) -> Option<Date> {
    // No month is shorter than 28 days
    (day.min(28)..=day)
        .rev()
        .find_map(|d| Date::from_calendar_date(year, month, d).ok())
}

pub(crate) fn with_year(date: Date, year: i32) -> Option<Date> {
    with_clamped_day(year, date.month(), date.day())
}

pub(crate) fn with_month(date: Date, month: Month) -> Option<Date> {
    with_clamped_day(date.year(), month, date.day())
}

pub(crate) fn add_months(date: Date, months: i32) -> Option<Date> {
    let index = date
        .year()
        .checked_mul(MONTHS_IN_YEAR)?
        .checked_add(month0(date.month()))?
        .checked_add(months)?;
    let month = month_from_index0(index.rem_euclid(MONTHS_IN_YEAR))?;
    with_clamped_day(index.div_euclid(MONTHS_IN_YEAR), month, date.day())
}

/// January is 0
pub(crate) fn month0(month: Month) -> i32 {
    i32::from(u8::from(month)) - 1
}

pub(crate) fn month_from_index0(index: i32) -> Option<Month> {
    let n = u8::try_from(index.checked_add(1)?).ok()?;
    Month::try_from(n).ok()
}

/// First year of the page of the year grid containing `year`.  Pages always
/// start on a year ≡ 1 (mod 12).
pub(crate) fn window_start(year: i32) -> i32 {
    (year - 1).div_euclid(YEARS_PER_PAGE) * YEARS_PER_PAGE + 1
}
