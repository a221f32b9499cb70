use super::nav::View;
use super::util::{
    end_of_month, month0, month_from_index0, start_of_month, window_start, with_month,
    with_year, WeekdayExt, DAYS_IN_WEEK, YEARS_PER_PAGE,
};
use super::DateContext;
use crate::holiday::HolidayTable;
use std::iter::successors;
use time::{Date, Month};

/// Columns in the day grid
pub const DAY_COLUMNS: u16 = 7;

/// Columns in the month grid
pub const MONTH_COLUMNS: u16 = 4;

/// Columns in the year grid
pub const YEAR_COLUMNS: u16 = 3;

/// How a day should be colored.  Dimming of unselectable days is separate
/// and applies on top of this.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum DayTone {
    Selected,
    Today,
    /// Sundays and holidays
    Sunday,
    Saturday,
    Plain,
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct DayCell {
    pub date: Date,
    pub is_today: bool,
    pub is_selected: bool,
    pub is_sunday: bool,
    pub is_saturday: bool,
    pub is_holiday: bool,
    pub is_selectable: bool,
}

impl DayCell {
    fn new(date: Date, ctx: DateContext, holidays: Option<&HolidayTable>) -> DayCell {
        let weekday = date.weekday().index0();
        DayCell {
            date,
            is_today: date == ctx.today,
            is_selected: ctx.value == Some(date),
            is_sunday: weekday == 0,
            is_saturday: weekday == DAYS_IN_WEEK - 1,
            is_holiday: holidays.is_some_and(|h| h.is_holiday(date)),
            is_selectable: ctx.is_selectable(date),
        }
    }

    /// Selection wins over everything.  Unselectable days get no coloring.
    /// Today (when highlighted at all) wins over weekends and holidays, and a
    /// holiday on a Saturday is colored as a holiday.
    pub fn tone(&self, show_today: bool) -> DayTone {
        if self.is_selected {
            DayTone::Selected
        } else if !self.is_selectable {
            DayTone::Plain
        } else if self.is_today {
            if show_today {
                DayTone::Today
            } else {
                DayTone::Plain
            }
        } else if self.is_sunday || self.is_holiday {
            DayTone::Sunday
        } else if self.is_saturday {
            DayTone::Saturday
        } else {
            DayTone::Plain
        }
    }
}

/// One row of the day grid.  Columns before the first or after the last day
/// of the month are `None`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Week([Option<DayCell>; DAYS_IN_WEEK]);

impl Week {
    /// The days in the week together with their columns (Sunday = 0)
    pub fn days(&self) -> impl Iterator<Item = (usize, DayCell)> + '_ {
        self.0
            .iter()
            .enumerate()
            .filter_map(|(i, cell)| cell.map(|c| (i, c)))
    }
}

/// The days of the anchor's month, preceded by one blank per weekday before
/// the first
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct DayGrid {
    pub leading_blanks: usize,
    pub days: Vec<DayCell>,
}

impl DayGrid {
    /// `holidays` is `None` when holidays are not shown
    pub fn project(anchor: Date, ctx: DateContext, holidays: Option<&HolidayTable>) -> DayGrid {
        let first = start_of_month(anchor);
        let last = end_of_month(anchor);
        let days = successors(Some(first), |d| d.next_day().filter(|&n| n <= last))
            .map(|d| DayCell::new(d, ctx, holidays))
            .collect();
        DayGrid {
            leading_blanks: first.weekday().index0(),
            days,
        }
    }

    pub fn weeks(&self) -> Vec<Week> {
        let mut weeks = Vec::new();
        for (i, &cell) in (self.leading_blanks..).zip(&self.days) {
            let row = i / DAYS_IN_WEEK;
            if row == weeks.len() {
                weeks.push(Week([None; DAYS_IN_WEEK]));
            }
            if let Some(week) = weeks.get_mut(row) {
                week.0[i % DAYS_IN_WEEK] = Some(cell);
            }
        }
        weeks
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct MonthCell {
    pub month: Month,
    pub is_selected: bool,
    pub is_selectable: bool,
}

/// The twelve months of the anchor's year
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct MonthGrid {
    pub year: i32,
    pub cells: Vec<MonthCell>,
}

impl MonthGrid {
    pub fn project(anchor: Date, ctx: DateContext) -> MonthGrid {
        let year = anchor.year();
        let cells = successors(Some(Month::January), |&m| Some(m.next()))
            .take(12)
            .map(|month| MonthCell {
                month,
                is_selected: match ctx.value {
                    Some(v) => v.year() == year && v.month() == month,
                    None => month == anchor.month(),
                },
                is_selectable: ctx.policy.is_month_selectable(year, month, ctx.today),
            })
            .collect();
        MonthGrid { year, cells }
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct YearCell {
    pub year: i32,
    pub is_selected: bool,
    pub is_selectable: bool,
}

/// The twelve-year page containing the anchor's year
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct YearGrid {
    pub start: i32,
    pub cells: Vec<YearCell>,
}

impl YearGrid {
    pub fn project(anchor: Date, ctx: DateContext) -> YearGrid {
        let start = window_start(anchor.year());
        let selected = ctx.value.unwrap_or(anchor).year();
        let cells = (start..start + YEARS_PER_PAGE)
            .map(|year| YearCell {
                year,
                is_selected: year == selected,
                is_selectable: ctx.policy.is_year_selectable(year, ctx.today),
            })
            .collect();
        YearGrid { start, cells }
    }
}

/// Move the keyboard focus `dx` cells across and `dy` rows down the grid
/// for `view`.  Returns `None` if that would leave the grid.
///
/// In the day view the focus is a day of the anchor's month; in the month
/// view only its month matters, and in the year view only its year.
pub fn step_focus(view: View, anchor: Date, focus: Date, dx: i32, dy: i32) -> Option<Date> {
    let start_year = window_start(anchor.year());
    let (index, count, columns) = match view {
        View::Day => (
            i32::from(focus.day()) - 1,
            i32::from(end_of_month(anchor).day()),
            DAY_COLUMNS,
        ),
        View::Month => (month0(focus.month()), 12, MONTH_COLUMNS),
        View::Year => (focus.year() - start_year, YEARS_PER_PAGE, YEAR_COLUMNS),
    };
    let index = index
        .checked_add(dx)?
        .checked_add(dy.checked_mul(i32::from(columns))?)?;
    if !(0..count).contains(&index) {
        return None;
    }
    match view {
        View::Day => anchor.replace_day(u8::try_from(index + 1).ok()?).ok(),
        View::Month => with_month(focus, month_from_index0(index)?),
        View::Year => with_year(focus, start_year + index),
    }
}
