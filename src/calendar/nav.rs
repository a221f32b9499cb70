use super::util::{
    add_months, start_of_month, window_start, with_month, with_year, YEARS_PER_PAGE,
};
use super::DateContext;
use crate::locale::Locale;
use std::ops::RangeInclusive;
use thiserror::Error;
use time::{Date, Month};

/// Which grid the calendar is showing
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum View {
    #[default]
    Day,
    Month,
    Year,
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
enum Step {
    Backwards,
    Forwards,
}

impl Step {
    fn signum(self) -> i32 {
        match self {
            Step::Backwards => -1,
            Step::Forwards => 1,
        }
    }
}

/// State of the Today shortcut below the day grid
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TodayShortcut {
    Hidden,
    Disabled,
    Enabled,
}

/// The calendar's current view and the date it is framed around.
///
/// The anchor determines which month (day view), year (month view), or
/// twelve-year page (year view) is shown.  It is independent of the selected
/// value, which is only consulted when paging and when opening.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Navigator {
    view: View,
    anchor: Date,
}

impl Navigator {
    pub fn new(anchor: Date) -> Navigator {
        Navigator {
            view: View::Day,
            anchor,
        }
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn anchor(&self) -> Date {
        self.anchor
    }

    /// Reset for a freshly opened popover: back to the day view, framed on
    /// the selected value or else today
    pub fn open(&mut self, ctx: DateContext) {
        self.view = View::Day;
        self.anchor = ctx.value.unwrap_or(ctx.today);
    }

    /// Follow a change to the selected value made while the popover is shown
    pub fn sync_value(&mut self, value: Option<Date>) {
        if let Some(date) = value {
            self.anchor = date;
        }
    }

    /// Switch from days to months or from months to years
    pub fn drill_down(&mut self) -> Result<(), NavError> {
        self.view = match self.view {
            View::Day => View::Month,
            View::Month => View::Year,
            View::Year => return Err(NavError::Outermost),
        };
        Ok(())
    }

    /// Pick a year in the year view and switch to its months
    pub fn select_year(&mut self, year: i32, ctx: DateContext) -> Result<(), NavError> {
        if !ctx.policy.is_year_selectable(year, ctx.today) {
            return Err(NavError::Restricted);
        }
        self.anchor = with_year(self.anchor, year).ok_or(NavError::OutOfTime)?;
        self.view = View::Month;
        Ok(())
    }

    /// Pick a month in the month view and switch to its days
    pub fn select_month(&mut self, month: Month, ctx: DateContext) -> Result<(), NavError> {
        let anchor = with_month(self.anchor, month).ok_or(NavError::OutOfTime)?;
        if !ctx.is_selectable(start_of_month(anchor)) {
            return Err(NavError::Restricted);
        }
        self.anchor = anchor;
        self.view = View::Day;
        Ok(())
    }

    /// Pick a day in the day view.  The view does not change; closing the
    /// popover is up to the caller.
    pub fn select_day(&self, date: Date, ctx: DateContext) -> Result<Date, NavError> {
        if ctx.is_selectable(date) {
            Ok(date)
        } else {
            Err(NavError::Restricted)
        }
    }

    pub fn prev(&mut self, ctx: DateContext) -> Result<(), NavError> {
        self.anchor = self.paged(Step::Backwards, ctx)?;
        Ok(())
    }

    pub fn next(&mut self, ctx: DateContext) -> Result<(), NavError> {
        self.anchor = self.paged(Step::Forwards, ctx)?;
        Ok(())
    }

    pub fn can_go_prev(&self, ctx: DateContext) -> bool {
        self.view != View::Day || self.paged(Step::Backwards, ctx).is_ok()
    }

    pub fn can_go_next(&self, ctx: DateContext) -> bool {
        self.view != View::Day || self.paged(Step::Forwards, ctx).is_ok()
    }

    /// The Today shortcut is only offered in the day view, and only when
    /// some date other than today is selected
    pub fn today_shortcut(&self, ctx: DateContext) -> TodayShortcut {
        if self.view != View::Day || ctx.value.is_none_or(|v| v == ctx.today) {
            TodayShortcut::Hidden
        } else if ctx.is_selectable(ctx.today) {
            TodayShortcut::Enabled
        } else {
            TodayShortcut::Disabled
        }
    }

    pub fn press_today(&self, ctx: DateContext) -> Result<Date, NavError> {
        match self.today_shortcut(ctx) {
            TodayShortcut::Enabled => Ok(ctx.today),
            TodayShortcut::Disabled => Err(NavError::Restricted),
            TodayShortcut::Hidden => Err(NavError::Unavailable),
        }
    }

    /// The years shown on the year grid's current page
    pub fn year_window(&self) -> RangeInclusive<i32> {
        let start = window_start(self.anchor.year());
        let end = start + YEARS_PER_PAGE - 1;
        start..=end
    }

    /// Title shown between the paging arrows
    pub fn header(&self, locale: &Locale) -> String {
        match self.view {
            View::Year => {
                let years = self.year_window();
                locale.year_range(*years.start(), *years.end())
            }
            View::Month => locale.year_format.format(self.anchor),
            View::Day => locale.month_format.format(self.anchor),
        }
    }

    fn paged(&self, step: Step, ctx: DateContext) -> Result<Date, NavError> {
        match self.view {
            View::Year => {
                let start = window_start(self.anchor.year()) + step.signum() * YEARS_PER_PAGE;
                let year = ctx
                    .value
                    .map(Date::year)
                    .filter(|y| (start..start + YEARS_PER_PAGE).contains(y))
                    .unwrap_or(start);
                with_year(self.anchor, year).ok_or(NavError::OutOfTime)
            }
            View::Month => {
                let shifted =
                    add_months(self.anchor, step.signum() * 12).ok_or(NavError::OutOfTime)?;
                let month = ctx
                    .value
                    .filter(|v| v.year() == shifted.year())
                    .map_or(Month::January, Date::month);
                with_month(shifted, month).ok_or(NavError::OutOfTime)
            }
            View::Day => {
                let shifted = add_months(self.anchor, step.signum()).ok_or(NavError::OutOfTime)?;
                if month_in_bounds(step, start_of_month(shifted), ctx) {
                    Ok(shifted)
                } else {
                    Err(NavError::Restricted)
                }
            }
        }
    }
}

/// Whether the day view may page onto the month starting at `month_start`.
/// Only the bound in the direction of travel is consulted.
fn month_in_bounds(step: Step, month_start: Date, ctx: DateContext) -> bool {
    let this_month = start_of_month(ctx.today);
    match step {
        Step::Backwards => {
            ctx.policy
                .min_date
                .is_none_or(|min| month_start >= start_of_month(min))
                && !(ctx.policy.disable_past && month_start < this_month)
        }
        Step::Forwards => {
            ctx.policy
                .max_date
                .is_none_or(|max| month_start <= start_of_month(max))
                && !(ctx.policy.disable_future && month_start > this_month)
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, Hash, PartialEq)]
pub enum NavError {
    #[error("date is outside the selectable range")]
    Restricted,
    #[error("reached the end of time")]
    OutOfTime,
    #[error("already showing years")]
    Outermost,
    #[error("not available in the current view")]
    Unavailable,
    #[error("no cell in that direction")]
    OffGrid,
}
