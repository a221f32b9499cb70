mod grid;
mod nav;
mod util;
mod widget;
pub use self::grid::{
    step_focus, DayCell, DayGrid, DayTone, MonthCell, MonthGrid, Week, YearCell, YearGrid,
    DAY_COLUMNS, MONTH_COLUMNS, YEAR_COLUMNS,
};
pub use self::nav::{NavError, Navigator, TodayShortcut, View};
pub use self::widget::{CalendarPopover, POPOVER_HEIGHT, POPOVER_WIDTH};
use crate::restrict::RestrictionPolicy;
use time::Date;

/// Everything the calendar needs to know about the picker besides its own
/// navigation state
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct DateContext {
    /// The currently selected date, if any
    pub value: Option<Date>,
    pub today: Date,
    pub policy: RestrictionPolicy,
}

impl DateContext {
    pub fn new(value: Option<Date>, today: Date, policy: RestrictionPolicy) -> DateContext {
        DateContext {
            value,
            today,
            policy,
        }
    }

    pub fn is_selectable(&self, date: Date) -> bool {
        self.policy.is_selectable(date, self.today)
    }
}
