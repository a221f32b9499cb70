mod widget;
pub use self::widget::PickerWidget;
use crate::calendar::{step_focus, DateContext, NavError, Navigator, View};
use crate::holiday::HolidayTable;
use crate::locale::{DateFormat, Locale, LocaleError, LocaleOverrides};
use crate::parse::{parse, ParseOutcome};
use crate::restrict::RestrictionPolicy;
use time::Date;

/// Configuration for a [`DatePicker`].  Everything is optional.
#[derive(Clone, Debug)]
pub struct PickerOptions {
    value: Option<Date>,
    display_format: Option<String>,
    show_holidays: bool,
    holidays: HolidayTable,
    policy: RestrictionPolicy,
    show_today: bool,
    locale: LocaleOverrides,
}

impl PickerOptions {
    pub fn new() -> PickerOptions {
        PickerOptions {
            value: None,
            display_format: None,
            show_holidays: true,
            holidays: HolidayTable::new(),
            policy: RestrictionPolicy::new(),
            show_today: false,
            locale: LocaleOverrides::new(),
        }
    }

    /// Initial value
    pub fn value(mut self, value: Option<Date>) -> Self {
        self.value = value;
        self
    }

    /// Format for showing dates in the input, overriding the locale's
    /// `date_format`
    pub fn display_format<S: Into<String>>(mut self, format: S) -> Self {
        self.display_format = Some(format.into());
        self
    }

    pub fn show_holidays(mut self, flag: bool) -> Self {
        self.show_holidays = flag;
        self
    }

    pub fn holidays(mut self, holidays: HolidayTable) -> Self {
        self.holidays = holidays;
        self
    }

    pub fn min_date(mut self, date: Option<Date>) -> Self {
        self.policy = self.policy.min_date(date);
        self
    }

    pub fn max_date(mut self, date: Option<Date>) -> Self {
        self.policy = self.policy.max_date(date);
        self
    }

    pub fn disable_past(mut self, flag: bool) -> Self {
        self.policy = self.policy.disable_past(flag);
        self
    }

    pub fn disable_future(mut self, flag: bool) -> Self {
        self.policy = self.policy.disable_future(flag);
        self
    }

    /// Highlight today in the calendar
    pub fn show_today(mut self, flag: bool) -> Self {
        self.show_today = flag;
        self
    }

    /// Locale settings, merged over the default locale
    pub fn locale(mut self, overrides: LocaleOverrides) -> Self {
        self.locale = overrides;
        self
    }

    pub fn build(self, today: Date) -> Result<DatePicker, LocaleError> {
        let locale = Locale::try_from(self.locale)?;
        let format = match self.display_format {
            Some(f) => DateFormat::new(&f)?,
            None => locale.date_format.clone(),
        };
        let input = self.value.map(|d| format.format(d)).unwrap_or_default();
        let anchor = self.value.unwrap_or(today);
        Ok(DatePicker {
            locale,
            format,
            policy: self.policy,
            holidays: self.holidays,
            show_holidays: self.show_holidays,
            show_today: self.show_today,
            today,
            value: self.value,
            input,
            invalid: false,
            open: false,
            nav: Navigator::new(anchor),
            focus: anchor,
        })
    }
}

impl Default for PickerOptions {
    fn default() -> PickerOptions {
        PickerOptions::new()
    }
}

/// What an operation on a [`DatePicker`] did to its value
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[must_use]
pub enum PickerOutput {
    Unchanged,
    /// The user committed a new date, either by typing it or by picking it
    /// from the calendar
    Changed(Date),
}

impl PickerOutput {
    pub fn changed(self) -> Option<Date> {
        match self {
            PickerOutput::Unchanged => None,
            PickerOutput::Changed(date) => Some(date),
        }
    }
}

/// A text input for dates paired with a popover calendar.
///
/// Text typed into the input is only parsed when it is committed with
/// [`confirm()`](DatePicker::confirm) or [`blur()`](DatePicker::blur).  While
/// the calendar is open, the keyboard focus sits on one cell of its grid.
#[derive(Clone, Debug)]
pub struct DatePicker {
    locale: Locale,
    format: DateFormat,
    policy: RestrictionPolicy,
    holidays: HolidayTable,
    show_holidays: bool,
    show_today: bool,
    today: Date,
    value: Option<Date>,
    input: String,
    invalid: bool,
    open: bool,
    nav: Navigator,
    focus: Date,
}

impl DatePicker {
    pub fn value(&self) -> Option<Date> {
        self.value
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn is_invalid(&self) -> bool {
        self.invalid
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn today(&self) -> Date {
        self.today
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    pub fn navigator(&self) -> &Navigator {
        &self.nav
    }

    /// The calendar cell holding the keyboard focus.  In the month view only
    /// its month is meaningful, and in the year view only its year.
    pub fn focus(&self) -> Date {
        self.focus
    }

    pub fn show_today(&self) -> bool {
        self.show_today
    }

    /// The holiday table, or `None` if holidays are not shown
    pub fn holidays(&self) -> Option<&HolidayTable> {
        self.show_holidays.then_some(&self.holidays)
    }

    /// Names of the holidays on `date`, empty if holidays are not shown
    pub fn holiday_names(&self, date: Date) -> &[String] {
        self.holidays().map(|h| h.names(date)).unwrap_or_default()
    }

    pub fn context(&self) -> DateContext {
        DateContext::new(self.value, self.today, self.policy)
    }

    /// The message to show under the input, if the input is invalid
    pub fn error_message(&self) -> Option<&str> {
        self.invalid.then_some(self.locale.error_message.as_str())
    }

    pub fn formatted_value(&self) -> Option<String> {
        self.value.map(|d| self.format.format(d))
    }

    /// Advance the picker's notion of the current date, e.g., after midnight
    pub fn set_today(&mut self, today: Date) {
        self.today = today;
    }

    /// Replace the value from outside.  The input is rewritten to match and
    /// no change is reported.
    pub fn set_value(&mut self, value: Option<Date>) {
        self.value = value;
        self.input = self.formatted_value().unwrap_or_default();
        self.invalid = false;
        if self.open {
            self.nav.sync_value(value);
            self.focus = self.nav.anchor();
        }
    }

    pub fn insert_char(&mut self, ch: char) {
        self.input.push(ch);
        self.invalid = false;
    }

    pub fn backspace(&mut self) {
        self.input.pop();
        self.invalid = false;
    }

    pub fn clear_input(&mut self) {
        self.input.clear();
        self.invalid = false;
    }

    /// Commit the input when it loses focus.  Blank input is left alone.
    pub fn blur(&mut self) -> PickerOutput {
        if self.input.trim().is_empty() {
            self.invalid = false;
            PickerOutput::Unchanged
        } else {
            self.commit()
        }
    }

    /// Commit the input on Enter.  Unlike [`blur()`](DatePicker::blur),
    /// blank input is marked invalid.
    pub fn confirm(&mut self) -> PickerOutput {
        self.commit()
    }

    fn commit(&mut self) -> PickerOutput {
        // Text that the picker wrote itself need not be read back, and with a
        // custom display format it might not parse
        if self.formatted_value().as_deref() == Some(self.input.as_str()) {
            self.invalid = false;
            return PickerOutput::Unchanged;
        }
        match parse(&self.input, &self.locale, &self.format) {
            ParseOutcome::Parsed { date, text } => {
                log::debug!("Parsed input {:?} as {date}", self.input);
                self.value = Some(date);
                self.input = text;
                self.invalid = false;
                if self.open {
                    self.nav.sync_value(self.value);
                    self.focus = self.nav.anchor();
                }
                PickerOutput::Changed(date)
            }
            ParseOutcome::Unparsed { echo } => {
                log::debug!("Could not parse input {:?} (digits: {echo:?})", self.input);
                self.invalid = true;
                PickerOutput::Unchanged
            }
        }
    }

    pub fn open_calendar(&mut self) {
        self.nav.open(self.context());
        self.focus = self.nav.anchor();
        self.open = true;
    }

    pub fn close_calendar(&mut self) {
        self.open = false;
    }

    pub fn toggle_calendar(&mut self) {
        if self.open {
            self.close_calendar();
        } else {
            self.open_calendar();
        }
    }

    /// Move the keyboard focus `dx` cells across and `dy` rows down the
    /// current grid
    pub fn move_focus(&mut self, dx: i32, dy: i32) -> Result<(), NavError> {
        self.ensure_open()?;
        self.focus = step_focus(self.nav.view(), self.nav.anchor(), self.focus, dx, dy)
            .ok_or(NavError::OffGrid)?;
        Ok(())
    }

    /// Select the focused cell: a day is picked as the new value and closes
    /// the calendar, while a month or year opens the next view down
    pub fn activate_focus(&mut self) -> Result<PickerOutput, NavError> {
        self.ensure_open()?;
        let ctx = self.context();
        match self.nav.view() {
            View::Day => {
                let date = self
                    .nav
                    .select_day(self.focus, ctx)
                    .inspect_err(|e| log::debug!("Cannot select {}: {e}", self.focus))?;
                Ok(self.select(date))
            }
            View::Month => {
                self.nav
                    .select_month(self.focus.month(), ctx)
                    .inspect_err(|e| log::debug!("Cannot select {}: {e}", self.focus.month()))?;
                self.focus = self.nav.anchor();
                Ok(PickerOutput::Unchanged)
            }
            View::Year => {
                self.nav
                    .select_year(self.focus.year(), ctx)
                    .inspect_err(|e| log::debug!("Cannot select {}: {e}", self.focus.year()))?;
                self.focus = self.nav.anchor();
                Ok(PickerOutput::Unchanged)
            }
        }
    }

    pub fn prev_page(&mut self) -> Result<(), NavError> {
        self.ensure_open()?;
        self.nav
            .prev(self.context())
            .inspect_err(|e| log::debug!("Cannot page backwards: {e}"))?;
        self.focus = self.nav.anchor();
        Ok(())
    }

    pub fn next_page(&mut self) -> Result<(), NavError> {
        self.ensure_open()?;
        self.nav
            .next(self.context())
            .inspect_err(|e| log::debug!("Cannot page forwards: {e}"))?;
        self.focus = self.nav.anchor();
        Ok(())
    }

    pub fn drill_down(&mut self) -> Result<(), NavError> {
        self.ensure_open()?;
        self.nav.drill_down()?;
        self.focus = self.nav.anchor();
        Ok(())
    }

    pub fn press_today(&mut self) -> Result<PickerOutput, NavError> {
        self.ensure_open()?;
        let date = self
            .nav
            .press_today(self.context())
            .inspect_err(|e| log::debug!("Cannot jump to today: {e}"))?;
        Ok(self.select(date))
    }

    fn select(&mut self, date: Date) -> PickerOutput {
        self.value = Some(date);
        self.input = self.format.format(date);
        self.invalid = false;
        self.open = false;
        PickerOutput::Changed(date)
    }

    fn ensure_open(&self) -> Result<(), NavError> {
        if self.open {
            Ok(())
        } else {
            Err(NavError::Unavailable)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;
    use time::Month;

    const TODAY: Date = date!(2025 - 06 - 15);

    fn picker(options: PickerOptions) -> DatePicker {
        options.build(TODAY).unwrap()
    }

    fn type_text(picker: &mut DatePicker, text: &str) {
        for ch in text.chars() {
            picker.insert_char(ch);
        }
    }

    #[test]
    fn test_initial_state() {
        let p = picker(PickerOptions::new().value(Some(date!(2025 - 03 - 04))));
        assert_eq!(p.value(), Some(date!(2025 - 03 - 04)));
        assert_eq!(p.input(), "2025-03-04");
        assert!(!p.is_invalid());
        assert!(!p.is_open());
        assert_eq!(p.error_message(), None);
        let p = picker(PickerOptions::new());
        assert_eq!(p.value(), None);
        assert_eq!(p.input(), "");
        assert_eq!(p.formatted_value(), None);
    }

    #[test]
    fn test_bad_display_format() {
        let r = PickerOptions::new().display_format("[year").build(TODAY);
        assert!(matches!(r, Err(LocaleError::Format { .. })));
    }

    #[test]
    fn test_confirm_typed_date() {
        let mut p = picker(PickerOptions::new());
        type_text(&mut p, "2025911");
        assert_eq!(p.input(), "2025911");
        assert_eq!(p.value(), None);
        assert_eq!(p.confirm(), PickerOutput::Changed(date!(2025 - 09 - 11)));
        assert_eq!(p.value(), Some(date!(2025 - 09 - 11)));
        assert_eq!(p.input(), "2025-09-11");
        assert!(!p.is_invalid());
    }

    #[test]
    fn test_display_format_override() {
        let mut p = picker(PickerOptions::new().display_format("[month]/[day]/[year]"));
        type_text(&mut p, "2025.1.2");
        assert_eq!(p.blur(), PickerOutput::Changed(date!(2025 - 01 - 02)));
        assert_eq!(p.input(), "01/02/2025");
        assert_eq!(p.formatted_value().as_deref(), Some("01/02/2025"));
    }

    #[test]
    fn test_own_text_is_not_reparsed() {
        let mut p = picker(
            PickerOptions::new()
                .display_format("[month]/[day]/[year]")
                .value(Some(date!(2025 - 01 - 02))),
        );
        assert_eq!(p.input(), "01/02/2025");
        assert_eq!(p.blur(), PickerOutput::Unchanged);
        assert!(!p.is_invalid());
        assert_eq!(p.confirm(), PickerOutput::Unchanged);
        assert!(!p.is_invalid());
        assert_eq!(p.value(), Some(date!(2025 - 01 - 02)));
        // Editing the text back to the same value is still accepted
        p.backspace();
        p.insert_char('5');
        assert_eq!(p.confirm(), PickerOutput::Unchanged);
        assert!(!p.is_invalid());
    }

    #[test]
    fn test_invalid_input() {
        let mut p = picker(PickerOptions::new().value(Some(date!(2025 - 01 - 01))));
        p.clear_input();
        type_text(&mut p, "20251301");
        assert_eq!(p.blur(), PickerOutput::Unchanged);
        assert!(p.is_invalid());
        assert_eq!(p.input(), "20251301");
        assert_eq!(p.value(), Some(date!(2025 - 01 - 01)));
        assert_eq!(p.error_message(), Some(p.locale().error_message.as_str()));
        // Editing clears the error
        p.backspace();
        assert!(!p.is_invalid());
        assert_eq!(p.input(), "2025130");
    }

    #[test]
    fn test_blank_input() {
        let mut p = picker(PickerOptions::new());
        type_text(&mut p, "   ");
        assert_eq!(p.blur(), PickerOutput::Unchanged);
        assert!(!p.is_invalid());
        assert_eq!(p.confirm(), PickerOutput::Unchanged);
        assert!(p.is_invalid());
    }

    #[test]
    fn test_typed_date_ignores_restrictions() {
        let mut p = picker(PickerOptions::new().disable_past(true));
        type_text(&mut p, "2020-01-01");
        assert_eq!(p.confirm(), PickerOutput::Changed(date!(2020 - 01 - 01)));
    }

    #[test]
    fn test_set_value() {
        let mut p = picker(PickerOptions::new());
        type_text(&mut p, "garbage");
        let _ = p.confirm();
        assert!(p.is_invalid());
        p.set_value(Some(date!(2024 - 02 - 29)));
        assert_eq!(p.input(), "2024-02-29");
        assert!(!p.is_invalid());
        p.set_value(None);
        assert_eq!(p.input(), "");
        assert_eq!(p.value(), None);
    }

    #[test]
    fn test_set_value_moves_open_calendar() {
        let mut p = picker(PickerOptions::new());
        p.open_calendar();
        assert_eq!(p.navigator().anchor(), TODAY);
        p.set_value(Some(date!(2030 - 01 - 02)));
        assert_eq!(p.navigator().anchor(), date!(2030 - 01 - 02));
        assert_eq!(p.focus(), date!(2030 - 01 - 02));
    }

    #[test]
    fn test_calendar_closed_rejects_navigation() {
        let mut p = picker(PickerOptions::new());
        assert_eq!(p.move_focus(1, 0), Err(NavError::Unavailable));
        assert_eq!(p.next_page(), Err(NavError::Unavailable));
        assert_eq!(p.activate_focus(), Err(NavError::Unavailable));
        assert_eq!(p.press_today(), Err(NavError::Unavailable));
    }

    #[test]
    fn test_pick_day() {
        let mut p = picker(PickerOptions::new().value(Some(date!(2025 - 02 - 10))));
        p.open_calendar();
        assert!(p.is_open());
        assert_eq!(p.focus(), date!(2025 - 02 - 10));
        p.move_focus(1, 1).unwrap();
        assert_eq!(p.focus(), date!(2025 - 02 - 18));
        assert_eq!(p.move_focus(0, 2), Err(NavError::OffGrid));
        assert_eq!(p.focus(), date!(2025 - 02 - 18));
        assert_eq!(
            p.activate_focus(),
            Ok(PickerOutput::Changed(date!(2025 - 02 - 18)))
        );
        assert!(!p.is_open());
        assert_eq!(p.input(), "2025-02-18");
    }

    #[test]
    fn test_pick_restricted_day() {
        let mut p = picker(PickerOptions::new().max_date(Some(date!(2025 - 06 - 15))));
        p.open_calendar();
        p.move_focus(1, 0).unwrap();
        assert_eq!(p.activate_focus(), Err(NavError::Restricted));
        assert!(p.is_open());
        assert_eq!(p.value(), None);
    }

    #[test]
    fn test_drill_down_and_back() {
        let mut p = picker(PickerOptions::new());
        p.open_calendar();
        p.drill_down().unwrap();
        p.drill_down().unwrap();
        assert_eq!(p.navigator().view(), View::Year);
        assert_eq!(p.drill_down(), Err(NavError::Outermost));
        // 2025 is at the end of the third row of 2017..=2028
        p.move_focus(-1, -2).unwrap();
        assert_eq!(p.focus().year(), 2018);
        p.move_focus(1, 0).unwrap();
        assert_eq!(p.activate_focus(), Ok(PickerOutput::Unchanged));
        assert_eq!(p.navigator().view(), View::Month);
        assert_eq!(p.navigator().anchor(), date!(2019 - 06 - 15));
        p.move_focus(-1, 0).unwrap();
        assert_eq!(p.focus().month(), Month::May);
        assert_eq!(p.activate_focus(), Ok(PickerOutput::Unchanged));
        assert_eq!(p.navigator().view(), View::Day);
        assert_eq!(p.navigator().anchor(), date!(2019 - 05 - 15));
        assert_eq!(p.focus(), date!(2019 - 05 - 15));
        assert_eq!(p.value(), None);
    }

    #[test]
    fn test_paging_moves_focus() {
        let mut p = picker(PickerOptions::new().min_date(Some(date!(2025 - 05 - 20))));
        p.open_calendar();
        p.prev_page().unwrap();
        assert_eq!(p.focus(), date!(2025 - 05 - 15));
        assert_eq!(p.prev_page(), Err(NavError::Restricted));
        p.next_page().unwrap();
        p.next_page().unwrap();
        assert_eq!(p.focus(), date!(2025 - 07 - 15));
    }

    #[test]
    fn test_press_today() {
        let mut p = picker(PickerOptions::new().value(Some(date!(2025 - 01 - 01))));
        p.open_calendar();
        assert_eq!(p.press_today(), Ok(PickerOutput::Changed(TODAY)));
        assert!(!p.is_open());
        assert_eq!(p.input(), "2025-06-15");
        p.open_calendar();
        assert_eq!(p.press_today(), Err(NavError::Unavailable));
    }

    #[test]
    fn test_reopen_resets_view() {
        let mut p = picker(PickerOptions::new().value(Some(date!(2025 - 01 - 01))));
        p.open_calendar();
        p.drill_down().unwrap();
        p.next_page().unwrap();
        p.toggle_calendar();
        assert!(!p.is_open());
        p.toggle_calendar();
        assert_eq!(p.navigator().view(), View::Day);
        assert_eq!(p.navigator().anchor(), date!(2025 - 01 - 01));
    }

    #[test]
    fn test_confirm_while_open_follows_value() {
        let mut p = picker(PickerOptions::new());
        p.open_calendar();
        type_text(&mut p, "2026-03-01");
        assert_eq!(p.confirm(), PickerOutput::Changed(date!(2026 - 03 - 01)));
        assert_eq!(p.navigator().anchor(), date!(2026 - 03 - 01));
    }

    #[test]
    fn test_holidays_gated() {
        let mut table = HolidayTable::new();
        table.insert(date!(2025 - 06 - 06), "Memorial Day");
        let p = picker(PickerOptions::new().holidays(table.clone()));
        assert_eq!(p.holiday_names(date!(2025 - 06 - 06)), ["Memorial Day"]);
        let p = picker(PickerOptions::new().holidays(table).show_holidays(false));
        assert!(p.holidays().is_none());
        assert!(p.holiday_names(date!(2025 - 06 - 06)).is_empty());
    }

    #[test]
    fn test_korean_locale() {
        let mut p = picker(PickerOptions::new().locale(LocaleOverrides::korean()));
        type_text(&mut p, "2025년 3월 1일");
        assert_eq!(p.confirm(), PickerOutput::Changed(date!(2025 - 03 - 01)));
        assert_eq!(p.input(), "2025년 3월 01일");
    }

    #[test]
    fn test_set_today() {
        let mut p = picker(PickerOptions::new());
        p.set_today(date!(2025 - 06 - 16));
        p.open_calendar();
        assert_eq!(p.navigator().anchor(), date!(2025 - 06 - 16));
    }
}
