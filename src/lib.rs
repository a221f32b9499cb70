//! A date-entry widget for the terminal: a text input that understands
//! loosely formatted dates, paired with a popover calendar that can be paged
//! by month and drilled out to months and years.
//!
//! The widget state lives in [`DatePicker`], built from [`PickerOptions`].
//! Drawing is done with [`PickerWidget`] using [`ratatui`].
pub mod calendar;
mod holiday;
mod locale;
mod parse;
mod picker;
mod restrict;
pub mod theme;
pub use crate::holiday::{HolidayError, HolidayTable};
pub use crate::locale::{DateFormat, Locale, LocaleError, LocaleOverrides};
pub use crate::parse::{parse, ParseOutcome};
pub use crate::picker::{DatePicker, PickerOptions, PickerOutput, PickerWidget};
pub use crate::restrict::RestrictionPolicy;
