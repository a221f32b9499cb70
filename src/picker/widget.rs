use super::DatePicker;
use crate::calendar::{CalendarPopover, POPOVER_HEIGHT, POPOVER_WIDTH};
use crate::theme::input::{
    BORDER_STYLE, CURSOR_STYLE, ERROR_STYLE, INVALID_BORDER_STYLE, PLACEHOLDER_STYLE,
};
use crate::theme::BASE_STYLE;
use ratatui::{
    buffer::Buffer,
    layout::{Flex, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

/// Height of the input box, border included
const INPUT_HEIGHT: u16 = 3;

/// Draws a [`DatePicker`]: the input box, the error message under it when the
/// input is invalid, and the calendar popover below that when it is open.
///
/// Everything is drawn from the top left of the area and is at most
/// [`POPOVER_WIDTH`] columns wide.
#[derive(Clone, Copy, Debug)]
pub struct PickerWidget<'a> {
    picker: &'a DatePicker,
}

impl<'a> PickerWidget<'a> {
    pub fn new(picker: &'a DatePicker) -> PickerWidget<'a> {
        PickerWidget { picker }
    }

    fn input_line(&self) -> Line<'a> {
        let picker = self.picker;
        // The cursor is only shown while the input has the keyboard
        let cursor = (!picker.is_open()).then(|| Span::styled(" ", CURSOR_STYLE));
        if picker.input().is_empty() {
            let placeholder =
                Span::styled(picker.locale().placeholder.as_str(), PLACEHOLDER_STYLE);
            Line::from(cursor.into_iter().chain([placeholder]).collect::<Vec<_>>())
        } else {
            let text = Span::styled(picker.input(), BASE_STYLE);
            Line::from([text].into_iter().chain(cursor).collect::<Vec<_>>())
        }
    }
}

impl Widget for PickerWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [column] = Layout::horizontal([POPOVER_WIDTH])
            .flex(Flex::Start)
            .areas(area);
        let [input_area, error_area, popover_area] =
            Layout::vertical([INPUT_HEIGHT, 1, POPOVER_HEIGHT])
                .flex(Flex::Start)
                .areas(column);
        let border_style = if self.picker.is_invalid() {
            INVALID_BORDER_STYLE
        } else {
            BORDER_STYLE
        };
        Paragraph::new(self.input_line())
            .block(Block::bordered().border_style(border_style))
            .style(BASE_STYLE)
            .render(input_area, buf);
        if let Some(msg) = self.picker.error_message() {
            Paragraph::new(msg).style(ERROR_STYLE).render(error_area, buf);
        }
        if self.picker.is_open() {
            CalendarPopover::new(
                self.picker.navigator(),
                self.picker.focus(),
                self.picker.context(),
                self.picker.locale(),
            )
            .holidays(self.picker.holidays())
            .show_today(self.picker.show_today())
            .render(popover_area, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::picker::PickerOptions;
    use ratatui::style::{Color, Modifier};
    use time::macros::date;

    fn render(picker: &DatePicker) -> Buffer {
        let area = Rect::new(0, 0, 50, 17);
        let mut buffer = Buffer::empty(area);
        PickerWidget::new(picker).render(area, &mut buffer);
        buffer
    }

    fn line(buffer: &Buffer, y: u16) -> String {
        (0..buffer.area().width)
            .map(|x| buffer[(x, y)].symbol())
            .collect()
    }

    #[test]
    fn test_placeholder() {
        let picker = PickerOptions::new().build(date!(2025 - 06 - 15)).unwrap();
        let buffer = render(&picker);
        assert_eq!(
            line(&buffer, 0),
            "┌────────────────────────────────────────────┐    "
        );
        assert_eq!(
            line(&buffer, 1),
            "│ Enter a date                               │    "
        );
        assert_eq!(
            line(&buffer, 2),
            "└────────────────────────────────────────────┘    "
        );
        assert_eq!(line(&buffer, 3).trim(), "");
        assert_eq!(line(&buffer, 4).trim(), "");
        // Cursor
        assert!(buffer[(1, 1)].modifier.contains(Modifier::REVERSED));
        assert_eq!(buffer[(2, 1)].fg, Color::DarkGray);
    }

    #[test]
    fn test_invalid() {
        let mut picker = PickerOptions::new().build(date!(2025 - 06 - 15)).unwrap();
        for ch in "abc".chars() {
            picker.insert_char(ch);
        }
        let _ = picker.confirm();
        let buffer = render(&picker);
        assert_eq!(
            line(&buffer, 1),
            "│abc                                         │    "
        );
        assert_eq!(buffer[(0, 0)].fg, Color::LightRed);
        assert_eq!(
            line(&buffer, 3),
            "Please enter a valid date format (e.g., 202401    "
        );
        assert_eq!(buffer[(0, 3)].fg, Color::LightRed);
    }

    #[test]
    fn test_open() {
        let mut picker = PickerOptions::new()
            .value(Some(date!(2025 - 06 - 01)))
            .build(date!(2025 - 06 - 15))
            .unwrap();
        picker.open_calendar();
        let buffer = render(&picker);
        assert_eq!(
            line(&buffer, 1),
            "│2025-06-01                                  │    "
        );
        assert_eq!(line(&buffer, 3).trim(), "");
        assert_eq!(
            line(&buffer, 4),
            "┌────────────────────────────────────────────┐    "
        );
        assert_eq!(
            line(&buffer, 5),
            "│ ‹               June 2025                › │    "
        );
        assert_eq!(
            line(&buffer, 8),
            "│  [ 1]    2     3     4     5     6     7   │    "
        );
        assert_eq!(
            line(&buffer, 16),
            "└────────────────────────────────────────────┘    "
        );
    }
}
