use super::grid::{DayCell, DayGrid, DayTone, MonthGrid, YearGrid, MONTH_COLUMNS, YEAR_COLUMNS};
use super::nav::{Navigator, TodayShortcut, View};
use super::DateContext;
use crate::holiday::HolidayTable;
use crate::locale::Locale;
use crate::theme::{
    BASE_STYLE, DISABLED_STYLE, HEADER_STYLE, SATURDAY_STYLE, SELECTED_STYLE, SUNDAY_STYLE,
    TODAY_STYLE, WEEKDAY_STYLE,
};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::Text,
    widgets::{Block, Clear, Paragraph, Widget},
};
use time::Date;

/// Width of the popover, border included
pub const POPOVER_WIDTH: u16 = 46;

/// Height of the popover, border included
pub const POPOVER_HEIGHT: u16 = 13;

const HEADER_LINE: u16 = 0;

/// First line of the grid area.  In the day view this holds the weekday
/// names.
const GRID_TOP: u16 = 2;

/// Number of lines in the grid area: the weekday row plus six weeks
const GRID_LINES: u16 = 7;

const TODAY_LINE: u16 = GRID_TOP + GRID_LINES + 1;

/// Columns before the first cell of the day and year grids
const GRID_INDENT: u16 = 1;

/// Number of columns per day of week
const DAY_WIDTH: u16 = 6;

const MONTH_WIDTH: u16 = 11;

const YEAR_WIDTH: u16 = 14;

/// Number of lines per row of the month and year grids
const ROW_LINES: u16 = 2;

const PREV_ARROW: &str = "‹";
const NEXT_ARROW: &str = "›";
const ACS_HLINE: char = '─';

/// The popover calendar: paging header, the grid for the navigator's current
/// view, and the Today shortcut.  The cell containing `focus` is drawn in
/// brackets.
#[derive(Clone, Copy, Debug)]
pub struct CalendarPopover<'a> {
    nav: &'a Navigator,
    focus: Date,
    ctx: DateContext,
    locale: &'a Locale,
    holidays: Option<&'a HolidayTable>,
    show_today: bool,
}

impl<'a> CalendarPopover<'a> {
    pub fn new(
        nav: &'a Navigator,
        focus: Date,
        ctx: DateContext,
        locale: &'a Locale,
    ) -> CalendarPopover<'a> {
        CalendarPopover {
            nav,
            focus,
            ctx,
            locale,
            holidays: None,
            show_today: false,
        }
    }

    /// Color the given holidays like Sundays
    pub fn holidays(mut self, holidays: Option<&'a HolidayTable>) -> Self {
        self.holidays = holidays;
        self
    }

    pub fn show_today(mut self, flag: bool) -> Self {
        self.show_today = flag;
        self
    }

    fn draw_header(&self, canvas: &mut BufferCanvas<'_>) {
        let width = canvas.width();
        let arrow_style = |enabled| if enabled { HEADER_STYLE } else { DISABLED_STYLE };
        canvas.mvprint(
            HEADER_LINE,
            1,
            PREV_ARROW,
            arrow_style(self.nav.can_go_prev(self.ctx)),
        );
        canvas.mvprint(
            HEADER_LINE,
            width.saturating_sub(2),
            NEXT_ARROW,
            arrow_style(self.nav.can_go_next(self.ctx)),
        );
        canvas.centered(
            HEADER_LINE,
            0,
            width,
            self.nav.header(self.locale),
            HEADER_STYLE,
        );
    }

    fn draw_days(&self, canvas: &mut BufferCanvas<'_>) {
        for (i, name) in (0u16..).zip(&self.locale.week_days) {
            let style = match i {
                0 => SUNDAY_STYLE,
                6 => SATURDAY_STYLE,
                _ => WEEKDAY_STYLE,
            };
            canvas.centered(GRID_TOP, GRID_INDENT + i * DAY_WIDTH, DAY_WIDTH, name, style);
        }
        let grid = DayGrid::project(self.nav.anchor(), self.ctx, self.holidays);
        for (y, week) in (GRID_TOP + 1..).zip(grid.weeks()) {
            for (col, cell) in week.days() {
                let col = u16::try_from(col).unwrap_or(u16::MAX);
                let text = if cell.date == self.focus {
                    format!("[{:2}]", cell.date.day())
                } else {
                    format!(" {:2} ", cell.date.day())
                };
                canvas.centered(
                    y,
                    GRID_INDENT + col * DAY_WIDTH,
                    DAY_WIDTH,
                    text,
                    self.day_style(&cell),
                );
            }
        }
    }

    fn day_style(&self, cell: &DayCell) -> Style {
        if !(cell.is_selectable || cell.is_selected) {
            return DISABLED_STYLE;
        }
        match cell.tone(self.show_today) {
            DayTone::Selected => SELECTED_STYLE,
            DayTone::Today => TODAY_STYLE,
            DayTone::Sunday => SUNDAY_STYLE,
            DayTone::Saturday => SATURDAY_STYLE,
            DayTone::Plain => BASE_STYLE,
        }
    }

    fn draw_months(&self, canvas: &mut BufferCanvas<'_>) {
        let grid = MonthGrid::project(self.nav.anchor(), self.ctx);
        for (i, cell) in (0u16..).zip(&grid.cells) {
            let name = self.locale.month_name(cell.month);
            let text = if cell.month == self.focus.month() {
                format!("[{name}]")
            } else {
                name.to_owned()
            };
            canvas.centered(
                GRID_TOP + (i / MONTH_COLUMNS) * ROW_LINES,
                (i % MONTH_COLUMNS) * MONTH_WIDTH,
                MONTH_WIDTH,
                text,
                cell_style(cell.is_selected, cell.is_selectable),
            );
        }
    }

    fn draw_years(&self, canvas: &mut BufferCanvas<'_>) {
        let grid = YearGrid::project(self.nav.anchor(), self.ctx);
        for (i, cell) in (0u16..).zip(&grid.cells) {
            let text = if cell.year == self.focus.year() {
                format!("[{}]", cell.year)
            } else {
                cell.year.to_string()
            };
            canvas.centered(
                GRID_TOP + (i / YEAR_COLUMNS) * ROW_LINES,
                GRID_INDENT + (i % YEAR_COLUMNS) * YEAR_WIDTH,
                YEAR_WIDTH,
                text,
                cell_style(cell.is_selected, cell.is_selectable),
            );
        }
    }

    fn draw_today(&self, canvas: &mut BufferCanvas<'_>) {
        let style = match self.nav.today_shortcut(self.ctx) {
            TodayShortcut::Hidden => return,
            TodayShortcut::Disabled => DISABLED_STYLE,
            TodayShortcut::Enabled => HEADER_STYLE,
        };
        let width = canvas.width();
        canvas.centered(TODAY_LINE, 0, width, &self.locale.today, style);
    }
}

impl Widget for CalendarPopover<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);
        let block = Block::bordered().style(BASE_STYLE);
        let inner = block.inner(area);
        block.render(area, buf);
        let mut canvas = BufferCanvas::new(inner, buf);
        self.draw_header(&mut canvas);
        canvas.hline(GRID_TOP - 1, 0, ACS_HLINE, inner.width);
        match self.nav.view() {
            View::Day => self.draw_days(&mut canvas),
            View::Month => self.draw_months(&mut canvas),
            View::Year => self.draw_years(&mut canvas),
        }
        canvas.hline(TODAY_LINE - 1, 0, ACS_HLINE, inner.width);
        self.draw_today(&mut canvas);
    }
}

fn cell_style(selected: bool, selectable: bool) -> Style {
    if selected {
        SELECTED_STYLE
    } else if selectable {
        BASE_STYLE
    } else {
        DISABLED_STYLE
    }
}

#[derive(Debug, Eq, PartialEq)]
struct BufferCanvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl<'a> BufferCanvas<'a> {
    fn new(area: Rect, buf: &'a mut Buffer) -> Self {
        Self { area, buf }
    }

    fn width(&self) -> u16 {
        self.area.width
    }

    /// Print `s` centered within the `width` columns starting at `x`
    fn centered<S: AsRef<str>>(&mut self, y: u16, x: u16, width: u16, s: S, style: Style) {
        let len = u16::try_from(Text::raw(s.as_ref()).width()).unwrap_or(u16::MAX);
        let offset = width.saturating_sub(len) / 2;
        self.mvprint(y, x.saturating_add(offset), s, style);
    }

    fn mvprint<S: AsRef<str>>(&mut self, y: u16, x: u16, s: S, style: Style) {
        if y < self.area.height && x < self.area.width {
            let text = Text::styled(s.as_ref(), style);
            let width = u16::try_from(text.width()).unwrap_or(u16::MAX);
            // Render through a Paragraph so that text running past the
            // popover is truncated rather than drawn outside of it
            Paragraph::new(text).render(
                Rect {
                    x: x + self.area.x,
                    y: y + self.area.y,
                    width: (self.area.width - x).min(width),
                    height: 1,
                },
                self.buf,
            );
        }
    }

    fn hline(&mut self, y: u16, x: u16, ch: char, length: u16) {
        self.mvprint(y, x, String::from(ch).repeat(length.into()), BASE_STYLE);
    }
}
