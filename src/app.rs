use crate::help::Help;
use crossterm::event::{read, KeyCode, KeyEvent, KeyModifiers};
use datepick::calendar::{NavError, View, POPOVER_WIDTH};
use datepick::theme::BASE_STYLE;
use datepick::{DatePicker, PickerOutput, PickerWidget};
use ratatui::{
    backend::Backend,
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Paragraph, Widget},
    Terminal,
};
use std::io::{self, Write};
use time::Date;

#[derive(Clone, Debug)]
pub(crate) struct App {
    picker: DatePicker,
    state: AppState,
    /// Source of the current date, consulted before every key
    clock: fn() -> Option<Date>,
}

impl App {
    pub(crate) fn new(picker: DatePicker, clock: fn() -> Option<Date>) -> App {
        App {
            picker,
            state: AppState::Editing,
            clock,
        }
    }

    /// Run the picker until the user quits, returning the final value in
    /// the display format
    pub(crate) fn run<B: Backend>(
        mut self,
        mut terminal: Terminal<B>,
    ) -> io::Result<Option<String>> {
        while !self.quitting() {
            self.draw(&mut terminal)?;
            self.handle_input()?;
        }
        Ok(self.picker.formatted_value())
    }

    fn draw<B: Backend>(&self, terminal: &mut Terminal<B>) -> io::Result<()> {
        terminal.draw(|frame| frame.render_widget(self, frame.area()))?;
        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        if let Some(KeyEvent {
            code, modifiers, ..
        }) = read()?.as_key_press_event()
        {
            if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
                self.state = AppState::Quitting;
            } else if !normal_modifiers.contains(modifiers) || !self.handle_key(code) {
                self.beep()?;
            }
        }
        // else: Redraw on resize, and we might as well redraw on other stuff
        // too
        Ok(())
    }

    // Returns `false` if the key was invalid or had no effect
    fn handle_key(&mut self, key: KeyCode) -> bool {
        self.refresh_today();
        match self.state {
            AppState::Editing if self.picker.is_open() => self.handle_calendar_key(key),
            AppState::Editing => self.handle_input_key(key),
            AppState::Helping => {
                self.state = AppState::Editing;
                true
            }
            AppState::Quitting => false,
        }
    }

    fn handle_input_key(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Char('?') => {
                self.state = AppState::Helping;
                true
            }
            KeyCode::Char(ch) => {
                self.picker.insert_char(ch);
                true
            }
            KeyCode::Backspace => {
                if self.picker.input().is_empty() {
                    false
                } else {
                    self.picker.backspace();
                    true
                }
            }
            KeyCode::Enter => {
                report(self.picker.confirm());
                !self.picker.is_invalid()
            }
            KeyCode::Tab => {
                report(self.picker.blur());
                self.picker.toggle_calendar();
                true
            }
            KeyCode::Esc => {
                self.state = AppState::Quitting;
                true
            }
            _ => false,
        }
    }

    fn handle_calendar_key(&mut self, key: KeyCode) -> bool {
        let r = match key {
            KeyCode::Char('h') | KeyCode::Left => self.picker.move_focus(-1, 0),
            KeyCode::Char('l') | KeyCode::Right => self.picker.move_focus(1, 0),
            KeyCode::Char('k') | KeyCode::Up => self.picker.move_focus(0, -1),
            KeyCode::Char('j') | KeyCode::Down => self.picker.move_focus(0, 1),
            KeyCode::Char('<') | KeyCode::PageUp => self.picker.prev_page(),
            KeyCode::Char('>') | KeyCode::PageDown => self.picker.next_page(),
            KeyCode::Char('v') => self.picker.drill_down(),
            KeyCode::Char('t') => self.picker.press_today().map(report),
            KeyCode::Enter => self.picker.activate_focus().map(report),
            KeyCode::Char('?') => {
                self.state = AppState::Helping;
                Ok(())
            }
            KeyCode::Esc | KeyCode::Tab => {
                self.picker.close_calendar();
                Ok(())
            }
            _ => Err(NavError::Unavailable),
        };
        r.is_ok()
    }

    // A session can run past midnight, after which the past and future are
    // judged by the new date
    fn refresh_today(&mut self) {
        if let Some(today) = (self.clock)().filter(|&d| d != self.picker.today()) {
            log::debug!("Current date is now {today}");
            self.picker.set_today(today);
        }
    }

    fn beep(&self) -> io::Result<()> {
        io::stdout().write_all(b"\x07")
    }

    fn quitting(&self) -> bool {
        self.state == AppState::Quitting
    }

    /// The bottom line of the screen: the holidays on the focused day, if
    /// any, else a hint
    fn status_line(&self) -> String {
        let in_days = self.picker.is_open() && self.picker.navigator().view() == View::Day;
        let names: &[String] = if in_days {
            self.picker.holiday_names(self.picker.focus())
        } else {
            &[]
        };
        if names.is_empty() {
            String::from("Press ? for help")
        } else {
            format!("{}: {}", self.picker.focus(), names.join(", "))
        }
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, BASE_STYLE);
        let [main, status] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(area);
        let [_, main] =
            Layout::vertical([Constraint::Length(1), Constraint::Fill(1)]).areas(main);
        let [picker_area] = Layout::horizontal([POPOVER_WIDTH])
            .flex(Flex::Center)
            .areas(main);
        PickerWidget::new(&self.picker).render(picker_area, buf);
        Paragraph::new(self.status_line()).render(status, buf);
        if self.state == AppState::Helping {
            Help::new(BASE_STYLE, &self.picker.locale().parse_examples).render(area, buf);
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum AppState {
    Editing,
    Helping,
    Quitting,
}

/// Hand a change of value to the host, which for this program only logs it
fn report(output: PickerOutput) {
    if let PickerOutput::Changed(date) = output {
        log::info!("Value changed to {date}");
    }
}
