use ratatui::{
    buffer::Buffer,
    layout::Flex,
    layout::{Alignment, Layout, Rect},
    style::Style,
    text::{Line, Text},
    widgets::{Block, Clear, Paragraph, Widget},
};

static TEXT: &[&str] = &[
    "Input:",
    "  ENTER              Confirm the typed date",
    "  TAB                Open or close the calendar",
    "  ESC                Quit and print the date",
    "",
    "Calendar:",
    "  h j k l, ARROWS    Move the cursor",
    "  ENTER              Pick the date, month, or year",
    "  <, PAGE UP         Previous page",
    "  >, PAGE DOWN       Next page",
    "  v                  Show months, then years",
    "  t                  Pick today",
    "  ESC, TAB           Close the calendar",
    "",
    "?                    Show this help",
    "",
];

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct Help<'a> {
    style: Style,
    /// Sample inputs the parser understands
    examples: &'a [String],
}

impl<'a> Help<'a> {
    pub(crate) fn new(style: Style, examples: &'a [String]) -> Help<'a> {
        Help { style, examples }
    }
}

impl Widget for Help<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut lines = TEXT.iter().map(|&s| Line::raw(s)).collect::<Vec<_>>();
        if !self.examples.is_empty() {
            lines.push(Line::raw(format!("Examples: {}", self.examples.join(", "))));
            lines.push(Line::raw(""));
        }
        lines.push(Line::raw("Press the Any Key to dismiss."));
        let text = Text::from(lines);
        let height = u16::try_from(text.height())
            .unwrap_or(u16::MAX)
            .min(area.height)
            .saturating_add(2);
        let width = u16::try_from(text.width())
            .unwrap_or(u16::MAX)
            .min(area.width)
            .saturating_add(2);
        let para = Paragraph::new(text)
            .block(
                Block::bordered()
                    .title(" Commands ")
                    .title_alignment(Alignment::Center),
            )
            .style(self.style);
        let [help_area] = Layout::horizontal([width]).flex(Flex::Center).areas(area);
        let [help_area] = Layout::vertical([height])
            .flex(Flex::Center)
            .areas(help_area);
        let outer_area = Rect {
            x: help_area.x.saturating_sub(1),
            y: help_area.y,
            width: help_area.width.saturating_add(2),
            height: help_area.height,
        }
        .intersection(area);
        Clear.render(outer_area, buf);
        Block::new().style(self.style).render(outer_area, buf);
        para.render(help_area, buf);
    }
}
