//! Help popup: centred floating overlay listing all keybindings.
//!
//! Toggle with `?`; close with `?` or `Escape`.

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph, Widget},
};

const BINDINGS: &[(&str, &str)] = &[
    ("q  /  Ctrl+c", "Quit"),
    ("Tab", "Cycle focus: list → fields → search"),
    ("/", "Focus search bar"),
    ("Escape", "Leave search bar"),
    ("Ctrl+l", "Clear the search"),
    ("↑ k  /  ↓ j", "Select card or field"),
    ("← h  /  → l", "Page (list) or collapse/expand (fields)"),
    ("Enter", "Append field to the search"),
    ("PageUp  /  Ctrl+u", "Previous page"),
    ("PageDown / Ctrl+d", "Next page"),
    ("r", "Reload flats from the source"),
    (":", "Command line (q, help, theme, clear, reload, page, fields)"),
    ("?", "Toggle this help popup"),
];

const SYNTAX: &str = "Search: field:value/field:value, e.g. isNew:true/house.year:2010";

pub struct HelpPopup<'a> {
    theme: &'a Theme,
}

impl<'a> HelpPopup<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }
}

impl Widget for HelpPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup = centered_rect(88, BINDINGS.len() as u16 + 4, area);
        Clear.render(popup, buf);

        let block = Block::bordered()
            .title(" flatsearch keybindings (? to close) ")
            .border_style(self.theme.border_focused);

        let inner = block.inner(popup);
        block.render(popup, buf);

        let mut lines: Vec<Line> = BINDINGS
            .iter()
            .map(|(key, desc)| {
                Line::from(vec![
                    Span::styled(format!("  {key:<22}"), self.theme.card_label),
                    Span::raw(*desc),
                ])
            })
            .collect();
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            format!("  {SYNTAX}"),
            self.theme.card_value,
        )));

        Paragraph::new(lines).render(inner, buf);
    }
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}
