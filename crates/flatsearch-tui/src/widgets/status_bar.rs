//! Status bar widget: the 1-line strip at the top of the screen.

use crate::theme::Theme;
use crate::widgets::flat_list::{FlatListState, LoadState};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

/// Renders the source label, load state and match counter on the left and
/// keybinding hints (`q:quit  ?:help`) right-aligned in the same row. A
/// one-off notice (e.g. a refused reload) replaces the counter.
pub struct StatusBar<'a> {
    source: &'a str,
    list: &'a FlatListState,
    notice: Option<&'a str>,
    theme: &'a Theme,
}

impl<'a> StatusBar<'a> {
    pub fn new(
        source: &'a str,
        list: &'a FlatListState,
        notice: Option<&'a str>,
        theme: &'a Theme,
    ) -> Self {
        Self { source, list, notice, theme }
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let state = match (&self.list.load, self.notice) {
            (_, Some(notice)) => Span::styled(notice.to_string(), self.theme.status_error),
            (LoadState::Ready, None) => Span::styled(
                format!("{} of {} flats", self.list.matched_count(), self.list.total()),
                self.theme.status_matched,
            ),
            (LoadState::Loading, None) => Span::styled("loading…", self.theme.status_loading),
            (LoadState::Failed(_), None) => Span::styled("load failed", self.theme.status_error),
        };

        let line = Line::from(vec![
            Span::styled(
                format!(" {} ", self.source),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled("│ ", Style::default().add_modifier(Modifier::DIM)),
            state,
        ]);
        buf.set_line(area.x, area.y, &line, area.width);

        let hint = " q:quit  ?:help ";
        let hint_x = area.right().saturating_sub(hint.len() as u16);
        buf.set_string(
            hint_x,
            area.y,
            hint,
            Style::default().add_modifier(Modifier::DIM),
        );
    }
}
