//! Query bar widget: the search box at the bottom of the screen.
//!
//! # Editing
//!
//! - `Char(c)` inserts at the cursor.
//! - `Backspace` deletes the character before the cursor.
//! - `Nav(Left)` / `Nav(Right)` move the cursor.
//!
//! The right edge shows how many `field:value` conditions the current text
//! parses into, so dropped segments (`justtext`, `name:`) are visible.

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use flatsearch_core::{append_token, Query};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction as LayoutDir, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct QueryBarState {
    /// The query typed by the user.
    pub query: String,
    /// Byte offset of the cursor within `query`.
    pub cursor: usize,
}

impl QueryBarState {
    pub fn new(query: impl Into<String>) -> Self {
        let query = query.into();
        let cursor = query.len();
        Self { query, cursor }
    }

    /// Handle a key event from the app shell. Returns `true` when the query
    /// text changed and the list needs re-filtering.
    pub fn handle(&mut self, event: &AppEvent) -> bool {
        match event {
            AppEvent::Char(c) => {
                self.query.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                tracing::debug!(query = %self.query, cursor = self.cursor, "query: char inserted");
                true
            }
            AppEvent::Backspace => {
                if self.cursor == 0 {
                    return false;
                }
                let prev = self.query[..self.cursor]
                    .char_indices()
                    .last()
                    .map(|(i, _)| i)
                    .unwrap_or(0);
                self.query.remove(prev);
                self.cursor = prev;
                tracing::debug!(query = %self.query, cursor = self.cursor, "query: backspace");
                true
            }
            AppEvent::Nav(Direction::Left) => {
                if self.cursor > 0 {
                    self.cursor = self.query[..self.cursor]
                        .char_indices()
                        .last()
                        .map(|(i, _)| i)
                        .unwrap_or(0);
                }
                false
            }
            AppEvent::Nav(Direction::Right) => {
                if self.cursor < self.query.len() {
                    self.cursor = self.query[self.cursor..]
                        .char_indices()
                        .nth(1)
                        .map(|(i, _)| self.cursor + i)
                        .unwrap_or(self.query.len());
                }
                false
            }
            _ => false,
        }
    }

    /// Append a palette token (`house.year:`), separated by `/` unless the
    /// query is empty, and park the cursor at the end so the value can be
    /// typed straight away.
    pub fn append_token(&mut self, token: &str) {
        self.query = append_token(&self.query, token);
        self.cursor = self.query.len();
        tracing::debug!(query = %self.query, token, "query: token appended");
    }

    pub fn clear(&mut self) {
        self.query.clear();
        self.cursor = 0;
    }

    /// Parse the current text.
    pub fn parsed(&self) -> Query {
        Query::parse(&self.query)
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct QueryBar<'a> {
    state: &'a QueryBarState,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> QueryBar<'a> {
    pub fn new(state: &'a QueryBarState, focused: bool, theme: &'a Theme) -> Self {
        Self { state, focused, theme }
    }

    /// Absolute terminal position of the text cursor within this widget's
    /// rendered area. Pass to `frame.set_cursor_position()` after rendering.
    pub fn cursor_position(&self, area: Rect) -> (u16, u16) {
        // The block adds 1-cell borders; text starts at (area.x+1, area.y+1).
        let chars = self.state.query[..self.state.cursor].chars().count();
        let col = u16::try_from(chars).unwrap_or(u16::MAX);
        let x = area
            .x
            .saturating_add(1)
            .saturating_add(col)
            .min(area.right().saturating_sub(1));
        let y = area.y.saturating_add(1);
        (x, y)
    }
}

impl Widget for QueryBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title("Search")
            .border_style(self.theme.border(self.focused));

        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::default()
            .direction(LayoutDir::Horizontal)
            .constraints([Constraint::Fill(1), Constraint::Length(16)])
            .split(inner);

        let query_line = if self.state.query.is_empty() && !self.focused {
            Line::from(Span::styled(
                "press / to search  (field:value/field:value)",
                Style::default().add_modifier(Modifier::DIM),
            ))
        } else {
            Line::from(self.state.query.as_str())
        };
        Paragraph::new(query_line).render(chunks[0], buf);

        let n = self.state.parsed().conditions().len();
        let summary = match n {
            0 => "no conditions".to_string(),
            1 => "1 condition".to_string(),
            n => format!("{n} conditions"),
        };
        Paragraph::new(Line::from(Span::styled(
            summary,
            Style::default().add_modifier(Modifier::DIM),
        )))
        .right_aligned()
        .render(chunks[1], buf);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn type_str(state: &mut QueryBarState, s: &str) {
        for c in s.chars() {
            state.handle(&AppEvent::Char(c));
        }
    }

    #[test]
    fn typing_and_backspace_edit_at_cursor() {
        let mut s = QueryBarState::default();
        type_str(&mut s, "name:fo");
        assert!(s.handle(&AppEvent::Backspace));
        assert_eq!(s.query, "name:f");
        s.handle(&AppEvent::Nav(Direction::Left));
        type_str(&mut s, "x");
        assert_eq!(s.query, "name:xf");
    }

    #[test]
    fn cursor_moves_over_multibyte_chars() {
        let mut s = QueryBarState::new("вид");
        s.handle(&AppEvent::Nav(Direction::Left));
        assert_eq!(s.cursor, "ви".len());
        assert!(s.handle(&AppEvent::Backspace));
        assert_eq!(s.query, "вд");
    }

    #[test]
    fn navigation_does_not_report_change() {
        let mut s = QueryBarState::new("a");
        assert!(!s.handle(&AppEvent::Nav(Direction::Left)));
        assert!(!s.handle(&AppEvent::Backspace));
    }

    #[test]
    fn append_token_joins_with_slash() {
        let mut s = QueryBarState::default();
        s.append_token("isNew:");
        type_str(&mut s, "true");
        s.append_token("house.year:");
        assert_eq!(s.query, "isNew:true/house.year:");
        assert_eq!(s.cursor, s.query.len());
        // The dangling token has no value yet and is dropped by the parser.
        assert_eq!(s.parsed().conditions().len(), 1);
    }

    #[test]
    fn cursor_stays_inside_the_box_for_huge_queries() {
        let theme = Theme::load_default();
        let area = Rect::new(u16::MAX - 100, 5, 80, 3);
        let s = QueryBarState::new("x".repeat(70_000));
        let (x, y) = QueryBar::new(&s, true, &theme).cursor_position(area);
        assert_eq!(x, area.right() - 1);
        assert_eq!(y, 6);
    }
}
