//! Field palette: canned `field:` tokens grouped by the object they address.
//!
//! Tokens come from `[search] fields` in the config. A token whose path has a
//! dot (`house.year:`) is grouped under its first segment; all others go under
//! `flat`. Activating a token appends it to the query bar.
//!
//! # Navigation
//! - `↑`/`k` and `↓`/`j` move the cursor over the visible rows.
//! - `→`/`l` expands the group under the cursor; `←`/`h` collapses it.
//! - `Enter` on a group toggles it; on a token it yields the token.

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, List, ListItem, ListState, StatefulWidget, Widget},
};

/// Group name for tokens addressing top-level fields.
const ROOT_GROUP: &str = "flat";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldGroup {
    pub name: String,
    pub tokens: Vec<String>,
    pub expanded: bool,
}

/// One visible palette row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Row<'a> {
    Group(usize, &'a FieldGroup),
    Token(&'a str),
}

#[derive(Debug, Default)]
pub struct FieldPaletteState {
    pub groups: Vec<FieldGroup>,
    /// Index into the currently-visible (flattened) rows.
    pub cursor: usize,
}

impl FieldPaletteState {
    /// Group `tokens` by their first path segment, preserving first-seen
    /// order of groups and tokens.
    pub fn new<S: AsRef<str>>(tokens: &[S]) -> Self {
        let mut groups: Vec<FieldGroup> = Vec::new();
        for token in tokens {
            let token = token.as_ref();
            let name = group_of(token);
            match groups.iter_mut().find(|g| g.name == name) {
                Some(group) => group.tokens.push(token.to_string()),
                None => groups.push(FieldGroup {
                    name: name.to_string(),
                    tokens: vec![token.to_string()],
                    expanded: true,
                }),
            }
        }
        Self { groups, cursor: 0 }
    }

    fn rows(&self) -> Vec<Row<'_>> {
        let mut out = Vec::new();
        for (i, group) in self.groups.iter().enumerate() {
            out.push(Row::Group(i, group));
            if group.expanded {
                out.extend(group.tokens.iter().map(|t| Row::Token(t.as_str())));
            }
        }
        out
    }

    /// Group index the cursor row belongs to.
    fn cursor_group(&self) -> Option<usize> {
        let rows = self.rows();
        let last = self.cursor.min(rows.len().checked_sub(1)?);
        rows[..=last]
            .iter()
            .rev()
            .find_map(|row| match row {
                Row::Group(i, _) => Some(*i),
                Row::Token(_) => None,
            })
    }

    /// Handle an [`AppEvent`]. Returns the token to append when `Enter` is
    /// pressed on a token row.
    pub fn handle(&mut self, event: &AppEvent) -> Option<String> {
        match event {
            AppEvent::Nav(Direction::Up) => {
                self.cursor = self.cursor.saturating_sub(1);
                tracing::debug!(cursor = self.cursor, "palette: cursor up");
            }
            AppEvent::Nav(Direction::Down) => {
                let max = self.rows().len().saturating_sub(1);
                if self.cursor < max {
                    self.cursor += 1;
                }
                tracing::debug!(cursor = self.cursor, "palette: cursor down");
            }
            AppEvent::Nav(Direction::Right) => self.set_expanded(true),
            AppEvent::Nav(Direction::Left) => self.set_expanded(false),
            AppEvent::Enter => {
                let token = match self.rows().get(self.cursor) {
                    Some(Row::Token(token)) => Some(token.to_string()),
                    Some(Row::Group(i, _)) => {
                        let i = *i;
                        self.groups[i].expanded = !self.groups[i].expanded;
                        None
                    }
                    None => None,
                };
                if let Some(ref token) = token {
                    tracing::debug!(token = %token, "palette: token chosen");
                }
                self.clamp_cursor();
                return token;
            }
            _ => {}
        }
        None
    }

    /// Expand or collapse the group under the cursor. Collapsing moves the
    /// cursor onto the group header.
    fn set_expanded(&mut self, expanded: bool) {
        let Some(i) = self.cursor_group() else {
            return;
        };
        tracing::debug!(group = %self.groups[i].name, expanded, "palette: toggle group");
        self.groups[i].expanded = expanded;
        if !expanded {
            self.cursor = self
                .rows()
                .iter()
                .position(|row| matches!(row, Row::Group(g, _) if *g == i))
                .unwrap_or(0);
        }
        self.clamp_cursor();
    }

    fn clamp_cursor(&mut self) {
        let max = self.rows().len().saturating_sub(1);
        if self.cursor > max {
            self.cursor = max;
        }
    }
}

fn group_of(token: &str) -> &str {
    let field = token.split(':').next().unwrap_or(token);
    match field.split_once('.') {
        Some((head, _)) if !head.is_empty() => head,
        _ => ROOT_GROUP,
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct FieldPalette<'a> {
    state: &'a FieldPaletteState,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> FieldPalette<'a> {
    pub fn new(state: &'a FieldPaletteState, focused: bool, theme: &'a Theme) -> Self {
        Self { state, focused, theme }
    }
}

impl Widget for FieldPalette<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title("Fields")
            .border_style(self.theme.border(self.focused));

        let inner = block.inner(area);
        block.render(area, buf);

        let items: Vec<ListItem> = self
            .state
            .rows()
            .into_iter()
            .map(|row| match row {
                Row::Group(_, group) => {
                    let marker = if group.expanded { "▼ " } else { "▶ " };
                    ListItem::new(Line::from(Span::styled(
                        format!("{marker}{}", group.name),
                        self.theme.palette_group,
                    )))
                }
                Row::Token(token) => ListItem::new(Line::from(Span::styled(
                    format!("    {token}"),
                    self.theme.palette_token,
                ))),
            })
            .collect();

        let mut list = List::new(items);
        if self.focused {
            list = list.highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        }

        let mut list_state = ListState::default().with_selected(Some(self.state.cursor));
        StatefulWidget::render(list, inner, buf, &mut list_state);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
