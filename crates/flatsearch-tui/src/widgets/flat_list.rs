//! Flat list widget: the paginated card view in the main pane.
//!
//! # Navigation (when pane is focused)
//!
//! | Key | Action |
//! |-----|--------|
//! | `↑` / `k` | Select the previous card (wraps to the previous page) |
//! | `↓` / `j` | Select the next card (wraps to the next page) |
//! | `←` / `h`, `PageUp` / `Ctrl+u` | Previous page |
//! | `→` / `l`, `PageDown` / `Ctrl+d` | Next page |
//!
//! # Paging semantics
//!
//! `matched` holds indices into `listings` of the records that satisfy the
//! current query, in collection order. `page` is 0-based; a page is a
//! `items_per_page`-long window over `matched`. There is always at least one
//! page, even when nothing matches.

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use chrono::{DateTime, Local, NaiveDateTime};
use flatsearch_core::{stringify, Document, Flat, Listing, Query};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget, Wrap},
};
use serde_json::Value;

/// Rows taken by one card: four content lines plus the border.
const CARD_HEIGHT: u16 = 6;
const CARD_LINES: usize = 4;
const DATE_FORMAT: &str = "%d.%m.%Y, %H:%M:%S";

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Ready,
    Loading,
    Failed(String),
}

#[derive(Debug)]
pub struct FlatListState {
    listings: Vec<Listing>,
    /// Indices into `listings` that satisfy the current query.
    matched: Vec<usize>,
    /// 0-based page index.
    pub page: usize,
    /// Index of the highlighted card within the current page.
    pub selected: usize,
    pub items_per_page: usize,
    pub show_creation_date: bool,
    pub load: LoadState,
}

impl FlatListState {
    pub fn new(listings: Vec<Listing>, items_per_page: usize) -> Self {
        let matched = (0..listings.len()).collect();
        Self {
            listings,
            matched,
            page: 0,
            selected: 0,
            items_per_page: items_per_page.max(1),
            show_creation_date: true,
            load: LoadState::Ready,
        }
    }

    /// Re-run `query` after the query text changed. Goes back to the first
    /// page since the old page position means nothing for the new result.
    pub fn apply_query(&mut self, query: &Query) {
        self.recompute(query);
        self.page = 0;
        self.selected = 0;
    }

    /// Swap in a freshly loaded collection, keeping the page position where
    /// it still exists.
    pub fn replace(&mut self, listings: Vec<Listing>, query: &Query) {
        self.listings = listings;
        self.load = LoadState::Ready;
        self.recompute(query);
        self.clamp();
    }

    fn recompute(&mut self, query: &Query) {
        self.matched = self
            .listings
            .iter()
            .enumerate()
            .filter(|(_, listing)| query.matches(*listing))
            .map(|(i, _)| i)
            .collect();
        tracing::debug!(
            query = %query,
            matched = self.matched.len(),
            total = self.listings.len(),
            "list: refiltered"
        );
    }

    fn clamp(&mut self) {
        self.page = self.page.min(self.page_count() - 1);
        self.selected = self
            .selected
            .min(self.page_items().len().saturating_sub(1));
    }

    pub fn total(&self) -> usize {
        self.listings.len()
    }

    pub fn matched_count(&self) -> usize {
        self.matched.len()
    }

    pub fn page_count(&self) -> usize {
        self.matched.len().div_ceil(self.items_per_page).max(1)
    }

    /// Listings on the current page, in collection order.
    pub fn page_items(&self) -> Vec<&Listing> {
        self.matched
            .iter()
            .skip(self.page * self.items_per_page)
            .take(self.items_per_page)
            .map(|&i| &self.listings[i])
            .collect()
    }

    pub fn selected_listing(&self) -> Option<&Listing> {
        self.page_items().get(self.selected).copied()
    }

    /// Jump to the 1-based page `n`, clamped to the available pages.
    pub fn go_to_page(&mut self, n: usize) {
        self.page = n.saturating_sub(1).min(self.page_count() - 1);
        self.selected = 0;
        tracing::debug!(page = self.page + 1, "list: go to page");
    }

    pub fn handle(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Nav(Direction::Up) => {
                if self.selected > 0 {
                    self.selected -= 1;
                } else if self.page > 0 {
                    self.page -= 1;
                    self.selected = self.page_items().len().saturating_sub(1);
                }
                tracing::debug!(page = self.page, selected = self.selected, "list: up");
            }
            AppEvent::Nav(Direction::Down) => {
                if self.selected + 1 < self.page_items().len() {
                    self.selected += 1;
                } else if self.page + 1 < self.page_count() {
                    self.page += 1;
                    self.selected = 0;
                }
                tracing::debug!(page = self.page, selected = self.selected, "list: down");
            }
            AppEvent::Nav(Direction::Left) | AppEvent::PagePrev => {
                self.page = self.page.saturating_sub(1);
                self.selected = 0;
                tracing::debug!(page = self.page, "list: previous page");
            }
            AppEvent::Nav(Direction::Right) | AppEvent::PageNext => {
                if self.page + 1 < self.page_count() {
                    self.page += 1;
                }
                self.selected = 0;
                tracing::debug!(page = self.page, "list: next page");
            }
            _ => {}
        }
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct FlatList<'a> {
    state: &'a FlatListState,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> FlatList<'a> {
    pub fn new(state: &'a FlatListState, focused: bool, theme: &'a Theme) -> Self {
        Self { state, focused, theme }
    }

    fn title(&self) -> Line<'static> {
        Line::from(vec![
            Span::raw(" Flats  "),
            Span::styled(
                format!(
                    "{}/{}",
                    self.state.matched_count(),
                    self.state.total()
                ),
                self.theme.status_matched,
            ),
            Span::raw(format!(
                "  page {}/{} ",
                self.state.page + 1,
                self.state.page_count()
            )),
        ])
    }
}

impl Widget for FlatList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(self.title())
            .border_style(self.theme.border(self.focused));
        let inner = block.inner(area);
        block.render(area, buf);

        let notice = match &self.state.load {
            LoadState::Loading => Some(Span::styled("Loading flats…", self.theme.status_loading)),
            LoadState::Failed(msg) => Some(Span::styled(
                format!("Failed to load flats: {msg}"),
                self.theme.status_error,
            )),
            LoadState::Ready if self.state.matched_count() == 0 => Some(Span::styled(
                "No flats match the query",
                Style::default().add_modifier(Modifier::DIM),
            )),
            LoadState::Ready => None,
        };
        if let Some(span) = notice {
            let row = Rect {
                y: inner.y + inner.height / 2,
                height: 1.min(inner.height),
                ..inner
            };
            Paragraph::new(Line::from(span))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .render(row, buf);
            return;
        }

        let items = self.state.page_items();
        let fits = usize::from((inner.height / CARD_HEIGHT).max(1));
        // Scroll just far enough to keep the selected card on screen.
        let first = (self.state.selected + 1).saturating_sub(fits);

        let visible = items.iter().enumerate().skip(first).take(fits);
        for (row, (index, listing)) in visible.enumerate() {
            let y = inner.y + row as u16 * CARD_HEIGHT;
            let card_area = Rect {
                y,
                height: CARD_HEIGHT.min(inner.bottom().saturating_sub(y)),
                ..inner
            };
            if card_area.height == 0 {
                break;
            }
            let selected = self.focused && index == self.state.selected;
            render_card(
                listing,
                selected,
                self.state.show_creation_date,
                self.theme,
                card_area,
                buf,
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Card rendering
// ---------------------------------------------------------------------------

fn render_card(
    listing: &Listing,
    selected: bool,
    show_creation_date: bool,
    theme: &Theme,
    area: Rect,
    buf: &mut Buffer,
) {
    let (title, lines) = match listing.flat() {
        Some(flat) => (
            format!(" {}  #{} ", flat.name, flat.id),
            flat_lines(flat, show_creation_date, theme),
        ),
        None => document_card(listing.document(), theme),
    };

    let mut block = Block::bordered()
        .title(Span::styled(title, theme.card_title))
        .border_style(theme.card_divider);
    if selected {
        block = block.style(theme.card_selected);
    }
    Paragraph::new(lines).block(block).render(area, buf);
}

fn field(label: &str, value: String, theme: &Theme) -> [Span<'static>; 2] {
    [
        Span::styled(format!("{label}: "), theme.card_label),
        Span::styled(value, theme.card_value),
    ]
}

fn gap() -> Span<'static> {
    Span::raw("   ")
}

fn yes_no(b: bool) -> String {
    let text = if b { "yes" } else { "no" };
    text.to_string()
}

/// Card body for a record with the flat shape.
pub(crate) fn flat_lines(flat: &Flat, show_creation_date: bool, theme: &Theme) -> Vec<Line<'static>> {
    let number = |n: f64| stringify(&Value::from(n));

    let mut first = Vec::new();
    first.extend(field("area", format!("{} m²", number(flat.area)), theme));
    first.push(gap());
    first.extend(field("price", format!("{} ₽", format_price(flat.price)), theme));
    first.push(gap());
    first.extend(field("rooms", flat.number_of_rooms.to_string(), theme));
    first.push(gap());
    first.extend(field(
        "metro",
        format!("{} min on foot", number(flat.time_to_metro_on_foot)),
        theme,
    ));

    let mut second = Vec::new();
    second.extend(field("balcony", yes_no(flat.balcony), theme));
    second.push(gap());
    second.extend(field("new build", yes_no(flat.is_new), theme));
    second.push(gap());
    second.extend(field("furnish", flat.furnish.to_string(), theme));
    second.push(gap());
    second.extend(field("view", flat.view.clone(), theme));

    let mut third = Vec::new();
    third.extend(field(
        "house",
        format!(
            "{} ({}, {} flats/floor)",
            flat.house.name, flat.house.year, flat.house.number_of_flats_on_floor
        ),
        theme,
    ));
    third.push(gap());
    third.extend(field(
        "coordinates",
        format!(
            "x: {}, y: {}",
            number(flat.coordinates.x),
            number(flat.coordinates.y)
        ),
        theme,
    ));

    let mut fourth = Vec::new();
    if show_creation_date {
        fourth.extend(field("created", format_creation_date(&flat.creation_date), theme));
        fourth.push(gap());
    }
    fourth.extend(field("owner", flat.owner_id.to_string(), theme));

    vec![
        Line::from(first),
        Line::from(second),
        Line::from(third),
        Line::from(fourth),
    ]
}

/// Title and body for a record without the flat shape: top-level fields as
/// `key: value` pairs, three per line.
pub(crate) fn document_card(document: &Value, theme: &Theme) -> (String, Vec<Line<'static>>) {
    let title = match document.get("id").filter(|v| !v.is_null()) {
        Some(id) => format!(" record #{} ", stringify(id)),
        None => " record ".to_string(),
    };

    let Value::Object(map) = document else {
        return (
            title,
            vec![Line::from(Span::styled(stringify(document), theme.card_value))],
        );
    };

    let pairs: Vec<_> = map
        .iter()
        .filter(|(key, _)| key.as_str() != "id")
        .collect();
    let lines = pairs
        .chunks(3)
        .take(CARD_LINES)
        .map(|chunk| {
            let mut spans = Vec::new();
            for (i, (key, value)) in chunk.iter().enumerate() {
                if i > 0 {
                    spans.push(gap());
                }
                spans.extend(field(key, stringify(value), theme));
            }
            Line::from(spans)
        })
        .collect();
    (title, lines)
}

/// Price with the integer part grouped into thousands: `1234567.5` becomes
/// `1 234 567.5`.
pub fn format_price(price: f64) -> String {
    let text = stringify(&Value::from(price));
    let (sign, digits) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (int, frac) = match digits.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (digits, None),
    };

    let mut grouped = String::with_capacity(int.len() + int.len() / 3);
    for (i, c) in int.chars().enumerate() {
        if i > 0 && (int.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(c);
    }

    match frac {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}

/// Render the backend's creation timestamp as `dd.mm.yyyy, HH:MM:SS`.
///
/// Offset-qualified timestamps are shown in local time; naive ones as sent.
/// Anything unparseable is shown verbatim.
pub fn format_creation_date(raw: &str) -> String {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return ts.with_timezone(&Local).format(DATE_FORMAT).to_string();
    }
    if let Ok(ts) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return ts.format(DATE_FORMAT).to_string();
    }
    raw.to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
