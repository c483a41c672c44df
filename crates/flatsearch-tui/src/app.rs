//! Top-level application state and the main event loop.
//!
//! [`App::run`] sets up the terminal, drives the crossterm event loop, and
//! tears everything down cleanly on exit or panic. Feed reloads run on the
//! tokio runtime and are drained from a channel once per tick, so the loop
//! itself never blocks on I/O.

use crate::{
    commands::{execute_command, Command},
    event::{self, AppEvent},
    theme::Theme,
    widgets::{
        command_bar::{CommandBar, CommandBarState},
        field_palette::{FieldPalette, FieldPaletteState},
        flat_list::{FlatList, FlatListState, LoadState},
        help::HelpPopup,
        query_bar::{QueryBar, QueryBarState},
        status_bar::StatusBar,
    },
};
use crossterm::{
    event::{self as ct_event, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use flatsearch_core::{config::Config, Listing};
use flatsearch_feeds::{spawn_reload, FeedError, FeedUpdate, FileWatcher, Source};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction as LayoutDir, Layout, Rect},
    Frame, Terminal,
};
use std::{io, sync::Arc, time::Duration};
use tokio::{runtime::Handle, sync::mpsc};

/// Width of the field palette column, wide enough for the longest token.
const PALETTE_WIDTH: u16 = 34;

// ---------------------------------------------------------------------------
// Focus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    List,
    Palette,
    QueryBar,
    /// Vim-style `:` command line is active.
    Command,
}

// ---------------------------------------------------------------------------
// Feed link
// ---------------------------------------------------------------------------

/// The record source plus the channels its background loads report on.
pub struct Feed {
    pub source: Arc<Source>,
    handle: Handle,
    tx: mpsc::UnboundedSender<FeedUpdate>,
    rx: mpsc::UnboundedReceiver<FeedUpdate>,
    changes: Option<mpsc::UnboundedReceiver<()>>,
    _watcher: Option<FileWatcher>,
}

impl Feed {
    pub fn new(source: Arc<Source>, handle: Handle) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            source,
            handle,
            tx,
            rx,
            changes: None,
            _watcher: None,
        }
    }

    /// Start watching the source for changes. A no-op for sources that
    /// cannot be watched.
    pub fn watch(&mut self) -> Result<(), FeedError> {
        let (tx, rx) = mpsc::unbounded_channel();
        if let Some(watcher) = self.source.watch(tx)? {
            self._watcher = Some(watcher);
            self.changes = Some(rx);
        }
        Ok(())
    }

    fn reload(&self) {
        spawn_reload(&self.handle, Arc::clone(&self.source), self.tx.clone());
    }

    /// Pending load outcomes, oldest first.
    fn updates(&mut self) -> Vec<FeedUpdate> {
        std::iter::from_fn(|| self.rx.try_recv().ok()).collect()
    }

    /// Whether the watched source changed since the last call. Bursts of
    /// events collapse into one.
    fn changed(&mut self) -> bool {
        let Some(rx) = self.changes.as_mut() else {
            return false;
        };
        let mut changed = false;
        while rx.try_recv().is_ok() {
            changed = true;
        }
        changed
    }
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

pub struct AppState {
    pub feed: Feed,
    pub source_label: String,
    pub list: FlatListState,
    pub palette: FieldPaletteState,
    pub query: QueryBarState,
    pub focus: Focus,
    /// Focus state before entering command mode, restored on exit.
    pub prev_focus: Focus,
    pub theme: Theme,
    pub config: Config,
    pub show_help: bool,
    pub show_palette: bool,
    /// One-off message for the status bar, cleared by the next load.
    pub notice: Option<String>,
    /// A reload was requested while another load was still in flight.
    pub reload_pending: bool,
    pub command_bar: CommandBarState,
    pub quit: bool,
}

impl AppState {
    /// Build the state. With `listings == None` the list starts in the
    /// loading state and the first load is spawned immediately.
    pub fn new(
        listings: Option<Vec<Listing>>,
        feed: Feed,
        config: Config,
        theme: Theme,
        query: &str,
    ) -> Self {
        let loaded = listings.is_some();
        let mut list = FlatListState::new(listings.unwrap_or_default(), config.ui.items_per_page);
        list.show_creation_date = config.ui.show_creation_date;

        let query = QueryBarState::new(query);
        list.apply_query(&query.parsed());

        let mut state = AppState {
            source_label: feed.source.to_string(),
            feed,
            list,
            palette: FieldPaletteState::new(&config.search.fields),
            query,
            focus: Focus::List,
            prev_focus: Focus::List,
            theme,
            show_help: false,
            show_palette: config.ui.palette_visible,
            notice: None,
            reload_pending: false,
            command_bar: CommandBarState::default(),
            quit: false,
            config,
        };
        if !loaded {
            state.request_reload();
        }
        state
    }

    /// Load the collection again in the background. Sources that can only be
    /// read once leave the current collection in place.
    ///
    /// At most one load runs at a time, so results always arrive in request
    /// order. Requests made while a load is in flight collapse into a single
    /// follow-up load started when the current one reports back.
    pub fn request_reload(&mut self) {
        if !self.feed.source.is_reloadable() {
            tracing::debug!(source = %self.source_label, "reload refused");
            self.notice = Some(format!("{} cannot be reloaded", self.source_label));
            return;
        }
        if self.list.load == LoadState::Loading {
            tracing::debug!(source = %self.source_label, "reload queued behind running load");
            self.reload_pending = true;
            return;
        }
        tracing::debug!(source = %self.source_label, "reload requested");
        self.list.load = LoadState::Loading;
        self.feed.reload();
    }

    pub fn apply_update(&mut self, update: FeedUpdate) {
        match update {
            FeedUpdate::Loaded(listings) => {
                tracing::info!(count = listings.len(), "flats loaded");
                self.notice = None;
                let query = self.query.parsed();
                self.list.replace(listings, &query);
            }
            FeedUpdate::Failed(e) => {
                tracing::warn!(error = %e, "flats failed to load");
                self.list.load = LoadState::Failed(e.to_string());
            }
        }
        if std::mem::take(&mut self.reload_pending) {
            self.request_reload();
        }
    }

    pub fn clear_query(&mut self) {
        self.query.clear();
        self.refilter();
    }

    fn refilter(&mut self) {
        let query = self.query.parsed();
        self.list.apply_query(&query);
    }

    /// Drain background loads and watch notifications.
    fn pump_feed(&mut self) {
        for update in self.feed.updates() {
            self.apply_update(update);
        }
        if self.feed.changed() {
            tracing::debug!(source = %self.source_label, "source changed on disk");
            self.request_reload();
        }
    }

    fn next_focus(&self) -> Focus {
        match self.focus {
            Focus::List if self.show_palette => Focus::Palette,
            Focus::List | Focus::Palette => Focus::QueryBar,
            Focus::QueryBar | Focus::Command => Focus::List,
        }
    }

    /// Handle one semantic event.
    pub fn handle(&mut self, event: AppEvent) {
        let s = self;

        // Help popup intercepts all events; only close keys pass through.
        if s.show_help {
            match event {
                AppEvent::Char('?') | AppEvent::Escape | AppEvent::Quit => {
                    tracing::debug!("help popup closed");
                    s.show_help = false;
                }
                _ => {}
            }
            return;
        }

        // Command mode intercepts all events.
        if s.focus == Focus::Command {
            match event {
                AppEvent::Escape => {
                    tracing::debug!("command bar cancelled");
                    s.command_bar.clear();
                    s.focus = s.prev_focus;
                }
                AppEvent::Quit => s.quit = true,
                AppEvent::Enter => {
                    let input = s.command_bar.input.clone();
                    match Command::parse(&input) {
                        Ok(cmd) => {
                            tracing::debug!(command = ?cmd, "executing command");
                            s.command_bar.clear();
                            s.focus = s.prev_focus;
                            execute_command(s, cmd);
                        }
                        Err(msg) if msg.is_empty() => {
                            // Empty input: just close
                            s.command_bar.clear();
                            s.focus = s.prev_focus;
                        }
                        Err(msg) => {
                            // Show the error; bar stays open
                            s.command_bar.error = Some(msg);
                        }
                    }
                }
                other => s.command_bar.handle(&other),
            }
            return;
        }

        match event {
            AppEvent::Char('?') if s.focus != Focus::QueryBar => {
                tracing::debug!("help popup opened");
                s.show_help = true;
            }

            AppEvent::Char(':') if s.focus != Focus::QueryBar => {
                tracing::debug!(prev_focus = ?s.focus, "entering command mode");
                s.prev_focus = s.focus;
                s.command_bar.clear();
                s.focus = Focus::Command;
            }

            AppEvent::Quit => {
                tracing::debug!("quit");
                s.quit = true;
            }

            AppEvent::Escape | AppEvent::Enter if s.focus == Focus::QueryBar => {
                tracing::debug!("focus: QueryBar -> List");
                s.focus = Focus::List;
            }

            AppEvent::FocusNext => {
                let next = s.next_focus();
                tracing::debug!(from = ?s.focus, to = ?next, "focus cycle");
                s.focus = next;
            }

            AppEvent::QueryFocus => {
                tracing::debug!("focus -> QueryBar");
                s.focus = Focus::QueryBar;
            }

            AppEvent::ClearQuery => s.clear_query(),
            AppEvent::Reload => s.request_reload(),

            // Paging works regardless of focus
            AppEvent::PagePrev | AppEvent::PageNext => s.list.handle(&event),

            // Terminal resize is handled automatically by ratatui
            AppEvent::Resize(_, _) => {}

            other => dispatch_to_focused(s, other),
        }
    }
}

/// Route an event to the widget that owns the current focus.
fn dispatch_to_focused(s: &mut AppState, event: AppEvent) {
    match s.focus {
        Focus::List => s.list.handle(&event),
        Focus::Palette => {
            if let Some(token) = s.palette.handle(&event) {
                s.query.append_token(&token);
                s.refilter();
                s.focus = Focus::QueryBar;
            }
        }
        Focus::QueryBar => {
            if s.query.handle(&event) {
                s.refilter();
            }
        }
        Focus::Command => {} // handled before dispatch, should not reach here
    }
}

/// Returns true when the current focus is on a text-input widget, meaning
/// alphabetic keys should produce characters rather than trigger shortcuts.
fn is_insert_mode(focus: Focus) -> bool {
    matches!(focus, Focus::QueryBar | Focus::Command)
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    state: AppState,
}

impl App {
    pub fn new(state: AppState) -> Self {
        App { state }
    }

    /// Set up the terminal, run the event loop, and restore the terminal on exit.
    pub fn run(mut self) -> anyhow::Result<()> {
        install_panic_hook();

        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal);

        // Always restore terminal, even if the loop returned an error
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = terminal.show_cursor();

        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        loop {
            self.state.pump_feed();

            {
                let s = &self.state;
                terminal.draw(|frame| draw(frame, s))?;
            }

            if self.state.quit {
                break;
            }

            if ct_event::poll(Duration::from_millis(16))? {
                match ct_event::read()? {
                    Event::Key(key) if key.kind == crossterm::event::KeyEventKind::Press => {
                        let raw = Event::Key(key);
                        // Use insert-mode mapping when a text widget is focused
                        let app_event = if is_insert_mode(self.state.focus) {
                            event::to_app_event_insert(raw)
                        } else {
                            event::to_app_event(raw)
                        };
                        if let Some(ev) = app_event {
                            tracing::debug!(
                                focus = ?self.state.focus,
                                event = ?ev,
                                "key event"
                            );
                            self.state.handle(ev);
                        }
                    }
                    other => {
                        if let Some(ev) = event::to_app_event(other) {
                            self.state.handle(ev);
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn draw(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    // Vertical: 1-line status bar | body | 3-line query bar
    let vert = Layout::default()
        .direction(LayoutDir::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(3),
        ])
        .split(area);

    frame.render_widget(
        StatusBar::new(
            &state.source_label,
            &state.list,
            state.notice.as_deref(),
            &state.theme,
        ),
        vert[0],
    );

    let list_area = if state.show_palette {
        let horiz = Layout::default()
            .direction(LayoutDir::Horizontal)
            .constraints([Constraint::Length(PALETTE_WIDTH), Constraint::Fill(1)])
            .split(vert[1]);
        frame.render_widget(
            FieldPalette::new(&state.palette, state.focus == Focus::Palette, &state.theme),
            horiz[0],
        );
        horiz[1]
    } else {
        vert[1]
    };

    frame.render_widget(
        FlatList::new(&state.list, state.focus == Focus::List, &state.theme),
        list_area,
    );
    frame.render_widget(
        QueryBar::new(&state.query, state.focus == Focus::QueryBar, &state.theme),
        vert[2],
    );

    if state.show_help {
        frame.render_widget(HelpPopup::new(&state.theme), area);
    }

    // Command bar overlays the bottom row of the screen
    if state.focus == Focus::Command {
        let cmd_area = Rect { y: area.bottom().saturating_sub(1), height: 1, ..area };
        frame.render_widget(CommandBar::new(&state.command_bar, &state.theme), cmd_area);
        let col = state.command_bar.cursor_col(cmd_area);
        frame.set_cursor_position((col, cmd_area.y));
        return; // cursor is set; skip query-bar cursor below
    }

    if state.focus == Focus::QueryBar {
        let qb = QueryBar::new(&state.query, true, &state.theme);
        let (cx, cy) = qb.cursor_position(vert[2]);
        frame.set_cursor_position((cx, cy));
    }
}

// ---------------------------------------------------------------------------
// Terminal helpers
// ---------------------------------------------------------------------------

fn install_panic_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original(info);
    }));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
