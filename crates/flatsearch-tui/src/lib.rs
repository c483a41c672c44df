//! flatsearch TUI: ratatui application shell.

pub mod app;
pub mod commands;
pub mod event;
pub mod theme;
pub mod widgets;

pub use app::{App, AppState, Feed};

use flatsearch_core::{config::Config, Listing};
use flatsearch_feeds::Source;
use std::sync::Arc;

/// Everything the interactive browser needs to start.
pub struct RunOptions {
    /// Records already read by the caller. `None` starts the browser in the
    /// loading state and fetches from `source` in the background.
    pub listings: Option<Vec<Listing>>,
    pub source: Arc<Source>,
    pub config: Config,
    /// Initial search text.
    pub query: String,
    /// Reload whenever a file source changes on disk.
    pub watch: bool,
}

/// Run the browser until the user quits. Must be called from within a tokio
/// runtime; background loads are spawned on it.
pub fn run(opts: RunOptions) -> anyhow::Result<()> {
    let mut feed = Feed::new(opts.source, tokio::runtime::Handle::current());
    if opts.watch {
        feed.watch()?;
    }
    let theme = theme::Theme::by_name(&opts.config.ui.theme);
    let state = AppState::new(opts.listings, feed, opts.config, theme, &opts.query);
    App::new(state).run()
}
